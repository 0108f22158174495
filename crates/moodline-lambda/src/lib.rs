//! moodline-lambda
//!
//! HTTP surface for screening: score, report, store, and read back history.
//! Runs under `lambda_http`; the router is exposed for in-process tests.

use axum::Router;
use axum::middleware as axum_mw;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

use state::AppState;

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let protected = Router::new()
        .route("/screenings", post(routes::screenings::create_screening))
        .route("/history", get(routes::history::list_history))
        .route("/history/report", post(routes::history::history_report))
        .route("/history/{id}", get(routes::history::get_submission))
        .route("/history/{id}/export", get(routes::history::export_submission))
        .route_layer(axum_mw::from_fn(middleware::auth::require_auth));

    Router::new()
        // Public
        .route("/health", get(routes::health::health_check))
        .route("/questionnaire", get(routes::questionnaire::get_questionnaire))
        .merge(protected)
        .layer(axum_mw::from_fn(middleware::audit::audit_log))
        .layer(cors)
        .with_state(state)
}
