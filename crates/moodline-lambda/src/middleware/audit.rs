use std::time::Instant;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use uuid::Uuid;

/// Request log for every route, public or protected.
///
/// Submission ids in the path are logged as `{id}`, so request logs cannot be
/// joined to stored screenings. Server errors are logged at warn.
pub async fn audit_log(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = route_shape(req.uri().path());
    let started = Instant::now();

    let response = next.run(req).await;

    let status = response.status();
    let elapsed_ms = started.elapsed().as_millis() as u64;
    if status.is_server_error() {
        tracing::warn!(
            method = %method,
            path = %path,
            status = status.as_u16(),
            elapsed_ms,
            "api_request"
        );
    } else {
        tracing::info!(
            method = %method,
            path = %path,
            status = status.as_u16(),
            elapsed_ms,
            "api_request"
        );
    }

    response
}

/// The request path with every UUID segment replaced by `{id}`.
pub fn route_shape(path: &str) -> String {
    path.split('/')
        .map(|segment| {
            if Uuid::parse_str(segment).is_ok() {
                "{id}"
            } else {
                segment
            }
        })
        .collect::<Vec<_>>()
        .join("/")
}
