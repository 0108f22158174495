use tracing_subscriber::EnvFilter;

use moodline_lambda::app;
use moodline_lambda::config::ServiceConfig;
use moodline_lambda::state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Structured JSON logging for CloudWatch
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let config = ServiceConfig::from_env()?;
    let state = AppState::from_config(&config).await?;

    lambda_http::run(app(state)).await.map_err(|e| eyre::eyre!(e))
}
