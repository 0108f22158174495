use std::sync::Arc;

use moodline_advisor::ReportGenerator;
use moodline_advisor::config::build_aws_config;
use moodline_instruments::instruments::mdq;
use moodline_instruments::questionnaire::QuestionnaireDefinition;
use moodline_instruments::scoring::ScoringEngine;
use moodline_storage::{HistoryStore, MemoryHistoryStore, S3HistoryStore};
use tracing::{info, warn};

use crate::config::ServiceConfig;

/// Shared application state, injected into all route handlers via Axum state.
/// Read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub engine: ScoringEngine,
    pub generator: Arc<ReportGenerator>,
    pub history: Arc<dyn HistoryStore>,
}

impl AppState {
    pub fn new(
        definition: Arc<QuestionnaireDefinition>,
        generator: ReportGenerator,
        history: Arc<dyn HistoryStore>,
    ) -> Self {
        Self {
            engine: ScoringEngine::new(definition),
            generator: Arc::new(generator),
            history,
        }
    }

    pub async fn from_config(config: &ServiceConfig) -> eyre::Result<Self> {
        let definition = Arc::new(mdq::definition().with_thresholds(config.thresholds)?);
        let generator =
            ReportGenerator::from_config(config.advisor.clone(), Arc::clone(&definition)).await?;

        let history: Arc<dyn HistoryStore> = match &config.bucket {
            Some(bucket) => {
                let sdk_config = build_aws_config(&config.region, &config.credentials).await;
                info!(bucket = %bucket, "history stored in S3");
                Arc::new(S3HistoryStore::new(
                    moodline_storage::client::from_sdk_config(&sdk_config),
                    bucket.clone(),
                ))
            }
            None => {
                warn!("MOODLINE_BUCKET not set, history is kept in memory only");
                Arc::new(MemoryHistoryStore::new())
            }
        };

        Ok(Self::new(definition, generator, history))
    }
}
