use aws_sdk_bedrockruntime::Client;
use aws_sdk_bedrockruntime::types::{
    ContentBlock, ConversationRole, Message, SystemContentBlock,
};

use crate::config::{RemoteSettings, build_aws_config};
use crate::error::RemoteUnavailable;

pub use moodline_core::BoxFuture;

/// A remote model that writes narrative text from a prompt.
///
/// One call is one attempt: timeouts and retries belong to the caller.
pub trait NarrativeModel: Send + Sync {
    fn model_id(&self) -> &str;

    fn converse<'a>(
        &'a self,
        system_prompt: &'a str,
        prompt: &'a str,
    ) -> BoxFuture<'a, Result<String, RemoteUnavailable>>;
}

/// Bedrock Converse API.
#[derive(Debug, Clone)]
pub struct BedrockModel {
    client: Client,
    model_id: String,
}

impl BedrockModel {
    pub fn new(client: Client, model_id: impl Into<String>) -> Self {
        Self {
            client,
            model_id: model_id.into(),
        }
    }

    pub async fn from_settings(settings: &RemoteSettings) -> Self {
        let sdk_config = build_aws_config(&settings.region, &settings.credentials).await;
        Self::new(Client::new(&sdk_config), settings.model_id.clone())
    }
}

impl NarrativeModel for BedrockModel {
    fn model_id(&self) -> &str {
        &self.model_id
    }

    fn converse<'a>(
        &'a self,
        system_prompt: &'a str,
        prompt: &'a str,
    ) -> BoxFuture<'a, Result<String, RemoteUnavailable>> {
        Box::pin(async move {
            let response = self
                .client
                .converse()
                .model_id(&self.model_id)
                .system(SystemContentBlock::Text(system_prompt.to_string()))
                .messages(
                    Message::builder()
                        .role(ConversationRole::User)
                        .content(ContentBlock::Text(prompt.to_string()))
                        .build()
                        .map_err(|e| RemoteUnavailable::Invocation(e.to_string()))?,
                )
                .send()
                .await
                .map_err(|e| RemoteUnavailable::Invocation(e.into_service_error().to_string()))?;

            let output_message = response
                .output()
                .and_then(|o| o.as_message().ok())
                .ok_or(RemoteUnavailable::EmptyResponse)?;

            Ok(output_message
                .content()
                .iter()
                .filter_map(|block| {
                    if let ContentBlock::Text(text) = block {
                        Some(text.as_str())
                    } else {
                        None
                    }
                })
                .collect::<Vec<_>>()
                .join(""))
        })
    }
}
