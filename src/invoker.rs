//! Model invocation across the configured model list.
//!
//! Each model is tried with every [`CallStyle`] in order. The first reply wins
//! and no further models are contacted. Authentication failures stop the
//! whole invocation, since no other model or style can succeed with the same key.

use crate::openai::{ApiError, CallStyle, Message, OpenAiClient};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum InvokeError {
    #[error("No models configured")]
    NoModels,

    #[error("OpenAI rejected the API key ({model}, {style}): {source}")]
    Unauthorized {
        model: String,
        style: CallStyle,
        #[source]
        source: ApiError,
    },

    #[error("All model attempts failed. Last error ({model}, {style}): {source}")]
    Exhausted {
        model: String,
        style: CallStyle,
        #[source]
        source: ApiError,
    },
}

#[derive(Debug, Clone)]
pub struct ModelInvoker {
    client: OpenAiClient,
    models: Vec<String>,
}

impl ModelInvoker {
    pub fn new(client: OpenAiClient, models: Vec<String>) -> Self {
        Self { client, models }
    }

    pub async fn invoke(&self, messages: &[Message]) -> Result<String, InvokeError> {
        let mut last_failure: Option<(String, CallStyle, ApiError)> = None;

        for model in &self.models {
            for style in CallStyle::ORDER {
                debug!("Calling {} ({})", model, style);

                match self.client.complete(style, model, messages).await {
                    Ok(text) => return Ok(text),
                    Err(e) if e.is_auth_failure() => {
                        return Err(InvokeError::Unauthorized {
                            model: model.clone(),
                            style,
                            source: e,
                        });
                    }
                    Err(e) => {
                        warn!("{} ({}) failed: {}", model, style, e);
                        last_failure = Some((model.clone(), style, e));
                    }
                }
            }
        }

        match last_failure {
            Some((model, style, source)) => Err(InvokeError::Exhausted {
                model,
                style,
                source,
            }),
            None => Err(InvokeError::NoModels),
        }
    }
}
