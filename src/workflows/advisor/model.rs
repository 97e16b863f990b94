use crate::config::ModelConfig;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use tokio::runtime::Runtime;

#[derive(Debug, thiserror::Error)]
pub enum ModelGatewayError {
    #[error("model API key is not configured")]
    MissingApiKey,
    #[error("model request failed: {0}")]
    Transport(String),
    #[error("model runtime unavailable: {0}")]
    Runtime(String),
    #[error("model response carried no completion content")]
    EmptyCompletion,
}

/// Seam between the scoring pipeline and whatever invokes the language
/// model. One prompt in, one raw completion out, a single attempt per call.
pub trait ModelGateway: Debug + Send + Sync {
    fn complete(&self, prompt: &str) -> Result<String, ModelGatewayError>;
}

const SYSTEM_MESSAGE: &str = "You are a helpful assistant.";

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

/// Thin wrapper around an OpenAI-compatible chat completions endpoint
/// allowing synchronous workflows to invoke the model without exposing
/// async details.
pub struct OpenAiChatClient {
    config: ModelConfig,
    client: reqwest::Client,
    runtime: Runtime,
}

impl OpenAiChatClient {
    pub fn from_config(config: &ModelConfig) -> Result<Self, ModelGatewayError> {
        if config.api_key.is_none() {
            return Err(ModelGatewayError::MissingApiKey);
        }

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|err| ModelGatewayError::Transport(err.to_string()))?;
        let runtime =
            Runtime::new().map_err(|err| ModelGatewayError::Runtime(err.to_string()))?;

        Ok(Self {
            config: config.clone(),
            client,
            runtime,
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }
}

impl Debug for OpenAiChatClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiChatClient")
            .field("model", &self.config.model)
            .finish_non_exhaustive()
    }
}

impl ModelGateway for OpenAiChatClient {
    fn complete(&self, prompt: &str) -> Result<String, ModelGatewayError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(ModelGatewayError::MissingApiKey)?;

        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_MESSAGE,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: 0.0,
        };

        let response: ChatResponse = self
            .runtime
            .block_on(async {
                self.client
                    .post(self.endpoint())
                    .bearer_auth(api_key)
                    .json(&request)
                    .send()
                    .await?
                    .error_for_status()?
                    .json::<ChatResponse>()
                    .await
            })
            .map_err(|err| ModelGatewayError::Transport(err.to_string()))?;

        response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or(ModelGatewayError::EmptyCompletion)
    }
}
