use crate::{
    errors::BotError,
    providers::ai::{AiProvider, GenerationParams},
};
use async_trait::async_trait;
use reqwest::Client as ReqwestClient;
use serde::{Deserialize, Serialize};
use std::{fmt::Debug, time::Duration};

// --- OpenAI-compatible chat completion wire types ---

#[derive(Serialize)]
struct ChatRequest<'a> {
    messages: [ChatMessage<'a>; 2],
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<&'a str>,
    temperature: f32,
    max_tokens: u32,
    stream: bool,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize, Debug)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize, Debug)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Deserialize, Debug)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

/// A provider for a local or OpenAI-compatible `/chat/completions` endpoint
/// (LM Studio, Ollama, vLLM, ...).
#[derive(Clone, Debug)]
pub struct LocalAiProvider {
    client: ReqwestClient,
    api_url: String,
    api_key: Option<String>,
    model: Option<String>,
    params: GenerationParams,
}

impl LocalAiProvider {
    pub fn new(
        api_url: String,
        api_key: Option<String>,
        model: Option<String>,
        params: GenerationParams,
        timeout: Duration,
    ) -> Result<Self, BotError> {
        let client = ReqwestClient::builder()
            .timeout(timeout)
            .build()
            .map_err(BotError::ReqwestClientBuild)?;
        Ok(Self {
            client,
            api_url,
            api_key,
            model,
            params,
        })
    }
}

#[async_trait]
impl AiProvider for LocalAiProvider {
    async fn generate(&self, system_prompt: &str, user_prompt: &str) -> Result<String, BotError> {
        let body = ChatRequest {
            messages: [
                ChatMessage {
                    role: "system",
                    content: system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: user_prompt,
                },
            ],
            model: self.model.as_deref(),
            temperature: self.params.temperature,
            max_tokens: self.params.max_tokens,
            stream: false,
        };

        let mut request = self.client.post(&self.api_url).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.map_err(BotError::AiRequest)?;
        if !response.status().is_success() {
            return Err(BotError::AiApi(response.text().await.unwrap_or_default()));
        }

        let reply: ChatResponse = response
            .json()
            .await
            .map_err(BotError::AiDeserialization)?;

        // A missing choice or content is an empty answer.
        Ok(reply
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default())
    }
}
