//! # AI Provider Factory
//!
//! Builds the configured AI provider so every consumer (the CLI, tests, an embedding web
//! layer) creates providers the same way.

use crate::{
    errors::BotError,
    providers::ai::{gemini::GeminiProvider, local::LocalAiProvider, AiProvider, GenerationParams},
};
use serde::Deserialize;
use std::time::Duration;
use tracing::info;

/// The default request timeout of provider HTTP clients.
pub const DEFAULT_PROVIDER_TIMEOUT_SECS: u64 = 30;

/// Connection settings for one AI provider.
#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
pub struct ProviderConfig {
    /// `gemini` or `local`.
    pub provider: String,
    pub api_url: Option<String>,
    pub api_key: Option<String>,
    pub model_name: Option<String>,
    pub timeout_secs: Option<u64>,
    /// Sampling temperature; 0.2 when unset.
    pub temperature: Option<f32>,
    /// Upper bound on generated tokens; 1024 when unset.
    pub max_tokens: Option<u32>,
}

impl ProviderConfig {
    /// The sampling settings, with defaults for what the config leaves out.
    pub fn generation_params(&self) -> GenerationParams {
        let defaults = GenerationParams::default();
        GenerationParams {
            temperature: self.temperature.unwrap_or(defaults.temperature),
            max_tokens: self.max_tokens.unwrap_or(defaults.max_tokens),
        }
    }
}

/// Creates the provider named by `config.provider`.
///
/// Gemini needs an API key; its URL is derived from the model name when not given.
/// A local provider needs an explicit URL.
pub fn create_provider(config: &ProviderConfig) -> Result<Box<dyn AiProvider>, BotError> {
    let timeout = Duration::from_secs(config.timeout_secs.unwrap_or(DEFAULT_PROVIDER_TIMEOUT_SECS));
    let params = config.generation_params();

    let provider: Box<dyn AiProvider> = match config.provider.as_str() {
        "gemini" => {
            let api_key = config.api_key.clone().ok_or_else(|| {
                BotError::MissingAiProvider("api_key must be set to use Gemini.".to_string())
            })?;
            let api_url = match &config.api_url {
                Some(url) => url.clone(),
                None => {
                    let model = config.model_name.as_deref().unwrap_or("gemini-2.0-flash");
                    format!(
                        "https://generativelanguage.googleapis.com/v1beta/models/{model}:generateContent"
                    )
                }
            };
            info!("Configuring Gemini provider with URL: {api_url}");
            Box::new(GeminiProvider::new(api_url, api_key, params, timeout)?)
        }
        "local" => {
            let api_url = config.api_url.clone().ok_or_else(|| {
                BotError::MissingAiProvider(
                    "api_url must be set for the local provider. Please set LOCAL_AI_API_URL in your .env file."
                        .to_string(),
                )
            })?;
            info!("Configuring Local AI provider with URL: {api_url}");
            Box::new(LocalAiProvider::new(
                api_url,
                config.api_key.clone(),
                config.model_name.clone(),
                params,
                timeout,
            )?)
        }
        other => {
            return Err(BotError::MissingAiProvider(format!(
                "unsupported AI provider '{other}'"
            )))
        }
    };

    Ok(provider)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gemini_requires_an_api_key() {
        let config = ProviderConfig {
            provider: "gemini".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            create_provider(&config),
            Err(BotError::MissingAiProvider(_))
        ));
    }

    #[test]
    fn local_requires_a_url() {
        let config = ProviderConfig {
            provider: "local".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            create_provider(&config),
            Err(BotError::MissingAiProvider(_))
        ));
    }

    #[test]
    fn unknown_provider_is_rejected() {
        let config = ProviderConfig {
            provider: "openai-ish".to_string(),
            ..Default::default()
        };
        assert!(create_provider(&config).is_err());
    }

    #[test]
    fn generation_params_fall_back_to_defaults() {
        let config = ProviderConfig {
            provider: "local".to_string(),
            temperature: Some(0.7),
            ..Default::default()
        };
        assert_eq!(
            config.generation_params(),
            GenerationParams {
                temperature: 0.7,
                max_tokens: 1024,
            }
        );
    }

    #[test]
    fn configured_providers_are_built() {
        let gemini = ProviderConfig {
            provider: "gemini".to_string(),
            api_key: Some("test-key".to_string()),
            model_name: Some("gemini-2.0-flash".to_string()),
            ..Default::default()
        };
        assert!(create_provider(&gemini).is_ok());

        let local = ProviderConfig {
            provider: "local".to_string(),
            api_url: Some("http://localhost:1234/v1/chat/completions".to_string()),
            timeout_secs: Some(5),
            ..Default::default()
        };
        assert!(create_provider(&local).is_ok());
    }
}
