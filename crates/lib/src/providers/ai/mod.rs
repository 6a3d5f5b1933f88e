pub mod gemini;
pub mod local;

use crate::errors::BotError;
use async_trait::async_trait;
use dyn_clone::DynClone;
use std::fmt::Debug;

/// Sampling settings sent with every generation request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationParams {
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            temperature: 0.2,
            max_tokens: 1024,
        }
    }
}

/// A trait for interacting with an AI provider.
///
/// The bot only ever issues one request per fallback: a system instruction that pins the
/// model to the supplied school context, and the user's question wrapped with that context.
#[async_trait]
pub trait AiProvider: Send + Sync + Debug + DynClone {
    /// Generates a response from a given system and user prompt.
    async fn generate(&self, system_prompt: &str, user_prompt: &str)
        -> Result<String, BotError>;
}

dyn_clone::clone_trait_object!(AiProvider);
