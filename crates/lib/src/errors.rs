use thiserror::Error;

/// Custom error types for the library.
///
/// None of these reach the caller of `SchoolBot::handle`: a miss in the matcher is an
/// `Option`, and generation failures are turned into a fixed apology by the fallback.
#[derive(Error, Debug)]
pub enum BotError {
    #[error("Failed to build Reqwest client: {0}")]
    ReqwestClientBuild(reqwest::Error),
    #[error("Failed to send request to AI provider: {0}")]
    AiRequest(reqwest::Error),
    #[error("Failed to deserialize AI provider response: {0}")]
    AiDeserialization(reqwest::Error),
    #[error("AI provider returned an error: {0}")]
    AiApi(String),
    #[error("AI provider returned an empty response")]
    AiEmptyResponse,
    #[error("AI provider timed out after {0} seconds")]
    AiTimeout(u64),
    #[error("AI provider is not configured: {0}")]
    MissingAiProvider(String),
    #[error("Storage connection failed: {0}")]
    StorageConnection(String),
    #[error("Storage operation failed: {0}")]
    StorageOperationFailed(String),
    #[error("Storage provider is missing: {0}")]
    MissingStorage(&'static str),
    #[error("Malformed corpus: {0}")]
    MalformedCorpus(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),
}
