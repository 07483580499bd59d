use thiserror::Error;

/// Errors raised while talking to a completion provider.
#[derive(Error, Debug)]
pub enum PromptError {
    #[error("Failed to build Reqwest client: {0}")]
    ReqwestClientBuild(reqwest::Error),
    #[error("Failed to send request to AI provider: {0}")]
    AiRequest(reqwest::Error),
    #[error("Failed to deserialize AI provider response: {0}")]
    AiDeserialization(reqwest::Error),
    #[error("AI provider returned an error: {0}")]
    AiApi(String),
    #[error("AI provider returned no choices")]
    EmptyResponse,
    #[error("AI provider is not configured: {0}")]
    MissingAiProvider(String),
    #[error("API key is missing")]
    MissingApiKey,
}
