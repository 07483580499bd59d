//! # AI Provider Factory
//!
//! Builds the configured completion provider at startup. Keeping this in the
//! library lets the server and the tests share one construction path.

use crate::{
    constants::DEFAULT_OPENAI_API_URL,
    errors::PromptError,
    providers::ai::{gemini::GeminiProvider, openai::OpenAiProvider, AiProvider},
    types::ProviderConfig,
};
use tracing::info;

/// Creates the AI provider described by `config`.
///
/// - `openai`: the hosted OpenAI API. An API key is mandatory.
/// - `local`: any OpenAI-compatible server. `api_url` is mandatory, the key optional.
/// - `gemini`: the Google Gemini API. An API key is mandatory.
pub fn create_provider(config: &ProviderConfig) -> Result<Box<dyn AiProvider>, PromptError> {
    let api_key = config.api_key.clone().filter(|key| !key.trim().is_empty());

    let provider: Box<dyn AiProvider> = match config.provider.as_str() {
        "openai" => {
            let api_key = api_key.ok_or(PromptError::MissingApiKey)?;
            let api_url = config
                .api_url
                .clone()
                .unwrap_or_else(|| DEFAULT_OPENAI_API_URL.to_string());
            info!(%api_url, model = %config.model_name, "Configuring OpenAI provider.");
            Box::new(OpenAiProvider::new(
                api_url,
                Some(api_key),
                config.model_name.clone(),
            )?)
        }
        "local" => {
            let api_url = config.api_url.clone().ok_or_else(|| {
                PromptError::MissingAiProvider(
                    "api_url is required for the local provider".to_string(),
                )
            })?;
            info!(%api_url, model = %config.model_name, "Configuring local OpenAI-compatible provider.");
            Box::new(OpenAiProvider::new(
                api_url,
                api_key,
                config.model_name.clone(),
            )?)
        }
        "gemini" => {
            let api_key = api_key.ok_or(PromptError::MissingApiKey)?;
            let api_url = config
                .api_url
                .clone()
                .unwrap_or_else(|| GeminiProvider::api_url_for_model(&config.model_name));
            info!(%api_url, "Configuring Gemini provider.");
            Box::new(GeminiProvider::new(api_url, api_key)?)
        }
        other => {
            return Err(PromptError::MissingAiProvider(format!(
                "unsupported provider type '{other}'"
            )))
        }
    };

    Ok(provider)
}
