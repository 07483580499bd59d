use crate::constants::DEFAULT_MODEL_NAME;
use serde::{Deserialize, Serialize};

/// One generation result, as recorded in the session log.
///
/// Field names are part of the log file format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudySession {
    /// The text that was analyzed.
    pub input: String,
    /// The model's summary of `input`.
    pub summary: String,
    /// The model's question/answer output, one item per line.
    pub qa: String,
}

/// Configuration for the completion provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// The type of provider ("openai", "local" or "gemini").
    #[serde(default = "default_provider")]
    pub provider: String,
    /// The API URL. Optional where it can be derived from the provider type.
    #[serde(default)]
    pub api_url: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_model_name")]
    pub model_name: String,
}

fn default_provider() -> String {
    "openai".to_string()
}

fn default_model_name() -> String {
    DEFAULT_MODEL_NAME.to_string()
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            api_url: None,
            api_key: None,
            model_name: default_model_name(),
        }
    }
}
