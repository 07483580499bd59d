//! # Application State
//!
//! This module defines the shared application state (`AppState`) and the logic
//! for building it at startup. Everything in it is resolved once and then only
//! read by the request handlers.

use crate::config::{AppConfig, API_KEY_ENV_VAR};
use anyhow::Context;
use studymate::{
    prompts::PromptTemplates, providers::factory::create_provider, session_log::SessionLog,
    PromptError, StudyAssistant,
};
use std::sync::Arc;
use tracing::info;

/// The shared application state, accessible from all request handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    /// The application's configuration.
    pub config: Arc<AppConfig>,
    /// The study workflow: provider, templates, log and the log's append lock.
    pub assistant: Arc<StudyAssistant>,
}

/// Builds the shared application state from the configuration.
///
/// Fails when a template file cannot be read, when the completion API key is
/// missing, or when the configured provider is unknown.
pub fn build_app_state(config: AppConfig) -> anyhow::Result<AppState> {
    let templates = PromptTemplates::load(
        &config.prompts.summary_template_path,
        &config.prompts.qa_template_path,
    )
    .context("Failed to load prompt templates")?;

    let ai_provider = create_provider(&config.provider).map_err(|e| match e {
        PromptError::MissingApiKey => anyhow::anyhow!(
            "{API_KEY_ENV_VAR} is not set. Add it to the environment or to a .env file."
        ),
        other => anyhow::Error::from(other),
    })?;
    info!(
        provider = %config.provider.provider,
        model = %config.provider.model_name,
        "Completion provider ready."
    );

    let session_log = SessionLog::new(&config.log_path);
    let assistant = StudyAssistant::new(ai_provider, templates, session_log)
        .with_max_words(config.max_words);

    Ok(AppState {
        config: Arc::new(config),
        assistant: Arc::new(assistant),
    })
}
