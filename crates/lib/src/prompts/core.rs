use crate::constants::TEXT_PLACEHOLDER;
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

use super::tasks::{QA_TEMPLATE, SUMMARY_TEMPLATE};

#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("Failed to read prompt template '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Substitutes `content` for every literal `{text}` in `template`.
///
/// The substitution is a single pass over the template: markers that appear
/// inside `content` are left as they are, and nothing is escaped.
pub fn build_prompt(template: &str, content: &str) -> String {
    template.replace(TEXT_PLACEHOLDER, content)
}

/// A prompt template, read once and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    template: String,
}

impl PromptTemplate {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    /// Reads a template from disk.
    ///
    /// A template without exactly one `{text}` marker is still accepted, but
    /// the mismatch is logged.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TemplateError> {
        let path = path.as_ref();
        let template = std::fs::read_to_string(path).map_err(|source| TemplateError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let loaded = Self::new(template);
        match loaded.placeholder_count() {
            1 => info!(path = %path.display(), "Loaded prompt template."),
            n => warn!(
                path = %path.display(),
                "Prompt template has {n} `{TEXT_PLACEHOLDER}` markers, expected exactly one."
            ),
        }
        Ok(loaded)
    }

    pub fn placeholder_count(&self) -> usize {
        self.template.matches(TEXT_PLACEHOLDER).count()
    }

    pub fn build(&self, content: &str) -> String {
        build_prompt(&self.template, content)
    }

    pub fn as_str(&self) -> &str {
        &self.template
    }
}

/// The two templates used by every study action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplates {
    pub summary: PromptTemplate,
    pub qa: PromptTemplate,
}

impl PromptTemplates {
    /// Loads both templates. A missing file is an error.
    pub fn load(
        summary_path: impl AsRef<Path>,
        qa_path: impl AsRef<Path>,
    ) -> Result<Self, TemplateError> {
        Ok(Self {
            summary: PromptTemplate::load(summary_path)?,
            qa: PromptTemplate::load(qa_path)?,
        })
    }
}

impl Default for PromptTemplates {
    /// The stock templates shipped under `prompts/`.
    fn default() -> Self {
        Self {
            summary: PromptTemplate::new(SUMMARY_TEMPLATE),
            qa: PromptTemplate::new(QA_TEMPLATE),
        }
    }
}
