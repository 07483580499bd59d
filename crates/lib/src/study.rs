//! # Study Workflow
//!
//! One study action is a single sequential pass: select the content, build the
//! summary and Q&A prompts, complete them one after the other, then append the
//! result to the session log. Nothing is logged or returned if either
//! completion fails.

use crate::{
    constants::DEFAULT_MAX_WORDS,
    errors::PromptError,
    extract::ExtractError,
    prompts::PromptTemplates,
    providers::ai::AiProvider,
    selector::{select_content, SelectedContent, UploadedFile},
    session_log::{SessionLog, SessionLogError},
    types::StudySession,
};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{info, instrument};

#[derive(Error, Debug)]
pub enum StudyError {
    #[error("Could not extract text from the uploaded document: {0}")]
    Extract(#[from] ExtractError),
    #[error("Completion request failed: {0}")]
    Completion(#[from] PromptError),
    #[error("Could not save the session: {0}")]
    SessionLog(#[from] SessionLogError),
}

/// The result of a completed study action.
#[derive(Debug, Clone)]
pub struct StudyOutcome {
    pub session: StudySession,
    /// The truncation notice for long uploads.
    pub warning: Option<String>,
    pub selected: SelectedContent,
    /// How many sessions the log holds after this one was appended.
    pub log_entries: usize,
}

/// Drives study actions against one provider, one pair of templates and one log.
///
/// Built once at startup and never mutated. Appends from clones of the same
/// assistant are serialized; appends from other processes are not.
#[derive(Debug, Clone)]
pub struct StudyAssistant {
    ai_provider: Box<dyn AiProvider>,
    templates: PromptTemplates,
    session_log: SessionLog,
    max_words: usize,
    log_lock: Arc<Mutex<()>>,
}

impl StudyAssistant {
    pub fn new(
        ai_provider: Box<dyn AiProvider>,
        templates: PromptTemplates,
        session_log: SessionLog,
    ) -> Self {
        Self {
            ai_provider,
            templates,
            session_log,
            max_words: DEFAULT_MAX_WORDS,
            log_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Overrides the word cap applied to uploaded documents.
    pub fn with_max_words(mut self, max_words: usize) -> Self {
        self.max_words = max_words;
        self
    }

    pub fn max_words(&self) -> usize {
        self.max_words
    }

    pub fn templates(&self) -> &PromptTemplates {
        &self.templates
    }

    pub fn session_log(&self) -> &SessionLog {
        &self.session_log
    }

    /// Chooses the content to analyze. See [`select_content`].
    pub fn select(
        &self,
        upload: Option<&UploadedFile>,
        pasted: Option<&str>,
    ) -> Result<Option<SelectedContent>, ExtractError> {
        select_content(upload, pasted, self.max_words)
    }

    /// Generates the summary and Q&A for `content` and appends the session to the log.
    ///
    /// Returns the session and the log length after the append.
    #[instrument(skip(self, content), fields(content_len = content.len()))]
    pub async fn generate(&self, content: &str) -> Result<(StudySession, usize), StudyError> {
        let summary_prompt = self.templates.summary.build(content);
        let qa_prompt = self.templates.qa.build(content);

        info!("Generating summary.");
        let summary = self.ai_provider.complete(&summary_prompt).await?;
        info!("Generating questions and answers.");
        let qa = self.ai_provider.complete(&qa_prompt).await?;

        let session = StudySession {
            input: content.to_string(),
            summary,
            qa,
        };

        let log_entries = {
            let _guard = self.log_lock.lock().await;
            self.session_log.append(&session).await?
        };
        info!(
            log_entries,
            path = %self.session_log.path().display(),
            "Study session saved."
        );

        Ok((session, log_entries))
    }

    /// Runs one full study action.
    ///
    /// Returns `Ok(None)` without calling the provider when there is no content.
    pub async fn run(
        &self,
        upload: Option<&UploadedFile>,
        pasted: Option<&str>,
    ) -> Result<Option<StudyOutcome>, StudyError> {
        let Some(selected) = self.select(upload, pasted)? else {
            info!("No content to analyze, skipping generation.");
            return Ok(None);
        };

        let warning = selected.warning();
        let (session, log_entries) = self.generate(&selected.text).await?;

        Ok(Some(StudyOutcome {
            session,
            warning,
            selected,
            log_entries,
        }))
    }
}
