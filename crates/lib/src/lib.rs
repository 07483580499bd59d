//! # StudyMate
//!
//! Turns a study document or pasted text into a summary and a set of
//! question/answer pairs using a chat-completion provider, and keeps a JSON log
//! of every result.
//!
//! The pieces, in the order a study action uses them:
//!
//! - [`extract`]: plain text out of `.txt`, `.pdf` and `.docx` uploads.
//! - [`selector`]: upload-or-pasted choice and the word cap for uploads.
//! - [`prompts`]: `{text}` substitution into the two templates.
//! - [`providers`]: the completion providers.
//! - [`session_log`]: the append-only JSON log.
//! - [`presenter`]: question/answer line classification.
//! - [`study`]: the workflow tying them together.

pub mod constants;
pub mod errors;
pub mod extract;
pub mod presenter;
pub mod prompts;
pub mod providers;
pub mod selector;
pub mod session_log;
pub mod study;
pub mod types;

pub use errors::PromptError;
pub use study::{StudyAssistant, StudyError, StudyOutcome};
pub use types::{ProviderConfig, StudySession};
