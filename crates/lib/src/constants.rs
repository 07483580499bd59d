//! # Shared Constants
//!
//! Defaults and well-known strings shared by the library and the server.

/// The default location of the append-only session log.
pub const DEFAULT_LOG_PATH: &str = "logs/session_log.json";

/// The default location of the summary prompt template.
pub const DEFAULT_SUMMARY_TEMPLATE_PATH: &str = "prompts/summary_template.txt";

/// The default location of the Q&A prompt template.
pub const DEFAULT_QA_TEMPLATE_PATH: &str = "prompts/qa_template.txt";

/// Uploaded documents are capped to this many whitespace-delimited words.
pub const DEFAULT_MAX_WORDS: usize = 1000;

/// The literal marker replaced by the study content in every prompt template.
pub const TEXT_PLACEHOLDER: &str = "{text}";

/// The default OpenAI-compatible chat completion endpoint.
pub const DEFAULT_OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";

/// The default chat model.
pub const DEFAULT_MODEL_NAME: &str = "gpt-3.5-turbo";

pub const MIME_TEXT: &str = "text/plain";
pub const MIME_PDF: &str = "application/pdf";
pub const MIME_DOCX: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
