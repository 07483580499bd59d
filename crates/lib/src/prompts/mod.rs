//! # Prompt Templates
//!
//! A prompt template is a static string with a literal `{text}` marker. Building
//! a prompt substitutes the study content for every marker in the template.

pub mod core;
pub mod tasks;

pub use self::core::{build_prompt, PromptTemplate, PromptTemplates, TemplateError};
