//! # Default Task Prompts
//!
//! The prompt templates shipped with the repository under `prompts/`. The
//! server loads its templates from disk at startup; these copies are compiled
//! in so the library and its tests can use the stock wording directly.

/// The stock summary template. Placeholder: `{text}`.
pub const SUMMARY_TEMPLATE: &str = include_str!("../../../../prompts/summary_template.txt");

/// The stock question/answer template. Placeholder: `{text}`.
pub const QA_TEMPLATE: &str = include_str!("../../../../prompts/qa_template.txt");
