//! # Result Presentation
//!
//! Splits the Q&A output into lines and marks the questions. Rendering into a
//! concrete surface (HTML, terminal) is left to the caller.

use serde::Serialize;

/// The literal prefix that marks a question line.
pub const QUESTION_PREFIX: &str = "Q:";

/// One line of Q&A output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum QaLine {
    /// A line whose trimmed content starts with `Q:`. Rendered with emphasis.
    Question(String),
    /// Answers, blank separators and anything else. Rendered plainly.
    Other(String),
}

impl QaLine {
    pub fn classify(line: &str) -> Self {
        if line.trim().starts_with(QUESTION_PREFIX) {
            QaLine::Question(line.to_string())
        } else {
            QaLine::Other(line.to_string())
        }
    }

    pub fn text(&self) -> &str {
        match self {
            QaLine::Question(text) | QaLine::Other(text) => text,
        }
    }

    pub fn is_question(&self) -> bool {
        matches!(self, QaLine::Question(_))
    }
}

/// Splits `qa` on `\n` and classifies each line. Lines keep their original text.
pub fn classify_qa(qa: &str) -> Vec<QaLine> {
    qa.split('\n').map(QaLine::classify).collect()
}

/// A summary and its classified Q&A lines, ready to render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Presentation {
    pub summary: String,
    pub qa_lines: Vec<QaLine>,
}

impl Presentation {
    pub fn new(summary: &str, qa: &str) -> Self {
        Self {
            summary: summary.to_string(),
            qa_lines: classify_qa(qa),
        }
    }
}
