//! # Session Log
//!
//! Every successful study action is appended to a JSON array on disk. The file
//! is always rewritten whole, pretty-printed with two-space indentation.
//!
//! Reading is tolerant: a missing, unreadable or unparseable file counts as an
//! empty log, and a file holding a single bare object (the legacy format) is
//! read as a one-element log. Nothing here locks the file, so two processes
//! appending at once can lose an update.

use crate::types::StudySession;
use serde_json::Value;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

#[derive(Error, Debug)]
pub enum SessionLogError {
    #[error("Failed to serialize session log: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("Failed to create log directory '{path}': {source}")]
    CreateDir {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to write session log '{path}': {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// The shapes a log file can be found in.
#[derive(Debug, Clone, PartialEq)]
pub enum LogContents {
    /// No file, an unreadable file, or text that is not JSON.
    Absent,
    /// A single bare object written by older versions.
    Legacy(Value),
    /// The canonical array of sessions.
    Sequence(Vec<Value>),
    /// Valid JSON of any other shape.
    Other,
}

impl LogContents {
    /// Classifies the raw text of a log file.
    pub fn parse(raw: &str) -> Self {
        match serde_json::from_str::<Value>(raw) {
            Ok(Value::Array(entries)) => LogContents::Sequence(entries),
            Ok(object @ Value::Object(_)) => LogContents::Legacy(object),
            Ok(_) => LogContents::Other,
            Err(e) => {
                debug!("Session log is not valid JSON, starting a fresh log: {e}");
                LogContents::Absent
            }
        }
    }

    /// Normalizes any shape into the canonical sequence.
    pub fn into_entries(self) -> Vec<Value> {
        match self {
            LogContents::Sequence(entries) => entries,
            LogContents::Legacy(object) => vec![object],
            LogContents::Absent | LogContents::Other => Vec::new(),
        }
    }
}

/// The append-only session log at a fixed path.
#[derive(Debug, Clone)]
pub struct SessionLog {
    path: PathBuf,
}

impl SessionLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads and classifies the file on disk.
    pub async fn read(&self) -> LogContents {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => LogContents::parse(&raw),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No session log yet.");
                LogContents::Absent
            }
            Err(e) => {
                warn!(path = %self.path.display(), "Could not read session log, starting a fresh log: {e}");
                LogContents::Absent
            }
        }
    }

    /// The normalized log entries, oldest first.
    pub async fn entries(&self) -> Vec<Value> {
        self.read().await.into_entries()
    }

    /// Appends `session` and rewrites the whole file.
    ///
    /// Returns the number of entries now in the log.
    #[instrument(skip(self, session), fields(path = %self.path.display()))]
    pub async fn append(&self, session: &StudySession) -> Result<usize, SessionLogError> {
        let contents = self.read().await;
        if matches!(contents, LogContents::Legacy(_)) {
            info!("Upgrading legacy single-object session log to an array.");
        }

        let mut entries = contents.into_entries();
        entries.push(serde_json::to_value(session)?);
        let serialized = serde_json::to_string_pretty(&entries)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| SessionLogError::CreateDir {
                    path: parent.display().to_string(),
                    source,
                })?;
        }

        tokio::fs::write(&self.path, serialized)
            .await
            .map_err(|source| SessionLogError::Write {
                path: self.path.display().to_string(),
                source,
            })?;

        debug!(entries = entries.len(), "Session log written.");
        Ok(entries.len())
    }
}

/// Appends `session` to the log at `path`.
pub async fn append(path: impl AsRef<Path>, session: &StudySession) -> Result<usize, SessionLogError> {
    SessionLog::new(path.as_ref()).append(session).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_shapes() {
        assert_eq!(
            LogContents::parse(r#"[{"input":"a"}]"#),
            LogContents::Sequence(vec![json!({"input": "a"})])
        );
        assert_eq!(
            LogContents::parse(r#"{"input":"a"}"#),
            LogContents::Legacy(json!({"input": "a"}))
        );
        assert_eq!(LogContents::parse("42"), LogContents::Other);
        assert_eq!(LogContents::parse(r#""text""#), LogContents::Other);
        assert_eq!(LogContents::parse("{not json"), LogContents::Absent);
        assert_eq!(LogContents::parse(""), LogContents::Absent);
    }

    #[test]
    fn test_normalization() {
        assert!(LogContents::Other.into_entries().is_empty());
        assert_eq!(
            LogContents::Legacy(json!({"qa": "Q: x"})).into_entries(),
            vec![json!({"qa": "Q: x"})]
        );
    }
}
