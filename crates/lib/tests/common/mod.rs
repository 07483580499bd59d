#![allow(dead_code)]
//! # Common Test Utilities
//!
//! Shared setup for the library integration tests.

use std::sync::Once;
use studymate::types::StudySession;

static INIT: Once = Once::new();

/// Initializes the tracing subscriber once per test binary.
pub fn setup_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .compact()
            .try_init();
    });
}

pub fn session(n: usize) -> StudySession {
    StudySession {
        input: format!("input {n}"),
        summary: format!("summary {n}"),
        qa: format!("Q: question {n}?\nA: answer {n}."),
    }
}
