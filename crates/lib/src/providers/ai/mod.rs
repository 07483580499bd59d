pub mod gemini;
pub mod openai;

use crate::errors::PromptError;
use async_trait::async_trait;
use dyn_clone::DynClone;
use std::fmt::Debug;

/// A trait for interacting with a chat-completion provider.
///
/// Each call sends exactly one request carrying the prompt as a single user
/// message. Implementations do not retry; any failure is returned to the caller.
#[async_trait]
pub trait AiProvider: Send + Sync + Debug + DynClone {
    /// Completes `prompt` and returns the trimmed text of the first choice.
    async fn complete(&self, prompt: &str) -> Result<String, PromptError>;
}

dyn_clone::clone_trait_object!(AiProvider);
