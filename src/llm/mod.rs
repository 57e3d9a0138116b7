//! Text generation backends.
//!
//! The query generator only needs one capability from a backend: turn a
//! prompt and a system instruction into text. [`TextGenerator`] is that
//! seam, so tests can substitute a double for the network call.

pub mod gemini;

use anyhow::Result;
use async_trait::async_trait;

pub use gemini::GeminiBackend;

/// A service that produces text from a prompt.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate text for `prompt` under `system_instruction`.
    async fn generate_text(
        &self,
        prompt: &str,
        system_instruction: &str,
        temperature: f32,
    ) -> Result<String>;

    /// Get the backend name.
    fn name(&self) -> &'static str;

    /// Get the model name.
    fn model(&self) -> &str;
}
