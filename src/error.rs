//! Error types for query generation.

use thiserror::Error;

/// Name of the environment variable holding the API credential.
pub const API_KEY_VAR: &str = "GEMINI_API_KEY";

/// Failures surfaced to the user. Every variant is fatal for the invocation.
#[derive(Debug, Error)]
pub enum QueryError {
    /// The API credential is not set.
    #[error("GEMINI_API_KEY environment variable not set.")]
    MissingCredential,

    /// The research topic is empty.
    #[error("Research topic must not be empty.")]
    EmptyTopic,

    /// The call to the generation service failed.
    #[error("Gemini API call failed: {0}")]
    Upstream(String),

    /// Writing to the console failed.
    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

impl QueryError {
    /// Wrap a backend failure, keeping the whole context chain.
    pub fn upstream(err: anyhow::Error) -> Self {
        QueryError::Upstream(format!("{:#}", err))
    }

    /// Process exit code for this failure.
    pub fn exit_code(&self) -> u8 {
        match self {
            QueryError::MissingCredential
            | QueryError::EmptyTopic
            | QueryError::Upstream(_)
            | QueryError::Output(_) => 1,
        }
    }
}
