//! Error types for port operations.

/// Repository operation errors with context for debugging.
///
/// A missing record is not an error here: `get` returns `Ok(None)` and the
/// use cases decide what absence means.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    /// Database operation failed - includes operation name for tracing.
    #[error("Database error in {operation}: {message}")]
    Database {
        operation: &'static str,
        message: String,
    },

    /// Serialization/deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl RepoError {
    /// Create a Database error with operation context.
    pub fn database(operation: &'static str, message: impl ToString) -> Self {
        Self::Database {
            operation,
            message: message.to_string(),
        }
    }

    /// Create a Serialization error.
    pub fn serialization(message: impl ToString) -> Self {
        Self::Serialization(message.to_string())
    }
}

/// Failures talking to the text generator.
///
/// Each variant maps to its own degraded line in the narrator, so callers
/// can tell a bad key from a busy service without reading the message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LlmError {
    #[error("No API key configured")]
    MissingCredentials,
    #[error("Generator rejected the credentials (HTTP {0})")]
    Unauthorized(u16),
    #[error("Generator rate limit reached")]
    RateLimited,
    #[error("Generator request timed out")]
    Timeout,
    #[error("LLM request failed: {0}")]
    RequestFailed(String),
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}
