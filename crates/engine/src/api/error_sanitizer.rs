//! Error sanitization for client-facing messages.
//!
//! Prevents leaking internal details (paths, database errors) to clients.

/// Log a storage failure server-side and return a generic message.
pub fn sanitize_repo_error<E: std::fmt::Display>(error: &E, operation: &str) -> String {
    tracing::error!(
        error = %error,
        operation = operation,
        "Repository error"
    );

    format!("Failed to {} - please try again", operation)
}

/// Common error messages for client consumption.
pub mod messages {
    pub const INTERNAL_ERROR: &str = "Internal error";
    pub const NO_CHARACTER: &str = "No character found";
}
