use crate::infrastructure::ports::RepoError;
use crate::use_cases::validation::ValidationError;

/// Errors that can occur while fighting.
#[derive(Debug, thiserror::Error)]
pub enum CombatError {
    #[error("No character for player {0}")]
    NotFound(String),
    #[error("{0}")]
    InvalidInput(String),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

impl From<ValidationError> for CombatError {
    fn from(e: ValidationError) -> Self {
        Self::InvalidInput(e.to_string())
    }
}
