use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Maximum length of an opaque player id.
const MAX_PLAYER_ID_LENGTH: usize = 64;

/// Opaque player identity issued by the messaging platform.
///
/// The transport layer has already authenticated the value; the domain only
/// guarantees it is non-empty, trimmed, and bounded so it is safe to use as a
/// storage key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PlayerId(String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Result<Self, DomainError> {
        let id = id.into();
        let trimmed = id.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("Player id cannot be empty"));
        }
        if trimmed.len() > MAX_PLAYER_ID_LENGTH {
            return Err(DomainError::validation(format!(
                "Player id cannot exceed {} characters",
                MAX_PLAYER_ID_LENGTH
            )));
        }
        if trimmed.chars().any(char::is_control) {
            return Err(DomainError::validation(
                "Player id cannot contain control characters",
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for PlayerId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PlayerId> for String {
    fn from(value: PlayerId) -> Self {
        value.0
    }
}
