//! Core attributes and the closed set of attribute names.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;

/// One of the three core attributes.
///
/// Allocation requests name an attribute by string; parsing into this enum is
/// the only way to reach a field, so an unknown name can never touch a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    Strength,
    Dexterity,
    Intellect,
}

impl Attribute {
    pub const ALL: [Attribute; 3] = [Self::Strength, Self::Dexterity, Self::Intellect];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Strength => "strength",
            Self::Dexterity => "dexterity",
            Self::Intellect => "intellect",
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Attribute {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strength" | "str" => Ok(Self::Strength),
            "dexterity" | "dex" => Ok(Self::Dexterity),
            "intellect" | "int" => Ok(Self::Intellect),
            other => Err(DomainError::parse(format!("Unknown attribute: {}", other))),
        }
    }
}

/// Strength, dexterity and intellect of a character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attributes {
    pub strength: u32,
    pub dexterity: u32,
    pub intellect: u32,
}

impl Attributes {
    pub fn new(strength: u32, dexterity: u32, intellect: u32) -> Self {
        Self {
            strength,
            dexterity,
            intellect,
        }
    }

    pub fn get(&self, attribute: Attribute) -> u32 {
        match attribute {
            Attribute::Strength => self.strength,
            Attribute::Dexterity => self.dexterity,
            Attribute::Intellect => self.intellect,
        }
    }

    /// Raise a single attribute by one point.
    pub fn increment(&mut self, attribute: Attribute) {
        let slot = match attribute {
            Attribute::Strength => &mut self.strength,
            Attribute::Dexterity => &mut self.dexterity,
            Attribute::Intellect => &mut self.intellect,
        };
        *slot = slot.saturating_add(1);
    }
}
