//! Application configuration

use std::env;
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use shadowfire_domain::CharacterClass;

use crate::infrastructure::chat_completions::{DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS};

/// Enemies in a freshly started encounter unless configured otherwise.
pub const DEFAULT_ENCOUNTER_SIZE: u32 = 3;

/// Which narrator produces player-facing prose.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NarratorMode {
    /// Remote chat completion service; failures degrade to fixed notices.
    Llm,
    /// Local deterministic templates only.
    Template,
}

/// Where player records live.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Memory,
    Sqlite,
}

/// Application configuration loaded from environment
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Narrator settings
    pub narrator: NarratorConfig,

    /// Player store backend: "memory" or "sqlite"
    pub store_backend: StoreBackend,
    /// SQLite database path (if using sqlite backend)
    pub sqlite_path: String,

    /// Enemies per new encounter (clamped by the combat engine)
    pub encounter_size: u32,
    /// Class given to characters created implicitly by exploration
    pub default_class: CharacterClass,

    pub server_host: String,
    pub server_port: u16,

    /// CORS allowed origins (comma-separated, or "*" for any). None disables CORS.
    pub cors_allowed_origins: Option<String>,
}

/// Narrator / text generation configuration
#[derive(Debug, Clone)]
pub struct NarratorConfig {
    pub mode: NarratorMode,
    /// API key; absence degrades narration to a fixed notice
    pub api_key: Option<String>,
    /// OpenAI-compatible API base URL
    pub base_url: String,
    pub model: String,
    pub timeout_secs: u64,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let mode = match var("NARRATOR_MODE").as_deref() {
            None | Some("llm") => NarratorMode::Llm,
            Some("template") => NarratorMode::Template,
            Some(other) => bail!("NARRATOR_MODE must be 'llm' or 'template', got '{other}'"),
        };

        let store_backend = match var("STORE_BACKEND").as_deref() {
            None | Some("memory") => StoreBackend::Memory,
            Some("sqlite") => StoreBackend::Sqlite,
            Some(other) => bail!("STORE_BACKEND must be 'memory' or 'sqlite', got '{other}'"),
        };

        let default_class = match var("DEFAULT_CLASS") {
            Some(raw) => CharacterClass::from_str(&raw)
                .with_context(|| format!("DEFAULT_CLASS is not a known class: '{raw}'"))?,
            None => CharacterClass::Warrior,
        };

        Ok(Self {
            narrator: NarratorConfig {
                mode,
                api_key: var("NARRATOR_API_KEY").or_else(|| var("DEEPSEEK_API_KEY")),
                base_url: var("NARRATOR_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
                model: var("NARRATOR_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
                timeout_secs: parse_or_default(
                    "NARRATOR_TIMEOUT_SECS",
                    var("NARRATOR_TIMEOUT_SECS"),
                    DEFAULT_TIMEOUT_SECS,
                ),
            },

            store_backend,
            sqlite_path: var("SQLITE_PATH").unwrap_or_else(|| "characters.db".to_string()),

            encounter_size: parse_or_default(
                "ENCOUNTER_SIZE",
                var("ENCOUNTER_SIZE"),
                DEFAULT_ENCOUNTER_SIZE,
            ),
            default_class,

            server_host: var("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            server_port: parse_or_default(
                "SERVER_PORT",
                var("SERVER_PORT").or_else(|| var("PORT")),
                8000,
            ),

            cors_allowed_origins: var("CORS_ALLOWED_ORIGINS"),
        })
    }
}

fn parse_or_default<T: FromStr + Copy + std::fmt::Display>(
    key: &str,
    raw: Option<String>,
    default: T,
) -> T {
    match raw {
        None => default,
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, default = %default, "Unparseable value, using default");
            default
        }),
    }
}
