//! Shadowfire Engine - Main entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::{HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use shadowfire_engine::api;
use shadowfire_engine::app::{App, GameSettings};
use shadowfire_engine::infrastructure::{
    chat_completions::ChatCompletionsClient,
    clock::{SystemClock, SystemRandom},
    config::{AppConfig, NarratorMode, StoreBackend},
    player_store::SqlitePlayerRepo,
    ports::{ClockPort, PlayerRepo, RandomPort},
};
use shadowfire_engine::stores::InMemoryPlayerRepo;
use shadowfire_engine::use_cases::{LlmNarrator, Narrator, TemplateNarrator};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment from repo root (the binary may run from `crates/engine`).
    load_dotenv_from_repo_root();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "shadowfire_engine=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Shadowfire Engine");

    let config = AppConfig::from_env()?;

    let clock: Arc<dyn ClockPort> = Arc::new(SystemClock::new());
    let random: Arc<dyn RandomPort> = Arc::new(SystemRandom::new());

    let players: Arc<dyn PlayerRepo> = match config.store_backend {
        StoreBackend::Memory => {
            tracing::info!("Using in-memory player store");
            Arc::new(InMemoryPlayerRepo::new())
        }
        StoreBackend::Sqlite => {
            tracing::info!(path = %config.sqlite_path, "Using SQLite player store");
            Arc::new(SqlitePlayerRepo::new(&config.sqlite_path, clock.clone()).await?)
        }
    };

    let narrator: Arc<dyn Narrator> = match config.narrator.mode {
        NarratorMode::Template => {
            tracing::info!("Narration uses local templates");
            Arc::new(TemplateNarrator::new())
        }
        NarratorMode::Llm => {
            let client = ChatCompletionsClient::new(
                &config.narrator.base_url,
                &config.narrator.model,
                config.narrator.api_key.clone(),
                config.narrator.timeout_secs,
            );
            if client.has_credentials() {
                tracing::info!(
                    base_url = %config.narrator.base_url,
                    model = %config.narrator.model,
                    timeout_secs = config.narrator.timeout_secs,
                    "Narrator configured"
                );
            } else {
                tracing::warn!("No narrator API key set; narration will return a fixed notice");
            }
            Arc::new(LlmNarrator::new(Arc::new(client), random.clone()))
        }
    };

    let app = Arc::new(App::new(
        players,
        narrator,
        random,
        clock,
        GameSettings {
            encounter_size: config.encounter_size,
            default_class: config.default_class,
        },
    ));

    let mut router = api::http::routes()
        .with_state(app)
        .layer(TraceLayer::new_for_http());

    if let Some(cors) = build_cors_layer(config.cors_allowed_origins.as_deref()) {
        router = router.layer(cors);
    }

    let addr: SocketAddr = format!("{}:{}", config.server_host, config.server_port).parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}

fn build_cors_layer(allowed_origins: Option<&str>) -> Option<CorsLayer> {
    let allowed_origins = allowed_origins?;

    let mut cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    if allowed_origins == "*" {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .filter_map(|s| HeaderValue::from_str(s).ok())
            .collect();

        if origins.is_empty() {
            return None;
        }

        cors = cors.allow_origin(origins);
    }

    Some(cors)
}
