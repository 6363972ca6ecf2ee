//! HTTP routes.

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

use shadowfire_domain::PlayerId;

use crate::api::error_sanitizer::{messages, sanitize_repo_error};
use crate::app::App;
use crate::use_cases::character::{CharacterSheet, ItemUse};
use crate::use_cases::combat::CombatReport;
use crate::use_cases::exploration::{ExplorationReport, PurchaseReport, TravelReport};
use crate::use_cases::{CharacterError, CombatError, ExplorationError};

/// Create all HTTP routes.
pub fn routes() -> Router<Arc<App>> {
    Router::new()
        .route("/", get(health))
        .route("/api/health", get(health))
        .route("/api/characters", post(create_character))
        .route("/api/characters/{player_id}", get(get_character))
        .route("/api/characters/{player_id}/allocate", post(allocate))
        .route("/api/characters/{player_id}/rest", post(rest))
        .route("/api/characters/{player_id}/use", post(use_item))
        .route("/api/combat", post(combat))
        .route("/api/explore", post(explore))
        .route("/api/travel", post(travel))
        .route("/api/purchase", post(purchase))
}

async fn health() -> &'static str {
    "OK"
}

fn parse_player_id(raw: &str) -> Result<PlayerId, ApiError> {
    PlayerId::new(raw).map_err(|e| ApiError::BadRequest(e.to_string()))
}

// =============================================================================
// Characters
// =============================================================================

#[derive(Debug, Deserialize)]
struct CreateCharacterRequest {
    player_id: String,
    name: String,
    class: String,
}

#[derive(Debug, Deserialize)]
struct AllocateRequest {
    attribute: String,
}

#[derive(Debug, Deserialize)]
struct UseItemRequest {
    item: String,
}

async fn create_character(
    State(app): State<Arc<App>>,
    Json(req): Json<CreateCharacterRequest>,
) -> Result<Json<CharacterSheet>, ApiError> {
    let player_id = parse_player_id(&req.player_id)?;
    let sheet = app
        .use_cases
        .character
        .create(&player_id, &req.name, &req.class)
        .await?;
    Ok(Json(sheet))
}

async fn get_character(
    State(app): State<Arc<App>>,
    Path(player_id): Path<String>,
) -> Result<Json<CharacterSheet>, ApiError> {
    let player_id = parse_player_id(&player_id)?;
    Ok(Json(app.use_cases.character.sheet(&player_id).await?))
}

async fn allocate(
    State(app): State<Arc<App>>,
    Path(player_id): Path<String>,
    Json(req): Json<AllocateRequest>,
) -> Result<Json<CharacterSheet>, ApiError> {
    let player_id = parse_player_id(&player_id)?;
    let sheet = app
        .use_cases
        .character
        .allocate(&player_id, &req.attribute)
        .await?;
    Ok(Json(sheet))
}

async fn rest(
    State(app): State<Arc<App>>,
    Path(player_id): Path<String>,
) -> Result<Json<CharacterSheet>, ApiError> {
    let player_id = parse_player_id(&player_id)?;
    Ok(Json(app.use_cases.character.rest(&player_id).await?))
}

async fn use_item(
    State(app): State<Arc<App>>,
    Path(player_id): Path<String>,
    Json(req): Json<UseItemRequest>,
) -> Result<Json<ItemUse>, ApiError> {
    let player_id = parse_player_id(&player_id)?;
    let used = app
        .use_cases
        .character
        .use_item(&player_id, &req.item)
        .await?;
    Ok(Json(used))
}

// =============================================================================
// Combat and exploration
// =============================================================================

#[derive(Debug, Deserialize)]
struct CombatRequest {
    player_id: String,
    action: String,
}

#[derive(Debug, Deserialize)]
struct ExploreRequest {
    player_id: String,
    action: String,
    #[serde(default)]
    display_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TravelRequest {
    player_id: String,
    region: String,
}

#[derive(Debug, Deserialize)]
struct PurchaseRequest {
    player_id: String,
    item: String,
}

async fn combat(
    State(app): State<Arc<App>>,
    Json(req): Json<CombatRequest>,
) -> Result<Json<CombatReport>, ApiError> {
    let player_id = parse_player_id(&req.player_id)?;
    let report = app
        .use_cases
        .combat
        .engage
        .execute(&player_id, &req.action)
        .await?;
    Ok(Json(report))
}

async fn explore(
    State(app): State<Arc<App>>,
    Json(req): Json<ExploreRequest>,
) -> Result<Json<ExplorationReport>, ApiError> {
    let player_id = parse_player_id(&req.player_id)?;
    let report = app
        .use_cases
        .exploration
        .explore(&player_id, &req.action, req.display_name.as_deref())
        .await?;
    Ok(Json(report))
}

async fn travel(
    State(app): State<Arc<App>>,
    Json(req): Json<TravelRequest>,
) -> Result<Json<TravelReport>, ApiError> {
    let player_id = parse_player_id(&req.player_id)?;
    let report = app
        .use_cases
        .exploration
        .travel(&player_id, &req.region)
        .await?;
    Ok(Json(report))
}

async fn purchase(
    State(app): State<Arc<App>>,
    Json(req): Json<PurchaseRequest>,
) -> Result<Json<PurchaseReport>, ApiError> {
    let player_id = parse_player_id(&req.player_id)?;
    let report = app
        .use_cases
        .exploration
        .purchase(&player_id, &req.item)
        .await?;
    Ok(Json(report))
}

// =============================================================================
// Errors
// =============================================================================

#[derive(Debug)]
pub enum ApiError {
    NotFound,
    BadRequest(String),
    Internal(String),
}

impl axum::response::IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        match self {
            ApiError::NotFound => {
                (axum::http::StatusCode::NOT_FOUND, messages::NO_CHARACTER).into_response()
            }
            ApiError::BadRequest(msg) => {
                (axum::http::StatusCode::BAD_REQUEST, msg).into_response()
            }
            ApiError::Internal(_) => (
                axum::http::StatusCode::INTERNAL_SERVER_ERROR,
                messages::INTERNAL_ERROR,
            )
                .into_response(),
        }
    }
}

impl From<crate::infrastructure::ports::RepoError> for ApiError {
    fn from(e: crate::infrastructure::ports::RepoError) -> Self {
        ApiError::Internal(sanitize_repo_error(&e, "access player records"))
    }
}

impl From<CharacterError> for ApiError {
    fn from(e: CharacterError) -> Self {
        match e {
            CharacterError::NotFound(_) => ApiError::NotFound,
            CharacterError::InvalidInput(msg) => ApiError::BadRequest(msg),
            CharacterError::Repo(e) => e.into(),
        }
    }
}

impl From<CombatError> for ApiError {
    fn from(e: CombatError) -> Self {
        match e {
            CombatError::NotFound(_) => ApiError::NotFound,
            CombatError::InvalidInput(msg) => ApiError::BadRequest(msg),
            CombatError::Repo(e) => e.into(),
        }
    }
}

impl From<ExplorationError> for ApiError {
    fn from(e: ExplorationError) -> Self {
        match e {
            ExplorationError::NotFound(_) => ApiError::NotFound,
            ExplorationError::InvalidInput(msg) => ApiError::BadRequest(msg),
            ExplorationError::Repo(e) => e.into(),
        }
    }
}
