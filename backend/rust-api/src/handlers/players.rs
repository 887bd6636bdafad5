use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use validator::Validate;

use super::ApiError;
use crate::{
    extractors::AppJson,
    models::{CreatePlayerRequest, UpdatePlayerRequest},
    services::{player_service::PlayerService, AppState},
};

/// POST /api/players
pub async fn create_player(
    State(state): State<Arc<AppState>>,
    AppJson(req): AppJson<CreatePlayerRequest>,
) -> Result<impl IntoResponse, ApiError> {
    req.validate()?;

    let service = PlayerService::new(state.db.clone());
    let player = service.create_player(req).await?;

    Ok((StatusCode::CREATED, Json(player)))
}

/// GET /api/players/{id}
pub async fn get_player(
    State(state): State<Arc<AppState>>,
    Path(player_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let service = PlayerService::new(state.db.clone());
    let player = service.get_player(&player_id).await?;

    Ok(Json(player))
}

/// PUT /api/players/{id} - absent fields keep their stored values
pub async fn update_player(
    State(state): State<Arc<AppState>>,
    Path(player_id): Path<String>,
    AppJson(req): AppJson<UpdatePlayerRequest>,
) -> Result<impl IntoResponse, ApiError> {
    req.validate()?;

    tracing::debug!("Updating player {}: {:?}", player_id, req);

    let service = PlayerService::new(state.db.clone());
    let player = service.update_player(&player_id, req).await?;

    Ok(Json(player))
}

/// GET /api/players/{id}/stats
pub async fn player_stats(
    State(state): State<Arc<AppState>>,
    Path(player_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let service = PlayerService::new(state.db.clone());
    let stats = service.player_stats(&player_id).await?;

    Ok(Json(stats))
}
