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
    models::CreateInteractionRequest,
    services::{interaction_service::InteractionService, AppState},
};

/// POST /api/interactions
pub async fn create_interaction(
    State(state): State<Arc<AppState>>,
    AppJson(req): AppJson<CreateInteractionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    req.validate()?;

    let service = InteractionService::new(state.db.clone());
    let result = service.record_interaction(req).await?;

    Ok((StatusCode::CREATED, Json(result)))
}

/// GET /api/interactions/player/{player_id}
pub async fn player_interactions(
    State(state): State<Arc<AppState>>,
    Path(player_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let service = InteractionService::new(state.db.clone());
    let history = service.player_history(&player_id).await?;

    Ok(Json(history))
}
