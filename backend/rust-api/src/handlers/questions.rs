use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

use super::ApiError;
use crate::{
    extractors::AppQuery,
    models::QuestionFilter,
    services::{question_service::QuestionService, AppState},
};

/// GET /api/questions?difficulty=&category=
pub async fn list_questions(
    State(state): State<Arc<AppState>>,
    AppQuery(filter): AppQuery<QuestionFilter>,
) -> Result<impl IntoResponse, ApiError> {
    let service = QuestionService::new(state.db.clone());
    let questions = service.list_questions(&filter).await?;

    Ok(Json(questions))
}

/// GET /api/questions/random?difficulty=easy&category=general
pub async fn random_question(
    State(state): State<Arc<AppState>>,
    AppQuery(filter): AppQuery<QuestionFilter>,
) -> Result<impl IntoResponse, ApiError> {
    let service = QuestionService::new(state.db.clone());
    let question = service.random_question(&filter).await?;

    Ok(Json(question))
}

/// GET /api/questions/{id}
pub async fn get_question(
    State(state): State<Arc<AppState>>,
    Path(question_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let service = QuestionService::new(state.db.clone());
    let question = service.get_question(&question_id).await?;

    Ok(Json(question))
}
