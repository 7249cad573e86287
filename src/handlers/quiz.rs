use axum::{extract::State, Json};
use serde::Deserialize;

use super::ApiError;
use crate::domain::AnswerOutcome;
use crate::state::{AppState, SessionView};

#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
  pub question_id: u64,
  pub choice: usize,
}

pub async fn start_session(State(state): State<AppState>) -> Result<Json<SessionView>, ApiError> {
  Ok(Json(state.start_session()?))
}

pub async fn session_status(State(state): State<AppState>) -> Result<Json<SessionView>, ApiError> {
  Ok(Json(state.session_view()?))
}

pub async fn answer(
  State(state): State<AppState>,
  Json(request): Json<AnswerRequest>,
) -> Result<Json<AnswerOutcome>, ApiError> {
  Ok(Json(state.answer(request.question_id, request.choice)?))
}

pub async fn next_question(State(state): State<AppState>) -> Result<Json<SessionView>, ApiError> {
  Ok(Json(state.next_question()?))
}

pub async fn end_session(State(state): State<AppState>) -> Result<Json<SessionView>, ApiError> {
  Ok(Json(state.end_session()?))
}
