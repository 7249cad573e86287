//! JSON API over the quiz.

pub mod quiz;
pub mod stats;

use axum::{
  http::StatusCode,
  response::{IntoResponse, Response},
  routing::{get, post},
  Json, Router,
};
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::error::{QuizError, StoreError};
use crate::state::AppState;

pub use quiz::{answer, end_session, next_question, session_status, start_session};
pub use stats::{reset_game, set_mode, stats};

pub fn router(state: AppState) -> Router {
  Router::new()
    .route("/api/stats", get(stats))
    .route("/api/mode", post(set_mode))
    .route("/api/reset", post(reset_game))
    .route("/api/session", get(session_status))
    .route("/api/session/start", post(start_session))
    .route("/api/session/answer", post(answer))
    .route("/api/session/next", post(next_question))
    .route("/api/session/end", post(end_session))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

/// Quiz errors rendered as `{"error": "..."}` with a matching status code
#[derive(Debug)]
pub struct ApiError(pub QuizError);

impl From<QuizError> for ApiError {
  fn from(err: QuizError) -> Self {
    Self(err)
  }
}

impl From<StoreError> for ApiError {
  fn from(err: StoreError) -> Self {
    Self(err.into())
  }
}

impl ApiError {
  pub fn status(&self) -> StatusCode {
    match &self.0 {
      QuizError::NoActiveSession => StatusCode::NOT_FOUND,
      QuizError::QuestionNotActive(_) => StatusCode::CONFLICT,
      QuizError::InvalidChoice(_) => StatusCode::UNPROCESSABLE_ENTITY,
      QuizError::InsufficientChoices { .. } | QuizError::StateUnavailable | QuizError::Store(_) => {
        StatusCode::INTERNAL_SERVER_ERROR
      }
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = self.status();
    if status.is_server_error() {
      tracing::error!("Request failed: {}", self.0);
    }
    (status, Json(json!({ "error": self.0.to_string() }))).into_response()
  }
}
