use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use super::ApiError;
use crate::config::DIFFICULT_CARDS_LIMIT;
use crate::content::{level_counts, LevelCounts};
use crate::domain::{Card, Progress, StudyMode};
use crate::srs::{difficult_cards, level_progress, total_mastered, LevelProgress};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct StatsResponse {
  pub progress: Progress,
  pub daily_goal_reached: bool,
  pub total_cards: usize,
  pub mastered: usize,
  pub levels: Vec<LevelProgress>,
  pub level_counts: LevelCounts,
  pub difficult: Vec<Card>,
}

pub async fn stats(State(state): State<AppState>) -> Result<Json<StatsResponse>, ApiError> {
  let quiz = state.lock()?;
  let deck = quiz.store.deck();
  let progress = quiz.store.progress().clone();

  Ok(Json(StatsResponse {
    daily_goal_reached: progress.daily_goal_reached(),
    progress,
    total_cards: deck.len(),
    mastered: total_mastered(deck),
    levels: level_progress(deck),
    level_counts: level_counts(deck.values()),
    difficult: difficult_cards(deck, DIFFICULT_CARDS_LIMIT)
      .into_iter()
      .cloned()
      .collect(),
  }))
}

#[derive(Debug, Deserialize)]
pub struct ModeRequest {
  pub mode: StudyMode,
}

pub async fn set_mode(
  State(state): State<AppState>,
  Json(request): Json<ModeRequest>,
) -> Result<StatusCode, ApiError> {
  state.set_mode(request.mode)?;
  Ok(StatusCode::NO_CONTENT)
}

pub async fn reset_game(State(state): State<AppState>) -> Result<StatusCode, ApiError> {
  state.reset_game()?;
  Ok(StatusCode::NO_CONTENT)
}
