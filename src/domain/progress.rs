use serde::{Deserialize, Serialize};

use crate::config;

/// Question-generation style chosen by the learner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StudyMode {
  /// Always ask for the meaning
  #[default]
  Visual,
  /// Coin flip between reading and meaning per question
  Deep,
}

impl StudyMode {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Visual => "visual",
      Self::Deep => "deep",
    }
  }
}

/// Deck-independent counters shown to the learner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Progress {
  pub score: u64,
  pub streak: u32,
  /// Display only, nothing ends when this reaches zero
  pub lives: i32,
  pub answered_today: u32,
  pub daily_goal: u32,
  pub mode: StudyMode,
}

impl Progress {
  pub fn new(starting_lives: i32, daily_goal: u32) -> Self {
    Self {
      score: 0,
      streak: 0,
      lives: starting_lives,
      answered_today: 0,
      daily_goal,
      mode: StudyMode::default(),
    }
  }

  pub fn daily_goal_reached(&self) -> bool {
    self.answered_today >= self.daily_goal
  }
}

impl Default for Progress {
  fn default() -> Self {
    Self::new(config::STARTING_LIVES, config::DAILY_GOAL)
  }
}
