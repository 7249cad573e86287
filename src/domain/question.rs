use serde::Serialize;

use super::card::{Level, QuestionKind};

/// A presented multiple-choice question
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Question {
  pub id: u64,
  pub kanji: String,
  pub level: Level,
  pub kind: QuestionKind,
  pub choices: Vec<String>,
  #[serde(skip)]
  pub correct_answer: String,
}

impl Question {
  pub fn is_correct_choice(&self, index: usize) -> Option<bool> {
    self.choices.get(index).map(|c| *c == self.correct_answer)
  }
}

/// How a question was resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Resolution {
  Correct,
  Incorrect,
  TimedOut,
}

impl Resolution {
  pub fn is_correct(&self) -> bool {
    matches!(self, Self::Correct)
  }
}

/// Result of resolving a question, with the counters after the update
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnswerOutcome {
  pub question_id: u64,
  pub kanji: String,
  pub resolution: Resolution,
  pub correct_answer: String,
  pub points_earned: u64,
  pub score: u64,
  pub streak: u32,
  pub lives: i32,
  /// Interval of the answered card after scheduling, if it is in the deck
  pub interval: Option<u32>,
  pub session_complete: bool,
}
