use chrono::{DateTime, Utc};

use crate::config::{MAX_INTERVAL_DAYS, MAX_STREAK_MULTIPLIER, POINTS_PER_STREAK, RESET_INTERVAL_DAYS};
use crate::domain::Card;

/// Interval after a correct answer: doubled, capped at 30 days
pub fn next_interval_correct(interval: u32) -> u32 {
  interval.saturating_mul(2).min(MAX_INTERVAL_DAYS)
}

/// Interval after an incorrect answer or timeout
pub fn next_interval_incorrect(_interval: u32) -> u32 {
  RESET_INTERVAL_DAYS
}

/// Points for a correct answer given the streak *including* that answer
pub fn points_for_streak(streak: u32) -> u64 {
  POINTS_PER_STREAK * u64::from(streak.min(MAX_STREAK_MULTIPLIER))
}

/// Apply a correct answer to a card's scheduling fields
pub fn apply_correct(card: &mut Card, now: DateTime<Utc>) {
  card.correct_count += 1;
  card.last_reviewed = Some(now);
  card.interval = next_interval_correct(card.interval);
}

/// Apply an incorrect answer (or timeout) to a card's scheduling fields
pub fn apply_incorrect(card: &mut Card, now: DateTime<Utc>) {
  card.incorrect_count += 1;
  card.last_reviewed = Some(now);
  card.interval = next_interval_incorrect(card.interval);
}
