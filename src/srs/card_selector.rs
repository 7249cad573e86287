//! Next-card selection with due filtering and a bias toward difficult cards.
//!
//! Selection order:
//! - Cards not yet asked this session whose interval has elapsed (or never reviewed)
//! - Otherwise every card not yet asked this session, ignoring due dates
//! - Within that pool, 70% of the time pick among cards with more misses than hits

use chrono::{DateTime, Utc};
use rand::seq::IndexedRandom;
use rand::Rng;
use std::collections::HashSet;

use crate::config::DIFFICULT_CARD_BIAS;
use crate::domain::{Card, Deck, QuestionKind, StudyMode};

/// Cards eligible for the next question.
///
/// Due cards first; when none are due, falls back to everything not excluded.
pub fn available_cards<'a>(
  deck: &'a Deck,
  excluded: &HashSet<String>,
  now: DateTime<Utc>,
) -> Vec<&'a Card> {
  let not_excluded = || deck.values().filter(move |c| !excluded.contains(&c.kanji));

  let due: Vec<&Card> = not_excluded().filter(|c| c.is_due(now)).collect();
  if !due.is_empty() {
    return due;
  }

  not_excluded().collect()
}

/// Pick the next card to ask. `None` means the session has exhausted the deck.
pub fn select_next<'a, R: Rng + ?Sized>(
  deck: &'a Deck,
  excluded: &HashSet<String>,
  now: DateTime<Utc>,
  rng: &mut R,
) -> Option<&'a Card> {
  let available = available_cards(deck, excluded, now);
  if available.is_empty() {
    tracing::debug!(
      deck_size = deck.len(),
      excluded = excluded.len(),
      "No cards left to select"
    );
    return None;
  }

  let difficult: Vec<&Card> = available.iter().copied().filter(|c| c.is_difficult()).collect();

  if !difficult.is_empty() && rng.random_bool(DIFFICULT_CARD_BIAS) {
    tracing::debug!(pool = difficult.len(), "Selecting from difficult cards");
    return difficult.choose(rng).copied();
  }

  tracing::debug!(pool = available.len(), "Selecting from available cards");
  available.choose(rng).copied().or_else(|| deck.values().next())
}

/// Which field to ask for, given the learner's mode
pub fn question_kind<R: Rng + ?Sized>(mode: StudyMode, rng: &mut R) -> QuestionKind {
  match mode {
    StudyMode::Visual => QuestionKind::Meaning,
    StudyMode::Deep => {
      if rng.random_bool(0.5) {
        QuestionKind::Reading
      } else {
        QuestionKind::Meaning
      }
    }
  }
}
