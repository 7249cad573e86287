//! Multiple choice generation.

use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;

use crate::config::{CHOICE_COUNT, DISTRACTOR_COUNT};
use crate::domain::{Card, Deck, QuestionKind};
use crate::error::QuizError;

/// Build the shuffled choice list for a question: the correct answer plus
/// distinct distractors taken from the same field of other cards.
///
/// Fails with [`QuizError::InsufficientChoices`] when the deck does not hold
/// enough distinct answers for a full set.
pub fn generate_choices<R: Rng + ?Sized>(
  card: &Card,
  deck: &Deck,
  kind: QuestionKind,
  rng: &mut R,
) -> Result<Vec<String>, QuizError> {
  let correct = card.answer(kind);

  let mut seen: HashSet<&str> = HashSet::new();
  seen.insert(correct);
  let mut candidates: Vec<&str> = deck
    .values()
    .filter(|c| c.kanji != card.kanji)
    .map(|c| c.answer(kind))
    .filter(|answer| seen.insert(*answer))
    .collect();

  if candidates.len() < DISTRACTOR_COUNT {
    tracing::warn!(
      kanji = %card.kanji,
      kind = kind.as_str(),
      available = candidates.len() + 1,
      "Not enough distinct answers for a full choice set"
    );
    return Err(QuizError::InsufficientChoices {
      needed: CHOICE_COUNT,
      available: candidates.len() + 1,
    });
  }

  candidates.shuffle(rng);
  candidates.truncate(DISTRACTOR_COUNT);

  let mut choices: Vec<String> = Vec::with_capacity(CHOICE_COUNT);
  choices.push(correct.to_string());
  choices.extend(candidates.into_iter().map(str::to_string));
  choices.shuffle(rng);

  Ok(choices)
}
