//! Read-only views over the deck for display

use serde::Serialize;

use crate::config::{MASTERY_MIN_CORRECT, MASTERY_MIN_INTERVAL};
use crate::domain::{Card, Deck, Level};

/// Mastered/total count for one level
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LevelProgress {
  pub level: Level,
  pub mastered: usize,
  pub total: usize,
}

pub fn is_mastered(card: &Card) -> bool {
  card.correct_count >= MASTERY_MIN_CORRECT && card.interval >= MASTERY_MIN_INTERVAL
}

pub fn total_mastered(deck: &Deck) -> usize {
  deck.values().filter(|c| is_mastered(c)).count()
}

/// Cards missed more often than answered, worst first, at most `limit`
pub fn difficult_cards(deck: &Deck, limit: usize) -> Vec<&Card> {
  let mut cards: Vec<&Card> = deck
    .values()
    .filter(|c| c.incorrect_count > c.correct_count && c.incorrect_count > 0)
    .collect();
  // Stable sort keeps deck order among ties
  cards.sort_by_key(|c| std::cmp::Reverse(c.incorrect_count - c.correct_count));
  cards.truncate(limit);
  cards
}

/// Mastery per level, one entry for every level even when the deck has none
pub fn level_progress(deck: &Deck) -> Vec<LevelProgress> {
  Level::ALL
    .iter()
    .map(|&level| {
      let cards = deck.values().filter(|c| c.level == level);
      let (total, mastered) = cards.fold((0, 0), |(total, mastered), c| {
        (total + 1, mastered + usize::from(is_mastered(c)))
      });
      LevelProgress {
        level,
        mastered,
        total,
      }
    })
    .collect()
}
