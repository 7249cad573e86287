use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// JLPT level of a kanji, ordered from easiest to hardest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Level {
  N5,
  N4,
  N3,
  N2,
}

impl Level {
  pub const ALL: [Level; 4] = [Level::N5, Level::N4, Level::N3, Level::N2];

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::N5 => "N5",
      Self::N4 => "N4",
      Self::N3 => "N3",
      Self::N2 => "N2",
    }
  }
}

/// Which field of a card a question asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
  Reading,
  Meaning,
}

impl QuestionKind {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Reading => "reading",
      Self::Meaning => "meaning",
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
  pub kanji: String,
  pub reading: String,
  pub meaning: String,
  pub level: Level,

  // Scheduling fields, owned by the card store
  pub correct_count: u32,
  pub incorrect_count: u32,
  /// Days until the card is due again
  pub interval: u32,
  pub last_reviewed: Option<DateTime<Utc>>,
}

impl Card {
  pub fn new(kanji: &str, reading: &str, meaning: &str, level: Level) -> Self {
    Self {
      kanji: kanji.to_string(),
      reading: reading.to_string(),
      meaning: meaning.to_string(),
      level,
      correct_count: 0,
      incorrect_count: 0,
      interval: 1,
      last_reviewed: None,
    }
  }

  /// The correct answer for a question of the given kind
  pub fn answer(&self, kind: QuestionKind) -> &str {
    match kind {
      QuestionKind::Reading => &self.reading,
      QuestionKind::Meaning => &self.meaning,
    }
  }

  /// More incorrect than correct answers so far
  pub fn is_difficult(&self) -> bool {
    self.incorrect_count > self.correct_count
  }

  pub fn is_due(&self, now: DateTime<Utc>) -> bool {
    match self.last_reviewed {
      None => true,
      Some(last) => {
        let elapsed_days = (now - last).num_milliseconds() as f64 / MS_PER_DAY;
        elapsed_days >= f64::from(self.interval)
      }
    }
  }
}

const MS_PER_DAY: f64 = 86_400_000.0;

/// All cards keyed by kanji, in content order
pub type Deck = IndexMap<String, Card>;

/// Build a deck from a list of cards. Later duplicates replace earlier ones.
pub fn deck_from_cards(cards: Vec<Card>) -> Deck {
  cards.into_iter().map(|c| (c.kanji.clone(), c)).collect()
}
