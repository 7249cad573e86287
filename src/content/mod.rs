//! Learning content: the cards a deck is initialized from.
//!
//! Content is read-only input to the card store. It comes either from the
//! built-in table in [`kanji`] or from a JSON deck file:
//!
//! ```json
//! [{ "kanji": "水", "reading": "すい", "meaning": "water", "level": "N5" }]
//! ```

pub mod kanji;

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::domain::{Card, Level};

/// One entry of a deck file
#[derive(Debug, Clone, Deserialize)]
pub struct CardDefinition {
    pub kanji: String,
    pub reading: String,
    pub meaning: String,
    pub level: Level,
}

impl CardDefinition {
    pub fn into_card(self) -> Card {
        Card::new(&self.kanji, &self.reading, &self.meaning, self.level)
    }
}

/// Deck file loading errors.
#[derive(Debug, Error)]
pub enum CardLoadError {
    #[error("Card file not found: {0}")]
    FileNotFound(String),
    #[error("IO error reading {0}: {1}")]
    IoError(String, String),
    #[error("Parse error in {0}: {1}")]
    ParseError(String, String),
}

/// Load cards from a JSON deck file.
pub fn load_deck_file(path: &Path) -> Result<Vec<Card>, CardLoadError> {
    if !path.exists() {
        return Err(CardLoadError::FileNotFound(path.display().to_string()));
    }

    let content = fs::read_to_string(path)
        .map_err(|e| CardLoadError::IoError(path.display().to_string(), e.to_string()))?;

    let definitions: Vec<CardDefinition> = serde_json::from_str(&content)
        .map_err(|e| CardLoadError::ParseError(path.display().to_string(), e.to_string()))?;

    tracing::debug!("Loaded {} cards from {}", definitions.len(), path.display());
    Ok(definitions.into_iter().map(CardDefinition::into_card).collect())
}

pub fn builtin_deck() -> Vec<Card> {
    kanji::BUILTIN_KANJI
        .iter()
        .map(|&(kanji, reading, meaning, level)| Card::new(kanji, reading, meaning, level))
        .collect()
}

/// Cards from `path` when given and readable, otherwise the built-in deck
pub fn load_deck(path: Option<&Path>) -> Vec<Card> {
    match path {
        Some(path) => match load_deck_file(path) {
            Ok(cards) if !cards.is_empty() => cards,
            Ok(_) => {
                tracing::warn!("Deck file {} is empty, using built-in deck", path.display());
                builtin_deck()
            }
            Err(e) => {
                tracing::warn!("{}, using built-in deck", e);
                builtin_deck()
            }
        },
        None => builtin_deck(),
    }
}

/// Number of cards per level, for display
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LevelCounts {
    pub n5: usize,
    pub n4: usize,
    pub n3: usize,
    pub n2: usize,
    pub total: usize,
}

pub fn level_counts<'a>(cards: impl IntoIterator<Item = &'a Card>) -> LevelCounts {
    let mut counts = LevelCounts::default();
    for card in cards {
        match card.level {
            Level::N5 => counts.n5 += 1,
            Level::N4 => counts.n4 += 1,
            Level::N3 => counts.n3 += 1,
            Level::N2 => counts.n2 += 1,
        }
        counts.total += 1;
    }
    counts
}
