//! Test fixtures shared across modules.

use rand::RngCore;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

use crate::config::{AppConfig, SessionConfig, DAILY_GOAL, SERVER_PORT, STARTING_LIVES};
use crate::db::{self, DbPool, StateStorage};
use crate::domain::{deck_from_cards, Card, Deck, Level};
use crate::error::StoreError;
use crate::store::StoreState;

/// Temporary directory with an initialized quiz database.
///
/// The directory (and database file) is removed when dropped.
pub struct TestEnv {
    /// Kept alive for database file persistence
    pub temp: TempDir,
    pub pool: DbPool,
}

impl TestEnv {
    pub fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let temp = TempDir::new()?;
        let pool = db::init_db(&temp.path().join("kanjida.db"))?;
        Ok(Self { temp, pool })
    }

    /// Get the temporary directory path for creating test files.
    pub fn path(&self) -> &Path {
        self.temp.path()
    }
}

const SAMPLE: [(&str, &str, &str, Level); 12] = [
    ("日", "にち", "day", Level::N5),
    ("月", "げつ", "moon", Level::N5),
    ("火", "か", "fire", Level::N5),
    ("水", "すい", "water", Level::N5),
    ("木", "もく", "tree", Level::N5),
    ("金", "きん", "gold", Level::N5),
    ("会", "かい", "meeting", Level::N4),
    ("同", "どう", "same", Level::N4),
    ("政", "せい", "politics", Level::N3),
    ("議", "ぎ", "deliberation", Level::N3),
    ("援", "えん", "assist", Level::N2),
    ("略", "りゃく", "abbreviation", Level::N2),
];

/// First `n` (at most 12) cards of a small deck with distinct readings and meanings
pub fn sample_cards(n: usize) -> Vec<Card> {
    SAMPLE
        .iter()
        .take(n)
        .map(|&(kanji, reading, meaning, level)| Card::new(kanji, reading, meaning, level))
        .collect()
}

pub fn sample_deck(n: usize) -> Deck {
    deck_from_cards(sample_cards(n))
}

/// Default configuration with the given session policy
pub fn test_config(session: SessionConfig) -> AppConfig {
    AppConfig {
        database_path: ":memory:".into(),
        deck_path: None,
        port: SERVER_PORT,
        daily_goal: DAILY_GOAL,
        starting_lives: STARTING_LIVES,
        session,
    }
}

/// In-memory state storage; can be switched to fail every save
#[derive(Clone, Default)]
pub struct MemoryStorage {
    saved: Arc<Mutex<Option<String>>>,
    fail_saves: Arc<Mutex<bool>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_fail_saves(&self, fail: bool) {
        *self.fail_saves.lock().unwrap() = fail;
    }

    /// Last successfully saved state, if any
    pub fn saved(&self) -> Option<StoreState> {
        let saved = self.saved.lock().unwrap();
        saved.as_deref().map(|json| serde_json::from_str(json).unwrap())
    }
}

impl StateStorage for MemoryStorage {
    fn load(&self) -> Result<Option<StoreState>, StoreError> {
        let saved = self.saved.lock().unwrap();
        match saved.as_deref() {
            Some(json) => Ok(Some(serde_json::from_str(json)?)),
            None => Ok(None),
        }
    }

    fn save(&self, state: &StoreState) -> Result<(), StoreError> {
        if *self.fail_saves.lock().unwrap() {
            return Err(StoreError::Persistence("storage rejected write".to_string()));
        }
        *self.saved.lock().unwrap() = Some(serde_json::to_string(state)?);
        Ok(())
    }
}

/// Generator that returns the same word forever.
///
/// `ConstRng(0)` makes every `random_bool(p)` with `p > 0` true and
/// `ConstRng(u64::MAX)` makes every `random_bool(p)` with `p < 1` false.
pub struct ConstRng(pub u64);

impl RngCore for ConstRng {
    fn next_u32(&mut self) -> u32 {
        (self.0 >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.0
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        let bytes = self.0.to_le_bytes();
        for (i, b) in dst.iter_mut().enumerate() {
            *b = bytes[i % 8];
        }
    }
}
