//! Card store: the single owner of card scheduling state and progress counters.
//!
//! Every mutation is applied in memory first and then persisted. A failed write
//! leaves the in-memory update in place and reports the error to the caller.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::db::StateStorage;
use crate::domain::{deck_from_cards, Card, Deck, Progress, StudyMode};
use crate::error::StoreError;
use crate::srs::{apply_correct, apply_incorrect, points_for_streak};

/// Everything that is persisted between runs
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StoreState {
  pub deck: Deck,
  pub progress: Progress,
}

/// Effect of one recorded answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReviewOutcome {
  pub points_earned: u64,
  /// New interval of the answered card, `None` when no card was updated
  pub interval: Option<u32>,
}

pub struct CardStore {
  state: StoreState,
  starting_lives: i32,
  storage: Box<dyn StateStorage>,
}

impl CardStore {
  /// Load persisted state, or start empty with default progress
  pub fn open(storage: Box<dyn StateStorage>) -> Result<Self, StoreError> {
    Self::open_with(storage, Progress::default())
  }

  /// Like [`CardStore::open`], with the progress used when nothing is persisted
  pub fn open_with(storage: Box<dyn StateStorage>, initial: Progress) -> Result<Self, StoreError> {
    let starting_lives = initial.lives;
    let state = match storage.load()? {
      Some(state) => {
        tracing::info!(cards = state.deck.len(), score = state.progress.score, "Loaded saved quiz state");
        state
      }
      None => StoreState {
        deck: Deck::new(),
        progress: initial,
      },
    };

    Ok(Self {
      state,
      starting_lives,
      storage,
    })
  }

  pub fn snapshot(&self) -> &StoreState {
    &self.state
  }

  pub fn deck(&self) -> &Deck {
    &self.state.deck
  }

  pub fn progress(&self) -> &Progress {
    &self.state.progress
  }

  pub fn card(&self, key: &str) -> Option<&Card> {
    self.state.deck.get(key)
  }

  pub fn is_empty(&self) -> bool {
    self.state.deck.is_empty()
  }

  /// Replace the deck wholesale. Wipes all scheduling progress, so callers
  /// should only do this when [`CardStore::is_empty`] holds.
  pub fn initialize_deck(&mut self, cards: Vec<Card>) -> Result<(), StoreError> {
    self.state.deck = deck_from_cards(cards);
    tracing::info!(cards = self.state.deck.len(), "Initialized deck");
    self.persist()
  }

  pub fn record_correct(&mut self, key: Option<&str>) -> Result<ReviewOutcome, StoreError> {
    self.record_correct_at(key, Utc::now())
  }

  /// Correct answer for `key`. Progress always updates; the card only when
  /// `key` names a card in the deck.
  pub fn record_correct_at(
    &mut self,
    key: Option<&str>,
    now: DateTime<Utc>,
  ) -> Result<ReviewOutcome, StoreError> {
    let progress = &mut self.state.progress;
    progress.streak += 1;
    let points_earned = points_for_streak(progress.streak);
    progress.score += points_earned;
    progress.answered_today += 1;

    let interval = self.update_card(key, |card| apply_correct(card, now));
    tracing::debug!(?key, points_earned, ?interval, "Recorded correct answer");

    self.persist()?;
    Ok(ReviewOutcome {
      points_earned,
      interval,
    })
  }

  pub fn record_incorrect(&mut self, key: Option<&str>) -> Result<ReviewOutcome, StoreError> {
    self.record_incorrect_at(key, Utc::now())
  }

  /// Incorrect answer or timeout for `key`. Resets the streak and costs a life.
  pub fn record_incorrect_at(
    &mut self,
    key: Option<&str>,
    now: DateTime<Utc>,
  ) -> Result<ReviewOutcome, StoreError> {
    let progress = &mut self.state.progress;
    progress.streak = 0;
    progress.lives -= 1;
    progress.answered_today += 1;

    let interval = self.update_card(key, |card| apply_incorrect(card, now));
    tracing::debug!(?key, ?interval, "Recorded incorrect answer");

    self.persist()?;
    Ok(ReviewOutcome {
      points_earned: 0,
      interval,
    })
  }

  pub fn set_mode(&mut self, mode: StudyMode) -> Result<(), StoreError> {
    self.state.progress.mode = mode;
    self.persist()
  }

  /// Score, lives and streak back to their starting values. Card schedules are kept.
  pub fn reset_game(&mut self) -> Result<(), StoreError> {
    let progress = &mut self.state.progress;
    progress.score = 0;
    progress.lives = self.starting_lives;
    progress.streak = 0;
    tracing::info!("Reset game counters");
    self.persist()
  }

  fn update_card(&mut self, key: Option<&str>, apply: impl FnOnce(&mut Card)) -> Option<u32> {
    let card = self.state.deck.get_mut(key?)?;
    apply(card);
    Some(card.interval)
  }

  fn persist(&self) -> Result<(), StoreError> {
    self.storage.save(&self.state).map_err(|e| {
      tracing::error!("Failed to persist quiz state: {}", e);
      e
    })
  }
}
