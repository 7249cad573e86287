//! Quiz session orchestration.
//!
//! A session asks a fixed number of questions without repeating a kanji,
//! pulling each card from the selection engine and feeding every resolution
//! back into the card store. Each question resolves exactly once, either by an
//! answer or by its timeout, whichever arrives first.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::Serialize;
use std::collections::HashSet;

use crate::config::SessionConfig;
use crate::domain::{AnswerOutcome, Question, Resolution};
use crate::error::{QuizError, Result};
use crate::srs::{generate_choices, points_for_streak, question_kind, select_next};
use crate::store::CardStore;

/// Why a session stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EndReason {
  /// Asked the configured number of questions
  Completed,
  /// Every card in the deck was already asked
  DeckExhausted,
  /// Too many timeouts in a row
  Idle,
  /// Ended on request
  Abandoned,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
  Active,
  Ended(EndReason),
}

/// Summary shown when a session ends
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSummary {
  pub questions_answered: u32,
  pub correct: u32,
  pub reason: EndReason,
}

#[derive(Debug)]
pub struct QuizSession {
  config: SessionConfig,
  /// Kanji already asked; passed to selection as the exclusion set
  asked: HashSet<String>,
  current: Option<Question>,
  questions_answered: u32,
  correct: u32,
  consecutive_timeouts: u32,
  next_question_id: u64,
  status: SessionStatus,
  /// Outcome of the most recent resolution, kept even when saving it failed
  last_outcome: Option<AnswerOutcome>,
}

impl QuizSession {
  pub fn new(config: SessionConfig) -> Self {
    Self::starting_at(config, 1)
  }

  /// Question ids continue from `first_question_id`, so ids stay unique
  /// across sessions that share a timer
  pub fn starting_at(config: SessionConfig, first_question_id: u64) -> Self {
    tracing::info!(questions = config.questions_per_session, "Starting quiz session");
    Self {
      config,
      asked: HashSet::new(),
      current: None,
      questions_answered: 0,
      correct: 0,
      consecutive_timeouts: 0,
      next_question_id: first_question_id,
      status: SessionStatus::Active,
      last_outcome: None,
    }
  }

  pub fn config(&self) -> &SessionConfig {
    &self.config
  }

  pub fn status(&self) -> SessionStatus {
    self.status
  }

  pub fn is_active(&self) -> bool {
    self.status == SessionStatus::Active
  }

  pub fn current_question(&self) -> Option<&Question> {
    self.current.as_ref()
  }

  pub fn asked(&self) -> &HashSet<String> {
    &self.asked
  }

  pub fn questions_answered(&self) -> u32 {
    self.questions_answered
  }

  pub fn last_outcome(&self) -> Option<&AnswerOutcome> {
    self.last_outcome.as_ref()
  }

  /// Id the next presented question will get
  pub fn next_question_id(&self) -> u64 {
    self.next_question_id
  }

  pub fn summary(&self) -> Option<SessionSummary> {
    match self.status {
      SessionStatus::Active => None,
      SessionStatus::Ended(reason) => Some(SessionSummary {
        questions_answered: self.questions_answered,
        correct: self.correct,
        reason,
      }),
    }
  }

  pub fn next_question(
    &mut self,
    store: &CardStore,
    rng: &mut impl Rng,
  ) -> Result<Option<&Question>> {
    self.next_question_at(store, rng, Utc::now())
  }

  /// Present the next question, or `None` once the session has ended.
  ///
  /// An unresolved current question is returned as is rather than replaced.
  pub fn next_question_at(
    &mut self,
    store: &CardStore,
    rng: &mut impl Rng,
    now: DateTime<Utc>,
  ) -> Result<Option<&Question>> {
    if !self.is_active() {
      return Ok(None);
    }
    if self.current.is_some() {
      return Ok(self.current.as_ref());
    }
    if self.questions_answered >= self.config.questions_per_session {
      self.end(EndReason::Completed);
      return Ok(None);
    }

    let Some(card) = select_next(store.deck(), &self.asked, now, rng) else {
      self.end(EndReason::DeckExhausted);
      return Ok(None);
    };

    let kind = question_kind(store.progress().mode, rng);
    let choices = generate_choices(card, store.deck(), kind, rng)?;

    self.asked.insert(card.kanji.clone());
    let question = Question {
      id: self.next_question_id,
      kanji: card.kanji.clone(),
      level: card.level,
      kind,
      choices,
      correct_answer: card.answer(kind).to_string(),
    };
    self.next_question_id += 1;
    tracing::debug!(id = question.id, kanji = %question.kanji, kind = kind.as_str(), "Presenting question");

    Ok(Some(&*self.current.insert(question)))
  }

  pub fn answer(
    &mut self,
    store: &mut CardStore,
    question_id: u64,
    choice: usize,
  ) -> Result<AnswerOutcome> {
    self.answer_at(store, question_id, choice, Utc::now())
  }

  /// Resolve the current question with the learner's choice.
  pub fn answer_at(
    &mut self,
    store: &mut CardStore,
    question_id: u64,
    choice: usize,
    now: DateTime<Utc>,
  ) -> Result<AnswerOutcome> {
    let question = self
      .current
      .as_ref()
      .filter(|q| q.id == question_id)
      .ok_or(QuizError::QuestionNotActive(question_id))?;
    let is_correct = question
      .is_correct_choice(choice)
      .ok_or(QuizError::InvalidChoice(choice))?;

    let resolution = if is_correct {
      Resolution::Correct
    } else {
      Resolution::Incorrect
    };
    self.resolve(store, resolution, now)
  }

  pub fn expire(&mut self, store: &mut CardStore, question_id: u64) -> Result<Option<AnswerOutcome>> {
    self.expire_at(store, question_id, Utc::now())
  }

  /// Resolve the current question as timed out.
  ///
  /// Returns `Ok(None)` when `question_id` is no longer awaiting an answer, so
  /// a late timer never resolves a question twice.
  pub fn expire_at(
    &mut self,
    store: &mut CardStore,
    question_id: u64,
    now: DateTime<Utc>,
  ) -> Result<Option<AnswerOutcome>> {
    if !self.current.as_ref().is_some_and(|q| q.id == question_id) {
      tracing::debug!(question_id, "Ignoring timeout for resolved question");
      return Ok(None);
    }

    self.resolve(store, Resolution::TimedOut, now).map(Some)
  }

  /// Stop the session now. An unresolved question is dropped without scoring.
  pub fn abandon(&mut self) {
    if self.is_active() {
      self.current = None;
      self.end(EndReason::Abandoned);
    }
  }

  fn resolve(
    &mut self,
    store: &mut CardStore,
    resolution: Resolution,
    now: DateTime<Utc>,
  ) -> Result<AnswerOutcome> {
    let question = self
      .current
      .take()
      .ok_or(QuizError::NoActiveSession)?;

    self.questions_answered += 1;
    match resolution {
      Resolution::Correct => {
        self.correct += 1;
        self.consecutive_timeouts = 0;
      }
      Resolution::Incorrect => self.consecutive_timeouts = 0,
      Resolution::TimedOut => self.consecutive_timeouts += 1,
    }

    let idle_limit = self.config.max_consecutive_timeouts;
    if self.questions_answered >= self.config.questions_per_session {
      self.end(EndReason::Completed);
    } else if idle_limit.is_some_and(|limit| self.consecutive_timeouts >= limit) {
      tracing::info!(timeouts = self.consecutive_timeouts, "Ending idle session");
      self.end(EndReason::Idle);
    }

    // Session counters are settled before the store write so a failed write
    // cannot leave the question open for a second resolution
    let recorded = if resolution.is_correct() {
      store.record_correct_at(Some(&question.kanji), now)
    } else {
      store.record_incorrect_at(Some(&question.kanji), now)
    };

    let progress = store.progress();
    let (points_earned, interval) = match &recorded {
      Ok(review) => (review.points_earned, review.interval),
      // The store keeps its in-memory update when the write fails
      Err(_) => (
        if resolution.is_correct() {
          points_for_streak(progress.streak)
        } else {
          0
        },
        store.card(&question.kanji).map(|c| c.interval),
      ),
    };
    tracing::debug!(id = question.id, ?resolution, score = progress.score, "Resolved question");

    let outcome = AnswerOutcome {
      question_id: question.id,
      kanji: question.kanji,
      resolution,
      correct_answer: question.correct_answer,
      points_earned,
      score: progress.score,
      streak: progress.streak,
      lives: progress.lives,
      interval,
      session_complete: !self.is_active(),
    };
    self.last_outcome = Some(outcome.clone());

    recorded?;
    Ok(outcome)
  }

  fn end(&mut self, reason: EndReason) {
    tracing::info!(
      ?reason,
      answered = self.questions_answered,
      correct = self.correct,
      "Quiz session ended"
    );
    self.status = SessionStatus::Ended(reason);
  }
}
