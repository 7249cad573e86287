//! Application state shared by all handlers.

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard, Weak};

use crate::config::AppConfig;
use crate::domain::{AnswerOutcome, Question, StudyMode};
use crate::error::{QuizError, Result};
use crate::session::{QuizSession, SessionStatus, SessionSummary};
use crate::store::CardStore;
use crate::timer::QuestionTimer;

/// Everything the learner's quiz needs, guarded by a single lock
pub struct Quiz {
    pub store: CardStore,
    pub session: Option<QuizSession>,
    rng: StdRng,
    timer: QuestionTimer,
    /// Most recent resolution, so a timeout is visible on the next poll
    last_outcome: Option<AnswerOutcome>,
    /// Set when the most recent resolution could not be saved
    last_error: Option<String>,
    next_question_id: u64,
}

impl Quiz {
    fn view(&self, timeout_secs: u64) -> SessionView {
        match &self.session {
            Some(session) => SessionView {
                status: Some(session.status()),
                question: session.current_question().cloned(),
                questions_answered: session.questions_answered(),
                questions_per_session: session.config().questions_per_session,
                answer_timeout_secs: timeout_secs,
                last_outcome: self.last_outcome.clone(),
                last_error: self.last_error.clone(),
                summary: session.summary(),
            },
            None => SessionView {
                status: None,
                question: None,
                questions_answered: 0,
                questions_per_session: 0,
                answer_timeout_secs: timeout_secs,
                last_outcome: self.last_outcome.clone(),
                last_error: self.last_error.clone(),
                summary: None,
            },
        }
    }

    /// Present the next question; returns its id when it was newly presented
    fn present(&mut self) -> Result<Option<u64>> {
        let Quiz {
            store,
            session,
            rng,
            ..
        } = self;
        let session = session.as_mut().ok_or(QuizError::NoActiveSession)?;
        let pending = session.current_question().map(|q| q.id);

        let presented = session.next_question(store, rng)?.map(|q| q.id);
        self.next_question_id = session.next_question_id();

        Ok(presented.filter(|id| Some(*id) != pending))
    }

    fn expire(&mut self, question_id: u64) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        match session.expire(&mut self.store, question_id) {
            Ok(Some(outcome)) => {
                tracing::info!(question_id, kanji = %outcome.kanji, "Question timed out");
                self.last_outcome = Some(outcome);
                self.last_error = None;
            }
            Ok(None) => {}
            // The question is resolved either way; keep what the learner should see
            Err(e) => {
                tracing::error!(question_id, "Failed to record timeout: {}", e);
                self.last_outcome = session.last_outcome().cloned();
                self.last_error = Some(e.to_string());
            }
        }
    }
}

/// Snapshot of the session for the API
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    /// `None` when no session was ever started
    pub status: Option<SessionStatus>,
    pub question: Option<Question>,
    pub questions_answered: u32,
    pub questions_per_session: u32,
    pub answer_timeout_secs: u64,
    pub last_outcome: Option<AnswerOutcome>,
    pub last_error: Option<String>,
    pub summary: Option<SessionSummary>,
}

/// Application state passed to all handlers
#[derive(Clone)]
pub struct AppState {
    quiz: Arc<Mutex<Quiz>>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(store: CardStore, config: AppConfig) -> Self {
        Self::with_rng(store, config, StdRng::from_os_rng())
    }

    pub fn with_rng(store: CardStore, config: AppConfig, rng: StdRng) -> Self {
        let quiz = Quiz {
            store,
            session: None,
            rng,
            timer: QuestionTimer::new(),
            last_outcome: None,
            last_error: None,
            next_question_id: 1,
        };
        Self {
            quiz: Arc::new(Mutex::new(quiz)),
            config: Arc::new(config),
        }
    }

    /// Lock the quiz. Never hold the guard across an `.await`.
    pub fn lock(&self) -> Result<MutexGuard<'_, Quiz>> {
        self.quiz.lock().map_err(|_| {
            tracing::error!("Quiz state lock poisoned");
            QuizError::StateUnavailable
        })
    }

    fn timeout_secs(&self) -> u64 {
        self.config.session.answer_timeout.as_secs()
    }

    /// Start a fresh session, abandoning any session in progress
    pub fn start_session(&self) -> Result<SessionView> {
        let mut quiz = self.lock()?;
        quiz.timer.cancel();
        if let Some(session) = quiz.session.as_mut() {
            session.abandon();
        }

        let first_id = quiz.next_question_id;
        quiz.session = Some(QuizSession::starting_at(self.config.session.clone(), first_id));
        quiz.last_outcome = None;
        quiz.last_error = None;

        if let Some(id) = quiz.present()? {
            self.arm_timer(&mut quiz, id);
        }
        Ok(quiz.view(self.timeout_secs()))
    }

    pub fn session_view(&self) -> Result<SessionView> {
        Ok(self.lock()?.view(self.timeout_secs()))
    }

    pub fn answer(&self, question_id: u64, choice: usize) -> Result<AnswerOutcome> {
        let mut quiz = self.lock()?;
        let Quiz {
            store,
            session,
            timer,
            last_outcome,
            last_error,
            ..
        } = &mut *quiz;
        let session = session.as_mut().ok_or(QuizError::NoActiveSession)?;

        let result = session.answer(store, question_id, choice);
        // A rejected answer leaves the question open and the countdown running
        if matches!(
            result,
            Err(QuizError::QuestionNotActive(_) | QuizError::InvalidChoice(_))
        ) {
            return result;
        }
        match &result {
            Ok(outcome) => {
                *last_outcome = Some(outcome.clone());
                *last_error = None;
            }
            Err(e) => {
                *last_outcome = session.last_outcome().cloned();
                *last_error = Some(e.to_string());
            }
        }
        timer.cancel();
        result
    }

    /// Move on to the next question, or to the summary once the session ended
    pub fn next_question(&self) -> Result<SessionView> {
        let mut quiz = self.lock()?;
        if let Some(id) = quiz.present()? {
            quiz.last_outcome = None;
            quiz.last_error = None;
            self.arm_timer(&mut quiz, id);
        }
        Ok(quiz.view(self.timeout_secs()))
    }

    pub fn end_session(&self) -> Result<SessionView> {
        let mut quiz = self.lock()?;
        quiz.timer.cancel();
        quiz.session
            .as_mut()
            .ok_or(QuizError::NoActiveSession)?
            .abandon();
        Ok(quiz.view(self.timeout_secs()))
    }

    pub fn set_mode(&self, mode: StudyMode) -> Result<()> {
        self.lock()?.store.set_mode(mode)?;
        tracing::info!(mode = mode.as_str(), "Study mode changed");
        Ok(())
    }

    pub fn reset_game(&self) -> Result<()> {
        Ok(self.lock()?.store.reset_game()?)
    }

    fn arm_timer(&self, quiz: &mut Quiz, question_id: u64) {
        let handle: Weak<Mutex<Quiz>> = Arc::downgrade(&self.quiz);
        quiz.timer.start(self.config.session.answer_timeout, move || {
            let Some(quiz) = handle.upgrade() else {
                return;
            };
            // Runs on a runtime worker: the SQLite write under this std lock is a
            // single small upsert for one local learner, so it is not moved to
            // spawn_blocking.
            match quiz.lock() {
                Ok(mut quiz) => quiz.expire(question_id),
                Err(_) => tracing::error!(question_id, "Quiz state lock poisoned on timeout"),
            };
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SessionConfig;
    use crate::domain::Resolution;
    use crate::session::EndReason;
    use crate::testing::{sample_cards, test_config, MemoryStorage};
    use std::time::Duration;

    fn app_state_with_storage(questions: u32) -> (AppState, MemoryStorage) {
        let storage = MemoryStorage::new();
        let mut store = CardStore::open(Box::new(storage.clone())).unwrap();
        store.initialize_deck(sample_cards(8)).unwrap();
        let config = test_config(SessionConfig {
            questions_per_session: questions,
            answer_timeout: Duration::from_secs(10),
            max_consecutive_timeouts: None,
        });
        let state = AppState::with_rng(store, config, StdRng::seed_from_u64(21));
        (state, storage)
    }

    fn app_state(questions: u32) -> AppState {
        app_state_with_storage(questions).0
    }

    fn correct_index(q: &Question) -> usize {
        q.choices.iter().position(|c| *c == q.correct_answer).unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_presents_question() {
        let state = app_state(3);
        let view = state.start_session().unwrap();
        assert_eq!(view.status, Some(SessionStatus::Active));
        assert!(view.question.is_some());
        assert_eq!(view.answer_timeout_secs, 10);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_resolves_question() {
        let state = app_state(3);
        let question = state.start_session().unwrap().question.unwrap();

        tokio::time::sleep(Duration::from_secs(11)).await;

        let view = state.session_view().unwrap();
        assert!(view.question.is_none());
        let outcome = view.last_outcome.unwrap();
        assert_eq!(outcome.question_id, question.id);
        assert_eq!(outcome.resolution, Resolution::TimedOut);
        assert_eq!(state.lock().unwrap().store.progress().lives, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_with_failed_save_still_reported() {
        let (state, storage) = app_state_with_storage(3);
        let question = state.start_session().unwrap().question.unwrap();
        storage.set_fail_saves(true);

        tokio::time::sleep(Duration::from_secs(11)).await;

        let view = state.session_view().unwrap();
        assert!(view.question.is_none());
        let outcome = view.last_outcome.unwrap();
        assert_eq!(outcome.question_id, question.id);
        assert_eq!(outcome.resolution, Resolution::TimedOut);
        assert!(view.last_error.is_some());
        assert_eq!(view.questions_answered, 1);
        assert_eq!(state.lock().unwrap().store.progress().lives, 2);

        // The next question clears the error once saving works again
        storage.set_fail_saves(false);
        let view = state.next_question().unwrap();
        assert!(view.question.is_some());
        assert!(view.last_error.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_answer_save_keeps_outcome() {
        let (state, storage) = app_state_with_storage(3);
        let question = state.start_session().unwrap().question.unwrap();
        storage.set_fail_saves(true);

        let result = state.answer(question.id, correct_index(&question));
        assert!(matches!(result, Err(QuizError::Store(_))));

        let view = state.session_view().unwrap();
        assert_eq!(view.last_outcome.unwrap().resolution, Resolution::Correct);
        assert!(view.last_error.is_some());

        // Countdown was cancelled with the resolution
        tokio::time::sleep(Duration::from_secs(30)).await;
        assert_eq!(state.lock().unwrap().store.progress().lives, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_answer_cancels_timeout() {
        let state = app_state(3);
        let question = state.start_session().unwrap().question.unwrap();

        let outcome = state.answer(question.id, correct_index(&question)).unwrap();
        assert_eq!(outcome.resolution, Resolution::Correct);

        tokio::time::sleep(Duration::from_secs(30)).await;
        let quiz = state.lock().unwrap();
        assert_eq!(quiz.store.progress().answered_today, 1);
        assert_eq!(quiz.store.progress().lives, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalid_choice_keeps_timer() {
        let state = app_state(3);
        let question = state.start_session().unwrap().question.unwrap();

        assert!(matches!(state.answer(question.id, 7), Err(QuizError::InvalidChoice(7))));
        tokio::time::sleep(Duration::from_secs(11)).await;

        let outcome = state.session_view().unwrap().last_outcome.unwrap();
        assert_eq!(outcome.resolution, Resolution::TimedOut);
    }

    #[tokio::test(start_paused = true)]
    async fn test_next_does_not_restart_pending_question() {
        let state = app_state(3);
        let first = state.start_session().unwrap().question.unwrap();

        tokio::time::sleep(Duration::from_secs(6)).await;
        let again = state.next_question().unwrap().question.unwrap();
        assert_eq!(again.id, first.id);

        // Countdown keeps its original deadline
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(state.session_view().unwrap().question.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_full_session_reaches_summary() {
        let state = app_state(2);
        let mut view = state.start_session().unwrap();

        while let Some(question) = view.question.clone() {
            state.answer(question.id, correct_index(&question)).unwrap();
            view = state.next_question().unwrap();
        }

        let summary = view.summary.unwrap();
        assert_eq!(summary.reason, EndReason::Completed);
        assert_eq!(summary.correct, 2);
        assert_eq!(state.lock().unwrap().store.progress().score, 30);
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_keeps_question_ids_unique() {
        let state = app_state(3);
        let first = state.start_session().unwrap().question.unwrap();
        let second = state.start_session().unwrap().question.unwrap();

        assert!(second.id > first.id);
        assert!(matches!(
            state.answer(first.id, 0),
            Err(QuizError::QuestionNotActive(_))
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_end_session_stops_timer() {
        let state = app_state(3);
        state.start_session().unwrap();

        let view = state.end_session().unwrap();
        assert_eq!(view.summary.unwrap().reason, EndReason::Abandoned);

        tokio::time::sleep(Duration::from_secs(30)).await;
        assert_eq!(state.lock().unwrap().store.progress().answered_today, 0);
    }

    #[test]
    fn test_answer_without_session() {
        let state = app_state(3);
        assert!(matches!(state.answer(1, 0), Err(QuizError::NoActiveSession)));
        assert!(matches!(state.end_session(), Err(QuizError::NoActiveSession)));
    }
}
