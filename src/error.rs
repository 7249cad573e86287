use thiserror::Error;

/// Failures of the persistence collaborator
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Database unavailable")]
    Unavailable,

    #[error("Persistence failed: {0}")]
    Persistence(String),
}

/// Failures surfaced to the session orchestrator and its callers
#[derive(Debug, Error)]
pub enum QuizError {
    #[error("Cannot build question: need {needed} distinct answers, found {available}")]
    InsufficientChoices { needed: usize, available: usize },

    #[error("No active session")]
    NoActiveSession,

    #[error("Question {0} is not awaiting an answer")]
    QuestionNotActive(u64),

    #[error("Choice {0} is out of range")]
    InvalidChoice(usize),

    #[error("Quiz state unavailable")]
    StateUnavailable,

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type Result<T> = std::result::Result<T, QuizError>;
