//! Application configuration constants.
//!
//! Engine tunables live here as constants. Deployment settings are read from
//! `config.toml`, then the environment (`.env` is loaded first), then defaults.

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use crate::paths;

// ==================== Scheduling ====================

/// Interval ceiling in days; correct answers double the interval up to this
pub const MAX_INTERVAL_DAYS: u32 = 30;

/// Interval after an incorrect answer or timeout
pub const RESET_INTERVAL_DAYS: u32 = 1;

/// Points per streak step for a correct answer
pub const POINTS_PER_STREAK: u64 = 10;

/// Streak multiplier cap (10 * min(streak, 10))
pub const MAX_STREAK_MULTIPLIER: u32 = 10;

// ==================== Selection ====================

/// Probability of drawing from the difficult subset when it is non-empty
pub const DIFFICULT_CARD_BIAS: f64 = 0.7;

/// Total choices per question (one correct answer plus distractors)
pub const CHOICE_COUNT: usize = 4;

/// Number of distractor choices in multiple choice mode
pub const DISTRACTOR_COUNT: usize = CHOICE_COUNT - 1;

// ==================== Statistics ====================

/// A card is mastered at this many correct answers...
pub const MASTERY_MIN_CORRECT: u32 = 3;

/// ...and an interval of at least this many days
pub const MASTERY_MIN_INTERVAL: u32 = 7;

/// Limit for difficult cards display
pub const DIFFICULT_CARDS_LIMIT: usize = 5;

// ==================== Progress ====================

pub const STARTING_LIVES: i32 = 3;

pub const DAILY_GOAL: u32 = 100;

// ==================== Session ====================

pub const QUESTIONS_PER_SESSION: u32 = 10;

/// Seconds the learner has to answer before the question times out
pub const ANSWER_TIMEOUT_SECS: u64 = 10;

/// Fixed persistence key for the serialized store state
pub const STORE_NAME: &str = "kanjida-storage";

// ==================== Server ====================

/// Server address to bind to
pub const SERVER_ADDR: &str = "127.0.0.1";

/// Default server port
pub const SERVER_PORT: u16 = 3000;

// ==================== Loaded configuration ====================

/// Configuration file structure for config.toml
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    database: Option<DatabaseSection>,
    quiz: Option<QuizSection>,
    server: Option<ServerSection>,
    content: Option<ContentSection>,
}

#[derive(Debug, Deserialize)]
struct DatabaseSection {
    path: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct QuizSection {
    questions_per_session: Option<u32>,
    answer_timeout_secs: Option<u64>,
    max_consecutive_timeouts: Option<u32>,
    daily_goal: Option<u32>,
    starting_lives: Option<i32>,
}

#[derive(Debug, Deserialize)]
struct ServerSection {
    port: Option<u16>,
}

#[derive(Debug, Deserialize)]
struct ContentSection {
    deck_path: Option<String>,
}

/// Per-session policy handed to the orchestrator
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    pub questions_per_session: u32,
    pub answer_timeout: Duration,
    /// End the session after this many timeouts in a row; `None` disables it
    pub max_consecutive_timeouts: Option<u32>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            questions_per_session: QUESTIONS_PER_SESSION,
            answer_timeout: Duration::from_secs(ANSWER_TIMEOUT_SECS),
            max_consecutive_timeouts: None,
        }
    }
}

/// Fully resolved application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_path: PathBuf,
    pub deck_path: Option<PathBuf>,
    pub port: u16,
    pub daily_goal: u32,
    pub starting_lives: i32,
    pub session: SessionConfig,
}

impl AppConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", SERVER_ADDR, self.port)
    }
}

/// Load configuration with priority: config.toml > .env / environment > default
pub fn load() -> AppConfig {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let file = match std::fs::read_to_string("config.toml") {
        Ok(contents) => parse_config_file(&contents),
        Err(_) => ConfigFile::default(),
    };
    resolve(file, |key| std::env::var(key).ok())
}

fn parse_config_file(contents: &str) -> ConfigFile {
    match toml::from_str::<ConfigFile>(contents) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("Ignoring invalid config.toml: {}", e);
            ConfigFile::default()
        }
    }
}

fn resolve(file: ConfigFile, env: impl Fn(&str) -> Option<String>) -> AppConfig {
    let database_path = match file.database.and_then(|d| d.path) {
        Some(path) => {
            tracing::info!("Using database from config.toml: {}", path);
            PathBuf::from(path)
        }
        None => match env("DATABASE_PATH") {
            Some(path) => {
                tracing::info!("Using database from DATABASE_PATH env: {}", path);
                PathBuf::from(path)
            }
            None => {
                let default = PathBuf::from(paths::db_path());
                tracing::info!("Using default database path: {}", default.display());
                default
            }
        },
    };

    let deck_path = file
        .content
        .and_then(|c| c.deck_path)
        .or_else(|| env("DECK_PATH"))
        .map(PathBuf::from);

    let port = file
        .server
        .and_then(|s| s.port)
        .or_else(|| env("PORT").and_then(|p| p.parse().ok()))
        .unwrap_or(SERVER_PORT);

    let quiz = file.quiz.unwrap_or_default();
    let session = SessionConfig {
        questions_per_session: quiz.questions_per_session.unwrap_or(QUESTIONS_PER_SESSION),
        answer_timeout: Duration::from_secs(quiz.answer_timeout_secs.unwrap_or(ANSWER_TIMEOUT_SECS)),
        max_consecutive_timeouts: quiz.max_consecutive_timeouts,
    };

    AppConfig {
        database_path,
        deck_path,
        port,
        daily_goal: quiz.daily_goal.unwrap_or(DAILY_GOAL),
        starting_lives: quiz.starting_lives.unwrap_or(STARTING_LIVES),
        session,
    }
}
