pub mod card;
pub mod progress;
pub mod question;

pub use card::{deck_from_cards, Card, Deck, Level, QuestionKind};
pub use progress::{Progress, StudyMode};
pub use question::{AnswerOutcome, Question, Resolution};
