pub mod card_selector;
pub mod choices;
pub mod scheduler;
pub mod stats;

pub use card_selector::{available_cards, question_kind, select_next};
pub use choices::generate_choices;
pub use scheduler::{apply_correct, apply_incorrect, points_for_streak};
pub use stats::{difficult_cards, is_mastered, level_progress, total_mastered, LevelProgress};
