//! Core language-trainer logic shared by the trainer application.
//!
//! Provides:
//! - Normalization of raw bilingual dataset records (per-language dialects)
//! - Flashcard generation from grammar-rule examples and user input
//! - Level/category filtering
//! - Multiple-choice quiz synthesis and scoring
//! - Memory-match board and reveal/match state machine
//! - Exact-match bilingual lookup

pub mod error;
pub mod filter;
pub mod generate;
pub mod lookup;
pub mod matching;
pub mod normalize;
pub mod quiz;
pub mod types;

pub use error::{CardError, NormalizeError, Result};
pub use filter::{distinct_categories, distinct_levels, filter_cards};
pub use generate::{custom_flashcard, flashcards_from_rule, parse_tags, NewFlashcard};
pub use lookup::translate;
pub use matching::{ClickOutcome, MatchGame, PendingCheck, DEFAULT_PAIR_COUNT};
pub use normalize::{normalize, RawExample, RawRule};
pub use quiz::{score, synthesize, DEFAULT_QUESTION_COUNT};
pub use types::{
    Direction, Example, Flashcard, GrammarRule, LanguageTag, MatchCard, QuizQuestion,
    TargetLanguage, VocabEntry,
};
