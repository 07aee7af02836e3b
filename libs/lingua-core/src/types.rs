//! Core types for the language trainer.

use serde::{Deserialize, Serialize};

/// Target language being studied (English is always the other side).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetLanguage {
    French,
    Spanish,
}

impl Default for TargetLanguage {
    fn default() -> Self {
        Self::French
    }
}

impl TargetLanguage {
    /// Short key used for storage slots and dataset selection.
    pub fn key(self) -> &'static str {
        match self {
            Self::French => "fr",
            Self::Spanish => "es",
        }
    }

    /// Display label in the language itself.
    pub fn label(self) -> &'static str {
        match self {
            Self::French => "Français",
            Self::Spanish => "Español",
        }
    }

    /// Placeholder rule text for user-authored cards without one.
    pub fn custom_rule_placeholder(self) -> &'static str {
        match self {
            Self::French => "Carte personnalisée",
            Self::Spanish => "Tarjeta personalizada",
        }
    }

    /// Parse from the short key.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "fr" => Some(Self::French),
            "es" => Some(Self::Spanish),
            _ => None,
        }
    }
}

/// One example sentence pair attached to a grammar rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Example {
    pub english: String,
    pub target: String,
}

/// A grammar construct with a bilingual description and example pairs.
///
/// Read-only once normalized from the raw dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrammarRule {
    pub id: String,
    pub level: String,
    pub category: String,
    pub english: String,
    pub target: String,
    pub examples: Vec<Example>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// One studyable sentence pair, either generated from a rule's example or
/// authored by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flashcard {
    pub id: String,
    pub rule_id: String,
    pub rule_english: String,
    pub rule_target: String,
    pub level: String,
    pub category: String,
    pub english: String,
    pub target: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Which language is the prompt and which is the expected answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    EnglishToTarget,
    TargetToEnglish,
}

/// A multiple-choice quiz question derived from one flashcard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    /// Full prompt shown to the user, e.g. `Translate to Français: "..."`.
    pub prompt: String,
    /// The bare source-language text being asked about.
    pub question_text: String,
    pub options: Vec<String>,
    pub correct_index: usize,
    pub flashcard_id: String,
    pub direction: Direction,
}

/// Which side of the pair a match card shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LanguageTag {
    English,
    Target,
}

/// One face-down/face-up card on the memory-match board.
///
/// Every flashcard on the board contributes exactly two cards, one per
/// [`LanguageTag`], sharing `flashcard_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchCard {
    pub id: String,
    pub text: String,
    pub language: LanguageTag,
    pub flashcard_id: String,
    pub is_flipped: bool,
    pub is_matched: bool,
}

/// Curated vocabulary entry for the translation lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabEntry {
    pub english: String,
    pub target: String,
    pub category: String,
}

impl VocabEntry {
    pub fn new(english: &str, target: &str, category: &str) -> Self {
        Self {
            english: english.to_string(),
            target: target.to_string(),
            category: category.to_string(),
        }
    }
}
