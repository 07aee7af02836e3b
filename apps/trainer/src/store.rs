//! Persistence adapter for user-authored flashcards.
//!
//! Custom cards are kept in one JSON file per target language. An old,
//! unkeyed store from before language support is migrated to the French slot
//! on first load and then removed.

use lingua_core::{Flashcard, TargetLanguage};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from loading or saving custom flashcards.
///
/// A missing store is not an error; `load` returns an empty list for it so
/// callers can tell "no data" apart from a real failure.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("stored flashcards at {path} are not valid JSON: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode flashcards: {0}")]
    Encode(serde_json::Error),
}

/// Key-value persistence for custom flashcards, keyed by target language.
pub trait FlashcardStore {
    fn load(&self, language: TargetLanguage) -> Result<Vec<Flashcard>, StoreError>;
    fn save(&self, language: TargetLanguage, cards: &[Flashcard]) -> Result<(), StoreError>;
}

const LEGACY_FILE: &str = "custom_flashcards.json";

/// File-backed store: `custom_flashcards_{key}.json` under one directory.
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn slot_path(&self, language: TargetLanguage) -> PathBuf {
        self.dir
            .join(format!("custom_flashcards_{}.json", language.key()))
    }

    fn read_slot(path: &Path) -> Result<Vec<Flashcard>, StoreError> {
        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|source| StoreError::Corrupt {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Move a legacy unkeyed store into the French slot, reshaping the old
    /// field names, then clear the legacy file. Returns `None` when there is
    /// no legacy store.
    fn migrate_legacy(&self) -> Result<Option<Vec<Flashcard>>, StoreError> {
        let legacy_path = self.dir.join(LEGACY_FILE);
        if !legacy_path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&legacy_path)?;
        let legacy: Vec<LegacyFlashcard> =
            serde_json::from_str(&content).map_err(|source| StoreError::Corrupt {
                path: legacy_path.clone(),
                source,
            })?;

        let cards: Vec<Flashcard> = legacy
            .into_iter()
            .map(LegacyFlashcard::into_flashcard)
            .filter(|c| !c.english.is_empty() && !c.target.is_empty())
            .collect();

        tracing::info!(count = cards.len(), "migrating legacy flashcard store");
        self.save(TargetLanguage::French, &cards)?;
        fs::remove_file(&legacy_path)?;
        Ok(Some(cards))
    }
}

impl FlashcardStore for JsonFileStore {
    fn load(&self, language: TargetLanguage) -> Result<Vec<Flashcard>, StoreError> {
        let path = self.slot_path(language);
        if path.exists() {
            return Self::read_slot(&path);
        }
        if language == TargetLanguage::French {
            if let Some(cards) = self.migrate_legacy()? {
                return Ok(cards);
            }
        }
        Ok(Vec::new())
    }

    fn save(&self, language: TargetLanguage, cards: &[Flashcard]) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir)?;
        let content = serde_json::to_string_pretty(cards).map_err(StoreError::Encode)?;
        fs::write(self.slot_path(language), content)?;
        Ok(())
    }
}

/// Record shape written by the pre-language-support app: camelCase keys and
/// French-specific field names, with later records already carrying the
/// canonical `target` fields.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegacyFlashcard {
    id: String,
    #[serde(default)]
    rule_id: Option<String>,
    #[serde(default)]
    rule_english: Option<String>,
    #[serde(default)]
    rule_french: Option<String>,
    #[serde(default)]
    rule_target: Option<String>,
    level: String,
    category: String,
    english: String,
    #[serde(default)]
    french: Option<String>,
    #[serde(default)]
    target: Option<String>,
    #[serde(default)]
    tags: Vec<String>,
}

impl LegacyFlashcard {
    fn into_flashcard(self) -> Flashcard {
        Flashcard {
            id: self.id,
            rule_id: self.rule_id.unwrap_or_else(|| "custom".to_string()),
            rule_english: self.rule_english.unwrap_or_default(),
            rule_target: self.rule_target.or(self.rule_french).unwrap_or_default(),
            level: self.level,
            category: self.category,
            english: self.english,
            target: self.target.or(self.french).unwrap_or_default(),
            tags: self.tags,
        }
    }
}
