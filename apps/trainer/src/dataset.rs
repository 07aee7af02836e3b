//! Embedded bilingual datasets and curated vocabulary tables.
//!
//! One dataset family per target language, one JSON file per CEFR level.
//! Files are decoded into raw records and normalized by the core, so a
//! malformed record fails loading with a reportable error instead of
//! producing broken flashcards.

use lingua_core::normalize::RawRule;
use lingua_core::{normalize, GrammarRule, NormalizeError, TargetLanguage, VocabEntry};
use thiserror::Error;

const FR_A1: &str = include_str!("../data/fr_a1.json");
const FR_A2: &str = include_str!("../data/fr_a2.json");
const FR_B1: &str = include_str!("../data/fr_b1.json");
const FR_B2: &str = include_str!("../data/fr_b2.json");
const ES_A1: &str = include_str!("../data/es_a1.json");
const ES_A2: &str = include_str!("../data/es_a2.json");

/// Errors from loading an embedded dataset.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to decode dataset `{name}`: {source}")]
    Decode {
        name: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid record in {language} dataset: {source}")]
    Invalid {
        language: &'static str,
        #[source]
        source: NormalizeError,
    },
}

fn dataset_files(language: TargetLanguage) -> &'static [(&'static str, &'static str)] {
    match language {
        TargetLanguage::French => &[
            ("fr_a1.json", FR_A1),
            ("fr_a2.json", FR_A2),
            ("fr_b1.json", FR_B1),
            ("fr_b2.json", FR_B2),
        ],
        TargetLanguage::Spanish => &[("es_a1.json", ES_A1), ("es_a2.json", ES_A2)],
    }
}

/// Load and normalize all grammar rules for a language, every level.
pub fn load_rules(language: TargetLanguage) -> Result<Vec<GrammarRule>, DatasetError> {
    let mut raw: Vec<RawRule> = Vec::new();
    for &(name, content) in dataset_files(language) {
        let mut records: Vec<RawRule> = serde_json::from_str(content)
            .map_err(|source| DatasetError::Decode { name, source })?;
        raw.append(&mut records);
    }

    normalize(&raw, language).map_err(|source| DatasetError::Invalid {
        language: language.key(),
        source,
    })
}

/// Curated vocabulary table for the translation lookup.
pub fn vocab(language: TargetLanguage) -> Vec<VocabEntry> {
    match language {
        TargetLanguage::French => vec![
            VocabEntry::new("Hello", "Bonjour", "Greetings"),
            VocabEntry::new("Goodbye", "Au revoir", "Greetings"),
            VocabEntry::new("Please", "S'il vous plaît", "Politeness"),
            VocabEntry::new("Thank you", "Merci", "Politeness"),
            VocabEntry::new("Water", "Eau", "Food & Drink"),
            VocabEntry::new("Bread", "Pain", "Food & Drink"),
            VocabEntry::new("House", "Maison", "Places"),
            VocabEntry::new("School", "École", "Places"),
            VocabEntry::new("Cat", "Chat", "Animals"),
            VocabEntry::new("Dog", "Chien", "Animals"),
            VocabEntry::new("Book", "Livre", "Objects"),
            VocabEntry::new("Car", "Voiture", "Transport"),
        ],
        TargetLanguage::Spanish => vec![
            VocabEntry::new("Hello", "Hola", "Greetings"),
            VocabEntry::new("Goodbye", "Adiós", "Greetings"),
            VocabEntry::new("Please", "Por favor", "Politeness"),
            VocabEntry::new("Thank you", "Gracias", "Politeness"),
            VocabEntry::new("Water", "Agua", "Food & Drink"),
            VocabEntry::new("Bread", "Pan", "Food & Drink"),
            VocabEntry::new("House", "Casa", "Places"),
            VocabEntry::new("School", "Escuela", "Places"),
            VocabEntry::new("Cat", "Gato", "Animals"),
            VocabEntry::new("Dog", "Perro", "Animals"),
            VocabEntry::new("Book", "Libro", "Objects"),
            VocabEntry::new("Car", "Coche", "Transport"),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn french_dataset_loads_all_levels() {
        let rules = load_rules(TargetLanguage::French).unwrap();
        assert!(!rules.is_empty());

        let mut levels: Vec<&str> = rules.iter().map(|r| r.level.as_str()).collect();
        levels.sort_unstable();
        levels.dedup();
        assert_eq!(levels, vec!["A1", "A2", "B1", "B2"]);

        // Target side carries the French text.
        assert!(rules.iter().all(|r| !r.target.is_empty()));
    }

    #[test]
    fn spanish_dataset_loads() {
        let rules = load_rules(TargetLanguage::Spanish).unwrap();
        assert!(!rules.is_empty());
        assert!(rules.iter().all(|r| r.id.starts_with("es_")));
    }

    #[test]
    fn rule_ids_are_unique_per_language() {
        for language in [TargetLanguage::French, TargetLanguage::Spanish] {
            let rules = load_rules(language).unwrap();
            let mut ids: Vec<&str> = rules.iter().map(|r| r.id.as_str()).collect();
            let total = ids.len();
            ids.sort_unstable();
            ids.dedup();
            assert_eq!(ids.len(), total);
        }
    }

    #[test]
    fn vocab_tables_have_both_sides() {
        for language in [TargetLanguage::French, TargetLanguage::Spanish] {
            let table = vocab(language);
            assert_eq!(table.len(), 12);
            assert!(table
                .iter()
                .all(|v| !v.english.is_empty() && !v.target.is_empty()));
        }
    }
}
