//! Flashcard derivation: expanding grammar rules into cards and building
//! user-authored custom cards.

use crate::error::CardError;
use crate::types::{Flashcard, GrammarRule, TargetLanguage};
use chrono::{DateTime, Utc};
use rand::Rng;

/// Expand a rule's example pairs into flashcards.
///
/// Example `i` yields the card `{rule.id}_{i}`; output order matches example
/// order. A rule without examples yields no cards.
pub fn flashcards_from_rule(rule: &GrammarRule) -> Vec<Flashcard> {
    rule.examples
        .iter()
        .enumerate()
        .map(|(i, example)| Flashcard {
            id: format!("{}_{}", rule.id, i),
            rule_id: rule.id.clone(),
            rule_english: rule.english.clone(),
            rule_target: rule.target.clone(),
            level: rule.level.clone(),
            category: rule.category.clone(),
            english: example.english.clone(),
            target: example.target.clone(),
            tags: rule.tags.clone(),
        })
        .collect()
}

/// User input for a new custom flashcard, prior to validation.
#[derive(Debug, Clone, Default)]
pub struct NewFlashcard {
    pub english: String,
    pub target: String,
    pub level: String,
    pub category: String,
    pub rule_english: Option<String>,
    pub rule_target: Option<String>,
    pub tags: Vec<String>,
}

impl NewFlashcard {
    fn validate(&self) -> Result<(), CardError> {
        let required: [(&'static str, &str); 4] = [
            ("english", &self.english),
            ("target", &self.target),
            ("level", &self.level),
            ("category", &self.category),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(CardError::MissingField { field });
            }
        }
        Ok(())
    }
}

/// Build a custom flashcard with id `custom_{millis}_{random}`.
///
/// Omitted rule texts fall back to a language-appropriate placeholder.
pub fn custom_flashcard<R: Rng + ?Sized>(
    input: NewFlashcard,
    language: TargetLanguage,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Result<Flashcard, CardError> {
    input.validate()?;

    let rule_english = input
        .rule_english
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "Custom flashcard".to_string());
    let rule_target = input
        .rule_target
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| language.custom_rule_placeholder().to_string());

    Ok(Flashcard {
        id: format!(
            "custom_{}_{}",
            now.timestamp_millis(),
            random_suffix(rng)
        ),
        rule_id: "custom".to_string(),
        rule_english,
        rule_target,
        level: input.level.trim().to_string(),
        category: input.category.trim().to_string(),
        english: input.english.trim().to_string(),
        target: input.target.trim().to_string(),
        tags: input.tags,
    })
}

/// Parse comma-separated free text into trimmed, non-empty tags.
pub fn parse_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

const SUFFIX_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
const SUFFIX_LEN: usize = 9;

fn random_suffix<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..SUFFIX_LEN)
        .map(|_| SUFFIX_ALPHABET[rng.random_range(0..SUFFIX_ALPHABET.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Example;
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rule_with_examples(n: usize) -> GrammarRule {
        GrammarRule {
            id: "a1_verbs".to_string(),
            level: "A1".to_string(),
            category: "Verbs".to_string(),
            english: "Present tense".to_string(),
            target: "Le présent".to_string(),
            examples: (0..n)
                .map(|i| Example {
                    english: format!("english {i}"),
                    target: format!("target {i}"),
                })
                .collect(),
            tags: vec!["present".to_string()],
        }
    }

    #[test]
    fn one_card_per_example_in_order() {
        let rule = rule_with_examples(3);
        let cards = flashcards_from_rule(&rule);

        assert_eq!(cards.len(), 3);
        for (i, card) in cards.iter().enumerate() {
            assert_eq!(card.id, format!("a1_verbs_{i}"));
            assert_eq!(card.english, format!("english {i}"));
            assert_eq!(card.target, format!("target {i}"));
            assert_eq!(card.level, "A1");
            assert_eq!(card.category, "Verbs");
            assert_eq!(card.rule_english, "Present tense");
            assert_eq!(card.tags, rule.tags);
        }
    }

    #[test]
    fn no_examples_yields_no_cards() {
        let cards = flashcards_from_rule(&rule_with_examples(0));
        assert!(cards.is_empty());
    }

    #[test]
    fn custom_card_gets_prefixed_id_and_defaults() {
        let mut rng = StdRng::seed_from_u64(7);
        let input = NewFlashcard {
            english: " Cat ".to_string(),
            target: " Chat ".to_string(),
            level: "A1".to_string(),
            category: "Animals".to_string(),
            ..Default::default()
        };

        let card =
            custom_flashcard(input, TargetLanguage::French, Utc::now(), &mut rng).unwrap();

        assert!(card.id.starts_with("custom_"));
        assert_eq!(card.rule_id, "custom");
        assert_eq!(card.english, "Cat");
        assert_eq!(card.target, "Chat");
        assert_eq!(card.rule_english, "Custom flashcard");
        assert_eq!(card.rule_target, "Carte personnalisée");
    }

    #[test]
    fn custom_card_requires_both_texts() {
        let mut rng = StdRng::seed_from_u64(7);
        let input = NewFlashcard {
            english: "Cat".to_string(),
            target: "   ".to_string(),
            level: "A1".to_string(),
            category: "Animals".to_string(),
            ..Default::default()
        };

        let err = custom_flashcard(input, TargetLanguage::French, Utc::now(), &mut rng)
            .unwrap_err();
        assert!(matches!(err, CardError::MissingField { field: "target" }));
    }

    #[test]
    fn custom_ids_differ_across_calls() {
        let mut rng = StdRng::seed_from_u64(7);
        let input = NewFlashcard {
            english: "Cat".to_string(),
            target: "Chat".to_string(),
            level: "A1".to_string(),
            category: "Animals".to_string(),
            ..Default::default()
        };
        let now = Utc::now();

        let a = custom_flashcard(input.clone(), TargetLanguage::French, now, &mut rng)
            .unwrap();
        let b = custom_flashcard(input, TargetLanguage::French, now, &mut rng).unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn parses_comma_separated_tags() {
        assert_eq!(
            parse_tags(" present , tense ,, verb "),
            vec!["present".to_string(), "tense".to_string(), "verb".to_string()]
        );
        assert!(parse_tags("   ").is_empty());
        assert!(parse_tags("").is_empty());
    }
}
