//! Normalization of heterogeneous raw dataset records.
//!
//! Dataset files spell the target-language fields differently per language
//! (`french` / `{en, fr}` vs `spanish` / `{en, es}`). Normalization picks the
//! dialect's fields once, so nothing downstream ever branches on field
//! presence.

use crate::error::{NormalizeError, Result};
use crate::types::{Example, GrammarRule, TargetLanguage};
use serde::Deserialize;
use std::collections::HashSet;

/// A grammar-rule record as it appears in a dataset file, before dialect
/// resolution. All fields optional so validation can report what is missing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRule {
    pub id: Option<String>,
    pub level: Option<String>,
    pub category: Option<String>,
    pub english: Option<String>,
    pub french: Option<String>,
    pub spanish: Option<String>,
    pub examples: Option<Vec<RawExample>>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// An example pair in dataset spelling.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawExample {
    pub en: Option<String>,
    pub fr: Option<String>,
    pub es: Option<String>,
}

/// Normalize raw records into canonical [`GrammarRule`]s.
///
/// Rejects records missing a required field rather than skipping them, and
/// rejects duplicate rule ids across the whole input.
pub fn normalize(raw: &[RawRule], language: TargetLanguage) -> Result<Vec<GrammarRule>> {
    let mut rules = Vec::with_capacity(raw.len());
    let mut seen_ids = HashSet::new();

    for (index, record) in raw.iter().enumerate() {
        let rule = normalize_rule(record, index, language)?;
        if !seen_ids.insert(rule.id.clone()) {
            return Err(NormalizeError::DuplicateId { id: rule.id });
        }
        rules.push(rule);
    }

    Ok(rules)
}

fn normalize_rule(
    record: &RawRule,
    index: usize,
    language: TargetLanguage,
) -> Result<GrammarRule> {
    let id = non_empty(record.id.as_deref())
        .ok_or(NormalizeError::MissingId { index })?
        .to_string();

    let level = required_field(&id, "level", record.level.as_deref())?;
    let category = required_field(&id, "category", record.category.as_deref())?;
    let english = required_field(&id, "english", record.english.as_deref())?;

    let raw_target = match language {
        TargetLanguage::French => record.french.as_deref(),
        TargetLanguage::Spanish => record.spanish.as_deref(),
    };
    let target = required_field(&id, target_field_name(language), raw_target)?;

    // A rule without an examples array is legal and simply yields no cards.
    let raw_examples = record.examples.as_deref().unwrap_or(&[]);
    let mut examples = Vec::with_capacity(raw_examples.len());
    for (i, raw_example) in raw_examples.iter().enumerate() {
        examples.push(normalize_example(&id, i, raw_example, language)?);
    }

    Ok(GrammarRule {
        id,
        level,
        category,
        english,
        target,
        examples,
        tags: record.tags.clone(),
    })
}

fn normalize_example(
    rule_id: &str,
    index: usize,
    raw: &RawExample,
    language: TargetLanguage,
) -> Result<Example> {
    let english = non_empty(raw.en.as_deref()).ok_or_else(|| NormalizeError::BadExample {
        rule_id: rule_id.to_string(),
        example: index,
        side: "en",
    })?;

    let raw_target = match language {
        TargetLanguage::French => raw.fr.as_deref(),
        TargetLanguage::Spanish => raw.es.as_deref(),
    };
    let target = non_empty(raw_target).ok_or_else(|| NormalizeError::BadExample {
        rule_id: rule_id.to_string(),
        example: index,
        side: target_example_side(language),
    })?;

    Ok(Example {
        english: english.to_string(),
        target: target.to_string(),
    })
}

fn target_field_name(language: TargetLanguage) -> &'static str {
    match language {
        TargetLanguage::French => "french",
        TargetLanguage::Spanish => "spanish",
    }
}

fn target_example_side(language: TargetLanguage) -> &'static str {
    match language {
        TargetLanguage::French => "fr",
        TargetLanguage::Spanish => "es",
    }
}

fn required_field(
    rule_id: &str,
    field: &'static str,
    value: Option<&str>,
) -> Result<String> {
    non_empty(value)
        .map(str::to_string)
        .ok_or_else(|| NormalizeError::MissingField {
            rule_id: rule_id.to_string(),
            field,
        })
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}
