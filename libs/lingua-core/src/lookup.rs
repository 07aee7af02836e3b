//! Exact-match bilingual dictionary lookup.

use crate::types::{Direction, Flashcard, VocabEntry};

/// Translate `query` by exact match, case-insensitive and trimmed.
///
/// The curated vocabulary table is searched first, then the full combined
/// flashcard pool. `None` means not found; there is no fuzzy or partial
/// matching.
pub fn translate(
    query: &str,
    direction: Direction,
    vocab: &[VocabEntry],
    pool: &[Flashcard],
) -> Option<String> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }

    let vocab_hit = vocab.iter().find_map(|entry| {
        lookup_pair(&needle, direction, &entry.english, &entry.target)
    });
    if vocab_hit.is_some() {
        return vocab_hit;
    }

    pool.iter()
        .find_map(|card| lookup_pair(&needle, direction, &card.english, &card.target))
}

fn lookup_pair(
    needle: &str,
    direction: Direction,
    english: &str,
    target: &str,
) -> Option<String> {
    let (source, answer) = match direction {
        Direction::EnglishToTarget => (english, target),
        Direction::TargetToEnglish => (target, english),
    };
    if source.trim().to_lowercase() == needle {
        Some(answer.to_string())
    } else {
        None
    }
}
