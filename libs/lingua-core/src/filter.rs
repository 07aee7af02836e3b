//! Level/category filtering over the combined flashcard set.

use crate::types::Flashcard;
use std::collections::HashSet;

/// Keep cards matching both predicates. `None` is the wildcard.
///
/// Preserves input order; wildcard/wildcard is the identity.
pub fn filter_cards(
    cards: &[Flashcard],
    level: Option<&str>,
    category: Option<&str>,
) -> Vec<Flashcard> {
    cards
        .iter()
        .filter(|card| {
            let level_ok = level.map_or(true, |l| card.level == l);
            let category_ok = category.map_or(true, |c| card.category == c);
            level_ok && category_ok
        })
        .cloned()
        .collect()
}

/// Distinct levels observed across the combined set, first-seen order.
pub fn distinct_levels(cards: &[Flashcard]) -> Vec<String> {
    distinct(cards.iter().map(|c| c.level.as_str()))
}

/// Distinct categories observed across the combined set, first-seen order.
pub fn distinct_categories(cards: &[Flashcard]) -> Vec<String> {
    distinct(cards.iter().map(|c| c.category.as_str()))
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for value in values {
        if seen.insert(value) {
            out.push(value.to_string());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn card(id: &str, level: &str, category: &str) -> Flashcard {
        Flashcard {
            id: id.to_string(),
            rule_id: "r".to_string(),
            rule_english: String::new(),
            rule_target: String::new(),
            level: level.to_string(),
            category: category.to_string(),
            english: "e".to_string(),
            target: "t".to_string(),
            tags: Vec::new(),
        }
    }

    fn sample() -> Vec<Flashcard> {
        vec![
            card("1", "A1", "Verbs"),
            card("2", "A2", "Verbs"),
            card("3", "A1", "Nouns"),
            card("4", "B1", "Verbs"),
        ]
    }

    #[test]
    fn wildcard_is_identity() {
        let cards = sample();
        assert_eq!(filter_cards(&cards, None, None), cards);
    }

    #[test]
    fn filters_by_level() {
        let filtered = filter_cards(&sample(), Some("A1"), None);
        assert_eq!(filtered.len(), 2);
        assert!(filtered.iter().all(|c| c.level == "A1"));
        // Input order preserved.
        assert_eq!(filtered[0].id, "1");
        assert_eq!(filtered[1].id, "3");
    }

    #[test]
    fn filters_by_level_and_category() {
        let filtered = filter_cards(&sample(), Some("A1"), Some("Verbs"));
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "1");
    }

    #[test]
    fn unmatched_filter_yields_empty() {
        assert!(filter_cards(&sample(), Some("C2"), None).is_empty());
    }

    #[test]
    fn distinct_values_first_seen_order() {
        let cards = sample();
        assert_eq!(distinct_levels(&cards), vec!["A1", "A2", "B1"]);
        assert_eq!(distinct_categories(&cards), vec!["Verbs", "Nouns"]);
    }
}
