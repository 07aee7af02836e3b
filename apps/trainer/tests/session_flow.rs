//! End-to-end session flows over the real datasets and a file-backed store.

use lingua_core::matching::ClickOutcome;
use lingua_core::{parse_tags, Direction, NewFlashcard, TargetLanguage};
use lingua_trainer::session::Session;
use lingua_trainer::store::{FlashcardStore, JsonFileStore, StoreError};
use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tempfile::TempDir;

fn session_in(dir: &TempDir, seed: u64) -> Session {
    Session::with_rng(
        TargetLanguage::French,
        Box::new(JsonFileStore::new(dir.path())),
        StdRng::seed_from_u64(seed),
    )
    .unwrap()
}

fn new_card(english: &str, target: &str) -> NewFlashcard {
    NewFlashcard {
        english: english.to_string(),
        target: target.to_string(),
        level: "A1".to_string(),
        category: "Animals".to_string(),
        rule_english: None,
        rule_target: None,
        tags: parse_tags("animal, custom"),
    }
}

#[test]
fn custom_flashcard_round_trip() {
    let dir = TempDir::new().unwrap();
    let mut session = session_in(&dir, 1);

    let outcome = session.add_flashcard(new_card("Cat2", "Chat2")).unwrap();
    assert!(outcome.persist_error.is_none());
    let card_id = outcome.card.id.clone();

    // Appears exactly once in the combined pool.
    let hits = session
        .combined_cards()
        .iter()
        .filter(|c| c.id == card_id)
        .count();
    assert_eq!(hits, 1);

    // Selectable under its level/category filter.
    session.set_level(Some("A1".to_string()));
    session.set_category(Some("Animals".to_string()));
    assert!(session.filtered_cards().iter().any(|c| c.id == card_id));

    // Survives a fresh session over the same store.
    let reloaded = session_in(&dir, 2);
    let card = reloaded
        .combined_cards()
        .iter()
        .find(|c| c.id == card_id)
        .expect("custom card persisted");
    assert_eq!(card.english, "Cat2");
    assert_eq!(card.target, "Chat2");
    assert_eq!(card.tags, vec!["animal".to_string(), "custom".to_string()]);
}

#[test]
fn custom_card_feeds_lookup() {
    let dir = TempDir::new().unwrap();
    let mut session = session_in(&dir, 3);

    session.add_flashcard(new_card("Hedgehog", "Hérisson")).unwrap();
    assert_eq!(
        session.translate("hedgehog", Direction::EnglishToTarget),
        Some("Hérisson".to_string())
    );
    assert_eq!(
        session.translate("hérisson", Direction::TargetToEnglish),
        Some("Hedgehog".to_string())
    );
    assert_eq!(session.translate("zzz", Direction::EnglishToTarget), None);
}

#[test]
fn vocab_table_answers_before_flashcards() {
    let dir = TempDir::new().unwrap();
    let session = session_in(&dir, 4);

    assert_eq!(
        session.translate("Hello", Direction::EnglishToTarget),
        Some("Bonjour".to_string())
    );
    assert_eq!(
        session.translate("merci", Direction::TargetToEnglish),
        Some("Thank you".to_string())
    );
}

#[test]
fn quiz_runs_to_completion_over_dataset() {
    let dir = TempDir::new().unwrap();
    let mut session = session_in(&dir, 5);
    session.start_quiz();

    let quiz = session.quiz_mut().unwrap();
    assert_eq!(quiz.questions().len(), 10);

    let correct: Vec<usize> = quiz.questions().iter().map(|q| q.correct_index).collect();
    for (i, &answer) in correct.iter().enumerate() {
        assert!(quiz.answer(answer));
        if i + 1 < correct.len() {
            assert!(quiz.next());
        }
    }
    assert_eq!(quiz.finish(), Some(10));
}

#[test]
fn narrow_filter_falls_back_to_full_pool() {
    let dir = TempDir::new().unwrap();
    let mut session = session_in(&dir, 6);

    // Filter that matches nothing: quiz and board still draw from the
    // combined set.
    session.set_level(Some("C2".to_string()));
    assert!(session.filtered_cards().is_empty());

    session.start_quiz();
    assert!(!session.quiz().unwrap().is_empty());

    session.start_match();
    assert_eq!(session.board().unwrap().cards().len(), 12);
}

#[test]
fn match_game_plays_through() {
    let dir = TempDir::new().unwrap();
    let mut session = session_in(&dir, 7);
    session.start_match();

    while !session.board().unwrap().is_complete() {
        let board = session.board().unwrap();
        let flashcard_id = board
            .cards()
            .iter()
            .find(|c| !c.is_matched)
            .map(|c| c.flashcard_id.clone())
            .unwrap();
        let indices: Vec<usize> = board
            .cards()
            .iter()
            .enumerate()
            .filter(|(_, c)| c.flashcard_id == flashcard_id)
            .map(|(i, _)| i)
            .collect();

        session.click_card(indices[0]);
        match session.click_card(indices[1]) {
            ClickOutcome::Pending(check) => {
                assert!(check.is_match());
                assert!(session.resolve_match(check));
            }
            other => panic!("expected pending check, got {other:?}"),
        }
    }

    let board = session.board().unwrap();
    assert_eq!(board.matched_pairs(), board.total_pairs());
    assert_eq!(board.score(), board.total_pairs());
}

struct FailingStore;

impl FlashcardStore for FailingStore {
    fn load(&self, _language: TargetLanguage) -> Result<Vec<lingua_core::Flashcard>, StoreError> {
        Ok(Vec::new())
    }

    fn save(
        &self,
        _language: TargetLanguage,
        _cards: &[lingua_core::Flashcard],
    ) -> Result<(), StoreError> {
        Err(StoreError::Io(std::io::Error::other("disk full")))
    }
}

#[test]
fn failed_save_keeps_card_in_memory() {
    let mut session = Session::with_rng(
        TargetLanguage::French,
        Box::new(FailingStore),
        StdRng::seed_from_u64(8),
    )
    .unwrap();

    let outcome = session.add_flashcard(new_card("Cat2", "Chat2")).unwrap();
    assert!(outcome.persist_error.is_some());

    // In-memory state stays authoritative.
    let card_id = outcome.card.id;
    assert!(session.combined_cards().iter().any(|c| c.id == card_id));
}

#[test]
fn invalid_add_is_rejected() {
    let dir = TempDir::new().unwrap();
    let mut session = session_in(&dir, 9);

    let err = session.add_flashcard(new_card("", "Chat2")).unwrap_err();
    assert_eq!(
        err.to_string(),
        "flashcard is missing required field `english`"
    );
    assert!(session.combined_cards().iter().all(|c| !c.english.is_empty()));
}
