//! Session controller: the single owner of all mutable study state.
//!
//! The display layer calls in with user actions and reads view-ready state
//! back out. Generated flashcards are recomputed from the rule set, custom
//! flashcards go through the persistence adapter, and the quiz and match
//! board are rebuilt on demand.

use chrono::Utc;
use lingua_core::{
    custom_flashcard, distinct_categories, distinct_levels, filter_cards, flashcards_from_rule,
    matching::{ClickOutcome, MatchGame, PendingCheck},
    quiz, translate, CardError, Direction, Flashcard, GrammarRule, NewFlashcard, QuizQuestion,
    TargetLanguage, VocabEntry, DEFAULT_PAIR_COUNT, DEFAULT_QUESTION_COUNT,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use thiserror::Error;

use crate::dataset::{self, DatasetError};
use crate::store::{FlashcardStore, StoreError};

/// Errors surfaced by session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Card(#[from] CardError),
}

/// Result of adding a custom flashcard.
///
/// A persistence failure does not abort the add: the card stays in memory
/// and the failure is returned as a warning for the display layer.
#[derive(Debug)]
pub struct AddOutcome {
    pub card: Flashcard,
    pub persist_error: Option<StoreError>,
}

/// State of one quiz run.
#[derive(Debug)]
pub struct QuizState {
    questions: Vec<QuizQuestion>,
    answers: Vec<Option<usize>>,
    index: usize,
    finished: bool,
}

impl QuizState {
    fn new(questions: Vec<QuizQuestion>) -> Self {
        let answers = vec![None; questions.len()];
        Self {
            questions,
            answers,
            index: 0,
            finished: false,
        }
    }

    pub fn questions(&self) -> &[QuizQuestion] {
        &self.questions
    }

    pub fn answers(&self) -> &[Option<usize>] {
        &self.answers
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn current(&self) -> Option<&QuizQuestion> {
        self.questions.get(self.index)
    }

    /// Record an answer for the current question. Out-of-range choices are
    /// ignored.
    pub fn answer(&mut self, choice: usize) -> bool {
        let Some(question) = self.questions.get(self.index) else {
            return false;
        };
        if choice >= question.options.len() {
            return false;
        }
        self.answers[self.index] = Some(choice);
        true
    }

    fn current_answered(&self) -> bool {
        self.answers.get(self.index).copied().flatten().is_some()
    }

    /// Advance past the current question; refused while it is unanswered.
    pub fn next(&mut self) -> bool {
        if !self.current_answered() || self.index + 1 >= self.questions.len() {
            return false;
        }
        self.index += 1;
        true
    }

    pub fn prev(&mut self) -> bool {
        if self.index == 0 {
            return false;
        }
        self.index -= 1;
        true
    }

    /// Finish the quiz and return the score. Refused before the last
    /// question is answered.
    pub fn finish(&mut self) -> Option<usize> {
        if self.index + 1 != self.questions.len() || !self.current_answered() {
            return None;
        }
        self.finished = true;
        Some(self.score())
    }

    pub fn score(&self) -> usize {
        quiz::score(&self.questions, &self.answers)
    }
}

/// Top-level session controller.
pub struct Session {
    language: TargetLanguage,
    rules: Vec<GrammarRule>,
    custom: Vec<Flashcard>,
    combined: Vec<Flashcard>,
    vocab: Vec<VocabEntry>,
    selected_level: Option<String>,
    selected_category: Option<String>,
    browse_index: usize,
    vocab_index: usize,
    flipped: bool,
    quiz: Option<QuizState>,
    board: Option<MatchGame>,
    board_generation: u64,
    store: Box<dyn FlashcardStore>,
    rng: StdRng,
}

impl Session {
    pub fn new(
        language: TargetLanguage,
        store: Box<dyn FlashcardStore>,
    ) -> Result<Self, SessionError> {
        Self::with_rng(language, store, StdRng::from_os_rng())
    }

    /// Construct with an explicit RNG so randomized behavior is reproducible
    /// under test.
    pub fn with_rng(
        language: TargetLanguage,
        store: Box<dyn FlashcardStore>,
        rng: StdRng,
    ) -> Result<Self, SessionError> {
        let mut session = Self {
            language,
            rules: Vec::new(),
            custom: Vec::new(),
            combined: Vec::new(),
            vocab: Vec::new(),
            selected_level: None,
            selected_category: None,
            browse_index: 0,
            vocab_index: 0,
            flipped: false,
            quiz: None,
            board: None,
            board_generation: 0,
            store,
            rng,
        };
        session.load_language(language)?;
        Ok(session)
    }

    fn load_language(&mut self, language: TargetLanguage) -> Result<(), SessionError> {
        // Load everything before touching self so a failure leaves the
        // current language fully intact.
        let rules = dataset::load_rules(language)?;
        let vocab = dataset::vocab(language);
        let custom = self.store.load(language)?;

        self.language = language;
        self.rules = rules;
        self.vocab = vocab;
        self.custom = custom;
        self.rebuild_combined();

        self.selected_level = None;
        self.selected_category = None;
        self.browse_index = 0;
        self.vocab_index = 0;
        self.flipped = false;
        self.quiz = None;
        self.board = None;

        tracing::info!(
            language = language.key(),
            rules = self.rules.len(),
            custom = self.custom.len(),
            "session loaded"
        );
        Ok(())
    }

    fn rebuild_combined(&mut self) {
        self.combined = self
            .rules
            .iter()
            .flat_map(flashcards_from_rule)
            .chain(self.custom.iter().cloned())
            .collect();
    }

    pub fn language(&self) -> TargetLanguage {
        self.language
    }

    /// Switch the target language: reloads rules and custom cards, resets
    /// filters and all in-progress activities.
    pub fn set_language(&mut self, language: TargetLanguage) -> Result<(), SessionError> {
        self.load_language(language)
    }

    pub fn combined_cards(&self) -> &[Flashcard] {
        &self.combined
    }

    pub fn filtered_cards(&self) -> Vec<Flashcard> {
        filter_cards(
            &self.combined,
            self.selected_level.as_deref(),
            self.selected_category.as_deref(),
        )
    }

    /// Selectable levels: the distinct values observed across the combined
    /// set (the wildcard is implicit).
    pub fn levels(&self) -> Vec<String> {
        distinct_levels(&self.combined)
    }

    pub fn categories(&self) -> Vec<String> {
        distinct_categories(&self.combined)
    }

    pub fn selected_level(&self) -> Option<&str> {
        self.selected_level.as_deref()
    }

    pub fn selected_category(&self) -> Option<&str> {
        self.selected_category.as_deref()
    }

    /// `None` selects the wildcard. Resets browsing and discards any
    /// in-progress quiz or board.
    pub fn set_level(&mut self, level: Option<String>) {
        self.selected_level = level;
        self.on_filter_changed();
    }

    pub fn set_category(&mut self, category: Option<String>) {
        self.selected_category = category;
        self.on_filter_changed();
    }

    fn on_filter_changed(&mut self) {
        self.browse_index = 0;
        self.flipped = false;
        self.quiz = None;
        self.board = None;
    }

    /// Card at the current browsing position within the filtered set.
    pub fn current_card(&self) -> Option<Flashcard> {
        let filtered = self.filtered_cards();
        filtered.get(self.browse_index).cloned()
    }

    /// (position, total) within the filtered set.
    pub fn browse_position(&self) -> (usize, usize) {
        (self.browse_index, self.filtered_cards().len())
    }

    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    pub fn flip(&mut self) {
        self.flipped = !self.flipped;
    }

    pub fn next_card(&mut self) {
        let len = self.filtered_cards().len();
        if len > 0 {
            self.browse_index = (self.browse_index + 1) % len;
        }
        self.flipped = false;
    }

    pub fn prev_card(&mut self) {
        let len = self.filtered_cards().len();
        if len > 0 {
            self.browse_index = (self.browse_index + len - 1) % len;
        }
        self.flipped = false;
    }

    pub fn vocab_entries(&self) -> &[VocabEntry] {
        &self.vocab
    }

    /// Entry at the current vocabulary browsing position.
    pub fn current_vocab(&self) -> Option<&VocabEntry> {
        self.vocab.get(self.vocab_index)
    }

    /// (position, total) within the vocabulary table.
    pub fn vocab_position(&self) -> (usize, usize) {
        (self.vocab_index, self.vocab.len())
    }

    pub fn next_vocab(&mut self) {
        if !self.vocab.is_empty() {
            self.vocab_index = (self.vocab_index + 1) % self.vocab.len();
        }
        self.flipped = false;
    }

    pub fn prev_vocab(&mut self) {
        let len = self.vocab.len();
        if len > 0 {
            self.vocab_index = (self.vocab_index + len - 1) % len;
        }
        self.flipped = false;
    }

    /// Validate, append, and persist a custom flashcard.
    ///
    /// On a persistence failure the in-memory state stays authoritative and
    /// the error is returned in the outcome instead of failing the add.
    pub fn add_flashcard(&mut self, input: NewFlashcard) -> Result<AddOutcome, CardError> {
        let card = custom_flashcard(input, self.language, Utc::now(), &mut self.rng)?;
        self.custom.push(card.clone());
        self.rebuild_combined();

        // The active pool changed; ongoing quiz/board no longer reflect it.
        self.quiz = None;
        self.board = None;
        if self.browse_index >= self.filtered_cards().len() {
            self.browse_index = 0;
        }

        let persist_error = match self.store.save(self.language, &self.custom) {
            Ok(()) => None,
            Err(err) => {
                tracing::warn!(error = %err, "failed to persist custom flashcards");
                Some(err)
            }
        };

        Ok(AddOutcome { card, persist_error })
    }

    /// Quiz/match pool: the filtered set, or the full combined set when the
    /// filter matches nothing.
    fn active_pool(&self) -> Vec<Flashcard> {
        let filtered = self.filtered_cards();
        if filtered.is_empty() {
            self.combined.clone()
        } else {
            filtered
        }
    }

    /// Build a fresh quiz, discarding any previous quiz state.
    pub fn start_quiz(&mut self) {
        let pool = self.active_pool();
        let questions = quiz::synthesize(
            &pool,
            DEFAULT_QUESTION_COUNT,
            self.language,
            &mut self.rng,
        );
        tracing::debug!(questions = questions.len(), "quiz generated");
        self.quiz = Some(QuizState::new(questions));
    }

    pub fn quiz(&self) -> Option<&QuizState> {
        self.quiz.as_ref()
    }

    pub fn quiz_mut(&mut self) -> Option<&mut QuizState> {
        self.quiz.as_mut()
    }

    /// Discard quiz state on tab exit.
    pub fn leave_quiz(&mut self) {
        self.quiz = None;
    }

    /// Build a fresh match board, replacing any in-progress one. A pending
    /// check against the old board becomes stale and resolves to a no-op.
    pub fn start_match(&mut self) {
        let pool = self.active_pool();
        self.board_generation += 1;
        let game = MatchGame::new(
            &pool,
            DEFAULT_PAIR_COUNT,
            self.board_generation,
            &mut self.rng,
        );
        tracing::debug!(pairs = game.total_pairs(), "match board generated");
        self.board = Some(game);
    }

    pub fn board(&self) -> Option<&MatchGame> {
        self.board.as_ref()
    }

    /// Discard the board on tab exit.
    pub fn leave_match(&mut self) {
        self.board = None;
    }

    pub fn click_card(&mut self, index: usize) -> ClickOutcome {
        match self.board.as_mut() {
            Some(board) => board.click(index),
            None => ClickOutcome::Ignored,
        }
    }

    /// Apply a delayed match check; stale checks are dropped.
    pub fn resolve_match(&mut self, check: PendingCheck) -> bool {
        match self.board.as_mut() {
            Some(board) => board.resolve(check),
            None => false,
        }
    }

    /// Exact-match lookup over the vocabulary table and the combined pool.
    pub fn translate(&self, query: &str, direction: Direction) -> Option<String> {
        translate(query, direction, &self.vocab, &self.combined)
    }
}
