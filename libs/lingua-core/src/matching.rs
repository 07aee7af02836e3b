//! Memory-match board construction and the two-card reveal state machine.
//!
//! Resolution delays are surfaced as data: a click that completes a pair
//! returns a [`PendingCheck`] carrying the verdict and the delay to wait
//! before applying it. Checks are stamped with the board generation, so a
//! check scheduled against a board that has since been replaced resolves to
//! a no-op instead of mutating the new board.

use crate::types::{Flashcard, LanguageTag, MatchCard};
use rand::seq::SliceRandom;
use rand::Rng;
use std::time::Duration;

/// Default number of pairs on a board.
pub const DEFAULT_PAIR_COUNT: usize = 6;

/// Delay before a confirmed match is marked.
pub const MATCH_CONFIRM_DELAY: Duration = Duration::from_millis(500);

/// Delay before a mismatched pair flips back face-down.
pub const MISMATCH_RESET_DELAY: Duration = Duration::from_millis(1000);

/// Outcome of clicking a board position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Click ignored: check in flight, card already face-up or matched, or
    /// index out of range.
    Ignored,
    /// First card of a pair flipped face-up.
    Flipped,
    /// Second card flipped; the board is now locked until this check is
    /// resolved.
    Pending(PendingCheck),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Verdict {
    Matched,
    Mismatched,
}

/// A match check awaiting resolution after its display delay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingCheck {
    generation: u64,
    first: usize,
    second: usize,
    verdict: Verdict,
    delay: Duration,
}

impl PendingCheck {
    /// How long to wait before calling [`MatchGame::resolve`].
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Whether the two revealed cards form a pair.
    pub fn is_match(&self) -> bool {
        self.verdict == Verdict::Matched
    }
}

/// One memory-match session over a shuffled dual-card board.
#[derive(Debug, Clone)]
pub struct MatchGame {
    cards: Vec<MatchCard>,
    selected: Vec<usize>,
    total_pairs: usize,
    matched_pairs: usize,
    score: usize,
    checking: bool,
    generation: u64,
}

impl MatchGame {
    /// Build a board of `min(desired_pairs, pool.len() / 2)` pairs drawn at
    /// random from the pool. Each drawn flashcard contributes an English and
    /// a target card; the combined board is shuffled.
    pub fn new<R: Rng + ?Sized>(
        pool: &[Flashcard],
        desired_pairs: usize,
        generation: u64,
        rng: &mut R,
    ) -> Self {
        let total_pairs = desired_pairs.min(pool.len() / 2);

        let mut cards = Vec::with_capacity(total_pairs * 2);
        if total_pairs > 0 {
            let mut order: Vec<usize> = (0..pool.len()).collect();
            order.shuffle(rng);

            for &i in &order[..total_pairs] {
                let flashcard = &pool[i];
                cards.push(MatchCard {
                    id: format!("en_{}", flashcard.id),
                    text: flashcard.english.clone(),
                    language: LanguageTag::English,
                    flashcard_id: flashcard.id.clone(),
                    is_flipped: false,
                    is_matched: false,
                });
                cards.push(MatchCard {
                    id: format!("target_{}", flashcard.id),
                    text: flashcard.target.clone(),
                    language: LanguageTag::Target,
                    flashcard_id: flashcard.id.clone(),
                    is_flipped: false,
                    is_matched: false,
                });
            }
            cards.shuffle(rng);
        }

        Self {
            cards,
            selected: Vec::new(),
            total_pairs,
            matched_pairs: 0,
            score: 0,
            checking: false,
            generation,
        }
    }

    pub fn cards(&self) -> &[MatchCard] {
        &self.cards
    }

    pub fn total_pairs(&self) -> usize {
        self.total_pairs
    }

    pub fn matched_pairs(&self) -> usize {
        self.matched_pairs
    }

    pub fn score(&self) -> usize {
        self.score
    }

    /// Whether a check is in flight (clicks are ignored until resolved).
    pub fn is_checking(&self) -> bool {
        self.checking
    }

    /// All pairs found. An empty board is never complete.
    pub fn is_complete(&self) -> bool {
        self.total_pairs > 0 && self.matched_pairs == self.total_pairs
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Reveal the card at `index`.
    pub fn click(&mut self, index: usize) -> ClickOutcome {
        if self.checking || index >= self.cards.len() {
            return ClickOutcome::Ignored;
        }
        if self.cards[index].is_flipped || self.cards[index].is_matched {
            return ClickOutcome::Ignored;
        }

        self.cards[index].is_flipped = true;
        self.selected.push(index);

        if self.selected.len() < 2 {
            return ClickOutcome::Flipped;
        }

        self.checking = true;
        let (first, second) = (self.selected[0], self.selected[1]);
        let a = &self.cards[first];
        let b = &self.cards[second];
        let verdict = if a.flashcard_id == b.flashcard_id && a.language != b.language {
            Verdict::Matched
        } else {
            Verdict::Mismatched
        };

        ClickOutcome::Pending(PendingCheck {
            generation: self.generation,
            first,
            second,
            verdict,
            delay: match verdict {
                Verdict::Matched => MATCH_CONFIRM_DELAY,
                Verdict::Mismatched => MISMATCH_RESET_DELAY,
            },
        })
    }

    /// Apply a pending check after its delay.
    ///
    /// Returns `false` without touching the board when the check is stale:
    /// stamped with another board generation, or the board is no longer in
    /// the checking state.
    pub fn resolve(&mut self, check: PendingCheck) -> bool {
        if check.generation != self.generation || !self.checking {
            return false;
        }

        match check.verdict {
            Verdict::Matched => {
                self.cards[check.first].is_matched = true;
                self.cards[check.second].is_matched = true;
                self.matched_pairs += 1;
                self.score += 1;
            }
            Verdict::Mismatched => {
                self.cards[check.first].is_flipped = false;
                self.cards[check.second].is_flipped = false;
            }
        }

        self.selected.clear();
        self.checking = false;
        true
    }
}
