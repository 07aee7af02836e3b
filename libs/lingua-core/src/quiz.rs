//! Multiple-choice quiz synthesis and scoring.

use crate::types::{Direction, Flashcard, QuizQuestion, TargetLanguage};
use rand::seq::SliceRandom;
use rand::Rng;

/// Default number of questions per quiz.
pub const DEFAULT_QUESTION_COUNT: usize = 10;

/// Maximum number of wrong options per question.
const MAX_DISTRACTORS: usize = 3;

/// Build a shuffled quiz from the pool.
///
/// Draws `min(desired, pool.len())` distinct cards without replacement, picks
/// a translation direction per question, and fills wrong options from other
/// cards' answer-side texts. Option texts are deduplicated so no two options
/// render identically. An empty pool yields an empty quiz.
pub fn synthesize<R: Rng + ?Sized>(
    pool: &[Flashcard],
    desired: usize,
    language: TargetLanguage,
    rng: &mut R,
) -> Vec<QuizQuestion> {
    if pool.is_empty() {
        return Vec::new();
    }

    let count = desired.min(pool.len());
    let mut order: Vec<usize> = (0..pool.len()).collect();
    order.shuffle(rng);

    let mut questions: Vec<QuizQuestion> = order[..count]
        .iter()
        .map(|&i| build_question(pool, i, language, rng))
        .collect();

    questions.shuffle(rng);
    questions
}

fn build_question<R: Rng + ?Sized>(
    pool: &[Flashcard],
    index: usize,
    language: TargetLanguage,
    rng: &mut R,
) -> QuizQuestion {
    let card = &pool[index];
    let direction = if rng.random_bool(0.5) {
        Direction::EnglishToTarget
    } else {
        Direction::TargetToEnglish
    };

    let (question_text, correct) = match direction {
        Direction::EnglishToTarget => (card.english.clone(), card.target.clone()),
        Direction::TargetToEnglish => (card.target.clone(), card.english.clone()),
    };

    let prompt = match direction {
        Direction::EnglishToTarget => {
            format!("Translate to {}: \"{}\"", language.label(), question_text)
        }
        Direction::TargetToEnglish => {
            format!("Translate to English: \"{}\"", question_text)
        }
    };

    let mut others: Vec<usize> = (0..pool.len()).filter(|&i| i != index).collect();
    others.shuffle(rng);

    let mut options: Vec<String> = Vec::with_capacity(MAX_DISTRACTORS + 1);
    for &other in &others {
        if options.len() == MAX_DISTRACTORS {
            break;
        }
        let text = match direction {
            Direction::EnglishToTarget => pool[other].target.clone(),
            Direction::TargetToEnglish => pool[other].english.clone(),
        };
        if text != correct && !options.contains(&text) {
            options.push(text);
        }
    }

    // Distractors are already in random draw order; inserting the correct
    // answer at a random slot finishes the option shuffle.
    let correct_index = rng.random_range(0..=options.len());
    options.insert(correct_index, correct);

    QuizQuestion {
        prompt,
        question_text,
        options,
        correct_index,
        flashcard_id: card.id.clone(),
        direction,
    }
}

/// Count answered slots whose choice equals the question's correct index.
///
/// `answers` is indexed per question; `None` (unanswered) scores zero.
pub fn score(questions: &[QuizQuestion], answers: &[Option<usize>]) -> usize {
    questions
        .iter()
        .enumerate()
        .filter(|(i, q)| answers.get(*i).copied().flatten() == Some(q.correct_index))
        .count()
}
