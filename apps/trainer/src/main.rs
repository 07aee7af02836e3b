//! Interactive terminal front-end.
//!
//! Presentation only: parses commands, calls into the session controller,
//! and prints view-ready state. Match-check delays are awaited here before
//! resolution.

use anyhow::{Context, Result};
use lingua_core::matching::ClickOutcome;
use lingua_core::{parse_tags, Direction, NewFlashcard, TargetLanguage};
use lingua_trainer::session::Session;
use lingua_trainer::store::JsonFileStore;
use std::io::{self, BufRead, Write};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let data_dir = dirs::data_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("lingua-trainer");
    let store = JsonFileStore::new(data_dir);
    let mut session = Session::new(TargetLanguage::French, Box::new(store))
        .context("failed to start session")?;

    println!("Lingua Trainer — English ⇄ {}", session.language().label());
    print_help();

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else { break };
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let (command, rest) = match line.split_once(' ') {
            Some((command, rest)) => (command, rest.trim()),
            None => (line, ""),
        };

        match command {
            "help" => print_help(),
            "quit" | "exit" => break,
            "lang" => match TargetLanguage::from_key(rest) {
                Some(language) => match session.set_language(language) {
                    Ok(()) => println!("Now learning {}.", language.label()),
                    Err(err) => println!("Cannot switch language: {err}"),
                },
                None => println!("Unknown language key (use fr or es)."),
            },
            "show" => print_card(&session),
            "next" => {
                session.next_card();
                print_card(&session);
            }
            "prev" => {
                session.prev_card();
                print_card(&session);
            }
            "flip" => {
                session.flip();
                print_card(&session);
            }
            "vocab" => print_vocab(&session),
            "vnext" => {
                session.next_vocab();
                print_vocab(&session);
            }
            "vprev" => {
                session.prev_vocab();
                print_vocab(&session);
            }
            "vflip" => {
                session.flip();
                print_vocab(&session);
            }
            "levels" => println!("Levels: all, {}", session.levels().join(", ")),
            "categories" => println!("Categories: all, {}", session.categories().join(", ")),
            "level" => {
                session.set_level(wildcard_or(rest));
                print_card(&session);
            }
            "category" => {
                session.set_category(wildcard_or(rest));
                print_card(&session);
            }
            "add" => add_card(&mut session, rest),
            "quiz" => {
                session.start_quiz();
                print_question(&session);
            }
            "answer" => answer(&mut session, rest),
            "qnext" => {
                match session.quiz_mut().map(|q| q.next()) {
                    Some(true) => print_question(&session),
                    Some(false) => println!("Answer the current question first."),
                    None => println!("No quiz in progress (try `quiz`)."),
                };
            }
            "qprev" => {
                if let Some(quiz) = session.quiz_mut() {
                    quiz.prev();
                }
                print_question(&session);
            }
            "finish" => finish_quiz(&mut session),
            "match" => {
                session.start_match();
                print_board(&session);
            }
            "pick" => pick(&mut session, rest).await,
            "translate" => do_translate(&session, rest),
            _ => println!("Unknown command (try `help`)."),
        }
    }

    Ok(())
}

fn print_help() {
    println!(
        "\
Commands:
  show | next | prev | flip      browse flashcards
  vocab | vnext | vprev | vflip  browse vocabulary
  levels | categories            list filter values
  level <value|all>              set level filter
  category <value|all>           set category filter
  add <en> | <target> | <level> | <category> [| tags]
  quiz | answer <n> | qnext | qprev | finish
  match | pick <n>
  translate <en|fr|es> <text>
  lang <fr|es> | help | quit"
    );
}

fn wildcard_or(value: &str) -> Option<String> {
    if value.is_empty() || value == "all" {
        None
    } else {
        Some(value.to_string())
    }
}

fn print_card(session: &Session) {
    let (position, total) = session.browse_position();
    match session.current_card() {
        Some(card) => {
            println!("Card {}/{} [{} / {}]", position + 1, total, card.level, card.category);
            if session.is_flipped() {
                println!("  {}", card.target);
                println!("  Rule: {}", card.rule_target);
            } else {
                println!("  {}", card.english);
                println!("  Rule: {}", card.rule_english);
            }
            if !card.tags.is_empty() {
                println!("  Tags: {}", card.tags.join(", "));
            }
        }
        None => println!("No flashcards match the current filters."),
    }
}

fn print_vocab(session: &Session) {
    let (position, total) = session.vocab_position();
    match session.current_vocab() {
        Some(entry) => {
            println!("Vocab {}/{} [{}]", position + 1, total, entry.category);
            if session.is_flipped() {
                println!("  {}", entry.target);
            } else {
                println!("  {}", entry.english);
            }
        }
        None => println!("The vocabulary table is empty."),
    }
}

fn add_card(session: &mut Session, rest: &str) {
    let parts: Vec<&str> = rest.split('|').map(str::trim).collect();
    if parts.len() < 4 {
        println!("Usage: add <en> | <target> | <level> | <category> [| tags]");
        return;
    }

    let input = NewFlashcard {
        english: parts[0].to_string(),
        target: parts[1].to_string(),
        level: parts[2].to_string(),
        category: parts[3].to_string(),
        rule_english: None,
        rule_target: None,
        tags: parts.get(4).map(|t| parse_tags(t)).unwrap_or_default(),
    };

    match session.add_flashcard(input) {
        Ok(outcome) => {
            println!("Added flashcard {}.", outcome.card.id);
            if let Some(err) = outcome.persist_error {
                println!("Warning: the card could not be saved to disk ({err}).");
            }
        }
        Err(err) => println!("Cannot add flashcard: {err}"),
    }
}

fn print_question(session: &Session) {
    let Some(quiz) = session.quiz() else {
        println!("No quiz in progress (try `quiz`).");
        return;
    };
    if quiz.is_empty() {
        println!("No flashcards available for a quiz.");
        return;
    }
    let Some(question) = quiz.current() else {
        return;
    };

    println!(
        "Question {}/{}: {}",
        quiz.index() + 1,
        quiz.questions().len(),
        question.prompt
    );
    for (i, option) in question.options.iter().enumerate() {
        let marker = if quiz.answers()[quiz.index()] == Some(i) {
            "*"
        } else {
            " "
        };
        println!("  {marker}{}. {option}", i + 1);
    }
}

fn answer(session: &mut Session, rest: &str) {
    let choice = rest.parse::<usize>().ok().and_then(|n| n.checked_sub(1));
    let Some(quiz) = session.quiz_mut() else {
        println!("No quiz in progress (try `quiz`).");
        return;
    };
    match choice {
        Some(choice) if quiz.answer(choice) => {}
        _ => println!("Pick an option number shown for this question."),
    }
    print_question(session);
}

fn finish_quiz(session: &mut Session) {
    let Some(quiz) = session.quiz_mut() else {
        println!("No quiz in progress (try `quiz`).");
        return;
    };
    let total = quiz.questions().len();
    match quiz.finish() {
        Some(score) => {
            println!("Score: {score} / {total}");
            session.leave_quiz();
        }
        None => println!("Answer every question first (you must be on the last one)."),
    }
}

async fn pick(session: &mut Session, rest: &str) {
    let Some(index) = rest.parse::<usize>().ok().and_then(|n| n.checked_sub(1)) else {
        println!("Usage: pick <card number>");
        return;
    };

    match session.click_card(index) {
        ClickOutcome::Ignored => println!("That card cannot be picked right now."),
        ClickOutcome::Flipped => print_board(session),
        ClickOutcome::Pending(check) => {
            print_board(session);
            let matched = check.is_match();
            tokio::time::sleep(check.delay()).await;
            if session.resolve_match(check) {
                println!("{}", if matched { "Match!" } else { "No match." });
            }
            print_board(session);
            if session.board().is_some_and(|b| b.is_complete()) {
                println!("All pairs found! (`match` starts a new game)");
            }
        }
    }
}

fn print_board(session: &Session) {
    let Some(board) = session.board() else {
        println!("No match game in progress (try `match`).");
        return;
    };
    if board.cards().is_empty() {
        println!("Not enough flashcards for a match game.");
        return;
    }

    println!(
        "Pairs found: {}/{}  Score: {}",
        board.matched_pairs(),
        board.total_pairs(),
        board.score()
    );
    for (i, card) in board.cards().iter().enumerate() {
        let face = if card.is_matched {
            format!("[{}]", card.text)
        } else if card.is_flipped {
            card.text.clone()
        } else {
            "▇▇▇".to_string()
        };
        println!("  {:>2}. {face}", i + 1);
    }
}

fn do_translate(session: &Session, rest: &str) {
    let Some((key, text)) = rest.split_once(' ') else {
        println!("Usage: translate <en|{}> <text>", session.language().key());
        return;
    };

    let direction = if key == "en" {
        Direction::EnglishToTarget
    } else if key == session.language().key() {
        Direction::TargetToEnglish
    } else {
        println!("Unknown direction key `{key}`.");
        return;
    };

    match session.translate(text, direction) {
        Some(result) => println!("{result}"),
        None => println!("Translation not found."),
    }
}
