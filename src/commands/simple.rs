//! Simple interactive CLI mode
//!
//! Line-based game without TUI. The countdown keeps running in the background
//! between inputs; a timeout shows up on the next redraw.

use crate::engine::{GameEngine, GuessOutcome, HintOutcome, RejectReason};
use crate::output::{print_round_result, print_round_status};
use colored::Colorize;
use std::io::{self, Write};

/// A line of player input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Guess(char),
    Hint,
    Pause,
    Resume,
    New,
    Quit,
    Help,
}

/// Parse one line of input
///
/// A single character is a guess; anything else must be a known command.
#[must_use]
pub fn parse_command(input: &str) -> Option<Command> {
    let input = input.trim();
    let mut chars = input.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return match c {
            '?' => Some(Command::Help),
            c => Some(Command::Guess(c)),
        };
    }

    match input.to_lowercase().as_str() {
        "hint" => Some(Command::Hint),
        "pause" => Some(Command::Pause),
        "resume" => Some(Command::Resume),
        "new" => Some(Command::New),
        "quit" | "exit" => Some(Command::Quit),
        "help" => Some(Command::Help),
        _ => None,
    }
}

/// Run the simple interactive CLI mode
///
/// # Errors
///
/// Returns an error if there's an I/O error reading user input.
pub fn run_simple(engine: &GameEngine) -> io::Result<()> {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║                    Hangman - Line Mode                       ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");
    print_help();

    let time_limit = engine.config().time_limit_secs;

    loop {
        let snapshot = engine.snapshot();
        print_round_status(&snapshot, time_limit);

        if snapshot.is_game_over() {
            print_round_result(&snapshot);
            match get_user_input("Play again? (yes/no)")?
                .to_lowercase()
                .as_str()
            {
                "yes" | "y" => {
                    engine.reset();
                    println!("\n🔄 New round started!");
                    continue;
                }
                _ => {
                    println!("\n👋 Thanks for playing!\n");
                    return Ok(());
                }
            }
        }

        let input = get_user_input("Letter or command")?;
        let Some(command) = parse_command(&input) else {
            println!("❌ Unknown command '{input}'. Type 'help' for the list.");
            continue;
        };

        match command {
            Command::Guess(letter) => report_guess(letter, engine.submit(letter)),
            Command::Hint => report_hint(engine.hint()),
            Command::Pause => {
                if !engine.pause() {
                    println!("Nothing to pause.");
                }
            }
            Command::Resume => {
                if !engine.resume() {
                    println!("The game is not paused.");
                }
            }
            Command::New => {
                engine.reset();
                println!("\n🔄 New round started!");
            }
            Command::Quit => {
                println!("\n👋 Thanks for playing!\n");
                return Ok(());
            }
            Command::Help => print_help(),
        }
    }
}

fn report_guess(letter: char, outcome: GuessOutcome) {
    let letter = letter.to_ascii_uppercase();
    match outcome {
        GuessOutcome::Hit => println!("{}", format!("✓ {letter} is in the word!").green()),
        GuessOutcome::Miss => println!("{}", format!("✗ No {letter}.").red()),
        GuessOutcome::Rejected(RejectReason::AlreadyGuessed) => {
            println!("You already tried {letter}.");
        }
        GuessOutcome::Rejected(RejectReason::NotALetter) => {
            println!("Only letters A-Z can be guessed.");
        }
        GuessOutcome::Rejected(RejectReason::RoundOver) => println!("The round is over."),
    }
}

fn report_hint(outcome: HintOutcome) {
    match outcome {
        HintOutcome::Revealed(letter) => {
            println!("{}", format!("💡 Hint: the word contains {letter}").yellow());
        }
        HintOutcome::BudgetExhausted => println!("No hints left this round."),
        HintOutcome::NothingToReveal => println!("Every letter is already revealed."),
        HintOutcome::RoundOver => println!("The round is over."),
    }
}

fn print_help() {
    println!("Guess the word one letter at a time before the clock or the gallows run out.\n");
    println!("  - Type a single letter to guess it");
    println!("  - 'hint' reveals a letter (3 per round)");
    println!("  - 'pause' / 'resume' stop and restart the clock (paused time still counts)");
    println!("  - 'new' starts a new round, 'quit' exits\n");
}

/// Get user input with a prompt
fn get_user_input(prompt: &str) -> io::Result<String> {
    print!("{prompt}: ");
    io::stdout().flush()?;

    let mut input = String::new();
    if io::stdin().read_line(&mut input)? == 0 {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "input closed",
        ));
    }

    Ok(input.trim().to_string())
}
