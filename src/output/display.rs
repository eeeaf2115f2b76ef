//! Display functions for game state and command results

use super::formatters::{TimeUrgency, gallows, letter_list, time_bar, time_urgency};
use crate::core::Dictionary;
use crate::engine::{GameState, LossReason, SessionSnapshot};
use colored::Colorize;

/// Print the gallows and the round status
pub fn print_round_status(snapshot: &SessionSnapshot, time_limit_secs: u32) {
    println!("\n{}", "─".repeat(60).cyan());
    println!(
        "Category: {}   Score: {}   Level: {}",
        snapshot.category.bright_magenta().bold(),
        snapshot.score.to_string().bright_yellow(),
        snapshot.level.to_string().bright_yellow()
    );
    println!("{}", "─".repeat(60).cyan());

    for line in gallows(snapshot.wrong_guesses) {
        println!("   {line}");
    }

    println!("\n   Word:     {}", snapshot.display_word.bright_white().bold());

    let bar = time_bar(snapshot.time_remaining_secs, time_limit_secs, 30);
    let time = format!("{:>2}s", snapshot.time_remaining_secs);
    let (bar, time) = match time_urgency(snapshot.time_remaining_secs) {
        TimeUrgency::Relaxed => (bar.green(), time.normal()),
        TimeUrgency::Hurry => (bar.yellow(), time.yellow().bold()),
        TimeUrgency::Critical => (bar.red(), time.red().bold()),
    };
    println!("   Time:     [{bar}] {time}");
    println!(
        "   Wrong:    {}/{}",
        snapshot.wrong_guesses, snapshot.max_wrong_guesses
    );
    println!(
        "   Hints:    {} left",
        snapshot.max_hints.saturating_sub(snapshot.hints_used)
    );
    println!(
        "   Guessed:  {}",
        letter_list(&snapshot.guessed_letters).bright_black()
    );

    if snapshot.state == GameState::Paused {
        println!("\n   {}", "⏸  Paused - type 'resume' to continue".yellow());
    }
}

/// Print the outcome of a finished round
pub fn print_round_result(snapshot: &SessionSnapshot) {
    println!("\n{}", "═".repeat(60).bright_cyan());
    match (snapshot.state, snapshot.loss_reason) {
        (GameState::Won, _) => {
            println!("{}", "    🎉  YOU WON!  🎉    ".bright_green().bold());
            println!(
                "\n  The word was {}",
                snapshot.word.bright_white().bold()
            );
        }
        (_, Some(LossReason::OutOfTime)) => {
            println!("{}", "    ⏰  TIME'S UP!  ⏰    ".red().bold());
            println!("\n  The word was {}", snapshot.word.bright_white().bold());
        }
        _ => {
            println!("{}", "    💀  YOU LOST!  💀    ".red().bold());
            println!("\n  The word was {}", snapshot.word.bright_white().bold());
        }
    }
    println!(
        "  Score: {}   Level: {}",
        snapshot.score.to_string().bright_yellow().bold(),
        snapshot.level.to_string().bright_yellow().bold()
    );
    println!("{}", "═".repeat(60).bright_cyan());
}

/// Print every category with its words
pub fn print_dictionary_summary(dictionary: &Dictionary) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(
        " {} {} words ",
        "DICTIONARY:".bright_cyan().bold(),
        dictionary.len().to_string().bright_yellow().bold()
    );
    println!("{}", "═".repeat(60).cyan());

    for (category, words) in dictionary.categories() {
        println!(
            "\n📚 {} ({})",
            category.bright_magenta().bold(),
            words.len()
        );
        println!("   {}", words.join(", "));
    }
}
