//! Display strings for game events

use crate::core::Word;
use crate::selector::Rejection;
use colored::Colorize;

/// Opening banner with the rules in one breath
#[must_use]
pub fn banner() -> String {
    format!(
        "\n{}\n{}\n{}\n\n{}\n{}\n",
        "═".repeat(60).cyan(),
        "                      F A Z A N".bright_yellow().bold(),
        "═".repeat(60).cyan(),
        "Each word must start with the last two letters of the previous one.",
        "Type 'qq' to give up, '?' for a hint, '!' to report the last word."
    )
}

/// Header shown when a new round starts
#[must_use]
pub fn format_round(round: usize) -> String {
    format!("\n{} {}", "Round".bright_cyan().bold(), round.to_string().bright_cyan().bold())
}

/// Prompt asking `name` for a word
#[must_use]
pub fn format_prompt(name: &str, prefix: &str, opening: bool) -> String {
    let kind = if opening { "an opening word" } else { "a word" };
    format!(
        "{}, enter {kind} starting with '{}'",
        name.bright_white().bold(),
        prefix.to_uppercase().bright_yellow()
    )
}

/// A player's accepted word
#[must_use]
pub fn format_move(name: &str, word: &Word) -> String {
    format!(
        "  {} plays {}",
        name.bright_white(),
        word.text().to_uppercase().green().bold()
    )
}

/// A player leaving the game
#[must_use]
pub fn format_elimination(name: &str, remaining: usize) -> String {
    format!(
        "  {} {} ({remaining} left)",
        name.bright_white(),
        "is out!".red().bold()
    )
}

/// Final announcement
#[must_use]
pub fn format_winner(name: &str, rounds: usize) -> String {
    format!(
        "\n{}\n  {} {} after {rounds} {}\n{}",
        "═".repeat(60).bright_cyan(),
        "🏆".bright_yellow(),
        format!("{name} wins").bright_green().bold(),
        if rounds == 1 { "round" } else { "rounds" },
        "═".repeat(60).bright_cyan()
    )
}

/// Why a typed word was refused
#[must_use]
pub fn format_rejection(rejection: &Rejection) -> String {
    format!("  {} {rejection}", "✗".red())
}

/// Answer to a hint request
#[must_use]
pub fn format_hint(prefix: &str, exists: bool) -> String {
    if exists {
        format!("  There is at least one word starting with '{prefix}'.")
    } else {
        format!("  No word starts with '{prefix}'.")
    }
}
