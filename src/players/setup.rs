//! Interactive game setup: computer opponent, human count, player names

use std::io;

use super::{ComputerStrategy, MAX_LEVEL, Player};
use crate::core::GameRng;
use crate::game::Console;

/// Most human players the setup conversation asks names for
pub const MAX_HUMAN_PLAYERS: usize = 20;

const COMPUTER_NAMES: &[&str] = &[
    "syllabot",
    "captain.vowel",
    "alphabet_soup",
    "prefix_pete",
    "the.last.two",
    "quiet_quill",
    "lexi_con",
    "wordsmith9000",
    "ink_and_byte",
    "dr.dictionary",
    "rhymes_with_orange",
    "typo_terror",
];

/// Parse a number the way a player types it: `"3"`, `" 3.9 "`, `"2e0"`
///
/// The fractional part is dropped. Non-finite values are refused.
fn parse_truncated(raw: &str) -> Option<f64> {
    let value: f64 = raw.trim().parse().ok()?;
    value.is_finite().then(|| value.trunc())
}

/// Parse a computer difficulty level in `1..=10`
///
/// # Examples
/// ```
/// use fazan::players::parse_computer_level;
///
/// assert_eq!(parse_computer_level("8"), Some(8));
/// assert_eq!(parse_computer_level("1.7"), Some(1));
/// assert_eq!(parse_computer_level("11"), None);
/// assert_eq!(parse_computer_level("z"), None);
/// ```
#[must_use]
pub fn parse_computer_level(raw: &str) -> Option<u8> {
    let value = parse_truncated(raw)?;
    (1.0..=f64::from(MAX_LEVEL))
        .contains(&value)
        .then_some(value as u8)
}

/// Validate the number of human players
///
/// A game against the computer needs at least one human, otherwise at
/// least two.
#[must_use]
pub fn validate_human_player_count(raw: &str, has_computer: bool) -> Option<usize> {
    let value = parse_truncated(raw)?;
    let minimum = if has_computer { 1.0 } else { 2.0 };

    (value >= minimum).then_some(value as usize)
}

/// Create a computer opponent with a randomly chosen name
#[must_use]
pub fn create_computer_player(level: u8, rng: &mut GameRng) -> Player {
    let name = rng.choose(COMPUTER_NAMES).copied().unwrap_or("computer");
    log::info!("computer player '{name}' at level {level}");
    Player::computer(name, ComputerStrategy::new(level))
}

/// Ask until `parse` accepts an answer; `None` when input closes
fn ask_until<T>(
    console: &mut dyn Console,
    prompt: &str,
    complaint: impl Fn(&str) -> String,
    parse: impl Fn(&str) -> Option<T>,
) -> io::Result<Option<T>> {
    while let Some(answer) = console.read_line(prompt)? {
        match parse(&answer) {
            Some(value) => return Ok(Some(value)),
            None => console.say(&complaint(&answer)),
        }
    }
    Ok(None)
}

/// Run the setup conversation and return the players in seating order
///
/// Returns `Ok(None)` if input closes before setup is complete.
///
/// # Errors
/// Returns an I/O error if the console fails.
pub fn configure_players(
    console: &mut dyn Console,
    rng: &mut GameRng,
) -> io::Result<Option<Vec<Player>>> {
    let mut players = Vec::new();

    let Some(versus) = console.read_line("Play vs computer ('y' for yes)?")? else {
        return Ok(None);
    };

    if versus.eq_ignore_ascii_case("y") {
        let level = ask_until(
            console,
            "Enter computer level -> 1(easy) ... 10(hard)",
            |answer| format!("'{answer}' is not in range of 1...{MAX_LEVEL}!"),
            parse_computer_level,
        )?;
        let Some(level) = level else {
            return Ok(None);
        };
        players.push(create_computer_player(level, rng));
    }

    let has_computer = !players.is_empty();
    let count = ask_until(
        console,
        "Enter how many 'human' players",
        |answer| {
            if parse_truncated(answer).is_none() {
                format!("'{answer}' is not a number!")
            } else if has_computer {
                format!("Expected between 1 and {MAX_HUMAN_PLAYERS} 'human' players!")
            } else {
                format!("Expected between 2 and {MAX_HUMAN_PLAYERS} 'human' players!")
            }
        },
        |answer| {
            validate_human_player_count(answer, has_computer)
                .filter(|&count| count <= MAX_HUMAN_PLAYERS)
        },
    )?;
    let Some(count) = count else {
        return Ok(None);
    };

    for number in 1..=count {
        let Some(name) = console.read_line(&format!("Player {number} name"))? else {
            return Ok(None);
        };
        let name = if name.is_empty() {
            format!("Player {number}")
        } else {
            name
        };
        players.push(Player::human(name));
    }

    rng.shuffle(&mut players);
    Ok(Some(players))
}
