//! Human player reading words from a console

use super::{Move, Strategy, Turn};
use crate::output::{format_hint, format_prompt, format_rejection};
use crate::selector::{Verdict, validate_move};

/// Typed at any prompt to give up
pub const GIVE_UP: &str = "qq";

/// Asks whether any word starts with the current prefix
pub const HELP: &str = "?";

/// Reports the previous word as not a real word
pub const REPORT: &str = "!";

/// Strategy that asks a person for every move
#[derive(Debug, Clone, Copy, Default)]
pub struct HumanStrategy;

/// Outcome of asking whether to add an unknown word
enum Confirmation {
    Add,
    Decline,
    GiveUp,
}

impl HumanStrategy {
    fn confirm_addition(word: &str, turn: &mut Turn<'_>) -> Confirmation {
        let prompt = format!("Add '{word}' to the dictionary? (y/n)");
        match turn.console.read_line(&prompt) {
            Ok(Some(answer)) if answer == GIVE_UP => Confirmation::GiveUp,
            Ok(Some(answer)) if answer.eq_ignore_ascii_case("y") => Confirmation::Add,
            Ok(Some(_)) => Confirmation::Decline,
            Ok(None) => Confirmation::GiveUp,
            Err(e) => {
                log::warn!("could not read answer: {e}");
                Confirmation::GiveUp
            }
        }
    }

    fn report_previous(turn: &mut Turn<'_>) {
        match turn.previous {
            Some(previous) => {
                turn.dictionary.discard_word(previous.text(), true);
                turn.console.say(&format!(
                    "  '{previous}' will be taken out of the dictionary."
                ));
            }
            None => turn.console.say("  There is no previous word to report."),
        }
    }
}

impl Strategy for HumanStrategy {
    fn play(&self, name: &str, turn: &mut Turn<'_>) -> Move {
        let prompt = format_prompt(name, turn.prefix, turn.opening);

        loop {
            let input = match turn.console.read_line(&prompt) {
                Ok(Some(input)) => input,
                Ok(None) => {
                    log::info!("input closed, {name} gives up");
                    return Move::Forfeit;
                }
                Err(e) => {
                    log::warn!("could not read move for {name}: {e}");
                    return Move::Forfeit;
                }
            };

            match input.as_str() {
                GIVE_UP => return Move::Forfeit,
                HELP => {
                    let exists = turn.dictionary.has_prefix(turn.prefix);
                    turn.console.say(&format_hint(turn.prefix, exists));
                }
                REPORT => Self::report_previous(turn),
                _ => match validate_move(&input, turn.prefix, turn.dictionary, turn.opening) {
                    Ok(Verdict::Known(word)) => return Move::Word(word),
                    Ok(Verdict::Unknown(word)) => {
                        match Self::confirm_addition(word.text(), turn) {
                            Confirmation::Add => {
                                turn.dictionary.add_words([word.text()]);
                                return Move::Word(word);
                            }
                            Confirmation::Decline => {}
                            Confirmation::GiveUp => return Move::Forfeit,
                        }
                    }
                    Err(rejection) => turn.console.say(&format_rejection(&rejection)),
                },
            }
        }
    }
}
