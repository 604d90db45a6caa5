//! Players and their decision strategies
//!
//! Every player answers the same question: given the required prefix and the
//! dictionary, which word do you play, or do you give up?

mod computer;
mod human;
pub mod setup;

pub use computer::{ComputerStrategy, MAX_LEVEL, MAX_RECONSIDER, SMART_LEVEL};
pub use human::{GIVE_UP, HELP, HumanStrategy, REPORT};
pub use setup::{
    MAX_HUMAN_PLAYERS, configure_players, create_computer_player, parse_computer_level,
    validate_human_player_count,
};

use crate::core::{GameRng, Word};
use crate::dictionary::Dictionary;
use crate::game::Console;

/// What a player does on their turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Move {
    /// Play this word
    Word(Word),
    /// Give up; the player is eliminated
    Forfeit,
}

/// Everything a strategy may look at or touch during one turn
pub struct Turn<'a> {
    /// The letters the word must start with
    pub prefix: &'a str,
    /// First move of the game or first move after an elimination
    pub opening: bool,
    /// The word the previous player played, if this is not an opening move
    pub previous: Option<&'a Word>,
    pub dictionary: &'a mut Dictionary,
    pub console: &'a mut dyn Console,
    pub rng: &'a mut GameRng,
}

/// A way of deciding on a move
pub trait Strategy {
    /// Decide on a move for the player called `name`
    fn play(&self, name: &str, turn: &mut Turn<'_>) -> Move;
}

/// Enum wrapper for the player strategies
///
/// Allows a mixed list of players while keeping static dispatch.
#[derive(Debug, Clone)]
pub enum PlayerKind {
    Human(HumanStrategy),
    Computer(ComputerStrategy),
}

impl Strategy for PlayerKind {
    fn play(&self, name: &str, turn: &mut Turn<'_>) -> Move {
        match self {
            Self::Human(s) => s.play(name, turn),
            Self::Computer(s) => s.play(name, turn),
        }
    }
}

/// A participant in a game
#[derive(Debug, Clone)]
pub struct Player {
    name: String,
    eliminated: bool,
    kind: PlayerKind,
}

impl Player {
    #[must_use]
    pub fn new(name: impl Into<String>, kind: PlayerKind) -> Self {
        Self {
            name: name.into(),
            eliminated: false,
            kind,
        }
    }

    /// A player who types their words
    #[must_use]
    pub fn human(name: impl Into<String>) -> Self {
        Self::new(name, PlayerKind::Human(HumanStrategy))
    }

    /// A player driven by a computer strategy
    #[must_use]
    pub fn computer(name: impl Into<String>, strategy: ComputerStrategy) -> Self {
        Self::new(name, PlayerKind::Computer(strategy))
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn kind(&self) -> &PlayerKind {
        &self.kind
    }

    #[must_use]
    pub const fn is_eliminated(&self) -> bool {
        self.eliminated
    }

    #[must_use]
    pub const fn is_computer(&self) -> bool {
        matches!(self.kind, PlayerKind::Computer(_))
    }

    pub fn eliminate(&mut self) {
        self.eliminated = true;
    }

    /// Take a turn
    pub fn play(&self, turn: &mut Turn<'_>) -> Move {
        self.kind.play(&self.name, turn)
    }
}
