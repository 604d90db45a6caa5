//! Running a game

pub mod console;
mod referee;

pub use console::{Console, StdConsole};
pub use referee::{Game, GameOutcome};
