//! Terminal output formatting
//!
//! Coloured strings for everything the game announces.

pub mod display;

pub use display::{
    banner, format_elimination, format_hint, format_move, format_prompt, format_rejection,
    format_round, format_winner,
};
