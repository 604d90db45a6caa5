//! Fazan
//!
//! A word-chain elimination game: each word must start with the last two
//! letters of the previous one. A player who cannot answer is out, and the
//! last player standing wins.
//!
//! # Quick Start
//!
//! ```rust
//! use fazan::core::GameRng;
//! use fazan::dictionary::{Dictionary, WordSource};
//! use fazan::selector::SelectionPolicy;
//!
//! let source = WordSource::parse(
//!     r#"<Root>
//!          <Entry id="1"><Description>casă (s.f.) / case</Description></Entry>
//!          <Entry id="2"><Description>sare</Description></Entry>
//!        </Root>"#,
//! ).unwrap();
//! let dictionary = Dictionary::from_source(source);
//! let mut rng = GameRng::new(42);
//!
//! // "sare" leaves no reply, so it ends the game
//! assert!(dictionary.is_endgame("sare"));
//!
//! let word = dictionary
//!     .get_word("sa", SelectionPolicy::seek_ending(false), &mut rng)
//!     .unwrap();
//! assert_eq!(word.text(), "sare");
//! ```

// Core domain types
pub mod core;

// Word list and playable vocabulary
pub mod dictionary;

// Word choice and move validation
pub mod selector;

// Human and computer players
pub mod players;

// Game loop and console
pub mod game;

// Terminal output formatting
pub mod output;
