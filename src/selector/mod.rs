//! Word selection
//!
//! `policy` decides which dictionary word a computer player gets for a prefix;
//! `validate` decides whether a word typed by a human may be played.

pub mod policy;
pub mod validate;

pub use policy::{CandidateTiers, SelectionPolicy};
pub use validate::{Rejection, Verdict, validate_move};
