//! The word list and the playable dictionary built from it
//!
//! `source` reads and writes the XML word list; `store` turns it into the
//! vocabulary served to players and tracks what a game has used up.

pub mod source;
mod store;

pub use source::{Entry, EntryStatus, SourceError, Variation, WordSource};
pub use store::{DEFAULT_AGENT, Dictionary, DictionaryError};
