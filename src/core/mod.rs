//! Core domain types for Fazan
//!
//! Words, text cleaning, and the seedable random source shared by every
//! component that makes a random choice.

mod rng;
mod word;

pub use rng::GameRng;
pub use word::{
    LINK_LEN, MIN_WORD_LEN, Word, WordError, annotation_spans, clean, normalize_diacritics,
    strip_annotations,
};
