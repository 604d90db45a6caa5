//! Vocabulary word representation
//!
//! A `Word` is a lowercase Latin word of at least three letters. Raw dictionary
//! text is cleaned with [`clean`] before it is offered to [`Word::new`].

use regex::Regex;
use std::borrow::Borrow;
use std::fmt;
use std::ops::Range;
use std::sync::LazyLock;
use thiserror::Error;

/// Shortest word accepted into the vocabulary
pub const MIN_WORD_LEN: usize = 3;

/// Length of the prefix/suffix that chains two words together
pub const LINK_LEN: usize = 2;

/// Diacritics folded to plain Latin letters before validation
const DIACRITICS: [(char, char); 5] = [('ă', 'a'), ('â', 'a'), ('î', 'i'), ('ș', 's'), ('ț', 't')];

static ANNOTATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" \(.+?\)").expect("annotation pattern is valid"));

/// A playable word: lowercase `a`-`z` only, at least [`MIN_WORD_LEN`] letters
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Word {
    text: String,
}

/// Why a candidate was refused entry into the vocabulary
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WordError {
    #[error("word must have at least {MIN_WORD_LEN} letters, got {0}")]
    TooShort(usize),
    #[error("word contains '{0}', only lowercase letters a-z are allowed")]
    InvalidCharacter(char),
}

impl Word {
    /// Create a new Word from already-cleaned text
    ///
    /// No case folding happens here: capitalised entries (proper names) are
    /// rejected rather than lowercased.
    ///
    /// # Errors
    /// Returns `WordError` if the text is shorter than [`MIN_WORD_LEN`] or
    /// contains anything outside `a`-`z`.
    ///
    /// # Examples
    /// ```
    /// use fazan::core::Word;
    ///
    /// let word = Word::new("casa").unwrap();
    /// assert_eq!(word.prefix(), "ca");
    /// assert_eq!(word.suffix(), "sa");
    ///
    /// assert!(Word::new("Ion").is_err());
    /// assert!(Word::new("da").is_err());
    /// ```
    pub fn new(text: impl Into<String>) -> Result<Self, WordError> {
        let text: String = text.into();

        let len = text.chars().count();
        if len < MIN_WORD_LEN {
            return Err(WordError::TooShort(len));
        }

        if let Some(bad) = text.chars().find(|c| !c.is_ascii_lowercase()) {
            return Err(WordError::InvalidCharacter(bad));
        }

        Ok(Self { text })
    }

    /// Get the word as a string slice
    #[inline]
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The leading two letters a previous word must end with
    #[inline]
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.text[..LINK_LEN]
    }

    /// The trailing two letters the next word must start with
    #[inline]
    #[must_use]
    pub fn suffix(&self) -> &str {
        &self.text[self.text.len() - LINK_LEN..]
    }
}

impl Borrow<str> for Word {
    fn borrow(&self) -> &str {
        &self.text
    }
}

impl AsRef<str> for Word {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// Remove every ` (...)` annotation from dictionary text
#[must_use]
pub fn strip_annotations(raw: &str) -> String {
    ANNOTATION.replace_all(raw, "").into_owned()
}

/// Byte ranges of the ` (...)` annotations in `raw`, in order
pub fn annotation_spans(raw: &str) -> impl Iterator<Item = Range<usize>> + '_ {
    ANNOTATION.find_iter(raw).map(|m| m.range())
}

/// Fold the supported diacritics to their plain Latin letters
///
/// Only the five lowercase Romanian diacritics are folded; everything else,
/// uppercase included, is left untouched.
#[must_use]
pub fn normalize_diacritics(raw: &str) -> String {
    raw.chars()
        .map(|c| {
            DIACRITICS
                .iter()
                .find_map(|&(from, to)| (from == c).then_some(to))
                .unwrap_or(c)
        })
        .collect()
}

/// Strip annotations and fold diacritics, ready for [`Word::new`]
#[must_use]
pub fn clean(raw: &str) -> String {
    normalize_diacritics(&strip_annotations(raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn word_creation_valid() {
        let word = Word::new("fazan").unwrap();
        assert_eq!(word.text(), "fazan");
        assert_eq!(word.prefix(), "fa");
        assert_eq!(word.suffix(), "an");
    }

    #[test]
    fn three_letter_word_links_overlap() {
        let word = Word::new("ana").unwrap();
        assert_eq!(word.prefix(), "an");
        assert_eq!(word.suffix(), "na");
    }

    #[test]
    fn word_creation_too_short() {
        assert_eq!(Word::new("da"), Err(WordError::TooShort(2)));
        assert_eq!(Word::new(""), Err(WordError::TooShort(0)));
    }

    #[test]
    fn word_creation_rejects_names_and_symbols() {
        assert_eq!(Word::new("Ion"), Err(WordError::InvalidCharacter('I')));
        assert_eq!(Word::new("ab-cd"), Err(WordError::InvalidCharacter('-')));
        assert_eq!(Word::new("casă"), Err(WordError::InvalidCharacter('ă')));
        assert!(Word::new("two words").is_err());
    }

    #[test]
    fn diacritics_are_folded() {
        assert_eq!(normalize_diacritics("țară"), "tara");
        assert_eq!(normalize_diacritics("șiret"), "siret");
        assert_eq!(normalize_diacritics("încântat"), "incantat");
    }

    #[test]
    fn uppercase_diacritics_are_not_folded() {
        assert_eq!(normalize_diacritics("Ștefan"), "Ștefan");
    }

    #[test]
    fn annotations_are_stripped() {
        assert_eq!(strip_annotations("casă (s.f.)"), "casă");
        assert_eq!(strip_annotations("a (x) / b (y)"), "a / b");
        assert_eq!(strip_annotations("fără"), "fără");
    }

    #[test]
    fn annotation_spans_cover_the_leading_space() {
        let spans: Vec<_> = annotation_spans("abac (s. / pl.) / x (y)").collect();
        assert_eq!(spans, vec![4..15, 19..23]);
    }

    #[test]
    fn clean_prepares_dictionary_text() {
        assert_eq!(clean("mătușă (rudă)"), "matusa");
        assert!(Word::new(clean("mătușă (rudă)")).is_ok());
    }

    #[test]
    fn word_display() {
        let word = Word::new("casa").unwrap();
        assert_eq!(format!("{word}"), "casa");
    }

    proptest! {
        #[test]
        fn accepted_words_are_long_lowercase_latin(raw in "\\PC{0,12}") {
            if let Ok(word) = Word::new(clean(&raw)) {
                prop_assert!(word.text().len() >= MIN_WORD_LEN);
                prop_assert!(word.text().chars().all(|c| c.is_ascii_lowercase()));
            }
        }
    }
}
