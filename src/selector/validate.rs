//! Validation of freely typed words

use crate::core::{Word, WordError, normalize_diacritics};
use crate::dictionary::Dictionary;
use thiserror::Error;

/// An acceptable move
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// The word is in the vocabulary
    Known(Word),
    /// The word passes every rule but is not in the vocabulary; it may be
    /// added to the dictionary and played
    Unknown(Word),
}

impl Verdict {
    #[must_use]
    pub const fn word(&self) -> &Word {
        match self {
            Self::Known(word) | Self::Unknown(word) => word,
        }
    }
}

/// Why a typed word cannot be played
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("{0}")]
    Invalid(#[from] WordError),
    #[error("the word must start with '{prefix}'")]
    WrongPrefix { prefix: String },
    #[error("'{0}' has already been played")]
    AlreadyPlayed(String),
    #[error("'{0}' would end the game, an opening word must leave a reply")]
    OpeningEndgame(String),
}

/// Check a typed word against the rules of the current turn
///
/// Input is trimmed, lowercased and has its diacritics folded before checking
/// length and alphabet, the required prefix, words already played, and for an
/// opening move that the word does not leave the next player without a reply.
///
/// # Errors
/// Returns the first `Rejection` that applies.
///
/// # Examples
/// ```
/// use fazan::dictionary::{Dictionary, WordSource};
/// use fazan::selector::{Rejection, Verdict, validate_move};
///
/// let source = WordSource::parse(
///     r#"<Root><Entry id="1"><Description>casa</Description></Entry></Root>"#,
/// ).unwrap();
/// let dictionary = Dictionary::from_source(source);
///
/// assert!(matches!(validate_move("Casa", "ca", &dictionary, false), Ok(Verdict::Known(_))));
/// assert!(matches!(validate_move("cartof", "ca", &dictionary, false), Ok(Verdict::Unknown(_))));
/// assert!(matches!(validate_move("masa", "ca", &dictionary, false), Err(Rejection::WrongPrefix { .. })));
/// ```
pub fn validate_move(
    input: &str,
    prefix: &str,
    dictionary: &Dictionary,
    opening: bool,
) -> Result<Verdict, Rejection> {
    let word = Word::new(normalize_diacritics(&input.trim().to_lowercase()))?;

    if !word.text().starts_with(prefix) {
        return Err(Rejection::WrongPrefix {
            prefix: prefix.to_string(),
        });
    }

    if dictionary.is_played(word.text()) {
        return Err(Rejection::AlreadyPlayed(word.text().to_string()));
    }

    let known = dictionary.contains(word.text());
    let ends_game = if known {
        dictionary.is_endgame(word.text())
    } else {
        !dictionary.has_prefix(word.suffix())
    };

    if opening && ends_game {
        return Err(Rejection::OpeningEndgame(word.text().to_string()));
    }

    Ok(if known {
        Verdict::Known(word)
    } else {
        Verdict::Unknown(word)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::WordSource;

    fn dictionary() -> Dictionary {
        let words = ["casa", "sare", "cadou", "ochi"];
        let body: String = words
            .iter()
            .enumerate()
            .map(|(i, w)| format!("<Entry id=\"{i}\"><Description>{w}</Description></Entry>"))
            .collect();
        Dictionary::from_source(WordSource::parse(&format!("<Root>{body}</Root>")).unwrap())
    }

    #[test]
    fn known_word_is_accepted() {
        let verdict = validate_move("casa", "ca", &dictionary(), false).unwrap();
        assert_eq!(verdict, Verdict::Known(Word::new("casa").unwrap()));
    }

    #[test]
    fn input_is_normalized() {
        let verdict = validate_move("  CASĂ \n", "ca", &dictionary(), false).unwrap();
        assert_eq!(verdict.word().text(), "casa");
    }

    #[test]
    fn short_word_is_rejected() {
        assert_eq!(
            validate_move("ca", "ca", &dictionary(), false),
            Err(Rejection::Invalid(WordError::TooShort(2)))
        );
    }

    #[test]
    fn non_letters_are_rejected() {
        assert!(matches!(
            validate_move("ca5a", "ca", &dictionary(), false),
            Err(Rejection::Invalid(WordError::InvalidCharacter('5')))
        ));
    }

    #[test]
    fn wrong_prefix_is_rejected() {
        assert_eq!(
            validate_move("sare", "ca", &dictionary(), false),
            Err(Rejection::WrongPrefix {
                prefix: "ca".to_string()
            })
        );
    }

    #[test]
    fn played_word_is_rejected() {
        let mut dictionary = dictionary();
        dictionary.discard_word("casa", false);

        assert_eq!(
            validate_move("casa", "ca", &dictionary, false),
            Err(Rejection::AlreadyPlayed("casa".to_string()))
        );
    }

    #[test]
    fn added_word_cannot_be_replayed() {
        let mut dictionary = dictionary();
        dictionary.add_words(["cartof"]);

        assert_eq!(
            validate_move("cartof", "ca", &dictionary, false),
            Err(Rejection::AlreadyPlayed("cartof".to_string()))
        );
    }

    #[test]
    fn opening_endgame_word_is_rejected() {
        let dictionary = dictionary();
        assert!(dictionary.is_endgame("cadou"));

        assert_eq!(
            validate_move("cadou", "ca", &dictionary, true),
            Err(Rejection::OpeningEndgame("cadou".to_string()))
        );
        assert!(validate_move("cadou", "ca", &dictionary, false).is_ok());
    }

    #[test]
    fn opening_unknown_word_without_reply_is_rejected() {
        // nothing starts with "uz"
        assert!(matches!(
            validate_move("cauz", "ca", &dictionary(), true),
            Err(Rejection::OpeningEndgame(_))
        ));
        // "ochi" starts with "oc"
        assert!(matches!(
            validate_move("caoc", "ca", &dictionary(), true),
            Ok(Verdict::Unknown(_))
        ));
    }

    #[test]
    fn unknown_word_is_offered() {
        let verdict = validate_move("cartof", "ca", &dictionary(), false).unwrap();
        assert_eq!(verdict, Verdict::Unknown(Word::new("cartof").unwrap()));
    }
}
