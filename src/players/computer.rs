//! Computer player
//!
//! A computer's level (1-10, normalised to 0.1-1.0) is the probability that
//! it tries to end the game on a given turn instead of keeping it going.
//! From [`SMART_LEVEL`] up it also avoids handing the opponent a
//! game-ending reply.

use super::{Move, Strategy, Turn};
use crate::core::Word;
use crate::selector::SelectionPolicy;

/// Highest raw difficulty level
pub const MAX_LEVEL: u8 = 10;

/// Raw level from which a computer selects words in smart mode
pub const SMART_LEVEL: u8 = 6;

/// How many times a computer may reject its first choice on one turn
pub const MAX_RECONSIDER: usize = 3;

/// Heuristic word chooser
#[derive(Debug, Clone, PartialEq)]
pub struct ComputerStrategy {
    level: f64,
    smart: bool,
}

impl ComputerStrategy {
    /// Create a strategy from a raw 1-10 difficulty level
    ///
    /// # Examples
    /// ```
    /// use fazan::players::ComputerStrategy;
    ///
    /// let easy = ComputerStrategy::new(2);
    /// assert!((easy.level() - 0.2).abs() < 1e-9);
    /// assert!(!easy.is_smart());
    /// assert!(ComputerStrategy::new(6).is_smart());
    /// ```
    #[must_use]
    pub fn new(raw_level: u8) -> Self {
        let raw_level = raw_level.min(MAX_LEVEL);
        Self {
            level: f64::from(raw_level) / f64::from(MAX_LEVEL),
            smart: raw_level >= SMART_LEVEL,
        }
    }

    /// Create a strategy from an already normalised level in `[0, 1]`
    #[must_use]
    pub fn with_level(level: f64, smart: bool) -> Self {
        Self {
            level: level.clamp(0.0, 1.0),
            smart,
        }
    }

    /// Normalised difficulty in `[0, 1]`
    #[must_use]
    pub const fn level(&self) -> f64 {
        self.level
    }

    #[must_use]
    pub const fn is_smart(&self) -> bool {
        self.smart
    }

    /// Decide this turn's policy; an opening move always keeps the game going
    fn policy(&self, opening: bool, turn: &mut Turn<'_>) -> SelectionPolicy {
        if opening || turn.rng.draw() >= self.level {
            SelectionPolicy::avoid_ending(self.smart)
        } else {
            SelectionPolicy::seek_ending(self.smart)
        }
    }

    /// Give up on words that hand the next player a game-ending reply
    ///
    /// Each rejection is a draw against the level; a rejected word is
    /// discarded for the session and the dictionary asked again. If nothing
    /// else comes back, the last rejected word is still a legal move.
    fn reconsider(&self, mut word: Word, policy: SelectionPolicy, turn: &mut Turn<'_>) -> Word {
        for _ in 0..MAX_RECONSIDER {
            if !turn.dictionary.gifts_endgame(&word) || turn.rng.draw() >= self.level {
                break;
            }

            log::debug!("reconsidering '{word}'");
            turn.dictionary.discard_word(word.text(), false);

            match turn.dictionary.get_word(turn.prefix, policy, turn.rng) {
                Some(next) if !(turn.opening && turn.dictionary.is_endgame(next.text())) => {
                    word = next;
                }
                _ => break,
            }
        }
        word
    }
}

impl Strategy for ComputerStrategy {
    fn play(&self, name: &str, turn: &mut Turn<'_>) -> Move {
        let policy = self.policy(turn.opening, turn);
        log::debug!(
            "{name} looks for a word on '{}' (avoid ending: {}, smart: {})",
            turn.prefix,
            policy.avoid_ending,
            policy.smart
        );

        let Some(word) = turn.dictionary.get_word(turn.prefix, policy, turn.rng) else {
            log::debug!("{name} has no word for '{}'", turn.prefix);
            return Move::Forfeit;
        };

        if turn.opening && turn.dictionary.is_endgame(word.text()) {
            log::debug!("{name} only has '{word}', which cannot open");
            return Move::Forfeit;
        }

        let word = if policy.avoid_ending && !self.smart {
            self.reconsider(word, policy, turn)
        } else {
            word
        };

        Move::Word(word)
    }
}
