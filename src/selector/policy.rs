//! Word selection policy
//!
//! Splits the words available for a prefix into tiers and picks one according
//! to whether the player wants to keep the game going or end it.

use crate::core::{GameRng, Word};
use crate::dictionary::Dictionary;
use rayon::prelude::*;

/// How a word should be chosen from the candidates for a prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionPolicy {
    /// Prefer words that leave the next player a reply
    pub avoid_ending: bool,
    /// Also avoid words that let the next player end the game
    pub smart: bool,
}

impl SelectionPolicy {
    /// Keep the game going
    #[must_use]
    pub const fn avoid_ending(smart: bool) -> Self {
        Self {
            avoid_ending: true,
            smart,
        }
    }

    /// Try to eliminate the next player
    #[must_use]
    pub const fn seek_ending(smart: bool) -> Self {
        Self {
            avoid_ending: false,
            smart,
        }
    }
}

/// Candidates for one prefix, split by what they do to the next player
///
/// - `safe`: not endgame words, the next player can reply
/// - `killers`: endgame words, the next player cannot reply
/// - `smart`: safe words after which the next player has no endgame word
///   to play back (only computed when asked for)
#[derive(Debug, Default)]
pub struct CandidateTiers<'a> {
    pub all: Vec<&'a Word>,
    pub safe: Vec<&'a Word>,
    pub killers: Vec<&'a Word>,
    pub smart: Vec<&'a Word>,
}

impl<'a> CandidateTiers<'a> {
    /// Classify `candidates` against the dictionary's endgame words
    #[must_use]
    pub fn classify(candidates: Vec<&'a Word>, dictionary: &Dictionary, smart: bool) -> Self {
        let (killers, safe): (Vec<&Word>, Vec<&Word>) = candidates
            .iter()
            .copied()
            .partition(|w| dictionary.is_endgame(w.text()));

        let smart = if smart {
            safe.par_iter()
                .copied()
                .filter(|w| !dictionary.gifts_endgame(w))
                .collect()
        } else {
            Vec::new()
        };

        Self {
            all: candidates,
            safe,
            killers,
            smart,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }

    /// Pick a word for `policy`, breaking ties with `rng`
    ///
    /// Avoiding the ending tries smart, then safe, then anything. Seeking it
    /// tries killers, then smart, then anything. The smart tier is only
    /// consulted when `policy.smart` is set.
    pub fn pick(&self, policy: SelectionPolicy, rng: &mut GameRng) -> Option<&'a Word> {
        let smart: &[&'a Word] = if policy.smart { &self.smart } else { &[] };

        let tiers: [&[&'a Word]; 3] = if policy.avoid_ending {
            [smart, &self.safe, &self.all]
        } else {
            [&self.killers, smart, &self.all]
        };

        tiers
            .into_iter()
            .find(|tier| !tier.is_empty())
            .and_then(|tier| rng.choose(tier))
            .copied()
    }
}
