//! The playable vocabulary and its session state

use super::source::{SourceError, WordSource};
use crate::core::{GameRng, LINK_LEN, Word, clean};
use crate::selector::{CandidateTiers, SelectionPolicy};
use indicatif::{ProgressBar, ProgressStyle};
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Annotation agent used for entries added during play
pub const DEFAULT_AGENT: &str = "fazan";

/// Entry count above which building shows a progress bar
const PROGRESS_THRESHOLD: usize = 10_000;

/// Errors raised by the dictionary store
#[derive(Debug, Error)]
pub enum DictionaryError {
    #[error("failed to load dictionary: {0}")]
    Load(#[source] SourceError),
    #[error("failed to save dictionary: {0}")]
    Persist(#[source] SourceError),
    #[error("dictionary has unsaved changes but no file to save them to")]
    NoSavePath,
}

/// Words derived from the source in one build
///
/// Rebuilding creates a fresh `Vocabulary` and swaps it in whole, so lookups
/// never see a half-built state.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct Vocabulary {
    words: FxHashSet<Word>,
    endgame: FxHashSet<Word>,
    by_prefix: FxHashMap<String, BTreeSet<Word>>,
}

impl Vocabulary {
    fn build(source: &WordSource) -> Self {
        let entries = source.entries();
        let progress = build_progress(entries.len());

        let mut words = FxHashSet::default();
        let mut starts: FxHashSet<String> = FxHashSet::default();

        for entry in entries {
            for raw in entry.active_variations() {
                if let Ok(word) = Word::new(clean(raw)) {
                    starts.insert(word.prefix().to_string());
                    words.insert(word);
                }
            }
            progress.inc(1);
        }
        progress.finish_and_clear();

        let endgame: FxHashSet<Word> = words
            .iter()
            .filter(|w| !starts.contains(w.suffix()))
            .cloned()
            .collect();

        let mut by_prefix: FxHashMap<String, BTreeSet<Word>> = FxHashMap::default();
        for word in &words {
            by_prefix
                .entry(word.prefix().to_string())
                .or_default()
                .insert(word.clone());
        }

        log::info!(
            "built vocabulary: {} words, {} endgame words from {} entries",
            words.len(),
            endgame.len(),
            entries.len()
        );

        Self {
            words,
            endgame,
            by_prefix,
        }
    }

    fn discard(&mut self, word: &str) -> bool {
        let removed = self.words.remove(word);
        self.endgame.remove(word);

        if let (true, Some(prefix)) = (removed, link_key(word)) {
            if let Some(bucket) = self.by_prefix.get_mut(prefix) {
                bucket.remove(word);
                if bucket.is_empty() {
                    self.by_prefix.remove(prefix);
                }
            }
        }
        removed
    }
}

/// The two-letter index key for a prefix, if it is long enough
fn link_key(prefix: &str) -> Option<&str> {
    prefix.get(..LINK_LEN)
}

fn build_progress(len: usize) -> ProgressBar {
    if len < PROGRESS_THRESHOLD {
        return ProgressBar::hidden();
    }

    let progress = ProgressBar::new(len as u64);
    if let Ok(style) =
        ProgressStyle::default_bar().template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} entries")
    {
        progress.set_style(style.progress_chars("█▓▒░"));
    }
    progress
}

/// The game dictionary
///
/// Owns the word-list document, the playable vocabulary derived from it, and
/// the words used up in the current session. Mutations that must reach the
/// file (additions, permanent removals) are kept pending until [`persist`].
///
/// [`persist`]: Dictionary::persist
#[derive(Debug)]
pub struct Dictionary {
    source: WordSource,
    save_path: Option<PathBuf>,
    agent: String,
    vocabulary: Vocabulary,
    played: FxHashSet<String>,
    pending_removals: Vec<String>,
    source_changed: bool,
}

impl Dictionary {
    /// Load a dictionary from a word-list file, saving back to the same file
    ///
    /// # Errors
    /// Returns `DictionaryError::Load` if the file is missing or malformed.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, DictionaryError> {
        let path = path.as_ref();
        let source = WordSource::read(path).map_err(DictionaryError::Load)?;
        Ok(Self::from_source(source).with_save_path(path))
    }

    /// Build a dictionary from an in-memory word list
    #[must_use]
    pub fn from_source(source: WordSource) -> Self {
        log::info!("building dictionary");
        let vocabulary = Vocabulary::build(&source);

        Self {
            source,
            save_path: None,
            agent: DEFAULT_AGENT.to_string(),
            vocabulary,
            played: FxHashSet::default(),
            pending_removals: Vec::new(),
            source_changed: false,
        }
    }

    /// Set the file [`persist`](Dictionary::persist) writes to
    #[must_use]
    pub fn with_save_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.save_path = Some(path.into());
        self
    }

    /// Set the name recorded in the annotation of added entries
    #[must_use]
    pub fn with_agent(mut self, agent: impl Into<String>) -> Self {
        self.agent = agent.into();
        self
    }

    /// The underlying word-list document
    #[must_use]
    pub const fn source(&self) -> &WordSource {
        &self.source
    }

    /// Number of currently playable words
    #[must_use]
    pub fn len(&self) -> usize {
        self.vocabulary.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vocabulary.words.is_empty()
    }

    /// Number of currently playable endgame words
    #[must_use]
    pub fn endgame_len(&self) -> usize {
        self.vocabulary.endgame.len()
    }

    /// Currently playable words, in no particular order
    pub fn words(&self) -> impl Iterator<Item = &Word> {
        self.vocabulary.words.iter()
    }

    /// Currently playable endgame words, in no particular order
    pub fn endgame_words(&self) -> impl Iterator<Item = &Word> {
        self.vocabulary.endgame.iter()
    }

    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        self.vocabulary.words.contains(word)
    }

    /// Whether `word` is playable and leaves the next player no continuation
    #[must_use]
    pub fn is_endgame(&self, word: &str) -> bool {
        self.vocabulary.endgame.contains(word)
    }

    /// Whether `word` has been used up in this session
    #[must_use]
    pub fn is_played(&self, word: &str) -> bool {
        self.played.contains(word)
    }

    /// Whether any playable word starts with `prefix`
    #[must_use]
    pub fn has_prefix(&self, prefix: &str) -> bool {
        if let Some(key) = link_key(prefix) {
            self.vocabulary
                .by_prefix
                .get(key)
                .is_some_and(|bucket| bucket.iter().any(|w| w.text().starts_with(prefix)))
        } else {
            self.vocabulary
                .by_prefix
                .keys()
                .any(|key| key.starts_with(prefix))
        }
    }

    /// Whether some endgame word starts where `word` ends
    ///
    /// Playing such a word hands the next player a game-ending reply.
    #[must_use]
    pub fn gifts_endgame(&self, word: &Word) -> bool {
        self.vocabulary
            .by_prefix
            .get(word.suffix())
            .is_some_and(|bucket| bucket.iter().any(|w| self.vocabulary.endgame.contains(w)))
    }

    /// Whether an accepted change is waiting to be written
    #[must_use]
    pub fn has_pending_changes(&self) -> bool {
        self.source_changed || !self.pending_removals.is_empty()
    }

    /// Playable words starting with `prefix`, in alphabetical order
    #[must_use]
    pub fn candidates(&self, prefix: &str) -> Vec<&Word> {
        if let Some(key) = link_key(prefix) {
            self.vocabulary
                .by_prefix
                .get(key)
                .map(|bucket| {
                    bucket
                        .iter()
                        .filter(|w| w.text().starts_with(prefix))
                        .collect()
                })
                .unwrap_or_default()
        } else {
            let mut keys: Vec<&String> = self
                .vocabulary
                .by_prefix
                .keys()
                .filter(|key| key.starts_with(prefix))
                .collect();
            keys.sort_unstable();
            keys.into_iter()
                .flat_map(|key| self.vocabulary.by_prefix[key].iter())
                .collect()
        }
    }

    /// Pick a word starting with `prefix` according to `policy`
    ///
    /// Returns `None` only when no playable word starts with `prefix`.
    ///
    /// # Examples
    /// ```
    /// use fazan::core::GameRng;
    /// use fazan::dictionary::{Dictionary, WordSource};
    /// use fazan::selector::SelectionPolicy;
    ///
    /// let source = WordSource::parse(
    ///     r#"<Root>
    ///         <Entry id="1"><Description>casa</Description></Entry>
    ///         <Entry id="2"><Description>sare</Description></Entry>
    ///         <Entry id="3"><Description>cadou</Description></Entry>
    ///     </Root>"#,
    /// ).unwrap();
    /// let dictionary = Dictionary::from_source(source);
    /// let mut rng = GameRng::new(1);
    ///
    /// // "cadou" ends in "ou", which no word starts with
    /// let word = dictionary.get_word("ca", SelectionPolicy::avoid_ending(false), &mut rng);
    /// assert_eq!(word.unwrap().text(), "casa");
    /// let word = dictionary.get_word("ca", SelectionPolicy::seek_ending(false), &mut rng);
    /// assert_eq!(word.unwrap().text(), "cadou");
    /// assert!(dictionary.get_word("zz", SelectionPolicy::seek_ending(false), &mut rng).is_none());
    /// ```
    pub fn get_word(
        &self,
        prefix: &str,
        policy: SelectionPolicy,
        rng: &mut GameRng,
    ) -> Option<Word> {
        let tiers = CandidateTiers::classify(self.candidates(prefix), self, policy.smart);
        tiers.pick(policy, rng).cloned()
    }

    /// A random opening prefix
    ///
    /// Draws a letter uniformly, then one of the two-letter prefixes starting
    /// with it that still has a non-endgame word. If that letter has none, the
    /// draw widens to every such prefix, then to any playable prefix, and
    /// finally to the bare letter when the vocabulary is empty.
    ///
    /// This is not a plain uniform letter draw: the result is biased toward
    /// prefixes a player can open with.
    pub fn opening_prefix(&self, rng: &mut GameRng) -> String {
        let letter = rng.letter();

        let mut openable: Vec<&str> = self
            .vocabulary
            .by_prefix
            .iter()
            .filter(|(_, bucket)| bucket.iter().any(|w| !self.vocabulary.endgame.contains(w)))
            .map(|(key, _)| key.as_str())
            .collect();
        openable.sort_unstable();

        let same_letter: Vec<&str> = openable
            .iter()
            .copied()
            .filter(|key| key.starts_with(letter))
            .collect();

        let mut any: Vec<&str> = self
            .vocabulary
            .by_prefix
            .keys()
            .map(String::as_str)
            .collect();
        any.sort_unstable();

        [same_letter, openable, any]
            .iter()
            .find_map(|pool| rng.choose(pool).map(|s| (*s).to_string()))
            .unwrap_or_else(|| letter.to_string())
    }

    /// Register newly coined words
    ///
    /// Each word gets a new source entry (pending until saved) and is marked as
    /// played, so it is used once by the player who coined it. It becomes part
    /// of the vocabulary only at the next rebuild.
    pub fn add_words<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let timestamp = time::OffsetDateTime::now_utc().unix_timestamp();

        for word in words {
            let word = word.as_ref();
            let id = self.source.append(word, &self.agent, timestamp);
            self.played.insert(word.to_string());
            self.source_changed = true;
            log::info!("adding '{word}' to dictionary as entry {id}");
        }
    }

    /// Take a word out of play for the rest of the session
    ///
    /// With `permanent`, the word is also queued for removal from the word
    /// list when the dictionary is next persisted.
    pub fn discard_word(&mut self, word: &str, permanent: bool) {
        self.played.insert(word.to_string());
        self.vocabulary.discard(word);

        if permanent && !self.pending_removals.iter().any(|w| w == word) {
            self.pending_removals.push(word.to_string());
            log::info!("removed '{word}' from game");
        }
    }

    /// Pseudo-delete every source variation matching one of `words`, then rebuild
    ///
    /// Removed variations keep their original text behind the removal marker.
    pub fn remove_words<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let targets: FxHashSet<String> = words
            .into_iter()
            .map(|w| w.as_ref().to_string())
            .collect();
        if targets.is_empty() {
            return;
        }

        for word in &targets {
            log::info!("removing '{word}'");
        }

        let matches: Vec<(usize, usize)> = self
            .source
            .entries()
            .iter()
            .enumerate()
            .flat_map(|(e, entry)| {
                entry
                    .variations
                    .iter()
                    .enumerate()
                    .filter(|(_, v)| v.is_active() && targets.contains(&clean(&v.text)))
                    .map(move |(v, _)| (e, v))
            })
            .collect();

        for (entry, variation) in matches {
            if self.source.mark_removed(entry, variation) {
                self.source_changed = true;
            }
        }

        self.rebuild();
    }

    /// Re-derive the vocabulary from the source
    ///
    /// Words played in this session stay out of play.
    pub fn rebuild(&mut self) {
        log::info!("rebuilding dictionary");
        let mut vocabulary = Vocabulary::build(&self.source);
        for word in &self.played {
            vocabulary.discard(word);
        }
        self.vocabulary = vocabulary;
    }

    /// Forget the current session and rebuild from the source
    pub fn start_session(&mut self) {
        self.played.clear();
        self.rebuild();
    }

    /// Write pending additions and removals back to the word list
    ///
    /// Queued permanent removals are applied first. Returns `Ok(false)` without
    /// touching the file when nothing is pending.
    ///
    /// # Errors
    /// Returns `DictionaryError::NoSavePath` when there is no file to write to,
    /// or `DictionaryError::Persist` when writing fails.
    pub fn persist(&mut self) -> Result<bool, DictionaryError> {
        if !self.has_pending_changes() {
            return Ok(false);
        }

        if !self.pending_removals.is_empty() {
            let removals = std::mem::take(&mut self.pending_removals);
            self.remove_words(removals);
        }

        let path = self.save_path.as_ref().ok_or(DictionaryError::NoSavePath)?;
        log::info!("saving dictionary to {}", path.display());
        self.source.write(path).map_err(DictionaryError::Persist)?;
        self.source_changed = false;
        Ok(true)
    }
}
