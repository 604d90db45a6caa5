//! Turn order, eliminations and the end of the game

use super::Console;
use crate::core::{GameRng, Word};
use crate::dictionary::{Dictionary, DictionaryError};
use crate::output::{banner, format_elimination, format_move, format_round, format_winner};
use crate::players::{Move, Player, Turn};

/// How a game ended
#[derive(Debug)]
pub struct GameOutcome {
    /// Last player standing; `None` when the game had no players
    pub winner: Option<String>,
    pub rounds: usize,
    /// Turns taken, forfeits included
    pub turns: usize,
    /// Result of writing dictionary changes back to disk
    pub persisted: Result<bool, DictionaryError>,
}

/// A game between an ordered list of players
///
/// Players take turns in list order. The first move, and the first move
/// after every elimination, starts from a random opening prefix; every other
/// move must start with the last two letters of the previous word.
#[derive(Debug)]
pub struct Game {
    players: Vec<Player>,
    rng: GameRng,
    round: usize,
    turns: usize,
}

impl Game {
    #[must_use]
    pub const fn new(players: Vec<Player>, rng: GameRng) -> Self {
        Self {
            players,
            rng,
            round: 0,
            turns: 0,
        }
    }

    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    fn remaining(&self) -> usize {
        self.players.iter().filter(|p| !p.is_eliminated()).count()
    }

    fn last_standing(&self) -> Option<String> {
        self.players
            .iter()
            .find(|p| !p.is_eliminated())
            .map(|p| p.name().to_string())
    }

    /// Play until one player is left, then save dictionary changes
    ///
    /// The dictionary starts a fresh session, so words used up by an earlier
    /// game are playable again. A failed save is logged and reported in the
    /// outcome; it does not change who won.
    pub fn play(&mut self, dictionary: &mut Dictionary, console: &mut dyn Console) -> GameOutcome {
        dictionary.start_session();
        console.say(&banner());

        let winner = self.run(dictionary, console);
        if let Some(name) = &winner {
            log::info!("{name} wins after {} turns", self.turns);
            console.say(&format_winner(name, self.round));
        }

        let persisted = dictionary.persist();
        match &persisted {
            Ok(true) => log::info!("dictionary changes saved"),
            Ok(false) => {}
            Err(e) => log::warn!("could not save dictionary changes: {e}"),
        }

        GameOutcome {
            winner,
            rounds: self.round,
            turns: self.turns,
            persisted,
        }
    }

    fn run(&mut self, dictionary: &mut Dictionary, console: &mut dyn Console) -> Option<String> {
        if self.remaining() < 2 {
            return self.last_standing();
        }

        self.round = 1;
        console.say(&format_round(self.round));

        let mut index = 0;
        let mut prefix = String::new();
        let mut previous: Option<Word> = None;

        loop {
            let player = &self.players[index];

            if !player.is_eliminated() {
                let opening = previous.is_none();
                if opening {
                    prefix = dictionary.opening_prefix(&mut self.rng);
                    log::debug!("opening prefix '{prefix}' for {}", player.name());
                }

                let action = player.play(&mut Turn {
                    prefix: &prefix,
                    opening,
                    previous: previous.as_ref(),
                    dictionary: &mut *dictionary,
                    console: &mut *console,
                    rng: &mut self.rng,
                });
                self.turns += 1;

                match action {
                    Move::Word(word) => {
                        log::info!("{} played '{word}'", player.name());
                        console.say(&format_move(player.name(), &word));
                        dictionary.discard_word(word.text(), false);
                        prefix = word.suffix().to_string();
                        previous = Some(word);
                    }
                    Move::Forfeit => {
                        let name = player.name().to_string();
                        self.players[index].eliminate();

                        let remaining = self.remaining();
                        log::info!("{name} is out, {remaining} left");
                        console.say(&format_elimination(&name, remaining));

                        if remaining < 2 {
                            return self.last_standing();
                        }
                        previous = None;
                    }
                }
            }

            index = (index + 1) % self.players.len();
            if index == 0 {
                self.round += 1;
                console.say(&format_round(self.round));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::WordSource;
    use crate::game::console::ScriptedConsole;
    use crate::players::ComputerStrategy;

    fn dictionary_of<S: AsRef<str>>(words: &[S]) -> Dictionary {
        let body: String = words
            .iter()
            .enumerate()
            .map(|(i, w)| {
                format!(
                    "<Entry id=\"{i}\"><Description>{}</Description></Entry>",
                    w.as_ref()
                )
            })
            .collect();
        Dictionary::from_source(WordSource::parse(&format!("<Root>{body}</Root>")).unwrap())
    }

    /// Every opening is some "xxko"; the only reply to "ko" is "kolo", which
    /// ends the game.
    fn chain_dictionary() -> Dictionary {
        let mut words: Vec<String> = ('a'..='z').map(|c| format!("{c}{c}ko")).collect();
        words.push("kolo".to_string());
        dictionary_of(&words)
    }

    fn computer(name: &str, level: u8) -> Player {
        Player::computer(name, ComputerStrategy::new(level))
    }

    #[test]
    fn second_player_ends_the_game_between_two_computers() {
        for seed in 0..20 {
            let mut dictionary = chain_dictionary();
            let mut console = ScriptedConsole::default();
            let players = vec![computer("A", 3), computer("B", 8)];
            let mut game = Game::new(players, GameRng::new(seed));

            let outcome = game.play(&mut dictionary, &mut console);

            assert_eq!(outcome.winner.as_deref(), Some("B"), "seed {seed}");
            assert_eq!(outcome.turns, 3);
            assert_eq!(outcome.rounds, 2);
            assert!(matches!(outcome.persisted, Ok(false)));
            assert!(dictionary.is_played("kolo"));
            assert!(game.players()[0].is_eliminated());
        }
    }

    #[test]
    fn play_resumes_with_an_opening_after_elimination() {
        colored::control::set_override(false);
        for seed in 0..20 {
            let mut dictionary = chain_dictionary();
            let mut console = ScriptedConsole::default();
            let players = vec![computer("A", 2), computer("B", 5), computer("C", 9)];
            let mut game = Game::new(players, GameRng::new(seed));

            let outcome = game.play(&mut dictionary, &mut console);

            assert_eq!(outcome.winner.as_deref(), Some("A"), "seed {seed}");
            assert_eq!(outcome.turns, 5);
            assert_eq!(outcome.rounds, 2);
            assert!(console.shown("C is out!"));
            assert!(console.shown("(1 left)"));
        }
    }

    #[test]
    fn reused_dictionary_starts_each_game_fresh() {
        let mut dictionary = chain_dictionary();
        let mut winners = Vec::new();

        for _ in 0..2 {
            let mut console = ScriptedConsole::default();
            let players = vec![computer("A", 3), computer("B", 8)];
            let outcome = Game::new(players, GameRng::new(1)).play(&mut dictionary, &mut console);
            winners.push((outcome.winner, outcome.turns));
        }

        assert_eq!(winners[0], (Some("B".to_string()), 3));
        assert_eq!(winners[0], winners[1]);
    }

    #[test]
    fn single_player_wins_without_playing() {
        let mut dictionary = chain_dictionary();
        let mut console = ScriptedConsole::default();
        let mut game = Game::new(vec![Player::human("Ana")], GameRng::new(1));

        let outcome = game.play(&mut dictionary, &mut console);

        assert_eq!(outcome.winner.as_deref(), Some("Ana"));
        assert_eq!(outcome.turns, 0);
        assert_eq!(console.remaining(), 0);
    }

    #[test]
    fn empty_game_has_no_winner() {
        let mut dictionary = chain_dictionary();
        let mut console = ScriptedConsole::default();
        let outcome = Game::new(Vec::new(), GameRng::new(1)).play(&mut dictionary, &mut console);

        assert!(outcome.winner.is_none());
    }

    #[test]
    fn humans_play_and_coined_words_are_saved() {
        colored::control::set_override(false);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("words.xml");

        // "sare" ends the game, so the only opening prefix is "ca"
        let mut dictionary = dictionary_of(&["casa", "sare"]).with_save_path(&path);
        let mut console = ScriptedConsole::new(["casa", "sac", "y", "qq"]);
        let players = vec![Player::human("Ana"), Player::human("Ion")];

        let outcome = Game::new(players, GameRng::new(4)).play(&mut dictionary, &mut console);

        assert_eq!(outcome.winner.as_deref(), Some("Ion"));
        assert!(matches!(outcome.persisted, Ok(true)));
        assert!(console.shown("Ana, enter an opening word starting with 'CA'"));
        assert!(console.shown("Ion, enter a word starting with 'SA'"));
        assert!(console.shown("Ana, enter a word starting with 'AC'"));
        assert!(console.shown("Ion wins"));

        let saved = std::fs::read_to_string(&path).unwrap();
        assert!(saved.contains("sac"));
        assert!(saved.contains("casa"));
    }
}
