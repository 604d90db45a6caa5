//! Line-based player interaction
//!
//! Everything a game says or asks goes through a `Console`, so the same game
//! loop runs on a terminal or on a scripted conversation.

use std::io::{self, BufRead, Write};

/// A line-oriented prompt/response channel
pub trait Console {
    /// Show `prompt` and read one line, trimmed
    ///
    /// Returns `Ok(None)` when the input is closed.
    ///
    /// # Errors
    /// Returns an I/O error if reading or writing fails.
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>>;

    /// Show a message
    fn say(&mut self, message: &str);
}

/// Console over the process's standard input and output
#[derive(Debug, Default)]
pub struct StdConsole;

impl Console for StdConsole {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        print!("{prompt}: ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().lock().read_line(&mut input)? == 0 {
            return Ok(None);
        }
        Ok(Some(input.trim().to_string()))
    }

    fn say(&mut self, message: &str) {
        println!("{message}");
    }
}

/// Console replaying canned answers and recording everything shown
#[cfg(test)]
#[derive(Debug, Default)]
pub struct ScriptedConsole {
    answers: std::collections::VecDeque<String>,
    pub transcript: Vec<String>,
}

#[cfg(test)]
impl ScriptedConsole {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            transcript: Vec::new(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.answers.len()
    }

    pub fn shown(&self, needle: &str) -> bool {
        self.transcript.iter().any(|line| line.contains(needle))
    }
}

#[cfg(test)]
impl Console for ScriptedConsole {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        self.transcript.push(prompt.to_string());
        Ok(self.answers.pop_front().map(|a| a.trim().to_string()))
    }

    fn say(&mut self, message: &str) {
        self.transcript.push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_console_replays_answers_in_order() {
        let mut console = ScriptedConsole::new(["first", " second "]);

        assert_eq!(console.read_line("a").unwrap().as_deref(), Some("first"));
        assert_eq!(console.read_line("b").unwrap().as_deref(), Some("second"));
        assert_eq!(console.read_line("c").unwrap(), None);
        assert_eq!(console.remaining(), 0);
    }

    #[test]
    fn scripted_console_records_transcript() {
        let mut console = ScriptedConsole::new(Vec::<String>::new());
        console.say("hello");
        let _ = console.read_line("name?");

        assert_eq!(console.transcript, vec!["hello", "name?"]);
        assert!(console.shown("hell"));
    }
}
