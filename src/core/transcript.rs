use super::interpreter::{interpret_at, Reply};
use chrono::{DateTime, Local, TimeZone};
use std::fmt::Display;

pub const DEFAULT_WELCOME: &str = "Welcome to the Terminal App!";
pub const PROMPT: &str = "$ ";

/// Chronological scrollback. Display order is insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript {
    lines: Vec<String>,
}

impl Transcript {
    pub fn new(welcome: impl Into<String>) -> Self {
        Self {
            lines: vec![welcome.into()],
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    fn reset(&mut self) {
        self.lines.clear();
    }
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new(DEFAULT_WELCOME)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    transcript: Transcript,
    input: String,
}

impl Session {
    pub fn new(welcome: impl Into<String>) -> Self {
        Self {
            transcript: Transcript::new(welcome),
            input: String::new(),
        }
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, text: impl Into<String>) -> bool {
        let text = text.into();
        if text == self.input {
            return false;
        }
        self.input = text;
        true
    }

    pub fn insert_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        self.input.push(ch);
        true
    }

    pub fn backspace(&mut self) -> bool {
        self.input.pop().is_some()
    }

    pub fn submit(&mut self) -> Reply {
        self.submit_at(&Local::now())
    }

    /// Runs the buffered line and appends `"$ <raw>"` plus the reply.
    ///
    /// A `clear` resets the transcript first and still appends both lines,
    /// so the visible result is `["$ clear", ""]`.
    pub fn submit_at<Tz>(&mut self, now: &DateTime<Tz>) -> Reply
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let raw = std::mem::take(&mut self.input);
        let reply = interpret_at(&raw, now);
        if reply.clears_transcript() {
            self.transcript.reset();
        }
        self.transcript.push(format!("{PROMPT}{raw}"));
        self.transcript.push(reply.text());
        reply
    }
}
