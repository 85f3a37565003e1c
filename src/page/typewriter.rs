//! Typewriter effect: types a phrase, holds it, deletes it, moves to the next.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// Phrases and timings for the typewriter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypewriterConfig {
    /// Phrases to cycle through. Empty phrases are skipped.
    pub phrases: Vec<String>,
    /// Delay after typing a character, in milliseconds.
    pub type_delay_ms: u64,
    /// Delay after deleting a character.
    pub delete_delay_ms: u64,
    /// How long a fully typed phrase stays on screen.
    pub hold_delay_ms: u64,
    /// Pause on the empty line before the next phrase.
    pub pause_delay_ms: u64,
}

impl Default for TypewriterConfig {
    fn default() -> Self {
        Self {
            phrases: vec![
                "Full-Stack Developer".into(),
                "UI/UX Designer".into(),
                "Problem Solver".into(),
                "Creative Thinker".into(),
            ],
            type_delay_ms: 100,
            delete_delay_ms: 50,
            hold_delay_ms: 2000,
            pause_delay_ms: 500,
        }
    }
}

impl TypewriterConfig {
    /// At least one phrase must have text.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.phrases.iter().all(|p| p.is_empty()) {
            return Err(ConfigError::invalid(
                "typewriter.phrases",
                "needs at least one non-empty phrase",
            ));
        }
        Ok(())
    }
}

/// What to show after a tick, and when to tick again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypewriterStep {
    /// Text to display.
    pub text: String,
    /// Time until the next tick.
    pub delay: Duration,
}

/// Typewriter state machine.
#[derive(Debug, Clone)]
pub struct Typewriter {
    phrases: Vec<Vec<char>>,
    phrase_index: usize,
    char_index: usize,
    deleting: bool,
    config: TypewriterConfig,
}

impl Typewriter {
    /// Create a typewriter at the start of the first phrase.
    /// Returns `None` if there is nothing to type.
    pub fn new(config: TypewriterConfig) -> Option<Self> {
        let phrases: Vec<Vec<char>> = config
            .phrases
            .iter()
            .filter(|p| !p.is_empty())
            .map(|p| p.chars().collect())
            .collect();

        if phrases.is_empty() {
            return None;
        }

        Some(Self {
            phrases,
            phrase_index: 0,
            char_index: 0,
            deleting: false,
            config,
        })
    }

    /// Index of the phrase being typed or deleted.
    #[inline]
    pub fn phrase_index(&self) -> usize {
        self.phrase_index
    }

    /// Whether the current phrase is being deleted.
    #[inline]
    pub fn is_deleting(&self) -> bool {
        self.deleting
    }

    /// Type or delete one character.
    pub fn tick(&mut self) -> TypewriterStep {
        let phrase = &self.phrases[self.phrase_index];

        let mut delay_ms = if self.deleting {
            self.char_index = self.char_index.saturating_sub(1);
            self.config.delete_delay_ms
        } else {
            self.char_index = (self.char_index + 1).min(phrase.len());
            self.config.type_delay_ms
        };

        let text: String = phrase[..self.char_index].iter().collect();

        if !self.deleting && self.char_index == phrase.len() {
            delay_ms = self.config.hold_delay_ms;
            self.deleting = true;
        } else if self.deleting && self.char_index == 0 {
            delay_ms = self.config.pause_delay_ms;
            self.deleting = false;
            self.phrase_index = (self.phrase_index + 1) % self.phrases.len();
        }

        TypewriterStep {
            text,
            delay: Duration::from_millis(delay_ms),
        }
    }
}
