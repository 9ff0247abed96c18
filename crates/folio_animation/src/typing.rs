//! Typing text state machine
//!
//! Cycles forever through a list of phrases: type one character at a time,
//! pause, delete one character at a time, pause, move to the next phrase.
//!
//! ```text
//!            type_interval                  delete_interval
//!           ┌────────────┐                  ┌────────────┐
//!           ▼            │                  ▼            │
//!      Typing(i) ────────┘   i == len   Deleting(i) ─────┘
//!           │  ───────────────────────────▶ │
//!           │     pause_after_complete      │ i == 0
//!           ◀───────────────────────────────┘
//!              pause_between_phrases, next phrase
//! ```
//!
//! The machine is a plain value. Each [`step`](TypingMachine::step) performs
//! one transition and reports the text to display and how long the driver
//! should wait before the next step.

use folio_core::Millis;
use serde::{Deserialize, Serialize};

/// Current phase and character index into the active phrase
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TypingPhase {
    /// `i` characters are displayed and the next step appends one
    Typing(usize),
    /// `i` characters are displayed and the next step removes one
    Deleting(usize),
}

/// Delays between steps, in milliseconds
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypingTimings {
    pub type_interval: Millis,
    pub delete_interval: Millis,
    pub pause_after_complete: Millis,
    pub pause_between_phrases: Millis,
    /// Delay before the very first step
    pub start_delay: Millis,
}

impl Default for TypingTimings {
    fn default() -> Self {
        Self {
            type_interval: 100,
            delete_interval: 50,
            pause_after_complete: 2000,
            pause_between_phrases: 500,
            start_delay: 1000,
        }
    }
}

/// Result of one transition
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypingStep {
    /// Text to display after this step
    pub text: String,
    /// Delay until the next step
    pub next_in: Millis,
}

/// Phrase-cycling typing effect
#[derive(Clone, Debug)]
pub struct TypingMachine {
    phrases: Vec<Vec<char>>,
    phrase: usize,
    phase: TypingPhase,
    timings: TypingTimings,
}

impl TypingMachine {
    /// Create a machine starting at `Typing(0)` on the first phrase
    ///
    /// Empty phrases are skipped. Returns `None` if nothing is left to type.
    pub fn new<I, S>(phrases: I, timings: TypingTimings) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let phrases: Vec<Vec<char>> = phrases
            .into_iter()
            .map(|p| p.as_ref().chars().collect::<Vec<_>>())
            .filter(|p| !p.is_empty())
            .collect();

        if phrases.is_empty() {
            return None;
        }

        Some(Self {
            phrases,
            phrase: 0,
            phase: TypingPhase::Typing(0),
            timings,
        })
    }

    pub fn phase(&self) -> TypingPhase {
        self.phase
    }

    pub fn phrase_index(&self) -> usize {
        self.phrase
    }

    pub fn phrase_count(&self) -> usize {
        self.phrases.len()
    }

    pub fn timings(&self) -> &TypingTimings {
        &self.timings
    }

    /// Text currently displayed
    pub fn text(&self) -> String {
        let shown = match self.phase {
            TypingPhase::Typing(i) | TypingPhase::Deleting(i) => i,
        };
        self.phrases[self.phrase][..shown].iter().collect()
    }

    /// Perform one transition
    ///
    /// The returned delay is never below 1 ms, so a driver rescheduling on
    /// every step always moves time forward.
    pub fn step(&mut self) -> TypingStep {
        let len = self.phrases[self.phrase].len();

        let next_in = match self.phase {
            TypingPhase::Typing(i) => {
                let shown = (i + 1).min(len);
                if shown == len {
                    self.phase = TypingPhase::Deleting(len);
                    self.timings.pause_after_complete
                } else {
                    self.phase = TypingPhase::Typing(shown);
                    self.timings.type_interval
                }
            }
            TypingPhase::Deleting(i) => {
                let shown = i.saturating_sub(1);
                if shown == 0 {
                    // Deleting(0) displays the same text as Typing(0) of the
                    // old phrase; switch phrases before publishing it.
                    self.phrase = (self.phrase + 1) % self.phrases.len();
                    self.phase = TypingPhase::Typing(0);
                    tracing::trace!(phrase = self.phrase, "typing: next phrase");
                    self.timings.pause_between_phrases
                } else {
                    self.phase = TypingPhase::Deleting(shown);
                    self.timings.delete_interval
                }
            }
        };

        TypingStep {
            text: self.text(),
            next_in: next_in.max(1),
        }
    }
}
