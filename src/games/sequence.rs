//! Shared helpers for the sequence-memory families
//!
//! Token sequences never contain three identical tokens in a row. Player
//! input is checked token by token so a wrong token ends the attempt at once.

use serde::{Deserialize, Serialize};

use crate::rng::GameRng;

/// Random token sequence over `alphabet` tokens with no triple repeats
pub fn no_triple_sequence(len: usize, alphabet: usize, rng: &mut GameRng) -> Vec<usize> {
    let mut seq: Vec<usize> = Vec::with_capacity(len);
    for _ in 0..len {
        let banned = match seq.as_slice() {
            [.., a, b] if a == b => Some(*b),
            _ => None,
        };
        let allowed: Vec<usize> = (0..alphabet).filter(|t| Some(*t) != banned).collect();
        let token = rng.pick(&allowed).copied().unwrap_or(0);
        seq.push(token);
    }
    seq
}

/// True if any token appears three times in a row
pub fn has_triple_repeat(seq: &[usize]) -> bool {
    seq.windows(3).any(|w| w[0] == w[1] && w[1] == w[2])
}

/// Result of one input step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Step {
    /// Token was right, more to come
    Continue,
    /// Token was right and completed the sequence
    Complete,
    /// Token was wrong; the attempt is over
    Wrong,
}

/// Incremental order checker for the presentation layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputTracker {
    expected: Vec<usize>,
    entered: Vec<usize>,
    failed: bool,
}

impl InputTracker {
    pub fn new(expected: Vec<usize>) -> Self {
        Self {
            expected,
            entered: Vec::new(),
            failed: false,
        }
    }

    /// Feed the next token. Once wrong or complete, further input stays in that state.
    pub fn push(&mut self, token: usize) -> Step {
        if self.failed {
            return Step::Wrong;
        }
        if self.is_complete() {
            return Step::Complete;
        }
        self.entered.push(token);
        if self.expected.get(self.entered.len() - 1) != Some(&token) {
            self.failed = true;
            return Step::Wrong;
        }
        if self.is_complete() {
            Step::Complete
        } else {
            Step::Continue
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.failed && self.entered.len() == self.expected.len()
    }

    /// Tokens entered so far (the response to submit)
    pub fn entered(&self) -> &[usize] {
        &self.entered
    }
}
