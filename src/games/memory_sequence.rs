//! MemorySequence - repeat a flashed sequence of switches

use serde::{Deserialize, Serialize};

use super::difficulty::capped;
use super::sequence::no_triple_sequence;
use super::{GameId, PuzzleGenerator, Response};
use crate::rng::GameRng;

/// Flash duration at signal 0 (ms)
const FLASH_START_MS: u32 = 500;
/// Flash duration never drops below this (ms)
const FLASH_MIN_MS: u32 = 300;
/// Flash speed-up per correct answer (ms)
const FLASH_STEP_MS: u32 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemorySequenceParams {
    pub switches: usize,
    pub length: usize,
    pub flash_ms: u32,
}

pub fn params(signal: u32) -> MemorySequenceParams {
    MemorySequenceParams {
        switches: capped(4, (signal / 3) / 2, 6) as usize,
        length: capped(3, signal.saturating_add(1) / 3, 8) as usize,
        flash_ms: FLASH_START_MS
            .saturating_sub(signal.saturating_mul(FLASH_STEP_MS))
            .max(FLASH_MIN_MS),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemorySequencePuzzle {
    /// Number of switches on the board
    pub switches: usize,
    /// Switch indices in flash order
    pub sequence: Vec<usize>,
    /// How long each switch stays lit (ms)
    pub flash_ms: u32,
}

impl PuzzleGenerator for MemorySequencePuzzle {
    const GAME: GameId = GameId::MemorySequence;

    fn generate(difficulty: u32, rng: &mut GameRng) -> Self {
        let p = params(difficulty);
        Self {
            switches: p.switches,
            sequence: no_triple_sequence(p.length, p.switches, rng),
            flash_ms: p.flash_ms,
        }
    }

    fn check(&self, response: &Response) -> bool {
        matches!(response, Response::Sequence(seq) if *seq == self.sequence)
    }

    fn solution(&self) -> Response {
        Response::Sequence(self.sequence.clone())
    }
}
