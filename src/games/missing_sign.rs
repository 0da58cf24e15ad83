//! MissingSign - pick the operator that makes `a ? b = c` true
//!
//! Instances where a second operator also fits (`2 ? 2 = 4`) are rejected,
//! so exactly one sign is correct.

use serde::{Deserialize, Serialize};

use super::arith::Op;
use super::calculate::build_simple;
use super::difficulty::capped;
use super::{GameId, PuzzleGenerator, Response};
use crate::consts::MAX_GENERATION_ATTEMPTS;
use crate::rng::GameRng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MissingSignParams {
    pub level: u32,
    pub max_operand: i64,
}

pub fn params(signal: u32) -> MissingSignParams {
    let level = signal / 3;
    MissingSignParams {
        level,
        max_operand: i64::from(capped(10, level.saturating_mul(2), 50)),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingSignPuzzle {
    pub a: i64,
    pub b: i64,
    pub result: i64,
    /// The hidden operator
    pub answer: Op,
}

impl MissingSignPuzzle {
    /// Operators that satisfy the displayed equation
    pub fn fitting_ops(&self) -> Vec<Op> {
        Op::ALL
            .into_iter()
            .filter(|op| op.apply(self.a, self.b) == Some(self.result))
            .collect()
    }

    fn candidate(max: i64, rng: &mut GameRng) -> Self {
        let op = rng.pick(&Op::ALL).copied().unwrap_or(Op::Add);
        let (a, b, result) = build_simple(op, max, rng);
        Self {
            a,
            b,
            result,
            answer: op,
        }
    }

    fn fallback() -> Self {
        log::warn!("MissingSign: no unique instance found, using 1 + 1 = 2");
        Self {
            a: 1,
            b: 1,
            result: 2,
            answer: Op::Add,
        }
    }
}

impl std::fmt::Display for MissingSignPuzzle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ? {} = {}", self.a, self.b, self.result)
    }
}

impl PuzzleGenerator for MissingSignPuzzle {
    const GAME: GameId = GameId::MissingSign;

    fn generate(difficulty: u32, rng: &mut GameRng) -> Self {
        let max = params(difficulty).max_operand;
        (0..MAX_GENERATION_ATTEMPTS)
            .map(|_| Self::candidate(max, rng))
            .find(|p| p.fitting_ops().len() == 1)
            .unwrap_or_else(Self::fallback)
    }

    fn check(&self, response: &Response) -> bool {
        matches!(response, Response::Operator(op) if *op == self.answer)
    }

    fn solution(&self) -> Response {
        Response::Operator(self.answer)
    }
}
