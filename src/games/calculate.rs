//! Calculate - solve a short equation with one hidden number
//!
//! Two forms:
//! - simple `a op b = c` with one of the three values hidden
//! - complex `(a op1 b) op2 ? = c`, unlocked at level 3 on odd signals
//!
//! Equations are built back to front from the result so every hidden value
//! is a unique integer.

use serde::{Deserialize, Serialize};

use super::arith::Op;
use super::difficulty::{capped, scaled};
use super::{GameId, PuzzleGenerator, Response};
use crate::rng::GameRng;

/// Largest operand for `×` and `÷` factors
const TABLE_MAX: i64 = 12;
/// Level at which the complex form unlocks
const COMPLEX_LEVEL: u32 = 3;

/// Structural parameters for a difficulty signal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalculateParams {
    pub level: u32,
    pub max_operand: i64,
    pub complex: bool,
}

pub fn params(signal: u32) -> CalculateParams {
    let level = scaled(signal, 2, 7);
    CalculateParams {
        level,
        max_operand: i64::from(capped(10, level.saturating_mul(3), 99)),
        complex: level >= COMPLEX_LEVEL && signal % 2 == 1,
    }
}

/// Which value of a simple equation is hidden
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Hidden {
    Left,
    Right,
    Result,
}

/// Displayed equation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Equation {
    /// `a op b = result`
    Simple {
        a: i64,
        op: Op,
        b: i64,
        result: i64,
        hidden: Hidden,
    },
    /// `(a op1 b) op2 ? = result`
    Complex {
        a: i64,
        op1: Op,
        b: i64,
        op2: Op,
        result: i64,
    },
}

impl Equation {
    /// Substitute `value` for the hidden slot and test the equation
    pub fn holds_with(&self, value: i64) -> bool {
        match *self {
            Equation::Simple {
                a,
                op,
                b,
                result,
                hidden,
            } => {
                let (a, b, result) = match hidden {
                    Hidden::Left => (value, b, result),
                    Hidden::Right => (a, value, result),
                    Hidden::Result => (a, b, value),
                };
                op.apply(a, b) == Some(result)
            }
            Equation::Complex {
                a,
                op1,
                b,
                op2,
                result,
            } => op1
                .apply(a, b)
                .and_then(|inner| op2.apply(inner, value))
                .is_some_and(|v| v == result),
        }
    }
}

impl std::fmt::Display for Equation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            Equation::Simple {
                a,
                op,
                b,
                result,
                hidden,
            } => {
                let show = |v: i64, slot: Hidden| {
                    if slot == hidden {
                        "?".to_string()
                    } else {
                        v.to_string()
                    }
                };
                write!(
                    f,
                    "{} {} {} = {}",
                    show(a, Hidden::Left),
                    op,
                    show(b, Hidden::Right),
                    show(result, Hidden::Result)
                )
            }
            Equation::Complex {
                a,
                op1,
                b,
                op2,
                result,
            } => write!(f, "({a} {op1} {b}) {op2} ? = {result}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculatePuzzle {
    pub equation: Equation,
    /// The hidden value
    pub answer: i64,
}

/// `(left, right, result)` for `left op right = result`, all operands >= 1
pub(super) fn build_simple(op: Op, max: i64, rng: &mut GameRng) -> (i64, i64, i64) {
    match op {
        Op::Add => {
            let a = rng.int(1, max);
            let b = rng.int(1, max);
            (a, b, a + b)
        }
        Op::Sub => {
            let c = rng.int(1, max);
            let b = rng.int(1, max);
            (c + b, b, c)
        }
        Op::Mul => {
            let top = max.min(TABLE_MAX);
            let a = rng.int(1, top);
            let b = rng.int(1, top);
            (a, b, a * b)
        }
        Op::Div => {
            let divisor = rng.int(1, TABLE_MAX);
            let quotient = rng.int(1, TABLE_MAX);
            (divisor * quotient, divisor, quotient)
        }
    }
}

/// `(inner, hidden, result)` for `inner op2 hidden = result` with `inner >= 1`
fn build_outer(op2: Op, max: i64, rng: &mut GameRng) -> (i64, i64, i64) {
    match op2 {
        Op::Sub => {
            let inner = rng.int(2, max.max(2));
            let hidden = rng.int(1, inner - 1);
            (inner, hidden, inner - hidden)
        }
        _ => build_simple(op2, max, rng),
    }
}

/// Decompose `inner` into `a op1 b` with positive operands
fn split_inner(inner: i64, max: i64, rng: &mut GameRng) -> (i64, Op, i64) {
    if inner >= 2 && rng.chance(0.5) {
        let a = rng.int(1, inner - 1);
        (a, Op::Add, inner - a)
    } else {
        let b = rng.int(1, max);
        (inner + b, Op::Sub, b)
    }
}

impl PuzzleGenerator for CalculatePuzzle {
    const GAME: GameId = GameId::Calculate;

    fn generate(difficulty: u32, rng: &mut GameRng) -> Self {
        let p = params(difficulty);
        let op2 = rng.pick(&Op::ALL).copied().unwrap_or(Op::Add);

        if p.complex {
            let (inner, hidden, result) = build_outer(op2, p.max_operand, rng);
            let (a, op1, b) = split_inner(inner, p.max_operand, rng);
            return Self {
                equation: Equation::Complex {
                    a,
                    op1,
                    b,
                    op2,
                    result,
                },
                answer: hidden,
            };
        }

        let (a, b, result) = build_simple(op2, p.max_operand, rng);
        let hidden = *rng
            .pick(&[Hidden::Left, Hidden::Right, Hidden::Result])
            .unwrap_or(&Hidden::Result);
        let answer = match hidden {
            Hidden::Left => a,
            Hidden::Right => b,
            Hidden::Result => result,
        };
        Self {
            equation: Equation::Simple {
                a,
                op: op2,
                b,
                result,
                hidden,
            },
            answer,
        }
    }

    fn check(&self, response: &Response) -> bool {
        matches!(response, Response::Number(n) if *n == self.answer)
    }

    fn solution(&self) -> Response {
        Response::Number(self.answer)
    }
}
