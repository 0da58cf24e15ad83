//! MathCombination - fill the blanks of an expression to reach a target
//!
//! The expression tree is grown top down from the target, so it always has a
//! solution. Any filling from the card pool that evaluates exactly to the
//! target is accepted, not only the generated one.

use serde::{Deserialize, Serialize};

use super::arith::Op;
use super::{GameId, PuzzleGenerator, Response};
use crate::rng::GameRng;

/// Largest subtrahend or divisor picked while growing the tree
const SMALL_OPERAND_MAX: i64 = 9;
/// `÷` nodes are only grown while the dividend stays at or below this
const DIVIDEND_MAX: i64 = 200;
/// Level from which operators are blanks too
const HIDDEN_SIGN_LEVEL: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MathCombinationParams {
    pub level: u32,
    pub operators: usize,
    pub target_min: i64,
    pub target_max: i64,
    pub number_decoys: usize,
    pub sign_decoys: usize,
    pub hide_signs: bool,
}

pub fn params(signal: u32) -> MathCombinationParams {
    let level = (signal / 2).min(8);
    let hide_signs = level >= HIDDEN_SIGN_LEVEL;
    MathCombinationParams {
        level,
        operators: 1 + (level / 3) as usize,
        target_min: 10 + 5 * i64::from(level),
        target_max: 20 + 10 * i64::from(level),
        number_decoys: 2 + (level / 2) as usize,
        sign_decoys: if hide_signs { 1 + (level / 4) as usize } else { 0 },
        hide_signs,
    }
}

/// Expression tree node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Node {
    Leaf(i64),
    Branch {
        op: Op,
        left: Box<Node>,
        right: Box<Node>,
    },
}

impl Node {
    pub fn operator_count(&self) -> usize {
        match self {
            Node::Leaf(_) => 0,
            Node::Branch { left, right, .. } => 1 + left.operator_count() + right.operator_count(),
        }
    }
}

/// A card the player drags into a slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Card {
    Number(i64),
    Sign(Op),
}

/// Kind of blank
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlotKind {
    Number,
    Sign,
}

/// Displayed symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Token {
    Open,
    Close,
    Sign(Op),
    Slot(SlotKind),
    Equals,
    Target(i64),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MathCombinationPuzzle {
    pub target: i64,
    pub tree: Node,
    pub hide_signs: bool,
    /// Symbol stream as shown, ending in `= target`
    pub tokens: Vec<Token>,
    /// Blanks in left-to-right order
    pub slots: Vec<SlotKind>,
    /// Shuffled cards: slot values plus decoys
    pub pool: Vec<Card>,
    /// Generated filling, one card per slot
    pub answer: Vec<Card>,
}

/// Pick an operator's operands so that `left op right = target`
fn split(op: Op, target: i64, rng: &mut GameRng) -> (Op, i64, i64) {
    let additive = |rng: &mut GameRng| {
        if target >= 2 {
            let left = rng.int(1, target - 1);
            (Op::Add, left, target - left)
        } else {
            let sub = rng.int(1, SMALL_OPERAND_MAX);
            (Op::Sub, target + sub, sub)
        }
    };
    match op {
        Op::Add => additive(rng),
        Op::Sub => {
            let sub = rng.int(1, SMALL_OPERAND_MAX);
            (Op::Sub, target + sub, sub)
        }
        Op::Mul => {
            let factor = (2..)
                .take_while(|d| d * d <= target)
                .filter(|d| target % d == 0)
                .last();
            match factor {
                Some(d) if rng.chance(0.5) => (Op::Mul, d, target / d),
                Some(d) => (Op::Mul, target / d, d),
                None => additive(rng),
            }
        }
        Op::Div => {
            let divisor = rng.int(2, SMALL_OPERAND_MAX);
            if target * divisor > DIVIDEND_MAX {
                additive(rng)
            } else {
                (Op::Div, target * divisor, divisor)
            }
        }
    }
}

fn grow(target: i64, operators: usize, rng: &mut GameRng) -> Node {
    if operators == 0 {
        return Node::Leaf(target);
    }
    let wanted = rng.pick(&Op::ALL).copied().unwrap_or(Op::Add);
    let (op, left, right) = split(wanted, target, rng);
    let rest = operators - 1;
    let left_ops = rng.int(0, rest);
    Node::Branch {
        op,
        left: Box::new(grow(left, left_ops, rng)),
        right: Box::new(grow(right, rest - left_ops, rng)),
    }
}

struct Flattened {
    tokens: Vec<Token>,
    slots: Vec<SlotKind>,
    answer: Vec<Card>,
}

fn flatten(node: &Node, hide_signs: bool, out: &mut Flattened) {
    match node {
        Node::Leaf(value) => {
            out.tokens.push(Token::Slot(SlotKind::Number));
            out.slots.push(SlotKind::Number);
            out.answer.push(Card::Number(*value));
        }
        Node::Branch { op, left, right } => {
            flatten_child(left, hide_signs, out);
            if hide_signs {
                out.tokens.push(Token::Slot(SlotKind::Sign));
                out.slots.push(SlotKind::Sign);
                out.answer.push(Card::Sign(*op));
            } else {
                out.tokens.push(Token::Sign(*op));
            }
            flatten_child(right, hide_signs, out);
        }
    }
}

fn flatten_child(node: &Node, hide_signs: bool, out: &mut Flattened) {
    if matches!(node, Node::Leaf(_)) {
        flatten(node, hide_signs, out);
    } else {
        out.tokens.push(Token::Open);
        flatten(node, hide_signs, out);
        out.tokens.push(Token::Close);
    }
}

/// Evaluate `node` with its blanks filled from `cards`, in display order
fn evaluate<'a>(
    node: &Node,
    hide_signs: bool,
    cards: &mut impl Iterator<Item = &'a Card>,
) -> Option<i64> {
    match node {
        Node::Leaf(_) => match cards.next()? {
            Card::Number(n) => Some(*n),
            Card::Sign(_) => None,
        },
        Node::Branch { op, left, right } => {
            let l = evaluate(left, hide_signs, cards)?;
            let op = if hide_signs {
                match cards.next()? {
                    Card::Sign(op) => *op,
                    Card::Number(_) => return None,
                }
            } else {
                *op
            };
            let r = evaluate(right, hide_signs, cards)?;
            op.apply(l, r)
        }
    }
}

impl MathCombinationPuzzle {
    /// Value of the expression with `cards` in the blanks, if well formed
    pub fn evaluate(&self, cards: &[Card]) -> Option<i64> {
        if cards.len() != self.slots.len() {
            return None;
        }
        evaluate(&self.tree, self.hide_signs, &mut cards.iter())
    }

    /// True if every card can be taken from the pool, each pool card at most once
    pub fn drawn_from_pool(&self, cards: &[Card]) -> bool {
        let mut used = vec![false; self.pool.len()];
        for card in cards {
            let free = self
                .pool
                .iter()
                .enumerate()
                .position(|(i, c)| !used[i] && c == card);
            match free {
                Some(i) => used[i] = true,
                None => return false,
            }
        }
        true
    }
}

impl std::fmt::Display for MathCombinationPuzzle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, token) in self.tokens.iter().enumerate() {
            let after_open = i > 0 && self.tokens[i - 1] == Token::Open;
            if i > 0 && !after_open && *token != Token::Close {
                f.write_str(" ")?;
            }
            match token {
                Token::Open => f.write_str("(")?,
                Token::Close => f.write_str(")")?,
                Token::Sign(op) => write!(f, "{op}")?,
                Token::Slot(_) => f.write_str("□")?,
                Token::Equals => f.write_str("=")?,
                Token::Target(n) => write!(f, "{n}")?,
            }
        }
        Ok(())
    }
}

impl PuzzleGenerator for MathCombinationPuzzle {
    const GAME: GameId = GameId::MathCombination;

    fn generate(difficulty: u32, rng: &mut GameRng) -> Self {
        let p = params(difficulty);
        let target = rng.int(p.target_min, p.target_max);
        let tree = grow(target, p.operators, rng);

        let mut flat = Flattened {
            tokens: Vec::new(),
            slots: Vec::new(),
            answer: Vec::new(),
        };
        flatten(&tree, p.hide_signs, &mut flat);
        flat.tokens.push(Token::Equals);
        flat.tokens.push(Token::Target(target));

        let decoy_max = flat
            .answer
            .iter()
            .filter_map(|c| match c {
                Card::Number(n) => Some(*n),
                Card::Sign(_) => None,
            })
            .max()
            .unwrap_or(SMALL_OPERAND_MAX)
            .max(SMALL_OPERAND_MAX);
        let mut pool = flat.answer.clone();
        pool.extend((0..p.number_decoys).map(|_| Card::Number(rng.int(1, decoy_max))));
        pool.extend(
            (0..p.sign_decoys).map(|_| Card::Sign(rng.pick(&Op::ALL).copied().unwrap_or(Op::Add))),
        );
        rng.shuffle(&mut pool);

        Self {
            target,
            tree,
            hide_signs: p.hide_signs,
            tokens: flat.tokens,
            slots: flat.slots,
            pool,
            answer: flat.answer,
        }
    }

    fn check(&self, response: &Response) -> bool {
        let Response::Cards(cards) = response else {
            return false;
        };
        let kinds_match = cards.len() == self.slots.len()
            && cards.iter().zip(&self.slots).all(|(card, slot)| {
                matches!(
                    (card, slot),
                    (Card::Number(_), SlotKind::Number) | (Card::Sign(_), SlotKind::Sign)
                )
            });
        kinds_match && self.drawn_from_pool(cards) && self.evaluate(cards) == Some(self.target)
    }

    fn solution(&self) -> Response {
        Response::Cards(self.answer.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn leaf(v: i64) -> Box<Node> {
        Box::new(Node::Leaf(v))
    }

    fn sample_puzzle() -> MathCombinationPuzzle {
        // (□ + □) × □ = 12
        let tree = Node::Branch {
            op: Op::Mul,
            left: Box::new(Node::Branch {
                op: Op::Add,
                left: leaf(1),
                right: leaf(2),
            }),
            right: leaf(4),
        };
        let mut flat = Flattened {
            tokens: Vec::new(),
            slots: Vec::new(),
            answer: Vec::new(),
        };
        flatten(&tree, false, &mut flat);
        flat.tokens.push(Token::Equals);
        flat.tokens.push(Token::Target(12));
        MathCombinationPuzzle {
            target: 12,
            tree,
            hide_signs: false,
            tokens: flat.tokens,
            slots: flat.slots,
            pool: vec![
                Card::Number(1),
                Card::Number(2),
                Card::Number(4),
                Card::Number(3),
                Card::Number(2),
            ],
            answer: flat.answer,
        }
    }

    #[test]
    fn test_flatten_parenthesizes_branches() {
        let puzzle = sample_puzzle();
        assert_eq!(puzzle.to_string(), "(□ + □) × □ = 12");
        assert_eq!(puzzle.slots.len(), 3);
    }

    #[test]
    fn test_alternative_filling_accepted() {
        let puzzle = sample_puzzle();
        let alt = vec![Card::Number(2), Card::Number(2), Card::Number(3)];
        assert!(puzzle.check(&Response::Cards(alt)));
    }

    #[test]
    fn test_card_reuse_rejected() {
        let puzzle = sample_puzzle();
        // (3 + 1) × 3 reaches 12 but the pool holds a single 3
        let reuse = vec![Card::Number(3), Card::Number(1), Card::Number(3)];
        assert!(!puzzle.check(&Response::Cards(reuse)));
        let wrong_len = vec![Card::Number(1), Card::Number(2)];
        assert!(!puzzle.check(&Response::Cards(wrong_len)));
    }

    #[test]
    fn test_split_mul_uses_nearest_factor() {
        let mut rng = GameRng::new(1);
        let (op, a, b) = split(Op::Mul, 36, &mut rng);
        assert_eq!((op, a * b, a.min(b)), (Op::Mul, 36, 6));
        let (op, a, b) = split(Op::Mul, 13, &mut rng);
        assert_eq!((op, a + b), (Op::Add, 13));
        let (op, _, _) = split(Op::Div, 150, &mut rng);
        assert_eq!(op, Op::Add);
    }

    proptest! {
        #[test]
        fn prop_generated_answer_reaches_target(seed in any::<u64>(), signal in 0u32..40) {
            let mut rng = GameRng::new(seed);
            let p = params(signal);
            let puzzle = MathCombinationPuzzle::generate(signal, &mut rng);
            prop_assert!(puzzle.target >= p.target_min && puzzle.target <= p.target_max);
            prop_assert_eq!(puzzle.tree.operator_count(), p.operators);
            prop_assert_eq!(puzzle.evaluate(&puzzle.answer), Some(puzzle.target));
            prop_assert!(puzzle.drawn_from_pool(&puzzle.answer));
            prop_assert_eq!(
                puzzle.pool.len(),
                puzzle.slots.len() + p.number_decoys + p.sign_decoys
            );
            prop_assert!(puzzle.check(&puzzle.solution()));
        }

        #[test]
        fn prop_params_monotone(signal in 0u32..100) {
            let (a, b) = (params(signal), params(signal + 1));
            prop_assert!(b.operators >= a.operators);
            prop_assert!(b.target_max >= a.target_max);
            prop_assert!(b.number_decoys >= a.number_decoys);
        }
    }
}
