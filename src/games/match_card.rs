//! MatchCard - find matching pairs on a briefly revealed board
//!
//! Unlike the other families the board persists across answers: each
//! answer flips two cards, matches stay face up, and a new board is dealt
//! only when every pair has been found.

use serde::{Deserialize, Serialize};

use super::difficulty::capped;
use super::{GameId, PuzzleGenerator, Response};
use crate::rng::GameRng;

/// Faces per set
pub const FACES: usize = 6;
pub const CARD_COLOURS: [&str; FACES] = ["#ff5252", "#448aff", "#69f0ae", "#ffd740", "#b388ff", "#ff80ab"];
pub const CARD_SHAPES: [&str; FACES] = ["●", "■", "★", "▲", "◆", "♦"];

/// Signal from which faces are shapes instead of colours
const SHAPES_SIGNAL: u32 = 9;
/// Full-deck reveal when a board is dealt (ms)
pub const REVEAL_MS: u32 = 2_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchCardParams {
    pub pairs: usize,
    pub shapes: bool,
}

pub fn params(signal: u32) -> MatchCardParams {
    MatchCardParams {
        pairs: capped(2, signal / 4, FACES as u32) as usize,
        shapes: signal >= SHAPES_SIGNAL,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Face index into the colour or shape set
    pub face: usize,
    pub matched: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchCardPuzzle {
    pub shapes: bool,
    pub cards: Vec<Card>,
    pub reveal_ms: u32,
}

impl MatchCardPuzzle {
    /// Face label for a card
    pub fn face_label(&self, index: usize) -> Option<&'static str> {
        let set = if self.shapes { &CARD_SHAPES } else { &CARD_COLOURS };
        self.cards.get(index).and_then(|c| set.get(c.face).copied())
    }

    /// Mark a pair as matched (no-op for an invalid pair)
    pub fn mark_matched(&mut self, a: usize, b: usize) {
        if self.is_pair(a, b) {
            self.cards[a].matched = true;
            self.cards[b].matched = true;
        }
    }

    pub fn is_cleared(&self) -> bool {
        self.cards.iter().all(|c| c.matched)
    }

    pub fn unmatched_pairs(&self) -> usize {
        self.cards.iter().filter(|c| !c.matched).count() / 2
    }

    fn is_pair(&self, a: usize, b: usize) -> bool {
        match (self.cards.get(a), self.cards.get(b)) {
            (Some(x), Some(y)) => a != b && !x.matched && !y.matched && x.face == y.face,
            _ => false,
        }
    }
}

impl PuzzleGenerator for MatchCardPuzzle {
    const GAME: GameId = GameId::MatchCard;

    fn generate(difficulty: u32, rng: &mut GameRng) -> Self {
        let p = params(difficulty);
        let faces: Vec<usize> = (0..FACES).collect();
        let mut cards: Vec<Card> = rng
            .sample(&faces, p.pairs)
            .into_iter()
            .flat_map(|face| [Card { face, matched: false }; 2])
            .collect();
        rng.shuffle(&mut cards);
        Self {
            shapes: p.shapes,
            cards,
            reveal_ms: REVEAL_MS,
        }
    }

    fn check(&self, response: &Response) -> bool {
        matches!(response, Response::Pair(a, b) if self.is_pair(*a, *b))
    }

    /// First unmatched pair; a cleared board has no valid answer
    fn solution(&self) -> Response {
        for (i, card) in self.cards.iter().enumerate() {
            if card.matched {
                continue;
            }
            if let Some(j) = (i + 1..self.cards.len()).find(|&j| self.is_pair(i, j)) {
                return Response::Pair(i, j);
            }
        }
        Response::Pair(0, 0)
    }
}
