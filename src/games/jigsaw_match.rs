//! JigsawMatch - pick the piece that fills the hole in a jigsaw board
//!
//! Edges are listed clockwise as `[top, right, bottom, left]`. Interior
//! edges are a tab on one side and a blank on the other. Options are shown
//! rotated, so a piece fits when some rotation of it equals the hole.

use serde::{Deserialize, Serialize};

use super::difficulty::capped;
use super::{GameId, PuzzleGenerator, Response};
use crate::rng::GameRng;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Edge {
    Flat,
    Tab,
    Blank,
}

impl Edge {
    pub const ALL: [Edge; 3] = [Edge::Flat, Edge::Tab, Edge::Blank];

    /// Edge seen from the neighbouring piece
    pub fn complement(self) -> Self {
        match self {
            Edge::Flat => Edge::Flat,
            Edge::Tab => Edge::Blank,
            Edge::Blank => Edge::Tab,
        }
    }
}

/// Piece edges, clockwise from the top
pub type Piece = [Edge; 4];

/// Rotate a piece clockwise by `quarter_turns`
pub fn rotate(piece: Piece, quarter_turns: usize) -> Piece {
    let mut out = piece;
    for (i, edge) in piece.into_iter().enumerate() {
        out[(i + quarter_turns) % 4] = edge;
    }
    out
}

/// True if some rotation of `piece` matches `hole`
pub fn fits(piece: Piece, hole: Piece) -> bool {
    (0..4).any(|k| rotate(piece, k) == hole)
}

/// Smallest rotation, identifying pieces equal up to rotation
pub fn canonical(piece: Piece) -> Piece {
    (0..4).map(|k| rotate(piece, k)).min().unwrap_or(piece)
}

fn flat_edges(piece: Piece) -> usize {
    piece.iter().filter(|e| **e == Edge::Flat).count()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JigsawMatchParams {
    pub level: u32,
    pub grid: usize,
    pub options: usize,
}

pub fn params(signal: u32) -> JigsawMatchParams {
    let level = (signal / 2).min(4);
    JigsawMatchParams {
        level,
        grid: capped(2, level / 2, 4) as usize,
        options: capped(3, level, 6) as usize,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JigsawMatchPuzzle {
    pub grid: usize,
    /// Board pieces, row-major; the hole's entry is its true shape
    pub board: Vec<Piece>,
    /// Index of the missing piece in `board`
    pub hole: usize,
    /// Candidate pieces as displayed (rotated)
    pub options: Vec<Piece>,
    /// Index of the option that fits
    pub answer: usize,
}

impl JigsawMatchPuzzle {
    pub fn hole_shape(&self) -> Piece {
        self.board[self.hole]
    }
}

/// Cut a `grid x grid` board
fn cut_board(grid: usize, rng: &mut GameRng) -> Vec<Piece> {
    let mut board = vec![[Edge::Flat; 4]; grid * grid];
    let interior = |rng: &mut GameRng| if rng.chance(0.5) { Edge::Tab } else { Edge::Blank };
    for r in 0..grid {
        for c in 0..grid {
            let i = r * grid + c;
            if c + 1 < grid {
                let edge = interior(rng);
                board[i][1] = edge;
                board[i + 1][3] = edge.complement();
            }
            if r + 1 < grid {
                let edge = interior(rng);
                board[i][2] = edge;
                board[i + grid][0] = edge.complement();
            }
        }
    }
    board
}

/// Up to `n` pieces that fit `hole` under no rotation, distinct up to rotation.
/// Pieces with the same number of flat edges as the hole come first.
fn decoys(hole: Piece, n: usize, rng: &mut GameRng) -> Vec<Piece> {
    let mut seen: Vec<Piece> = Vec::new();
    for a in Edge::ALL {
        for b in Edge::ALL {
            for c in Edge::ALL {
                for d in Edge::ALL {
                    let piece = canonical([a, b, c, d]);
                    if !fits(piece, hole) && !seen.contains(&piece) {
                        seen.push(piece);
                    }
                }
            }
        }
    }
    let (mut similar, mut rest): (Vec<Piece>, Vec<Piece>) = seen
        .into_iter()
        .partition(|p| flat_edges(*p) == flat_edges(hole));
    rng.shuffle(&mut similar);
    rng.shuffle(&mut rest);
    similar.into_iter().chain(rest).take(n).collect()
}

impl PuzzleGenerator for JigsawMatchPuzzle {
    const GAME: GameId = GameId::JigsawMatch;

    fn generate(difficulty: u32, rng: &mut GameRng) -> Self {
        let p = params(difficulty);
        let board = cut_board(p.grid, rng);
        let hole = rng.index(board.len());
        let shape = board[hole];

        let mut options: Vec<Piece> = decoys(shape, p.options - 1, rng)
            .into_iter()
            .map(|piece| rotate(piece, rng.index(4)))
            .collect();
        let answer = rng.int(0, options.len());
        options.insert(answer, rotate(shape, rng.index(4)));

        Self {
            grid: p.grid,
            board,
            hole,
            options,
            answer,
        }
    }

    fn check(&self, response: &Response) -> bool {
        matches!(response, Response::Choice(i) if *i == self.answer)
    }

    fn solution(&self) -> Response {
        Response::Choice(self.answer)
    }
}
