//! CubeCounter - count the blocks in an isometric stack
//!
//! Heights are stored row-major as `heights[z][x]`, with `(0, 0)` the back
//! corner. A block may only land on a column whose two back neighbours are
//! already taller, so heights never increase away from the back corner and
//! no block is ever hidden behind another.

use serde::{Deserialize, Serialize};

use super::difficulty::{capped, scaled};
use super::{GameId, PuzzleGenerator, Response};
use crate::rng::GameRng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CubeCounterParams {
    pub level: u32,
    /// Width of the square base
    pub base: usize,
    pub max_height: u32,
    pub min_blocks: u32,
    pub max_blocks: u32,
}

pub fn params(signal: u32) -> CubeCounterParams {
    let level = scaled(signal, 2, 3);
    let base = capped(2, level / 4, 5);
    let max_height = capped(3, level / 6, 5);
    let area = base * base;
    CubeCounterParams {
        level,
        base: base as usize,
        max_height,
        min_blocks: area,
        max_blocks: (area * max_height * 2 / 3).max(area),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CubeCounterPuzzle {
    /// Column heights, `heights[z][x]`
    pub heights: Vec<Vec<u32>>,
    pub max_height: u32,
    /// Total block count
    pub answer: u32,
}

impl CubeCounterPuzzle {
    pub fn total(&self) -> u32 {
        self.heights.iter().flatten().sum()
    }

    /// True if a block can be placed on column `(x, z)`
    pub fn can_place(&self, x: usize, z: usize) -> bool {
        can_place(&self.heights, self.max_height, x, z)
    }

    /// True when every column is covered by its back neighbours
    pub fn is_staircase(&self) -> bool {
        self.heights.iter().enumerate().all(|(z, row)| {
            row.iter().enumerate().all(|(x, &h)| {
                h <= self.max_height
                    && (x == 0 || row[x - 1] >= h)
                    && (z == 0 || self.heights[z - 1][x] >= h)
            })
        })
    }
}

fn can_place(heights: &[Vec<u32>], max_height: u32, x: usize, z: usize) -> bool {
    let h = heights[z][x];
    let behind_left = x == 0 || heights[z][x - 1] > h;
    let behind_right = z == 0 || heights[z - 1][x] > h;
    h < max_height && behind_left && behind_right
}

impl PuzzleGenerator for CubeCounterPuzzle {
    const GAME: GameId = GameId::CubeCounter;

    fn generate(difficulty: u32, rng: &mut GameRng) -> Self {
        let p = params(difficulty);
        let target = rng.int(p.min_blocks, p.max_blocks);
        let mut heights = vec![vec![0u32; p.base]; p.base];

        let mut placed = 0;
        while placed < target {
            let candidates: Vec<(usize, usize)> = (0..p.base)
                .flat_map(|z| (0..p.base).map(move |x| (x, z)))
                .filter(|&(x, z)| can_place(&heights, p.max_height, x, z))
                .collect();
            let Some(&(x, z)) = rng.pick(&candidates) else {
                log::warn!("CubeCounter: grid full at {} of {} blocks", placed, target);
                break;
            };
            heights[z][x] += 1;
            placed += 1;
        }

        Self {
            heights,
            max_height: p.max_height,
            answer: placed,
        }
    }

    fn check(&self, response: &Response) -> bool {
        matches!(response, Response::Number(n) if *n == i64::from(self.answer))
    }

    fn solution(&self) -> Response {
        Response::Number(i64::from(self.answer))
    }
}
