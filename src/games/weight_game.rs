//! WeightGame - deduce the heaviest item from a set of balance scales
//!
//! Weighings come from a random elimination tournament, then a transitive
//! closure over them must prove a single heaviest item before the puzzle is
//! handed out.

use serde::{Deserialize, Serialize};

use super::difficulty::capped;
use super::{GameId, PuzzleGenerator, Response};
use crate::rng::GameRng;

pub const ITEM_KINDS: [&str; 8] = ["🍎", "🍊", "🍋", "🍇", "🍓", "🥝", "🍑", "🍐"];

/// Signal from which two lighter items may weigh the same
const TIES_SIGNAL: u32 = 16;
const TIE_CHANCE: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeightGameParams {
    pub items: usize,
    pub scales: usize,
    pub ties: bool,
}

pub fn params(signal: u32) -> WeightGameParams {
    let items = capped(3, signal / 8, 6) as usize;
    WeightGameParams {
        items,
        scales: items - 1,
        ties: signal >= TIES_SIGNAL,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Index into `ITEM_KINDS`
    pub kind: usize,
    pub weight: u32,
}

/// Which pan went down
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tilt {
    Left,
    Right,
    Balanced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scale {
    pub left: usize,
    pub right: usize,
    pub tilt: Tilt,
}

impl Scale {
    fn weigh(items: &[Item], left: usize, right: usize) -> Self {
        let tilt = match items[left].weight.cmp(&items[right].weight) {
            std::cmp::Ordering::Greater => Tilt::Left,
            std::cmp::Ordering::Less => Tilt::Right,
            std::cmp::Ordering::Equal => Tilt::Balanced,
        };
        Self { left, right, tilt }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightGamePuzzle {
    /// Items in display order
    pub items: Vec<Item>,
    pub scales: Vec<Scale>,
    /// Index of the heaviest item
    pub answer: usize,
}

/// Items the scales prove strictly heavier than every other item
pub fn proven_heaviest(count: usize, scales: &[Scale]) -> Vec<usize> {
    let mut ge = vec![vec![false; count]; count];
    let mut strict: Vec<(usize, usize)> = Vec::new();
    for (i, row) in ge.iter_mut().enumerate() {
        row[i] = true;
    }
    for s in scales {
        match s.tilt {
            Tilt::Left => {
                ge[s.left][s.right] = true;
                strict.push((s.left, s.right));
            }
            Tilt::Right => {
                ge[s.right][s.left] = true;
                strict.push((s.right, s.left));
            }
            Tilt::Balanced => {
                ge[s.left][s.right] = true;
                ge[s.right][s.left] = true;
            }
        }
    }
    for k in 0..count {
        for i in 0..count {
            for j in 0..count {
                if ge[i][k] && ge[k][j] {
                    ge[i][j] = true;
                }
            }
        }
    }
    // i > j if i >= a > b >= j for some weighing a > b
    let gt = |i: usize, j: usize| strict.iter().any(|&(a, b)| ge[i][a] && ge[b][j]);
    (0..count)
        .filter(|&i| (0..count).all(|j| j == i || gt(i, j)))
        .collect()
}

/// Knock-out weighings until one candidate is left
fn tournament(items: &[Item], rng: &mut GameRng) -> Vec<Scale> {
    let mut candidates: Vec<usize> = (0..items.len()).collect();
    let mut scales = Vec::new();
    while candidates.len() > 1 {
        let a = candidates.swap_remove(rng.index(candidates.len()));
        let b = candidates.swap_remove(rng.index(candidates.len()));
        let scale = Scale::weigh(items, a, b);
        scales.push(scale);
        candidates.push(if scale.tilt == Tilt::Right { b } else { a });
    }
    scales
}

/// Heaviest-first chain of adjacent weighings
fn sorted_chain(items: &[Item]) -> Vec<Scale> {
    let mut order: Vec<usize> = (0..items.len()).collect();
    order.sort_by_key(|&i| std::cmp::Reverse(items[i].weight));
    order
        .windows(2)
        .map(|w| Scale::weigh(items, w[0], w[1]))
        .collect()
}

impl PuzzleGenerator for WeightGamePuzzle {
    const GAME: GameId = GameId::WeightGame;

    fn generate(difficulty: u32, rng: &mut GameRng) -> Self {
        let p = params(difficulty);
        let kinds: Vec<usize> = (0..ITEM_KINDS.len()).collect();
        let mut items: Vec<Item> = rng
            .sample(&kinds, p.items)
            .into_iter()
            .enumerate()
            .map(|(i, kind)| Item {
                kind,
                weight: (i as u32 + 1) * 10 + rng.int(0, 4),
            })
            .collect();

        // Items are built lightest first, so the last one is the heaviest
        if p.ties && rng.chance(TIE_CHANCE) {
            let light = rng.index(p.items - 1);
            let other = (0..p.items - 1).filter(|&i| i != light).collect::<Vec<_>>();
            if let Some(&twin) = rng.pick(&other) {
                items[twin].weight = items[light].weight;
            }
        }
        rng.shuffle(&mut items);

        let answer = (0..items.len())
            .max_by_key(|&i| items[i].weight)
            .unwrap_or(0);

        let mut scales = tournament(&items, rng);
        if proven_heaviest(items.len(), &scales) != [answer] {
            log::warn!("WeightGame: tournament left the heaviest item unproven, using sorted chain");
            scales = sorted_chain(&items);
        }

        Self {
            items,
            scales,
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
