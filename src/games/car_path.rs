//! CarPath - follow one or two cars through a ladder of lane crossings
//!
//! Each crossing swaps two adjacent lanes. A car's end lane comes from
//! replaying every crossing in order.

use serde::{Deserialize, Serialize};

use super::difficulty::capped;
use super::{GameId, PuzzleGenerator, Response};
use crate::rng::GameRng;

/// Level from which two cars are tracked
const TWO_CAR_LEVEL: u32 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarPathParams {
    pub level: u32,
    pub lanes: usize,
    pub swaps: usize,
    pub cars: usize,
}

pub fn params(signal: u32) -> CarPathParams {
    let level = (signal / 2).min(10);
    CarPathParams {
        level,
        lanes: capped(3, level / 3, 6) as usize,
        swaps: capped(2, level, 8) as usize,
        cars: if level >= TWO_CAR_LEVEL { 2 } else { 1 },
    }
}

/// A crossing at `step` between `lane` and `lane + 1`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Swap {
    pub step: usize,
    pub lane: usize,
}

impl Swap {
    /// Lane after passing this crossing
    pub fn apply(&self, lane: usize) -> usize {
        if lane == self.lane {
            lane + 1
        } else if lane == self.lane + 1 {
            self.lane
        } else {
            lane
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarPathPuzzle {
    pub lanes: usize,
    pub swaps: Vec<Swap>,
    /// Start lane per car
    pub starts: Vec<usize>,
    /// End lane per car
    pub ends: Vec<usize>,
}

/// Replay the crossings from `start`
pub fn trace(swaps: &[Swap], start: usize) -> usize {
    swaps.iter().fold(start, |lane, swap| swap.apply(lane))
}

impl PuzzleGenerator for CarPathPuzzle {
    const GAME: GameId = GameId::CarPath;

    fn generate(difficulty: u32, rng: &mut GameRng) -> Self {
        let p = params(difficulty);
        let swaps = (0..p.swaps)
            .map(|step| Swap {
                step,
                lane: rng.index(p.lanes - 1),
            })
            .collect::<Vec<_>>();

        let lanes: Vec<usize> = (0..p.lanes).collect();
        let starts = rng.sample(&lanes, p.cars);
        let ends = starts.iter().map(|&s| trace(&swaps, s)).collect();

        Self {
            lanes: p.lanes,
            swaps,
            starts,
            ends,
        }
    }

    fn check(&self, response: &Response) -> bool {
        match response {
            Response::Sequence(lanes) => *lanes == self.ends,
            Response::Choice(lane) => self.ends.len() == 1 && self.ends[0] == *lane,
            _ => false,
        }
    }

    fn solution(&self) -> Response {
        Response::Sequence(self.ends.clone())
    }
}
