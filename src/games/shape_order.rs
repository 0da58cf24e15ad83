//! ShapeOrder - watch shapes appear one by one, then tap them back in order
//!
//! Difficulty walks a fixed table of ten levels. Later levels switch to a
//! set of shapes that are harder to tell apart.

use serde::{Deserialize, Serialize};

use super::difficulty::table_entry;
use super::sequence::no_triple_sequence;
use super::{GameId, PuzzleGenerator, Response};
use crate::rng::GameRng;

/// Shapes per set
pub const SHAPES_PER_SET: usize = 6;
/// Easy shape set
pub const EASY_SHAPES: [&str; SHAPES_PER_SET] = ["🔴", "🔵", "🟢", "🟡", "🟣", "🟠"];
/// Hard shape set (similar looking)
pub const HARD_SHAPES: [&str; SHAPES_PER_SET] = ["🍣", "🍱", "🍙", "🍘", "🍥", "🍡"];

/// Base reveal interval before the speed multiplier (ms)
const REVEAL_BASE_MS: f32 = 800.0;

/// One difficulty level
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeOrderLevel {
    /// Sequence length
    pub icons: usize,
    pub hard_shapes: bool,
    /// Decoy option panels
    pub extra_panels: usize,
    pub speed: f32,
}

const fn level(icons: usize, hard_shapes: bool, extra_panels: usize, speed: f32) -> ShapeOrderLevel {
    ShapeOrderLevel {
        icons,
        hard_shapes,
        extra_panels,
        speed,
    }
}

/// Level table, each column non-decreasing
pub const LEVELS: [ShapeOrderLevel; 10] = [
    level(3, false, 1, 1.2),
    level(3, false, 2, 1.4),
    level(4, false, 2, 1.4),
    level(4, false, 2, 1.6),
    level(5, false, 2, 1.6),
    level(5, true, 2, 1.8),
    level(6, true, 2, 1.8),
    level(6, true, 2, 2.0),
    level(7, true, 2, 2.0),
    level(8, true, 2, 2.2),
];

pub fn params(signal: u32) -> ShapeOrderLevel {
    *table_entry(&LEVELS, signal)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeOrderPuzzle {
    pub hard_shapes: bool,
    /// Shape indices in reveal order
    pub sequence: Vec<usize>,
    /// Shape indices on the answer panel, shuffled
    pub options: Vec<usize>,
    /// Interval between reveals (ms)
    pub reveal_ms: u32,
}

impl ShapeOrderPuzzle {
    /// Icon for a shape index in this puzzle's set
    pub fn icon(&self, shape: usize) -> Option<&'static str> {
        let set = if self.hard_shapes {
            &HARD_SHAPES
        } else {
            &EASY_SHAPES
        };
        set.get(shape).copied()
    }
}

impl PuzzleGenerator for ShapeOrderPuzzle {
    const GAME: GameId = GameId::ShapeOrder;

    fn generate(difficulty: u32, rng: &mut GameRng) -> Self {
        let lvl = params(difficulty);
        let sequence = no_triple_sequence(lvl.icons, SHAPES_PER_SET, rng);

        let mut options: Vec<usize> = Vec::new();
        for shape in &sequence {
            if !options.contains(shape) {
                options.push(*shape);
            }
        }
        let unused: Vec<usize> = (0..SHAPES_PER_SET)
            .filter(|s| !options.contains(s))
            .collect();
        options.extend(rng.sample(&unused, lvl.extra_panels));
        rng.shuffle(&mut options);

        Self {
            hard_shapes: lvl.hard_shapes,
            sequence,
            options,
            reveal_ms: (REVEAL_BASE_MS / lvl.speed).round() as u32,
        }
    }

    fn check(&self, response: &Response) -> bool {
        matches!(response, Response::Sequence(seq) if *seq == self.sequence)
    }

    fn solution(&self) -> Response {
        Response::Sequence(self.sequence.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::sequence::has_triple_repeat;
    use proptest::prelude::*;

    #[test]
    fn test_level_table_monotone() {
        for pair in LEVELS.windows(2) {
            assert!(pair[1].icons >= pair[0].icons);
            assert!(pair[1].extra_panels >= pair[0].extra_panels);
            assert!(pair[1].speed >= pair[0].speed);
            assert!(pair[1].hard_shapes || !pair[0].hard_shapes);
        }
    }

    #[test]
    fn test_params_clamp_to_last_level() {
        assert_eq!(params(9), LEVELS[9]);
        assert_eq!(params(400), LEVELS[9]);
    }

    #[test]
    fn test_reveal_interval() {
        let mut rng = GameRng::new(2);
        assert_eq!(ShapeOrderPuzzle::generate(0, &mut rng).reveal_ms, 667);
        assert_eq!(ShapeOrderPuzzle::generate(9, &mut rng).reveal_ms, 364);
    }

    proptest! {
        #[test]
        fn prop_options_cover_sequence(seed in any::<u64>(), signal in 0u32..20) {
            let mut rng = GameRng::new(seed);
            let lvl = params(signal);
            let puzzle = ShapeOrderPuzzle::generate(signal, &mut rng);
            prop_assert_eq!(puzzle.sequence.len(), lvl.icons);
            prop_assert!(!has_triple_repeat(&puzzle.sequence));
            prop_assert!(puzzle.sequence.iter().all(|s| puzzle.options.contains(s)));

            let mut distinct = puzzle.options.clone();
            distinct.sort_unstable();
            distinct.dedup();
            prop_assert_eq!(distinct.len(), puzzle.options.len());

            let decoys = puzzle.options.iter().filter(|o| !puzzle.sequence.contains(*o)).count();
            prop_assert!(decoys <= lvl.extra_panels);
            prop_assert!(puzzle.icon(puzzle.sequence[0]).is_some());
            prop_assert!(puzzle.check(&puzzle.solution()));
        }
    }
}
