//! MeteorSequence - tap drifting meteors in ascending order
//!
//! Values are shown as numbers, letters or number words. The core only
//! decides start positions and motion; the presentation layer animates.

use serde::{Deserialize, Serialize};

use super::difficulty::capped;
use super::{GameId, PuzzleGenerator, Response};
use crate::rng::GameRng;

/// Play field width
pub const FIELD_WIDTH: f32 = 640.0;
/// Play field height
pub const FIELD_HEIGHT: f32 = 400.0;
pub const METEOR_RADIUS: f32 = 40.0;
/// Placement attempts per meteor before accepting an overlap
const PLACEMENT_ATTEMPTS: u32 = 50;

/// Signal from which values are spelled out
const WORDS_SIGNAL: u32 = 6;
/// Signal from which letters may appear
const LETTERS_SIGNAL: u32 = 2;
const LETTERS_CHANCE: f64 = 0.25;

const NUMBER_WORDS: [&str; 11] = [
    "ZERO", "ONE", "TWO", "THREE", "FOUR", "FIVE", "SIX", "SEVEN", "EIGHT", "NINE", "TEN",
];
const ALPHABET_LEN: u32 = 26;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeteorSequenceParams {
    pub count: usize,
    pub max_number: u32,
    /// Rotation speed bound
    pub spin: u32,
}

pub fn params(signal: u32) -> MeteorSequenceParams {
    MeteorSequenceParams {
        count: capped(3, signal / 4, 6) as usize,
        max_number: capped(15, signal.saturating_mul(5), 100),
        spin: capped(1, signal / 4, 5),
    }
}

/// How meteor values are written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisplayMode {
    Numbers,
    Letters,
    Words,
}

impl DisplayMode {
    fn pick(signal: u32, rng: &mut GameRng) -> Self {
        if signal >= WORDS_SIGNAL {
            DisplayMode::Words
        } else if signal >= LETTERS_SIGNAL && rng.chance(LETTERS_CHANCE) {
            DisplayMode::Letters
        } else {
            DisplayMode::Numbers
        }
    }

    /// Value range `[min, max]` for this mode
    fn range(self, max_number: u32) -> (u32, u32) {
        match self {
            DisplayMode::Numbers => (1, max_number),
            DisplayMode::Letters => (0, ALPHABET_LEN - 1),
            DisplayMode::Words => (0, NUMBER_WORDS.len() as u32 - 1),
        }
    }

    pub fn label(self, value: u32) -> String {
        match self {
            DisplayMode::Numbers => value.to_string(),
            DisplayMode::Letters => char::from_u32('A' as u32 + value)
                .map(String::from)
                .unwrap_or_default(),
            DisplayMode::Words => NUMBER_WORDS
                .get(value as usize)
                .map(|w| w.to_string())
                .unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meteor {
    pub id: usize,
    pub value: u32,
    pub label: String,
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    /// Initial rotation (degrees)
    pub rotation: f32,
    /// Rotation per frame (degrees)
    pub spin: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeteorSequencePuzzle {
    pub mode: DisplayMode,
    pub meteors: Vec<Meteor>,
}

impl MeteorSequencePuzzle {
    /// Meteor ids in ascending value order
    pub fn click_order(&self) -> Vec<usize> {
        let mut sorted: Vec<&Meteor> = self.meteors.iter().collect();
        sorted.sort_by_key(|m| m.value);
        sorted.into_iter().map(|m| m.id).collect()
    }
}

fn overlaps(placed: &[Meteor], x: f32, y: f32) -> bool {
    placed
        .iter()
        .any(|m| (m.x - x).hypot(m.y - y) < METEOR_RADIUS * 2.0)
}

impl PuzzleGenerator for MeteorSequencePuzzle {
    const GAME: GameId = GameId::MeteorSequence;

    fn generate(difficulty: u32, rng: &mut GameRng) -> Self {
        let p = params(difficulty);
        let mode = DisplayMode::pick(difficulty, rng);
        let (min, max) = mode.range(p.max_number);

        let pool: Vec<u32> = (min..=max).collect();
        let values = rng.sample(&pool, p.count);

        let mut meteors: Vec<Meteor> = Vec::with_capacity(values.len());
        for (id, value) in values.into_iter().enumerate() {
            let mut pos = (0.0, 0.0);
            for _ in 0..PLACEMENT_ATTEMPTS {
                pos = (
                    METEOR_RADIUS + rng.unit() * (FIELD_WIDTH - METEOR_RADIUS * 2.0),
                    METEOR_RADIUS + rng.unit() * (FIELD_HEIGHT - METEOR_RADIUS * 2.0),
                );
                if !overlaps(&meteors, pos.0, pos.1) {
                    break;
                }
            }
            let heading = rng.unit() * std::f32::consts::TAU;
            let speed = 1.0 + rng.unit() * 1.5;
            meteors.push(Meteor {
                id,
                value,
                label: mode.label(value),
                x: pos.0,
                y: pos.1,
                vx: heading.cos() * speed,
                vy: heading.sin() * speed,
                rotation: rng.unit() * 360.0,
                spin: (rng.unit() - 0.5) * p.spin as f32 * 2.0,
            });
        }

        Self { mode, meteors }
    }

    fn check(&self, response: &Response) -> bool {
        matches!(response, Response::Sequence(ids) if *ids == self.click_order())
    }

    fn solution(&self) -> Response {
        Response::Sequence(self.click_order())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_labels() {
        assert_eq!(DisplayMode::Numbers.label(42), "42");
        assert_eq!(DisplayMode::Letters.label(2), "C");
        assert_eq!(DisplayMode::Words.label(7), "SEVEN");
    }

    #[test]
    fn test_mode_by_signal() {
        let mut rng = GameRng::new(0);
        for _ in 0..20 {
            assert_eq!(DisplayMode::pick(0, &mut rng), DisplayMode::Numbers);
            assert_eq!(DisplayMode::pick(6, &mut rng), DisplayMode::Words);
        }
    }

    #[test]
    fn test_click_order_sorts_by_value() {
        let mut rng = GameRng::new(31);
        let puzzle = MeteorSequencePuzzle::generate(3, &mut rng);
        let order = puzzle.click_order();
        let values: Vec<u32> = order.iter().map(|&id| puzzle.meteors[id].value).collect();
        assert!(values.windows(2).all(|w| w[0] < w[1]));
        assert!(!puzzle.check(&Response::Sequence(order[1..].to_vec())));
    }

    proptest! {
        #[test]
        fn prop_meteors_distinct_and_in_field(seed in any::<u64>(), signal in 0u32..40) {
            let mut rng = GameRng::new(seed);
            let p = params(signal);
            let puzzle = MeteorSequencePuzzle::generate(signal, &mut rng);
            prop_assert_eq!(puzzle.meteors.len(), p.count);
            let mut values: Vec<u32> = puzzle.meteors.iter().map(|m| m.value).collect();
            values.sort_unstable();
            values.dedup();
            prop_assert_eq!(values.len(), p.count);
            for m in &puzzle.meteors {
                prop_assert!(m.x >= METEOR_RADIUS && m.x <= FIELD_WIDTH - METEOR_RADIUS);
                prop_assert!(m.y >= METEOR_RADIUS && m.y <= FIELD_HEIGHT - METEOR_RADIUS);
                prop_assert!(m.spin.abs() <= p.spin as f32);
                if puzzle.mode == DisplayMode::Numbers {
                    prop_assert!(m.value >= 1 && m.value <= p.max_number);
                }
            }
            prop_assert!(puzzle.check(&puzzle.solution()));
        }

        #[test]
        fn prop_params_monotone(signal in 0u32..100) {
            let (a, b) = (params(signal), params(signal + 1));
            prop_assert!(b.count >= a.count && b.max_number >= a.max_number && b.spin >= a.spin);
        }
    }
}
