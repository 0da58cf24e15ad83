//! Scoring policy: per-game points, category mapping, score floor

use serde::{Deserialize, Serialize};

use crate::consts::CATEGORY_COUNT;
use crate::games::GameId;
use crate::rng::GameRng;

/// Score aggregation category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Analyse,
    Calculate,
    Memory,
    Identify,
}

impl Category {
    /// All categories, in full-test order
    pub const ALL: [Category; CATEGORY_COUNT] = [
        Category::Analyse,
        Category::Calculate,
        Category::Memory,
        Category::Identify,
    ];

    /// Index into a `[_; CATEGORY_COUNT]` score array
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Category::Analyse => "Analyse",
            Category::Calculate => "Calculate",
            Category::Memory => "Memory",
            Category::Identify => "Identify",
        }
    }

    /// Games drawn from for this category in a full test
    pub fn games(self) -> &'static [GameId] {
        match self {
            Category::Analyse => &[GameId::CubeCounter, GameId::WeightGame, GameId::CarPath],
            Category::Calculate => &[
                GameId::Calculate,
                GameId::MissingSign,
                GameId::MathCombination,
            ],
            Category::Memory => &[GameId::ShapeOrder, GameId::MatchCard, GameId::MemorySequence],
            Category::Identify => &[
                GameId::MeteorSequence,
                GameId::JigsawMatch,
                GameId::SequenceMatch,
            ],
        }
    }
}

/// Points awarded for one answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Points {
    pub correct: i32,
    pub incorrect: i32,
}

/// Static points table
pub fn points(game: GameId) -> Points {
    let (correct, incorrect) = match game {
        GameId::ShapeOrder => (18, -12),
        GameId::MatchCard => (26, -18),
        GameId::Calculate => (27, -18),
        GameId::MissingSign => (20, -12),
        GameId::CubeCounter => (49, -33),
        GameId::WeightGame => (24, -16),
        GameId::MeteorSequence => (11, -11),
        GameId::JigsawMatch => (19, -13),
        GameId::MathCombination => (44, -29),
        GameId::SequenceMatch => (40, -26),
        GameId::MemorySequence => (13, -8),
        GameId::CarPath => (26, -17),
    };
    Points { correct, incorrect }
}

/// Signed score change for an answer
pub fn delta(game: GameId, correct: bool) -> i32 {
    let p = points(game);
    if correct { p.correct } else { p.incorrect }
}

/// Apply a delta, flooring the result at zero
pub fn apply_delta(total: u32, delta: i32) -> u32 {
    let next = i64::from(total) + i64::from(delta);
    next.clamp(0, i64::from(u32::MAX)) as u32
}

/// Category a game's score counts toward
pub fn category_of(game: GameId) -> Category {
    match game {
        GameId::CubeCounter | GameId::WeightGame | GameId::CarPath => Category::Analyse,
        GameId::Calculate | GameId::MissingSign | GameId::MathCombination => Category::Calculate,
        GameId::ShapeOrder | GameId::MatchCard | GameId::MemorySequence => Category::Memory,
        GameId::MeteorSequence | GameId::JigsawMatch | GameId::SequenceMatch => Category::Identify,
    }
}

/// One uniformly chosen game per category, in category order
pub fn select_full_test(rng: &mut GameRng) -> Vec<GameId> {
    Category::ALL
        .iter()
        .filter_map(|category| rng.pick(category.games()).copied())
        .collect()
}

/// Sum of category scores
pub fn total_score(category_scores: &[u32; CATEGORY_COUNT]) -> u32 {
    category_scores.iter().copied().fold(0u32, u32::saturating_add)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_points_table() {
        assert_eq!(delta(GameId::CubeCounter, true), 49);
        assert_eq!(delta(GameId::CubeCounter, false), -33);
        assert_eq!(delta(GameId::MemorySequence, false), -8);
        for game in GameId::ALL {
            let p = points(game);
            assert!(p.correct > 0 && p.incorrect < 0, "{game:?}");
        }
    }

    #[test]
    fn test_apply_delta_floors_at_zero() {
        assert_eq!(apply_delta(10, -18), 0);
        assert_eq!(apply_delta(30, -18), 12);
        assert_eq!(apply_delta(0, 27), 27);
    }

    #[test]
    fn test_category_tables_agree() {
        for category in Category::ALL {
            assert_eq!(category.games().len(), 3);
            for &game in category.games() {
                assert_eq!(category_of(game), category);
            }
        }
        let listed: usize = Category::ALL.iter().map(|c| c.games().len()).sum();
        assert_eq!(listed, GameId::ALL.len());
    }

    #[test]
    fn test_select_full_test_one_per_category() {
        let mut rng = GameRng::new(2024);
        for _ in 0..20 {
            let games = select_full_test(&mut rng);
            assert_eq!(games.len(), CATEGORY_COUNT);
            for (game, category) in games.iter().zip(Category::ALL) {
                assert_eq!(category_of(*game), category);
            }
        }
    }

    #[test]
    fn test_total_score() {
        assert_eq!(total_score(&[1, 2, 3, 4]), 10);
    }

    proptest! {
        #[test]
        fn prop_score_never_negative(answers in proptest::collection::vec((0usize..12, any::<bool>()), 0..200)) {
            let mut score = 0u32;
            for (game_idx, correct) in answers {
                let game = GameId::ALL[game_idx];
                let before = score;
                score = apply_delta(score, delta(game, correct));
                if correct {
                    prop_assert!(score > before);
                } else {
                    prop_assert!(score <= before);
                }
            }
        }
    }
}
