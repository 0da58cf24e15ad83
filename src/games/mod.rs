//! Puzzle generators for the twelve minigames
//!
//! Every family implements [`PuzzleGenerator`]: a pure `generate` driven by
//! the difficulty signal plus an answer check. [`Puzzle`] is the closed
//! tagged union the round controller and presentation layer work with.
//!
//! Generators keep no state between calls. The only input besides the RNG is
//! the difficulty signal, passed by value.

pub mod arith;
pub mod calculate;
pub mod car_path;
pub mod cube_counter;
pub mod difficulty;
pub mod jigsaw_match;
pub mod match_card;
pub mod math_combination;
pub mod memory_sequence;
pub mod meteor_sequence;
pub mod missing_sign;
pub mod sequence;
pub mod sequence_match;
pub mod shape_order;
pub mod weight_game;

use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use arith::Op;
pub use calculate::CalculatePuzzle;
pub use car_path::CarPathPuzzle;
pub use cube_counter::CubeCounterPuzzle;
pub use jigsaw_match::JigsawMatchPuzzle;
pub use match_card::MatchCardPuzzle;
pub use math_combination::{Card, MathCombinationPuzzle};
pub use memory_sequence::MemorySequencePuzzle;
pub use meteor_sequence::MeteorSequencePuzzle;
pub use missing_sign::MissingSignPuzzle;
pub use sequence::{InputTracker, Step};
pub use sequence_match::SequenceMatchPuzzle;
pub use shape_order::ShapeOrderPuzzle;
pub use weight_game::WeightGamePuzzle;

use crate::rng::GameRng;
use crate::scoring::{self, Category};

/// Game identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GameId {
    Calculate,
    CarPath,
    CubeCounter,
    JigsawMatch,
    MatchCard,
    MathCombination,
    MemorySequence,
    MeteorSequence,
    MissingSign,
    SequenceMatch,
    ShapeOrder,
    WeightGame,
}

impl GameId {
    pub const ALL: [GameId; 12] = [
        GameId::Calculate,
        GameId::CarPath,
        GameId::CubeCounter,
        GameId::JigsawMatch,
        GameId::MatchCard,
        GameId::MathCombination,
        GameId::MemorySequence,
        GameId::MeteorSequence,
        GameId::MissingSign,
        GameId::SequenceMatch,
        GameId::ShapeOrder,
        GameId::WeightGame,
    ];

    pub fn name(self) -> &'static str {
        match self {
            GameId::Calculate => "Calculate",
            GameId::CarPath => "CarPath",
            GameId::CubeCounter => "CubeCounter",
            GameId::JigsawMatch => "JigsawMatch",
            GameId::MatchCard => "MatchCard",
            GameId::MathCombination => "MathCombination",
            GameId::MemorySequence => "MemorySequence",
            GameId::MeteorSequence => "MeteorSequence",
            GameId::MissingSign => "MissingSign",
            GameId::SequenceMatch => "SequenceMatch",
            GameId::ShapeOrder => "ShapeOrder",
            GameId::WeightGame => "WeightGame",
        }
    }

    pub fn category(self) -> Category {
        scoring::category_of(self)
    }

    /// Tutorial text shown before the round starts
    pub fn instructions(self) -> &'static str {
        match self {
            GameId::WeightGame => "Select the HEAVIEST ITEM on the scales. TAP the item to answer.",
            GameId::Calculate => "Solve the math problem as fast as you can!",
            GameId::CarPath => "Find where each car ends up after following the crossings.",
            GameId::CubeCounter => "Count all the cubes in the structure.",
            GameId::JigsawMatch => "Find the piece that fits the hole.",
            GameId::MatchCard => "Match the pairs of cards.",
            GameId::MathCombination => "Fill the blanks so the equation reaches the target.",
            GameId::MemorySequence => "Remember and repeat the sequence.",
            GameId::MeteorSequence => "Tap the meteors in order.",
            GameId::MissingSign => "Find the missing math sign.",
            GameId::SequenceMatch => "Trace the colour sequence on the hex grid.",
            GameId::ShapeOrder => "Put the shapes in the correct order.",
        }
    }
}

impl std::fmt::Display for GameId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GameId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.replace(['-', '_', ' '], "").to_lowercase();
        GameId::ALL
            .into_iter()
            .find(|g| g.name().to_lowercase() == wanted)
            .ok_or_else(|| format!("unknown game `{s}`"))
    }
}

/// Player response. A response of the wrong shape for a puzzle is incorrect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Response {
    /// Typed number (Calculate, CubeCounter)
    Number(i64),
    /// Chosen operator (MissingSign)
    Operator(Op),
    /// Chosen option or item index (JigsawMatch, WeightGame, single-car CarPath)
    Choice(usize),
    /// Ordered tokens, lanes, cells or ids
    Sequence(Vec<usize>),
    /// Two card indices (MatchCard)
    Pair(usize, usize),
    /// Cards placed into slots in order (MathCombination)
    Cards(Vec<Card>),
}

/// Generate/check capability shared by every family
pub trait PuzzleGenerator: Sized {
    const GAME: GameId;

    /// Build a fresh, solvable instance for the given difficulty signal
    fn generate(difficulty: u32, rng: &mut GameRng) -> Self;

    /// Apply the family's answer-equivalence rule
    fn check(&self, response: &Response) -> bool;

    /// A response that `check` accepts
    fn solution(&self) -> Response;
}

/// One concrete puzzle, tagged by game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Puzzle {
    Calculate(CalculatePuzzle),
    CarPath(CarPathPuzzle),
    CubeCounter(CubeCounterPuzzle),
    JigsawMatch(JigsawMatchPuzzle),
    MatchCard(MatchCardPuzzle),
    MathCombination(MathCombinationPuzzle),
    MemorySequence(MemorySequencePuzzle),
    MeteorSequence(MeteorSequencePuzzle),
    MissingSign(MissingSignPuzzle),
    SequenceMatch(SequenceMatchPuzzle),
    ShapeOrder(ShapeOrderPuzzle),
    WeightGame(WeightGamePuzzle),
}

impl Puzzle {
    /// Generate a puzzle for `game`
    pub fn generate(game: GameId, difficulty: u32, rng: &mut GameRng) -> Self {
        let puzzle = match game {
            GameId::Calculate => Puzzle::Calculate(CalculatePuzzle::generate(difficulty, rng)),
            GameId::CarPath => Puzzle::CarPath(CarPathPuzzle::generate(difficulty, rng)),
            GameId::CubeCounter => {
                Puzzle::CubeCounter(CubeCounterPuzzle::generate(difficulty, rng))
            }
            GameId::JigsawMatch => {
                Puzzle::JigsawMatch(JigsawMatchPuzzle::generate(difficulty, rng))
            }
            GameId::MatchCard => Puzzle::MatchCard(MatchCardPuzzle::generate(difficulty, rng)),
            GameId::MathCombination => {
                Puzzle::MathCombination(MathCombinationPuzzle::generate(difficulty, rng))
            }
            GameId::MemorySequence => {
                Puzzle::MemorySequence(MemorySequencePuzzle::generate(difficulty, rng))
            }
            GameId::MeteorSequence => {
                Puzzle::MeteorSequence(MeteorSequencePuzzle::generate(difficulty, rng))
            }
            GameId::MissingSign => {
                Puzzle::MissingSign(MissingSignPuzzle::generate(difficulty, rng))
            }
            GameId::SequenceMatch => {
                Puzzle::SequenceMatch(SequenceMatchPuzzle::generate(difficulty, rng))
            }
            GameId::ShapeOrder => Puzzle::ShapeOrder(ShapeOrderPuzzle::generate(difficulty, rng)),
            GameId::WeightGame => Puzzle::WeightGame(WeightGamePuzzle::generate(difficulty, rng)),
        };
        log::debug!("Generated {} puzzle at difficulty {}", game, difficulty);
        puzzle
    }

    pub fn game(&self) -> GameId {
        match self {
            Puzzle::Calculate(_) => GameId::Calculate,
            Puzzle::CarPath(_) => GameId::CarPath,
            Puzzle::CubeCounter(_) => GameId::CubeCounter,
            Puzzle::JigsawMatch(_) => GameId::JigsawMatch,
            Puzzle::MatchCard(_) => GameId::MatchCard,
            Puzzle::MathCombination(_) => GameId::MathCombination,
            Puzzle::MemorySequence(_) => GameId::MemorySequence,
            Puzzle::MeteorSequence(_) => GameId::MeteorSequence,
            Puzzle::MissingSign(_) => GameId::MissingSign,
            Puzzle::SequenceMatch(_) => GameId::SequenceMatch,
            Puzzle::ShapeOrder(_) => GameId::ShapeOrder,
            Puzzle::WeightGame(_) => GameId::WeightGame,
        }
    }

    pub fn check(&self, response: &Response) -> bool {
        match self {
            Puzzle::Calculate(p) => p.check(response),
            Puzzle::CarPath(p) => p.check(response),
            Puzzle::CubeCounter(p) => p.check(response),
            Puzzle::JigsawMatch(p) => p.check(response),
            Puzzle::MatchCard(p) => p.check(response),
            Puzzle::MathCombination(p) => p.check(response),
            Puzzle::MemorySequence(p) => p.check(response),
            Puzzle::MeteorSequence(p) => p.check(response),
            Puzzle::MissingSign(p) => p.check(response),
            Puzzle::SequenceMatch(p) => p.check(response),
            Puzzle::ShapeOrder(p) => p.check(response),
            Puzzle::WeightGame(p) => p.check(response),
        }
    }

    pub fn solution(&self) -> Response {
        match self {
            Puzzle::Calculate(p) => p.solution(),
            Puzzle::CarPath(p) => p.solution(),
            Puzzle::CubeCounter(p) => p.solution(),
            Puzzle::JigsawMatch(p) => p.solution(),
            Puzzle::MatchCard(p) => p.solution(),
            Puzzle::MathCombination(p) => p.solution(),
            Puzzle::MemorySequence(p) => p.solution(),
            Puzzle::MeteorSequence(p) => p.solution(),
            Puzzle::MissingSign(p) => p.solution(),
            Puzzle::SequenceMatch(p) => p.solution(),
            Puzzle::ShapeOrder(p) => p.solution(),
            Puzzle::WeightGame(p) => p.solution(),
        }
    }

    /// Record a checked answer. Returns true when a fresh puzzle is needed.
    ///
    /// Only MatchCard keeps its board across answers; every other family is
    /// replaced after each answer.
    pub fn settle(&mut self, response: &Response, correct: bool) -> bool {
        match self {
            Puzzle::MatchCard(board) => {
                if correct && let Response::Pair(a, b) = response {
                    board.mark_matched(*a, *b);
                }
                board.is_cleared()
            }
            _ => true,
        }
    }

    /// Token-by-token checker for the families answered as an ordered sequence
    pub fn input_tracker(&self) -> Option<InputTracker> {
        match self {
            Puzzle::MemorySequence(p) => Some(InputTracker::new(p.sequence.clone())),
            Puzzle::ShapeOrder(p) => Some(InputTracker::new(p.sequence.clone())),
            Puzzle::MeteorSequence(p) => Some(InputTracker::new(p.click_order())),
            Puzzle::SequenceMatch(p) => Some(InputTracker::new(p.path.clone())),
            _ => None,
        }
    }
}

/// Generate a puzzle for `game` at `difficulty`
pub fn generate(game: GameId, difficulty: u32, rng: &mut GameRng) -> Puzzle {
    Puzzle::generate(game, difficulty, rng)
}

/// Check a response against a puzzle
pub fn check_answer(puzzle: &Puzzle, response: &Response) -> bool {
    puzzle.check(response)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_names_round_trip() {
        for game in GameId::ALL {
            assert_eq!(game.name().parse::<GameId>(), Ok(game));
        }
        assert_eq!("math-combination".parse::<GameId>(), Ok(GameId::MathCombination));
        assert!("Tetris".parse::<GameId>().is_err());
    }

    #[test]
    fn test_every_game_solution_checks() {
        let mut rng = GameRng::new(1234);
        for game in GameId::ALL {
            for difficulty in [0, 1, 5, 12, 30, 200] {
                let puzzle = generate(game, difficulty, &mut rng);
                assert_eq!(puzzle.game(), game);
                assert!(
                    check_answer(&puzzle, &puzzle.solution()),
                    "{game} at {difficulty}: {puzzle:?}"
                );
            }
        }
    }

    #[test]
    fn test_wrong_shape_is_incorrect() {
        let mut rng = GameRng::new(99);
        for game in GameId::ALL {
            let puzzle = generate(game, 3, &mut rng);
            let wrong_shape = match puzzle.solution() {
                Response::Cards(_) => Response::Number(1),
                _ => Response::Cards(Vec::new()),
            };
            assert!(!check_answer(&puzzle, &wrong_shape), "{game}");
        }
    }

    #[test]
    fn test_settle_replaces_all_but_match_card() {
        let mut rng = GameRng::new(5);
        for game in GameId::ALL {
            let mut puzzle = generate(game, 0, &mut rng);
            let answer = puzzle.solution();
            let needs_new = puzzle.settle(&answer, true);
            assert_eq!(needs_new, game != GameId::MatchCard, "{game}");
        }
    }

    #[test]
    fn test_input_tracker_accepts_solution() {
        let mut rng = GameRng::new(8);
        for game in GameId::ALL {
            let puzzle = generate(game, 4, &mut rng);
            let Some(mut tracker) = puzzle.input_tracker() else {
                continue;
            };
            let Response::Sequence(tokens) = puzzle.solution() else {
                panic!("{game} solution is not a sequence");
            };
            let last = tokens.len() - 1;
            for (i, token) in tokens.into_iter().enumerate() {
                let step = tracker.push(token);
                assert_eq!(step, if i == last { Step::Complete } else { Step::Continue });
            }
        }
    }
}
