//! Timed round state machine
//!
//! One round of one game: `Tutorial -> Active -> TimeUp -> Complete`.
//! - The host drives it with monotonic timestamps (`ready`, `tick`)
//! - Answers are checked, scored and replaced immediately
//! - Exactly one `RoundResult` leaves a round, either from `tick` or `force_exit`
//!
//! Misuse never changes state; it returns a `RoundError`. An answer that
//! arrives after the budget ran out still moves the round to `TimeUp`.

use serde::{Deserialize, Serialize};

use crate::error::RoundError;
use crate::games::{self, GameId, Puzzle, Response};
use crate::rng::GameRng;
use crate::scoring::{self, Category};
use crate::settings::Settings;
use crate::timer::{Countdown, Deadline};

/// Phase of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    /// Instructions on screen, timer not running
    Tutorial,
    /// Timer running, answers accepted
    Active,
    /// Time ran out, waiting out the cosmetic delay
    TimeUp,
    /// Result emitted
    Complete,
}

/// Final tally of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundResult {
    /// Position of the round within its session
    pub round: usize,
    pub game: GameId,
    pub category: Category,
    pub score: u32,
    pub correct: u32,
    pub incorrect: u32,
}

/// Outcome of one submitted answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOutcome {
    pub correct: bool,
    /// Signed points for this answer (before the zero floor)
    pub delta: i32,
    /// Round score after the answer
    pub score: u32,
    /// A fresh puzzle replaced the answered one
    pub new_puzzle: bool,
}

/// Notifications for the presentation layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundEvent {
    Started,
    Answered(AnswerOutcome),
    /// Remaining whole seconds dropped while inside the warning window
    Warning { seconds_left: u64 },
    TimeUp,
    Completed(RoundResult),
}

/// Serializable view of a round for rendering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundState {
    pub game: GameId,
    pub phase: RoundPhase,
    pub puzzle: Puzzle,
    pub difficulty: u32,
    pub remaining_ms: u64,
    pub score: u32,
    pub correct: u32,
    pub incorrect: u32,
}

/// Drives a single timed round
#[derive(Debug, Clone)]
pub struct RoundController {
    round: usize,
    game: GameId,
    practice: bool,
    phase: RoundPhase,
    puzzle: Puzzle,
    difficulty: u32,
    rng: GameRng,

    // === Timing ===
    countdown: Countdown,
    finish: Deadline,
    time_up_delay_ms: u64,
    warning_threshold_ms: u64,
    last_warning: Option<u64>,

    // === Tally ===
    score: u32,
    correct: u32,
    incorrect: u32,
}

impl RoundController {
    /// Create a round in the tutorial phase with its first puzzle generated.
    /// The round draws from its own stream forked off `rng`.
    pub fn start(
        game: GameId,
        practice: bool,
        difficulty: u32,
        rng: &mut GameRng,
        settings: &Settings,
    ) -> Self {
        let mut rng = rng.fork();
        let puzzle = games::generate(game, difficulty, &mut rng);
        log::info!(
            "Round {} ready (practice: {}, difficulty: {})",
            game,
            practice,
            difficulty
        );
        Self {
            round: 0,
            game,
            practice,
            phase: RoundPhase::Tutorial,
            puzzle,
            difficulty,
            rng,
            countdown: Countdown::new(settings.round_time_ms),
            finish: Deadline::default(),
            time_up_delay_ms: settings.time_up_delay_ms,
            warning_threshold_ms: settings.warning_threshold_ms,
            last_warning: None,
            score: 0,
            correct: 0,
            incorrect: 0,
        }
    }

    /// Tag the round with its position in the session
    pub fn with_round(mut self, round: usize) -> Self {
        self.round = round;
        self
    }

    fn wrong_phase(&self, action: &'static str) -> RoundError {
        if self.phase == RoundPhase::Complete {
            RoundError::Finished
        } else {
            RoundError::WrongPhase {
                action,
                phase: self.phase,
            }
        }
    }

    /// Leave the tutorial and start the clock at `now_ms`
    pub fn ready(&mut self, now_ms: u64) -> Result<RoundEvent, RoundError> {
        if self.phase != RoundPhase::Tutorial {
            return Err(self.wrong_phase("start"));
        }
        self.countdown.start(now_ms);
        self.phase = RoundPhase::Active;
        log::info!("Round {} started", self.game);
        Ok(RoundEvent::Started)
    }

    /// Check and score an answer given at `now_ms`, then move on to the next
    /// puzzle. Answers after the budget ran out are rejected and end the clock.
    pub fn submit_answer(
        &mut self,
        now_ms: u64,
        response: &Response,
    ) -> Result<AnswerOutcome, RoundError> {
        if self.phase != RoundPhase::Active {
            return Err(self.wrong_phase("answer"));
        }
        if self.countdown.tick(now_ms) == 0 {
            self.expire(now_ms);
            return Err(self.wrong_phase("answer"));
        }
        let correct = self.puzzle.check(response);
        let delta = scoring::delta(self.game, correct);
        self.score = scoring::apply_delta(self.score, delta);
        if correct {
            self.correct += 1;
            self.difficulty = self.difficulty.saturating_add(1);
        } else {
            self.incorrect += 1;
        }

        let new_puzzle = self.puzzle.settle(response, correct);
        if new_puzzle {
            self.puzzle = games::generate(self.game, self.difficulty, &mut self.rng);
        }
        log::debug!(
            "{} answer {} ({:+}), score {}",
            self.game,
            if correct { "correct" } else { "wrong" },
            delta,
            self.score
        );
        Ok(AnswerOutcome {
            correct,
            delta,
            score: self.score,
            new_puzzle,
        })
    }

    /// Advance timers to `now_ms`. Returns at most one event per call.
    pub fn tick(&mut self, now_ms: u64) -> Option<RoundEvent> {
        match self.phase {
            RoundPhase::Active => {
                let remaining = self.countdown.tick(now_ms);
                if remaining == 0 {
                    self.expire(now_ms);
                    return Some(RoundEvent::TimeUp);
                }
                if remaining <= self.warning_threshold_ms {
                    let seconds_left = self.countdown.seconds_left();
                    if self.last_warning != Some(seconds_left) {
                        self.last_warning = Some(seconds_left);
                        return Some(RoundEvent::Warning { seconds_left });
                    }
                }
                None
            }
            RoundPhase::TimeUp => {
                if self.finish.poll(now_ms) {
                    Some(RoundEvent::Completed(self.complete()))
                } else {
                    None
                }
            }
            RoundPhase::Tutorial | RoundPhase::Complete => None,
        }
    }

    fn expire(&mut self, now_ms: u64) {
        self.countdown.cancel();
        self.finish.arm(now_ms, self.time_up_delay_ms);
        self.phase = RoundPhase::TimeUp;
        log::info!("Round {} time up", self.game);
    }

    /// Quit early. From the tutorial the result is all zeros.
    pub fn force_exit(&mut self) -> Result<RoundResult, RoundError> {
        match self.phase {
            RoundPhase::Tutorial | RoundPhase::Active => {
                log::info!("Round {} exited early", self.game);
                Ok(self.complete())
            }
            RoundPhase::TimeUp | RoundPhase::Complete => Err(self.wrong_phase("exit")),
        }
    }

    fn complete(&mut self) -> RoundResult {
        self.countdown.cancel();
        self.finish.cancel();
        self.phase = RoundPhase::Complete;
        let result = self.result();
        log::info!(
            "Round {} complete: score {} ({} correct, {} wrong)",
            self.game,
            result.score,
            result.correct,
            result.incorrect
        );
        result
    }

    /// Tally so far
    pub fn result(&self) -> RoundResult {
        RoundResult {
            round: self.round,
            game: self.game,
            category: self.game.category(),
            score: self.score,
            correct: self.correct,
            incorrect: self.incorrect,
        }
    }

    pub fn state(&self) -> RoundState {
        RoundState {
            game: self.game,
            phase: self.phase,
            puzzle: self.puzzle.clone(),
            difficulty: self.difficulty,
            remaining_ms: self.countdown.remaining_ms(),
            score: self.score,
            correct: self.correct,
            incorrect: self.incorrect,
        }
    }

    pub fn round(&self) -> usize {
        self.round
    }

    pub fn game(&self) -> GameId {
        self.game
    }

    pub fn is_practice(&self) -> bool {
        self.practice
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn puzzle(&self) -> &Puzzle {
        &self.puzzle
    }

    /// Current difficulty signal
    pub fn difficulty(&self) -> u32 {
        self.difficulty
    }

    pub fn remaining_ms(&self) -> u64 {
        self.countdown.remaining_ms()
    }

    pub fn seconds_left(&self) -> u64 {
        self.countdown.seconds_left()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn instructions(&self) -> &'static str {
        self.game.instructions()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::calculate;

    fn round(game: GameId) -> RoundController {
        let mut rng = GameRng::new(42);
        RoundController::start(game, false, 0, &mut rng, &Settings::default())
    }

    /// A response that is never correct for `game`
    fn wrong_answer() -> Response {
        Response::Choice(usize::MAX)
    }

    #[test]
    fn test_exit_during_tutorial_is_zero() {
        let mut r = round(GameId::CubeCounter);
        let result = r.force_exit().unwrap();
        assert_eq!((result.score, result.correct, result.incorrect), (0, 0, 0));
        assert_eq!(result.category, Category::Analyse);
        assert_eq!(r.phase(), RoundPhase::Complete);
        assert_eq!(r.force_exit(), Err(RoundError::Finished));
    }

    #[test]
    fn test_answers_rejected_outside_active() {
        let mut r = round(GameId::Calculate);
        let answer = r.puzzle().solution();
        assert_eq!(
            r.submit_answer(0, &answer),
            Err(RoundError::WrongPhase {
                action: "answer",
                phase: RoundPhase::Tutorial
            })
        );
        assert_eq!(r.state().correct, 0);
        r.ready(0).unwrap();
        assert!(matches!(r.ready(10), Err(RoundError::WrongPhase { .. })));
    }

    #[test]
    fn test_ten_correct_practice_answers_raise_difficulty() {
        let mut rng = GameRng::new(7);
        let mut r = RoundController::start(GameId::Calculate, true, 0, &mut rng, &Settings::default());
        r.ready(0).unwrap();
        let mut last_max = calculate::params(0).max_operand;
        for i in 1..=10 {
            let answer = r.puzzle().solution();
            let outcome = r.submit_answer(u64::from(i) * 1_000, &answer).unwrap();
            assert!(outcome.correct);
            assert_eq!(outcome.score, 27 * i);
            let max = calculate::params(r.difficulty()).max_operand;
            assert!(max >= last_max);
            last_max = max;
        }
        assert_eq!(r.difficulty(), 10);
        assert!(last_max > calculate::params(0).max_operand);
        let result = r.force_exit().unwrap();
        assert_eq!((result.correct, result.incorrect, result.score), (10, 0, 270));
    }

    #[test]
    fn test_wrong_answer_floors_score() {
        let mut r = round(GameId::WeightGame);
        r.ready(0).unwrap();
        let outcome = r.submit_answer(500, &wrong_answer()).unwrap();
        assert_eq!((outcome.correct, outcome.delta, outcome.score), (false, -16, 0));
        assert_eq!(r.difficulty(), 0);
    }

    #[test]
    fn test_jittery_ticks_consume_measured_time() {
        let mut r = round(GameId::MissingSign);
        r.ready(1_000).unwrap();
        let mut now = 1_000;
        for step in [90, 130, 100, 80, 150] {
            now += step;
            r.tick(now);
        }
        assert_eq!(r.remaining_ms(), 60_000 - 550);
    }

    #[test]
    fn test_timeout_completes_after_delay() {
        let mut r = round(GameId::ShapeOrder);
        r.ready(0).unwrap();
        assert_eq!(r.tick(60_000), Some(RoundEvent::TimeUp));
        assert_eq!(r.phase(), RoundPhase::TimeUp);
        assert!(r.submit_answer(60_500, &wrong_answer()).is_err());
        assert!(matches!(r.force_exit(), Err(RoundError::WrongPhase { .. })));
        assert_eq!(r.tick(61_999), None);
        match r.tick(62_000) {
            Some(RoundEvent::Completed(result)) => assert_eq!(result.game, GameId::ShapeOrder),
            other => panic!("expected completion, got {other:?}"),
        }
        // Result is emitted exactly once
        assert_eq!(r.tick(70_000), None);
        assert_eq!(r.ready(70_000), Err(RoundError::Finished));
    }

    #[test]
    fn test_late_answer_is_not_scored() {
        let mut r = round(GameId::Calculate);
        r.ready(0).unwrap();
        assert!(matches!(r.tick(59_950), Some(RoundEvent::Warning { seconds_left: 1 })));
        let answer = r.puzzle().solution();
        let before = r.puzzle().clone();
        assert_eq!(
            r.submit_answer(60_050, &answer),
            Err(RoundError::WrongPhase {
                action: "answer",
                phase: RoundPhase::TimeUp
            })
        );
        assert_eq!(r.phase(), RoundPhase::TimeUp);
        assert_eq!((r.score(), r.state().correct), (0, 0));
        assert_eq!(r.puzzle(), &before);
        // The delay runs from the rejected answer, and TimeUp is not repeated
        assert_eq!(r.tick(62_000), None);
        match r.tick(62_050) {
            Some(RoundEvent::Completed(result)) => assert_eq!(result.score, 0),
            other => panic!("expected completion, got {other:?}"),
        }
    }

    #[test]
    fn test_answer_just_before_expiry_counts() {
        let mut r = round(GameId::Calculate);
        r.ready(0).unwrap();
        let answer = r.puzzle().solution();
        let outcome = r.submit_answer(59_999, &answer).unwrap();
        assert!(outcome.correct);
        assert_eq!(r.remaining_ms(), 1);
        assert_eq!(r.tick(60_000), Some(RoundEvent::TimeUp));
    }

    #[test]
    fn test_warnings_once_per_second() {
        let mut r = round(GameId::CarPath);
        r.ready(0).unwrap();
        let mut warnings = Vec::new();
        let mut now = 0;
        while now < 59_900 {
            now += 100;
            if let Some(RoundEvent::Warning { seconds_left }) = r.tick(now) {
                warnings.push(seconds_left);
            }
        }
        assert_eq!(warnings, (1..=10).rev().collect::<Vec<u64>>());
    }

    #[test]
    fn test_match_card_board_persists() {
        let mut r = round(GameId::MatchCard);
        r.ready(0).unwrap();
        let answer = r.puzzle().solution();
        let outcome = r.submit_answer(1_000, &answer).unwrap();
        assert!(outcome.correct);
        // Board at difficulty 0 has two pairs, so one remains
        assert!(!outcome.new_puzzle);
        let answer = r.puzzle().solution();
        assert!(r.submit_answer(2_000, &answer).unwrap().new_puzzle);
    }

    #[test]
    fn test_state_snapshot_serializes() {
        let r = round(GameId::MathCombination);
        let json = serde_json::to_string(&r.state()).unwrap();
        assert!(json.contains("\"phase\":\"Tutorial\""));
    }
}
