//! Session orchestration - full test or practice
//!
//! A full test plays one random game from each category in the fixed
//! category order. Practice repeats a single game until the player stops,
//! carrying the difficulty over from round to round.

use serde::{Deserialize, Serialize};

use crate::brain_types::TierInfo;
use crate::consts::CATEGORY_COUNT;
use crate::error::SessionError;
use crate::games::GameId;
use crate::rng::GameRng;
use crate::round::{RoundController, RoundResult};
use crate::scoring;
use crate::settings::Settings;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionMode {
    FullTest,
    Practice(GameId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    Playing,
    Complete,
}

/// End-of-session report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSummary {
    pub mode: SessionMode,
    pub total_score: u32,
    pub category_scores: [u32; CATEGORY_COUNT],
    pub results: Vec<RoundResult>,
    pub tier: TierInfo,
    /// Display brain weight (grams)
    pub brain_weight: u32,
}

/// Owns the sequence of games and the running scores
#[derive(Debug, Clone)]
pub struct SessionOrchestrator {
    mode: SessionMode,
    phase: SessionPhase,
    games: Vec<GameId>,
    current: usize,
    category_scores: [u32; CATEGORY_COUNT],
    results: Vec<RoundResult>,
}

impl SessionOrchestrator {
    fn new(mode: SessionMode, games: Vec<GameId>) -> Self {
        Self {
            mode,
            phase: SessionPhase::Playing,
            games,
            current: 0,
            category_scores: [0; CATEGORY_COUNT],
            results: Vec::new(),
        }
    }

    /// One random game per category: Analyse, Calculate, Memory, Identify
    pub fn start_full_test(rng: &mut GameRng) -> Self {
        let games = scoring::select_full_test(rng);
        log::info!("Full test: {:?}", games);
        Self::new(SessionMode::FullTest, games)
    }

    /// Repeat `game` until `finish` is called
    pub fn start_practice(game: GameId) -> Self {
        log::info!("Practice: {}", game);
        Self::new(SessionMode::Practice(game), vec![game])
    }

    pub fn mode(&self) -> SessionMode {
        self.mode
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn games(&self) -> &[GameId] {
        &self.games
    }

    /// Index of the round being played (0-based)
    pub fn round_index(&self) -> usize {
        self.current
    }

    /// Game of the round being played; `None` once complete
    pub fn current_game(&self) -> Option<GameId> {
        match (self.phase, self.mode) {
            (SessionPhase::Complete, _) => None,
            (_, SessionMode::Practice(game)) => Some(game),
            (_, SessionMode::FullTest) => self.games.get(self.current).copied(),
        }
    }

    /// Starting difficulty for the next round. Practice carries over the
    /// correct answers of earlier rounds; full-test rounds start fresh.
    pub fn starting_difficulty(&self) -> u32 {
        match self.mode {
            SessionMode::FullTest => 0,
            SessionMode::Practice(_) => self.results.iter().map(|r| r.correct).sum(),
        }
    }

    /// Build the controller for the current round. Only the result of a
    /// round issued for the current position is accepted back.
    pub fn next_round(
        &self,
        rng: &mut GameRng,
        settings: &Settings,
    ) -> Result<RoundController, SessionError> {
        let game = self.current_game().ok_or(SessionError::Completed)?;
        let practice = matches!(self.mode, SessionMode::Practice(_));
        Ok(RoundController::start(
            game,
            practice,
            self.starting_difficulty(),
            rng,
            settings,
        )
        .with_round(self.current))
    }

    /// Record a finished round and advance
    pub fn on_round_complete(&mut self, result: RoundResult) -> Result<(), SessionError> {
        let expected = self.current_game().ok_or(SessionError::Completed)?;
        if result.game != expected {
            return Err(SessionError::UnexpectedGame {
                expected,
                got: result.game,
            });
        }
        if result.round != self.current {
            return Err(SessionError::UnexpectedRound {
                expected: self.current,
                got: result.round,
            });
        }
        let slot = &mut self.category_scores[result.category.index()];
        *slot = slot.saturating_add(result.score);
        self.results.push(result);
        self.current += 1;
        log::info!(
            "Round {} recorded: {} points (total {})",
            result.game,
            result.score,
            self.total_score()
        );

        if self.mode == SessionMode::FullTest && self.current >= self.games.len() {
            self.phase = SessionPhase::Complete;
            log::info!("Full test complete: {}", self.total_score());
        }
        Ok(())
    }

    /// End the session (practice ends only this way)
    pub fn finish(&mut self) -> SessionSummary {
        if self.phase != SessionPhase::Complete {
            log::info!("Session finished after {} rounds", self.results.len());
        }
        self.phase = SessionPhase::Complete;
        self.summary()
    }

    pub fn total_score(&self) -> u32 {
        scoring::total_score(&self.category_scores)
    }

    pub fn category_scores(&self) -> &[u32; CATEGORY_COUNT] {
        &self.category_scores
    }

    pub fn results(&self) -> &[RoundResult] {
        &self.results
    }

    pub fn summary(&self) -> SessionSummary {
        let total_score = self.total_score();
        SessionSummary {
            mode: self.mode,
            total_score,
            category_scores: self.category_scores,
            results: self.results.clone(),
            tier: TierInfo::for_score(total_score),
            brain_weight: crate::brain_types::brain_weight(total_score),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::round::{RoundEvent, RoundPhase};
    use crate::scoring::Category;

    /// Play a round answering every puzzle correctly, one answer per second
    fn play_round(round: &mut RoundController, answers: usize) -> RoundResult {
        round.ready(0).unwrap();
        let mut now = 0;
        for _ in 0..answers {
            now += 1_000;
            round.tick(now);
            let answer = round.puzzle().solution();
            round.submit_answer(now, &answer).unwrap();
        }
        loop {
            now += 100;
            if let Some(RoundEvent::Completed(result)) = round.tick(now) {
                return result;
            }
        }
    }

    #[test]
    fn test_full_test_end_to_end() {
        let mut rng = GameRng::new(2025);
        let settings = Settings::default();
        let mut session = SessionOrchestrator::start_full_test(&mut rng);
        assert_eq!(session.games().len(), 4);

        for (i, category) in Category::ALL.into_iter().enumerate() {
            let game = session.current_game().unwrap();
            assert_eq!(game.category(), category);
            let mut round = session.next_round(&mut rng, &settings).unwrap();
            assert_eq!(round.difficulty(), 0);
            let result = play_round(&mut round, 3);
            assert_eq!(round.phase(), RoundPhase::Complete);
            assert_eq!(result.correct, 3);
            session.on_round_complete(result).unwrap();
            assert_eq!(session.round_index(), i + 1);
        }

        assert_eq!(session.phase(), SessionPhase::Complete);
        let summary = session.summary();
        let expected: u32 = summary.results.iter().map(|r| r.score).sum();
        assert_eq!(summary.total_score, expected);
        assert_eq!(summary.category_scores.iter().sum::<u32>(), expected);
        assert!(summary.tier.contains(expected));
        for (result, category) in summary.results.iter().zip(Category::ALL) {
            assert_eq!(summary.category_scores[category.index()], result.score);
        }
        assert!(session.next_round(&mut rng, &settings).is_err());
    }

    #[test]
    fn test_result_after_completion_rejected() {
        let mut rng = GameRng::new(1);
        let mut session = SessionOrchestrator::start_full_test(&mut rng);
        let settings = Settings::default();
        for _ in 0..4 {
            let mut round = session.next_round(&mut rng, &settings).unwrap();
            let result = round.force_exit().unwrap();
            session.on_round_complete(result).unwrap();
        }
        let stray = session.results()[0];
        assert_eq!(session.on_round_complete(stray), Err(SessionError::Completed));
        assert_eq!(session.results().len(), 4);
    }

    #[test]
    fn test_result_for_wrong_game_rejected() {
        let mut session = SessionOrchestrator::start_practice(GameId::CarPath);
        let result = RoundResult {
            round: 0,
            game: GameId::Calculate,
            category: Category::Calculate,
            score: 99,
            correct: 4,
            incorrect: 0,
        };
        assert_eq!(
            session.on_round_complete(result),
            Err(SessionError::UnexpectedGame {
                expected: GameId::CarPath,
                got: GameId::Calculate
            })
        );
        assert_eq!(session.total_score(), 0);
        assert!(session.results().is_empty());
    }

    #[test]
    fn test_stale_practice_round_rejected() {
        let mut rng = GameRng::new(3);
        let settings = Settings::default();
        let mut session = SessionOrchestrator::start_practice(GameId::Calculate);

        let mut first = session.next_round(&mut rng, &settings).unwrap();
        let mut stale = session.next_round(&mut rng, &settings).unwrap();
        assert_eq!((first.round(), stale.round()), (0, 0));
        session.on_round_complete(play_round(&mut first, 2)).unwrap();

        let replay = play_round(&mut stale, 1);
        assert_eq!(
            session.on_round_complete(replay),
            Err(SessionError::UnexpectedRound {
                expected: 1,
                got: 0
            })
        );
        assert_eq!(session.results().len(), 1);
        assert_eq!(session.total_score(), 54);

        let mut second = session.next_round(&mut rng, &settings).unwrap();
        assert_eq!(second.round(), 1);
        session.on_round_complete(play_round(&mut second, 1)).unwrap();
        assert_eq!(session.results().len(), 2);
    }

    #[test]
    fn test_practice_carries_difficulty() {
        let mut rng = GameRng::new(9);
        let settings = Settings::default();
        let mut session = SessionOrchestrator::start_practice(GameId::MemorySequence);

        let mut round = session.next_round(&mut rng, &settings).unwrap();
        let result = play_round(&mut round, 4);
        session.on_round_complete(result).unwrap();
        assert_eq!(session.phase(), SessionPhase::Playing);

        let round = session.next_round(&mut rng, &settings).unwrap();
        assert!(round.is_practice());
        assert_eq!(round.difficulty(), 4);

        let summary = session.finish();
        assert_eq!(session.phase(), SessionPhase::Complete);
        assert_eq!(summary.results.len(), 1);
        assert_eq!(summary.mode, SessionMode::Practice(GameId::MemorySequence));
        assert_eq!(session.current_game(), None);
    }
}
