//! Brain Test - puzzle core for a multi-minigame brain test
//!
//! Core modules:
//! - `rng`: Seedable RNG with shuffle/pick helpers
//! - `games`: The twelve puzzle generators and their answer checks
//! - `scoring`: Per-game points, categories, score floor
//! - `round`: Timed round state machine
//! - `session`: Full test / practice orchestration
//! - `brain_types`: Score to brain-type tier classification
//! - `settings`: Timing configuration (JSON)
//!
//! Rendering, audio and input live in the presentation layer. It drives the
//! core with timestamps and responses and renders whatever state comes back.

pub mod brain_types;
pub mod error;
pub mod games;
pub mod rng;
pub mod round;
pub mod scoring;
pub mod session;
pub mod settings;
pub mod timer;

pub use brain_types::{BrainTypeTier, TierInfo, classify};
pub use error::{RoundError, SessionError, SettingsError};
pub use games::{GameId, Puzzle, Response, check_answer, generate};
pub use rng::GameRng;
pub use round::{RoundController, RoundEvent, RoundPhase, RoundResult};
pub use scoring::Category;
pub use session::{SessionMode, SessionOrchestrator, SessionPhase, SessionSummary};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Time budget of one round (ms)
    pub const ROUND_TIME_MS: u64 = 60_000;
    /// Nominal host tick interval (ms). Actual elapsed time is measured.
    pub const TICK_INTERVAL_MS: u64 = 100;
    /// Delay between "time's up" and the round result (ms)
    pub const TIME_UP_DELAY_MS: u64 = 2_000;
    /// Below this remaining time, whole-second warnings are emitted (ms)
    pub const WARNING_THRESHOLD_MS: u64 = 10_000;

    /// Number of score categories
    pub const CATEGORY_COUNT: usize = 4;

    /// Bounded retry count for generators that reject candidates
    pub const MAX_GENERATION_ATTEMPTS: u32 = 64;
}
