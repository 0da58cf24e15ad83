//! Brain Test headless driver
//!
//! Plays a full test (or a practice run) on a virtual clock with a simulated
//! player and prints the session summary as JSON.
//!
//! Usage:
//!   brain-test                              # Full test, entropy seed
//!   brain-test --seed 42 --accuracy 0.8     # Reproducible run
//!   brain-test --practice cube-counter      # Practice one game

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;

    use clap::Parser;

    use brain_test::games::GameId;
    use brain_test::round::RoundEvent;
    use brain_test::{
        GameRng, Response, RoundController, RoundPhase, RoundResult, SessionOrchestrator,
        SessionSummary, Settings,
    };

    #[derive(Parser, Debug)]
    #[command(
        name = "brain-test",
        version,
        about = "Play a brain test session headlessly and print the result"
    )]
    pub struct Args {
        /// RNG seed (overrides the settings file)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Practice a single game instead of the full test
        #[arg(short, long)]
        practice: Option<GameId>,

        /// Number of practice rounds
        #[arg(short, long, default_value_t = 3)]
        rounds: usize,

        /// Probability that the simulated player answers correctly
        #[arg(short, long, default_value_t = 0.85)]
        accuracy: f64,

        /// Simulated thinking time per answer (ms)
        #[arg(long, default_value_t = 2_500)]
        think_ms: u64,

        /// Settings JSON file
        #[arg(long)]
        settings: Option<PathBuf>,
    }

    type BoxError = Box<dyn std::error::Error>;

    /// Play one round to completion on a virtual clock starting at `now_ms`
    fn autoplay(
        round: &mut RoundController,
        player: &mut GameRng,
        accuracy: f64,
        think_ms: u64,
        tick_ms: u64,
        mut now_ms: u64,
    ) -> Result<(RoundResult, u64), BoxError> {
        round.ready(now_ms)?;
        let mut next_answer = now_ms + think_ms;
        loop {
            now_ms += tick_ms.max(1);
            match round.tick(now_ms) {
                Some(RoundEvent::Completed(result)) => return Ok((result, now_ms)),
                Some(RoundEvent::Warning { seconds_left }) => {
                    log::debug!("{} seconds left", seconds_left);
                }
                _ => {}
            }
            if round.phase() == RoundPhase::Active && now_ms >= next_answer {
                let response = if player.chance(accuracy) {
                    round.puzzle().solution()
                } else {
                    Response::Choice(usize::MAX)
                };
                round.submit_answer(now_ms, &response)?;
                next_answer = now_ms + think_ms;
            }
        }
    }

    pub fn run(args: Args) -> Result<SessionSummary, BoxError> {
        let mut settings = match &args.settings {
            Some(path) => Settings::load(path)?,
            None => Settings::default(),
        };
        if args.seed.is_some() {
            settings.seed = args.seed;
        }
        settings.validate()?;

        let mut rng = match settings.seed {
            Some(seed) => GameRng::new(seed),
            None => GameRng::from_entropy(),
        };
        log::info!("Session seed {}", rng.seed());
        let mut player = rng.fork();

        let (mut session, rounds) = match args.practice {
            Some(game) => (SessionOrchestrator::start_practice(game), args.rounds),
            None => {
                let session = SessionOrchestrator::start_full_test(&mut rng);
                let rounds = session.games().len();
                (session, rounds)
            }
        };

        let mut now_ms = 0;
        for _ in 0..rounds {
            let mut round = session.next_round(&mut rng, &settings)?;
            let (result, end_ms) = autoplay(
                &mut round,
                &mut player,
                args.accuracy,
                args.think_ms,
                settings.tick_interval_ms,
                now_ms,
            )?;
            now_ms = end_ms;
            session.on_round_complete(result)?;
        }
        Ok(session.finish())
    }

    pub fn main() {
        env_logger::init();
        let args = Args::parse();
        match run(args) {
            Ok(summary) => match serde_json::to_string_pretty(&summary) {
                Ok(json) => println!("{json}"),
                Err(e) => {
                    eprintln!("error: {e}");
                    std::process::exit(1);
                }
            },
            Err(e) => {
                log::error!("Session failed: {}", e);
                eprintln!("error: {e}");
                std::process::exit(1);
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    native::main();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The web host links the library directly
}
