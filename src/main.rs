//! Graviton Surge headless runner
//!
//! Plays one session with a simple autopilot on a simulated 60 Hz clock and
//! prints the final state as JSON. Useful for balance passes and soak runs.
//!
//! Usage: `graviton-surge [tuning.json] [seed] [max_seconds]`

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::error::Error;

    use glam::Vec2;

    use graviton_surge::Tuning;
    use graviton_surge::consts::TARGET_FRAME_MS;
    use graviton_surge::sim::state::time_seed;
    use graviton_surge::sim::{FrameClock, GameEvent, GameState, InputSnapshot, tick};

    const SCREEN_WIDTH: f32 = 1280.0;
    const SCREEN_HEIGHT: f32 = 720.0;
    const DEFAULT_MAX_SECONDS: f64 = 600.0;

    struct Options {
        tuning: Tuning,
        seed: Option<u64>,
        max_seconds: f64,
    }

    fn parse_args() -> Result<Options, Box<dyn Error>> {
        let mut args = std::env::args().skip(1);
        let tuning = match args.next() {
            Some(path) if path != "-" => Tuning::load(&path)?,
            _ => Tuning::default(),
        };
        let seed = args.next().map(|s| s.parse::<u64>()).transpose()?;
        let max_seconds = args
            .next()
            .map(|s| s.parse::<f64>())
            .transpose()?
            .unwrap_or(DEFAULT_MAX_SECONDS);
        Ok(Options {
            tuning,
            seed,
            max_seconds,
        })
    }

    /// Dodge the closest debris, pull in powerups, shield when cornered
    fn autopilot(state: &GameState, frame: u64) -> InputSnapshot {
        let player = &state.player;
        let mut input = InputSnapshot::default();

        let nearest = state
            .debris
            .iter()
            .map(|d| (d.pos - player.pos, d.radius))
            .min_by(|a, b| a.0.length_squared().total_cmp(&b.0.length_squared()));

        if let Some((offset, radius)) = nearest {
            let gap = offset.length() - radius - player.radius;
            input.move_stick = -offset.normalize_or_zero();
            if gap < 60.0 {
                input.repel = 1.0;
                input.aim_stick = offset.normalize_or_zero();
            }
            input.shield = gap < 15.0;
            input.burst = gap < 40.0 && frame % 30 == 0;
        }

        if input.repel == 0.0 && !state.powerups.is_empty() && player.energy > 40.0 {
            input.attract = 0.7;
        }

        // Drift back toward the middle when nothing is pressing
        if input.move_stick == Vec2::ZERO {
            input.move_stick = (state.bounds.center() - player.pos).normalize_or_zero() * 0.3;
        }
        input
    }

    pub fn run() -> Result<(), Box<dyn Error>> {
        env_logger::init();
        log::info!("Graviton Surge (headless) starting...");

        let options = parse_args()?;
        let seed = options.seed.unwrap_or_else(time_seed);
        let mut state = GameState::with_tuning(SCREEN_WIDTH, SCREEN_HEIGHT, seed, options.tuning)?;

        let mut clock = FrameClock::default();
        let mut now_ms = 0.0;
        let mut frame = 0u64;
        let mut destroyed = 0usize;
        let mut collected = 0usize;
        let limit_ms = options.max_seconds * 1000.0;

        while !state.game_over && clock.elapsed_ms() < limit_ms {
            now_ms += TARGET_FRAME_MS;
            let Some((dt, elapsed_ms)) = clock.sample(now_ms) else {
                continue;
            };

            let input = autopilot(&state, frame);
            tick(&mut state, &input, dt, elapsed_ms);
            frame += 1;

            for event in &state.events {
                match event {
                    GameEvent::DebrisDestroyed { .. } => destroyed += 1,
                    GameEvent::PowerupCollected { .. } => collected += 1,
                    _ => {}
                }
            }
        }

        log::info!(
            "Finished after {frame} frames ({:.1}s): score={}, lives={}, difficulty={}, destroyed={destroyed}, collected={collected}",
            state.elapsed_ms / 1000.0,
            state.score,
            state.player.lives,
            state.difficulty,
        );

        println!("{}", serde_json::to_string_pretty(&state)?);
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    headless::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The library is the wasm surface; there is no browser runner
}
