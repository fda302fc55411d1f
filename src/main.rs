//! Happy Chicken entry point
//!
//! Runs a headless session driven by a seeded autopilot and logs what
//! happens. Useful for soak-testing levels without a window.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use happy_chicken::audio::FileSink;
use happy_chicken::consts::SIM_DT;
use happy_chicken::session::Walk;
use happy_chicken::view::{Hud, intro_text};
use happy_chicken::{GameSession, SessionEvent, Settings};

/// Seconds between autopilot decisions
const DECISION_INTERVAL: f32 = 0.5;
/// How long the reset button stays up before the autopilot presses it
const RESET_DELAY: f32 = 2.0;

#[derive(Parser)]
#[command(author, version, about = "Happy Chicken (headless)", long_about = None)]
struct Args {
    /// JSON settings file
    #[arg(short, long)]
    settings: Option<PathBuf>,

    /// Simulated seconds to run
    #[arg(long, default_value_t = 60.0)]
    seconds: f32,

    /// Autopilot seed
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Print the final session snapshot as JSON
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn main() -> Result<()> {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();
    let args = Args::parse();
    log::info!("Happy Chicken (headless) starting...");

    let settings = Settings::load_or_default(args.settings.as_deref());
    let sink = FileSink::new(settings.asset_dir.clone());
    let mut session = GameSession::new(settings, sink);
    let mut rng = Pcg32::seed_from_u64(args.seed);

    let frames = (args.seconds / SIM_DT).max(0.0) as u64;
    let mut next_decision = 0.0f32;
    let mut reset_at: Option<f32> = None;

    for frame in 0..frames {
        let now = frame as f32 * SIM_DT;

        for event in session.drain_events() {
            log::info!("{event:?}");
            match event {
                SessionEvent::IntroShown { level } => {
                    log::debug!("{}", intro_text(level));
                    session.dismiss_intro();
                }
                SessionEvent::ResetButton { visible: true } => reset_at = Some(now + RESET_DELAY),
                SessionEvent::Completed => reset_at = Some(now + RESET_DELAY),
                _ => {}
            }
        }

        if reset_at.is_some_and(|t| now >= t) {
            reset_at = None;
            session.reset_session();
        }

        if now >= next_decision {
            next_decision = now + DECISION_INTERVAL;
            drive(&mut session, &mut rng);
        }

        session.update(SIM_DT);
    }

    let hud = Hud::from_session(&session);
    if let Some(credits) = &hud.credits {
        log::info!("{credits}");
    }
    if let Some(banner) = hud.banner {
        log::info!("{banner}");
    }

    let snapshot = session.snapshot();
    log::info!(
        "Finished on level {} after {} steps with {} credits",
        snapshot.level,
        snapshot.steps,
        snapshot.credits
    );
    if args.json {
        let json = serde_json::to_string_pretty(&snapshot).context("Failed to encode snapshot")?;
        println!("{json}");
    }
    Ok(())
}

/// Pick a random intent
fn drive(session: &mut GameSession<FileSink>, rng: &mut Pcg32) {
    match rng.random_range(0..6) {
        0 => session.start_walking(Walk::Left),
        1 => session.start_walking(Walk::Right),
        2 => session.stop_walking(),
        3 => {
            session.jump();
        }
        4 => {
            if let Some(id) = session.shoot() {
                log::debug!("Shot water ({id})");
            }
        }
        _ => {}
    }
}
