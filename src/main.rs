//! Rock Drift headless runner
//!
//! Plays a scripted pilot through the simulation at a simulated 60 Hz refresh
//! and logs the HUD. Usage:
//!
//! ```text
//! rock-drift [--seed N] [--frames N] [--tuning FILE] [--locked]
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use rock_drift::consts::SIM_DT;
use rock_drift::sim::GameState;
use rock_drift::{FrameDriver, Key, LogRenderer, Pacing, Tuning};

#[derive(Parser, Debug)]
#[command(name = "rock-drift")]
#[command(about = "Headless Rock Drift run with a scripted pilot")]
struct Args {
    /// Run seed (decimal or 0x-prefixed hex)
    #[arg(long, default_value = "0x5eed", value_parser = parse_seed)]
    seed: u64,
    /// Number of 60 Hz frames to drive
    #[arg(long, default_value_t = 3600)]
    frames: u64,
    /// JSON tuning file overriding the default balance
    #[arg(long)]
    tuning: Option<PathBuf>,
    /// One tick per frame instead of the fixed-step accumulator
    #[arg(long)]
    locked: bool,
}

fn parse_seed(raw: &str) -> Result<u64, String> {
    let raw = raw.trim();
    let parsed = match raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => raw.parse(),
    };
    parsed.map_err(|e| format!("invalid seed {raw:?}: {e}"))
}

/// Simple scripted pilot: spin, pulse the engine, tap fire, restart when dead
fn drive_pilot(driver: &mut FrameDriver, frame: u64) {
    let game_over = driver.snapshot().game_over;
    let input = driver.input_mut();

    input.key_down(Key::Right);
    if (frame / 30) % 3 == 0 {
        input.key_down(Key::Up);
    } else {
        input.key_up(Key::Up);
    }
    if frame % 8 == 0 {
        input.key_down(Key::Space);
    } else {
        input.key_up(Key::Space);
    }
    if game_over {
        input.key_down(Key::Enter);
    } else {
        input.key_up(Key::Enter);
    }
}

fn main() -> ExitCode {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();

    let args = Args::parse();

    let tuning = match &args.tuning {
        Some(path) => match Tuning::load(path) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::error!("{e}");
                return ExitCode::FAILURE;
            }
        },
        None => Tuning::default(),
    };

    log::info!("Rock Drift (headless) starting, seed {:#x}", args.seed);

    let pacing = if args.locked {
        Pacing::Locked
    } else {
        Pacing::default()
    };
    let mut driver = FrameDriver::new(GameState::with_tuning(args.seed, tuning), pacing);
    let mut renderer = LogRenderer::new(300);

    for frame in 0..args.frames {
        drive_pilot(&mut driver, frame);
        let now = frame as f64 * SIM_DT;
        if !driver.frame(now, &mut renderer) {
            break;
        }
    }
    driver.stop();

    let snapshot = driver.snapshot();
    log::info!("Final: {}", snapshot.hud_line());
    println!("{}", snapshot.hud_line());
    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_defaults() {
        let args = Args::try_parse_from(["rock-drift"]).unwrap();
        assert_eq!(args.seed, 0x5eed);
        assert_eq!(args.frames, 3600);
        assert!(args.tuning.is_none());
        assert!(!args.locked);
    }

    #[test]
    fn test_args_all_flags() {
        let args = Args::try_parse_from([
            "rock-drift",
            "--seed",
            "0xBEEF",
            "--frames",
            "120",
            "--tuning",
            "balance.json",
            "--locked",
        ])
        .unwrap();
        assert_eq!(args.seed, 0xbeef);
        assert_eq!(args.frames, 120);
        assert_eq!(args.tuning, Some(PathBuf::from("balance.json")));
        assert!(args.locked);
    }

    #[test]
    fn test_args_reject_bad_input() {
        assert!(Args::try_parse_from(["rock-drift", "--seed", "nope"]).is_err());
        assert!(Args::try_parse_from(["rock-drift", "--frames"]).is_err());
        assert!(Args::try_parse_from(["rock-drift", "--bogus"]).is_err());
    }

    #[test]
    fn test_parse_seed_accepts_decimal_and_hex() {
        assert_eq!(parse_seed("42"), Ok(42));
        assert_eq!(parse_seed("0x2a"), Ok(42));
        assert!(parse_seed("0x").is_err());
    }
}
