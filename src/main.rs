//! Astro Dodge entry point
//!
//! Headless demo session: no renderer, an autopilot on the input surface,
//! events logged as they happen. Useful for balance checks and as a worked
//! example of driving the simulation from a host loop.
//!
//! Usage: astro-dodge [--seed N] [--config path.json] [--seconds N]

use std::fs;
use std::process::ExitCode;

use astro_dodge::sim::{FrameInput, GameEvent, GamePhase, Simulation};
use astro_dodge::{ConfigError, GameConfig};

const FRAME_DT: f32 = 1.0 / 60.0;

#[derive(Debug)]
struct Args {
    seed: u64,
    config_path: Option<String>,
    seconds: f32,
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args {
        seed: 0xA57E0,
        config_path: None,
        seconds: 120.0,
    };
    let mut iter = std::env::args().skip(1);
    while let Some(flag) = iter.next() {
        let mut value = |name: &str| {
            iter.next()
                .ok_or_else(|| format!("{name} requires a value"))
        };
        match flag.as_str() {
            "--seed" => {
                args.seed = value("--seed")?
                    .parse()
                    .map_err(|e| format!("bad --seed: {e}"))?;
            }
            "--config" => args.config_path = Some(value("--config")?),
            "--seconds" => {
                args.seconds = value("--seconds")?
                    .parse()
                    .map_err(|e| format!("bad --seconds: {e}"))?;
            }
            other => return Err(format!("unknown argument: {other}")),
        }
    }
    Ok(args)
}

fn load_config(path: Option<&str>) -> Result<GameConfig, String> {
    match path {
        Some(path) => {
            let text = fs::read_to_string(path).map_err(|e| format!("read {path}: {e}"))?;
            serde_json::from_str(&text).map_err(|e| format!("parse {path}: {e}"))
        }
        None => Ok(GameConfig::default()),
    }
}

/// Steer toward the nearest coin, unless a rock is closing in on the ship's
/// column, in which case dodge away from it.
fn autopilot(sim: &Simulation) -> FrameInput {
    let ship = sim.ship();
    let danger_x = ship.pos.x + 220.0;

    let threat = sim
        .obstacles()
        .iter()
        .filter(|rock| rock.active && rock.pos.x < danger_x && rock.pos.x > ship.pos.x - 50.0)
        .min_by(|a, b| a.pos.x.total_cmp(&b.pos.x));

    if let Some(rock) = threat {
        let clearance = rock.size + 40.0;
        if (rock.pos.y - ship.pos.y).abs() < clearance {
            // Dodge to whichever side has more room
            let field = sim.config().field;
            let go_up = rock.pos.y > field.height / 2.0;
            return FrameInput {
                move_up: go_up,
                move_down: !go_up,
            };
        }
    }

    let target = sim
        .pickups()
        .iter()
        .filter(|coin| coin.active && !coin.collected)
        .min_by(|a, b| a.pos.x.total_cmp(&b.pos.x))
        .map(|coin| coin.pos.y);

    match target {
        Some(y) if y < ship.pos.y - 10.0 => FrameInput {
            move_up: true,
            move_down: false,
        },
        Some(y) if y > ship.pos.y + 10.0 => FrameInput {
            move_up: false,
            move_down: true,
        },
        _ => FrameInput::default(),
    }
}

fn run(args: &Args) -> Result<(), String> {
    let config = load_config(args.config_path.as_deref())?;
    let mut sim = Simulation::new(config, args.seed)
        .map_err(|e: ConfigError| format!("invalid config: {e}"))?;

    log::info!("Astro Dodge headless session, seed {}", args.seed);
    sim.start();

    let frames = (args.seconds / FRAME_DT).ceil() as u64;
    for frame in 0..frames {
        let input = autopilot(&sim);
        sim.update(&input, FRAME_DT);

        for event in sim.drain_events() {
            match event {
                GameEvent::LevelUp { level } => log::info!("[{frame:>6}] level {level}"),
                GameEvent::ShipHit { lives_remaining } => {
                    log::info!("[{frame:>6}] hit, {lives_remaining} lives left");
                }
                GameEvent::CoinCollected { points, total_score } => {
                    log::info!("[{frame:>6}] +{points} ({total_score})");
                }
                GameEvent::GameOver { final_score, final_level } => {
                    log::info!("[{frame:>6}] game over");
                    println!(
                        "Game over after {:.1}s: score {final_score}, level {final_level}",
                        frame as f32 * FRAME_DT
                    );
                }
            }
        }

        if sim.phase() == GamePhase::GameOver {
            return Ok(());
        }
    }

    println!(
        "Survived {:.0}s: score {}, level {}, {} lives left",
        args.seconds,
        sim.score(),
        sim.level(),
        sim.lives()
    );
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let args = match parse_args() {
        Ok(args) => args,
        Err(msg) => {
            eprintln!("{msg}");
            eprintln!("usage: astro-dodge [--seed N] [--config path.json] [--seconds N]");
            return ExitCode::FAILURE;
        }
    };
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(msg) => {
            eprintln!("{msg}");
            ExitCode::FAILURE
        }
    }
}
