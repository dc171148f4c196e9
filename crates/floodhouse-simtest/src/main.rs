//! Floodhouse Headless Simulation Harness
//!
//! Validates the pure simulation logic and the stock layout data without a
//! renderer, audio or a real controller. A scripted pilot plays full
//! sessions across several seeds while every frame is checked against the
//! simulation's invariants.
//!
//! Usage:
//!   cargo run -p floodhouse-simtest
//!   cargo run -p floodhouse-simtest -- --verbose
//!   cargo run -p floodhouse-simtest -- --json --seeds 20 --config tuning.json

mod autopilot;

use autopilot::{Pilot, WalkingAvatar};
use floodhouse_logic::config::SimConfig;
use floodhouse_logic::engine::{InputSnapshot, SimEvent, SimulationEngine, Stationary};
use floodhouse_logic::game_over::SessionState;
use floodhouse_logic::interaction::Outcome;
use floodhouse_logic::rng::SimRng;
use floodhouse_logic::rooms::{default_layout, RoomCategory, RoomDef, RoomRegistry};
use floodhouse_logic::spawner::{tick_spawner, Difficulty};
use floodhouse_logic::tools::Tool;
use serde::Serialize;

// ── House layout (same JSON a renderer would load) ──────────────────────
const LAYOUT_JSON: &str = include_str!("../../../data/house_layout.json");

/// Hard cap on a single autopilot session, in frames (one hour at 30 fps).
const MAX_SESSION_FRAMES: u64 = 108_000;

// ── Test harness ────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

#[derive(Debug, Serialize)]
struct SessionSummary {
    seed: u64,
    frames: u64,
    score: u32,
    fixes: u32,
    wrong_tools: u32,
    leaks: u32,
    game_over: bool,
}

#[derive(Debug, Serialize)]
struct Report {
    passed: usize,
    failed: usize,
    results: Vec<TestResult>,
    sessions: Vec<SessionSummary>,
}

struct Options {
    verbose: bool,
    json: bool,
    seeds: u64,
    config_path: Option<String>,
}

impl Options {
    fn from_args() -> Self {
        let args: Vec<String> = std::env::args().collect();
        let value_of = |flag: &str| {
            args.iter()
                .position(|a| a == flag)
                .and_then(|i| args.get(i + 1))
                .cloned()
        };
        Self {
            verbose: args.iter().any(|a| a == "--verbose"),
            json: args.iter().any(|a| a == "--json"),
            seeds: value_of("--seeds")
                .and_then(|s| s.parse().ok())
                .unwrap_or(8),
            config_path: value_of("--config"),
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let opts = Options::from_args();
    if !opts.json {
        println!("=== Floodhouse Simulation Harness ===\n");
    }

    let mut results = Vec::new();
    let mut sessions = Vec::new();

    // 0. Tuning
    let config = match load_config(opts.config_path.as_deref()) {
        Ok(c) => c,
        Err(detail) => {
            results.push(TestResult {
                name: "config_load".into(),
                passed: false,
                detail,
            });
            SimConfig::default()
        }
    };

    // 1. Layout data
    results.extend(validate_layout(&config, opts.verbose));

    // 2. Compatibility table
    results.extend(validate_compatibility(opts.verbose));

    // 3. Difficulty ramp
    results.extend(validate_difficulty_ramp(&config));

    // 4. Idle sessions must end
    results.extend(validate_idle_session(&config));

    // 5. Autopilot sessions
    let (autopilot_results, summaries) = validate_autopilot(&config, opts.seeds, opts.verbose);
    results.extend(autopilot_results);
    sessions.extend(summaries);

    // 6. Proximity gate
    results.extend(validate_proximity_gate(&config));

    // ── Summary ──
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    if opts.json {
        let report = Report {
            passed,
            failed,
            results,
            sessions,
        };
        match serde_json::to_string_pretty(&report) {
            Ok(s) => println!("{}", s),
            Err(e) => {
                eprintln!("failed to serialize report: {}", e);
                std::process::exit(2);
            }
        }
    } else {
        println!();
        for r in &results {
            let icon = if r.passed { "✓" } else { "✗" };
            if !r.passed || opts.verbose {
                println!("  {} {}: {}", icon, r.name, r.detail);
            }
        }
        println!(
            "\n=== RESULT: {}/{} passed, {} failed ===",
            passed, total, failed
        );
    }

    if failed > 0 {
        std::process::exit(1);
    }
}

fn load_config(path: Option<&str>) -> Result<SimConfig, String> {
    let Some(path) = path else {
        return Ok(SimConfig::default());
    };
    let text = std::fs::read_to_string(path).map_err(|e| format!("{}: {}", path, e))?;
    serde_json::from_str(&text).map_err(|e| format!("{}: {}", path, e))
}

// ── 1. Layout ───────────────────────────────────────────────────────────

fn validate_layout(config: &SimConfig, verbose: bool) -> Vec<TestResult> {
    eprintln!("--- House Layout ---");
    let mut results = Vec::new();

    let layout: Vec<RoomDef> = match serde_json::from_str(LAYOUT_JSON) {
        Ok(l) => l,
        Err(e) => {
            results.push(TestResult {
                name: "layout_parse".into(),
                passed: false,
                detail: format!("JSON parse error: {}", e),
            });
            return results;
        }
    };

    results.push(TestResult {
        name: "layout_matches_builtin".into(),
        passed: layout == default_layout(),
        detail: format!("{} rooms in data/house_layout.json", layout.len()),
    });

    let registry = match RoomRegistry::new(layout, config.max_flood) {
        Ok(r) => r,
        Err(e) => {
            results.push(TestResult {
                name: "layout_valid".into(),
                passed: false,
                detail: e.to_string(),
            });
            return results;
        }
    };
    results.push(TestResult {
        name: "layout_valid".into(),
        passed: true,
        detail: format!(
            "tool source = room {}, critical = room {}",
            registry.tool_source(),
            registry.critical()
        ),
    });

    let floodable = registry.floodable().count();
    let config_check = config.validate(floodable);
    results.push(TestResult {
        name: "config_valid".into(),
        passed: config_check.is_ok(),
        detail: match config_check {
            Ok(()) => format!(
                "game over at {} of {} rooms flooded",
                config.effective_threshold(floodable),
                floodable
            ),
            Err(e) => e.to_string(),
        },
    });

    // Every room center must map back to its own room
    let misplaced: Vec<_> = registry
        .rooms()
        .iter()
        .filter(|r| registry.room_containing(r.def.bounds.center()) != Some(r.id()))
        .map(|r| r.def.name.clone())
        .collect();
    results.push(TestResult {
        name: "layout_centers_resolve".into(),
        passed: misplaced.is_empty(),
        detail: if misplaced.is_empty() {
            "every room center lies in its own room".into()
        } else {
            format!("centers outside their room: {}", misplaced.join(", "))
        },
    });

    // Leak sprites must sit inside their room horizontally
    let stray: Vec<_> = registry
        .rooms()
        .iter()
        .filter(|r| r.def.leak_x < r.def.bounds.x || r.def.leak_x >= r.def.bounds.x + r.def.bounds.w)
        .map(|r| r.def.name.clone())
        .collect();
    results.push(TestResult {
        name: "layout_leak_points_inside".into(),
        passed: stray.is_empty(),
        detail: format!("{} leak points outside their room", stray.len()),
    });

    if verbose {
        println!("  Rooms:");
        for r in registry.rooms() {
            let b = r.def.bounds;
            println!(
                "    {:2} {:12} {:?} at ({}, {}) {}x{}{}{}",
                r.id(),
                r.def.name,
                r.def.category,
                b.x,
                b.y,
                b.w,
                b.h,
                if r.is_tool_source() { " [tools]" } else { "" },
                if r.is_critical() { " [critical]" } else { "" },
            );
        }
    }

    results
}

// ── 2. Compatibility ────────────────────────────────────────────────────

fn validate_compatibility(verbose: bool) -> Vec<TestResult> {
    eprintln!("--- Tool Compatibility ---");
    let mut results = Vec::new();

    let leak_categories: Vec<_> = RoomCategory::ALL
        .iter()
        .filter(|c| **c != RoomCategory::Kitchen)
        .collect();
    let complete = leak_categories
        .iter()
        .all(|c| matches!(c.accepted_tools(), Some([a, b]) if a != b));
    results.push(TestResult {
        name: "compat_two_tools_per_leak".into(),
        passed: complete,
        detail: format!("{} leak categories checked", leak_categories.len()),
    });

    let useless: Vec<_> = Tool::ALL
        .iter()
        .filter(|t| !leak_categories.iter().any(|c| c.accepts(**t)))
        .map(|t| t.name())
        .collect();
    results.push(TestResult {
        name: "compat_every_tool_useful".into(),
        passed: useless.is_empty(),
        detail: if useless.is_empty() {
            "every tool fixes at least one leak type".into()
        } else {
            format!("unused tools: {}", useless.join(", "))
        },
    });

    results.push(TestResult {
        name: "compat_kitchen_has_no_entry".into(),
        passed: RoomCategory::Kitchen.accepted_tools().is_none(),
        detail: "tool source never needs repair".into(),
    });

    if verbose {
        for c in &leak_categories {
            if let Some([a, b]) = c.accepted_tools() {
                println!("    {:12} <- {} / {}", c.label(), a, b);
            }
        }
    }

    results
}

// ── 3. Difficulty ───────────────────────────────────────────────────────

fn validate_difficulty_ramp(config: &SimConfig) -> Vec<TestResult> {
    eprintln!("--- Difficulty Ramp ---");
    let mut results = Vec::new();

    let Ok(mut rooms) = RoomRegistry::new(default_layout(), config.max_flood) else {
        results.push(TestResult {
            name: "ramp_setup".into(),
            passed: false,
            detail: "stock layout rejected".into(),
        });
        return results;
    };
    let mut difficulty = Difficulty::new(config);
    let mut rng = SimRng::from_seed_u64(config.seed);

    let mut monotonic = true;
    let mut spawns = 0u32;
    let mut last = difficulty.leak_interval;
    for _ in 0..(config.leak_interval_start as u64 * 200) {
        if tick_spawner(&mut rooms, &mut difficulty, &mut rng, config).is_some() {
            spawns += 1;
        }
        monotonic &= difficulty.leak_interval <= last;
        last = difficulty.leak_interval;
        // Drain so the spawner always has somewhere to put a leak
        rooms.reset();
    }

    results.push(TestResult {
        name: "ramp_monotonic".into(),
        passed: monotonic,
        detail: format!("{} spawns, interval never grew", spawns),
    });
    results.push(TestResult {
        name: "ramp_reaches_floor".into(),
        passed: difficulty.leak_interval == config.leak_interval_min,
        detail: format!(
            "interval {} (floor {})",
            difficulty.leak_interval, config.leak_interval_min
        ),
    });

    results
}

// ── 4. Idle Session ─────────────────────────────────────────────────────

fn validate_idle_session(config: &SimConfig) -> Vec<TestResult> {
    eprintln!("--- Idle Session ---");
    let mut results = Vec::new();

    let mut engine = match SimulationEngine::with_default_layout(config.clone()) {
        Ok(e) => e,
        Err(e) => {
            results.push(TestResult {
                name: "idle_setup".into(),
                passed: false,
                detail: e.to_string(),
            });
            return results;
        }
    };

    let mut frames = 0u64;
    while !engine.is_game_over() && frames < MAX_SESSION_FRAMES {
        engine.tick(&InputSnapshot::default(), &mut Stationary);
        frames += 1;
    }
    results.push(TestResult {
        name: "idle_house_floods".into(),
        passed: engine.is_game_over(),
        detail: format!(
            "untouched house lost after {} frames ({:.1}s), score {}",
            frames,
            frames as f32 / 30.0,
            engine.score()
        ),
    });

    let events = engine.tick(&InputSnapshot::interact(), &mut Stationary);
    let snap = engine.snapshot();
    let leaks = snap.rooms.iter().filter(|r| r.leak_active).count();
    results.push(TestResult {
        name: "idle_restart".into(),
        passed: matches!(events.as_slice(), [SimEvent::Reset { .. }])
            && snap.session == SessionState::Playing
            && snap.score == 0
            && leaks == 1
            && snap.rooms.iter().all(|r| r.flood_level == 0.0),
        detail: format!("restart left {} leak(s), score {}", leaks, snap.score),
    });

    results
}

// ── 5. Autopilot ────────────────────────────────────────────────────────

fn validate_autopilot(
    config: &SimConfig,
    seeds: u64,
    verbose: bool,
) -> (Vec<TestResult>, Vec<SessionSummary>) {
    eprintln!("--- Autopilot Sessions ---");
    let mut results = Vec::new();
    let mut summaries = Vec::new();

    for seed in 0..seeds {
        let cfg = config.clone().with_seed(config.seed.wrapping_add(seed));
        match play_session(&cfg, seed) {
            Ok(summary) => {
                if verbose {
                    println!(
                        "    seed {:3}: {:6} frames, score {:5}, {} fixes, {} wrong, {} leaks",
                        summary.seed,
                        summary.frames,
                        summary.score,
                        summary.fixes,
                        summary.wrong_tools,
                        summary.leaks
                    );
                }
                summaries.push(summary);
            }
            Err(detail) => results.push(TestResult {
                name: format!("autopilot_seed_{}", seed),
                passed: false,
                detail,
            }),
        }
    }

    let played = summaries.len();
    let fixed_any = summaries.iter().filter(|s| s.fixes > 0).count();
    results.push(TestResult {
        name: "autopilot_invariants".into(),
        passed: played as u64 == seeds,
        detail: format!("{}/{} sessions held every invariant", played, seeds),
    });
    results.push(TestResult {
        name: "autopilot_repairs".into(),
        passed: fixed_any == played,
        detail: format!("{}/{} sessions repaired at least one leak", fixed_any, played),
    });
    results.push(TestResult {
        name: "autopilot_no_wrong_tools".into(),
        passed: summaries.iter().all(|s| s.wrong_tools == 0),
        detail: "pilot only presses interact with a fitting tool".into(),
    });

    if let Some(best) = summaries.iter().max_by_key(|s| s.score) {
        results.push(TestResult {
            name: "autopilot_best_score".into(),
            passed: true,
            detail: format!("seed {} scored {}", best.seed, best.score),
        });
    }

    (results, summaries)
}

/// Play one session to game over (or the frame cap), checking invariants
/// after every frame.
fn play_session(config: &SimConfig, seed: u64) -> Result<SessionSummary, String> {
    let mut engine = SimulationEngine::with_default_layout(config.clone()).map_err(|e| e.to_string())?;
    let mut avatar = WalkingAvatar::default();
    let mut pilot = Pilot::default();
    let reach = config.proximity_gate.unwrap_or(2.0).max(2.0);

    let mut summary = SessionSummary {
        seed,
        frames: 0,
        score: 0,
        fixes: 0,
        wrong_tools: 0,
        leaks: 1,
        game_over: false,
    };
    let mut last_interval = engine.snapshot().leak_interval;

    while summary.frames < MAX_SESSION_FRAMES {
        let input = pilot.decide(engine.state(), reach);
        let events = engine.tick(&input, &mut avatar);
        summary.frames += 1;

        for event in &events {
            match event {
                SimEvent::LeakSpawned { .. } => summary.leaks += 1,
                SimEvent::Interaction(Outcome::Fixed { .. }) => summary.fixes += 1,
                SimEvent::Interaction(Outcome::WrongTool { .. }) => summary.wrong_tools += 1,
                SimEvent::GameOver { score } => {
                    summary.game_over = true;
                    summary.score = *score;
                }
                _ => {}
            }
        }

        let snap = engine.snapshot();
        for room in &snap.rooms {
            if !(0.0..=config.max_flood).contains(&room.flood_level) {
                return Err(format!(
                    "frame {}: room {} flood {} out of range",
                    summary.frames, room.id, room.flood_level
                ));
            }
            if room.category == RoomCategory::Kitchen && (room.leak_active || room.flood_level > 0.0) {
                return Err(format!("frame {}: kitchen took water", summary.frames));
            }
        }
        if snap.leak_interval > last_interval || snap.leak_interval < config.leak_interval_min {
            return Err(format!(
                "frame {}: leak interval {} after {}",
                summary.frames, snap.leak_interval, last_interval
            ));
        }
        last_interval = snap.leak_interval;

        if summary.game_over {
            log::info!(
                "seed {} lost after {} frames with score {}",
                seed,
                summary.frames,
                summary.score
            );
            break;
        }
    }

    if !summary.game_over {
        summary.score = engine.score();
    }
    Ok(summary)
}

// ── 6. Proximity Gate ───────────────────────────────────────────────────

fn validate_proximity_gate(config: &SimConfig) -> Vec<TestResult> {
    eprintln!("--- Proximity Gate ---");
    let mut results = Vec::new();

    let range = config.proximity_gate.unwrap_or(6.0);
    let gated = config.clone().with_proximity_gate(range);
    match play_session(&gated, 0) {
        Ok(summary) => results.push(TestResult {
            name: "gate_session_repairs".into(),
            passed: summary.fixes > 0,
            detail: format!(
                "range {}: {} fixes over {} frames",
                range, summary.fixes, summary.frames
            ),
        }),
        Err(detail) => results.push(TestResult {
            name: "gate_session_repairs".into(),
            passed: false,
            detail,
        }),
    }

    results
}
