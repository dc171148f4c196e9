//! End-to-end session scenarios driven through `SimulationEngine::tick`.
//!
//! Player motion is a teleport: the physics collaborator is out of scope, so
//! tests place the player directly in the room they want.

use floodhouse_logic::config::SimConfig;
use floodhouse_logic::constants::room_ids;
use floodhouse_logic::engine::{InputSnapshot, SimEvent, SimulationEngine, Snapshot, Stationary};
use floodhouse_logic::game_over::SessionState;
use floodhouse_logic::geometry::Point;
use floodhouse_logic::interaction::Outcome;
use floodhouse_logic::rooms::RoomCategory;
use floodhouse_logic::spawner::spawn_leak;
use floodhouse_logic::tools::Tool;

const FLOODABLE: [u8; 4] = [
    room_ids::ATTIC,
    room_ids::BEDROOM,
    room_ids::BATHROOM,
    room_ids::LIVING_ROOM,
];

// ── Helpers ────────────────────────────────────────────────────────────

/// Engine with the opening leak removed, so a test controls every leak.
fn dry_engine(config: SimConfig) -> SimulationEngine {
    let mut engine = SimulationEngine::with_default_layout(config).unwrap();
    let state = engine.state_mut();
    state.rooms.reset();
    state.difficulty.flood_multiplier = 1.0;
    engine
}

fn center_of(engine: &SimulationEngine, room: u8) -> Point {
    engine.state().rooms.get(room).unwrap().def.bounds.center()
}

fn flood(snapshot: &Snapshot, room: u8) -> f32 {
    snapshot
        .rooms
        .iter()
        .find(|r| r.id == room)
        .map(|r| r.flood_level)
        .unwrap()
}

fn tick_in(engine: &mut SimulationEngine, room: u8, interact: bool) -> Vec<SimEvent> {
    let target = center_of(engine, room);
    let input = if interact {
        InputSnapshot::interact()
    } else {
        InputSnapshot::default()
    };
    engine.tick(&input, &mut |_: &InputSnapshot, _: Point| target)
}

/// Simple player: fetch a tool that fits some leak, walk there, fix it.
fn bot_target(engine: &SimulationEngine) -> u8 {
    let state = engine.state();
    let leaking: Vec<_> = state
        .rooms
        .floodable()
        .filter(|r| r.leak_active())
        .collect();
    match state.carried {
        Some(tool) => leaking
            .iter()
            .find(|r| r.def.category.accepts(tool))
            .map(|r| r.id())
            .unwrap_or(room_ids::KITCHEN),
        None => room_ids::KITCHEN,
    }
}

fn bot_wants_tool(engine: &SimulationEngine) -> bool {
    let state = engine.state();
    let offered = state.kitchen.current();
    let useful = |tool: Tool| {
        state
            .rooms
            .floodable()
            .any(|r| r.leak_active() && r.def.category.accepts(tool))
    };
    match state.carried {
        None => useful(offered),
        Some(held) => !useful(held) && useful(offered),
    }
}

// ── Scenarios ──────────────────────────────────────────────────────────

#[test]
fn wrong_tool_then_right_tool() {
    let config = SimConfig::default();
    let mut engine = dry_engine(config.clone());
    engine.state_mut().rooms.set_leak(room_ids::BATHROOM, true);
    engine.state_mut().rooms.adjust_flood(room_ids::BATHROOM, 50.0);
    engine.state_mut().carried = Some(Tool::Tape);

    let before = engine.snapshot();
    let events = tick_in(&mut engine, room_ids::BATHROOM, true);
    assert!(events.contains(&SimEvent::Interaction(Outcome::WrongTool {
        room: room_ids::BATHROOM,
        needed: [Tool::Wrench, Tool::Plunger],
    })));
    let after_wrong = engine.snapshot();
    // Only the normal per-frame rise, no repair
    let rise = config.base_flood_rate;
    assert!(
        (flood(&after_wrong, room_ids::BATHROOM) - flood(&before, room_ids::BATHROOM) - rise).abs()
            < 1e-4
    );
    assert_eq!(after_wrong.carried, Some(Tool::Tape));

    engine.state_mut().carried = Some(Tool::Plunger);
    let score_before = engine.score();
    let level_before = flood(&engine.snapshot(), room_ids::BATHROOM);
    let events = tick_in(&mut engine, room_ids::BATHROOM, true);
    assert!(events.contains(&SimEvent::Interaction(Outcome::Fixed {
        room: room_ids::BATHROOM,
        tool: Tool::Plunger,
    })));
    let after = engine.snapshot();
    let room = after.rooms.iter().find(|r| r.id == room_ids::BATHROOM).unwrap();
    assert!(!room.leak_active);
    assert!((room.flood_level - (level_before - config.repair_amount)).abs() < 1e-4);
    assert_eq!(engine.score(), score_before + config.repair_bonus);
    assert_eq!(after.carried, None);
}

#[test]
fn critical_leak_doubles_flooding_elsewhere() {
    let config = SimConfig::default();
    let mut engine = dry_engine(config.clone());
    {
        let state = engine.state_mut();
        state.rooms.set_leak(room_ids::BATHROOM, true);
        state.rooms.adjust_flood(room_ids::BEDROOM, config.max_flood);
        state.rooms.adjust_flood(room_ids::LIVING_ROOM, config.max_flood);
        // Attic is now the only eligible room
        let spawned = spawn_leak(
            &mut state.rooms,
            &mut state.difficulty,
            &mut state.rng,
            &config,
        );
        assert_eq!(spawned, Some(room_ids::ATTIC));
    }
    assert_eq!(engine.snapshot().flood_multiplier, 2.0);

    let before = flood(&engine.snapshot(), room_ids::BATHROOM);
    engine.tick(&InputSnapshot::default(), &mut Stationary);
    let after = flood(&engine.snapshot(), room_ids::BATHROOM);
    assert!((after - before - 2.0 * config.base_flood_rate).abs() < 1e-5);

    // Fixing the attic drops the multiplier back to 1
    engine.state_mut().carried = Some(Tool::Hammer);
    tick_in(&mut engine, room_ids::ATTIC, true);
    assert_eq!(engine.snapshot().flood_multiplier, 1.0);
    let before = flood(&engine.snapshot(), room_ids::BATHROOM);
    engine.tick(&InputSnapshot::default(), &mut Stationary);
    let after = flood(&engine.snapshot(), room_ids::BATHROOM);
    assert!((after - before - config.base_flood_rate).abs() < 1e-5);
}

#[test]
fn game_over_on_exact_tick_last_room_floods() {
    let config = SimConfig::default();
    let mut engine = dry_engine(config.clone());
    {
        let rooms = &mut engine.state_mut().rooms;
        for id in [room_ids::ATTIC, room_ids::BEDROOM, room_ids::BATHROOM] {
            rooms.adjust_flood(id, config.max_flood);
        }
        rooms.adjust_flood(room_ids::LIVING_ROOM, config.max_flood - 1.5 * config.base_flood_rate);
        rooms.set_leak(room_ids::LIVING_ROOM, true);
    }

    let events = engine.tick(&InputSnapshot::default(), &mut Stationary);
    assert!(!events.iter().any(|e| matches!(e, SimEvent::GameOver { .. })));
    assert_eq!(engine.session(), SessionState::Playing);

    let events = engine.tick(&InputSnapshot::default(), &mut Stationary);
    assert!(events.contains(&SimEvent::RoomFlooded {
        room: room_ids::LIVING_ROOM
    }));
    assert!(matches!(events.last(), Some(SimEvent::GameOver { .. })));
    assert_eq!(engine.session(), SessionState::GameOver);
    assert_eq!(engine.state().frame, 2);
}

#[test]
fn repair_before_check_prevents_game_over() {
    let config = SimConfig::default();
    let mut engine = dry_engine(config.clone());
    {
        let state = engine.state_mut();
        for id in FLOODABLE {
            state.rooms.adjust_flood(id, config.max_flood);
        }
        state.rooms.set_leak(room_ids::LIVING_ROOM, true);
        state.carried = Some(Tool::Bucket);
    }

    tick_in(&mut engine, room_ids::LIVING_ROOM, true);
    assert_eq!(engine.session(), SessionState::Playing);
    let level = flood(&engine.snapshot(), room_ids::LIVING_ROOM);
    assert!((level - (config.max_flood - config.repair_amount)).abs() < 1e-4);
}

#[test]
fn custom_threshold_ends_earlier() {
    let config = SimConfig {
        game_over_threshold: Some(2),
        ..Default::default()
    };
    let mut engine = dry_engine(config.clone());
    assert_eq!(engine.game_over_threshold(), 2);
    engine.state_mut().rooms.adjust_flood(room_ids::ATTIC, config.max_flood);
    engine.tick(&InputSnapshot::default(), &mut Stationary);
    assert!(!engine.is_game_over());
    engine.state_mut().rooms.adjust_flood(room_ids::BEDROOM, config.max_flood);
    engine.tick(&InputSnapshot::default(), &mut Stationary);
    assert!(engine.is_game_over());
}

#[test]
fn reset_restores_initial_values_with_one_leak() {
    let config = SimConfig {
        leak_interval_start: 20,
        leak_interval_min: 5,
        ..Default::default()
    };
    let mut engine = SimulationEngine::with_default_layout(config.clone()).unwrap();
    for _ in 0..500 {
        tick_in(&mut engine, room_ids::KITCHEN, true);
    }
    assert!(engine.score() > 0);

    engine.reset();
    let snap = engine.snapshot();
    assert_eq!(snap.frame, 0);
    assert_eq!(snap.score, 0);
    assert_eq!(snap.session, SessionState::Playing);
    assert_eq!(snap.carried, None);
    assert_eq!(snap.kitchen_tool, Tool::Wrench);
    assert_eq!(snap.feedback, None);
    assert_eq!(snap.leak_interval, config.leak_interval_start);
    assert_eq!(engine.state().difficulty.leak_countdown, config.leak_interval_start);
    assert_eq!(engine.state().kitchen.countdown(), config.tool_cycle_frames);
    assert_eq!(snap.current_room, Some(room_ids::KITCHEN));
    for room in &snap.rooms {
        assert_eq!(room.flood_level, 0.0);
    }
    let leaking: Vec<_> = snap.rooms.iter().filter(|r| r.leak_active).collect();
    assert_eq!(leaking.len(), 1);
    assert_ne!(leaking[0].category, RoomCategory::Kitchen);
    let expected = if leaking[0].id == room_ids::ATTIC { 2.0 } else { 1.0 };
    assert_eq!(snap.flood_multiplier, expected);
}

#[test]
fn invariants_hold_over_long_sessions() {
    for seed in 0..8 {
        let config = SimConfig::default().with_seed(seed);
        let mut engine = SimulationEngine::with_default_layout(config.clone()).unwrap();
        let mut prev = engine.snapshot();
        let mut prev_interval = prev.leak_interval;
        let mut fixes = 0;

        for frame in 0..6000 {
            let target = bot_target(&engine);
            let in_room = engine.state().current_room == Some(target);
            let interact = in_room
                && frame % 5 == 0
                && (target != room_ids::KITCHEN || bot_wants_tool(&engine));
            let events = tick_in(&mut engine, target, interact);
            let snap = engine.snapshot();

            for room in &snap.rooms {
                assert!(room.flood_level >= 0.0 && room.flood_level <= config.max_flood);
                if room.category == RoomCategory::Kitchen {
                    assert!(!room.leak_active);
                    assert_eq!(room.flood_level, 0.0);
                }
                let was = prev.rooms.iter().find(|r| r.id == room.id).unwrap();
                if !was.leak_active && room.leak_active {
                    let spawned = events.iter().any(|e| {
                        matches!(e, SimEvent::LeakSpawned { room: r } if *r == room.id)
                            || matches!(e, SimEvent::Reset { first_leak: Some(r) } if *r == room.id)
                    });
                    assert!(spawned, "room {} started leaking without a spawn", room.id);
                    if events.iter().any(|e| matches!(e, SimEvent::LeakSpawned { .. })) {
                        assert!(was.flood_level < config.max_flood);
                    }
                }
                if was.leak_active && !room.leak_active {
                    let fixed = events.iter().any(|e| {
                        matches!(e, SimEvent::Interaction(Outcome::Fixed { room: r, .. }) if *r == room.id)
                            || matches!(e, SimEvent::Reset { .. })
                    });
                    assert!(fixed, "room {} stopped leaking without a repair", room.id);
                }
            }

            // Only a reset may raise the interval again
            if !events.iter().any(|e| matches!(e, SimEvent::Reset { .. })) {
                assert!(snap.leak_interval <= prev_interval);
            }
            assert!(snap.leak_interval >= config.leak_interval_min);
            prev_interval = snap.leak_interval;

            fixes += events
                .iter()
                .filter(|e| matches!(e, SimEvent::Interaction(Outcome::Fixed { .. })))
                .count();
            prev = snap;
        }
        assert!(fixes > 0, "seed {} never fixed a leak", seed);
    }
}

#[test]
fn same_seed_same_session() {
    let run = |seed| {
        let mut engine =
            SimulationEngine::with_default_layout(SimConfig::default().with_seed(seed)).unwrap();
        let mut log = Vec::new();
        for _ in 0..3000 {
            log.extend(engine.tick(&InputSnapshot::default(), &mut Stationary));
        }
        (log, engine.snapshot())
    };
    assert_eq!(run(11), run(11));
}

#[test]
fn non_finite_tuning_rejected_at_setup() {
    for config in [
        SimConfig {
            critical_multiplier: f32::NAN,
            ..Default::default()
        },
        SimConfig {
            repair_amount: f32::NAN,
            ..Default::default()
        },
    ] {
        assert!(SimulationEngine::with_default_layout(config).is_err());
    }
}
