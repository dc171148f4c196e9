//! Leak spawner and difficulty ramp.
//!
//! A countdown fires every `leak_interval` frames and opens a leak in one
//! eligible room picked uniformly at random. Each successful spawn shortens
//! the interval by a fixed step down to a floor; nothing lengthens it again
//! until the session resets.

use crate::config::SimConfig;
use crate::rng::SimRng;
use crate::rooms::RoomRegistry;
use serde::{Deserialize, Serialize};

/// Difficulty state that ramps during a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Difficulty {
    /// Frames between spawns for the next cycle.
    pub leak_interval: u32,
    /// Frames left until the next spawn attempt.
    pub leak_countdown: u32,
    /// Global flood multiplier: 1, or the critical multiplier while the
    /// critical room leaks.
    pub flood_multiplier: f32,
}

impl Difficulty {
    pub fn new(config: &SimConfig) -> Self {
        Self {
            leak_interval: config.leak_interval_start,
            leak_countdown: config.leak_interval_start,
            flood_multiplier: 1.0,
        }
    }
}

/// Rooms that may receive a new leak: not the tool source, not already
/// leaking, not already fully flooded.
pub fn eligible_rooms(rooms: &RoomRegistry) -> Vec<u8> {
    rooms
        .floodable()
        .filter(|r| !r.leak_active() && !rooms.is_flooded(r))
        .map(|r| r.id())
        .collect()
}

/// Open a leak in a random eligible room right now, without touching the
/// countdown or the interval. Returns the chosen room.
pub fn spawn_leak(
    rooms: &mut RoomRegistry,
    difficulty: &mut Difficulty,
    rng: &mut SimRng,
    config: &SimConfig,
) -> Option<u8> {
    let eligible = eligible_rooms(rooms);
    let id = *rng.pick(&eligible)?;
    rooms.set_leak(id, true);
    if id == rooms.critical() {
        difficulty.flood_multiplier = config.critical_multiplier;
    }
    log::info!("Leak sprang in room {}", id);
    Some(id)
}

/// Advance the spawn countdown by one frame. When it expires, try to spawn a
/// leak, restart the countdown from the current interval and, if a leak was
/// placed, ramp the interval down. An empty eligible set skips the cycle;
/// there is no retry until the countdown expires again.
pub fn tick_spawner(
    rooms: &mut RoomRegistry,
    difficulty: &mut Difficulty,
    rng: &mut SimRng,
    config: &SimConfig,
) -> Option<u8> {
    difficulty.leak_countdown = difficulty.leak_countdown.saturating_sub(1);
    if difficulty.leak_countdown > 0 {
        return None;
    }

    let spawned = spawn_leak(rooms, difficulty, rng, config);
    difficulty.leak_countdown = difficulty.leak_interval;
    if spawned.is_some() {
        difficulty.leak_interval = difficulty
            .leak_interval
            .saturating_sub(config.leak_interval_step)
            .max(config.leak_interval_min);
    } else {
        log::debug!("No eligible room for a leak this cycle");
    }
    spawned
}
