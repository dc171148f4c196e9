//! Game constants — tuning defaults, screen geometry, room ids.
//!
//! Plain constants with no runtime dependency. [`crate::config::SimConfig`]
//! takes its defaults from here; the simtest harness reads them directly.

/// Flooding and repair tuning.
pub mod flood {
    /// Water level at which a room counts as lost.
    pub const MAX_FLOOD: f32 = 100.0;
    /// Water added per frame to a leaking room before the multiplier.
    pub const BASE_FLOOD_RATE: f32 = 0.08;
    /// Global multiplier applied while the critical room leaks.
    pub const CRITICAL_MULTIPLIER: f32 = 2.0;
    /// Water removed from a room by a successful repair.
    pub const REPAIR_AMOUNT: f32 = 30.0;
}

/// Timers, in frames (30 frames per second).
pub mod timing {
    pub const FRAMES_PER_SECOND: u32 = 30;
    /// Kitchen tool rotation period.
    pub const TOOL_CYCLE_FRAMES: u32 = 90;
    /// Frames between leaks at the start of a session.
    pub const LEAK_INTERVAL_START: u32 = 300;
    /// Interval reduction applied after every spawned leak.
    pub const LEAK_INTERVAL_STEP: u32 = 10;
    /// Shortest allowed interval between leaks.
    pub const LEAK_INTERVAL_MIN: u32 = 90;
    /// One survival point is awarded every this many frames.
    pub const SCORE_INTERVAL_FRAMES: u32 = 30;
    /// How long a feedback message stays on screen.
    pub const FEEDBACK_FRAMES: u32 = 60;
}

/// Scoring.
pub mod score {
    /// Bonus for each repaired leak.
    pub const REPAIR_BONUS: u32 = 100;
}

/// Stock dollhouse room ids.
pub mod room_ids {
    pub const ATTIC: u8 = 0;
    pub const BEDROOM: u8 = 1;
    pub const BATHROOM: u8 = 2;
    pub const KITCHEN: u8 = 3;
    pub const LIVING_ROOM: u8 = 4;
}

/// Screen size of the dollhouse (PICO-8 style 128x128).
pub mod screen {
    pub const WIDTH: f32 = 128.0;
    pub const HEIGHT: f32 = 128.0;
}

/// Default seed used when no explicit seed is provided.
pub const DEFAULT_SEED: u64 = 42;
