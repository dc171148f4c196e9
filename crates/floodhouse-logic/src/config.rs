//! Session tuning.
//!
//! Every number the simulation uses lives in [`SimConfig`]. Missing fields in
//! a JSON config fall back to the stock values from [`crate::constants`].

use crate::constants::{flood, score, timing, DEFAULT_SEED};
use crate::error::SetupError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub max_flood: f32,
    pub base_flood_rate: f32,
    pub critical_multiplier: f32,
    pub repair_amount: f32,
    pub repair_bonus: u32,
    pub tool_cycle_frames: u32,
    pub leak_interval_start: u32,
    pub leak_interval_step: u32,
    pub leak_interval_min: u32,
    pub score_interval_frames: u32,
    pub feedback_frames: u32,
    /// Flooded rooms needed to end the session. `None` means every room
    /// except the tool source.
    pub game_over_threshold: Option<usize>,
    /// Maximum horizontal distance from the leak sprite at which a repair is
    /// allowed. `None` disables the check.
    pub proximity_gate: Option<f32>,
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            max_flood: flood::MAX_FLOOD,
            base_flood_rate: flood::BASE_FLOOD_RATE,
            critical_multiplier: flood::CRITICAL_MULTIPLIER,
            repair_amount: flood::REPAIR_AMOUNT,
            repair_bonus: score::REPAIR_BONUS,
            tool_cycle_frames: timing::TOOL_CYCLE_FRAMES,
            leak_interval_start: timing::LEAK_INTERVAL_START,
            leak_interval_step: timing::LEAK_INTERVAL_STEP,
            leak_interval_min: timing::LEAK_INTERVAL_MIN,
            score_interval_frames: timing::SCORE_INTERVAL_FRAMES,
            feedback_frames: timing::FEEDBACK_FRAMES,
            game_over_threshold: None,
            proximity_gate: None,
            seed: DEFAULT_SEED,
        }
    }
}

impl SimConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_proximity_gate(mut self, range: f32) -> Self {
        self.proximity_gate = Some(range);
        self
    }

    /// Reject values that would break a timer or an invariant.
    /// `floodable_rooms` is the number of non-tool-source rooms in the layout.
    pub fn validate(&self, floodable_rooms: usize) -> Result<(), SetupError> {
        let fail = |msg: String| -> Result<(), SetupError> { Err(SetupError::Config(msg)) };

        if !(self.max_flood > 0.0 && self.max_flood.is_finite()) {
            return fail(format!("max_flood must be positive, got {}", self.max_flood));
        }
        if !(self.base_flood_rate >= 0.0 && self.base_flood_rate.is_finite()) {
            return fail(format!(
                "base_flood_rate must be non-negative, got {}",
                self.base_flood_rate
            ));
        }
        if !(self.critical_multiplier >= 1.0 && self.critical_multiplier.is_finite()) {
            return fail(format!(
                "critical_multiplier must be at least 1, got {}",
                self.critical_multiplier
            ));
        }
        if !(self.repair_amount >= 0.0 && self.repair_amount.is_finite()) {
            return fail(format!(
                "repair_amount must be non-negative, got {}",
                self.repair_amount
            ));
        }
        for (name, frames) in [
            ("tool_cycle_frames", self.tool_cycle_frames),
            ("leak_interval_min", self.leak_interval_min),
            ("score_interval_frames", self.score_interval_frames),
        ] {
            if frames == 0 {
                return fail(format!("{} must be at least 1", name));
            }
        }
        if self.leak_interval_start < self.leak_interval_min {
            return fail(format!(
                "leak_interval_start ({}) is below leak_interval_min ({})",
                self.leak_interval_start, self.leak_interval_min
            ));
        }
        if let Some(threshold) = self.game_over_threshold {
            if threshold == 0 || threshold > floodable_rooms {
                return fail(format!(
                    "game_over_threshold must be in 1..={}, got {}",
                    floodable_rooms, threshold
                ));
            }
        }
        if let Some(range) = self.proximity_gate {
            if !(range >= 0.0 && range.is_finite()) {
                return fail(format!("proximity_gate must be non-negative, got {}", range));
            }
        }
        Ok(())
    }

    /// Threshold in effect for a layout with `floodable_rooms` leakable rooms.
    pub fn effective_threshold(&self, floodable_rooms: usize) -> usize {
        self.game_over_threshold.unwrap_or(floodable_rooms)
    }
}
