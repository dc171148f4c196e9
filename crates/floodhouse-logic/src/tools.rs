//! Tool catalogue and the kitchen tool cycler.
//!
//! The kitchen always offers exactly one tool. It rotates through the
//! catalogue on a fixed timer and also advances whenever the player takes
//! the tool on offer, so the slot is never empty.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A repair tool. The catalogue is closed and ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tool {
    Wrench,
    Plunger,
    Tape,
    Hammer,
    Bucket,
}

impl Tool {
    /// Every tool, in cycling order.
    pub const ALL: [Tool; 5] = [
        Tool::Wrench,
        Tool::Plunger,
        Tool::Tape,
        Tool::Hammer,
        Tool::Bucket,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Tool::Wrench => "wrench",
            Tool::Plunger => "plunger",
            Tool::Tape => "tape",
            Tool::Hammer => "hammer",
            Tool::Bucket => "bucket",
        }
    }

    /// The tool after this one in catalogue order, wrapping around.
    pub fn next(self) -> Tool {
        let idx = Self::ALL.iter().position(|t| *t == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Kitchen tool slot with its rotation timer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCycler {
    current: Tool,
    period: u32,
    countdown: u32,
}

impl ToolCycler {
    pub fn new(period: u32) -> Self {
        Self {
            current: Tool::ALL[0],
            period,
            countdown: period,
        }
    }

    /// Tool currently on offer in the kitchen.
    pub fn current(&self) -> Tool {
        self.current
    }

    /// Frames until the next timed rotation.
    pub fn countdown(&self) -> u32 {
        self.countdown
    }

    /// Advance the timer by one frame. Returns the new tool when the timer
    /// fired; the tool on offer is replaced regardless of who wanted it.
    pub fn tick(&mut self) -> Option<Tool> {
        self.countdown = self.countdown.saturating_sub(1);
        if self.countdown > 0 {
            return None;
        }
        self.countdown = self.period;
        self.current = self.current.next();
        log::debug!("Kitchen now offers {}", self.current);
        Some(self.current)
    }

    /// Hand the offered tool to the player; the kitchen moves on to the next
    /// one. The rotation timer is not restarted.
    pub fn take(&mut self) -> Tool {
        let taken = self.current;
        self.current = taken.next();
        taken
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.period);
    }
}
