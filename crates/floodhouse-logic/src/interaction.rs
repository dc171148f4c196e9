//! Player interaction — tool pickup in the kitchen, repairs everywhere else.
//!
//! Runs once per explicit interact press, never per frame. What happens
//! depends only on the room the player stands in, the tool in hand and the
//! room's leak state:
//!
//! | Room | Hand | Result |
//! |------|------|--------|
//! | Kitchen | empty | pick up the offered tool |
//! | Kitchen | tool | swap; the old tool is discarded |
//! | Leaking | compatible tool | leak fixed, water drained, tool used up |
//! | Leaking | other tool | "wrong tool" hint naming the two that work |
//! | anything else | any | nothing |
//!
//! With the proximity gate on, a repair attempt from too far away yields a
//! "move closer" hint before the tool is even looked at.

use crate::config::SimConfig;
use crate::state::SimulationState;
use crate::tools::Tool;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Result of one interact press.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Outcome {
    PickedUp(Tool),
    Swapped { dropped: Tool, taken: Tool },
    Fixed { room: u8, tool: Tool },
    WrongTool { room: u8, needed: [Tool; 2] },
    MoveCloser { room: u8 },
    Nothing,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::PickedUp(tool) => write!(f, "Picked up {}", tool),
            Outcome::Swapped { dropped, taken } => write!(f, "Swapped {} for {}", dropped, taken),
            Outcome::Fixed { tool, .. } => write!(f, "Fixed it with the {}!", tool),
            Outcome::WrongTool { needed, .. } => {
                write!(f, "Wrong tool! Need {} or {}", needed[0], needed[1])
            }
            Outcome::MoveCloser { .. } => f.write_str("Move closer to the leak"),
            Outcome::Nothing => Ok(()),
        }
    }
}

/// Transient on-screen message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feedback {
    pub outcome: Outcome,
    /// Frames left before the message disappears.
    pub remaining: u32,
}

impl Feedback {
    pub fn new(outcome: Outcome, frames: u32) -> Self {
        Self {
            outcome,
            remaining: frames,
        }
    }

    pub fn message(&self) -> String {
        self.outcome.to_string()
    }
}

/// Count down the feedback timer, clearing the message when it runs out.
pub fn tick_feedback(feedback: &mut Option<Feedback>) {
    if let Some(fb) = feedback {
        fb.remaining = fb.remaining.saturating_sub(1);
        if fb.remaining == 0 {
            *feedback = None;
        }
    }
}

/// Resolve one interact press and post its feedback message.
pub fn interact(state: &mut SimulationState, config: &SimConfig) -> Outcome {
    let outcome = resolve(state, config);
    if outcome != Outcome::Nothing {
        state.feedback = Some(Feedback::new(outcome, config.feedback_frames));
    }
    outcome
}

fn resolve(state: &mut SimulationState, config: &SimConfig) -> Outcome {
    let Some(room_id) = state.current_room else {
        return Outcome::Nothing;
    };
    let Some(room) = state.rooms.get(room_id) else {
        return Outcome::Nothing;
    };

    if room.is_tool_source() {
        let taken = state.kitchen.take();
        return match state.carried.replace(taken) {
            None => {
                log::debug!("Picked up {}", taken);
                Outcome::PickedUp(taken)
            }
            Some(dropped) => {
                log::debug!("Swapped {} for {}", dropped, taken);
                Outcome::Swapped { dropped, taken }
            }
        };
    }

    if !room.leak_active() {
        return Outcome::Nothing;
    }
    let Some(tool) = state.carried else {
        return Outcome::Nothing;
    };

    if let Some(range) = config.proximity_gate {
        if (state.player.x - room.def.leak_x).abs() > range {
            return Outcome::MoveCloser { room: room_id };
        }
    }

    // Registry construction guarantees every leaking room has a table entry.
    let Some(needed) = room.def.category.accepted_tools() else {
        return Outcome::Nothing;
    };
    if !needed.contains(&tool) {
        log::debug!("{} does not fit room {}", tool, room_id);
        return Outcome::WrongTool {
            room: room_id,
            needed,
        };
    }

    let critical = room.is_critical();
    state.rooms.set_leak(room_id, false);
    state.rooms.adjust_flood(room_id, -config.repair_amount);
    state.carried = None;
    state.score = state.score.saturating_add(config.repair_bonus);
    if critical {
        state.difficulty.flood_multiplier = 1.0;
    }
    log::info!("Fixed leak in room {} with {}", room_id, tool);
    Outcome::Fixed {
        room: room_id,
        tool,
    }
}
