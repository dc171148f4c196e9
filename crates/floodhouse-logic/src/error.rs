//! Setup errors.
//!
//! The running simulation never fails: every numeric update is clamped and
//! all randomness is internal. Only building a session from a layout and a
//! config can fail, and it does so before the first tick.

use crate::rooms::RoomCategory;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SetupError {
    #[error("layout has no rooms")]
    EmptyLayout,
    #[error("duplicate room id {0}")]
    DuplicateRoomId(u8),
    #[error("layout needs exactly one tool-source room, found {0}")]
    ToolSourceCount(usize),
    #[error("layout needs exactly one critical room, found {0}")]
    CriticalCount(usize),
    #[error("room {id} is the tool source but has category {category:?}")]
    ToolSourceCategory { id: u8, category: RoomCategory },
    #[error("room {0} cannot be both tool source and critical")]
    CriticalToolSource(u8),
    #[error("room {id} ({category:?}) has no entry in the compatibility table")]
    NoCompatibility { id: u8, category: RoomCategory },
    #[error("room {0} has a degenerate rectangle")]
    BadBounds(u8),
    #[error("invalid config: {0}")]
    Config(String),
}
