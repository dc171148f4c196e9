//! Game-over evaluation.

use crate::rooms::RoomRegistry;
use serde::{Deserialize, Serialize};

/// Overall session phase. `Playing -> GameOver` is one way; only a reset
/// starts a new session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SessionState {
    #[default]
    Playing,
    GameOver,
}

/// Number of non-tool-source rooms at the flood maximum.
pub fn flooded_count(rooms: &RoomRegistry) -> usize {
    rooms.floodable().filter(|r| rooms.is_flooded(r)).count()
}

/// Whether the house is lost: at least `threshold` rooms fully flooded.
pub fn is_house_lost(rooms: &RoomRegistry, threshold: usize) -> bool {
    flooded_count(rooms) >= threshold
}
