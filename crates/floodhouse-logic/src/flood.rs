//! Flood integration: leaking rooms fill up, everything else stays put.

use crate::rooms::RoomRegistry;

/// Raise every leaking room by `base_rate * multiplier`, clamped at the
/// registry's maximum. Rooms do not affect each other, so iteration order
/// does not matter. Returns the ids of rooms that reached the maximum this
/// frame.
pub fn integrate_flood(rooms: &mut RoomRegistry, base_rate: f32, multiplier: f32) -> Vec<u8> {
    let delta = base_rate * multiplier;
    let leaking: Vec<u8> = rooms
        .rooms()
        .iter()
        .filter(|r| r.leak_active())
        .map(|r| r.id())
        .collect();

    let max = rooms.max_flood();
    let mut newly_flooded = Vec::new();
    for id in leaking {
        let before = rooms.get(id).map(|r| r.flood_level()).unwrap_or(max);
        if let Some(after) = rooms.adjust_flood(id, delta) {
            if before < max && after >= max {
                log::info!("Room {} is fully flooded", id);
                newly_flooded.push(id);
            }
        }
    }
    newly_flooded
}
