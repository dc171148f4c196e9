//! Room registry — static room definitions plus per-room water state.
//!
//! Rooms are created once per session and reset in place; they are never
//! added or removed while a session runs. Flood levels are always clamped to
//! `[0, max_flood]` by the registry itself, so callers can pass any delta.

use crate::constants::room_ids;
use crate::error::SetupError;
use crate::geometry::{Point, Rect};
use crate::tools::Tool;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// What kind of room this is. Decides which tools repair its leaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoomCategory {
    /// Tool source; never leaks.
    Kitchen,
    Bedroom,
    Bathroom,
    LivingRoom,
    /// Critical leak type: doubles flooding everywhere while it leaks.
    Attic,
}

impl RoomCategory {
    pub const ALL: [RoomCategory; 5] = [
        RoomCategory::Kitchen,
        RoomCategory::Bedroom,
        RoomCategory::Bathroom,
        RoomCategory::LivingRoom,
        RoomCategory::Attic,
    ];

    /// Compatibility table: the two tools that fix a leak in this kind of
    /// room. `None` for the kitchen, which has no leaks to fix.
    pub fn accepted_tools(self) -> Option<[Tool; 2]> {
        match self {
            RoomCategory::Kitchen => None,
            RoomCategory::Bedroom => Some([Tool::Tape, Tool::Hammer]),
            RoomCategory::Bathroom => Some([Tool::Wrench, Tool::Plunger]),
            RoomCategory::LivingRoom => Some([Tool::Tape, Tool::Bucket]),
            RoomCategory::Attic => Some([Tool::Hammer, Tool::Bucket]),
        }
    }

    pub fn accepts(self, tool: Tool) -> bool {
        self.accepted_tools()
            .map(|tools| tools.contains(&tool))
            .unwrap_or(false)
    }

    pub fn label(self) -> &'static str {
        match self {
            RoomCategory::Kitchen => "kitchen",
            RoomCategory::Bedroom => "bedroom",
            RoomCategory::Bathroom => "bathroom",
            RoomCategory::LivingRoom => "living room",
            RoomCategory::Attic => "attic",
        }
    }
}

/// Static definition of one room, as loaded from layout data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomDef {
    pub id: u8,
    pub name: String,
    pub category: RoomCategory,
    pub bounds: Rect,
    /// Horizontal position of the leak sprite, used by the proximity gate.
    pub leak_x: f32,
    #[serde(default)]
    pub tool_source: bool,
    #[serde(default)]
    pub critical: bool,
}

impl RoomDef {
    pub fn new(id: u8, name: impl Into<String>, category: RoomCategory, bounds: Rect) -> Self {
        Self {
            id,
            name: name.into(),
            category,
            leak_x: bounds.center().x,
            bounds,
            tool_source: false,
            critical: false,
        }
    }

    pub fn as_tool_source(mut self) -> Self {
        self.tool_source = true;
        self
    }

    pub fn as_critical(mut self) -> Self {
        self.critical = true;
        self
    }
}

/// A room with its live water state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub def: RoomDef,
    flood_level: f32,
    leak_active: bool,
}

impl Room {
    fn new(def: RoomDef) -> Self {
        Self {
            def,
            flood_level: 0.0,
            leak_active: false,
        }
    }

    pub fn id(&self) -> u8 {
        self.def.id
    }

    pub fn flood_level(&self) -> f32 {
        self.flood_level
    }

    pub fn leak_active(&self) -> bool {
        self.leak_active
    }

    pub fn is_tool_source(&self) -> bool {
        self.def.tool_source
    }

    pub fn is_critical(&self) -> bool {
        self.def.critical
    }
}

/// The stock five-room dollhouse: attic on top, bedroom and bathroom on the
/// upper floor, kitchen and living room downstairs. The 8px column between
/// the two halves is the ladder and belongs to no room.
pub fn default_layout() -> Vec<RoomDef> {
    vec![
        RoomDef::new(
            room_ids::ATTIC,
            "Attic",
            RoomCategory::Attic,
            Rect::new(16.0, 8.0, 96.0, 24.0),
        )
        .as_critical(),
        RoomDef::new(
            room_ids::BEDROOM,
            "Bedroom",
            RoomCategory::Bedroom,
            Rect::new(16.0, 36.0, 44.0, 32.0),
        ),
        RoomDef::new(
            room_ids::BATHROOM,
            "Bathroom",
            RoomCategory::Bathroom,
            Rect::new(68.0, 36.0, 44.0, 32.0),
        ),
        RoomDef::new(
            room_ids::KITCHEN,
            "Kitchen",
            RoomCategory::Kitchen,
            Rect::new(16.0, 72.0, 44.0, 32.0),
        )
        .as_tool_source(),
        RoomDef::new(
            room_ids::LIVING_ROOM,
            "Living Room",
            RoomCategory::LivingRoom,
            Rect::new(68.0, 72.0, 44.0, 32.0),
        ),
    ]
}

/// Owns every room of the house.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomRegistry {
    rooms: Vec<Room>,
    max_flood: f32,
}

impl RoomRegistry {
    /// Build a registry, rejecting any layout the rest of the simulation
    /// could not handle.
    pub fn new(defs: Vec<RoomDef>, max_flood: f32) -> Result<Self, SetupError> {
        validate_layout(&defs)?;
        Ok(Self {
            rooms: defs.into_iter().map(Room::new).collect(),
            max_flood,
        })
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn get(&self, id: u8) -> Option<&Room> {
        self.rooms.iter().find(|r| r.id() == id)
    }

    fn get_mut(&mut self, id: u8) -> Option<&mut Room> {
        self.rooms.iter_mut().find(|r| r.id() == id)
    }

    pub fn max_flood(&self) -> f32 {
        self.max_flood
    }

    /// Id of the single tool-source room.
    pub fn tool_source(&self) -> u8 {
        self.rooms
            .iter()
            .find(|r| r.is_tool_source())
            .map(Room::id)
            .unwrap_or_default()
    }

    /// Id of the single critical room.
    pub fn critical(&self) -> u8 {
        self.rooms
            .iter()
            .find(|r| r.is_critical())
            .map(Room::id)
            .unwrap_or_default()
    }

    /// Rooms that can leak and flood.
    pub fn floodable(&self) -> impl Iterator<Item = &Room> {
        self.rooms.iter().filter(|r| !r.is_tool_source())
    }

    /// Set or clear a room's leak. Returns the previous value, or `None` for
    /// an unknown id or the tool-source room, which never leaks.
    pub fn set_leak(&mut self, id: u8, active: bool) -> Option<bool> {
        let room = self.get_mut(id)?;
        if room.is_tool_source() {
            return None;
        }
        let previous = room.leak_active;
        room.leak_active = active;
        Some(previous)
    }

    /// Add `delta` to a room's flood level, clamped to `[0, max_flood]`.
    /// Returns the new level, or `None` for the tool source, which stays dry.
    pub fn adjust_flood(&mut self, id: u8, delta: f32) -> Option<f32> {
        let max = self.max_flood;
        let room = self.get_mut(id)?;
        if room.is_tool_source() {
            return None;
        }
        room.flood_level = (room.flood_level + delta).clamp(0.0, max);
        Some(room.flood_level)
    }

    pub fn is_flooded(&self, room: &Room) -> bool {
        room.flood_level >= self.max_flood
    }

    /// Id of the room whose rectangle contains `point`, or `None` in a
    /// transit zone (ladder, floor slab, outside the house).
    pub fn room_containing(&self, point: Point) -> Option<u8> {
        self.rooms
            .iter()
            .find(|r| r.def.bounds.contains(point))
            .map(Room::id)
    }

    /// Drain every room and stop every leak.
    pub fn reset(&mut self) {
        for room in &mut self.rooms {
            room.flood_level = 0.0;
            room.leak_active = false;
        }
    }
}

fn validate_layout(defs: &[RoomDef]) -> Result<(), SetupError> {
    if defs.is_empty() {
        return Err(SetupError::EmptyLayout);
    }

    let mut ids = HashSet::new();
    for def in defs {
        if !ids.insert(def.id) {
            return Err(SetupError::DuplicateRoomId(def.id));
        }
        if !def.bounds.is_valid() {
            return Err(SetupError::BadBounds(def.id));
        }
        if def.tool_source && def.critical {
            return Err(SetupError::CriticalToolSource(def.id));
        }
        if def.tool_source && def.category != RoomCategory::Kitchen {
            return Err(SetupError::ToolSourceCategory {
                id: def.id,
                category: def.category,
            });
        }
        if !def.tool_source && def.category.accepted_tools().is_none() {
            return Err(SetupError::NoCompatibility {
                id: def.id,
                category: def.category,
            });
        }
    }

    let sources = defs.iter().filter(|d| d.tool_source).count();
    if sources != 1 {
        return Err(SetupError::ToolSourceCount(sources));
    }
    let critical = defs.iter().filter(|d| d.critical).count();
    if critical != 1 {
        return Err(SetupError::CriticalCount(critical));
    }
    Ok(())
}
