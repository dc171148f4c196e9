//! The single owned aggregate holding all mutable session state.

use crate::config::SimConfig;
use crate::error::SetupError;
use crate::game_over::SessionState;
use crate::geometry::Point;
use crate::interaction::Feedback;
use crate::rng::SimRng;
use crate::rooms::{RoomDef, RoomRegistry};
use crate::spawner::Difficulty;
use crate::tools::{Tool, ToolCycler};

#[derive(Debug, Clone)]
pub struct SimulationState {
    /// Frames since the session started.
    pub frame: u64,
    pub rooms: RoomRegistry,
    pub kitchen: ToolCycler,
    /// The player's single carry slot.
    pub carried: Option<Tool>,
    pub difficulty: Difficulty,
    pub session: SessionState,
    pub score: u32,
    pub feedback: Option<Feedback>,
    pub player: Point,
    /// Room the player stands in; `None` on the ladder.
    pub current_room: Option<u8>,
    pub rng: SimRng,
}

impl SimulationState {
    /// Fresh state for `layout`. The player starts in the middle of the
    /// tool-source room. No leak is placed here; see
    /// [`crate::engine::SimulationEngine::reset`].
    pub fn new(layout: Vec<RoomDef>, config: &SimConfig) -> Result<Self, SetupError> {
        let rooms = RoomRegistry::new(layout, config.max_flood)?;
        config.validate(rooms.floodable().count())?;
        let player = rooms
            .get(rooms.tool_source())
            .map(|r| r.def.bounds.center())
            .unwrap_or_default();
        Ok(Self {
            frame: 0,
            current_room: rooms.room_containing(player),
            rooms,
            kitchen: ToolCycler::new(config.tool_cycle_frames),
            carried: None,
            difficulty: Difficulty::new(config),
            session: SessionState::Playing,
            score: 0,
            feedback: None,
            player,
            rng: SimRng::from_seed_u64(config.seed),
        })
    }

    /// Put every field back to its initial value. The RNG keeps running so
    /// consecutive sessions differ.
    pub fn reset(&mut self, config: &SimConfig) {
        self.frame = 0;
        self.rooms.reset();
        self.kitchen.reset();
        self.carried = None;
        self.difficulty = Difficulty::new(config);
        self.session = SessionState::Playing;
        self.score = 0;
        self.feedback = None;
        self.player = self
            .rooms
            .get(self.rooms.tool_source())
            .map(|r| r.def.bounds.center())
            .unwrap_or_default();
        self.current_room = self.rooms.room_containing(self.player);
    }
}
