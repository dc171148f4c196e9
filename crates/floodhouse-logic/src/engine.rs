//! Simulation engine — main entry point for running a session.
//!
//! One call to [`SimulationEngine::tick`] is one frame. Within a frame the
//! order is fixed:
//!
//! 1. frame counter and feedback timer
//! 2. kitchen tool cycler
//! 3. leak spawner
//! 4. player motion (external) and current-room lookup
//! 5. interaction, if interact was pressed this frame
//! 6. flood integration
//! 7. game-over check
//! 8. survival score
//!
//! A leak fixed in step 5 therefore never floods in step 6, and step 7 sees
//! this frame's water, not last frame's.

use crate::config::SimConfig;
use crate::error::SetupError;
use crate::flood::integrate_flood;
use crate::game_over::{flooded_count, is_house_lost, SessionState};
use crate::geometry::Point;
use crate::interaction::{interact, tick_feedback, Outcome};
use crate::rooms::{default_layout, RoomCategory, RoomDef};
use crate::spawner::{spawn_leak, tick_spawner};
use crate::state::SimulationState;
use crate::tools::Tool;
use serde::{Deserialize, Serialize};

/// Per-frame input from the input collaborator. `interact` must already be
/// edge-triggered: true only on the frame the button went down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InputSnapshot {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub interact: bool,
}

impl InputSnapshot {
    pub fn interact() -> Self {
        Self {
            interact: true,
            ..Default::default()
        }
    }
}

/// Movement and physics collaborator: turns input into a new player position.
pub trait PlayerMotion {
    fn advance(&mut self, input: &InputSnapshot, from: Point) -> Point;
}

/// Motion that ignores input and leaves the player where they are.
#[derive(Debug, Clone, Copy, Default)]
pub struct Stationary;

impl PlayerMotion for Stationary {
    fn advance(&mut self, _input: &InputSnapshot, from: Point) -> Point {
        from
    }
}

impl<F> PlayerMotion for F
where
    F: FnMut(&InputSnapshot, Point) -> Point,
{
    fn advance(&mut self, input: &InputSnapshot, from: Point) -> Point {
        self(input, from)
    }
}

/// Something that happened during a frame, for audio cues and the
/// high-score store.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SimEvent {
    ToolCycled(Tool),
    LeakSpawned { room: u8 },
    Interaction(Outcome),
    RoomFlooded { room: u8 },
    GameOver { score: u32 },
    Reset { first_leak: Option<u8> },
}

/// Read-only view of one room for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomView {
    pub id: u8,
    pub name: String,
    pub category: RoomCategory,
    pub flood_level: f32,
    pub leak_active: bool,
}

/// Everything the renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub frame: u64,
    pub rooms: Vec<RoomView>,
    pub kitchen_tool: Tool,
    pub carried: Option<Tool>,
    pub session: SessionState,
    pub score: u32,
    pub feedback: Option<(String, u32)>,
    pub current_room: Option<u8>,
    pub player: Point,
    pub leak_interval: u32,
    pub flood_multiplier: f32,
}

/// Owns the session state and runs it frame by frame.
pub struct SimulationEngine {
    state: SimulationState,
    config: SimConfig,
    threshold: usize,
}

impl SimulationEngine {
    /// Build an engine for `layout` and start the first session.
    pub fn new(layout: Vec<RoomDef>, config: SimConfig) -> Result<Self, SetupError> {
        let state = SimulationState::new(layout, &config)?;
        let threshold = config.effective_threshold(state.rooms.floodable().count());
        let mut engine = Self {
            state,
            config,
            threshold,
        };
        engine.reset();
        Ok(engine)
    }

    /// Engine on the stock dollhouse layout.
    pub fn with_default_layout(config: SimConfig) -> Result<Self, SetupError> {
        Self::new(default_layout(), config)
    }

    /// Restore every piece of mutable state to its initial value and open
    /// the first leak so no session starts dry. Returns the leaking room.
    pub fn reset(&mut self) -> Option<u8> {
        self.state.reset(&self.config);
        let first = spawn_leak(
            &mut self.state.rooms,
            &mut self.state.difficulty,
            &mut self.state.rng,
            &self.config,
        );
        log::info!("New session, first leak in {:?}", first);
        first
    }

    /// Run one frame. In game-over only an interact press does anything: it
    /// starts a new session.
    pub fn tick(&mut self, input: &InputSnapshot, motion: &mut impl PlayerMotion) -> Vec<SimEvent> {
        let mut events = Vec::new();

        if self.state.session == SessionState::GameOver {
            if input.interact {
                let first_leak = self.reset();
                events.push(SimEvent::Reset { first_leak });
            }
            return events;
        }

        let state = &mut self.state;
        state.frame += 1;
        tick_feedback(&mut state.feedback);

        if let Some(tool) = state.kitchen.tick() {
            events.push(SimEvent::ToolCycled(tool));
        }

        if let Some(room) = tick_spawner(
            &mut state.rooms,
            &mut state.difficulty,
            &mut state.rng,
            &self.config,
        ) {
            events.push(SimEvent::LeakSpawned { room });
        }

        state.player = motion.advance(input, state.player);
        state.current_room = state.rooms.room_containing(state.player);

        if input.interact {
            let outcome = interact(state, &self.config);
            if outcome != Outcome::Nothing {
                events.push(SimEvent::Interaction(outcome));
            }
        }

        let multiplier = state.difficulty.flood_multiplier;
        for room in integrate_flood(&mut state.rooms, self.config.base_flood_rate, multiplier) {
            events.push(SimEvent::RoomFlooded { room });
        }

        if is_house_lost(&state.rooms, self.threshold) {
            state.session = SessionState::GameOver;
            log::info!(
                "House lost at frame {} with {} rooms flooded, score {}",
                state.frame,
                flooded_count(&state.rooms),
                state.score
            );
            events.push(SimEvent::GameOver { score: state.score });
            return events;
        }

        if state.frame % u64::from(self.config.score_interval_frames) == 0 {
            state.score = state.score.saturating_add(1);
        }

        events
    }

    pub fn snapshot(&self) -> Snapshot {
        let s = &self.state;
        Snapshot {
            frame: s.frame,
            rooms: s
                .rooms
                .rooms()
                .iter()
                .map(|r| RoomView {
                    id: r.id(),
                    name: r.def.name.clone(),
                    category: r.def.category,
                    flood_level: r.flood_level(),
                    leak_active: r.leak_active(),
                })
                .collect(),
            kitchen_tool: s.kitchen.current(),
            carried: s.carried,
            session: s.session,
            score: s.score,
            feedback: s.feedback.as_ref().map(|f| (f.message(), f.remaining)),
            current_room: s.current_room,
            player: s.player,
            leak_interval: s.difficulty.leak_interval,
            flood_multiplier: s.difficulty.flood_multiplier,
        }
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    /// Raw mutable access for staging test scenarios. Bypasses the frame
    /// order, so a frontend must drive the session through [`Self::tick`]
    /// and [`Self::reset`] only.
    #[doc(hidden)]
    pub fn state_mut(&mut self) -> &mut SimulationState {
        &mut self.state
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Flooded-room count that ends the session.
    pub fn game_over_threshold(&self) -> usize {
        self.threshold
    }

    pub fn session(&self) -> SessionState {
        self.state.session
    }

    pub fn is_game_over(&self) -> bool {
        self.state.session == SessionState::GameOver
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }
}
