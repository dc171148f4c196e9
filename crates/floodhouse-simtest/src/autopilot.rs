//! Scripted player for headless sessions.
//!
//! [`WalkingAvatar`] stands in for the movement collaborator: it moves the
//! player a fixed number of pixels per frame in the pressed directions and
//! keeps them on screen. [`Pilot`] stands in for the person holding the
//! controller: it fetches a useful tool, walks to the matching leak and
//! presses interact once it is close enough.

use floodhouse_logic::constants::screen;
use floodhouse_logic::engine::{InputSnapshot, PlayerMotion};
use floodhouse_logic::geometry::Point;
use floodhouse_logic::state::SimulationState;
use floodhouse_logic::tools::Tool;

/// Pixels per frame.
pub const WALK_SPEED: f32 = 1.5;

#[derive(Debug, Clone, Copy)]
pub struct WalkingAvatar {
    pub speed: f32,
}

impl Default for WalkingAvatar {
    fn default() -> Self {
        Self { speed: WALK_SPEED }
    }
}

impl PlayerMotion for WalkingAvatar {
    fn advance(&mut self, input: &InputSnapshot, from: Point) -> Point {
        let mut dx = 0.0;
        let mut dy = 0.0;
        if input.left {
            dx -= self.speed;
        }
        if input.right {
            dx += self.speed;
        }
        if input.up {
            dy -= self.speed;
        }
        if input.down {
            dy += self.speed;
        }
        Point::new(
            (from.x + dx).clamp(0.0, screen::WIDTH - 1.0),
            (from.y + dy).clamp(0.0, screen::HEIGHT - 1.0),
        )
    }
}

/// Decision-making half of the scripted player.
#[derive(Debug, Clone, Default)]
pub struct Pilot {
    /// Whether interact was held last frame; the pilot releases the button
    /// between presses so every press is a fresh edge.
    pressed: bool,
}

impl Pilot {
    /// Choose this frame's input from the current state.
    pub fn decide(&mut self, state: &SimulationState, reach: f32) -> InputSnapshot {
        let (room, goal) = self.goal(state);
        let mut input = steer(state.player, goal, reach);

        let arrived = state.current_room == Some(room) && (state.player.x - goal.x).abs() <= reach;
        let wants_press = if room == state.rooms.tool_source() {
            wants_offered_tool(state)
        } else {
            state.carried.is_some()
        };
        input.interact = arrived && wants_press && !self.pressed;
        self.pressed = input.interact;
        input
    }

    fn goal(&self, state: &SimulationState) -> (u8, Point) {
        let kitchen = state.rooms.tool_source();
        let target = state
            .carried
            .and_then(|tool| {
                state
                    .rooms
                    .floodable()
                    .filter(|r| r.leak_active() && r.def.category.accepts(tool))
                    .max_by(|a, b| a.flood_level().total_cmp(&b.flood_level()))
                    .map(|r| r.id())
            })
            .unwrap_or(kitchen);

        let point = state
            .rooms
            .get(target)
            .map(|r| Point::new(r.def.leak_x, r.def.bounds.center().y))
            .unwrap_or(state.player);
        (target, point)
    }
}

/// Whether the tool on offer helps with a current leak that the tool in
/// hand (if any) does not.
fn wants_offered_tool(state: &SimulationState) -> bool {
    let useful = |tool: Tool| {
        state
            .rooms
            .floodable()
            .any(|r| r.leak_active() && r.def.category.accepts(tool))
    };
    let offered = state.kitchen.current();
    match state.carried {
        None => useful(offered),
        Some(held) => !useful(held) && useful(offered),
    }
}

fn steer(from: Point, to: Point, slack: f32) -> InputSnapshot {
    InputSnapshot {
        left: to.x < from.x - slack,
        right: to.x > from.x + slack,
        up: to.y < from.y - slack,
        down: to.y > from.y + slack,
        interact: false,
    }
}
