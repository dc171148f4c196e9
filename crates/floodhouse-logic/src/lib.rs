//! Pure simulation logic for Floodhouse.
//!
//! A player runs between the rooms of a dollhouse, fetches tools from the
//! kitchen and patches leaks before the house floods. This crate holds the
//! whole rule set — leak spawning, difficulty ramp, flooding, tool
//! compatibility, repairs and game over — with no rendering, audio or input
//! polling. Those collaborators read a [`engine::Snapshot`] each frame and
//! feed back an [`engine::InputSnapshot`] plus a player position.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | Session tuning with serde defaults and validation |
//! | [`constants`] | Stock tuning values, timings, room ids |
//! | [`engine`] | Frame orchestrator, input/motion/event interfaces |
//! | [`error`] | Layout and config setup errors |
//! | [`flood`] | Per-room water integration |
//! | [`game_over`] | Session phase and the flooded-room threshold |
//! | [`geometry`] | Points, rectangles, containment |
//! | [`interaction`] | Pickup, swap and repair resolution, feedback text |
//! | [`rng`] | Seeded deterministic RNG |
//! | [`rooms`] | Room definitions, categories, compatibility table, registry |
//! | [`spawner`] | Leak spawning and interval ramp |
//! | [`state`] | The owned session aggregate |
//! | [`tools`] | Tool catalogue and kitchen cycler |

pub mod config;
pub mod constants;
pub mod engine;
pub mod error;
pub mod flood;
pub mod game_over;
pub mod geometry;
pub mod interaction;
pub mod rng;
pub mod rooms;
pub mod spawner;
pub mod state;
pub mod tools;
