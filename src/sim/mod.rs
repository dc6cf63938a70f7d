//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per tick, constants are per frame
//! - Seeded RNG only
//! - Platforms iterate in world-x order
//! - No rendering or platform dependencies

pub mod bot;
pub mod generator;
pub mod physics;
pub mod rng;
pub mod scenery;
pub mod state;
pub mod tick;

pub use bot::{BotCommand, decide, plan_jump};
pub use generator::{generate_next_platform, pick_weighted_width, width_weights};
pub use physics::Direction;
pub use rng::RandomStream;
pub use state::{Cloud, GameEvent, GameState, GeocodeMarker, Platform, Player, Stats};
pub use tick::{TickInput, start_over, tick};
