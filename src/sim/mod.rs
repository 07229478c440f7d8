//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering or platform dependencies; side effects leave as events

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::Aabb;
pub use state::{
    ActiveEffects, GameEvent, GamePhase, GameState, Obstacle, Particle, Player, Powerup,
    PowerupKind,
};
pub use tick::{TickInput, tick};
