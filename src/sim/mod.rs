//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One step per display frame
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod effects;
pub mod kinematics;
pub mod session;
pub mod snapshot;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{Aabb, bird_hitbox, has_passed, hits_obstacle, within_pickup};
pub use kinematics::GroundContact;
pub use snapshot::FrameSnapshot;
pub use state::{
    ActiveEffects, Bird, Cloud, GameEvent, GamePhase, GameState, Obstacle, Particle, ParticleKind,
    PowerUp, PowerUpKind, Star,
};
pub use tick::{TickInput, apply_power_up, tick};
