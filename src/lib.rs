//! Skyhop - a gated-obstacle flying arcade game
//!
//! Core modules:
//! - `sim`: Deterministic per-frame simulation (kinematics, spawning, collisions, scoring)
//! - `tuning`: Data-driven game balance profiles
//! - `app`: Frame driver wiring the simulation to its collaborators
//! - `audio`: Sound cues and background music scheduling
//! - `persistence`: Best-score storage
//! - `platform`: Input merging and the demo autopilot
//! - `ui`: HUD panel state

pub mod app;
pub mod audio;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod tuning;
pub mod ui;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use app::Game;
pub use settings::Settings;
pub use tuning::{ControlMode, Tuning, TuningError};
