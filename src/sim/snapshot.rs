//! Read-only frame view handed to the renderer
//!
//! Borrows straight out of [`GameState`], so building one per frame is free.
//! Serializes to JSON for renderers living outside Rust.

use serde::Serialize;

use super::state::{Bird, Cloud, GamePhase, GameState, Obstacle, Particle, PowerUp, Star};

/// Everything needed to draw one frame
#[derive(Debug, Clone, Serialize)]
pub struct FrameSnapshot<'a> {
    pub phase: GamePhase,
    pub score: u32,
    pub best_score: u32,
    pub frame_count: u64,
    pub world_width: f32,
    pub world_height: f32,
    pub ground_height: f32,
    pub pipe_width: f32,
    pub bird: &'a Bird,
    pub shield_active: bool,
    pub auto_fly_active: bool,
    pub obstacles: &'a [Obstacle],
    pub powerups: &'a [PowerUp],
    pub particles: &'a [Particle],
    pub clouds: &'a [Cloud],
    pub stars: &'a [Star],
}

impl GameState {
    /// Snapshot of the current frame
    pub fn snapshot(&self) -> FrameSnapshot<'_> {
        FrameSnapshot {
            phase: self.phase,
            score: self.score,
            best_score: self.best_score,
            frame_count: self.frame_count,
            world_width: self.tuning.world_width,
            world_height: self.tuning.world_height,
            ground_height: self.tuning.ground_height,
            pipe_width: self.tuning.pipe_width,
            bird: &self.bird,
            shield_active: self.effects.shield_active,
            auto_fly_active: self.effects.auto_fly_active(),
            obstacles: &self.obstacles,
            powerups: &self.powerups,
            particles: &self.particles,
            clouds: &self.clouds,
            stars: &self.stars,
        }
    }
}
