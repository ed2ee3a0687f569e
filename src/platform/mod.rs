//! Platform input layer
//!
//! Keyboard, pointer and touch all collapse into the single binary signal the
//! simulation understands: a held thrust level plus a one-shot jump edge.
//! Nothing is queued; a press between frames is seen exactly once.

use crate::sim::{GamePhase, GameState, TickInput};
use crate::tuning::ControlMode;

/// Physical input source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSource {
    Keyboard,
    Pointer,
    Touch,
}

impl InputSource {
    fn index(self) -> usize {
        match self {
            InputSource::Keyboard => 0,
            InputSource::Pointer => 1,
            InputSource::Touch => 2,
        }
    }
}

/// Merges raw press/release events into per-frame [`TickInput`]
#[derive(Debug, Clone, Default)]
pub struct InputLatch {
    held: [bool; 3],
    jump_pending: bool,
}

impl InputLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Source went down. Key auto-repeat doesn't produce extra jumps.
    pub fn press(&mut self, source: InputSource) {
        let held = &mut self.held[source.index()];
        if !*held {
            *held = true;
            self.jump_pending = true;
        }
    }

    pub fn release(&mut self, source: InputSource) {
        self.held[source.index()] = false;
    }

    /// Drop everything held (focus lost, tab hidden)
    pub fn clear(&mut self) {
        self.held = [false; 3];
        self.jump_pending = false;
    }

    pub fn is_held(&self) -> bool {
        self.held.iter().any(|&h| h)
    }

    /// Input for the next frame; consumes the pending jump edge
    pub fn sample(&mut self) -> TickInput {
        TickInput {
            jump: std::mem::take(&mut self.jump_pending),
            thrust: self.is_held(),
        }
    }
}

/// Simple demo pilot that aims for the next gap
///
/// Used by the headless runner and attract mode.
pub fn autopilot(state: &GameState) -> TickInput {
    if state.phase != GamePhase::Playing {
        return TickInput::default();
    }
    let bird = &state.bird;
    let pipe_width = state.tuning.pipe_width;

    let target_y = state
        .obstacles
        .iter()
        .filter(|o| o.x + pipe_width > bird.pos.x - bird.size)
        .min_by(|a, b| a.x.total_cmp(&b.x))
        .map(|o| o.gap_center() + state.tuning.pipe_gap * 0.15)
        .unwrap_or(state.tuning.world_height / 2.0);

    let below_target = bird.pos.y > target_y;
    match state.tuning.control {
        ControlMode::Jump { .. } => TickInput {
            jump: below_target && bird.vel > 0.0,
            thrust: false,
        },
        ControlMode::Thrust { .. } => TickInput {
            jump: false,
            thrust: below_target && bird.vel > -2.0,
        },
    }
}
