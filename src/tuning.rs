//! Data-driven game balance
//!
//! Every constant the simulation reads lives in a single [`Tuning`] profile.
//! The three built-in presets cover the classic jump game and the two
//! hold-to-thrust variants with power-ups; custom profiles load from JSON.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sim::PowerUpKind;

/// Names of the built-in presets, in menu order
pub const PRESET_NAMES: [&str; 3] = ["classic", "thrust", "deluxe"];

/// How the single input signal drives the bird
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ControlMode {
    /// Discrete jump: each jump edge sets velocity to `jump_power`
    Jump { jump_power: f32 },
    /// Hold-to-thrust: velocity accumulates `lift_force` while held
    Thrust { lift_force: f32 },
}

/// Particle counts per burst trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BurstSizes {
    pub jump: usize,
    pub thrust: usize,
    pub score: usize,
    pub pickup: usize,
    pub crash: usize,
}

impl Default for BurstSizes {
    fn default() -> Self {
        Self {
            jump: 5,
            thrust: 3,
            score: 10,
            pickup: 15,
            crash: 20,
        }
    }
}

/// Errors raised while loading a custom profile
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to parse tuning profile: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// A complete configuration profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub name: String,

    // === World ===
    pub world_width: f32,
    pub world_height: f32,
    pub ground_height: f32,

    // === Bird ===
    pub control: ControlMode,
    pub gravity: f32,
    pub min_velocity: f32,
    pub max_velocity: f32,
    /// Rotation = velocity * factor, clamped to +/- `max_rotation`
    pub rotation_factor: f32,
    pub max_rotation: f32,
    pub bird_x: f32,
    pub bird_size: f32,

    // === Obstacles ===
    pub pipe_gap: f32,
    pub pipe_width: f32,
    pub pipe_speed: f32,
    /// Frames between obstacle spawns
    pub spawn_interval: u64,
    pub min_pipe_height: f32,
    /// Space kept between the bottom of the gap range and the world floor
    pub pipe_margin_below: f32,
    /// Hitbox half-extent = size * shrink (more forgiving than the sprite)
    pub hitbox_shrink_x: f32,
    pub hitbox_shrink_y: f32,

    // === Power-ups ===
    pub powerup_chance: f64,
    pub powerup_kinds: Vec<PowerUpKind>,
    pub pickup_radius: f32,
    pub shield_frames: u32,
    pub score_bonus: u32,
    pub boost_impulse: f32,
    pub rebound_impulse: f32,
    pub auto_fly_secs: f32,
    /// Fraction of the distance to mid-screen added to velocity per frame
    pub auto_fly_gain: f32,

    // === Pacing & cosmetics ===
    /// Nominal display rate used to convert wall-clock durations to frames
    pub frame_rate: f32,
    pub cloud_count: usize,
    pub star_count: usize,
    pub max_particles: usize,
    pub bursts: BurstSizes,
}

impl Default for Tuning {
    fn default() -> Self {
        Self::classic()
    }
}

impl Tuning {
    /// The original jump game: no power-ups, spawn every 100 frames
    pub fn classic() -> Self {
        Self {
            name: "classic".to_string(),
            world_width: 480.0,
            world_height: 640.0,
            ground_height: 80.0,
            control: ControlMode::Jump { jump_power: -8.0 },
            gravity: 0.5,
            min_velocity: -10.0,
            // Above the ~22 px/frame a ceiling-to-ground fall reaches
            max_velocity: 24.0,
            rotation_factor: 0.1,
            max_rotation: 0.5,
            bird_x: 100.0,
            bird_size: 35.0,
            pipe_gap: 180.0,
            pipe_width: 80.0,
            pipe_speed: 3.0,
            spawn_interval: 100,
            min_pipe_height: 100.0,
            pipe_margin_below: 180.0,
            hitbox_shrink_x: 0.7,
            hitbox_shrink_y: 0.6,
            powerup_chance: 0.0,
            powerup_kinds: Vec::new(),
            pickup_radius: 40.0,
            shield_frames: 300,
            score_bonus: 5,
            boost_impulse: -5.0,
            rebound_impulse: -7.0,
            auto_fly_secs: 5.0,
            auto_fly_gain: 0.01,
            frame_rate: 60.0,
            cloud_count: 5,
            star_count: 20,
            max_particles: 256,
            bursts: BurstSizes::default(),
        }
    }

    /// Hold-to-thrust with shield, score bonus and boost pickups
    pub fn thrust() -> Self {
        Self {
            name: "thrust".to_string(),
            control: ControlMode::Thrust { lift_force: -0.6 },
            gravity: 0.4,
            min_velocity: -6.0,
            max_velocity: 8.0,
            rotation_factor: 0.08,
            max_rotation: 0.4,
            pipe_gap: 200.0,
            spawn_interval: 150,
            pipe_margin_below: 160.0,
            hitbox_shrink_x: 0.6,
            hitbox_shrink_y: 0.6,
            powerup_chance: 0.3,
            powerup_kinds: vec![
                PowerUpKind::Shield,
                PowerUpKind::ScoreBonus,
                PowerUpKind::Boost,
            ],
            pickup_radius: 40.0,
            shield_frames: 300,
            score_bonus: 5,
            boost_impulse: -5.0,
            rebound_impulse: -6.0,
            bursts: BurstSizes {
                jump: 3,
                thrust: 3,
                score: 12,
                pickup: 18,
                crash: 25,
            },
            ..Self::classic()
        }
    }

    /// Hold-to-thrust with every power-up, slower spawn cadence
    pub fn deluxe() -> Self {
        Self {
            name: "deluxe".to_string(),
            spawn_interval: 200,
            hitbox_shrink_x: 0.5,
            hitbox_shrink_y: 0.5,
            powerup_chance: 0.4,
            powerup_kinds: vec![
                PowerUpKind::Shield,
                PowerUpKind::ScoreBonus,
                PowerUpKind::Boost,
                PowerUpKind::AutoFly,
            ],
            pickup_radius: 60.0,
            shield_frames: 500,
            score_bonus: 10,
            ..Self::thrust()
        }
    }

    /// Look up a built-in preset by name
    pub fn preset(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "classic" => Some(Self::classic()),
            "thrust" => Some(Self::thrust()),
            "deluxe" => Some(Self::deluxe()),
            _ => None,
        }
    }

    /// Parse and validate a custom profile
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Lowest y the bird centre may reach before touching the ground
    pub fn ground_limit(&self) -> f32 {
        self.world_height - self.ground_height - self.bird_size
    }

    /// Range obstacle tops are drawn from, `None` if the gap doesn't fit
    pub fn spawn_height_range(&self) -> Option<(f32, f32)> {
        let max = self.world_height - self.pipe_gap - self.pipe_margin_below;
        (max >= self.min_pipe_height).then_some((self.min_pipe_height, max))
    }

    /// Auto-fly duration in frames at the nominal frame rate
    pub fn auto_fly_frames(&self) -> u32 {
        (self.auto_fly_secs * self.frame_rate).round().max(0.0) as u32
    }

    pub fn is_thrust(&self) -> bool {
        matches!(self.control, ControlMode::Thrust { .. })
    }

    /// Reject profiles the simulation can't run
    ///
    /// An inverted spawn range is allowed: spawning is skipped at runtime.
    pub fn validate(&self) -> Result<(), TuningError> {
        positive("world_width", self.world_width)?;
        positive("world_height", self.world_height)?;
        positive("bird_size", self.bird_size)?;
        positive("pipe_gap", self.pipe_gap)?;
        positive("pipe_width", self.pipe_width)?;
        positive("pipe_speed", self.pipe_speed)?;
        positive("frame_rate", self.frame_rate)?;
        non_negative("ground_height", self.ground_height)?;
        non_negative("max_rotation", self.max_rotation)?;
        if self.spawn_interval == 0 {
            return Err(invalid("spawn_interval", "must be at least one frame"));
        }
        if !(self.min_velocity <= 0.0 && self.max_velocity >= 0.0) {
            return Err(invalid(
                "min_velocity",
                format!(
                    "velocity range [{}, {}] must contain zero",
                    self.min_velocity, self.max_velocity
                ),
            ));
        }
        if !(0.0..=1.0).contains(&self.powerup_chance) {
            return Err(invalid("powerup_chance", "must be within [0, 1]"));
        }
        for (field, shrink) in [
            ("hitbox_shrink_x", self.hitbox_shrink_x),
            ("hitbox_shrink_y", self.hitbox_shrink_y),
        ] {
            if !(shrink > 0.0 && shrink <= 1.0) {
                return Err(invalid(field, "must be within (0, 1]"));
            }
        }

        let impulse = match self.control {
            ControlMode::Jump { jump_power } => ("jump_power", jump_power),
            ControlMode::Thrust { lift_force } => ("lift_force", lift_force),
        };
        for (field, value) in [
            impulse,
            ("boost_impulse", self.boost_impulse),
            ("rebound_impulse", self.rebound_impulse),
        ] {
            if !(value >= self.min_velocity && value <= self.max_velocity) {
                return Err(invalid(
                    field,
                    format!(
                        "{value} lies outside [{}, {}]",
                        self.min_velocity, self.max_velocity
                    ),
                ));
            }
        }

        if self.spawn_height_range().is_none() {
            log::warn!(
                "Profile '{}': gap {} leaves no room for obstacles, spawning disabled",
                self.name,
                self.pipe_gap
            );
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> TuningError {
    TuningError::Invalid {
        field,
        reason: reason.into(),
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), TuningError> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("must not be negative, got {value}")))
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), TuningError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("must be positive, got {value}")))
    }
}
