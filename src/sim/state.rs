//! Game state and core simulation types
//!
//! Everything the per-frame step mutates lives in [`GameState`]; there is no
//! other writer.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    /// Title screen, nothing moves but the scenery
    Start,
    /// Active gameplay
    Playing,
    /// Run ended, waiting for restart
    GameOver,
}

/// The player-controlled flyer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bird {
    /// Centre position; x stays at the spawn column
    pub pos: Vec2,
    /// Vertical velocity (positive is down)
    pub vel: f32,
    /// Visual tilt derived from velocity
    pub rotation: f32,
    /// Wing animation phase
    pub wing_angle: f32,
    /// Radius-equivalent size used for bounds and hitbox
    pub size: f32,
}

impl Bird {
    /// Bird at the canonical spawn point, at rest
    pub fn spawn(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(tuning.bird_x, tuning.world_height / 2.0),
            vel: 0.0,
            rotation: 0.0,
            wing_angle: 0.0,
            size: tuning.bird_size,
        }
    }
}

/// A gated obstacle pair: top segment above `top_height`, bottom below `bottom_start`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    /// Left edge
    pub x: f32,
    pub top_height: f32,
    /// Always `top_height + pipe_gap`, fixed at creation
    pub bottom_start: f32,
    pub passed: bool,
}

impl Obstacle {
    pub fn new(id: u32, x: f32, top_height: f32, gap: f32) -> Self {
        Self {
            id,
            x,
            top_height,
            bottom_start: top_height + gap,
            passed: false,
        }
    }

    pub fn gap(&self) -> f32 {
        self.bottom_start - self.top_height
    }

    pub fn gap_center(&self) -> f32 {
        (self.top_height + self.bottom_start) / 2.0
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PowerUpKind {
    Shield,
    ScoreBonus,
    Boost,
    AutoFly,
}

impl PowerUpKind {
    pub fn label(&self) -> &'static str {
        match self {
            PowerUpKind::Shield => "Shield",
            PowerUpKind::ScoreBonus => "Score Bonus",
            PowerUpKind::Boost => "Boost",
            PowerUpKind::AutoFly => "Auto-Fly",
        }
    }
}

/// A collectible riding along with an obstacle's gap
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerUp {
    pub id: u32,
    pub kind: PowerUpKind,
    pub pos: Vec2,
    pub collected: bool,
}

/// Visual token for a particle (renderer picks colours from it)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParticleKind {
    Flap,
    Score,
    Pickup,
    Crash,
}

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub kind: ParticleKind,
    pub life: f32, // 0-1, decreases over time
    pub size: f32,
}

/// Background cloud, recycled to the right edge when it drifts off
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cloud {
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
}

/// Static twinkling star (twinkle is computed by the renderer from frame count)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Star {
    pub pos: Vec2,
    pub size: f32,
    pub twinkle: f32,
}

/// Frame-counted power-up timers
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveEffects {
    pub shield_active: bool,
    pub shield_ticks: u32,
    pub auto_fly_ticks: u32,
}

impl ActiveEffects {
    pub fn auto_fly_active(&self) -> bool {
        self.auto_fly_ticks > 0
    }
}

/// Something the outside world may want to react to (audio, UI, persistence)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    /// Jump edge consumed
    Flap,
    /// Thrust pressed (edge, not every held frame)
    Thrust,
    /// Obstacle cleared
    Scored { score: u32 },
    PowerUpCollected { kind: PowerUpKind },
    /// Shield spent on a ground rebound
    ShieldConsumed,
    /// Terminal collision; `new_best` means `best` should be persisted
    GameOver { score: u32, best: u32, new_best: bool },
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Active configuration profile
    pub tuning: Tuning,
    /// Seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub phase: GamePhase,
    pub score: u32,
    pub best_score: u32,
    /// Monotonic frame counter, never reset
    pub frame_count: u64,
    pub bird: Bird,
    /// Live obstacles (spawn order)
    pub obstacles: Vec<Obstacle>,
    /// Live power-ups (spawn order)
    pub powerups: Vec<PowerUp>,
    pub effects: ActiveEffects,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    pub clouds: Vec<Cloud>,
    pub stars: Vec<Star>,
    /// Thrust level seen last frame, for edge detection
    pub(crate) thrust_held: bool,
    pub(crate) spawn_range_warned: bool,
    next_id: u32,
}

impl GameState {
    /// Create a new game state on the start screen
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);

        let clouds = (0..tuning.cloud_count)
            .map(|_| Cloud {
                pos: Vec2::new(
                    rng.random::<f32>() * tuning.world_width * 2.0,
                    rng.random::<f32>() * 200.0,
                ),
                width: 60.0 + rng.random::<f32>() * 40.0,
                height: 30.0 + rng.random::<f32>() * 20.0,
                speed: 0.5 + rng.random::<f32>() * 0.5,
            })
            .collect();
        let stars = (0..tuning.star_count)
            .map(|_| Star {
                pos: Vec2::new(
                    rng.random::<f32>() * tuning.world_width,
                    rng.random::<f32>() * tuning.world_height,
                ),
                size: rng.random::<f32>() * 3.0,
                twinkle: rng.random::<f32>() * std::f32::consts::TAU,
            })
            .collect();

        Self {
            bird: Bird::spawn(&tuning),
            tuning,
            seed,
            rng,
            phase: GamePhase::Start,
            score: 0,
            best_score: 0,
            frame_count: 0,
            obstacles: Vec::new(),
            powerups: Vec::new(),
            effects: ActiveEffects::default(),
            particles: Vec::new(),
            clouds,
            stars,
            thrust_held: false,
            spawn_range_warned: false,
            next_id: 1,
        }
    }

    /// Seed the persisted best score (from the score store)
    pub fn with_best_score(mut self, best: u32) -> Self {
        self.best_score = best;
        self
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}
