//! Per-frame simulation step
//!
//! Core game loop that advances the simulation by exactly one display frame:
//! kinematics, spawning, collision and scoring, then particles.

use glam::Vec2;

use super::collision;
use super::effects;
use super::kinematics::{self, GroundContact};
use super::spawner;
use super::state::{GameEvent, GamePhase, GameState, ParticleKind, PowerUpKind};
use crate::tuning::ControlMode;

/// Frames between thrust particle puffs while thrust is held
const THRUST_PARTICLE_INTERVAL: u64 = 4;

/// Input sampled at the frame boundary
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Jump edge (jump profiles)
    pub jump: bool,
    /// Thrust level (thrust profiles)
    pub thrust: bool,
}

/// Advance the game state by one frame
///
/// Returns the events raised this frame, in order.
pub fn tick(state: &mut GameState, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();

    spawner::update_clouds(state);

    match state.phase {
        GamePhase::Start => {}
        GamePhase::Playing => step_playing(state, input, &mut events),
        // Keep the world drifting behind the game-over panel
        GamePhase::GameOver => spawner::scroll(state),
    }

    effects::update_particles(&mut state.particles);
    state.frame_count += 1;
    events
}

fn step_playing(state: &mut GameState, input: &TickInput, events: &mut Vec<GameEvent>) {
    handle_input(state, input, events);

    match kinematics::integrate(&mut state.bird, &mut state.effects, input, &state.tuning) {
        GroundContact::Clear => {}
        GroundContact::Breach => {
            if let Some(event) = state.game_over() {
                events.push(event);
            }
        }
        GroundContact::Rebound => {
            log::debug!("Shield consumed by ground rebound");
            events.push(GameEvent::ShieldConsumed);
        }
    }

    if state.phase == GamePhase::Playing && spawner::spawn_due(state) {
        spawner::spawn_obstacle(state);
    }
    spawner::scroll(state);

    if state.phase == GamePhase::Playing {
        resolve_obstacles(state, events);
    }
    if state.phase == GamePhase::Playing {
        resolve_pickups(state, events);
    }
}

/// Turn the sampled input into flap/thrust events and particles
fn handle_input(state: &mut GameState, input: &TickInput, events: &mut Vec<GameEvent>) {
    let bursts = state.tuning.bursts;
    let max_particles = state.tuning.max_particles;
    let bird = &state.bird;

    match state.tuning.control {
        ControlMode::Jump { .. } => {
            if input.jump {
                events.push(GameEvent::Flap);
                // Puff from behind and below the bird
                let origin = bird.pos + Vec2::new(-bird.size, bird.size);
                effects::burst(
                    &mut state.particles,
                    &mut state.rng,
                    origin,
                    ParticleKind::Flap,
                    bursts.jump,
                    max_particles,
                );
            }
        }
        ControlMode::Thrust { .. } => {
            if input.thrust && !state.thrust_held {
                events.push(GameEvent::Thrust);
            }
            if input.thrust && state.frame_count % THRUST_PARTICLE_INTERVAL == 0 {
                let origin = bird.pos + Vec2::new(-bird.size, bird.size * 0.5);
                effects::burst(
                    &mut state.particles,
                    &mut state.rng,
                    origin,
                    ParticleKind::Flap,
                    bursts.thrust,
                    max_particles,
                );
            }
            state.thrust_held = input.thrust;
        }
    }
}

/// Passing and collision checks against every live obstacle
pub(crate) fn resolve_obstacles(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let hitbox = collision::bird_hitbox(&state.bird, &state.tuning);
    let pipe_width = state.tuning.pipe_width;
    let bird_x = state.bird.pos.x;

    let mut cleared = 0u32;
    let mut crashed = false;
    for obstacle in &mut state.obstacles {
        if collision::has_passed(obstacle, pipe_width, bird_x) {
            obstacle.passed = true;
            cleared += 1;
        }
        if collision::hits_obstacle(&hitbox, obstacle, pipe_width) {
            crashed = true;
        }
    }

    for _ in 0..cleared {
        state.score += 1;
        events.push(GameEvent::Scored { score: state.score });
        effects::burst(
            &mut state.particles,
            &mut state.rng,
            state.bird.pos,
            ParticleKind::Score,
            state.tuning.bursts.score,
            state.tuning.max_particles,
        );
    }

    if crashed && !state.effects.shield_active {
        if let Some(event) = state.game_over() {
            events.push(event);
        }
    }
}

/// Collect every power-up within reach and apply its effect
pub(crate) fn resolve_pickups(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let bird_pos = state.bird.pos;
    let radius = state.tuning.pickup_radius;

    let mut collected = Vec::new();
    for powerup in &mut state.powerups {
        if !powerup.collected && collision::within_pickup(bird_pos, powerup.pos, radius) {
            powerup.collected = true;
            collected.push(powerup.kind);
        }
    }
    if collected.is_empty() {
        return;
    }
    state.powerups.retain(|p| !p.collected);

    for kind in collected {
        apply_power_up(state, kind);
        events.push(GameEvent::PowerUpCollected { kind });
        effects::burst(
            &mut state.particles,
            &mut state.rng,
            bird_pos,
            ParticleKind::Pickup,
            state.tuning.bursts.pickup,
            state.tuning.max_particles,
        );
    }
}

/// Power-up effect table
pub fn apply_power_up(state: &mut GameState, kind: PowerUpKind) {
    match kind {
        PowerUpKind::Shield => {
            state.effects.shield_active = true;
            state.effects.shield_ticks = state.tuning.shield_frames;
        }
        PowerUpKind::ScoreBonus => {
            state.score += state.tuning.score_bonus;
        }
        PowerUpKind::Boost => {
            state.bird.vel = state.tuning.boost_impulse;
        }
        PowerUpKind::AutoFly => {
            state.effects.auto_fly_ticks = state.tuning.auto_fly_frames();
        }
    }
    log::debug!("Applied {:?} power-up (score {})", kind, state.score);
}
