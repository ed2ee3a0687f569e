//! Cosmetic particles
//!
//! Bursts are spawned on flaps, scores, pickups and crashes. Nothing in the
//! gameplay reads them back.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::state::{Particle, ParticleKind};

/// Downward drift added to particle velocity per frame
const PARTICLE_DRIFT: f32 = 0.1;
/// Life lost per frame
const LIFE_DECAY: f32 = 0.02;
/// Size multiplier per frame
const SIZE_DECAY: f32 = 0.98;
/// Particles smaller than this are retired
const MIN_VISIBLE_SIZE: f32 = 0.5;
/// Max initial speed per axis
const BURST_SPEED: f32 = 2.0;

/// Emit `count` particles at `origin`, respecting the pool cap
pub fn burst(
    particles: &mut Vec<Particle>,
    rng: &mut Pcg32,
    origin: Vec2,
    kind: ParticleKind,
    count: usize,
    max_particles: usize,
) {
    let room = max_particles.saturating_sub(particles.len());
    for _ in 0..count.min(room) {
        particles.push(Particle {
            pos: origin,
            vel: Vec2::new(
                rng.random_range(-BURST_SPEED..BURST_SPEED),
                rng.random_range(-BURST_SPEED..BURST_SPEED),
            ),
            kind,
            life: 1.0,
            size: rng.random_range(4.0..12.0),
        });
    }
}

/// Move, drift and fade every particle, dropping the dead ones
pub fn update_particles(particles: &mut Vec<Particle>) {
    for particle in particles.iter_mut() {
        particle.pos += particle.vel;
        particle.vel.y += PARTICLE_DRIFT;
        particle.life -= LIFE_DECAY;
        particle.size *= SIZE_DECAY;
    }
    particles.retain(|p| p.life > 0.0 && p.size >= MIN_VISIBLE_SIZE);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_burst_spawns_fresh_particles() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut particles = Vec::new();
        burst(&mut particles, &mut rng, Vec2::new(10.0, 20.0), ParticleKind::Score, 10, 256);

        assert_eq!(particles.len(), 10);
        for p in &particles {
            assert_eq!(p.pos, Vec2::new(10.0, 20.0));
            assert_eq!(p.life, 1.0);
            assert_eq!(p.kind, ParticleKind::Score);
            assert!(p.vel.x.abs() <= BURST_SPEED && p.vel.y.abs() <= BURST_SPEED);
            assert!((4.0..12.0).contains(&p.size));
        }
    }

    #[test]
    fn test_burst_respects_cap() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut particles = Vec::new();
        burst(&mut particles, &mut rng, Vec2::ZERO, ParticleKind::Crash, 20, 15);
        assert_eq!(particles.len(), 15);
        burst(&mut particles, &mut rng, Vec2::ZERO, ParticleKind::Crash, 20, 15);
        assert_eq!(particles.len(), 15);
        burst(&mut particles, &mut rng, Vec2::ZERO, ParticleKind::Crash, 20, 0);
        assert_eq!(particles.len(), 15);
    }

    #[test]
    fn test_update_moves_and_fades() {
        let mut particles = vec![Particle {
            pos: Vec2::ZERO,
            vel: Vec2::new(1.0, -1.0),
            kind: ParticleKind::Flap,
            life: 1.0,
            size: 10.0,
        }];
        update_particles(&mut particles);

        let p = &particles[0];
        assert_eq!(p.pos, Vec2::new(1.0, -1.0));
        assert!((p.vel.y - (-0.9)).abs() < 1e-6);
        assert!((p.life - 0.98).abs() < 1e-6);
        assert!((p.size - 9.8).abs() < 1e-5);
    }

    #[test]
    fn test_particles_retire_when_life_runs_out() {
        let mut rng = Pcg32::seed_from_u64(9);
        let mut particles = Vec::new();
        burst(&mut particles, &mut rng, Vec2::ZERO, ParticleKind::Pickup, 15, 256);

        // Life hits zero after 50 frames at 0.02 per frame
        for _ in 0..49 {
            update_particles(&mut particles);
        }
        assert!(!particles.is_empty());
        for _ in 0..2 {
            update_particles(&mut particles);
        }
        assert!(particles.is_empty());
    }

    #[test]
    fn test_tiny_particles_retire_early() {
        let mut particles = vec![Particle {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            kind: ParticleKind::Flap,
            life: 1.0,
            size: 0.505,
        }];
        update_particles(&mut particles);
        assert!(particles.is_empty());
    }
}
