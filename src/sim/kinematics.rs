//! Bird kinematics
//!
//! One semi-implicit Euler step per frame: input and gravity change the
//! velocity, the clamped velocity moves the bird, then world bounds apply.

use super::state::{ActiveEffects, Bird};
use super::tick::TickInput;
use crate::tuning::{ControlMode, Tuning};

/// Wing animation advance per playing frame
const WING_FLAP_STEP: f32 = 0.3;

/// What happened at the lower world bound this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroundContact {
    /// Bird is above the ground
    Clear,
    /// Bird went through the ground without a shield (terminal)
    Breach,
    /// Shield absorbed the hit and bounced the bird back up
    Rebound,
}

/// Advance the bird one frame and run the power-up timers
pub fn integrate(
    bird: &mut Bird,
    effects: &mut ActiveEffects,
    input: &TickInput,
    tuning: &Tuning,
) -> GroundContact {
    match tuning.control {
        ControlMode::Jump { jump_power } => {
            if input.jump {
                bird.vel = jump_power;
            }
            bird.vel += tuning.gravity;
        }
        ControlMode::Thrust { lift_force } => {
            bird.vel += if input.thrust {
                lift_force
            } else {
                tuning.gravity
            };
        }
    }

    // Auto-fly pulls toward mid-screen on top of normal control
    if effects.auto_fly_active() {
        let center_y = tuning.world_height / 2.0;
        bird.vel += (center_y - bird.pos.y) * tuning.auto_fly_gain;
    }

    bird.vel = bird.vel.clamp(tuning.min_velocity, tuning.max_velocity);
    bird.pos.y += bird.vel;

    bird.rotation = (bird.vel * tuning.rotation_factor).clamp(-tuning.max_rotation, tuning.max_rotation);
    bird.wing_angle += WING_FLAP_STEP;

    // Ceiling: clamp and kill velocity so it can't be used as a wall
    if bird.pos.y < bird.size {
        bird.pos.y = bird.size;
        bird.vel = 0.0;
    }

    let ground_limit = tuning.ground_limit();
    let contact = if bird.pos.y > ground_limit {
        if effects.shield_active {
            bird.pos.y = ground_limit;
            bird.vel = tuning.rebound_impulse;
            effects.shield_active = false;
            effects.shield_ticks = 0;
            GroundContact::Rebound
        } else {
            GroundContact::Breach
        }
    } else {
        GroundContact::Clear
    };

    tick_timers(effects);
    contact
}

/// Count down frame timers; a shield that reaches zero is dropped
pub fn tick_timers(effects: &mut ActiveEffects) {
    if effects.shield_active {
        effects.shield_ticks = effects.shield_ticks.saturating_sub(1);
        if effects.shield_ticks == 0 {
            effects.shield_active = false;
        }
    }
    effects.auto_fly_ticks = effects.auto_fly_ticks.saturating_sub(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn playing_bird(tuning: &Tuning) -> Bird {
        Bird::spawn(tuning)
    }

    #[test]
    fn test_gravity_accumulates() {
        let tuning = Tuning::classic();
        let mut bird = playing_bird(&tuning);
        let mut effects = ActiveEffects::default();
        let start_y = bird.pos.y;

        integrate(&mut bird, &mut effects, &TickInput::default(), &tuning);
        assert_eq!(bird.vel, 0.5);
        assert_eq!(bird.pos.y, start_y + 0.5);

        integrate(&mut bird, &mut effects, &TickInput::default(), &tuning);
        assert_eq!(bird.vel, 1.0);
        assert_eq!(bird.pos.y, start_y + 1.5);
    }

    #[test]
    fn test_jump_sets_impulse_then_gravity() {
        let tuning = Tuning::classic();
        let mut bird = playing_bird(&tuning);
        bird.vel = 6.0;
        let mut effects = ActiveEffects::default();
        let input = TickInput {
            jump: true,
            ..Default::default()
        };

        integrate(&mut bird, &mut effects, &input, &tuning);
        assert_eq!(bird.vel, -7.5);
        assert!(bird.rotation < 0.0);
    }

    #[test]
    fn test_thrust_accumulates_and_clamps() {
        let tuning = Tuning::thrust();
        let mut bird = playing_bird(&tuning);
        let mut effects = ActiveEffects::default();
        let input = TickInput {
            thrust: true,
            ..Default::default()
        };

        for _ in 0..100 {
            integrate(&mut bird, &mut effects, &input, &tuning);
            assert!(bird.vel >= tuning.min_velocity);
        }
        // Long hold pins the bird to the ceiling with zero velocity
        assert_eq!(bird.pos.y, bird.size);
        assert_eq!(bird.vel, 0.0);
    }

    #[test]
    fn test_fall_is_capped_at_max_velocity() {
        let tuning = Tuning::thrust();
        let mut bird = playing_bird(&tuning);
        bird.pos.y = 40.0;
        let mut effects = ActiveEffects::default();
        for _ in 0..40 {
            integrate(&mut bird, &mut effects, &TickInput::default(), &tuning);
            assert!(bird.vel <= tuning.max_velocity);
        }
    }

    #[test]
    fn test_classic_full_height_fall_is_never_clamped() {
        let tuning = Tuning::classic();
        let mut bird = playing_bird(&tuning);
        bird.pos.y = tuning.bird_size;
        let mut effects = ActiveEffects::default();

        let mut expected_vel = 0.0;
        loop {
            let contact = integrate(&mut bird, &mut effects, &TickInput::default(), &tuning);
            expected_vel += tuning.gravity;
            assert_eq!(bird.vel, expected_vel);
            assert!(bird.vel < tuning.max_velocity);
            if contact == GroundContact::Breach {
                break;
            }
        }
    }

    #[test]
    fn test_ceiling_clamps_and_zeroes_velocity() {
        let tuning = Tuning::classic();
        let mut bird = playing_bird(&tuning);
        bird.pos.y = tuning.bird_size + 1.0;
        let mut effects = ActiveEffects::default();
        let input = TickInput {
            jump: true,
            ..Default::default()
        };

        let contact = integrate(&mut bird, &mut effects, &input, &tuning);
        assert_eq!(contact, GroundContact::Clear);
        assert_eq!(bird.pos.y, tuning.bird_size);
        assert_eq!(bird.vel, 0.0);
    }

    #[test]
    fn test_ground_breach_without_shield() {
        let tuning = Tuning::classic();
        let mut bird = playing_bird(&tuning);
        bird.pos.y = tuning.ground_limit() - 1.0;
        bird.vel = 5.0;
        let mut effects = ActiveEffects::default();

        let contact = integrate(&mut bird, &mut effects, &TickInput::default(), &tuning);
        assert_eq!(contact, GroundContact::Breach);
    }

    #[test]
    fn test_shield_rebounds_off_ground() {
        let tuning = Tuning::thrust();
        let mut bird = playing_bird(&tuning);
        bird.pos.y = tuning.ground_limit() - 1.0;
        bird.vel = 5.0;
        let mut effects = ActiveEffects {
            shield_active: true,
            shield_ticks: 1,
            auto_fly_ticks: 0,
        };

        let contact = integrate(&mut bird, &mut effects, &TickInput::default(), &tuning);
        assert_eq!(contact, GroundContact::Rebound);
        assert_eq!(bird.vel, tuning.rebound_impulse);
        assert_eq!(bird.pos.y, tuning.ground_limit());
        assert!(!effects.shield_active);
        assert_eq!(effects.shield_ticks, 0);
    }

    #[test]
    fn test_shield_expires_by_countdown() {
        let mut effects = ActiveEffects {
            shield_active: true,
            shield_ticks: 2,
            auto_fly_ticks: 0,
        };
        tick_timers(&mut effects);
        assert!(effects.shield_active);
        tick_timers(&mut effects);
        assert!(!effects.shield_active);
        assert_eq!(effects.shield_ticks, 0);
    }

    #[test]
    fn test_auto_fly_nudges_toward_center() {
        let tuning = Tuning::deluxe();
        let mut bird = playing_bird(&tuning);
        bird.pos.y = 100.0;
        let mut effects = ActiveEffects {
            auto_fly_ticks: 10,
            ..Default::default()
        };

        integrate(&mut bird, &mut effects, &TickInput::default(), &tuning);
        // Gravity 0.4 plus (320 - 100) * 0.01 = 2.2
        assert!((bird.vel - 2.6).abs() < 1e-4);
        assert_eq!(effects.auto_fly_ticks, 9);
    }

    #[test]
    fn test_rotation_is_clamped() {
        let tuning = Tuning::classic();
        let mut bird = playing_bird(&tuning);
        bird.vel = 11.0;
        let mut effects = ActiveEffects::default();
        integrate(&mut bird, &mut effects, &TickInput::default(), &tuning);
        assert_eq!(bird.rotation, tuning.max_rotation);
    }
}
