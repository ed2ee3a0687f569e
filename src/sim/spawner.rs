//! Obstacle and power-up spawning, scrolling and recycling
//!
//! Obstacles appear at the right edge on a fixed frame cadence and scroll
//! left at `pipe_speed`; anything that leaves the screen is dropped.

use glam::Vec2;
use rand::Rng;

use super::state::{GameState, Obstacle, PowerUp};

/// Visual radius of a power-up, used to decide when it has left the screen
pub const POWERUP_VISUAL_RADIUS: f32 = 15.0;

/// True on frames where a new obstacle is due
pub fn spawn_due(state: &GameState) -> bool {
    state.frame_count % state.tuning.spawn_interval == 0
}

/// Spawn one obstacle at the right edge, maybe carrying a power-up
///
/// Returns the new obstacle's id, or `None` when the profile's gap leaves no
/// valid height range.
pub fn spawn_obstacle(state: &mut GameState) -> Option<u32> {
    let Some((min_height, max_height)) = state.tuning.spawn_height_range() else {
        if !state.spawn_range_warned {
            log::warn!(
                "Obstacle height range inverted (gap {}), skipping spawns",
                state.tuning.pipe_gap
            );
            state.spawn_range_warned = true;
        }
        return None;
    };

    // Whole pixels keep `top + gap - top == gap` exact in f32
    let top_height = if max_height > min_height {
        state
            .rng
            .random_range(min_height..max_height)
            .round()
            .clamp(min_height, max_height)
    } else {
        min_height
    };

    let id = state.next_entity_id();
    let obstacle = Obstacle::new(id, state.tuning.world_width, top_height, state.tuning.pipe_gap);
    log::debug!(
        "Spawned obstacle {} (gap {:.0}..{:.0}) at frame {}",
        id,
        obstacle.top_height,
        obstacle.bottom_start,
        state.frame_count
    );
    maybe_attach_powerup(state, &obstacle);
    state.obstacles.push(obstacle);
    Some(id)
}

/// Roll for a power-up in the middle of the obstacle's gap
fn maybe_attach_powerup(state: &mut GameState, obstacle: &Obstacle) {
    let kinds = &state.tuning.powerup_kinds;
    if kinds.is_empty() || !state.rng.random_bool(state.tuning.powerup_chance) {
        return;
    }
    let index = state.rng.random_range(0..kinds.len());
    let Some(&kind) = kinds.get(index) else {
        return;
    };

    let id = state.next_entity_id();
    state.powerups.push(PowerUp {
        id,
        kind,
        pos: Vec2::new(
            obstacle.x + state.tuning.pipe_width / 2.0,
            obstacle.gap_center(),
        ),
        collected: false,
    });
    log::debug!("Attached {:?} power-up {} to obstacle {}", kind, id, obstacle.id);
}

/// Move obstacles and power-ups left, retiring anything fully off-screen
pub fn scroll(state: &mut GameState) {
    let speed = state.tuning.pipe_speed;
    let width = state.tuning.pipe_width;

    for obstacle in &mut state.obstacles {
        obstacle.x -= speed;
    }
    state.obstacles.retain(|o| o.x + width >= 0.0);

    for powerup in &mut state.powerups {
        powerup.pos.x -= speed;
    }
    state
        .powerups
        .retain(|p| p.pos.x + POWERUP_VISUAL_RADIUS >= 0.0);
}

/// Drift clouds and wrap them back to the right edge at a new height
pub fn update_clouds(state: &mut GameState) {
    let world_width = state.tuning.world_width;
    for cloud in &mut state.clouds {
        cloud.pos.x -= cloud.speed;
        if cloud.pos.x < -cloud.width {
            cloud.pos.x = world_width + cloud.width;
            cloud.pos.y = state.rng.random::<f32>() * 200.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Cloud, PowerUpKind};
    use crate::tuning::Tuning;

    #[test]
    fn test_spawn_cadence() {
        let mut state = GameState::new(1, Tuning::thrust());
        assert!(spawn_due(&state));
        state.frame_count = 149;
        assert!(!spawn_due(&state));
        state.frame_count = 300;
        assert!(spawn_due(&state));
    }

    #[test]
    fn test_spawned_obstacle_respects_range_and_gap() {
        let mut state = GameState::new(42, Tuning::classic());
        for _ in 0..200 {
            spawn_obstacle(&mut state).unwrap();
        }
        for obstacle in &state.obstacles {
            assert_eq!(obstacle.x, 480.0);
            assert!(obstacle.top_height >= 100.0 && obstacle.top_height <= 280.0);
            assert_eq!(obstacle.gap(), 180.0);
        }
        // Classic has no power-ups
        assert!(state.powerups.is_empty());
    }

    #[test]
    fn test_spawn_heights_are_whole_pixels() {
        for tuning in [Tuning::classic(), Tuning::thrust(), Tuning::deluxe()] {
            let gap = tuning.pipe_gap;
            let mut state = GameState::new(7742068373034071917, tuning);
            for _ in 0..500 {
                spawn_obstacle(&mut state).unwrap();
            }
            for obstacle in &state.obstacles {
                assert_eq!(obstacle.top_height, obstacle.top_height.round());
                assert_eq!(obstacle.bottom_start - obstacle.top_height, gap);
            }
        }
    }

    #[test]
    fn test_inverted_range_skips_spawn() {
        let tuning = Tuning {
            pipe_gap: 600.0,
            ..Tuning::classic()
        };
        let mut state = GameState::new(1, tuning);
        assert_eq!(spawn_obstacle(&mut state), None);
        assert_eq!(spawn_obstacle(&mut state), None);
        assert!(state.obstacles.is_empty());
        assert!(state.spawn_range_warned);
    }

    #[test]
    fn test_degenerate_range_uses_min_height() {
        // max == min: 640 - 360 - 180 = 100
        let tuning = Tuning {
            pipe_gap: 360.0,
            ..Tuning::classic()
        };
        let mut state = GameState::new(1, tuning);
        spawn_obstacle(&mut state).unwrap();
        assert_eq!(state.obstacles[0].top_height, 100.0);
    }

    #[test]
    fn test_powerup_sits_in_gap_center() {
        let tuning = Tuning {
            powerup_chance: 1.0,
            powerup_kinds: vec![PowerUpKind::Boost],
            ..Tuning::thrust()
        };
        let mut state = GameState::new(5, tuning);
        spawn_obstacle(&mut state).unwrap();

        assert_eq!(state.powerups.len(), 1);
        let obstacle = &state.obstacles[0];
        let powerup = &state.powerups[0];
        assert_eq!(powerup.kind, PowerUpKind::Boost);
        assert_eq!(powerup.pos, Vec2::new(520.0, obstacle.gap_center()));
        assert!(!powerup.collected);
    }

    #[test]
    fn test_powerup_kinds_drawn_from_enabled_set() {
        let tuning = Tuning {
            powerup_chance: 1.0,
            ..Tuning::thrust()
        };
        let mut state = GameState::new(11, tuning);
        for _ in 0..100 {
            spawn_obstacle(&mut state).unwrap();
        }
        assert_eq!(state.powerups.len(), 100);
        assert!(state.powerups.iter().all(|p| p.kind != PowerUpKind::AutoFly));
        assert!(state.powerups.iter().any(|p| p.kind == PowerUpKind::Shield));
    }

    #[test]
    fn test_obstacle_retired_once_fully_off_screen() {
        let mut state = GameState::new(1, Tuning::classic());
        spawn_obstacle(&mut state).unwrap();

        // x = 480 - 3n; gone once x + 80 < 0, i.e. n = 187
        for _ in 0..186 {
            scroll(&mut state);
        }
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.obstacles[0].x, -78.0);

        scroll(&mut state);
        assert!(state.obstacles.is_empty());
    }

    #[test]
    fn test_powerups_scroll_and_retire() {
        let mut state = GameState::new(1, Tuning::thrust());
        let id = state.next_entity_id();
        state.powerups.push(PowerUp {
            id,
            kind: PowerUpKind::Shield,
            pos: Vec2::new(-10.0, 300.0),
            collected: false,
        });
        scroll(&mut state);
        assert_eq!(state.powerups[0].pos.x, -13.0);
        scroll(&mut state);
        assert!(state.powerups.is_empty());
    }

    #[test]
    fn test_clouds_wrap_around() {
        let mut state = GameState::new(1, Tuning::classic());
        state.clouds = vec![Cloud {
            pos: Vec2::new(-79.5, 50.0),
            width: 80.0,
            height: 40.0,
            speed: 1.0,
        }];
        update_clouds(&mut state);
        assert_eq!(state.clouds[0].pos.x, 560.0);
        assert!(state.clouds[0].pos.y >= 0.0 && state.clouds[0].pos.y < 200.0);
    }
}
