//! Collision detection between the bird, obstacles and power-ups
//!
//! The bird's hitbox is deliberately smaller than its sprite so near misses
//! feel fair. All checks are pure functions over plain geometry.

use glam::Vec2;

use super::state::{Bird, Obstacle};
use crate::tuning::Tuning;

/// Axis-aligned bounding box in screen space (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Aabb {
    /// Box centred on `center` with the given half extents
    pub fn from_center(center: Vec2, half_width: f32, half_height: f32) -> Self {
        Self {
            left: center.x - half_width,
            right: center.x + half_width,
            top: center.y - half_height,
            bottom: center.y + half_height,
        }
    }
}

/// The bird's forgiving hitbox: nominal size scaled by the shrink factors
pub fn bird_hitbox(bird: &Bird, tuning: &Tuning) -> Aabb {
    Aabb::from_center(
        bird.pos,
        bird.size * tuning.hitbox_shrink_x,
        bird.size * tuning.hitbox_shrink_y,
    )
}

/// True if the hitbox overlaps either segment of the obstacle
///
/// Horizontal spans must intersect, and the box must poke above the gap's
/// top or below its bottom.
pub fn hits_obstacle(hitbox: &Aabb, obstacle: &Obstacle, pipe_width: f32) -> bool {
    let overlaps_x = hitbox.right > obstacle.x && hitbox.left < obstacle.x + pipe_width;
    overlaps_x && (hitbox.top < obstacle.top_height || hitbox.bottom > obstacle.bottom_start)
}

/// True the first time the obstacle's right edge is fully behind `bird_x`
pub fn has_passed(obstacle: &Obstacle, pipe_width: f32, bird_x: f32) -> bool {
    !obstacle.passed && obstacle.x + pipe_width < bird_x
}

/// Pickup test: centre-to-centre distance strictly below the radius
#[inline]
pub fn within_pickup(bird_pos: Vec2, item_pos: Vec2, radius: f32) -> bool {
    bird_pos.distance(item_pos) < radius
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obstacle_at(x: f32) -> Obstacle {
        // Gap from 200 to 380
        Obstacle::new(1, x, 200.0, 180.0)
    }

    #[test]
    fn test_hitbox_uses_shrink_factors() {
        let tuning = Tuning::classic();
        let mut bird = Bird::spawn(&tuning);
        bird.pos = Vec2::new(100.0, 300.0);
        let hitbox = bird_hitbox(&bird, &tuning);
        assert!((hitbox.left - 75.5).abs() < 1e-4);
        assert!((hitbox.right - 124.5).abs() < 1e-4);
        assert!((hitbox.top - 279.0).abs() < 1e-4);
        assert!((hitbox.bottom - 321.0).abs() < 1e-4);
    }

    #[test]
    fn test_inside_gap_is_safe() {
        let hitbox = Aabb::from_center(Vec2::new(100.0, 290.0), 20.0, 20.0);
        assert!(!hits_obstacle(&hitbox, &obstacle_at(80.0), 80.0));
    }

    #[test]
    fn test_hits_top_segment() {
        let hitbox = Aabb::from_center(Vec2::new(100.0, 210.0), 20.0, 20.0);
        assert!(hits_obstacle(&hitbox, &obstacle_at(80.0), 80.0));
    }

    #[test]
    fn test_hits_bottom_segment() {
        let hitbox = Aabb::from_center(Vec2::new(100.0, 370.0), 20.0, 20.0);
        assert!(hits_obstacle(&hitbox, &obstacle_at(80.0), 80.0));
    }

    #[test]
    fn test_no_horizontal_overlap_is_safe() {
        // Bird far above the gap but well left of the obstacle
        let hitbox = Aabb::from_center(Vec2::new(100.0, 50.0), 20.0, 20.0);
        assert!(!hits_obstacle(&hitbox, &obstacle_at(121.0), 80.0));
        // Touching edges don't count as overlap
        assert!(!hits_obstacle(&hitbox, &obstacle_at(120.0), 80.0));
        assert!(!hits_obstacle(&hitbox, &obstacle_at(0.0), 80.0));
    }

    #[test]
    fn test_has_passed_only_once() {
        let mut obstacle = obstacle_at(10.0);
        assert!(!has_passed(&obstacle, 80.0, 90.0)); // right edge 90 not < 90
        assert!(has_passed(&obstacle, 80.0, 100.0));
        obstacle.passed = true;
        assert!(!has_passed(&obstacle, 80.0, 100.0));
    }

    #[test]
    fn test_within_pickup() {
        let bird = Vec2::new(100.0, 300.0);
        assert!(within_pickup(bird, Vec2::new(110.0, 300.0), 40.0));
        assert!(within_pickup(bird, Vec2::new(124.0, 330.0), 40.0)); // distance ~38.4
        assert!(!within_pickup(bird, Vec2::new(140.0, 300.0), 40.0));
    }
}
