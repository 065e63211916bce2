//! Egg Herder - a meadow canvas game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, world state)
//! - `renderer`: Abstract draw surface and the browser canvas backend
//! - `platform`: Frame clock and host-event driver
//! - `settings`: Data-driven world parameters

pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{ConfigError, Settings};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Default canvas size
    pub const CANVAS_WIDTH: f32 = 1280.0;
    pub const CANVAS_HEIGHT: f32 = 720.0;
    /// Band at the top of the screen where hatchlings are safe
    pub const TOP_MARGIN: f32 = 260.0;
    /// Frame rate cap for the fixed-interval throttle
    pub const FPS: f32 = 70.0;

    /// Player (bull)
    pub const PLAYER_RADIUS: f32 = 30.0;
    pub const PLAYER_SPEED: f32 = 5.0;
    pub const PLAYER_SPRITE_SIZE: f32 = 256.0;
    pub const PLAYER_SPRITE_LIFT: f32 = 100.0;

    /// Obstacles (mushrooms and rocks on a 4x3 sheet)
    pub const OBSTACLE_RADIUS: f32 = 40.0;
    pub const OBSTACLE_SPRITE_SIZE: f32 = 250.0;
    pub const OBSTACLE_SPRITE_LIFT: f32 = 70.0;
    pub const OBSTACLE_SHEET_COLUMNS: u32 = 4;
    pub const OBSTACLE_SHEET_ROWS: u32 = 3;
    /// Extra spacing kept between placed obstacles
    pub const OBSTACLE_BUFFER: f32 = 100.0;
    /// Rejection sampling budget for obstacle placement
    pub const OBSTACLE_MAX_ATTEMPTS: u32 = 500;

    /// Eggs
    pub const EGG_RADIUS: f32 = 40.0;
    pub const EGG_SPRITE_WIDTH: f32 = 110.0;
    pub const EGG_SPRITE_HEIGHT: f32 = 135.0;
    pub const EGG_SPRITE_LIFT: f32 = 30.0;
    /// Time an egg takes to hatch (ms)
    pub const EGG_HATCH_INTERVAL: f32 = 10_000.0;

    /// Larvae (hatchlings)
    pub const LARVA_RADIUS: f32 = 30.0;
    pub const LARVA_SPRITE_SIZE: f32 = 150.0;
    pub const LARVA_SPRITE_LIFT: f32 = 50.0;
    pub const FIREFLIES_PER_RESCUE: usize = 3;
    pub const SPARKS_PER_LOSS: usize = 5;

    /// Enemies (toads)
    pub const ENEMY_RADIUS: f32 = 30.0;
    pub const ENEMY_SPRITE_WIDTH: f32 = 140.0;
    pub const ENEMY_SPRITE_HEIGHT: f32 = 260.0;
    pub const ENEMY_SPRITE_DROP: f32 = 40.0;

    /// Sparks vanish once they shrink below this radius
    pub const SPARK_MIN_RADIUS: f32 = 0.2;
    pub const SPARK_SHRINK: f32 = 0.05;
}

/// Velocity that moves `speed` units toward the end of `delta`.
///
/// Zero once the target is within one step, so the mover settles instead of
/// oscillating around it. A zero-length `delta` also yields zero.
#[inline]
pub fn seek_velocity(delta: Vec2, speed: f32) -> Vec2 {
    let distance = delta.length();
    if distance > speed {
        delta.normalize_or_zero() * speed
    } else {
        Vec2::ZERO
    }
}

/// Sprite-sheet row for a heading angle (radians, as returned by `atan2`).
///
/// The bull sheet has eight rows, one per 45° sector, starting with "up".
pub fn facing_row(angle: f32) -> u32 {
    if !(-2.74..=2.74).contains(&angle) {
        6
    } else if angle < -1.96 {
        7
    } else if angle < -1.17 {
        0
    } else if angle < -0.39 {
        1
    } else if angle < 0.39 {
        2
    } else if angle < 1.17 {
        3
    } else if angle < 1.96 {
        4
    } else {
        5
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::f32::consts::PI;

    #[test]
    fn test_seek_velocity_zero_length() {
        let v = seek_velocity(Vec2::ZERO, 5.0);
        assert_eq!(v, Vec2::ZERO);
        assert!(!v.x.is_nan() && !v.y.is_nan());
    }

    #[test]
    fn test_facing_rows() {
        assert_eq!(facing_row(0.0), 2); // right
        assert_eq!(facing_row(PI / 2.0), 4); // down (screen y grows downward)
        assert_eq!(facing_row(-PI / 2.0), 0); // up
        assert_eq!(facing_row(PI), 6); // left
        assert_eq!(facing_row(-PI), 6);
        assert_eq!(facing_row(-2.0), 7);
        assert_eq!(facing_row(2.0), 5);
        assert_eq!(facing_row(0.5), 3);
        assert_eq!(facing_row(-0.5), 1);
    }

    proptest! {
        #[test]
        fn prop_seek_velocity_settles_within_one_step(
            x in -5.0f32..5.0,
            y in -5.0f32..5.0,
        ) {
            let delta = Vec2::new(x, y);
            prop_assume!(delta.length() <= 5.0);
            prop_assert_eq!(seek_velocity(delta, 5.0), Vec2::ZERO);
        }

        #[test]
        fn prop_seek_velocity_has_constant_magnitude(
            x in -2000.0f32..2000.0,
            y in -2000.0f32..2000.0,
            speed in 0.5f32..20.0,
        ) {
            let delta = Vec2::new(x, y);
            prop_assume!(delta.length() > speed);
            let v = seek_velocity(delta, speed);
            prop_assert!((v.length() - speed).abs() < 1e-3 * speed.max(1.0));
            // Points toward the target
            prop_assert!(v.dot(delta) > 0.0);
        }

        #[test]
        fn prop_facing_row_in_range(angle in -PI..=PI) {
            prop_assert!(facing_row(angle) < 8);
        }
    }
}
