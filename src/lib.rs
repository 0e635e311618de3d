//! Arkanoid - a brick-breaking arcade game
//!
//! Core modules:
//! - `sim`: Ball motion and collision engine, paddle, bricks, rounds, game flow
//! - `assets`: Sprite geometry read from PNG headers
//! - `context`: Process-wide context (screen bounds, sprite geometry)
//! - `platform`: Clock and keyboard input mapping
//! - `renderer`: Terminal presentation
//! - `settings`: Data-driven game tuning

pub mod assets;
pub mod context;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use context::GameContext;
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Frames per second the game loop targets
    pub const GAME_SPEED: u32 = 60;

    /// Window dimensions in pixels
    pub const DISPLAY_WIDTH: f32 = 600.0;
    pub const DISPLAY_HEIGHT: f32 = 650.0;

    /// Angle the ball initially moves off the paddle (radians)
    pub const BALL_START_ANGLE_RAD: f32 = 5.0;
    /// Speed the ball always tries to return to (pixels per frame)
    pub const BALL_BASE_SPEED: f32 = 8.0;
    /// Prevents runaway speed after many rapid collisions
    pub const BALL_MAX_SPEED: f32 = 15.0;
    /// Per-frame rate at which the ball is brought back to base speed
    pub const BALL_SPEED_NORMALISATION_RATE: f32 = 0.02;

    /// Speed gained from a brick collision
    pub const BRICK_SPEED_ADJUST: f32 = 0.5;
    /// Speed gained from a wall collision
    pub const WALL_SPEED_ADJUST: f32 = 0.2;

    /// Paddle defaults
    pub const PADDLE_SPEED: f32 = 10.0;
    pub const PADDLE_BOTTOM_OFFSET: f32 = 60.0;
    /// Deflection off the paddle at its extreme edges (50 degrees)
    pub const PADDLE_MAX_DEFLECTION: f32 = 50.0 * std::f32::consts::PI / 180.0;

    pub const START_LIVES: u32 = 3;

    /// Straight up in screen coordinates (y grows downward)
    pub const STRAIGHT_UP: f32 = -std::f32::consts::FRAC_PI_2;
}

/// Normalized angle to [-π, π)
///
/// Non-finite input has no direction and maps to 0.
#[inline]
pub fn normalize_angle(angle: f32) -> f32 {
    use std::f32::consts::{PI, TAU};
    if !angle.is_finite() {
        return 0.0;
    }
    // Large magnitudes absorb a 2π step, so reduce them first
    let mut angle = if angle.abs() > 4.0 * TAU {
        angle.rem_euclid(TAU)
    } else {
        angle
    };
    while angle >= PI {
        angle -= TAU;
    }
    while angle < -PI {
        angle += TAU;
    }
    angle
}

/// Unit direction vector for an angle
#[inline]
pub fn direction(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Angle of a direction vector
#[inline]
pub fn angle_of(v: Vec2) -> f32 {
    v.y.atan2(v.x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_normalize_angle_wraps() {
        assert!((normalize_angle(3.0 * PI / 2.0) - (-PI / 2.0)).abs() < 1e-5);
        assert!((normalize_angle(-3.0 * PI) - (-PI)).abs() < 1e-5);
        assert!((normalize_angle(0.5) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_normalize_angle_huge_and_non_finite() {
        for angle in [1e30, -1e30, f32::MAX, f32::MIN] {
            let a = normalize_angle(angle);
            assert!((-PI..PI).contains(&a), "{} -> {}", angle, a);
        }
        assert_eq!(normalize_angle(f32::NAN), 0.0);
        assert_eq!(normalize_angle(f32::INFINITY), 0.0);
    }

    #[test]
    fn test_direction_round_trip() {
        let a = normalize_angle(consts::BALL_START_ANGLE_RAD);
        assert!((angle_of(direction(a)) - a).abs() < 1e-5);
    }
}
