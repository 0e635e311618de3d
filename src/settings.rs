//! Game tuning
//!
//! Loaded once at start-up from an optional JSON file. Missing fields keep
//! their defaults, so a settings file only needs the values it changes.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::ball::BallConfig;

/// Error type for settings loading.
#[derive(Debug)]
pub enum SettingsError {
    IoError(std::io::Error),
    ParseError(serde_json::Error),
}

impl std::fmt::Display for SettingsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SettingsError::IoError(e) => write!(f, "IO error: {}", e),
            SettingsError::ParseError(e) => write!(f, "JSON parse error: {}", e),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::IoError(e) => Some(e),
            SettingsError::ParseError(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for SettingsError {
    fn from(err: std::io::Error) -> Self {
        SettingsError::IoError(err)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(err: serde_json::Error) -> Self {
        SettingsError::ParseError(err)
    }
}

/// Game settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Loop ===
    /// Target frames per second
    pub game_speed: u32,
    pub display_width: f32,
    pub display_height: f32,

    // === Ball ===
    /// Angle the ball leaves the paddle at when released (radians)
    pub ball_start_angle: f32,
    /// Pixels per frame the ball always returns to
    pub ball_base_speed: f32,
    pub ball_max_speed: f32,
    /// Per-frame step back toward base speed
    pub ball_normalisation_rate: f32,

    // === Collisions ===
    pub brick_speed_adjust: f32,
    pub wall_speed_adjust: f32,

    // === Paddle ===
    pub paddle_speed: f32,
    /// Gap between the paddle's bottom and the screen bottom
    pub paddle_bottom_offset: f32,
    /// Deflection at the paddle's extreme edges (radians)
    pub paddle_max_deflection: f32,

    // === Game ===
    pub lives: u32,
    /// Probability (0-1) that a regular brick carries a power-up
    pub powerup_chance: f32,
    /// Seed for power-up placement; random when unset
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            game_speed: GAME_SPEED,
            display_width: DISPLAY_WIDTH,
            display_height: DISPLAY_HEIGHT,

            ball_start_angle: BALL_START_ANGLE_RAD,
            ball_base_speed: BALL_BASE_SPEED,
            ball_max_speed: BALL_MAX_SPEED,
            ball_normalisation_rate: BALL_SPEED_NORMALISATION_RATE,

            brick_speed_adjust: BRICK_SPEED_ADJUST,
            wall_speed_adjust: WALL_SPEED_ADJUST,

            paddle_speed: PADDLE_SPEED,
            paddle_bottom_offset: PADDLE_BOTTOM_OFFSET,
            paddle_max_deflection: PADDLE_MAX_DEFLECTION,

            lives: START_LIVES,
            powerup_chance: 0.1,
            seed: None,
        }
    }
}

impl Settings {
    /// Load settings from a JSON file, falling back to defaults if it doesn't exist
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        match std::fs::read_to_string(path) {
            Ok(json) => {
                let settings = Self::from_json(&json)?;
                log::info!("Loaded settings from {}", path.display());
                Ok(settings)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No settings at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        Ok(settings.sanitized())
    }

    /// Clamp values into ranges the simulation can work with
    pub fn sanitized(mut self) -> Self {
        self.game_speed = self.game_speed.max(1);
        self.ball_max_speed = self.ball_max_speed.max(0.0);
        self.ball_base_speed = self.ball_base_speed.clamp(0.0, self.ball_max_speed);
        self.ball_normalisation_rate = self.ball_normalisation_rate.max(0.0);
        self.paddle_speed = self.paddle_speed.max(0.0);
        self.powerup_chance = self.powerup_chance.clamp(0.0, 1.0);
        self.lives = self.lives.max(1);
        self.ball_start_angle = crate::normalize_angle(self.ball_start_angle);
        if !self.paddle_max_deflection.is_finite() {
            self.paddle_max_deflection = PADDLE_MAX_DEFLECTION;
        }
        self.paddle_max_deflection = self.paddle_max_deflection.clamp(0.0, std::f32::consts::FRAC_PI_2);
        self
    }

    /// Ball speed tuning for a ball of the given diameter
    pub fn ball_config(&self, diameter: f32) -> BallConfig {
        BallConfig {
            diameter,
            base_speed: self.ball_base_speed,
            max_speed: self.ball_max_speed,
            normalisation_rate: self.ball_normalisation_rate,
        }
    }

    /// Duration of one frame in milliseconds
    pub fn frame_millis(&self) -> u64 {
        1000 / self.game_speed.max(1) as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_constants() {
        let s = Settings::default();
        assert_eq!(s.game_speed, 60);
        assert_eq!(s.ball_base_speed, 8.0);
        assert_eq!(s.ball_max_speed, 15.0);
        assert_eq!(s.lives, 3);
        assert_eq!(s.frame_millis(), 16);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let s = Settings::from_json(r#"{ "lives": 5, "seed": 42 }"#).unwrap();
        assert_eq!(s.lives, 5);
        assert_eq!(s.seed, Some(42));
        assert_eq!(s.paddle_speed, PADDLE_SPEED);
    }

    #[test]
    fn test_sanitize_clamps_base_speed() {
        let s = Settings::from_json(r#"{ "ball_base_speed": 40.0, "powerup_chance": 3.0 }"#).unwrap();
        assert_eq!(s.ball_base_speed, s.ball_max_speed);
        assert_eq!(s.powerup_chance, 1.0);
    }

    #[test]
    fn test_sanitize_bounds_angles() {
        let s = Settings::from_json(r#"{ "ball_start_angle": 1e30, "paddle_max_deflection": 1e30 }"#).unwrap();
        assert!((-std::f32::consts::PI..std::f32::consts::PI).contains(&s.ball_start_angle));
        assert_eq!(s.paddle_max_deflection, std::f32::consts::FRAC_PI_2);
    }

    #[test]
    fn test_bad_json_is_error() {
        assert!(matches!(
            Settings::from_json("{ lives: three }"),
            Err(SettingsError::ParseError(_))
        ));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let path = std::env::temp_dir().join("arkanoid-no-such-settings.json");
        let s = Settings::load(&path).unwrap();
        assert_eq!(s.lives, START_LIVES);
    }
}
