//! The player's paddle
//!
//! Moves sideways at a fixed speed while a direction key is held, clamped
//! between the side edges. Deflects the ball at an angle that depends on where
//! along the paddle it struck, so the player can aim.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use super::registry::{BounceStrategy, CollidableId};
use crate::consts::STRAIGHT_UP;
use crate::normalize_angle;

/// Directional intent from input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Movement {
    #[default]
    Stationary,
    Left,
    Right,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    pub id: CollidableId,
    pub rect: Rect,
    pub movement: Movement,
    /// Pixels per frame
    pub speed: f32,
    pub visible: bool,
    /// Playable horizontal range for the paddle's rectangle
    min_x: f32,
    max_x: f32,
}

impl Paddle {
    /// Create a paddle centred horizontally, `bottom_offset` above the screen bottom.
    ///
    /// `left_offset`/`right_offset` are the widths of the side edges it may not enter.
    pub fn new(
        id: CollidableId,
        size: Vec2,
        screen: Rect,
        left_offset: f32,
        right_offset: f32,
        bottom_offset: f32,
        speed: f32,
    ) -> Self {
        let min_x = screen.left() + left_offset;
        let max_x = (screen.right() - right_offset - size.x).max(min_x);
        let x = screen.center().x - size.x / 2.0;
        let y = screen.bottom() - bottom_offset - size.y;
        Self {
            id,
            rect: Rect::new(x.clamp(min_x, max_x), y, size.x, size.y),
            movement: Movement::Stationary,
            speed,
            visible: true,
            min_x,
            max_x,
        }
    }

    pub fn move_left(&mut self) {
        self.movement = Movement::Left;
    }

    pub fn move_right(&mut self) {
        self.movement = Movement::Right;
    }

    pub fn stop(&mut self) {
        self.movement = Movement::Stationary;
    }

    /// Apply the current movement for one frame
    pub fn update(&mut self) {
        let dx = match self.movement {
            Movement::Stationary => return,
            Movement::Left => -self.speed,
            Movement::Right => self.speed,
        };
        self.rect.pos.x = (self.rect.pos.x + dx).clamp(self.min_x, self.max_x);
    }

    /// Move back to the centre of the playable range and stop
    pub fn recentre(&mut self) {
        self.rect.pos.x = (self.min_x + self.max_x) / 2.0;
        self.movement = Movement::Stationary;
    }

    /// Offset that anchors a ball of `diameter` resting on the paddle's top centre
    pub fn ball_anchor_offset(&self, diameter: f32) -> Vec2 {
        Vec2::new(self.rect.width() / 2.0, -diameter / 2.0)
    }
}

/// Paddle bounce: the outgoing angle is proportional to the strike offset
///
/// A strike at the centre leaves straight up. A strike at either extreme leaves
/// `max_deflection` radians from vertical, toward that side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaddleBounce {
    pub max_deflection: f32,
}

impl Default for PaddleBounce {
    fn default() -> Self {
        Self {
            max_deflection: crate::consts::PADDLE_MAX_DEFLECTION,
        }
    }
}

impl PaddleBounce {
    pub fn new(max_deflection: f32) -> Self {
        // Keep a vertical component; a flat bounce would never come back down
        let limit = std::f32::consts::FRAC_PI_2 - 0.05;
        Self {
            max_deflection: max_deflection.clamp(0.0, limit),
        }
    }

    /// Strike offset from paddle centre, normalised to [-1, 1]
    pub fn strike_offset(ball: &Rect, paddle: &Rect) -> f32 {
        let half_width = (paddle.width() / 2.0).max(f32::EPSILON);
        ((ball.center().x - paddle.center().x) / half_width).clamp(-1.0, 1.0)
    }

    pub fn angle_for_offset(&self, offset: f32) -> f32 {
        normalize_angle(STRAIGHT_UP + offset.clamp(-1.0, 1.0) * self.max_deflection)
    }
}

impl BounceStrategy for PaddleBounce {
    fn bounce(&self, ball: &Rect, target: &Rect, _angle: f32) -> f32 {
        self.angle_for_offset(Self::strike_offset(ball, target))
    }
}
