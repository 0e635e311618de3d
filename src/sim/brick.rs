//! Bricks
//!
//! A brick is destroyed after `destroy_after` strikes by the ball. Gold bricks
//! can't be destroyed and don't count toward clearing a round.

use serde::{Deserialize, Serialize};

use super::rect::Rect;
use super::registry::CollidableId;

/// Brick colours; each maps to a `brick_<colour>.png` sprite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BrickColour {
    White,
    Orange,
    Cyan,
    Green,
    Red,
    Blue,
    Pink,
    Yellow,
    Silver,
    Gold,
}

impl BrickColour {
    pub const ALL: [BrickColour; 10] = [
        BrickColour::White,
        BrickColour::Orange,
        BrickColour::Cyan,
        BrickColour::Green,
        BrickColour::Red,
        BrickColour::Blue,
        BrickColour::Pink,
        BrickColour::Yellow,
        BrickColour::Silver,
        BrickColour::Gold,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BrickColour::White => "white",
            BrickColour::Orange => "orange",
            BrickColour::Cyan => "cyan",
            BrickColour::Green => "green",
            BrickColour::Red => "red",
            BrickColour::Blue => "blue",
            BrickColour::Pink => "pink",
            BrickColour::Yellow => "yellow",
            BrickColour::Silver => "silver",
            BrickColour::Gold => "gold",
        }
    }

    /// Sprite basename, e.g. `brick_red`
    pub fn sprite_name(&self) -> String {
        format!("brick_{}", self.as_str())
    }

    /// Points for destroying a brick of this colour in round `round` (1-based)
    pub fn value(&self, round: u32) -> u32 {
        match self {
            BrickColour::White => 50,
            BrickColour::Orange => 60,
            BrickColour::Cyan => 70,
            BrickColour::Green => 80,
            BrickColour::Red => 90,
            BrickColour::Blue => 100,
            BrickColour::Pink => 110,
            BrickColour::Yellow => 120,
            BrickColour::Silver => 50 * round.max(1),
            BrickColour::Gold => 0,
        }
    }
}

/// Power-ups a brick may release when destroyed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    Catch,
    Duplicate,
    Expand,
    ExtraLife,
    Laser,
    Slow,
    Warp,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 7] = [
        PowerUpKind::Catch,
        PowerUpKind::Duplicate,
        PowerUpKind::Expand,
        PowerUpKind::ExtraLife,
        PowerUpKind::Laser,
        PowerUpKind::Slow,
        PowerUpKind::Warp,
    ];
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brick {
    pub id: CollidableId,
    pub colour: BrickColour,
    pub rect: Rect,
    /// Points scored when destroyed
    pub value: u32,
    /// Number of ball collisions after which the brick is destroyed (0 = never)
    pub destroy_after: u32,
    pub collision_count: u32,
    pub powerup: Option<PowerUpKind>,
    /// Frames in the shimmer animation (0 when the brick has none)
    anim_frames: usize,
    /// Current shimmer frame while animating
    anim_frame: Option<usize>,
}

impl Brick {
    pub fn new(id: CollidableId, colour: BrickColour, rect: Rect, round: u32) -> Self {
        let destroy_after = match colour {
            BrickColour::Silver => 2,
            BrickColour::Gold => 0,
            _ => 1,
        };
        Self {
            id,
            colour,
            rect,
            value: colour.value(round),
            destroy_after,
            collision_count: 0,
            powerup: None,
            anim_frames: 0,
            anim_frame: None,
        }
    }

    pub fn with_powerup(mut self, powerup: Option<PowerUpKind>) -> Self {
        self.powerup = powerup;
        self
    }

    pub fn with_animation(mut self, frames: usize) -> Self {
        self.anim_frames = frames;
        self
    }

    pub fn is_destructible(&self) -> bool {
        self.destroy_after > 0
    }

    /// Still on screen: not yet hit `destroy_after` times
    pub fn visible(&self) -> bool {
        !self.is_destructible() || self.collision_count < self.destroy_after
    }

    /// Register a strike by the ball. Returns true if this strike destroyed it.
    pub fn hit(&mut self) -> bool {
        if !self.visible() {
            return false;
        }
        if self.is_destructible() {
            self.collision_count += 1;
        }
        if self.visible() {
            self.animate();
            false
        } else {
            true
        }
    }

    /// Start the shimmer animation (no-op without frames)
    pub fn animate(&mut self) {
        if self.anim_frames > 0 {
            self.anim_frame = Some(0);
        }
    }

    pub fn anim_frame(&self) -> Option<usize> {
        self.anim_frame
    }

    /// Advance the shimmer animation by one frame
    pub fn update(&mut self) {
        if let Some(frame) = self.anim_frame {
            let next = frame + 1;
            self.anim_frame = (next < self.anim_frames).then_some(next);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn brick(colour: BrickColour) -> Brick {
        Brick::new(CollidableId(1), colour, Rect::new(0.0, 0.0, 43.0, 21.0), 1)
    }

    #[test]
    fn test_silver_needs_two_hits() {
        let mut b = brick(BrickColour::Silver);
        assert_eq!(b.destroy_after, 2);
        assert!(!b.hit());
        assert!(b.visible());
        assert_eq!(b.collision_count, 1);
        assert!(b.hit());
        assert!(!b.visible());
        assert_eq!(b.collision_count, 2);
        // Further hits on a destroyed brick change nothing
        assert!(!b.hit());
        assert_eq!(b.collision_count, 2);
    }

    #[test]
    fn test_gold_is_indestructible() {
        let mut b = brick(BrickColour::Gold);
        for _ in 0..10 {
            assert!(!b.hit());
        }
        assert!(b.visible());
        assert!(!b.is_destructible());
    }

    #[test]
    fn test_silver_value_scales_with_round() {
        assert_eq!(BrickColour::Silver.value(1), 50);
        assert_eq!(BrickColour::Silver.value(3), 150);
        assert_eq!(BrickColour::Red.value(3), 90);
    }

    #[test]
    fn test_animation_runs_once() {
        let mut b = brick(BrickColour::Silver).with_animation(3);
        b.hit();
        assert_eq!(b.anim_frame(), Some(0));
        b.update();
        b.update();
        assert_eq!(b.anim_frame(), Some(2));
        b.update();
        assert_eq!(b.anim_frame(), None);
    }

    #[test]
    fn test_sprite_name() {
        assert_eq!(BrickColour::Pink.sprite_name(), "brick_pink");
    }
}
