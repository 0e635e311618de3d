//! Start/restart sequence
//!
//! Runs at the start of each round and after each lost life. Sprites are
//! hidden, the round caption and "Ready" appear in turn, then the paddle and
//! ball are shown and finally the ball is launched off the paddle.

use serde::{Deserialize, Serialize};

use super::ball::Ball;
use super::paddle::Paddle;
use super::registry::Collidables;

pub const CAPTION_AT_MS: u64 = 1000;
pub const READY_AT_MS: u64 = 3000;
pub const SPRITES_AT_MS: u64 = 3500;
pub const RELEASE_AT_MS: u64 = 5500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SequenceStage {
    Hidden,
    CaptionShown,
    ReadyShown,
    SpritesVisible,
    Released,
}

impl SequenceStage {
    /// Stage reached after `elapsed_ms`
    pub fn at(elapsed_ms: u64) -> Self {
        match elapsed_ms {
            t if t >= RELEASE_AT_MS => SequenceStage::Released,
            t if t >= SPRITES_AT_MS => SequenceStage::SpritesVisible,
            t if t >= READY_AT_MS => SequenceStage::ReadyShown,
            t if t >= CAPTION_AT_MS => SequenceStage::CaptionShown,
            _ => SequenceStage::Hidden,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameStartSequence {
    start_ms: u64,
    /// Restarts (after a lost life) skip the round caption
    restart: bool,
    stage: SequenceStage,
}

impl GameStartSequence {
    /// Activate: hide paddle and ball, and sit the ball on the paddle
    ///
    /// The paddle keeps its movement so a key held through a lost life still
    /// steers it.
    pub fn new<W: Collidables>(now_ms: u64, restart: bool, ball: &mut Ball<W>, paddle: &mut Paddle) -> Self {
        paddle.visible = false;
        ball.visible = false;
        let offset = paddle.ball_anchor_offset(ball.config().diameter);
        ball.anchor(paddle.id, offset);
        ball.pos = paddle.rect.pos + offset;
        log::debug!("Start sequence activated at {}ms (restart: {})", now_ms, restart);
        Self {
            start_ms: now_ms,
            restart,
            stage: SequenceStage::Hidden,
        }
    }

    /// Advance to the stage for `now_ms`, applying each newly reached stage once
    pub fn update<W: Collidables>(
        &mut self,
        now_ms: u64,
        ball: &mut Ball<W>,
        paddle: &mut Paddle,
        start_angle: f32,
    ) -> SequenceStage {
        let target = SequenceStage::at(now_ms.saturating_sub(self.start_ms));
        if target <= self.stage {
            return self.stage;
        }

        if target >= SequenceStage::SpritesVisible && self.stage < SequenceStage::SpritesVisible {
            paddle.visible = true;
            ball.visible = true;
        }
        if target == SequenceStage::Released {
            ball.release(start_angle);
            log::debug!("Ball released at {}ms", now_ms);
        }
        self.stage = target;
        self.stage
    }

    pub fn stage(&self) -> SequenceStage {
        self.stage
    }

    pub fn is_restart(&self) -> bool {
        self.restart
    }

    pub fn is_finished(&self) -> bool {
        self.stage == SequenceStage::Released
    }

    pub fn caption_visible(&self) -> bool {
        !self.restart
            && self.stage >= SequenceStage::CaptionShown
            && self.stage < SequenceStage::Released
    }

    pub fn ready_visible(&self) -> bool {
        self.stage >= SequenceStage::ReadyShown && self.stage < SequenceStage::Released
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::BALL_START_ANGLE_RAD;
    use crate::normalize_angle;
    use crate::sim::ball::BallConfig;
    use crate::sim::rect::Rect;
    use crate::sim::registry::CollidableId;
    use glam::Vec2;

    struct PaddleWorld(Rect);

    impl Collidables for PaddleWorld {
        fn bounds(&self, id: CollidableId) -> Option<Rect> {
            (id == CollidableId(1)).then_some(self.0)
        }
    }

    fn setup() -> (Ball<PaddleWorld>, Paddle) {
        let screen = Rect::new(0.0, 0.0, 600.0, 650.0);
        let paddle = Paddle::new(CollidableId(1), Vec2::new(60.0, 14.0), screen, 20.0, 20.0, 60.0, 10.0);
        let ball = Ball::new(Vec2::new(300.0, 300.0), 0.0, BallConfig::default(), screen);
        (ball, paddle)
    }

    #[test]
    fn test_stage_thresholds() {
        assert_eq!(SequenceStage::at(0), SequenceStage::Hidden);
        assert_eq!(SequenceStage::at(999), SequenceStage::Hidden);
        assert_eq!(SequenceStage::at(1000), SequenceStage::CaptionShown);
        assert_eq!(SequenceStage::at(3000), SequenceStage::ReadyShown);
        assert_eq!(SequenceStage::at(3500), SequenceStage::SpritesVisible);
        assert_eq!(SequenceStage::at(5500), SequenceStage::Released);
    }

    #[test]
    fn test_full_sequence() {
        let (mut ball, mut paddle) = setup();
        let mut seq = GameStartSequence::new(0, false, &mut ball, &mut paddle);
        assert!(!paddle.visible && !ball.visible);
        assert!(ball.is_anchored());

        seq.update(1500, &mut ball, &mut paddle, BALL_START_ANGLE_RAD);
        assert!(seq.caption_visible());
        assert!(!seq.ready_visible());
        assert!(!paddle.visible && !ball.visible);

        seq.update(4000, &mut ball, &mut paddle, BALL_START_ANGLE_RAD);
        assert!(seq.ready_visible());
        assert!(paddle.visible && ball.visible);
        assert!(ball.is_anchored());

        seq.update(6000, &mut ball, &mut paddle, BALL_START_ANGLE_RAD);
        assert!(seq.is_finished());
        assert!(!seq.caption_visible());
        assert_eq!(ball.speed(), ball.config().base_speed);
        let angle = ball.angle().unwrap();
        assert!((angle - normalize_angle(BALL_START_ANGLE_RAD)).abs() < 1e-5);
    }

    #[test]
    fn test_anchor_follows_paddle_during_sequence() {
        let (mut ball, mut paddle) = setup();
        let _seq = GameStartSequence::new(0, false, &mut ball, &mut paddle);
        paddle.rect.pos.x += 50.0;
        let mut world = PaddleWorld(paddle.rect);
        ball.update(&mut world);
        assert_eq!(ball.pos.x, paddle.rect.center().x);
        assert_eq!(ball.rect().bottom(), paddle.rect.top());
    }

    #[test]
    fn test_activation_keeps_paddle_movement() {
        let (mut ball, mut paddle) = setup();
        paddle.move_left();
        let _seq = GameStartSequence::new(0, true, &mut ball, &mut paddle);
        assert_eq!(paddle.movement, crate::sim::paddle::Movement::Left);
    }

    #[test]
    fn test_restart_skips_caption() {
        let (mut ball, mut paddle) = setup();
        let mut seq = GameStartSequence::new(10_000, true, &mut ball, &mut paddle);
        seq.update(11_500, &mut ball, &mut paddle, 0.0);
        assert!(!seq.caption_visible());
        seq.update(13_100, &mut ball, &mut paddle, 0.0);
        assert!(seq.ready_visible());
    }

    #[test]
    fn test_release_happens_once() {
        let (mut ball, mut paddle) = setup();
        let mut seq = GameStartSequence::new(0, false, &mut ball, &mut paddle);
        seq.update(6000, &mut ball, &mut paddle, 1.0);
        ball.set_velocity(2.0, 12.0);
        seq.update(7000, &mut ball, &mut paddle, 1.0);
        assert_eq!(ball.speed(), 12.0);
    }
}
