//! Game flow
//!
//! Ties ball, paddle and rounds together. The ball owns the collision
//! registry; everything it collides with lives in [`Field`], which the ball
//! borrows mutably while it resolves collisions and calls back into handlers.
//!
//! Frame order:
//! 1. Round completion (next round or win)
//! 2. Start sequence
//! 3. Input to paddle
//! 4. Paddle and brick animation
//! 5. Ball physics and collision callbacks
//! 6. Lives bookkeeping

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::ball::Ball;
use super::brick::PowerUpKind;
use super::paddle::{Movement, Paddle, PaddleBounce};
use super::rect::Rect;
use super::registry::{CollidableId, Collidables, CollisionHandler, IdAllocator, Registry};
use super::round::{Round, RoundId};
use super::sequence::GameStartSequence;
use crate::context::GameContext;
use crate::platform::input::{Action, InputEvent};
use crate::settings::Settings;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Start or restart sequence running, ball on the paddle
    Starting,
    /// Ball in play
    Playing,
    /// Out of lives
    GameOver,
    /// Last round cleared
    Won,
}

/// Notifications for the frontend, drained once per frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    RoundStarted {
        round: RoundId,
    },
    /// A brick was struck but survived
    BrickHit {
        id: CollidableId,
    },
    BrickDestroyed {
        id: CollidableId,
        value: u32,
        powerup: Option<PowerUpKind>,
    },
    LifeLost {
        remaining: u32,
    },
    RoundComplete {
        round: RoundId,
    },
    GameOver {
        won: bool,
    },
}

/// Everything the ball can hit, plus the state its callbacks update
#[derive(Debug)]
pub struct Field {
    pub paddle: Paddle,
    pub round: Round,
    pub score: u64,
    pub lives: u32,
    /// Set by the off-screen handler, consumed by lives bookkeeping
    ball_lost: bool,
    events: Vec<GameEvent>,
}

impl Collidables for Field {
    fn bounds(&self, id: CollidableId) -> Option<Rect> {
        if id == self.paddle.id {
            Some(self.paddle.rect)
        } else {
            self.round.bounds(id)
        }
    }
}

impl Field {
    /// A brick was struck: count the hit and, once destroyed, evict it and score it
    fn on_brick_collide(&mut self, registry: &mut Registry<Field>, id: CollidableId) {
        let Some(brick) = self.round.brick_mut(id) else {
            registry.remove(id);
            return;
        };
        if brick.hit() {
            let (value, powerup) = (brick.value, brick.powerup);
            registry.remove(id);
            self.round.brick_destroyed();
            self.score += u64::from(value);
            log::debug!("Brick {:?} destroyed (+{})", id, value);
            self.events.push(GameEvent::BrickDestroyed { id, value, powerup });
        } else {
            self.events.push(GameEvent::BrickHit { id });
        }
    }
}

/// Collision handler registered for every brick
pub struct BrickCollision;

impl CollisionHandler<Field> for BrickCollision {
    fn on_collide(&mut self, field: &mut Field, registry: &mut Registry<Field>, id: CollidableId) {
        field.on_brick_collide(registry, id);
    }
}

pub struct Game {
    pub ball: Ball<Field>,
    pub field: Field,
    phase: GamePhase,
    sequence: Option<GameStartSequence>,
    settings: Settings,
    ctx: GameContext,
    ids: IdAllocator,
    rng: Pcg32,
}

impl Game {
    /// Start a new game on round 1; the start sequence begins at `now_ms`
    pub fn new(ctx: &GameContext, settings: &Settings, now_ms: u64) -> Self {
        let seed = settings.seed.unwrap_or_else(rand::random);
        log::info!("New game (seed {})", seed);
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut ids = IdAllocator::new();

        let round = Round::new(RoundId::Round1, ctx, &mut ids, &mut rng, settings.powerup_chance);
        let paddle = Paddle::new(
            ids.next_id(),
            ctx.sprites.paddle.size(),
            ctx.screen,
            round.edges.left.rect.width(),
            round.edges.right.rect.width(),
            settings.paddle_bottom_offset,
            settings.paddle_speed,
        );
        let ball = Ball::new(
            paddle.rect.mid_top(),
            settings.ball_start_angle,
            settings.ball_config(ctx.sprites.ball.width),
            ctx.screen,
        )
        .with_off_screen_handler(|field: &mut Field| field.ball_lost = true);

        let mut game = Self {
            ball,
            field: Field {
                paddle,
                round,
                score: 0,
                lives: settings.lives,
                ball_lost: false,
                events: Vec::new(),
            },
            phase: GamePhase::Starting,
            sequence: None,
            settings: settings.clone(),
            ctx: ctx.clone(),
            ids,
            rng,
        };
        game.wire_round();
        game.start_sequence(now_ms, false);
        game.field.events.push(GameEvent::RoundStarted {
            round: RoundId::Round1,
        });
        game
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, GamePhase::GameOver | GamePhase::Won)
    }

    pub fn sequence(&self) -> Option<&GameStartSequence> {
        self.sequence.as_ref()
    }

    pub fn round(&self) -> &Round {
        &self.field.round
    }

    pub fn score(&self) -> u64 {
        self.field.score
    }

    pub fn lives(&self) -> u32 {
        self.field.lives
    }

    pub fn context(&self) -> &GameContext {
        &self.ctx
    }

    /// Events raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.field.events)
    }

    /// Advance one frame
    pub fn update(&mut self, now_ms: u64, input: &[InputEvent]) {
        if self.is_over() {
            return;
        }

        if self.phase == GamePhase::Playing && self.field.round.complete() {
            self.next_round(now_ms);
            if self.is_over() {
                return;
            }
        }

        if let Some(sequence) = self.sequence.as_mut() {
            sequence.update(
                now_ms,
                &mut self.ball,
                &mut self.field.paddle,
                self.settings.ball_start_angle,
            );
            if sequence.is_finished() {
                self.sequence = None;
                self.phase = GamePhase::Playing;
            }
        }

        for event in input {
            self.apply_input(*event);
        }

        self.field.paddle.update();
        self.field.round.update();
        self.ball.update(&mut self.field);

        if std::mem::take(&mut self.field.ball_lost) {
            self.lose_life(now_ms);
        }
    }

    fn apply_input(&mut self, event: InputEvent) {
        let paddle = &mut self.field.paddle;
        match event {
            InputEvent::Pressed(Action::MoveLeft) => paddle.move_left(),
            InputEvent::Pressed(Action::MoveRight) => paddle.move_right(),
            InputEvent::Released(Action::MoveLeft) if paddle.movement == Movement::Left => paddle.stop(),
            InputEvent::Released(Action::MoveRight) if paddle.movement == Movement::Right => paddle.stop(),
            _ => {}
        }
    }

    /// Register the current round's edges, the paddle and every brick with the ball
    fn wire_round(&mut self) {
        self.ball.remove_all_collidable_objects();

        let wall_ids: Vec<_> = self.field.round.edges.iter().map(|w| w.id).collect();
        for id in wall_ids {
            self.ball
                .add_collidable_object(id, self.settings.wall_speed_adjust, None, None);
        }

        self.ball.add_collidable_object(
            self.field.paddle.id,
            0.0,
            Some(Box::new(PaddleBounce::new(self.settings.paddle_max_deflection))),
            None,
        );

        let brick_ids: Vec<_> = self.field.round.bricks.iter().map(|b| b.id).collect();
        for id in brick_ids {
            self.ball.add_collidable_object(
                id,
                self.settings.brick_speed_adjust,
                None,
                Some(Box::new(BrickCollision)),
            );
        }
        log::debug!("{} collidables registered", self.ball.collidables().len());
    }

    fn start_sequence(&mut self, now_ms: u64, restart: bool) {
        self.phase = GamePhase::Starting;
        self.sequence = Some(GameStartSequence::new(
            now_ms,
            restart,
            &mut self.ball,
            &mut self.field.paddle,
        ));
    }

    fn next_round(&mut self, now_ms: u64) {
        let finished = self.field.round.id;
        self.field.events.push(GameEvent::RoundComplete { round: finished });
        log::info!("{} complete, score {}", finished.caption(), self.field.score);

        let Some(next) = finished.next() else {
            self.phase = GamePhase::Won;
            self.ball.visible = false;
            self.field.events.push(GameEvent::GameOver { won: true });
            log::info!("All rounds cleared, final score {}", self.field.score);
            return;
        };

        self.field.round = Round::new(
            next,
            &self.ctx,
            &mut self.ids,
            &mut self.rng,
            self.settings.powerup_chance,
        );
        self.field.paddle.recentre();
        self.wire_round();
        self.start_sequence(now_ms, false);
        self.field.events.push(GameEvent::RoundStarted { round: next });
    }

    fn lose_life(&mut self, now_ms: u64) {
        self.field.lives = self.field.lives.saturating_sub(1);
        self.field.events.push(GameEvent::LifeLost {
            remaining: self.field.lives,
        });
        log::info!("Ball lost, {} lives left", self.field.lives);

        if self.field.lives == 0 {
            self.phase = GamePhase::GameOver;
            self.sequence = None;
            self.ball.visible = false;
            self.field.events.push(GameEvent::GameOver { won: false });
        } else {
            self.start_sequence(now_ms, true);
        }
    }
}
