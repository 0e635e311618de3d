//! Ball motion and collision resolution
//!
//! The ball moves in straight lines at `speed` pixels per frame along `angle`.
//! Each frame it is tested against every registered collidable in registration
//! order. The first hit is resolved (bounce, speed change, handler) and the
//! rest are ignored until the next frame. Round and brick logic relies on
//! there being at most one collision per frame.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{Edge, default_bounce};
use super::rect::Rect;
use super::registry::{
    BounceStrategy, CollidableId, Collidables, CollisionHandler, OffScreenHandler, Registry,
};
use crate::{direction, normalize_angle};

/// How the ball is currently moving
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Motion {
    /// Moving under its own velocity
    Free { angle: f32, speed: f32 },
    /// Carried by another object: centre = target's top-left + offset
    Anchored { target: CollidableId, offset: Vec2 },
}

/// Speed tuning for a ball
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BallConfig {
    pub diameter: f32,
    pub base_speed: f32,
    pub max_speed: f32,
    /// Per-frame step toward `base_speed`
    pub normalisation_rate: f32,
}

impl Default for BallConfig {
    fn default() -> Self {
        use crate::consts::*;
        Self {
            diameter: 16.0,
            base_speed: BALL_BASE_SPEED,
            max_speed: BALL_MAX_SPEED,
            normalisation_rate: BALL_SPEED_NORMALISATION_RATE,
        }
    }
}

/// The collision resolved during the most recent frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionReport {
    pub id: CollidableId,
    /// Struck edge, `None` when a bounce strategy chose the angle
    pub edge: Option<Edge>,
    /// Outgoing angle
    pub angle: f32,
    /// Speed after the collidable's speed adjustment, before normalisation
    pub speed: f32,
}

/// The ball
///
/// Generic over the world `W` that owns collidable geometry and receives
/// collision and off-screen callbacks.
pub struct Ball<W> {
    /// Centre position
    pub pos: Vec2,
    pub visible: bool,
    motion: Motion,
    config: BallConfig,
    screen: Rect,
    registry: Registry<W>,
    off_screen: Option<Box<dyn OffScreenHandler<W>>>,
    /// Set once the off-screen handler has fired for the current exit
    exited: bool,
    last_collision: Option<CollisionReport>,
}

impl<W: Collidables> Ball<W> {
    pub fn new(start_pos: Vec2, start_angle: f32, config: BallConfig, screen: Rect) -> Self {
        let config = BallConfig {
            base_speed: config.base_speed.clamp(0.0, config.max_speed),
            ..config
        };
        Self {
            pos: start_pos,
            visible: true,
            motion: Motion::Free {
                angle: normalize_angle(start_angle),
                speed: config.base_speed,
            },
            config,
            screen,
            registry: Registry::new(),
            off_screen: None,
            exited: false,
            last_collision: None,
        }
    }

    /// Install the handler invoked when the ball leaves the screen
    pub fn with_off_screen_handler(mut self, handler: impl OffScreenHandler<W> + 'static) -> Self {
        self.off_screen = Some(Box::new(handler));
        self
    }

    pub fn config(&self) -> &BallConfig {
        &self.config
    }

    pub fn motion(&self) -> Motion {
        self.motion
    }

    pub fn rect(&self) -> Rect {
        Rect::from_center(self.pos, Vec2::splat(self.config.diameter))
    }

    /// Current speed (zero while anchored)
    pub fn speed(&self) -> f32 {
        match self.motion {
            Motion::Free { speed, .. } => speed,
            Motion::Anchored { .. } => 0.0,
        }
    }

    /// Current heading, `None` while anchored
    pub fn angle(&self) -> Option<f32> {
        match self.motion {
            Motion::Free { angle, .. } => Some(angle),
            Motion::Anchored { .. } => None,
        }
    }

    pub fn is_anchored(&self) -> bool {
        matches!(self.motion, Motion::Anchored { .. })
    }

    /// Set heading and speed directly (speed is clamped to [0, max_speed])
    pub fn set_velocity(&mut self, angle: f32, speed: f32) {
        self.motion = Motion::Free {
            angle: normalize_angle(angle),
            speed: speed.clamp(0.0, self.config.max_speed),
        };
    }

    pub fn last_collision(&self) -> Option<CollisionReport> {
        self.last_collision
    }

    pub fn collidables(&self) -> &Registry<W> {
        &self.registry
    }

    /// Register an object the ball can collide with.
    ///
    /// Registering an id twice keeps the first registration.
    pub fn add_collidable_object(
        &mut self,
        id: CollidableId,
        speed_adjust: f32,
        bounce_strategy: Option<Box<dyn BounceStrategy>>,
        on_collide: Option<Box<dyn CollisionHandler<W>>>,
    ) {
        self.registry.add(id, speed_adjust, bounce_strategy, on_collide);
    }

    pub fn remove_collidable_object(&mut self, id: CollidableId) {
        self.registry.remove(id);
    }

    pub fn remove_all_collidable_objects(&mut self) {
        self.registry.clear();
    }

    /// Attach the ball to `target`; its centre tracks target top-left + `offset`
    pub fn anchor(&mut self, target: CollidableId, offset: Vec2) {
        self.motion = Motion::Anchored { target, offset };
        self.exited = false;
    }

    /// Detach from the anchor and move off at `angle` with base speed
    pub fn release(&mut self, angle: f32) {
        self.motion = Motion::Free {
            angle: normalize_angle(angle),
            speed: self.config.base_speed,
        };
        self.exited = false;
    }

    /// Advance one frame
    ///
    /// The off-screen test runs before collision checks and uses the whole
    /// ball rectangle: a ball that has left the screen neither collides nor
    /// has its speed normalised that frame.
    pub fn update(&mut self, world: &mut W) {
        self.last_collision = None;

        let (angle, speed) = match self.motion {
            Motion::Anchored { target, offset } => {
                if let Some(bounds) = world.bounds(target) {
                    self.pos = bounds.pos + offset;
                }
                return;
            }
            Motion::Free { angle, speed } => (angle, speed),
        };

        let prev = self.rect();
        self.pos += direction(angle) * speed;
        let current = self.rect();

        if !self.screen.contains(&current) {
            if !self.exited {
                self.exited = true;
                log::debug!("Ball left the screen at ({:.1}, {:.1})", self.pos.x, self.pos.y);
                if let Some(handler) = self.off_screen.as_mut() {
                    handler.on_off_screen(world);
                }
            }
            return;
        }

        let (mut angle, mut speed) = (angle, speed);

        let hit = self.registry.entries().iter().enumerate().find_map(|(index, entry)| {
            world
                .bounds(entry.id)
                .filter(|bounds| current.intersects(bounds))
                .map(|bounds| (index, entry.id, bounds))
        });

        if let Some((index, id, bounds)) = hit {
            let entry = &self.registry.entries()[index];
            let (new_angle, edge) = match &entry.bounce {
                Some(strategy) => (normalize_angle(strategy.bounce(&current, &bounds, angle)), None),
                None => {
                    let impact = default_bounce(&prev, &current, &bounds, angle);
                    (impact.angle, Some(impact.edge))
                }
            };
            angle = new_angle;
            speed = (speed + entry.speed_adjust).clamp(0.0, self.config.max_speed);
            self.motion = Motion::Free { angle, speed };
            self.last_collision = Some(CollisionReport {
                id,
                edge,
                angle,
                speed,
            });

            if let Some(mut handler) = self.registry.take_handler(index) {
                handler.on_collide(world, &mut self.registry, id);
                self.registry.restore_handler(id, handler);
            }
        }

        self.motion = Motion::Free {
            angle,
            speed: self.normalised(speed),
        };
    }

    /// One normalisation step toward base speed, never overshooting it
    fn normalised(&self, speed: f32) -> f32 {
        let BallConfig {
            base_speed,
            max_speed,
            normalisation_rate,
            ..
        } = self.config;
        let stepped = if speed > base_speed {
            (speed - normalisation_rate).max(base_speed)
        } else {
            (speed + normalisation_rate).min(base_speed)
        };
        stepped.clamp(0.0, max_speed)
    }
}
