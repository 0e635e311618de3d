//! Deterministic simulation module
//!
//! All gameplay logic lives here:
//! - One `update` per frame, driven by the caller's clock
//! - Seeded RNG only
//! - Registration order decides collision ties
//! - No rendering dependencies

pub mod ball;
pub mod brick;
pub mod collision;
pub mod game;
pub mod paddle;
pub mod rect;
pub mod registry;
pub mod round;
pub mod sequence;

pub use ball::{Ball, BallConfig, CollisionReport, Motion};
pub use brick::{Brick, BrickColour, PowerUpKind};
pub use collision::{Edge, Impact, classify_impact, default_bounce, reflect_angle};
pub use game::{BrickCollision, Field, Game, GameEvent, GamePhase};
pub use paddle::{Movement, Paddle, PaddleBounce};
pub use rect::Rect;
pub use registry::{
    BounceStrategy, CollidableId, Collidables, CollisionHandler, IdAllocator, OffScreenHandler,
    Registry,
};
pub use round::{Backdrop, Edges, Round, RoundId, Wall};
pub use sequence::{GameStartSequence, SequenceStage};
