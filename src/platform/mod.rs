//! Platform layer
//!
//! - `time`: Monotonic game clock and frame-rate governor
//! - `input`: Terminal key events mapped to game actions

pub mod input;
pub mod time;

pub use input::{Action, InputEvent, KeyTracker, map_key};
pub use time::{FrameLimiter, GameClock};
