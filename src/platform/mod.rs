//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Frame timing (timestamps to clamped deltas, FPS)
//! - Input events (keyboard and on-screen controls merged into one state)

pub mod input;
pub mod time;

pub use input::{InputSource, InputState, KeyAction, LogicalKey, key_action};
pub use time::FrameClock;
