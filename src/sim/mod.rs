//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (insertion order)
//! - Delays measured in simulated time, never wall-clock callbacks
//! - No rendering or platform dependencies; sound and session events go
//!   out through injected [`AudioSink`] and [`SessionListener`]

pub mod autopilot;
pub mod boss;
pub mod collision;
pub mod enemy;
pub mod entity;
pub mod geometry;
pub mod hooks;
pub mod particles;
pub mod player;
pub mod projectile;
pub mod starfield;
pub mod state;
pub mod swarm;
pub mod tick;
pub mod timers;

pub use boss::Boss;
pub use enemy::{Enemy, EnemyState, EntryPath};
pub use entity::{Entity, EntityRef};
pub use geometry::{Rect, bezier, distance, lerp, rect_overlap};
pub use hooks::{AudioSink, NullAudio, NullListener, SessionListener, SoundEffect};
pub use particles::{BurstColor, Particle, ParticleSystem};
pub use player::Player;
pub use projectile::{Owner, Projectile};
pub use starfield::{Star, Starfield};
pub use state::{GamePhase, GameState, SessionTimer};
pub use swarm::{Swarm, grid_dims};
pub use tick::{TickInput, start_session, tick};
pub use timers::Timers;
