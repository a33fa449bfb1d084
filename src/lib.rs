//! Galactic Defender - A formation-flying arcade shoot-'em-up
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, waves, collisions, session state)
//! - `engine`: Frame driver that owns the session and its collaborators
//! - `renderer`: WebGPU rendering pipeline
//! - `platform`: Browser/native platform abstraction (input, frame timing)
//! - `tuning`: Data-driven game balance

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod engine;
pub mod error;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use engine::Engine;
pub use error::{ConfigError, ConfigResult};
pub use settings::{QualityPreset, Settings};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Logical play field (pixels, y grows downward)
    pub const CANVAS_WIDTH: f32 = 600.0;
    pub const CANVAS_HEIGHT: f32 = 800.0;

    /// Largest frame step the simulation accepts (tab suspension, slow frames)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Player ship
    pub const PLAYER_SPEED: f32 = 300.0;
    pub const PLAYER_SIZE: f32 = 32.0;
    pub const PLAYER_Y: f32 = 700.0;
    /// Velocity easing rate (per second) toward the target speed
    pub const PLAYER_ACCEL: f32 = 10.0;
    /// Seconds between shots
    pub const PLAYER_COOLDOWN: f32 = 0.2;
    /// Hitbox inset on every side
    pub const PLAYER_HITBOX_INSET: f32 = 4.0;
    pub const STARTING_LIVES: u8 = 3;
    /// Seconds the player stays off the field after a hit
    pub const RESPAWN_DELAY: f32 = 2.0;

    /// Formation enemies
    pub const ENEMY_SIZE: f32 = 24.0;
    pub const ENEMY_DIVE_SPEED: f32 = 250.0;
    /// Bezier progress per second while entering
    pub const ENEMY_ENTRY_RATE: f32 = 0.8;
    /// Easing rate toward the grid slot while hovering
    pub const ENEMY_HOVER_EASE: f32 = 5.0;
    pub const GRID_COLS: u32 = 8;
    pub const GRID_BASE_ROWS: u32 = 3;
    /// Extra rows added by wave number, capped here
    pub const GRID_MAX_EXTRA_ROWS: u32 = 3;
    pub const GRID_SPACING: f32 = 15.0;
    pub const GRID_TOP: f32 = 80.0;
    /// Delay between consecutive enemy spawns in a wave
    pub const SPAWN_STAGGER: f32 = 0.1;

    /// Dive cadence: max(floor, base - wave * step) plus up to one second of jitter
    pub const ATTACK_INTERVAL_BASE: f32 = 2.0;
    pub const ATTACK_INTERVAL_STEP: f32 = 0.1;
    pub const ATTACK_INTERVAL_FLOOR: f32 = 0.5;

    /// Boss
    pub const BOSS_SIZE: f32 = 64.0;
    pub const BOSS_HP: i32 = 50;
    /// Boss appears every N waves
    pub const BOSS_WAVE_INTERVAL: u32 = 3;
    pub const BOSS_ALTITUDE: f32 = 100.0;
    /// Boss may only fire once below this height
    pub const BOSS_ATTACK_ALTITUDE: f32 = 50.0;
    pub const BOSS_ATTACK_COOLDOWN: f32 = 1.5;
    pub const BOSS_WING_WIDTH: f32 = 10.0;
    pub const BOSS_HIT_FLASH: f32 = 0.1;
    pub const BOSS_AIMED_SHOT_SPEED: f32 = 300.0;
    pub const BOSS_SPREAD_SPEED: f32 = 200.0;

    /// Projectiles
    pub const PROJECTILE_SPEED: f32 = 500.0;
    pub const PROJECTILE_SIZE: f32 = 4.0;
    pub const PLAYER_BULLET_DAMAGE: i32 = 1;

    /// Scoring
    pub const GRID_KILL_POINTS: u64 = 100;
    pub const DIVE_KILL_POINTS: u64 = 200;
    pub const BOSS_POINTS: u64 = 1000;

    /// Background
    pub const STAR_COUNT: usize = 100;
    pub const STAR_SPEED_BASE: f32 = 50.0;

    /// Explosion sizes (particle counts)
    pub const SMALL_BURST: usize = 10;
    pub const LARGE_BURST: usize = 50;
}

/// Top-left x that horizontally centers an object of `width` on the field
#[inline]
pub fn centered_x(width: f32) -> f32 {
    consts::CANVAS_WIDTH / 2.0 - width / 2.0
}

/// Score as shown on the HUD: zero-padded to six digits, wider if needed
pub fn format_score(score: u64) -> String {
    format!("{:06}", score)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_is_zero_padded() {
        assert_eq!(format_score(0), "000000");
        assert_eq!(format_score(1200), "001200");
        assert_eq!(format_score(1_234_567), "1234567");
    }

    #[test]
    fn test_centered_x() {
        assert_eq!(centered_x(consts::PLAYER_SIZE), 284.0);
    }
}
