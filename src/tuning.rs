//! Data-driven game balance
//!
//! [`Tuning`] mirrors the balance constants in [`crate::consts`]. A JSON
//! document can override any subset of fields; missing keys keep the
//! compile-time defaults.
//!
//! ```
//! use galactic_defender::Tuning;
//!
//! let tuning = Tuning::from_json(r#"{ "boss_hp": 80, "starting_lives": 5 }"#).unwrap();
//! assert_eq!(tuning.boss_hp, 80);
//! assert_eq!(tuning.player_speed, galactic_defender::consts::PLAYER_SPEED);
//! ```

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{ConfigError, ConfigResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // Player
    pub player_speed: f32,
    pub player_accel: f32,
    pub player_cooldown: f32,
    pub starting_lives: u8,
    pub respawn_delay: f32,

    // Formation
    pub enemy_entry_rate: f32,
    pub enemy_dive_speed: f32,
    pub spawn_stagger: f32,
    pub attack_interval_base: f32,
    pub attack_interval_step: f32,
    pub attack_interval_floor: f32,

    // Boss
    pub boss_hp: i32,
    pub boss_wave_interval: u32,
    pub boss_attack_cooldown: f32,

    // Projectiles
    pub projectile_speed: f32,

    // Scoring
    pub grid_kill_points: u64,
    pub dive_kill_points: u64,
    pub boss_points: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_speed: PLAYER_SPEED,
            player_accel: PLAYER_ACCEL,
            player_cooldown: PLAYER_COOLDOWN,
            starting_lives: STARTING_LIVES,
            respawn_delay: RESPAWN_DELAY,

            enemy_entry_rate: ENEMY_ENTRY_RATE,
            enemy_dive_speed: ENEMY_DIVE_SPEED,
            spawn_stagger: SPAWN_STAGGER,
            attack_interval_base: ATTACK_INTERVAL_BASE,
            attack_interval_step: ATTACK_INTERVAL_STEP,
            attack_interval_floor: ATTACK_INTERVAL_FLOOR,

            boss_hp: BOSS_HP,
            boss_wave_interval: BOSS_WAVE_INTERVAL,
            boss_attack_cooldown: BOSS_ATTACK_COOLDOWN,

            projectile_speed: PROJECTILE_SPEED,

            grid_kill_points: GRID_KILL_POINTS,
            dive_kill_points: DIVE_KILL_POINTS,
            boss_points: BOSS_POINTS,
        }
    }
}

fn positive(name: &'static str, value: f32) -> ConfigResult<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            name,
            value,
            safe_range: "(0.0, ∞)",
        })
    }
}

impl Tuning {
    /// Parse and validate a JSON override document
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Read a JSON override file (native builds)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_path(path: impl AsRef<std::path::Path>) -> ConfigResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Reject values that would stall or break the simulation
    pub fn validate(&self) -> ConfigResult<()> {
        positive("player_speed", self.player_speed)?;
        positive("player_accel", self.player_accel)?;
        positive("player_cooldown", self.player_cooldown)?;
        positive("enemy_entry_rate", self.enemy_entry_rate)?;
        positive("enemy_dive_speed", self.enemy_dive_speed)?;
        positive("attack_interval_floor", self.attack_interval_floor)?;
        positive("boss_attack_cooldown", self.boss_attack_cooldown)?;
        positive("projectile_speed", self.projectile_speed)?;
        positive("boss_hp", self.boss_hp as f32)?;

        if self.spawn_stagger < 0.0 || self.respawn_delay < 0.0 {
            return Err(ConfigError::OutOfRange {
                name: "spawn_stagger/respawn_delay",
                value: self.spawn_stagger.min(self.respawn_delay),
                safe_range: "[0.0, ∞)",
            });
        }
        if self.starting_lives == 0 {
            return Err(ConfigError::OutOfRange {
                name: "starting_lives",
                value: 0.0,
                safe_range: "[1, 255]",
            });
        }
        if self.boss_wave_interval == 0 {
            return Err(ConfigError::OutOfRange {
                name: "boss_wave_interval",
                value: 0.0,
                safe_range: "[1, ∞)",
            });
        }
        Ok(())
    }

    /// Seconds between enforced dives for `wave`, never below the floor
    pub fn attack_interval(&self, wave: u32) -> f32 {
        (self.attack_interval_base - wave as f32 * self.attack_interval_step)
            .max(self.attack_interval_floor)
    }

    /// Whether `wave` is a boss wave
    pub fn is_boss_wave(&self, wave: u32) -> bool {
        wave > 0 && wave.is_multiple_of(self.boss_wave_interval)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let t = Tuning::from_json(r#"{ "player_speed": 420.0 }"#).unwrap();
        assert_eq!(t.player_speed, 420.0);
        assert_eq!(t.boss_hp, BOSS_HP);
        assert_eq!(t.starting_lives, STARTING_LIVES);
    }

    #[test]
    fn test_bad_json_is_parse_error() {
        let err = Tuning::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_out_of_range_rejected() {
        let err = Tuning::from_json(r#"{ "player_cooldown": 0.0 }"#).unwrap_err();
        match err {
            ConfigError::OutOfRange { name, .. } => assert_eq!(name, "player_cooldown"),
            other => panic!("unexpected error: {other}"),
        }
        assert!(Tuning::from_json(r#"{ "boss_wave_interval": 0 }"#).is_err());
        assert!(Tuning::from_json(r#"{ "starting_lives": 0 }"#).is_err());
    }

    #[test]
    fn test_attack_interval_shrinks_to_floor() {
        let t = Tuning::default();
        assert!((t.attack_interval(1) - 1.9).abs() < 1e-5);
        assert!((t.attack_interval(10) - 1.0).abs() < 1e-5);
        assert_eq!(t.attack_interval(40), ATTACK_INTERVAL_FLOOR);
    }

    #[test]
    fn test_boss_waves() {
        let t = Tuning::default();
        assert!(!t.is_boss_wave(1));
        assert!(!t.is_boss_wave(2));
        assert!(t.is_boss_wave(3));
        assert!(t.is_boss_wave(6));
    }
}
