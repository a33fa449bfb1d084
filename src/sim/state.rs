//! Session state and entity ownership
//!
//! The session owns the player, the swarm, every projectile and all
//! decoration. Entities never reach back into it; whatever they need about
//! the player is handed to them by value each frame.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::entity::{Entity, EntityRef};
use super::particles::ParticleSystem;
use super::player::Player;
use super::projectile::Projectile;
use super::starfield::Starfield;
use super::swarm::Swarm;
use super::timers::Timers;
use crate::consts::*;
use crate::tuning::Tuning;

/// Overall session phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Title screen, nothing simulated yet
    Menu,
    /// Active gameplay
    Playing,
    /// Frozen mid-run
    Paused,
    /// Run ended
    GameOver,
}

/// Delayed session events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionTimer {
    RespawnPlayer,
}

#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub score: u64,
    pub lives: u8,
    /// Current wave (1-based once playing)
    pub wave: u32,
    /// Seconds of simulated play this session
    pub time: f32,
    pub player: Player,
    pub swarm: Swarm,
    pub projectiles: Vec<Projectile>,
    pub particles: ParticleSystem,
    pub starfield: Starfield,
    pub timers: Timers<SessionTimer>,
}

impl GameState {
    /// Fresh state sitting in the menu
    pub fn new(seed: u64, tuning: Tuning, max_particles: usize) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let starfield = Starfield::new(STAR_COUNT, &mut rng);
        Self {
            seed,
            rng,
            phase: GamePhase::Menu,
            score: 0,
            lives: tuning.starting_lives,
            wave: 0,
            time: 0.0,
            player: Player::new(&tuning),
            swarm: Swarm::new(&tuning),
            projectiles: Vec::new(),
            particles: ParticleSystem::new(max_particles),
            starfield,
            timers: Timers::new(),
            tuning,
        }
    }

    /// Clear the run and set up wave 1. Cancels every pending timer so
    /// nothing from a previous run can fire into this one.
    pub fn reset(&mut self) {
        let stale = self.timers.cancel_all();
        if stale > 0 {
            log::debug!("Cancelled {} pending session timers", stale);
        }
        self.score = 0;
        self.lives = self.tuning.starting_lives;
        self.wave = 1;
        self.time = 0.0;
        self.projectiles.clear();
        self.particles.clear();
        self.player.reset();
        self.swarm.start_wave(self.wave, &mut self.rng);
    }

    /// Point enemies and the boss aim at this frame
    pub fn player_target(&self) -> Vec2 {
        self.player.bounds().center()
    }

    /// Every active entity in draw order: player, swarm, projectiles
    pub fn entities(&self) -> Vec<EntityRef<'_>> {
        let mut out = Vec::with_capacity(1 + self.swarm.enemies.len() + self.projectiles.len() + 1);
        out.push(EntityRef::Player(&self.player));
        match &self.swarm.boss {
            Some(boss) => out.push(EntityRef::Boss(boss)),
            None => out.extend(self.swarm.enemies.iter().map(EntityRef::Enemy)),
        }
        out.extend(self.projectiles.iter().map(EntityRef::Projectile));
        out.retain(|e| e.is_active());
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_in_menu() {
        let state = GameState::new(1, Tuning::default(), 500);
        assert_eq!(state.phase, GamePhase::Menu);
        assert_eq!(state.lives, STARTING_LIVES);
        assert!(state.swarm.is_empty());
        assert_eq!(state.starfield.stars.len(), STAR_COUNT);
    }

    #[test]
    fn test_reset_starts_wave_one() {
        let mut state = GameState::new(1, Tuning::default(), 500);
        state.score = 900;
        state.lives = 1;
        state.timers.schedule(1.0, SessionTimer::RespawnPlayer);
        state.reset();
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, STARTING_LIVES);
        assert_eq!(state.wave, 1);
        assert!(state.timers.is_empty());
        assert!(!state.swarm.is_empty());
    }

    #[test]
    fn test_entities_skip_inactive_player() {
        let mut state = GameState::new(1, Tuning::default(), 500);
        state.reset();
        assert!(matches!(state.entities()[0], EntityRef::Player(_)));
        state.player.active = false;
        assert!(state.entities().iter().all(|e| !matches!(e, EntityRef::Player(_))));
    }
}
