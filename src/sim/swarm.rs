//! Wave director
//!
//! Owns the live formation (or the boss) for the current wave, staggers
//! enemy arrivals and decides when someone breaks formation to dive.

use glam::Vec2;
use rand::Rng;

use super::boss::Boss;
use super::enemy::Enemy;
use super::hooks::AudioSink;
use super::projectile::Projectile;
use super::timers::Timers;
use crate::consts::*;
use crate::tuning::Tuning;

/// Formation size for a regular wave: rows grow with the wave, up to a cap
pub fn grid_dims(wave: u32) -> (u32, u32) {
    let rows = GRID_BASE_ROWS + wave.min(GRID_MAX_EXTRA_ROWS);
    (rows, GRID_COLS)
}

#[derive(Debug, Clone)]
pub struct Swarm {
    /// Current wave number (1-based)
    pub wave: u32,
    /// Live enemies in spawn order
    pub enemies: Vec<Enemy>,
    /// Present only on boss waves
    pub boss: Option<Boss>,
    attack_timer: f32,
    attack_interval: f32,
    /// Formation slots waiting for their staggered arrival
    spawns: Timers<Vec2>,
    tuning: Tuning,
}

impl Swarm {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            wave: 0,
            enemies: Vec::new(),
            boss: None,
            attack_timer: 0.0,
            attack_interval: tuning.attack_interval(0),
            spawns: Timers::new(),
            tuning: tuning.clone(),
        }
    }

    /// Replace whatever is on the field with wave `wave`
    pub fn start_wave(&mut self, wave: u32, rng: &mut impl Rng) {
        self.wave = wave;
        self.enemies.clear();
        self.boss = None;
        let stale = self.spawns.cancel_all();
        if stale > 0 {
            log::debug!("Dropped {} pending spawns from the previous wave", stale);
        }

        if self.tuning.is_boss_wave(wave) {
            log::info!("Wave {}: boss ({} hp)", wave, self.tuning.boss_hp);
            self.boss = Some(Boss::new(&self.tuning));
            return;
        }

        let (rows, cols) = grid_dims(wave);
        let cell = ENEMY_SIZE + GRID_SPACING;
        let start_x = (CANVAS_WIDTH - cols as f32 * cell) / 2.0;

        for r in 0..rows {
            for c in 0..cols {
                let slot = Vec2::new(start_x + c as f32 * cell, GRID_TOP + r as f32 * cell);
                let index = r * cols + c;
                let delay = index as f32 * self.tuning.spawn_stagger;
                self.spawns.schedule(delay, slot);
            }
        }

        self.attack_interval = self.tuning.attack_interval(wave);
        log::info!(
            "Wave {}: {}x{} formation, dive every {:.2}s",
            wave,
            rows,
            cols,
            self.attack_interval
        );

        // The first slot arrives immediately
        self.release_spawns(0.0, rng);
    }

    fn release_spawns(&mut self, dt: f32, rng: &mut impl Rng) {
        for slot in self.spawns.advance(dt) {
            self.enemies.push(Enemy::new(slot, rng, &self.tuning));
        }
    }

    /// Advance the wave one frame. Returns projectiles fired by the boss.
    pub fn update(
        &mut self,
        dt: f32,
        time: f32,
        target: Vec2,
        rng: &mut impl Rng,
        audio: &mut dyn AudioSink,
    ) -> Vec<Projectile> {
        if let Some(boss) = &mut self.boss {
            let shots = boss.update(dt, target, rng, audio);
            if !boss.active {
                log::info!("Wave {}: boss defeated", self.wave);
                self.boss = None;
            }
            return shots;
        }

        self.release_spawns(dt, rng);

        for enemy in &mut self.enemies {
            enemy.update(dt, target, time);
        }

        self.attack_timer -= dt;
        if self.attack_timer <= 0.0 {
            self.attack_timer = self.attack_interval + rng.random::<f32>();

            let in_grid: Vec<usize> = self
                .enemies
                .iter()
                .enumerate()
                .filter(|(_, e)| e.active && e.in_grid())
                .map(|(i, _)| i)
                .collect();
            if !in_grid.is_empty() {
                let pick = in_grid[rng.random_range(0..in_grid.len())];
                self.enemies[pick].start_dive(audio);
                log::debug!("Enemy {} dives", pick);
            }
        }

        self.enemies.retain(|e| e.active);
        Vec::new()
    }

    /// Enemies scheduled but not yet on the field
    pub fn pending_spawns(&self) -> usize {
        self.spawns.len()
    }

    /// Seconds between enforced dives this wave (before jitter)
    pub fn attack_interval(&self) -> f32 {
        self.attack_interval
    }

    /// Nothing left to fight and nothing still arriving
    pub fn is_empty(&self) -> bool {
        self.enemies.is_empty() && self.boss.is_none() && self.spawns.is_empty()
    }
}
