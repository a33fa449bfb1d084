//! Explosion bursts (visual only, never collide)

use glam::Vec2;
use rand::Rng;

/// Palette key for a burst; the renderer maps it to a color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BurstColor {
    Enemy,
    Player,
    Boss,
    Spark,
}

#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub life: f32,
    pub max_life: f32,
    pub size: f32,
    pub color: BurstColor,
}

impl Particle {
    /// Remaining life as 0..=1 (used for fading)
    pub fn alpha(&self) -> f32 {
        (self.life / self.max_life).clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone)]
pub struct ParticleSystem {
    pub particles: Vec<Particle>,
    /// Hard cap from the quality settings; oldest particles are dropped first
    pub max_particles: usize,
}

impl ParticleSystem {
    pub fn new(max_particles: usize) -> Self {
        Self {
            particles: Vec::new(),
            max_particles,
        }
    }

    pub fn update(&mut self, dt: f32) {
        for p in &mut self.particles {
            p.pos += p.vel * dt;
            p.life -= dt;
        }
        self.particles.retain(|p| p.life > 0.0);
    }

    /// Spawn `count` particles flying out of `pos` in random directions
    pub fn explode(&mut self, pos: Vec2, color: BurstColor, count: usize, rng: &mut impl Rng) {
        for _ in 0..count {
            let angle = rng.random::<f32>() * std::f32::consts::TAU;
            let speed: f32 = rng.random_range(50.0..150.0);
            let max_life: f32 = rng.random_range(0.2..0.7);
            self.particles.push(Particle {
                pos,
                vel: Vec2::from_angle(angle) * speed,
                life: max_life,
                max_life,
                size: rng.random_range(1.0..4.0),
                color,
            });
        }

        if self.particles.len() > self.max_particles {
            let excess = self.particles.len() - self.max_particles;
            self.particles.drain(..excess);
        }
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}
