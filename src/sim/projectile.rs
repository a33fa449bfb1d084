//! Bullets fired by the player or the boss

use glam::Vec2;

use super::entity::Entity;
use super::geometry::Rect;
use crate::consts::*;

/// Who fired a projectile. Player shots only hit enemies and enemy shots
/// only hit the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Owner {
    Player,
    Enemy,
}

/// A moving rectangle with a fixed velocity
#[derive(Debug, Clone)]
pub struct Projectile {
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
    pub owner: Owner,
    pub active: bool,
}

impl Projectile {
    /// Straight shot: up for the player, down for enemies
    pub fn new(x: f32, y: f32, owner: Owner, speed: f32) -> Self {
        let vy = match owner {
            Owner::Player => -speed,
            Owner::Enemy => speed,
        };
        Self::with_velocity(x, y, owner, Vec2::new(0.0, vy))
    }

    pub fn with_velocity(x: f32, y: f32, owner: Owner, vel: Vec2) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(PROJECTILE_SIZE, PROJECTILE_SIZE * 2.0),
            vel,
            owner,
            active: true,
        }
    }

    pub fn update(&mut self, dt: f32) {
        if !self.active {
            return;
        }
        self.pos += self.vel * dt;

        let off_vertical = self.pos.y < 0.0 || self.pos.y > CANVAS_HEIGHT;
        let off_horizontal = self.pos.x < -self.size.x || self.pos.x > CANVAS_WIDTH;
        if off_vertical || off_horizontal {
            self.active = false;
        }
    }
}

impl Entity for Projectile {
    fn is_active(&self) -> bool {
        self.active
    }

    fn bounds(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }
}
