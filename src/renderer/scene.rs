//! Scene assembly
//!
//! Each drawable type emits its own triangles; [`build_scene`] walks the
//! session in paint order: decoration, player, swarm, projectiles and
//! finally particles so effects sit on top of fire.

use glam::Vec2;

use super::shapes::{circle, rect, triangle};
use super::vertex::{Vertex, colors};
use crate::consts::*;
use crate::settings::Settings;
use crate::sim::{
    Boss, BurstColor, Enemy, EntityRef, GameState, Owner, ParticleSystem, Player, Projectile,
    Starfield,
};

/// Per-frame drawing options
#[derive(Debug, Clone, Copy)]
pub struct SceneStyle {
    /// Session clock, drives the small animations
    pub time: f32,
    pub hit_flash: bool,
    pub starfield: bool,
}

impl SceneStyle {
    pub fn new(state: &GameState, settings: &Settings) -> Self {
        Self {
            time: state.time,
            hit_flash: settings.effective_hit_flash(),
            starfield: settings.starfield_enabled(),
        }
    }
}

/// Something that knows how to paint itself
pub trait Draw {
    fn draw(&self, out: &mut Vec<Vertex>, style: &SceneStyle);
}

/// Two-state flicker, `hz` flips per second
fn flicker(time: f32, hz: f32) -> bool {
    (time * hz) as i64 % 2 == 0
}

impl Draw for Starfield {
    fn draw(&self, out: &mut Vec<Vertex>, _style: &SceneStyle) {
        for star in &self.stars {
            let color = colors::fade(colors::STAR, star.brightness());
            out.extend(rect(star.x, star.y, star.size, star.size, color));
        }
    }
}

impl Draw for Player {
    fn draw(&self, out: &mut Vec<Vertex>, style: &SceneStyle) {
        if !self.active {
            return;
        }
        let (x, y) = (self.pos.x, self.pos.y);
        let (w, h) = (self.size.x, self.size.y);
        let nose = Vec2::new(x + w / 2.0, y);
        let notch = Vec2::new(x + w / 2.0, y + h - 8.0);

        // Arrowhead hull as two triangles meeting at the notch
        out.extend(triangle(nose, Vec2::new(x, y + h), notch, colors::PLAYER));
        out.extend(triangle(nose, notch, Vec2::new(x + w, y + h), colors::PLAYER));

        if flicker(style.time, 20.0) {
            out.extend(rect(x + w / 2.0 - 2.0, y + h - 4.0, 4.0, 8.0, colors::ENGINE_FLAME));
        }
    }
}

impl Draw for Enemy {
    fn draw(&self, out: &mut Vec<Vertex>, style: &SceneStyle) {
        if !self.active {
            return;
        }
        let color = if self.is_diving() {
            colors::ENEMY_DIVING
        } else {
            colors::ENEMY
        };
        let (x, y) = (self.pos.x, self.pos.y);
        let (w, h) = (self.size.x, self.size.y);
        let center = Vec2::new(x + w / 2.0, y + h / 2.0);

        out.extend(circle(center, w / 2.0, color, 12));
        out.extend(rect(center.x - 6.0, center.y - 2.0, 4.0, 4.0, colors::ENEMY_EYES));
        out.extend(rect(center.x + 2.0, center.y - 2.0, 4.0, 4.0, colors::ENEMY_EYES));

        // Wings flap
        if flicker(style.time, 10.0) {
            out.extend(triangle(
                Vec2::new(x, y + h / 2.0),
                Vec2::new(x - 6.0, y),
                Vec2::new(x, y + h / 2.0 - 4.0),
                color,
            ));
            out.extend(triangle(
                Vec2::new(x + w, y + h / 2.0),
                Vec2::new(x + w, y + h / 2.0 - 4.0),
                Vec2::new(x + w + 6.0, y),
                color,
            ));
        }
    }
}

impl Draw for Boss {
    fn draw(&self, out: &mut Vec<Vertex>, style: &SceneStyle) {
        if !self.active {
            return;
        }
        let flashing = style.hit_flash && self.hit_flash > 0.0;
        let (body, wing) = if flashing {
            (colors::BOSS_FLASH, colors::BOSS_FLASH)
        } else {
            (colors::BOSS, colors::BOSS_WING)
        };
        let (x, y) = (self.pos.x, self.pos.y);
        let (w, h) = (self.size.x, self.size.y);

        out.extend(rect(x, y, w, h, body));
        out.extend(rect(x - BOSS_WING_WIDTH, y + 10.0, BOSS_WING_WIDTH, 40.0, wing));
        out.extend(rect(x + w, y + 10.0, BOSS_WING_WIDTH, 40.0, wing));

        let eye = 20.0;
        out.extend(rect(
            x + w / 2.0 - eye / 2.0,
            y + h / 2.0 - eye / 2.0,
            eye,
            eye,
            colors::BOSS_CORE,
        ));

        // Health bar spans the wings
        let bar_x = x - BOSS_WING_WIDTH;
        let bar_w = w + BOSS_WING_WIDTH * 2.0;
        out.extend(rect(bar_x, y - 15.0, bar_w, 6.0, colors::HEALTH_BACK));
        out.extend(rect(
            bar_x,
            y - 15.0,
            bar_w * self.health_ratio(),
            6.0,
            colors::HEALTH_FILL,
        ));
    }
}

impl Draw for Projectile {
    fn draw(&self, out: &mut Vec<Vertex>, _style: &SceneStyle) {
        if !self.active {
            return;
        }
        let color = match self.owner {
            Owner::Player => colors::PLAYER_SHOT,
            Owner::Enemy => colors::ENEMY_SHOT,
        };
        out.extend(rect(self.pos.x, self.pos.y, self.size.x, self.size.y, color));
    }
}

fn burst_color(color: BurstColor) -> [f32; 4] {
    match color {
        BurstColor::Enemy => colors::ENEMY,
        BurstColor::Player => colors::PLAYER,
        BurstColor::Boss => colors::BOSS,
        BurstColor::Spark => colors::SPARK,
    }
}

impl Draw for ParticleSystem {
    fn draw(&self, out: &mut Vec<Vertex>, _style: &SceneStyle) {
        for p in &self.particles {
            let color = colors::fade(burst_color(p.color), p.alpha());
            out.extend(rect(p.pos.x, p.pos.y, p.size, p.size, color));
        }
    }
}

impl Draw for EntityRef<'_> {
    fn draw(&self, out: &mut Vec<Vertex>, style: &SceneStyle) {
        match self {
            EntityRef::Player(p) => p.draw(out, style),
            EntityRef::Enemy(e) => e.draw(out, style),
            EntityRef::Boss(b) => b.draw(out, style),
            EntityRef::Projectile(p) => p.draw(out, style),
        }
    }
}

/// Full frame in play-field pixels, back to front
pub fn build_scene(state: &GameState, settings: &Settings) -> Vec<Vertex> {
    let style = SceneStyle::new(state, settings);
    let mut out = Vec::with_capacity(4096);

    out.extend(rect(0.0, 0.0, CANVAS_WIDTH, CANVAS_HEIGHT, colors::BACKGROUND));
    if style.starfield {
        state.starfield.draw(&mut out, &style);
    }
    for entity in state.entities() {
        entity.draw(&mut out, &style);
    }
    state.particles.draw(&mut out, &style);

    out
}
