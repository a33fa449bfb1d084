//! Boss encounter
//!
//! Glides in from above, then patrols a figure-8 and alternates between a
//! three-way spread and a shot aimed at the player.

use glam::Vec2;
use rand::Rng;

use super::entity::Entity;
use super::geometry::{Rect, lerp};
use super::hooks::{AudioSink, SoundEffect};
use super::projectile::{Owner, Projectile};
use crate::centered_x;
use crate::consts::*;
use crate::tuning::Tuning;

/// Spread volley angles (radians from straight down)
const SPREAD_ANGLES: [f32; 3] = [-0.3, 0.0, 0.3];
/// Entrance easing rate
const ENTRANCE_EASE: f32 = 2.0;
/// Snap distance that ends the entrance glide
const ARRIVAL_EPSILON: f32 = 0.5;
/// Figure-8 patrol: horizontal and vertical frequencies and vertical amplitude
const PATROL_FREQ_X: f32 = 0.8;
const PATROL_FREQ_Y: f32 = 1.5;
const PATROL_AMP_Y: f32 = 30.0;

#[derive(Debug, Clone)]
pub struct Boss {
    pub pos: Vec2,
    pub size: Vec2,
    pub active: bool,
    pub hp: i32,
    pub max_hp: i32,
    /// Seconds until the next volley
    pub attack_timer: f32,
    /// Cosmetic flash after a hit
    pub hit_flash: f32,
    /// True once the entrance glide is done and the patrol has begun
    pub arrived: bool,
    patrol_clock: f32,
    attack_cooldown: f32,
    bullet_speed: f32,
}

impl Boss {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(centered_x(BOSS_SIZE), -100.0),
            size: Vec2::splat(BOSS_SIZE),
            active: true,
            hp: tuning.boss_hp,
            max_hp: tuning.boss_hp,
            attack_timer: 0.0,
            hit_flash: 0.0,
            arrived: false,
            patrol_clock: 0.0,
            attack_cooldown: tuning.boss_attack_cooldown,
            bullet_speed: tuning.projectile_speed,
        }
    }

    /// Fraction of health left (0..=1)
    pub fn health_ratio(&self) -> f32 {
        (self.hp.max(0) as f32 / self.max_hp as f32).clamp(0.0, 1.0)
    }

    /// Move, maybe attack. Returns any projectiles fired this frame.
    pub fn update(
        &mut self,
        dt: f32,
        target: Vec2,
        rng: &mut impl Rng,
        audio: &mut dyn AudioSink,
    ) -> Vec<Projectile> {
        if !self.active {
            return Vec::new();
        }

        self.hit_flash = (self.hit_flash - dt).max(0.0);

        if !self.arrived {
            self.pos.y = lerp(self.pos.y, BOSS_ALTITUDE, dt * ENTRANCE_EASE);
            if BOSS_ALTITUDE - self.pos.y <= ARRIVAL_EPSILON {
                self.pos.y = BOSS_ALTITUDE;
                self.arrived = true;
            }
        } else {
            self.patrol_clock += dt;
            let t = self.patrol_clock;
            self.pos.x =
                centered_x(self.size.x) + (t * PATROL_FREQ_X).sin() * (CANVAS_WIDTH / 3.0);
            self.pos.y = BOSS_ALTITUDE + (t * PATROL_FREQ_Y).sin() * PATROL_AMP_Y;
        }

        self.attack_timer -= dt;
        if self.attack_timer > 0.0 || self.pos.y < BOSS_ATTACK_ALTITUDE {
            return Vec::new();
        }
        self.attack_timer = self.attack_cooldown;

        let volley = if rng.random_bool(0.5) {
            self.fire_spread()
        } else {
            vec![self.fire_aimed(target)]
        };
        audio.play(SoundEffect::Shoot);
        volley
    }

    /// Bottom-center of the hull where shots appear
    pub fn muzzle(&self) -> Vec2 {
        Vec2::new(self.pos.x + self.size.x / 2.0, self.pos.y + self.size.y)
    }

    /// Three downward shots fanned out horizontally
    pub fn fire_spread(&self) -> Vec<Projectile> {
        let muzzle = self.muzzle();
        SPREAD_ANGLES
            .iter()
            .map(|angle| {
                let vel = Vec2::new(angle.sin() * BOSS_SPREAD_SPEED, self.bullet_speed);
                Projectile::with_velocity(
                    muzzle.x - PROJECTILE_SIZE / 2.0,
                    muzzle.y,
                    Owner::Enemy,
                    vel,
                )
            })
            .collect()
    }

    /// One shot toward `target`; straight down if the target is the muzzle
    pub fn fire_aimed(&self, target: Vec2) -> Projectile {
        let muzzle = self.muzzle();
        let dir = (target - muzzle).try_normalize().unwrap_or(Vec2::Y);
        Projectile::with_velocity(
            muzzle.x - PROJECTILE_SIZE / 2.0,
            muzzle.y,
            Owner::Enemy,
            dir * BOSS_AIMED_SHOT_SPEED,
        )
    }

    /// Apply damage. Returns true only on the hit that defeats the boss.
    pub fn take_damage(&mut self, amount: i32) -> bool {
        self.hp = self.hp.saturating_sub(amount);
        self.hit_flash = BOSS_HIT_FLASH;
        if self.active && self.hp <= 0 {
            self.active = false;
            return true;
        }
        false
    }
}

impl Entity for Boss {
    fn is_active(&self) -> bool {
        self.active
    }

    /// Hull plus the side wings
    fn bounds(&self) -> Rect {
        Rect::new(
            self.pos.x - BOSS_WING_WIDTH,
            self.pos.y,
            self.size.x + 2.0 * BOSS_WING_WIDTH,
            self.size.y,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::hooks::NullAudio;
    use crate::sim::hooks::recording::RecordingAudio;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_entrance_then_patrol() {
        let mut boss = Boss::new(&Tuning::default());
        let mut rng = Pcg32::seed_from_u64(1);
        assert!(boss.pos.y < 0.0);

        for _ in 0..300 {
            boss.update(0.016, Vec2::new(300.0, 700.0), &mut rng, &mut NullAudio);
            if boss.arrived {
                break;
            }
        }
        assert!(boss.arrived);
        assert_eq!(boss.pos.y, BOSS_ALTITUDE);

        // Patrol stays inside its figure-8 envelope
        for _ in 0..1000 {
            boss.update(0.016, Vec2::new(300.0, 700.0), &mut rng, &mut NullAudio);
            assert!((boss.pos.y - BOSS_ALTITUDE).abs() <= PATROL_AMP_Y + 1e-3);
            let dx = boss.pos.x - centered_x(BOSS_SIZE);
            assert!(dx.abs() <= CANVAS_WIDTH / 3.0 + 1e-3);
        }
    }

    #[test]
    fn test_holds_fire_above_attack_altitude() {
        let mut boss = Boss::new(&Tuning::default());
        let mut rng = Pcg32::seed_from_u64(2);
        let mut audio = RecordingAudio::default();
        let shots = boss.update(0.016, Vec2::new(300.0, 700.0), &mut rng, &mut audio);
        assert!(boss.pos.y < BOSS_ATTACK_ALTITUDE);
        assert!(shots.is_empty());
        assert!(audio.played.is_empty());
    }

    #[test]
    fn test_attack_cooldown_resets() {
        let mut boss = Boss::new(&Tuning::default());
        boss.pos.y = BOSS_ALTITUDE;
        boss.arrived = true;
        let mut rng = Pcg32::seed_from_u64(3);
        let mut audio = RecordingAudio::default();

        let shots = boss.update(0.016, Vec2::new(300.0, 700.0), &mut rng, &mut audio);
        assert!(shots.len() == 1 || shots.len() == 3);
        assert_eq!(boss.attack_timer, BOSS_ATTACK_COOLDOWN);
        assert_eq!(audio.count(SoundEffect::Shoot), 1);

        let shots = boss.update(0.016, Vec2::new(300.0, 700.0), &mut rng, &mut audio);
        assert!(shots.is_empty());
    }

    #[test]
    fn test_spread_shot() {
        let boss = Boss::new(&Tuning::default());
        let shots = boss.fire_spread();
        assert_eq!(shots.len(), 3);
        assert!(shots[0].vel.x < 0.0);
        assert_eq!(shots[1].vel.x, 0.0);
        assert!(shots[2].vel.x > 0.0);
        assert!(shots.iter().all(|p| p.vel.y > 0.0 && p.owner == Owner::Enemy));
    }

    #[test]
    fn test_aimed_shot_points_at_target() {
        let boss = Boss::new(&Tuning::default());
        let target = boss.muzzle() + Vec2::new(300.0, 400.0);
        let shot = boss.fire_aimed(target);
        assert!((shot.vel.length() - BOSS_AIMED_SHOT_SPEED).abs() < 1e-3);
        let expected = Vec2::new(0.6, 0.8) * BOSS_AIMED_SHOT_SPEED;
        assert!((shot.vel - expected).length() < 1e-3);
    }

    #[test]
    fn test_aimed_shot_degenerate_falls_back_down() {
        let boss = Boss::new(&Tuning::default());
        let shot = boss.fire_aimed(boss.muzzle());
        assert_eq!(shot.vel, Vec2::new(0.0, BOSS_AIMED_SHOT_SPEED));
    }

    #[test]
    fn test_hitbox_includes_wings() {
        let boss = Boss::new(&Tuning::default());
        let b = boss.bounds();
        assert_eq!(b.x, boss.pos.x - BOSS_WING_WIDTH);
        assert_eq!(b.width, BOSS_SIZE + 2.0 * BOSS_WING_WIDTH);
    }

    #[test]
    fn test_damage_flash_and_defeat() {
        let mut boss = Boss::new(&Tuning::default());
        assert!(!boss.take_damage(BOSS_HP - 1));
        assert!(boss.active);
        assert_eq!(boss.hit_flash, BOSS_HIT_FLASH);
        assert!(boss.take_damage(1));
        assert!(!boss.active);
        // Later hits don't report a second defeat
        assert!(!boss.take_damage(1));
        assert!(!boss.active);
    }

    proptest! {
        #[test]
        fn prop_hp_monotonic_and_defeat_exact(hits in prop::collection::vec(1i32..10, 1..80)) {
            let mut boss = Boss::new(&Tuning::default());
            let mut total = 0;
            let mut defeats = 0;
            for amount in hits {
                let before = boss.hp;
                if boss.take_damage(amount) {
                    defeats += 1;
                }
                total += amount;
                prop_assert!(boss.hp < before);
                prop_assert_eq!(boss.active, total < BOSS_HP);
            }
            prop_assert!(defeats <= 1);
        }
    }
}
