//! The player's ship

use glam::Vec2;

use super::entity::Entity;
use super::geometry::{Rect, lerp};
use super::hooks::{AudioSink, SoundEffect};
use super::projectile::{Owner, Projectile};
use super::tick::TickInput;
use crate::centered_x;
use crate::consts::*;
use crate::tuning::Tuning;

#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    pub size: Vec2,
    /// Horizontal velocity (eased toward the input target)
    pub vel_x: f32,
    /// False while waiting to respawn
    pub active: bool,
    cooldown: f32,
    max_speed: f32,
    accel: f32,
    fire_interval: f32,
    bullet_speed: f32,
}

impl Player {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(centered_x(PLAYER_SIZE), PLAYER_Y),
            size: Vec2::splat(PLAYER_SIZE),
            vel_x: 0.0,
            active: true,
            cooldown: 0.0,
            max_speed: tuning.player_speed,
            accel: tuning.player_accel,
            fire_interval: tuning.player_cooldown,
            bullet_speed: tuning.projectile_speed,
        }
    }

    /// Remaining time before the next shot is allowed
    pub fn cooldown(&self) -> f32 {
        self.cooldown
    }

    /// Move and maybe fire. Returns at most one new projectile.
    pub fn update(
        &mut self,
        dt: f32,
        input: &TickInput,
        audio: &mut dyn AudioSink,
    ) -> Option<Projectile> {
        if !self.active {
            return None;
        }

        // Right wins when both are held
        let mut dir = 0.0;
        if input.left {
            dir = -1.0;
        }
        if input.right {
            dir = 1.0;
        }

        let target_speed = dir * self.max_speed;
        self.vel_x = lerp(self.vel_x, target_speed, self.accel * dt);
        self.pos.x += self.vel_x * dt;

        let max_x = CANVAS_WIDTH - self.size.x;
        if self.pos.x < 0.0 {
            self.pos.x = 0.0;
            self.vel_x = 0.0;
        }
        if self.pos.x > max_x {
            self.pos.x = max_x;
            self.vel_x = 0.0;
        }

        self.cooldown -= dt;
        if input.fire && self.cooldown <= 0.0 {
            self.cooldown = self.fire_interval;
            audio.play(SoundEffect::Shoot);
            return Some(Projectile::new(
                self.nose_x() - PROJECTILE_SIZE / 2.0,
                self.pos.y,
                Owner::Player,
                self.bullet_speed,
            ));
        }

        None
    }

    /// Horizontal center of the ship
    pub fn nose_x(&self) -> f32 {
        self.pos.x + self.size.x / 2.0
    }

    /// Re-center, stop and reactivate
    pub fn reset(&mut self) {
        self.pos.x = centered_x(self.size.x);
        self.vel_x = 0.0;
        self.cooldown = 0.0;
        self.active = true;
    }
}

impl Entity for Player {
    fn is_active(&self) -> bool {
        self.active
    }

    fn bounds(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size).inset(PLAYER_HITBOX_INSET)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::hooks::NullAudio;
    use crate::sim::hooks::recording::RecordingAudio;
    use proptest::prelude::*;

    fn held(left: bool, right: bool, fire: bool) -> TickInput {
        TickInput {
            left,
            right,
            fire,
            ..Default::default()
        }
    }

    #[test]
    fn test_inertia() {
        let mut player = Player::new(&Tuning::default());
        let start = player.pos.x;
        player.update(0.016, &held(false, true, false), &mut NullAudio);
        // Eased, not instantaneous
        assert!(player.vel_x > 0.0 && player.vel_x < PLAYER_SPEED);
        assert!(player.pos.x > start);
    }

    #[test]
    fn test_right_overrides_left() {
        let mut player = Player::new(&Tuning::default());
        player.update(0.016, &held(true, true, false), &mut NullAudio);
        assert!(player.vel_x > 0.0);
    }

    #[test]
    fn test_clamp_zeroes_velocity() {
        let mut player = Player::new(&Tuning::default());
        for _ in 0..200 {
            player.update(0.05, &held(true, false, false), &mut NullAudio);
        }
        assert_eq!(player.pos.x, 0.0);
        assert_eq!(player.vel_x, 0.0);
    }

    #[test]
    fn test_fire_respects_cooldown() {
        let mut player = Player::new(&Tuning::default());
        let mut audio = RecordingAudio::default();
        let fire = held(false, false, true);

        let shot = player.update(0.016, &fire, &mut audio).expect("first shot");
        assert_eq!(shot.owner, Owner::Player);
        assert!(shot.vel.y < 0.0);
        assert!((shot.pos.x + PROJECTILE_SIZE / 2.0 - player.nose_x()).abs() < 1e-4);

        // Still cooling down
        assert!(player.update(0.016, &fire, &mut audio).is_none());

        // After the interval a new shot is allowed
        assert!(player.update(PLAYER_COOLDOWN, &fire, &mut audio).is_some());
        assert_eq!(audio.count(SoundEffect::Shoot), 2);
    }

    #[test]
    fn test_inactive_player_does_nothing() {
        let mut player = Player::new(&Tuning::default());
        player.active = false;
        let x = player.pos.x;
        assert!(player.update(0.1, &held(false, true, true), &mut NullAudio).is_none());
        assert_eq!(player.pos.x, x);
    }

    #[test]
    fn test_reset() {
        let mut player = Player::new(&Tuning::default());
        player.update(0.5, &held(true, false, true), &mut NullAudio);
        player.active = false;
        player.reset();
        assert!(player.active);
        assert_eq!(player.vel_x, 0.0);
        assert_eq!(player.cooldown(), 0.0);
        assert_eq!(player.pos.x, centered_x(PLAYER_SIZE));
    }

    #[test]
    fn test_hitbox_is_inset() {
        let player = Player::new(&Tuning::default());
        let b = player.bounds();
        assert_eq!(b.x, player.pos.x + PLAYER_HITBOX_INSET);
        assert_eq!(b.width, PLAYER_SIZE - 2.0 * PLAYER_HITBOX_INSET);
    }

    proptest! {
        #[test]
        fn prop_position_always_clamped(
            steps in prop::collection::vec((any::<bool>(), any::<bool>(), 0.0f32..0.1), 1..200)
        ) {
            let mut player = Player::new(&Tuning::default());
            for (left, right, dt) in steps {
                player.update(dt, &held(left, right, false), &mut NullAudio);
                prop_assert!(player.pos.x >= 0.0);
                prop_assert!(player.pos.x <= CANVAS_WIDTH - PLAYER_SIZE);
            }
        }
    }
}
