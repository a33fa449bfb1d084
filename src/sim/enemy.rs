//! Formation enemies
//!
//! Each enemy flies in along a quadratic Bezier, hovers in its grid slot,
//! and dives at the player when the swarm tells it to. A dive that misses
//! wraps around to the top and flies back in to the same slot.

use glam::Vec2;
use rand::Rng;

use super::entity::Entity;
use super::geometry::{Rect, bezier, lerp};
use super::hooks::{AudioSink, SoundEffect};
use crate::consts::*;
use crate::tuning::Tuning;

/// How far past the bottom edge a diver must travel before it wraps
const MISS_MARGIN: f32 = 50.0;
/// Spawn points just outside the field
const OFFSCREEN: f32 = 50.0;

/// Entrance path, evaluated only while entering
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntryPath {
    pub p0: Vec2,
    pub p1: Vec2,
    pub p2: Vec2,
    /// Parametric progress, 0..=1
    pub t: f32,
}

impl EntryPath {
    /// First entrance: from one side, swooping through the lower middle
    fn from_side(from_left: bool, slot: Vec2) -> Self {
        let start_x = if from_left {
            -OFFSCREEN
        } else {
            CANVAS_WIDTH + OFFSCREEN
        };
        Self {
            p0: Vec2::new(start_x, 100.0),
            p1: Vec2::new(CANVAS_WIDTH / 2.0, 400.0),
            p2: slot,
            t: 0.0,
        }
    }

    /// Re-entrance after a missed dive: straight back in from above
    fn from_top(x: f32, slot: Vec2) -> Self {
        Self {
            p0: Vec2::new(x, -OFFSCREEN),
            p1: Vec2::new(CANVAS_WIDTH / 2.0, 0.0),
            p2: slot,
            t: 0.0,
        }
    }

    fn point(&self) -> Vec2 {
        bezier(self.p0, self.p1, self.p2, self.t)
    }
}

/// Enemy lifecycle. Wrapping from `Diving` back to `Entering` is normal;
/// enemies only leave play by being destroyed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EnemyState {
    Entering { path: EntryPath },
    Grid,
    Diving,
}

#[derive(Debug, Clone)]
pub struct Enemy {
    pub pos: Vec2,
    pub size: Vec2,
    pub active: bool,
    /// Formation slot this enemy returns to
    pub grid_pos: Vec2,
    pub state: EnemyState,
    /// Per-enemy hover phase so the formation doesn't bob in lockstep
    pub phase: f32,
    entry_rate: f32,
    dive_speed: f32,
}

impl Enemy {
    pub fn new(grid_pos: Vec2, rng: &mut impl Rng, tuning: &Tuning) -> Self {
        let phase = rng.random::<f32>() * std::f32::consts::TAU;
        let from_left = rng.random_bool(0.5);
        let path = EntryPath::from_side(from_left, grid_pos);
        Self {
            pos: path.p0,
            size: Vec2::splat(ENEMY_SIZE),
            active: true,
            grid_pos,
            state: EnemyState::Entering { path },
            phase,
            entry_rate: tuning.enemy_entry_rate,
            dive_speed: tuning.enemy_dive_speed,
        }
    }

    pub fn is_diving(&self) -> bool {
        self.state == EnemyState::Diving
    }

    pub fn in_grid(&self) -> bool {
        self.state == EnemyState::Grid
    }

    /// Advance one frame. `target` is where the player is this frame and
    /// `time` the session clock used for hovering.
    pub fn update(&mut self, dt: f32, target: Vec2, time: f32) {
        if !self.active {
            return;
        }

        match self.state {
            EnemyState::Entering { mut path } => {
                path.t += dt * self.entry_rate;
                if path.t >= 1.0 {
                    path.t = 1.0;
                    self.pos = path.point();
                    self.state = EnemyState::Grid;
                } else {
                    self.pos = path.point();
                    self.state = EnemyState::Entering { path };
                }
            }

            EnemyState::Grid => {
                let hover_x = (time * 2.0 + self.phase).sin() * 10.0;
                let hover_y = (time * 1.5 + self.phase).cos() * 5.0;
                self.pos.x = lerp(self.pos.x, self.grid_pos.x + hover_x, dt * ENEMY_HOVER_EASE);
                self.pos.y = lerp(self.pos.y, self.grid_pos.y + hover_y, dt * ENEMY_HOVER_EASE);
            }

            EnemyState::Diving => {
                // Re-aimed every frame; no movement if already on target
                let center = self.pos + self.size / 2.0;
                let dir = (target - center).normalize_or_zero();
                self.pos += dir * self.dive_speed * dt;

                if self.pos.y > CANVAS_HEIGHT + MISS_MARGIN {
                    self.pos.y = -OFFSCREEN;
                    self.state = EnemyState::Entering {
                        path: EntryPath::from_top(self.pos.x, self.grid_pos),
                    };
                }
            }
        }
    }

    /// Leave formation and attack. Only has an effect from `Grid`.
    pub fn start_dive(&mut self, audio: &mut dyn AudioSink) -> bool {
        if self.state != EnemyState::Grid {
            return false;
        }
        self.state = EnemyState::Diving;
        audio.play(SoundEffect::EnemyDive);
        true
    }
}

impl Entity for Enemy {
    fn is_active(&self) -> bool {
        self.active
    }

    fn bounds(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::hooks::recording::RecordingAudio;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn enemy_at(slot: Vec2) -> Enemy {
        let mut rng = Pcg32::seed_from_u64(7);
        Enemy::new(slot, &mut rng, &Tuning::default())
    }

    /// Step until the entrance finishes (stops on the frame it lands)
    fn settle_into_grid(enemy: &mut Enemy) {
        for _ in 0..100 {
            enemy.update(0.05, Vec2::ZERO, 0.0);
            if enemy.in_grid() {
                return;
            }
        }
        panic!("enemy never reached its slot");
    }

    #[test]
    fn test_starts_offscreen_on_a_side() {
        let enemy = enemy_at(Vec2::new(200.0, 80.0));
        assert!(enemy.pos.x < 0.0 || enemy.pos.x > CANVAS_WIDTH);
        assert!(matches!(enemy.state, EnemyState::Entering { .. }));
    }

    #[test]
    fn test_entering_reaches_slot_exactly_once() {
        let slot = Vec2::new(200.0, 80.0);
        let mut enemy = enemy_at(slot);

        let mut transitions = 0;
        let mut was_entering = true;
        for _ in 0..60 {
            enemy.update(0.05, Vec2::ZERO, 0.0);
            let entering = matches!(enemy.state, EnemyState::Entering { .. });
            if was_entering && !entering {
                transitions += 1;
                // Lands on the path endpoint
                assert_eq!(enemy.pos, slot);
            }
            was_entering = entering;
        }
        assert_eq!(transitions, 1);
        assert!(enemy.in_grid());
    }

    #[test]
    fn test_grid_hovers_near_slot() {
        let slot = Vec2::new(200.0, 80.0);
        let mut enemy = enemy_at(slot);
        settle_into_grid(&mut enemy);
        for i in 0..200 {
            enemy.update(0.016, Vec2::ZERO, i as f32 * 0.016);
            assert!((enemy.pos.x - slot.x).abs() <= 10.5);
            assert!((enemy.pos.y - slot.y).abs() <= 5.5);
        }
    }

    #[test]
    fn test_start_dive_only_from_grid() {
        let mut audio = RecordingAudio::default();
        let mut enemy = enemy_at(Vec2::new(200.0, 80.0));

        assert!(!enemy.start_dive(&mut audio));
        assert!(audio.played.is_empty());

        settle_into_grid(&mut enemy);
        assert!(enemy.start_dive(&mut audio));
        assert!(enemy.is_diving());

        // Already diving: no-op, no second sound
        assert!(!enemy.start_dive(&mut audio));
        assert_eq!(audio.count(SoundEffect::EnemyDive), 1);
    }

    #[test]
    fn test_dive_homes_on_target() {
        let mut enemy = enemy_at(Vec2::new(200.0, 80.0));
        settle_into_grid(&mut enemy);
        enemy.start_dive(&mut RecordingAudio::default());

        let target = Vec2::new(500.0, 700.0);
        let before = (enemy.pos + enemy.size / 2.0).distance(target);
        enemy.update(0.1, target, 0.0);
        let after = (enemy.pos + enemy.size / 2.0).distance(target);
        assert!((before - after - ENEMY_DIVE_SPEED * 0.1).abs() < 0.01);
    }

    #[test]
    fn test_dive_on_target_does_not_move() {
        let mut enemy = enemy_at(Vec2::new(200.0, 80.0));
        settle_into_grid(&mut enemy);
        enemy.start_dive(&mut RecordingAudio::default());
        let center = enemy.pos + enemy.size / 2.0;
        let pos = enemy.pos;
        enemy.update(0.1, center, 0.0);
        assert_eq!(enemy.pos, pos);
    }

    #[test]
    fn test_missed_dive_wraps_and_reenters() {
        let slot = Vec2::new(200.0, 80.0);
        let mut enemy = enemy_at(slot);
        settle_into_grid(&mut enemy);
        enemy.start_dive(&mut RecordingAudio::default());

        // Target far below the field so the dive overshoots
        let target = Vec2::new(enemy.pos.x, CANVAS_HEIGHT * 4.0);
        for _ in 0..200 {
            enemy.update(0.05, target, 0.0);
            if !enemy.is_diving() {
                break;
            }
        }

        assert!(enemy.active, "a missed dive never destroys the enemy");
        match enemy.state {
            EnemyState::Entering { path } => {
                assert_eq!(path.t, 0.0);
                assert_eq!(path.p0.y, -OFFSCREEN);
                assert_eq!(path.p2, slot);
            }
            other => panic!("expected re-entry, got {other:?}"),
        }
        assert_eq!(enemy.pos.y, -OFFSCREEN);

        // And it makes it home again
        settle_into_grid(&mut enemy);
        assert_eq!(enemy.pos, slot);
    }
}
