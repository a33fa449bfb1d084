//! Collision resolution
//!
//! Runs once per frame after everything has moved. Scans are in insertion
//! order and take the first overlap, not the nearest one.

use super::entity::Entity;
use super::geometry::rect_overlap;
use super::hooks::{AudioSink, SessionListener, SoundEffect};
use super::particles::BurstColor;
use super::projectile::Owner;
use super::state::{GamePhase, GameState, SessionTimer};
use crate::consts::*;

/// Particles knocked off the boss per hit
const SPARK_BURST: usize = 4;

/// Resolve every collision for this frame
pub fn resolve(
    state: &mut GameState,
    audio: &mut dyn AudioSink,
    listener: &mut dyn SessionListener,
) {
    player_shots_vs_enemies(state, audio, listener);
    player_shots_vs_boss(state, audio, listener);

    // At most one player hit per frame: each check below requires the
    // player to still be active.
    if state.player.active {
        enemy_bodies_vs_player(state, audio, listener);
    }
    if state.player.active && state.phase == GamePhase::Playing {
        enemy_shots_vs_player(state, audio, listener);
    }
}

fn award(state: &mut GameState, points: u64, listener: &mut dyn SessionListener) {
    state.score += points;
    listener.score_changed(state.score);
}

/// Each player shot destroys at most one enemy
fn player_shots_vs_enemies(
    state: &mut GameState,
    audio: &mut dyn AudioSink,
    listener: &mut dyn SessionListener,
) {
    for i in 0..state.projectiles.len() {
        let shot = &state.projectiles[i];
        if !shot.active || shot.owner != Owner::Player {
            continue;
        }
        let shot_box = shot.bounds();

        let Some(hit) = state
            .swarm
            .enemies
            .iter()
            .position(|e| e.active && rect_overlap(&shot_box, &e.bounds()))
        else {
            continue;
        };

        state.projectiles[i].active = false;
        let enemy = &mut state.swarm.enemies[hit];
        enemy.active = false;
        let points = if enemy.is_diving() {
            state.tuning.dive_kill_points
        } else {
            state.tuning.grid_kill_points
        };
        let at = enemy.pos;

        state
            .particles
            .explode(at, BurstColor::Enemy, SMALL_BURST, &mut state.rng);
        audio.play(SoundEffect::Explosion);
        award(state, points, listener);
    }
}

fn player_shots_vs_boss(
    state: &mut GameState,
    audio: &mut dyn AudioSink,
    listener: &mut dyn SessionListener,
) {
    for i in 0..state.projectiles.len() {
        let Some(boss) = state.swarm.boss.as_mut().filter(|b| b.active) else {
            return;
        };
        let shot = &mut state.projectiles[i];
        if !shot.active || shot.owner != Owner::Player {
            continue;
        }
        if !rect_overlap(&shot.bounds(), &boss.bounds()) {
            continue;
        }

        shot.active = false;
        let spark_at = shot.pos;
        let defeated = boss.take_damage(PLAYER_BULLET_DAMAGE);
        let center = boss.bounds().center();

        state
            .particles
            .explode(spark_at, BurstColor::Spark, SPARK_BURST, &mut state.rng);
        if defeated {
            state
                .particles
                .explode(center, BurstColor::Boss, LARGE_BURST, &mut state.rng);
            audio.play(SoundEffect::Explosion);
            log::info!("Boss destroyed on wave {}", state.wave);
            let points = state.tuning.boss_points;
            award(state, points, listener);
        } else {
            audio.play(SoundEffect::BossHit);
        }
    }
}

fn enemy_bodies_vs_player(
    state: &mut GameState,
    audio: &mut dyn AudioSink,
    listener: &mut dyn SessionListener,
) {
    let player_box = state.player.bounds();
    if let Some(hit) = state
        .swarm
        .enemies
        .iter()
        .position(|e| e.active && rect_overlap(&player_box, &e.bounds()))
    {
        state.swarm.enemies[hit].active = false;
        player_hit(state, audio, listener);
    }
}

fn enemy_shots_vs_player(
    state: &mut GameState,
    audio: &mut dyn AudioSink,
    listener: &mut dyn SessionListener,
) {
    let player_box = state.player.bounds();
    if let Some(hit) = state.projectiles.iter().position(|p| {
        p.active && p.owner == Owner::Enemy && rect_overlap(&player_box, &p.bounds())
    }) {
        state.projectiles[hit].active = false;
        player_hit(state, audio, listener);
    }
}

/// Lose a life; respawn later or end the run
pub(crate) fn player_hit(
    state: &mut GameState,
    audio: &mut dyn AudioSink,
    listener: &mut dyn SessionListener,
) {
    state.lives = state.lives.saturating_sub(1);
    listener.lives_changed(state.lives);
    state.player.active = false;

    let at = state.player.bounds().center();
    state
        .particles
        .explode(at, BurstColor::Player, LARGE_BURST, &mut state.rng);
    audio.play(SoundEffect::Explosion);

    if state.lives > 0 {
        log::debug!("Player hit, {} lives left", state.lives);
        state
            .timers
            .schedule(state.tuning.respawn_delay, SessionTimer::RespawnPlayer);
    } else {
        state.phase = GamePhase::GameOver;
        state.timers.cancel_all();
        log::info!("Game over: score {} on wave {}", state.score, state.wave);
        audio.play(SoundEffect::GameOver);
        listener.game_over(state.score);
    }
}
