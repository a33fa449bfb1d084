//! Per-frame simulation step
//!
//! Advances the whole session by one variable timestep in a fixed order.
//! Everything here is synchronous; a frame is fully resolved before the
//! renderer sees it.

use super::autopilot;
use super::collision;
use super::hooks::{AudioSink, SessionListener, SoundEffect};
use super::state::{GamePhase, GameState, SessionTimer};
use crate::consts::*;

/// Input commands for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Move left held
    pub left: bool,
    /// Move right held
    pub right: bool,
    /// Fire held
    pub fire: bool,
    /// Pause toggle (edge, not level)
    pub pause: bool,
    /// Demo mode - the autopilot flies the ship
    pub autopilot: bool,
}

/// Begin a new run from the menu or the game-over screen. Does nothing if a
/// run is already in progress.
pub fn start_session(
    state: &mut GameState,
    audio: &mut dyn AudioSink,
    listener: &mut dyn SessionListener,
) {
    if matches!(state.phase, GamePhase::Playing | GamePhase::Paused) {
        return;
    }

    state.reset();
    state.phase = GamePhase::Playing;
    log::info!("Session started (seed {})", state.seed);

    listener.score_changed(state.score);
    listener.lives_changed(state.lives);
    listener.wave_changed(state.wave);
    audio.play(SoundEffect::WaveStart);
}

/// Advance the game state by `dt` seconds
pub fn tick(
    state: &mut GameState,
    input: &TickInput,
    dt: f32,
    audio: &mut dyn AudioSink,
    listener: &mut dyn SessionListener,
) {
    // Handle pause toggle
    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                log::debug!("Paused");
                return;
            }
            GamePhase::Paused => {
                state.phase = GamePhase::Playing;
                log::debug!("Resumed");
            }
            _ => {}
        }
    }

    if state.phase != GamePhase::Playing {
        return;
    }

    let dt = dt.clamp(0.0, MAX_FRAME_DT);
    state.time += dt;

    let mut input = input.clone();
    if input.autopilot {
        autopilot::steer(state, &mut input);
    }
    let input = &input;

    // Background decoration
    state.starfield.update(dt, &mut state.rng);
    state.particles.update(dt);

    // Delayed session events
    for timer in state.timers.advance(dt) {
        match timer {
            SessionTimer::RespawnPlayer => {
                state.player.reset();
                log::debug!("Player respawned");
            }
        }
    }

    // Player
    if let Some(shot) = state.player.update(dt, input, audio) {
        state.projectiles.push(shot);
    }

    // Swarm, aiming at a snapshot of the player
    let target = state.player_target();
    let shots = state
        .swarm
        .update(dt, state.time, target, &mut state.rng, audio);
    state.projectiles.extend(shots);

    // Wave clear
    if state.swarm.is_empty() {
        state.wave += 1;
        state.swarm.start_wave(state.wave, &mut state.rng);
        listener.wave_changed(state.wave);
        audio.play(SoundEffect::WaveStart);
    }

    // Projectiles
    for projectile in &mut state.projectiles {
        projectile.update(dt);
    }
    state.projectiles.retain(|p| p.active);

    collision::resolve(state, audio, listener);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::hooks::recording::{RecordingAudio, RecordingListener, SessionEvent};
    use crate::sim::hooks::{NullAudio, NullListener};
    use crate::sim::projectile::{Owner, Projectile};
    use crate::sim::swarm::Swarm;
    use crate::tuning::Tuning;

    const DT: f32 = 1.0 / 60.0;

    fn started(seed: u64) -> GameState {
        let mut state = GameState::new(seed, Tuning::default(), 500);
        start_session(&mut state, &mut NullAudio, &mut NullListener);
        state
    }

    /// Enemy shot sitting on the ship
    fn shot_on_player(state: &GameState) -> Projectile {
        let c = state.player_target();
        Projectile::new(c.x, c.y, Owner::Enemy, 0.0)
    }

    #[test]
    fn test_start_session_notifies() {
        let mut state = GameState::new(1, Tuning::default(), 500);
        let mut audio = RecordingAudio::default();
        let mut listener = RecordingListener::default();
        start_session(&mut state, &mut audio, &mut listener);

        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(
            listener.events,
            vec![
                SessionEvent::Score(0),
                SessionEvent::Lives(STARTING_LIVES),
                SessionEvent::Wave(1),
            ]
        );
        assert_eq!(audio.count(SoundEffect::WaveStart), 1);

        // Starting again mid-run is ignored
        start_session(&mut state, &mut audio, &mut listener);
        assert_eq!(listener.events.len(), 3);
    }

    #[test]
    fn test_menu_does_not_tick() {
        let mut state = GameState::new(1, Tuning::default(), 500);
        let input = TickInput {
            left: true,
            ..Default::default()
        };
        tick(&mut state, &input, DT, &mut NullAudio, &mut NullListener);
        assert_eq!(state.time, 0.0);
        assert_eq!(state.phase, GamePhase::Menu);
    }

    #[test]
    fn test_tick_pause() {
        let mut state = started(12345);
        let pause = TickInput {
            pause: true,
            ..Default::default()
        };

        tick(&mut state, &pause, DT, &mut NullAudio, &mut NullListener);
        assert_eq!(state.phase, GamePhase::Paused);

        let frozen = state.player.pos;
        let hold_left = TickInput {
            left: true,
            ..Default::default()
        };
        tick(&mut state, &hold_left, DT, &mut NullAudio, &mut NullListener);
        assert_eq!(state.player.pos, frozen);

        tick(&mut state, &pause, DT, &mut NullAudio, &mut NullListener);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_dt_is_clamped() {
        let mut state = started(1);
        tick(&mut state, &TickInput::default(), 5.0, &mut NullAudio, &mut NullListener);
        assert!((state.time - MAX_FRAME_DT).abs() < 1e-6);
    }

    #[test]
    fn test_fire_spawns_projectile() {
        let mut state = started(1);
        let fire = TickInput {
            fire: true,
            ..Default::default()
        };
        let mut audio = RecordingAudio::default();
        tick(&mut state, &fire, DT, &mut audio, &mut NullListener);
        assert!(
            state
                .projectiles
                .iter()
                .any(|p| p.owner == Owner::Player && p.active)
        );
        assert_eq!(audio.count(SoundEffect::Shoot), 1);
    }

    #[test]
    fn test_last_life_ends_session() {
        let mut state = started(7);
        state.lives = 1;
        state.score = 4200;
        state.projectiles.push(shot_on_player(&state));

        let mut audio = RecordingAudio::default();
        let mut listener = RecordingListener::default();
        tick(&mut state, &TickInput::default(), DT, &mut audio, &mut listener);

        assert_eq!(state.lives, 0);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(listener.game_overs(), vec![4200]);
        assert_eq!(audio.count(SoundEffect::GameOver), 1);
        assert!(state.timers.is_empty());

        // Nothing moves after game over
        let time = state.time;
        let enemies: Vec<_> = state.swarm.enemies.iter().map(|e| e.pos).collect();
        let events = listener.events.len();
        for _ in 0..120 {
            tick(&mut state, &TickInput::default(), DT, &mut audio, &mut listener);
        }
        assert_eq!(state.time, time);
        assert_eq!(
            state.swarm.enemies.iter().map(|e| e.pos).collect::<Vec<_>>(),
            enemies
        );
        assert_eq!(listener.events.len(), events);
    }

    #[test]
    fn test_respawn_after_delay() {
        let mut state = started(7);
        state.projectiles.push(shot_on_player(&state));
        tick(&mut state, &TickInput::default(), DT, &mut NullAudio, &mut NullListener);
        assert!(!state.player.active);
        assert_eq!(state.lives, STARTING_LIVES - 1);

        // Keep enemy fire away while waiting
        let frames = (RESPAWN_DELAY / DT) as usize + 2;
        for _ in 0..frames {
            state.projectiles.retain(|p| p.owner == Owner::Player);
            tick(&mut state, &TickInput::default(), DT, &mut NullAudio, &mut NullListener);
        }
        assert!(state.player.active);
    }

    #[test]
    fn test_restart_cancels_pending_respawn() {
        let mut state = started(7);
        state.projectiles.push(shot_on_player(&state));
        tick(&mut state, &TickInput::default(), DT, &mut NullAudio, &mut NullListener);
        assert_eq!(state.timers.len(), 1);

        // Force the run over, then start a new one
        state.phase = GamePhase::GameOver;
        start_session(&mut state, &mut NullAudio, &mut NullListener);
        assert!(state.timers.is_empty());
        assert!(state.player.active);
    }

    #[test]
    fn test_wave_advances_when_cleared() {
        let mut state = started(3);
        state.swarm = Swarm::new(&state.tuning);
        state.wave = 1;

        let mut listener = RecordingListener::default();
        tick(&mut state, &TickInput::default(), DT, &mut NullAudio, &mut listener);
        assert_eq!(state.wave, 2);
        assert_eq!(state.swarm.wave, 2);
        assert!(listener.events.contains(&SessionEvent::Wave(2)));
    }

    #[test]
    fn test_boss_wave_holds_until_defeated() {
        let mut state = started(3);
        state.wave = BOSS_WAVE_INTERVAL;
        state.swarm.start_wave(BOSS_WAVE_INTERVAL, &mut state.rng);

        tick(&mut state, &TickInput::default(), DT, &mut NullAudio, &mut NullListener);
        assert_eq!(state.wave, BOSS_WAVE_INTERVAL);
        assert!(state.swarm.enemies.is_empty());

        if let Some(boss) = &mut state.swarm.boss {
            boss.take_damage(BOSS_HP);
        }
        tick(&mut state, &TickInput::default(), DT, &mut NullAudio, &mut NullListener);
        assert_eq!(state.wave, BOSS_WAVE_INTERVAL + 1);
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut state1 = started(99999);
        let mut state2 = started(99999);

        let input = TickInput {
            autopilot: true,
            ..Default::default()
        };
        for _ in 0..600 {
            tick(&mut state1, &input, DT, &mut NullAudio, &mut NullListener);
            tick(&mut state2, &input, DT, &mut NullAudio, &mut NullListener);
        }

        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.lives, state2.lives);
        assert_eq!(state1.swarm.enemies.len(), state2.swarm.enemies.len());
        assert_eq!(state1.projectiles.len(), state2.projectiles.len());
        assert_eq!(state1.player.pos, state2.player.pos);
    }
}
