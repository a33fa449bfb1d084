//! Frame driver
//!
//! Owns one session plus the collaborators it reports to. The platform
//! layer feeds it timestamps and input edges; everything else happens
//! inside [`crate::sim::tick`].

use crate::platform::{FrameClock, InputState};
use crate::settings::Settings;
use crate::sim::{
    AudioSink, GamePhase, GameState, SessionListener, TickInput, start_session, tick,
};
use crate::tuning::Tuning;

pub struct Engine<A: AudioSink, L: SessionListener> {
    state: GameState,
    input: InputState,
    clock: FrameClock,
    audio: A,
    listener: L,
    autopilot: bool,
}

impl<A: AudioSink, L: SessionListener> Engine<A, L> {
    pub fn new(seed: u64, tuning: Tuning, settings: &Settings, audio: A, listener: L) -> Self {
        Self {
            state: GameState::new(seed, tuning, settings.max_particles()),
            input: InputState::new(),
            clock: FrameClock::new(),
            audio,
            listener,
            autopilot: false,
        }
    }

    /// Start a run (from the menu or after game over)
    pub fn start(&mut self) {
        start_session(&mut self.state, &mut self.audio, &mut self.listener);
        self.input.release_all();
        self.clock.reset();
    }

    /// Advance one display frame. `now_ms` is the refresh timestamp.
    /// Returns the step actually simulated.
    pub fn frame(&mut self, now_ms: f64) -> f32 {
        let dt = self.clock.tick(now_ms);
        self.step(dt);
        dt
    }

    /// Advance by an explicit step (headless runs, tests)
    pub fn step(&mut self, dt: f32) {
        let input = self.input.take_tick_input(self.autopilot);
        self.step_with(&input, dt);
    }

    fn step_with(&mut self, input: &TickInput, dt: f32) {
        tick(
            &mut self.state,
            input,
            dt,
            &mut self.audio,
            &mut self.listener,
        );
    }

    /// Toggle pause on the next frame
    pub fn toggle_pause(&mut self) {
        self.input.request_pause();
    }

    /// Pause if a run is in progress. Used on focus and visibility loss.
    pub fn auto_pause(&mut self) -> bool {
        if self.state.phase == GamePhase::Playing {
            self.input.request_pause();
            true
        } else {
            false
        }
    }

    pub fn autopilot(&self) -> bool {
        self.autopilot
    }

    pub fn set_autopilot(&mut self, on: bool) {
        if on != self.autopilot {
            log::info!("Autopilot: {}", on);
        }
        self.autopilot = on;
    }

    pub fn toggle_autopilot(&mut self) {
        self.set_autopilot(!self.autopilot);
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn input_mut(&mut self) -> &mut InputState {
        &mut self.input
    }

    pub fn audio_mut(&mut self) -> &mut A {
        &mut self.audio
    }

    pub fn listener(&self) -> &L {
        &self.listener
    }

    pub fn fps(&self) -> u32 {
        self.clock.fps()
    }
}
