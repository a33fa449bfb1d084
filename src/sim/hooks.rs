//! Collaborator interfaces the simulation calls out to
//!
//! The simulation never talks to the browser directly. Sound triggers and
//! session notifications go through these traits, injected by the engine,
//! so tests can record them and headless runs can drop them.

/// Sound effect triggers (fire-and-forget)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Player fires, or the boss fires a volley
    Shoot,
    /// Enemy or player destroyed
    Explosion,
    /// Enemy leaves formation
    EnemyDive,
    /// Boss takes a hit without dying
    BossHit,
    /// New wave begins
    WaveStart,
    /// Run ended
    GameOver,
}

/// Receives sound triggers. Implementations must tolerate being called
/// before audio is available and simply do nothing.
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect);
}

/// Session notifications, delivered synchronously as they happen
pub trait SessionListener {
    fn score_changed(&mut self, score: u64);
    fn lives_changed(&mut self, lives: u8);
    fn wave_changed(&mut self, _wave: u32) {}
    fn game_over(&mut self, final_score: u64);
}

/// Audio sink that discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, _effect: SoundEffect) {}
}

/// Listener that ignores every notification
#[derive(Debug, Default, Clone, Copy)]
pub struct NullListener;

impl SessionListener for NullListener {
    fn score_changed(&mut self, _score: u64) {}
    fn lives_changed(&mut self, _lives: u8) {}
    fn game_over(&mut self, _final_score: u64) {}
}

/// Test doubles that remember what they were told
#[cfg(test)]
pub mod recording {
    use super::*;

    #[derive(Debug, Default)]
    pub struct RecordingAudio {
        pub played: Vec<SoundEffect>,
    }

    impl RecordingAudio {
        pub fn count(&self, effect: SoundEffect) -> usize {
            self.played.iter().filter(|e| **e == effect).count()
        }
    }

    impl AudioSink for RecordingAudio {
        fn play(&mut self, effect: SoundEffect) {
            self.played.push(effect);
        }
    }

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum SessionEvent {
        Score(u64),
        Lives(u8),
        Wave(u32),
        GameOver(u64),
    }

    #[derive(Debug, Default)]
    pub struct RecordingListener {
        pub events: Vec<SessionEvent>,
    }

    impl RecordingListener {
        pub fn game_overs(&self) -> Vec<u64> {
            self.events
                .iter()
                .filter_map(|e| match e {
                    SessionEvent::GameOver(s) => Some(*s),
                    _ => None,
                })
                .collect()
        }
    }

    impl SessionListener for RecordingListener {
        fn score_changed(&mut self, score: u64) {
            self.events.push(SessionEvent::Score(score));
        }
        fn lives_changed(&mut self, lives: u8) {
            self.events.push(SessionEvent::Lives(lives));
        }
        fn wave_changed(&mut self, wave: u32) {
            self.events.push(SessionEvent::Wave(wave));
        }
        fn game_over(&mut self, final_score: u64) {
            self.events.push(SessionEvent::GameOver(final_score));
        }
    }
}
