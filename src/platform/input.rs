//! Input state
//!
//! Physical keyboard edges and synthetic presses from on-screen controls
//! land in separate sets; a key counts as held if either set holds it.

use crate::sim::TickInput;

/// Logical keys the simulation reads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalKey {
    Left,
    Right,
    Fire,
}

impl LogicalKey {
    const ALL: [LogicalKey; 3] = [LogicalKey::Left, LogicalKey::Right, LogicalKey::Fire];

    fn index(self) -> usize {
        match self {
            LogicalKey::Left => 0,
            LogicalKey::Right => 1,
            LogicalKey::Fire => 2,
        }
    }

    /// Parse the `data-key` attribute of an on-screen button
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "left" => Some(LogicalKey::Left),
            "right" => Some(LogicalKey::Right),
            "fire" => Some(LogicalKey::Fire),
            _ => None,
        }
    }
}

/// Where a press came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSource {
    Keyboard,
    /// On-screen touch controls
    Virtual,
}

/// What a keyboard key does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Held for as long as the key is down
    Hold(LogicalKey),
    Pause,
    ToggleAutopilot,
    ToggleMute,
    /// Start a run from the menu or game-over screen
    Start,
}

impl KeyAction {
    /// Whether auto-repeated keydowns should reach this action. Toggles
    /// react to the initial press only.
    pub fn accepts_repeat(self) -> bool {
        matches!(self, KeyAction::Hold(_))
    }
}

/// Map a `KeyboardEvent.key` value to an action
pub fn key_action(key: &str) -> Option<KeyAction> {
    match key {
        "ArrowLeft" | "a" | "A" => Some(KeyAction::Hold(LogicalKey::Left)),
        "ArrowRight" | "d" | "D" => Some(KeyAction::Hold(LogicalKey::Right)),
        " " => Some(KeyAction::Hold(LogicalKey::Fire)),
        "Escape" | "p" | "P" => Some(KeyAction::Pause),
        "i" | "I" => Some(KeyAction::ToggleAutopilot),
        "m" | "M" => Some(KeyAction::ToggleMute),
        "Enter" => Some(KeyAction::Start),
        _ => None,
    }
}

#[derive(Debug, Clone, Default)]
pub struct InputState {
    keyboard: [bool; 3],
    touch: [bool; 3],
    pause_requested: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&mut self, source: InputSource, key: LogicalKey) -> &mut bool {
        let held = match source {
            InputSource::Keyboard => &mut self.keyboard,
            InputSource::Virtual => &mut self.touch,
        };
        &mut held[key.index()]
    }

    pub fn press(&mut self, source: InputSource, key: LogicalKey) {
        *self.slot(source, key) = true;
    }

    pub fn release(&mut self, source: InputSource, key: LogicalKey) {
        *self.slot(source, key) = false;
    }

    /// True if any source holds `key`
    pub fn is_pressed(&self, key: LogicalKey) -> bool {
        self.keyboard[key.index()] || self.touch[key.index()]
    }

    /// Drop every held key (focus loss can swallow keyup events)
    pub fn release_all(&mut self) {
        self.keyboard = [false; 3];
        self.touch = [false; 3];
    }

    /// Queue a pause toggle for the next frame
    pub fn request_pause(&mut self) {
        self.pause_requested = true;
    }

    /// Snapshot for one frame. Consumes the pending pause toggle.
    pub fn take_tick_input(&mut self, autopilot: bool) -> TickInput {
        TickInput {
            left: self.is_pressed(LogicalKey::Left),
            right: self.is_pressed(LogicalKey::Right),
            fire: self.is_pressed(LogicalKey::Fire),
            pause: std::mem::take(&mut self.pause_requested),
            autopilot,
        }
    }

    /// Keys currently held by any source
    pub fn held(&self) -> impl Iterator<Item = LogicalKey> + '_ {
        LogicalKey::ALL.into_iter().filter(|k| self.is_pressed(*k))
    }
}
