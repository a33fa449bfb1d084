//! Demo-mode pilot
//!
//! Reads the current state and fills in movement and fire the way a
//! cautious player would: dodge what is about to land, otherwise line up
//! under the lowest target and shoot.

use super::entity::Entity;
use super::projectile::Owner;
use super::state::GameState;
use super::tick::TickInput;
use crate::consts::*;

/// How far above the ship incoming fire is considered a threat
const THREAT_RANGE: f32 = 160.0;
/// Horizontal half-width of the danger lane around the ship
const THREAT_LANE: f32 = 28.0;
/// Divers below this line are dodged rather than hunted
const DIVER_DANGER_Y: f32 = 450.0;
/// Close enough to the target column to stop steering
const AIM_DEADZONE: f32 = 6.0;
/// Distance from a wall at which dodging reverses direction
const WALL_MARGIN: f32 = 40.0;

/// Overwrite movement and fire in `input` with the pilot's choice
pub fn steer(state: &GameState, input: &mut TickInput) {
    input.left = false;
    input.right = false;
    input.fire = false;

    if !state.player.active {
        return;
    }

    let ship_x = state.player.nose_x();

    if let Some(threat_x) = nearest_threat(state, ship_x) {
        let mut go_right = threat_x <= ship_x;
        if ship_x < WALL_MARGIN {
            go_right = true;
        } else if ship_x > CANVAS_WIDTH - WALL_MARGIN {
            go_right = false;
        }
        input.right = go_right;
        input.left = !go_right;
        return;
    }

    let Some(target_x) = target_column(state) else {
        return;
    };
    if target_x < ship_x - AIM_DEADZONE {
        input.left = true;
    } else if target_x > ship_x + AIM_DEADZONE {
        input.right = true;
    }
    input.fire = true;
}

/// X of the closest thing about to hit the ship, if any
fn nearest_threat(state: &GameState, ship_x: f32) -> Option<f32> {
    let ship_top = state.player.pos.y;

    let shots = state
        .projectiles
        .iter()
        .filter(|p| p.active && p.owner == Owner::Enemy)
        .map(|p| p.bounds().center())
        .filter(|c| c.y > ship_top - THREAT_RANGE && c.y < ship_top + PLAYER_SIZE);

    let divers = state
        .swarm
        .enemies
        .iter()
        .filter(|e| e.active && e.is_diving())
        .map(|e| e.bounds().center())
        .filter(|c| c.y > DIVER_DANGER_Y);

    shots
        .chain(divers)
        .filter(|c| (c.x - ship_x).abs() < THREAT_LANE)
        .map(|c| c.x)
        .min_by(|a, b| {
            (a - ship_x)
                .abs()
                .partial_cmp(&(b - ship_x).abs())
                .unwrap_or(std::cmp::Ordering::Equal)
        })
}

/// Column to line up under: the boss, else the lowest live enemy
fn target_column(state: &GameState) -> Option<f32> {
    if let Some(boss) = state.swarm.boss.as_ref().filter(|b| b.active) {
        return Some(boss.bounds().center().x);
    }
    state
        .swarm
        .enemies
        .iter()
        .filter(|e| e.active)
        .map(|e| e.bounds().center())
        .max_by(|a, b| a.y.partial_cmp(&b.y).unwrap_or(std::cmp::Ordering::Equal))
        .map(|c| c.x)
}
