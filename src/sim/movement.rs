//! Player movement and puddle emission

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{GameState, Player, PuddleOrientation};
use crate::consts::{PUDDLE_OFFSET_SCALE, PUDDLE_RADIUS_SCALE};

/// Held movement directions for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl MoveInput {
    pub fn is_idle(&self) -> bool {
        movement_delta(self, 1.0) == Vec2::ZERO
    }
}

/// Displacement for one tick. Diagonals are scaled so their length equals
/// `speed`; opposite keys cancel.
pub fn movement_delta(input: &MoveInput, speed: f32) -> Vec2 {
    let mut delta = Vec2::ZERO;
    if input.up {
        delta.y -= speed;
    }
    if input.down {
        delta.y += speed;
    }
    if input.left {
        delta.x -= speed;
    }
    if input.right {
        delta.x += speed;
    }
    if delta.x != 0.0 && delta.y != 0.0 {
        delta = delta.normalize() * speed;
    }
    delta
}

/// Vertical when the movement is mostly up/down
pub fn puddle_orientation(delta: Vec2) -> PuddleOrientation {
    if delta.y.abs() > delta.x.abs() {
        PuddleOrientation::Vertical
    } else {
        PuddleOrientation::Horizontal
    }
}

/// Move the player and clamp it inside the canvas. Returns the unclamped delta.
pub fn step_player(player: &mut Player, input: &MoveInput, bounds: Vec2) -> Vec2 {
    let delta = movement_delta(input, player.speed);
    let r = player.radius;
    player.pos = (player.pos + delta).clamp(Vec2::splat(r), bounds - Vec2::splat(r));
    delta
}

/// Player part of a tick: move, count down invulnerability, drop a puddle when due
pub fn update_player(state: &mut GameState, input: &MoveInput) {
    let bounds = state.bounds();
    let delta = step_player(&mut state.player, input, bounds);
    state.player.tick_invulnerability();

    if delta != Vec2::ZERO && state.puddle_timer >= state.tuning.puddle_spawn_interval {
        let player = &state.player;
        let pos = player.pos + Vec2::new(0.0, player.radius * PUDDLE_OFFSET_SCALE);
        let radius = player.radius * PUDDLE_RADIUS_SCALE;
        state.entities.spawn_puddle(
            pos,
            radius,
            state.tuning.puddle_lifespan,
            puddle_orientation(delta),
        );
        state.puddle_timer = 0;
    }
}
