//! Cat spawning, difficulty ramp and pursuit steering

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::{Cat, GameEvent, GameState};
use crate::tuning::Tuning;

/// Spawn cadence; the interval only ever shrinks, down to the floor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spawner {
    /// Ticks between spawns
    pub interval: u32,
    /// Ticks since the last spawn
    pub timer: u32,
}

impl Spawner {
    pub fn new(interval: u32) -> Self {
        Self { interval, timer: 0 }
    }

    /// Shrink the interval if `elapsed` closes a ramp window.
    /// Returns the new interval when it changed.
    pub fn ramp(&mut self, elapsed: u32, tuning: &Tuning) -> Option<u32> {
        if elapsed == 0 || elapsed % tuning.spawn_ramp_window != 0 {
            return None;
        }
        if self.interval <= tuning.min_spawn_interval {
            return None;
        }
        self.interval = self
            .interval
            .saturating_sub(tuning.spawn_interval_step)
            .max(tuning.min_spawn_interval);
        Some(self.interval)
    }

    pub fn is_due(&self) -> bool {
        self.timer >= self.interval
    }
}

/// Canvas edge a cat walks in from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Right, Edge::Bottom, Edge::Left];

    pub fn random(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

/// Random point just outside `edge`
pub fn spawn_point(rng: &mut impl Rng, edge: Edge, tuning: &Tuning) -> Vec2 {
    let (w, h) = (tuning.canvas_width, tuning.canvas_height);
    let off = tuning.cat_radius + tuning.cat_spawn_padding;
    let t: f32 = rng.random();
    match edge {
        Edge::Top => Vec2::new(t * w, -off),
        Edge::Right => Vec2::new(w + off, t * h),
        Edge::Bottom => Vec2::new(t * w, h + off),
        Edge::Left => Vec2::new(-off, t * h),
    }
}

/// Move straight at `target`. Trapped cats hold still.
pub fn steer(cat: &mut Cat, target: Vec2) {
    if cat.trapped {
        return;
    }
    cat.pos += (target - cat.pos).normalize_or_zero() * cat.speed;
}

/// Cat part of a tick: spawn when due, then every free cat chases the player
pub fn update_cats(state: &mut GameState) {
    if state.spawner.is_due() {
        let edge = Edge::random(&mut state.rng);
        let pos = spawn_point(&mut state.rng, edge, &state.tuning);
        if let Some(id) = state
            .entities
            .spawn_cat(pos, state.tuning.cat_radius, state.tuning.cat_speed)
        {
            log::debug!("Cat {} spawned on {:?} edge", id, edge);
            state.emit(GameEvent::CatSpawned { id });
        }
        state.spawner.timer = 0;
    }

    let target = state.player.pos;
    for cat in &mut state.entities.cats {
        steer(cat, target);
    }
}
