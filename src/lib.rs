//! Slime Trap - survive the cats, catch them in your puddles
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, spawning, combat, round state)
//! - `renderer`: Render sink boundary and per-frame snapshots
//! - `platform`: Browser/native input mapping
//! - `audio`: Music cues keyed off round transitions
//! - `tuning`: Data-driven game balance
//! - `ui`: HUD text, store panel view and messages

pub mod audio;
pub mod platform;
pub mod renderer;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use tuning::{Tuning, TuningError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Simulation rate. Every timer in the game counts these ticks.
    pub const TICKS_PER_SECOND: u32 = 120;
    /// Fixed simulation timestep
    pub const SIM_DT: f32 = 1.0 / TICKS_PER_SECOND as f32;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Canvas dimensions (16:9)
    pub const CANVAS_WIDTH: f32 = 960.0;
    pub const CANVAS_HEIGHT: f32 = 540.0;

    /// Round length: 3 minutes
    pub const GAME_DURATION: u32 = 3 * 60 * TICKS_PER_SECOND;

    /// Player defaults
    pub const PLAYER_RADIUS: f32 = 20.0;
    pub const PLAYER_SPEED: f32 = 2.5;
    pub const PLAYER_MAX_HEALTH: u32 = 10;
    pub const INVULNERABILITY_TICKS: u32 = 60;

    /// Puddles
    pub const PUDDLE_LIFESPAN: u32 = 180;
    /// A puddle is dropped every N ticks of movement
    pub const PUDDLE_SPAWN_INTERVAL: u32 = 10;
    /// Puddle radius relative to the player radius
    pub const PUDDLE_RADIUS_SCALE: f32 = 0.8;
    /// Puddles land just below the player's center
    pub const PUDDLE_OFFSET_SCALE: f32 = 1.1;

    /// Cats
    pub const CAT_RADIUS: f32 = 16.0;
    pub const CAT_SPEED: f32 = 0.75;
    /// Distance beyond the canvas edge where cats appear
    pub const CAT_SPAWN_PADDING: f32 = 50.0;
    pub const INITIAL_SPAWN_INTERVAL: u32 = 90;
    pub const MIN_SPAWN_INTERVAL: u32 = 10;
    pub const SPAWN_INTERVAL_STEP: u32 = 5;
    /// Spawn interval shrinks every 10 seconds
    pub const SPAWN_RAMP_WINDOW: u32 = 10 * TICKS_PER_SECOND;

    /// Claws upgrade
    pub const CLAWS_RANGE: f32 = 70.0;
    pub const CLAWS_COOLDOWN: u32 = 60;
    pub const CLAWS_COST: u64 = 10;
    pub const TWIN_CLAW_COST: u64 = 20;
    pub const SLASH_LIFESPAN: u32 = 30;

    /// Entity caps
    pub const MAX_CATS: usize = 256;
    pub const MAX_PUDDLES: usize = 512;
    pub const MAX_SLASHES: usize = 64;
}

/// Squared distance check for two overlapping circles (strict)
#[inline]
pub fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    let reach = ra + rb;
    a.distance_squared(b) < reach * reach
}

/// Linear fade factor in [0, 1] for something with a countdown lifespan
#[inline]
pub fn fade(remaining: u32, lifespan: u32) -> f32 {
    if lifespan == 0 {
        return 0.0;
    }
    (remaining as f32 / lifespan as f32).clamp(0.0, 1.0)
}
