//! Data-driven game balance
//!
//! Defaults come from [`crate::consts`]. A JSON document may override any
//! subset of fields; missing fields keep their defaults.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors raised when loading or validating tuning values.
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to parse tuning: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning: {0}")]
    Invalid(&'static str),
}

/// Balance values for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub canvas_width: f32,
    pub canvas_height: f32,
    /// Round length in ticks
    pub game_duration: u32,

    pub player_radius: f32,
    pub player_speed: f32,
    pub player_max_health: u32,
    pub invulnerability_ticks: u32,

    pub puddle_lifespan: u32,
    pub puddle_spawn_interval: u32,

    pub cat_radius: f32,
    pub cat_speed: f32,
    pub cat_spawn_padding: f32,
    pub initial_spawn_interval: u32,
    pub min_spawn_interval: u32,
    pub spawn_interval_step: u32,
    pub spawn_ramp_window: u32,

    pub claws_range: f32,
    pub claws_cooldown: u32,
    pub claws_cost: u64,
    pub twin_claw_cost: u64,
    pub slash_lifespan: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,
            game_duration: GAME_DURATION,

            player_radius: PLAYER_RADIUS,
            player_speed: PLAYER_SPEED,
            player_max_health: PLAYER_MAX_HEALTH,
            invulnerability_ticks: INVULNERABILITY_TICKS,

            puddle_lifespan: PUDDLE_LIFESPAN,
            puddle_spawn_interval: PUDDLE_SPAWN_INTERVAL,

            cat_radius: CAT_RADIUS,
            cat_speed: CAT_SPEED,
            cat_spawn_padding: CAT_SPAWN_PADDING,
            initial_spawn_interval: INITIAL_SPAWN_INTERVAL,
            min_spawn_interval: MIN_SPAWN_INTERVAL,
            spawn_interval_step: SPAWN_INTERVAL_STEP,
            spawn_ramp_window: SPAWN_RAMP_WINDOW,

            claws_range: CLAWS_RANGE,
            claws_cooldown: CLAWS_COOLDOWN,
            claws_cost: CLAWS_COST,
            twin_claw_cost: TWIN_CLAW_COST,
            slash_lifespan: SLASH_LIFESPAN,
        }
    }
}

impl Tuning {
    /// Parse a JSON override document and validate the result
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        if !(self.canvas_width > 0.0 && self.canvas_height > 0.0) {
            return Err(TuningError::Invalid("canvas dimensions must be positive"));
        }
        if self.game_duration == 0 {
            return Err(TuningError::Invalid("game_duration must be non-zero"));
        }
        if self.player_max_health == 0 {
            return Err(TuningError::Invalid("player_max_health must be non-zero"));
        }
        if !(self.player_speed > 0.0 && self.cat_speed > 0.0) {
            return Err(TuningError::Invalid("speeds must be positive"));
        }
        if !(self.player_radius > 0.0 && self.cat_radius > 0.0) {
            return Err(TuningError::Invalid("radii must be positive"));
        }
        if self.player_radius * 2.0 > self.canvas_width.min(self.canvas_height) {
            return Err(TuningError::Invalid("player does not fit on the canvas"));
        }
        if self.min_spawn_interval == 0 {
            return Err(TuningError::Invalid("min_spawn_interval must be non-zero"));
        }
        if self.min_spawn_interval > self.initial_spawn_interval {
            return Err(TuningError::Invalid(
                "min_spawn_interval exceeds initial_spawn_interval",
            ));
        }
        if self.spawn_ramp_window == 0 {
            return Err(TuningError::Invalid("spawn_ramp_window must be non-zero"));
        }
        if self.puddle_spawn_interval == 0 {
            return Err(TuningError::Invalid("puddle_spawn_interval must be non-zero"));
        }
        Ok(())
    }
}
