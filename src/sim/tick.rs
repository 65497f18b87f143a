//! Fixed timestep simulation tick
//!
//! Core game loop that advances the round by one frame.

use serde::{Deserialize, Serialize};

use super::collision::{claw_attack, update_collisions};
use super::movement::{MoveInput, update_player};
use super::spawner::update_cats;
use super::state::{GameEvent, GameState, RoundPhase};

/// Input for a single tick, sampled once before the update runs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    /// Held movement keys
    pub movement: MoveInput,
    /// Store button pressed since the last tick
    pub toggle_store: bool,
    /// New Game pressed since the last tick
    pub new_game: bool,
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    // One-shot requests land before any simulation work
    if input.new_game {
        state.start_round();
    }
    if input.toggle_store {
        state.toggle_store();
    }

    if state.phase != RoundPhase::Running {
        return;
    }

    if state.clock.advance() {
        state.win_round();
        return;
    }

    if let Some(spawn_interval) = state.spawner.ramp(state.clock.elapsed, &state.tuning) {
        log::debug!("Cats speed up: spawn interval now {}", spawn_interval);
        state.emit(GameEvent::DifficultyRamped { spawn_interval });
    }

    update_player(state, &input.movement);
    state.entities.age_puddles();
    update_cats(state);

    if !update_collisions(state) {
        return;
    }

    state.entities.age_slashes();

    let targets = claw_attack(state);
    if !targets.is_empty() {
        state.emit(GameEvent::ClawStrike { targets });
    }
    state.claw_cooldown = state.claw_cooldown.saturating_sub(1);

    state.puddle_timer += 1;
    state.spawner.timer += 1;
}
