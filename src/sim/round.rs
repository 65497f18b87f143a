//! Round clock and phase transitions
//!
//! ```text
//! Idle ──start──▶ Running ◀──close store (alive)── Paused
//!                   │  └──────open store──────────────▲
//!                   ├──elapsed ≥ duration──▶ Won
//!                   └──health = 0─────────▶ Lost
//! Won / Lost ──start──▶ Running
//! ```

use serde::{Deserialize, Serialize};

use super::state::{GameEvent, GameState, RoundPhase};
use super::upgrades::{self, PurchaseError, UpgradeId};
use crate::consts::TICKS_PER_SECOND;

/// Frame counter for the current round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundClock {
    pub elapsed: u32,
    pub duration: u32,
}

impl RoundClock {
    pub fn new(duration: u32) -> Self {
        Self {
            elapsed: 0,
            duration,
        }
    }

    /// Count one tick. Returns true once the round has run its full length.
    pub fn advance(&mut self) -> bool {
        if self.elapsed < self.duration {
            self.elapsed += 1;
        }
        self.elapsed >= self.duration
    }

    /// Whole seconds left, never negative
    pub fn remaining_seconds(&self) -> u32 {
        self.duration.saturating_sub(self.elapsed) / TICKS_PER_SECOND
    }

    pub fn reset(&mut self) {
        self.elapsed = 0;
    }
}

impl GameState {
    /// Start a fresh round from any phase. Currency and upgrades carry over.
    pub fn start_round(&mut self) {
        let tuning = &self.tuning;
        self.player.reset(tuning);
        self.entities.clear();
        self.economy.reset_round();
        self.spawner.interval = tuning.initial_spawn_interval;
        self.spawner.timer = 0;
        self.clock = RoundClock::new(tuning.game_duration);
        self.puddle_timer = 0;
        self.claw_cooldown = 0;
        self.store_open = false;
        self.phase = RoundPhase::Running;
        log::info!("Round started (seed {})", self.seed);
        self.emit(GameEvent::RoundStarted);
    }

    /// Open the store. A running round pauses; other phases are left alone.
    pub fn open_store(&mut self) {
        if self.store_open {
            return;
        }
        self.store_open = true;
        if self.phase == RoundPhase::Running {
            self.phase = RoundPhase::Paused;
        }
        self.emit(GameEvent::StoreOpened);
    }

    /// Close the store. A paused round resumes only while the player is alive.
    pub fn close_store(&mut self) {
        if !self.store_open {
            return;
        }
        self.store_open = false;
        if self.phase == RoundPhase::Paused {
            if self.player.is_alive() {
                self.phase = RoundPhase::Running;
            } else {
                self.lose_round();
            }
        }
        self.emit(GameEvent::StoreClosed);
    }

    pub fn toggle_store(&mut self) {
        if self.store_open {
            self.close_store();
        } else {
            self.open_store();
        }
    }

    /// Attempt a store purchase
    pub fn buy_upgrade(&mut self, id: UpgradeId) -> Result<(), PurchaseError> {
        upgrades::purchase(&mut self.player.upgrades, &mut self.economy, id, &self.tuning)?;
        self.emit(GameEvent::UpgradePurchased { upgrade: id });
        Ok(())
    }

    pub(crate) fn win_round(&mut self) {
        self.phase = RoundPhase::Won;
        log::info!(
            "Round won after {} ticks with {} cats caught",
            self.clock.elapsed,
            self.economy.round_score
        );
        self.emit(GameEvent::RoundWon {
            round_score: self.economy.round_score,
        });
    }

    pub(crate) fn lose_round(&mut self) {
        self.phase = RoundPhase::Lost;
        log::info!(
            "Round lost: {} cats this round, {} in total",
            self.economy.round_score,
            self.economy.lifetime_currency
        );
        self.emit(GameEvent::RoundLost {
            round_score: self.economy.round_score,
            lifetime_currency: self.economy.lifetime_currency,
        });
    }

    /// Whole seconds left in the round
    pub fn remaining_seconds(&self) -> u32 {
        self.clock.remaining_seconds()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn test_clock_fires_exactly_at_duration() {
        let mut clock = RoundClock::new(3);
        assert!(!clock.advance());
        assert!(!clock.advance());
        assert!(clock.advance());
        assert!(clock.advance());
        assert_eq!(clock.elapsed, 3);
    }

    #[test]
    fn test_remaining_seconds_floors() {
        let mut clock = RoundClock::new(3 * 60 * 120);
        assert_eq!(clock.remaining_seconds(), 180);
        clock.elapsed = 1;
        assert_eq!(clock.remaining_seconds(), 179);
        clock.elapsed = clock.duration;
        assert_eq!(clock.remaining_seconds(), 0);
    }

    #[test]
    fn test_start_round_resets_but_keeps_currency_and_upgrades() {
        let mut state = GameState::new(5);
        state.economy.add_currency(12);
        state.buy_upgrade(UpgradeId::Claws).unwrap();
        state.start_round();
        state.player.health = 3;
        state.player.pos = Vec2::new(30.0, 30.0);
        state.entities.spawn_cat(Vec2::ZERO, 16.0, 0.75);
        state.spawner.interval = 10;
        state.clock.elapsed = 500;
        state.lose_round();

        state.start_round();
        assert_eq!(state.phase, RoundPhase::Running);
        assert_eq!(state.player.health, 10);
        assert_eq!(state.player.pos, Vec2::new(480.0, 270.0));
        assert!(state.entities.cats.is_empty());
        assert_eq!(state.spawner.interval, 90);
        assert_eq!(state.clock.elapsed, 0);
        assert_eq!(state.economy.round_score, 0);
        assert_eq!(state.economy.lifetime_currency, 2);
        assert!(state.player.owns(UpgradeId::Claws));
    }

    #[test]
    fn test_store_pauses_and_resumes() {
        let mut state = GameState::new(5);
        state.start_round();
        state.open_store();
        assert_eq!(state.phase, RoundPhase::Paused);
        state.close_store();
        assert_eq!(state.phase, RoundPhase::Running);
    }

    #[test]
    fn test_store_while_lost_stays_lost() {
        let mut state = GameState::new(5);
        state.start_round();
        state.player.health = 0;
        state.lose_round();
        state.toggle_store();
        assert!(state.store_open);
        assert_eq!(state.phase, RoundPhase::Lost);
        state.toggle_store();
        assert_eq!(state.phase, RoundPhase::Lost);
    }

    #[test]
    fn test_paused_with_no_health_resumes_into_lost() {
        let mut state = GameState::new(5);
        state.start_round();
        state.open_store();
        state.player.health = 0;
        state.close_store();
        assert_eq!(state.phase, RoundPhase::Lost);
    }

    #[test]
    fn test_store_in_idle_stays_idle() {
        let mut state = GameState::new(5);
        state.open_store();
        state.close_store();
        assert_eq!(state.phase, RoundPhase::Idle);
    }
}
