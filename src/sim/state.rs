//! Game state and core simulation types
//!
//! One `GameState` owns every mutable piece of the world. Components read and
//! write it only from inside `tick`, so there is no aliasing between them.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::economy::Economy;
use super::entities::EntityStore;
use super::round::RoundClock;
use super::spawner::Spawner;
use super::upgrades::{UpgradeId, UpgradeState};
use crate::fade;
use crate::tuning::{Tuning, TuningError};

/// Stable identity handed out at creation, never reused within a session
pub type EntityId = u32;

/// Current phase of the round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    /// Nothing started yet
    Idle,
    /// Active gameplay
    Running,
    /// Store is open over a running round
    Paused,
    /// Survived the full duration
    Won,
    /// Health reached zero
    Lost,
}

impl RoundPhase {
    /// Won and Lost stay put until an explicit new game
    pub fn is_terminal(self) -> bool {
        matches!(self, RoundPhase::Won | RoundPhase::Lost)
    }
}

/// The slime
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub radius: f32,
    pub speed: f32,
    pub health: u32,
    pub max_health: u32,
    /// Ticks of invulnerability left; invulnerable while non-zero
    pub invulnerable_ticks: u32,
    /// Owned upgrades survive new rounds
    pub upgrades: UpgradeState,
}

impl Player {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(tuning.canvas_width / 2.0, tuning.canvas_height / 2.0),
            radius: tuning.player_radius,
            speed: tuning.player_speed,
            health: tuning.player_max_health,
            max_health: tuning.player_max_health,
            invulnerable_ticks: 0,
            upgrades: UpgradeState::default(),
        }
    }

    /// Reset everything a round touches; upgrades are kept
    pub fn reset(&mut self, tuning: &Tuning) {
        let upgrades = self.upgrades.clone();
        *self = Self::new(tuning);
        self.upgrades = upgrades;
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invulnerable_ticks > 0
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Lose one health and start the invulnerability window.
    /// Returns the remaining health.
    pub fn take_hit(&mut self, invulnerability_ticks: u32) -> u32 {
        self.health = self.health.saturating_sub(1);
        self.invulnerable_ticks = invulnerability_ticks;
        self.health
    }

    /// Count down invulnerability (once per tick)
    pub fn tick_invulnerability(&mut self) {
        self.invulnerable_ticks = self.invulnerable_ticks.saturating_sub(1);
    }

    pub fn owns(&self, upgrade: UpgradeId) -> bool {
        self.upgrades.is_owned(upgrade)
    }
}

/// Which way a puddle sprite is stretched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PuddleOrientation {
    #[default]
    Horizontal,
    Vertical,
}

/// A slime puddle left behind while moving
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Puddle {
    pub id: EntityId,
    pub pos: Vec2,
    pub radius: f32,
    /// Ticks left before it dries up
    pub lifespan: u32,
    pub max_lifespan: u32,
    pub orientation: PuddleOrientation,
}

impl Puddle {
    pub fn opacity(&self) -> f32 {
        fade(self.lifespan, self.max_lifespan)
    }
}

/// A homing cat
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cat {
    pub id: EntityId,
    pub pos: Vec2,
    pub radius: f32,
    pub speed: f32,
    /// Set once by a puddle, never cleared
    pub trapped: bool,
}

impl Cat {
    /// Mark as trapped. Returns true only on the first call.
    pub fn trap(&mut self) -> bool {
        let newly = !self.trapped;
        self.trapped = true;
        newly
    }
}

/// Claw hit marker (cosmetic)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Slash {
    pub id: EntityId,
    pub pos: Vec2,
    pub lifespan: u32,
    pub max_lifespan: u32,
}

impl Slash {
    pub fn opacity(&self) -> f32 {
        fade(self.lifespan, self.max_lifespan)
    }
}

/// Things that happened during a tick, drained by the shell for audio and messages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    RoundStarted,
    DifficultyRamped { spawn_interval: u32 },
    CatSpawned { id: EntityId },
    CatTrapped { id: EntityId },
    CatCaught { id: EntityId, round_score: u64 },
    PlayerHit { id: EntityId, health: u32 },
    ClawStrike { targets: Vec<EntityId> },
    RoundWon { round_score: u64 },
    RoundLost { round_score: u64, lifetime_currency: u64 },
    StoreOpened,
    StoreClosed,
    UpgradePurchased { upgrade: UpgradeId },
}

/// Complete game state for one session
#[derive(Debug, Clone)]
pub struct GameState {
    /// Session seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub tuning: Tuning,
    pub phase: RoundPhase,
    /// Store panel visibility, independent of phase
    pub store_open: bool,
    pub clock: RoundClock,
    pub player: Player,
    pub entities: EntityStore,
    pub economy: Economy,
    pub spawner: Spawner,
    /// Ticks since the last puddle was dropped
    pub puddle_timer: u32,
    /// Ticks until the claws may strike again
    pub claw_cooldown: u32,
    /// Events recorded since the last drain
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create an idle session with default tuning
    pub fn new(seed: u64) -> Self {
        Self::build(seed, Tuning::default())
    }

    /// Create an idle session with custom tuning. Values the simulation
    /// cannot run with are rejected.
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self::build(seed, tuning))
    }

    fn build(seed: u64, tuning: Tuning) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: RoundPhase::Idle,
            store_open: false,
            clock: RoundClock::new(tuning.game_duration),
            player: Player::new(&tuning),
            entities: EntityStore::default(),
            economy: Economy::default(),
            spawner: Spawner::new(tuning.initial_spawn_interval),
            puddle_timer: 0,
            claw_cooldown: 0,
            events: Vec::new(),
            tuning,
        }
    }

    /// Canvas size as a vector
    pub fn bounds(&self) -> Vec2 {
        Vec2::new(self.tuning.canvas_width, self.tuning.canvas_height)
    }

    /// Hand recorded events to the caller
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }
}
