//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only, every timer counts ticks
//! - Seeded RNG only
//! - Stable iteration order (insertion order, ids assigned at creation)
//! - No rendering or platform dependencies

pub mod collision;
pub mod economy;
pub mod entities;
pub mod movement;
pub mod round;
pub mod spawner;
pub mod state;
pub mod tick;
pub mod upgrades;

pub use collision::{Contact, claw_attack, resolve_contacts, select_claw_targets, trap_cats};
pub use economy::Economy;
pub use entities::EntityStore;
pub use movement::{MoveInput, movement_delta, puddle_orientation};
pub use round::RoundClock;
pub use spawner::{Edge, Spawner, spawn_point, steer};
pub use state::{
    Cat, EntityId, GameEvent, GameState, Player, Puddle, PuddleOrientation, RoundPhase, Slash,
};
pub use tick::{TickInput, tick};
pub use upgrades::{PurchaseError, UpgradeId, UpgradeState, purchase};
