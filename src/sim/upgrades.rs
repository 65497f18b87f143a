//! Store catalog: Cat Claws and Twin Claw

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::economy::Economy;
use crate::tuning::Tuning;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UpgradeId {
    /// Periodic strike on the nearest untrapped cat in range
    Claws,
    /// Claws hit two cats per strike
    TwinClaw,
}

impl UpgradeId {
    pub const ALL: [UpgradeId; 2] = [UpgradeId::Claws, UpgradeId::TwinClaw];

    pub fn as_str(&self) -> &'static str {
        match self {
            UpgradeId::Claws => "claws",
            UpgradeId::TwinClaw => "twin-claw",
        }
    }

    /// Name shown in the store
    pub fn display_name(&self) -> &'static str {
        match self {
            UpgradeId::Claws => "Cat Claws",
            UpgradeId::TwinClaw => "Twin Claw",
        }
    }

    /// Upgrade that must be owned first
    pub fn requires(&self) -> Option<UpgradeId> {
        match self {
            UpgradeId::Claws => None,
            UpgradeId::TwinClaw => Some(UpgradeId::Claws),
        }
    }

    pub fn cost(&self, tuning: &Tuning) -> u64 {
        match self {
            UpgradeId::Claws => tuning.claws_cost,
            UpgradeId::TwinClaw => tuning.twin_claw_cost,
        }
    }
}

impl std::fmt::Display for UpgradeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Why a purchase was refused. Checks run in declaration order.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PurchaseError {
    #[error("you already own {0}")]
    AlreadyOwned(UpgradeId),
    #[error("{upgrade} requires {requires} first")]
    PrerequisiteMissing {
        upgrade: UpgradeId,
        requires: UpgradeId,
    },
    #[error("not enough cats for {upgrade}: need {} more", .cost - .balance)]
    InsufficientFunds {
        upgrade: UpgradeId,
        cost: u64,
        balance: u64,
    },
}

/// Owned flags; an upgrade once owned is never revoked
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpgradeState {
    claws: bool,
    twin_claw: bool,
}

impl UpgradeState {
    pub fn is_owned(&self, id: UpgradeId) -> bool {
        match id {
            UpgradeId::Claws => self.claws,
            UpgradeId::TwinClaw => self.twin_claw,
        }
    }

    fn grant(&mut self, id: UpgradeId) {
        match id {
            UpgradeId::Claws => self.claws = true,
            UpgradeId::TwinClaw => self.twin_claw = true,
        }
    }

    /// Cats hit per claw strike (0 without claws)
    pub fn strike_count(&self) -> usize {
        match (self.claws, self.twin_claw) {
            (false, _) => 0,
            (true, false) => 1,
            (true, true) => 2,
        }
    }
}

/// Buy `id`, deducting its cost from the economy on success
pub fn purchase(
    upgrades: &mut UpgradeState,
    economy: &mut Economy,
    id: UpgradeId,
    tuning: &Tuning,
) -> Result<(), PurchaseError> {
    if upgrades.is_owned(id) {
        return Err(PurchaseError::AlreadyOwned(id));
    }
    if let Some(requires) = id.requires() {
        if !upgrades.is_owned(requires) {
            return Err(PurchaseError::PrerequisiteMissing {
                upgrade: id,
                requires,
            });
        }
    }
    let left = economy.spend(id, id.cost(tuning))?;
    upgrades.grant(id);
    log::info!("{} purchased, {} cats left", id, left);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn funded(n: u64) -> Economy {
        let mut economy = Economy::default();
        economy.add_currency(n);
        economy
    }

    #[test]
    fn test_buy_claws() {
        let tuning = Tuning::default();
        let mut upgrades = UpgradeState::default();
        let mut economy = funded(12);
        purchase(&mut upgrades, &mut economy, UpgradeId::Claws, &tuning).unwrap();
        assert!(upgrades.is_owned(UpgradeId::Claws));
        assert_eq!(economy.lifetime_currency, 2);
        assert_eq!(upgrades.strike_count(), 1);
    }

    #[test]
    fn test_twin_claw_needs_claws_even_when_rich() {
        let tuning = Tuning::default();
        let mut upgrades = UpgradeState::default();
        let mut economy = funded(1000);
        let err = purchase(&mut upgrades, &mut economy, UpgradeId::TwinClaw, &tuning).unwrap_err();
        assert_eq!(
            err,
            PurchaseError::PrerequisiteMissing {
                upgrade: UpgradeId::TwinClaw,
                requires: UpgradeId::Claws
            }
        );
        assert_eq!(economy.lifetime_currency, 1000);
    }

    #[test]
    fn test_already_owned_wins_over_funds() {
        let tuning = Tuning::default();
        let mut upgrades = UpgradeState::default();
        let mut economy = funded(10);
        purchase(&mut upgrades, &mut economy, UpgradeId::Claws, &tuning).unwrap();
        // Broke now, but the owned check comes first
        let err = purchase(&mut upgrades, &mut economy, UpgradeId::Claws, &tuning).unwrap_err();
        assert_eq!(err, PurchaseError::AlreadyOwned(UpgradeId::Claws));
    }

    #[test]
    fn test_twin_claw_doubles_strikes() {
        let tuning = Tuning::default();
        let mut upgrades = UpgradeState::default();
        let mut economy = funded(30);
        purchase(&mut upgrades, &mut economy, UpgradeId::Claws, &tuning).unwrap();
        purchase(&mut upgrades, &mut economy, UpgradeId::TwinClaw, &tuning).unwrap();
        assert_eq!(upgrades.strike_count(), 2);
        assert_eq!(economy.lifetime_currency, 0);
    }

    #[test]
    fn test_insufficient_funds_message() {
        let err = PurchaseError::InsufficientFunds {
            upgrade: UpgradeId::TwinClaw,
            cost: 20,
            balance: 17,
        };
        assert_eq!(err.to_string(), "not enough cats for Twin Claw: need 3 more");
    }

    #[test]
    fn test_serialized_names_match_dom_keys() {
        for id in UpgradeId::ALL {
            let json = serde_json::to_string(&id).unwrap();
            assert_eq!(json, format!("\"{}\"", id.as_str()));
        }
    }
}
