//! Round score and lifetime currency (cats caught)

use serde::{Deserialize, Serialize};

use super::upgrades::{PurchaseError, UpgradeId};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Economy {
    /// Cats caught this round
    pub round_score: u64,
    /// Cats caught this session minus what was spent
    pub lifetime_currency: u64,
}

impl Economy {
    /// Credit caught cats to both totals
    pub fn add_currency(&mut self, n: u64) {
        self.round_score += n;
        self.lifetime_currency += n;
    }

    /// Deduct `cost` for `upgrade`, or leave the balance untouched and fail.
    /// Returns the balance left after the purchase.
    pub fn spend(&mut self, upgrade: UpgradeId, cost: u64) -> Result<u64, PurchaseError> {
        let Some(left) = self.lifetime_currency.checked_sub(cost) else {
            return Err(PurchaseError::InsufficientFunds {
                upgrade,
                cost,
                balance: self.lifetime_currency,
            });
        };
        self.lifetime_currency = left;
        Ok(left)
    }

    pub fn reset_round(&mut self) {
        self.round_score = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_currency_credits_both() {
        let mut economy = Economy::default();
        economy.add_currency(3);
        assert_eq!(economy.round_score, 3);
        assert_eq!(economy.lifetime_currency, 3);
    }

    #[test]
    fn test_reset_round_keeps_currency() {
        let mut economy = Economy::default();
        economy.add_currency(4);
        economy.reset_round();
        assert_eq!(economy.round_score, 0);
        assert_eq!(economy.lifetime_currency, 4);
    }

    #[test]
    fn test_spend_exact_balance() {
        let mut economy = Economy::default();
        economy.add_currency(10);
        assert_eq!(economy.spend(UpgradeId::Claws, 10), Ok(0));
        assert_eq!(economy.lifetime_currency, 0);
    }

    #[test]
    fn test_spend_insufficient_leaves_balance() {
        let mut economy = Economy::default();
        economy.add_currency(7);
        let err = economy.spend(UpgradeId::Claws, 10).unwrap_err();
        assert_eq!(
            err,
            PurchaseError::InsufficientFunds {
                upgrade: UpgradeId::Claws,
                cost: 10,
                balance: 7
            }
        );
        assert_eq!(economy.lifetime_currency, 7);
        assert_eq!(economy.round_score, 7);
    }
}
