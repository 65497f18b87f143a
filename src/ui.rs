//! HUD text, store panel view and player-facing messages
//!
//! Pure functions over game state; the DOM glue only copies strings around.

use serde::Serialize;

use crate::sim::{GameEvent, GameState, PurchaseError, RoundPhase, UpgradeId};

/// `Time: MM:SS`
pub fn timer_text(remaining_seconds: u32) -> String {
    format!(
        "Time: {:02}:{:02}",
        remaining_seconds / 60,
        remaining_seconds % 60
    )
}

/// A line for the message box
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    pub text: String,
    /// How long to show it; 0 keeps it up until replaced
    pub duration_ms: u32,
}

impl Message {
    fn new(text: impl Into<String>, duration_ms: u32) -> Self {
        Self {
            text: text.into(),
            duration_ms,
        }
    }

    pub fn is_sticky(&self) -> bool {
        self.duration_ms == 0
    }
}

/// Greeting shown once when the page loads
pub fn welcome_message() -> Message {
    Message::new("Welcome to Slime Survivor!", 2000)
}

/// Message announcing an event, if it deserves one
pub fn message_for_event(event: &GameEvent, state: &GameState) -> Option<Message> {
    match event {
        GameEvent::RoundStarted => Some(Message::new("New Game! Survive the cats!", 2000)),
        GameEvent::RoundWon { round_score } => {
            let minutes = state.tuning.game_duration / (crate::consts::TICKS_PER_SECOND * 60);
            Some(Message::new(
                format!(
                    "YOU WIN! You survived for {} minutes and collected {} cats!",
                    minutes, round_score
                ),
                0,
            ))
        }
        GameEvent::RoundLost {
            round_score,
            lifetime_currency,
        } => Some(Message::new(
            format!(
                "GAME OVER! You collected {} cats this round! Total cats ever caught: {}. Your Slime Perished.",
                round_score, lifetime_currency
            ),
            0,
        )),
        GameEvent::UpgradePurchased { upgrade } => Some(match upgrade {
            UpgradeId::Claws => Message::new("Cat Claws purchased!", 1500),
            UpgradeId::TwinClaw => {
                Message::new("Twin Claw purchased! Your claws now strike twice!", 2000)
            }
        }),
        _ => None,
    }
}

/// Message for a refused purchase
pub fn message_for_error(error: &PurchaseError) -> Message {
    let text = match error {
        PurchaseError::AlreadyOwned(id) => format!("You already own {}!", id),
        PurchaseError::PrerequisiteMissing { requires, .. } => {
            format!("You need {} first!", requires)
        }
        PurchaseError::InsufficientFunds { cost, balance, .. } => {
            format!("Not enough cats! Need {} more.", cost.saturating_sub(*balance))
        }
    };
    Message::new(text, 1500)
}

/// One entry in the store panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoreItemView {
    pub id: UpgradeId,
    pub name: &'static str,
    /// "Owned" or "Cost: N Cats"
    pub status: String,
    pub can_buy: bool,
    pub visible: bool,
}

/// The store panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoreView {
    pub open: bool,
    pub total_cats: u64,
    pub items: Vec<StoreItemView>,
}

impl StoreView {
    pub fn build(state: &GameState) -> Self {
        let upgrades = &state.player.upgrades;
        let items = UpgradeId::ALL
            .iter()
            .map(|&id| {
                let owned = upgrades.is_owned(id);
                // Items stay hidden until their prerequisite is owned
                let visible = id.requires().is_none_or(|req| upgrades.is_owned(req));
                StoreItemView {
                    id,
                    name: id.display_name(),
                    status: if owned {
                        "Owned".to_string()
                    } else {
                        format!("Cost: {} Cats", id.cost(&state.tuning))
                    },
                    can_buy: !owned,
                    visible,
                }
            })
            .collect();
        Self {
            open: state.store_open,
            total_cats: state.economy.lifetime_currency,
            items,
        }
    }

    pub fn item(&self, id: UpgradeId) -> Option<&StoreItemView> {
        self.items.iter().find(|i| i.id == id)
    }
}

/// Button visibility and HUD numbers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HudView {
    pub score: u64,
    pub health: u32,
    pub timer: String,
    pub show_new_game: bool,
    pub show_store_button: bool,
    /// The music toggle stays usable mid-round; only the store covers it
    pub show_music_button: bool,
}

impl HudView {
    pub fn build(state: &GameState) -> Self {
        // Controls hide while a round runs and while the store covers the screen
        let idle_controls = state.phase != RoundPhase::Running && !state.store_open;
        Self {
            score: state.economy.round_score,
            health: state.player.health,
            timer: timer_text(state.remaining_seconds()),
            show_new_game: idle_controls,
            show_store_button: idle_controls,
            show_music_button: !state.store_open,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_text() {
        assert_eq!(timer_text(180), "Time: 03:00");
        assert_eq!(timer_text(65), "Time: 01:05");
        assert_eq!(timer_text(0), "Time: 00:00");
    }

    #[test]
    fn test_store_hides_twin_claw_until_claws() {
        let mut state = GameState::new(1);
        let view = StoreView::build(&state);
        let twin = view.item(UpgradeId::TwinClaw).unwrap();
        assert!(!twin.visible);
        assert_eq!(view.item(UpgradeId::Claws).unwrap().status, "Cost: 10 Cats");

        state.economy.add_currency(10);
        state.buy_upgrade(UpgradeId::Claws).unwrap();
        let view = StoreView::build(&state);
        let claws = view.item(UpgradeId::Claws).unwrap();
        assert_eq!(claws.status, "Owned");
        assert!(!claws.can_buy);
        let twin = view.item(UpgradeId::TwinClaw).unwrap();
        assert!(twin.visible && twin.can_buy);
        assert_eq!(twin.status, "Cost: 20 Cats");
    }

    #[test]
    fn test_purchase_error_messages() {
        let msg = message_for_error(&PurchaseError::InsufficientFunds {
            upgrade: UpgradeId::Claws,
            cost: 10,
            balance: 4,
        });
        assert_eq!(msg.text, "Not enough cats! Need 6 more.");
        let msg = message_for_error(&PurchaseError::PrerequisiteMissing {
            upgrade: UpgradeId::TwinClaw,
            requires: UpgradeId::Claws,
        });
        assert_eq!(msg.text, "You need Cat Claws first!");
    }

    #[test]
    fn test_round_end_messages_are_sticky() {
        let state = GameState::new(1);
        let lost = message_for_event(
            &GameEvent::RoundLost {
                round_score: 3,
                lifetime_currency: 12,
            },
            &state,
        )
        .unwrap();
        assert!(lost.is_sticky());
        assert!(lost.text.contains("Total cats ever caught: 12"));

        let won = message_for_event(&GameEvent::RoundWon { round_score: 7 }, &state).unwrap();
        assert_eq!(
            won.text,
            "YOU WIN! You survived for 3 minutes and collected 7 cats!"
        );
        assert!(message_for_event(&GameEvent::StoreOpened, &state).is_none());
    }

    #[test]
    fn test_hud_buttons_follow_phase() {
        let mut state = GameState::new(1);
        let hud = HudView::build(&state);
        assert!(hud.show_new_game && hud.show_music_button);

        state.start_round();
        let hud = HudView::build(&state);
        assert!(!hud.show_new_game);
        assert!(hud.show_music_button);

        state.open_store();
        let hud = HudView::build(&state);
        assert!(!hud.show_store_button);
        assert!(!hud.show_music_button);

        state.close_store();
        assert!(HudView::build(&state).show_music_button);
    }

    #[test]
    fn test_welcome_message_fades() {
        let msg = welcome_message();
        assert_eq!(msg.text, "Welcome to Slime Survivor!");
        assert_eq!(msg.duration_ms, 2000);
        assert!(!msg.is_sticky());
    }
}
