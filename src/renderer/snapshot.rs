//! Read-only view of the world for one frame

use glam::Vec2;
use serde::Serialize;

use crate::sim::{EntityId, GameState, PuddleOrientation, RoundPhase, UpgradeId};
use crate::ui::timer_text;

#[derive(Debug, Clone, Serialize)]
pub struct PlayerView {
    pub pos: Vec2,
    pub radius: f32,
    pub health: u32,
    pub max_health: u32,
    pub invulnerable: bool,
    /// Drawn with the clawed sprite once Cat Claws is owned
    pub has_claws: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct CatView {
    pub id: EntityId,
    pub pos: Vec2,
    pub radius: f32,
    pub trapped: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct PuddleView {
    pub id: EntityId,
    pub pos: Vec2,
    pub radius: f32,
    pub opacity: f32,
    pub orientation: PuddleOrientation,
}

#[derive(Debug, Clone, Serialize)]
pub struct SlashView {
    pub id: EntityId,
    pub pos: Vec2,
    pub opacity: f32,
    /// Ticks left; the marker drifts as it fades
    pub lifespan: u32,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub width: f32,
    pub height: f32,
    pub phase: RoundPhase,
    pub player: PlayerView,
    pub cats: Vec<CatView>,
    pub puddles: Vec<PuddleView>,
    pub slashes: Vec<SlashView>,
    pub round_score: u64,
    pub lifetime_currency: u64,
    pub timer: String,
}

impl Snapshot {
    pub fn capture(state: &GameState) -> Self {
        let player = &state.player;
        Self {
            width: state.tuning.canvas_width,
            height: state.tuning.canvas_height,
            phase: state.phase,
            player: PlayerView {
                pos: player.pos,
                radius: player.radius,
                health: player.health,
                max_health: player.max_health,
                invulnerable: player.is_invulnerable(),
                has_claws: player.owns(UpgradeId::Claws),
            },
            cats: state
                .entities
                .cats
                .iter()
                .map(|c| CatView {
                    id: c.id,
                    pos: c.pos,
                    radius: c.radius,
                    trapped: c.trapped,
                })
                .collect(),
            puddles: state
                .entities
                .puddles
                .iter()
                .map(|p| PuddleView {
                    id: p.id,
                    pos: p.pos,
                    radius: p.radius,
                    opacity: p.opacity(),
                    orientation: p.orientation,
                })
                .collect(),
            slashes: state
                .entities
                .slashes
                .iter()
                .map(|s| SlashView {
                    id: s.id,
                    pos: s.pos,
                    opacity: s.opacity(),
                    lifespan: s.lifespan,
                })
                .collect(),
            round_score: state.economy.round_score,
            lifetime_currency: state.economy.lifetime_currency,
            timer: timer_text(state.remaining_seconds()),
        }
    }

    /// Health bar fill in [0, 1]
    pub fn health_fraction(&self) -> f32 {
        if self.player.max_health == 0 {
            return 0.0;
        }
        self.player.health as f32 / self.player.max_health as f32
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Something that can draw a frame. Failures stay inside the sink.
pub trait RenderSink {
    fn draw(&mut self, snapshot: &Snapshot);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_mirrors_state() {
        let mut state = GameState::new(3);
        state.start_round();
        state.entities.spawn_cat(Vec2::new(1.0, 2.0), 16.0, 0.75);
        state
            .entities
            .spawn_puddle(Vec2::ZERO, 16.0, 180, PuddleOrientation::Vertical);
        state.entities.age_puddles();
        state.player.health = 5;

        let snap = Snapshot::capture(&state);
        assert_eq!(snap.phase, RoundPhase::Running);
        assert_eq!(snap.cats.len(), 1);
        assert_eq!(snap.cats[0].pos, Vec2::new(1.0, 2.0));
        assert!((snap.puddles[0].opacity - 179.0 / 180.0).abs() < 1e-6);
        assert_eq!(snap.health_fraction(), 0.5);
        assert_eq!(snap.timer, "Time: 03:00");
        assert!(!snap.player.has_claws);
    }

    #[test]
    fn test_snapshot_serializes() {
        let state = GameState::new(3);
        let json = Snapshot::capture(&state).to_json().unwrap();
        assert!(json.contains("\"phase\":\"Idle\""));
    }
}
