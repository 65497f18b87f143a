//! Collision resolution and the claw attack
//!
//! Three passes run each tick, in this order:
//! - puddles trap cats
//! - cats touching the player are caught (trapped) or deal damage (free)
//! - the claws strike the nearest free cats in range

use glam::Vec2;

use super::state::{Cat, EntityId, GameEvent, GameState, Puddle, RoundPhase};
use crate::circles_overlap;

/// Trap every free cat that overlaps any puddle. Returns the newly trapped ids.
pub fn trap_cats(cats: &mut [Cat], puddles: &[Puddle]) -> Vec<EntityId> {
    let mut trapped = Vec::new();
    for cat in cats.iter_mut().filter(|c| !c.trapped) {
        let touching = puddles
            .iter()
            .any(|p| circles_overlap(cat.pos, cat.radius, p.pos, p.radius));
        if touching && cat.trap() {
            trapped.push(cat.id);
        }
    }
    trapped
}

/// What a single cat did when it touched the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    /// Trapped cat collected
    Caught(EntityId),
    /// Free cat hit the player, health left
    Hit(EntityId, u32),
}

/// Resolve player/cat contacts.
///
/// Cats are visited newest first. A hit starts invulnerability, so later cats
/// in the same pass pass through. Processing stops on the hit that empties
/// health; the killing cat stays in the world.
pub fn resolve_contacts(state: &mut GameState) -> Vec<Contact> {
    let invulnerability = state.tuning.invulnerability_ticks;
    let mut contacts = Vec::new();
    let mut removed = Vec::new();

    for cat in state.entities.cats.iter().rev() {
        if !circles_overlap(state.player.pos, state.player.radius, cat.pos, cat.radius) {
            continue;
        }
        if cat.trapped {
            state.economy.add_currency(1);
            removed.push(cat.id);
            contacts.push(Contact::Caught(cat.id));
        } else if !state.player.is_invulnerable() {
            let health = state.player.take_hit(invulnerability);
            contacts.push(Contact::Hit(cat.id, health));
            if health == 0 {
                break;
            }
            removed.push(cat.id);
        }
    }

    state.entities.remove_cats(&removed);
    contacts
}

/// Pick up to `count` nearest free cats within `range` of `origin`.
/// Closer cats win; among equal distances the earlier cat wins.
pub fn select_claw_targets(origin: Vec2, cats: &[Cat], range: f32, count: usize) -> Vec<EntityId> {
    let mut targets: Vec<EntityId> = Vec::with_capacity(count);
    for _ in 0..count {
        let mut best: Option<(EntityId, f32)> = None;
        for cat in cats {
            if cat.trapped || targets.contains(&cat.id) {
                continue;
            }
            let dist = origin.distance(cat.pos);
            if dist > range {
                continue;
            }
            if best.is_none_or(|(_, d)| dist < d) {
                best = Some((cat.id, dist));
            }
        }
        match best {
            Some((id, _)) => targets.push(id),
            None => break,
        }
    }
    targets
}

/// Fire the claws if owned and off cooldown. Returns the cats struck.
/// A strike that finds nothing leaves the cooldown at zero.
pub fn claw_attack(state: &mut GameState) -> Vec<EntityId> {
    let count = state.player.upgrades.strike_count();
    if count == 0 || state.claw_cooldown > 0 {
        return Vec::new();
    }

    let targets = select_claw_targets(
        state.player.pos,
        &state.entities.cats,
        state.tuning.claws_range,
        count,
    );
    if targets.is_empty() {
        return targets;
    }

    for &id in &targets {
        if let Some(pos) = state.entities.cat(id).map(|c| c.pos) {
            state.entities.spawn_slash(pos, state.tuning.slash_lifespan);
        }
    }
    state.entities.remove_cats(&targets);
    state.claw_cooldown = state.tuning.claws_cooldown;
    log::debug!("Claws struck {} cat(s)", targets.len());
    targets
}

/// Collision part of a tick. Returns false when the round was lost.
pub fn update_collisions(state: &mut GameState) -> bool {
    let (cats, puddles) = (&mut state.entities.cats, &state.entities.puddles);
    for id in trap_cats(cats, puddles) {
        state.emit(GameEvent::CatTrapped { id });
    }

    for contact in resolve_contacts(state) {
        match contact {
            Contact::Caught(id) => {
                let round_score = state.economy.round_score;
                state.emit(GameEvent::CatCaught { id, round_score });
            }
            Contact::Hit(id, health) => {
                log::info!("Slime hit by cat {}, health {}", id, health);
                state.emit(GameEvent::PlayerHit { id, health });
            }
        }
    }

    if !state.player.is_alive() {
        state.lose_round();
        return false;
    }
    state.phase == RoundPhase::Running
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::PuddleOrientation;

    fn cat_at(state: &mut GameState, x: f32, y: f32) -> EntityId {
        state.entities.spawn_cat(Vec2::new(x, y), 16.0, 0.75).unwrap()
    }

    #[test]
    fn test_trap_needs_overlap() {
        let mut state = GameState::new(1);
        let near = cat_at(&mut state, 100.0, 100.0);
        let far = cat_at(&mut state, 300.0, 300.0);
        state
            .entities
            .spawn_puddle(Vec2::new(120.0, 100.0), 16.0, 180, PuddleOrientation::Horizontal);

        let trapped = trap_cats(&mut state.entities.cats, &state.entities.puddles);
        assert_eq!(trapped, vec![near]);
        assert!(state.entities.cat(near).unwrap().trapped);
        assert!(!state.entities.cat(far).unwrap().trapped);

        // Already trapped cats are not reported again
        let again = trap_cats(&mut state.entities.cats, &state.entities.puddles);
        assert!(again.is_empty());
    }

    #[test]
    fn test_catch_trapped_cat_scores() {
        let mut state = GameState::new(1);
        let pos = state.player.pos;
        let id = cat_at(&mut state, pos.x + 10.0, pos.y);
        state.entities.cats[0].trapped = true;

        let contacts = resolve_contacts(&mut state);
        assert_eq!(contacts, vec![Contact::Caught(id)]);
        assert!(state.entities.cats.is_empty());
        assert_eq!(state.economy.round_score, 1);
        assert_eq!(state.economy.lifetime_currency, 1);
        assert_eq!(state.player.health, 10);
    }

    #[test]
    fn test_free_cat_hits_once_then_invulnerable() {
        let mut state = GameState::new(1);
        let pos = state.player.pos;
        let first = cat_at(&mut state, pos.x + 5.0, pos.y);
        let second = cat_at(&mut state, pos.x - 5.0, pos.y);

        let contacts = resolve_contacts(&mut state);
        // Newest cat resolves first; the other passes through
        assert_eq!(contacts, vec![Contact::Hit(second, 9)]);
        assert_eq!(state.player.health, 9);
        assert!(state.player.is_invulnerable());
        assert_eq!(state.entities.cats.len(), 1);
        assert_eq!(state.entities.cats[0].id, first);
    }

    #[test]
    fn test_lethal_hit_keeps_the_cat() {
        let mut state = GameState::new(1);
        state.player.health = 1;
        let pos = state.player.pos;
        let id = cat_at(&mut state, pos.x, pos.y + 3.0);

        let contacts = resolve_contacts(&mut state);
        assert_eq!(contacts, vec![Contact::Hit(id, 0)]);
        assert_eq!(state.entities.cats.len(), 1);
    }

    #[test]
    fn test_claw_targets_nearest_two() {
        let mut state = GameState::new(1);
        let pos = state.player.pos;
        let c = cat_at(&mut state, pos.x + 50.0, pos.y);
        let a = cat_at(&mut state, pos.x + 10.0, pos.y);
        let b = cat_at(&mut state, pos.x, pos.y - 30.0);

        let targets = select_claw_targets(pos, &state.entities.cats, 70.0, 2);
        assert_eq!(targets, vec![a, b]);
        assert!(!targets.contains(&c));
    }

    #[test]
    fn test_claw_skips_trapped_and_out_of_range() {
        let mut state = GameState::new(1);
        let pos = state.player.pos;
        let trapped = cat_at(&mut state, pos.x + 5.0, pos.y);
        state.entities.cats[0].trapped = true;
        let edge = cat_at(&mut state, pos.x + 70.0, pos.y);
        cat_at(&mut state, pos.x + 71.0, pos.y);

        let targets = select_claw_targets(pos, &state.entities.cats, 70.0, 2);
        assert_eq!(targets, vec![edge]);
        assert!(!targets.contains(&trapped));
    }

    #[test]
    fn test_claw_whiff_keeps_cooldown_clear() {
        let mut state = GameState::new(1);
        state.economy.add_currency(10);
        state.buy_upgrade(crate::sim::UpgradeId::Claws).unwrap();
        let pos = state.player.pos;
        cat_at(&mut state, pos.x + 200.0, pos.y);

        assert!(claw_attack(&mut state).is_empty());
        assert_eq!(state.claw_cooldown, 0);
        assert_eq!(state.entities.cats.len(), 1);
    }

    #[test]
    fn test_claw_hit_starts_cooldown_and_leaves_slash() {
        let mut state = GameState::new(1);
        state.economy.add_currency(10);
        state.buy_upgrade(crate::sim::UpgradeId::Claws).unwrap();
        let pos = state.player.pos;
        let near = cat_at(&mut state, pos.x + 20.0, pos.y);
        let other = cat_at(&mut state, pos.x + 40.0, pos.y);

        assert_eq!(claw_attack(&mut state), vec![near]);
        assert_eq!(state.claw_cooldown, 60);
        assert_eq!(state.entities.cats.len(), 1);
        assert_eq!(state.entities.cats[0].id, other);
        assert_eq!(state.entities.slashes.len(), 1);
        assert_eq!(state.entities.slashes[0].pos, Vec2::new(pos.x + 20.0, pos.y));

        // Still cooling down
        assert!(claw_attack(&mut state).is_empty());
    }

    #[test]
    fn test_no_claws_no_attack() {
        let mut state = GameState::new(1);
        let pos = state.player.pos;
        cat_at(&mut state, pos.x + 10.0, pos.y);
        assert!(claw_attack(&mut state).is_empty());
        assert_eq!(state.entities.cats.len(), 1);
    }
}
