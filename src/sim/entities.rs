//! Transient entity collections
//!
//! Removal always goes through `Vec::retain`, which keeps survivors in order
//! and never skips an element the way splice-while-iterating can.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{Cat, EntityId, Puddle, PuddleOrientation, Slash};
use crate::consts::{MAX_CATS, MAX_PUDDLES, MAX_SLASHES};

/// Owns puddles, cats and slash markers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityStore {
    pub puddles: Vec<Puddle>,
    pub cats: Vec<Cat>,
    pub slashes: Vec<Slash>,
    next_id: EntityId,
}

impl Default for EntityStore {
    fn default() -> Self {
        Self {
            puddles: Vec::new(),
            cats: Vec::new(),
            slashes: Vec::new(),
            next_id: 1,
        }
    }
}

impl EntityStore {
    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Drop every entity. IDs keep counting so they stay unique per session.
    pub fn clear(&mut self) {
        self.puddles.clear();
        self.cats.clear();
        self.slashes.clear();
    }

    pub fn spawn_puddle(
        &mut self,
        pos: Vec2,
        radius: f32,
        lifespan: u32,
        orientation: PuddleOrientation,
    ) -> Option<EntityId> {
        if self.puddles.len() >= MAX_PUDDLES {
            log::debug!("Puddle cap reached, dropping puddle");
            return None;
        }
        let id = self.next_entity_id();
        self.puddles.push(Puddle {
            id,
            pos,
            radius,
            lifespan,
            max_lifespan: lifespan,
            orientation,
        });
        Some(id)
    }

    pub fn spawn_cat(&mut self, pos: Vec2, radius: f32, speed: f32) -> Option<EntityId> {
        if self.cats.len() >= MAX_CATS {
            log::debug!("Cat cap reached, dropping spawn");
            return None;
        }
        let id = self.next_entity_id();
        self.cats.push(Cat {
            id,
            pos,
            radius,
            speed,
            trapped: false,
        });
        Some(id)
    }

    pub fn spawn_slash(&mut self, pos: Vec2, lifespan: u32) -> Option<EntityId> {
        if self.slashes.len() >= MAX_SLASHES {
            return None;
        }
        let id = self.next_entity_id();
        self.slashes.push(Slash {
            id,
            pos,
            lifespan,
            max_lifespan: lifespan,
        });
        Some(id)
    }

    pub fn cat(&self, id: EntityId) -> Option<&Cat> {
        self.cats.iter().find(|c| c.id == id)
    }

    /// Remove every cat whose id is listed. Returns how many were removed.
    pub fn remove_cats(&mut self, ids: &[EntityId]) -> usize {
        if ids.is_empty() {
            return 0;
        }
        let before = self.cats.len();
        self.cats.retain(|c| !ids.contains(&c.id));
        before - self.cats.len()
    }

    /// Age puddles by one tick and drop the dried ones. Returns how many dried.
    pub fn age_puddles(&mut self) -> usize {
        let before = self.puddles.len();
        for puddle in &mut self.puddles {
            puddle.lifespan = puddle.lifespan.saturating_sub(1);
        }
        self.puddles.retain(|p| p.lifespan > 0);
        before - self.puddles.len()
    }

    /// Age slash markers by one tick and drop the faded ones
    pub fn age_slashes(&mut self) {
        for slash in &mut self.slashes {
            slash.lifespan = slash.lifespan.saturating_sub(1);
        }
        self.slashes.retain(|s| s.lifespan > 0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique_across_kinds_and_clears() {
        let mut store = EntityStore::default();
        let a = store.spawn_cat(Vec2::ZERO, 16.0, 0.75).unwrap();
        let b = store
            .spawn_puddle(Vec2::ZERO, 16.0, 10, PuddleOrientation::Horizontal)
            .unwrap();
        store.clear();
        let c = store.spawn_slash(Vec2::ZERO, 30).unwrap();
        assert!(a != b && b != c && a != c);
    }

    #[test]
    fn test_remove_adjacent_cats() {
        let mut store = EntityStore::default();
        let ids: Vec<_> = (0..5)
            .map(|i| store.spawn_cat(Vec2::new(i as f32, 0.0), 16.0, 0.75).unwrap())
            .collect();
        // Neighbouring removals must not skip anything
        assert_eq!(store.remove_cats(&[ids[1], ids[2], ids[3]]), 3);
        let left: Vec<_> = store.cats.iter().map(|c| c.id).collect();
        assert_eq!(left, vec![ids[0], ids[4]]);
    }

    #[test]
    fn test_puddle_lives_exactly_its_lifespan() {
        let mut store = EntityStore::default();
        store.spawn_puddle(Vec2::ZERO, 16.0, 3, PuddleOrientation::Vertical);
        assert_eq!(store.age_puddles(), 0);
        assert!((store.puddles[0].opacity() - 2.0 / 3.0).abs() < 1e-6);
        assert_eq!(store.age_puddles(), 0);
        assert_eq!(store.age_puddles(), 1);
        assert!(store.puddles.is_empty());
    }

    #[test]
    fn test_cat_cap() {
        let mut store = EntityStore::default();
        for _ in 0..MAX_CATS {
            assert!(store.spawn_cat(Vec2::ZERO, 16.0, 0.75).is_some());
        }
        assert!(store.spawn_cat(Vec2::ZERO, 16.0, 0.75).is_none());
        assert_eq!(store.cats.len(), MAX_CATS);
    }

    #[test]
    fn test_slashes_fade_out() {
        let mut store = EntityStore::default();
        store.spawn_slash(Vec2::ZERO, 2);
        store.age_slashes();
        assert_eq!(store.slashes.len(), 1);
        store.age_slashes();
        assert!(store.slashes.is_empty());
    }
}
