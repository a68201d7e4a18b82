//! Categorized registry of targetable entities.
//!
//! Updated incrementally on spawn and despawn. Queries resolve positions
//! from the world at call time, so stale handles are skipped silently.

use std::collections::BTreeMap;

use hecs::{Entity, World};

use starlance_core::components::Health;
use starlance_core::enums::TargetCategory;
use starlance_core::types::{DVec2, KinematicBody};

#[derive(Debug, Default)]
pub struct TargetRegistry {
    by_category: BTreeMap<TargetCategory, Vec<Entity>>,
}

impl TargetRegistry {
    pub fn insert(&mut self, category: TargetCategory, entity: Entity) {
        let list = self.by_category.entry(category).or_default();
        if !list.contains(&entity) {
            list.push(entity);
        }
    }

    /// Remove an entity from every category.
    pub fn remove(&mut self, entity: Entity) {
        for list in self.by_category.values_mut() {
            list.retain(|e| *e != entity);
        }
    }

    pub fn clear(&mut self) {
        self.by_category.clear();
    }

    pub fn entities(&self, category: TargetCategory) -> &[Entity] {
        self.by_category
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn len(&self, category: TargetCategory) -> usize {
        self.entities(category).len()
    }

    /// Position of a live registered entity, `None` if it is gone or dead.
    pub fn resolve(world: &World, entity: Entity) -> Option<DVec2> {
        let body = world.get::<&KinematicBody>(entity).ok()?;
        if let Ok(health) = world.get::<&Health>(entity) {
            if !health.alive {
                return None;
            }
        }
        Some(body.position)
    }

    /// Nearest live entity in any of `categories`, by Euclidean distance.
    pub fn nearest(
        &self,
        world: &World,
        from: DVec2,
        categories: &[TargetCategory],
    ) -> Option<(Entity, DVec2)> {
        categories
            .iter()
            .flat_map(|c| self.entities(*c).iter().copied())
            .filter_map(|e| Self::resolve(world, e).map(|p| (e, p)))
            .min_by(|a, b| {
                a.1.distance_squared(from)
                    .total_cmp(&b.1.distance_squared(from))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nearest_skips_dead_and_despawned() {
        let mut world = World::new();
        let mut registry = TargetRegistry::default();

        let near_dead = world.spawn((
            KinematicBody::at(DVec2::new(1.0, 0.0), 0.0),
            Health {
                current: 0.0,
                max: 3.0,
                invulnerable_ticks: 0,
                iframe_ticks: 0,
                alive: false,
            },
        ));
        let gone = world.spawn((KinematicBody::at(DVec2::new(2.0, 0.0), 0.0),));
        let far = world.spawn((KinematicBody::at(DVec2::new(10.0, 0.0), 0.0),));
        registry.insert(TargetCategory::Decoy, near_dead);
        registry.insert(TargetCategory::Decoy, gone);
        registry.insert(TargetCategory::Enemy, far);
        world.despawn(gone).unwrap();

        let (hit, pos) = registry
            .nearest(&world, DVec2::ZERO, &[TargetCategory::Decoy, TargetCategory::Enemy])
            .unwrap();
        assert_eq!(hit, far);
        assert_eq!(pos, DVec2::new(10.0, 0.0));

        assert!(registry
            .nearest(&world, DVec2::ZERO, &[TargetCategory::Player])
            .is_none());
    }

    #[test]
    fn test_insert_is_idempotent_and_remove_clears() {
        let mut world = World::new();
        let mut registry = TargetRegistry::default();
        let e = world.spawn((KinematicBody::default(),));
        registry.insert(TargetCategory::Enemy, e);
        registry.insert(TargetCategory::Enemy, e);
        assert_eq!(registry.len(TargetCategory::Enemy), 1);
        registry.remove(e);
        assert_eq!(registry.len(TargetCategory::Enemy), 0);
    }
}
