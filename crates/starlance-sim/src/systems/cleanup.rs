//! Cleanup system: despawns queued and out-of-bounds entities.

use hecs::{Entity, World};

use starlance_core::components::Projectile;
use starlance_core::tuning::Tuning;
use starlance_core::types::KinematicBody;

use crate::registry::TargetRegistry;

/// Remove projectiles that left the play area, then despawn everything
/// queued in `despawn_buffer` and drop it from the registry.
pub fn run(
    world: &mut World,
    registry: &mut TargetRegistry,
    tuning: &Tuning,
    despawn_buffer: &mut Vec<Entity>,
) {
    let half = tuning.world.play_bounds * 0.5;
    let origin = tuning.world.origin;
    for (entity, (body, _projectile)) in world.query_mut::<(&KinematicBody, &Projectile)>() {
        let offset = (body.position - origin).abs();
        if offset.x > half.x || offset.y > half.y {
            despawn_buffer.push(entity);
        }
    }

    despawn_buffer.sort_unstable_by_key(|e| e.to_bits());
    despawn_buffer.dedup();
    for entity in despawn_buffer.drain(..) {
        registry.remove(entity);
        let _ = world.despawn(entity);
    }
}
