//! Decoy spawner: keeps the field stocked with missile bait.

use hecs::World;
use rand_chacha::ChaCha8Rng;

use starlance_core::enums::TargetCategory;
use starlance_core::tuning::Tuning;

use crate::registry::TargetRegistry;
use crate::world_setup;

/// Spawn a decoy every `decoy_spawn_interval` world seconds, up to the cap.
pub fn run(
    world: &mut World,
    registry: &mut TargetRegistry,
    rng: &mut ChaCha8Rng,
    tuning: &Tuning,
    timer: &mut f64,
    world_dt: f64,
) {
    let interval = tuning.world.decoy_spawn_interval;
    if interval <= 0.0 {
        return;
    }
    *timer += world_dt;
    while *timer >= interval {
        *timer -= interval;
        if registry.len(TargetCategory::Decoy) >= tuning.world.decoy_max_alive {
            continue;
        }
        let position = world_setup::random_play_position(rng, tuning);
        world_setup::spawn_decoy(world, registry, tuning, position);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use starlance_core::constants::DT;

    #[test]
    fn test_spawns_on_interval_up_to_cap() {
        let mut world = World::new();
        let mut registry = TargetRegistry::default();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut tuning = Tuning::default();
        tuning.world.decoy_spawn_interval = 0.1;
        tuning.world.decoy_max_alive = 3;
        let mut timer = 0.0;

        for _ in 0..4 {
            run(&mut world, &mut registry, &mut rng, &tuning, &mut timer, DT);
        }
        assert_eq!(registry.len(TargetCategory::Decoy), 0);
        run(&mut world, &mut registry, &mut rng, &tuning, &mut timer, DT + 1e-9);
        assert_eq!(registry.len(TargetCategory::Decoy), 1);

        for _ in 0..100 {
            run(&mut world, &mut registry, &mut rng, &tuning, &mut timer, DT);
        }
        assert_eq!(registry.len(TargetCategory::Decoy), 3);
        assert_eq!(world.len(), 3);
    }
}
