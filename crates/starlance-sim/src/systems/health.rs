//! Health: damage gating, invulnerability countdown and regeneration.

use hecs::World;

use starlance_core::components::{Health, Regeneration};
use starlance_core::types::round_centi;

/// Apply `amount` damage unless the target is dead or invulnerable.
///
/// Returns true when the damage landed. Landing restarts the i-frame
/// countdown for entities that have one.
pub fn apply_damage(health: &mut Health, amount: f64) -> bool {
    if !health.alive || health.invulnerable_ticks > 0 {
        return false;
    }
    health.current = round_centi((health.current - amount).max(0.0));
    health.invulnerable_ticks = health.iframe_ticks;
    true
}

/// Health at or below `fraction` of max.
pub fn is_critical(health: &Health, fraction: f64) -> bool {
    health.current <= health.max * fraction
}

/// Count down invulnerability windows by one tick.
///
/// Runs before damage is resolved, so a window of `n` ticks leaves the entity
/// open again on the `n`th tick after the hit.
pub fn tick_invulnerability(world: &mut World) {
    for (_entity, health) in world.query_mut::<&mut Health>() {
        health.invulnerable_ticks = health.invulnerable_ticks.saturating_sub(1);
    }
}

/// Passive regeneration for living entities below max.
pub fn regenerate(world: &mut World) {
    for (_entity, (health, regen)) in world.query_mut::<(&mut Health, &Regeneration)>() {
        if health.alive && health.current < health.max {
            health.current = round_centi((health.current + regen.per_tick).min(health.max));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player_health() -> Health {
        Health {
            current: 100.0,
            max: 100.0,
            invulnerable_ticks: 0,
            iframe_ticks: 3,
            alive: true,
        }
    }

    #[test]
    fn test_second_hit_in_window_is_ignored() {
        let mut world = World::new();
        let e = world.spawn((player_health(),));

        {
            let mut h = world.get::<&mut Health>(e).unwrap();
            assert!(apply_damage(&mut h, 10.0));
            assert!(!apply_damage(&mut h, 10.0));
            assert_eq!(h.current, 90.0);
        }

        for _ in 0..3 {
            tick_invulnerability(&mut world);
        }

        let mut h = world.get::<&mut Health>(e).unwrap();
        assert!(apply_damage(&mut h, 10.0));
        assert_eq!(h.current, 80.0);
    }

    #[test]
    fn test_no_iframes_means_every_hit_lands() {
        let mut h = Health {
            iframe_ticks: 0,
            ..player_health()
        };
        for _ in 0..5 {
            assert!(apply_damage(&mut h, 1.0));
        }
        assert_eq!(h.current, 95.0);
    }

    #[test]
    fn test_damage_floors_at_zero() {
        let mut h = player_health();
        apply_damage(&mut h, 250.0);
        assert_eq!(h.current, 0.0);
    }

    #[test]
    fn test_regen_clamps_and_rounds() {
        let mut world = World::new();
        let e = world.spawn((
            Health {
                current: 99.995,
                ..player_health()
            },
            Regeneration { per_tick: 0.01 },
        ));
        regenerate(&mut world);
        assert_eq!(world.get::<&Health>(e).unwrap().current, 100.0);

        let dead = world.spawn((
            Health {
                current: 0.0,
                alive: false,
                ..player_health()
            },
            Regeneration { per_tick: 0.01 },
        ));
        regenerate(&mut world);
        assert_eq!(world.get::<&Health>(dead).unwrap().current, 0.0);
    }

    #[test]
    fn test_critical_threshold_inclusive() {
        let mut h = player_health();
        h.current = 25.0;
        assert!(is_critical(&h, 0.25));
        h.current = 25.01;
        assert!(!is_critical(&h, 0.25));
    }
}
