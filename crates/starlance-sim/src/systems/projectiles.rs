//! Projectile steering and lifespans.
//!
//! Enemy bullets follow their movement pattern on world time. Missiles run
//! homing guidance on real time. Lifespans count down on the clock the
//! projectile moves on.

use hecs::{Entity, World};

use starlance_core::components::{PatternedFlight, Projectile, TimeExempt};
use starlance_core::enums::{MissilePhase, TargetCategory};
use starlance_core::tuning::Tuning;
use starlance_core::types::{DVec2, KinematicBody};
use starlance_enemy_ai::patterns::bullet_velocity;

use crate::guidance::{self, MissileGuidance};
use crate::registry::TargetRegistry;

/// Categories a missile may lock on to.
pub const MISSILE_TARGETS: [TargetCategory; 2] = [TargetCategory::Enemy, TargetCategory::Decoy];

/// Recompute velocities of pattern-flying bullets.
pub fn steer_patterned(world: &mut World, tuning: &Tuning, world_dt: f64) {
    for (_entity, (flight, body)) in
        world.query_mut::<(&mut PatternedFlight, &mut KinematicBody)>()
    {
        body.velocity = bullet_velocity(flight, world_dt, &tuning.enemy);
    }
}

/// Run homing guidance for every missile.
pub fn guide_missiles(
    world: &mut World,
    registry: &TargetRegistry,
    tuning: &Tuning,
    real_dt: f64,
) {
    let missiles: Vec<(Entity, bool, Option<Entity>, DVec2)> = world
        .query::<(&KinematicBody, &MissileGuidance)>()
        .iter()
        .map(|(e, (body, g))| {
            let seeking =
                g.phase == MissilePhase::Homing || g.slide_timer >= tuning.missile.slide_time;
            (e, seeking, g.target, body.position)
        })
        .collect();

    for (entity, seeking, previous, position) in missiles {
        let mut target = previous;
        if seeking {
            if let Some((nearest, _)) = registry.nearest(world, position, &MISSILE_TARGETS) {
                target = Some(nearest);
            }
        }
        let target_pos = target.and_then(|t| TargetRegistry::resolve(world, t));

        if let Ok((body, g)) =
            world.query_one_mut::<(&mut KinematicBody, &mut MissileGuidance)>(entity)
        {
            g.target = target;
            guidance::step(body, g, target_pos, &tuning.missile, real_dt);
        }
    }
}

/// Count down lifespans and queue expired projectiles for removal.
pub fn expire(world: &mut World, real_dt: f64, world_dt: f64, despawn_buffer: &mut Vec<Entity>) {
    for (entity, (projectile, exempt, missile)) in world.query_mut::<(
        &mut Projectile,
        Option<&TimeExempt>,
        Option<&mut MissileGuidance>,
    )>() {
        projectile.lifespan_secs -= if exempt.is_some() { real_dt } else { world_dt };
        if projectile.lifespan_secs <= 0.0 {
            if let Some(g) = missile {
                g.phase = MissilePhase::Expired;
            }
            despawn_buffer.push(entity);
        }
    }
}
