//! Enemy AI system: runs the enemy FSM for every enemy ship.
//!
//! Reads the player position through the registry, writes velocity and
//! heading, and spawns the shots the FSM emits. Enemies that die this tick
//! are returned so the engine can run the death side effects.

use hecs::{Entity, World};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use starlance_core::components::{Boss, Enemy, EnemyBehavior, Health};
use starlance_core::enums::TargetCategory;
use starlance_core::tuning::Tuning;
use starlance_core::types::{DVec2, KinematicBody};
use starlance_enemy_ai::fsm::{evaluate, EnemyContext};
use starlance_enemy_ai::patterns::Shot;

use crate::registry::TargetRegistry;
use crate::world_setup;

/// An enemy that transitioned to Dead this tick.
#[derive(Debug, Clone)]
pub struct EnemyDeath {
    pub entity: Entity,
    pub position: DVec2,
    /// Boss name and real spawn time, for bosses.
    pub boss: Option<(String, f64)>,
}

pub fn run(
    world: &mut World,
    registry: &TargetRegistry,
    tuning: &Tuning,
    world_dt: f64,
    rng: &mut ChaCha8Rng,
) -> Vec<EnemyDeath> {
    let player = registry
        .entities(TargetCategory::Player)
        .iter()
        .find_map(|e| TargetRegistry::resolve(world, *e));

    let mut shots: Vec<(DVec2, Shot)> = Vec::new();
    let mut deaths = Vec::new();

    for (entity, (_enemy, body, behavior, health, boss)) in world.query_mut::<(
        &Enemy,
        &mut KinematicBody,
        &mut EnemyBehavior,
        &mut Health,
        Option<&Boss>,
    )>() {
        let ctx = EnemyContext {
            behavior: *behavior,
            position: body.position,
            health: health.current,
            player,
            dt: world_dt,
            speed: tuning.enemy.speed,
            tuning: &tuning.enemy,
        };
        let update = evaluate(&ctx);

        if update.mode_changed && !update.died {
            debug!(?entity, mode = ?update.behavior.mode, "enemy mode changed");
        }

        *behavior = update.behavior;
        body.velocity = update.velocity;
        if update.velocity.length_squared() > f64::EPSILON {
            body.heading = update.velocity.y.atan2(update.velocity.x);
        }
        shots.extend(update.shots.into_iter().map(|s| (body.position, s)));

        if update.died {
            health.alive = false;
            deaths.push(EnemyDeath {
                entity,
                position: body.position,
                boss: boss.map(|b| (b.name.clone(), b.spawned_at_secs)),
            });
        }
    }

    for (origin, shot) in &shots {
        if world_setup::spawn_enemy_bullet(world, rng, tuning, *origin, shot).is_none() {
            break;
        }
    }

    deaths
}
