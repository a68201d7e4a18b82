//! Damage resolution for detected contacts.
//!
//! Projectiles are consumed on any hit, even when i-frames block the
//! damage. Enemy deaths are left to the enemy FSM; decoys are destroyed
//! here. Player death is handled by the engine after this runs.

use std::collections::HashSet;

use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use starlance_core::components::{Decoy, Health, PlayerShip, Projectile};
use starlance_core::enums::{Side, TelemetryCounter};
use starlance_core::events::SimEvent;
use starlance_core::tuning::Tuning;
use starlance_core::types::{DVec2, KinematicBody};

use crate::systems::collision::Contact;
use crate::systems::health::apply_damage;
use crate::telemetry::Telemetry;

/// Random damage dealt by one enemy bullet.
pub fn enemy_bullet_damage(tuning: &Tuning, rng: &mut ChaCha8Rng) -> f64 {
    rng.gen_range(tuning.enemy.bullet_damage_min..tuning.enemy.bullet_damage_max) as f64
}

pub fn resolve(
    world: &mut World,
    contacts: &[Contact],
    tuning: &Tuning,
    rng: &mut ChaCha8Rng,
    telemetry: &mut Telemetry,
    despawn_buffer: &mut Vec<Entity>,
    events: &mut Vec<SimEvent>,
) {
    let mut consumed: HashSet<Entity> = HashSet::new();

    for contact in contacts {
        match *contact {
            Contact::ProjectileHit { projectile, target } => {
                if !consumed.insert(projectile) {
                    continue;
                }
                let Some((side, damage, velocity, position)) = projectile_info(world, projectile)
                else {
                    continue;
                };
                despawn_buffer.push(projectile);

                match side {
                    Side::Enemy => {
                        let amount = enemy_bullet_damage(tuning, rng);
                        damage_player(world, target, amount, telemetry);
                    }
                    Side::Player => {
                        let is_decoy = world.get::<&Decoy>(target).is_ok();
                        if is_decoy {
                            let knock = velocity
                                .try_normalize()
                                .or_else(|| {
                                    (target_position(world, target)? - position).try_normalize()
                                })
                                .unwrap_or(DVec2::ZERO);
                            hit_decoy(world, target, damage, knock, tuning, despawn_buffer, events);
                        } else if let Ok(mut health) = world.get::<&mut Health>(target) {
                            apply_damage(&mut health, damage);
                        }
                    }
                }
            }
            Contact::DecoyRam { decoy, player } => {
                if world.get::<&Decoy>(decoy).is_err() {
                    continue;
                }
                damage_player(world, player, tuning.world.decoy_contact_damage, telemetry);
            }
        }
    }
}

fn projectile_info(world: &World, entity: Entity) -> Option<(Side, f64, DVec2, DVec2)> {
    let projectile = world.get::<&Projectile>(entity).ok()?;
    let body = world.get::<&KinematicBody>(entity).ok()?;
    Some((projectile.side, projectile.damage, body.velocity, body.position))
}

fn target_position(world: &World, entity: Entity) -> Option<DVec2> {
    world.get::<&KinematicBody>(entity).ok().map(|b| b.position)
}

fn damage_player(world: &mut World, player: Entity, amount: f64, telemetry: &mut Telemetry) {
    let Ok((_ship, health)) = world.query_one_mut::<(&PlayerShip, &mut Health)>(player) else {
        return;
    };
    if apply_damage(health, amount) {
        telemetry.add(TelemetryCounter::DamageTaken, amount.round() as i64);
    }
}

fn hit_decoy(
    world: &mut World,
    decoy: Entity,
    damage: f64,
    knock_dir: DVec2,
    tuning: &Tuning,
    despawn_buffer: &mut Vec<Entity>,
    events: &mut Vec<SimEvent>,
) {
    let Ok((body, health)) = world.query_one_mut::<(&mut KinematicBody, &mut Health)>(decoy)
    else {
        return;
    };
    if !health.alive {
        return;
    }
    body.velocity += knock_dir * tuning.world.decoy_knockback;
    if apply_damage(health, damage) && health.current <= 0.0 {
        health.alive = false;
        despawn_buffer.push(decoy);
        events.push(SimEvent::DecoyDestroyed {
            position: body.position,
        });
    }
}
