//! Circle-overlap contact detection.
//!
//! Produces [`Contact`]s for player projectiles against enemies and decoys,
//! enemy projectiles against the player, and decoys ramming the player.
//! Hosts that run their own physics can feed contacts in through
//! [`classify`] instead. Decoy rams count once per contact, on the tick the
//! overlap begins (see [`begin_rams`]).

use std::collections::HashSet;

use hecs::{Entity, World};

use starlance_core::components::{Collider, Decoy, Enemy, Health, PlayerShip, Projectile};
use starlance_core::enums::Side;
use starlance_core::types::{DVec2, KinematicBody};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    /// A projectile touched a ship or decoy of the opposing side.
    ProjectileHit { projectile: Entity, target: Entity },
    /// A decoy touched the player.
    DecoyRam { decoy: Entity, player: Entity },
}

#[derive(Clone, Copy)]
struct Circle {
    entity: Entity,
    position: DVec2,
    radius: f64,
}

fn overlaps(a: &Circle, b: &Circle) -> bool {
    a.position.distance_squared(b.position) <= (a.radius + b.radius).powi(2)
}

fn live_circles<Q: hecs::Query>(world: &World) -> Vec<Circle> {
    world
        .query::<(&KinematicBody, &Collider, &Health, Q)>()
        .iter()
        .filter(|(_, (_, _, health, _))| health.alive)
        .map(|(entity, (body, collider, _, _))| Circle {
            entity,
            position: body.position,
            radius: collider.radius,
        })
        .collect()
}

/// Detect all contacts in the current world state.
pub fn detect(world: &World) -> Vec<Contact> {
    let players = live_circles::<&PlayerShip>(world);
    let enemies = live_circles::<&Enemy>(world);
    let decoys = live_circles::<&Decoy>(world);

    let mut contacts = Vec::new();

    for (entity, (body, collider, projectile)) in world
        .query::<(&KinematicBody, &Collider, &Projectile)>()
        .iter()
    {
        let shot = Circle {
            entity,
            position: body.position,
            radius: collider.radius,
        };
        let candidates: Vec<&Circle> = match projectile.side {
            Side::Player => enemies.iter().chain(decoys.iter()).collect(),
            Side::Enemy => players.iter().collect(),
        };
        if let Some(hit) = candidates.into_iter().find(|c| overlaps(&shot, c)) {
            contacts.push(Contact::ProjectileHit {
                projectile: entity,
                target: hit.entity,
            });
        }
    }

    for player in &players {
        for decoy in decoys.iter().filter(|d| overlaps(player, d)) {
            contacts.push(Contact::DecoyRam {
                decoy: decoy.entity,
                player: player.entity,
            });
        }
    }

    contacts
}

/// Drop decoy rams for pairs that were already overlapping last tick.
///
/// `touching` is replaced with this tick's overlapping pairs, so pairs that
/// separated or despawned fall out and can ram again on a new contact.
pub fn begin_rams(
    contacts: Vec<Contact>,
    touching: &mut HashSet<(Entity, Entity)>,
) -> Vec<Contact> {
    let current: HashSet<(Entity, Entity)> = contacts
        .iter()
        .filter_map(|c| match *c {
            Contact::DecoyRam { decoy, player } => Some((decoy, player)),
            Contact::ProjectileHit { .. } => None,
        })
        .collect();
    let fresh = contacts
        .into_iter()
        .filter(|c| match *c {
            Contact::DecoyRam { decoy, player } => !touching.contains(&(decoy, player)),
            Contact::ProjectileHit { .. } => true,
        })
        .collect();
    *touching = current;
    fresh
}

/// Turn an externally reported touch between two entities into a contact.
pub fn classify(world: &World, a: Entity, b: Entity) -> Option<Contact> {
    let side_of = |e: Entity| world.get::<&Projectile>(e).ok().map(|p| p.side);
    let is_player = |e: Entity| world.get::<&PlayerShip>(e).is_ok();
    let is_enemy = |e: Entity| world.get::<&Enemy>(e).is_ok();
    let is_decoy = |e: Entity| world.get::<&Decoy>(e).is_ok();

    for (first, second) in [(a, b), (b, a)] {
        let hit = Contact::ProjectileHit {
            projectile: first,
            target: second,
        };
        match side_of(first) {
            Some(Side::Player) if is_enemy(second) || is_decoy(second) => return Some(hit),
            Some(Side::Enemy) if is_player(second) => return Some(hit),
            None if is_decoy(first) && is_player(second) => {
                return Some(Contact::DecoyRam {
                    decoy: first,
                    player: second,
                });
            }
            _ => {}
        }
    }
    None
}
