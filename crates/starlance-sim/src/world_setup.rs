//! Entity spawn factories.
//!
//! Every spawn that creates a targetable entity also registers it in the
//! [`TargetRegistry`]. Projectile spawns return `None` when their template
//! is not configured.

use std::f64::consts::{FRAC_PI_2, TAU};

use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::warn;

use starlance_core::components::*;
use starlance_core::constants::BOSS_RADIUS;
use starlance_core::enums::*;
use starlance_core::tuning::{BossEntry, Tuning};
use starlance_core::types::{heading_vector, DVec2, KinematicBody};
use starlance_enemy_ai::patterns::Shot;

use crate::guidance::MissileGuidance;
use crate::registry::TargetRegistry;
use crate::systems::player_gun::GunState;

/// Heading the player spawns and respawns with (facing +y).
pub const PLAYER_SPAWN_HEADING: f64 = FRAC_PI_2;

/// Spawn the player and the configured enemy roster.
pub fn setup_scene(
    world: &mut World,
    registry: &mut TargetRegistry,
    rng: &mut ChaCha8Rng,
    tuning: &Tuning,
) -> Entity {
    let player = spawn_player(world, registry, tuning);
    for spawn in &tuning.world.enemies {
        spawn_enemy(
            world,
            registry,
            rng,
            tuning,
            spawn.position,
            spawn.movement,
            spawn.shoot,
        );
    }
    player
}

pub fn spawn_player(world: &mut World, registry: &mut TargetRegistry, tuning: &Tuning) -> Entity {
    let size = SizeClass::Small;
    let entity = world.spawn((
        PlayerShip {
            size,
            visible: true,
        },
        KinematicBody::at(tuning.health.spawn_point, PLAYER_SPAWN_HEADING),
        FlightState::default(),
        Health {
            current: tuning.health.player_max_health,
            max: tuning.health.player_max_health,
            invulnerable_ticks: 0,
            iframe_ticks: tuning.health.player_iframe_ticks,
            alive: true,
        },
        Regeneration {
            per_tick: tuning.health.regen_per_tick,
        },
        Collider {
            radius: tuning.health.player_radius * tuning.sizes.scale(size),
        },
        GunState::default(),
        TimeExempt,
    ));
    registry.insert(TargetCategory::Player, entity);
    entity
}

/// Restore a dead player at the spawn point with full health.
pub fn respawn_player(world: &mut World, player: Entity, tuning: &Tuning) -> Option<DVec2> {
    let (ship, body, flight, health, gun) = world
        .query_one_mut::<(
            &mut PlayerShip,
            &mut KinematicBody,
            &mut FlightState,
            &mut Health,
            &mut GunState,
        )>(player)
        .ok()?;
    ship.visible = true;
    *body = KinematicBody::at(tuning.health.spawn_point, PLAYER_SPAWN_HEADING);
    *flight = FlightState::default();
    health.current = health.max;
    health.invulnerable_ticks = 0;
    health.alive = true;
    *gun = GunState::default();
    Some(body.position)
}

pub fn spawn_enemy(
    world: &mut World,
    registry: &mut TargetRegistry,
    rng: &mut ChaCha8Rng,
    tuning: &Tuning,
    position: DVec2,
    movement: MovementPattern,
    shoot: ShootPattern,
) -> Entity {
    let entity = world.spawn((
        Enemy,
        KinematicBody::at(position, 0.0),
        enemy_behavior(rng, movement, shoot),
        Health {
            current: tuning.enemy.health,
            max: tuning.enemy.health,
            invulnerable_ticks: 0,
            iframe_ticks: 0,
            alive: true,
        },
        Collider {
            radius: tuning.enemy.radius,
        },
    ));
    registry.insert(TargetCategory::Enemy, entity);
    entity
}

/// Spawn a boss from a roster entry. Bosses honor i-frames.
pub fn spawn_boss(
    world: &mut World,
    registry: &mut TargetRegistry,
    rng: &mut ChaCha8Rng,
    tuning: &Tuning,
    entry: &BossEntry,
    now_real: f64,
) -> Entity {
    let entity = world.spawn((
        Enemy,
        Boss {
            name: entry.name.clone(),
            spawned_at_secs: now_real,
        },
        KinematicBody::at(entry.position, 0.0),
        enemy_behavior(rng, entry.movement, entry.shoot),
        Health {
            current: entry.health,
            max: entry.health,
            invulnerable_ticks: 0,
            iframe_ticks: tuning.health.boss_iframe_ticks,
            alive: true,
        },
        Collider {
            radius: BOSS_RADIUS,
        },
    ));
    registry.insert(TargetCategory::Enemy, entity);
    entity
}

fn enemy_behavior(
    rng: &mut ChaCha8Rng,
    movement: MovementPattern,
    shoot: ShootPattern,
) -> EnemyBehavior {
    EnemyBehavior {
        movement,
        shoot,
        zigzag_phase: rng.gen_range(0.0..TAU),
        ..Default::default()
    }
}

pub fn spawn_decoy(
    world: &mut World,
    registry: &mut TargetRegistry,
    tuning: &Tuning,
    position: DVec2,
) -> Entity {
    let entity = world.spawn((
        Decoy,
        KinematicBody::at(position, 0.0),
        Health {
            current: tuning.world.decoy_health,
            max: tuning.world.decoy_health,
            invulnerable_ticks: 0,
            iframe_ticks: 0,
            alive: true,
        },
        Collider {
            radius: tuning.world.decoy_radius,
        },
    ));
    registry.insert(TargetCategory::Decoy, entity);
    entity
}

/// Uniform random point inside the play bounds (centered on the origin).
pub fn random_play_position(rng: &mut ChaCha8Rng, tuning: &Tuning) -> DVec2 {
    let half = tuning.world.play_bounds * 0.5;
    let origin = tuning.world.origin;
    DVec2::new(
        rng.gen_range(origin.x - half.x..=origin.x + half.x),
        rng.gen_range(origin.y - half.y..=origin.y + half.y),
    )
}

/// Spawn a pattern-flying enemy bullet from `origin`.
pub fn spawn_enemy_bullet(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    tuning: &Tuning,
    origin: DVec2,
    shot: &Shot,
) -> Option<Entity> {
    let Some(template) = tuning.templates.enemy_bullet else {
        warn!("enemy bullet template not configured, shot dropped");
        return None;
    };
    let heading = shot.direction.y.atan2(shot.direction.x);
    let mut body = KinematicBody::at(origin, heading);
    body.velocity = shot.direction * shot.speed;
    Some(world.spawn((
        Projectile {
            side: Side::Enemy,
            kind: ProjectileKind::Bullet,
            lifespan_secs: template.lifespan,
            damage: tuning.health.projectile_damage,
            scale: shot.scale,
        },
        body,
        PatternedFlight {
            pattern: shot.pattern,
            forward: shot.direction,
            right: shot.direction.perp(),
            speed: shot.speed,
            age_secs: 0.0,
            orbit_angle: 0.0,
            zigzag_phase: rng.gen_range(0.0..TAU),
        },
        Collider {
            radius: template.radius * shot.scale,
        },
    )))
}

/// Spawn a straight-flying player bullet. Player bullets ignore bullet time.
pub fn spawn_player_bullet(
    world: &mut World,
    tuning: &Tuning,
    position: DVec2,
    heading: f64,
    speed: f64,
    scale: f64,
) -> Option<Entity> {
    let Some(template) = tuning.templates.player_bullet else {
        warn!("player bullet template not configured, shot dropped");
        return None;
    };
    let mut body = KinematicBody::at(position, heading);
    body.velocity = heading_vector(heading) * speed;
    Some(world.spawn((
        Projectile {
            side: Side::Player,
            kind: ProjectileKind::Bullet,
            lifespan_secs: template.lifespan,
            damage: tuning.health.projectile_damage,
            scale,
        },
        body,
        Collider {
            radius: template.radius * scale,
        },
        TimeExempt,
    )))
}

/// Spawn a homing missile in its slide phase.
pub fn spawn_missile(
    world: &mut World,
    tuning: &Tuning,
    position: DVec2,
    heading: f64,
    speed: f64,
) -> Option<Entity> {
    let Some(template) = tuning.templates.missile else {
        warn!("missile template not configured, launch dropped");
        return None;
    };
    let mut body = KinematicBody::at(position, heading);
    body.velocity = heading_vector(heading) * speed;
    Some(world.spawn((
        Projectile {
            side: Side::Player,
            kind: ProjectileKind::Missile,
            lifespan_secs: template.lifespan,
            damage: tuning.health.projectile_damage,
            scale: 1.0,
        },
        body,
        MissileGuidance::default(),
        Collider {
            radius: template.radius,
        },
    )))
}
