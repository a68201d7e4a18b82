//! Snapshot system: builds a GameStateSnapshot from the world.
//!
//! Read-only; never modifies the world.

use hecs::World;

use starlance_core::components::*;
use starlance_core::enums::GamePhase;
use starlance_core::events::SimEvent;
use starlance_core::state::*;
use starlance_core::types::{KinematicBody, SimTime};

use crate::guidance::MissileGuidance;
use crate::systems::health::is_critical;
use crate::systems::player_gun::GunState;

/// Engine-level values that are not stored in components.
pub struct SnapshotContext {
    pub time: SimTime,
    pub phase: GamePhase,
    pub time_scale: f64,
    pub bullet_time: bool,
    pub autopilot: bool,
    pub critical_fraction: f64,
}

pub fn build_snapshot(
    world: &World,
    ctx: &SnapshotContext,
    events: Vec<SimEvent>,
) -> GameStateSnapshot {
    GameStateSnapshot {
        time: ctx.time,
        phase: ctx.phase,
        time_scale: ctx.time_scale,
        bullet_time: ctx.bullet_time,
        player: build_player(world, ctx),
        enemies: build_enemies(world),
        projectiles: build_projectiles(world),
        decoys: build_decoys(world),
        events,
    }
}

fn build_player(world: &World, ctx: &SnapshotContext) -> PlayerView {
    world
        .query::<(&PlayerShip, &KinematicBody, &Health, &GunState)>()
        .iter()
        .next()
        .map(|(_, (ship, body, health, gun))| PlayerView {
            position: body.position,
            heading: body.heading,
            velocity: body.velocity,
            angular_velocity: body.angular_velocity,
            health: health.current,
            max_health: health.max,
            alive: health.alive,
            visible: ship.visible,
            critical: is_critical(health, ctx.critical_fraction),
            size: ship.size,
            autopilot: ctx.autopilot,
            charge: gun.charge,
            cooling_down: gun.is_cooling_down(),
        })
        .unwrap_or_default()
}

fn build_enemies(world: &World) -> Vec<EnemyView> {
    world
        .query::<(&Enemy, &KinematicBody, &EnemyBehavior, &Health, Option<&Boss>)>()
        .iter()
        .map(|(entity, (_, body, behavior, health, boss))| EnemyView {
            id: entity.to_bits().get(),
            position: body.position,
            heading: body.heading,
            health: health.current,
            mode: behavior.mode,
            movement: behavior.movement,
            shoot: behavior.shoot,
            boss: boss.map(|b| b.name.clone()),
        })
        .collect()
}

fn build_projectiles(world: &World) -> Vec<ProjectileView> {
    world
        .query::<(&Projectile, &KinematicBody, Option<&MissileGuidance>)>()
        .iter()
        .map(|(entity, (projectile, body, guidance))| ProjectileView {
            id: entity.to_bits().get(),
            side: projectile.side,
            kind: projectile.kind,
            position: body.position,
            heading: body.heading,
            scale: projectile.scale,
            missile_phase: guidance.map(|g| g.phase),
        })
        .collect()
}

fn build_decoys(world: &World) -> Vec<DecoyView> {
    world
        .query::<(&Decoy, &KinematicBody, &Health)>()
        .iter()
        .map(|(entity, (_, body, health))| DecoyView {
            id: entity.to_bits().get(),
            position: body.position,
            health: health.current,
        })
        .collect()
}
