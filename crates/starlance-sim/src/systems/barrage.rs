//! Missile barrage launcher.

use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use starlance_core::components::{Health, PlayerShip};
use starlance_core::enums::{SizeClass, TelemetryCounter};
use starlance_core::events::SimEvent;
use starlance_core::tuning::{GunTuning, Tuning};
use starlance_core::types::{heading_vector, DVec2, KinematicBody};

use crate::telemetry::Telemetry;
use crate::world_setup;

/// Launch pose of one barrage missile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MissileLaunch {
    pub position: DVec2,
    pub heading: f64,
    pub speed: f64,
}

/// Number of missiles a barrage fires for a ship size.
pub fn missile_count(size: SizeClass, gun: &GunTuning) -> u32 {
    gun.missile_count * (size.index() as u32 + 1)
}

/// Fan of launches centered on `heading`, one spread step apart, with jitter.
pub fn plan(
    position: DVec2,
    heading: f64,
    size: SizeClass,
    gun: &GunTuning,
    rng: &mut ChaCha8Rng,
) -> Vec<MissileLaunch> {
    let count = missile_count(size, gun);
    let start = -gun.missile_spread_angle * (count as f64 - 1.0) / 2.0;
    let speed = gun.missile_launch_speed * (1.0 + 0.5 * size.index() as f64);
    let forward = heading_vector(heading);
    (0..count)
        .map(|i| {
            let jitter = rng.gen_range(-gun.missile_jitter_angle..=gun.missile_jitter_angle);
            let offset =
                rng.gen_range(gun.missile_spawn_offset_min..=gun.missile_spawn_offset_max);
            MissileLaunch {
                position: position + forward * offset,
                heading: heading + start + i as f64 * gun.missile_spread_angle + jitter,
                speed,
            }
        })
        .collect()
}

/// Fire one barrage from the player ship. Returns the number launched.
pub fn launch(
    world: &mut World,
    player: Entity,
    tuning: &Tuning,
    rng: &mut ChaCha8Rng,
    telemetry: &mut Telemetry,
    events: &mut Vec<SimEvent>,
) -> u32 {
    let launches = {
        let Ok((ship, body, health)) =
            world.query_one_mut::<(&PlayerShip, &KinematicBody, &Health)>(player)
        else {
            return 0;
        };
        if !health.alive {
            return 0;
        }
        plan(body.position, body.heading, ship.size, &tuning.gun, rng)
    };

    let mut launched = 0;
    for l in &launches {
        if world_setup::spawn_missile(world, tuning, l.position, l.heading, l.speed).is_none() {
            break;
        }
        launched += 1;
    }

    if launched > 0 {
        telemetry.add(TelemetryCounter::MissilesFired, launched as i64);
        events.push(SimEvent::MissileBarrage { count: launched });
        debug!(count = launched, "missile barrage launched");
    }
    launched
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use starlance_core::constants::*;

    #[test]
    fn test_count_scales_with_size() {
        let gun = GunTuning::default();
        assert_eq!(missile_count(SizeClass::Small, &gun), 5);
        assert_eq!(missile_count(SizeClass::Large, &gun), 15);
    }

    #[test]
    fn test_fan_is_centered_with_bounded_jitter() {
        let gun = GunTuning::default();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let launches = plan(DVec2::ZERO, 0.0, SizeClass::Small, &gun, &mut rng);
        assert_eq!(launches.len(), 5);
        for (i, l) in launches.iter().enumerate() {
            let nominal = (i as f64 - 2.0) * BARRAGE_SPREAD_ANGLE;
            assert!((l.heading - nominal).abs() <= BARRAGE_JITTER_ANGLE + 1e-12);
            let dist = l.position.length();
            assert!((BARRAGE_SPAWN_OFFSET_MIN..=BARRAGE_SPAWN_OFFSET_MAX).contains(&dist));
            assert_eq!(l.speed, BARRAGE_LAUNCH_SPEED);
        }
    }

    #[test]
    fn test_medium_launch_speed() {
        let gun = GunTuning::default();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let launches = plan(DVec2::ZERO, 1.0, SizeClass::Medium, &gun, &mut rng);
        assert_eq!(launches.len(), 10);
        assert!((launches[0].speed - BARRAGE_LAUNCH_SPEED * 1.5).abs() < 1e-12);
    }
}
