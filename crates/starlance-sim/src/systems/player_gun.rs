//! Charge-based player gun.
//!
//! Holding fire builds charge toward `build_up_time`, shortening the shot
//! interval. Releasing starts a decay task that drains charge to zero over
//! `fire_decay_time` real seconds while the gun keeps firing at the decaying
//! rate. Re-pressing cancels the decay and resumes from the current charge.

use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use starlance_core::components::{Health, PlayerShip};
use starlance_core::enums::{SizeClass, TelemetryCounter};
use starlance_core::events::SimEvent;
use starlance_core::tuning::{GunTuning, Tuning};
use starlance_core::types::{heading_vector, inverse_lerp, lerp, DVec2, KinematicBody};

use crate::telemetry::Telemetry;
use crate::timers::DelayedTask;
use crate::world_setup;

/// Gun state attached to the player ship.
#[derive(Debug, Clone, Copy)]
pub struct GunState {
    /// Seconds of accumulated charge, in [0, build_up_time].
    pub charge: f64,
    /// Real time at which the next shot may fire.
    pub next_fire_at: f64,
    pub shoot_left: bool,
    /// Running while the trigger is released and charge drains.
    pub decay: Option<DelayedTask>,
    /// Charge when the current decay started.
    pub decay_from: f64,
}

impl Default for GunState {
    fn default() -> Self {
        Self {
            charge: 0.0,
            next_fire_at: 0.0,
            shoot_left: true,
            decay: None,
            decay_from: 0.0,
        }
    }
}

impl GunState {
    pub fn is_cooling_down(&self) -> bool {
        self.decay.is_some_and(|task| task.is_running())
    }
}

/// Shot interval bounds and current interval for a charge level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FireInterval {
    /// Interval at zero charge (slowest).
    pub slowest: f64,
    /// Interval at full charge (fastest).
    pub fastest: f64,
    pub current: f64,
}

pub fn fire_interval(charge: f64, size: SizeClass, gun: &GunTuning) -> FireInterval {
    let size_factor = 1.0 + size.index() as f64;
    let slowest = gun.base_min_fire_rate / size_factor;
    let fastest = gun.base_max_fire_rate / size_factor;
    FireInterval {
        slowest,
        fastest,
        current: lerp(slowest, fastest, charge / gun.build_up_time),
    }
}

/// Angular offset of one shot: alternating side plus recoil kick.
pub fn shot_angle(
    shoot_left: bool,
    size: SizeClass,
    interval: &FireInterval,
    gun: &GunTuning,
    rng: &mut ChaCha8Rng,
) -> f64 {
    let max_offset = gun.bullet_offset_angle * (size.index() as f64 + 1.0);
    let magnitude = rng.gen_range(0.5 * max_offset..=max_offset);
    let side = if shoot_left { magnitude } else { -magnitude };

    let kick_ratio = inverse_lerp(interval.slowest, interval.fastest, interval.current);
    let kick = rng.gen_range(-gun.max_kick_angle..=gun.max_kick_angle) * (1.0 - kick_ratio);
    side + kick
}

struct ShotRequest {
    position: DVec2,
    heading: f64,
    speed: f64,
    scale: f64,
}

/// Advance the gun by one tick of `real_dt` seconds ending at `now`.
#[allow(clippy::too_many_arguments)]
pub fn run(
    world: &mut World,
    fire_held: bool,
    tuning: &Tuning,
    now: f64,
    real_dt: f64,
    rng: &mut ChaCha8Rng,
    telemetry: &mut Telemetry,
    events: &mut Vec<SimEvent>,
) {
    let gun = &tuning.gun;
    let mut shots = Vec::new();

    for (_entity, (ship, body, health, state)) in
        world.query_mut::<(&PlayerShip, &KinematicBody, &Health, &mut GunState)>()
    {
        if !health.alive {
            *state = GunState::default();
            continue;
        }

        let firing = if fire_held {
            if let Some(task) = state.decay.as_mut() {
                task.cancel();
            }
            state.decay = None;
            state.charge = (state.charge + real_dt).min(gun.build_up_time);
            true
        } else {
            if state.decay.is_none() && state.charge > 0.0 {
                state.decay = Some(DelayedTask::started(gun.fire_decay_time));
                state.decay_from = state.charge;
            }
            match state.decay.as_mut() {
                Some(task) => {
                    let done = task.advance(real_dt);
                    state.charge = state.decay_from * (1.0 - task.progress());
                    if done {
                        state.charge = 0.0;
                        state.decay = None;
                    }
                    !done
                }
                None => false,
            }
        };

        if !firing || now < state.next_fire_at {
            continue;
        }

        let interval = fire_interval(state.charge, ship.size, gun);
        let angle = shot_angle(state.shoot_left, ship.size, &interval, gun, rng);
        state.shoot_left = !state.shoot_left;
        state.next_fire_at = now + interval.current;

        let size_factor = 2.0 + ship.size.index() as f64;
        shots.push(ShotRequest {
            position: body.position + heading_vector(body.heading) * gun.muzzle_offset,
            heading: body.heading + angle,
            speed: gun.base_bullet_speed * size_factor,
            scale: gun.base_bullet_size * size_factor / 4.0,
        });
    }

    for shot in shots {
        if world_setup::spawn_player_bullet(
            world,
            tuning,
            shot.position,
            shot.heading,
            shot.speed,
            shot.scale,
        )
        .is_some()
        {
            telemetry.increment(TelemetryCounter::ShotsFired);
            events.push(SimEvent::ShotFired {
                position: shot.position,
                heading: shot.heading,
            });
        }
    }
}
