//! Homing guidance for player missiles.
//!
//! A missile slides for `slide_time` after launch, then every tick seeks
//! the nearest targetable entity, turning at a rate that grows when it is
//! close and when it has overshot by more than the overshoot angle.
//! Guidance runs on real time; displacement is integrated by the movement
//! system on world time.

use hecs::Entity;

use starlance_core::enums::MissilePhase;
use starlance_core::tuning::MissileTuning;
use starlance_core::types::{
    bearing, delta_angle, move_towards, move_towards_angle, DVec2, KinematicBody,
};

/// Guidance state carried by every missile.
#[derive(Debug, Clone, Copy, Default)]
pub struct MissileGuidance {
    pub phase: MissilePhase,
    /// Weak handle re-resolved every tick; never owns its target.
    pub target: Option<Entity>,
    pub slide_timer: f64,
    /// Ramped forward acceleration.
    pub acceleration: f64,
    /// Heading error exceeded the overshoot angle last tick.
    pub overshooting: bool,
}

/// Turn rate for a heading error and target distance.
pub fn turn_rate(angle_diff: f64, distance: f64, params: &MissileTuning) -> f64 {
    let multiplier = if angle_diff.abs() > params.overshoot_angle {
        params.banana_turn_multiplier
    } else {
        1.0
    };
    params.turn_speed * multiplier * (1.0 + 1.0 / distance.max(params.min_turn_distance))
}

/// Passive post-launch deceleration.
pub fn slide_velocity(velocity: DVec2, params: &MissileTuning, dt: f64) -> DVec2 {
    velocity.lerp(DVec2::ZERO, (params.slide_deceleration * dt).clamp(0.0, 1.0))
}

/// Advance one missile by `dt` real seconds.
///
/// `target` is the resolved position of the current target, if any.
/// Returns true when the missile steered this tick.
pub fn step(
    body: &mut KinematicBody,
    guidance: &mut MissileGuidance,
    target: Option<DVec2>,
    params: &MissileTuning,
    dt: f64,
) -> bool {
    if guidance.phase == MissilePhase::Expired {
        return false;
    }

    if guidance.phase == MissilePhase::Slide {
        if guidance.slide_timer < params.slide_time {
            guidance.slide_timer += dt;
            body.velocity = slide_velocity(body.velocity, params, dt);
            body.angular_velocity = 0.0;
            return false;
        }
        guidance.phase = MissilePhase::Homing;
    }

    let mut steered = false;
    let previous_heading = body.heading;
    if let Some(target_pos) = target {
        let to_target = target_pos - body.position;
        let distance = to_target.length();
        if distance > f64::EPSILON {
            let desired = bearing(body.position, target_pos);
            let diff = delta_angle(body.heading, desired);
            guidance.overshooting = diff.abs() > params.overshoot_angle;
            let rate = turn_rate(diff, distance, params);
            body.heading = move_towards_angle(body.heading, desired, rate * dt);
            steered = true;
        }
    }
    body.angular_velocity = if dt > 0.0 {
        delta_angle(previous_heading, body.heading) / dt
    } else {
        0.0
    };

    guidance.acceleration =
        move_towards(guidance.acceleration, params.acceleration, params.jerk * dt);
    body.velocity = (body.velocity + body.forward() * guidance.acceleration * dt)
        .clamp_length_max(params.max_speed);
    steered
}
