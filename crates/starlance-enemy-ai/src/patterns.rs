//! Movement and shoot patterns.
//!
//! One pure function per pattern kind. Orbit accumulators live in the
//! caller's state and are advanced here.

use std::f64::consts::TAU;

use starlance_core::components::{EnemyBehavior, PatternedFlight};
use starlance_core::enums::{MovementPattern, ShootPattern};
use starlance_core::tuning::EnemyTuning;
use starlance_core::types::{heading_vector, DVec2};

/// A bullet an enemy (or a dying ship) wants spawned.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shot {
    /// Unit direction of travel.
    pub direction: DVec2,
    pub speed: f64,
    /// Visual and collider scale relative to the bullet template.
    pub scale: f64,
    /// Flight pattern the bullet follows after launch.
    pub pattern: MovementPattern,
}

/// Apply an enemy movement pattern to `base_dir` and return a unit direction.
pub fn modulate_direction(
    pattern: MovementPattern,
    base_dir: DVec2,
    state: &mut EnemyBehavior,
    dt: f64,
    tuning: &EnemyTuning,
) -> DVec2 {
    match pattern {
        MovementPattern::Drift => base_dir,
        MovementPattern::ZigZag => {
            let perp = base_dir.perp();
            let offset = (state.age_secs * tuning.zigzag_frequency + state.zigzag_phase).sin()
                * tuning.zigzag_amplitude;
            (base_dir + perp * offset).normalize_or_zero()
        }
        MovementPattern::Orbit => {
            state.orbit_angle += tuning.orbit_speed * dt;
            (base_dir + heading_vector(state.orbit_angle)).normalize_or_zero()
        }
    }
}

/// Shots emitted when an enemy's fire timer elapses.
pub fn shoot(
    shoot: ShootPattern,
    aim: DVec2,
    bullet_pattern: MovementPattern,
    tuning: &EnemyTuning,
) -> Vec<Shot> {
    let base = Shot {
        direction: aim,
        speed: tuning.bullet_speed,
        scale: 1.0,
        pattern: bullet_pattern,
    };
    match shoot {
        ShootPattern::Regular => vec![base],
        ShootPattern::Wave => [-tuning.wave_spread_angle, 0.0, tuning.wave_spread_angle]
            .into_iter()
            .map(|offset| Shot {
                direction: DVec2::from_angle(offset).rotate(aim),
                ..base
            })
            .collect(),
        ShootPattern::SlowAndBig => vec![Shot {
            speed: tuning.bullet_speed * tuning.slow_and_big_speed_factor,
            scale: tuning.slow_and_big_scale,
            ..base
        }],
    }
}

/// Evenly spaced 360 degree ring of Drift bullets.
pub fn death_burst(count: u32, speed: f64) -> Vec<Shot> {
    (0..count)
        .map(|i| Shot {
            direction: heading_vector(TAU * i as f64 / count as f64),
            speed,
            scale: 1.0,
            pattern: MovementPattern::Drift,
        })
        .collect()
}

/// Advance a patterned bullet by `dt` and return its velocity for this step.
pub fn bullet_velocity(flight: &mut PatternedFlight, dt: f64, tuning: &EnemyTuning) -> DVec2 {
    flight.age_secs += dt;
    let mut velocity = flight.forward * flight.speed;
    match flight.pattern {
        MovementPattern::Drift => {}
        MovementPattern::ZigZag => {
            velocity += flight.right
                * (flight.age_secs * tuning.bullet_zigzag_frequency + flight.zigzag_phase).sin()
                * tuning.bullet_zigzag_amplitude;
        }
        MovementPattern::Orbit => {
            flight.orbit_angle += tuning.bullet_orbit_speed * dt;
            velocity += heading_vector(flight.orbit_angle) * tuning.bullet_orbit_radius;
        }
    }
    velocity
}
