//! Fundamental geometric and simulation types.
//!
//! Angles are radians, 0 = +x (east), counter-clockwise positive.

use serde::{Deserialize, Serialize};
use std::f64::consts::{PI, TAU};

pub use glam::DVec2;

/// Minimal 2D rigid-body state owned by every moving entity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct KinematicBody {
    pub position: DVec2,
    /// Facing angle in radians.
    pub heading: f64,
    pub velocity: DVec2,
    /// Angular velocity in rad/s (positive = counter-clockwise).
    pub angular_velocity: f64,
}

impl KinematicBody {
    pub fn at(position: DVec2, heading: f64) -> Self {
        Self {
            position,
            heading,
            ..Default::default()
        }
    }

    /// Unit vector along the current heading.
    pub fn forward(&self) -> DVec2 {
        heading_vector(self.heading)
    }
}

/// Simulation time tracking.
///
/// `elapsed_secs` is world time (slowed by bullet time); `real_secs` is
/// undilated time as seen by the player.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Fixed ticks run so far.
    pub tick: u64,
    /// Elapsed world time in seconds.
    pub elapsed_secs: f64,
    /// Elapsed real (unscaled) time in seconds.
    pub real_secs: f64,
}

impl SimTime {
    /// Advance by one fixed tick covering `world_dt` seconds of world time.
    pub fn advance_tick(&mut self, world_dt: f64) {
        self.tick += 1;
        self.elapsed_secs += world_dt;
    }

    pub fn advance_real(&mut self, real_dt: f64) {
        self.real_secs += real_dt;
    }
}

/// Unit vector pointing along `heading`.
pub fn heading_vector(heading: f64) -> DVec2 {
    DVec2::new(heading.cos(), heading.sin())
}

/// Angle of the vector from `from` to `to`.
pub fn bearing(from: DVec2, to: DVec2) -> f64 {
    let d = to - from;
    d.y.atan2(d.x)
}

/// Signed shortest angular difference from `current` to `target`, in (-PI, PI].
pub fn delta_angle(current: f64, target: f64) -> f64 {
    let mut diff = (target - current).rem_euclid(TAU);
    if diff > PI {
        diff -= TAU;
    }
    diff
}

/// Move `current` toward `target` by at most `max_delta`, never overshooting.
pub fn move_towards(current: f64, target: f64, max_delta: f64) -> f64 {
    if (target - current).abs() <= max_delta {
        target
    } else {
        current + (target - current).signum() * max_delta
    }
}

/// Like [`move_towards`] but along the shortest arc between two angles.
pub fn move_towards_angle(current: f64, target: f64, max_delta: f64) -> f64 {
    let diff = delta_angle(current, target);
    if diff.abs() <= max_delta {
        current + diff
    } else {
        current + diff.signum() * max_delta
    }
}

/// Linear interpolation with `t` clamped to [0, 1].
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    a * (1.0 - t) + b * t
}

/// Where `value` sits between `a` and `b`, clamped to [0, 1].
pub fn inverse_lerp(a: f64, b: f64, value: f64) -> f64 {
    if (b - a).abs() < f64::EPSILON {
        return 0.0;
    }
    ((value - a) / (b - a)).clamp(0.0, 1.0)
}

/// Round to two decimal places.
pub fn round_centi(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delta_angle_wraps_shortest_way() {
        let d = delta_angle(170f64.to_radians(), (-170f64).to_radians());
        assert!((d - 20f64.to_radians()).abs() < 1e-9, "got {d}");
        let d = delta_angle(0.0, PI);
        assert!((d - PI).abs() < 1e-9);
    }

    #[test]
    fn test_move_towards_never_overshoots() {
        assert_eq!(move_towards(0.0, 1.0, 0.3), 0.3);
        assert_eq!(move_towards(0.9, 1.0, 0.3), 1.0);
        assert_eq!(move_towards(0.0, -1.0, 2.0), -1.0);
    }

    #[test]
    fn test_move_towards_angle_takes_short_arc() {
        let from = 175f64.to_radians();
        let to = (-175f64).to_radians();
        let next = move_towards_angle(from, to, 2f64.to_radians());
        assert!((next - 177f64.to_radians()).abs() < 1e-9);
    }

    #[test]
    fn test_lerp_hits_endpoints_exactly() {
        assert_eq!(lerp(0.5, 0.1, 0.0), 0.5);
        assert_eq!(lerp(0.5, 0.1, 1.0), 0.1);
        assert_eq!(lerp(0.5, 0.1, 7.0), 0.1);
        assert_eq!(inverse_lerp(0.5, 0.1, 0.1), 1.0);
    }

    #[test]
    fn test_round_centi() {
        assert_eq!(round_centi(99.999), 100.0);
        assert_eq!(round_centi(12.344), 12.34);
    }
}
