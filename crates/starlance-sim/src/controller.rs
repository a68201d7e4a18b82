//! Jerk-limited motion controller.
//!
//! One algorithm drives both forward speed and turn rate; each axis gets its
//! own [`AxisParams`]. The integration always runs on the undilated fixed
//! step so the ship handles the same under bullet time.

use starlance_core::components::FlightState;
use starlance_core::enums::SizeClass;
use starlance_core::tuning::{FlightTuning, SizeTuning};
use starlance_core::types::{lerp, move_towards};

/// Inputs below this magnitude count as released.
const INPUT_DEAD_ZONE: f64 = 1e-3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisParams {
    /// Size-scaled cap on |rate|.
    pub max_rate: f64,
    /// Size-scaled target acceleration for full input.
    pub acceleration: f64,
    pub jerk: f64,
    /// Rate lost per second while no input is held.
    pub friction: f64,
    pub deceleration_multiplier: f64,
    /// |rate| above which an opposing input counts as braking.
    pub brake_threshold: f64,
    /// Negative input targets `acceleration * deceleration_multiplier`.
    pub strong_reverse: bool,
}

/// Forward-axis parameters for a ship of `size`.
pub fn linear_params(flight: &FlightTuning, sizes: &SizeTuning, size: SizeClass) -> AxisParams {
    let factor = sizes.speed_factor(size);
    AxisParams {
        max_rate: flight.max_forward_speed * factor,
        acceleration: flight.forward_acceleration * factor,
        jerk: flight.forward_jerk,
        friction: flight.forward_friction,
        deceleration_multiplier: flight.deceleration_multiplier,
        brake_threshold: 0.0,
        strong_reverse: true,
    }
}

/// Turn-axis parameters for a ship of `size`.
pub fn angular_params(flight: &FlightTuning, sizes: &SizeTuning, size: SizeClass) -> AxisParams {
    let factor = sizes.turn_factor(size);
    AxisParams {
        max_rate: flight.max_turn_rate * factor,
        acceleration: flight.turn_acceleration * factor,
        jerk: flight.turn_jerk,
        friction: flight.turn_friction,
        deceleration_multiplier: flight.deceleration_multiplier,
        brake_threshold: flight.turn_brake_threshold,
        strong_reverse: false,
    }
}

/// Maneuverability multiplier for a health ratio, between `floor` and 1.
pub fn health_damping(health_ratio: f64, floor: f64) -> f64 {
    lerp(floor, 1.0, health_ratio.clamp(0.0, 1.0))
}

/// Target acceleration for an input on this axis.
pub fn target_acceleration(input: f64, params: &AxisParams, damping: f64) -> f64 {
    if input > INPUT_DEAD_ZONE {
        params.acceleration * damping
    } else if input < -INPUT_DEAD_ZONE {
        let reverse = if params.strong_reverse {
            params.deceleration_multiplier
        } else {
            1.0
        };
        -params.acceleration * reverse * damping
    } else {
        0.0
    }
}

/// Jerk allowed this step. Inputs opposing the current rate brake harder.
pub fn effective_jerk(input: f64, rate: f64, params: &AxisParams) -> f64 {
    let opposing = input.abs() > INPUT_DEAD_ZONE
        && rate.abs() > params.brake_threshold
        && input.signum() != rate.signum();
    if opposing {
        params.jerk * params.deceleration_multiplier
    } else {
        params.jerk
    }
}

/// Advance one axis by `dt`. Returns the new `(rate, acceleration)`.
pub fn step_axis(
    rate: f64,
    acceleration: f64,
    input: f64,
    params: &AxisParams,
    damping: f64,
    dt: f64,
) -> (f64, f64) {
    let target = target_acceleration(input, params, damping);
    let jerk = effective_jerk(input, rate, params);
    let acceleration = move_towards(acceleration, target, jerk * dt);

    let rate = if input.abs() > INPUT_DEAD_ZONE {
        rate + acceleration * dt
    } else {
        move_towards(rate, 0.0, params.friction * dt)
    };

    (rate.clamp(-params.max_rate, params.max_rate), acceleration)
}

/// Advance both axes of a ship's flight state.
pub fn step_flight(
    state: &mut FlightState,
    thrust: f64,
    turn: f64,
    linear: &AxisParams,
    angular: &AxisParams,
    damping: f64,
    dt: f64,
) {
    let (speed, acceleration) = step_axis(state.speed, state.acceleration, thrust, linear, damping, dt);
    let (turn_rate, turn_acceleration) = step_axis(
        state.turn_rate,
        state.turn_acceleration,
        turn,
        angular,
        damping,
        dt,
    );
    *state = FlightState {
        speed,
        acceleration,
        turn_rate,
        turn_acceleration,
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use starlance_core::constants::*;

    fn small_linear() -> AxisParams {
        linear_params(&FlightTuning::default(), &SizeTuning::default(), SizeClass::Small)
    }

    #[test]
    fn test_acceleration_converges_without_overshoot() {
        let params = small_linear();
        let target = target_acceleration(1.0, &params, 1.0);
        let (mut rate, mut accel) = (0.0, 0.0);
        let mut last = accel;
        for _ in 0..500 {
            (rate, accel) = step_axis(rate, accel, 1.0, &params, 1.0, DT);
            assert!(accel >= last, "acceleration must rise monotonically");
            assert!(accel <= target + 1e-12, "overshoot: {accel} > {target}");
            last = accel;
        }
        assert!((accel - target).abs() < 1e-9);
        assert!(rate <= params.max_rate);
    }

    #[test]
    fn test_reversal_converges_faster() {
        let params = small_linear();
        // Moving forward with forward acceleration established.
        let start_rate = 2.0;
        let start_accel = 1.0;

        let (_, braking) = step_axis(start_rate, start_accel, -1.0, &params, 1.0, DT);
        let braking_delta = (braking - start_accel).abs();

        // Same magnitude of change requested from rest, not opposing motion.
        let (_, plain) = step_axis(0.0, 0.0, 1.0, &params, 1.0, DT);
        let plain_delta = plain.abs();

        assert!(braking_delta > plain_delta);
        assert!((braking_delta - PLAYER_FORWARD_JERK * DECELERATION_MULTIPLIER * DT).abs() < 1e-12);
    }

    #[test]
    fn test_reverse_target_is_stronger() {
        let params = small_linear();
        let fwd = target_acceleration(1.0, &params, 1.0);
        let rev = target_acceleration(-1.0, &params, 1.0);
        assert!((rev + fwd * DECELERATION_MULTIPLIER).abs() < 1e-12);
    }

    #[test]
    fn test_friction_decays_speed_without_input() {
        let params = small_linear();
        let (rate, _) = step_axis(3.0, 2.0, 0.0, &params, 1.0, DT);
        assert!((rate - (3.0 - PLAYER_FORWARD_FRICTION * DT)).abs() < 1e-12);
        let (rate, _) = step_axis(0.01, 0.0, 0.0, &params, 1.0, DT);
        assert_eq!(rate, 0.0);
    }

    #[test]
    fn test_rate_clamped_to_size_scaled_max() {
        let params = linear_params(&FlightTuning::default(), &SizeTuning::default(), SizeClass::Large);
        let (rate, _) = step_axis(100.0, 10.0, 1.0, &params, 1.0, DT);
        assert_eq!(rate, PLAYER_MAX_FORWARD_SPEED * SIZE_SPEED_FACTORS[2]);
    }

    #[test]
    fn test_turn_brake_needs_threshold() {
        let params = angular_params(&FlightTuning::default(), &SizeTuning::default(), SizeClass::Small);
        assert_eq!(effective_jerk(-1.0, 0.0, &params), params.jerk);
        assert_eq!(
            effective_jerk(-1.0, 0.5, &params),
            params.jerk * params.deceleration_multiplier
        );
        assert_eq!(effective_jerk(1.0, 0.5, &params), params.jerk);
    }

    #[test]
    fn test_health_damping_range() {
        assert_eq!(health_damping(0.0, HEALTH_DAMPING_FLOOR), HEALTH_DAMPING_FLOOR);
        assert_eq!(health_damping(1.0, HEALTH_DAMPING_FLOOR), 1.0);
        assert_eq!(health_damping(5.0, HEALTH_DAMPING_FLOOR), 1.0);
        let half = health_damping(0.5, HEALTH_DAMPING_FLOOR);
        assert!((half - 0.65).abs() < 1e-12);
    }
}
