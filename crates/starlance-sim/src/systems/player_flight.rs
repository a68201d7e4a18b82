//! Player flight: feeds control input through the jerk-limited controller.
//!
//! Runs on the undilated fixed step. The player is `TimeExempt`, so its
//! displacement also ignores bullet time.

use hecs::World;

use starlance_core::commands::ControlInput;
use starlance_core::components::{FlightState, Health, PlayerShip};
use starlance_core::tuning::Tuning;
use starlance_core::types::{DVec2, KinematicBody};

use crate::controller::{angular_params, health_damping, linear_params, step_flight};

pub fn run(world: &mut World, input: ControlInput, tuning: &Tuning, dt: f64) {
    for (_entity, (ship, body, flight, health)) in world.query_mut::<(
        &PlayerShip,
        &mut KinematicBody,
        &mut FlightState,
        &Health,
    )>() {
        if !health.alive {
            *flight = FlightState::default();
            body.velocity = DVec2::ZERO;
            body.angular_velocity = 0.0;
            continue;
        }

        let linear = linear_params(&tuning.flight, &tuning.sizes, ship.size);
        let angular = angular_params(&tuning.flight, &tuning.sizes, ship.size);
        let damping = health_damping(
            health.current / health.max,
            tuning.flight.health_damping_floor,
        );
        step_flight(flight, input.thrust, input.turn, &linear, &angular, damping, dt);

        // Positive turn input is clockwise; heading is counter-clockwise.
        body.angular_velocity = -flight.turn_rate;
        body.heading += body.angular_velocity * dt;
        body.velocity = body.forward() * flight.speed;
    }
}

/// Stop the ship dead, e.g. after a size change.
pub fn reset_motion(flight: &mut FlightState, body: &mut KinematicBody) {
    *flight = FlightState::default();
    body.velocity = DVec2::ZERO;
    body.angular_velocity = 0.0;
}
