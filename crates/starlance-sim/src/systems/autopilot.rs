//! Autopilot: synthesizes the inputs a pilot would give.
//!
//! Holds fire and forward thrust, turns toward the nearest target and
//! requests a missile barrage at a random interval.

use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use starlance_core::commands::ControlInput;
use starlance_core::enums::TargetCategory;
use starlance_core::tuning::AutopilotTuning;
use starlance_core::types::{bearing, delta_angle, KinematicBody};

use crate::registry::TargetRegistry;

/// Heading error below which the autopilot stops turning.
const AIM_TOLERANCE: f64 = 0.05;

#[derive(Debug, Clone, Copy, Default)]
pub struct AutopilotState {
    pub enabled: bool,
    /// Real time of the next scheduled barrage.
    pub next_barrage_at: f64,
}

impl AutopilotState {
    pub fn toggle(&mut self, now: f64, tuning: &AutopilotTuning, rng: &mut ChaCha8Rng) -> bool {
        self.enabled = !self.enabled;
        if self.enabled {
            self.schedule_barrage(now, tuning, rng);
        }
        self.enabled
    }

    fn schedule_barrage(&mut self, now: f64, tuning: &AutopilotTuning, rng: &mut ChaCha8Rng) {
        self.next_barrage_at =
            now + rng.gen_range(tuning.barrage_min_interval..=tuning.barrage_max_interval);
    }

    /// True when a barrage should fire at `now`; reschedules the next one.
    pub fn barrage_due(
        &mut self,
        now: f64,
        tuning: &AutopilotTuning,
        rng: &mut ChaCha8Rng,
    ) -> bool {
        if !self.enabled || now < self.next_barrage_at {
            return false;
        }
        self.schedule_barrage(now, tuning, rng);
        true
    }
}

/// Input the autopilot would give this tick.
pub fn synthesize_input(world: &World, registry: &TargetRegistry, player: Entity) -> ControlInput {
    let mut input = ControlInput {
        thrust: 1.0,
        turn: 0.0,
        fire: true,
    };
    let Ok(body) = world.get::<&KinematicBody>(player) else {
        return input;
    };
    if let Some((_, target)) = registry.nearest(
        world,
        body.position,
        &[TargetCategory::Enemy, TargetCategory::Decoy],
    ) {
        let diff = delta_angle(body.heading, bearing(body.position, target));
        if diff.abs() > AIM_TOLERANCE {
            // Positive turn input is clockwise, i.e. decreasing heading.
            input.turn = -diff.signum();
        }
    }
    input
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use starlance_core::types::DVec2;

    #[test]
    fn test_barrage_interval_within_bounds() {
        let tuning = AutopilotTuning::default();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut state = AutopilotState::default();
        assert!(state.toggle(10.0, &tuning, &mut rng));
        let wait = state.next_barrage_at - 10.0;
        assert!((tuning.barrage_min_interval..=tuning.barrage_max_interval).contains(&wait));
        assert!(!state.barrage_due(10.0, &tuning, &mut rng));
        assert!(state.barrage_due(state.next_barrage_at, &tuning, &mut rng));
        assert!(!state.toggle(20.0, &tuning, &mut rng));
        assert!(!state.barrage_due(1e9, &tuning, &mut rng));
    }

    #[test]
    fn test_turns_toward_target() {
        let mut world = World::new();
        let mut registry = TargetRegistry::default();
        let player = world.spawn((KinematicBody::at(DVec2::ZERO, 0.0),));
        // Target above: needs counter-clockwise rotation, i.e. negative turn input.
        let enemy = world.spawn((KinematicBody::at(DVec2::new(0.0, 10.0), 0.0),));
        registry.insert(TargetCategory::Enemy, enemy);
        let input = synthesize_input(&world, &registry, player);
        assert!(input.fire);
        assert_eq!(input.thrust, 1.0);
        assert_eq!(input.turn, -1.0);
    }
}
