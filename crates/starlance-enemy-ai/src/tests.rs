#[cfg(test)]
mod tests {
    use std::f64::consts::TAU;

    use starlance_core::components::{EnemyBehavior, PatternedFlight};
    use starlance_core::constants::*;
    use starlance_core::enums::{EnemyMode, MovementPattern, ShootPattern};
    use starlance_core::tuning::EnemyTuning;
    use starlance_core::types::DVec2;

    use crate::fsm::{evaluate, EnemyContext};
    use crate::patterns::{bullet_velocity, death_burst, modulate_direction, shoot};

    fn angle_of(v: DVec2) -> f64 {
        v.y.atan2(v.x)
    }

    fn make_context(
        tuning: &EnemyTuning,
        behavior: EnemyBehavior,
        position: DVec2,
        player: Option<DVec2>,
        health: f64,
    ) -> EnemyContext<'_> {
        EnemyContext {
            behavior,
            position,
            health,
            player,
            dt: DT,
            speed: tuning.speed,
            tuning,
        }
    }

    #[test]
    fn test_engages_player_in_range() {
        let tuning = EnemyTuning::default();
        let ctx = make_context(
            &tuning,
            EnemyBehavior::default(),
            DVec2::new(10.0, 0.0),
            Some(DVec2::ZERO),
            ENEMY_HEALTH,
        );
        let update = evaluate(&ctx);
        assert_eq!(update.behavior.mode, EnemyMode::Engaging);
        assert!(update.mode_changed);
        // Drift heads straight at the player at full speed.
        assert!((update.velocity - DVec2::new(-ENEMY_SPEED, 0.0)).length() < 1e-9);
    }

    #[test]
    fn test_roams_when_player_out_of_range() {
        let tuning = EnemyTuning::default();
        let behavior = EnemyBehavior {
            mode: EnemyMode::Engaging,
            ..Default::default()
        };
        let ctx = make_context(
            &tuning,
            behavior,
            DVec2::new(10.0, 0.0),
            Some(DVec2::new(500.0, 0.0)),
            ENEMY_HEALTH,
        );
        let update = evaluate(&ctx);
        assert_eq!(update.behavior.mode, EnemyMode::Roaming);
        assert!(update.mode_changed);
        // Heads for the rally point at the origin.
        assert!(update.velocity.x < 0.0);
        assert!(update.shots.is_empty());
    }

    #[test]
    fn test_roams_when_player_dead() {
        let tuning = EnemyTuning::default();
        let ctx = make_context(
            &tuning,
            EnemyBehavior::default(),
            DVec2::new(5.0, 5.0),
            None,
            ENEMY_HEALTH,
        );
        assert_eq!(evaluate(&ctx).behavior.mode, EnemyMode::Roaming);
    }

    #[test]
    fn test_circles_rally_point_when_close() {
        let tuning = EnemyTuning::default();
        let mut behavior = EnemyBehavior::default();
        let mut position = DVec2::new(0.5, 0.0);
        let start_angle = behavior.roam_angle;
        for _ in 0..10 {
            let ctx = make_context(&tuning, behavior, position, None, ENEMY_HEALTH);
            let update = evaluate(&ctx);
            behavior = update.behavior;
            position += update.velocity * DT;
            assert!((update.velocity.length() - ENEMY_SPEED).abs() < 1e-9);
        }
        assert!(behavior.roam_angle > start_angle);
    }

    #[test]
    fn test_fires_on_cooldown() {
        let tuning = EnemyTuning::default();
        let mut behavior = EnemyBehavior::default();
        let mut fired_ticks = Vec::new();
        let ticks = (ENEMY_FIRE_COOLDOWN / DT).round() as usize * 2;
        for tick in 1..=ticks {
            let ctx = make_context(
                &tuning,
                behavior,
                DVec2::new(10.0, 0.0),
                Some(DVec2::ZERO),
                ENEMY_HEALTH,
            );
            let update = evaluate(&ctx);
            if !update.shots.is_empty() {
                fired_ticks.push(tick);
            }
            behavior = update.behavior;
        }
        assert_eq!(fired_ticks.len(), 2, "fired at {fired_ticks:?}");
    }

    #[test]
    fn test_death_emits_one_burst() {
        let tuning = EnemyTuning::default();
        let behavior = EnemyBehavior {
            mode: EnemyMode::Engaging,
            ..Default::default()
        };
        let ctx = make_context(&tuning, behavior, DVec2::ZERO, Some(DVec2::X), 0.0);
        let update = evaluate(&ctx);
        assert!(update.died);
        assert_eq!(update.behavior.mode, EnemyMode::Dead);
        assert_eq!(update.shots.len(), DEATH_BURST_COUNT as usize);
        assert_eq!(update.velocity, DVec2::ZERO);

        // Dead is terminal: no second burst, no re-engagement.
        let ctx = make_context(&tuning, update.behavior, DVec2::ZERO, Some(DVec2::X), 0.0);
        let again = evaluate(&ctx);
        assert!(!again.died);
        assert!(again.shots.is_empty());
        assert_eq!(again.behavior.mode, EnemyMode::Dead);

        let ctx = make_context(&tuning, again.behavior, DVec2::ZERO, Some(DVec2::X), 5.0);
        assert_eq!(evaluate(&ctx).behavior.mode, EnemyMode::Dead);
    }

    #[test]
    fn test_death_burst_evenly_spaced() {
        let burst = death_burst(8, 6.0);
        assert_eq!(burst.len(), 8);
        let sum: DVec2 = burst.iter().map(|s| s.direction).sum();
        assert!(sum.length() < 1e-9, "ring should be symmetric");
        let step = angle_of(burst[1].direction) - angle_of(burst[0].direction);
        assert!((step - TAU / 8.0).abs() < 1e-9);
        assert!(burst.iter().all(|s| s.pattern == MovementPattern::Drift));
    }

    #[test]
    fn test_wave_fans_three_shots() {
        let tuning = EnemyTuning::default();
        let shots = shoot(ShootPattern::Wave, DVec2::X, MovementPattern::Drift, &tuning);
        assert_eq!(shots.len(), 3);
        let left = angle_of(shots[0].direction);
        let right = angle_of(shots[2].direction);
        assert!((left + WAVE_SPREAD_ANGLE).abs() < 1e-9);
        assert!((right - WAVE_SPREAD_ANGLE).abs() < 1e-9);
        assert!((shots[1].direction - DVec2::X).length() < 1e-9);
    }

    #[test]
    fn test_slow_and_big_shot() {
        let tuning = EnemyTuning::default();
        let shots = shoot(ShootPattern::SlowAndBig, DVec2::Y, MovementPattern::Orbit, &tuning);
        assert_eq!(shots.len(), 1);
        assert!(shots[0].speed < tuning.bullet_speed);
        assert_eq!(shots[0].scale, SLOW_AND_BIG_SCALE);
        assert_eq!(shots[0].pattern, MovementPattern::Orbit);
    }

    #[test]
    fn test_zigzag_deviates_from_base() {
        let tuning = EnemyTuning::default();
        let mut state = EnemyBehavior {
            age_secs: 0.3,
            zigzag_phase: 0.0,
            ..Default::default()
        };
        let dir = modulate_direction(MovementPattern::ZigZag, DVec2::X, &mut state, DT, &tuning);
        assert!((dir.length() - 1.0).abs() < 1e-9);
        assert!(dir.y.abs() > 0.1);
    }

    #[test]
    fn test_orbit_advances_accumulator() {
        let tuning = EnemyTuning::default();
        let mut state = EnemyBehavior::default();
        modulate_direction(MovementPattern::Orbit, DVec2::X, &mut state, 1.0, &tuning);
        assert!((state.orbit_angle - ENEMY_ORBIT_SPEED).abs() < 1e-9);
    }

    #[test]
    fn test_drift_bullet_moves_straight() {
        let tuning = EnemyTuning::default();
        let mut flight = PatternedFlight {
            pattern: MovementPattern::Drift,
            forward: DVec2::Y,
            right: DVec2::X,
            speed: 6.0,
            age_secs: 0.0,
            orbit_angle: 0.0,
            zigzag_phase: 0.0,
        };
        let v = bullet_velocity(&mut flight, DT, &tuning);
        assert_eq!(v, DVec2::new(0.0, 6.0));
        assert!((flight.age_secs - DT).abs() < 1e-12);
    }
}
