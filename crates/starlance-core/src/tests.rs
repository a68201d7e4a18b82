#[cfg(test)]
mod tests {
    use crate::commands::{ControlInput, PlayerCommand};
    use crate::enums::*;
    use crate::error::SimError;
    use crate::events::SimEvent;
    use crate::state::GameStateSnapshot;
    use crate::tuning::Tuning;
    use crate::types::DVec2;

    #[test]
    fn test_command_json_is_tagged() {
        let cmd = PlayerCommand::SelectSize {
            size: SizeClass::Large,
        };
        let json = serde_json::to_string(&cmd).unwrap();
        assert!(json.contains("\"type\":\"SelectSize\""), "{json}");
        let back: PlayerCommand = serde_json::from_str(&json).unwrap();
        assert!(matches!(
            back,
            PlayerCommand::SelectSize {
                size: SizeClass::Large
            }
        ));

        let back: PlayerCommand = serde_json::from_str(r#"{"type":"SpawnBoss","index":1}"#).unwrap();
        assert!(matches!(back, PlayerCommand::SpawnBoss { index: 1 }));
    }

    #[test]
    fn test_control_input_clamps_axes() {
        let input = ControlInput {
            thrust: 3.0,
            turn: -7.5,
            fire: true,
        }
        .clamped();
        assert_eq!(input.thrust, 1.0);
        assert_eq!(input.turn, -1.0);
        assert!(input.fire);
    }

    #[test]
    fn test_size_class_index_mapping() {
        for i in 0..3 {
            let size = SizeClass::from_index(i).unwrap();
            assert_eq!(size.index(), i);
        }
        assert!(SizeClass::from_index(3).is_none());
        assert_eq!(SizeClass::Medium.label(), "Medium");
    }

    #[test]
    fn test_snapshot_serializes_events() {
        let mut snap = GameStateSnapshot::default();
        snap.events.push(SimEvent::Explosion {
            position: DVec2::new(1.0, 2.0),
            scale: 2.0,
        });
        snap.events.push(SimEvent::PlayerHidden);
        let json = serde_json::to_string(&snap).unwrap();
        let back: GameStateSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.events, snap.events);
        assert_eq!(back.phase, GamePhase::Idle);
    }

    #[test]
    fn test_default_tuning_validates() {
        Tuning::default().validate().unwrap();
        Tuning::with_default_bosses().validate().unwrap();
    }

    #[test]
    fn test_partial_json_overrides_only_named_fields() {
        let tuning = Tuning::from_json(
            r#"{ "gun": { "build_up_time": 2.0 }, "health": { "player_max_health": 50.0 } }"#,
        )
        .unwrap();
        assert_eq!(tuning.gun.build_up_time, 2.0);
        assert_eq!(tuning.health.player_max_health, 50.0);
        // Untouched fields keep their defaults.
        let defaults = Tuning::default();
        assert_eq!(tuning.gun.base_min_fire_rate, defaults.gun.base_min_fire_rate);
        assert_eq!(tuning.missile.max_speed, defaults.missile.max_speed);
        assert_eq!(tuning.world.enemies.len(), defaults.world.enemies.len());
    }

    #[test]
    fn test_null_template_parses_as_missing() {
        let tuning = Tuning::from_json(r#"{ "templates": { "missile": null } }"#).unwrap();
        assert!(tuning.templates.missile.is_none());
        assert!(tuning.templates.player_bullet.is_some());
    }

    #[test]
    fn test_invalid_build_up_time_rejected() {
        let err = Tuning::from_json(r#"{ "gun": { "build_up_time": 0.0 } }"#).unwrap_err();
        match err {
            SimError::InvalidTuning { field, .. } => assert_eq!(field, "gun.build_up_time"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_inverted_fire_rates_rejected() {
        let err = Tuning::from_json(
            r#"{ "gun": { "base_min_fire_rate": 0.1, "base_max_fire_rate": 0.5 } }"#,
        )
        .unwrap_err();
        assert!(matches!(err, SimError::InvalidTuning { .. }));
    }

    #[test]
    fn test_bullet_time_scale_range() {
        let err = Tuning::from_json(r#"{ "health": { "bullet_time_scale": 0.0 } }"#).unwrap_err();
        assert!(err.to_string().contains("bullet_time_scale"));
    }

    fn rejected_field(json: &str) -> &'static str {
        match Tuning::from_json(json).unwrap_err() {
            SimError::InvalidTuning { field, .. } => field,
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_random_ranges_rejected() {
        assert_eq!(
            rejected_field(r#"{ "gun": { "missile_spawn_offset_min": 2.0 } }"#),
            "gun.missile_spawn_offset_min"
        );
        assert_eq!(
            rejected_field(r#"{ "gun": { "missile_jitter_angle": -0.1 } }"#),
            "gun.missile_jitter_angle"
        );
        assert_eq!(
            rejected_field(r#"{ "gun": { "max_kick_angle": -0.1 } }"#),
            "gun.max_kick_angle"
        );
        assert_eq!(
            rejected_field(r#"{ "gun": { "bullet_offset_angle": -0.1 } }"#),
            "gun.bullet_offset_angle"
        );
        assert_eq!(
            rejected_field(r#"{ "world": { "play_bounds": [-1.0, 10.0] } }"#),
            "world.play_bounds.x"
        );
    }

    #[test]
    fn test_equal_spawn_offsets_allowed() {
        let tuning = Tuning::from_json(
            r#"{ "gun": { "missile_spawn_offset_min": 0.5, "missile_spawn_offset_max": 0.5 } }"#,
        )
        .unwrap();
        assert_eq!(tuning.gun.missile_spawn_offset_min, 0.5);
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = Tuning::from_json("{ not json").unwrap_err();
        assert!(matches!(err, SimError::TuningParse(_)));
    }

    #[test]
    fn test_boss_entry_defaults() {
        let tuning = Tuning::from_json(
            r#"{ "bosses": [ { "name": "Warden", "position": [5.0, 5.0] } ] }"#,
        )
        .unwrap();
        let boss = &tuning.bosses[0];
        assert_eq!(boss.name, "Warden");
        assert_eq!(boss.health, crate::constants::BOSS_HEALTH);
        assert_eq!(boss.movement, MovementPattern::Drift);
    }
}
