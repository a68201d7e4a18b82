//! Enemy behavior finite state machine.
//!
//! Pure function from an enemy's situation to its next mode, velocity and
//! shots. No ECS dependency; operates on plain data.

use starlance_core::components::EnemyBehavior;
use starlance_core::enums::EnemyMode;
use starlance_core::tuning::EnemyTuning;
use starlance_core::types::{heading_vector, DVec2};

use crate::patterns::{death_burst, modulate_direction, shoot, Shot};

/// Input to the FSM for a single enemy.
pub struct EnemyContext<'a> {
    pub behavior: EnemyBehavior,
    pub position: DVec2,
    pub health: f64,
    /// Player position, `None` when there is no live player.
    pub player: Option<DVec2>,
    /// World seconds for this tick.
    pub dt: f64,
    /// Movement speed for this enemy.
    pub speed: f64,
    pub tuning: &'a EnemyTuning,
}

/// Output from the FSM.
#[derive(Debug, Clone)]
pub struct EnemyUpdate {
    pub behavior: EnemyBehavior,
    pub velocity: DVec2,
    pub shots: Vec<Shot>,
    pub mode_changed: bool,
    /// True only on the tick the enemy transitions to Dead.
    pub died: bool,
}

/// Evaluate the FSM for one enemy.
pub fn evaluate(ctx: &EnemyContext) -> EnemyUpdate {
    let mut state = ctx.behavior;

    if state.mode == EnemyMode::Dead {
        return EnemyUpdate {
            behavior: state,
            velocity: DVec2::ZERO,
            shots: Vec::new(),
            mode_changed: false,
            died: false,
        };
    }

    if ctx.health <= 0.0 {
        state.mode = EnemyMode::Dead;
        return EnemyUpdate {
            behavior: state,
            velocity: DVec2::ZERO,
            shots: death_burst(ctx.tuning.death_burst_count, ctx.tuning.bullet_speed),
            mode_changed: true,
            died: true,
        };
    }

    state.age_secs += ctx.dt;
    let previous = state.mode;

    let engaged_target = ctx
        .player
        .filter(|p| p.distance(ctx.position) <= ctx.tuning.detection_range);

    let (velocity, shots) = match engaged_target {
        Some(player) => {
            state.mode = EnemyMode::Engaging;
            engage(&mut state, ctx, player)
        }
        None => {
            state.mode = EnemyMode::Roaming;
            (roam(&mut state, ctx), Vec::new())
        }
    };

    EnemyUpdate {
        behavior: state,
        velocity,
        shots,
        mode_changed: state.mode != previous,
        died: false,
    }
}

fn engage(state: &mut EnemyBehavior, ctx: &EnemyContext, player: DVec2) -> (DVec2, Vec<Shot>) {
    let to_player = (player - ctx.position)
        .try_normalize()
        .unwrap_or(DVec2::X);
    let dir = modulate_direction(state.movement, to_player, state, ctx.dt, ctx.tuning);

    state.fire_timer += ctx.dt;
    let shots = if state.fire_timer >= ctx.tuning.fire_cooldown {
        state.fire_timer = 0.0;
        shoot(state.shoot, to_player, state.movement, ctx.tuning)
    } else {
        Vec::new()
    };

    (dir * ctx.speed, shots)
}

fn roam(state: &mut EnemyBehavior, ctx: &EnemyContext) -> DVec2 {
    let rally = ctx.tuning.rally_point;
    if ctx.position.distance(rally) > ctx.tuning.rally_threshold {
        return (rally - ctx.position).normalize_or_zero() * ctx.speed;
    }
    state.roam_angle += ctx.tuning.orbit_speed * ctx.dt;
    let orbit_dir = heading_vector(state.roam_angle);
    modulate_direction(state.movement, orbit_dir, state, ctx.dt, ctx.tuning) * ctx.speed
}
