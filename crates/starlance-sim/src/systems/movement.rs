//! Kinematic integration: position += velocity * dt.
//!
//! `TimeExempt` entities integrate on the real step; everything else on
//! the dilated world step.

use hecs::World;

use starlance_core::components::TimeExempt;
use starlance_core::types::KinematicBody;

pub fn run(world: &mut World, real_dt: f64, world_dt: f64) {
    for (_entity, (body, exempt)) in world.query_mut::<(&mut KinematicBody, Option<&TimeExempt>)>() {
        let dt = if exempt.is_some() { real_dt } else { world_dt };
        body.position += body.velocity * dt;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use starlance_core::types::DVec2;

    #[test]
    fn test_exempt_entities_ignore_dilation() {
        let mut world = World::new();
        let mut body = KinematicBody::default();
        body.velocity = DVec2::new(10.0, 0.0);
        let dilated = world.spawn((body,));
        let exempt = world.spawn((body, TimeExempt));

        run(&mut world, 0.02, 0.006);

        let d = world.get::<&KinematicBody>(dilated).unwrap().position.x;
        let e = world.get::<&KinematicBody>(exempt).unwrap().position.x;
        assert!((d - 0.06).abs() < 1e-12);
        assert!((e - 0.2).abs() < 1e-12);
    }
}
