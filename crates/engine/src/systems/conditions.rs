use crate::components::{Health, Poison, Recovery, Stamina, Velocity};
use crate::world::World;

/// Applies recovery then poison to each affected Health, and halts movers
/// whose stamina is spent.
pub(crate) fn run(world: &mut World) {
    let mut affected = world.matching::<(Recovery, Health)>();
    affected.extend(world.matching::<(Poison, Health)>());
    affected.sort_unstable();
    affected.dedup();

    for id in affected {
        let heal = world.try_get::<Recovery>(id).map_or(0, |recovery| recovery.effect);
        let damage = world.try_get::<Poison>(id).map_or(0, |poison| poison.effect);
        if let Some(health) = world.try_get_mut::<Health>(id) {
            health.apply_effects(heal, damage);
        }
    }

    for id in world.matching::<(Stamina, Velocity)>() {
        let exhausted = world
            .try_get::<Stamina>(id)
            .is_some_and(Stamina::is_depleted);
        if !exhausted {
            continue;
        }
        if let Some(velocity) = world.try_get_mut::<Velocity>(id) {
            velocity.x = 0;
            velocity.y = 0;
        }
    }
}
