use tracing::debug;

use crate::components::Decay;
use crate::world::World;

use super::TickStats;

pub(crate) fn run(world: &mut World, stats: &mut TickStats) {
    for id in world.matching::<(Decay,)>() {
        let Some(decay) = world.try_get_mut::<Decay>(id) else {
            continue;
        };
        if decay.duration > 0 {
            decay.duration -= 1;
            continue;
        }
        world.despawn(id);
        stats.decayed = stats.decayed.saturating_add(1);
        debug!(entity_id = id.0, "entity_decayed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Position;
    use crate::world::MapBounds;

    #[test]
    fn counter_above_zero_only_decrements() {
        let mut world = World::new(MapBounds::new(4, 4));
        let id = world.spawn((Decay { duration: 2 }, Position::at(0, 0)));
        let mut stats = TickStats::default();

        run(&mut world, &mut stats);
        assert_eq!(world.get::<Decay>(id).expect("decay").duration, 1);
        run(&mut world, &mut stats);
        assert_eq!(world.get::<Decay>(id).expect("decay").duration, 0);
        assert!(world.is_alive(id));
        assert_eq!(stats.decayed, 0);
    }

    #[test]
    fn counter_at_zero_despawns_without_grace_tick() {
        let mut world = World::new(MapBounds::new(4, 4));
        let doomed = world.spawn((Decay { duration: 0 }, Position::at(1, 1)));
        let survivor = world.spawn((Decay { duration: 5 },));
        let mut stats = TickStats::default();

        run(&mut world, &mut stats);
        assert!(!world.is_alive(doomed));
        assert!(world.try_get::<Position>(doomed).is_none());
        assert!(world.is_alive(survivor));
        assert_eq!(stats.decayed, 1);
    }
}
