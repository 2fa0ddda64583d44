use tracing::debug;

use crate::components::{Collision, Decay, Health, Item, Projectile, Velocity};
use crate::world::{EntityId, World};

use super::TickStats;

/// Consumes this tick's collision markers: projectile hits, then pickups, then
/// clears anything left over.
pub(crate) fn run(world: &mut World, player: EntityId, stats: &mut TickStats) {
    resolve_projectile_hits(world, stats);
    resolve_pickups(world, player, stats);

    for id in world.matching::<(Collision,)>() {
        world.remove::<Collision>(id);
    }
}

fn resolve_projectile_hits(world: &mut World, stats: &mut TickStats) {
    for id in world.matching::<(Health, Collision)>() {
        let Some(collision) = world.try_get::<Collision>(id).copied() else {
            continue;
        };
        let Some(projectile) = world.try_get::<Projectile>(collision.striker).copied() else {
            continue;
        };
        if let Some(health) = world.try_get_mut::<Health>(id) {
            health.damage(projectile.damage);
            debug!(
                target_id = id.0,
                projectile_id = collision.striker.0,
                damage = projectile.damage,
                remaining = health.current(),
                "projectile_hit"
            );
        }
        schedule_removal(world, collision.striker);
        world.remove::<Collision>(id);
        stats.projectile_hits = stats.projectile_hits.saturating_add(1);
    }
}

fn resolve_pickups(world: &mut World, player: EntityId, stats: &mut TickStats) {
    for id in world.matching::<(Item, Collision)>() {
        let (Some(collision), Some(Item(kind))) = (
            world.try_get::<Collision>(id).copied(),
            world.try_get::<Item>(id).copied(),
        ) else {
            continue;
        };
        if collision.striker != player {
            continue;
        }
        let Some(health) = world.try_get_mut::<Health>(player) else {
            continue;
        };
        health.inventory.push(kind);
        schedule_removal(world, id);
        world.remove::<Collision>(id);
        stats.items_collected = stats.items_collected.saturating_add(1);
        debug!(item_id = id.0, item = kind.name(), "item_collected");
    }
}

/// Leaves the entity visible for this frame; the next decay pass removes it.
fn schedule_removal(world: &mut World, id: EntityId) {
    world.remove::<Velocity>(id);
    if world.insert(id, Decay { duration: 0 }).is_err() {
        debug!(entity_id = id.0, "removal_target_already_gone");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{Collider, ItemKind, Position};
    use crate::world::MapBounds;

    fn world() -> World {
        World::new(MapBounds::new(8, 8))
    }

    #[test]
    fn projectile_hit_damages_and_schedules_projectile() {
        let mut world = world();
        let player = world.spawn((Position::at(0, 0), Health::new(10)));
        let bolt = world.spawn((
            Position::overlapping(3, 2),
            Projectile { damage: 2 },
            Decay { duration: 7 },
        ));
        let target = world.spawn((Position::at(3, 1), Health::new(5)));
        world
            .insert(target, Collision { striker: bolt })
            .expect("alive");

        let mut stats = TickStats::default();
        run(&mut world, player, &mut stats);

        assert_eq!(world.get::<Health>(target).expect("health").current(), 3);
        assert_eq!(world.get::<Decay>(bolt).expect("decay").duration, 0);
        assert!(world.is_alive(bolt));
        assert!(!world.has::<Collision>(target));
        assert_eq!(stats.projectile_hits, 1);
    }

    #[test]
    fn player_collects_item_into_inventory() {
        let mut world = world();
        let player = world.spawn((Position::at(1, 1), Health::new(10), Collider));
        let food = world.spawn((Position::overlapping(2, 1), Collider, Item(ItemKind::Food)));
        world
            .insert(food, Collision { striker: player })
            .expect("alive");

        let mut stats = TickStats::default();
        run(&mut world, player, &mut stats);

        assert_eq!(
            world.get::<Health>(player).expect("health").inventory,
            vec![ItemKind::Food]
        );
        assert_eq!(world.get::<Decay>(food).expect("decay").duration, 0);
        assert_eq!(stats.items_collected, 1);
    }

    #[test]
    fn non_player_bumping_item_only_clears_marker() {
        let mut world = world();
        let player = world.spawn((Position::at(0, 0), Health::new(10)));
        let wanderer = world.spawn((Position::at(4, 4), Health::new(3)));
        let shiny = world.spawn((Position::overlapping(5, 4), Collider, Item(ItemKind::Shiny)));
        world
            .insert(shiny, Collision { striker: wanderer })
            .expect("alive");

        run(&mut world, player, &mut TickStats::default());

        assert!(!world.has::<Collision>(shiny));
        assert!(!world.has::<Decay>(shiny));
        assert!(world.get::<Health>(player).expect("health").inventory.is_empty());
    }

    #[test]
    fn non_projectile_strike_on_health_is_a_no_op() {
        let mut world = world();
        let player = world.spawn((Position::at(0, 0), Health::new(10)));
        let rock = world.spawn((Position::overlapping(2, 2), Collider));
        world
            .insert(player, Collision { striker: rock })
            .expect("alive");

        run(&mut world, player, &mut TickStats::default());

        assert_eq!(world.get::<Health>(player).expect("health").current(), 10);
        assert_eq!(world.count::<Collision>(), 0);
    }
}
