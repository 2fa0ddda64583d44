use tracing::{debug, info};

use crate::components::{Health, Position};
use crate::factory::make_item_pile;
use crate::world::{EntityId, World};

use super::TickStats;

/// Removes every dead non-player entity, dropping its inventory where it stood.
pub(crate) fn run(world: &mut World, player: EntityId, stats: &mut TickStats) {
    for id in world.matching::<(Health,)>() {
        let dead = world.try_get::<Health>(id).is_some_and(Health::is_dead);
        if !dead {
            continue;
        }
        if id == player {
            if !stats.player_dead {
                info!(entity_id = id.0, "player_died");
            }
            stats.player_dead = true;
            continue;
        }

        let position = world.try_get::<Position>(id).copied();
        let inventory = world
            .try_get_mut::<Health>(id)
            .map(|health| std::mem::take(&mut health.inventory))
            .unwrap_or_default();
        world.despawn(id);
        stats.deaths = stats.deaths.saturating_add(1);

        let Some(position) = position else {
            debug!(entity_id = id.0, dropped = 0, "entity_died");
            continue;
        };
        for kind in &inventory {
            make_item_pile(world, *kind, position.x, position.y, position.z);
        }
        stats.items_dropped = stats
            .items_dropped
            .saturating_add(inventory.len() as u32);
        debug!(
            entity_id = id.0,
            x = position.x,
            y = position.y,
            dropped = inventory.len(),
            "entity_died"
        );
    }
}
