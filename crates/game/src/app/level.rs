use std::collections::HashSet;

use engine::{
    make_building, make_enemy, make_tree, Collider, EnemyKind, MapBounds, PlayerStats, Position,
    Simulation, World,
};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{info, warn};

use super::config::{GameConfig, RectConfig};

/// Builds the starting level: player, buildings, forest and humans.
pub(crate) fn build_level<R: Rng + ?Sized>(config: &GameConfig, rng: &mut R) -> Simulation {
    let bounds = config.map_bounds();
    let mut sim = Simulation::new(
        bounds,
        config.player_start,
        PlayerStats {
            health: config.player_health,
            stamina: config.player_stamina,
        },
    );
    let world = sim.world_mut();

    for rect in &config.buildings {
        let Some((x, y, width, height)) = clip_rect(*rect, bounds) else {
            warn!(x = rect.x, y = rect.y, "building_outside_map");
            continue;
        };
        let occupied = solid_cells(world);
        let blocked = (x..x + width)
            .flat_map(|cell_x| (y..y + height).map(move |cell_y| (cell_x, cell_y)))
            .any(|cell| occupied.contains(&cell));
        if blocked {
            warn!(x, y, width, height, "building_skipped_occupied");
            continue;
        }
        make_building(world, x, y, width, height);
    }

    if let Some((x, y, width, height)) = config.forest.and_then(|rect| clip_rect(rect, bounds)) {
        let occupied = solid_cells(world);
        for tree_x in x..x + width {
            for tree_y in y..y + height {
                if !occupied.contains(&(tree_x, tree_y)) {
                    make_tree(world, tree_x, tree_y);
                }
            }
        }
    }

    for _ in 0..config.human_count {
        let free = free_cells(world, bounds);
        let Some(&(x, y)) = free.choose(rng) else {
            warn!("no_free_cell_for_human");
            break;
        };
        make_enemy(world, EnemyKind::Human, x, y);
    }

    info!(
        entity_count = sim.world().entity_count(),
        humans = config.human_count,
        "level_built"
    );
    sim
}

fn clip_rect(rect: RectConfig, bounds: MapBounds) -> Option<(i32, i32, i32, i32)> {
    let left = rect.x.max(0);
    let top = rect.y.max(0);
    let right = rect.x.saturating_add(rect.width).min(bounds.width);
    let bottom = rect.y.saturating_add(rect.height).min(bounds.height);
    (right > left && bottom > top).then(|| (left, top, right - left, bottom - top))
}

fn solid_cells(world: &World) -> HashSet<(i32, i32)> {
    world
        .query::<(Collider, Position)>()
        .filter(|(_, (_, position))| !position.overlap && position.z == 0)
        .map(|(_, (_, position))| (position.x, position.y))
        .collect()
}

fn free_cells(world: &World, bounds: MapBounds) -> Vec<(i32, i32)> {
    let occupied = solid_cells(world);
    (0..bounds.height)
        .flat_map(|y| (0..bounds.width).map(move |x| (x, y)))
        .filter(|cell| !occupied.contains(cell))
        .collect()
}

#[cfg(test)]
mod tests {
    use engine::{check_invariants, Enemy, Renderable};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn glyph_count(sim: &Simulation, glyph: char) -> usize {
        sim.world()
            .query::<(Renderable,)>()
            .filter(|(_, (renderable,))| renderable.glyph == glyph)
            .count()
    }

    #[test]
    fn stock_level_has_buildings_forest_and_one_human() {
        let config = GameConfig::default();
        let sim = build_level(&config, &mut StdRng::seed_from_u64(1));

        assert_eq!(glyph_count(&sim, '%'), 50);
        // Forest rows 40..45 fall below the 40-row map.
        assert_eq!(glyph_count(&sim, '#'), 15 * 15);
        assert_eq!(sim.world().count::<Enemy>(), 1);
        check_invariants(sim.world()).expect("no stacked solids");
    }

    #[test]
    fn humans_spawn_only_on_free_cells() {
        let config = GameConfig {
            width: 4,
            height: 4,
            hud_height: 0,
            buildings: vec![RectConfig {
                x: 0,
                y: 1,
                width: 4,
                height: 3,
            }],
            forest: None,
            human_count: 5,
            ..GameConfig::default()
        };
        let sim = build_level(&config, &mut StdRng::seed_from_u64(9));

        // Only row 0 minus the player's cell is open.
        assert_eq!(sim.world().count::<Enemy>(), 3);
        check_invariants(sim.world()).expect("no stacked solids");
    }

    #[test]
    fn building_over_player_is_skipped() {
        let config = GameConfig {
            player_start: (3, 3),
            buildings: vec![RectConfig {
                x: 2,
                y: 2,
                width: 3,
                height: 3,
            }],
            forest: None,
            human_count: 0,
            ..GameConfig::default()
        };
        let sim = build_level(&config, &mut StdRng::seed_from_u64(0));
        assert_eq!(glyph_count(&sim, '%'), 0);
    }

    #[test]
    fn clip_drops_rects_fully_outside() {
        let bounds = MapBounds::new(10, 10);
        let rect = |x, y, width, height| RectConfig {
            x,
            y,
            width,
            height,
        };
        assert_eq!(clip_rect(rect(8, 8, 5, 5), bounds), Some((8, 8, 2, 2)));
        assert_eq!(clip_rect(rect(-2, 0, 4, 1), bounds), Some((0, 0, 2, 1)));
        assert_eq!(clip_rect(rect(12, 0, 4, 4), bounds), None);
        assert_eq!(clip_rect(rect(i32::MAX, 0, 5, 5), bounds), None);
        assert_eq!(clip_rect(rect(i32::MIN, 2, i32::MAX, 1), bounds), None);
        assert_eq!(clip_rect(rect(3, 3, -2, 4), bounds), None);
    }

    #[test]
    fn extreme_rectangles_are_skipped_not_fatal() {
        let config = GameConfig {
            buildings: vec![RectConfig {
                x: i32::MAX,
                y: 0,
                width: 5,
                height: 5,
            }],
            forest: Some(RectConfig {
                x: 0,
                y: i32::MAX - 1,
                width: 3,
                height: i32::MAX,
            }),
            human_count: 0,
            ..GameConfig::default()
        };
        let sim = build_level(&config, &mut StdRng::seed_from_u64(2));
        assert_eq!(sim.world().entity_count(), 1);
    }
}
