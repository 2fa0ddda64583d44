//! Read-only projections of the world for front ends.

use crate::components::{Health, ItemKind, Position, Renderable, Rgb, Stamina};
use crate::world::{EntityId, World};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderCell {
    pub x: i32,
    pub y: i32,
    pub z: i32,
    pub glyph: char,
    pub color: Rgb,
    pub overlap: bool,
}

impl RenderCell {
    /// Overlap glyphs draw first so a solid occupant of the same cell wins.
    fn draw_order_key(&self) -> (i32, bool) {
        (self.z, !self.overlap)
    }
}

/// Every entity with both a glyph and a position, in draw order.
pub fn collect_render_cells(world: &World) -> Vec<RenderCell> {
    let mut cells = world
        .query::<(Renderable, Position)>()
        .map(|(id, (renderable, position))| {
            (
                id,
                RenderCell {
                    x: position.x,
                    y: position.y,
                    z: position.z,
                    glyph: renderable.glyph,
                    color: renderable.color,
                    overlap: position.overlap,
                },
            )
        })
        .collect::<Vec<_>>();
    cells.sort_by(|(left_id, left), (right_id, right)| {
        left.draw_order_key()
            .cmp(&right.draw_order_key())
            .then_with(|| left_id.cmp(right_id))
    });
    cells.into_iter().map(|(_, cell)| cell).collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerStatus {
    pub health: u32,
    pub max_health: u32,
    pub stamina: u32,
    pub max_stamina: u32,
    pub inventory: Vec<ItemKind>,
    pub position: Option<(i32, i32)>,
}

pub fn player_status(world: &World, player: EntityId) -> PlayerStatus {
    let health = world.try_get::<Health>(player);
    let stamina = world.try_get::<Stamina>(player);
    PlayerStatus {
        health: health.map_or(0, Health::current),
        max_health: health.map_or(0, Health::max),
        stamina: stamina.map_or(0, Stamina::current),
        max_stamina: stamina.map_or(0, Stamina::max),
        inventory: health.map(|health| health.inventory.clone()).unwrap_or_default(),
        position: world
            .try_get::<Position>(player)
            .map(|position| (position.x, position.y)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::{make_item_pile, make_player, PlayerStats};
    use crate::world::MapBounds;

    #[test]
    fn solid_glyph_draws_after_overlap_on_same_cell() {
        let mut world = World::new(MapBounds::new(8, 8));
        let player = make_player(&mut world, 3, 3, PlayerStats::default());
        make_item_pile(&mut world, ItemKind::Shiny, 3, 3, 0);

        let cells = collect_render_cells(&world);
        let glyphs = cells.iter().map(|cell| cell.glyph).collect::<String>();
        assert_eq!(glyphs, "$@");

        let status = player_status(&world, player);
        assert_eq!(status.health, 10);
        assert_eq!(status.position, Some((3, 3)));
        assert!(status.inventory.is_empty());
    }

    #[test]
    fn every_layer_is_drawn_lowest_first() {
        let mut world = World::new(MapBounds::new(8, 8));
        world.spawn((
            Renderable::new('^', Rgb::WHITE),
            Position {
                z: 1,
                ..Position::at(4, 4)
            },
        ));
        make_player(&mut world, 3, 3, PlayerStats::default());
        make_item_pile(&mut world, ItemKind::Food, 1, 1, 1);
        world.spawn((Position::at(5, 5),));

        let cells = collect_render_cells(&world);
        let drawn = cells
            .iter()
            .map(|cell| (cell.glyph, cell.z))
            .collect::<Vec<_>>();
        assert_eq!(drawn, vec![('@', 0), ('!', 1), ('^', 1)]);
    }

    #[test]
    fn missing_player_reports_empty_status() {
        let world = World::new(MapBounds::new(2, 2));
        let status = player_status(&world, EntityId(99));
        assert_eq!(status.max_health, 0);
        assert_eq!(status.position, None);
    }
}
