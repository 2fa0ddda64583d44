//! Entity factories. Each one attaches a fixed component bundle.

use crate::components::{
    Collider, Decay, Enemy, EnemyKind, Health, Item, ItemKind, Position, Projectile, Renderable,
    Rgb, Seeker, Stamina, Velocity,
};
use crate::error::SimResult;
use crate::world::{EntityId, World};

pub const PLAYER_HEALTH: u32 = 10;
pub const PLAYER_STAMINA: u32 = 10;
pub const PROJECTILE_RANGE_TICKS: u32 = 10;
pub const PROJECTILE_DAMAGE: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    pub fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerStats {
    pub health: u32,
    pub stamina: u32,
}

impl Default for PlayerStats {
    fn default() -> Self {
        Self {
            health: PLAYER_HEALTH,
            stamina: PLAYER_STAMINA,
        }
    }
}

pub fn make_player(world: &mut World, x: i32, y: i32, stats: PlayerStats) -> EntityId {
    world.spawn((
        Renderable::new('@', Rgb::WHITE),
        Position::at(x, y),
        Health::new(stats.health),
        Stamina::new(stats.stamina),
        Collider,
    ))
}

/// Filled `width` x `height` block of wall cells with its corner at `(x, y)`.
pub fn make_building(world: &mut World, x: i32, y: i32, width: i32, height: i32) -> Vec<EntityId> {
    let mut walls = Vec::new();
    for wall_x in x..x.saturating_add(width) {
        for wall_y in y..y.saturating_add(height) {
            walls.push(world.spawn((
                Renderable::new('%', Rgb::GREY),
                Position::at(wall_x, wall_y),
                Collider,
            )));
        }
    }
    walls
}

pub fn make_tree(world: &mut World, x: i32, y: i32) -> EntityId {
    world.spawn((
        Renderable::new('#', Rgb::GREEN),
        Position::at(x, y),
        Collider,
    ))
}

pub fn make_enemy(world: &mut World, kind: EnemyKind, x: i32, y: i32) -> EntityId {
    world.spawn((
        kind.renderable(),
        Position::at(x, y),
        Health::with_inventory(kind.health(), kind.starting_inventory()),
        Collider,
        Seeker { aggro: kind.aggro() },
        Enemy(kind),
    ))
}

pub fn make_item_pile(world: &mut World, kind: ItemKind, x: i32, y: i32, z: i32) -> EntityId {
    world.spawn((
        kind.renderable(),
        Position {
            z,
            ..Position::overlapping(x, y)
        },
        Collider,
        Item(kind),
    ))
}

/// Spawns a projectile on the shooter's cell travelling in `direction`.
pub fn fire_projectile(
    world: &mut World,
    shooter: EntityId,
    direction: Direction,
) -> SimResult<EntityId> {
    let origin = *world.get::<Position>(shooter)?;
    let (dx, dy) = direction.delta();
    Ok(world.spawn((
        Renderable::new('*', Rgb::RED),
        Position {
            overlap: true,
            ..origin
        },
        Velocity::new(dx, dy, PROJECTILE_RANGE_TICKS),
        Decay {
            duration: PROJECTILE_RANGE_TICKS,
        },
        Projectile {
            damage: PROJECTILE_DAMAGE,
        },
        Collider,
    )))
}
