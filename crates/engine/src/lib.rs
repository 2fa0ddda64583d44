//! Entity-component kernel for a turn-based grid game: component storage,
//! entity factories and the fixed per-tick system pipeline.

pub mod components;
pub mod error;
pub mod factory;
pub mod render;
pub mod simulation;
pub mod systems;
pub mod world;

pub use components::{
    Collider, Collision, Decay, Enemy, EnemyKind, Health, Item, ItemKind, Poison, Position,
    Projectile, Recovery, Renderable, Rgb, Seeker, Stamina, Velocity,
};
pub use error::{SimError, SimResult};
pub use factory::{
    fire_projectile, make_building, make_enemy, make_item_pile, make_player, make_tree,
    Direction, PlayerStats, PLAYER_HEALTH, PLAYER_STAMINA, PROJECTILE_DAMAGE,
    PROJECTILE_RANGE_TICKS,
};
pub use render::{PlayerStatus, RenderCell};
pub use simulation::Simulation;
pub use systems::{
    check_invariants, CostGrid, GridCell, SystemId, SystemsHost, TickReport, TickStats,
    SYSTEM_ORDER, SYSTEM_ORDER_TEXT,
};
pub use world::{Bundle, Component, EntityId, MapBounds, Query, World};
