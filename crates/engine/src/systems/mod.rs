mod collision;
mod conditions;
mod death;
mod decay;
mod movement;
mod nav;
mod pathfinding;

use std::collections::HashSet;

use tracing::debug;

use crate::components::{Collider, Collision, Health, Position, Stamina};
use crate::error::{SimError, SimResult};
use crate::world::{EntityId, World};

pub use nav::{CostGrid, GridCell, CELL_BLOCKED, CELL_DISCOURAGED, CELL_OPEN};

pub const SYSTEM_ORDER_TEXT: &str =
    "Decay>Pathfinding>Movement>CollisionResolution>Conditions>Death";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemId {
    Decay,
    Pathfinding,
    Movement,
    CollisionResolution,
    Conditions,
    Death,
}

impl SystemId {
    pub fn name(self) -> &'static str {
        match self {
            Self::Decay => "Decay",
            Self::Pathfinding => "Pathfinding",
            Self::Movement => "Movement",
            Self::CollisionResolution => "CollisionResolution",
            Self::Conditions => "Conditions",
            Self::Death => "Death",
        }
    }
}

pub const SYSTEM_ORDER: [SystemId; 6] = [
    SystemId::Decay,
    SystemId::Pathfinding,
    SystemId::Movement,
    SystemId::CollisionResolution,
    SystemId::Conditions,
    SystemId::Death,
];

/// Counters gathered while one tick runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickStats {
    pub decayed: u32,
    pub seekers_moved: u32,
    pub seekers_idle: u32,
    pub cells_moved: u32,
    pub collisions: u32,
    pub blocked_moves: u32,
    pub projectile_hits: u32,
    pub items_collected: u32,
    pub deaths: u32,
    pub items_dropped: u32,
    pub player_dead: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    pub tick: u64,
    pub stats: TickStats,
}

#[derive(Debug, Default)]
pub struct SystemsHost {
    ticks_run: u64,
    last_tick_order: Vec<SystemId>,
}

impl SystemsHost {
    pub fn ticks_run(&self) -> u64 {
        self.ticks_run
    }

    pub fn last_tick_order(&self) -> &[SystemId] {
        &self.last_tick_order
    }

    /// Runs every system once in [`SYSTEM_ORDER`], then checks the world's
    /// consistency. An error here is fatal for the session.
    pub fn run_tick(&mut self, world: &mut World, player: EntityId) -> SimResult<TickReport> {
        let mut stats = TickStats::default();
        self.last_tick_order.clear();
        for system_id in SYSTEM_ORDER {
            self.last_tick_order.push(system_id);
            run_system(system_id, world, player, &mut stats);
        }
        self.ticks_run = self.ticks_run.saturating_add(1);

        check_invariants(world)?;
        debug!(
            tick = self.ticks_run,
            entity_count = world.entity_count(),
            decayed = stats.decayed,
            seekers_moved = stats.seekers_moved,
            collisions = stats.collisions,
            deaths = stats.deaths,
            "tick_completed"
        );
        Ok(TickReport {
            tick: self.ticks_run,
            stats,
        })
    }
}

fn run_system(system_id: SystemId, world: &mut World, player: EntityId, stats: &mut TickStats) {
    match system_id {
        SystemId::Decay => decay::run(world, stats),
        SystemId::Pathfinding => pathfinding::run(world, player, stats),
        SystemId::Movement => movement::run(world, stats),
        SystemId::CollisionResolution => collision::run(world, player, stats),
        SystemId::Conditions => conditions::run(world),
        SystemId::Death => death::run(world, player, stats),
    }
}

/// Post-tick consistency check. Clamped mutators make these unreachable, so
/// any hit means a system is broken.
pub fn check_invariants(world: &World) -> SimResult<()> {
    if let Some((id, _)) = world.query::<(Collision,)>().next() {
        return Err(SimError::InvariantViolation(format!(
            "collision marker survived the tick on entity {}",
            id.0
        )));
    }

    for (id, (health,)) in world.query::<(Health,)>() {
        if health.current() > health.max() {
            return Err(SimError::InvariantViolation(format!(
                "entity {} health {} exceeds max {}",
                id.0,
                health.current(),
                health.max()
            )));
        }
    }

    for (id, (stamina,)) in world.query::<(Stamina,)>() {
        if stamina.current() > stamina.max() {
            return Err(SimError::InvariantViolation(format!(
                "entity {} stamina {} exceeds max {}",
                id.0,
                stamina.current(),
                stamina.max()
            )));
        }
    }

    let bounds = world.bounds();
    for (id, (position,)) in world.query::<(Position,)>() {
        if !bounds.contains(position.x, position.y) {
            return Err(SimError::InvariantViolation(format!(
                "entity {} at ({}, {}) is outside the {}x{} map",
                id.0, position.x, position.y, bounds.width, bounds.height
            )));
        }
    }

    let mut occupied = HashSet::new();
    for (id, (_, position)) in world.query::<(Collider, Position)>() {
        if position.overlap {
            continue;
        }
        if !occupied.insert(position.cell()) {
            return Err(SimError::InvariantViolation(format!(
                "entity {} shares cell ({}, {}, {}) with another collider",
                id.0, position.x, position.y, position.z
            )));
        }
    }

    Ok(())
}
