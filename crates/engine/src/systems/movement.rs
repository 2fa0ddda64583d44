use std::collections::HashMap;

use tracing::{debug, warn};

use crate::components::{Collider, Collision, Position, Velocity};
use crate::world::{EntityId, World};

use super::TickStats;

type Cell = (i32, i32, i32);

/// Collider occupancy by cell, built once per movement pass and kept in step
/// with committed moves.
#[derive(Debug, Default)]
struct Occupancy {
    cells: HashMap<Cell, Vec<(EntityId, bool)>>,
}

impl Occupancy {
    fn from_world(world: &World) -> Self {
        let mut occupancy = Self::default();
        for (id, (_, position)) in world.query::<(Collider, Position)>() {
            occupancy
                .cells
                .entry(position.cell())
                .or_default()
                .push((id, position.overlap));
        }
        occupancy
    }

    /// Blocking-first occupant of `cell`, ignoring `mover`.
    fn occupant(&self, mover: EntityId, cell: Cell) -> Option<(EntityId, bool)> {
        self.cells
            .get(&cell)?
            .iter()
            .filter(|(id, _)| *id != mover)
            .min_by_key(|(id, overlap)| (*overlap, *id))
            .copied()
    }

    fn relocate(&mut self, id: EntityId, from: Cell, to: Cell) {
        let Some(entries) = self.cells.get_mut(&from) else {
            return;
        };
        let Some(index) = entries.iter().position(|(entry, _)| *entry == id) else {
            return;
        };
        let entry = entries.swap_remove(index);
        if entries.is_empty() {
            self.cells.remove(&from);
        }
        self.cells.entry(to).or_default().push(entry);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StepOutcome {
    Drained,
    Blocked,
    Struck(EntityId),
}

/// Drains one tick of every entity's velocity in unit steps, stopping at the
/// first occupied cell.
pub(crate) fn run(world: &mut World, stats: &mut TickStats) {
    let bounds = world.bounds();
    let mut occupancy = Occupancy::from_world(world);

    for id in world.matching::<(Velocity, Position)>() {
        let (Some(mut velocity), Some(start)) = (
            world.try_get::<Velocity>(id).copied(),
            world.try_get::<Position>(id).copied(),
        ) else {
            continue;
        };
        if velocity.is_inert() {
            world.remove::<Velocity>(id);
            continue;
        }

        let mut position = start;
        let mut remaining = (velocity.x, velocity.y);
        let mut outcome = StepOutcome::Drained;
        while remaining != (0, 0) {
            let step = (remaining.0.clamp(-1, 1), remaining.1.clamp(-1, 1));
            remaining = (remaining.0 - step.0, remaining.1 - step.1);

            let (next_x, next_y) = bounds.clamp(position.x + step.0, position.y + step.1);
            if (next_x, next_y) == (position.x, position.y) {
                continue;
            }

            match occupancy.occupant(id, (next_x, next_y, position.z)) {
                None => {
                    position.x = next_x;
                    position.y = next_y;
                    stats.cells_moved = stats.cells_moved.saturating_add(1);
                }
                Some((occupant, occupant_overlap)) if position.overlap || occupant_overlap => {
                    outcome = StepOutcome::Struck(occupant);
                    break;
                }
                Some(_) => {
                    outcome = StepOutcome::Blocked;
                    break;
                }
            }
        }

        match outcome {
            StepOutcome::Drained => {}
            StepOutcome::Blocked => {
                stats.blocked_moves = stats.blocked_moves.saturating_add(1);
            }
            StepOutcome::Struck(occupant) => {
                velocity.duration = 0;
                stats.collisions = stats.collisions.saturating_add(1);
                if let Err(error) = world.insert(occupant, Collision { striker: id }) {
                    warn!(striker = id.0, occupant = occupant.0, error = %error, "collision_target_missing");
                } else {
                    debug!(striker = id.0, occupant = occupant.0, "collision_recorded");
                }
            }
        }
        velocity.duration = velocity.duration.saturating_sub(1);
        if position.cell() != start.cell() {
            occupancy.relocate(id, start.cell(), position.cell());
        }

        if let Some(stored) = world.try_get_mut::<Position>(id) {
            stored.x = position.x;
            stored.y = position.y;
        }
        if let Some(stored) = world.try_get_mut::<Velocity>(id) {
            *stored = velocity;
        }
    }
}
