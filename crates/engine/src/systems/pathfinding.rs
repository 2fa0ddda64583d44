use tracing::{debug, warn};

use crate::components::{Position, Seeker, Velocity};
use crate::world::{EntityId, World};

use super::nav::{CostGrid, GridCell};
use super::TickStats;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PursuitDecision {
    Step { dx: i32, dy: i32 },
    NoPath,
    OutOfRange { steps: usize },
    Arrived,
}

/// Gives each seeker a single cardinal step toward the player. The cost grid
/// is rebuilt every tick since colliders move between ticks.
pub(crate) fn run(world: &mut World, player: EntityId, stats: &mut TickStats) {
    let Some(goal) = world.try_get::<Position>(player).copied() else {
        return;
    };
    let seekers = world.matching::<(Seeker, Position)>();
    if seekers.is_empty() {
        return;
    }
    let grid = CostGrid::from_world(world, goal.z);
    let goal_cell = GridCell::new(goal.x, goal.y);

    for id in seekers {
        if id == player {
            continue;
        }
        let (Some(seeker), Some(start)) = (
            world.try_get::<Seeker>(id).copied(),
            world.try_get::<Position>(id).copied(),
        ) else {
            continue;
        };
        if start.z != goal.z {
            continue;
        }

        let decision = decide(&grid, GridCell::new(start.x, start.y), goal_cell, seeker.aggro);
        match decision {
            PursuitDecision::Step { dx, dy } => {
                if let Err(error) = world.insert(id, Velocity::step(dx, dy)) {
                    warn!(seeker_id = id.0, error = %error, "seeker_step_rejected");
                    continue;
                }
                stats.seekers_moved = stats.seekers_moved.saturating_add(1);
            }
            PursuitDecision::NoPath => {
                stats.seekers_idle = stats.seekers_idle.saturating_add(1);
                debug!(seeker_id = id.0, "seeker_no_path");
            }
            PursuitDecision::OutOfRange { steps } => {
                stats.seekers_idle = stats.seekers_idle.saturating_add(1);
                debug!(
                    seeker_id = id.0,
                    steps,
                    aggro = seeker.aggro,
                    "seeker_out_of_range"
                );
            }
            PursuitDecision::Arrived => {
                stats.seekers_idle = stats.seekers_idle.saturating_add(1);
            }
        }
    }
}

fn decide(grid: &CostGrid, start: GridCell, goal: GridCell, aggro: u32) -> PursuitDecision {
    let Some(path) = grid.find_path(start, goal) else {
        return PursuitDecision::NoPath;
    };
    if path.len() < 2 {
        return PursuitDecision::Arrived;
    }
    let steps = path.len() - 1;
    if steps > aggro as usize {
        return PursuitDecision::OutOfRange { steps };
    }
    PursuitDecision::Step {
        dx: path[1].x - path[0].x,
        dy: path[1].y - path[0].y,
    }
}
