use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::components::{Collider, Position};
use crate::world::{MapBounds, World};

pub const CELL_BLOCKED: u8 = 0;
pub const CELL_OPEN: u8 = 1;
pub const CELL_DISCOURAGED: u8 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridCell {
    pub x: i32,
    pub y: i32,
}

impl GridCell {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn manhattan(self, other: GridCell) -> u32 {
        self.x.abs_diff(other.x).saturating_add(self.y.abs_diff(other.y))
    }
}

/// Per-cell entry cost over the whole map. `0` is impassable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostGrid {
    bounds: MapBounds,
    costs: Vec<u8>,
}

impl CostGrid {
    pub fn open(bounds: MapBounds) -> Self {
        Self {
            bounds,
            costs: vec![CELL_OPEN; bounds.cell_count()],
        }
    }

    /// Colliders on layer `z`: solid ones block, overlap ones are discouraged.
    pub fn from_world(world: &World, z: i32) -> Self {
        let mut grid = Self::open(world.bounds());
        for (_, (_, position)) in world.query::<(Collider, Position)>() {
            if position.z != z {
                continue;
            }
            let cost = if position.overlap {
                CELL_DISCOURAGED
            } else {
                CELL_BLOCKED
            };
            let cell = GridCell::new(position.x, position.y);
            // A solid collider wins over an overlap one sharing its cell.
            if grid.cost(cell) != Some(CELL_BLOCKED) {
                grid.set_cost(cell, cost);
            }
        }
        grid
    }

    pub fn cost(&self, cell: GridCell) -> Option<u8> {
        self.index_of(cell).and_then(|index| self.costs.get(index).copied())
    }

    pub fn set_cost(&mut self, cell: GridCell, cost: u8) {
        if let Some(index) = self.index_of(cell) {
            self.costs[index] = cost;
        }
    }

    fn index_of(&self, cell: GridCell) -> Option<usize> {
        self.bounds.index_of(cell.x, cell.y)
    }

    fn cell_at(&self, index: usize) -> GridCell {
        let width = self.bounds.width as usize;
        GridCell::new((index % width) as i32, (index / width) as i32)
    }

    /// Cheapest four-directional path, both endpoints included. The endpoints
    /// are treated as open regardless of what occupies them.
    pub fn find_path(&self, start: GridCell, goal: GridCell) -> Option<Vec<GridCell>> {
        let start_index = self.index_of(start)?;
        let goal_index = self.index_of(goal)?;
        if start == goal {
            return Some(vec![start]);
        }

        let entry_cost = |cell: GridCell| -> u8 {
            if cell == start || cell == goal {
                CELL_OPEN
            } else {
                self.cost(cell).unwrap_or(CELL_BLOCKED)
            }
        };

        let node_count = self.bounds.cell_count();
        let mut closed = vec![false; node_count];
        let mut best_g = vec![u32::MAX; node_count];
        let mut parent = vec![None::<usize>; node_count];
        let mut open = BinaryHeap::new();
        let mut next_insertion = 0u64;

        best_g[start_index] = 0;
        let start_h = start.manhattan(goal);
        open.push(Reverse(OpenNode {
            f_cost: start_h,
            h_cost: start_h,
            row: start.y,
            column: start.x,
            insertion_order: next_insertion,
            index: start_index,
        }));

        while let Some(Reverse(current)) = open.pop() {
            if closed[current.index] {
                continue;
            }
            closed[current.index] = true;

            if current.index == goal_index {
                return self.reconstruct(&parent, start_index, goal_index);
            }

            let current_g = best_g[current.index];
            let cell = GridCell::new(current.column, current.row);
            for neighbor in self.neighbors(cell).into_iter().flatten() {
                let Some(neighbor_index) = self.index_of(neighbor) else {
                    continue;
                };
                let cost = entry_cost(neighbor);
                if closed[neighbor_index] || cost == CELL_BLOCKED {
                    continue;
                }

                let tentative_g = current_g.saturating_add(u32::from(cost));
                if tentative_g >= best_g[neighbor_index] {
                    continue;
                }

                best_g[neighbor_index] = tentative_g;
                parent[neighbor_index] = Some(current.index);
                next_insertion = next_insertion.saturating_add(1);
                let h_cost = neighbor.manhattan(goal);
                open.push(Reverse(OpenNode {
                    f_cost: tentative_g.saturating_add(h_cost),
                    h_cost,
                    row: neighbor.y,
                    column: neighbor.x,
                    insertion_order: next_insertion,
                    index: neighbor_index,
                }));
            }
        }

        None
    }

    fn neighbors(&self, cell: GridCell) -> [Option<GridCell>; 4] {
        [(0, -1), (1, 0), (0, 1), (-1, 0)].map(|(dx, dy)| {
            let next = GridCell::new(cell.x + dx, cell.y + dy);
            self.bounds.contains(next.x, next.y).then_some(next)
        })
    }

    fn reconstruct(
        &self,
        parent: &[Option<usize>],
        start_index: usize,
        goal_index: usize,
    ) -> Option<Vec<GridCell>> {
        let mut cursor = goal_index;
        let mut indices = vec![cursor];
        while cursor != start_index {
            cursor = parent.get(cursor).copied().flatten()?;
            indices.push(cursor);
        }
        indices.reverse();
        Some(indices.into_iter().map(|index| self.cell_at(index)).collect())
    }
}

// Field order is the heap ordering: f, then h, then row, column, insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct OpenNode {
    f_cost: u32,
    h_cost: u32,
    row: i32,
    column: i32,
    insertion_order: u64,
    index: usize,
}
