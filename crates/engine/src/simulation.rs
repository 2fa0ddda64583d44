use tracing::info;

use crate::error::SimResult;
use crate::factory::{make_player, PlayerStats};
use crate::render::{collect_render_cells, player_status, PlayerStatus, RenderCell};
use crate::systems::{SystemId, SystemsHost, TickReport};
use crate::world::{EntityId, MapBounds, World};

/// A world, its player and the pipeline that advances them.
#[derive(Debug)]
pub struct Simulation {
    world: World,
    player: EntityId,
    host: SystemsHost,
    game_over: bool,
}

impl Simulation {
    pub fn new(bounds: MapBounds, start: (i32, i32), stats: PlayerStats) -> Self {
        let mut world = World::new(bounds);
        let (x, y) = bounds.clamp(start.0, start.1);
        let player = make_player(&mut world, x, y, stats);
        info!(
            width = bounds.width,
            height = bounds.height,
            player_id = player.0,
            "simulation_created"
        );
        Self {
            world,
            player,
            host: SystemsHost::default(),
            game_over: false,
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn player(&self) -> EntityId {
        self.player
    }

    pub fn ticks_run(&self) -> u64 {
        self.host.ticks_run()
    }

    pub fn last_tick_order(&self) -> &[SystemId] {
        self.host.last_tick_order()
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn tick(&mut self) -> SimResult<TickReport> {
        let report = self.host.run_tick(&mut self.world, self.player)?;
        if report.stats.player_dead && !self.game_over {
            self.game_over = true;
            info!(tick = report.tick, "game_over");
        }
        Ok(report)
    }

    /// Every renderable entity in draw order, lowest layer first.
    pub fn render_cells(&self) -> Vec<RenderCell> {
        collect_render_cells(&self.world)
    }

    pub fn player_status(&self) -> PlayerStatus {
        player_status(&self.world, self.player)
    }
}
