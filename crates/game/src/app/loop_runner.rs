use std::io::stdout;
use std::process::ExitCode;

use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use engine::{Simulation, TickReport};
use rand::rngs::StdRng;
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{error, info};

use super::bootstrap::AppWiring;
use super::commands::{apply_command, CommandOutcome, PlayerCommand, StaminaPolicy};
use super::input::{map_key, InputAction};
use super::names::neighborhood_name;
use super::ui::{self, View};
use super::AppError;

pub(crate) fn run(app: AppWiring) -> ExitCode {
    let mut game = GameApp::new(app);
    if let Err(err) = game.start() {
        error!(error = %err, "startup_failed");
        eprintln!("{err}");
        return ExitCode::FAILURE;
    }

    match run_tui(&mut game) {
        Ok(()) => {
            info!(ticks = game.sim.ticks_run(), "session_ended");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(error = %err, "session_failed");
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

struct GameApp {
    sim: Simulation,
    rng: StdRng,
    neighborhood: String,
    policy: StaminaPolicy,
    hud_height: u16,
    message: String,
    show_help: bool,
}

impl GameApp {
    fn new(app: AppWiring) -> Self {
        Self {
            sim: app.sim,
            rng: app.rng,
            neighborhood: app.neighborhood,
            policy: StaminaPolicy {
                fire_cost: app.config.fire_stamina_cost,
                recharge_amount: app.config.recharge_amount,
            },
            hud_height: u16::try_from(app.config.hud_height).unwrap_or(u16::MAX),
            message: String::new(),
            show_help: false,
        }
    }

    /// One settling tick before the first frame.
    fn start(&mut self) -> Result<(), AppError> {
        self.sim.tick()?;
        Ok(())
    }

    /// Returns `false` once the player asks to quit.
    fn handle(&mut self, action: InputAction) -> Result<bool, AppError> {
        match action {
            InputAction::Quit => return Ok(false),
            InputAction::ToggleHelp => self.show_help = !self.show_help,
            InputAction::RenameNeighborhood => {
                self.neighborhood = neighborhood_name(&mut self.rng);
                info!(neighborhood = %self.neighborhood, "neighborhood_renamed");
            }
            InputAction::Command(command) => {
                let outcome = apply_command(&mut self.sim, command, self.policy)?;
                self.message = describe(command, outcome);
            }
        }
        Ok(true)
    }
}

fn describe(command: PlayerCommand, outcome: CommandOutcome) -> String {
    let CommandOutcome::Ticked { report, fired } = outcome else {
        return "You are dead.".to_string();
    };
    let TickReport { stats, .. } = report;
    let mut parts = Vec::new();
    match command {
        PlayerCommand::Fire(_) if fired => parts.push("You fire."),
        PlayerCommand::Fire(_) => parts.push("You are too tired to fire."),
        PlayerCommand::Recharge => parts.push("You catch your breath."),
        PlayerCommand::Move(_) | PlayerCommand::Wait => {}
    }
    if stats.projectile_hits > 0 {
        parts.push("A shot hits.");
    }
    if stats.items_collected > 0 {
        parts.push("You pick something up.");
    }
    if stats.deaths > 0 {
        parts.push("Something falls.");
    }
    parts.join(" ")
}

fn run_tui(game: &mut GameApp) -> Result<(), AppError> {
    enable_raw_mode()?;
    let mut out = stdout();
    if let Err(err) = execute!(out, EnterAlternateScreen) {
        let _ = disable_raw_mode();
        return Err(err.into());
    }
    let result = Terminal::new(CrosstermBackend::new(out))
        .map_err(AppError::from)
        .and_then(|mut terminal| {
            let looped = event_loop(&mut terminal, game);
            let left = execute!(terminal.backend_mut(), LeaveAlternateScreen);
            looped.and(left.map_err(AppError::from))
        });
    // Raw mode is restored on every exit path.
    let restored = disable_raw_mode();
    result.and(restored.map_err(AppError::from))
}

fn event_loop<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    game: &mut GameApp,
) -> Result<(), AppError> {
    loop {
        let cells = game.sim.render_cells();
        let status = game.sim.player_status();
        let view = View {
            bounds: game.sim.world().bounds(),
            hud_height: game.hud_height,
            cells: &cells,
            status: &status,
            neighborhood: &game.neighborhood,
            message: &game.message,
            game_over: game.sim.is_game_over(),
            show_help: game.show_help,
        };
        terminal.draw(|f| ui::draw(f, &view))?;

        // Blocks until the next key; one accepted command is one tick.
        let Event::Key(key) = event::read()? else {
            continue;
        };
        let Some(action) = map_key(key) else {
            continue;
        };
        if !game.handle(action)? {
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use engine::{Direction, MapBounds, PlayerStats};
    use rand::SeedableRng;

    use crate::app::config::GameConfig;
    use super::*;

    fn game() -> GameApp {
        GameApp::new(AppWiring {
            config: GameConfig::default(),
            sim: Simulation::new(MapBounds::new(10, 10), (4, 4), PlayerStats::default()),
            rng: StdRng::seed_from_u64(5),
            neighborhood: "OAK RUN".to_string(),
        })
    }

    #[test]
    fn quit_stops_the_loop_without_ticking() {
        let mut game = game();
        assert!(!game.handle(InputAction::Quit).expect("quit"));
        assert_eq!(game.sim.ticks_run(), 0);
    }

    #[test]
    fn help_and_rename_do_not_tick() {
        let mut game = game();
        game.handle(InputAction::ToggleHelp).expect("help");
        assert!(game.show_help);
        game.handle(InputAction::RenameNeighborhood).expect("rename");
        assert_ne!(game.neighborhood, "");
        assert_eq!(game.sim.ticks_run(), 0);
    }

    #[test]
    fn fire_command_ticks_and_reports() {
        let mut game = game();
        let keep_going = game
            .handle(InputAction::Command(PlayerCommand::Fire(Direction::Down)))
            .expect("fire");
        assert!(keep_going);
        assert_eq!(game.sim.ticks_run(), 1);
        assert_eq!(game.message, "You fire.");
        assert_eq!(game.sim.player_status().stamina, 9);
    }
}
