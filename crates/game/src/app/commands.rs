use engine::{fire_projectile, Direction, SimError, Simulation, Stamina, TickReport, Velocity};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PlayerCommand {
    Move(Direction),
    Fire(Direction),
    Recharge,
    Wait,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct StaminaPolicy {
    pub(crate) fire_cost: u32,
    pub(crate) recharge_amount: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CommandOutcome {
    Ticked { report: TickReport, fired: bool },
    GameOver,
}

/// Applies one player command and runs exactly one tick. A fire request with
/// no stamina left still spends the turn.
pub(crate) fn apply_command(
    sim: &mut Simulation,
    command: PlayerCommand,
    policy: StaminaPolicy,
) -> Result<CommandOutcome, SimError> {
    if sim.is_game_over() {
        return Ok(CommandOutcome::GameOver);
    }
    let player = sim.player();
    let mut fired = false;
    match command {
        PlayerCommand::Move(direction) => {
            let (dx, dy) = direction.delta();
            sim.world_mut().insert(player, Velocity::step(dx, dy))?;
        }
        PlayerCommand::Fire(direction) => {
            let world = sim.world_mut();
            if !world.get::<Stamina>(player)?.is_depleted() {
                fire_projectile(world, player, direction)?;
                world.get_mut::<Stamina>(player)?.exert(policy.fire_cost);
                fired = true;
            }
        }
        PlayerCommand::Recharge => {
            sim.world_mut()
                .get_mut::<Stamina>(player)?
                .rest(policy.recharge_amount);
        }
        PlayerCommand::Wait => {}
    }
    debug!(?command, fired, "player_command_applied");
    let report = sim.tick()?;
    Ok(CommandOutcome::Ticked { report, fired })
}
