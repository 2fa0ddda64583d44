use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;

use engine::Simulation;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use super::config::{load_config_from_env, GameConfig};
use super::level::build_level;
use super::names::neighborhood_name;
use super::AppError;

const LOG_FILE_ENV_VAR: &str = "ROGUE_LOG";

pub(crate) struct AppWiring {
    pub(crate) config: GameConfig,
    pub(crate) sim: Simulation,
    pub(crate) rng: StdRng,
    pub(crate) neighborhood: String,
}

pub(crate) fn build_app() -> Result<AppWiring, AppError> {
    init_tracing()?;
    info!(version = env!("CARGO_PKG_VERSION"), "startup");

    let config = load_config_from_env()?;
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let sim = build_level(&config, &mut rng);
    let neighborhood = neighborhood_name(&mut rng);
    info!(neighborhood = %neighborhood, seed = ?config.seed, "level_ready");

    Ok(AppWiring {
        config,
        sim,
        rng,
        neighborhood,
    })
}

/// The terminal belongs to the UI, so logs only go to the `ROGUE_LOG` file.
fn init_tracing() -> Result<(), AppError> {
    let Some(path) = std::env::var_os(LOG_FILE_ENV_VAR).map(PathBuf::from) else {
        return Ok(());
    };
    let file = File::create(&path).map_err(|source| AppError::LogFile {
        path: path.clone(),
        source,
    })?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .compact()
        .try_init()
        .map_err(|error| AppError::Tracing(error.to_string()))
}
