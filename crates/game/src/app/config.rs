use std::fs;
use std::path::{Path, PathBuf};

use engine::{MapBounds, PLAYER_HEALTH, PLAYER_STAMINA};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub(crate) const CONFIG_ENV_VAR: &str = "ROGUE_CONFIG";
/// Largest accepted map side and rectangle extent, in cells.
pub(crate) const MAX_MAP_SIDE: i32 = 1024;

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("read config '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parse config json at {path}: {message}")]
    Parse { path: String, message: String },
    #[error("validation failed at {path}: {message}")]
    Invalid { path: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct RectConfig {
    pub(crate) x: i32,
    pub(crate) y: i32,
    pub(crate) width: i32,
    pub(crate) height: i32,
}

/// Screen is `width` x `height`; the bottom `hud_height` rows are the HUD
/// and the rest is the map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct GameConfig {
    pub(crate) width: i32,
    pub(crate) height: i32,
    pub(crate) hud_height: i32,
    pub(crate) player_start: (i32, i32),
    pub(crate) player_health: u32,
    pub(crate) player_stamina: u32,
    pub(crate) seed: Option<u64>,
    pub(crate) buildings: Vec<RectConfig>,
    pub(crate) forest: Option<RectConfig>,
    pub(crate) human_count: u32,
    pub(crate) fire_stamina_cost: u32,
    pub(crate) recharge_amount: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 80,
            height: 50,
            hud_height: 10,
            player_start: (0, 0),
            player_health: PLAYER_HEALTH,
            player_stamina: PLAYER_STAMINA,
            seed: None,
            buildings: vec![
                RectConfig {
                    x: 22,
                    y: 20,
                    width: 5,
                    height: 5,
                },
                RectConfig {
                    x: 30,
                    y: 10,
                    width: 5,
                    height: 5,
                },
            ],
            forest: Some(RectConfig {
                x: 50,
                y: 25,
                width: 15,
                height: 20,
            }),
            human_count: 1,
            fire_stamina_cost: 1,
            recharge_amount: 1,
        }
    }
}

impl GameConfig {
    pub(crate) fn map_bounds(&self) -> MapBounds {
        MapBounds::new(self.width, self.map_height())
    }

    pub(crate) fn map_height(&self) -> i32 {
        self.height.saturating_sub(self.hud_height)
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        check_range("width", self.width, 1, MAX_MAP_SIDE)?;
        check_range("height", self.height, 1, MAX_MAP_SIDE)?;
        check_range("hud_height", self.hud_height, 0, self.height - 1)?;
        let (x, y) = self.player_start;
        if !self.map_bounds().contains(x, y) {
            return Err(invalid(
                "player_start",
                format!(
                    "({x}, {y}) is outside the {}x{} map",
                    self.width,
                    self.map_height()
                ),
            ));
        }
        for (index, rect) in self.buildings.iter().enumerate() {
            rect.validate(&format!("buildings[{index}]"))?;
        }
        if let Some(forest) = &self.forest {
            forest.validate("forest")?;
        }
        Ok(())
    }
}

impl RectConfig {
    /// Corners may lie off the map (the level clips them) but stay within
    /// `MAX_MAP_SIDE` of it.
    fn validate(&self, path: &str) -> Result<(), ConfigError> {
        let field = |name: &str| format!("{path}.{name}");
        check_range(&field("x"), self.x, -MAX_MAP_SIDE, MAX_MAP_SIDE)?;
        check_range(&field("y"), self.y, -MAX_MAP_SIDE, MAX_MAP_SIDE)?;
        check_range(&field("width"), self.width, 0, MAX_MAP_SIDE)?;
        check_range(&field("height"), self.height, 0, MAX_MAP_SIDE)?;
        Ok(())
    }
}

fn check_range(path: &str, value: i32, min: i32, max: i32) -> Result<(), ConfigError> {
    if (min..=max).contains(&value) {
        return Ok(());
    }
    Err(invalid(
        path,
        format!("expected {min}..={max}, got {value}"),
    ))
}

fn invalid(path: &str, message: String) -> ConfigError {
    ConfigError::Invalid {
        path: path.to_string(),
        message,
    }
}

pub(crate) fn parse_config_json(raw: &str) -> Result<GameConfig, ConfigError> {
    let mut deserializer = serde_json::Deserializer::from_str(raw);
    let config = serde_path_to_error::deserialize::<_, GameConfig>(&mut deserializer).map_err(
        |error| {
            let path = error.path().to_string();
            ConfigError::Parse {
                path,
                message: error.into_inner().to_string(),
            }
        },
    )?;
    config.validate()?;
    Ok(config)
}

pub(crate) fn load_config_file(path: &Path) -> Result<GameConfig, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config_json(&raw)
}

/// Reads the file named by `ROGUE_CONFIG`, or returns the stock level.
pub(crate) fn load_config_from_env() -> Result<GameConfig, ConfigError> {
    match std::env::var_os(CONFIG_ENV_VAR) {
        Some(path) => load_config_file(Path::new(&path)),
        None => Ok(GameConfig::default()),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn stock_level_leaves_forty_map_rows() {
        let config = GameConfig::default();
        config.validate().expect("defaults are valid");
        assert_eq!(config.map_bounds(), MapBounds::new(80, 40));
    }

    #[test]
    fn partial_json_keeps_remaining_defaults() {
        let config = parse_config_json(r#"{ "human_count": 3, "seed": 7 }"#).expect("parse");
        assert_eq!(config.human_count, 3);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.width, 80);
        assert_eq!(config.buildings.len(), 2);
    }

    #[test]
    fn type_error_names_the_field_path() {
        let error = parse_config_json(r#"{ "buildings": [ { "x": 1, "y": "two", "width": 1, "height": 1 } ] }"#)
            .expect_err("bad field");
        match error {
            ConfigError::Parse { path, .. } => assert_eq!(path, "buildings[0].y"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn unknown_field_is_rejected() {
        let error = parse_config_json(r#"{ "colour": "blue" }"#).expect_err("unknown");
        assert!(matches!(error, ConfigError::Parse { .. }));
    }

    fn invalid_path(raw: &str) -> String {
        match parse_config_json(raw).expect_err("invalid config") {
            ConfigError::Invalid { path, .. } => path,
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn zero_sized_map_is_rejected() {
        assert_eq!(invalid_path(r#"{ "height": 10, "hud_height": 10 }"#), "hud_height");
        assert_eq!(invalid_path(r#"{ "width": 0 }"#), "width");
    }

    #[test]
    fn oversized_map_is_rejected() {
        assert_eq!(invalid_path(r#"{ "width": 2147483647 }"#), "width");
        assert_eq!(invalid_path(r#"{ "height": 5000 }"#), "height");
    }

    #[test]
    fn rectangles_out_of_range_name_their_field() {
        assert_eq!(
            invalid_path(r#"{ "buildings": [ { "x": 2147483647, "y": 0, "width": 5, "height": 5 } ] }"#),
            "buildings[0].x"
        );
        assert_eq!(
            invalid_path(
                r#"{ "buildings": [ { "x": 1, "y": 1, "width": 2, "height": 2 },
                                    { "x": 1, "y": 1, "width": -4, "height": 2 } ] }"#
            ),
            "buildings[1].width"
        );
        assert_eq!(
            invalid_path(r#"{ "forest": { "x": 0, "y": 0, "width": 3, "height": 2147483647 } }"#),
            "forest.height"
        );
    }

    #[test]
    fn rectangle_hanging_off_the_map_is_accepted() {
        let config = parse_config_json(
            r#"{ "buildings": [ { "x": -3, "y": 38, "width": 6, "height": 6 } ] }"#,
        )
        .expect("clipped later");
        assert_eq!(config.buildings[0].x, -3);
    }

    #[test]
    fn player_start_outside_map_is_rejected() {
        assert_eq!(invalid_path(r#"{ "player_start": [80, 3] }"#), "player_start");
    }

    #[test]
    fn config_file_round_trips_through_disk() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, r#"{{ "width": 30, "height": 20, "hud_height": 4, "forest": null }}"#)
            .expect("write");

        let config = load_config_file(file.path()).expect("load");
        assert_eq!(config.map_bounds(), MapBounds::new(30, 16));
        assert_eq!(config.forest, None);
    }

    #[test]
    fn missing_file_reports_its_path() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("absent.json");
        let error = load_config_file(&path).expect_err("missing");
        assert!(error.to_string().contains("absent.json"));
    }
}
