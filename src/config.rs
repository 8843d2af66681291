//! Command line and INI configuration.
//!
//! # Configuration File Format
//!
//! ```ini
//! [window]
//! width = 1024
//! height = 768
//! fullscreen = false
//! title = keymaze
//!
//! [game]
//! map = maps/level1.txt
//! assets = assets
//! ```
//!
//! Every key is optional. Command line flags win over file values.

use std::path::{Path, PathBuf};

use clap::Parser;
use configparser::ini::Ini;
use tracing::info;

use crate::error::ConfigError;

const DEFAULT_WINDOW_WIDTH: u32 = 1024;
const DEFAULT_WINDOW_HEIGHT: u32 = 768;
const DEFAULT_TITLE: &str = "keymaze";
const DEFAULT_MAP: &str = "maps/level1.txt";
const DEFAULT_ASSETS: &str = "assets";
pub const DEFAULT_CONFIG_PATH: &str = "./config.ini";

#[derive(Parser, Debug)]
#[command(version, about = "Tile-based 3D maze: find the keys, open the doors, reach the goal.")]
pub struct Cli {
    /// Map file to load.
    #[arg(long, value_name = "PATH")]
    pub map: Option<PathBuf>,

    /// Asset directory holding models/ and textures/.
    #[arg(long, value_name = "DIR")]
    pub assets: Option<PathBuf>,

    /// INI configuration file.
    #[arg(long, value_name = "PATH", default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Start in fullscreen.
    #[arg(long)]
    pub fullscreen: bool,

    /// Seed for the recolor RNG.
    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub window_width: u32,
    pub window_height: u32,
    pub fullscreen: bool,
    pub title: String,
    pub map_path: PathBuf,
    pub assets_dir: PathBuf,
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
            fullscreen: false,
            title: DEFAULT_TITLE.to_string(),
            map_path: PathBuf::from(DEFAULT_MAP),
            assets_dir: PathBuf::from(DEFAULT_ASSETS),
            seed: None,
        }
    }
}

impl GameConfig {
    /// Defaults, then the config file if it exists, then the command line.
    pub fn resolve(cli: &Cli) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if cli.config.exists() {
            config.load_from_file(&cli.config)?;
        } else {
            info!("No config file at {}, using defaults", cli.config.display());
        }
        config.apply_cli(cli);
        Ok(config)
    }

    /// Overwrite fields present in the file. Missing keys keep their values.
    pub fn load_from_file(&mut self, path: &Path) -> Result<(), ConfigError> {
        let mut ini = Ini::new();
        ini.load(path).map_err(|reason| ConfigError::Load {
            path: path.to_path_buf(),
            reason,
        })?;
        self.apply_ini(&ini)?;
        info!(
            "Loaded config {}: {}x{} window, fullscreen={}, map={}",
            path.display(),
            self.window_width,
            self.window_height,
            self.fullscreen,
            self.map_path.display()
        );
        Ok(())
    }

    fn apply_ini(&mut self, ini: &Ini) -> Result<(), ConfigError> {
        // [window] section
        if let Some(width) = get_dimension(ini, "width")? {
            self.window_width = width;
        }
        if let Some(height) = get_dimension(ini, "height")? {
            self.window_height = height;
        }
        if let Some(fullscreen) = ini
            .getbool("window", "fullscreen")
            .map_err(invalid("window", "fullscreen"))?
        {
            self.fullscreen = fullscreen;
        }
        if let Some(title) = ini.get("window", "title") {
            self.title = title;
        }

        // [game] section
        if let Some(map) = ini.get("game", "map") {
            self.map_path = PathBuf::from(map);
        }
        if let Some(assets) = ini.get("game", "assets") {
            self.assets_dir = PathBuf::from(assets);
        }
        Ok(())
    }

    fn apply_cli(&mut self, cli: &Cli) {
        if let Some(map) = &cli.map {
            self.map_path = map.clone();
        }
        if let Some(assets) = &cli.assets {
            self.assets_dir = assets.clone();
        }
        if cli.fullscreen {
            self.fullscreen = true;
        }
        self.seed = cli.seed;
    }

    pub fn models_dir(&self) -> PathBuf {
        self.assets_dir.join("models")
    }

    pub fn textures_dir(&self) -> PathBuf {
        self.assets_dir.join("textures")
    }
}

fn invalid(section: &'static str, key: &'static str) -> impl Fn(String) -> ConfigError {
    move |reason| ConfigError::InvalidValue { section, key, reason }
}

fn get_dimension(ini: &Ini, key: &'static str) -> Result<Option<u32>, ConfigError> {
    let Some(value) = ini.getuint("window", key).map_err(invalid("window", key))? else {
        return Ok(None);
    };
    u32::try_from(value)
        .map(Some)
        .map_err(|_| invalid("window", key)(format!("{value} does not fit in 32 bits")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_ini(text: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(text.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_missing_file_keeps_defaults() {
        let cli = Cli::parse_from(["keymaze", "--config", "/definitely/not/here.ini"]);
        let config = GameConfig::resolve(&cli).unwrap();
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn test_file_values_and_partial_sections() {
        let file = write_ini("[window]\nwidth = 640\nfullscreen = true\n\n[game]\nmap = maps/other.txt\n");
        let mut config = GameConfig::default();
        config.load_from_file(file.path()).unwrap();

        assert_eq!(config.window_width, 640);
        assert_eq!(config.window_height, DEFAULT_WINDOW_HEIGHT);
        assert!(config.fullscreen);
        assert_eq!(config.map_path, PathBuf::from("maps/other.txt"));
        assert_eq!(config.models_dir(), PathBuf::from("assets/models"));
    }

    #[test]
    fn test_cli_overrides_file() {
        let file = write_ini("[game]\nmap = from_file.txt\nassets = file_assets\n");
        let config_arg = file.path().to_string_lossy().into_owned();
        let cli = Cli::parse_from([
            "keymaze",
            "--config",
            config_arg.as_str(),
            "--map",
            "from_cli.txt",
            "--seed",
            "42",
        ]);
        let config = GameConfig::resolve(&cli).unwrap();

        assert_eq!(config.map_path, PathBuf::from("from_cli.txt"));
        assert_eq!(config.assets_dir, PathBuf::from("file_assets"));
        assert_eq!(config.textures_dir(), PathBuf::from("file_assets/textures"));
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn test_bad_value_is_reported() {
        let file = write_ini("[window]\nwidth = wide\n");
        let mut config = GameConfig::default();
        assert!(matches!(
            config.load_from_file(file.path()),
            Err(ConfigError::InvalidValue { section: "window", key: "width", .. })
        ));
    }

    #[test]
    fn test_out_of_range_dimension_is_reported() {
        let file = write_ini("[window]\nheight = 4294967296\n");
        let mut config = GameConfig::default();
        assert!(matches!(
            config.load_from_file(file.path()),
            Err(ConfigError::InvalidValue { section: "window", key: "height", .. })
        ));
        assert_eq!(config.window_height, DEFAULT_WINDOW_HEIGHT);
    }
}
