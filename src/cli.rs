//! Command-line interface
//!
//! Opens the game window by default; `--headless` runs the simulation
//! with a scripted player and prints a summary instead.

use std::path::PathBuf;

use clap::Parser;

use crate::config::{discover_config_path, load_config, ConfigError, GameConfig};
use crate::headless::HeadlessOptions;

/// Real-time 2D monster dueling prototype
#[derive(Parser, Debug)]
#[command(name = "dueling-monsters")]
#[command(about = "Real-time 2D monster dueling prototype")]
#[command(version)]
pub struct Args {
    /// RON config file (default: ./dueling_monsters.ron, then the user config dir)
    #[arg(long, value_name = "CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Run without a window and print a report
    #[arg(long)]
    pub headless: bool,

    /// Frames to simulate (headless mode only)
    #[arg(long, default_value = "600")]
    pub frames: u64,

    /// Fixed frame time in seconds (headless mode only)
    #[arg(long, default_value_t = 1.0 / 60.0)]
    pub dt: f32,

    /// Override the config's RNG seed
    #[arg(long)]
    pub seed: Option<u64>,
}

impl Args {
    pub fn headless_options(&self) -> HeadlessOptions {
        HeadlessOptions {
            frames: self.frames,
            dt: self.dt,
            seed: self.seed,
        }
    }

    /// Explicit `--config`, else the first config found on disk, else defaults.
    ///
    /// Only a failing `--config` is an error; a broken discovered file is
    /// logged and skipped.
    pub fn resolve_config(&self) -> Result<GameConfig, ConfigError> {
        let mut config = match (&self.config, discover_config_path()) {
            (Some(path), _) => {
                log::info!("loading config from {}", path.display());
                load_config(path)?
            }
            (None, Some(path)) => match load_config(&path) {
                Ok(config) => {
                    log::info!("loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    log::warn!("ignoring {}: {}", path.display(), e);
                    GameConfig::default()
                }
            },
            (None, None) => {
                log::info!("no config file found, using defaults");
                GameConfig::default()
            }
        };
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        Ok(config)
    }
}

pub fn parse_args() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::save_config;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["dueling-monsters"]).unwrap();
        assert!(!args.headless);
        assert_eq!(args.frames, 600);
        assert!((args.dt - 1.0 / 60.0).abs() < 1e-6);
        assert_eq!(args.seed, None);
    }

    #[test]
    fn test_headless_flags() {
        let args = Args::try_parse_from([
            "dueling-monsters",
            "--headless",
            "--frames",
            "120",
            "--dt",
            "0.05",
            "--seed",
            "9",
        ])
        .unwrap();
        let options = args.headless_options();
        assert!(args.headless);
        assert_eq!(options.frames, 120);
        assert_eq!(options.dt, 0.05);
        assert_eq!(options.seed, Some(9));
    }

    #[test]
    fn test_explicit_config_and_seed_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("game.ron");
        let mut config = GameConfig::default();
        config.seed = 5;
        config.hand.starting_hand = 3;
        save_config(&config, &path).unwrap();

        let args = Args::try_parse_from([
            "dueling-monsters".to_string(),
            "--config".to_string(),
            path.display().to_string(),
            "--seed".to_string(),
            "11".to_string(),
        ])
        .unwrap();
        let resolved = args.resolve_config().unwrap();
        assert_eq!(resolved.hand.starting_hand, 3);
        assert_eq!(resolved.seed, 11);
    }

    #[test]
    fn test_missing_explicit_config_is_an_error() {
        let args = Args::try_parse_from(["dueling-monsters", "--config", "/nonexistent/game.ron"]).unwrap();
        assert!(args.resolve_config().is_err());
    }
}
