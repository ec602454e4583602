//! Game configuration
//!
//! Uses RON (Rusty Object Notation) for a human-editable settings file.
//! Every field has a default matching the prototype's tuning, so a config
//! file only needs the values it changes.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::game::combat::DamageFilter;
use crate::game::entity::Spell;
use crate::game::gesture::PrimaryAttack;
use crate::game::motion::MonsterBehavior;
use crate::game::spawner::SpawnRule;

/// File name looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "dueling_monsters.ron";

/// Sanity limits for loaded values
pub mod limits {
    /// Largest arena we are willing to allocate up front
    pub const MAX_ARENA_CAPACITY: usize = 65_536;
    /// Largest number of spawn rules
    pub const MAX_SPAWN_RULES: usize = 64;
    /// Largest wave size
    pub const MAX_WAVE: u32 = 1024;
    /// Largest coordinate or distance (prevents overflow issues)
    pub const MAX_COORD: f32 = 1_000_000.0;
}

/// Error type for config loading
#[derive(Debug)]
pub enum ConfigError {
    IoError(std::io::Error),
    ParseError(ron::error::SpannedError),
    SerializeError(ron::Error),
    ValidationError(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::IoError(e)
    }
}

impl From<ron::error::SpannedError> for ConfigError {
    fn from(e: ron::error::SpannedError) -> Self {
        ConfigError::ParseError(e)
    }
}

impl From<ron::Error> for ConfigError {
    fn from(e: ron::Error) -> Self {
        ConfigError::SerializeError(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {}", e),
            ConfigError::ParseError(e) => write!(f, "Parse error: {}", e),
            ConfigError::SerializeError(e) => write!(f, "Serialize error: {}", e),
            ConfigError::ValidationError(e) => write!(f, "Validation error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: i32,
    pub height: i32,
    /// World-to-screen scale of the follow camera
    pub zoom: f32,
    /// Exponential approach rate of the camera toward the player
    pub follow_rate: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Dueling Monsters".to_string(),
            width: 800,
            height: 450,
            zoom: 3.0,
            follow_rate: 30.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    pub selection_radius: f32,
    pub run_multiplier: f32,
    /// Bottom share of the viewport where releasing a card does nothing
    pub hand_zone_fraction: f32,
    pub primary_attack: PrimaryAttack,
    pub monster_behavior: MonsterBehavior,
    pub damage_filter: DamageFilter,
    pub player_spawn: (f32, f32),
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            selection_radius: 10.0,
            run_multiplier: 1.5,
            hand_zone_fraction: 0.2,
            primary_attack: PrimaryAttack::Sword,
            monster_behavior: MonsterBehavior::Stationary,
            damage_filter: DamageFilter::MonstersOnly,
            player_spawn: (0.0, 0.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    pub world_capacity: usize,
    pub hand_capacity: usize,
    /// World slots the spawners leave free for attacks
    pub spawn_reserve: usize,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            world_capacity: 1024,
            hand_capacity: 40,
            spawn_reserve: 16,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HandConfig {
    pub spell: Spell,
    pub starting_hand: usize,
    pub max_hand_size: usize,
    /// Seconds between dealt cards while the hand has room
    pub deal_interval: f32,
    /// Card row position relative to the player
    pub offset: (f32, f32),
    pub gap: f32,
}

impl Default for HandConfig {
    fn default() -> Self {
        Self {
            spell: Spell::Fireball,
            starting_hand: 1,
            max_hand_size: 5,
            deal_interval: 5.0,
            offset: (0.0, 50.0),
            gap: 4.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpriteConfig {
    /// Directory holding the sprite images
    pub resource_dir: PathBuf,
}

impl Default for SpriteConfig {
    fn default() -> Self {
        Self {
            resource_dir: PathBuf::from("resources"),
        }
    }
}

/// Complete game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub window: WindowConfig,
    pub rules: RulesConfig,
    pub arenas: ArenaConfig,
    pub spawns: Vec<SpawnRule>,
    pub hand: HandConfig,
    pub sprites: SpriteConfig,
    /// Seed for spawn scatter
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            rules: RulesConfig::default(),
            arenas: ArenaConfig::default(),
            spawns: vec![SpawnRule::goblins(), SpawnRule::trolls()],
            hand: HandConfig::default(),
            sprites: SpriteConfig::default(),
            seed: 0,
        }
    }
}

/// Check if a float is usable (not NaN or Inf, not absurdly large)
fn is_valid_float(f: f32) -> bool {
    f.is_finite() && f.abs() <= limits::MAX_COORD
}

fn check_float(value: f32, name: &str) -> Result<(), String> {
    if !is_valid_float(value) {
        return Err(format!("{} is not a usable number ({})", name, value));
    }
    Ok(())
}

fn check_positive(value: f32, name: &str) -> Result<(), String> {
    check_float(value, name)?;
    if value <= 0.0 {
        return Err(format!("{} must be positive ({})", name, value));
    }
    Ok(())
}

fn check_pair(value: (f32, f32), name: &str) -> Result<(), String> {
    check_float(value.0, &format!("{}.x", name))?;
    check_float(value.1, &format!("{}.y", name))
}

fn validate_rule(rule: &SpawnRule, context: &str) -> Result<(), String> {
    check_positive(rule.interval, &format!("{} interval", context))?;
    if rule.amount > limits::MAX_WAVE {
        return Err(format!("{}: wave too large ({} > {})", context, rule.amount, limits::MAX_WAVE));
    }
    check_pair(rule.origin, &format!("{} origin", context))?;
    check_float(rule.step, &format!("{} step", context))?;
    check_float(rule.scatter, &format!("{} scatter", context))?;
    if rule.scatter < 0.0 {
        return Err(format!("{}: scatter must not be negative", context));
    }
    Ok(())
}

impl GameConfig {
    /// Validate value ranges
    pub fn validate(&self) -> Result<(), String> {
        let arenas = &self.arenas;
        for (name, capacity) in [("world_capacity", arenas.world_capacity), ("hand_capacity", arenas.hand_capacity)] {
            if capacity == 0 || capacity > limits::MAX_ARENA_CAPACITY {
                return Err(format!(
                    "{} must be in 1..={} ({})",
                    name,
                    limits::MAX_ARENA_CAPACITY,
                    capacity
                ));
            }
        }
        // Player plus at least one free slot for monsters or attacks
        if arenas.spawn_reserve + 1 >= arenas.world_capacity {
            return Err(format!(
                "spawn_reserve ({}) leaves no room in a world of {} slots",
                arenas.spawn_reserve, arenas.world_capacity
            ));
        }

        let rules = &self.rules;
        check_positive(rules.selection_radius, "selection_radius")?;
        check_positive(rules.run_multiplier, "run_multiplier")?;
        if !(0.0..=1.0).contains(&rules.hand_zone_fraction) {
            return Err(format!(
                "hand_zone_fraction must be within 0..=1 ({})",
                rules.hand_zone_fraction
            ));
        }
        check_pair(rules.player_spawn, "player_spawn")?;

        if self.spawns.len() > limits::MAX_SPAWN_RULES {
            return Err(format!(
                "too many spawn rules ({} > {})",
                self.spawns.len(),
                limits::MAX_SPAWN_RULES
            ));
        }
        for (i, rule) in self.spawns.iter().enumerate() {
            validate_rule(rule, &format!("spawns[{}]", i))?;
        }

        let hand = &self.hand;
        if hand.max_hand_size > arenas.hand_capacity {
            return Err(format!(
                "max_hand_size ({}) exceeds hand_capacity ({})",
                hand.max_hand_size, arenas.hand_capacity
            ));
        }
        if hand.starting_hand > hand.max_hand_size {
            return Err(format!(
                "starting_hand ({}) exceeds max_hand_size ({})",
                hand.starting_hand, hand.max_hand_size
            ));
        }
        check_positive(hand.deal_interval, "deal_interval")?;
        check_pair(hand.offset, "hand offset")?;
        check_float(hand.gap, "hand gap")?;

        check_positive(self.window.zoom, "zoom")?;
        check_positive(self.window.follow_rate, "follow_rate")?;
        if self.window.width <= 0 || self.window.height <= 0 {
            return Err(format!(
                "window size must be positive ({}x{})",
                self.window.width, self.window.height
            ));
        }

        Ok(())
    }
}

/// Parse and validate a config from RON text
pub fn parse_config(contents: &str) -> Result<GameConfig, ConfigError> {
    let config: GameConfig = ron::from_str(contents)?;
    config.validate().map_err(ConfigError::ValidationError)?;
    Ok(config)
}

/// Load a config from a RON file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<GameConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    parse_config(&contents)
}

/// Save a config to a RON file
pub fn save_config<P: AsRef<Path>>(config: &GameConfig, path: P) -> Result<(), ConfigError> {
    let pretty = ron::ser::PrettyConfig::new()
        .depth_limit(4)
        .indentor("    ".to_string());
    let contents = ron::ser::to_string_pretty(config, pretty)?;
    fs::write(path, contents)?;
    Ok(())
}

/// Candidate config locations, in lookup order
pub fn config_search_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(CONFIG_FILE_NAME)];
    #[cfg(not(target_arch = "wasm32"))]
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("dueling-monsters").join("config.ron"));
    }
    paths
}

/// First existing config file, if any
pub fn discover_config_path() -> Option<PathBuf> {
    config_search_paths().into_iter().find(|path| path.is_file())
}
