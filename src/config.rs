//! Game tunables.
//!
//! Two presets exist: `Full` (the main game) and `Lite` (a lighter variant
//! with a slimmer HUD, wider obstacles and a point per obstacle shot).
//! A JSON file names its base preset (`"preset": "lite"`, default full) and
//! overrides any field of it; nested objects merge key by key.

use std::path::Path;

use anyhow::{ensure, Context};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::geometry::{Point, Size};
use crate::timers::ms_to_ticks;

/// Environment variable naming a JSON config file.
pub const CONFIG_ENV: &str = "ARENA_SHOOTER_CONFIG";
/// Environment variable selecting a preset (`full` or `lite`).
pub const PRESET_ENV: &str = "ARENA_SHOOTER_PRESET";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    #[default]
    Full,
    #[serde(alias = "light")]
    Lite,
}

impl Preset {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "full" => Some(Preset::Full),
            "lite" | "light" => Some(Preset::Lite),
            _ => None,
        }
    }
}

/// Playable area. The top `hud_height` units are reserved for the HUD.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
    pub hud_height: f32,
}

impl Arena {
    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Score threshold that unlocks a level and what changes when it does.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LevelRule {
    pub score: u32,
    pub spawn_interval_ms: u32,
    /// New obstacle capacity, if the level raises it.
    #[serde(default)]
    pub max_obstacles: Option<usize>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub preset: Preset,
    pub arena: Arena,
    /// Simulation ticks per second.
    pub tick_rate: u32,
    pub lives: u32,
    pub instruction_pages: u32,

    pub player_size: Size,
    pub player_straight_speed: f32,
    /// Per-axis step when moving diagonally (not normalised).
    pub player_diagonal_speed: f32,

    pub projectile_size: Size,
    pub projectile_speed: f32,
    /// How far outside the arena a projectile may travel before despawning.
    pub despawn_margin: f32,

    pub obstacle_size: Size,
    pub pursuer_size: Size,
    pub pursuer_speed: f32,

    pub pursuer_points: u32,
    pub obstacle_points: u32,

    pub stuck_ms: u32,
    pub hit_pause_ms: u32,
    pub autofire_ms: u32,

    pub spawn_interval_ms: u32,
    pub max_pursuers: usize,
    pub max_obstacles: usize,
    pub pursuer_min_distance: f32,
    pub obstacle_min_distance: f32,
    /// Spawns never land in the bottom strip of this height.
    pub spawn_bottom_margin: f32,
    /// Rejection-sampling cap per spawn.
    pub spawn_attempts: u32,
    /// Pursuer already waiting when the first game starts.
    pub start_pursuer: Option<Point>,

    pub levels: Vec<LevelRule>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::preset(Preset::Full)
    }
}

impl GameConfig {
    pub fn preset(preset: Preset) -> Self {
        let full = Self {
            preset: Preset::Full,
            arena: Arena {
                width: 800.0,
                height: 600.0,
                hud_height: 30.0,
            },
            tick_rate: 60,
            lives: 3,
            instruction_pages: 1,

            player_size: Size::new(20, 20),
            player_straight_speed: 3.0,
            player_diagonal_speed: 2.0,

            projectile_size: Size::new(4, 4),
            projectile_speed: 7.0,
            despawn_margin: 10.0,

            obstacle_size: Size::new(15, 15),
            pursuer_size: Size::new(20, 20),
            pursuer_speed: 2.75,

            pursuer_points: 10,
            obstacle_points: 0,

            stuck_ms: 500,
            hit_pause_ms: 500,
            autofire_ms: 100,

            spawn_interval_ms: 1000,
            max_pursuers: 5,
            max_obstacles: 20,
            pursuer_min_distance: 100.0,
            obstacle_min_distance: 50.0,
            spawn_bottom_margin: 50.0,
            spawn_attempts: 64,
            start_pursuer: Some(Point::new(200.0, 200.0)),

            levels: vec![
                LevelRule { score: 100, spawn_interval_ms: 750, max_obstacles: None },
                LevelRule { score: 250, spawn_interval_ms: 500, max_obstacles: None },
                LevelRule { score: 500, spawn_interval_ms: 300, max_obstacles: Some(40) },
                LevelRule { score: 1000, spawn_interval_ms: 200, max_obstacles: None },
            ],
        };

        match preset {
            Preset::Full => full,
            Preset::Lite => Self {
                preset: Preset::Lite,
                arena: Arena {
                    hud_height: 20.0,
                    ..full.arena
                },
                obstacle_size: Size::new(20, 15),
                obstacle_points: 1,
                levels: full
                    .levels
                    .iter()
                    .map(|rule| LevelRule {
                        max_obstacles: None,
                        ..rule.clone()
                    })
                    .collect(),
                ..full
            },
        }
    }

    /// Read a JSON config file and validate it.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("when loading config file at {:?}", path))?;
        let config = Self::from_json(&content)
            .with_context(|| format!("when parsing config file at {:?}", path))?;
        config
            .validate()
            .with_context(|| format!("invalid config in {:?}", path))?;
        Ok(config)
    }

    /// Build a config from JSON text: the named preset (full if absent) with
    /// the document's fields laid over it.
    pub fn from_json(content: &str) -> anyhow::Result<Self> {
        let overrides: Value = serde_json::from_str(content)?;
        let preset = match overrides.get("preset") {
            Some(name) => serde_json::from_value(name.clone())?,
            None => Preset::Full,
        };
        let mut merged = serde_json::to_value(Self::preset(preset))?;
        merge_json(&mut merged, overrides);
        Ok(serde_json::from_value(merged)?)
    }

    /// `ARENA_SHOOTER_CONFIG` wins over `ARENA_SHOOTER_PRESET`; neither set
    /// means the full preset.
    pub fn from_env() -> anyhow::Result<Self> {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return Self::load(path);
        }
        let preset = match std::env::var(PRESET_ENV) {
            Ok(name) => Preset::from_str(&name).unwrap_or_else(|| {
                log::warn!("unknown preset {:?}, using full", name);
                Preset::Full
            }),
            Err(_) => Preset::Full,
        };
        Ok(Self::preset(preset))
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        let a = &self.arena;
        ensure!(a.width > 0.0 && a.height > 0.0, "arena must have a positive size");
        ensure!(
            a.hud_height >= 0.0 && a.hud_height < a.height,
            "hud band must fit inside the arena"
        );
        ensure!(self.tick_rate > 0, "tick_rate must be > 0");
        ensure!(self.lives > 0, "lives must be > 0");
        ensure!(
            self.player_straight_speed > 0.0 && self.player_diagonal_speed > 0.0,
            "player speeds must be positive"
        );
        ensure!(self.projectile_speed > 0.0, "projectile_speed must be positive");
        ensure!(self.pursuer_speed > 0.0, "pursuer_speed must be positive");
        for size in [
            self.player_size,
            self.projectile_size,
            self.obstacle_size,
            self.pursuer_size,
        ] {
            ensure!(size.w > 0 && size.h > 0, "entity sizes must be positive");
        }
        ensure!(
            (self.player_size.w as f32) < a.width
                && (self.player_size.h as f32) < a.height - a.hud_height,
            "player must fit inside the play field"
        );
        ensure!(self.spawn_interval_ms > 0, "spawn_interval_ms must be > 0");
        ensure!(
            a.height - self.spawn_bottom_margin > a.hud_height,
            "spawn band is empty"
        );
        ensure!(
            self.levels.windows(2).all(|w| w[0].score < w[1].score),
            "level thresholds must be strictly increasing"
        );
        ensure!(
            self.levels.iter().all(|l| l.spawn_interval_ms > 0),
            "level spawn intervals must be > 0"
        );
        Ok(())
    }

    pub fn ticks(&self, ms: u32) -> u32 {
        ms_to_ticks(ms, self.tick_rate)
    }

    /// The player's box is anchored with its top-left corner at the centre.
    pub fn player_start(&self) -> Point {
        self.arena.center()
    }
}

/// Recursively lay `overrides` over `base`. Objects merge per key, anything
/// else (arrays included) replaces the base value.
fn merge_json(base: &mut Value, overrides: Value) {
    match (base, overrides) {
        (Value::Object(base), Value::Object(overrides)) => {
            for (key, value) in overrides {
                match base.get_mut(&key) {
                    Some(slot) => merge_json(slot, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}
