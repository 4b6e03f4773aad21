//! Runtime configuration structures and loaders.

use std::env;

use tactics_core::GameConfig;

/// Engine configuration: battlefield rules plus runtime-only knobs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub game: GameConfig,
    /// Number of events retained by the activity log.
    pub activity_log_capacity: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            game: GameConfig::default(),
            activity_log_capacity: Self::DEFAULT_ACTIVITY_LOG_CAPACITY,
        }
    }
}

impl RuntimeConfig {
    pub const DEFAULT_ACTIVITY_LOG_CAPACITY: usize = 64;

    pub fn new(game: GameConfig) -> Self {
        Self {
            game,
            ..Self::default()
        }
    }

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `TACTICS_MOVE_COST` - AP per tile walked (default: 1)
    /// - `TACTICS_SHOOT_COST` - AP per attack (default: 2)
    /// - `TACTICS_RELOAD_COST` - AP per reload (default: 1)
    /// - `TACTICS_GRENADE_COST` - AP per grenade (default: 2)
    /// - `TACTICS_GRENADE_RANGE` - Maximum throw distance (default: 4)
    /// - `TACTICS_BLAST_RADIUS` - Grenade blast radius (default: 1)
    /// - `TACTICS_EDITOR` - Unlock the map editor (default: false)
    /// - `TACTICS_ACTIVITY_LOG` - Activity log capacity (default: 64)
    ///
    /// Unparsable values fall back to the defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        let game = &mut config.game;

        if let Some(cost) = read_env::<u32>("TACTICS_MOVE_COST") {
            game.move_cost_per_tile = cost.max(1);
        }
        if let Some(cost) = read_env::<u32>("TACTICS_SHOOT_COST") {
            game.shoot_ap_cost = cost;
        }
        if let Some(cost) = read_env::<u32>("TACTICS_RELOAD_COST") {
            game.reload_ap_cost = cost;
        }
        if let Some(cost) = read_env::<u32>("TACTICS_GRENADE_COST") {
            game.grenade_ap_cost = cost;
        }
        if let Some(range) = read_env::<u32>("TACTICS_GRENADE_RANGE") {
            game.grenade_range = range;
        }
        if let Some(radius) = read_env::<u32>("TACTICS_BLAST_RADIUS") {
            game.grenade_blast_radius = radius;
        }
        if let Some(enabled) = read_env_bool("TACTICS_EDITOR") {
            game.editor_enabled = enabled;
        }
        if let Some(capacity) = read_env::<usize>("TACTICS_ACTIVITY_LOG") {
            config.activity_log_capacity = capacity.max(1);
        }

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

fn read_env_bool(key: &str) -> Option<bool> {
    match env::var(key).ok()?.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
