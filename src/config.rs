use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use tracing::warn;

use crate::game::GameSettings;
use crate::infra::Pathfinder;
use crate::infra::protocol::JoinParams;

pub const DEFAULT_HOST: &str = "127.0.0.1:8000";

/// Runtime settings, read from the environment (and `.env`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub join: JoinParams,
    pub poll_interval: Duration,
    pub max_search_radius: Option<u32>,
    pub max_turns: Option<u32>,
    pub replays_folder: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            join: JoinParams::default(),
            poll_interval: Duration::from_millis(1000),
            max_search_radius: None,
            max_turns: None,
            replays_folder: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup, falling back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Self {
            host: lookup("ARENA_HOST")
                .filter(|host| !host.trim().is_empty())
                .unwrap_or(defaults.host),
            join: JoinParams {
                engine_level: parse_var(&lookup, "ARENA_ENGINE_LEVEL")
                    .unwrap_or(defaults.join.engine_level),
                shield_level: parse_var(&lookup, "ARENA_SHIELD_LEVEL")
                    .unwrap_or(defaults.join.shield_level),
                weapon_level: parse_var(&lookup, "ARENA_WEAPON_LEVEL")
                    .unwrap_or(defaults.join.weapon_level),
            },
            poll_interval: parse_var(&lookup, "ARENA_POLL_INTERVAL_MS")
                .map(Duration::from_millis)
                .unwrap_or(defaults.poll_interval),
            max_search_radius: parse_var(&lookup, "ARENA_MAX_SEARCH_RADIUS"),
            max_turns: parse_var(&lookup, "ARENA_MAX_TURNS"),
            replays_folder: lookup("ARENA_REPLAYS_FOLDER").map(PathBuf::from),
        }
    }

    /// A positional host argument wins over `ARENA_HOST`.
    pub fn with_host_arg(mut self, arg: Option<String>) -> Self {
        if let Some(host) = arg.filter(|host| !host.trim().is_empty()) {
            self.host = host;
        }
        self
    }

    pub fn pathfinder(&self) -> Pathfinder {
        match self.max_search_radius {
            Some(radius) => Pathfinder::new().with_max_radius(radius),
            None => Pathfinder::new(),
        }
    }

    pub fn game_settings(&self) -> GameSettings {
        GameSettings {
            join: self.join,
            poll_interval: self.poll_interval,
            max_turns: self.max_turns,
        }
    }
}

fn parse_var<F, T>(lookup: &F, key: &str) -> Option<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    let raw = lookup(key)?;
    match raw.trim().parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("Ignoring {}={:?}, not a valid number", key, raw);
            None
        }
    }
}
