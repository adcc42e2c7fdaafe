//! Configuration loaded from environment variables with defaults.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

pub const DEFAULT_PORT: u16 = 3004;
pub const DEFAULT_FOLLOW_UP_DELAY_MS: u64 = 1000;
pub const DEFAULT_THINKING_DELAY_MS: u64 = 2000;
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 100;

/// Rectangle of canvas space that randomly placed nodes land in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasRegion {
    pub x_min: f64,
    pub y_min: f64,
    pub width: f64,
    pub height: f64,
}

impl CanvasRegion {
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x_min
            && x < self.x_min + self.width
            && y >= self.y_min
            && y < self.y_min + self.height
    }
}

impl Default for CanvasRegion {
    fn default() -> Self {
        Self {
            x_min: 100.0,
            y_min: 100.0,
            width: 600.0,
            height: 400.0,
        }
    }
}

/// Top-level StockMind configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockMindConfig {
    /// HTTP server port.
    pub port: u16,
    /// Delay before an investigated question's follow-up is proposed.
    pub follow_up_delay_ms: u64,
    /// Simulated assistant "thinking" time before insights appear.
    pub thinking_delay_ms: u64,
    /// How often the server fires due deferred tasks.
    pub tick_interval_ms: u64,
    /// Fixed seed for node placement. Random per session when unset.
    pub placement_seed: Option<u64>,
    /// Where investigated question nodes are placed.
    pub question_region: CanvasRegion,
}

impl Default for StockMindConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            follow_up_delay_ms: DEFAULT_FOLLOW_UP_DELAY_MS,
            thinking_delay_ms: DEFAULT_THINKING_DELAY_MS,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            placement_seed: None,
            question_region: CanvasRegion::default(),
        }
    }
}

impl StockMindConfig {
    /// Create configuration from environment and defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let port = match lookup("STOCKMIND_PORT").or_else(|| lookup("PORT")) {
            Some(raw) => parse_var("STOCKMIND_PORT", &raw)?,
            None => defaults.port,
        };

        let config = Self {
            port,
            follow_up_delay_ms: parse_or(
                &lookup,
                "STOCKMIND_FOLLOW_UP_DELAY_MS",
                defaults.follow_up_delay_ms,
            )?,
            thinking_delay_ms: parse_or(
                &lookup,
                "STOCKMIND_THINKING_DELAY_MS",
                defaults.thinking_delay_ms,
            )?,
            tick_interval_ms: parse_or(
                &lookup,
                "STOCKMIND_TICK_INTERVAL_MS",
                defaults.tick_interval_ms,
            )?,
            placement_seed: match lookup("STOCKMIND_PLACEMENT_SEED") {
                Some(raw) => Some(parse_var("STOCKMIND_PLACEMENT_SEED", &raw)?),
                None => None,
            },
            question_region: defaults.question_region,
        };

        if config.tick_interval_ms == 0 {
            return Err(Error::Config(
                "STOCKMIND_TICK_INTERVAL_MS must be greater than zero".into(),
            ));
        }

        debug!(?config, "Loaded configuration");
        Ok(config)
    }

    pub fn follow_up_delay(&self) -> Duration {
        Duration::from_millis(self.follow_up_delay_ms)
    }

    pub fn thinking_delay(&self) -> Duration {
        Duration::from_millis(self.thinking_delay_ms)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        Some(raw) => parse_var(key, &raw),
        None => Ok(default),
    }
}

fn parse_var<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T> {
    raw.trim()
        .parse()
        .map_err(|_| Error::Config(format!("{key}: invalid value '{raw}'")))
}
