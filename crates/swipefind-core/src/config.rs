//! Persistent synchronization defaults.
//!
//! Stores the timing and attempt bounds used by the session's convenience
//! wait/scroll methods in `~/.swipefind/config.json`. Missing or malformed
//! files fall back to the built-in defaults, which match the bounds the
//! scroll-search behavior was tuned against.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

const CONFIG_FILENAME: &str = "config.json";

/// Returns the swipefind data directory (`~/.swipefind`), creating it if
/// needed.
pub fn swipefind_dir() -> PathBuf {
    let dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".swipefind");
    std::fs::create_dir_all(&dir).ok();
    dir
}

/// Default bounds for waits and scroll-searches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Budget for the session's `wait_for_*` helpers, in milliseconds.
    pub default_wait_timeout_ms: u64,
    /// Interval between condition evaluations, in milliseconds.
    pub poll_interval_ms: u64,
    /// Scroll gestures a hard downward search may perform.
    pub scroll_max_attempts: u32,
    /// Scroll gestures a soft (optional) search may perform.
    pub scroll_soft_max_attempts: u32,
    /// Scroll gestures an upward search may perform.
    pub scroll_up_max_attempts: u32,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            default_wait_timeout_ms: 30_000,
            poll_interval_ms: 500,
            scroll_max_attempts: 12,
            scroll_soft_max_attempts: 4,
            scroll_up_max_attempts: 5,
        }
    }
}

impl SyncConfig {
    /// Load config from `~/.swipefind/config.json`.
    ///
    /// Returns [`Default`] if the file does not exist or cannot be parsed.
    pub fn load() -> Self {
        let path = swipefind_dir().join(CONFIG_FILENAME);
        std::fs::read_to_string(&path)
            .ok()
            .and_then(|s| serde_json::from_str(&s).ok())
            .unwrap_or_default()
    }

    /// Save config to `~/.swipefind/config.json`.
    pub fn save(&self) -> std::io::Result<()> {
        let path = swipefind_dir().join(CONFIG_FILENAME);
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
        std::fs::write(path, json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_tuned_bounds() {
        let config = SyncConfig::default();
        assert_eq!(config.default_wait_timeout_ms, 30_000);
        assert_eq!(config.poll_interval_ms, 500);
        assert_eq!(config.scroll_max_attempts, 12);
        assert_eq!(config.scroll_soft_max_attempts, 4);
        assert_eq!(config.scroll_up_max_attempts, 5);
    }

    #[test]
    fn deserialize_empty_json_yields_defaults() {
        let loaded: SyncConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(loaded, SyncConfig::default());
    }

    #[test]
    fn roundtrip_serialization() {
        let config = SyncConfig {
            default_wait_timeout_ms: 10_000,
            poll_interval_ms: 250,
            scroll_max_attempts: 6,
            scroll_soft_max_attempts: 2,
            scroll_up_max_attempts: 3,
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: SyncConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
