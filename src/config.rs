use std::path::PathBuf;

use directories::BaseDirs;

use crate::store::Store;

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".events-manager";
/// Subfolder of the data directory receiving rolling log files.
const LOG_DIR_NAME: &str = "logs";

const LOG_LEVEL_VAR: &str = "EVENTS_MANAGER_LOG";
const LOG_DIR_VAR: &str = "EVENTS_MANAGER_LOG_DIR";
const SEED_VAR: &str = "EVENTS_MANAGER_SEED";

/// Startup settings, read once from the environment before the TUI starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub log_level: String,
    /// `None` when no directory was configured and the home directory could
    /// not be located; logging is skipped in that case.
    pub log_dir: Option<PathBuf>,
    pub seed_demo_data: bool,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from any key/value source. Blank values count
    /// as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let log_level = read(LOG_LEVEL_VAR).unwrap_or_else(|| default_log_level().to_string());
        let log_dir = read(LOG_DIR_VAR)
            .map(PathBuf::from)
            .or_else(default_log_dir);
        let seed_demo_data = read(SEED_VAR).map_or(true, |value| !is_disabled(&value));

        Self {
            log_level,
            log_dir,
            seed_demo_data,
        }
    }

    /// The store the session starts with.
    pub fn build_store(&self) -> Store {
        if self.seed_demo_data {
            Store::with_demo_data()
        } else {
            Store::new()
        }
    }
}

/// `debug` for debug builds, `info` for release builds.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

fn default_log_dir() -> Option<PathBuf> {
    let base_dirs = BaseDirs::new()?;
    Some(
        base_dirs
            .home_dir()
            .join(DATA_DIR_NAME)
            .join(LOG_DIR_NAME),
    )
}

fn is_disabled(value: &str) -> bool {
    matches!(
        value.to_ascii_lowercase().as_str(),
        "0" | "false" | "no" | "off"
    )
}
