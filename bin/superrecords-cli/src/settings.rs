use std::{env, path::PathBuf};

use superrecords_config::{Config, ConfigError};

/// Default config file looked up in the working directory.
const DEFAULT_CONFIG_FILE: &str = "superrecords.toml";

/// Path of the config file, overridable via `SUPERRECORDS_CONFIG`.
pub fn config_path() -> PathBuf {
    env::var("SUPERRECORDS_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_FILE))
}

/// Loads the config file, falling back to defaults when none exists.
pub fn load() -> Result<Config, ConfigError> {
    let path = config_path();
    if path.exists() {
        Config::load_from_file(&path)
    } else {
        Ok(Config::default())
    }
}
