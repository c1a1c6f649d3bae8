use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use std::path::Path;

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use pagesweep::config::load_config;
///
/// let config = load_config(Path::new("config.toml")).unwrap();
/// println!("Concurrency: {}", config.scraper.concurrency);
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    // Read the configuration file
    let content = std::fs::read_to_string(path)?;

    // Parse TOML
    let config: Config = toml::from_str(&content)?;

    // Validate the configuration
    validate(&config)?;

    Ok(config)
}

/// Writes a configuration to the given path as TOML
///
/// Parent directories are created as needed.
pub fn save_config(path: &Path, config: &Config) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content)?;

    Ok(())
}

/// Loads the configuration, falling back to defaults
///
/// When the file is missing or invalid, the default configuration is written
/// to `path` and returned. A failed write still yields the defaults.
pub fn load_or_create_config(path: &Path) -> Config {
    match load_config(path) {
        Ok(config) => config,
        Err(e) => {
            let defaults = Config::default();
            match save_config(path, &defaults) {
                Ok(()) => tracing::warn!(
                    "Invalid or missing config ({}); wrote defaults to {}",
                    e,
                    path.display()
                ),
                Err(write_err) => tracing::warn!(
                    "No usable config ({}) and defaults could not be written ({}); using defaults",
                    e,
                    write_err
                ),
            }
            defaults
        }
    }
}
