// Configuration loader, defaults layered under the user file and the environment

use std::path::Path;

use config::{Config, Environment, File, FileFormat, Map};

use crate::KeypadTomlConfig;
use crate::default_config::DEFAULT_KEYPAD_TOML;
use crate::defaults::{ENV_PREFIX, ENV_SECTIONS, ENV_SEPARATOR};
use crate::error::{ConfigError, ConfigResult};
use crate::validation::validate_config;

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load `keypad.toml` from `path`.
    ///
    /// Every key the file leaves out falls back to the reference keypad, and `KSCAN_*`
    /// environment variables override the file: `KSCAN_SCAN__TICK_HZ=200` sets `scan.tick_hz`.
    /// Only variables naming one of the `[matrix]`, `[symbols]` or `[scan]` sections are read,
    /// other `KSCAN_*` variables are ignored. The merged configuration is validated before it's
    /// returned.
    pub fn load<P: AsRef<Path>>(path: P) -> ConfigResult<KeypadTomlConfig> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::merge(&content, &path.display().to_string(), std::env::vars().collect())
    }

    /// Load a configuration from TOML text, without environment overrides
    pub fn load_str(content: &str) -> ConfigResult<KeypadTomlConfig> {
        Self::merge(content, "<string>", Map::new())
    }

    /// Load a configuration from TOML text, with `env` standing in for the process environment
    pub fn load_str_with_env(content: &str, env: Map<String, String>) -> ConfigResult<KeypadTomlConfig> {
        Self::merge(content, "<string>", env)
    }

    /// Keep the variables overriding a known section, e.g. `KSCAN_SCAN__TICK_HZ`
    fn section_overrides(env: Map<String, String>) -> Map<String, String> {
        env.into_iter()
            .filter(|(key, _)| {
                let key = key.to_ascii_uppercase();
                let Some(rest) = key.strip_prefix(ENV_PREFIX).and_then(|k| k.strip_prefix('_')) else {
                    return false;
                };
                let known = ENV_SECTIONS
                    .iter()
                    .any(|section| rest.strip_prefix(section).is_some_and(|k| k.starts_with(ENV_SEPARATOR)));
                if !known {
                    log::warn!("Ignoring {}, it doesn't name a keypad.toml section", key);
                }
                known
            })
            .collect()
    }

    fn merge(content: &str, origin: &str, env: Map<String, String>) -> ConfigResult<KeypadTomlConfig> {
        // Syntax errors are reported against the user file, not the merged result
        toml::from_str::<toml::Table>(content).map_err(|e| ConfigError::Parse {
            path: origin.to_string(),
            message: e.message().to_string(),
        })?;

        let config: KeypadTomlConfig = Config::builder()
            .add_source(File::from_str(DEFAULT_KEYPAD_TOML, FileFormat::Toml))
            .add_source(File::from_str(content, FileFormat::Toml))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator(ENV_SEPARATOR)
                    .try_parsing(true)
                    .source(Some(Self::section_overrides(env))),
            )
            .build()
            .map_err(|e| ConfigError::Parse {
                path: origin.to_string(),
                message: e.to_string(),
            })?
            .try_deserialize()
            .map_err(|e| ConfigError::Parse {
                path: origin.to_string(),
                message: e.to_string(),
            })?;

        validate_config(&config)?;
        log::info!(
            "Loaded keypad config from {}: {}x{} keys, channel capacity {}",
            origin,
            config.matrix.rows.len(),
            config.matrix.cols.len(),
            config.scan.channel_capacity
        );
        Ok(config)
    }
}
