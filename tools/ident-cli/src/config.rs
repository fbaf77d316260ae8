//! Environment configuration.
//!
//! | Variable           | Meaning                         |
//! |--------------------|---------------------------------|
//! | `IDENT_SIGN_KEY`   | sign key                        |
//! | `IDENT_VERIFY_KEY` | verify key                      |
//! | `IDENT_NODE`       | snowflake node id (0-1023)      |
//! | `IDENT_EPOCH_MS`   | snowflake epoch, Unix ms        |

use std::str::FromStr;

use ident_core::{ConfigError, GeneratorConfig, IdentKey, SnowflakeOptions, ValidatorConfig};
use tracing::{info, warn};

/// Environment variable for the sign key.
pub const ENV_SIGN_KEY: &str = "IDENT_SIGN_KEY";
/// Environment variable for the verify key.
pub const ENV_VERIFY_KEY: &str = "IDENT_VERIFY_KEY";
/// Environment variable for the node id.
pub const ENV_NODE: &str = "IDENT_NODE";
/// Environment variable for the epoch.
pub const ENV_EPOCH_MS: &str = "IDENT_EPOCH_MS";

/// Resolved CLI settings.
#[derive(Clone, Debug, Default)]
pub struct CliConfig {
    /// Sign key, if any
    pub sign_key: Option<IdentKey>,
    /// Verify key, if any
    pub verify_key: Option<IdentKey>,
    /// Id source settings
    pub snowflake: SnowflakeOptions,
}

impl CliConfig {
    /// Apply flag values on top of the environment.
    pub fn apply_overrides(
        &mut self,
        sign_key: Option<String>,
        verify_key: Option<String>,
        node: Option<u16>,
        epoch_ms: Option<u64>,
    ) -> Result<(), ConfigError> {
        if let Some(key) = sign_key {
            self.sign_key = Some(IdentKey::from(key));
        }
        if let Some(key) = verify_key {
            self.verify_key = Some(IdentKey::from(key));
        }
        if let Some(node) = node {
            self.snowflake.node = node;
        }
        if let Some(epoch_ms) = epoch_ms {
            self.snowflake.epoch_ms = epoch_ms;
        }
        self.snowflake.validate()
    }

    /// Generator settings. Generation always needs a sign key.
    pub fn generator_config(&self) -> Result<GeneratorConfig, ConfigError> {
        let sign_key = self
            .sign_key
            .clone()
            .filter(|k| !k.is_empty())
            .ok_or(ConfigError::MissingSignKey)?;
        Ok(GeneratorConfig {
            sign_key,
            verify_key: self.verify_key.clone(),
        })
    }

    /// Validator settings.
    pub fn validator_config(&self) -> ValidatorConfig {
        ValidatorConfig {
            sign_key: self.sign_key.clone(),
            verify_key: self.verify_key.clone(),
        }
    }
}

/// Load settings from the process environment.
pub fn load_config() -> Result<CliConfig, ConfigError> {
    load_config_from(|name| std::env::var(name).ok())
}

/// Load settings through `lookup`.
pub fn load_config_from<F>(lookup: F) -> Result<CliConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = CliConfig::default();

    if let Some(key) = non_empty(&lookup, ENV_SIGN_KEY) {
        config.sign_key = Some(IdentKey::from(key));
        info!("[ident] sign key loaded from {}", ENV_SIGN_KEY);
    }
    if let Some(key) = non_empty(&lookup, ENV_VERIFY_KEY) {
        config.verify_key = Some(IdentKey::from(key));
        info!("[ident] verify key loaded from {}", ENV_VERIFY_KEY);
    }
    if let Some(node) = parse_setting(&lookup, ENV_NODE)? {
        config.snowflake.node = node;
    }
    if let Some(epoch_ms) = parse_setting(&lookup, ENV_EPOCH_MS)? {
        config.snowflake.epoch_ms = epoch_ms;
    }

    config.snowflake.validate()?;
    Ok(config)
}

fn non_empty<F>(lookup: &F, name: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(value) if value.is_empty() => {
            warn!("[ident] {} is set but empty, ignoring", name);
            None
        }
        other => other,
    }
}

fn parse_setting<F, T>(lookup: &F, name: &str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let Some(raw) = non_empty(lookup, name) else {
        return Ok(None);
    };
    raw.trim()
        .parse()
        .map(Some)
        .map_err(|err: T::Err| ConfigError::InvalidSetting {
            name: name.to_string(),
            reason: err.to_string(),
        })
}
