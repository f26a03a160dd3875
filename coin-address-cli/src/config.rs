//! CLI configuration.

use std::env;

use coin_address::NetworkId;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// CLI configuration loaded from environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// Network used by `check` when none is named on the command line.
    pub default_network: Option<NetworkId>,
    /// Trim surrounding whitespace before classifying.
    pub trim: bool,
    /// Audit the prefix registry at start-up.
    pub check_registry: bool,
}

impl CliConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through `lookup`, which returns a variable's value
    /// if it is set.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let default_network = match lookup("COIN_ADDRESS_NETWORK") {
            Some(name) if !name.trim().is_empty() => Some(
                name.trim()
                    .parse()
                    .map_err(|_| ConfigError::Invalid("COIN_ADDRESS_NETWORK".to_string()))?,
            ),
            _ => None,
        };

        Ok(Self {
            default_network,
            trim: parse_flag(&lookup, "COIN_ADDRESS_TRIM", true)?,
            check_registry: parse_flag(&lookup, "COIN_ADDRESS_CHECK_REGISTRY", true)?,
        })
    }
}

fn parse_flag<F>(lookup: &F, name: &str, default: bool) -> Result<bool, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        None => Ok(default),
        Some(value) => match value.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(ConfigError::Invalid(name.to_string())),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<CliConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        CliConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(
            config,
            CliConfig {
                default_network: None,
                trim: true,
                check_registry: true,
            }
        );
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("COIN_ADDRESS_NETWORK", "Litecoin"),
            ("COIN_ADDRESS_TRIM", "false"),
            ("COIN_ADDRESS_CHECK_REGISTRY", "0"),
        ])
        .unwrap();
        assert_eq!(config.default_network, Some(NetworkId::Litecoin));
        assert!(!config.trim);
        assert!(!config.check_registry);
    }

    #[test]
    fn test_blank_network_is_unset() {
        let config = config_from(&[("COIN_ADDRESS_NETWORK", "  ")]).unwrap();
        assert_eq!(config.default_network, None);
    }

    #[test]
    fn test_invalid_values() {
        assert_eq!(
            config_from(&[("COIN_ADDRESS_NETWORK", "dogecash")]),
            Err(ConfigError::Invalid("COIN_ADDRESS_NETWORK".to_string()))
        );
        assert_eq!(
            config_from(&[("COIN_ADDRESS_TRIM", "maybe")]),
            Err(ConfigError::Invalid("COIN_ADDRESS_TRIM".to_string()))
        );
    }
}
