use std::{env, net::SocketAddr, path::PathBuf, str::FromStr};

use crate::random::DEFAULT_SEED;
use crate::savings::SavingsConfig;

pub const DEFAULT_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{key} has an invalid value {value:?}: {reason}")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Process configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub addr: SocketAddr,
    /// Replacement city table; the built-in hubs are used when unset.
    pub cities_path: Option<PathBuf>,
    pub savings: SavingsConfig,
    pub seed: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            cities_path: None,
            savings: SavingsConfig::default(),
            seed: DEFAULT_SEED,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            addr: parse_or(&lookup, "ROUTEIQ_ADDR", defaults.addr)?,
            cities_path: lookup("ROUTEIQ_CITIES").map(PathBuf::from),
            savings: SavingsConfig {
                fuel_l_per_km: parse_positive(
                    &lookup,
                    "ROUTEIQ_FUEL_L_PER_KM",
                    defaults.savings.fuel_l_per_km,
                )?,
                price_inr_per_litre: parse_positive(
                    &lookup,
                    "ROUTEIQ_DIESEL_INR_PER_L",
                    defaults.savings.price_inr_per_litre,
                )?,
            },
            seed: parse_or(&lookup, "ROUTEIQ_SEED", defaults.seed)?,
        })
    }
}

fn parse_or<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|err: T::Err| ConfigError::InvalidValue {
            key,
            reason: err.to_string(),
            value,
        }),
    }
}

fn parse_positive(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: f64,
) -> Result<f64, ConfigError> {
    let value: f64 = parse_or(lookup, key, default)?;
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::InvalidValue {
            key,
            value: value.to_string(),
            reason: "must be a positive number".to_string(),
        })
    }
}
