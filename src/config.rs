use std::env;

use hotelseed_store::SurrealConfig;
use log::info;
use thiserror::Error;

/// The store address used when `HOTELSEED_STORE_URL` is not set
pub const DEFAULT_STORE_URL: &str = "127.0.0.1:8000";

const STORE_URL: &str = "HOTELSEED_STORE_URL";
const STORE_USER: &str = "HOTELSEED_STORE_USER";
const STORE_PASSWORD: &str = "HOTELSEED_STORE_PASSWORD";
const STORE_NAMESPACE: &str = "HOTELSEED_STORE_NAMESPACE";
const STORE_DATABASE: &str = "HOTELSEED_STORE_DATABASE";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Environment variable {0} is not set")]
    Missing(&'static str),
}

/// Reads the store configuration from the environment.
pub fn store_config() -> Result<SurrealConfig, ConfigError> {
    store_config_from(|key| env::var(key).ok())
}

/// Reads the store configuration through `lookup`.
/// Credentials, namespace and database are required, the address has a default.
pub fn store_config_from<F>(lookup: F) -> Result<SurrealConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let required = |key: &'static str| {
        lookup(key)
            .filter(|value| !value.trim().is_empty())
            .ok_or(ConfigError::Missing(key))
    };

    let address = lookup(STORE_URL).unwrap_or_else(|| {
        info!("{STORE_URL} not set, using default: {DEFAULT_STORE_URL}");
        DEFAULT_STORE_URL.to_string()
    });

    Ok(SurrealConfig {
        address,
        username: required(STORE_USER)?,
        password: required(STORE_PASSWORD)?,
        namespace: required(STORE_NAMESPACE)?,
        database: required(STORE_DATABASE)?,
    })
}
