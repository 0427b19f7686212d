use crate::error::Result;
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::Path;

pub const DEFAULT_CONFIG_FILE: &str = "moip.toml";

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Api {
    pub base_url: String,
    /// Sent verbatim as the `Authorization` header.
    pub authorization: Option<String>,
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Log {
    pub level: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Settings {
    pub api: Api,
    pub log: Log,
}

impl Settings {
    /// Loads settings from `path` (optional on disk), then from `MOIP__*`
    /// environment variables, e.g. `MOIP__API__BASE_URL`.
    pub fn load(path: &Path) -> Result<Self> {
        let config = Config::builder()
            .set_default("api.base_url", "https://sandbox.moip.com.br")?
            .set_default("api.timeout_secs", 30)?
            .set_default("log.level", "info")?
            .add_source(File::from(path).required(false))
            .add_source(Environment::with_prefix("MOIP").separator("__"))
            .build()?;

        Ok(config.try_deserialize()?)
    }
}
