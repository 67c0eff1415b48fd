//! Configuration of the INMET alert client.
//!
//! Every setting has a default, so no configuration file is needed. Values
//! are layered in this order, the last one winning:
//!
//! 1. Built-in defaults
//! 2. The optional YAML file given with `--config`
//! 3. Environment variables prefixed with `INMET_`, `__` separating sections
//!
//! # Configuration File Format
//!
//! ```yaml
//! api:
//!   # Active alert feed
//!   url: "https://apiprevmet3.inmet.gov.br/avisos/ativos"
//!   # Request timeout in seconds
//!   timeout: 5
//! ```
//!
//! # Environment Variable Overrides
//!
//! ```bash
//! export INMET_API__URL="http://localhost:8080/avisos/ativos"
//! export INMET_API__TIMEOUT=10
//! ```

use std::{fs, time::Duration};

use anyhow::Context;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Yaml},
};
use serde::{Deserialize, Serialize};

/// Default url of the INMET active alert feed.
pub const DEFAULT_URL: &str = "https://apiprevmet3.inmet.gov.br/avisos/ativos";
/// Default request timeout, in seconds.
pub const DEFAULT_TIMEOUT: u64 = 5;
/// Prefix of the environment variables overriding the configuration.
pub const ENV_PREFIX: &str = "INMET_";

/// Root configuration structure.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
pub struct Config {
    /// INMET API configuration
    pub api: Api,
}

/// INMET API configuration.
///
/// # YAML Section
///
/// ```yaml
/// api:
///   url: "https://apiprevmet3.inmet.gov.br/avisos/ativos"
///   timeout: 5
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Api {
    /// Url of the active alert feed.
    ///
    /// # Examples
    ///
    /// - `https://apiprevmet3.inmet.gov.br/avisos/ativos`
    /// - `http://localhost:8080/avisos/ativos`
    pub url: String,

    /// Request timeout in seconds.
    ///
    /// Covers the whole request, from connection to the end of the body.
    pub timeout: u64,
}

impl Default for Api {
    fn default() -> Self {
        Api {
            url: DEFAULT_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl Api {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

impl Config {
    /// Loads the configuration from the defaults, the optional YAML file at
    /// `path` and the `INMET_` environment variables.
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be read, is not valid YAML, or a value has
    /// the wrong type.
    pub fn load(path: Option<&str>) -> Result<Config, anyhow::Error> {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));

        if let Some(path) = path {
            let content = fs::read_to_string(path)
                .with_context(|| format!("failed to read config file {}", path))?;
            figment = figment.merge(Yaml::string(&content));
        }

        let config: Config = figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .context("invalid configuration")?;

        Ok(config)
    }
}
