use anyhow::{Context, Result};
use serde::Deserialize;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub search: SearchConfig,
    pub http: HttpConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    pub host: String,
    /// REST API base override; derived from `host` when unset
    pub api_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    pub token: Option<String>,
    pub timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build from any variable source; `from_env` passes the process
    /// environment.
    pub fn from_vars<F>(var: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| var(key).filter(|v| !v.trim().is_empty());

        Ok(Self {
            search: SearchConfig {
                host: non_empty("GH_HOST").unwrap_or_else(|| "github.com".to_string()),
                api_url: non_empty("SEARCH_API_URL"),
            },
            http: HttpConfig {
                token: non_empty("GH_TOKEN").or_else(|| non_empty("GITHUB_TOKEN")),
                timeout_secs: non_empty("SEARCH_TIMEOUT_SECS")
                    .unwrap_or_else(|| "30".to_string())
                    .parse()
                    .context("SEARCH_TIMEOUT_SECS must be a whole number of seconds")?,
            },
        })
    }
}
