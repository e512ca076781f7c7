use std::net::{IpAddr, SocketAddr};

use anyhow::{Context, Result};

use crate::llm_client::DEFAULT_API_BASE;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 5000;

/// Application configuration loaded from environment variables.
/// Only `PORT` and `HOST` can fail startup; everything else has a default.
#[derive(Debug, Clone)]
pub struct Config {
    /// `None` when unset or blank. The generator then serves the fallback list only.
    pub openai_api_key: Option<String>,
    pub openai_api_base: String,
    pub host: String,
    pub port: u16,
    pub debug: bool,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .with_context(|| format!("PORT must be a valid port number, got '{raw}'"))?,
            None => DEFAULT_PORT,
        };

        Ok(Config {
            openai_api_key: lookup("OPENAI_API_KEY")
                .map(|key| key.trim().to_string())
                .filter(|key| !key.is_empty()),
            openai_api_base: lookup("OPENAI_API_BASE")
                .map(|base| base.trim().trim_end_matches('/').to_string())
                .filter(|base| !base.is_empty())
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            host: lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            debug: ["APP_DEBUG", "FLASK_DEBUG"]
                .iter()
                .any(|key| lookup(*key).as_deref() == Some("1")),
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        let ip: IpAddr = self
            .host
            .parse()
            .with_context(|| format!("HOST must be an IP address, got '{}'", self.host))?;
        Ok(SocketAddr::new(ip, self.port))
    }

    /// Log level for the service's own targets.
    pub fn log_level(&self) -> &str {
        if self.debug {
            "debug"
        } else {
            self.rust_log.as_str()
        }
    }
}
