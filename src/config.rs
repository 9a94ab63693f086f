use std::env;
use std::net::SocketAddr;

use anyhow::{Context, Result};

use crate::ai::client::AiConfig;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    /// When unset, the bearer-token check on /api routes is disabled.
    pub jwt_secret: Option<String>,
    pub ai: AiConfig,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let database_url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

        let bind_addr = env::var("BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:3000".to_string())
            .parse()
            .context("BIND_ADDR is not a valid socket address")?;

        let jwt_secret = env::var("JWT_SECRET").ok().filter(|s| !s.is_empty());

        Ok(Self {
            database_url,
            bind_addr,
            jwt_secret,
            ai: AiConfig::from_env(),
        })
    }
}
