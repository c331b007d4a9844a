//! Host settings parsed from environment variables.
//!
//! Optional:
//! - `PORT`: listen port, default 3000
//! - `AUTHGATE_BIND`: listen address, default `0.0.0.0`

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::net::{IpAddr, SocketAddr};

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_BIND: &str = "0.0.0.0";

#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("invalid PORT `{0}`")]
    InvalidPort(String),
    #[error("invalid AUTHGATE_BIND `{0}`")]
    InvalidBind(String),
    #[error("leptos configuration: {0}")]
    Leptos(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostConfig {
    pub addr: SocketAddr,
}

impl HostConfig {
    /// Build the listen address from `PORT` and `AUTHGATE_BIND`.
    ///
    /// # Errors
    ///
    /// Returns `HostError` when either variable is set but unparseable.
    pub fn from_env() -> Result<Self, HostError> {
        Self::from_vars(std::env::var("PORT").ok().as_deref(), std::env::var("AUTHGATE_BIND").ok().as_deref())
    }

    /// # Errors
    ///
    /// Returns `HostError` when either value is present but unparseable.
    pub fn from_vars(port: Option<&str>, bind: Option<&str>) -> Result<Self, HostError> {
        let port = match port.map(str::trim).filter(|raw| !raw.is_empty()) {
            Some(raw) => raw.parse::<u16>().map_err(|_| HostError::InvalidPort(raw.to_owned()))?,
            None => DEFAULT_PORT,
        };
        let bind = bind.map(str::trim).filter(|raw| !raw.is_empty()).unwrap_or(DEFAULT_BIND);
        let ip = bind.parse::<IpAddr>().map_err(|_| HostError::InvalidBind(bind.to_owned()))?;
        Ok(Self { addr: SocketAddr::new(ip, port) })
    }
}
