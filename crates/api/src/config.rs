//! # API Configuration Module
//!
//! ## Environment Variables
//!
//! - `API_HOST`: The host address to bind the server to (default: "0.0.0.0")
//! - `PORT`: The port to listen on (default: 8080)

use eyre::{Result, WrapErr};
use std::env;

/// Listener settings for the liveness endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Host address (e.g., "127.0.0.1", "0.0.0.0")
    pub host: String,

    /// Port to listen on
    pub port: u16,
}

impl ApiConfig {
    /// Creates a new ApiConfig from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if `PORT` is set but cannot be parsed as a u16.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let host = lookup("API_HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = lookup("PORT")
            .unwrap_or_else(|| "8080".to_string())
            .parse()
            .wrap_err("Invalid PORT value")?;

        Ok(Self { host, port })
    }

    /// Returns the server address as a string (e.g., "0.0.0.0:8080")
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
