use crate::core::{AppError, Result};
use std::env;

/// HTTP server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: usize,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        let host = env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .map_err(|_| AppError::Configuration("Invalid SERVER_PORT".to_string()))?;
        let workers = env::var("SERVER_WORKERS")
            .ok()
            .map(|w| {
                w.parse()
                    .map_err(|_| AppError::Configuration("Invalid SERVER_WORKERS".to_string()))
            })
            .transpose()?
            .unwrap_or_else(|| num_cpus::get() * 2);

        Ok(Self {
            host,
            port,
            workers,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
