//! Server configuration.
//!
//! Only the HTTP bind address is configurable. Simulation timing and capacity bounds are
//! compile-time constants.

use anyhow::{Context, Result};
use std::net::SocketAddr;

pub const DEFAULT_BIND: &str = "127.0.0.1:7000";
pub const BIND_ENV_VAR: &str = "SCALING_BIND";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
}

impl ServerConfig {
    /// Resolves the bind address from `--bind <addr:port>`, then the
    /// `SCALING_BIND` variable (`env_bind`), then the default. Unknown
    /// arguments are ignored.
    pub fn from_args(args: &[String], env_bind: Option<String>) -> Result<Self> {
        let mut bind: Option<String> = None;

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--bind" => {
                    let value = args
                        .get(i + 1)
                        .context("--bind requires an <addr:port> value")?;
                    bind = Some(value.clone());
                    i += 2;
                }
                _ => {
                    i += 1;
                }
            }
        }

        let raw = bind
            .or(env_bind)
            .unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind_addr = raw
            .parse()
            .with_context(|| format!("invalid bind address: {}", raw))?;

        Ok(Self { bind_addr })
    }

    pub fn from_env() -> Result<Self> {
        let args: Vec<String> = std::env::args().collect();
        Self::from_args(&args, std::env::var(BIND_ENV_VAR).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_default_bind() {
        let config = ServerConfig::from_args(&args(&["sim"]), None).unwrap();
        assert_eq!(config.bind_addr, DEFAULT_BIND.parse::<SocketAddr>().unwrap());
    }

    #[test]
    fn test_flag_overrides_env() {
        let config = ServerConfig::from_args(
            &args(&["sim", "--verbose", "--bind", "0.0.0.0:9000"]),
            Some("127.0.0.1:8000".to_string()),
        )
        .unwrap();
        assert_eq!(config.bind_addr, "0.0.0.0:9000".parse::<SocketAddr>().unwrap());
    }

    #[test]
    fn test_env_used_without_flag() {
        let config =
            ServerConfig::from_args(&args(&["sim"]), Some("127.0.0.1:8000".to_string())).unwrap();
        assert_eq!(config.bind_addr.port(), 8000);
    }

    #[test]
    fn test_invalid_address_is_error() {
        let result = ServerConfig::from_args(&args(&["sim", "--bind", "nowhere"]), None);
        assert!(result.unwrap_err().to_string().contains("invalid bind address"));
    }

    #[test]
    fn test_missing_flag_value_is_error() {
        assert!(ServerConfig::from_args(&args(&["sim", "--bind"]), None).is_err());
    }
}
