#![allow(non_snake_case)]
#![allow(clippy::needless_return)]

use std::net::SocketAddr;

use crate::services::{db::DEFAULT_MAX_CONNECTIONS, redisServer::DEFAULT_SESSION_EXPIRATION};

pub static DEFAULT_BIND_ADDR: &str = "0.0.0.0:4433";

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),

    #[error("{key} has an invalid value: {value}")]
    Invalid { key: &'static str, value: String },

    #[error("TLS_CERT_PATH and TLS_KEY_PATH must be set together")]
    IncompleteTls
}

#[derive(Debug, Clone, PartialEq)]
pub struct TlsPaths {
    pub certPath: String,
    pub keyPath: String
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub bindAddr: SocketAddr,
    pub databaseUrl: String,
    pub dbMaxConnections: u32,
    pub redisUrl: String,
    pub sessionTtl: usize,
    pub tls: Option<TlsPaths>
}

impl AppConfig {
    //Reads the process environment. Call dotenvy::dotenv() first to pick up a .env file.
    pub fn fromEnv() -> Result<AppConfig, ConfigError> {
        return AppConfig::fromLookup(|key| std::env::var(key).ok());
    }

    pub fn fromLookup<F>(lookup: F) -> Result<AppConfig, ConfigError>
    where
        F: Fn(&str) -> Option<String>
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let bindAddr = var("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bindAddr: SocketAddr = bindAddr.parse().map_err(|_| ConfigError::Invalid { key: "BIND_ADDR", value: bindAddr.clone() })?;

        let databaseUrl = var("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;
        let redisUrl = var("REDIS_URL").ok_or(ConfigError::Missing("REDIS_URL"))?;

        let dbMaxConnections = match var("DB_MAX_CONNECTIONS") {
            None => DEFAULT_MAX_CONNECTIONS,
            Some(value) => value.parse::<u32>().ok().filter(|x| *x > 0).ok_or(ConfigError::Invalid { key: "DB_MAX_CONNECTIONS", value })?
        };

        let sessionTtl = match var("SESSION_TTL_SECS") {
            None => DEFAULT_SESSION_EXPIRATION,
            Some(value) => value.parse::<usize>().ok().filter(|x| *x > 0).ok_or(ConfigError::Invalid { key: "SESSION_TTL_SECS", value })?
        };

        let tls = match (var("TLS_CERT_PATH"), var("TLS_KEY_PATH")) {
            (Some(certPath), Some(keyPath)) => Some(TlsPaths { certPath, keyPath }),
            (None, None) => None,
            _ => return Err(ConfigError::IncompleteTls)
        };

        return Ok(AppConfig { bindAddr, databaseUrl, dbMaxConnections, redisUrl, sessionTtl, tls });
    }
}
