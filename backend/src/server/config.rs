//! HTTP server configuration sourced from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;

use mockable::Env;
use tracing::warn;

const BIND_ADDR_ENV: &str = "REGISTRATION_BIND_ADDR";
const ASSETS_DIR_ENV: &str = "REGISTRATION_ASSETS_DIR";
const COOKIE_SECURE_ENV: &str = "REGISTRATION_COOKIE_SECURE";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
const DEFAULT_ASSETS_DIR: &str = ".";
const BOOL_EXPECTED: &str = "1|0|true|false|yes|no";
const ADDR_EXPECTED: &str = "host:port";

/// Errors raised while reading server settings.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ServerConfigError {
    /// A variable is present but contains an invalid value.
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// Listener, assets, and cookie settings for the HTTP server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) assets_dir: PathBuf,
    pub(crate) cookie_secure: bool,
}

impl ServerConfig {
    /// Read `REGISTRATION_*` variables, applying defaults for absent ones.
    pub fn from_env<E: Env>(env: &E) -> Result<Self, ServerConfigError> {
        let raw_addr = env
            .string(BIND_ADDR_ENV)
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_owned());
        let bind_addr = raw_addr
            .parse()
            .map_err(|_| ServerConfigError::InvalidEnv {
                name: BIND_ADDR_ENV,
                value: raw_addr.clone(),
                expected: ADDR_EXPECTED,
            })?;

        let assets_dir = env
            .string(ASSETS_DIR_ENV)
            .map_or_else(|| PathBuf::from(DEFAULT_ASSETS_DIR), PathBuf::from);

        let cookie_secure = match env.string(COOKIE_SECURE_ENV) {
            Some(value) => parse_bool(&value).ok_or(ServerConfigError::InvalidEnv {
                name: COOKIE_SECURE_ENV,
                value,
                expected: BOOL_EXPECTED,
            })?,
            None => false,
        };
        if !cookie_secure {
            warn!("state cookies are sent without the Secure attribute");
        }

        Ok(Self {
            bind_addr,
            assets_dir,
            cookie_secure,
        })
    }

    /// Return the socket address the server will bind to.
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Some(true),
        "0" | "false" | "no" => Some(false),
        _ => None,
    }
}
