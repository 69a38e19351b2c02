//! Per-save PostgreSQL connections.
//!
//! Every save opens its own `AsyncPgConnection` and drops it afterwards; no
//! connection outlives the request that opened it.

use diesel_async::{AsyncConnection, AsyncPgConnection};
use tracing::debug;

use super::config::{DbConfig, DbConfigError};

/// Errors raised while opening a connection.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConnectionError {
    /// The configured settings do not form a usable URL.
    #[error("invalid database settings: {message}")]
    Settings { message: String },

    /// The server refused or could not be reached.
    #[error("failed to connect to database: {message}")]
    Connect { message: String },

    /// Settings were missing at startup; no connection can ever be opened.
    #[error("database is not configured: {message}")]
    Unconfigured { message: String },
}

impl From<DbConfigError> for ConnectionError {
    fn from(error: DbConfigError) -> Self {
        Self::Settings {
            message: error.to_string(),
        }
    }
}

/// Opens dedicated connections from a fixed [`DbConfig`].
///
/// A factory built from failed settings stays usable: every
/// [`establish`](Self::establish) call reports
/// [`ConnectionError::Unconfigured`] instead, so the rest of the service keeps
/// serving.
#[derive(Debug, Clone)]
pub struct ConnectionFactory {
    settings: Result<DbConfig, ConnectionError>,
}

impl ConnectionFactory {
    pub fn new(config: DbConfig) -> Self {
        Self {
            settings: Ok(config),
        }
    }

    /// A factory whose settings could not be read.
    pub fn unconfigured(error: &DbConfigError) -> Self {
        Self {
            settings: Err(ConnectionError::Unconfigured {
                message: error.to_string(),
            }),
        }
    }

    /// Wrap the outcome of [`DbConfig::from_env`].
    pub fn from_settings(settings: Result<DbConfig, DbConfigError>) -> Self {
        match settings {
            Ok(config) => Self::new(config),
            Err(error) => Self::unconfigured(&error),
        }
    }

    /// Settings in use, or `None` when the factory is unconfigured.
    pub fn config(&self) -> Option<&DbConfig> {
        self.settings.as_ref().ok()
    }

    /// Establish a fresh connection.
    ///
    /// # Errors
    /// Returns [`ConnectionError`] when settings are missing, the URL cannot
    /// be built, or the server rejects the connection.
    pub async fn establish(&self) -> Result<AsyncPgConnection, ConnectionError> {
        let config = self.settings.as_ref().map_err(Clone::clone)?;
        let url = config.database_url()?;
        debug!(
            host = config.host(),
            database = config.database(),
            "opening database connection"
        );
        AsyncPgConnection::establish(url.as_str())
            .await
            .map_err(|err| ConnectionError::Connect {
                message: err.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    //! Coverage for factories built from missing settings.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn missing_settings_fail_every_connection() {
        let factory = ConnectionFactory::from_settings(Err(DbConfigError::MissingEnv {
            name: "POSTGRES_HOST",
        }));
        assert!(factory.config().is_none());

        let Err(err) = factory.establish().await else {
            panic!("an unconfigured factory must not connect");
        };
        assert_eq!(
            err,
            ConnectionError::Unconfigured {
                message: "missing required environment variable: POSTGRES_HOST".to_owned(),
            }
        );
    }
}
