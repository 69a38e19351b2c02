//! Database connection settings sourced from the environment.

use std::fmt;

use mockable::Env;
use url::Url;
use zeroize::Zeroizing;

pub const HOST_ENV: &str = "POSTGRES_HOST";
pub const DATABASE_ENV: &str = "POSTGRES_DB";
pub const USER_ENV: &str = "POSTGRES_USER";
pub const PASSWORD_ENV: &str = "POSTGRES_PASSWORD";

/// Errors raised while assembling database settings.
#[derive(Debug, thiserror::Error)]
pub enum DbConfigError {
    /// A required environment variable is missing or blank.
    #[error("missing required environment variable: {name}")]
    MissingEnv { name: &'static str },
    /// The values do not form a valid connection URL.
    #[error("invalid database connection settings: {message}")]
    InvalidUrl { message: String },
}

/// Credentials and location of the registration database.
///
/// `Debug` never prints the password.
///
/// # Examples
/// ```
/// use mockable::MockEnv;
/// use signup::outbound::persistence::DbConfig;
///
/// let mut env = MockEnv::new();
/// env.expect_string().returning(|name| match name {
///     "POSTGRES_HOST" => Some("db".to_owned()),
///     "POSTGRES_DB" => Some("forms".to_owned()),
///     "POSTGRES_USER" => Some("app".to_owned()),
///     "POSTGRES_PASSWORD" => Some("s3cret".to_owned()),
///     _ => None,
/// });
///
/// let config = DbConfig::from_env(&env).expect("all variables set");
/// assert_eq!(config.host(), "db");
/// assert!(!format!("{config:?}").contains("s3cret"));
/// ```
#[derive(Clone)]
pub struct DbConfig {
    host: String,
    database: String,
    user: String,
    password: Zeroizing<String>,
}

fn required<E: Env>(env: &E, name: &'static str) -> Result<String, DbConfigError> {
    env.string(name)
        .filter(|value| !value.trim().is_empty())
        .ok_or(DbConfigError::MissingEnv { name })
}

impl DbConfig {
    /// Read all four `POSTGRES_*` variables; none has a default.
    ///
    /// # Errors
    /// Returns [`DbConfigError::MissingEnv`] naming the first absent variable.
    pub fn from_env<E: Env>(env: &E) -> Result<Self, DbConfigError> {
        Ok(Self {
            host: required(env, HOST_ENV)?,
            database: required(env, DATABASE_ENV)?,
            user: required(env, USER_ENV)?,
            password: Zeroizing::new(required(env, PASSWORD_ENV)?),
        })
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn database(&self) -> &str {
        &self.database
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    /// `postgres://` URL with every component percent-encoded.
    ///
    /// # Errors
    /// Returns [`DbConfigError::InvalidUrl`] when the host is not a valid
    /// `host[:port]` authority.
    pub fn database_url(&self) -> Result<Zeroizing<String>, DbConfigError> {
        let invalid = |message: String| DbConfigError::InvalidUrl { message };
        let mut url = Url::parse(&format!("postgres://{}", self.host))
            .map_err(|err| invalid(format!("host {:?}: {err}", self.host)))?;
        url.set_username(&self.user)
            .map_err(|()| invalid("username cannot be set".to_owned()))?;
        url.set_password(Some(self.password.as_str()))
            .map_err(|()| invalid("password cannot be set".to_owned()))?;
        url.path_segments_mut()
            .map_err(|()| invalid("URL cannot carry a database name".to_owned()))?
            .clear()
            .push(&self.database);
        Ok(Zeroizing::new(url.into()))
    }
}

impl fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbConfig")
            .field("host", &self.host)
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .finish()
    }
}
