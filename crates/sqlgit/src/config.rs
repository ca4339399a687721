//! Connection configuration.

use std::fmt;

use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions};
use tracing::info;

use crate::error::{Result, SqlGitError};

/// Default MySQL host.
pub const DEFAULT_HOST: &str = "localhost";

/// Default MySQL port.
pub const DEFAULT_PORT: u16 = 3306;

/// Everything needed to reach one database.
///
/// Passed by value to whatever needs a connection; there is no global
/// connection state.
#[derive(Clone)]
pub struct ConnectionConfig {
    /// Server host.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// User name.
    pub user: String,
    /// Password.
    pub password: String,
    /// Schema (database) to snapshot and migrate.
    pub database: String,
}

impl ConnectionConfig {
    /// Creates a config for `localhost:3306`.
    #[must_use]
    pub fn new(
        user: impl Into<String>,
        password: impl Into<String>,
        database: impl Into<String>,
    ) -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            user: user.into(),
            password: password.into(),
            database: database.into(),
        }
    }

    /// Sets the server host.
    #[must_use]
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Sets the server port.
    #[must_use]
    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Checks that no required field is blank.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("user", &self.user),
            ("database", &self.database),
            ("host", &self.host),
        ] {
            if value.trim().is_empty() {
                return Err(SqlGitError::Config(format!("No {field} defined.")));
            }
        }
        Ok(())
    }

    /// Returns sqlx connect options for this config.
    #[must_use]
    pub fn connect_options(&self) -> MySqlConnectOptions {
        MySqlConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.database)
    }

    /// Opens a single-connection pool, so the whole merge runs on one
    /// session.
    pub async fn connect(&self) -> Result<MySqlPool> {
        self.validate()?;
        info!(
            host = %self.host,
            port = self.port,
            database = %self.database,
            "Connecting to database"
        );
        MySqlPoolOptions::new()
            .max_connections(1)
            .connect_with(self.connect_options())
            .await
            .map_err(SqlGitError::Connect)
    }
}

impl fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("database", &self.database)
            .finish()
    }
}
