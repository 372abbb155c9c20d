//! Application settings loaded via OrthoConfig.
//!
//! Values merge from CLI flags, `MIGO_*` environment variables and config
//! files. Every field is optional; accessors supply the defaults.

use std::net::SocketAddr;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;

/// Invalid setting values detected after loading.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// `bind_addr` is not a socket address.
    #[error("invalid bind address {value:?}: {source}")]
    InvalidBindAddr {
        /// Value as configured.
        value: String,
        /// Parser failure.
        #[source]
        source: std::net::AddrParseError,
    },
}

/// Server settings.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "MIGO")]
pub struct AppSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection string; the in-memory store is used when unset.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    pub db_max_connections: Option<u32>,
    /// Apply embedded migrations before serving.
    #[ortho_config(default = false)]
    pub run_migrations: bool,
    /// Basic auth user name.
    pub auth_username: Option<String>,
    /// Basic auth password.
    pub auth_password: Option<String>,
}

impl AppSettings {
    /// Parsed listen address, defaulting to `0.0.0.0:8080`.
    ///
    /// # Errors
    /// Returns [`SettingsError::InvalidBindAddr`] when the value does not parse.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value
            .parse()
            .map_err(|source| SettingsError::InvalidBindAddr {
                value: value.to_owned(),
                source,
            })
    }

    /// Database URL with surrounding whitespace removed; blank counts as unset.
    #[must_use]
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Configured pool size, or ten when unset.
    #[must_use]
    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections
            .unwrap_or(DEFAULT_DB_MAX_CONNECTIONS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 6] = [
        "MIGO_BIND_ADDR",
        "MIGO_DATABASE_URL",
        "MIGO_DB_MAX_CONNECTIONS",
        "MIGO_RUN_MIGRATIONS",
        "MIGO_AUTH_USERNAME",
        "MIGO_AUTH_PASSWORD",
    ];

    fn load() -> AppSettings {
        AppSettings::load_from_iter([OsString::from("migo-api")]).expect("settings should load")
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load();
        assert_eq!(
            settings.bind_addr().expect("default parses"),
            "0.0.0.0:8080".parse::<SocketAddr>().expect("literal")
        );
        assert!(settings.database_url().is_none());
        assert_eq!(settings.db_max_connections(), 10);
        assert!(!settings.run_migrations);
        assert!(settings.auth_username.is_none());
        assert!(settings.auth_password.is_none());
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("MIGO_BIND_ADDR", Some("127.0.0.1:9000".to_owned())),
            (
                "MIGO_DATABASE_URL",
                Some("postgres://migo@localhost/migo".to_owned()),
            ),
            ("MIGO_DB_MAX_CONNECTIONS", Some("4".to_owned())),
            ("MIGO_RUN_MIGRATIONS", Some("true".to_owned())),
            ("MIGO_AUTH_USERNAME", Some("admin".to_owned())),
            ("MIGO_AUTH_PASSWORD", Some("secret".to_owned())),
        ]);

        let settings = load();
        assert_eq!(
            settings.bind_addr().expect("override parses").port(),
            9000
        );
        assert_eq!(
            settings.database_url(),
            Some("postgres://migo@localhost/migo")
        );
        assert_eq!(settings.db_max_connections(), 4);
        assert!(settings.run_migrations);
        assert_eq!(settings.auth_username.as_deref(), Some("admin"));
        assert_eq!(settings.auth_password.as_deref(), Some("secret"));
    }

    #[rstest]
    fn blank_database_url_counts_as_unset() {
        let _guard = lock_env([("MIGO_DATABASE_URL", Some("   ".to_owned()))]);
        assert!(load().database_url().is_none());
    }

    #[rstest]
    fn invalid_bind_addr_is_reported() {
        let _guard = lock_env([("MIGO_BIND_ADDR", Some("not-an-address".to_owned()))]);
        let err = load().bind_addr().expect_err("invalid address rejected");
        assert!(err.to_string().contains("not-an-address"));
    }
}
