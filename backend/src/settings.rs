//! Server settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `HYPERMEDIA_*` environment variables and
//! configuration files, in OrthoConfig's usual precedence.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Configuration values for the HTTP server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "HYPERMEDIA")]
pub struct ServerSettings {
    /// Socket address to listen on.
    #[ortho_config(default = String::from(DEFAULT_BIND_ADDR))]
    pub bind_addr: String,
    /// Access rules file. Its presence switches on strict security.
    pub security_rules_path: Option<PathBuf>,
}

/// Settings values that failed to parse.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// `bind_addr` is not a socket address.
    #[error("invalid bind address {value}: {source}")]
    BindAddr {
        /// Configured value.
        value: String,
        /// Parse failure.
        #[source]
        source: std::net::AddrParseError,
    },
}

impl ServerSettings {
    /// Parse the configured bind address.
    ///
    /// # Errors
    /// [`SettingsError::BindAddr`] when the configured value does not parse.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        self.bind_addr
            .parse()
            .map_err(|source| SettingsError::BindAddr {
                value: self.bind_addr.clone(),
                source,
            })
    }

    /// Return the access rules path, if configured.
    pub fn security_rules_path(&self) -> Option<&Path> {
        self.security_rules_path.as_deref()
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for server settings parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 2] = ["HYPERMEDIA_BIND_ADDR", "HYPERMEDIA_SECURITY_RULES_PATH"];

    fn load_from_empty_args() -> ServerSettings {
        ServerSettings::load_from_iter([OsString::from("hypermedia")])
            .expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();
        assert_eq!(settings.bind_addr, DEFAULT_BIND_ADDR);
        assert_eq!(
            settings.bind_addr().expect("default bind address"),
            SocketAddr::from(([0, 0, 0, 0], 8080))
        );
        assert!(settings.security_rules_path().is_none());
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("HYPERMEDIA_BIND_ADDR", Some("127.0.0.1:9090".to_owned())),
            (
                "HYPERMEDIA_SECURITY_RULES_PATH",
                Some("/etc/hypermedia/rules.json".to_owned()),
            ),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("bind address"),
            SocketAddr::from(([127, 0, 0, 1], 9090))
        );
        assert_eq!(
            settings.security_rules_path(),
            Some(Path::new("/etc/hypermedia/rules.json"))
        );
    }

    #[rstest]
    fn rules_path_alone_keeps_default_bind_address() {
        let _guard = lock_env([
            ("HYPERMEDIA_BIND_ADDR", None::<String>),
            ("HYPERMEDIA_SECURITY_RULES_PATH", Some("rules.json".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(settings.bind_addr, DEFAULT_BIND_ADDR);
        assert_eq!(settings.security_rules_path(), Some(Path::new("rules.json")));
    }

    #[rstest]
    fn malformed_values_are_reported() {
        let _guard = lock_env([
            ("HYPERMEDIA_BIND_ADDR", Some("not-an-address".to_owned())),
            ("HYPERMEDIA_SECURITY_RULES_PATH", None::<String>),
        ]);

        let settings = load_from_empty_args();
        assert!(matches!(
            settings.bind_addr(),
            Err(SettingsError::BindAddr { .. })
        ));
    }
}
