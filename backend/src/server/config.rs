//! Server settings and the runtime configuration built from them.

use std::net::{Ipv4Addr, SocketAddr};

use actix_web::http::header::HeaderName;
use linkbio::inbound::http::identity::{DEFAULT_IDENTITY_HEADER, IdentityHeader};
use linkbio::outbound::persistence::DbPool;
use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;

/// Settings loaded from CLI flags, `LINKBIO_*` variables and config files.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "LINKBIO")]
pub struct ServerSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<SocketAddr>,
    /// PostgreSQL URL; the in-memory store is used when absent.
    pub database_url: Option<String>,
    /// Header carrying the gateway-verified owner id.
    pub identity_header: Option<String>,
    /// Upper bound on pooled database connections.
    pub db_max_connections: Option<u32>,
}

impl ServerSettings {
    /// Listen address, defaulting to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
            .unwrap_or_else(|| SocketAddr::from((Ipv4Addr::UNSPECIFIED, DEFAULT_PORT)))
    }

    /// Configured database URL, if any.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url.as_deref()
    }

    /// Identity header name, defaulting to `x-owner-id`.
    ///
    /// # Errors
    ///
    /// Returns the rejected value when it is not a valid header name.
    pub fn identity_header(&self) -> Result<IdentityHeader, String> {
        let raw = self
            .identity_header
            .as_deref()
            .unwrap_or(DEFAULT_IDENTITY_HEADER);
        HeaderName::from_bytes(raw.as_bytes())
            .map(IdentityHeader::new)
            .map_err(|_| raw.to_owned())
    }

    /// Pool size, defaulting to 10.
    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections
            .unwrap_or(DEFAULT_DB_MAX_CONNECTIONS)
    }
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) identity_header: IdentityHeader,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    /// Construct a configuration backed by the in-memory store.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, identity_header: IdentityHeader) -> Self {
        Self {
            bind_addr,
            identity_header,
            db_pool: None,
        }
    }

    /// Attach a database connection pool for the Diesel adapters.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 4] = [
        "LINKBIO_BIND_ADDR",
        "LINKBIO_DATABASE_URL",
        "LINKBIO_IDENTITY_HEADER",
        "LINKBIO_DB_MAX_CONNECTIONS",
    ];

    fn load_from_empty_args() -> ServerSettings {
        ServerSettings::load_from_iter([OsString::from("linkbio")]).expect("config should load")
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();
        assert_eq!(settings.bind_addr(), SocketAddr::from(([0, 0, 0, 0], 8080)));
        assert!(settings.database_url().is_none());
        assert_eq!(
            settings.identity_header().expect("default header").name().as_str(),
            DEFAULT_IDENTITY_HEADER
        );
        assert_eq!(settings.db_max_connections(), 10);
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("LINKBIO_BIND_ADDR", Some("127.0.0.1:9000".to_owned())),
            (
                "LINKBIO_DATABASE_URL",
                Some("postgres://localhost/linkbio".to_owned()),
            ),
            ("LINKBIO_IDENTITY_HEADER", Some("X-User-Id".to_owned())),
            ("LINKBIO_DB_MAX_CONNECTIONS", Some("4".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(settings.bind_addr(), SocketAddr::from(([127, 0, 0, 1], 9000)));
        assert_eq!(settings.database_url(), Some("postgres://localhost/linkbio"));
        assert_eq!(
            settings.identity_header().expect("valid header").name().as_str(),
            "x-user-id"
        );
        assert_eq!(settings.db_max_connections(), 4);
    }

    #[rstest]
    fn invalid_identity_header_is_reported() {
        let settings = ServerSettings {
            bind_addr: None,
            database_url: None,
            identity_header: Some("bad header".to_owned()),
            db_max_connections: None,
        };
        assert_eq!(settings.identity_header(), Err("bad header".to_owned()));
    }
}
