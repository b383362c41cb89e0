//! Runtime configuration, read from the environment.

use std::net::SocketAddr;
use std::path::Path;

use anyhow::{Context, Result};

use routegate_auth::{Role, UserEntry};
use routegate_observability::tracing::LogFormat;

pub const ENV_BIND: &str = "ROUTEGATE_BIND";
pub const ENV_REALM: &str = "ROUTEGATE_REALM";
pub const ENV_LOG_FORMAT: &str = "ROUTEGATE_LOG_FORMAT";
pub const ENV_USERS_FILE: &str = "ROUTEGATE_USERS_FILE";

#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Listen address.
    pub bind: SocketAddr,
    /// Realm advertised in `WWW-Authenticate` challenges.
    pub realm: String,
    pub log_format: LogFormat,
    /// Embedded user table.
    pub users: Vec<UserEntry>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([0, 0, 0, 0], 8080)),
            realm: "routegate".to_string(),
            log_format: LogFormat::Json,
            users: default_users(),
        }
    }
}

impl ApiConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary key lookup (the environment in
    /// production, a map in tests).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let bind = match lookup(ENV_BIND) {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("Invalid {ENV_BIND}: {raw}"))?,
            None => defaults.bind,
        };

        let realm = lookup(ENV_REALM).unwrap_or(defaults.realm);

        let log_format = match lookup(ENV_LOG_FORMAT) {
            Some(raw) => LogFormat::parse(&raw)
                .with_context(|| format!("Invalid {ENV_LOG_FORMAT}: {raw} (expected json or pretty)"))?,
            None => defaults.log_format,
        };

        let users = match lookup(ENV_USERS_FILE) {
            Some(path) => load_users(Path::new(&path))?,
            None => defaults.users,
        };

        Ok(Self {
            bind,
            realm,
            log_format,
            users,
        })
    }
}

/// Users available when no users file is configured.
pub fn default_users() -> Vec<UserEntry> {
    vec![
        UserEntry::new("scott", "jb0ss", [Role::new("admin"), Role::new("user")]),
        UserEntry::new("stuart", "test", [Role::new("user")]),
        UserEntry::new("george", "geo", [Role::new("viewer")]),
        UserEntry::new("aurea", "auri", [Role::new("guest")]),
    ]
}

fn load_users(path: &Path) -> Result<Vec<UserEntry>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read users file {}", path.display()))?;
    parse_users(&raw).with_context(|| format!("Invalid users file {}", path.display()))
}

/// Parse a JSON array of `{username, password, roles}` objects.
pub fn parse_users(raw: &str) -> Result<Vec<UserEntry>> {
    let users: Vec<UserEntry> = serde_json::from_str(raw)?;
    Ok(users)
}
