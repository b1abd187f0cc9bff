//! Environment-derived settings.
//!
//! pgadm is configured the way the surrounding tooling is: through a
//! handful of well-known environment variables with Pigsty-convention
//! defaults. There is no config file of its own.

use std::path::PathBuf;

/// PostgreSQL data directory: `$PGDATA`, default `/pg/data`.
pub fn pg_data() -> PathBuf {
    std::env::var_os("PGDATA")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("/pg/data"))
}

/// PostgreSQL log directory: `$PGLOG`, default `/pg/log/postgres`.
pub fn pg_log_dir() -> PathBuf {
    std::env::var_os("PGLOG")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("/pg/log/postgres"))
}

/// Database superuser account: `$PGDBSU`, default `postgres`.
pub fn dbsu() -> String {
    std::env::var("PGDBSU").unwrap_or_else(|_| "postgres".to_string())
}

/// pgBackRest stanza name: `$PGBACKREST_STANZA`, default `pgsql`.
pub fn stanza() -> String {
    std::env::var("PGBACKREST_STANZA").unwrap_or_else(|_| "pgsql".to_string())
}

/// Patroni config file: `$PATRONI_CONFIG`, default `/pg/bin/patroni.yml`.
pub fn patroni_config() -> PathBuf {
    std::env::var_os("PATRONI_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("/pg/bin/patroni.yml"))
}

/// Pigsty installation directory: `$PIGSTY_HOME`, default `~/pigsty`.
pub fn pigsty_home() -> PathBuf {
    if let Some(home) = std::env::var_os("PIGSTY_HOME") {
        return PathBuf::from(home);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("pigsty")
}
