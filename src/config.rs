use figment::providers::{Env, Serialized};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Process-wide configuration, loaded once at startup.
///
/// Defaults are overridable through `TRACKLE_`-prefixed environment
/// variables (e.g. `TRACKLE_DATABASE_URL`, `TRACKLE_BIND_ADDR`).
pub static CONFIG: LazyLock<Config> =
    LazyLock::new(|| Config::load().expect("invalid configuration"));

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Address the HTTP server binds to.
    pub bind_addr: String,
    /// SQLite connection string, e.g. `sqlite:trackle.db`.
    pub database_url: String,
    /// Fallback log level when `RUST_LOG` is unset.
    pub loglevel: String,
    /// Secret used to derive the private cookie key. Must be at least
    /// 32 bytes; when absent a random key is generated per process,
    /// which invalidates sessions across restarts.
    pub cookie_secret: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8000".to_string(),
            database_url: "sqlite:trackle.db".to_string(),
            loglevel: "info".to_string(),
            cookie_secret: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, figment::Error> {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Env::prefixed("TRACKLE_"))
            .extract()
    }
}
