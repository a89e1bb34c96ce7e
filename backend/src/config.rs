//! Service configuration.
//!
//! Defaults, optionally overlaid by a YAML file, then by environment
//! variables:
//!
//! | variable                      | field                       |
//! |-------------------------------|-----------------------------|
//! | `SALES_TRACKER_CONFIG`        | path of the YAML file       |
//! | `SALES_TRACKER_BIND_ADDR`     | `server.bind_addr`          |
//! | `SALES_TRACKER_DATABASE_URL`  | `database.url`              |
//! | `SALES_TRACKER_DAILY_TARGET`  | `sales.daily_target_floor`  |

use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::domain::email_service::EmailConfig;
use crate::domain::metrics::DEFAULT_DAILY_TARGET;

pub const CONFIG_PATH_ENV: &str = "SALES_TRACKER_CONFIG";
pub const BIND_ADDR_ENV: &str = "SALES_TRACKER_BIND_ADDR";
pub const DATABASE_URL_ENV: &str = "SALES_TRACKER_DATABASE_URL";
pub const DAILY_TARGET_ENV: &str = "SALES_TRACKER_DAILY_TARGET";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub sales: SalesConfig,
    pub auth: AuthConfig,
    pub email: EmailConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: String,
    /// Origin allowed by CORS (the frontend's dev server)
    pub cors_origin: String,
    /// Prebuilt frontend assets served for non-API paths
    pub static_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3000".to_string(),
            cors_origin: "http://localhost:8080".to_string(),
            static_dir: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://sales_tracker.db".to_string(),
            max_connections: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SalesConfig {
    /// Per-day floor used when projecting the month-end total
    pub daily_target_floor: f64,
}

impl Default for SalesConfig {
    fn default() -> Self {
        Self {
            daily_target_floor: DEFAULT_DAILY_TARGET,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub login_token_ttl_minutes: i64,
    pub session_ttl_hours: i64,
    /// Also return login tokens in the HTTP response (development only)
    pub expose_login_tokens: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            login_token_ttl_minutes: 15,
            session_ttl_hours: 24,
            expose_login_tokens: false,
        }
    }
}

impl AppConfig {
    /// Load from `SALES_TRACKER_CONFIG` (if set) and the process environment
    pub fn load() -> Result<Self> {
        let path = std::env::var(CONFIG_PATH_ENV).ok().map(PathBuf::from);
        let mut config = match path {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a YAML file; missing sections and fields keep their defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read configuration file {}", path.display()))?;
        serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse configuration file {}", path.display()))
    }

    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(addr) = lookup(BIND_ADDR_ENV) {
            self.server.bind_addr = addr;
        }
        if let Some(url) = lookup(DATABASE_URL_ENV) {
            self.database.url = url;
        }
        if let Some(target) = lookup(DAILY_TARGET_ENV) {
            self.sales.daily_target_floor = target
                .trim()
                .parse()
                .with_context(|| format!("{} is not a number: {:?}", DAILY_TARGET_ENV, target))?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        self.socket_addr()?;
        let floor = self.sales.daily_target_floor;
        if !floor.is_finite() || floor < 0.0 {
            bail!("sales.daily_target_floor must be a non-negative number, got {}", floor);
        }
        if self.auth.login_token_ttl_minutes <= 0 {
            bail!("auth.login_token_ttl_minutes must be positive");
        }
        if self.auth.session_ttl_hours <= 0 {
            bail!("auth.session_ttl_hours must be positive");
        }
        if self.database.url.trim().is_empty() {
            bail!("database.url must not be empty");
        }
        if self.email.link_base_url.trim().is_empty() {
            bail!("email.link_base_url must not be empty");
        }
        if self.email.enabled && (self.email.smtp_server.trim().is_empty() || self.email.from_email.trim().is_empty()) {
            bail!("email.smtp_server and email.from_email are required when email is enabled");
        }
        Ok(())
    }

    pub fn socket_addr(&self) -> Result<SocketAddr> {
        self.server
            .bind_addr
            .parse()
            .map_err(|e| anyhow!("invalid server.bind_addr {:?}: {}", self.server.bind_addr, e))
    }
}
