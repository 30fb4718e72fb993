//! Configuration management using Figment
//!
//! Configuration is loaded from multiple sources with the following precedence (highest to lowest):
//! 1. Environment variables (prefix: USER_MANAGER_, `__` separates nested keys)
//! 2. Current working directory: ./config.toml
//! 3. XDG config directory: ~/.config/user-manager/config.toml
//! 4. System directory: /etc/user-manager/config.toml
//! 5. Default values

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::Result;

const APP_DIR: &str = "user-manager";
const ENV_PREFIX: &str = "USER_MANAGER_";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Service configuration
    #[serde(default)]
    pub service: ServiceConfig,

    /// Remote user API
    #[serde(default)]
    pub api: ApiConfig,

    /// Page presentation
    #[serde(default)]
    pub ui: UiConfig,

    /// Middleware configuration
    #[serde(default)]
    pub middleware: MiddlewareConfig,
}

/// Service-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Service name
    #[serde(default = "default_name")]
    pub name: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Log level or filter directive (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Log output format
    #[serde(default)]
    pub log_format: LogFormat,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Environment (dev, staging, production)
    #[serde(default = "default_environment")]
    pub environment: String,
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Pretty,
    /// One JSON object per line
    Json,
}

/// Remote user API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the API server
    #[serde(default = "default_api_base_url")]
    pub base_url: String,

    /// Collection path under the base URL
    #[serde(default = "default_api_resource")]
    pub resource: String,

    /// Per-request timeout in seconds; no timeout when unset
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

/// Page presentation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Title shown in the page header
    #[serde(default = "default_title")]
    pub title: String,

    /// Delay before a notice hides itself, in milliseconds
    #[serde(default = "default_notice_timeout_ms")]
    pub notice_timeout_ms: u64,
}

/// Middleware configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MiddlewareConfig {
    /// Request body size limit in MB
    #[serde(default = "default_body_limit_mb")]
    pub body_limit_mb: usize,

    /// CORS mode (permissive, restrictive)
    #[serde(default = "default_cors_mode")]
    pub cors_mode: String,
}

impl ServiceConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            port: default_port(),
            log_level: default_log_level(),
            log_format: LogFormat::default(),
            timeout_secs: default_timeout(),
            environment: default_environment(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_api_base_url(),
            resource: default_api_resource(),
            timeout_secs: None,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            notice_timeout_ms: default_notice_timeout_ms(),
        }
    }
}

impl Default for MiddlewareConfig {
    fn default() -> Self {
        Self {
            body_limit_mb: default_body_limit_mb(),
            cors_mode: default_cors_mode(),
        }
    }
}

// Default value functions
fn default_name() -> String {
    APP_DIR.to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_environment() -> String {
    "dev".to_string()
}

fn default_api_base_url() -> String {
    "http://localhost:3001".to_string()
}

fn default_api_resource() -> String {
    "usuario".to_string()
}

fn default_title() -> String {
    "User Manager".to_string()
}

fn default_notice_timeout_ms() -> u64 {
    6000
}

fn default_body_limit_mb() -> usize {
    1
}

fn default_cors_mode() -> String {
    "permissive".to_string()
}

impl Config {
    /// Load configuration from all sources
    ///
    /// Config files are merged lowest priority first, so ./config.toml
    /// overrides the XDG file, which overrides the system file.
    /// Environment variables (USER_MANAGER_ prefix) override all file-based configs.
    pub fn load() -> Result<Self> {
        let config_paths = Self::find_config_paths();

        tracing::debug!("Searching for config files in order:");
        for path in &config_paths {
            tracing::debug!("  - {}", path.display());
        }

        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        for path in config_paths.iter().rev() {
            if path.exists() {
                tracing::info!("Loading configuration from: {}", path.display());
                figment = figment.merge(Toml::file(path));
            }
        }

        let config = figment.merge(Self::env()).extract()?;
        Ok(config)
    }

    /// Load configuration from a specific file
    ///
    /// This bypasses the XDG and system directories.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(path.as_ref()))
            .merge(Self::env())
            .extract()?;

        Ok(config)
    }

    fn env() -> Env {
        Env::prefixed(ENV_PREFIX).split("__")
    }

    /// Find all possible config file paths
    ///
    /// Returns paths in priority order (highest first):
    /// 1. Current working directory
    /// 2. XDG config directory
    /// 3. System directory
    fn find_config_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("config.toml")];

        let xdg_dirs = xdg::BaseDirectories::with_prefix(APP_DIR);
        if let Some(path) = xdg_dirs.find_config_file("config.toml") {
            paths.push(path);
        }

        paths.push(PathBuf::from("/etc").join(APP_DIR).join("config.toml"));

        paths
    }

    /// Socket address the server binds to
    pub fn listen_addr(&self) -> std::net::SocketAddr {
        std::net::SocketAddr::from(([0, 0, 0, 0], self.service.port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.service.port, 8080);
        assert_eq!(config.service.log_level, "info");
        assert_eq!(config.service.log_format, LogFormat::Pretty);
        assert_eq!(config.api.base_url, "http://localhost:3001");
        assert_eq!(config.api.resource, "usuario");
        assert_eq!(config.api.timeout_secs, None);
        assert_eq!(config.ui.notice_timeout_ms, 6000);
    }

    #[test]
    fn test_load_from_file_and_env() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "custom.toml",
                r#"
                [service]
                port = 9000
                log_format = "json"

                [api]
                base_url = "http://api.internal:8000"
                "#,
            )?;
            jail.set_env("USER_MANAGER_API__TIMEOUT_SECS", "5");
            jail.set_env("USER_MANAGER_UI__TITLE", "Users");

            let config = Config::load_from("custom.toml").expect("config loads");
            assert_eq!(config.service.port, 9000);
            assert_eq!(config.service.log_format, LogFormat::Json);
            assert_eq!(config.api.base_url, "http://api.internal:8000");
            assert_eq!(config.api.resource, "usuario");
            assert_eq!(config.api.timeout_secs, Some(5));
            assert_eq!(config.ui.title, "Users");
            Ok(())
        });
    }

    #[test]
    fn test_load_picks_up_cwd_config() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "config.toml",
                r#"
                [middleware]
                cors_mode = "restrictive"
                "#,
            )?;
            jail.set_env("USER_MANAGER_SERVICE__PORT", "7070");

            let config = Config::load().expect("config loads");
            assert_eq!(config.middleware.cors_mode, "restrictive");
            assert_eq!(config.service.port, 7070);
            Ok(())
        });
    }

    #[test]
    fn test_listen_addr() {
        let config = Config::default();
        assert_eq!(config.listen_addr().port(), 8080);
    }
}
