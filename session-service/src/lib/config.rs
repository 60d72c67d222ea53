use std::env;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

/// Application configuration for session-service.
///
/// Loaded from configuration files with environment variable overrides.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub session: SessionConfig,
}

/// HTTP server configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

/// Session cookie configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct SessionConfig {
    /// Name of the cookie carrying the token
    pub cookie_name: String,
    /// Token lifetime, renewed on every authenticated request
    pub ttl_seconds: i64,
    /// Redirect target for protected routes without a valid session
    pub login_path: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: "user".to_string(),
            ttl_seconds: auth::DEFAULT_TTL_SECONDS,
            login_path: "/login".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (SERVER__HTTP_PORT, SESSION__TTL_SECONDS, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    /// 4. Built-in defaults
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());
        let defaults = SessionConfig::default();

        let configuration = ConfigBuilder::builder()
            .set_default("server.http_port", 8080_i64)?
            .set_default("session.cookie_name", defaults.cookie_name)?
            .set_default("session.ttl_seconds", defaults.ttl_seconds)?
            .set_default("session.login_path", defaults.login_path)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: SESSION__TTL_SECONDS=600 overrides session.ttl_seconds
            .add_source(Environment::with_prefix("").separator("__"))
            .build()?;

        let config: Config = configuration.try_deserialize()?;

        if config.session.ttl_seconds <= 0 {
            return Err(ConfigError::Message(format!(
                "session.ttl_seconds must be positive, got {}",
                config.session.ttl_seconds
            )));
        }

        Ok(config)
    }
}
