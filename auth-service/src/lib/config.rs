use std::env;

use chrono::Duration;
use config::builder::DefaultState;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

use crate::domain::authentication::models::TokenSettings;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    pub tokens: TokenStoreConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub access_token_ttl_minutes: i64,
    pub refresh_token_ttl_minutes: i64,
}

impl JwtConfig {
    pub fn token_settings(&self) -> TokenSettings {
        TokenSettings::new(
            Duration::minutes(self.access_token_ttl_minutes),
            Duration::minutes(self.refresh_token_ttl_minutes),
        )
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct TokenStoreConfig {
    /// How often expired refresh tokens are swept from the store
    pub purge_interval_seconds: u64,
}

impl Config {
    /// Load configuration from defaults, files and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (JWT__SECRET, SERVER__HTTP_PORT, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    /// 4. Built-in defaults
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = Self::with_defaults(ConfigBuilder::builder())?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: JWT__ACCESS_TOKEN_TTL_MINUTES=5 overrides jwt.access_token_ttl_minutes
            .add_source(Environment::default().separator("__"))
            .build()?;

        configuration.try_deserialize()
    }

    fn with_defaults(
        builder: config::ConfigBuilder<DefaultState>,
    ) -> Result<config::ConfigBuilder<DefaultState>, ConfigError> {
        builder
            .set_default("server.http_port", 8080)?
            .set_default("jwt.secret", "your-secret-key")?
            .set_default("jwt.access_token_ttl_minutes", 15)?
            .set_default("jwt.refresh_token_ttl_minutes", 10080)?
            .set_default("tokens.purge_interval_seconds", 300)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config: Config = Config::with_defaults(ConfigBuilder::builder())
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.server.http_port, 8080);
        assert_eq!(config.jwt.secret, "your-secret-key");
        assert_eq!(config.tokens.purge_interval_seconds, 300);

        let settings = config.jwt.token_settings();
        assert_eq!(settings.access_ttl, Duration::minutes(15));
        assert_eq!(settings.refresh_ttl, Duration::days(7));
    }

    #[test]
    fn test_overrides_take_precedence() {
        let config: Config = Config::with_defaults(ConfigBuilder::builder())
            .unwrap()
            .set_override("jwt.access_token_ttl_minutes", 5)
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.jwt.token_settings().access_ttl, Duration::minutes(5));
    }
}
