use std::env;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

/// Minimum recommended HS256 secret length in bytes.
pub const MIN_SECRET_BYTES: usize = 32;

/// Longest accepted token lifetime (one year).
pub const MAX_EXPIRATION_HOURS: i64 = 24 * 366;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub revocation: RevocationConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

/// User store configuration. Without a URL the service keeps users in memory.
#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiration_hours: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RevocationConfig {
    pub sweep_interval_secs: u64,
}

fn default_max_connections() -> u32 {
    5
}

impl JwtConfig {
    pub fn has_weak_secret(&self) -> bool {
        self.secret.len() < MIN_SECRET_BYTES
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.secret.trim().is_empty() {
            return Err(ConfigError::Message("jwt.secret must not be empty".to_string()));
        }
        if !(1..=MAX_EXPIRATION_HOURS).contains(&self.expiration_hours) {
            return Err(ConfigError::Message(format!(
                "jwt.expiration_hours must be between 1 and {}, got {}",
                MAX_EXPIRATION_HOURS, self.expiration_hours
            )));
        }
        Ok(())
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (JWT__SECRET, SERVER__HTTP_PORT, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    ///
    /// `jwt.secret` has no default and must come from one of these sources.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with(Environment::default())
    }

    fn load_with(environment: Environment) -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: DATABASE__URL=postgres://... overrides database.url
            .add_source(environment.separator("__"))
            .build()?;

        let config: Config = configuration.try_deserialize()?;
        config.jwt.validate()?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use config::FileFormat;

    use super::*;

    fn environment(vars: &[(&str, &str)]) -> Environment {
        let source: HashMap<String, String> = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        Environment::default().source(Some(source))
    }

    fn jwt(secret: &str, expiration_hours: i64) -> JwtConfig {
        JwtConfig {
            secret: secret.to_string(),
            expiration_hours,
        }
    }

    #[test]
    fn test_environment_overrides_files() {
        let config = Config::load_with(environment(&[
            ("JWT__SECRET", "from-environment-secret-at-least-32-bytes"),
            ("DATABASE__URL", "postgresql://db.internal/identity"),
            ("SERVER__HTTP_PORT", "9090"),
        ]))
        .unwrap();

        assert_eq!(config.jwt.secret, "from-environment-secret-at-least-32-bytes");
        assert_eq!(
            config.database.url.as_deref(),
            Some("postgresql://db.internal/identity")
        );
        assert_eq!(config.server.http_port, 9090);
        assert_eq!(config.jwt.expiration_hours, 24);
    }

    #[test]
    fn test_missing_secret_fails() {
        assert!(Config::load_with(environment(&[])).is_err());
    }

    #[test]
    fn test_expiration_hours_bounds() {
        let secret = "a-secret-that-is-at-least-32-bytes-long";

        assert!(jwt(secret, 1).validate().is_ok());
        assert!(jwt(secret, MAX_EXPIRATION_HOURS).validate().is_ok());
        assert!(jwt(secret, 0).validate().is_err());
        assert!(jwt(secret, -5).validate().is_err());
        assert!(jwt(secret, MAX_EXPIRATION_HOURS + 1).validate().is_err());
        assert!(jwt(secret, i64::MAX).validate().is_err());
        assert!(jwt("  ", 24).validate().is_err());
    }

    #[test]
    fn test_deserialize_without_database_url() {
        let configuration = ConfigBuilder::builder()
            .add_source(config::File::from_str(
                r#"
                [server]
                http_port = 8080

                [database]
                max_connections = 3

                [jwt]
                secret = "short"
                expiration_hours = 24

                [revocation]
                sweep_interval_secs = 60
                "#,
                FileFormat::Toml,
            ))
            .build()
            .unwrap();

        let config: Config = configuration.try_deserialize().unwrap();

        assert_eq!(config.server.http_port, 8080);
        assert!(config.database.url.is_none());
        assert_eq!(config.database.max_connections, 3);
        assert_eq!(config.jwt.expiration_hours, 24);
        assert!(config.jwt.has_weak_secret());
        assert_eq!(config.revocation.sweep_interval_secs, 60);
    }
}
