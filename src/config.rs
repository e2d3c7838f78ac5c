use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

use espeat_gateway::{PaymentConfig, ScannerConfig};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub auth: AuthConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub paiement: PaymentConfig,
    #[serde(default)]
    pub scanner: ScannerConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    #[serde(default = "default_jwt_lifetime_seconds")]
    pub jwt_lifetime_seconds: u64,
}

fn default_jwt_lifetime_seconds() -> u64 {
    // une semaine
    7 * 24 * 3600
}

#[derive(Debug, Deserialize, Clone)]
pub struct StoreConfig {
    /// Where the JSON snapshot blob lives.
    #[serde(default = "default_snapshot_path")]
    pub snapshot_path: String,
}

fn default_snapshot_path() -> String {
    "espeat_state.json".to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            snapshot_path: default_snapshot_path(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        ObservabilityConfig {
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from file and environment variables.
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (ESPEAT__SERVER__PORT, etc.)
    /// 2. Config file specified by path
    /// 3. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        builder = builder
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("store.snapshot_path", default_snapshot_path())?;

        let config_file_path = config_path
            .or_else(|| env::var("CONFIG_PATH").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        builder = builder.add_source(
            Environment::with_prefix("ESPEAT")
                .separator("__")
                .try_parsing(true),
        );

        // legacy variable without prefix, kept for deployment scripts
        if let Ok(jwt_secret) = env::var("JWT_SECRET") {
            builder = builder.set_override("auth.jwt_secret", jwt_secret)?;
        }

        builder.build()?.try_deserialize()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.auth.jwt_secret.len() < 32 {
            return Err("le secret JWT doit faire au moins 32 caractères".to_string());
        }
        if self.server.port == 0 {
            return Err("le port du serveur doit être supérieur à 0".to_string());
        }
        if !(0.0..=1.0).contains(&self.paiement.taux_echec) {
            return Err("paiement.taux_echec doit rester entre 0 et 1".to_string());
        }
        if self.paiement.tentatives_max == 0 {
            return Err("paiement.tentatives_max doit être au moins 1".to_string());
        }
        Ok(())
    }

    /// Fixed configuration for the test router: no file, no environment.
    pub fn pour_tests(jwt_secret: &str) -> Self {
        Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 3000,
            },
            auth: AuthConfig {
                jwt_secret: jwt_secret.to_string(),
                jwt_lifetime_seconds: default_jwt_lifetime_seconds(),
            },
            store: StoreConfig::default(),
            paiement: PaymentConfig::default(),
            scanner: ScannerConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_valide() -> Config {
        Config::pour_tests("test_secret_key_minimum_32_characters_long")
    }

    #[test]
    fn test_validation_short_secret() {
        let mut config = config_valide();
        config.auth.jwt_secret = "court".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_zero_port() {
        let mut config = config_valide();
        config.server.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_failure_rate_out_of_range() {
        let mut config = config_valide();
        config.paiement.taux_echec = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_valid_config() {
        assert!(config_valide().validate().is_ok());
    }
}
