use anyhow::{anyhow, Context, Result};
use std::env;
use std::str::FromStr;

/// Which record store backs the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres,
    Memory,
}

impl FromStr for StorageBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StorageBackend::Postgres),
            "memory" => Ok(StorageBackend::Memory),
            other => Err(anyhow!("Unknown STORAGE_BACKEND '{}', expected postgres or memory", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub environment: String,
    pub log_level: String,
    /// User all records are scoped to. `None` when unset or empty.
    pub demo_user_id: Option<String>,
    pub storage: StorageBackend,
    pub seed_on_startup: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build the configuration from any key lookup.
    pub fn from_vars<F>(var: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = var("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = match var("PORT") {
            Some(port) => port.parse().with_context(|| format!("Invalid PORT '{}'", port))?,
            None => 3000,
        };
        let environment = var("ENVIRONMENT").unwrap_or_else(|| "development".to_string());
        let log_level = var("LOG_LEVEL").unwrap_or_else(|| "info".to_string());
        let demo_user_id = var("DEMO_USER_ID")
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty());
        let storage = match var("STORAGE_BACKEND") {
            Some(backend) => backend.parse()?,
            None => StorageBackend::Postgres,
        };
        let seed_on_startup = var("SEED_ON_STARTUP")
            .map(|flag| matches!(flag.to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Ok(AppConfig {
            host,
            port,
            environment,
            log_level,
            demo_user_id,
            storage,
            seed_on_startup,
        })
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_vars(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.server_address(), "0.0.0.0:3000");
        assert_eq!(config.environment, "development");
        assert!(config.is_development());
        assert_eq!(config.demo_user_id, None);
        assert_eq!(config.storage, StorageBackend::Postgres);
        assert!(!config.seed_on_startup);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("ENVIRONMENT", "production"),
            ("DEMO_USER_ID", " patient-1 "),
            ("STORAGE_BACKEND", "Memory"),
            ("SEED_ON_STARTUP", "true"),
        ])
        .unwrap();

        assert_eq!(config.server_address(), "127.0.0.1:8080");
        assert!(!config.is_development());
        assert_eq!(config.demo_user_id.as_deref(), Some("patient-1"));
        assert_eq!(config.storage, StorageBackend::Memory);
        assert!(config.seed_on_startup);
    }

    #[test]
    fn test_empty_user_id_is_unset() {
        let config = config_from(&[("DEMO_USER_ID", "")]).unwrap();
        assert_eq!(config.demo_user_id, None);
    }

    #[test]
    fn test_invalid_values_are_errors() {
        assert!(config_from(&[("PORT", "not-a-port")]).is_err());
        assert!(config_from(&[("STORAGE_BACKEND", "sqlite")]).is_err());
    }

    #[test]
    #[serial]
    fn test_from_env_reads_process_environment() {
        env::set_var("DEMO_USER_ID", "env-patient");
        env::set_var("PORT", "4000");
        let config = AppConfig::from_env().unwrap();
        env::remove_var("DEMO_USER_ID");
        env::remove_var("PORT");

        assert_eq!(config.demo_user_id.as_deref(), Some("env-patient"));
        assert_eq!(config.port, 4000);
    }
}
