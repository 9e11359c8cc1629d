use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::{fs, net::SocketAddr, time::Duration};
use tracing::{debug, warn};

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_OPEN_EXCHANGE_URL: &str = "https://openexchangerates.org";

const PORT_ENV: &str = "SERVER_PORT";
const APP_ID_ENV: &str = "OPENEXCHANGE_APP_ID";
const BASE_URL_ENV: &str = "OPENEXCHANGE_BASE_URL";

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ServerConfig {
    pub port: Option<u16>,
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct OpenExchangeProviderConfig {
    #[serde(default = "default_open_exchange_url")]
    pub base_url: String,
    pub app_id: Option<String>,
}

fn default_open_exchange_url() -> String {
    DEFAULT_OPEN_EXCHANGE_URL.to_string()
}

impl Default for OpenExchangeProviderConfig {
    fn default() -> Self {
        OpenExchangeProviderConfig {
            base_url: default_open_exchange_url(),
            app_id: None,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ProvidersConfig {
    #[serde(default)]
    pub open_exchange: OpenExchangeProviderConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub providers: ProvidersConfig,
}

impl AppConfig {
    /// Loads the optional YAML file, then applies environment overrides.
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        dotenvy::dotenv().ok();
        let mut config = match config_path {
            Some(path) => Self::load_from_path(path)?,
            None => {
                debug!("No config file given, using defaults");
                Self::default()
            }
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(port) = non_empty(PORT_ENV) {
            let port = port
                .trim()
                .parse::<u16>()
                .with_context(|| format!("Invalid {PORT_ENV} value: {port}"))?;
            self.server.port = Some(port);
        }
        if let Some(app_id) = non_empty(APP_ID_ENV) {
            self.providers.open_exchange.app_id = Some(app_id);
        }
        if let Some(base_url) = non_empty(BASE_URL_ENV) {
            self.providers.open_exchange.base_url = base_url;
        }
        Ok(())
    }

    pub fn port(&self) -> u16 {
        match self.server.port {
            Some(port) => port,
            None => {
                warn!("{PORT_ENV} not set, using default port {DEFAULT_PORT}");
                DEFAULT_PORT
            }
        }
    }

    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port()))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.server.request_timeout_secs.unwrap_or(30))
    }

    pub fn app_id(&self) -> Result<&str> {
        match self.providers.open_exchange.app_id.as_deref() {
            Some(app_id) if !app_id.trim().is_empty() => Ok(app_id),
            _ => bail!(
                "could not read {APP_ID_ENV}. Provide {APP_ID_ENV} env variable or providers.open_exchange.app_id to run application"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_config_deserialization() {
        let yaml_str = r#"
server:
  port: 9090
  request_timeout_secs: 5
providers:
  open_exchange:
    base_url: "http://example.com/oxr"
    app_id: "secret"
"#;

        let config: AppConfig = serde_yaml::from_str(yaml_str).expect("Failed to deserialize");
        assert_eq!(config.port(), 9090);
        assert_eq!(config.request_timeout(), Duration::from_secs(5));
        assert_eq!(
            config.providers.open_exchange.base_url,
            "http://example.com/oxr"
        );
        assert_eq!(config.app_id().unwrap(), "secret");

        let empty: AppConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(empty.port(), DEFAULT_PORT);
        assert_eq!(
            empty.providers.open_exchange.base_url,
            DEFAULT_OPEN_EXCHANGE_URL
        );
        assert!(empty.app_id().is_err());
    }

    #[test]
    fn test_env_overrides_file_values() {
        let mut config: AppConfig = serde_yaml::from_str(
            r#"
server:
  port: 9090
providers:
  open_exchange:
    app_id: "from-file"
"#,
        )
        .unwrap();

        config
            .apply_env(env_of(&[
                ("SERVER_PORT", "7070"),
                ("OPENEXCHANGE_APP_ID", "from-env"),
                ("OPENEXCHANGE_BASE_URL", "http://localhost:1234"),
            ]))
            .unwrap();

        assert_eq!(config.port(), 7070);
        assert_eq!(config.app_id().unwrap(), "from-env");
        assert_eq!(
            config.providers.open_exchange.base_url,
            "http://localhost:1234"
        );
    }

    #[test]
    fn test_empty_env_values_are_ignored() {
        let mut config = AppConfig::default();
        config
            .apply_env(env_of(&[("SERVER_PORT", ""), ("OPENEXCHANGE_APP_ID", "  ")]))
            .unwrap();

        assert_eq!(config.port(), DEFAULT_PORT);
        assert!(config.app_id().is_err());
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let mut config = AppConfig::default();
        let result = config.apply_env(env_of(&[("SERVER_PORT", "eighty")]));
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Invalid SERVER_PORT value: eighty")
        );
    }

    #[test]
    fn test_load_from_file() {
        let file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
        fs::write(
            file.path(),
            "providers:\n  open_exchange:\n    app_id: \"file-id\"\n",
        )
        .unwrap();

        let config = AppConfig::load_from_path(file.path()).unwrap();
        assert_eq!(config.app_id().unwrap(), "file-id");
    }

    #[test]
    fn test_load_from_missing_file_fails() {
        let result = AppConfig::load_from_path("/nonexistent/fxbridge.yaml");
        assert!(
            result
                .unwrap_err()
                .to_string()
                .starts_with("Failed to read config file")
        );
    }
}
