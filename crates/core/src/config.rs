//! Client configuration

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};

/// Backend used when nothing else is configured
pub const DEFAULT_BASE_URL: &str = "https://voucherify-backend.onrender.com";

/// Session storage constants
pub struct SessionConfig;

impl SessionConfig {
    /// Storage key holding the raw access token
    pub const TOKEN_KEY: &'static str = "accessToken";
}

/// Settings shared by every front-end
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Backend origin, without a trailing slash
    pub base_url: String,
    /// Key the token is persisted under
    pub token_key: String,
    /// Request timeout in seconds (ignored in the browser)
    pub timeout_secs: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            token_key: SessionConfig::TOKEN_KEY.to_string(),
            timeout_secs: Some(30),
        }
    }
}

impl ClientConfig {
    /// Config pointing at another backend, everything else default
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Load defaults, then an optional file, then `VOUCHERIFY_*` environment variables
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: Option<&std::path::Path>) -> CoreResult<Self> {
        Self::load_with_env(path, None)
    }

    /// [`ClientConfig::load`] reading variables from `env` instead of the process environment
    #[cfg(not(target_arch = "wasm32"))]
    fn load_with_env(
        path: Option<&std::path::Path>,
        env: Option<config::Map<String, String>>,
    ) -> CoreResult<Self> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("VOUCHERIFY")
                .try_parsing(true)
                .source(env),
        );

        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Check the settings are usable
    pub fn validate(&self) -> CoreResult<()> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(CoreError::invalid_config(format!(
                "base_url must be an http(s) URL, got '{}'",
                self.base_url
            )));
        }

        if self.token_key.is_empty() {
            return Err(CoreError::invalid_config("token_key must not be empty"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "https://voucherify-backend.onrender.com");
        assert_eq!(config.token_key, "accessToken");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = ClientConfig::with_base_url("ftp://example.com");
        assert!(matches!(
            config.validate(),
            Err(CoreError::InvalidConfig { .. })
        ));

        let config = ClientConfig {
            token_key: String::new(),
            ..ClientConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_load_from_file() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("voucherify.toml");
        std::fs::write(
            &path,
            "base_url = \"http://localhost:4000\"\ntimeout_secs = 5\n",
        )
        .unwrap();

        let config = ClientConfig::load(Some(&path)).unwrap();
        assert_eq!(config.base_url, "http://localhost:4000");
        assert_eq!(config.timeout_secs, Some(5));
        assert_eq!(config.token_key, "accessToken");
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_environment_overrides_defaults_and_file() {
        let env: config::Map<String, String> = [
            ("VOUCHERIFY_BASE_URL".to_string(), "http://api.internal:8080".to_string()),
            ("VOUCHERIFY_TIMEOUT_SECS".to_string(), "12".to_string()),
        ]
        .into_iter()
        .collect();

        let config = ClientConfig::load_with_env(None, Some(env.clone())).unwrap();
        assert_eq!(config.base_url, "http://api.internal:8080");
        assert_eq!(config.timeout_secs, Some(12));
        assert_eq!(config.token_key, "accessToken");

        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("voucherify.toml");
        std::fs::write(
            &path,
            "base_url = \"http://localhost:4000\"\ntoken_key = \"cliToken\"\n",
        )
        .unwrap();

        let config = ClientConfig::load_with_env(Some(&path), Some(env)).unwrap();
        assert_eq!(config.base_url, "http://api.internal:8080");
        assert_eq!(config.token_key, "cliToken");
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_environment_value_is_validated() {
        let env = [("VOUCHERIFY_BASE_URL".to_string(), "localhost".to_string())]
            .into_iter()
            .collect();
        assert!(matches!(
            ClientConfig::load_with_env(None, Some(env)),
            Err(CoreError::InvalidConfig { .. })
        ));
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_load_missing_file_fails() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let result = ClientConfig::load(Some(&temp_dir.path().join("missing.toml")));
        assert!(result.is_err());
    }
}
