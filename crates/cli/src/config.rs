//! CLI configuration and state locations

use anyhow::{Context, Result};
use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use voucherify_core::{ClientConfig, FileTokenStore};

/// Name of the config file looked up in the config directory
pub const CONFIG_FILE: &str = "config.toml";

/// Platform-specific directories for CLI state
pub struct StateDir {
    project_dirs: Option<ProjectDirs>,
    /// Override directory for tests or portable installs
    override_dir: Option<PathBuf>,
}

impl StateDir {
    pub fn new() -> Self {
        let project_dirs = ProjectDirs::from("com", "Voucherify", "voucherify");
        if project_dirs.is_none() {
            warn!("Failed to determine platform-specific directories, will use fallback");
        }
        Self {
            project_dirs,
            override_dir: None,
        }
    }

    /// Keep everything under `path`
    pub fn with_override(path: impl Into<PathBuf>) -> Self {
        Self {
            project_dirs: None,
            override_dir: Some(path.into()),
        }
    }

    pub fn config_dir(&self) -> PathBuf {
        if let Some(override_dir) = &self.override_dir {
            return override_dir.join("config");
        }

        match &self.project_dirs {
            Some(dirs) => dirs.config_dir().to_path_buf(),
            None => PathBuf::from("./config"),
        }
    }

    /// Directory holding the session token
    pub fn data_dir(&self) -> PathBuf {
        if let Some(override_dir) = &self.override_dir {
            return override_dir.join("data");
        }

        match &self.project_dirs {
            Some(dirs) => dirs.data_dir().to_path_buf(),
            None => PathBuf::from("./data"),
        }
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir().join(CONFIG_FILE)
    }

    /// File token store for `config`, named after its token key
    pub fn token_store(&self, config: &ClientConfig) -> FileTokenStore {
        FileTokenStore::new(self.data_dir().join(&config.token_key))
    }
}

impl Default for StateDir {
    fn default() -> Self {
        Self::new()
    }
}

/// Load client configuration.
///
/// An explicit path must exist. Otherwise the config file in the state
/// directory is used when present, and defaults plus environment when not.
pub fn load_client_config(explicit: Option<&Path>, state: &StateDir) -> Result<ClientConfig> {
    let path = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => Some(state.config_file()).filter(|path| path.exists()),
    };

    match &path {
        Some(path) => debug!("Loading configuration from {}", path.display()),
        None => debug!("No configuration file, using defaults"),
    }

    ClientConfig::load(path.as_deref()).with_context(|| match &path {
        Some(path) => format!("Failed to load configuration from {}", path.display()),
        None => "Failed to load configuration".to_string(),
    })
}

/// Write the default configuration as TOML
pub fn generate_default_config(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(&ClientConfig::default())?;
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_override_layout() {
        let state = StateDir::with_override("/tmp/voucherify-test");
        assert_eq!(state.config_dir(), PathBuf::from("/tmp/voucherify-test/config"));
        assert_eq!(state.data_dir(), PathBuf::from("/tmp/voucherify-test/data"));
        assert_eq!(
            state.config_file(),
            PathBuf::from("/tmp/voucherify-test/config/config.toml")
        );

        let store = state.token_store(&ClientConfig::default());
        assert_eq!(store.path(), Path::new("/tmp/voucherify-test/data/accessToken"));
    }

    #[test]
    fn test_missing_state_file_falls_back_to_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let state = StateDir::with_override(temp_dir.path());

        let config = load_client_config(None, &state).unwrap();
        assert_eq!(config.token_key, "accessToken");
    }

    #[test]
    fn test_generated_config_loads_back() {
        let temp_dir = TempDir::new().unwrap();
        let state = StateDir::with_override(temp_dir.path());

        generate_default_config(&state.config_file()).unwrap();
        assert!(state.config_file().exists());

        let config = load_client_config(None, &state).unwrap();
        assert_eq!(config.token_key, ClientConfig::default().token_key);
    }

    #[test]
    fn test_explicit_path_must_exist() {
        let temp_dir = TempDir::new().unwrap();
        let state = StateDir::with_override(temp_dir.path());

        let missing = temp_dir.path().join("nope.toml");
        assert!(load_client_config(Some(&missing), &state).is_err());
    }
}
