//! Configuration file management for tinysparks.
//!
//! Provides a TOML-based config file at `~/.config/tinysparks/config.toml`
//! and a resolution chain: CLI flag > env var > config file > default.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use tinysparks_core::GeminiClient;
use tinysparks_core::generate::DEFAULT_MODEL;

/// Env vars checked for the API key, in priority order.
pub const API_KEY_ENV_VARS: [&str; 3] = ["TINYSPARKS_API_KEY", "GEMINI_API_KEY", "API_KEY"];

// -----------------------------------------------------------------------
// Config file types
// -----------------------------------------------------------------------

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub gemini: GeminiSection,
    #[serde(default)]
    pub storage: StorageSection,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct GeminiSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct StorageSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

// -----------------------------------------------------------------------
// Paths
// -----------------------------------------------------------------------

/// Return the tinysparks config directory.
///
/// Always uses XDG layout: `$XDG_CONFIG_HOME/tinysparks` or
/// `~/.config/tinysparks`.
pub fn config_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg).join("tinysparks");
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("tinysparks")
}

/// Return the path to the tinysparks config file.
pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Default directory for favorites and the last plan.
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".local")
                .join("share")
        })
        .join("tinysparks")
}

// -----------------------------------------------------------------------
// Read / write
// -----------------------------------------------------------------------

/// Load and parse the config file at `path`. A missing file is `Ok(None)`;
/// a file that exists but does not parse is an error.
pub fn load_config_from(path: &Path) -> Result<Option<ConfigFile>> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(e)
                .with_context(|| format!("failed to read config file at {}", path.display()));
        }
    };
    let config: ConfigFile = toml::from_str(&contents)
        .with_context(|| format!("failed to parse config file at {}", path.display()))?;
    Ok(Some(config))
}

/// Serialize and write the config file to `path`, creating parent dirs as
/// needed. Sets file permissions to 0600 on Unix since it holds the API key.
pub fn save_config_to(path: &Path, config: &ConfigFile) -> Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create config directory {}", dir.display()))?;
    }

    let contents = toml::to_string_pretty(config).context("failed to serialize config")?;
    std::fs::write(path, &contents)
        .with_context(|| format!("failed to write config file at {}", path.display()))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let perms = std::fs::Permissions::from_mode(0o600);
        std::fs::set_permissions(path, perms)
            .with_context(|| format!("failed to set permissions on {}", path.display()))?;
    }

    Ok(())
}

// -----------------------------------------------------------------------
// Resolved config
// -----------------------------------------------------------------------

/// Fully resolved configuration, ready for use.
#[derive(Debug)]
pub struct SparksConfig {
    /// `None` when no key was found anywhere; generation then reports a
    /// configuration error instead of calling the service.
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub data_dir: PathBuf,
}

impl SparksConfig {
    /// Resolve configuration using the chain: CLI flag > env var > config file > default.
    ///
    /// - API key: `cli_api_key` > `TINYSPARKS_API_KEY` > `GEMINI_API_KEY` > `API_KEY` > `gemini.api_key` > none
    /// - Model: `TINYSPARKS_MODEL` > `gemini.model` > `DEFAULT_MODEL`
    /// - Base URL: `TINYSPARKS_BASE_URL` > `gemini.base_url` > the public endpoint
    /// - Data dir: `cli_data_dir` > `TINYSPARKS_DATA_DIR` > `storage.data_dir` > platform data dir
    pub fn resolve(cli_api_key: Option<&str>, cli_data_dir: Option<&Path>) -> Result<Self> {
        let file_config = load_config_from(&config_path())?.unwrap_or_default();

        let api_key = cli_api_key
            .map(str::to_owned)
            .or_else(|| API_KEY_ENV_VARS.iter().find_map(|var| env_non_empty(var)))
            .or(file_config.gemini.api_key)
            .filter(|k| !k.trim().is_empty());

        let model = env_non_empty("TINYSPARKS_MODEL")
            .or(file_config.gemini.model)
            .unwrap_or_else(|| DEFAULT_MODEL.to_owned());

        let base_url = env_non_empty("TINYSPARKS_BASE_URL")
            .or(file_config.gemini.base_url)
            .unwrap_or_else(|| GeminiClient::DEFAULT_BASE_URL.to_owned());

        let data_dir = cli_data_dir
            .map(Path::to_path_buf)
            .or_else(|| env_non_empty("TINYSPARKS_DATA_DIR").map(PathBuf::from))
            .or(file_config.storage.data_dir)
            .unwrap_or_else(default_data_dir);

        Ok(Self {
            api_key,
            model,
            base_url,
            data_dir,
        })
    }
}

fn env_non_empty(var: &str) -> Option<String> {
    std::env::var(var).ok().filter(|v| !v.trim().is_empty())
}

// -----------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------
