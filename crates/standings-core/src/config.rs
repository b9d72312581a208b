// Configuration loading and parsing (config/board.toml).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the single config file under `config/` and `defaults/`.
pub const CONFIG_FILE: &str = "board.toml";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// board.toml structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
    #[serde(default)]
    pub table: TableConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    #[serde(default = "default_teams_path")]
    pub teams_path: String,
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

impl ApiConfig {
    /// Full URL of the team list endpoint.
    pub fn teams_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), self.teams_path)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TableConfig {
    #[serde(default = "default_true")]
    pub reapply_sort_on_load: bool,
    #[serde(default = "default_max_diagnostics")]
    pub max_diagnostics: usize,
}

impl Default for TableConfig {
    fn default() -> Self {
        TableConfig {
            reapply_sort_on_load: true,
            max_diagnostics: default_max_diagnostics(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_filter")]
    pub filter: String,
    #[serde(default = "default_log_dir")]
    pub dir: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            filter: default_log_filter(),
            dir: default_log_dir(),
        }
    }
}

fn default_teams_path() -> String {
    "/api/teams".into()
}

fn default_true() -> bool {
    true
}

fn default_max_diagnostics() -> usize {
    50
}

fn default_log_filter() -> String {
    "standings_core=info,standings_tui=info,warn".into()
}

fn default_log_dir() -> String {
    "logs".into()
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate `config/board.toml` relative to `base_dir`.
///
/// Does not copy defaults; see `load_config()`.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let path = base_dir.join("config").join(CONFIG_FILE);
    let text = read_file(&path)?;
    let config = parse_config(&path, &text)?;
    validate(&config)?;
    Ok(config)
}

/// Parse config text without validating it.
pub fn parse_config(path: &Path, text: &str) -> Result<Config, ConfigError> {
    toml::from_str(text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Copy `defaults/board.toml` into `config/` if it is not there yet.
///
/// Returns the copied path, or `None` when the config already existed.
pub fn ensure_config_file(base_dir: &Path) -> Result<Option<PathBuf>, ConfigError> {
    let config_dir = base_dir.join("config");
    let target = config_dir.join(CONFIG_FILE);
    if target.exists() {
        return Ok(None);
    }

    let source = base_dir.join("defaults").join(CONFIG_FILE);
    if !source.exists() {
        return Err(ConfigError::DefaultsCopyError {
            message: format!(
                "neither {} nor {} found; run from the project root",
                target.display(),
                source.display()
            ),
        });
    }

    std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to create config directory: {e}"),
    })?;
    std::fs::copy(&source, &target).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to copy {}: {e}", source.display()),
    })?;

    Ok(Some(target))
}

/// Convenience wrapper: loads config relative to the current working directory,
/// copying defaults first when needed.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    ensure_config_file(&cwd)?;
    load_config_from(&cwd)
}

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

pub fn validate(config: &Config) -> Result<(), ConfigError> {
    let base = config.api.base_url.trim();
    if base.is_empty() {
        return Err(ConfigError::ValidationError {
            field: "api.base_url".into(),
            message: "must not be empty".into(),
        });
    }
    if !(base.starts_with("http://") || base.starts_with("https://")) {
        return Err(ConfigError::ValidationError {
            field: "api.base_url".into(),
            message: format!("must start with http:// or https://, got {base:?}"),
        });
    }

    if !config.api.teams_path.starts_with('/') {
        return Err(ConfigError::ValidationError {
            field: "api.teams_path".into(),
            message: format!("must start with '/', got {:?}", config.api.teams_path),
        });
    }

    if config.api.request_timeout_secs == Some(0) {
        return Err(ConfigError::ValidationError {
            field: "api.request_timeout_secs".into(),
            message: "must be > 0 when set".into(),
        });
    }

    if config.table.max_diagnostics == 0 {
        return Err(ConfigError::ValidationError {
            field: "table.max_diagnostics".into(),
            message: "must be > 0".into(),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
