//! docmcp configuration types and loading

use std::fs;
use std::path::{Path, PathBuf};

use docstore::SearchConfig;
use eyre::{Context, Result};
use serde::{Deserialize, Serialize};

/// Default glob used when neither the CLI nor the config names any documents
pub const DEFAULT_DOCS_PATTERN: &str = "**/*.md";

/// Main docmcp configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server labels
    pub server: ServerConfig,

    /// Where documents come from
    pub docs: DocsConfig,

    /// Match index tuning and preview sizes
    pub search: SearchConfig,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[serde(rename = "log-level")]
    pub log_level: Option<String>,
}

impl Config {
    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try project-local config: .docmcp.yml
        let local_config = PathBuf::from(".docmcp.yml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        // Try user config: ~/.config/docmcp/docmcp.yml
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("docmcp").join("docmcp.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        // No config file found, use defaults
        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Read just the log level, before logging is initialised
    ///
    /// Errors are swallowed here; the full `load` reports them once logging works.
    pub fn load_log_level(config_path: Option<&PathBuf>) -> Option<String> {
        let candidates = match config_path {
            Some(path) => vec![path.clone()],
            None => [
                Some(PathBuf::from(".docmcp.yml")),
                dirs::config_dir().map(|d| d.join("docmcp").join("docmcp.yml")),
            ]
            .into_iter()
            .flatten()
            .collect(),
        };

        candidates
            .iter()
            .find(|path| path.exists())
            .and_then(|path| Self::load_from_file(path).ok())
            .and_then(|config| config.log_level)
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }
}

/// Labels reported to clients
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server name
    pub name: String,

    /// Subject used to phrase tool descriptions, e.g. "Acme SDK"
    pub subject: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: "docs".to_string(),
            subject: None,
        }
    }
}

/// Document discovery
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DocsConfig {
    /// Glob patterns or directories, relative to `root`
    pub patterns: Vec<String>,

    /// Base directory; document ids are paths relative to it
    pub root: PathBuf,
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            patterns: vec![DEFAULT_DOCS_PATTERN.to_string()],
            root: PathBuf::from("."),
        }
    }
}
