//! # Configuration
//!
//! Centralizes settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.tmtag/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use log::{LevelFilter, debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::core::table::SortMode;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct TmtagConfig {
    #[serde(default)]
    pub general: GeneralConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Explicit path to the tmsu executable; otherwise PATH is searched.
    pub tmsu_path: Option<String>,
    /// Log level for the file logger ("off", "error", ..., "trace").
    pub log_level: Option<String>,
    /// Initial display ordering of the tag list.
    pub sort: Option<SortMode>,
}

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Info;

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub tmsu_path: Option<PathBuf>,
    pub log_level: LevelFilter,
    pub sort: SortMode,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns `~/.tmtag/`, the directory holding config and log files.
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".tmtag"))
}

/// Returns the path to `~/.tmtag/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load config from `~/.tmtag/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and returns
/// `TmtagConfig::default()`. If it exists but is malformed, returns
/// `ConfigError::Parse`.
pub fn load_config() -> Result<TmtagConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(TmtagConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(TmtagConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config: TmtagConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# tmtag Configuration
# All settings are optional — defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# tmsu_path = "/usr/local/bin/tmsu"  # Or set TMTAG_TMSU_PATH / pass --tmsu
# log_level = "info"                 # "off", "error", "warn", "info", "debug", "trace"
# sort = "insertion"                 # "insertion", "name", "tagged-first"
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
///
/// `cli_tmsu` is the `--tmsu` flag (None = not specified).
pub fn resolve(config: &TmtagConfig, cli_tmsu: Option<&Path>) -> ResolvedConfig {
    // tmsu path: CLI → env → config (no default: PATH search happens later)
    let tmsu_path = cli_tmsu
        .map(Path::to_path_buf)
        .or_else(|| std::env::var_os("TMTAG_TMSU_PATH").map(PathBuf::from))
        .or_else(|| config.general.tmsu_path.clone().map(PathBuf::from));

    // Log level: env → config → default
    let log_level = std::env::var("TMTAG_LOG_LEVEL")
        .ok()
        .or_else(|| config.general.log_level.clone())
        .map(|raw| match raw.parse() {
            Ok(level) => level,
            Err(_) => {
                warn!("Unknown log level {raw:?}, using {DEFAULT_LOG_LEVEL}");
                DEFAULT_LOG_LEVEL
            }
        })
        .unwrap_or(DEFAULT_LOG_LEVEL);

    ResolvedConfig {
        tmsu_path,
        log_level,
        sort: config.general.sort.unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config = TmtagConfig::default();
        assert!(config.general.tmsu_path.is_none());
        assert!(config.general.sort.is_none());
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let config = TmtagConfig::default();
        let resolved = resolve(&config, None);
        assert!(resolved.tmsu_path.is_none());
        assert_eq!(resolved.log_level, DEFAULT_LOG_LEVEL);
        assert_eq!(resolved.sort, SortMode::Insertion);
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = TmtagConfig {
            general: GeneralConfig {
                tmsu_path: Some("/opt/tmsu".to_string()),
                log_level: Some("debug".to_string()),
                sort: Some(SortMode::Name),
            },
        };
        let resolved = resolve(&config, None);
        assert_eq!(resolved.tmsu_path.as_deref(), Some(Path::new("/opt/tmsu")));
        assert_eq!(resolved.log_level, LevelFilter::Debug);
        assert_eq!(resolved.sort, SortMode::Name);
    }

    #[test]
    fn test_resolve_cli_tmsu_wins() {
        let config = TmtagConfig {
            general: GeneralConfig {
                tmsu_path: Some("/opt/tmsu".to_string()),
                ..Default::default()
            },
        };
        let resolved = resolve(&config, Some(Path::new("/usr/bin/tmsu")));
        assert_eq!(
            resolved.tmsu_path.as_deref(),
            Some(Path::new("/usr/bin/tmsu"))
        );
    }

    #[test]
    fn test_unknown_log_level_falls_back() {
        let config = TmtagConfig {
            general: GeneralConfig {
                log_level: Some("loud".to_string()),
                ..Default::default()
            },
        };
        let resolved = resolve(&config, None);
        assert_eq!(resolved.log_level, DEFAULT_LOG_LEVEL);
    }

    #[test]
    fn test_sparse_toml_parses() {
        // Only override one thing — everything else stays default
        let toml_str = r#"
[general]
sort = "tagged-first"
"#;
        let config: TmtagConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.sort, Some(SortMode::TaggedFirst));
        assert!(config.general.tmsu_path.is_none());
    }

    #[test]
    fn test_toml_round_trip() {
        let toml_str = r#"
[general]
tmsu_path = "/usr/local/bin/tmsu"
log_level = "warn"
sort = "name"
"#;
        let config: TmtagConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.general.tmsu_path.as_deref(),
            Some("/usr/local/bin/tmsu")
        );
        assert_eq!(config.general.log_level.as_deref(), Some("warn"));
        assert_eq!(config.general.sort, Some(SortMode::Name));
    }
}
