//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.tripdeck/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use chrono::NaiveDate;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

use crate::intake::IntakeConfig;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct TripdeckConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub intake: IntakeFileConfig,
    #[serde(default)]
    pub calendar: CalendarFileConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Path to the personalization profile (TOML or JSON). Relative paths
    /// resolve against `~/.tripdeck/`.
    pub profile_file: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct IntakeFileConfig {
    pub max_files: Option<usize>,
    pub max_size_mb: Option<u64>,
    pub accepted_types: Option<Vec<String>>,
    pub upload_delay_ms: Option<u64>,
    pub inbox_dir: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct CalendarFileConfig {
    pub min_date: Option<NaiveDate>,
    pub max_date: Option<NaiveDate>,
    #[serde(default)]
    pub disabled_dates: Vec<NaiveDate>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_UPLOAD_DELAY_MS: u64 = 1500;

fn default_inbox_dir() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join("tripdeck-inbox"))
        .unwrap_or_else(|| PathBuf::from("tripdeck-inbox"))
}

fn tripdeck_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".tripdeck"))
}

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub profile_file: Option<PathBuf>,
    pub intake: IntakeConfig,
    pub upload_delay_ms: u64,
    pub inbox_dir: PathBuf,
    pub min_date: Option<NaiveDate>,
    pub max_date: Option<NaiveDate>,
    pub disabled_dates: Vec<NaiveDate>,
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

/// Returns the path to `~/.tripdeck/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    tripdeck_dir().map(|d| d.join("config.toml"))
}

/// Load config from `~/.tripdeck/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `TripdeckConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<TripdeckConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(TripdeckConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(TripdeckConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config: TripdeckConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &PathBuf) {
    let default_content = r#"# Tripdeck Configuration
# All settings are optional — defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# profile_file = "profile.toml"      # Personalization profile, relative to ~/.tripdeck/

# [intake]
# max_files = 5
# max_size_mb = 10
# accepted_types = ["image/*", ".pdf", ".doc", ".docx"]
# upload_delay_ms = 1500
# inbox_dir = "~/tripdeck-inbox"     # Where `o` looks for documents

# [calendar]
# min_date = "2026-01-01"
# max_date = "2026-12-31"
# disabled_dates = ["2026-07-14", "2026-12-25"]
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

/// Resolve the final config by collapsing: defaults → config file → env vars
/// → CLI.
///
/// `cli_inbox` and `cli_profile` come from CLI flags (None = not specified).
pub fn resolve(
    config: &TripdeckConfig,
    cli_inbox: Option<&str>,
    cli_profile: Option<&str>,
) -> ResolvedConfig {
    // Inbox: CLI → env → config → default
    let inbox_dir = cli_inbox
        .map(PathBuf::from)
        .or_else(|| std::env::var("TRIPDECK_INBOX").ok().map(PathBuf::from))
        .or_else(|| config.intake.inbox_dir.as_deref().map(expand_home))
        .unwrap_or_else(default_inbox_dir);

    // Profile file: CLI → env → config. None = no profile supplied.
    let profile_file = cli_profile
        .map(PathBuf::from)
        .or_else(|| std::env::var("TRIPDECK_PROFILE").ok().map(PathBuf::from))
        .or_else(|| {
            config
                .general
                .profile_file
                .as_deref()
                .map(relative_to_tripdeck_dir)
        });

    let defaults = IntakeConfig::default();
    let intake = IntakeConfig {
        max_files: config.intake.max_files.unwrap_or(defaults.max_files),
        max_size_mb: config.intake.max_size_mb.unwrap_or(defaults.max_size_mb),
        accepted_types: config
            .intake
            .accepted_types
            .clone()
            .unwrap_or(defaults.accepted_types),
    };

    ResolvedConfig {
        profile_file,
        intake,
        upload_delay_ms: config
            .intake
            .upload_delay_ms
            .unwrap_or(DEFAULT_UPLOAD_DELAY_MS),
        inbox_dir,
        min_date: config.calendar.min_date,
        max_date: config.calendar.max_date,
        disabled_dates: config.calendar.disabled_dates.clone(),
    }
}

/// Expand a leading `~/` against the home directory.
fn expand_home(raw: &str) -> PathBuf {
    if let Some(rest) = raw.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(raw)
}

/// Resolve a possibly-relative profile path against `~/.tripdeck/`.
fn relative_to_tripdeck_dir(file: &str) -> PathBuf {
    let path = PathBuf::from(file);
    if path.is_absolute() {
        return path;
    }
    match tripdeck_dir() {
        Some(dir) => dir.join(path),
        None => path,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config = TripdeckConfig::default();
        assert!(config.general.profile_file.is_none());
        assert!(config.intake.max_files.is_none());
        assert!(config.calendar.disabled_dates.is_empty());
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let config = TripdeckConfig::default();
        let resolved = resolve(&config, None, None);
        assert_eq!(resolved.intake.max_files, 5);
        assert_eq!(resolved.intake.max_size_mb, 10);
        assert_eq!(resolved.upload_delay_ms, DEFAULT_UPLOAD_DELAY_MS);
        assert!(resolved.intake.accepted_types.contains(&"image/*".to_string()));
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = TripdeckConfig {
            intake: IntakeFileConfig {
                max_files: Some(3),
                max_size_mb: Some(2),
                accepted_types: Some(vec![".pdf".to_string()]),
                upload_delay_ms: Some(10),
                inbox_dir: Some("/tmp/inbox".to_string()),
            },
            ..Default::default()
        };
        let resolved = resolve(&config, None, None);
        assert_eq!(resolved.intake.max_files, 3);
        assert_eq!(resolved.intake.max_size_mb, 2);
        assert_eq!(resolved.intake.accepted_types, vec![".pdf".to_string()]);
        assert_eq!(resolved.upload_delay_ms, 10);
        assert_eq!(resolved.inbox_dir, PathBuf::from("/tmp/inbox"));
    }

    #[test]
    fn test_resolve_cli_inbox_wins() {
        let config = TripdeckConfig {
            intake: IntakeFileConfig {
                inbox_dir: Some("/from/config".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let resolved = resolve(&config, Some("/from/cli"), None);
        assert_eq!(resolved.inbox_dir, PathBuf::from("/from/cli"));
    }

    #[test]
    fn test_toml_round_trip() {
        let toml_str = r#"
[general]
profile_file = "/abs/profile.json"

[intake]
max_files = 4
accepted_types = ["image/*", ".pdf"]

[calendar]
min_date = "2026-01-01"
max_date = "2026-12-31"
disabled_dates = ["2026-07-14"]
"#;
        let config: TripdeckConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.intake.max_files, Some(4));
        assert_eq!(config.calendar.min_date, NaiveDate::from_ymd_opt(2026, 1, 1));
        assert_eq!(config.calendar.disabled_dates.len(), 1);

        let resolved = resolve(&config, None, None);
        assert_eq!(
            resolved.profile_file,
            Some(PathBuf::from("/abs/profile.json"))
        );
        // Unspecified fields fall back to defaults
        assert_eq!(resolved.intake.max_size_mb, 10);
    }

    #[test]
    fn test_sparse_toml_parses() {
        // Only override one thing — everything else stays default
        let toml_str = r#"
[intake]
max_files = 2
"#;
        let config: TripdeckConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.intake.max_files, Some(2));
        assert!(config.intake.max_size_mb.is_none());
        assert!(config.general.profile_file.is_none());
    }
}
