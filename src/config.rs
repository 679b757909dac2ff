// Configuration loading and parsing (league.toml, credentials.toml).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to read config file {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },
}

// ---------------------------------------------------------------------------
// Top-level assembled Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Config {
    pub league: LeagueConfig,
    pub advisor: AdvisorConfig,
    pub data_paths: DataPaths,
    pub credentials: CredentialsConfig,
}

// ---------------------------------------------------------------------------
// league.toml structs
// ---------------------------------------------------------------------------

/// Raw deserialization target for the entire league.toml file.
#[derive(Debug, Clone, Deserialize)]
struct LeagueFile {
    league: LeagueConfig,
    #[serde(default)]
    advisor: AdvisorConfig,
    data: DataPaths,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LeagueConfig {
    /// Number of teams in the draft. Must be even (snake order assumes
    /// symmetric rounds); typical values are 8/10/12/14.
    pub num_teams: u32,
    /// The 1-based draft slot of the user's team.
    pub my_slot: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AdvisorConfig {
    /// Generative-language model identifier.
    pub model: String,
    /// How many available players the advice prompt lists.
    pub max_candidates: usize,
    /// Whether to call the remote advisor at all. The local fallback is
    /// always available regardless.
    pub enabled: bool,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        AdvisorConfig {
            model: "gemini-2.5-flash".to_string(),
            max_candidates: 15,
            enabled: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataPaths {
    /// Player pool JSON.
    pub players: String,
    /// Sync update records JSON (optional).
    #[serde(default)]
    pub updates: Option<String>,
    /// ADP market overlay CSV (optional).
    #[serde(default)]
    pub adp: Option<String>,
}

// ---------------------------------------------------------------------------
// credentials.toml structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize, Default)]
pub struct CredentialsConfig {
    pub gemini_api_key: Option<String>,
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate configuration from `config/league.toml` and
/// (optionally) `config/credentials.toml`, relative to the given base
/// directory.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let config_dir = base_dir.join("config");

    // --- league.toml (required) ---
    let league_path = config_dir.join("league.toml");
    let league_text = read_file(&league_path)?;
    let league_file = parse_league_file(&league_text).map_err(|e| ConfigError::ParseError {
        path: league_path.clone(),
        source: e,
    })?;

    // --- credentials.toml (optional) ---
    let credentials_path = config_dir.join("credentials.toml");
    let credentials = if credentials_path.exists() {
        let cred_text = read_file(&credentials_path)?;
        toml::from_str(&cred_text).map_err(|e| ConfigError::ParseError {
            path: credentials_path.clone(),
            source: e,
        })?
    } else {
        CredentialsConfig::default()
    };

    let config = Config {
        league: league_file.league,
        advisor: league_file.advisor,
        data_paths: league_file.data,
        credentials,
    };

    validate(&config)?;

    Ok(config)
}

/// Load configuration relative to the current working directory.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|e| ConfigError::ReadError {
        path: PathBuf::from("."),
        source: e,
    })?;
    load_config_from(&cwd)
}

fn parse_league_file(text: &str) -> Result<LeagueFile, toml::de::Error> {
    toml::from_str(text)
}

fn read_file(path: &Path) -> Result<String, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    let league = &config.league;

    if league.num_teams < 2 || league.num_teams > 32 {
        return Err(ConfigError::ValidationError {
            field: "league.num_teams".into(),
            message: format!("must be between 2 and 32, got {}", league.num_teams),
        });
    }
    if league.num_teams % 2 != 0 {
        return Err(ConfigError::ValidationError {
            field: "league.num_teams".into(),
            message: format!("must be even, got {}", league.num_teams),
        });
    }
    if league.my_slot < 1 || league.my_slot > league.num_teams {
        return Err(ConfigError::ValidationError {
            field: "league.my_slot".into(),
            message: format!(
                "must be between 1 and num_teams ({}), got {}",
                league.num_teams, league.my_slot
            ),
        });
    }

    if config.advisor.max_candidates == 0 {
        return Err(ConfigError::ValidationError {
            field: "advisor.max_candidates".into(),
            message: "must be at least 1".into(),
        });
    }
    if config.advisor.model.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "advisor.model".into(),
            message: "must not be empty".into(),
        });
    }

    if config.data_paths.players.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "data.players".into(),
            message: "must not be empty".into(),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
