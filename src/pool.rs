// Player dataset loading and normalization.
//
// Reads the hand-authored player pool (JSON array), the optional sync-update
// record set (JSON array), and an optional ADP market overlay CSV matched by
// player name.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::warn;

use crate::config::DataPaths;
use crate::player::{Player, PlayerUpdate};

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// The full dataset a draft session is seeded from.
#[derive(Debug, Clone)]
pub struct PlayerPool {
    pub players: Vec<Player>,
    /// Partial update records applied by the sync operation.
    pub updates: Vec<PlayerUpdate>,
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum PoolError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("JSON error in {path}: {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },

    #[error("validation error: {0}")]
    Validation(String),
}

// ---------------------------------------------------------------------------
// Raw CSV serde structs (private)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[allow(non_snake_case)]
struct RawAdp {
    Name: String,
    ADP: f64,
}

// ---------------------------------------------------------------------------
// Reader-based loaders (private, enable testing without temp files)
// ---------------------------------------------------------------------------

fn load_players_from_reader<R: Read>(rdr: R) -> Result<Vec<Player>, serde_json::Error> {
    // Parse record-by-record so one malformed entry doesn't sink the file.
    let records: Vec<serde_json::Value> = serde_json::from_reader(rdr)?;

    let mut players: Vec<Player> = Vec::with_capacity(records.len());
    let mut seen_ids = std::collections::HashSet::new();
    for record in records {
        match serde_json::from_value::<Player>(record) {
            Ok(player) => {
                if !seen_ids.insert(player.id) {
                    warn!("skipping duplicate player id {} ('{}')", player.id, player.name);
                    continue;
                }
                if player.strength_of_schedule < 1 || player.strength_of_schedule > 32 {
                    warn!(
                        "skipping player '{}': strength_of_schedule {} outside 1..=32",
                        player.name, player.strength_of_schedule
                    );
                    continue;
                }
                if let Some(adp) = player.adp {
                    if !adp.is_finite() {
                        warn!("skipping player '{}': non-finite ADP", player.name);
                        continue;
                    }
                }
                players.push(player);
            }
            Err(e) => {
                warn!("skipping malformed player record: {}", e);
            }
        }
    }
    Ok(players)
}

fn load_updates_from_reader<R: Read>(rdr: R) -> Result<Vec<PlayerUpdate>, serde_json::Error> {
    let records: Vec<serde_json::Value> = serde_json::from_reader(rdr)?;
    let mut updates = Vec::with_capacity(records.len());
    for record in records {
        match serde_json::from_value::<PlayerUpdate>(record) {
            Ok(update) => updates.push(update),
            Err(e) => {
                warn!("skipping malformed update record: {}", e);
            }
        }
    }
    Ok(updates)
}

fn load_adp_from_reader<R: Read>(rdr: R) -> Result<HashMap<String, f64>, csv::Error> {
    let mut reader = csv::Reader::from_reader(rdr);
    let mut map = HashMap::new();
    for result in reader.deserialize::<RawAdp>() {
        match result {
            Ok(raw) => {
                if !raw.ADP.is_finite() {
                    warn!("skipping ADP entry for '{}': non-finite value", raw.Name.trim());
                    continue;
                }
                let name = raw.Name.trim().to_string();
                if map.contains_key(&name) {
                    warn!("duplicate ADP entry for '{}', using latest value", name);
                }
                map.insert(name, raw.ADP);
            }
            Err(e) => {
                warn!("skipping malformed ADP row: {}", e);
            }
        }
    }
    Ok(map)
}

/// Overwrite each player's ADP with the overlay value when the overlay has
/// an entry for their name.
pub fn apply_adp_overlay(players: &mut [Player], adp: &HashMap<String, f64>) {
    for player in players.iter_mut() {
        if let Some(&value) = adp.get(&player.name) {
            player.adp = Some(value);
        }
    }
}

// ---------------------------------------------------------------------------
// Public path-based loaders
// ---------------------------------------------------------------------------

/// Load the player pool from a JSON file.
pub fn load_players(path: &Path) -> Result<Vec<Player>, PoolError> {
    let file = std::fs::File::open(path).map_err(|e| PoolError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    load_players_from_reader(file).map_err(|e| PoolError::Json {
        path: path.display().to_string(),
        source: e,
    })
}

/// Load sync update records from a JSON file.
pub fn load_updates(path: &Path) -> Result<Vec<PlayerUpdate>, PoolError> {
    let file = std::fs::File::open(path).map_err(|e| PoolError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    load_updates_from_reader(file).map_err(|e| PoolError::Json {
        path: path.display().to_string(),
        source: e,
    })
}

/// Load an ADP overlay CSV. Returns a map of player name → ADP value.
pub fn load_adp(path: &Path) -> Result<HashMap<String, f64>, PoolError> {
    let file = std::fs::File::open(path).map_err(|e| PoolError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    load_adp_from_reader(file).map_err(|e| PoolError::Csv {
        path: path.display().to_string(),
        source: e,
    })
}

/// Load the full dataset from the configured paths: players, optional
/// updates, optional ADP overlay (applied to the players in place).
pub fn load_all_from_paths(paths: &DataPaths) -> Result<PlayerPool, PoolError> {
    let mut players = load_players(Path::new(&paths.players))?;

    if players.is_empty() {
        return Err(PoolError::Validation(
            "player file produced zero valid records".into(),
        ));
    }

    if let Some(adp_path) = &paths.adp {
        let adp = load_adp(Path::new(adp_path))?;
        apply_adp_overlay(&mut players, &adp);
    }

    let updates = match &paths.updates {
        Some(updates_path) => load_updates(Path::new(updates_path))?,
        None => Vec::new(),
    };

    Ok(PlayerPool { players, updates })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
