//! JSON file I/O for engine inputs and the season report.
//!
//! The core stages never touch the filesystem; this shim loads the parsed
//! inputs the CLI hands them and persists the report they produce.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

use crate::engine::SeasonReport;
use crate::models::{MatchDayRecord, PlayerIdentity, Roster};

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, StorageError> {
    let display_path = path.display().to_string();
    let contents = fs::read_to_string(path).map_err(|source| StorageError::Read {
        path: display_path.clone(),
        source,
    })?;
    let value = serde_json::from_str(&contents).map_err(|source| StorageError::Parse {
        path: display_path.clone(),
        source,
    })?;
    debug!(path = %display_path, "loaded input file");
    Ok(value)
}

/// Load match-day records (JSON array).
pub fn read_match_records(path: &Path) -> Result<Vec<MatchDayRecord>, StorageError> {
    read_json(path)
}

/// Load the alias table (JSON array of identities).
pub fn read_identities(path: &Path) -> Result<Vec<PlayerIdentity>, StorageError> {
    read_json(path)
}

/// Load team rosters (JSON array).
pub fn read_rosters(path: &Path) -> Result<Vec<Roster>, StorageError> {
    read_json(path)
}

/// Load prior-season ratings (JSON object, player name -> rating).
pub fn read_priors(path: &Path) -> Result<HashMap<String, f64>, StorageError> {
    read_json(path)
}

/// Persist a season report as pretty-printed JSON.
pub fn write_report(path: &Path, report: &SeasonReport) -> Result<(), StorageError> {
    let display = path.display().to_string();
    let json = serde_json::to_string_pretty(report).map_err(|source| StorageError::Parse {
        path: display.clone(),
        source,
    })?;
    fs::write(path, json).map_err(|source| StorageError::Write {
        path: display,
        source,
    })
}
