//! Engine error taxonomy.
//!
//! Three classes, mirroring how failures propagate:
//! - [`DataError`] aborts one player's rating and is reported individually;
//!   downstream stages apply the documented default-substitution policy
//!   deliberately, never by accident.
//! - `ConfigError` (in [`crate::config`]) is fatal at run start.
//! - [`AssignmentError`] is fatal for the division stage and names the team
//!   that could not be seated.

use thiserror::Error;

use crate::models::ScheduleDay;

/// Per-player data problems. Each aborts that player's rating only.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DataError {
    #[error("unknown player name: {0:?}")]
    UnknownPlayer(String),

    #[error("unknown lobby tier {tier} on day {day} for player {player:?}")]
    UnknownLobbyTier {
        player: String,
        day: u8,
        tier: String,
    },

    #[error("no recorded match days for player {0:?}")]
    NoDaysPlayed(String),

    #[error("roster for team {team:?} has {count} players (max {max})")]
    OversizedRoster {
        team: String,
        count: usize,
        max: usize,
    },
}

/// Division-stage failures. Fatal for the run's assignment stage.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AssignmentError {
    #[error("team {team:?} has no division on an allowed day (allowed: {allowed_days:?})")]
    NoEligibleDivision {
        team: String,
        allowed_days: Vec<ScheduleDay>,
    },

    #[error("all eligible divisions for team {team:?} are full (eligible: {eligible:?})")]
    EligibleDivisionsFull { team: String, eligible: Vec<u32> },

    #[error("partition violates a hard constraint: {0}")]
    InvalidPartition(String),
}

/// Top-level engine error.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),

    #[error(transparent)]
    Assignment(#[from] AssignmentError),

    #[error(transparent)]
    Data(#[from] DataError),
}
