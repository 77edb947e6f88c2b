//! Season pipeline orchestration.
//!
//! Raw match rows -> per-player rating -> per-team rating -> tier ->
//! division. Each stage is a pure function of its inputs; this module only
//! wires them together and collects the season report.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::info;

use crate::config::EngineConfig;
use crate::division::{assign_divisions, RoundRobinStrategy};
use crate::errors::EngineError;
use crate::identity::IdentityResolver;
use crate::models::{DivisionAssignment, MatchDayRecord, PlayerIdentity, PlayerRating, Roster, Team};
use crate::rating::{rate_players, RatingFailure, RatingOutcome};
use crate::team::build_teams;
use crate::tier::TierTable;

/// Everything one season run consumes, already parsed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeasonInputs {
    /// Raw per-match rows from the ingestion collaborator.
    pub records: Vec<MatchDayRecord>,

    /// Alias table: canonical identities with their known aliases.
    pub identities: Vec<PlayerIdentity>,

    /// Team rosters with allowed schedule days.
    pub rosters: Vec<Roster>,

    /// Prior-season ratings by player name, if blending is configured.
    #[serde(default)]
    pub priors: HashMap<String, f64>,
}

/// Full output of a season run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonReport {
    /// When this report was computed.
    pub computed_at: DateTime<Utc>,

    /// Ranked player ratings, best first.
    pub players: Vec<PlayerRating>,

    /// Players that could not be rated, with reasons.
    pub unrated: Vec<RatingFailure>,

    /// Rated, tiered teams with their substitution warnings.
    pub teams: Vec<Team>,

    /// The division partition.
    pub assignment: DivisionAssignment,
}

/// Rate the players only. Used by the `rate` subcommand and as the first
/// half of [`run_season`].
pub fn rate_season(inputs: &SeasonInputs, config: &EngineConfig) -> Result<RatingOutcome, EngineError> {
    config.validate()?;
    let resolver = IdentityResolver::new(&inputs.identities);
    let priors: HashMap<String, f64> = inputs
        .priors
        .iter()
        .map(|(name, &value)| (crate::models::normalize_name(name), value))
        .collect();
    Ok(rate_players(&inputs.records, &resolver, &priors, &config.scoring))
}

/// Run the whole pipeline for one season.
pub fn run_season(inputs: &SeasonInputs, config: &EngineConfig) -> Result<SeasonReport, EngineError> {
    config.validate()?;
    info!(
        records = inputs.records.len(),
        identities = inputs.identities.len(),
        rosters = inputs.rosters.len(),
        "season run started"
    );

    let outcome = rate_season(inputs, config)?;

    let resolver = IdentityResolver::new(&inputs.identities);
    let tiers = TierTable::new(config.tiers.clone());
    let teams = build_teams(
        &inputs.rosters,
        &resolver,
        &outcome.ratings_by_name(),
        &tiers,
        config.scoring.default_slot_rating,
    )?;

    let assignment = assign_divisions(&teams, &config.schedule, &RoundRobinStrategy)?;

    Ok(SeasonReport {
        computed_at: Utc::now(),
        players: outcome.ratings,
        unrated: outcome.failures,
        teams,
        assignment,
    })
}
