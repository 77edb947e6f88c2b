//! Per-player rating pipeline.
//!
//! Resolves identities, aggregates per-day scores, accumulates lobby
//! bonuses, and blends with prior-season ratings. Each player's computation
//! reads only its own records plus the read-only configuration, so the loop
//! is safe to parallelize per player; the current single pass is fast enough
//! for league-sized inputs.

mod bonus;
mod combine;
mod day_score;

pub use bonus::lobby_bonus_total;
pub use combine::{blend_with_prior, final_rating};
pub use day_score::{aggregate_days, DayAggregate};

use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::ScoringConfig;
use crate::errors::DataError;
use crate::identity::IdentityResolver;
use crate::models::{normalize_name, EntityId, MatchDayRecord, PlayerRating};

/// A player (or unresolvable raw name) that could not be rated, with why.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatingFailure {
    pub name: String,
    pub reason: String,
}

/// Output of the rating stage: ranked ratings plus individual failures.
#[derive(Debug, Clone, Default)]
pub struct RatingOutcome {
    /// Sorted by combined rating descending, name ascending; ranks assigned.
    pub ratings: Vec<PlayerRating>,

    /// Players excluded from the ranking, each with its reason.
    pub failures: Vec<RatingFailure>,
}

impl RatingOutcome {
    /// Lookup map canonical name -> combined rating, for the team rollup.
    pub fn ratings_by_name(&self) -> HashMap<String, f64> {
        self.ratings
            .iter()
            .map(|r| (normalize_name(&r.player), r.combined_rating))
            .collect()
    }
}

/// Rate every player appearing in the match records.
///
/// Unresolvable names and unknown lobby tiers abort only the affected
/// player's rating; they are collected as failures rather than guessed
/// around. `priors` is keyed by canonical player name.
pub fn rate_players(
    records: &[MatchDayRecord],
    resolver: &IdentityResolver<'_>,
    priors: &HashMap<String, f64>,
    config: &ScoringConfig,
) -> RatingOutcome {
    // Group records by canonical identity. BTreeMap keeps the iteration
    // order deterministic across runs.
    let mut by_player: BTreeMap<String, Vec<&MatchDayRecord>> = BTreeMap::new();
    let mut failures: Vec<RatingFailure> = Vec::new();
    let mut unknown_seen: BTreeSet<String> = BTreeSet::new();

    for record in records {
        match resolver.resolve(&record.player_name) {
            Ok(identity) => {
                by_player
                    .entry(identity.canonical.clone())
                    .or_default()
                    .push(record);
            }
            Err(err) => {
                let key = normalize_name(&record.player_name);
                if unknown_seen.insert(key) {
                    warn!(name = %record.player_name, "unresolved player name in match data");
                    failures.push(RatingFailure {
                        name: record.player_name.trim().to_string(),
                        reason: err.to_string(),
                    });
                }
            }
        }
    }

    let mut ratings = Vec::with_capacity(by_player.len());
    for (canonical, player_records) in &by_player {
        match rate_one(canonical, player_records, priors, config) {
            Ok(rating) => ratings.push(rating),
            Err(err) => {
                warn!(player = %canonical, error = %err, "player rating aborted");
                failures.push(RatingFailure {
                    name: canonical.clone(),
                    reason: err.to_string(),
                });
            }
        }
    }

    // Rank: combined rating descending, ties broken by name for
    // reproducibility.
    ratings.sort_by(|a, b| {
        b.combined_rating
            .total_cmp(&a.combined_rating)
            .then_with(|| a.player.cmp(&b.player))
    });
    for (i, rating) in ratings.iter_mut().enumerate() {
        rating.rank = Some(i as u32 + 1);
    }

    info!(
        rated = ratings.len(),
        failed = failures.len(),
        "player rating pass complete"
    );

    RatingOutcome { ratings, failures }
}

fn rate_one(
    canonical: &str,
    records: &[&MatchDayRecord],
    priors: &HashMap<String, f64>,
    config: &ScoringConfig,
) -> Result<PlayerRating, DataError> {
    let aggregate = aggregate_days(canonical, records)?;
    let bonus_total = lobby_bonus_total(canonical, records, config)?;
    let final_value = final_rating(aggregate.base_rating, bonus_total);
    let prior = priors.get(&normalize_name(canonical)).copied();
    let combined = blend_with_prior(final_value, prior, config.blend_weight);

    Ok(PlayerRating {
        id: EntityId::for_player(canonical),
        player: canonical.to_string(),
        days_played: aggregate.days_played,
        base_rating: aggregate.base_rating,
        lobby_bonus_total: bonus_total,
        final_rating: final_value,
        combined_rating: combined,
        prior_rating: prior,
        total_kills: aggregate.total_kills,
        total_damage: aggregate.total_damage,
        rank: None,
    })
}
