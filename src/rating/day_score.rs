//! Per-day score aggregation into a base rating.

use std::collections::BTreeSet;

use crate::errors::DataError;
use crate::models::MatchDayRecord;

/// Per-player aggregate over the days they actually played.
#[derive(Debug, Clone, PartialEq)]
pub struct DayAggregate {
    /// Distinct days with a recorded match.
    pub days_played: u32,

    /// Mean raw score over those days.
    pub base_rating: f64,

    /// Season totals, reporting only.
    pub total_kills: u32,
    pub total_damage: u64,
}

/// Aggregate a player's match-day records into a base rating.
///
/// `base_rating` is the mean of `placement_points + kills` across exactly
/// the days the player has a record for. Zero recorded days is a
/// [`DataError`], never a zero rating — callers exclude such players from
/// team rollups and surface them as "no data".
pub fn aggregate_days(
    player: &str,
    records: &[&MatchDayRecord],
) -> Result<DayAggregate, DataError> {
    if records.is_empty() {
        return Err(DataError::NoDaysPlayed(player.to_string()));
    }

    let days: BTreeSet<u8> = records.iter().map(|r| r.day).collect();
    let total_score: f64 = records.iter().map(|r| r.raw_score()).sum();
    let total_kills: u32 = records.iter().map(|r| r.kills).sum();
    let total_damage: u64 = records.iter().map(|r| u64::from(r.damage)).sum();

    Ok(DayAggregate {
        days_played: days.len() as u32,
        base_rating: total_score / days.len() as f64,
        total_kills,
        total_damage,
    })
}
