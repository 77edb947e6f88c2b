//! Per-match-day result records.

use serde::{Deserialize, Serialize};

use super::LobbyTier;

/// One player's result on one league day, as delivered by the ingestion
/// collaborator. Immutable once ingested.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchDayRecord {
    /// Raw player name as it appeared in the source data (may be an alias).
    pub player_name: String,

    /// League day, 1-based.
    pub day: u8,

    /// Lobby the player competed in that day.
    pub lobby_tier: LobbyTier,

    /// Placement points earned that day.
    pub placement_points: f64,

    /// Kills that day.
    pub kills: u32,

    /// Damage dealt that day. Recorded for observability only; it never
    /// enters the score.
    pub damage: u32,
}

impl MatchDayRecord {
    /// Raw per-day score: placement points plus kills.
    ///
    /// Lobby-independent by design — lobby difficulty is compensated later
    /// through the bonus table, never by scaling the raw score.
    pub fn raw_score(&self) -> f64 {
        self.placement_points + f64::from(self.kills)
    }
}
