//! Player identity and derived rating models.

use serde::{Deserialize, Serialize};

use super::PlayerId;

/// A canonical player identity plus the alias strings it is known under.
///
/// The alias table is supplied by the ingestion collaborator and is
/// read-only to the engine. Each alias resolves to exactly one canonical
/// identity; canonical names are globally unique.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerIdentity {
    /// Canonical player name.
    pub canonical: String,

    /// Known alias strings (historical in-game names, chat handles, ...).
    #[serde(default)]
    pub aliases: Vec<String>,
}

impl PlayerIdentity {
    /// Create an identity with no aliases beyond the canonical name.
    pub fn new(canonical: impl Into<String>) -> Self {
        Self {
            canonical: canonical.into(),
            aliases: Vec::new(),
        }
    }

    /// Builder method to add an alias.
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }
}

/// A player's derived rating for one season run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerRating {
    /// Stable content-hash ID for the canonical identity.
    pub id: PlayerId,

    /// Canonical player name.
    pub player: String,

    /// Distinct days with a recorded match. Always >= 1; a player with no
    /// recorded days has no rating at all rather than a zero one.
    pub days_played: u32,

    /// Average raw per-day score, independent of lobby bonus.
    pub base_rating: f64,

    /// Sum of per-day lobby bonus fractions.
    pub lobby_bonus_total: f64,

    /// `base_rating * (1 + lobby_bonus_total)`.
    pub final_rating: f64,

    /// Final rating blended with the prior-season rating when one was
    /// supplied; equals `final_rating` otherwise.
    pub combined_rating: f64,

    /// Prior-season rating that entered the blend, if any.
    pub prior_rating: Option<f64>,

    /// Season totals kept for reporting; excluded from scoring.
    pub total_kills: u32,
    pub total_damage: u64,

    /// Rank among all rated players (1 = best), assigned after sorting.
    pub rank: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EntityId;

    #[test]
    fn test_identity_builder() {
        let identity = PlayerIdentity::new("Wraith")
            .with_alias("wraith_ttv")
            .with_alias("TSM Wraith");
        assert_eq!(identity.canonical, "Wraith");
        assert_eq!(identity.aliases.len(), 2);
    }

    #[test]
    fn test_identity_deserialize_without_aliases() {
        let identity: PlayerIdentity =
            serde_json::from_str(r#"{"canonical": "Solo"}"#).unwrap();
        assert_eq!(identity.canonical, "Solo");
        assert!(identity.aliases.is_empty());
    }

    #[test]
    fn test_rating_serialization() {
        let rating = PlayerRating {
            id: EntityId::for_player("Wraith"),
            player: "Wraith".to_string(),
            days_played: 4,
            base_rating: 86.0,
            lobby_bonus_total: 245.76,
            final_rating: 21221.36,
            combined_rating: 21221.36,
            prior_rating: None,
            total_kills: 31,
            total_damage: 18200,
            rank: Some(1),
        };
        let json = serde_json::to_string(&rating).unwrap();
        let back: PlayerRating = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, rating.id);
        assert_eq!(back.final_rating, rating.final_rating);
        assert_eq!(back.rank, Some(1));
    }
}
