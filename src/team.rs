//! Team rating roll-up.
//!
//! A team's rating is the sum of its three roster slot ratings. This is the
//! one place default substitution happens: an unfilled slot, an unknown
//! name, or a player with no computable rating contributes the configured
//! default rating instead of zero, and every substitution is recorded as a
//! warning on the team so the policy stays auditable.

use std::collections::HashMap;

use tracing::warn;

use crate::errors::DataError;
use crate::identity::IdentityResolver;
use crate::models::{normalize_name, EntityId, Roster, Team, TeamWarning, ROSTER_SIZE};
use crate::tier::TierTable;

/// Build rated, tiered teams from roster input.
///
/// `ratings_by_name` maps normalized canonical names to combined ratings
/// (see [`crate::rating::RatingOutcome::ratings_by_name`]). A roster with
/// more than [`ROSTER_SIZE`] players is malformed input and fails the run.
pub fn build_teams(
    rosters: &[Roster],
    resolver: &IdentityResolver<'_>,
    ratings_by_name: &HashMap<String, f64>,
    tiers: &TierTable,
    default_slot_rating: f64,
) -> Result<Vec<Team>, DataError> {
    rosters
        .iter()
        .map(|roster| build_team(roster, resolver, ratings_by_name, tiers, default_slot_rating))
        .collect()
}

fn build_team(
    roster: &Roster,
    resolver: &IdentityResolver<'_>,
    ratings_by_name: &HashMap<String, f64>,
    tiers: &TierTable,
    default_slot_rating: f64,
) -> Result<Team, DataError> {
    if roster.players.len() > ROSTER_SIZE {
        return Err(DataError::OversizedRoster {
            team: roster.team_name.clone(),
            count: roster.players.len(),
            max: ROSTER_SIZE,
        });
    }

    let mut rating = 0.0;
    let mut players = Vec::new();
    let mut warnings = Vec::new();

    for slot in 0..ROSTER_SIZE {
        let slot_rating = match roster.players.get(slot) {
            None => {
                warnings.push(TeamWarning::UnfilledSlot { slot });
                default_slot_rating
            }
            Some(raw_name) => match resolver.resolve(raw_name) {
                Err(_) => {
                    warnings.push(TeamWarning::UnknownPlayer {
                        slot,
                        name: raw_name.trim().to_string(),
                    });
                    default_slot_rating
                }
                Ok(identity) => {
                    players.push(identity.canonical.clone());
                    match ratings_by_name.get(&normalize_name(&identity.canonical)) {
                        Some(&value) => value,
                        None => {
                            warnings.push(TeamWarning::NoRatingData {
                                slot,
                                player: identity.canonical.clone(),
                            });
                            default_slot_rating
                        }
                    }
                }
            },
        };
        rating += slot_rating;
    }

    for warning in &warnings {
        warn!(team = %roster.team_name, %warning, "default rating substituted");
    }

    let tier = tiers.classify(rating).to_string();

    Ok(Team {
        id: EntityId::for_team(&roster.team_name),
        name: roster.team_name.clone(),
        players,
        rating,
        tier,
        allowed_days: roster.allowed_days.clone(),
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TierThreshold;
    use crate::models::{PlayerIdentity, ScheduleDay};
    use std::collections::BTreeSet;

    fn tier_table() -> TierTable {
        TierTable::new(vec![
            TierThreshold {
                min_rating: 8000.0,
                label: "S+".to_string(),
            },
            TierThreshold {
                min_rating: 4000.0,
                label: "S".to_string(),
            },
            TierThreshold {
                min_rating: 0.0,
                label: "D-".to_string(),
            },
        ])
    }

    fn roster(players: &[&str]) -> Roster {
        Roster {
            team_name: "Void Walkers".to_string(),
            players: players.iter().map(|s| s.to_string()).collect(),
            allowed_days: BTreeSet::from([ScheduleDay::Monday]),
        }
    }

    fn ratings(entries: &[(&str, f64)]) -> HashMap<String, f64> {
        entries
            .iter()
            .map(|&(name, value)| (name.to_string(), value))
            .collect()
    }

    #[test]
    fn test_reference_scenario_partial_roster() {
        // Two rated players plus one unfilled slot at the default of 80.
        let ids = vec![PlayerIdentity::new("Wraith"), PlayerIdentity::new("Specter")];
        let resolver = IdentityResolver::new(&ids);
        let map = ratings(&[("wraith", 21221.36), ("specter", 5000.0)]);
        let team = build_team(
            &roster(&["Wraith", "Specter"]),
            &resolver,
            &map,
            &tier_table(),
            80.0,
        )
        .unwrap();

        assert!((team.rating - 26301.36).abs() < 1e-9);
        assert_eq!(team.tier, "S+");
        assert_eq!(team.warnings, vec![TeamWarning::UnfilledSlot { slot: 2 }]);
    }

    #[test]
    fn test_unknown_player_gets_default_with_warning() {
        let ids = vec![PlayerIdentity::new("Wraith")];
        let resolver = IdentityResolver::new(&ids);
        let map = ratings(&[("wraith", 100.0)]);
        let team = build_team(
            &roster(&["Wraith", "Nobody", "Wraith"]),
            &resolver,
            &map,
            &tier_table(),
            80.0,
        )
        .unwrap();

        assert_eq!(team.rating, 100.0 + 80.0 + 100.0);
        assert!(team
            .warnings
            .iter()
            .any(|w| matches!(w, TeamWarning::UnknownPlayer { name, .. } if name == "Nobody")));
    }

    #[test]
    fn test_known_player_without_rating_gets_default() {
        // "No data" degrades to the default here, never to zero.
        let ids = vec![PlayerIdentity::new("Wraith"), PlayerIdentity::new("Idle")];
        let resolver = IdentityResolver::new(&ids);
        let map = ratings(&[("wraith", 100.0)]);
        let team = build_team(
            &roster(&["Wraith", "Idle"]),
            &resolver,
            &map,
            &tier_table(),
            80.0,
        )
        .unwrap();

        assert_eq!(team.rating, 100.0 + 80.0 + 80.0);
        assert!(team
            .warnings
            .iter()
            .any(|w| matches!(w, TeamWarning::NoRatingData { player, .. } if player == "Idle")));
    }

    #[test]
    fn test_oversized_roster_is_rejected() {
        let ids = vec![PlayerIdentity::new("Wraith")];
        let resolver = IdentityResolver::new(&ids);
        let err = build_team(
            &roster(&["a", "b", "c", "d"]),
            &resolver,
            &HashMap::new(),
            &tier_table(),
            80.0,
        )
        .unwrap_err();
        assert!(matches!(err, DataError::OversizedRoster { count: 4, .. }));
    }

    #[test]
    fn test_full_roster_no_warnings() {
        let ids = vec![
            PlayerIdentity::new("A"),
            PlayerIdentity::new("B"),
            PlayerIdentity::new("C"),
        ];
        let resolver = IdentityResolver::new(&ids);
        let map = ratings(&[("a", 1.0), ("b", 2.0), ("c", 3.0)]);
        let team = build_team(&roster(&["A", "B", "C"]), &resolver, &map, &tier_table(), 80.0)
            .unwrap();
        assert_eq!(team.rating, 6.0);
        assert!(team.warnings.is_empty());
        assert_eq!(team.players, vec!["A", "B", "C"]);
    }
}
