//! Lobby bonus accumulation.

use tracing::debug;

use crate::config::ScoringConfig;
use crate::errors::DataError;
use crate::models::MatchDayRecord;

/// Sum the per-day lobby bonus fractions for a player's records.
///
/// The Day-1 remap is applied before the table lookup — and only there; raw
/// scores never see it. An unrecognized tier is a hard error, because a
/// silent default would zero out the player's bonus unnoticed.
pub fn lobby_bonus_total(
    player: &str,
    records: &[&MatchDayRecord],
    config: &ScoringConfig,
) -> Result<f64, DataError> {
    let mut total = 0.0;
    for record in records {
        let effective = config.effective_lobby(record.day, record.lobby_tier);
        if effective != record.lobby_tier {
            debug!(
                player,
                day = record.day,
                from = %record.lobby_tier,
                to = %effective,
                "remapped lobby label for bonus lookup"
            );
        }
        let bonus = config
            .bonus_for(effective)
            .ok_or_else(|| DataError::UnknownLobbyTier {
                player: player.to_string(),
                day: record.day,
                tier: effective.to_string(),
            })?;
        total += bonus;
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LobbyTier;

    fn record(day: u8, lobby: &str) -> MatchDayRecord {
        MatchDayRecord {
            player_name: "Wraith".to_string(),
            day,
            lobby_tier: lobby.parse().unwrap(),
            placement_points: 50.0,
            kills: 5,
            damage: 0,
        }
    }

    #[test]
    fn test_bonus_is_additive_across_days() {
        // Reference scenario: lobbies [1, 1.5, 1, 1.5] over days 1-4.
        let config = ScoringConfig::default();
        let records = vec![
            record(1, "1"),
            record(2, "1.5"),
            record(3, "1"),
            record(4, "1.5"),
        ];
        let refs: Vec<&MatchDayRecord> = records.iter().collect();
        let total = lobby_bonus_total("Wraith", &refs, &config).unwrap();
        assert_eq!(total, 81.92 + 40.96 + 81.92 + 40.96);
    }

    #[test]
    fn test_day_one_lobby_three_scores_as_three_point_five() {
        let config = ScoringConfig::default();
        let day1 = vec![record(1, "3")];
        let day2 = vec![record(2, "3.5")];
        let day1_refs: Vec<&MatchDayRecord> = day1.iter().collect();
        let day2_refs: Vec<&MatchDayRecord> = day2.iter().collect();
        assert_eq!(
            lobby_bonus_total("a", &day1_refs, &config).unwrap(),
            lobby_bonus_total("b", &day2_refs, &config).unwrap()
        );
    }

    #[test]
    fn test_day_one_lobby_five_scores_as_five_point_five() {
        let config = ScoringConfig::default();
        let remapped = config.effective_lobby(1, "5".parse::<LobbyTier>().unwrap());
        assert_eq!(remapped, "5.5".parse::<LobbyTier>().unwrap());
        let day1 = vec![record(1, "5")];
        let refs: Vec<&MatchDayRecord> = day1.iter().collect();
        assert_eq!(
            lobby_bonus_total("a", &refs, &config).unwrap(),
            config.bonus_for(remapped).unwrap()
        );
    }

    #[test]
    fn test_unknown_tier_is_a_hard_error() {
        let mut config = ScoringConfig::default();
        config
            .lobby_bonus
            .remove(&"4".parse::<LobbyTier>().unwrap());
        let records = vec![record(2, "4")];
        let refs: Vec<&MatchDayRecord> = records.iter().collect();
        let err = lobby_bonus_total("Wraith", &refs, &config).unwrap_err();
        assert!(matches!(err, DataError::UnknownLobbyTier { .. }));
    }
}
