//! Constrained partition of ranked teams into divisions.
//!
//! Hard constraints: every team lands in exactly one division whose
//! scheduled day its roster allows, and every division ends exactly full.
//! The soft balancing (which eligible division a team lands in) is the
//! strategy's business; everything a strategy returns is re-verified here.

mod strategy;

pub use strategy::{PartitionStrategy, RoundRobinStrategy};

use std::collections::{BTreeMap, BTreeSet};

use tracing::info;

use crate::config::{ConfigError, ScheduleConfig};
use crate::errors::{AssignmentError, EngineError};
use crate::models::{
    DivisionAssignment, DivisionStats, ScheduleDay, SeededDivision, SeededTeam, Team,
};

/// Partition rated teams into equal, schedule-bound divisions.
pub fn assign_divisions(
    teams: &[Team],
    schedule: &ScheduleConfig,
    strategy: &dyn PartitionStrategy,
) -> Result<DivisionAssignment, EngineError> {
    let capacity = resolve_capacity(schedule, teams.len())?;

    let mut slots = schedule.divisions.clone();
    slots.sort_by_key(|slot| slot.index);
    let day_of: BTreeMap<u32, ScheduleDay> =
        slots.iter().map(|slot| (slot.index, slot.day)).collect();

    // Global rank order, ties broken by name so re-runs reproduce the
    // identical partition.
    let mut ranked: Vec<&Team> = teams.iter().collect();
    ranked.sort_by(|a, b| {
        b.rating
            .total_cmp(&a.rating)
            .then_with(|| a.name.cmp(&b.name))
    });
    let ranked: Vec<Team> = ranked.into_iter().cloned().collect();

    // Compatibility group per team: the division indices its days allow.
    let groups: Vec<Vec<u32>> = ranked
        .iter()
        .map(|team| {
            slots
                .iter()
                .filter(|slot| team.allowed_days.contains(&slot.day))
                .map(|slot| slot.index)
                .collect()
        })
        .collect();

    let seats = strategy.partition(&ranked, &groups, capacity)?;
    verify_partition(&ranked, &seats, &day_of, capacity).map_err(EngineError::Assignment)?;

    let divisions = slots
        .iter()
        .map(|slot| {
            // Seats arrive in rank order, which is already rating-descending.
            let teams: Vec<SeededTeam> = seats
                .get(&slot.index)
                .into_iter()
                .flatten()
                .map(|&position| {
                    let team = &ranked[position];
                    SeededTeam {
                        name: team.name.clone(),
                        rating: team.rating,
                        tier: team.tier.clone(),
                    }
                })
                .collect();
            SeededDivision {
                index: slot.index,
                scheduled_day: slot.day,
                capacity,
                stats: DivisionStats::from_teams(&teams),
                teams,
            }
        })
        .collect();

    let assignment = DivisionAssignment { divisions };
    info!(
        teams = assignment.team_count(),
        divisions = assignment.divisions.len(),
        capacity,
        "division seeding complete"
    );
    Ok(assignment)
}

/// Fixed per-division capacity: explicit from configuration, or derived as
/// `total / divisions`. Either way the divisions must exactly cover the
/// team count; a remainder is a configuration error, never rounded away.
fn resolve_capacity(schedule: &ScheduleConfig, total_teams: usize) -> Result<usize, ConfigError> {
    let count = schedule.divisions.len();
    match schedule.capacity {
        Some(capacity) => {
            if capacity * count != total_teams {
                return Err(ConfigError::ValidationError(format!(
                    "{count} divisions of {capacity} hold {} teams, but {total_teams} are rated",
                    capacity * count
                )));
            }
            Ok(capacity)
        }
        None => {
            if count == 0 || total_teams % count != 0 {
                return Err(ConfigError::ValidationError(format!(
                    "{total_teams} teams do not divide evenly into {count} divisions"
                )));
            }
            Ok(total_teams / count)
        }
    }
}

fn verify_partition(
    ranked: &[Team],
    seats: &BTreeMap<u32, Vec<usize>>,
    day_of: &BTreeMap<u32, ScheduleDay>,
    capacity: usize,
) -> Result<(), AssignmentError> {
    let mut seen: BTreeSet<usize> = BTreeSet::new();

    for (&index, positions) in seats {
        let day = *day_of
            .get(&index)
            .ok_or_else(|| AssignmentError::InvalidPartition(format!(
                "division {index} is not in the schedule"
            )))?;
        if positions.len() != capacity {
            return Err(AssignmentError::InvalidPartition(format!(
                "division {index} holds {} teams, capacity is {capacity}",
                positions.len()
            )));
        }
        for &position in positions {
            let team = &ranked[position];
            if !team.allowed_days.contains(&day) {
                return Err(AssignmentError::InvalidPartition(format!(
                    "team {:?} seated in division {index} on {day}, outside its allowed days",
                    team.name
                )));
            }
            if !seen.insert(position) {
                return Err(AssignmentError::InvalidPartition(format!(
                    "team {:?} seated more than once",
                    team.name
                )));
            }
        }
    }

    if seen.len() != ranked.len() {
        return Err(AssignmentError::InvalidPartition(format!(
            "{} of {} teams seated",
            seen.len(),
            ranked.len()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DivisionSlot;
    use crate::models::EntityId;

    fn team(name: &str, rating: f64, days: &[ScheduleDay]) -> Team {
        Team {
            id: EntityId::for_team(name),
            name: name.to_string(),
            players: vec![],
            rating,
            tier: "B".to_string(),
            allowed_days: days.iter().copied().collect(),
            warnings: vec![],
        }
    }

    fn two_division_schedule() -> ScheduleConfig {
        ScheduleConfig {
            divisions: vec![
                DivisionSlot {
                    index: 1,
                    day: ScheduleDay::Monday,
                },
                DivisionSlot {
                    index: 2,
                    day: ScheduleDay::Wednesday,
                },
            ],
            capacity: None,
        }
    }

    fn names(division: &SeededDivision) -> Vec<&str> {
        division.teams.iter().map(|t| t.name.as_str()).collect()
    }

    #[test]
    fn test_six_teams_two_divisions_round_robin() {
        use ScheduleDay::*;
        let teams: Vec<Team> = (1..=6)
            .map(|i| team(&format!("T{i}"), (7 - i) as f64 * 100.0, &[Monday, Wednesday]))
            .collect();

        let assignment =
            assign_divisions(&teams, &two_division_schedule(), &RoundRobinStrategy).unwrap();

        assert_eq!(assignment.divisions.len(), 2);
        assert_eq!(names(&assignment.divisions[0]), vec!["T1", "T3", "T5"]);
        assert_eq!(names(&assignment.divisions[1]), vec!["T2", "T4", "T6"]);
        assert_eq!(assignment.team_count(), 6);

        // Idempotent on identical input.
        let again =
            assign_divisions(&teams, &two_division_schedule(), &RoundRobinStrategy).unwrap();
        for (a, b) in assignment.divisions.iter().zip(&again.divisions) {
            assert_eq!(names(a), names(b));
        }
    }

    #[test]
    fn test_schedule_constraint_overrides_rank_order() {
        use ScheduleDay::*;
        // The top two teams can only play Wednesday, so both go to
        // division 2 despite being rank-adjacent.
        let teams = vec![
            team("First", 600.0, &[Wednesday]),
            team("Second", 500.0, &[Wednesday]),
            team("Third", 400.0, &[Monday, Wednesday]),
            team("Fourth", 300.0, &[Monday]),
        ];

        let assignment =
            assign_divisions(&teams, &two_division_schedule(), &RoundRobinStrategy).unwrap();
        assert_eq!(assignment.division_of("First"), Some(2));
        assert_eq!(assignment.division_of("Second"), Some(2));
        assert_eq!(assignment.division_of("Third"), Some(1));
        assert_eq!(assignment.division_of("Fourth"), Some(1));
    }

    #[test]
    fn test_team_with_no_eligible_day_fails_loudly() {
        use ScheduleDay::*;
        let teams = vec![
            team("A", 200.0, &[Monday]),
            team("Loner", 100.0, &[Friday]),
        ];
        let err =
            assign_divisions(&teams, &two_division_schedule(), &RoundRobinStrategy).unwrap_err();
        assert!(matches!(
            err,
            EngineError::Assignment(AssignmentError::NoEligibleDivision { ref team, .. })
                if team == "Loner"
        ));
    }

    #[test]
    fn test_uneven_team_count_is_a_config_error() {
        use ScheduleDay::*;
        let teams: Vec<Team> = (1..=5)
            .map(|i| team(&format!("T{i}"), i as f64, &[Monday, Wednesday]))
            .collect();
        let err =
            assign_divisions(&teams, &two_division_schedule(), &RoundRobinStrategy).unwrap_err();
        assert!(matches!(err, EngineError::Config(_)));
    }

    #[test]
    fn test_explicit_capacity_must_cover_exactly() {
        use ScheduleDay::*;
        let mut schedule = two_division_schedule();
        schedule.capacity = Some(2);
        let teams: Vec<Team> = (1..=6)
            .map(|i| team(&format!("T{i}"), i as f64, &[Monday, Wednesday]))
            .collect();
        let err = assign_divisions(&teams, &schedule, &RoundRobinStrategy).unwrap_err();
        assert!(matches!(err, EngineError::Config(_)));
    }

    #[test]
    fn test_divisions_carry_stats() {
        use ScheduleDay::*;
        let teams: Vec<Team> = (1..=4)
            .map(|i| team(&format!("T{i}"), i as f64 * 10.0, &[Monday, Wednesday]))
            .collect();
        let assignment =
            assign_divisions(&teams, &two_division_schedule(), &RoundRobinStrategy).unwrap();
        let first = &assignment.divisions[0];
        assert_eq!(first.stats.count, 2);
        assert_eq!(first.stats.max_rating, 40.0);
        assert_eq!(first.stats.min_rating, 20.0);
    }
}
