//! Pluggable seeding strategies.

use std::collections::BTreeMap;

use crate::errors::AssignmentError;
use crate::models::Team;

/// Seats ranked teams into divisions.
///
/// `teams` arrives sorted by rating descending (name ascending on ties), and
/// `groups[i]` is team `i`'s compatibility group: the division indices its
/// allowed days permit, ascending. A strategy returns division index ->
/// seated team positions; it decides only *which* eligible division each
/// team lands in — the hard schedule and capacity constraints are verified
/// by the caller afterwards, so swapping strategies never weakens them.
pub trait PartitionStrategy {
    fn partition(
        &self,
        teams: &[Team],
        groups: &[Vec<u32>],
        capacity: usize,
    ) -> Result<BTreeMap<u32, Vec<usize>>, AssignmentError>;
}

/// Reference strategy: walk the ranked list and seat each team in its
/// least-filled eligible division, ties broken by lowest division index.
///
/// Divisions sharing a compatibility group fill at the same rate, so
/// rank-adjacent teams spread across same-day divisions while the global
/// rank order is preserved.
#[derive(Debug, Clone, Copy, Default)]
pub struct RoundRobinStrategy;

impl PartitionStrategy for RoundRobinStrategy {
    fn partition(
        &self,
        teams: &[Team],
        groups: &[Vec<u32>],
        capacity: usize,
    ) -> Result<BTreeMap<u32, Vec<usize>>, AssignmentError> {
        let mut seats: BTreeMap<u32, Vec<usize>> = BTreeMap::new();

        for (position, (team, group)) in teams.iter().zip(groups).enumerate() {
            if group.is_empty() {
                return Err(AssignmentError::NoEligibleDivision {
                    team: team.name.clone(),
                    allowed_days: team.allowed_days.iter().copied().collect(),
                });
            }

            // Least-filled first; BTreeMap order plus the ascending group
            // makes the lowest index win ties.
            let target = group
                .iter()
                .copied()
                .map(|index| (seats.get(&index).map_or(0, Vec::len), index))
                .min()
                .filter(|&(filled, _)| filled < capacity);

            match target {
                Some((_, index)) => seats.entry(index).or_default().push(position),
                None => {
                    return Err(AssignmentError::EligibleDivisionsFull {
                        team: team.name.clone(),
                        eligible: group.clone(),
                    })
                }
            }
        }

        Ok(seats)
    }
}
