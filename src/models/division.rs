//! Division assignment models.

use serde::{Deserialize, Serialize};

use super::ScheduleDay;

/// A team as it appears inside a seeded division.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeededTeam {
    pub name: String,
    pub rating: f64,
    pub tier: String,
}

/// Rating spread statistics for one division.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DivisionStats {
    pub count: usize,
    pub avg_rating: f64,
    pub max_rating: f64,
    pub min_rating: f64,
}

impl DivisionStats {
    /// Compute stats from the seated teams.
    pub fn from_teams(teams: &[SeededTeam]) -> Self {
        if teams.is_empty() {
            return Self::default();
        }
        let sum: f64 = teams.iter().map(|t| t.rating).sum();
        let max = teams.iter().map(|t| t.rating).fold(f64::MIN, f64::max);
        let min = teams.iter().map(|t| t.rating).fold(f64::MAX, f64::min);
        Self {
            count: teams.len(),
            avg_rating: sum / teams.len() as f64,
            max_rating: max,
            min_rating: min,
        }
    }
}

/// One division after seeding: a fixed-capacity, schedule-bound bucket.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeededDivision {
    /// Division index (1..N).
    pub index: u32,

    /// Day this division plays on.
    pub scheduled_day: ScheduleDay,

    /// Fixed capacity; equal across all divisions.
    pub capacity: usize,

    /// Teams in rating order (highest first).
    pub teams: Vec<SeededTeam>,

    /// Rating spread over the seated teams.
    pub stats: DivisionStats,
}

/// The total, non-overlapping partition of all teams into divisions.
///
/// Constructed once per season run; rebuilding from identical inputs yields
/// an identical partition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DivisionAssignment {
    pub divisions: Vec<SeededDivision>,
}

impl DivisionAssignment {
    /// Total number of seated teams.
    pub fn team_count(&self) -> usize {
        self.divisions.iter().map(|d| d.teams.len()).sum()
    }

    /// Division index a team was seated in, if any.
    pub fn division_of(&self, team_name: &str) -> Option<u32> {
        self.divisions
            .iter()
            .find(|d| d.teams.iter().any(|t| t.name == team_name))
            .map(|d| d.index)
    }
}
