//! Team rosters and derived team ratings.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::TeamId;

/// Number of player slots on a roster. Slots may be unfilled.
pub const ROSTER_SIZE: usize = 3;

/// A scheduling day of the league week.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum ScheduleDay {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl fmt::Display for ScheduleDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScheduleDay::Monday => "Monday",
            ScheduleDay::Tuesday => "Tuesday",
            ScheduleDay::Wednesday => "Wednesday",
            ScheduleDay::Thursday => "Thursday",
            ScheduleDay::Friday => "Friday",
            ScheduleDay::Saturday => "Saturday",
            ScheduleDay::Sunday => "Sunday",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for ScheduleDay {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "monday" => Ok(ScheduleDay::Monday),
            "tuesday" => Ok(ScheduleDay::Tuesday),
            "wednesday" => Ok(ScheduleDay::Wednesday),
            "thursday" => Ok(ScheduleDay::Thursday),
            "friday" => Ok(ScheduleDay::Friday),
            "saturday" => Ok(ScheduleDay::Saturday),
            "sunday" => Ok(ScheduleDay::Sunday),
            other => Err(format!("unknown schedule day: {:?}", other)),
        }
    }
}

/// A team's roster as supplied by the scheduling/roster collaborator.
///
/// `players` holds up to [`ROSTER_SIZE`] raw name strings (aliases allowed);
/// missing entries are unfilled slots.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Roster {
    /// Team name.
    pub team_name: String,

    /// Raw player names, at most [`ROSTER_SIZE`].
    #[serde(default)]
    pub players: Vec<String>,

    /// Days of the week the team can play.
    pub allowed_days: BTreeSet<ScheduleDay>,
}

/// Non-fatal anomaly recorded while building a team rating.
///
/// Default substitution is deliberate policy for partial rosters, but every
/// occurrence must stay auditable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TeamWarning {
    /// A roster slot had no player name at all.
    UnfilledSlot { slot: usize },

    /// A roster slot named a player the alias table does not know.
    UnknownPlayer { slot: usize, name: String },

    /// A known player had no computable rating this season.
    NoRatingData { slot: usize, player: String },
}

impl fmt::Display for TeamWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TeamWarning::UnfilledSlot { slot } => {
                write!(f, "slot {} unfilled, default rating substituted", slot + 1)
            }
            TeamWarning::UnknownPlayer { slot, name } => write!(
                f,
                "slot {} names unknown player {:?}, default rating substituted",
                slot + 1,
                name
            ),
            TeamWarning::NoRatingData { slot, player } => write!(
                f,
                "slot {} player {:?} has no rating data, default substituted",
                slot + 1,
                player
            ),
        }
    }
}

/// A team with its derived rating and tier.
///
/// Recomputed wholesale whenever underlying player ratings change; the
/// derived fields are never patched piecemeal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    /// Stable content-hash ID for the team name.
    pub id: TeamId,

    /// Team name.
    pub name: String,

    /// Canonical names of the resolved roster players (unfilled or
    /// unresolvable slots are absent here but visible in `warnings`).
    pub players: Vec<String>,

    /// Sum of the three slot ratings.
    pub rating: f64,

    /// Tier label from the threshold table.
    pub tier: String,

    /// Days the team can play.
    pub allowed_days: BTreeSet<ScheduleDay>,

    /// Default-substitution anomalies recorded during the roll-up.
    #[serde(default)]
    pub warnings: Vec<TeamWarning>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schedule_day_parse() {
        assert_eq!("monday".parse::<ScheduleDay>(), Ok(ScheduleDay::Monday));
        assert_eq!(" Thursday ".parse::<ScheduleDay>(), Ok(ScheduleDay::Thursday));
        assert!("someday".parse::<ScheduleDay>().is_err());
    }

    #[test]
    fn test_schedule_day_display_round_trip() {
        for day in [
            ScheduleDay::Monday,
            ScheduleDay::Wednesday,
            ScheduleDay::Sunday,
        ] {
            assert_eq!(day.to_string().parse::<ScheduleDay>(), Ok(day));
        }
    }

    #[test]
    fn test_roster_deserialize() {
        let roster: Roster = serde_json::from_str(
            r#"{
                "team_name": "Void Walkers",
                "players": ["Wraith", "Specter"],
                "allowed_days": ["Monday", "Wednesday"]
            }"#,
        )
        .unwrap();
        assert_eq!(roster.team_name, "Void Walkers");
        assert_eq!(roster.players.len(), 2);
        assert!(roster.allowed_days.contains(&ScheduleDay::Monday));
        assert!(!roster.allowed_days.contains(&ScheduleDay::Thursday));
    }

    #[test]
    fn test_warning_display_names_the_slot() {
        let warning = TeamWarning::UnknownPlayer {
            slot: 2,
            name: "ghost".to_string(),
        };
        let text = warning.to_string();
        assert!(text.contains("slot 3"));
        assert!(text.contains("ghost"));
    }
}
