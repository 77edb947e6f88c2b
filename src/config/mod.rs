//! Configuration loading and validation.
//!
//! Every table the engine consumes is data, not code: the lobby-bonus
//! table, the Day-1 remapping pairs, the tier thresholds, the default
//! roster-slot rating, the blend weight, and the division schedule all load
//! from a TOML file and can be swapped without touching aggregation logic.
//! Built-in defaults reproduce the reference season setup.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{LobbyTier, ScheduleDay};

/// Configuration errors. Fatal at run start — the engine never proceeds
/// partway with an incomplete configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// A Day-1 data-collision correction: records on `day` with lobby `from`
/// are treated as lobby `to` for bonus lookup (never for raw scores).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemapRule {
    pub day: u8,
    pub from: LobbyTier,
    pub to: LobbyTier,
}

/// One row of the tier threshold table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TierThreshold {
    pub min_rating: f64,
    pub label: String,
}

/// Scoring-stage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Lobby tier -> additive bonus fraction. Each half-tier step halves
    /// the bonus of the previous one in the default table.
    #[serde(default = "default_lobby_bonus")]
    pub lobby_bonus: BTreeMap<LobbyTier, f64>,

    /// Lobby label corrections applied before bonus lookup.
    #[serde(default = "default_day_one_remap")]
    pub day_one_remap: Vec<RemapRule>,

    /// Weight of the current season in the prior-season blend. 1.0 means
    /// priors are ignored.
    #[serde(default = "default_blend_weight")]
    pub blend_weight: f64,

    /// Rating substituted for unfilled or unrated roster slots.
    #[serde(default = "default_slot_rating")]
    pub default_slot_rating: f64,
}

fn default_lobby_bonus() -> BTreeMap<LobbyTier, f64> {
    // Tier 1 earns 81.92; every half-tier step down halves it, ending at
    // 0.02 for tier 7. Halving in f64 is exact, which keeps the "tier 2 is
    // exactly half of tier 1.5" property testable.
    let mut table = BTreeMap::new();
    let mut bonus = 81.92;
    for tenths in (10..=70).step_by(5) {
        let tier = LobbyTier::from_tenths(tenths).expect("static tier table");
        table.insert(tier, bonus);
        bonus /= 2.0;
    }
    table
}

fn default_day_one_remap() -> Vec<RemapRule> {
    let tier = |s: &str| s.parse::<LobbyTier>().expect("static remap table");
    vec![
        RemapRule {
            day: 1,
            from: tier("3"),
            to: tier("3.5"),
        },
        RemapRule {
            day: 1,
            from: tier("5"),
            to: tier("5.5"),
        },
    ]
}

fn default_blend_weight() -> f64 {
    1.0
}

fn default_slot_rating() -> f64 {
    80.0
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            lobby_bonus: default_lobby_bonus(),
            day_one_remap: default_day_one_remap(),
            blend_weight: default_blend_weight(),
            default_slot_rating: default_slot_rating(),
        }
    }
}

impl ScoringConfig {
    /// Bonus fraction for a lobby tier, if the table knows it.
    pub fn bonus_for(&self, tier: LobbyTier) -> Option<f64> {
        self.lobby_bonus.get(&tier).copied()
    }

    /// Lobby tier after applying the remap rules for the given day.
    pub fn effective_lobby(&self, day: u8, tier: LobbyTier) -> LobbyTier {
        self.day_one_remap
            .iter()
            .find(|rule| rule.day == day && rule.from == tier)
            .map(|rule| rule.to)
            .unwrap_or(tier)
    }
}

/// One division slot in the week's schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DivisionSlot {
    pub index: u32,
    pub day: ScheduleDay,
}

/// Division schedule configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// Division index -> scheduled day.
    #[serde(default = "default_divisions")]
    pub divisions: Vec<DivisionSlot>,

    /// Fixed per-division capacity. When absent it is derived as
    /// `total_teams / divisions.len()`, which must divide evenly.
    #[serde(default)]
    pub capacity: Option<usize>,
}

fn default_divisions() -> Vec<DivisionSlot> {
    use ScheduleDay::*;
    [
        (1, Thursday),
        (2, Wednesday),
        (3, Monday),
        (4, Thursday),
        (5, Monday),
        (6, Wednesday),
        (7, Monday),
    ]
    .into_iter()
    .map(|(index, day)| DivisionSlot { index, day })
    .collect()
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            divisions: default_divisions(),
            capacity: None,
        }
    }
}

fn default_tiers() -> Vec<TierThreshold> {
    [
        (600.0, "S"),
        (500.0, "A"),
        (400.0, "B"),
        (300.0, "C"),
        (0.0, "D"),
    ]
    .into_iter()
    .map(|(min_rating, label)| TierThreshold {
        min_rating,
        label: label.to_string(),
    })
    .collect()
}

/// Main engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub scoring: ScoringConfig,

    /// Descending threshold table mapping minimum rating to tier label.
    #[serde(default = "default_tiers")]
    pub tiers: Vec<TierThreshold>,

    #[serde(default)]
    pub schedule: ScheduleConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            scoring: ScoringConfig::default(),
            tiers: default_tiers(),
            schedule: ScheduleConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: EngineConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.scoring.lobby_bonus.is_empty() {
            return Err(ConfigError::ValidationError(
                "lobby bonus table must not be empty".to_string(),
            ));
        }

        // Bonus must strictly decrease as tier number increases; an
        // inverted table would reward weaker lobbies.
        let mut prev: Option<(LobbyTier, f64)> = None;
        for (&tier, &bonus) in &self.scoring.lobby_bonus {
            if bonus <= 0.0 {
                return Err(ConfigError::ValidationError(format!(
                    "lobby {} bonus must be positive, got {}",
                    tier, bonus
                )));
            }
            if let Some((prev_tier, prev_bonus)) = prev {
                if bonus >= prev_bonus {
                    return Err(ConfigError::ValidationError(format!(
                        "lobby bonus must decrease with tier number: lobby {} ({}) >= lobby {} ({})",
                        tier, bonus, prev_tier, prev_bonus
                    )));
                }
            }
            prev = Some((tier, bonus));
        }

        for rule in &self.scoring.day_one_remap {
            if !self.scoring.lobby_bonus.contains_key(&rule.to) {
                return Err(ConfigError::ValidationError(format!(
                    "remap target lobby {} is missing from the bonus table",
                    rule.to
                )));
            }
        }

        if !(0.0..=1.0).contains(&self.scoring.blend_weight) {
            return Err(ConfigError::ValidationError(format!(
                "blend weight must be within [0, 1], got {}",
                self.scoring.blend_weight
            )));
        }

        if self.tiers.is_empty() {
            return Err(ConfigError::ValidationError(
                "tier threshold table must not be empty".to_string(),
            ));
        }
        let lowest = self
            .tiers
            .iter()
            .map(|t| t.min_rating)
            .fold(f64::INFINITY, f64::min);
        if lowest > 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "lowest tier threshold must be <= 0 so every team gets a tier, got {}",
                lowest
            )));
        }

        if self.schedule.divisions.is_empty() {
            return Err(ConfigError::ValidationError(
                "schedule must declare at least one division".to_string(),
            ));
        }
        let mut seen = std::collections::BTreeSet::new();
        for slot in &self.schedule.divisions {
            if !seen.insert(slot.index) {
                return Err(ConfigError::ValidationError(format!(
                    "duplicate division index {} in schedule",
                    slot.index
                )));
            }
        }
        if let Some(capacity) = self.schedule.capacity {
            if capacity == 0 {
                return Err(ConfigError::ValidationError(
                    "division capacity must be greater than 0".to_string(),
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_bonus_table_halves_per_step() {
        let config = ScoringConfig::default();
        let tier = |s: &str| s.parse::<LobbyTier>().unwrap();
        assert_eq!(config.bonus_for(tier("1")), Some(81.92));
        assert_eq!(config.bonus_for(tier("1.5")), Some(40.96));
        assert_eq!(config.bonus_for(tier("7")), Some(0.02));
        // Each step is exactly half of the previous one.
        assert_eq!(
            config.bonus_for(tier("2")).unwrap() * 2.0,
            config.bonus_for(tier("1.5")).unwrap()
        );
    }

    #[test]
    fn test_default_day_one_remap() {
        let config = ScoringConfig::default();
        let tier = |s: &str| s.parse::<LobbyTier>().unwrap();
        assert_eq!(config.effective_lobby(1, tier("3")), tier("3.5"));
        assert_eq!(config.effective_lobby(1, tier("5")), tier("5.5"));
        // Only Day 1 is remapped, and only the colliding labels.
        assert_eq!(config.effective_lobby(2, tier("3")), tier("3"));
        assert_eq!(config.effective_lobby(1, tier("4")), tier("4"));
    }

    #[test]
    fn test_validation_rejects_bad_blend_weight() {
        let mut config = EngineConfig::default();
        config.scoring.blend_weight = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_increasing_bonus() {
        let mut config = EngineConfig::default();
        let tier: LobbyTier = "6".parse().unwrap();
        config.scoring.lobby_bonus.insert(tier, 999.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_non_total_tier_table() {
        let mut config = EngineConfig::default();
        config.tiers = vec![TierThreshold {
            min_rating: 100.0,
            label: "S".to_string(),
        }];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_remap_outside_bonus_table() {
        let mut config = EngineConfig::default();
        config.scoring.day_one_remap.push(RemapRule {
            day: 1,
            from: "2".parse().unwrap(),
            to: "2.5".parse().unwrap(),
        });
        config
            .scoring
            .lobby_bonus
            .remove(&"2.5".parse::<LobbyTier>().unwrap());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_duplicate_division_index() {
        let mut config = EngineConfig::default();
        config.schedule.divisions.push(DivisionSlot {
            index: 1,
            day: ScheduleDay::Friday,
        });
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_toml_round_trip() {
        let config = EngineConfig::default();
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: EngineConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.scoring.lobby_bonus, config.scoring.lobby_bonus);
        assert_eq!(parsed.tiers.len(), config.tiers.len());
        assert!(parsed.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let parsed: EngineConfig = toml::from_str(
            r#"
            [scoring]
            blend_weight = 0.6
            "#,
        )
        .unwrap();
        assert_eq!(parsed.scoring.blend_weight, 0.6);
        assert_eq!(parsed.scoring.default_slot_rating, 80.0);
        assert_eq!(parsed.schedule.divisions.len(), 7);
    }
}
