//! Lobby tier labels.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error parsing a lobby tier label.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid lobby tier: {0:?} (expected e.g. \"1\", \"3.5\", \"7\")")]
pub struct ParseLobbyTierError(pub String);

/// A discrete competitive-bracket label (1, 1.5, 2, …, 7).
///
/// Lower numbers denote higher-skill brackets. Tiers advance in half steps,
/// stored internally as tenths so the type stays `Eq`/`Ord`/`Hash` and usable
/// as a map key.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LobbyTier(u16);

impl LobbyTier {
    /// Build a tier from tenths (e.g. 35 for tier 3.5).
    ///
    /// Only whole and half steps are valid tiers.
    pub fn from_tenths(tenths: u16) -> Result<Self, ParseLobbyTierError> {
        if tenths == 0 || tenths % 5 != 0 {
            return Err(ParseLobbyTierError(format!("{}", tenths as f64 / 10.0)));
        }
        Ok(Self(tenths))
    }

    /// The tier value as a float (3.5 for lobby "3.5").
    pub fn as_f64(&self) -> f64 {
        f64::from(self.0) / 10.0
    }

    /// Whether this is a half-step tier (1.5, 2.5, …).
    pub fn is_half_step(&self) -> bool {
        self.0 % 10 != 0
    }
}

impl fmt::Display for LobbyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_half_step() {
            write!(f, "{}.5", self.0 / 10)
        } else {
            write!(f, "{}", self.0 / 10)
        }
    }
}

impl fmt::Debug for LobbyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LobbyTier({})", self)
    }
}

impl FromStr for LobbyTier {
    type Err = ParseLobbyTierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (whole, half) = match s.split_once('.') {
            None => (s, false),
            Some((w, "5")) => (w, true),
            Some((w, "0")) => (w, false),
            Some(_) => return Err(ParseLobbyTierError(s.to_string())),
        };
        let whole: u16 = whole
            .parse()
            .map_err(|_| ParseLobbyTierError(s.to_string()))?;
        Self::from_tenths(whole * 10 + if half { 5 } else { 0 })
    }
}

impl TryFrom<String> for LobbyTier {
    type Error = ParseLobbyTierError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<LobbyTier> for String {
    fn from(tier: LobbyTier) -> Self {
        tier.to_string()
    }
}
