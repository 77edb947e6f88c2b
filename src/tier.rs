//! Tier classification from team ratings.
//!
//! An ordered, descending threshold table is evaluated top-down; the first
//! threshold a rating meets or exceeds determines the tier. The table is
//! configuration, validated total at run start, so every team receives
//! exactly one tier.

use crate::config::TierThreshold;

/// A validated, descending tier threshold table.
#[derive(Debug, Clone)]
pub struct TierTable {
    thresholds: Vec<TierThreshold>,
}

impl TierTable {
    /// Build a table from config rows, sorting by threshold descending so
    /// classification is order-independent of the source file.
    pub fn new(mut thresholds: Vec<TierThreshold>) -> Self {
        thresholds.sort_by(|a, b| {
            b.min_rating
                .partial_cmp(&a.min_rating)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        Self { thresholds }
    }

    /// Classify a rating. The lowest row acts as a catch-all (threshold
    /// effectively negative infinity), so a label always comes back for a
    /// non-empty table.
    pub fn classify(&self, rating: f64) -> &str {
        for row in &self.thresholds {
            if rating >= row.min_rating {
                return &row.label;
            }
        }
        // Config validation requires the lowest threshold <= 0; anything
        // below it (e.g. a negative prior blend) still takes the lowest tier.
        &self
            .thresholds
            .last()
            .expect("tier table validated non-empty")
            .label
    }

    /// Rows in evaluation order (highest threshold first).
    pub fn rows(&self) -> &[TierThreshold] {
        &self.thresholds
    }
}
