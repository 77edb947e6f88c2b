//! # League Engine
//!
//! A deterministic rating and division assignment engine for multi-day
//! battle-royale league seasons.
//!
//! ## Architecture
//!
//! - **models**: Core data structures (match records, ratings, teams, divisions)
//! - **identity**: Alias resolution to canonical player names
//! - **rating**: Per-player scoring (day aggregation, lobby bonus, blending)
//! - **team**: Roster roll-up with default-substitution policy
//! - **tier**: Threshold-table tier classification
//! - **division**: Constrained partition of teams into scheduled divisions
//! - **engine**: Season pipeline orchestration
//! - **storage**: JSON input/output files
//! - **config**: Configuration loading and validation

pub mod config;
pub mod division;
pub mod engine;
pub mod errors;
pub mod identity;
pub mod models;
pub mod rating;
pub mod storage;
pub mod team;
pub mod tier;

pub use models::*;
