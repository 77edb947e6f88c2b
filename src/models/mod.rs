//! Core data models for the league engine.

mod division;
mod ids;
mod lobby;
mod match_day;
mod player;
mod team;

pub use division::*;
pub use ids::*;
pub use lobby::*;
pub use match_day::*;
pub use player::*;
pub use team::*;
