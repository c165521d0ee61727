//! Type-safe wrappers and enums for Fantasy Premier League data.

pub mod ids;
pub mod position;
pub mod time;

pub use ids::{ClubId, ElementId, LeagueId, ManagerId};
pub use position::Position;
pub use time::{Gameweek, MAX_GAMEWEEKS};
