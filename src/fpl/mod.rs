//! Fantasy Premier League API access: client, normalized tables and payload types.

pub mod http;
pub mod table;
pub mod types;
