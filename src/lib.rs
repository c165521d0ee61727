//! Fantasy Premier League Data Library
//!
//! A Rust library for pulling data out of the Fantasy Premier League API and
//! acting on your own team.
//!
//! ## Features
//!
//! - **Data Retrieval**: General info, fixtures, player summaries, gameweek live
//!   stats, managers, manager histories and league standings
//! - **Tabular Normalization**: Every list-shaped payload becomes a [`fpl::table::Table`]
//! - **Transfers**: Pair incoming and outgoing players by position and build the request
//! - **Lineups**: Fill the 15 formation slots greedily and pick the armbands
//! - **Bulk Dumps**: Write a timestamped snapshot of everything to disk
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use fpl_data::{fpl::http::FplClient, team::pick_lineup, ManagerId};
//!
//! # async fn example() -> fpl_data::Result<()> {
//! let client = FplClient::new()?;
//! client.set_profile_cookie("<pl_profile cookie>")?;
//!
//! let team = client.fetch_my_team(ManagerId::new(4950591), None).await?;
//! let elements = client.fetch_general_info().await?.typed_elements()?;
//! let lineup = pick_lineup(&team.team.squad()?, &elements)?;
//! client.submit_picks(ManagerId::new(4950591), &lineup).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Environment Configuration
//!
//! The team commands authenticate with either a login or a session cookie:
//! ```bash
//! export FPL_EMAIL=me@example.com FPL_PASSWORD=...
//! export FPL_PROFILE_COOKIE=...
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod error;
pub mod fpl;
pub mod storage;
pub mod team;

// Re-export commonly used types
pub use cli::types::{ClubId, ElementId, Gameweek, LeagueId, ManagerId, Position};
pub use error::{FplError, Result};
pub use fpl::types::{Element, GeneralInfo, LineupRequest, MyTeam, Pick, TransferRequest};

pub const EMAIL_ENV_VAR: &str = "FPL_EMAIL";
pub const PASSWORD_ENV_VAR: &str = "FPL_PASSWORD";
pub const PROFILE_COOKIE_ENV_VAR: &str = "FPL_PROFILE_COOKIE";
