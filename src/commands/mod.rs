//! Command implementations for the FPL data CLI

pub mod common;
pub mod dump;
pub mod my_team;
pub mod pick_team;
pub mod transfer;
