//! CLI argument definitions and parsing.

pub mod types;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use types::{ElementId, Gameweek, ManagerId};

#[derive(Debug, Parser)]
#[clap(name = "fpl-data", about = "Fantasy Premier League data CLI")]
pub struct FPL {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Dump general info, fixtures, elements, gameweeks, managers and leagues to disk.
    ///
    /// Managers, leagues and the own team come from the config file and
    /// `FPL_*` environment variables.
    Dump {
        /// TOML config file.
        #[clap(long, short)]
        config: Option<PathBuf>,

        /// List every file written.
        #[clap(long)]
        verbose: bool,
    },

    /// Show your current squad (login via `FPL_EMAIL`/`FPL_PASSWORD` or `FPL_PROFILE_COOKIE`).
    MyTeam {
        /// Your team (entry) ID.
        #[clap(long, short)]
        team_id: ManagerId,

        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },

    /// Build and submit transfers, pairing players by position.
    Transfer {
        /// Your team (entry) ID.
        #[clap(long, short)]
        team_id: ManagerId,

        /// Gameweek the transfers apply to.
        #[clap(long, short)]
        event: Gameweek,

        /// Element to bring in (repeatable): `--in 275 --in 310`.
        #[clap(long = "in", required = true)]
        elements_in: Vec<ElementId>,

        /// Element to sell (repeatable): `--out 482 --out 17`.
        #[clap(long = "out", required = true)]
        elements_out: Vec<ElementId>,

        /// Print the payload without submitting it.
        #[clap(long)]
        dry_run: bool,
    },

    /// Pick the starting lineup and armbands from the current squad.
    PickTeam {
        /// Your team (entry) ID.
        #[clap(long, short)]
        team_id: ManagerId,

        /// Print the payload without submitting it.
        #[clap(long)]
        dry_run: bool,
    },
}
