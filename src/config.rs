//! Configuration for bulk dump runs.
//!
//! Values come from (lowest to highest precedence) built-in defaults, an
//! optional TOML file, and `FPL_*` environment variables
//! (`FPL_MANAGERS=1,2`, `FPL_MY_TEAM=4950591`, `FPL_CREDENTIALS__EMAIL=...`).
//! `FPL_PROFILE_COOKIE` doubles as the dump's `profile_cookie`.

use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::{
    cli::types::{LeagueId, ManagerId},
    fpl::{
        http::{FplClient, FPL_API_URL, FPL_LOGIN_URL},
        types::Credentials,
    },
    Result,
};

pub const DEFAULT_OUTPUT_DIR: &str = "data";

#[derive(Debug, Clone, Deserialize)]
pub struct DumpConfig {
    /// General info (`bootstrap-static/`) and its element table as CSV.
    pub info: bool,
    pub fixtures: bool,
    /// One `element-summary/` request per element in general info.
    pub elements: bool,
    /// Live stats for all 38 gameweeks.
    pub game_weeks: bool,
    /// Managers whose entry and history are dumped.
    #[serde(default)]
    pub managers: Vec<ManagerId>,
    /// Classic leagues whose standings are dumped.
    #[serde(default)]
    pub leagues: Vec<LeagueId>,
    /// Also dump each manager's history; needs `managers`.
    pub manager_history: bool,
    /// Follow standings pagination to the last page.
    #[serde(default)]
    pub all_standings: bool,
    /// Own team id; dumped only when credentials or a profile cookie are set.
    #[serde(default)]
    pub my_team: Option<ManagerId>,
    #[serde(default)]
    pub credentials: Option<Credentials>,
    #[serde(default)]
    pub profile_cookie: Option<String>,
    pub output_dir: PathBuf,
    pub api_url: String,
    pub login_url: String,
}

impl DumpConfig {
    /// Load defaults, then `path` if given, then the environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder()
            .set_default("info", true)?
            .set_default("fixtures", true)?
            .set_default("elements", true)?
            .set_default("game_weeks", true)?
            .set_default("manager_history", true)?
            .set_default("output_dir", DEFAULT_OUTPUT_DIR)?
            .set_default("api_url", FPL_API_URL)?
            .set_default("login_url", FPL_LOGIN_URL)?;

        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(true));
        }

        let settings = builder
            .add_source(
                Environment::with_prefix("FPL")
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("managers")
                    .with_list_parse_key("leagues")
                    .try_parsing(true),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Whether the own team can be fetched with this configuration.
    pub fn can_fetch_my_team(&self) -> bool {
        self.my_team.is_some() && (self.credentials.is_some() || self.profile_cookie.is_some())
    }

    /// Client for the configured endpoints, with the profile cookie installed.
    pub fn client(&self) -> Result<FplClient> {
        let client = FplClient::with_urls(&self.api_url, &self.login_url)?;
        if let Some(cookie) = &self.profile_cookie {
            client.set_profile_cookie(cookie)?;
        }
        Ok(client)
    }
}
