//! Bulk dump of FPL data to disk.
//!
//! The driver walks every resource the configuration asks for, one request at
//! a time, and writes each one as soon as it arrives. A failure stops the run
//! but leaves the files already written in place. Element summaries take
//! their ids from general info, so it is fetched whenever either is enabled.

use chrono::Local;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::{
    cli::types::ElementId, config::DumpConfig, fpl::http::FplClient, storage::DumpWriter,
    Result,
};

/// What a finished run produced.
#[derive(Debug, Clone)]
pub struct DumpSummary {
    pub run_dir: PathBuf,
    pub files: Vec<PathBuf>,
}

pub struct DumpDriver {
    config: DumpConfig,
}

impl DumpDriver {
    pub fn new(config: DumpConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DumpConfig {
        &self.config
    }

    /// Run every configured fetch with `client`, writing under `config.output_dir`.
    pub async fn run(&self, client: &FplClient) -> Result<DumpSummary> {
        let mut writer = DumpWriter::create(&self.config.output_dir, &Local::now())?;
        info!(run_dir = %writer.run_dir().display(), "starting dump");

        let config = &self.config;

        let general = if config.info || config.elements {
            println!("Getting Info");
            Some(client.fetch_general_info().await?)
        } else {
            None
        };
        if let Some(general) = general.as_ref().filter(|_| config.info) {
            writer.write_json("info", general)?;
            writer.write_csv("info_elements", &general.elements)?;
        }

        if config.fixtures {
            println!("Getting Fixtures");
            let fixtures = client.fetch_fixtures().await?;
            writer.write_json("fixtures", &fixtures)?;
            writer.write_csv("fixtures", &fixtures)?;
        }

        if let Some(general) = general.as_ref().filter(|_| config.elements) {
            println!("Getting Elements");
            let element_ids: Vec<ElementId> = general.element_ids()?;
            let elements = client.fetch_elements(&element_ids).await?;
            writer.write_json("elements", &elements)?;
        }

        if config.game_weeks {
            println!("Getting Game Week");
            let gameweeks = client.fetch_all_gameweeks().await?;
            writer.write_json("game_week", &gameweeks)?;
        }

        if !config.managers.is_empty() {
            println!("Getting Managers");
            let managers = client.fetch_managers(&config.managers).await?;
            writer.write_json("managers", &managers)?;

            if config.manager_history {
                println!("Getting Managers History");
                let histories = client.fetch_manager_histories(&config.managers).await?;
                writer.write_json("managers_history", &histories)?;
            }
        }

        if !config.leagues.is_empty() {
            println!("Getting Leagues");
            let leagues = client
                .fetch_leagues(&config.leagues, config.all_standings)
                .await?;
            writer.write_json("leagues", &leagues)?;
        }

        if let Some(team_id) = config.my_team.filter(|_| config.can_fetch_my_team()) {
            println!("Getting My Team");
            let fetched = client
                .fetch_my_team(team_id, config.credentials.as_ref())
                .await?;
            super::common::report_auth(&fetched.auth);
            writer.write_json("my_team", &fetched)?;
        }

        let run_dir = writer.run_dir().to_path_buf();
        let files = writer.into_written();
        info!(run_dir = %run_dir.display(), files = files.len(), "dump complete");
        Ok(DumpSummary { run_dir, files })
    }
}

/// Handle the dump command
pub async fn handle_dump(config_path: Option<&Path>, verbose: bool) -> Result<()> {
    let config = DumpConfig::load(config_path)?;
    let client = config.client()?;
    let summary = DumpDriver::new(config).run(&client).await?;

    println!("✓ Dump written to {}", summary.run_dir.display());
    if verbose {
        for file in &summary.files {
            println!("  {}", file.display());
        }
    }
    Ok(())
}
