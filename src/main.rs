//! Entry point: parse CLI and dispatch to command handlers.

use clap::Parser;
use fpl_data::{
    cli::{Commands, FPL},
    commands::{
        dump::handle_dump,
        my_team::handle_my_team,
        pick_team::handle_pick_team,
        transfer::{handle_transfer, TransferParams},
    },
    Result,
};
use tracing_subscriber::EnvFilter;

/// Run the CLI.
#[tokio::main]
async fn main() -> Result<()> {
    init_logging();
    let app = FPL::parse();

    match app.command {
        Commands::Dump { config, verbose } => handle_dump(config.as_deref(), verbose).await?,

        Commands::MyTeam { team_id, json } => handle_my_team(team_id, json).await?,

        Commands::Transfer {
            team_id,
            event,
            elements_in,
            elements_out,
            dry_run,
        } => {
            handle_transfer(TransferParams {
                team_id,
                event,
                elements_in,
                elements_out,
                dry_run,
            })
            .await?
        }

        Commands::PickTeam { team_id, dry_run } => handle_pick_team(team_id, dry_run).await?,
    }

    Ok(())
}

fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn,fpl_data=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
