//! Lineup selection command implementation

use crate::{cli::types::ManagerId, team::pick_lineup, Result};

use super::common::{client_from_env, credentials_from_env, report_auth, TeamContext};

/// Handle the pick-team command
pub async fn handle_pick_team(team_id: ManagerId, dry_run: bool) -> Result<()> {
    let credentials = credentials_from_env();
    let ctx = TeamContext::load(client_from_env()?, team_id, credentials.as_ref()).await?;
    report_auth(&ctx.auth);

    let request = pick_lineup(&ctx.squad, &ctx.elements)?;
    println!("{}", serde_json::to_string(&request)?);

    if dry_run {
        println!("Dry run: lineup not submitted");
        return Ok(());
    }

    let response = ctx.client.submit_picks(ctx.team_id, &request).await?;
    println!("Response {}: {}", response.status, response.body);
    Ok(())
}
