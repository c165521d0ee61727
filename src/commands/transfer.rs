//! Transfer command implementation

use crate::{
    cli::types::{ElementId, Gameweek, ManagerId},
    team::build_transfers,
    Result,
};

use super::common::{client_from_env, credentials_from_env, report_auth, TeamContext};

/// Parameters for a transfer submission.
#[derive(Debug, Clone)]
pub struct TransferParams {
    pub team_id: ManagerId,
    pub event: Gameweek,
    pub elements_in: Vec<ElementId>,
    pub elements_out: Vec<ElementId>,
    /// Print the payload without submitting it.
    pub dry_run: bool,
}

/// Handle the transfer command
pub async fn handle_transfer(params: TransferParams) -> Result<()> {
    let credentials = credentials_from_env();
    let ctx = TeamContext::load(client_from_env()?, params.team_id, credentials.as_ref()).await?;
    report_auth(&ctx.auth);

    let request = build_transfers(
        ctx.team_id,
        params.event,
        &params.elements_in,
        &params.elements_out,
        &ctx.squad,
        &ctx.elements,
    )?;
    println!("{}", serde_json::to_string(&request)?);

    if params.dry_run {
        println!("Dry run: transfers not submitted");
        return Ok(());
    }

    let response = ctx.client.submit_transfers(&request).await?;
    println!("Response {}: {}", response.status, response.body);
    Ok(())
}
