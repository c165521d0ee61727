//! Own team command implementation

use crate::{cli::types::ManagerId, fpl::types::MyTeam, Result};

use super::common::{client_from_env, credentials_from_env, report_auth};

/// Handle the my-team command
pub async fn handle_my_team(team_id: ManagerId, as_json: bool) -> Result<()> {
    let client = client_from_env()?;
    let credentials = credentials_from_env();
    let fetched = client.fetch_my_team(team_id, credentials.as_ref()).await?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&fetched)?);
        return Ok(());
    }

    report_auth(&fetched.auth);
    print_team(&fetched.team)?;
    Ok(())
}

fn print_team(team: &MyTeam) -> Result<()> {
    println!("{:>3}  {:>8}  {:>6}  {:>6}  ARMBAND", "POS", "ELEMENT", "SELL", "BUY");
    for pick in team.squad()? {
        let armband = if pick.is_captain {
            "C"
        } else if pick.is_vice_captain {
            "V"
        } else {
            ""
        };
        println!(
            "{:>3}  {:>8}  {:>6.1}  {:>6.1}  {}",
            pick.position,
            pick.element.as_u32(),
            pick.selling_price as f64 / 10.0,
            pick.purchase_price as f64 / 10.0,
            armband
        );
    }
    println!("Chips: {}", team.chips.len());
    println!("Transfers: {}", team.transfers);
    Ok(())
}
