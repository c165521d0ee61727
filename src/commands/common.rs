//! Shared setup for the team commands.
//!
//! `transfer` and `pick-team` both need an authenticated client, the current
//! squad and the general-info element table before they can build a payload.

use crate::{
    cli::types::ManagerId,
    fpl::{
        http::FplClient,
        types::{AuthOutcome, Credentials, Element, MyTeam, Pick},
    },
    Result, EMAIL_ENV_VAR, PASSWORD_ENV_VAR, PROFILE_COOKIE_ENV_VAR,
};

/// Credentials from `FPL_EMAIL` and `FPL_PASSWORD`, when both are set.
pub fn credentials_from_env() -> Option<Credentials> {
    let email = std::env::var(EMAIL_ENV_VAR).ok()?;
    let password = std::env::var(PASSWORD_ENV_VAR).ok()?;
    Some(Credentials::new(email, password))
}

/// Client for the public API, carrying `FPL_PROFILE_COOKIE` if it is set.
pub fn client_from_env() -> Result<FplClient> {
    let client = FplClient::new()?;
    if let Ok(cookie) = std::env::var(PROFILE_COOKIE_ENV_VAR) {
        client.set_profile_cookie(&cookie)?;
    }
    Ok(client)
}

/// Context containing what the team commands work from
pub struct TeamContext {
    pub client: FplClient,
    pub team_id: ManagerId,
    pub auth: Option<AuthOutcome>,
    pub team: MyTeam,
    pub squad: Vec<Pick>,
    pub elements: Vec<Element>,
}

impl TeamContext {
    /// Fetch the own team (logging in if credentials are given), then general info.
    pub async fn load(
        client: FplClient,
        team_id: ManagerId,
        credentials: Option<&Credentials>,
    ) -> Result<Self> {
        let fetched = client.fetch_my_team(team_id, credentials).await?;
        let squad = fetched.team.squad()?;
        let elements = client.fetch_general_info().await?.typed_elements()?;

        Ok(Self {
            client,
            team_id,
            auth: fetched.auth,
            team: fetched.team,
            squad,
            elements,
        })
    }
}

/// Print the login outcome the way every command reports it.
pub fn report_auth(auth: &Option<AuthOutcome>) {
    match auth {
        Some(AuthOutcome::Authenticated) => println!("✓ Logged in"),
        Some(AuthOutcome::Rejected { reason }) => {
            println!("⚠ Login rejected ({reason}); continuing without a session")
        }
        None => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_from_env() {
        std::env::set_var(EMAIL_ENV_VAR, "me@example.com");
        std::env::remove_var(PASSWORD_ENV_VAR);
        assert!(credentials_from_env().is_none());

        std::env::set_var(PASSWORD_ENV_VAR, "secret");
        let creds = credentials_from_env().unwrap();
        assert_eq!(creds.email, "me@example.com");
        assert_eq!(creds.password, "secret");

        std::env::remove_var(EMAIL_ENV_VAR);
        std::env::remove_var(PASSWORD_ENV_VAR);
    }
}
