//! HTTP client for the Fantasy Premier League API.
//!
//! Every fetch is one sequential request (or one per id / page) whose JSON is
//! decoded and reshaped into [`Table`]s. Nothing is cached: each call returns
//! whatever the API serves right now and the caller decides what to keep.

use std::collections::BTreeMap;
use std::sync::Arc;

use reqwest::{cookie::Jar, Client, Url};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::{
    cli::types::{ElementId, Gameweek, LeagueId, ManagerId},
    core::http::{login_headers, submission_headers, FPL_SITE_URL},
    fpl::{
        table::{kind_of, tables_by_key, Table},
        types::{
            AuthOutcome, Credentials, GeneralInfo, LeagueStandings, LineupRequest, MyTeam,
            MyTeamFetch, SubmitResponse, TransferRequest,
        },
    },
    FplError, Result,
};

#[cfg(test)]
mod tests;

/// Base path for the FPL REST API.
pub const FPL_API_URL: &str = "https://fantasy.premierleague.com/api";

/// Login form endpoint.
pub const FPL_LOGIN_URL: &str = "https://users.premierleague.com/accounts/login/";

/// Name of the session cookie that can stand in for a login.
pub const PROFILE_COOKIE_NAME: &str = "pl_profile";

/// Keys of `bootstrap-static/` that are shaped as tables.
const INFO_TABLES: [&str; 5] = ["events", "phases", "teams", "elements", "element_types"];

/// Per-category tables of one resource (`history`, `fixtures`, ...).
pub type CategoryTables = BTreeMap<String, Table>;

/// Client holding one HTTP session (and its cookies) for the FPL API.
pub struct FplClient {
    http: Client,
    jar: Arc<Jar>,
    base_url: String,
    login_url: String,
}

impl FplClient {
    /// Client against the public API.
    pub fn new() -> Result<Self> {
        Self::with_urls(FPL_API_URL, FPL_LOGIN_URL)
    }

    /// Client against custom endpoints (mirrors, mock servers).
    pub fn with_urls(base_url: &str, login_url: &str) -> Result<Self> {
        let jar = Arc::new(Jar::default());
        let http = Client::builder()
            .user_agent(concat!("fpl-data/", env!("CARGO_PKG_VERSION")))
            .cookie_provider(jar.clone())
            .build()?;

        Ok(Self {
            http,
            jar,
            base_url: base_url.trim_end_matches('/').to_string(),
            login_url: login_url.to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Install a pre-obtained `pl_profile` session cookie instead of logging in.
    pub fn set_profile_cookie(&self, cookie: &str) -> Result<()> {
        let url = Url::parse(&self.base_url)?;
        self.jar
            .add_cookie_str(&format!("{PROFILE_COOKIE_NAME}={cookie}"), &url);
        debug!(host = url.host_str().unwrap_or_default(), "installed profile cookie");
        Ok(())
    }

    async fn get_json(&self, path: &str, query: &[(&str, String)]) -> Result<Value> {
        let url = format!("{}/{}", self.base_url, path);
        debug!(url = %url, ?query, "GET");

        let bytes = self
            .http
            .get(&url)
            .query(query)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;

        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn post_json<T: Serialize>(
        &self,
        path: &str,
        body: &T,
        referer: &str,
    ) -> Result<SubmitResponse> {
        let url = format!("{}/{}", self.base_url, path);
        let payload = serde_json::to_string(body)?;
        info!(url = %url, payload = %payload, "POST");

        let response = self
            .http
            .post(&url)
            .headers(submission_headers(referer)?)
            .body(payload)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        debug!(status, "submission answered");
        Ok(SubmitResponse { status, body })
    }

    /// `bootstrap-static/`: events, phases, teams, elements and element types.
    pub async fn fetch_general_info(&self) -> Result<GeneralInfo> {
        let object = match self.get_json("bootstrap-static/", &[]).await? {
            Value::Object(object) => object,
            other => {
                return Err(FplError::shape(
                    "bootstrap-static",
                    format!("expected an object, got {}", kind_of(&other)),
                ))
            }
        };

        let mut general = GeneralInfo::default();
        for (key, value) in object {
            if !INFO_TABLES.contains(&key.as_str()) {
                general.extra.insert(key, value);
                continue;
            }
            let table = Table::from_records(&format!("bootstrap-static.{key}"), value)?;
            match key.as_str() {
                "events" => general.events = table,
                "phases" => general.phases = table,
                "teams" => general.teams = table,
                "elements" => general.elements = table,
                _ => general.element_types = table,
            }
        }

        info!(
            elements = general.elements.len(),
            teams = general.teams.len(),
            events = general.events.len(),
            "fetched general info"
        );
        Ok(general)
    }

    pub async fn fetch_fixtures(&self) -> Result<Table> {
        let value = self.get_json("fixtures/", &[]).await?;
        let fixtures = Table::from_records("fixtures", value)?;
        info!(fixtures = fixtures.len(), "fetched fixtures");
        Ok(fixtures)
    }

    /// `element-summary/{id}/`: fixtures, history and past seasons of one player.
    pub async fn fetch_element(&self, element_id: ElementId) -> Result<CategoryTables> {
        let value = self
            .get_json(&format!("element-summary/{element_id}/"), &[])
            .await?;
        tables_by_key(&format!("element-summary {element_id}"), value)
    }

    /// One request per id, in the order given. The first failure aborts the batch.
    pub async fn fetch_elements(
        &self,
        element_ids: &[ElementId],
    ) -> Result<BTreeMap<ElementId, CategoryTables>> {
        let mut out = BTreeMap::new();
        for &id in element_ids {
            out.insert(id, self.fetch_element(id).await?);
        }
        info!(elements = out.len(), "fetched element summaries");
        Ok(out)
    }

    /// `event/{gw}/live/`: live stats of every element in one gameweek.
    pub async fn fetch_gameweek_live(&self, gameweek: Gameweek) -> Result<Table> {
        let mut value = self
            .get_json(&format!("event/{gameweek}/live/"), &[])
            .await?;
        let resource = format!("event {gameweek} live");
        let elements = take_key(&mut value, "elements", &resource)?;
        Table::from_records(&resource, elements)
    }

    /// Live stats for gameweeks 1 through 38.
    pub async fn fetch_all_gameweeks(&self) -> Result<BTreeMap<Gameweek, Table>> {
        let mut out = BTreeMap::new();
        for gameweek in Gameweek::all() {
            out.insert(gameweek, self.fetch_gameweek_live(gameweek).await?);
        }
        info!(gameweeks = out.len(), "fetched gameweek live stats");
        Ok(out)
    }

    /// `entry/{id}/` as a one-row table.
    pub async fn fetch_manager(&self, manager_id: ManagerId) -> Result<Table> {
        let value = self.get_json(&format!("entry/{manager_id}/"), &[]).await?;
        Table::from_record(&format!("entry {manager_id}"), value)
    }

    pub async fn fetch_managers(
        &self,
        manager_ids: &[ManagerId],
    ) -> Result<BTreeMap<ManagerId, Table>> {
        let mut out = BTreeMap::new();
        for &id in manager_ids {
            out.insert(id, self.fetch_manager(id).await?);
        }
        info!(managers = out.len(), "fetched managers");
        Ok(out)
    }

    /// `entry/{id}/history/`: current season, past seasons and chips.
    pub async fn fetch_manager_history(&self, manager_id: ManagerId) -> Result<CategoryTables> {
        let value = self
            .get_json(&format!("entry/{manager_id}/history/"), &[])
            .await?;
        tables_by_key(&format!("entry {manager_id} history"), value)
    }

    pub async fn fetch_manager_histories(
        &self,
        manager_ids: &[ManagerId],
    ) -> Result<BTreeMap<ManagerId, CategoryTables>> {
        let mut out = BTreeMap::new();
        for &id in manager_ids {
            out.insert(id, self.fetch_manager_history(id).await?);
        }
        info!(managers = out.len(), "fetched manager histories");
        Ok(out)
    }

    async fn fetch_standings_page(&self, league_id: LeagueId, page: u32) -> Result<Value> {
        self.get_json(
            &format!("leagues-classic/{league_id}/standings/"),
            &[("page_standings", page.to_string())],
        )
        .await
    }

    /// Classic league standings.
    ///
    /// With `all_pages`, pages 2, 3, ... are requested in order and their rows
    /// appended until `standings.has_next` is falsy. Only the first page of
    /// new entries is kept.
    pub async fn fetch_league(&self, league_id: LeagueId, all_pages: bool) -> Result<LeagueStandings> {
        let resource = format!("league {league_id}");
        let mut page = 1;
        let mut value = self.fetch_standings_page(league_id, page).await?;

        let league = take_key(&mut value, "league", &resource)?;
        let mut new_entries_obj = take_key(&mut value, "new_entries", &resource)?;
        let new_entries = Table::from_records(
            &format!("{resource} new_entries"),
            take_key(&mut new_entries_obj, "results", &resource)?,
        )?;
        let (mut standings, mut has_next) = standings_page(&resource, value)?;

        if all_pages {
            while has_next {
                page += 1;
                let value = self.fetch_standings_page(league_id, page).await?;
                let (rows, more) = standings_page(&resource, value)?;
                if rows.is_empty() && more {
                    return Err(FplError::shape(
                        resource,
                        format!("page {page} has no rows but reports another page"),
                    ));
                }
                debug!(league = %league_id, page, rows = rows.len(), "fetched standings page");
                standings.extend(rows);
                has_next = more;
            }
        }

        info!(league = %league_id, pages = page, rows = standings.len(), "fetched league standings");
        Ok(LeagueStandings {
            league,
            new_entries,
            standings,
        })
    }

    pub async fn fetch_leagues(
        &self,
        league_ids: &[LeagueId],
        all_pages: bool,
    ) -> Result<BTreeMap<LeagueId, LeagueStandings>> {
        let mut out = BTreeMap::new();
        for &id in league_ids {
            out.insert(id, self.fetch_league(id, all_pages).await?);
        }
        Ok(out)
    }

    /// Form login against the accounts service.
    ///
    /// The service redirects back to the site with `state=success` on the
    /// final URL when the credentials were accepted. Anything else is a
    /// rejection; the session then stays anonymous.
    pub async fn login(&self, credentials: &Credentials) -> Result<AuthOutcome> {
        let redirect_uri = format!("{FPL_SITE_URL}/");
        let form = [
            ("login", credentials.email.as_str()),
            ("password", credentials.password.as_str()),
            ("app", "plfpl-web"),
            ("redirect_uri", redirect_uri.as_str()),
        ];

        debug!(url = %self.login_url, email = %credentials.email, "POST login");
        let response = self
            .http
            .post(&self.login_url)
            .headers(login_headers())
            .form(&form)
            .send()
            .await?;

        let outcome = login_outcome(response.status().as_u16(), response.url());
        match &outcome {
            AuthOutcome::Authenticated => info!(email = %credentials.email, "logged in"),
            AuthOutcome::Rejected { reason } => warn!(%reason, "login rejected"),
        }
        Ok(outcome)
    }

    /// `my-team/{id}/`, logging in first when credentials are given.
    pub async fn fetch_my_team(
        &self,
        team_id: ManagerId,
        credentials: Option<&Credentials>,
    ) -> Result<MyTeamFetch> {
        let auth = match credentials {
            Some(credentials) => Some(self.login(credentials).await?),
            None => None,
        };

        let resource = format!("my-team {team_id}");
        let mut value = self.get_json(&format!("my-team/{team_id}/"), &[]).await?;
        let picks = Table::from_records(
            &format!("{resource} picks"),
            take_key(&mut value, "picks", &resource)?,
        )?;
        let chips = Table::from_records(
            &format!("{resource} chips"),
            take_key(&mut value, "chips", &resource)?,
        )?;
        let transfers = take_key(&mut value, "transfers", &resource)?;

        info!(team = %team_id, picks = picks.len(), "fetched my team");
        Ok(MyTeamFetch {
            auth,
            team: MyTeam {
                picks,
                chips,
                transfers,
            },
        })
    }

    /// Submit a transfer request. The raw response is returned unvalidated.
    pub async fn submit_transfers(&self, request: &TransferRequest) -> Result<SubmitResponse> {
        self.post_json("transfers/", request, &format!("{FPL_SITE_URL}/transfers"))
            .await
    }

    /// Submit a lineup for `team_id`. The raw response is returned unvalidated.
    pub async fn submit_picks(
        &self,
        team_id: ManagerId,
        request: &LineupRequest,
    ) -> Result<SubmitResponse> {
        self.post_json(
            &format!("my-team/{team_id}/"),
            request,
            &format!("{FPL_SITE_URL}/my-team"),
        )
        .await
    }
}

/// Remove `key` from a JSON object, failing when it is absent.
fn take_key(value: &mut Value, key: &str, resource: &str) -> Result<Value> {
    value
        .as_object_mut()
        .and_then(|object| object.remove(key))
        .ok_or_else(|| FplError::shape(resource, format!("missing `{key}`")))
}

/// Rows and continuation flag of one standings page.
fn standings_page(resource: &str, mut value: Value) -> Result<(Table, bool)> {
    let mut standings = take_key(&mut value, "standings", resource)?;
    let has_next = standings.get("has_next").map(is_truthy).unwrap_or(false);
    let rows = Table::from_records(
        &format!("{resource} standings"),
        take_key(&mut standings, "results", resource)?,
    )?;
    Ok((rows, has_next))
}

/// `has_next` has been served both as a boolean and as a page number.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

fn login_outcome(status: u16, final_url: &Url) -> AuthOutcome {
    let state = final_url
        .query_pairs()
        .find(|(k, _)| k == "state")
        .map(|(_, v)| v.into_owned());

    match state.as_deref() {
        Some("success") => AuthOutcome::Authenticated,
        Some(state) => AuthOutcome::Rejected {
            reason: format!("login state `{state}`"),
        },
        None => AuthOutcome::Rejected {
            reason: format!("HTTP {status} without a login state at {final_url}"),
        },
    }
}
