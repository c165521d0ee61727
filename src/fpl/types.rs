use crate::cli::types::{ClubId, ElementId, Gameweek, ManagerId, Position};
use crate::fpl::table::Table;
use crate::FplError;
use serde::{de::Error, Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;


/// `ep_next` and friends arrive as decimal strings (`"4.5"`), occasionally as
/// numbers, and as `null` before a gameweek is scheduled. Non-finite values
/// read as `None`.
fn de_opt_f64_from_str<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::Number(n) => Ok(n.as_f64()),
        Value::String(s) if s.trim().is_empty() => Ok(None),
        // `"NaN"` and `"inf"` parse as f64 but carry no ranking value.
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map(|f| f.is_finite().then_some(f))
            .map_err(D::Error::custom),
        other => Err(D::Error::custom(format!(
            "expected a decimal string or number, got {other}"
        ))),
    }
}

/// Player row from `bootstrap-static/` (`elements`).
///
/// Only the fields the team tools rely on are typed; the full row stays
/// available in [`GeneralInfo::elements`].
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Element {
    pub id: ElementId,
    #[serde(rename = "element_type")]
    pub position: Position,
    #[serde(rename = "team")]
    pub club: ClubId,
    /// Price in tenths of a million (`45` is 4.5m).
    pub now_cost: u32,
    #[serde(deserialize_with = "de_opt_f64_from_str", default)]
    pub ep_next: Option<f64>,
    #[serde(default)]
    pub total_points: i32,
    #[serde(default)]
    pub web_name: Option<String>,
}

/// One of the 15 picks in `my-team/{id}/`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Pick {
    pub element: ElementId,
    pub position: u8,
    pub selling_price: u32,
    pub purchase_price: u32,
    #[serde(default)]
    pub multiplier: u8,
    #[serde(default)]
    pub is_captain: bool,
    #[serde(default)]
    pub is_vice_captain: bool,
}

/// Normalized `bootstrap-static/` payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneralInfo {
    pub events: Table,
    pub phases: Table,
    pub teams: Table,
    pub elements: Table,
    pub element_types: Table,
    /// Every other top-level key (`game_settings`, `total_players`, ...).
    pub extra: Map<String, Value>,
}

impl GeneralInfo {
    /// Typed view of the element table.
    pub fn typed_elements(&self) -> crate::Result<Vec<Element>> {
        self.elements.deserialize_rows()
    }

    /// Ids of the element table, read from the `id` column alone so rows
    /// outside the typed [`Element`] schema still count.
    pub fn element_ids(&self) -> crate::Result<Vec<ElementId>> {
        self.elements
            .column("id")
            .enumerate()
            .map(|(row, id)| -> crate::Result<ElementId> {
                let id = id.ok_or_else(|| {
                    FplError::shape("bootstrap-static.elements", format!("row {row} has no `id`"))
                })?;
                Ok(ElementId::deserialize(id)?)
            })
            .collect()
    }
}

/// Standings of one classic league.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeagueStandings {
    /// Raw `league` object (name, created, admin_entry, ...).
    pub league: Value,
    pub new_entries: Table,
    pub standings: Table,
}

/// Normalized `my-team/{id}/` payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MyTeam {
    pub picks: Table,
    pub chips: Table,
    /// Raw transfer state (`bank`, `limit`, `made`, `value`, ...).
    pub transfers: Value,
}

impl MyTeam {
    /// Typed view of the squad picks.
    pub fn squad(&self) -> crate::Result<Vec<Pick>> {
        self.picks.deserialize_rows()
    }
}

/// Result of a login attempt.
///
/// A rejected login does not fail the calling operation; the session simply
/// stays anonymous and authenticated endpoints will refuse it later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthOutcome {
    Authenticated,
    Rejected { reason: String },
}

impl AuthOutcome {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthOutcome::Authenticated)
    }
}

/// Own-team fetch together with the login outcome, if a login was attempted.
#[derive(Debug, Clone, Serialize)]
pub struct MyTeamFetch {
    pub auth: Option<AuthOutcome>,
    pub team: MyTeam,
}

#[derive(Clone, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

/// One swap in a transfer request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    pub element_in: ElementId,
    pub element_out: ElementId,
    pub purchase_price: u32,
    pub selling_price: u32,
}

/// Body of `POST transfers/`.
///
/// ```json
/// {"chip": null, "entry": 4950591, "event": 1,
///  "transfers": [{"element_in": 275, "element_out": 482, "purchase_price": 45, "selling_price": 45}]}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferRequest {
    pub chip: Option<String>,
    pub entry: ManagerId,
    pub event: Gameweek,
    pub transfers: Vec<Transfer>,
}

/// One slot of a lineup submission; `position` is the 1-based slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineupPick {
    pub element: ElementId,
    pub is_captain: bool,
    pub is_vice_captain: bool,
    pub position: u8,
}

/// Body of `POST my-team/{id}/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineupRequest {
    pub chip: Option<String>,
    pub picks: Vec<LineupPick>,
}

/// Raw response of a submission, returned without validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmitResponse {
    pub status: u16,
    pub body: String,
}

impl SubmitResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
