//! Starting lineup and armband selection.
//!
//! Slots are filled in template order; each takes the best-ranked squad
//! member its category set allows. There is no backtracking, so a strong
//! early pick can leave a later slot without candidates, which is reported
//! as [`FplError::InfeasibleLineup`].

use std::collections::HashSet;

use tracing::debug;

use crate::{
    cli::types::Position::{self, Defender, Forward, Goalkeeper, Midfielder},
    fpl::types::{Element, LineupPick, LineupRequest, Pick},
    FplError, Result,
};

use super::{index_elements, rank_order};

pub const SQUAD_SIZE: usize = 15;

/// Categories each slot accepts; slots 1-11 start, 12-15 are the bench.
pub const SLOT_TEMPLATE: [&[Position]; SQUAD_SIZE] = [
    &[Goalkeeper],
    &[Defender],
    &[Defender],
    &[Defender],
    &[Defender, Midfielder],
    &[Midfielder],
    &[Midfielder],
    &[Midfielder],
    &[Midfielder, Forward],
    &[Midfielder, Forward],
    &[Forward],
    &[Goalkeeper],
    &[Defender, Midfielder],
    &[Defender, Midfielder, Forward],
    &[Midfielder, Forward],
];

/// Build the `my-team/{id}/` payload for a 15-player squad.
///
/// The captain is the best-ranked player; the vice-captain is the best-ranked
/// player from a different club.
pub fn pick_lineup(squad: &[Pick], elements: &[Element]) -> Result<LineupRequest> {
    if squad.len() != SQUAD_SIZE {
        return Err(FplError::SquadSize {
            expected: SQUAD_SIZE,
            found: squad.len(),
        });
    }
    let mut seen = HashSet::with_capacity(SQUAD_SIZE);
    if let Some(pick) = squad.iter().find(|p| !seen.insert(p.element)) {
        return Err(FplError::DuplicateElement { id: pick.element });
    }

    let by_id = index_elements(elements);
    let mut members = squad
        .iter()
        .map(|p| {
            by_id
                .get(&p.element)
                .copied()
                .ok_or(FplError::UnknownElement { id: p.element })
        })
        .collect::<Result<Vec<&Element>>>()?;
    members.sort_by(|a, b| rank_order(a, b));

    let mut used = vec![false; members.len()];
    let mut order = Vec::with_capacity(SQUAD_SIZE);
    for (idx, accepts) in SLOT_TEMPLATE.iter().enumerate() {
        let chosen = members
            .iter()
            .enumerate()
            .find(|(i, e)| !used[*i] && accepts.contains(&e.position))
            .map(|(i, _)| i)
            .ok_or_else(|| FplError::InfeasibleLineup {
                slot: idx + 1,
                accepts: describe(accepts),
            })?;
        used[chosen] = true;
        debug!(slot = idx + 1, element = %members[chosen].id, "assigned slot");
        order.push(members[chosen]);
    }

    let captain = members[0];
    let vice_captain = members
        .iter()
        .find(|e| e.id != captain.id && e.club != captain.club)
        .ok_or(FplError::NoViceCaptain)?;
    debug!(captain = %captain.id, vice_captain = %vice_captain.id, "chose armbands");

    let picks = order
        .iter()
        .enumerate()
        .map(|(slot, e)| LineupPick {
            element: e.id,
            is_captain: e.id == captain.id,
            is_vice_captain: e.id == vice_captain.id,
            position: (slot + 1) as u8,
        })
        .collect();

    Ok(LineupRequest { chip: None, picks })
}

fn describe(accepts: &[Position]) -> String {
    accepts
        .iter()
        .map(|p| p.to_string())
        .collect::<Vec<_>>()
        .join("/")
}
