//! Transfer request builder.
//!
//! Incoming and outgoing players are paired by position category: both lists
//! are sorted by id, split per category, and zipped in order. Every category
//! must have as many incoming as outgoing players.

use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use crate::{
    cli::types::{ElementId, Gameweek, ManagerId, Position},
    fpl::types::{Element, Pick, Transfer, TransferRequest},
    FplError, Result,
};

use super::index_elements;

/// Build the `transfers/` payload for `entry` in gameweek `event`.
///
/// Outgoing prices are the squad's `selling_price`; incoming prices are the
/// element's current `now_cost`. Transfers are emitted in ascending
/// `element_in` order.
pub fn build_transfers(
    entry: ManagerId,
    event: Gameweek,
    elements_in: &[ElementId],
    elements_out: &[ElementId],
    squad: &[Pick],
    elements: &[Element],
) -> Result<TransferRequest> {
    let incoming = sorted_unique(elements_in)?;
    let outgoing = sorted_unique(elements_out)?;

    let by_id = index_elements(elements);
    let selling: HashMap<ElementId, u32> =
        squad.iter().map(|p| (p.element, p.selling_price)).collect();

    let mut in_by_position: BTreeMap<Position, Vec<(ElementId, u32)>> = BTreeMap::new();
    for id in incoming {
        let element = by_id
            .get(&id)
            .ok_or(FplError::UnknownElement { id })?;
        in_by_position
            .entry(element.position)
            .or_default()
            .push((id, element.now_cost));
    }

    let mut out_by_position: BTreeMap<Position, Vec<(ElementId, u32)>> = BTreeMap::new();
    for id in outgoing {
        let price = *selling.get(&id).ok_or(FplError::NotInSquad { id })?;
        let element = by_id
            .get(&id)
            .ok_or(FplError::UnknownElement { id })?;
        out_by_position
            .entry(element.position)
            .or_default()
            .push((id, price));
    }

    let mut transfers = Vec::new();
    for position in Position::ALL {
        let ins = in_by_position.remove(&position).unwrap_or_default();
        let outs = out_by_position.remove(&position).unwrap_or_default();
        if ins.len() != outs.len() {
            return Err(FplError::UnbalancedTransfer {
                position,
                incoming: ins.len(),
                outgoing: outs.len(),
            });
        }
        for ((element_in, purchase_price), (element_out, selling_price)) in
            ins.into_iter().zip(outs)
        {
            debug!(%position, %element_in, %element_out, "paired transfer");
            transfers.push(Transfer {
                element_in,
                element_out,
                purchase_price,
                selling_price,
            });
        }
    }
    transfers.sort_by_key(|t| t.element_in);

    Ok(TransferRequest {
        chip: None,
        entry,
        event,
        transfers,
    })
}

fn sorted_unique(ids: &[ElementId]) -> Result<Vec<ElementId>> {
    let mut sorted = ids.to_vec();
    sorted.sort();
    if let Some(pair) = sorted.windows(2).find(|w| w[0] == w[1]) {
        return Err(FplError::DuplicateElement { id: pair[0] });
    }
    Ok(sorted)
}
