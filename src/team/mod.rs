//! Team-management logic: transfer pairing and lineup selection.
//!
//! Both builders are pure functions over already-fetched data. They produce
//! the request payloads that [`crate::fpl::http::FplClient`] submits.

pub mod lineup;
pub mod transfer;

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::{cli::types::ElementId, fpl::types::Element};

pub use lineup::{pick_lineup, SLOT_TEMPLATE, SQUAD_SIZE};
pub use transfer::build_transfers;

/// Ranking used for lineup slots and the armband: `ep_next`, then
/// `total_points`, then `now_cost`, all descending. A missing `ep_next` ranks
/// below every number. Equal keys fall back to ascending id.
pub fn rank_order(a: &Element, b: &Element) -> Ordering {
    let ep = |e: &Element| e.ep_next.unwrap_or(f64::NEG_INFINITY);
    ep(b)
        .total_cmp(&ep(a))
        .then_with(|| b.total_points.cmp(&a.total_points))
        .then_with(|| b.now_cost.cmp(&a.now_cost))
        .then_with(|| a.id.cmp(&b.id))
}

/// Index general-info elements by id.
pub fn index_elements(elements: &[Element]) -> HashMap<ElementId, &Element> {
    elements.iter().map(|e| (e.id, e)).collect()
}
