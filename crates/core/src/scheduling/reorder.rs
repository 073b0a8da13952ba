//! # Route Re-sequencer
//!
//! Reassigns appointment start times when a groomer reorders their daily
//! stop list. This is a slot swap, not a shift: the set of start times in
//! use before and after the operation is identical, only the
//! appointment-to-slot mapping changes. That makes a retry with the same
//! requested order idempotent, which is the recovery path when a per-row
//! persistence step fails partway (the storage layer gives no multi-row
//! transaction here).

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{GroomError, GroomResult};

/// One appointment's move within a reorder plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotAssignment {
    pub appointment_id: Uuid,
    pub old_start_at: DateTime<Utc>,
    pub new_start_at: DateTime<Utc>,
    pub changed: bool,
}

/// Compute the slot-swap plan for a caller-supplied stop order.
///
/// `current` holds each appointment's id and its start time as currently
/// booked. The original time-slot set is those starts sorted ascending;
/// slot `i` is assigned to `requested_order[i]`. Fails without producing a
/// plan when the requested order is not a permutation of the current ids.
pub fn plan_reorder(
    current: &[(Uuid, DateTime<Utc>)],
    requested_order: &[Uuid],
) -> GroomResult<Vec<SlotAssignment>> {
    if current.len() != requested_order.len() {
        return Err(GroomError::Validation(format!(
            "Reorder lists {} appointments but {} are scheduled",
            requested_order.len(),
            current.len()
        )));
    }

    let current_ids: HashSet<Uuid> = current.iter().map(|(id, _)| *id).collect();
    let requested_ids: HashSet<Uuid> = requested_order.iter().copied().collect();
    if requested_ids.len() != requested_order.len() {
        return Err(GroomError::Validation(
            "Reorder contains duplicate appointment ids".to_string(),
        ));
    }
    if current_ids != requested_ids {
        return Err(GroomError::Validation(
            "Reorder must reference exactly the appointments scheduled for the day".to_string(),
        ));
    }

    // The slot set is the current starts, ascending.
    let mut slot_times: Vec<DateTime<Utc>> = current.iter().map(|(_, start)| *start).collect();
    slot_times.sort();

    let assignments = requested_order
        .iter()
        .zip(slot_times.iter())
        .map(|(id, new_start)| {
            let old_start = current
                .iter()
                .find(|(cid, _)| cid == id)
                .map(|(_, start)| *start)
                .expect("requested id verified against current set");
            SlotAssignment {
                appointment_id: *id,
                old_start_at: old_start,
                new_start_at: *new_start,
                changed: old_start != *new_start,
            }
        })
        .collect();

    Ok(assignments)
}
