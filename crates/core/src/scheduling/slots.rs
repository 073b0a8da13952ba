//! # Slot / Conflict Engine
//!
//! Availability and overlap rules for appointment time windows. This module
//! is the single source of truth for "does this time fit": public booking
//! pages, internal conflict checks, and working-hours validation all go
//! through it.
//!
//! Intervals are half-open `[start, end)`: back-to-back appointments where
//! one ends exactly when the next begins do not conflict. When generating
//! *public* availability a travel/setup buffer is added after each existing
//! appointment's computed end before the overlap test; the buffer is
//! one-directional (after, never before).

use chrono::{DateTime, Duration, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Grid step between candidate slot starts.
pub const SLOT_STEP_MINUTES: i64 = 30;

/// Travel/setup buffer applied after existing appointments when offering
/// public slots.
pub const PUBLIC_SLOT_BUFFER_MINUTES: i64 = 15;

/// Bounds for a caller-supplied slot duration.
pub const MIN_SLOT_MINUTES: i64 = 30;
pub const MAX_SLOT_MINUTES: i64 = 180;
pub const DEFAULT_SLOT_MINUTES: i64 = 60;

/// An interval already on the books, reduced to what conflict math needs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OccupiedSlot {
    pub appointment_id: Uuid,
    pub start_at: DateTime<Utc>,
    pub service_minutes: i32,
}

impl OccupiedSlot {
    pub fn end_at(&self) -> DateTime<Utc> {
        self.start_at + Duration::minutes(i64::from(self.service_minutes))
    }
}

/// Half-open interval overlap: `[s1, e1)` and `[s2, e2)` conflict iff
/// `s1 < e2 && s2 < e1`. Touching endpoints do not conflict.
pub fn intervals_overlap(
    s1: DateTime<Utc>,
    e1: DateTime<Utc>,
    s2: DateTime<Utc>,
    e2: DateTime<Utc>,
) -> bool {
    s1 < e2 && s2 < e1
}

/// Whether a candidate interval collides with any occupied slot.
///
/// `buffer_minutes` extends each occupied slot's end before the test; pass
/// zero for internal checks and [`PUBLIC_SLOT_BUFFER_MINUTES`] for public
/// availability.
pub fn conflicts_with_any(
    candidate_start: DateTime<Utc>,
    duration_minutes: i64,
    occupied: &[OccupiedSlot],
    buffer_minutes: i64,
) -> bool {
    let candidate_end = candidate_start + Duration::minutes(duration_minutes);
    occupied.iter().any(|slot| {
        let slot_end = slot.end_at() + Duration::minutes(buffer_minutes);
        intervals_overlap(candidate_start, candidate_end, slot.start_at, slot_end)
    })
}

/// Clamp a requested duration into the supported range, defaulting when the
/// caller passed nothing.
pub fn clamp_duration(requested: Option<i64>) -> i64 {
    requested
        .unwrap_or(DEFAULT_SLOT_MINUTES)
        .clamp(MIN_SLOT_MINUTES, MAX_SLOT_MINUTES)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateSlot {
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotGrid {
    pub slots: Vec<CandidateSlot>,
    pub total_candidates: usize,
    pub available_count: usize,
    pub duration_minutes: i64,
}

/// Enumerate open slots for one groomer-day.
///
/// Candidates step every [`SLOT_STEP_MINUTES`] from `work_start_utc`
/// (inclusive); a candidate is offered only when it ends by `work_end_utc`
/// and does not collide with an occupied slot. The caller converts the
/// groomer's local working hours to UTC instants for the requested date
/// before calling in, so this stays timezone-agnostic.
pub fn generate_slots(
    work_start_utc: DateTime<Utc>,
    work_end_utc: DateTime<Utc>,
    duration_minutes: i64,
    occupied: &[OccupiedSlot],
    buffer_minutes: i64,
) -> SlotGrid {
    let mut slots = Vec::new();
    let mut total_candidates = 0;

    let mut candidate = work_start_utc;
    while candidate < work_end_utc {
        let end = candidate + Duration::minutes(duration_minutes);
        if end > work_end_utc {
            break;
        }
        total_candidates += 1;
        if !conflicts_with_any(candidate, duration_minutes, occupied, buffer_minutes) {
            slots.push(CandidateSlot {
                start_at: candidate,
                end_at: end,
            });
        }
        candidate += Duration::minutes(SLOT_STEP_MINUTES);
    }

    let available_count = slots.len();
    SlotGrid {
        slots,
        total_candidates,
        available_count,
        duration_minutes,
    }
}

/// Classification of a manually entered time against working hours. The
/// four outcomes are mutually exclusive and cover the whole input domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "classification", rename_all = "snake_case")]
pub enum HoursCheck {
    WithinHours,
    StartsBeforeOpen { minutes_outside: i64 },
    StartsAtOrAfterClose { minutes_outside: i64 },
    EndsAfterClose { minutes_outside: i64 },
}

/// Classify `time` (+ optional duration) against `[work_start, work_end)`.
pub fn classify_working_hours(
    time: NaiveTime,
    duration_minutes: Option<i64>,
    work_start: NaiveTime,
    work_end: NaiveTime,
) -> HoursCheck {
    if time < work_start {
        let outside = (work_start - time).num_minutes();
        return HoursCheck::StartsBeforeOpen {
            minutes_outside: outside,
        };
    }
    if time >= work_end {
        let outside = (time - work_end).num_minutes();
        return HoursCheck::StartsAtOrAfterClose {
            minutes_outside: outside,
        };
    }
    if let Some(duration) = duration_minutes {
        // Work in minutes-to-close so a duration that wraps past midnight
        // (NaiveTime arithmetic wraps) is still counted as past close.
        let minutes_to_close = (work_end - time).num_minutes();
        if duration > minutes_to_close {
            return HoursCheck::EndsAfterClose {
                minutes_outside: duration - minutes_to_close,
            };
        }
    }
    HoursCheck::WithinHours
}

/// Pets heavier than this count against the groomer's large-dog daily cap.
pub const LARGE_DOG_WEIGHT_LBS: f64 = 50.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LargeDogCapacity {
    pub large_dog_count: i32,
    pub limit: Option<i32>,
    pub at_limit: bool,
    pub over_limit: bool,
    /// Remaining large-dog slots for the day, floored at zero. None when
    /// the groomer has no cap.
    pub remaining_slots: Option<i32>,
}

/// Count large dogs already booked for the day against the groomer's cap.
///
/// `pet_weights` is one entry per non-cancelled appointment (the caller has
/// already excluded cancelled/no-show rows and, for edit flows, the
/// appointment being edited); None entries are appointments without a
/// linked pet.
pub fn large_dog_capacity(pet_weights: &[Option<f64>], limit: Option<i32>) -> LargeDogCapacity {
    let large_dog_count = pet_weights
        .iter()
        .filter(|w| matches!(w, Some(lbs) if *lbs > LARGE_DOG_WEIGHT_LBS))
        .count() as i32;

    match limit {
        Some(cap) => LargeDogCapacity {
            large_dog_count,
            limit: Some(cap),
            at_limit: large_dog_count >= cap,
            over_limit: large_dog_count > cap,
            remaining_slots: Some((cap - large_dog_count).max(0)),
        },
        None => LargeDogCapacity {
            large_dog_count,
            limit: None,
            at_limit: false,
            over_limit: false,
            remaining_slots: None,
        },
    }
}
