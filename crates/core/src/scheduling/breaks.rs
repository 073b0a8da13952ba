//! # Break Suggestion Engine
//!
//! Derives a recommended rest break from elapsed work time, cumulative
//! physical load, and time since the last break. Load is approximated by
//! the total pet weight groomed since the last break rather than wall-clock
//! time alone: hauling a string of ninety-pound dogs in and out of a van is
//! a different day than the same hours of small breeds.
//!
//! Everything here is a pure function of the appointment list up to "now"
//! and the breaks already taken, so it can be exercised with synthetic
//! fixtures.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::breaks::{Break, BreakType};

/// Thresholds for when a break is suggested. Exposed as configuration
/// rather than baked in; `Default` carries the product's standard policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreakPolicy {
    /// Worked minutes after which a lunch is due, once per day.
    pub lunch_after_work_minutes: i64,
    /// Cumulative pet weight since the last break that triggers a rest.
    pub rest_after_weight_lbs: f64,
    /// Minutes since the last break (or since the first stop, when none has
    /// been taken) that trigger a rest.
    pub rest_after_minutes: i64,
    pub lunch_minutes: i32,
    pub rest_minutes: i32,
}

impl Default for BreakPolicy {
    fn default() -> Self {
        Self {
            lunch_after_work_minutes: 240,
            rest_after_weight_lbs: 150.0,
            rest_after_minutes: 180,
            lunch_minutes: 30,
            rest_minutes: 15,
        }
    }
}

/// One completed (or in-progress) stop, reduced to what the engine needs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorkedStop {
    pub start_at: DateTime<Utc>,
    pub service_minutes: i32,
    pub pet_weight_lbs: Option<f64>,
}

/// Aggregate view of the breaks taken so far today.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakStats {
    pub breaks_taken: usize,
    pub total_break_minutes: i64,
    pub last_break_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakSuggestion {
    pub break_type: BreakType,
    pub suggested_minutes: i32,
    pub reason: String,
}

/// Summarize the breaks actually taken (planned-but-untaken rows are
/// ignored). `last_break_at` is the most recent actual start.
pub fn summarize_breaks(breaks: &[Break]) -> BreakStats {
    let taken: Vec<&Break> = breaks.iter().filter(|b| b.taken).collect();
    let total_break_minutes = taken
        .iter()
        .map(|b| i64::from(b.actual_minutes.unwrap_or(0)))
        .sum();
    let last_break_at = taken.iter().filter_map(|b| b.actual_start).max();

    BreakStats {
        breaks_taken: taken.len(),
        total_break_minutes,
        last_break_at,
    }
}

/// Recommend the next break, if any is due at `now`.
///
/// Only stops that have already started count toward exertion. A lunch is
/// suggested once per day after enough worked minutes; otherwise a rest is
/// suggested when cumulative weight or elapsed time since the last break
/// crosses the policy thresholds. Returns None while neither is due.
pub fn suggest_break(
    stops: &[WorkedStop],
    breaks: &[Break],
    now: DateTime<Utc>,
    policy: &BreakPolicy,
) -> Option<BreakSuggestion> {
    let started: Vec<&WorkedStop> = stops.iter().filter(|s| s.start_at <= now).collect();
    let first_start = started.iter().map(|s| s.start_at).min()?;

    let stats = summarize_breaks(breaks);
    let since_anchor = stats.last_break_at.unwrap_or(first_start);

    let worked_minutes = (now - first_start).num_minutes() - stats.total_break_minutes;
    let minutes_since_break = (now - since_anchor).num_minutes();

    let lunch_taken = breaks
        .iter()
        .any(|b| b.taken && b.break_type == BreakType::Lunch);
    if !lunch_taken && worked_minutes >= policy.lunch_after_work_minutes {
        return Some(BreakSuggestion {
            break_type: BreakType::Lunch,
            suggested_minutes: policy.lunch_minutes,
            reason: format!(
                "{} minutes worked without a lunch",
                worked_minutes
            ),
        });
    }

    // Exertion since the last break: weight of every pet groomed at stops
    // starting after the anchor.
    let weight_since_break: f64 = started
        .iter()
        .filter(|s| s.start_at >= since_anchor)
        .filter_map(|s| s.pet_weight_lbs)
        .sum();

    if weight_since_break >= policy.rest_after_weight_lbs {
        return Some(BreakSuggestion {
            break_type: BreakType::Rest,
            suggested_minutes: policy.rest_minutes,
            reason: format!(
                "{:.0} lbs groomed since the last break",
                weight_since_break
            ),
        });
    }

    if minutes_since_break >= policy.rest_after_minutes {
        return Some(BreakSuggestion {
            break_type: BreakType::Rest,
            suggested_minutes: policy.rest_minutes,
            reason: format!("{} minutes since the last break", minutes_since_break),
        });
    }

    None
}

/// Convenience for handlers: stats plus suggestion in one call.
pub fn break_outlook(
    stops: &[WorkedStop],
    breaks: &[Break],
    now: DateTime<Utc>,
    policy: &BreakPolicy,
) -> (BreakStats, Option<BreakSuggestion>) {
    let stats = summarize_breaks(breaks);
    let suggestion = suggest_break(stops, breaks, now, policy);
    (stats, suggestion)
}
