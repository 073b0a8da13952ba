use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{GroomError, GroomResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BreakType {
    Lunch,
    Rest,
}

impl BreakType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BreakType::Lunch => "LUNCH",
            BreakType::Rest => "REST",
        }
    }

    pub fn parse(value: &str) -> GroomResult<Self> {
        match value {
            "LUNCH" => Ok(BreakType::Lunch),
            "REST" => Ok(BreakType::Rest),
            other => Err(GroomError::Validation(format!(
                "Unknown break type: {}",
                other
            ))),
        }
    }
}

/// A scheduled or ad-hoc rest period for a (groomer, date). Planned times
/// are optional; once the break is actually taken the `taken` flag is set
/// along with the actual start and duration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Break {
    pub id: Uuid,
    pub account_id: Uuid,
    pub groomer_id: Uuid,
    pub break_date: NaiveDate,
    pub break_type: BreakType,
    pub planned_start: Option<DateTime<Utc>>,
    pub planned_end: Option<DateTime<Utc>>,
    pub taken: bool,
    pub actual_start: Option<DateTime<Utc>>,
    pub actual_minutes: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBreakRequest {
    pub groomer_id: Uuid,
    pub date: String,
    pub break_type: BreakType,
    pub planned_start: Option<DateTime<Utc>>,
    pub planned_end: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkBreakTakenRequest {
    pub actual_start: DateTime<Utc>,
    pub actual_minutes: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreakSummaryResponse {
    pub breaks_taken: usize,
    pub total_break_minutes: i64,
    pub last_break_at: Option<DateTime<Utc>>,
    pub suggestion: Option<crate::scheduling::breaks::BreakSuggestion>,
}
