use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One (groomer, calendar date) workday record. Created lazily the first
/// time either fact below is recorded for that date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteDay {
    pub groomer_id: Uuid,
    pub route_date: NaiveDate,
    pub day_started: bool,
    pub has_assistant: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpsertRouteDayRequest {
    pub groomer_id: Uuid,
    pub date: String,
    pub day_started: Option<bool>,
    pub has_assistant: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReorderRouteRequest {
    pub groomer_id: Uuid,
    pub date: String,
    pub ordered_appointment_ids: Vec<Uuid>,
}

/// Outcome of one appointment within a reorder. `changed` is false when the
/// appointment kept the slot it already occupied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReorderItemResult {
    pub appointment_id: Uuid,
    pub old_start_at: DateTime<Utc>,
    pub new_start_at: DateTime<Utc>,
    pub changed: bool,
    pub persisted: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReorderRouteResponse {
    pub items: Vec<ReorderItemResult>,
    pub all_persisted: bool,
}
