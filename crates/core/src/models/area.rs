use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A named geographic zone for one account, defined by an explicit zip list
/// and/or a center point with a radius in miles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceArea {
    pub id: Uuid,
    pub account_id: Uuid,
    pub name: String,
    pub color: String,
    pub zip_codes: Vec<String>,
    pub center_lat: Option<f64>,
    pub center_lng: Option<f64>,
    pub radius_miles: Option<f64>,
}

/// Default weekly plan: which area a groomer covers on a given weekday.
/// Unique per (groomer, day_of_week); 0 = Sunday through 6 = Saturday.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AreaDayAssignment {
    pub groomer_id: Uuid,
    pub day_of_week: i16,
    pub area_id: Uuid,
}

/// A single-date exception to the weekly plan. Wins over the weekday
/// default for that calendar date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AreaDateOverride {
    pub groomer_id: Uuid,
    pub override_date: NaiveDate,
    pub area_id: Uuid,
}

/// The area a groomer covers on one concrete date, after override
/// resolution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedAreaDay {
    pub date: NaiveDate,
    pub area_id: Uuid,
    pub from_override: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchingAreaResponse {
    pub area_id: Option<Uuid>,
    pub area_name: Option<String>,
    pub matched_by: Option<AreaMatchKind>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AreaMatchKind {
    ZipCode,
    Radius,
}
