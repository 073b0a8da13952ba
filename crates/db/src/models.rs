use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use groomroute_core::errors::GroomResult;
use groomroute_core::geo::CustomerLocation;
use groomroute_core::models::account::Account;
use groomroute_core::models::appointment::AppointmentStatus;
use groomroute_core::models::area::{AreaDateOverride, AreaDayAssignment, ServiceArea};
use groomroute_core::models::breaks::{Break, BreakType};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAccount {
    pub id: Uuid,
    pub name: String,
    pub timezone: String,
    pub created_at: DateTime<Utc>,
}

impl DbAccount {
    pub fn to_core(&self) -> Account {
        Account {
            id: self.id,
            name: self.name.clone(),
            timezone: self.timezone.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbGroomer {
    pub id: Uuid,
    pub account_id: Uuid,
    pub name: String,
    pub work_start: NaiveTime,
    pub work_end: NaiveTime,
    pub large_dog_daily_limit: Option<i32>,
    pub default_assistant: bool,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub booking_slug: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbServiceArea {
    pub id: Uuid,
    pub account_id: Uuid,
    pub name: String,
    pub color: String,
    pub zip_codes: Vec<String>,
    pub center_lat: Option<f64>,
    pub center_lng: Option<f64>,
    pub radius_miles: Option<f64>,
    pub created_at: DateTime<Utc>,
}

impl From<DbServiceArea> for ServiceArea {
    fn from(area: DbServiceArea) -> Self {
        ServiceArea {
            id: area.id,
            account_id: area.account_id,
            name: area.name,
            color: area.color,
            zip_codes: area.zip_codes,
            center_lat: area.center_lat,
            center_lng: area.center_lng,
            radius_miles: area.radius_miles,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbCustomer {
    pub id: Uuid,
    pub account_id: Uuid,
    pub name: String,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub zip_code: Option<String>,
    pub cancellation_count: i32,
    pub no_show_count: i32,
    pub lifetime_spend_cents: i64,
    pub service_area_id: Option<Uuid>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl DbCustomer {
    /// The customer's location as the area matcher consumes it.
    pub fn location(&self) -> CustomerLocation {
        CustomerLocation {
            zip_code: self.zip_code.clone(),
            lat: self.lat,
            lng: self.lng,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAppointment {
    pub id: Uuid,
    pub account_id: Uuid,
    pub groomer_id: Uuid,
    pub customer_id: Uuid,
    pub pet_id: Option<Uuid>,
    pub start_at: DateTime<Utc>,
    pub service_minutes: i32,
    pub status: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl DbAppointment {
    /// Parse the stored status text into the closed core enum.
    pub fn status(&self) -> GroomResult<AppointmentStatus> {
        AppointmentStatus::parse(&self.status)
    }
}

/// An appointment joined with its pet's weight and the customer's geocoded
/// location, as the scheduling queries consume it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAppointmentStop {
    pub id: Uuid,
    pub account_id: Uuid,
    pub groomer_id: Uuid,
    pub customer_id: Uuid,
    pub pet_id: Option<Uuid>,
    pub start_at: DateTime<Utc>,
    pub service_minutes: i32,
    pub status: String,
    pub pet_weight_lbs: Option<f64>,
    pub customer_lat: Option<f64>,
    pub customer_lng: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAreaDayAssignment {
    pub groomer_id: Uuid,
    pub day_of_week: i16,
    pub area_id: Uuid,
}

impl From<DbAreaDayAssignment> for AreaDayAssignment {
    fn from(row: DbAreaDayAssignment) -> Self {
        AreaDayAssignment {
            groomer_id: row.groomer_id,
            day_of_week: row.day_of_week,
            area_id: row.area_id,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAreaDateOverride {
    pub groomer_id: Uuid,
    pub override_date: NaiveDate,
    pub area_id: Uuid,
}

impl From<DbAreaDateOverride> for AreaDateOverride {
    fn from(row: DbAreaDateOverride) -> Self {
        AreaDateOverride {
            groomer_id: row.groomer_id,
            override_date: row.override_date,
            area_id: row.area_id,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbRouteDay {
    pub groomer_id: Uuid,
    pub route_date: NaiveDate,
    pub day_started: bool,
    pub has_assistant: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbBreak {
    pub id: Uuid,
    pub account_id: Uuid,
    pub groomer_id: Uuid,
    pub break_date: NaiveDate,
    pub break_type: String,
    pub planned_start: Option<DateTime<Utc>>,
    pub planned_end: Option<DateTime<Utc>>,
    pub taken: bool,
    pub actual_start: Option<DateTime<Utc>>,
    pub actual_minutes: Option<i32>,
}

impl DbBreak {
    /// Convert to the core model the suggestion engine consumes.
    pub fn to_core(&self) -> GroomResult<Break> {
        Ok(Break {
            id: self.id,
            account_id: self.account_id,
            groomer_id: self.groomer_id,
            break_date: self.break_date,
            break_type: BreakType::parse(&self.break_type)?,
            planned_start: self.planned_start,
            planned_end: self.planned_end,
            taken: self.taken,
            actual_start: self.actual_start,
            actual_minutes: self.actual_minutes,
        })
    }
}

/// A waitlist entry joined with the customer history the ranker scores on.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbWaitlistCandidate {
    pub entry_id: Uuid,
    pub customer_id: Uuid,
    pub customer_name: String,
    pub preferred_days: Vec<i16>,
    pub earliest_time: Option<NaiveTime>,
    pub latest_time: Option<NaiveTime>,
    pub service_minutes: i32,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub zip_code: Option<String>,
    pub service_area_id: Option<Uuid>,
    pub lifetime_spend_cents: i64,
    pub cancellation_count: i32,
    pub no_show_count: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbCustomerEvent {
    pub id: Uuid,
    pub account_id: Uuid,
    pub customer_id: Uuid,
    pub actor: String,
    pub action: String,
    pub reason: Option<String>,
    pub created_at: DateTime<Utc>,
}
