use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{GroomError, GroomResult};

/// Lifecycle states for an appointment. Appointments are never deleted;
/// cancellations and no-shows are recorded as status transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppointmentStatus {
    Scheduled,
    Confirmed,
    InProgress,
    Completed,
    Cancelled,
    NoShow,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Scheduled => "SCHEDULED",
            AppointmentStatus::Confirmed => "CONFIRMED",
            AppointmentStatus::InProgress => "IN_PROGRESS",
            AppointmentStatus::Completed => "COMPLETED",
            AppointmentStatus::Cancelled => "CANCELLED",
            AppointmentStatus::NoShow => "NO_SHOW",
        }
    }

    pub fn parse(value: &str) -> GroomResult<Self> {
        match value {
            "SCHEDULED" => Ok(AppointmentStatus::Scheduled),
            "CONFIRMED" => Ok(AppointmentStatus::Confirmed),
            "IN_PROGRESS" => Ok(AppointmentStatus::InProgress),
            "COMPLETED" => Ok(AppointmentStatus::Completed),
            "CANCELLED" => Ok(AppointmentStatus::Cancelled),
            "NO_SHOW" => Ok(AppointmentStatus::NoShow),
            other => Err(GroomError::Validation(format!(
                "Unknown appointment status: {}",
                other
            ))),
        }
    }

    /// Cancelled-like appointments are excluded from conflict and slot
    /// calculations.
    pub fn is_cancelled_like(&self) -> bool {
        matches!(self, AppointmentStatus::Cancelled | AppointmentStatus::NoShow)
    }

    /// Only upcoming, still-active appointments may be re-sequenced.
    pub fn is_reorderable(&self) -> bool {
        !matches!(
            self,
            AppointmentStatus::Cancelled | AppointmentStatus::NoShow | AppointmentStatus::Completed
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub account_id: Uuid,
    pub groomer_id: Uuid,
    pub customer_id: Uuid,
    pub pet_id: Option<Uuid>,
    pub start_at: DateTime<Utc>,
    pub service_minutes: i32,
    pub status: AppointmentStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Appointment {
    /// Effective end of the visit: start plus the booked service duration.
    pub fn end_at(&self) -> DateTime<Utc> {
        self.start_at + Duration::minutes(i64::from(self.service_minutes))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkipAppointmentRequest {
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkipAppointmentResponse {
    pub appointment_id: Uuid,
    pub old_start_at: DateTime<Utc>,
    pub new_start_at: DateTime<Utc>,
    pub rescheduled_date: String,
}
