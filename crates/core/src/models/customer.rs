use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    pub id: Uuid,
    pub account_id: Uuid,
    pub name: String,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub zip_code: Option<String>,
    pub cancellation_count: i32,
    pub no_show_count: i32,
    pub service_area_id: Option<Uuid>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pet {
    pub id: Uuid,
    pub account_id: Uuid,
    pub customer_id: Uuid,
    pub name: String,
    pub weight_lbs: f64,
}

/// Coarse bucket for a customer's historical spend, in cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValueTier {
    Low,
    Standard,
    High,
}

impl ValueTier {
    pub const HIGH_SPEND_CENTS: i64 = 100_000;
    pub const STANDARD_SPEND_CENTS: i64 = 25_000;

    pub fn from_lifetime_spend_cents(spend_cents: i64) -> Self {
        if spend_cents >= Self::HIGH_SPEND_CENTS {
            ValueTier::High
        } else if spend_cents >= Self::STANDARD_SPEND_CENTS {
            ValueTier::Standard
        } else {
            ValueTier::Low
        }
    }
}

/// Coarse bucket for how often a customer cancels or no-shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReliabilityTier {
    Unreliable,
    Fair,
    Reliable,
}

impl ReliabilityTier {
    pub const UNRELIABLE_STRIKES: i32 = 4;
    pub const FAIR_STRIKES: i32 = 2;

    /// No-shows weigh double: a silent miss costs the groomer the full slot,
    /// while a cancellation usually leaves time to fill it.
    pub fn from_counts(cancellation_count: i32, no_show_count: i32) -> Self {
        let strikes = cancellation_count + no_show_count * 2;
        if strikes >= Self::UNRELIABLE_STRIKES {
            ReliabilityTier::Unreliable
        } else if strikes >= Self::FAIR_STRIKES {
            ReliabilityTier::Fair
        } else {
            ReliabilityTier::Reliable
        }
    }
}

/// One row in a customer's structured history: who did what and why.
/// Replaces the older convention of appending skip/cancel notes into a
/// single free-text field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerEvent {
    pub id: Uuid,
    pub account_id: Uuid,
    pub customer_id: Uuid,
    pub actor: String,
    pub action: CustomerAction,
    pub reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CustomerAction {
    Skipped,
    Cancelled,
    NoShow,
    AreaAssigned,
}

impl CustomerAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            CustomerAction::Skipped => "SKIPPED",
            CustomerAction::Cancelled => "CANCELLED",
            CustomerAction::NoShow => "NO_SHOW",
            CustomerAction::AreaAssigned => "AREA_ASSIGNED",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignAreaRequest {
    pub area_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignAreaResponse {
    pub customer_id: Uuid,
    pub area_id: Uuid,
}
