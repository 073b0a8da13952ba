use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A customer waiting for an earlier or different slot. Preferences are
/// advisory: the ranker scores against them, it does not enforce them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaitlistEntry {
    pub id: Uuid,
    pub account_id: Uuid,
    pub customer_id: Uuid,
    /// Preferred weekdays, 0 = Sunday through 6 = Saturday.
    pub preferred_days: Vec<i16>,
    pub earliest_time: Option<NaiveTime>,
    pub latest_time: Option<NaiveTime>,
    pub service_minutes: i32,
    pub created_at: DateTime<Utc>,
}
