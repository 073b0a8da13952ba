use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Groomer {
    pub id: Uuid,
    pub account_id: Uuid,
    pub name: String,
    /// Start of the working day, local to the account's timezone.
    pub work_start: NaiveTime,
    /// End of the working day, local to the account's timezone.
    pub work_end: NaiveTime,
    /// Daily cap on appointments for pets over the large-dog threshold.
    /// None means no cap.
    pub large_dog_daily_limit: Option<i32>,
    pub default_assistant: bool,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub booking_slug: String,
}
