use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{GroomError, GroomResult};

/// One tenant/business. Every query and write in the system is scoped to a
/// single account; the scheduling layer never crosses this boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: Uuid,
    pub name: String,
    /// IANA timezone name, e.g. "America/Denver". All day-boundary math
    /// (what counts as "today", midnight cutoffs) uses this zone rather
    /// than the server's local time.
    pub timezone: String,
}

impl Account {
    pub fn tz(&self) -> GroomResult<Tz> {
        self.timezone.parse::<Tz>().map_err(|_| {
            GroomError::Validation(format!("Unknown timezone: {}", self.timezone))
        })
    }
}
