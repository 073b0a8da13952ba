//! Service-area matching and area/day planning.
//!
//! Matching is structural, not scored: a customer belongs to the first area
//! whose zip list contains their postal code, and only when no zip matches
//! anywhere do we fall back to radius containment. Callers supply areas in a
//! deterministic order (the storage layer orders them by name) so ties
//! resolve the same way on every run.

use chrono::{Datelike, Days, NaiveDate};

use crate::geo::{haversine_miles, CustomerLocation, GeoPoint};
use crate::models::area::{
    AreaDateOverride, AreaDayAssignment, AreaMatchKind, ResolvedAreaDay, ServiceArea,
};

/// How many days ahead `find_next_area_day_date` scans before giving up.
pub const DEFAULT_AREA_DAY_HORIZON: u64 = 30;

/// Resolve which service area a location belongs to.
///
/// Pass 1: exact (trimmed) zip match against each area's zip list, in
/// supplied order. Pass 2: only if no zip hit and the location is geocoded,
/// the first area whose center lies within `radius_miles`. No weighted
/// scoring across candidates; the first structural match wins.
pub fn find_matching_area<'a>(
    areas: &'a [ServiceArea],
    location: &CustomerLocation,
) -> Option<(&'a ServiceArea, AreaMatchKind)> {
    if let Some(zip) = location.zip_code.as_deref() {
        let zip = zip.trim();
        if !zip.is_empty() {
            for area in areas {
                if area.zip_codes.iter().any(|z| z.trim() == zip) {
                    return Some((area, AreaMatchKind::ZipCode));
                }
            }
        }
    }

    let point = location.point()?;
    for area in areas {
        if let (Some(lat), Some(lng), Some(radius)) =
            (area.center_lat, area.center_lng, area.radius_miles)
        {
            if haversine_miles(point, GeoPoint::new(lat, lng)) <= radius {
                return Some((area, AreaMatchKind::Radius));
            }
        }
    }

    None
}

/// Weekday index used throughout the planner: 0 = Sunday through
/// 6 = Saturday.
pub fn day_of_week_index(date: NaiveDate) -> i16 {
    date.weekday().num_days_from_sunday() as i16
}

/// Resolve the area a groomer covers on each date in `[from, to]`
/// inclusive. A date-specific override replaces the weekday default for
/// that single date only; dates with neither an override nor a default are
/// omitted from the result.
pub fn resolve_area_days(
    assignments: &[AreaDayAssignment],
    overrides: &[AreaDateOverride],
    from: NaiveDate,
    to: NaiveDate,
) -> Vec<ResolvedAreaDay> {
    let mut resolved = Vec::new();
    let mut date = from;
    while date <= to {
        if let Some(o) = overrides.iter().find(|o| o.override_date == date) {
            resolved.push(ResolvedAreaDay {
                date,
                area_id: o.area_id,
                from_override: true,
            });
        } else {
            let weekday = day_of_week_index(date);
            if let Some(a) = assignments.iter().find(|a| a.day_of_week == weekday) {
                resolved.push(ResolvedAreaDay {
                    date,
                    area_id: a.area_id,
                    from_override: false,
                });
            }
        }

        date = match date.checked_add_days(Days::new(1)) {
            Some(next) => next,
            None => break,
        };
    }
    resolved
}

/// First date on or after `start` whose weekday is one of `assigned_days`,
/// scanning at most `horizon_days` ahead. Returns None when the groomer
/// never visits that area within the horizon.
pub fn find_next_area_day_date(
    assigned_days: &[i16],
    start: NaiveDate,
    horizon_days: u64,
) -> Option<NaiveDate> {
    if assigned_days.is_empty() {
        return None;
    }
    (0..horizon_days)
        .filter_map(|offset| start.checked_add_days(Days::new(offset)))
        .find(|date| assigned_days.contains(&day_of_week_index(*date)))
}
