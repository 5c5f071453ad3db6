//! core::tz
//!
//! Heuristic mapping from a UTC offset to an IANA zone name.
//!
//! Calendar payloads often carry only an offset (`-05:00`) while the API
//! wants a zone name (`America/New_York`). The mapping is inherently lossy:
//! many zones share an offset, and the right answer depends on DST rules.
//! This module picks a common zone per offset, split by northern-hemisphere
//! season, and returns an empty string for anything unmapped. Unmapped and
//! ambiguous offsets stay empty on purpose; widening the table is a product
//! decision, not a bug fix.

use chrono::{Datelike, NaiveDate};

/// Zones by offset during northern-hemisphere standard time (Nov-Mar).
const STANDARD: [(i32, &str); 12] = [
    (-600, "Pacific/Honolulu"),
    (-540, "America/Anchorage"),
    (-480, "America/Los_Angeles"),
    (-420, "America/Denver"),
    (-360, "America/Chicago"),
    (-300, "America/New_York"),
    (0, "Europe/London"),
    (60, "Europe/Paris"),
    (120, "Europe/Athens"),
    (180, "Europe/Moscow"),
    (480, "Asia/Shanghai"),
    (540, "Asia/Tokyo"),
];

/// Zones by offset during northern-hemisphere daylight time (Apr-Oct).
const DAYLIGHT: [(i32, &str); 11] = [
    (-600, "Pacific/Honolulu"),
    (-480, "America/Anchorage"),
    (-420, "America/Los_Angeles"),
    (-360, "America/Denver"),
    (-300, "America/Chicago"),
    (-240, "America/New_York"),
    (60, "Europe/London"),
    (120, "Europe/Paris"),
    (180, "Europe/Athens"),
    (480, "Asia/Shanghai"),
    (540, "Asia/Tokyo"),
];

/// Resolve a `+HH:MM`/`-HH:MM` offset to an IANA zone name for a given date.
///
/// Returns an empty string when the offset is malformed or has no mapping.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use gogcli::core::tz::offset_to_zone;
///
/// let january = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
/// assert_eq!(offset_to_zone("-05:00", january), "America/New_York");
/// assert_eq!(offset_to_zone("+05:30", january), "");
/// ```
pub fn offset_to_zone(offset: &str, date: NaiveDate) -> String {
    let Some(minutes) = parse_offset_minutes(offset) else {
        return String::new();
    };

    let table: &[(i32, &str)] = if (4..=10).contains(&date.month()) {
        &DAYLIGHT
    } else {
        &STANDARD
    };

    table
        .iter()
        .find(|(m, _)| *m == minutes)
        .map(|(_, name)| (*name).to_string())
        .unwrap_or_default()
}

/// Parse `+HH:MM` / `-HH:MM` into signed minutes. `Z` means zero.
fn parse_offset_minutes(offset: &str) -> Option<i32> {
    if offset == "Z" {
        return Some(0);
    }
    let bytes = offset.as_bytes();
    if bytes.len() != 6 || bytes[3] != b':' {
        return None;
    }
    let sign = match bytes[0] {
        b'+' => 1,
        b'-' => -1,
        _ => return None,
    };
    let hours: i32 = offset[1..3].parse().ok()?;
    let minutes: i32 = offset[4..6].parse().ok()?;
    if hours > 14 || minutes > 59 {
        return None;
    }
    Some(sign * (hours * 60 + minutes))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn eastern_standard_in_january() {
        assert_eq!(
            offset_to_zone("-05:00", date(2026, 1, 15)),
            "America/New_York"
        );
    }

    #[test]
    fn eastern_daylight_in_july() {
        assert_eq!(
            offset_to_zone("-04:00", date(2026, 7, 15)),
            "America/New_York"
        );
        // In July, -05:00 belongs to Chicago.
        assert_eq!(
            offset_to_zone("-05:00", date(2026, 7, 15)),
            "America/Chicago"
        );
    }

    #[test]
    fn unmapped_offset_is_empty() {
        assert_eq!(offset_to_zone("+05:30", date(2026, 1, 15)), "");
        assert_eq!(offset_to_zone("+13:45", date(2026, 1, 15)), "");
    }

    #[test]
    fn malformed_offsets_are_empty() {
        assert_eq!(offset_to_zone("0500", date(2026, 1, 15)), "");
        assert_eq!(offset_to_zone("-5:00", date(2026, 1, 15)), "");
        assert_eq!(offset_to_zone("", date(2026, 1, 15)), "");
    }

    #[test]
    fn zulu_maps_to_london_in_winter() {
        assert_eq!(offset_to_zone("Z", date(2026, 12, 1)), "Europe/London");
    }

    #[test]
    fn london_shifts_in_summer() {
        assert_eq!(offset_to_zone("+01:00", date(2026, 6, 1)), "Europe/London");
        assert_eq!(offset_to_zone("+01:00", date(2026, 12, 1)), "Europe/Paris");
    }
}
