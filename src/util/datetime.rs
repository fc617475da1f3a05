use chrono::{DateTime, FixedOffset, Utc};

/// IST offset from UTC, in seconds (+05:30).
const IST_OFFSET_SECS: i32 = 5 * 3600 + 30 * 60;

/// Returns the IST fixed-offset zone.
///
/// The dashboard reports Indian market data, so every timestamp it carries
/// is rendered in IST regardless of where the run executes.
pub fn ist() -> FixedOffset {
    FixedOffset::east_opt(IST_OFFSET_SECS).unwrap_or_else(|| {
        panic!("Invalid IST offset");
    })
}

/// Returns the current time in IST.
pub fn ist_now() -> DateTime<FixedOffset> {
    Utc::now().with_timezone(&ist())
}

/// Formats a timestamp as the dashboard's human-readable stamp,
/// e.g. "Feb 05, 2026 06:30 PM IST".
pub fn format_stamp(datetime: DateTime<FixedOffset>) -> String {
    datetime.format("%b %d, %Y %I:%M %p IST").to_string()
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_ist_offset() {
        assert_eq!(ist().local_minus_utc(), 19800);
    }

    #[test]
    fn test_format_stamp() {
        let datetime = ist().with_ymd_and_hms(2026, 2, 5, 18, 30, 0).unwrap();

        assert_eq!(format_stamp(datetime), "Feb 05, 2026 06:30 PM IST");
    }

    #[test]
    fn test_format_stamp_morning() {
        let datetime = ist().with_ymd_and_hms(2026, 11, 9, 9, 5, 0).unwrap();

        assert_eq!(format_stamp(datetime), "Nov 09, 2026 09:05 AM IST");
    }
}
