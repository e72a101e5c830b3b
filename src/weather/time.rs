//! Timezone-aware formatting for the dashboard

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

/// Display patterns used by the day and current views
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimePattern {
    /// Short weekday, e.g. `Mon`
    Weekday,
    /// 12-hour clock without padding or meridiem, e.g. `6:05`
    Hour12,
    /// 24-hour clock, e.g. `20:45`
    Hour24,
    /// Day/month/year, e.g. `01/06/2024`
    Date,
}

impl TimePattern {
    fn format_str(self) -> &'static str {
        match self {
            Self::Weekday => "%a",
            Self::Hour12 => "%-I:%M",
            Self::Hour24 => "%H:%M",
            Self::Date => "%d/%m/%Y",
        }
    }
}

/// Format a timestamp in the given timezone
#[must_use]
pub fn format_time(timestamp: DateTime<Utc>, timezone: Tz, pattern: TimePattern) -> String {
    timestamp
        .with_timezone(&timezone)
        .format(pattern.format_str())
        .to_string()
}

/// Calendar date of `now` at the location
#[must_use]
pub fn today_in(timezone: Tz, now: DateTime<Utc>) -> NaiveDate {
    now.with_timezone(&timezone).date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    fn ts() -> DateTime<Utc> {
        // Saturday 2024-06-01 04:05 UTC
        Utc.with_ymd_and_hms(2024, 6, 1, 4, 5, 0).unwrap()
    }

    #[rstest]
    #[case(chrono_tz::UTC, TimePattern::Weekday, "Sat")]
    #[case(chrono_tz::UTC, TimePattern::Hour12, "4:05")]
    #[case(chrono_tz::Europe::Berlin, TimePattern::Hour24, "06:05")]
    #[case(chrono_tz::America::Los_Angeles, TimePattern::Weekday, "Fri")]
    #[case(chrono_tz::America::Los_Angeles, TimePattern::Hour12, "9:05")]
    #[case(chrono_tz::America::Los_Angeles, TimePattern::Date, "31/05/2024")]
    fn formats_in_timezone(#[case] tz: Tz, #[case] pattern: TimePattern, #[case] expected: &str) {
        assert_eq!(format_time(ts(), tz, pattern), expected);
    }

    #[test]
    fn today_depends_on_timezone() {
        assert_eq!(today_in(chrono_tz::UTC, ts()), NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        assert_eq!(
            today_in(chrono_tz::America::New_York, ts()),
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
        );
        assert_eq!(
            today_in(chrono_tz::Pacific::Honolulu, ts()),
            NaiveDate::from_ymd_opt(2024, 5, 31).unwrap()
        );
    }
}
