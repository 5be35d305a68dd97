use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};

/// Date-only layouts accepted from the attendance sheet.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%d %B %Y",
    "%d %b %Y",
];

/// Date + time layouts. Zone-less timestamps are read as local time.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Resolve a feed date cell to the local calendar day it names.
///
/// Returns `None` for anything unparseable so it can never equal a real day.
pub fn parse_calendar_day(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        return Some(ts.with_timezone(&Local).date_naive());
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}

/// Same local calendar day as `today`.
pub fn is_same_day(raw: Option<&str>, today: NaiveDate) -> bool {
    raw.and_then(parse_calendar_day) == Some(today)
}

pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn may_first() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    #[rstest]
    #[case("2024-05-01")]
    #[case("2024/05/01")]
    #[case("05/01/2024")]
    #[case("5/1/2024")]
    #[case("May 1, 2024")]
    #[case("1 May 2024")]
    #[case("May 01, 2024")]
    #[case("01 May 2024")]
    #[case("2024-05-01T09:00:00")]
    #[case("2024-05-01 17:45")]
    #[case("05/01/2024 09:00:00")]
    #[case("  2024-05-01  ")]
    fn formats_naming_the_same_day_match(#[case] raw: &str) {
        assert!(is_same_day(Some(raw), may_first()), "{raw} should be 2024-05-01");
    }

    #[rstest]
    #[case("2024-05-02")]
    #[case("04/30/2024")]
    #[case("not a date")]
    #[case("")]
    #[case("2024-13-01")]
    fn other_days_and_garbage_never_match(#[case] raw: &str) {
        assert!(!is_same_day(Some(raw), may_first()));
    }

    #[test]
    fn missing_date_never_matches() {
        assert!(!is_same_day(None, may_first()));
    }

    #[test]
    fn rfc3339_resolves_to_local_day() {
        let ts = "2024-05-01T12:00:00Z";
        let expected = DateTime::parse_from_rfc3339(ts)
            .unwrap()
            .with_timezone(&Local)
            .date_naive();
        assert_eq!(parse_calendar_day(ts), Some(expected));
    }
}
