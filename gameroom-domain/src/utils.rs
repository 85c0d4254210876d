use anyhow::{anyhow, Result};
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};

const MILLIS_PER_DAY: i64 = 86_400_000;

pub fn millis_to_utc(ms: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp_millis(ms)
}

pub fn parse_date(date: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|err| anyhow!(err))
}

/// Whole days in `end - start`, rounded toward negative infinity.
pub fn floor_days(start: DateTime<Utc>, end: DateTime<Utc>) -> i64 {
    (end - start).num_milliseconds().div_euclid(MILLIS_PER_DAY)
}

/// Inclusive day count of `[start, end]`.
pub fn inclusive_days(start: DateTime<Utc>, end: DateTime<Utc>) -> i64 {
    floor_days(start, end) + 1
}

pub fn one_day() -> Duration {
    Duration::days(1)
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub fn month_key(instant: DateTime<Utc>) -> String {
    instant.format("%Y-%m").to_string()
}

/// Parses a window bound given as RFC 3339 or `YYYY-MM-DD`.
/// A date-only upper bound covers the whole day.
pub fn parse_bound(value: &str, upper: bool) -> Result<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(value) {
        return Ok(instant.with_timezone(&Utc));
    }
    let date = parse_date(value)?;
    let time = if upper {
        NaiveTime::from_hms_milli_opt(23, 59, 59, 999)
    } else {
        Some(NaiveTime::MIN)
    };
    let time = time.ok_or_else(|| anyhow!("invalid time of day"))?;
    Ok(date.and_time(time).and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn floor_days_rounds_toward_negative_infinity() {
        let start = Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 1, 9, 23, 0, 0).unwrap();
        assert_eq!(floor_days(start, end), -1);
        assert_eq!(inclusive_days(start, end), 0);
    }

    #[test]
    fn date_only_upper_bound_covers_whole_day() {
        let end = parse_bound("2024-12-24", true).expect("bound");
        assert_eq!(end, Utc.with_ymd_and_hms(2024, 12, 24, 23, 59, 59).unwrap() + Duration::milliseconds(999));
        let start = parse_bound("2024-12-13", false).expect("bound");
        assert_eq!(start, Utc.with_ymd_and_hms(2024, 12, 13, 0, 0, 0).unwrap());
    }

    #[test]
    fn rfc3339_bounds_are_kept_verbatim() {
        let bound = parse_bound("2024-12-13T10:00:00Z", true).expect("bound");
        assert_eq!(bound, Utc.with_ymd_and_hms(2024, 12, 13, 10, 0, 0).unwrap());
        assert!(parse_bound("13/12/2024", false).is_err());
    }

    #[test]
    fn round2_keeps_two_decimals() {
        assert_eq!(round2(0.333333), 0.33);
        assert_eq!(round2(0.25), 0.25);
    }
}
