//! Flexible timestamp parsing and session overrides.
//!
//! Log formats carry timestamps in wildly different shapes; this module
//! accepts the common ones (RFC 3339/2822, ISO 8601 variants, HTTP dates,
//! Unix epochs, syslog and Android forms without a year) and applies the
//! per-session `force_*` overrides afterwards.

use chrono::{DateTime, Datelike, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use logsonic_types::IngestOptions;

/// Formats that carry an explicit UTC offset.
const OFFSET_FORMATS: &[&str] = &[
    // HTTP common/combined access log date: 23/Jan/2023:14:05:01 +0000
    "%d/%b/%Y:%H:%M:%S %z",
    // ISO 8601 with a compact offset: 2023-01-23T14:05:01.123+0000
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f %z",
];

/// Naive formats that include a year; parsed as UTC wall-clock.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    // Java/log4j comma-millis: 2023-01-23 14:05:01,123
    "%Y-%m-%d %H:%M:%S,%3f",
    // Nginx error log: 2023/01/23 14:05:01
    "%Y/%m/%d %H:%M:%S",
    // Apache error log date: Wed Jan 23 14:05:01 2023
    "%a %b %e %H:%M:%S %Y",
    // Redis style: 23 Jan 2023 14:05:01.123
    "%d %b %Y %H:%M:%S%.f",
];

/// Formats without a year; the current year is assumed, rolled back one
/// year if that would land in the future.
const YEARLESS_FORMATS: &[&str] = &[
    // Syslog: Jan 23 14:05:01
    "%Y %b %e %H:%M:%S",
    // Android logcat: 01-23 14:05:01.123
    "%Y %m-%d %H:%M:%S%.f",
];

/// Parses a timestamp string in any supported format.
///
/// Returns `None` when no format matches.
#[must_use]
pub fn parse_flexible(raw: &str) -> Option<DateTime<Utc>> {
    parse_flexible_at(raw, Utc::now())
}

/// Like [`parse_flexible`], with an explicit "now" used for yearless
/// formats and the future-rollback rule.
#[must_use]
pub fn parse_flexible_at(raw: &str, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    if let Ok(ts) = DateTime::parse_from_rfc2822(raw) {
        return Some(ts.with_timezone(&Utc));
    }

    for format in OFFSET_FORMATS {
        if let Ok(ts) = DateTime::parse_from_str(raw, format) {
            return Some(ts.with_timezone(&Utc));
        }
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }

    // Yearless formats get the current year prepended, then roll back one
    // year when the result would be in the future.
    for format in YEARLESS_FORMATS {
        let with_year = format!("{} {raw}", now.year());
        if let Ok(naive) = NaiveDateTime::parse_from_str(&with_year, format) {
            let mut ts = Utc.from_utc_datetime(&naive);
            if ts > now {
                if let Some(rolled) = ts.with_year(ts.year() - 1) {
                    ts = rolled;
                }
            }
            return Some(ts);
        }
    }

    parse_epoch(raw)
}

/// Parses bare Unix epochs: 10 digits as seconds, 13 as milliseconds.
fn parse_epoch(raw: &str) -> Option<DateTime<Utc>> {
    if !raw.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let value: i64 = raw.parse().ok()?;
    match raw.len() {
        10 => Utc.timestamp_opt(value, 0).single(),
        13 => Utc.timestamp_millis_opt(value).single(),
        _ => None,
    }
}

/// Normalizes a captured `timestamp` string into an instant, applying the
/// session's `force_*` overrides.
///
/// Falls back to `now` when the capture is empty or unparseable.
#[must_use]
pub fn normalize_timestamp(raw: &str, options: &IngestOptions, now: DateTime<Utc>) -> DateTime<Utc> {
    let Some(mut ts) = parse_flexible_at(raw, now) else {
        return now;
    };

    if let Ok(year) = options.force_start_year.parse::<i32>() {
        if let Some(forced) = ts.with_year(year) {
            ts = forced;
        }
    }
    if let Ok(month) = options.force_start_month.parse::<u32>() {
        if (1..=12).contains(&month) {
            if let Some(forced) = ts.with_month(month) {
                ts = forced;
            }
        }
    }
    if let Ok(day) = options.force_start_day.parse::<u32>() {
        if (1..=31).contains(&day) {
            if let Some(forced) = ts.with_day(day) {
                ts = forced;
            }
        }
    }

    if !options.force_timezone.is_empty() {
        if let Ok(tz) = options.force_timezone.parse::<Tz>() {
            // Reinterpret the parsed wall-clock in the named zone.
            if let Some(local) = tz.from_local_datetime(&ts.naive_utc()).earliest() {
                ts = local.with_timezone(&Utc);
            }
        }
    }

    ts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn parses_rfc3339() {
        let ts = parse_flexible_at("2024-01-01T10:20:30Z", fixed_now()).unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2024, 1, 1, 10, 20, 30).unwrap());
    }

    #[test]
    fn parses_http_access_log_date() {
        let ts = parse_flexible_at("23/Jan/2023:14:05:01 +0000", fixed_now()).unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2023, 1, 23, 14, 5, 1).unwrap());
    }

    #[test]
    fn parses_iso_with_space_and_millis() {
        let ts = parse_flexible_at("2023-01-23 14:05:01.123", fixed_now()).unwrap();
        assert_eq!(ts.timestamp_subsec_millis(), 123);
    }

    #[test]
    fn parses_comma_millis() {
        let ts = parse_flexible_at("2023-01-23 14:05:01,123", fixed_now()).unwrap();
        assert_eq!(ts.timestamp_subsec_millis(), 123);
    }

    #[test]
    fn syslog_gets_current_year() {
        let ts = parse_flexible_at("Jan 23 14:05:01", fixed_now()).unwrap();
        assert_eq!(ts.year(), 2024);
        assert_eq!(ts.month(), 1);
        assert_eq!(ts.day(), 23);
    }

    #[test]
    fn syslog_in_the_future_rolls_back_a_year() {
        // "now" is June 2024; a December date would be in the future.
        let ts = parse_flexible_at("Dec 23 14:05:01", fixed_now()).unwrap();
        assert_eq!(ts.year(), 2023);
    }

    #[test]
    fn parses_android_logcat_format() {
        let ts = parse_flexible_at("03-17 16:16:08.538", fixed_now()).unwrap();
        assert_eq!(ts.year(), 2024);
        assert_eq!(ts.month(), 3);
        assert_eq!(ts.timestamp_subsec_millis(), 538);
    }

    #[test]
    fn parses_unix_seconds() {
        let ts = parse_flexible_at("1674482701", fixed_now()).unwrap();
        assert_eq!(ts.timestamp(), 1_674_482_701);
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_flexible_at("not a date", fixed_now()).is_none());
        assert!(parse_flexible_at("", fixed_now()).is_none());
    }

    #[test]
    fn normalize_falls_back_to_now() {
        let now = fixed_now();
        let options = IngestOptions::default();
        assert_eq!(normalize_timestamp("garbage", &options, now), now);
    }

    #[test]
    fn normalize_applies_forced_components() {
        let options = IngestOptions {
            force_start_year: "2020".to_string(),
            force_start_month: "2".to_string(),
            force_start_day: "3".to_string(),
            ..Default::default()
        };
        let ts = normalize_timestamp("2023-06-15 10:00:00", &options, fixed_now());
        assert_eq!(ts, Utc.with_ymd_and_hms(2020, 2, 3, 10, 0, 0).unwrap());
    }

    #[test]
    fn normalize_ignores_out_of_range_overrides() {
        let options = IngestOptions {
            force_start_month: "13".to_string(),
            ..Default::default()
        };
        let ts = normalize_timestamp("2023-06-15 10:00:00", &options, fixed_now());
        assert_eq!(ts.month(), 6);
    }

    #[test]
    fn normalize_reinterprets_in_forced_zone() {
        let options = IngestOptions {
            force_timezone: "America/New_York".to_string(),
            ..Default::default()
        };
        // 10:00 wall-clock in New York during June is 14:00 UTC (EDT).
        let ts = normalize_timestamp("2023-06-15 10:00:00", &options, fixed_now());
        assert_eq!(ts, Utc.with_ymd_and_hms(2023, 6, 15, 14, 0, 0).unwrap());
    }

    #[test]
    fn normalize_ignores_unknown_zone() {
        let options = IngestOptions {
            force_timezone: "Not/AZone".to_string(),
            ..Default::default()
        };
        let ts = normalize_timestamp("2023-06-15 10:00:00", &options, fixed_now());
        assert_eq!(ts, Utc.with_ymd_and_hms(2023, 6, 15, 10, 0, 0).unwrap());
    }
}
