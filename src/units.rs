//! Storage and transfer unit conversions.
//!
//! Binary prefixes (2^30, 2^40) are used when going from bytes to
//! gigabytes or terabytes; gigabyte to terabyte steps are decimal (1000).

use chrono::{DateTime, Datelike, NaiveDate, Utc};

const BYTES_PER_GIGABYTE: f64 = 1_073_741_824.0;
const BYTES_PER_TERABYTE: f64 = 1_099_511_627_776.0;
const SECONDS_PER_HOUR: f64 = 3600.0;
const HOURS_PER_DAY: f64 = 24.0;

pub fn byte_seconds_to_terabyte_hours(usage_amount: f64) -> f64 {
    usage_amount / BYTES_PER_TERABYTE / SECONDS_PER_HOUR
}

pub fn byte_seconds_to_gigabyte_hours(usage_amount: f64) -> f64 {
    usage_amount / BYTES_PER_GIGABYTE / SECONDS_PER_HOUR
}

pub fn bytes_to_gigabytes(usage_amount: f64) -> f64 {
    usage_amount / BYTES_PER_GIGABYTE
}

pub fn bytes_to_terabytes(usage_amount: f64) -> f64 {
    usage_amount / BYTES_PER_TERABYTE
}

pub fn terabytes_to_gigabytes(usage_amount: f64) -> f64 {
    usage_amount * 1000.0
}

pub fn gigabyte_hours_to_terabyte_hours(usage_amount: f64) -> f64 {
    usage_amount / 1000.0
}

/// Gigabytes held for one full day, as terabyte-hours.
pub fn gigabytes_to_terabyte_hours(usage_amount: f64) -> f64 {
    (usage_amount / 1000.0) * HOURS_PER_DAY
}

/// Uses the length of the calendar month that contains `timestamp` (UTC).
pub fn gigabyte_months_to_terabyte_hours(usage_amount: f64, timestamp: DateTime<Utc>) -> f64 {
    (usage_amount / 1000.0) * hours_in_month(timestamp)
}

pub fn gigabyte_months_to_gigabyte_hours(usage_amount: f64, timestamp: DateTime<Utc>) -> f64 {
    usage_amount * hours_in_month(timestamp)
}

pub fn seconds_to_hours(seconds: f64) -> f64 {
    seconds / SECONDS_PER_HOUR
}

fn hours_in_month(timestamp: DateTime<Utc>) -> f64 {
    HOURS_PER_DAY * f64::from(days_in_month(timestamp.date_naive()))
}

pub fn days_in_month(day: NaiveDate) -> u32 {
    let (year, month) = (day.year(), day.month());
    let next_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    let first = NaiveDate::from_ymd_opt(year, month, 1);
    match (first, next_first) {
        (Some(first), Some(next)) => next.signed_duration_since(first).num_days() as u32,
        // Only reachable at the edge of chrono's supported range.
        _ => 31,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0)
            .single()
            .expect("valid timestamp")
    }

    #[test]
    fn zero_maps_to_zero_everywhere() {
        let ts = utc(2021, 2, 10);
        assert_eq!(byte_seconds_to_terabyte_hours(0.0), 0.0);
        assert_eq!(byte_seconds_to_gigabyte_hours(0.0), 0.0);
        assert_eq!(bytes_to_gigabytes(0.0), 0.0);
        assert_eq!(bytes_to_terabytes(0.0), 0.0);
        assert_eq!(terabytes_to_gigabytes(0.0), 0.0);
        assert_eq!(gigabyte_hours_to_terabyte_hours(0.0), 0.0);
        assert_eq!(gigabyte_months_to_terabyte_hours(0.0, ts), 0.0);
    }

    #[test]
    fn byte_seconds_convert_with_binary_prefixes() {
        let one_gib_hour = 1_073_741_824.0 * 3600.0;
        assert!((byte_seconds_to_gigabyte_hours(one_gib_hour) - 1.0).abs() < 1e-12);

        let one_tib_hour = 1_099_511_627_776.0 * 3600.0;
        assert!((byte_seconds_to_terabyte_hours(one_tib_hour) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn terabyte_and_gigabyte_hours_differ_by_binary_factor() {
        for x in [1.0, 3.6e12, 8.5e15, 123_456_789.0] {
            let tb = byte_seconds_to_terabyte_hours(x);
            let gb = byte_seconds_to_gigabyte_hours(x);
            assert!((tb - gb / 1024.0).abs() <= tb * 1e-12);
        }
    }

    #[test]
    fn decimal_steps_between_gigabytes_and_terabytes() {
        assert_eq!(terabytes_to_gigabytes(1.5), 1500.0);
        assert_eq!(gigabyte_hours_to_terabyte_hours(2500.0), 2.5);
        assert_eq!(gigabytes_to_terabyte_hours(1000.0), 24.0);
        assert!((bytes_to_terabytes(1_099_511_627_776.0) - 1.0).abs() < 1e-12);
        assert!((bytes_to_gigabytes(2_147_483_648.0) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn gigabyte_months_use_calendar_month_length() {
        assert_eq!(gigabyte_months_to_terabyte_hours(1000.0, utc(2021, 2, 14)), 24.0 * 28.0);
        assert_eq!(gigabyte_months_to_terabyte_hours(1000.0, utc(2020, 2, 14)), 24.0 * 29.0);
        assert_eq!(gigabyte_months_to_terabyte_hours(1000.0, utc(2020, 4, 1)), 24.0 * 30.0);
        assert_eq!(gigabyte_months_to_terabyte_hours(1000.0, utc(2020, 12, 31)), 24.0 * 31.0);
        assert_eq!(gigabyte_months_to_gigabyte_hours(2.0, utc(2020, 11, 2)), 2.0 * 24.0 * 30.0);
    }

    #[test]
    fn days_in_month_handles_year_boundary() {
        let dec = NaiveDate::from_ymd_opt(2020, 12, 5).expect("date");
        assert_eq!(days_in_month(dec), 31);
        let feb = NaiveDate::from_ymd_opt(2100, 2, 1).expect("date");
        assert_eq!(days_in_month(feb), 28);
    }
}
