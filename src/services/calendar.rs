//! Calendar-day helpers. Days are the server's local calendar days;
//! stored timestamps are UTC.

use chrono::{DateTime, Duration, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

/// Default look-back window for journal and vitals queries.
pub const DEFAULT_LOOK_BACK_DAYS: i64 = 7;

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// First calendar day included in a `days`-long look-back ending today.
/// `days == 0` means today only.
pub fn look_back_start(today: NaiveDate, days: i64) -> NaiveDate {
    today - Duration::days(days)
}

/// Step used to walk over a DST gap; real zones shift on quarter hours.
const GAP_STEP_MINUTES: i64 = 15;

/// The UTC instant at which `date` starts in local time.
pub fn start_of_day_utc(date: NaiveDate) -> DateTime<Utc> {
    first_valid_instant(date.and_time(NaiveTime::MIN), |local| {
        Local
            .from_local_datetime(&local)
            .earliest()
            .map(|instant| instant.with_timezone(&Utc))
    })
}

/// Earliest resolvable local time at or after `midnight`. When midnight was
/// skipped by a DST jump the day starts at the end of the gap.
fn first_valid_instant<F>(midnight: NaiveDateTime, resolve: F) -> DateTime<Utc>
where
    F: Fn(NaiveDateTime) -> Option<DateTime<Utc>>,
{
    let steps_per_day = 24 * 60 / GAP_STEP_MINUTES;
    (0..steps_per_day)
        .map(|step| midnight + Duration::minutes(step * GAP_STEP_MINUTES))
        .find_map(&resolve)
        .unwrap_or_else(|| Utc.from_utc_datetime(&midnight))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Timelike};

    #[test]
    fn test_look_back_start() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        assert_eq!(look_back_start(today, 0), today);
        assert_eq!(look_back_start(today, 7), NaiveDate::from_ymd_opt(2024, 3, 3).unwrap());
        assert_eq!(look_back_start(today, 10), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
    }

    #[test]
    fn test_start_of_day_is_local_midnight() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let local = start_of_day_utc(date).with_timezone(&Local);
        assert_eq!(local.date_naive(), date);
        assert_eq!(local.hour(), 0);
        assert_eq!(local.minute(), 0);
    }

    fn at_minus_two_hours(local: NaiveDateTime) -> Option<DateTime<Utc>> {
        FixedOffset::west_opt(2 * 3600)
            .and_then(|offset| offset.from_local_datetime(&local).single())
            .map(|instant| instant.with_timezone(&Utc))
    }

    #[test]
    fn test_day_starts_at_end_of_dst_gap() {
        let midnight = NaiveDate::from_ymd_opt(2018, 11, 4).unwrap().and_time(NaiveTime::MIN);
        let gap_end = midnight + Duration::hours(1);

        // Local clocks jump from 00:00 straight to 01:00
        let start = first_valid_instant(midnight, |local| {
            if local < gap_end {
                None
            } else {
                at_minus_two_hours(local)
            }
        });

        assert_eq!(start, Utc.with_ymd_and_hms(2018, 11, 4, 3, 0, 0).unwrap());
    }

    #[test]
    fn test_day_without_gap_starts_at_midnight() {
        let midnight = NaiveDate::from_ymd_opt(2018, 11, 5).unwrap().and_time(NaiveTime::MIN);
        let start = first_valid_instant(midnight, at_minus_two_hours);
        assert_eq!(start, Utc.with_ymd_and_hms(2018, 11, 5, 2, 0, 0).unwrap());
    }

    #[test]
    fn test_now_is_after_start_of_today() {
        let start = start_of_day_utc(today());
        assert!(Utc::now() >= start);
    }
}
