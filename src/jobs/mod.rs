//! Fixed-schedule background jobs. Each job is a tokio task that sleeps
//! until its next UTC fire time, runs one tick, logs on failure and goes
//! back to sleep. No retry or catch-up beyond that.

pub mod reminder;
pub mod rollover;

use chrono::{DateTime, Datelike, Duration, Utc, Weekday};
use sqlx::{Pool, Sqlite};

pub fn spawn_all(pool: Pool<Sqlite>) {
    tokio::spawn(reminder::run(pool.clone()));
    tokio::spawn(rollover::run(pool));
}

/// Next occurrence of `hour:minute` UTC strictly after `now`.
pub(crate) fn next_daily(now: DateTime<Utc>, hour: u32, minute: u32) -> DateTime<Utc> {
    let candidate = now
        .date_naive()
        .and_hms_opt(hour, minute, 0)
        .expect("valid fire time")
        .and_utc();

    if candidate > now {
        candidate
    } else {
        candidate + Duration::days(1)
    }
}

/// Next occurrence of `weekday` at `hour:minute` UTC strictly after `now`.
pub(crate) fn next_weekly(
    now: DateTime<Utc>,
    weekday: Weekday,
    hour: u32,
    minute: u32,
) -> DateTime<Utc> {
    let days_ahead = (weekday.num_days_from_monday() + 7
        - now.weekday().num_days_from_monday())
        % 7;

    let candidate = (now.date_naive() + Duration::days(days_ahead as i64))
        .and_hms_opt(hour, minute, 0)
        .expect("valid fire time")
        .and_utc();

    if candidate > now {
        candidate
    } else {
        candidate + Duration::days(7)
    }
}

pub(crate) fn sleep_until(next: DateTime<Utc>) -> std::time::Duration {
    (next - Utc::now()).to_std().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    #[test]
    fn daily_fire_later_today() {
        // 2026-08-06 is a Thursday
        let now = at(2026, 8, 6, 0, 0);
        assert_eq!(next_daily(now, 0, 5), at(2026, 8, 6, 0, 5));
    }

    #[test]
    fn daily_fire_rolls_to_tomorrow() {
        let now = at(2026, 8, 6, 0, 5);
        assert_eq!(next_daily(now, 0, 5), at(2026, 8, 7, 0, 5));
    }

    #[test]
    fn weekly_fire_this_week() {
        let now = at(2026, 8, 3, 12, 0); // Monday
        assert_eq!(next_weekly(now, Weekday::Wed, 18, 0), at(2026, 8, 5, 18, 0));
    }

    #[test]
    fn weekly_fire_same_day_before_time() {
        let now = at(2026, 8, 5, 9, 0); // Wednesday morning
        assert_eq!(next_weekly(now, Weekday::Wed, 18, 0), at(2026, 8, 5, 18, 0));
    }

    #[test]
    fn weekly_fire_same_day_after_time_waits_a_week() {
        let now = at(2026, 8, 5, 18, 0); // Wednesday at fire time
        assert_eq!(
            next_weekly(now, Weekday::Wed, 18, 0),
            at(2026, 8, 12, 18, 0)
        );
    }
}
