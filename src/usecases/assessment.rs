use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;
use sqlx::{Pool, Sqlite};

use crate::database::db::queries;
use crate::database::models::Assessment;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct StreakStatus {
    pub streak_days: u32,
    pub assessed_today: bool,
}

// One assessment per user per day; re-posting overwrites the earlier answer.
pub async fn record_daily_assessment(
    pool: &Pool<Sqlite>,
    user_id: i64,
    kept: bool,
    note: Option<&str>,
    today: NaiveDate,
) -> Result<Assessment, sqlx::Error> {
    queries::upsert_assessment(pool, user_id, today, kept, note).await
}

pub async fn get_assessment_status(
    pool: &Pool<Sqlite>,
    user_id: i64,
    today: NaiveDate,
) -> Result<StreakStatus, sqlx::Error> {
    let dates = queries::list_assessment_dates(pool, user_id).await?;
    Ok(compute_streak(&dates, today))
}

/// Count consecutive check-in days ending today or yesterday.
/// `dates_desc` must be sorted newest first. A latest entry older than
/// yesterday means the streak is broken and reports as 0.
pub fn compute_streak(dates_desc: &[NaiveDate], today: NaiveDate) -> StreakStatus {
    let Some(&latest) = dates_desc.first() else {
        return StreakStatus {
            streak_days: 0,
            assessed_today: false,
        };
    };

    let assessed_today = latest == today;
    if today - latest > Duration::days(1) {
        return StreakStatus {
            streak_days: 0,
            assessed_today: false,
        };
    }

    let mut streak = 1u32;
    let mut prev = latest;
    for &d in &dates_desc[1..] {
        if prev - d == Duration::days(1) {
            streak += 1;
            prev = d;
        } else {
            break;
        }
    }

    StreakStatus {
        streak_days: streak,
        assessed_today,
    }
}

/// Monday of the week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}
