use chrono::{NaiveDate, Utc, Weekday};
use sqlx::{Pool, Sqlite};
use tracing::{error, info};

use crate::database::db::queries;
use crate::usecases::assessment::week_start;

const FIRE_WEEKDAY: Weekday = Weekday::Wed;
const FIRE_HOUR: u32 = 18;
const FIRE_MINUTE: u32 = 0;

const REMINDER_MESSAGE: &str =
    "Mid-week check-in: how is your weekly commitment going? Log today's assessment.";

/// Weekly mid-week reminder loop (Wednesday 18:00 UTC).
pub async fn run(pool: Pool<Sqlite>) {
    loop {
        let next = super::next_weekly(Utc::now(), FIRE_WEEKDAY, FIRE_HOUR, FIRE_MINUTE);
        tokio::time::sleep(super::sleep_until(next)).await;

        let today = Utc::now().date_naive();
        match tick(&pool, today).await {
            Ok(created) => info!("mid-week reminder: nudged {} users", created),
            Err(e) => error!("mid-week reminder job failed: {e:#}"),
        }
    }
}

/// Remind every user holding an active commitment who has not logged an
/// assessment since the week started.
pub async fn tick(pool: &Pool<Sqlite>, today: NaiveDate) -> anyhow::Result<u32> {
    let users = queries::users_with_active_commitment(pool).await?;
    let monday = week_start(today);
    let mut created = 0u32;

    for user in users {
        if queries::has_assessment_since(pool, user.user_id, monday).await? {
            continue;
        }
        queries::create_reminder(pool, user.user_id, REMINDER_MESSAGE).await?;
        created += 1;
    }

    Ok(created)
}
