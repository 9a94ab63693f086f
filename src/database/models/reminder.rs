use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Reminder {
    pub reminder_id: i64,
    pub user_id: i64,
    pub message: String,
    pub acknowledged: bool,
    pub rem_created_at: NaiveDateTime,
}
