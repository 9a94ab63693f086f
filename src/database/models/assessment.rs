use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// One row per user per day, enforced by UNIQUE(user_id, assessed_on).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Assessment {
    pub assessment_id: i64,
    pub user_id: i64,
    pub assessed_on: NaiveDate,
    pub kept: bool,
    pub note: Option<String>,
}
