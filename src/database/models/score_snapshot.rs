use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::FromRow;

// History of AI-rated Wise Scores (0..=1000).
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ScoreSnapshot {
    pub snapshot_id: i64,
    pub user_id: i64,
    pub score: i64,
    pub summary: String,
    pub computed_at: NaiveDateTime,
}
