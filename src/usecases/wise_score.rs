use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::{Pool, Sqlite};
use tracing::warn;

use crate::ai::{parse, prompt, AiClient};
use crate::database::db::queries;
use crate::database::models::User;
use crate::usecases::snapshot;

// Static fallback when the model is unreachable or replies with garbage.
const FALLBACK_SCORE: i64 = 500;
const FALLBACK_SUMMARY: &str =
    "Not enough signal to rate this period. Keep logging expenses and check back.";

#[derive(Debug, Deserialize)]
struct ScoreReply {
    score: i64,
    summary: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct WiseScore {
    pub score: i64,
    pub summary: String,
    pub snapshot_id: i64,
}

/// Ask the model to rate the user's spending snapshot on a 0-1000 scale.
/// The score is entirely delegated to the model; we only clamp and persist.
pub async fn compute_wise_score(
    pool: &Pool<Sqlite>,
    ai: &AiClient,
    user: &User,
    today: NaiveDate,
) -> Result<WiseScore, sqlx::Error> {
    let snap = snapshot::build_snapshot(pool, user, today).await?;

    let (score, summary) = match ai
        .complete_text(prompt::wise_score_system(), &prompt::wise_score_user(&snap))
        .await
    {
        Ok(raw) => match parse::parse_reply::<ScoreReply>(&raw) {
            Some(reply) => (
                reply.score.clamp(0, 1000),
                reply
                    .summary
                    .filter(|s| !s.trim().is_empty())
                    .unwrap_or_else(|| FALLBACK_SUMMARY.to_string()),
            ),
            None => {
                warn!(user_id = user.user_id, "wise score reply was not parseable");
                (FALLBACK_SCORE, FALLBACK_SUMMARY.to_string())
            }
        },
        Err(e) => {
            warn!(user_id = user.user_id, "wise score completion failed: {e:#}");
            (FALLBACK_SCORE, FALLBACK_SUMMARY.to_string())
        }
    };

    let snapshot_id = queries::insert_score_snapshot(pool, user.user_id, score, &summary).await?;

    Ok(WiseScore {
        score,
        summary,
        snapshot_id,
    })
}
