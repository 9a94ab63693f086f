use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::{Pool, Sqlite};
use tracing::warn;

use crate::ai::{parse, prompt, AiClient};
use crate::database::models::User;
use crate::usecases::snapshot;

const FALLBACK_TIP: &str =
    "Pick your biggest spending category from last week and set a cap for the next seven days.";
const FALLBACK_FOCUS: &str = "spending awareness";

#[derive(Debug, Deserialize)]
struct TipReply {
    tip: Option<String>,
    focus: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CoachTip {
    pub tip: String,
    pub focus: String,
}

/// One actionable tip for the coming week, grounded in the user's snapshot.
pub async fn get_coach_tip(
    pool: &Pool<Sqlite>,
    ai: &AiClient,
    user: &User,
    today: NaiveDate,
) -> Result<CoachTip, sqlx::Error> {
    let snap = snapshot::build_snapshot(pool, user, today).await?;

    let tip = match ai
        .complete_text(prompt::coach_tip_system(), &prompt::coach_tip_user(&snap))
        .await
    {
        Ok(raw) => match parse::parse_reply::<TipReply>(&raw) {
            Some(reply) => CoachTip {
                tip: reply
                    .tip
                    .filter(|t| !t.trim().is_empty())
                    .unwrap_or_else(|| FALLBACK_TIP.to_string()),
                focus: reply
                    .focus
                    .filter(|f| !f.trim().is_empty())
                    .unwrap_or_else(|| FALLBACK_FOCUS.to_string()),
            },
            None => {
                warn!(user_id = user.user_id, "coach tip reply was not parseable");
                fallback_tip()
            }
        },
        Err(e) => {
            warn!(user_id = user.user_id, "coach tip completion failed: {e:#}");
            fallback_tip()
        }
    };

    Ok(tip)
}

fn fallback_tip() -> CoachTip {
    CoachTip {
        tip: FALLBACK_TIP.to_string(),
        focus: FALLBACK_FOCUS.to_string(),
    }
}
