use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use serde::Deserialize;

use crate::backend::error::{ApiError, ApiResult};
use crate::backend::AppState;
use crate::database::db::queries;
use crate::usecases::cash_flow::{self, CashFlowForecast};
use crate::usecases::coach_tip::{self, CoachTip};
use crate::usecases::receipt_scan::{self, ReceiptScan};
use crate::usecases::wise_score::{self, WiseScore};

pub async fn wise_score(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> ApiResult<Json<WiseScore>> {
    let user = queries::get_user_by_id(&state.db, user_id).await?;
    let today = Utc::now().date_naive();

    let score = wise_score::compute_wise_score(&state.db, &state.ai, &user, today).await?;
    Ok(Json(score))
}

pub async fn coach_tip(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> ApiResult<Json<CoachTip>> {
    let user = queries::get_user_by_id(&state.db, user_id).await?;
    let today = Utc::now().date_naive();

    let tip = coach_tip::get_coach_tip(&state.db, &state.ai, &user, today).await?;
    Ok(Json(tip))
}

pub async fn cash_flow(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> ApiResult<Json<CashFlowForecast>> {
    let user = queries::get_user_by_id(&state.db, user_id).await?;
    let today = Utc::now().date_naive();

    let forecast = cash_flow::get_cash_flow_forecast(&state.db, &user, today).await?;
    Ok(Json(forecast))
}

#[derive(Debug, Deserialize)]
pub struct ScanReceiptRequest {
    pub image_base64: String,
    #[serde(default = "default_mime")]
    pub mime: String,
    /// Store the parsed draft as an expense right away.
    #[serde(default)]
    pub save: bool,
}

fn default_mime() -> String {
    "image/jpeg".to_string()
}

pub async fn scan_receipt(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Json(payload): Json<ScanReceiptRequest>,
) -> ApiResult<Json<ReceiptScan>> {
    if payload.image_base64.trim().is_empty() {
        return Err(ApiError::Validation("image_base64 must not be empty".into()));
    }

    let user = queries::get_user_by_id(&state.db, user_id).await?;
    let today = Utc::now().date_naive();

    let scan = receipt_scan::scan_receipt(
        &state.db,
        &state.ai,
        &user,
        &payload.image_base64,
        &payload.mime,
        payload.save,
        today,
    )
    .await?;

    Ok(Json(scan))
}
