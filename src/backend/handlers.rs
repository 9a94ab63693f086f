use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::backend::error::{ApiError, ApiResult};
use crate::backend::AppState;
use crate::database::db::queries;
use crate::database::models::{
    Assessment, BillPeriod, Commitment, CommitmentStatus, Expense, NewBill, NewExpense,
    RecurringBill, Reminder, User,
};
use crate::usecases::assessment::{self, StreakStatus};
use crate::usecases::quick_add;

/*==========Users=========== */

#[derive(Debug, Deserialize)]
pub struct CreateUser {
    pub user_name: String,
    pub email: String,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub monthly_income: Decimal,
}

fn default_currency() -> String {
    "USD".to_string()
}

pub async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<CreateUser>,
) -> ApiResult<Json<User>> {
    if payload.user_name.trim().is_empty() {
        return Err(ApiError::Validation("user_name must not be empty".into()));
    }
    if !payload.email.contains('@') {
        return Err(ApiError::Validation("email is not valid".into()));
    }

    let user_id = queries::create_user(
        &state.db,
        payload.user_name.trim(),
        &payload.email,
        &payload.currency,
        payload.monthly_income,
    )
    .await?;

    let user = queries::get_user_by_id(&state.db, user_id).await?;
    Ok(Json(user))
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> ApiResult<Json<User>> {
    let user = queries::get_user_by_id(&state.db, user_id).await?;
    Ok(Json(user))
}

/*==========Expenses=========== */

#[derive(Debug, Deserialize)]
pub struct CreateExpense {
    pub title: String,
    pub merchant: Option<String>,
    pub amount: Decimal,
    pub currency: Option<String>,
    pub category: Option<String>,
    pub spent_on: Option<NaiveDate>,
}

pub async fn create_expense(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Json(payload): Json<CreateExpense>,
) -> ApiResult<Json<Expense>> {
    if payload.amount <= Decimal::ZERO {
        return Err(ApiError::Validation("amount must be positive".into()));
    }

    let user = queries::get_user_by_id(&state.db, user_id).await?;

    let new = NewExpense {
        user_id,
        title: payload.title,
        merchant: payload.merchant,
        amount: payload.amount,
        currency: payload.currency.unwrap_or(user.currency),
        category: payload.category.unwrap_or_else(|| "other".to_string()),
        spent_on: payload.spent_on.unwrap_or_else(|| Utc::now().date_naive()),
        source: "manual".to_string(),
    };

    let expense_id = queries::create_expense(&state.db, &new).await?;
    let expense = queries::get_expense_by_id(&state.db, expense_id).await?;
    Ok(Json(expense))
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

pub async fn list_expenses(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Query(params): Query<ListParams>,
) -> ApiResult<Json<Vec<Expense>>> {
    let expenses =
        queries::list_expenses_by_user(&state.db, user_id, params.limit, params.offset).await?;
    Ok(Json(expenses))
}

pub async fn delete_expense(
    State(state): State<AppState>,
    Path(expense_id): Path<i64>,
) -> ApiResult<Json<Value>> {
    let deleted = queries::delete_expense(&state.db, expense_id).await?;
    if !deleted {
        return Err(ApiError::NotFound(format!("expense {}", expense_id)));
    }
    Ok(Json(json!({ "deleted": expense_id })))
}

#[derive(Debug, Deserialize)]
pub struct QuickAdd {
    pub title: String,
}

// "Coffee $4.50" in, expense out. The amount comes from the title itself.
pub async fn quick_add_expense(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Json(payload): Json<QuickAdd>,
) -> ApiResult<Json<Value>> {
    let user = queries::get_user_by_id(&state.db, user_id).await?;
    let today = Utc::now().date_naive();

    match quick_add::create_quick_expense(&state.db, &user, &payload.title, today).await? {
        Some(expense_id) => Ok(Json(json!({ "expense_id": expense_id }))),
        None => Err(ApiError::Validation(
            "no dollar amount found in title".into(),
        )),
    }
}

/*==========Commitments=========== */

#[derive(Debug, Deserialize)]
pub struct CreateCommitment {
    pub goal: String,
}

pub async fn create_commitment(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Json(payload): Json<CreateCommitment>,
) -> ApiResult<Json<Commitment>> {
    if payload.goal.trim().is_empty() {
        return Err(ApiError::Validation("goal must not be empty".into()));
    }

    queries::get_user_by_id(&state.db, user_id).await?;

    let monday = assessment::week_start(Utc::now().date_naive());
    let commitment_id =
        queries::create_commitment(&state.db, user_id, payload.goal.trim(), monday).await?;

    let commitment = queries::get_commitment_by_id(&state.db, commitment_id).await?;
    Ok(Json(commitment))
}

pub async fn list_commitments(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> ApiResult<Json<Vec<Commitment>>> {
    let commitments = queries::list_commitments_by_user(&state.db, user_id).await?;
    Ok(Json(commitments))
}

#[derive(Debug, Deserialize)]
pub struct UpdateCommitmentStatus {
    pub status: CommitmentStatus,
}

pub async fn update_commitment_status(
    State(state): State<AppState>,
    Path(commitment_id): Path<i64>,
    Json(payload): Json<UpdateCommitmentStatus>,
) -> ApiResult<Json<Value>> {
    if payload.status == CommitmentStatus::Active {
        return Err(ApiError::Validation(
            "status must be completed or abandoned".into(),
        ));
    }

    let updated =
        queries::update_commitment_status(&state.db, commitment_id, payload.status.as_str())
            .await?;
    if !updated {
        return Err(ApiError::NotFound(format!(
            "active commitment {}",
            commitment_id
        )));
    }

    Ok(Json(
        json!({ "commitment_id": commitment_id, "status": payload.status.as_str() }),
    ))
}

/*==========Daily Assessments=========== */

#[derive(Debug, Deserialize)]
pub struct RecordAssessment {
    pub kept: bool,
    pub note: Option<String>,
}

pub async fn record_assessment(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Json(payload): Json<RecordAssessment>,
) -> ApiResult<Json<Assessment>> {
    queries::get_user_by_id(&state.db, user_id).await?;

    let today = Utc::now().date_naive();
    let assessment = assessment::record_daily_assessment(
        &state.db,
        user_id,
        payload.kept,
        payload.note.as_deref(),
        today,
    )
    .await?;

    Ok(Json(assessment))
}

pub async fn assessment_status(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> ApiResult<Json<StreakStatus>> {
    let today = Utc::now().date_naive();
    let status = assessment::get_assessment_status(&state.db, user_id, today).await?;
    Ok(Json(status))
}

/*==========Recurring Bills=========== */

#[derive(Debug, Deserialize)]
pub struct CreateBill {
    pub description: String,
    pub amount: Decimal,
    pub currency: Option<String>,
    pub period: BillPeriod,
    pub next_due_on: NaiveDate,
    #[serde(default)]
    pub autopay: bool,
}

pub async fn create_bill(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Json(payload): Json<CreateBill>,
) -> ApiResult<Json<Value>> {
    if payload.amount <= Decimal::ZERO {
        return Err(ApiError::Validation("amount must be positive".into()));
    }

    let user = queries::get_user_by_id(&state.db, user_id).await?;

    let new = NewBill {
        user_id,
        description: payload.description,
        amount: payload.amount,
        currency: payload.currency.unwrap_or(user.currency),
        period: payload.period,
        next_due_on: payload.next_due_on,
        autopay: payload.autopay,
    };

    let bill_id = queries::create_bill(&state.db, &new).await?;
    Ok(Json(json!({ "bill_id": bill_id })))
}

pub async fn list_bills(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> ApiResult<Json<Vec<RecurringBill>>> {
    let bills = queries::list_bills_by_user(&state.db, user_id).await?;
    Ok(Json(bills))
}

pub async fn delete_bill(
    State(state): State<AppState>,
    Path(bill_id): Path<i64>,
) -> ApiResult<Json<Value>> {
    let deleted = queries::delete_bill(&state.db, bill_id).await?;
    if !deleted {
        return Err(ApiError::NotFound(format!("bill {}", bill_id)));
    }
    Ok(Json(json!({ "deleted": bill_id })))
}

/*==========Reminders=========== */

pub async fn list_reminders(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> ApiResult<Json<Vec<Reminder>>> {
    let reminders = queries::list_reminders_by_user(&state.db, user_id).await?;
    Ok(Json(reminders))
}

pub async fn acknowledge_reminder(
    State(state): State<AppState>,
    Path(reminder_id): Path<i64>,
) -> ApiResult<Json<Value>> {
    let updated = queries::acknowledge_reminder(&state.db, reminder_id).await?;
    if !updated {
        return Err(ApiError::NotFound(format!("reminder {}", reminder_id)));
    }
    Ok(Json(json!({ "acknowledged": reminder_id })))
}
