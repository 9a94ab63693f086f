use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::sqlite::SqliteRow;
use sqlx::{Pool, Row, Sqlite};
use std::str::FromStr;

use crate::database::models::{
    Assessment, Commitment, Expense, NewBill, NewExpense, RecurringBill, Reminder, User,
};

/*
This file contains the specific SQL query,
CRUD (Create, Read, Update, Delete) logic
and is responsible for interacting with the database.
 */

fn decimal_col(row: &SqliteRow, name: &str) -> Result<Decimal, sqlx::Error> {
    let text: String = row.try_get(name)?;
    Decimal::from_str(&text)
        .map_err(|e| sqlx::Error::Decode(format!("Invalid Decimal for {}: {}", name, e).into()))
}

/*==========User Queries=========== */

pub async fn create_user(
    pool: &Pool<Sqlite>,
    user_name: &str,
    email: &str,
    currency: &str,
    monthly_income: Decimal,
) -> Result<i64, sqlx::Error> {
    let row = sqlx::query(
        r#"
        INSERT INTO users (user_name, email, currency, monthly_income, user_created_at)
        VALUES (?, ?, ?, ?, datetime('now'))
        RETURNING user_id
        "#,
    )
    .bind(user_name)
    .bind(email)
    .bind(currency)
    .bind(monthly_income.to_string())
    .fetch_one(pool)
    .await?;

    row.try_get("user_id")
}

pub async fn get_user_by_id(pool: &Pool<Sqlite>, user_id: i64) -> Result<User, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT user_id, user_name, email, currency, monthly_income, user_created_at
        FROM users
        WHERE user_id = ?
        "#,
    )
    .bind(user_id)
    .fetch_one(pool)
    .await?;

    map_user(&row)
}

// Users that currently hold an active commitment (mid-week reminder audience).
pub async fn users_with_active_commitment(pool: &Pool<Sqlite>) -> Result<Vec<User>, sqlx::Error> {
    sqlx::query(
        r#"
        SELECT DISTINCT u.user_id, u.user_name, u.email, u.currency,
                        u.monthly_income, u.user_created_at
        FROM users u
        JOIN commitments c ON c.user_id = u.user_id
        WHERE c.status = 'active'
        ORDER BY u.user_id ASC
        "#,
    )
    .fetch_all(pool)
    .await?
    .iter()
    .map(map_user)
    .collect()
}

fn map_user(row: &SqliteRow) -> Result<User, sqlx::Error> {
    Ok(User {
        user_id: row.try_get("user_id")?,
        user_name: row.try_get("user_name")?,
        email: row.try_get("email")?,
        currency: row.try_get("currency")?,
        monthly_income: decimal_col(row, "monthly_income")?,
        user_created_at: row.try_get("user_created_at")?,
    })
}

/*==========Expense Queries=========== */

pub async fn create_expense(pool: &Pool<Sqlite>, new: &NewExpense) -> Result<i64, sqlx::Error> {
    let row = sqlx::query(
        r#"
        INSERT INTO expenses (
            user_id, title, merchant, amount, currency,
            category, spent_on, source, exp_created_at
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, datetime('now'))
        RETURNING expense_id
        "#,
    )
    .bind(new.user_id)
    .bind(&new.title)
    .bind(new.merchant.as_deref())
    .bind(new.amount.to_string())
    .bind(&new.currency)
    .bind(&new.category)
    .bind(new.spent_on)
    .bind(&new.source)
    .fetch_one(pool)
    .await?;

    row.try_get("expense_id")
}

pub async fn get_expense_by_id(
    pool: &Pool<Sqlite>,
    expense_id: i64,
) -> Result<Expense, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT expense_id, user_id, title, merchant, amount, currency,
               category, spent_on, source, exp_created_at
        FROM expenses
        WHERE expense_id = ?
        "#,
    )
    .bind(expense_id)
    .fetch_one(pool)
    .await?;

    map_expense(&row)
}

pub async fn list_expenses_by_user(
    pool: &Pool<Sqlite>,
    user_id: i64,
    limit: Option<i64>,
    offset: Option<i64>,
) -> Result<Vec<Expense>, sqlx::Error> {
    sqlx::query(
        r#"
        SELECT expense_id, user_id, title, merchant, amount, currency,
               category, spent_on, source, exp_created_at
        FROM expenses
        WHERE user_id = ?
        ORDER BY spent_on DESC, expense_id DESC
        LIMIT COALESCE(?, 200) OFFSET COALESCE(?, 0)
        "#,
    )
    .bind(user_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?
    .iter()
    .map(map_expense)
    .collect()
}

// Expenses on or after `since`, oldest first. Feeds snapshots and the forecast.
pub async fn list_expenses_since(
    pool: &Pool<Sqlite>,
    user_id: i64,
    since: NaiveDate,
) -> Result<Vec<Expense>, sqlx::Error> {
    sqlx::query(
        r#"
        SELECT expense_id, user_id, title, merchant, amount, currency,
               category, spent_on, source, exp_created_at
        FROM expenses
        WHERE user_id = ? AND spent_on >= ?
        ORDER BY spent_on ASC
        "#,
    )
    .bind(user_id)
    .bind(since)
    .fetch_all(pool)
    .await?
    .iter()
    .map(map_expense)
    .collect()
}

pub async fn delete_expense(pool: &Pool<Sqlite>, expense_id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM expenses WHERE expense_id = ?")
        .bind(expense_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

fn map_expense(row: &SqliteRow) -> Result<Expense, sqlx::Error> {
    Ok(Expense {
        expense_id: row.try_get("expense_id")?,
        user_id: row.try_get("user_id")?,
        title: row.try_get("title")?,
        merchant: row.try_get("merchant")?,
        amount: decimal_col(row, "amount")?,
        currency: row.try_get("currency")?,
        category: row.try_get("category")?,
        spent_on: row.try_get("spent_on")?,
        source: row.try_get("source")?,
        exp_created_at: row.try_get("exp_created_at")?,
    })
}

/*==========Commitment Queries=========== */

pub async fn create_commitment(
    pool: &Pool<Sqlite>,
    user_id: i64,
    goal: &str,
    week_start: NaiveDate,
) -> Result<i64, sqlx::Error> {
    let row = sqlx::query(
        r#"
        INSERT INTO commitments (user_id, goal, status, week_start, com_created_at)
        VALUES (?, ?, 'active', ?, datetime('now'))
        RETURNING commitment_id
        "#,
    )
    .bind(user_id)
    .bind(goal)
    .bind(week_start)
    .fetch_one(pool)
    .await?;

    row.try_get("commitment_id")
}

pub async fn get_commitment_by_id(
    pool: &Pool<Sqlite>,
    commitment_id: i64,
) -> Result<Commitment, sqlx::Error> {
    sqlx::query_as::<_, Commitment>(
        r#"
        SELECT commitment_id, user_id, goal, status, week_start, com_created_at
        FROM commitments
        WHERE commitment_id = ?
        "#,
    )
    .bind(commitment_id)
    .fetch_one(pool)
    .await
}

pub async fn list_commitments_by_user(
    pool: &Pool<Sqlite>,
    user_id: i64,
) -> Result<Vec<Commitment>, sqlx::Error> {
    sqlx::query_as::<_, Commitment>(
        r#"
        SELECT commitment_id, user_id, goal, status, week_start, com_created_at
        FROM commitments
        WHERE user_id = ?
        ORDER BY commitment_id DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

pub async fn get_active_commitment(
    pool: &Pool<Sqlite>,
    user_id: i64,
) -> Result<Option<Commitment>, sqlx::Error> {
    sqlx::query_as::<_, Commitment>(
        r#"
        SELECT commitment_id, user_id, goal, status, week_start, com_created_at
        FROM commitments
        WHERE user_id = ? AND status = 'active'
        ORDER BY commitment_id DESC
        LIMIT 1
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await
}

// Transitions are only allowed out of 'active'.
pub async fn update_commitment_status(
    pool: &Pool<Sqlite>,
    commitment_id: i64,
    status: &str,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE commitments
        SET status = ?
        WHERE commitment_id = ? AND status = 'active'
        "#,
    )
    .bind(status)
    .bind(commitment_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/*==========Assessment Queries=========== */

// One row per user per day; posting again the same day overwrites.
pub async fn upsert_assessment(
    pool: &Pool<Sqlite>,
    user_id: i64,
    assessed_on: NaiveDate,
    kept: bool,
    note: Option<&str>,
) -> Result<Assessment, sqlx::Error> {
    sqlx::query_as::<_, Assessment>(
        r#"
        INSERT INTO assessments (user_id, assessed_on, kept, note)
        VALUES (?, ?, ?, ?)
        ON CONFLICT(user_id, assessed_on)
        DO UPDATE SET kept = excluded.kept, note = excluded.note
        RETURNING assessment_id, user_id, assessed_on, kept, note
        "#,
    )
    .bind(user_id)
    .bind(assessed_on)
    .bind(kept)
    .bind(note)
    .fetch_one(pool)
    .await
}

pub async fn list_assessment_dates(
    pool: &Pool<Sqlite>,
    user_id: i64,
) -> Result<Vec<NaiveDate>, sqlx::Error> {
    sqlx::query_scalar::<_, NaiveDate>(
        r#"
        SELECT assessed_on
        FROM assessments
        WHERE user_id = ?
        ORDER BY assessed_on DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

pub async fn has_assessment_since(
    pool: &Pool<Sqlite>,
    user_id: i64,
    since: NaiveDate,
) -> Result<bool, sqlx::Error> {
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM assessments WHERE user_id = ? AND assessed_on >= ?",
    )
    .bind(user_id)
    .bind(since)
    .fetch_one(pool)
    .await?;

    Ok(count > 0)
}

/*==========Recurring Bill Queries=========== */

pub async fn create_bill(pool: &Pool<Sqlite>, new: &NewBill) -> Result<i64, sqlx::Error> {
    let row = sqlx::query(
        r#"
        INSERT INTO recurring_bills (
            user_id, description, amount, currency, period, next_due_on, autopay
        )
        VALUES (?, ?, ?, ?, ?, ?, ?)
        RETURNING bill_id
        "#,
    )
    .bind(new.user_id)
    .bind(&new.description)
    .bind(new.amount.to_string())
    .bind(&new.currency)
    .bind(new.period.as_str())
    .bind(new.next_due_on)
    .bind(new.autopay)
    .fetch_one(pool)
    .await?;

    row.try_get("bill_id")
}

pub async fn list_bills_by_user(
    pool: &Pool<Sqlite>,
    user_id: i64,
) -> Result<Vec<RecurringBill>, sqlx::Error> {
    sqlx::query(
        r#"
        SELECT bill_id, user_id, description, amount, currency, period, next_due_on, autopay
        FROM recurring_bills
        WHERE user_id = ?
        ORDER BY next_due_on ASC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?
    .iter()
    .map(map_bill)
    .collect()
}

// Bills for one user falling due on or before `by` (cash-flow horizon).
pub async fn list_user_bills_due_by(
    pool: &Pool<Sqlite>,
    user_id: i64,
    by: NaiveDate,
) -> Result<Vec<RecurringBill>, sqlx::Error> {
    sqlx::query(
        r#"
        SELECT bill_id, user_id, description, amount, currency, period, next_due_on, autopay
        FROM recurring_bills
        WHERE user_id = ? AND next_due_on <= ?
        ORDER BY next_due_on ASC
        "#,
    )
    .bind(user_id)
    .bind(by)
    .fetch_all(pool)
    .await?
    .iter()
    .map(map_bill)
    .collect()
}

// All bills due on or before `on`, across users (rollover job).
pub async fn get_due_bills(
    pool: &Pool<Sqlite>,
    on: NaiveDate,
) -> Result<Vec<RecurringBill>, sqlx::Error> {
    sqlx::query(
        r#"
        SELECT bill_id, user_id, description, amount, currency, period, next_due_on, autopay
        FROM recurring_bills
        WHERE next_due_on <= ?
        ORDER BY bill_id ASC
        "#,
    )
    .bind(on)
    .fetch_all(pool)
    .await?
    .iter()
    .map(map_bill)
    .collect()
}

pub async fn update_bill_due_date(
    pool: &Pool<Sqlite>,
    bill_id: i64,
    next_due_on: NaiveDate,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("UPDATE recurring_bills SET next_due_on = ? WHERE bill_id = ?")
        .bind(next_due_on)
        .bind(bill_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn delete_bill(pool: &Pool<Sqlite>, bill_id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM recurring_bills WHERE bill_id = ?")
        .bind(bill_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

fn map_bill(row: &SqliteRow) -> Result<RecurringBill, sqlx::Error> {
    Ok(RecurringBill {
        bill_id: row.try_get("bill_id")?,
        user_id: row.try_get("user_id")?,
        description: row.try_get("description")?,
        amount: decimal_col(row, "amount")?,
        currency: row.try_get("currency")?,
        period: row.try_get("period")?,
        next_due_on: row.try_get("next_due_on")?,
        autopay: row.try_get("autopay")?,
    })
}

/*==========Reminder Queries=========== */

pub async fn create_reminder(
    pool: &Pool<Sqlite>,
    user_id: i64,
    message: &str,
) -> Result<i64, sqlx::Error> {
    let row = sqlx::query(
        r#"
        INSERT INTO reminders (user_id, message, acknowledged, rem_created_at)
        VALUES (?, ?, 0, datetime('now'))
        RETURNING reminder_id
        "#,
    )
    .bind(user_id)
    .bind(message)
    .fetch_one(pool)
    .await?;

    row.try_get("reminder_id")
}

pub async fn list_reminders_by_user(
    pool: &Pool<Sqlite>,
    user_id: i64,
) -> Result<Vec<Reminder>, sqlx::Error> {
    sqlx::query_as::<_, Reminder>(
        r#"
        SELECT reminder_id, user_id, message, acknowledged, rem_created_at
        FROM reminders
        WHERE user_id = ?
        ORDER BY reminder_id DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

pub async fn acknowledge_reminder(
    pool: &Pool<Sqlite>,
    reminder_id: i64,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("UPDATE reminders SET acknowledged = 1 WHERE reminder_id = ?")
        .bind(reminder_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/*==========Score Snapshot Queries=========== */

pub async fn insert_score_snapshot(
    pool: &Pool<Sqlite>,
    user_id: i64,
    score: i64,
    summary: &str,
) -> Result<i64, sqlx::Error> {
    let row = sqlx::query(
        r#"
        INSERT INTO score_snapshots (user_id, score, summary, computed_at)
        VALUES (?, ?, ?, datetime('now'))
        RETURNING snapshot_id
        "#,
    )
    .bind(user_id)
    .bind(score)
    .bind(summary)
    .fetch_one(pool)
    .await?;

    row.try_get("snapshot_id")
}
