use chrono::{Datelike, Duration, Months, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::{Pool, Sqlite};

use crate::database::db::queries;
use crate::database::models::{Expense, RecurringBill, User};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CashFlowStatus {
    Healthy,
    Tight,
    Overspent,
}

#[derive(Debug, Clone, Serialize)]
pub struct CashFlowForecast {
    pub month_to_date_spent: Decimal,
    pub avg_daily_spend: Decimal,
    pub projected_month_spend: Decimal,
    pub upcoming_bill_total: Decimal,
    pub safe_to_spend: Decimal,
    pub status: CashFlowStatus,
}

pub async fn get_cash_flow_forecast(
    pool: &Pool<Sqlite>,
    user: &User,
    today: NaiveDate,
) -> Result<CashFlowForecast, sqlx::Error> {
    let month_start = today.with_day(1).unwrap_or(today);
    let month_end = end_of_month(today);

    let expenses = queries::list_expenses_since(pool, user.user_id, month_start).await?;
    let bills = queries::list_user_bills_due_by(pool, user.user_id, month_end).await?;

    Ok(build_forecast(today, user.monthly_income, &expenses, &bills))
}

/// Straight arithmetic over the month-to-date expense list: sum, daily
/// average, projection to month end, plus bills still due before month end.
pub fn build_forecast(
    today: NaiveDate,
    monthly_income: Decimal,
    expenses: &[Expense],
    bills: &[RecurringBill],
) -> CashFlowForecast {
    let spent: Decimal = expenses.iter().map(|e| e.amount).sum();

    let days_elapsed = Decimal::from(today.day()); // >= 1
    let avg_daily = (spent / days_elapsed).round_dp(2);

    let days_remaining = Decimal::from(days_in_month(today) - today.day());
    let projected = (spent + avg_daily * days_remaining).round_dp(2);

    // Bills already due are assumed to be in the expense list.
    let bill_total: Decimal = bills
        .iter()
        .filter(|b| b.next_due_on > today)
        .map(|b| b.amount)
        .sum();

    let safe_to_spend = (monthly_income - projected - bill_total).round_dp(2);

    let status = if safe_to_spend < Decimal::ZERO {
        CashFlowStatus::Overspent
    } else if monthly_income > Decimal::ZERO && safe_to_spend >= monthly_income * Decimal::new(1, 1)
    {
        CashFlowStatus::Healthy
    } else {
        CashFlowStatus::Tight
    };

    CashFlowForecast {
        month_to_date_spent: spent,
        avg_daily_spend: avg_daily,
        projected_month_spend: projected,
        upcoming_bill_total: bill_total,
        safe_to_spend,
        status,
    }
}

fn days_in_month(date: NaiveDate) -> u32 {
    let first = date.with_day(1).unwrap_or(date);
    match first.checked_add_months(Months::new(1)) {
        Some(next) => (next - first).num_days() as u32,
        None => 31,
    }
}

fn end_of_month(date: NaiveDate) -> NaiveDate {
    let first = date.with_day(1).unwrap_or(date);
    match first.checked_add_months(Months::new(1)) {
        Some(next) => next - Duration::days(1),
        None => date,
    }
}
