use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use sqlx::{Pool, Sqlite};

use crate::database::db::queries;
use crate::database::models::{Expense, User};
use crate::usecases::assessment::compute_streak;

const SNAPSHOT_WINDOW_DAYS: i64 = 30;

/// Compact view of a user's recent finances, fed into the AI prompts.
#[derive(Debug, Clone)]
pub struct SpendingSnapshot {
    pub currency: String,
    pub monthly_income: Decimal,
    pub window_days: i64,
    pub total_spent: Decimal,
    /// Category totals, largest first.
    pub by_category: Vec<(String, Decimal)>,
    pub bill_count: usize,
    pub bill_total: Decimal,
    pub streak_days: u32,
    pub active_goal: Option<String>,
}

pub async fn build_snapshot(
    pool: &Pool<Sqlite>,
    user: &User,
    today: NaiveDate,
) -> Result<SpendingSnapshot, sqlx::Error> {
    let since = today - Duration::days(SNAPSHOT_WINDOW_DAYS);
    let expenses = queries::list_expenses_since(pool, user.user_id, since).await?;
    let bills = queries::list_bills_by_user(pool, user.user_id).await?;
    let dates = queries::list_assessment_dates(pool, user.user_id).await?;
    let commitment = queries::get_active_commitment(pool, user.user_id).await?;

    let by_category = category_totals(&expenses);
    let total_spent = expenses.iter().map(|e| e.amount).sum();
    let bill_total = bills.iter().map(|b| b.amount).sum();
    let streak = compute_streak(&dates, today);

    Ok(SpendingSnapshot {
        currency: user.currency.clone(),
        monthly_income: user.monthly_income,
        window_days: SNAPSHOT_WINDOW_DAYS,
        total_spent,
        by_category,
        bill_count: bills.len(),
        bill_total,
        streak_days: streak.streak_days,
        active_goal: commitment.map(|c| c.goal),
    })
}

/// Sum amounts per category, largest total first.
pub fn category_totals(expenses: &[Expense]) -> Vec<(String, Decimal)> {
    let mut totals: BTreeMap<&str, Decimal> = BTreeMap::new();
    for e in expenses {
        *totals.entry(e.category.as_str()).or_insert(Decimal::ZERO) += e.amount;
    }

    let mut out: Vec<(String, Decimal)> = totals
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
    out.sort_by(|a, b| b.1.cmp(&a.1));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;
    use std::str::FromStr;

    fn expense(category: &str, amount: &str) -> Expense {
        Expense {
            expense_id: 0,
            user_id: 1,
            title: "t".into(),
            merchant: None,
            amount: Decimal::from_str(amount).unwrap(),
            currency: "USD".into(),
            category: category.into(),
            spent_on: NaiveDate::from_ymd_opt(2026, 8, 1).unwrap(),
            source: "manual".into(),
            exp_created_at: NaiveDateTime::default(),
        }
    }

    #[test]
    fn totals_grouped_and_sorted_descending() {
        let expenses = vec![
            expense("dining", "20.00"),
            expense("groceries", "55.50"),
            expense("dining", "12.25"),
            expense("transport", "3.00"),
        ];
        let totals = category_totals(&expenses);
        assert_eq!(totals[0], ("groceries".into(), Decimal::from_str("55.50").unwrap()));
        assert_eq!(totals[1], ("dining".into(), Decimal::from_str("32.25").unwrap()));
        assert_eq!(totals[2].0, "transport");
    }

    #[test]
    fn empty_expense_list_gives_no_totals() {
        assert!(category_totals(&[]).is_empty());
    }
}
