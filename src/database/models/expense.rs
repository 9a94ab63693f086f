use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
pub struct Expense {
    pub expense_id: i64,
    pub user_id: i64,
    pub title: String,
    pub merchant: Option<String>,
    pub amount: Decimal,
    pub currency: String,
    pub category: String,
    pub spent_on: NaiveDate,
    pub source: String, // manual/quick/receipt/recurring
    pub exp_created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewExpense {
    pub user_id: i64,
    pub title: String,
    pub merchant: Option<String>,
    pub amount: Decimal,
    pub currency: String,
    pub category: String,
    pub spent_on: NaiveDate,
    pub source: String,
}

