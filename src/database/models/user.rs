use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub user_id: i64,
    pub user_name: String,
    pub email: String,
    pub currency: String,
    pub monthly_income: Decimal,
    pub user_created_at: NaiveDateTime,
}
