use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
pub struct RecurringBill {
    pub bill_id: i64,
    pub user_id: i64,
    pub description: String,
    pub amount: Decimal,
    pub currency: String,
    pub period: String, // weekly/biweekly/monthly/yearly
    pub next_due_on: NaiveDate,
    pub autopay: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewBill {
    pub user_id: i64,
    pub description: String,
    pub amount: Decimal,
    pub currency: String,
    pub period: BillPeriod,
    pub next_due_on: NaiveDate,
    pub autopay: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillPeriod {
    Weekly,
    Biweekly,
    Monthly,
    Yearly,
}

impl BillPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Weekly => "weekly",
            Self::Biweekly => "biweekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "weekly" => Some(Self::Weekly),
            "biweekly" => Some(Self::Biweekly),
            "monthly" => Some(Self::Monthly),
            "yearly" => Some(Self::Yearly),
            _ => None,
        }
    }
}
