use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{Pool, Sqlite};
use tracing::warn;

use crate::ai::{parse, prompt, AiClient};
use crate::database::db::queries;
use crate::database::models::{NewExpense, User};

const CATEGORIES: &[&str] = &[
    "groceries",
    "dining",
    "transport",
    "utilities",
    "entertainment",
    "health",
    "shopping",
    "bills",
    "other",
];

// Raw model output; every field is optional so a partial read still lands.
#[derive(Debug, Deserialize)]
struct ReceiptReply {
    merchant: Option<String>,
    total: Option<Decimal>,
    currency: Option<String>,
    spent_on: Option<String>,
    category: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReceiptDraft {
    pub merchant: String,
    pub total: Decimal,
    pub currency: String,
    pub spent_on: NaiveDate,
    pub category: String,
}

#[derive(Debug, Serialize)]
pub struct ReceiptScan {
    pub draft: ReceiptDraft,
    /// Set when the draft was parsed and stored as an expense.
    pub expense_id: Option<i64>,
    pub parsed: bool,
}

/// Run the receipt image through the vision endpoint and turn the reply into
/// a draft expense. On any failure the caller still gets a usable (empty)
/// draft to correct by hand.
pub async fn scan_receipt(
    pool: &Pool<Sqlite>,
    ai: &AiClient,
    user: &User,
    image_b64: &str,
    mime: &str,
    save: bool,
    today: NaiveDate,
) -> Result<ReceiptScan, sqlx::Error> {
    let (draft, parsed) = match ai
        .complete_vision(
            prompt::receipt_scan_system(),
            prompt::receipt_scan_user(),
            image_b64,
            mime,
        )
        .await
    {
        Ok(raw) => match parse::parse_reply::<ReceiptReply>(&raw) {
            Some(reply) => (normalize_reply(reply, user, today), true),
            None => {
                warn!(user_id = user.user_id, "receipt reply was not parseable");
                (fallback_draft(user, today), false)
            }
        },
        Err(e) => {
            warn!(user_id = user.user_id, "receipt completion failed: {e:#}");
            (fallback_draft(user, today), false)
        }
    };

    let expense_id = if save && parsed {
        let new = NewExpense {
            user_id: user.user_id,
            title: if draft.merchant.is_empty() {
                "Receipt".to_string()
            } else {
                draft.merchant.clone()
            },
            merchant: Some(draft.merchant.clone()).filter(|m| !m.is_empty()),
            amount: draft.total,
            currency: draft.currency.clone(),
            category: draft.category.clone(),
            spent_on: draft.spent_on,
            source: "receipt".to_string(),
        };
        Some(queries::create_expense(pool, &new).await?)
    } else {
        None
    };

    Ok(ReceiptScan {
        draft,
        expense_id,
        parsed,
    })
}

fn normalize_reply(reply: ReceiptReply, user: &User, today: NaiveDate) -> ReceiptDraft {
    let spent_on = reply
        .spent_on
        .as_deref()
        .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
        .unwrap_or(today);

    ReceiptDraft {
        merchant: reply.merchant.unwrap_or_default(),
        total: reply.total.unwrap_or(Decimal::ZERO).abs(),
        currency: reply
            .currency
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| user.currency.clone()),
        spent_on,
        category: normalize_category(reply.category.as_deref()),
    }
}

fn fallback_draft(user: &User, today: NaiveDate) -> ReceiptDraft {
    ReceiptDraft {
        merchant: String::new(),
        total: Decimal::ZERO,
        currency: user.currency.clone(),
        spent_on: today,
        category: "other".to_string(),
    }
}

fn normalize_category(raw: Option<&str>) -> String {
    match raw {
        Some(c) => {
            let lower = c.trim().to_lowercase();
            if CATEGORIES.contains(&lower.as_str()) {
                lower
            } else {
                "other".to_string()
            }
        }
        None => "other".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;
    use std::str::FromStr;

    fn user() -> User {
        User {
            user_id: 1,
            user_name: "u".into(),
            email: "u@example.com".into(),
            currency: "EUR".into(),
            monthly_income: Decimal::ZERO,
            user_created_at: NaiveDateTime::default(),
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 6).unwrap()
    }

    #[test]
    fn full_reply_maps_through() {
        let reply = ReceiptReply {
            merchant: Some("Metro".into()),
            total: Some(Decimal::from_str("45.45").unwrap()),
            currency: Some("CAD".into()),
            spent_on: Some("2026-08-02".into()),
            category: Some("Groceries".into()),
        };
        let draft = normalize_reply(reply, &user(), today());
        assert_eq!(draft.merchant, "Metro");
        assert_eq!(draft.total, Decimal::from_str("45.45").unwrap());
        assert_eq!(draft.currency, "CAD");
        assert_eq!(draft.spent_on, NaiveDate::from_ymd_opt(2026, 8, 2).unwrap());
        assert_eq!(draft.category, "groceries");
    }

    #[test]
    fn nulls_fall_back_to_user_defaults() {
        let reply = ReceiptReply {
            merchant: None,
            total: None,
            currency: None,
            spent_on: Some("08/02/2026".into()), // wrong format
            category: Some("space travel".into()),
        };
        let draft = normalize_reply(reply, &user(), today());
        assert_eq!(draft.merchant, "");
        assert_eq!(draft.total, Decimal::ZERO);
        assert_eq!(draft.currency, "EUR");
        assert_eq!(draft.spent_on, today());
        assert_eq!(draft.category, "other");
    }

    #[test]
    fn negative_total_is_made_positive() {
        let reply = ReceiptReply {
            merchant: None,
            total: Some(Decimal::from_str("-12.00").unwrap()),
            currency: None,
            spent_on: None,
            category: None,
        };
        let draft = normalize_reply(reply, &user(), today());
        assert_eq!(draft.total, Decimal::from_str("12.00").unwrap());
    }
}
