use std::str::FromStr;
use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;
use rust_decimal::Decimal;
use sqlx::{Pool, Sqlite};

use crate::database::db::queries;
use crate::database::models::{NewExpense, User};

fn dollar_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\$\s*([0-9]+(?:\.[0-9]{1,2})?)").unwrap())
}

fn bare_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"([0-9]+\.[0-9]{1,2})").unwrap())
}

/// Pull a dollar amount out of a free-text title like "Lunch $12.40".
/// A `$`-prefixed number wins; otherwise the first bare decimal is used.
/// Bare integers are ignored ("2 tacos" is a quantity, not a price).
pub fn amount_from_title(title: &str) -> Option<Decimal> {
    if let Some(caps) = dollar_re().captures(title) {
        return Decimal::from_str(&caps[1]).ok();
    }
    bare_re()
        .captures(title)
        .and_then(|caps| Decimal::from_str(&caps[1]).ok())
}

/// Create an expense from nothing but a title. Returns None when no amount
/// can be extracted (the handler turns that into a 400).
pub async fn create_quick_expense(
    pool: &Pool<Sqlite>,
    user: &User,
    title: &str,
    today: NaiveDate,
) -> Result<Option<i64>, sqlx::Error> {
    let Some(amount) = amount_from_title(title) else {
        return Ok(None);
    };

    let new = NewExpense {
        user_id: user.user_id,
        title: title.trim().to_string(),
        merchant: None,
        amount,
        currency: user.currency.clone(),
        category: "other".to_string(),
        spent_on: today,
        source: "quick".to_string(),
    };

    let id = queries::create_expense(pool, &new).await?;
    Ok(Some(id))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn dollar_prefixed_amounts() {
        assert_eq!(amount_from_title("Lunch $12.40"), Some(dec("12.40")));
        assert_eq!(amount_from_title("$ 7.5 parking"), Some(dec("7.5")));
        assert_eq!(amount_from_title("Coffee $4"), Some(dec("4")));
    }

    #[test]
    fn bare_decimal_fallback() {
        assert_eq!(amount_from_title("Lunch 12.99 downtown"), Some(dec("12.99")));
    }

    #[test]
    fn dollar_sign_beats_earlier_bare_number() {
        assert_eq!(amount_from_title("2.5 lbs apples $6.20"), Some(dec("6.20")));
    }

    #[test]
    fn integers_without_dollar_sign_are_not_amounts() {
        assert_eq!(amount_from_title("2 tacos"), None);
        assert_eq!(amount_from_title("no amount here"), None);
        assert_eq!(amount_from_title(""), None);
    }
}
