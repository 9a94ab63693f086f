use chrono::{Duration, Months, NaiveDate, Utc};
use sqlx::{Pool, Sqlite};
use tracing::{error, info, warn};

use crate::database::db::queries;
use crate::database::models::{BillPeriod, NewExpense};

const FIRE_HOUR: u32 = 0;
const FIRE_MINUTE: u32 = 5;

/// Daily payday/recurring-bill rollover loop.
pub async fn run(pool: Pool<Sqlite>) {
    loop {
        let next = super::next_daily(Utc::now(), FIRE_HOUR, FIRE_MINUTE);
        tokio::time::sleep(super::sleep_until(next)).await;

        let today = Utc::now().date_naive();
        match tick(&pool, today).await {
            Ok(rolled) => info!("rollover: advanced {} due bills", rolled),
            Err(e) => error!("rollover job failed: {e:#}"),
        }
    }
}

/// Process every bill due on or before `today`: book the expense for autopay
/// bills, then advance next_due_on by exactly one period. A bill several
/// periods behind catches up one period per daily run.
pub async fn tick(pool: &Pool<Sqlite>, today: NaiveDate) -> anyhow::Result<u32> {
    let due = queries::get_due_bills(pool, today).await?;
    let mut rolled = 0u32;

    for bill in due {
        let Some(period) = BillPeriod::parse(&bill.period) else {
            warn!(bill_id = bill.bill_id, period = %bill.period, "unknown bill period, skipping");
            continue;
        };

        if bill.autopay {
            let new = NewExpense {
                user_id: bill.user_id,
                title: bill.description.clone(),
                merchant: None,
                amount: bill.amount,
                currency: bill.currency.clone(),
                category: "bills".to_string(),
                spent_on: bill.next_due_on,
                source: "recurring".to_string(),
            };
            queries::create_expense(pool, &new).await?;
        }

        let next = advance_due_date(bill.next_due_on, period);
        queries::update_bill_due_date(pool, bill.bill_id, next).await?;
        rolled += 1;
    }

    Ok(rolled)
}

/// Shift a due date forward by one billing period. Month/year arithmetic
/// clamps to the last day of the target month (Jan 31 -> Feb 28).
pub fn advance_due_date(date: NaiveDate, period: BillPeriod) -> NaiveDate {
    match period {
        BillPeriod::Weekly => date + Duration::days(7),
        BillPeriod::Biweekly => date + Duration::days(14),
        BillPeriod::Monthly => date.checked_add_months(Months::new(1)).unwrap_or(date),
        BillPeriod::Yearly => date.checked_add_months(Months::new(12)).unwrap_or(date),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn weekly_and_biweekly_shift_by_days() {
        assert_eq!(advance_due_date(d(2026, 8, 6), BillPeriod::Weekly), d(2026, 8, 13));
        assert_eq!(advance_due_date(d(2026, 8, 6), BillPeriod::Biweekly), d(2026, 8, 20));
    }

    #[test]
    fn monthly_clamps_to_short_months() {
        assert_eq!(advance_due_date(d(2026, 1, 31), BillPeriod::Monthly), d(2026, 2, 28));
        assert_eq!(advance_due_date(d(2026, 8, 31), BillPeriod::Monthly), d(2026, 9, 30));
        assert_eq!(advance_due_date(d(2026, 8, 15), BillPeriod::Monthly), d(2026, 9, 15));
    }

    #[test]
    fn yearly_handles_leap_day() {
        assert_eq!(advance_due_date(d(2028, 2, 29), BillPeriod::Yearly), d(2029, 2, 28));
        assert_eq!(advance_due_date(d(2026, 7, 1), BillPeriod::Yearly), d(2027, 7, 1));
    }

    #[test]
    fn year_rolls_over_in_december() {
        assert_eq!(advance_due_date(d(2026, 12, 20), BillPeriod::Monthly), d(2027, 1, 20));
    }
}
