use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Pool, Sqlite};
use std::str::FromStr;

use wisecoach::database::db::queries;
use wisecoach::database::models::{BillPeriod, NewBill, NewExpense};
use wisecoach::jobs::{reminder, rollover};

async fn test_pool() -> Pool<Sqlite> {
    // Single connection so the in-memory database is shared by every query.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory pool");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("migrations");

    pool
}

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

async fn seed_user(pool: &Pool<Sqlite>, email: &str) -> i64 {
    queries::create_user(pool, "testuser", email, "USD", dec("3000"))
        .await
        .unwrap()
}

fn expense(user_id: i64, amount: &str, spent_on: NaiveDate) -> NewExpense {
    NewExpense {
        user_id,
        title: "test expense".to_string(),
        merchant: None,
        amount: dec(amount),
        currency: "USD".to_string(),
        category: "other".to_string(),
        spent_on,
        source: "manual".to_string(),
    }
}

#[tokio::test]
async fn user_round_trip() {
    let pool = test_pool().await;
    let id = seed_user(&pool, "a@example.com").await;

    let user = queries::get_user_by_id(&pool, id).await.unwrap();
    assert_eq!(user.user_id, id);
    assert_eq!(user.email, "a@example.com");
    assert_eq!(user.monthly_income, dec("3000"));

    let missing = queries::get_user_by_id(&pool, id + 1).await;
    assert!(matches!(missing, Err(sqlx::Error::RowNotFound)));
}

#[tokio::test]
async fn expense_crud_and_window() {
    let pool = test_pool().await;
    let user_id = seed_user(&pool, "b@example.com").await;

    let e1 = queries::create_expense(&pool, &expense(user_id, "10.00", d(2026, 8, 1)))
        .await
        .unwrap();
    queries::create_expense(&pool, &expense(user_id, "20.50", d(2026, 8, 3)))
        .await
        .unwrap();
    queries::create_expense(&pool, &expense(user_id, "5.25", d(2026, 7, 1)))
        .await
        .unwrap();

    let fetched = queries::get_expense_by_id(&pool, e1).await.unwrap();
    assert_eq!(fetched.amount, dec("10.00"));

    let all = queries::list_expenses_by_user(&pool, user_id, None, None)
        .await
        .unwrap();
    assert_eq!(all.len(), 3);
    // Newest spent_on first.
    assert_eq!(all[0].spent_on, d(2026, 8, 3));

    let limited = queries::list_expenses_by_user(&pool, user_id, Some(1), Some(1))
        .await
        .unwrap();
    assert_eq!(limited.len(), 1);
    assert_eq!(limited[0].spent_on, d(2026, 8, 1));

    let windowed = queries::list_expenses_since(&pool, user_id, d(2026, 8, 1))
        .await
        .unwrap();
    assert_eq!(windowed.len(), 2);
    assert_eq!(windowed[0].spent_on, d(2026, 8, 1)); // oldest first

    assert!(queries::delete_expense(&pool, e1).await.unwrap());
    assert!(!queries::delete_expense(&pool, e1).await.unwrap());
}

#[tokio::test]
async fn commitment_status_transitions() {
    let pool = test_pool().await;
    let user_id = seed_user(&pool, "c@example.com").await;

    let id = queries::create_commitment(&pool, user_id, "walk to work", d(2026, 8, 3))
        .await
        .unwrap();

    let active = queries::get_active_commitment(&pool, user_id)
        .await
        .unwrap()
        .expect("active commitment");
    assert_eq!(active.commitment_id, id);
    assert_eq!(active.status, "active");

    assert!(queries::update_commitment_status(&pool, id, "completed")
        .await
        .unwrap());
    // Only transitions out of 'active' are allowed.
    assert!(!queries::update_commitment_status(&pool, id, "abandoned")
        .await
        .unwrap());

    assert!(queries::get_active_commitment(&pool, user_id)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn assessment_upsert_is_one_row_per_day() {
    let pool = test_pool().await;
    let user_id = seed_user(&pool, "d@example.com").await;

    let first = queries::upsert_assessment(&pool, user_id, d(2026, 8, 5), true, Some("ok"))
        .await
        .unwrap();
    let second = queries::upsert_assessment(&pool, user_id, d(2026, 8, 5), false, None)
        .await
        .unwrap();
    assert_eq!(first.assessment_id, second.assessment_id);
    assert!(!second.kept);
    assert!(second.note.is_none());

    queries::upsert_assessment(&pool, user_id, d(2026, 8, 6), true, None)
        .await
        .unwrap();

    let dates = queries::list_assessment_dates(&pool, user_id).await.unwrap();
    assert_eq!(dates, vec![d(2026, 8, 6), d(2026, 8, 5)]);

    assert!(queries::has_assessment_since(&pool, user_id, d(2026, 8, 3))
        .await
        .unwrap());
    assert!(!queries::has_assessment_since(&pool, user_id, d(2026, 8, 7))
        .await
        .unwrap());
}

#[tokio::test]
async fn rollover_tick_books_autopay_and_advances() {
    let pool = test_pool().await;
    let user_id = seed_user(&pool, "e@example.com").await;

    let autopay_bill = NewBill {
        user_id,
        description: "Rent".to_string(),
        amount: dec("1200.00"),
        currency: "USD".to_string(),
        period: BillPeriod::Monthly,
        next_due_on: d(2026, 8, 1),
        autopay: true,
    };
    let manual_bill = NewBill {
        description: "Water".to_string(),
        amount: dec("40.00"),
        period: BillPeriod::Weekly,
        next_due_on: d(2026, 8, 5),
        autopay: false,
        ..autopay_bill.clone()
    };
    let future_bill = NewBill {
        description: "Insurance".to_string(),
        next_due_on: d(2026, 9, 15),
        ..autopay_bill.clone()
    };
    let autopay_id = queries::create_bill(&pool, &autopay_bill).await.unwrap();
    let manual_id = queries::create_bill(&pool, &manual_bill).await.unwrap();
    let future_id = queries::create_bill(&pool, &future_bill).await.unwrap();

    let rolled = rollover::tick(&pool, d(2026, 8, 6)).await.unwrap();
    assert_eq!(rolled, 2);

    let bills = queries::list_bills_by_user(&pool, user_id).await.unwrap();
    let by_id = |id: i64| bills.iter().find(|b| b.bill_id == id).unwrap();
    assert_eq!(by_id(autopay_id).next_due_on, d(2026, 9, 1));
    assert_eq!(by_id(manual_id).next_due_on, d(2026, 8, 12));
    assert_eq!(by_id(future_id).next_due_on, d(2026, 9, 15));

    // Only the autopay bill was booked as an expense.
    let expenses = queries::list_expenses_by_user(&pool, user_id, None, None)
        .await
        .unwrap();
    assert_eq!(expenses.len(), 1);
    assert_eq!(expenses[0].title, "Rent");
    assert_eq!(expenses[0].source, "recurring");
    assert_eq!(expenses[0].category, "bills");
    assert_eq!(expenses[0].spent_on, d(2026, 8, 1));
}

#[tokio::test]
async fn reminder_tick_skips_users_who_checked_in() {
    let pool = test_pool().await;
    let quiet_user = seed_user(&pool, "f@example.com").await;
    let active_user = seed_user(&pool, "g@example.com").await;
    let no_commitment_user = seed_user(&pool, "h@example.com").await;

    queries::create_commitment(&pool, quiet_user, "cook at home", d(2026, 8, 3))
        .await
        .unwrap();
    queries::create_commitment(&pool, active_user, "no impulse buys", d(2026, 8, 3))
        .await
        .unwrap();
    // active_user already checked in this week (Monday is 2026-08-03).
    queries::upsert_assessment(&pool, active_user, d(2026, 8, 4), true, None)
        .await
        .unwrap();
    let _ = no_commitment_user;

    let created = reminder::tick(&pool, d(2026, 8, 6)).await.unwrap();
    assert_eq!(created, 1);

    let quiet_reminders = queries::list_reminders_by_user(&pool, quiet_user)
        .await
        .unwrap();
    assert_eq!(quiet_reminders.len(), 1);
    assert!(!quiet_reminders[0].acknowledged);

    assert!(queries::list_reminders_by_user(&pool, active_user)
        .await
        .unwrap()
        .is_empty());

    assert!(queries::acknowledge_reminder(&pool, quiet_reminders[0].reminder_id)
        .await
        .unwrap());
}

#[tokio::test]
async fn score_snapshot_insert() {
    let pool = test_pool().await;
    let user_id = seed_user(&pool, "i@example.com").await;

    let id = queries::insert_score_snapshot(&pool, user_id, 720, "Solid month.")
        .await
        .unwrap();
    assert!(id > 0);
}
