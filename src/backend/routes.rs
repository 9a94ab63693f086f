use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::backend::{handlers, insights, AppState};

pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/api/users", post(handlers::create_user))
        .route("/api/users/{user_id}", get(handlers::get_user))
        .route(
            "/api/users/{user_id}/expenses",
            get(handlers::list_expenses).post(handlers::create_expense),
        )
        .route(
            "/api/users/{user_id}/expenses/quick",
            post(handlers::quick_add_expense),
        )
        .route("/api/expenses/{expense_id}", delete(handlers::delete_expense))
        .route(
            "/api/users/{user_id}/commitments",
            get(handlers::list_commitments).post(handlers::create_commitment),
        )
        .route(
            "/api/commitments/{commitment_id}/status",
            put(handlers::update_commitment_status),
        )
        .route(
            "/api/users/{user_id}/assessments",
            post(handlers::record_assessment),
        )
        .route(
            "/api/users/{user_id}/assessments/status",
            get(handlers::assessment_status),
        )
        .route(
            "/api/users/{user_id}/bills",
            get(handlers::list_bills).post(handlers::create_bill),
        )
        .route("/api/bills/{bill_id}", delete(handlers::delete_bill))
        .route("/api/users/{user_id}/reminders", get(handlers::list_reminders))
        .route(
            "/api/reminders/{reminder_id}/ack",
            post(handlers::acknowledge_reminder),
        )
        .route(
            "/api/users/{user_id}/insights/wise-score",
            get(insights::wise_score),
        )
        .route(
            "/api/users/{user_id}/insights/cash-flow",
            get(insights::cash_flow),
        )
        .route("/api/users/{user_id}/coach/tip", get(insights::coach_tip))
        .route(
            "/api/users/{user_id}/receipts/scan",
            post(insights::scan_receipt),
        )
}
