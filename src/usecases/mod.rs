pub mod assessment;
pub mod cash_flow;
pub mod coach_tip;
pub mod quick_add;
pub mod receipt_scan;
pub mod snapshot;
pub mod wise_score;
