pub mod assessment;
pub mod commitment;
pub mod expense;
pub mod recurring_bill;
pub mod reminder;
pub mod score_snapshot;
pub mod user;

pub use assessment::Assessment;
pub use commitment::{Commitment, CommitmentStatus};
pub use expense::{Expense, NewExpense};
pub use recurring_bill::{BillPeriod, NewBill, RecurringBill};
pub use reminder::Reminder;
pub use score_snapshot::ScoreSnapshot;
pub use user::User;
