mod amount;
mod budget;
mod category;
mod expense;

pub use amount::{parse_amount, AMOUNT_SCALE};
pub use budget::{Budget, BudgetStatus};
pub use category::normalize_category;
pub use expense::{Expense, NewExpense, SpendingPoint};

/// Current calendar month on the local clock, as `YYYY-MM`.
pub fn current_month() -> String {
    chrono::Local::now().format("%Y-%m").to_string()
}
