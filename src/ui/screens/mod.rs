pub(crate) mod add_expense;
pub(crate) mod budgets;
pub(crate) mod dashboard;
pub(crate) mod expenses;
