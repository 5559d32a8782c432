use anyhow::Result;
use chrono::Local;

use super::form::Form;
use super::util::format_amount;
use crate::alert::{check_budget_alert, BudgetAlert};
use crate::db::Database;
use crate::models::*;
use crate::report::Dashboard;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Dashboard,
    AddExpense,
    Expenses,
    Budgets,
}

impl Screen {
    pub(crate) fn all() -> &'static [Screen] {
        &[
            Self::Dashboard,
            Self::AddExpense,
            Self::Expenses,
            Self::Budgets,
        ]
    }

    pub(crate) fn has_form(&self) -> bool {
        matches!(self, Self::AddExpense | Self::Budgets)
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dashboard => write!(f, "Dashboard"),
            Self::AddExpense => write!(f, "Add Expense"),
            Self::Expenses => write!(f, "View All Expenses"),
            Self::Budgets => write!(f, "Manage Budgets"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
    Form,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
            Self::Form => write!(f, "INPUT"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StatusKind {
    Info,
    Success,
    Error,
}

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) status_message: String,
    pub(crate) status_kind: StatusKind,
    pub(crate) show_help: bool,
    pub(crate) current_month: String,

    // Dashboard
    pub(crate) dashboard: Dashboard,

    // View all
    pub(crate) expenses: Vec<Expense>,
    pub(crate) expense_index: usize,
    pub(crate) expense_scroll: usize,

    // Add expense
    pub(crate) expense_form: Form,
    pub(crate) last_alert: Option<BudgetAlert>,

    // Budgets
    pub(crate) budget_form: Form,
    pub(crate) budget_status: Vec<BudgetStatus>,
    pub(crate) budget_index: usize,
    pub(crate) budget_scroll: usize,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,
}

impl App {
    pub(crate) fn new() -> Self {
        Self {
            running: true,
            screen: Screen::Dashboard,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            status_message: String::new(),
            status_kind: StatusKind::Info,
            show_help: false,
            current_month: current_month(),

            dashboard: Dashboard::default(),

            expenses: Vec::new(),
            expense_index: 0,
            expense_scroll: 0,

            expense_form: Form::expense(),
            last_alert: None,

            budget_form: Form::budget(),
            budget_status: Vec::new(),
            budget_index: 0,
            budget_scroll: 0,

            visible_rows: 20,
        }
    }

    pub(crate) fn refresh_dashboard(&mut self, db: &Database) -> Result<()> {
        self.dashboard = Dashboard::load(db)?;
        Ok(())
    }

    pub(crate) fn refresh_expenses(&mut self, db: &Database) -> Result<()> {
        self.expenses = db.get_expenses()?;
        if self.expense_index >= self.expenses.len() {
            self.expense_index = self.expenses.len().saturating_sub(1);
        }
        self.expense_scroll = self.expense_scroll.min(self.expense_index);
        Ok(())
    }

    pub(crate) fn refresh_budgets(&mut self, db: &Database) -> Result<()> {
        // Month can roll over while the app is open
        self.current_month = current_month();
        self.budget_status = db.get_budget_status(&self.current_month)?;
        if self.budget_index >= self.budget_status.len() {
            self.budget_index = self.budget_status.len().saturating_sub(1);
        }
        self.budget_scroll = self.budget_scroll.min(self.budget_index);
        Ok(())
    }

    pub(crate) fn refresh_all(&mut self, db: &Database) -> Result<()> {
        self.refresh_dashboard(db)?;
        self.refresh_expenses(db)?;
        self.refresh_budgets(db)?;
        Ok(())
    }

    /// Validate, store, and re-check the category's budget. Returns `false`
    /// (with the reason in the status line) when the input was rejected.
    pub(crate) fn record_expense(
        &mut self,
        db: &Database,
        category: &str,
        amount: &str,
        note: &str,
    ) -> Result<bool> {
        let today = Local::now().date_naive();
        let expense = match NewExpense::parse(category, amount, note, today) {
            Ok(e) => e,
            Err(e) => {
                self.set_error(e.to_string());
                return Ok(false);
            }
        };

        db.insert_expense(&expense)?;
        self.refresh_all(db)?;
        self.last_alert = check_budget_alert(db, &expense.category, &self.current_month)?;
        self.set_success(format!(
            "Added Expense: {} - {}",
            expense.category,
            format_amount(expense.amount)
        ));
        Ok(true)
    }

    pub(crate) fn set_budget(&mut self, db: &Database, category: &str, limit: &str) -> Result<bool> {
        let budget = match Budget::parse(category, limit) {
            Ok(b) => b,
            Err(e) => {
                self.set_error(e.to_string());
                return Ok(false);
            }
        };

        db.upsert_budget(&budget)?;
        self.refresh_budgets(db)?;
        if let Some(idx) = self
            .budget_status
            .iter()
            .position(|s| s.category == budget.category)
        {
            self.budget_index = idx;
        }
        self.set_success(format!(
            "Budget for '{}' set to {}.",
            budget.category,
            format_amount(budget.limit_amount)
        ));
        Ok(true)
    }

    pub(crate) fn submit_expense_form(&mut self, db: &Database) -> Result<()> {
        let category = self.expense_form.value(Form::CATEGORY).to_string();
        let amount = self.expense_form.value(Form::AMOUNT).to_string();
        let note = self.expense_form.value(Form::NOTE).to_string();
        if self.record_expense(db, &category, &amount, &note)? {
            self.expense_form.clear();
            self.input_mode = InputMode::Normal;
        }
        Ok(())
    }

    pub(crate) fn submit_budget_form(&mut self, db: &Database) -> Result<()> {
        let category = self.budget_form.value(Form::CATEGORY).to_string();
        let limit = self.budget_form.value(Form::AMOUNT).to_string();
        if self.set_budget(db, &category, &limit)? {
            self.budget_form.clear();
            self.input_mode = InputMode::Normal;
        }
        Ok(())
    }

    /// Form belonging to the current screen, if it has one.
    pub(crate) fn active_form_mut(&mut self) -> Option<&mut Form> {
        match self.screen {
            Screen::AddExpense => Some(&mut self.expense_form),
            Screen::Budgets => Some(&mut self.budget_form),
            Screen::Dashboard | Screen::Expenses => None,
        }
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
        self.status_kind = StatusKind::Info;
    }

    pub(crate) fn set_success(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
        self.status_kind = StatusKind::Success;
    }

    pub(crate) fn set_error(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
        self.status_kind = StatusKind::Error;
    }
}
