use anyhow::{Context, Result};
use rusqlite::params;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use super::{date_from_sql, date_to_sql, decimal_from_sql, Database};
use crate::models::{Expense, NewExpense, SpendingPoint};

impl Database {
    // ── Expenses ──────────────────────────────────────────────

    pub(crate) fn insert_expense(&self, expense: &NewExpense) -> Result<i64> {
        let amount = expense
            .amount
            .to_f64()
            .context("Amount does not fit in a REAL column")?;
        let conn = self.connect()?;
        conn.execute(
            "INSERT INTO expenses (date, category, amount, note) VALUES (?1, ?2, ?3, ?4)",
            params![
                date_to_sql(expense.date),
                expense.category,
                amount,
                expense.note,
            ],
        )?;
        let id = conn.last_insert_rowid();
        tracing::debug!(
            id,
            category = %expense.category,
            amount = %expense.amount,
            "expense recorded"
        );
        Ok(id)
    }

    /// Every expense, most recent date first.
    pub(crate) fn get_expenses(&self) -> Result<Vec<Expense>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(
            "SELECT id, date, category, CAST(amount AS TEXT), note
             FROM expenses
             ORDER BY date DESC, id DESC",
        )?;
        let rows = stmt.query_map([], |row| {
            let date: String = row.get(1)?;
            let amount: String = row.get(3)?;
            Ok(Expense {
                id: row.get(0)?,
                date: date_from_sql(1, &date)?,
                category: row.get(2)?,
                amount: decimal_from_sql(3, &amount)?,
                note: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
            })
        })?;
        let expenses = rows.collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(expenses)
    }

    /// Number of expenses and their all-time total.
    pub(crate) fn get_expense_totals(&self) -> Result<(i64, Decimal)> {
        let conn = self.connect()?;
        let (count, total): (i64, String) = conn.query_row(
            "SELECT COUNT(*), CAST(COALESCE(SUM(amount), 0) AS TEXT) FROM expenses",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;
        Ok((count, decimal_from_sql(1, &total)?))
    }

    /// All-time total per category, largest first.
    pub(crate) fn get_spending_by_category(&self) -> Result<Vec<(String, Decimal)>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(
            "SELECT category, CAST(SUM(amount) AS TEXT)
             FROM expenses
             GROUP BY category
             ORDER BY SUM(amount) DESC, category ASC",
        )?;
        let rows = stmt.query_map([], |row| {
            let name: String = row.get(0)?;
            let amt_str: String = row.get(1)?;
            Ok((name, decimal_from_sql(1, &amt_str)?))
        })?;
        let spending = rows.collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(spending)
    }

    /// One point per expense in date order, with a running total.
    pub(crate) fn get_spending_over_time(&self) -> Result<Vec<SpendingPoint>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(
            "SELECT date, CAST(amount AS TEXT)
             FROM expenses
             ORDER BY date ASC, id ASC",
        )?;
        let rows = stmt.query_map([], |row| {
            let date: String = row.get(0)?;
            let amount: String = row.get(1)?;
            Ok((date_from_sql(0, &date)?, decimal_from_sql(1, &amount)?))
        })?;
        let pairs = rows.collect::<std::result::Result<Vec<_>, _>>()?;

        let mut running = Decimal::ZERO;
        let mut points = Vec::with_capacity(pairs.len());
        for (date, amount) in pairs {
            running = running
                .checked_add(amount)
                .context("Running spending total overflowed")?;
            points.push(SpendingPoint {
                date,
                amount,
                cumulative: running,
            });
        }
        Ok(points)
    }

    /// Total spent in `category` during `month` (`YYYY-MM`). Zero when nothing
    /// matches. The category is compared exactly, so pass a normalized name.
    pub(crate) fn get_category_month_total(&self, category: &str, month: &str) -> Result<Decimal> {
        let conn = self.connect()?;
        let total: String = conn.query_row(
            "SELECT CAST(COALESCE(SUM(amount), 0) AS TEXT) FROM expenses
             WHERE category = ?1 AND strftime('%Y-%m', date) = ?2",
            params![category, month],
            |row| row.get(0),
        )?;
        Ok(decimal_from_sql(0, &total)?)
    }
}
