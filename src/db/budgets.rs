use anyhow::{Context, Result};
use rusqlite::params;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use super::{decimal_from_sql, Database};
use crate::models::{current_month, Budget, BudgetStatus};

impl Database {
    // ── Budgets ───────────────────────────────────────────────

    pub(crate) fn get_budget_limit(&self, category: &str) -> Result<Option<Decimal>> {
        let conn = self.connect()?;
        let result = conn.query_row(
            "SELECT CAST(limit_amount AS TEXT) FROM budgets WHERE category = ?1",
            params![category],
            |row| row.get::<_, String>(0),
        );
        match result {
            Ok(limit) => Ok(Some(decimal_from_sql(0, &limit)?)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Set the limit for a category, replacing any existing row for it.
    pub(crate) fn upsert_budget(&self, budget: &Budget) -> Result<()> {
        let limit = budget
            .limit_amount
            .to_f64()
            .context("Limit does not fit in a REAL column")?;
        let conn = self.connect()?;
        conn.execute(
            "INSERT OR REPLACE INTO budgets (category, limit_amount) VALUES (?1, ?2)",
            params![budget.category, limit],
        )?;
        tracing::info!(
            category = %budget.category,
            limit = %budget.limit_amount,
            "budget set"
        );
        Ok(())
    }

    /// Every budget with what was spent against it in `month` (`YYYY-MM`).
    /// Budgets without matching expenses are included with zero spent.
    pub(crate) fn get_budget_status(&self, month: &str) -> Result<Vec<BudgetStatus>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(
            "SELECT b.category,
                    CAST(b.limit_amount AS TEXT),
                    CAST(COALESCE(SUM(e.amount), 0) AS TEXT)
             FROM budgets b
             LEFT JOIN expenses e
                    ON b.category = e.category AND strftime('%Y-%m', e.date) = ?1
             GROUP BY b.id, b.category, b.limit_amount
             ORDER BY b.category",
        )?;
        let rows = stmt.query_map(params![month], |row| {
            let limit: String = row.get(1)?;
            let spent: String = row.get(2)?;
            Ok(BudgetStatus {
                category: row.get(0)?,
                limit_amount: decimal_from_sql(1, &limit)?,
                spent: decimal_from_sql(2, &spent)?,
            })
        })?;
        let statuses = rows.collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(statuses)
    }

    pub(crate) fn get_budget_status_current_month(&self) -> Result<Vec<BudgetStatus>> {
        self.get_budget_status(&current_month())
    }
}
