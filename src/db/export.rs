use anyhow::{Context, Result};
use std::path::Path;

use super::{date_to_sql, Database};

impl Database {
    /// Write every expense to a CSV file, newest first. Returns the row count.
    pub(crate) fn export_to_csv(&self, path: &Path) -> Result<usize> {
        let expenses = self.get_expenses()?;
        let mut wtr = csv::Writer::from_path(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        wtr.write_record(["date", "category", "amount", "note"])?;
        for expense in &expenses {
            wtr.write_record([
                date_to_sql(expense.date),
                expense.category.clone(),
                format!("{:.2}", expense.amount),
                expense.note.clone(),
            ])?;
        }
        wtr.flush()?;
        tracing::info!(rows = expenses.len(), path = %path.display(), "exported expenses");
        Ok(expenses.len())
    }
}
