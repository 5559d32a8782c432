mod budgets;
mod expenses;
mod export;
mod schema;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::Connection;
use rust_decimal::Decimal;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use crate::models::AMOUNT_SCALE;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Handle on the expense database file.
///
/// Holds only the location. Every operation opens its own connection and
/// releases it before returning; nothing keeps the file open in between.
#[derive(Debug, Clone)]
pub(crate) struct Database {
    path: PathBuf,
}

impl Database {
    /// Open (creating if needed) the database at `path` and bring its schema
    /// up to date. Safe to call on every start.
    pub(crate) fn open(path: &Path) -> Result<Self> {
        let db = Self {
            path: path.to_path_buf(),
        };
        let conn = db.connect()?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")
            .context("Failed to set database pragmas")?;
        migrate(&conn).context("Database migration failed")?;
        Ok(db)
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    fn connect(&self) -> Result<Connection> {
        let conn = Connection::open(&self.path)
            .with_context(|| format!("Failed to open database: {}", self.path.display()))?;
        conn.busy_timeout(Duration::from_secs(5))?;
        Ok(conn)
    }
}

fn migrate(conn: &Connection) -> Result<()> {
    let current: i32 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;

    // Tables are (re)asserted on every start, whatever the recorded version.
    conn.execute_batch(schema::SCHEMA_V1)?;

    for &(from_version, sql) in schema::MIGRATIONS {
        if current <= from_version {
            conn.execute_batch(sql)?;
        }
    }

    if current < schema::CURRENT_VERSION {
        conn.pragma_update(None, "user_version", schema::CURRENT_VERSION)?;
        tracing::info!(
            from = current,
            to = schema::CURRENT_VERSION,
            "database schema migrated"
        );
    } else if current > schema::CURRENT_VERSION {
        tracing::warn!(
            version = current,
            "database was written by a newer release"
        );
    }
    Ok(())
}

/// Amounts are read back as `CAST(... AS TEXT)` so SQLite's float formatting
/// does the shortest-digits work; the result is then snapped to cents.
/// Values a `Decimal` cannot hold are a conversion error for column `idx`.
fn decimal_from_sql(idx: usize, text: &str) -> rusqlite::Result<Decimal> {
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .map(|d| d.round_dp(AMOUNT_SCALE))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
        })
}

fn date_from_sql(idx: usize, text: &str) -> rusqlite::Result<NaiveDate> {
    NaiveDate::parse_from_str(text, DATE_FORMAT).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}

fn date_to_sql(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests;
