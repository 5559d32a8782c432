use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::{normalize_category, parse_amount};
use crate::error::ValidationError;

#[derive(Debug, Clone, PartialEq)]
pub struct Expense {
    pub id: i64,
    pub date: NaiveDate,
    pub category: String,
    pub amount: Decimal,
    pub note: String,
}

/// A validated expense that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    pub date: NaiveDate,
    /// Already normalized.
    pub category: String,
    pub amount: Decimal,
    pub note: String,
}

impl NewExpense {
    /// Validate raw form input. Nothing is written when this fails.
    pub fn parse(
        category: &str,
        amount: &str,
        note: &str,
        date: NaiveDate,
    ) -> Result<Self, ValidationError> {
        let category = normalize_category(category);
        if category.is_empty() {
            return Err(ValidationError::MissingCategory);
        }
        let amount = parse_amount("Amount", amount)?;
        Ok(Self {
            date,
            category,
            amount,
            note: note.trim().to_string(),
        })
    }
}

/// One expense on the spending-over-time series.
#[derive(Debug, Clone, PartialEq)]
pub struct SpendingPoint {
    pub date: NaiveDate,
    pub amount: Decimal,
    /// Running total up to and including this expense. Charts plot `amount`.
    pub cumulative: Decimal,
}
