use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use super::{normalize_category, parse_amount};
use crate::error::ValidationError;

/// Monthly spending ceiling for one category.
#[derive(Debug, Clone, PartialEq)]
pub struct Budget {
    pub category: String,
    pub limit_amount: Decimal,
}

impl Budget {
    pub fn new(category: String, limit_amount: Decimal) -> Self {
        Self {
            category,
            limit_amount,
        }
    }

    pub fn parse(category: &str, limit: &str) -> Result<Self, ValidationError> {
        let category = normalize_category(category);
        if category.is_empty() {
            return Err(ValidationError::MissingCategory);
        }
        let limit_amount = parse_amount("Limit", limit)?;
        Ok(Self::new(category, limit_amount))
    }
}

/// A budget joined with what has been spent against it in one month.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetStatus {
    pub category: String,
    pub limit_amount: Decimal,
    pub spent: Decimal,
}

impl BudgetStatus {
    /// Negative once the budget is overspent.
    pub fn remaining(&self) -> Decimal {
        self.limit_amount - self.spent
    }

    /// Fraction of the limit used, capped at 1.0 for progress bars.
    pub fn progress(&self) -> f64 {
        if self.limit_amount <= Decimal::ZERO {
            return 0.0;
        }
        (self.spent / self.limit_amount)
            .to_f64()
            .unwrap_or(0.0)
            .clamp(0.0, 1.0)
    }

    pub fn is_over(&self) -> bool {
        self.remaining() < Decimal::ZERO
    }
}
