use anyhow::Result;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::db::Database;
use crate::models::{SpendingPoint, AMOUNT_SCALE};

/// Headline numbers across every recorded expense.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub(crate) struct DashboardSummary {
    pub(crate) total: Decimal,
    pub(crate) count: i64,
}

impl DashboardSummary {
    pub(crate) fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub(crate) fn average(&self) -> Option<Decimal> {
        if self.count <= 0 {
            return None;
        }
        Some((self.total / Decimal::from(self.count)).round_dp(AMOUNT_SCALE))
    }
}

/// Everything the dashboard shows, loaded in one go.
#[derive(Debug, Clone, Default)]
pub(crate) struct Dashboard {
    pub(crate) summary: DashboardSummary,
    pub(crate) by_category: Vec<(String, Decimal)>,
    pub(crate) over_time: Vec<SpendingPoint>,
}

impl Dashboard {
    pub(crate) fn load(db: &Database) -> Result<Self> {
        let (count, total) = db.get_expense_totals()?;
        Ok(Self {
            summary: DashboardSummary { total, count },
            by_category: db.get_spending_by_category()?,
            over_time: db.get_spending_over_time()?,
        })
    }
}

/// Chart coordinates for the spending-over-time line: x is days since the
/// first expense, y is the individual expense amount (not the running total).
pub(crate) fn chart_points(over_time: &[SpendingPoint]) -> Vec<(f64, f64)> {
    let Some(first) = over_time.first() else {
        return Vec::new();
    };
    over_time
        .iter()
        .map(|p| {
            let x = (p.date - first.date).num_days() as f64;
            (x, p.amount.to_f64().unwrap_or(0.0))
        })
        .collect()
}
