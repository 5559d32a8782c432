use anyhow::Result;
use rust_decimal::Decimal;

use crate::db::Database;
use crate::ui::util::format_amount;

/// Spending at or above this share of the limit raises a warning.
pub(crate) const WARNING_RATIO: Decimal = Decimal::from_parts(9, 0, 0, false, 1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Severity {
    Warning,
    Exceeded,
}

/// Outcome of comparing a category's monthly spend with its limit.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum BudgetAlert {
    Warning {
        category: String,
        spent: Decimal,
        limit: Decimal,
        remaining: Decimal,
    },
    Exceeded {
        category: String,
        spent: Decimal,
        limit: Decimal,
        overage: Decimal,
    },
}

impl BudgetAlert {
    pub(crate) fn severity(&self) -> Severity {
        match self {
            Self::Warning { .. } => Severity::Warning,
            Self::Exceeded { .. } => Severity::Exceeded,
        }
    }

    pub(crate) fn category(&self) -> &str {
        match self {
            Self::Warning { category, .. } | Self::Exceeded { category, .. } => category,
        }
    }
}

impl std::fmt::Display for BudgetAlert {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Exceeded {
                category,
                spent,
                limit,
                overage,
            } => write!(
                f,
                "BUDGET ALERT: You have exceeded your budget for '{category}' by {} this month. (Spent: {} of {})",
                format_amount(*overage),
                format_amount(*spent),
                format_amount(*limit),
            ),
            Self::Warning {
                category,
                spent,
                limit,
                remaining,
            } => write!(
                f,
                "BUDGET WARNING: You are close to your budget for '{category}'. Only {} remaining. (Spent: {} of {})",
                format_amount(*remaining),
                format_amount(*spent),
                format_amount(*limit),
            ),
        }
    }
}

/// Decide whether `spent` this month warrants an alert against `limit`.
///
/// Over the limit is exceeded (spending exactly the limit is not); from 90%
/// of the limit up to the limit is a warning. No limit, no alert.
pub(crate) fn evaluate(category: &str, limit: Option<Decimal>, spent: Decimal) -> Option<BudgetAlert> {
    let limit = limit?;
    if spent > limit {
        Some(BudgetAlert::Exceeded {
            category: category.to_string(),
            spent,
            limit,
            overage: spent - limit,
        })
    } else if spent >= limit * WARNING_RATIO {
        Some(BudgetAlert::Warning {
            category: category.to_string(),
            spent,
            limit,
            remaining: limit - spent,
        })
    } else {
        None
    }
}

/// Re-read the limit and the month's total for an already-normalized
/// `category` and evaluate them. `month` is `YYYY-MM`; callers pass the
/// current month, not the month of the expense that triggered the check.
pub(crate) fn check_budget_alert(
    db: &Database,
    category: &str,
    month: &str,
) -> Result<Option<BudgetAlert>> {
    let Some(limit) = db.get_budget_limit(category)? else {
        return Ok(None);
    };
    let spent = db.get_category_month_total(category, month)?;
    let alert = evaluate(category, Some(limit), spent);
    if let Some(ref a) = alert {
        tracing::info!(category, severity = ?a.severity(), %spent, %limit, "budget alert");
    }
    Ok(alert)
}
