use anyhow::Result;
use chrono::Local;
use std::path::PathBuf;

use crate::alert::check_budget_alert;
use crate::db::Database;
use crate::models::{current_month, parse_amount, Budget, NewExpense};
use crate::report::Dashboard;
use crate::ui::util::{format_amount, truncate};

pub(crate) fn as_cli(args: &[String], db: &Database) -> Result<()> {
    match args[1].as_str() {
        "add" => cli_add(&args[2..], db),
        "list" | "ls" => cli_list(db),
        "summary" | "s" => cli_summary(db),
        "budget" => cli_budget(&args[2..], db),
        "budgets" | "b" => cli_budgets(db),
        "export" => cli_export(&args[2..], db),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("expensetui {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("ExpenseTUI - local-only personal expense tracker");
    println!();
    println!("Usage: expensetui [--db <path>] [command]");
    println!();
    println!("Commands:");
    println!("  (none)                        Launch interactive TUI");
    println!("  add <category> <amount> [note]  Record an expense dated today");
    println!("                                (category may span several words)");
    println!("  list, ls                      List all expenses, newest first");
    println!("  summary, s                    Totals and spending by category");
    println!("  budget <category> <limit>     Set a monthly budget for a category");
    println!("  budgets, b                    Budget status for the current month");
    println!("  export [path]                 Export all expenses to CSV");
    println!("  --help, -h                    Show this help");
    println!("  --version, -V                 Show version");
    println!();
    println!("Environment:");
    println!("  EXPENSETUI_DB                 Database path (overridden by --db)");
    println!("  EXPENSETUI_LOG                Log filter, e.g. debug (default: warn)");
}

fn cli_add(args: &[String], db: &Database) -> Result<()> {
    if args.len() < 2 {
        anyhow::bail!("Usage: expensetui add <category> <amount> [note]");
    }

    // Category words run up to the first argument that reads as an amount
    let pos = args
        .iter()
        .skip(1)
        .position(|a| parse_amount("Amount", a).is_ok())
        .map_or(1, |i| i + 1);
    let category = args[..pos].join(" ");
    let note = args[pos + 1..].join(" ");
    let today = Local::now().date_naive();
    let expense = NewExpense::parse(&category, &args[pos], &note, today)?;
    db.insert_expense(&expense)?;
    println!(
        "Added Expense: {} - {}",
        expense.category,
        format_amount(expense.amount)
    );

    if let Some(alert) = check_budget_alert(db, &expense.category, &current_month())? {
        println!("{alert}");
    }
    Ok(())
}

fn cli_list(db: &Database) -> Result<()> {
    let expenses = db.get_expenses()?;
    if expenses.is_empty() {
        println!("No expenses recorded yet.");
        return Ok(());
    }

    println!(
        "{:<5} {:<12} {:<18} {:>14}  Note",
        "#", "Date", "Category", "Amount"
    );
    println!("{}", "─".repeat(70));
    for (i, expense) in expenses.iter().enumerate() {
        println!(
            "{:<5} {:<12} {:<18} {:>14}  {}",
            i + 1,
            expense.date,
            truncate(&expense.category, 18),
            format_amount(expense.amount),
            expense.note,
        );
    }
    Ok(())
}

fn cli_summary(db: &Database) -> Result<()> {
    let dashboard = Dashboard::load(db)?;
    let summary = dashboard.summary;
    if summary.is_empty() {
        println!("No expenses recorded yet. Add an expense to see your dashboard.");
        return Ok(());
    }

    println!("ExpenseTUI - Expense Dashboard");
    println!("{}", "─".repeat(40));
    println!("  Total Spent:         {}", format_amount(summary.total));
    println!("  Number of Expenses:  {}", summary.count);
    if let Some(avg) = summary.average() {
        println!("  Average Expense:     {}", format_amount(avg));
    }

    println!();
    println!("Spending by Category:");
    for (name, amount) in &dashboard.by_category {
        println!("  {name:<24} {:>14}", format_amount(*amount));
    }

    println!();
    println!("Spending Over Time:");
    for point in &dashboard.over_time {
        println!(
            "  {}  {:>14}  (running {})",
            point.date,
            format_amount(point.amount),
            format_amount(point.cumulative),
        );
    }
    Ok(())
}

fn cli_budget(args: &[String], db: &Database) -> Result<()> {
    // Last argument is the limit, everything before it is the category
    let Some((limit, rest)) = args.split_last().filter(|(_, rest)| !rest.is_empty()) else {
        anyhow::bail!("Usage: expensetui budget <category> <limit>");
    };
    let budget = Budget::parse(&rest.join(" "), limit)?;
    db.upsert_budget(&budget)?;
    println!(
        "Budget for '{}' set to {}.",
        budget.category,
        format_amount(budget.limit_amount)
    );
    Ok(())
}

fn cli_budgets(db: &Database) -> Result<()> {
    let status = db.get_budget_status_current_month()?;
    if status.is_empty() {
        println!("No budgets set yet.");
        return Ok(());
    }

    println!("Current Budget Status ({})", current_month());
    println!("{}", "─".repeat(70));
    for s in &status {
        let flag = if s.is_over() { "OVER" } else { "ok" };
        println!(
            "  {:<18} Spent {} of {}. Remaining: {}  [{flag}]",
            truncate(&s.category, 18),
            format_amount(s.spent),
            format_amount(s.limit_amount),
            format_amount(s.remaining()),
        );
    }
    Ok(())
}

fn cli_export(args: &[String], db: &Database) -> Result<()> {
    let output_path = args
        .first()
        .filter(|a| !a.starts_with('-'))
        .map(|a| shellexpand(a))
        .unwrap_or_else(default_export_path);

    let count = db.export_to_csv(&output_path)?;
    if count == 0 {
        println!("No expenses recorded yet.");
    } else {
        println!("Exported {count} expenses to {}", output_path.display());
    }
    Ok(())
}

pub(crate) fn default_export_path() -> PathBuf {
    shellexpand("~/expensetui-export.csv")
}

pub(crate) fn shellexpand(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        PathBuf::from(home).join(rest)
    } else {
        PathBuf::from(path)
    }
}
