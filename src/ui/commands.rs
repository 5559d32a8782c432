use std::collections::HashMap;
use std::sync::LazyLock;

use super::app::{App, Screen};
use crate::db::Database;

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App, &Database) -> anyhow::Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit ExpenseTUI", cmd_quit, r);
    register_command!("quit", "Quit ExpenseTUI", cmd_quit, r);
    register_command!("d", "Go to Dashboard", cmd_dashboard, r);
    register_command!("dashboard", "Go to Dashboard", cmd_dashboard, r);
    register_command!("a", "Go to Add Expense", cmd_add_expense, r);
    register_command!("add-expense", "Go to Add Expense", cmd_add_expense, r);
    register_command!("e", "Go to View All Expenses", cmd_expenses, r);
    register_command!("expenses", "Go to View All Expenses", cmd_expenses, r);
    register_command!("b", "Go to Manage Budgets", cmd_budgets, r);
    register_command!("budgets", "Go to Manage Budgets", cmd_budgets, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("h", "Show available commands", cmd_help, r);
    register_command!(
        "add",
        "Record an expense (e.g. :add Food 250)",
        cmd_add,
        r
    );
    register_command!(
        "budget",
        "Set a monthly budget (e.g. :budget Travel 400)",
        cmd_budget,
        r
    );
    register_command!(
        "export",
        "Export expenses to CSV (e.g. :export ~/expenses.csv)",
        cmd_export,
        r
    );
    register_command!("refresh", "Reload data from disk", cmd_refresh, r);

    r
});

pub(crate) fn handle_command(input: &str, app: &mut App, db: &Database) -> anyhow::Result<()> {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        (cmd.run)(args, app, db)?;
    } else {
        // Try fuzzy match
        let suggestion = find_closest(cmd_name);
        app.set_error(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }

    Ok(())
}

pub(crate) fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 1) // skip single-letter aliases for suggestions
        .min_by_key(|k| (levenshtein(input, k), **k))
        .unwrap_or(&"help")
        .to_string()
}

pub(crate) fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Split `"<category words> <amount>"` on the last space.
pub(crate) fn split_category_amount(args: &str) -> Option<(&str, &str)> {
    let mut parts = args.trim().rsplitn(2, ' ');
    let amount = parts.next()?;
    let category = parts.next()?.trim();
    if category.is_empty() {
        return None;
    }
    Some((category, amount))
}

// ── Command implementations ──────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App, _db: &Database) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_dashboard(_args: &str, app: &mut App, db: &Database) -> anyhow::Result<()> {
    app.screen = Screen::Dashboard;
    app.refresh_dashboard(db)?;
    Ok(())
}

fn cmd_add_expense(_args: &str, app: &mut App, _db: &Database) -> anyhow::Result<()> {
    app.screen = Screen::AddExpense;
    Ok(())
}

fn cmd_expenses(_args: &str, app: &mut App, db: &Database) -> anyhow::Result<()> {
    app.screen = Screen::Expenses;
    app.refresh_expenses(db)?;
    Ok(())
}

fn cmd_budgets(_args: &str, app: &mut App, db: &Database) -> anyhow::Result<()> {
    app.screen = Screen::Budgets;
    app.refresh_budgets(db)?;
    Ok(())
}

fn cmd_help(_args: &str, app: &mut App, _db: &Database) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

fn cmd_refresh(_args: &str, app: &mut App, db: &Database) -> anyhow::Result<()> {
    app.refresh_all(db)?;
    app.set_status("Reloaded");
    Ok(())
}

fn cmd_add(args: &str, app: &mut App, db: &Database) -> anyhow::Result<()> {
    let Some((category, amount)) = split_category_amount(args) else {
        app.set_error("Usage: :add <category> <amount>. Example: :add Food 250");
        return Ok(());
    };
    app.screen = Screen::AddExpense;
    app.record_expense(db, category, amount, "")?;
    Ok(())
}

fn cmd_budget(args: &str, app: &mut App, db: &Database) -> anyhow::Result<()> {
    let Some((category, limit)) = split_category_amount(args) else {
        app.set_error("Usage: :budget <category> <limit>. Example: :budget Travel 400");
        return Ok(());
    };
    app.screen = Screen::Budgets;
    app.set_budget(db, category, limit)?;
    Ok(())
}

fn cmd_export(args: &str, app: &mut App, db: &Database) -> anyhow::Result<()> {
    let path = if args.is_empty() {
        crate::run::default_export_path()
    } else {
        crate::run::shellexpand(args)
    };

    let count = db.export_to_csv(&path)?;
    if count == 0 {
        app.set_status("No expenses recorded yet.");
    } else {
        app.set_success(format!("Exported {count} expenses to {}", path.display()));
    }
    Ok(())
}
