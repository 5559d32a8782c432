#![allow(clippy::unwrap_used)]

use super::*;
use crate::alert::{check_budget_alert, BudgetAlert};
use crate::models::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tempfile::TempDir;

fn test_db() -> (TempDir, Database) {
    let dir = TempDir::new().unwrap();
    let db = Database::open(&dir.path().join("expenses.db")).unwrap();
    (dir, db)
}

fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn add(db: &Database, date: &str, category: &str, amount: &str, note: &str) -> i64 {
    let expense = NewExpense::parse(category, amount, note, day(date)).unwrap();
    db.insert_expense(&expense).unwrap()
}

// ── Schema ────────────────────────────────────────────────────

#[test]
fn test_open_creates_both_tables() {
    let (_dir, db) = test_db();
    let conn = db.connect().unwrap();
    let tables: Vec<String> = conn
        .prepare("SELECT name FROM sqlite_master WHERE type='table' AND name IN ('expenses', 'budgets') ORDER BY name")
        .unwrap()
        .query_map([], |row| row.get(0))
        .unwrap()
        .collect::<std::result::Result<_, _>>()
        .unwrap();
    assert_eq!(tables, vec!["budgets".to_string(), "expenses".to_string()]);
}

#[test]
fn test_open_is_idempotent_and_keeps_data() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("expenses.db");

    let db = Database::open(&path).unwrap();
    add(&db, "2024-03-01", "Food", "12.50", "");
    db.upsert_budget(&Budget::new("Food".into(), dec!(100))).unwrap();

    // Reopen twice; nothing is erased or duplicated
    Database::open(&path).unwrap();
    let db = Database::open(&path).unwrap();
    assert_eq!(db.path(), path.as_path());
    assert_eq!(db.get_expenses().unwrap().len(), 1);
    assert_eq!(db.get_budget_status("2024-03").unwrap().len(), 1);
}

#[test]
fn test_schema_version_recorded() {
    let (_dir, db) = test_db();
    let conn = db.connect().unwrap();
    let version: i32 = conn
        .pragma_query_value(None, "user_version", |row| row.get(0))
        .unwrap();
    assert_eq!(version, schema::CURRENT_VERSION);
}

#[test]
fn test_open_legacy_file_without_version() {
    // A file created with the bare two-table layout and no user_version
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("expenses.db");
    {
        let conn = Connection::open(&path).unwrap();
        conn.execute_batch(schema::SCHEMA_V1).unwrap();
        conn.execute(
            "INSERT INTO expenses (date, category, amount, note) VALUES ('2024-01-05', 'Food', 20.0, 'lunch')",
            [],
        )
        .unwrap();
    }

    let db = Database::open(&path).unwrap();
    let expenses = db.get_expenses().unwrap();
    assert_eq!(expenses.len(), 1);
    assert_eq!(expenses[0].amount, dec!(20));
    assert_eq!(expenses[0].note, "lunch");

    let conn = db.connect().unwrap();
    let has_index: bool = conn
        .query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='index' AND name='idx_expenses_date')",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert!(has_index);
}

#[test]
fn test_decimal_from_sql() {
    assert_eq!(decimal_from_sql(0, "500.0").unwrap(), dec!(500));
    assert_eq!(decimal_from_sql(0, "0").unwrap(), Decimal::ZERO);
    assert_eq!(decimal_from_sql(0, "300.29999999999995").unwrap(), dec!(300.30));
    assert_eq!(decimal_from_sql(0, "1.0e+15").unwrap(), dec!(1000000000000000));
}

#[test]
fn test_decimal_from_sql_rejects_unrepresentable() {
    assert!(matches!(
        decimal_from_sql(2, "garbage"),
        Err(rusqlite::Error::FromSqlConversionFailure(2, _, _))
    ));
    assert!(decimal_from_sql(0, "1.0e+29").is_err());
}

/// Rows written before amounts were capped, bypassing validation.
fn insert_raw_amount(db: &Database, amount: f64) {
    db.connect()
        .unwrap()
        .execute(
            "INSERT INTO expenses (date, category, amount, note) VALUES ('2024-03-01', 'Food', ?1, '')",
            rusqlite::params![amount],
        )
        .unwrap();
}

#[test]
fn test_oversized_sum_is_an_error_not_zero() {
    let (_dir, db) = test_db();
    insert_raw_amount(&db, 5e28);
    insert_raw_amount(&db, 5e28);
    assert!(db.get_expense_totals().is_err());
    assert!(db.get_spending_by_category().is_err());
}

#[test]
fn test_running_total_overflow_is_an_error() {
    let (_dir, db) = test_db();
    insert_raw_amount(&db, 5e28);
    insert_raw_amount(&db, 5e28);
    let err = db.get_spending_over_time().unwrap_err();
    assert!(err.to_string().contains("overflowed"));
}

#[test]
fn test_largest_accepted_amount_round_trips() {
    let (_dir, db) = test_db();
    add(&db, "2024-03-01", "Food", "999999999999.99", "");
    add(&db, "2024-03-02", "Food", "12345678901.23", "");
    let amounts: Vec<Decimal> = db
        .get_expenses()
        .unwrap()
        .into_iter()
        .map(|e| e.amount)
        .collect();
    assert_eq!(amounts, vec![dec!(12345678901.23), dec!(999999999999.99)]);
}

// ── Expenses ──────────────────────────────────────────────────

#[test]
fn test_insert_and_list() {
    let (_dir, db) = test_db();
    let id = add(&db, "2024-03-01", "travel", "500", "train");
    assert!(id > 0);

    let expenses = db.get_expenses().unwrap();
    assert_eq!(expenses.len(), 1);
    let e = &expenses[0];
    assert_eq!(e.id, id);
    assert_eq!(e.date, day("2024-03-01"));
    assert_eq!(e.category, "Travel");
    assert_eq!(e.amount, dec!(500));
    assert_eq!(e.note, "train");
}

#[test]
fn test_list_is_newest_first() {
    let (_dir, db) = test_db();
    add(&db, "2024-01-10", "Food", "5", "");
    add(&db, "2024-03-02", "Food", "6", "");
    add(&db, "2024-02-15", "Food", "7", "");
    let second_same_day = add(&db, "2024-03-02", "Food", "8", "");

    let expenses = db.get_expenses().unwrap();
    let dates: Vec<String> = expenses.iter().map(|e| e.date.to_string()).collect();
    assert_eq!(
        dates,
        vec!["2024-03-02", "2024-03-02", "2024-02-15", "2024-01-10"]
    );
    // Later insert wins a tie on date
    assert_eq!(expenses[0].id, second_same_day);
}

#[test]
fn test_empty_store() {
    let (_dir, db) = test_db();
    assert!(db.get_expenses().unwrap().is_empty());
    assert!(db.get_spending_by_category().unwrap().is_empty());
    assert!(db.get_spending_over_time().unwrap().is_empty());
    assert_eq!(db.get_expense_totals().unwrap(), (0, Decimal::ZERO));
}

#[test]
fn test_null_note_reads_as_empty() {
    let (_dir, db) = test_db();
    let conn = db.connect().unwrap();
    conn.execute(
        "INSERT INTO expenses (date, category, amount, note) VALUES ('2024-03-01', 'Food', 3.5, NULL)",
        [],
    )
    .unwrap();
    let expenses = db.get_expenses().unwrap();
    assert_eq!(expenses[0].note, "");
}

#[test]
fn test_spending_by_category_sorted_descending() {
    let (_dir, db) = test_db();
    add(&db, "2024-03-01", "Food", "100", "");
    add(&db, "2024-03-02", "Food", "50", "");
    add(&db, "2024-03-03", "Travel", "200", "");

    let spending = db.get_spending_by_category().unwrap();
    assert_eq!(
        spending,
        vec![("Travel".to_string(), dec!(200)), ("Food".to_string(), dec!(150))]
    );
}

#[test]
fn test_spending_by_category_merges_normalized_names() {
    let (_dir, db) = test_db();
    add(&db, "2024-03-01", "food", "10", "");
    add(&db, "2024-03-01", " FOOD ", "15", "");
    add(&db, "2024-03-01", "Food", "0.10", "");

    let spending = db.get_spending_by_category().unwrap();
    assert_eq!(spending, vec![("Food".to_string(), dec!(25.10))]);
}

#[test]
fn test_spending_over_time_ascending_with_running_total() {
    let (_dir, db) = test_db();
    add(&db, "2024-03-05", "Food", "30", "");
    add(&db, "2024-03-01", "Travel", "100.10", "");
    add(&db, "2024-03-03", "Food", "0.20", "");

    let points = db.get_spending_over_time().unwrap();
    let dates: Vec<NaiveDate> = points.iter().map(|p| p.date).collect();
    assert_eq!(
        dates,
        vec![day("2024-03-01"), day("2024-03-03"), day("2024-03-05")]
    );
    let amounts: Vec<Decimal> = points.iter().map(|p| p.amount).collect();
    assert_eq!(amounts, vec![dec!(100.10), dec!(0.20), dec!(30)]);
    let running: Vec<Decimal> = points.iter().map(|p| p.cumulative).collect();
    assert_eq!(running, vec![dec!(100.10), dec!(100.30), dec!(130.30)]);
}

#[test]
fn test_expense_totals() {
    let (_dir, db) = test_db();
    add(&db, "2024-03-01", "Food", "10.25", "");
    add(&db, "2024-03-02", "Travel", "20.50", "");
    assert_eq!(db.get_expense_totals().unwrap(), (2, dec!(30.75)));
}

#[test]
fn test_category_month_total() {
    let (_dir, db) = test_db();
    add(&db, "2024-03-01", "Food", "100", "");
    add(&db, "2024-03-31", "Food", "50.50", "");
    add(&db, "2024-04-01", "Food", "999", "");
    add(&db, "2024-03-15", "Travel", "70", "");

    assert_eq!(
        db.get_category_month_total("Food", "2024-03").unwrap(),
        dec!(150.50)
    );
    assert_eq!(
        db.get_category_month_total("Food", "2024-04").unwrap(),
        dec!(999)
    );
    // Exact match only: lookups expect normalized names
    assert_eq!(
        db.get_category_month_total("food", "2024-03").unwrap(),
        Decimal::ZERO
    );
    assert_eq!(
        db.get_category_month_total("Rent", "2024-03").unwrap(),
        Decimal::ZERO
    );
}

#[test]
fn test_insert_increases_month_total_by_amount() {
    let (_dir, db) = test_db();
    let today = chrono::Local::now().date_naive();
    let month = current_month();

    for amount in ["0.01", "12.34", "1000", "99.99"] {
        let before = db.get_category_month_total("Food", &month).unwrap();
        let expense = NewExpense::parse("food", amount, "", today).unwrap();
        db.insert_expense(&expense).unwrap();
        let after = db.get_category_month_total("Food", &month).unwrap();
        assert_eq!(after - before, expense.amount, "amount {amount}");
    }
}

// ── Budgets ───────────────────────────────────────────────────

#[test]
fn test_budget_limit_not_set() {
    let (_dir, db) = test_db();
    assert_eq!(db.get_budget_limit("Food").unwrap(), None);
}

#[test]
fn test_budget_upsert_replaces() {
    let (_dir, db) = test_db();
    db.upsert_budget(&Budget::new("Food".into(), dec!(1000))).unwrap();
    db.upsert_budget(&Budget::new("Food".into(), dec!(1500))).unwrap();

    let status = db.get_budget_status("2024-03").unwrap();
    assert_eq!(status.len(), 1);
    assert_eq!(status[0].category, "Food");
    assert_eq!(status[0].limit_amount, dec!(1500));
    assert_eq!(db.get_budget_limit("Food").unwrap(), Some(dec!(1500)));
}

#[test]
fn test_budget_upsert_via_parse_uses_normalized_key() {
    let (_dir, db) = test_db();
    db.upsert_budget(&Budget::parse("food", "100").unwrap()).unwrap();
    db.upsert_budget(&Budget::parse(" FOOD ", "250").unwrap()).unwrap();
    let status = db.get_budget_status("2024-03").unwrap();
    assert_eq!(
        status,
        vec![BudgetStatus {
            category: "Food".into(),
            limit_amount: dec!(250),
            spent: Decimal::ZERO,
        }]
    );
}

#[test]
fn test_budget_status_includes_zero_spend() {
    let (_dir, db) = test_db();
    db.upsert_budget(&Budget::new("Rent".into(), dec!(800))).unwrap();
    db.upsert_budget(&Budget::new("Food".into(), dec!(300))).unwrap();
    add(&db, "2024-03-04", "Food", "120", "");
    add(&db, "2024-03-09", "Food", "30", "");
    add(&db, "2024-02-20", "Food", "500", "");
    add(&db, "2024-03-09", "Travel", "75", "");

    let status = db.get_budget_status("2024-03").unwrap();
    assert_eq!(
        status,
        vec![
            BudgetStatus {
                category: "Food".into(),
                limit_amount: dec!(300),
                spent: dec!(150),
            },
            BudgetStatus {
                category: "Rent".into(),
                limit_amount: dec!(800),
                spent: Decimal::ZERO,
            },
        ]
    );
}

#[test]
fn test_budget_status_empty_without_budgets() {
    let (_dir, db) = test_db();
    add(&db, "2024-03-04", "Food", "120", "");
    assert!(db.get_budget_status("2024-03").unwrap().is_empty());
    assert!(db.get_budget_status_current_month().unwrap().is_empty());
}

#[test]
fn test_budget_status_current_month() {
    let (_dir, db) = test_db();
    let today = chrono::Local::now().date_naive();
    db.upsert_budget(&Budget::new("Food".into(), dec!(50))).unwrap();
    let expense = NewExpense::parse("Food", "20", "", today).unwrap();
    db.insert_expense(&expense).unwrap();

    let status = db.get_budget_status_current_month().unwrap();
    assert_eq!(status.len(), 1);
    assert_eq!(status[0].spent, dec!(20));
    assert_eq!(status[0].remaining(), dec!(30));
}

// ── End to end ────────────────────────────────────────────────

#[test]
fn test_expense_then_budget_raises_exceeded_alert() {
    let (_dir, db) = test_db();
    let id = add(&db, "2024-03-01", "travel", "500", "");
    let stored = db.get_expenses().unwrap();
    assert_eq!(stored[0].id, id);
    assert_eq!(stored[0].category, "Travel");

    db.upsert_budget(&Budget::parse("Travel", "400").unwrap())
        .unwrap();

    let alert = check_budget_alert(&db, "Travel", "2024-03").unwrap();
    assert_eq!(
        alert,
        Some(BudgetAlert::Exceeded {
            category: "Travel".into(),
            spent: dec!(500.00),
            limit: dec!(400.00),
            overage: dec!(100.00),
        })
    );
}

#[test]
fn test_alert_without_budget_is_none() {
    let (_dir, db) = test_db();
    add(&db, "2024-03-01", "Food", "5000", "");
    assert_eq!(check_budget_alert(&db, "Food", "2024-03").unwrap(), None);
}

// ── Export ────────────────────────────────────────────────────

#[test]
fn test_export_to_csv() {
    let (dir, db) = test_db();
    add(&db, "2024-03-01", "Food", "12.5", "lunch, with team");
    add(&db, "2024-03-02", "Travel", "1200", "");

    let out = dir.path().join("export.csv");
    let count = db.export_to_csv(&out).unwrap();
    assert_eq!(count, 2);

    let contents = std::fs::read_to_string(&out).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines[0], "date,category,amount,note");
    assert_eq!(lines[1], "2024-03-02,Travel,1200.00,");
    assert_eq!(lines[2], "2024-03-01,Food,12.50,\"lunch, with team\"");
}

#[test]
fn test_export_empty_writes_header_only() {
    let (dir, db) = test_db();
    let out = dir.path().join("export.csv");
    assert_eq!(db.export_to_csv(&out).unwrap(), 0);
    let contents = std::fs::read_to_string(&out).unwrap();
    assert_eq!(contents.trim(), "date,category,amount,note");
}
