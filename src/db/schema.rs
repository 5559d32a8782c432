/// Base layout. Matches databases written by earlier releases, which never
/// set `user_version`, so it is safe to run against those files as-is.
pub(crate) const SCHEMA_V1: &str = r#"
CREATE TABLE IF NOT EXISTS expenses (
    id        INTEGER PRIMARY KEY AUTOINCREMENT,
    date      TEXT NOT NULL,
    category  TEXT NOT NULL,
    amount    REAL NOT NULL,
    note      TEXT
);

CREATE TABLE IF NOT EXISTS budgets (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    category      TEXT UNIQUE NOT NULL,
    limit_amount  REAL NOT NULL
);
"#;

pub(crate) const CURRENT_VERSION: i32 = 2;

/// Migrations from version N to N+1, tracked in `PRAGMA user_version`.
/// Each entry is (from_version, sql).
pub(crate) const MIGRATIONS: &[(i32, &str)] = &[(
    1,
    "CREATE INDEX IF NOT EXISTS idx_expenses_date ON expenses(date);
     CREATE INDEX IF NOT EXISTS idx_expenses_category ON expenses(category);",
)];
