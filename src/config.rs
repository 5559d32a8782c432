use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

pub(crate) const DB_ENV: &str = "EXPENSETUI_DB";
pub(crate) const LOG_ENV: &str = "EXPENSETUI_LOG";
const DB_FILE: &str = "expenses.db";
const LOG_FILE: &str = "expensetui.log";
const DEFAULT_LOG_FILTER: &str = "warn";

/// Startup settings, resolved once and passed down explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Config {
    pub(crate) db_path: PathBuf,
    pub(crate) log_path: PathBuf,
    pub(crate) log_filter: String,
}

impl Config {
    /// Resolve from the process environment. A `--db <path>` pair is removed
    /// from `args` so command dispatch never sees it.
    pub(crate) fn load(args: &mut Vec<String>) -> Result<Self> {
        let flag = take_db_flag(args)?;
        let db_path = match flag.or_else(|| std::env::var(DB_ENV).ok()) {
            Some(p) if !p.trim().is_empty() => crate::run::shellexpand(p.trim()),
            _ => default_db_path()?,
        };
        let log_filter = std::env::var(LOG_ENV)
            .ok()
            .filter(|f| !f.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());
        Self::new(db_path, log_filter)
    }

    pub(crate) fn new(db_path: PathBuf, log_filter: String) -> Result<Self> {
        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create data directory: {}", parent.display()))?;
        }
        let log_path = log_path_for(&db_path);
        Ok(Self {
            db_path,
            log_path,
            log_filter,
        })
    }
}

fn take_db_flag(args: &mut Vec<String>) -> Result<Option<String>> {
    let Some(pos) = args.iter().position(|a| a == "--db") else {
        return Ok(None);
    };
    if pos + 1 >= args.len() {
        anyhow::bail!("--db requires a path");
    }
    let value = args.remove(pos + 1);
    args.remove(pos);
    Ok(Some(value))
}

fn default_db_path() -> Result<PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "expensetui", "ExpenseTUI")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    Ok(proj_dirs.data_dir().join(DB_FILE))
}

fn log_path_for(db_path: &Path) -> PathBuf {
    match db_path.parent() {
        Some(dir) => dir.join(LOG_FILE),
        None => PathBuf::from(LOG_FILE),
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
