mod alert;
mod config;
mod db;
mod error;
mod logging;
mod models;
mod report;
mod run;
mod ui;

use anyhow::Result;

use config::Config;
use logging::LogTarget;

fn main() -> Result<()> {
    let mut args: Vec<String> = std::env::args().collect();
    let config = Config::load(&mut args)?;

    let target = if args.len() > 1 {
        LogTarget::Stderr
    } else {
        LogTarget::File
    };
    logging::init(&config, target)?;
    tracing::debug!(log_filter = %config.log_filter, "starting");

    let db = db::Database::open(&config.db_path)?;
    tracing::debug!(db = %db.path().display(), "database ready");

    match args.len() {
        1 => run::as_tui(&db),
        _ => run::as_cli(&args, &db),
    }
}
