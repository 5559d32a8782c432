mod cli;
mod tui;

pub(crate) use cli::{as_cli, default_export_path, shellexpand};
pub(crate) use tui::as_tui;
