use anyhow::Result;
use motorpool_config::AppConfig;
use motorpool_store::Store;
use serde::Serialize;
use std::io::{self, Write};
use std::path::PathBuf;

pub mod columns;
pub mod completions;
pub mod drivers;
pub mod export;
pub mod import;
pub mod uploads;

pub struct Context<'a> {
    pub store: &'a Store,
    pub json: bool,
    pub config: &'a AppConfig,
    pub config_path: Option<PathBuf>,
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}
