use crate::commands::export::parse_column_keys;
use crate::commands::{print_json, Context};
use anyhow::Result;
use clap::{Args, Subcommand};
use motorpool_config::{load_prefs, resolve_prefs_path, save_prefs, ColumnPrefs};

#[derive(Debug, Subcommand)]
pub enum ColumnsCommand {
    /// Show the saved export column selection.
    Show(ShowArgs),
    /// Replace the saved selection.
    Set(SetArgs),
    /// Restore the default selection.
    Reset(ResetArgs),
}

#[derive(Debug, Args)]
pub struct ShowArgs {}

#[derive(Debug, Args)]
pub struct SetArgs {
    /// Comma-separated column keys, in display order.
    pub columns: String,
}

#[derive(Debug, Args)]
pub struct ResetArgs {}

pub fn show_columns(ctx: &Context<'_>, _args: ShowArgs) -> Result<()> {
    let path = resolve_prefs_path(ctx.config_path.as_deref())?;
    let prefs = load_prefs(&path);
    if ctx.json {
        print_json(&prefs)?;
    } else {
        println!("{}", prefs.export_columns.join(","));
    }
    Ok(())
}

pub fn set_columns(ctx: &Context<'_>, args: SetArgs) -> Result<()> {
    let columns = parse_column_keys(&args.columns)?;
    let keys: Vec<String> = columns.iter().map(|column| column.key().to_string()).collect();
    let prefs = ColumnPrefs {
        export_columns: keys.clone(),
        column_order: keys,
    };
    let path = resolve_prefs_path(ctx.config_path.as_deref())?;
    save_prefs(&path, &prefs)?;
    if ctx.json {
        print_json(&prefs)?;
    } else {
        println!("saved {}", prefs.export_columns.join(","));
    }
    Ok(())
}

pub fn reset_columns(ctx: &Context<'_>, _args: ResetArgs) -> Result<()> {
    let prefs = ColumnPrefs::default();
    let path = resolve_prefs_path(ctx.config_path.as_deref())?;
    save_prefs(&path, &prefs)?;
    if ctx.json {
        print_json(&prefs)?;
    } else {
        println!("reset to {}", prefs.export_columns.join(","));
    }
    Ok(())
}
