use crate::commands::{print_json, Context};
use crate::util::now_utc;
use anyhow::{Context as _, Result};
use clap::{ArgAction, Args};
use motorpool_core::domain::UploadMode;
use motorpool_core::dto::{ImportPreviewDto, ImportReportDto};
use motorpool_core::import::{parse_rows, split_valid};
use motorpool_io::reader::read_rows;
use motorpool_store::reconcile::apply_upload;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::debug;

#[derive(Debug, Args)]
pub struct ImportArgs {
    /// Spreadsheet to ingest (.csv, .xlsx or .xls).
    pub file: PathBuf,
    /// upsert (merge by plate) or replace (wipe and reload).
    #[arg(long, default_value = "upsert")]
    pub mode: String,
    /// Recorded in the upload audit; defaults to the configured operator.
    #[arg(long)]
    pub actor: Option<String>,
    /// Parse and validate only, apply nothing.
    #[arg(long, action = ArgAction::SetTrue)]
    pub dry_run: bool,
}

pub fn import_file(ctx: &Context<'_>, args: ImportArgs) -> Result<()> {
    let mode = UploadMode::from_str(&args.mode)?;
    let rows = read_rows(&args.file)
        .with_context(|| format!("read {}", args.file.display()))?;
    let drafts = parse_rows(&rows);
    let total_rows = drafts.len();
    let (valid, invalid) = split_valid(drafts);
    debug!(total_rows, valid = valid.len(), invalid = invalid.len(), "rows parsed");

    if args.dry_run {
        let preview = ImportPreviewDto {
            total_rows,
            valid: valid.len(),
            invalid: invalid.len(),
        };
        if ctx.json {
            print_json(&preview)?;
        } else {
            println!(
                "{} rows: {} valid, {} invalid (dry run, nothing applied)",
                preview.total_rows, preview.valid, preview.invalid
            );
        }
        return Ok(());
    }

    let file_name = args
        .file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| args.file.display().to_string());
    let actor = args
        .actor
        .as_deref()
        .or(ctx.config.operator.as_deref());

    let outcome = apply_upload(ctx.store, now_utc(), actor, &file_name, mode, &valid)?;

    let report = ImportReportDto {
        file_name,
        mode,
        records_applied: outcome.records_applied,
        invalid_rows: invalid.len(),
    };
    if ctx.json {
        print_json(&report)?;
    } else {
        println!(
            "applied {} records from {} ({}), {} invalid rows skipped",
            report.records_applied, report.file_name, report.mode, report.invalid_rows
        );
    }
    Ok(())
}
