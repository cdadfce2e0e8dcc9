use crate::commands::{print_json, Context};
use crate::error::invalid_input;
use anyhow::{Context as _, Result};
use clap::{ArgAction, Args, ValueEnum};
use motorpool_config::{load_prefs, resolve_prefs_path, save_prefs, ColumnPrefs};
use motorpool_core::export::{header_labels, project, ExportColumn};
use motorpool_core::view::{view, FilterState, SortDirection, SortField, SortSpec};
use motorpool_core::DriverRecord;
use motorpool_io::html::render_print_table;
use motorpool_io::vcf::export_contact_batches;
use motorpool_io::writer::write_csv;
use motorpool_io::xlsx::write_xlsx;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Xlsx,
    Vcf,
    Html,
}

#[derive(Debug, Args)]
pub struct ExportArgs {
    #[arg(long, value_enum, default_value = "csv")]
    pub format: ExportFormat,
    /// Output path; stdout for text formats when omitted.
    #[arg(long)]
    pub out: Option<PathBuf>,
    /// Comma-separated column keys; falls back to saved preferences.
    #[arg(long)]
    pub columns: Option<String>,
    /// Persist --columns as the new preference.
    #[arg(long, action = ArgAction::SetTrue, requires = "columns")]
    pub save_columns: bool,
    #[arg(long)]
    pub captain: Option<String>,
    #[arg(long)]
    pub schedule: Option<String>,
    #[arg(long)]
    pub rest_day: Option<String>,
    #[arg(long)]
    pub status: Option<String>,
    #[arg(long)]
    pub search: Option<String>,
    #[arg(long, value_name = "FIELD")]
    pub sort: Option<String>,
    #[arg(long, action = ArgAction::SetTrue, requires = "sort")]
    pub desc: bool,
}

pub fn export_roster(ctx: &Context<'_>, args: ExportArgs) -> Result<()> {
    let filters = FilterState {
        captain: args.captain.clone(),
        schedule: args.schedule.clone(),
        rest_day: args.rest_day.clone(),
        status: args.status.clone(),
        search: args.search.clone().unwrap_or_default(),
    };
    let sort = match args.sort.as_deref() {
        Some(raw) => Some(SortSpec {
            field: SortField::from_str(raw)?,
            direction: if args.desc {
                SortDirection::Descending
            } else {
                SortDirection::Ascending
            },
        }),
        None => None,
    };

    let all = ctx.store.drivers().list_all()?;
    let visible = view(&all, &filters, sort);
    debug!(total = all.len(), visible = visible.len(), "roster projected");

    let columns = resolve_columns(ctx, args.columns.as_deref(), args.save_columns)?;

    match args.format {
        ExportFormat::Csv => {
            let rows = project(&visible, &columns)?;
            let artifact = write_csv(&header_labels(&columns), &rows)?;
            emit_text(args.out.as_deref(), &artifact)?;
        }
        ExportFormat::Html => {
            let rows = project(&visible, &columns)?;
            let artifact = render_print_table("Driver roster", &header_labels(&columns), &rows);
            emit_text(args.out.as_deref(), &artifact)?;
        }
        ExportFormat::Xlsx => {
            let rows = project(&visible, &columns)?;
            let out = args
                .out
                .as_deref()
                .ok_or_else(|| invalid_input("--out is required for xlsx"))?;
            write_xlsx(out, &header_labels(&columns), &rows)?;
            report_written(ctx, &[out.to_path_buf()], visible.len())?;
        }
        ExportFormat::Vcf => {
            let paths = export_vcf(&visible, args.out.as_deref())?;
            if let Some(paths) = paths {
                report_written(ctx, &paths, visible.len())?;
            }
        }
    }
    Ok(())
}

/// Explicit --columns wins over saved preferences; preferences fall back to
/// the full default set on their own.
fn resolve_columns(
    ctx: &Context<'_>,
    requested: Option<&str>,
    save: bool,
) -> Result<Vec<ExportColumn>> {
    match requested {
        Some(raw) => {
            let columns = parse_column_keys(raw)?;
            if save {
                let keys: Vec<String> =
                    columns.iter().map(|column| column.key().to_string()).collect();
                let path = resolve_prefs_path(ctx.config_path.as_deref())?;
                save_prefs(
                    &path,
                    &ColumnPrefs {
                        export_columns: keys.clone(),
                        column_order: keys,
                    },
                )?;
            }
            Ok(columns)
        }
        None => {
            let path = resolve_prefs_path(ctx.config_path.as_deref())?;
            let prefs = load_prefs(&path);
            Ok(columns_from_prefs(&prefs)?)
        }
    }
}

pub fn parse_column_keys(raw: &str) -> Result<Vec<ExportColumn>> {
    let mut columns = Vec::new();
    for key in raw.split(',') {
        let key = key.trim();
        if key.is_empty() {
            continue;
        }
        columns.push(ExportColumn::from_str(key)?);
    }
    if columns.is_empty() {
        return Err(invalid_input("no columns selected"));
    }
    Ok(columns)
}

/// Selection ordered by the saved column order; keys missing from the order
/// keep their selection order at the end.
pub fn columns_from_prefs(prefs: &ColumnPrefs) -> Result<Vec<ExportColumn>> {
    let mut keys: Vec<&str> = prefs
        .column_order
        .iter()
        .map(String::as_str)
        .filter(|key| prefs.export_columns.iter().any(|k| k == key))
        .collect();
    for key in &prefs.export_columns {
        if !keys.contains(&key.as_str()) {
            keys.push(key);
        }
    }
    keys.iter().map(|key| Ok(ExportColumn::from_str(key)?)).collect()
}

fn emit_text(out: Option<&Path>, artifact: &str) -> Result<()> {
    match out {
        Some(path) => {
            fs::write(path, artifact).with_context(|| format!("write {}", path.display()))?;
        }
        None => print!("{artifact}"),
    }
    Ok(())
}

fn export_vcf(visible: &[DriverRecord], out: Option<&Path>) -> Result<Option<Vec<PathBuf>>> {
    let artifacts = export_contact_batches(visible);
    if artifacts.is_empty() {
        return Err(invalid_input("no drivers with phone numbers to export"));
    }
    match out {
        None => {
            if artifacts.len() > 1 {
                return Err(invalid_input(
                    "roster spans multiple contact batches, --out is required",
                ));
            }
            print!("{}", artifacts[0]);
            Ok(None)
        }
        Some(path) => {
            if artifacts.len() == 1 {
                fs::write(path, &artifacts[0])
                    .with_context(|| format!("write {}", path.display()))?;
                return Ok(Some(vec![path.to_path_buf()]));
            }
            let mut written = Vec::with_capacity(artifacts.len());
            for (index, artifact) in artifacts.iter().enumerate() {
                let numbered = numbered_path(path, index + 1);
                fs::write(&numbered, artifact)
                    .with_context(|| format!("write {}", numbered.display()))?;
                written.push(numbered);
            }
            Ok(Some(written))
        }
    }
}

fn numbered_path(path: &Path, index: usize) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "contacts".to_string());
    let name = match path.extension() {
        Some(ext) => format!("{stem}-{index}.{}", ext.to_string_lossy()),
        None => format!("{stem}-{index}"),
    };
    path.with_file_name(name)
}

fn report_written(ctx: &Context<'_>, paths: &[PathBuf], records: usize) -> Result<()> {
    if ctx.json {
        let files: Vec<String> = paths
            .iter()
            .map(|path| path.display().to_string())
            .collect();
        print_json(&serde_json::json!({ "files": files, "records": records }))?;
    } else {
        for path in paths {
            println!("wrote {}", path.display());
        }
    }
    Ok(())
}
