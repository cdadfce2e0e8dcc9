use crate::commands::{print_json, Context};
use crate::util::format_timestamp_datetime;
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct UploadsArgs {}

pub fn list_uploads(ctx: &Context<'_>, _args: UploadsArgs) -> Result<()> {
    let uploads = ctx.store.uploads().list_all()?;

    if ctx.json {
        print_json(&uploads)?;
        return Ok(());
    }

    if uploads.is_empty() {
        println!("no uploads");
        return Ok(());
    }

    for upload in uploads {
        let actor = upload.actor.as_deref().unwrap_or("-");
        println!(
            "{}  {}  {}  {}  {} records  by {}",
            format_timestamp_datetime(upload.created_at),
            upload.id,
            upload.file_name,
            upload.mode,
            upload.records_count,
            actor
        );
    }
    Ok(())
}
