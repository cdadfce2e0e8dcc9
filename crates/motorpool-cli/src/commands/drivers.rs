use crate::commands::{print_json, Context};
use crate::error::{invalid_input, not_found};
use crate::util::{format_timestamp_datetime, now_utc};
use anyhow::Result;
use clap::{ArgAction, Args};
use motorpool_core::domain::phone;
use motorpool_core::dto::DriverListItemDto;
use motorpool_core::view::{view, FilterState, SortDirection, SortField, SortSpec};
use motorpool_store::repo::{DriverNew, DriverUpdate};
use std::str::FromStr;

#[derive(Debug, Args)]
pub struct AddArgs {
    #[arg(long)]
    pub plate: String,
    #[arg(long)]
    pub employee_id: String,
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub captain: String,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub telegram_phone: Option<String>,
    #[arg(long)]
    pub schedule: Option<String>,
    #[arg(long)]
    pub rest_day: Option<String>,
    #[arg(long)]
    pub status: Option<String>,
}

#[derive(Debug, Args)]
pub struct EditArgs {
    /// Plate of the driver to edit.
    pub plate: String,
    #[arg(long, value_name = "PLATE")]
    pub new_plate: Option<String>,
    #[arg(long)]
    pub employee_id: Option<String>,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub captain: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub telegram_phone: Option<String>,
    #[arg(long)]
    pub schedule: Option<String>,
    #[arg(long)]
    pub rest_day: Option<String>,
    #[arg(long)]
    pub status: Option<String>,
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    pub plate: String,
}

#[derive(Debug, Args)]
pub struct ListArgs {
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

#[derive(Debug, Args)]
pub struct DeleteArgs {
    /// Plates of the drivers to remove.
    #[arg(required = true)]
    pub plates: Vec<String>,
}

pub fn add_driver(ctx: &Context<'_>, args: AddArgs) -> Result<()> {
    let driver = ctx.store.drivers().create(
        now_utc(),
        DriverNew {
            plate: args.plate,
            employee_id: args.employee_id,
            name: args.name,
            phone: args.phone,
            telegram_phone: args.telegram_phone,
            captain: args.captain,
            schedule: args.schedule,
            rest_day: args.rest_day,
            status: args.status,
        },
    )?;

    if ctx.json {
        print_json(&driver)?;
    } else {
        println!("created {} {}", driver.plate, driver.name);
    }
    Ok(())
}

pub fn edit_driver(ctx: &Context<'_>, args: EditArgs) -> Result<()> {
    let existing = ctx
        .store
        .drivers()
        .get_by_plate(args.plate.trim())?
        .ok_or_else(|| not_found(format!("no driver with plate {}", args.plate.trim())))?;

    let mut update = DriverUpdate::default();
    if let Some(plate) = args.new_plate {
        update.plate = Some(plate);
    }
    if let Some(employee_id) = args.employee_id {
        update.employee_id = Some(employee_id);
    }
    if let Some(name) = args.name {
        update.name = Some(name);
    }
    if let Some(captain) = args.captain {
        update.captain = Some(captain);
    }
    if let Some(phone) = args.phone {
        update.phone = Some(normalize_optional_value(phone));
    }
    if let Some(telegram_phone) = args.telegram_phone {
        update.telegram_phone = Some(normalize_optional_value(telegram_phone));
    }
    if let Some(schedule) = args.schedule {
        update.schedule = Some(normalize_optional_value(schedule));
    }
    if let Some(rest_day) = args.rest_day {
        update.rest_day = Some(normalize_optional_value(rest_day));
    }
    if let Some(status) = args.status {
        update.status = Some(status);
    }

    if update_is_empty(&update) {
        return Err(invalid_input("no updates provided"));
    }

    let driver = ctx.store.drivers().update(now_utc(), existing.id, update)?;
    if ctx.json {
        print_json(&driver)?;
    } else {
        println!("updated {} {}", driver.plate, driver.name);
    }
    Ok(())
}

pub fn show_driver(ctx: &Context<'_>, args: ShowArgs) -> Result<()> {
    let driver = ctx
        .store
        .drivers()
        .get_by_plate(args.plate.trim())?
        .ok_or_else(|| not_found(format!("no driver with plate {}", args.plate.trim())))?;

    if ctx.json {
        print_json(&driver)?;
        return Ok(());
    }

    println!("id: {}", driver.id);
    println!("plate: {}", driver.plate);
    println!("employee_id: {}", driver.employee_id);
    println!("name: {}", driver.name);
    println!("captain: {}", driver.captain);
    if let Some(raw) = driver.phone.as_deref() {
        if let Some(display) = phone::display(raw) {
            println!("phone: {}", display);
        }
        if let Some(masked) = phone::mask(raw) {
            println!("phone_masked: {}", masked);
        }
        if let Some(link) = phone::tel_link(raw) {
            println!("tel: {}", link);
        }
    }
    if let Some(raw) = driver.telegram_phone.as_deref() {
        if let Some(display) = phone::display(raw) {
            println!("telegram_phone: {}", display);
        }
    }
    if let Some(link) = phone::chat_link(
        &ctx.config.chat_domain,
        driver.telegram_phone.as_deref(),
        driver.phone.as_deref(),
    ) {
        println!("chat: {}", link);
    }
    if let Some(schedule) = driver.schedule.as_deref() {
        println!("schedule: {}", schedule);
    }
    if let Some(rest_day) = driver.rest_day.as_deref() {
        println!("rest_day: {}", rest_day);
    }
    println!("status: {}", driver.status);
    println!(
        "created_at: {}",
        format_timestamp_datetime(driver.created_at)
    );
    println!(
        "updated_at: {}",
        format_timestamp_datetime(driver.updated_at)
    );
    Ok(())
}

pub fn list_drivers(ctx: &Context<'_>, args: ListArgs) -> Result<()> {
    let filters = FilterState {
        captain: args.captain,
        schedule: args.schedule,
        rest_day: args.rest_day,
        status: args.status,
        search: args.search.unwrap_or_default(),
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
    let items: Vec<DriverListItemDto> = visible.iter().map(DriverListItemDto::from).collect();

    if ctx.json {
        print_json(&items)?;
        return Ok(());
    }

    if items.is_empty() {
        println!("no drivers");
        return Ok(());
    }

    for item in items {
        let phone = item
            .phone
            .as_deref()
            .and_then(phone::display)
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{}  {}  {}  [{}]  {}  {}",
            item.plate, item.employee_id, item.name, item.captain, phone, item.status
        );
    }
    Ok(())
}

pub fn delete_drivers(ctx: &Context<'_>, args: DeleteArgs) -> Result<()> {
    let repo = ctx.store.drivers();
    // Resolve every plate before touching anything, so a typo in one plate
    // does not leave a half-applied delete.
    let mut targets = Vec::with_capacity(args.plates.len());
    for plate in &args.plates {
        let driver = repo
            .get_by_plate(plate.trim())?
            .ok_or_else(|| not_found(format!("no driver with plate {}", plate.trim())))?;
        targets.push(driver);
    }

    for driver in &targets {
        repo.delete(driver.id)?;
    }

    if ctx.json {
        let plates: Vec<&str> = targets.iter().map(|driver| driver.plate.as_str()).collect();
        print_json(&serde_json::json!({ "deleted": plates }))?;
    } else {
        for driver in &targets {
            println!("deleted {} {}", driver.plate, driver.name);
        }
    }
    Ok(())
}

fn normalize_optional_value(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn update_is_empty(update: &DriverUpdate) -> bool {
    update.plate.is_none()
        && update.employee_id.is_none()
        && update.name.is_none()
        && update.captain.is_none()
        && update.phone.is_none()
        && update.telegram_phone.is_none()
        && update.schedule.is_none()
        && update.rest_day.is_none()
        && update.status.is_none()
}
