//! Subcommand execution against the inventory service.

use std::fs;
use std::io::Write;

use anyhow::Context;

use itemtrack_core::{Entity, ItemId};
use itemtrack_inventory::{InventoryService, Item, PersistencePort, export_report, timestamp};

use crate::config::{Command, Config};

/// Look up the item a command refers to. Unknown ids resolve to no selection.
fn select<P: PersistencePort>(service: &InventoryService<P>, id: &str) -> anyhow::Result<Option<Item>> {
    let id: ItemId = id.parse()?;
    let items = service.port().list().context("failed to load items")?;
    Ok(items.into_iter().find(|item| item.id_typed() == id))
}

fn describe(item: &Item) -> String {
    format!(
        "{}  {}  {} - is borrowed: {}",
        item.id(),
        item.name(),
        item.description().unwrap_or(""),
        item.is_borrowed()
    )
}

pub fn run<P, W>(
    service: &InventoryService<P>,
    config: &Config,
    command: Command,
    out: &mut W,
) -> anyhow::Result<()>
where
    P: PersistencePort,
    W: Write,
{
    match command {
        Command::List => {
            let mut feed = service.list_items();
            for item in feed.refresh().map(|s| s.items()).unwrap_or(&[]) {
                writeln!(out, "{}", describe(item))?;
            }
        }
        Command::Show { id } => {
            let item = select(service, &id)?.with_context(|| format!("no item with id {id}"))?;
            writeln!(out, "{}", describe(&item))?;
            let created = item.created_at().map(timestamp::iso);
            let updated = item.updated_at().map(timestamp::iso);
            writeln!(out, "created at: {}", created.as_deref().unwrap_or("N/A"))?;
            writeln!(out, "updated at: {}", updated.as_deref().unwrap_or("N/A"))?;
            if let Some(followup) = item.followup() {
                writeln!(out, "followup: {followup:?}")?;
            }
        }
        Command::Create { name, description } => {
            let item = service.create_item(&name, description.as_deref())?;
            writeln!(out, "{}", item.id())?;
        }
        Command::Update { id, name, description } => {
            let current = select(service, &id)?;
            let item = service.update_item(current.as_ref(), &name, description.as_deref())?;
            writeln!(out, "{}", describe(&item))?;
        }
        Command::Delete { id } => {
            let current = select(service, &id)?;
            service.delete_item(current.as_ref())?;
            writeln!(out, "deleted {id}")?;
        }
        Command::Lend { id, user_id, username } => {
            let current = select(service, &id)?;
            let item = service.lend_item(current.as_ref(), &user_id, &username)?;
            if let Some(record) = item.open_record() {
                writeln!(out, "{record}")?;
            }
        }
        Command::Return { id } => {
            let current = select(service, &id)?;
            let item = service.return_item(current.as_ref())?;
            if let Some(record) = item.record().last() {
                writeln!(out, "{record}")?;
            }
        }
        Command::Followup { id, fields } => {
            let current = select(service, &id)?;
            service.record_followup(current.as_ref(), &fields.into())?;
            writeln!(out, "successfully updated the followup.")?;
        }
        Command::History { id } => {
            let item = select(service, &id)?.with_context(|| format!("no item with id {id}"))?;
            for record in item.record() {
                writeln!(out, "{record}")?;
            }
        }
        Command::Report { id, stdout } => {
            let item = select(service, &id)?.with_context(|| format!("no item with id {id}"))?;
            let report = export_report(&item)?;
            if stdout {
                out.write_all(report.content.as_bytes())?;
            } else {
                let path = config.report_dir.join(&report.file_name);
                fs::write(&path, &report.content)
                    .with_context(|| format!("failed to write report to {}", path.display()))?;
                writeln!(out, "wrote {} ({})", path.display(), report.mime_type)?;
            }
        }
    }
    Ok(())
}
