use anyhow::Result;
use owo_colors::OwoColorize;
use scheduler_core::EntryType;

use super::CliSession;
use crate::render::Render;

pub async fn run(session: &mut CliSession, name: Option<String>, kind: Option<EntryType>) -> Result<()> {
    if let Some(name) = name {
        if session.is_known(name.trim()) {
            session.choose_name(name.trim())?;
        } else if let Some(added) = session.add_participant(&name).await? {
            println!("Added new participant {}", added.bold());
        }
    }

    if let Some(kind) = kind {
        session.set_default_type(kind)?;
    }

    match session.name() {
        Some(name) => println!("{} {}", "Name:".dimmed(), name),
        None => println!("{} {}", "Name:".dimmed(), "not set".dimmed()),
    }
    match session.default_type() {
        Some(kind) => println!("{} {}", "Status:".dimmed(), kind.render()),
        None => println!("{} {}", "Status:".dimmed(), "not set".dimmed()),
    }
    Ok(())
}
