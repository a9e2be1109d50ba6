use std::collections::BTreeSet;

use anyhow::Result;
use scheduler_core::filter::FilterMode;

use super::CliSession;
use crate::render::Render;

pub fn show(session: &CliSession) -> Result<()> {
    println!("{}", session.filter().render());
    Ok(())
}

pub async fn set(session: &mut CliSession, names: Vec<String>, blacklist: bool) -> Result<()> {
    let names: BTreeSet<String> = names.into_iter().map(|n| n.trim().to_string()).collect();
    session
        .set_filter(names, FilterMode::from_blacklist_flag(blacklist), true)
        .await?;
    show(session)
}

pub async fn reset(session: &mut CliSession) -> Result<()> {
    session.reset_filter().await?;
    show(session)
}
