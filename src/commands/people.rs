use anyhow::Result;
use owo_colors::OwoColorize;

use super::CliSession;
use crate::render::Render;

pub fn run(session: &CliSession) -> Result<()> {
    println!("{}", "Participants".bold());
    println!("{}", session.selection().required.render());
    Ok(())
}
