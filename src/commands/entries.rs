use anyhow::Result;
use chrono::NaiveDate;
use owo_colors::OwoColorize;
use scheduler_core::date_range::DateRange;

use super::CliSession;
use crate::render::{Render, render_calendar, render_legend};
use crate::utils::tui;

pub async fn run(session: &mut CliSession, range: DateRange, today: NaiveDate) -> Result<()> {
    let spinner = tui::create_spinner("Loading entries".to_string());
    let result = session.load_window(range).await.map(|_| ());
    spinner.finish_and_clear();
    result?;

    if session.filter().is_active() {
        println!("{}", session.filter().render());
        println!();
    }
    println!("{}", render_calendar(session.visible(), &range, today));
    println!();
    println!("{}", render_legend().dimmed());
    Ok(())
}
