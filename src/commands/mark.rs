use anyhow::Result;
use chrono::NaiveDate;
use owo_colors::OwoColorize;
use scheduler_core::date_range::DateRange;
use scheduler_core::{EntryType, SchedulerError};

use super::CliSession;
use crate::notifier::TerminalNotifier;
use crate::render::render_calendar;
use crate::utils::tui;

/// Mark `range` for a participant. Each day is saved on its own; days whose
/// save failed simply don't show up afterwards.
pub async fn run(
    session: &mut CliSession,
    range: DateRange,
    name: Option<String>,
    kind: Option<EntryType>,
    today: NaiveDate,
) -> Result<()> {
    // existing entries have to be shown so a failed save can restore them
    session.load_window(range).await?;

    let notifier = TerminalNotifier::new();
    let spinner = tui::create_spinner("Saving".to_string());
    let result = session.mark(&notifier, &range, name.as_deref(), kind).await;
    spinner.finish_and_clear();

    let outcome = match result {
        Ok(outcome) => outcome,
        // already shown to the user
        Err(SchedulerError::Validation(_)) => return Ok(()),
        Err(e) => return Err(e.into()),
    };

    println!("{}", render_calendar(session.visible(), &range, today));
    let total = outcome.saved.len() + outcome.reverted.len();
    println!();
    println!(
        "{}",
        format!("Saved {} of {} {}", outcome.saved.len(), total, if total == 1 { "day" } else { "days" })
            .dimmed()
    );
    Ok(())
}
