use anyhow::Result;
use owo_colors::OwoColorize;
use scheduler_core::SchedulerError;
use scheduler_core::search::SearchOutcome;

use super::CliSession;
use crate::notifier::TerminalNotifier;
use crate::utils::tui;

pub async fn run(session: &mut CliSession, required: Vec<String>, wanted: Vec<String>) -> Result<()> {
    session.set_required(required.iter().map(String::as_str))?;
    session.set_wanted(wanted.iter().map(String::as_str))?;

    report_dropped("required", &required, &session.selection().required_names());
    report_dropped("wanted", &wanted, &session.selection().wanted_names());

    let notifier = TerminalNotifier::new();
    let spinner = tui::create_spinner("Finding dates".to_string());
    let result = session.search(&notifier).await;
    spinner.finish_and_clear();

    match result {
        Ok(SearchOutcome::Found { count, .. }) => {
            println!();
            println!("{}", format!("{} matching {}", count, if count == 1 { "date" } else { "dates" }).dimmed());
            Ok(())
        }
        Ok(SearchOutcome::NoMatches) => Ok(()),
        // already shown to the user
        Err(SchedulerError::Validation(_) | SchedulerError::Search(_)) => Ok(()),
        Err(e) => Err(e.into()),
    }
}

/// Names the selection didn't take: filtered out, or required and wanted at once.
fn report_dropped(list: &str, requested: &[String], selected: &[String]) {
    let dropped: Vec<&str> = requested
        .iter()
        .map(|n| n.trim())
        .filter(|n| !selected.iter().any(|s| s == n))
        .collect();
    if !dropped.is_empty() {
        println!(
            "{}",
            format!("Not {}: {}", list, dropped.join(", ")).dimmed()
        );
    }
}
