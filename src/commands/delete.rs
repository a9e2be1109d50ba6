use anyhow::Result;
use chrono::NaiveDate;
use owo_colors::OwoColorize;
use scheduler_core::EntryKey;
use scheduler_core::date_range::DateRange;
use scheduler_core::notify::Notifier;
use scheduler_core::session::NAME_MISSING;

use super::CliSession;
use crate::notifier::TerminalNotifier;

pub async fn run(session: &mut CliSession, date: NaiveDate, name: Option<String>, force: bool) -> Result<()> {
    let notifier = TerminalNotifier::new().assume_yes(force);

    let Some(name) = name.or_else(|| session.name().map(String::from)) else {
        notifier.alert(NAME_MISSING);
        return Ok(());
    };

    session.load_window(DateRange::single_day(date)).await?;
    let key = EntryKey::new(date, name);
    if !session.visible().contains(&key) {
        anyhow::bail!("No entry for {} on {}", key.name, date);
    }

    if session.delete(&notifier, &key).await {
        println!("Deleted {}", key.to_string().dimmed());
    } else {
        println!("{}", "Entry was not deleted".dimmed());
    }
    Ok(())
}
