//! Optimistic creates and confirmed deletes.
//!
//! A create is shown immediately and persisted afterwards; if persisting
//! fails the change is rolled back from the [`CreateCommand`] that recorded
//! it. Deletes are the other way round: the local entry only goes away once
//! the server confirmed the delete.

use chrono::NaiveDate;

use crate::api::EntryApi;
use crate::date_range::DateRange;
use crate::entry::{Entry, EntryKey, EntryType};
use crate::error::SchedulerResult;
use crate::visible::VisibleSet;

/// A create that has been applied locally but maybe not persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateCommand {
    pub applied: Entry,
    /// The entry with the same key that was shown before, if any.
    pub previous: Option<Entry>,
}

impl CreateCommand {
    /// Show `entry` right away, remembering what it replaced.
    pub fn apply(visible: &mut VisibleSet, entry: Entry) -> Self {
        let previous = visible.insert(entry.clone());
        CreateCommand {
            applied: entry,
            previous,
        }
    }

    /// Undo the local effect of [`CreateCommand::apply`].
    ///
    /// If the key no longer shows the applied entry, a later write owns it
    /// and nothing is touched.
    pub fn rollback(&self, visible: &mut VisibleSet) {
        let key = self.applied.key();
        if visible.get(&key) != Some(&self.applied) {
            return;
        }
        visible.remove(&key);
        if let Some(previous) = &self.previous {
            visible.insert(previous.clone());
        }
    }

    /// Settle the command with the result of persisting it. Returns whether
    /// the change stuck.
    pub fn settle(&self, visible: &mut VisibleSet, result: &SchedulerResult<()>) -> bool {
        match result {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(id = %self.applied.id(), error = %e, "save failed, reverting");
                self.rollback(visible);
                false
            }
        }
    }
}

/// Which days of a multi-day create stuck.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateOutcome {
    pub saved: Vec<NaiveDate>,
    pub reverted: Vec<NaiveDate>,
}

impl CreateOutcome {
    pub fn all_saved(&self) -> bool {
        self.reverted.is_empty()
    }
}

/// Create one entry optimistically.
pub async fn create<A>(api: &A, visible: &mut VisibleSet, entry: Entry) -> bool
where
    A: EntryApi + ?Sized,
{
    let command = CreateCommand::apply(visible, entry);
    let result = api.create_entry(&command.applied).await;
    command.settle(visible, &result)
}

/// Create an entry for `name` on every day of `range`.
///
/// All days are shown before any save resolves. Each day is saved and, on
/// failure, reverted on its own; one failing day leaves the others alone.
pub async fn create_range<A>(
    api: &A,
    visible: &mut VisibleSet,
    range: &DateRange,
    name: &str,
    kind: EntryType,
) -> CreateOutcome
where
    A: EntryApi + ?Sized,
{
    let commands: Vec<_> = range
        .days()
        .map(|date| CreateCommand::apply(visible, Entry::new(date, name, kind)))
        .collect();

    let mut outcome = CreateOutcome::default();
    for command in commands {
        let result = api.create_entry(&command.applied).await;
        if command.settle(visible, &result) {
            tracing::info!(id = %command.applied.id(), kind = %kind, "entry saved");
            outcome.saved.push(command.applied.date);
        } else {
            outcome.reverted.push(command.applied.date);
        }
    }
    outcome
}

/// Delete an entry after the user confirmed it.
///
/// Returns true only when the server confirmed the delete; the local entry
/// is removed at that point and not before.
pub async fn delete<A, F>(api: &A, visible: &mut VisibleSet, key: &EntryKey, confirm: F) -> bool
where
    A: EntryApi + ?Sized,
    F: FnOnce(&Entry) -> bool,
{
    let Some(entry) = visible.get(key) else {
        tracing::debug!(id = %key, "delete requested for an entry that is not shown");
        return false;
    };

    if !confirm(entry) {
        return false;
    }

    match api.delete_entry(key).await {
        Ok(()) => {
            visible.remove(key);
            tracing::info!(id = %key, "entry deleted");
            true
        }
        Err(e) => {
            tracing::warn!(id = %key, error = %e, "delete failed");
            false
        }
    }
}
