//! The set of entries currently shown on the calendar.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::entry::{Entry, EntryKey};

/// Entries keyed by `(date, name)`, so each key shows at most once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisibleSet {
    entries: BTreeMap<EntryKey, Entry>,
}

impl VisibleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace everything shown with `entries`.
    pub fn reset(&mut self, entries: impl IntoIterator<Item = Entry>) {
        self.entries = entries.into_iter().map(|e| (e.key(), e)).collect();
    }

    pub fn get(&self, key: &EntryKey) -> Option<&Entry> {
        self.entries.get(key)
    }

    /// Insert an entry, returning the one it replaced.
    pub fn insert(&mut self, entry: Entry) -> Option<Entry> {
        self.entries.insert(entry.key(), entry)
    }

    pub fn remove(&mut self, key: &EntryKey) -> Option<Entry> {
        self.entries.remove(key)
    }

    pub fn contains(&self, key: &EntryKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries ordered by date, then name.
    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.values()
    }

    /// Entries of one day, ordered case-insensitively by name.
    pub fn on_day(&self, date: NaiveDate) -> Vec<&Entry> {
        let mut day: Vec<_> = self.entries.values().filter(|e| e.date == date).collect();
        day.sort_by_key(|e| e.sort_title());
        day
    }
}
