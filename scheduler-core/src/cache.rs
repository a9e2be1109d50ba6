//! Single-slot cache for fetched calendar windows.
//!
//! Calendar views ask for the same visible window again on unrelated
//! redraws. Only an exact match of the last successfully fetched range is
//! served from memory; any other range goes to the network.

use crate::api::EntryApi;
use crate::date_range::DateRange;
use crate::entry::{Entry, EntryKey};
use crate::error::SchedulerResult;

#[derive(Debug, Clone)]
struct CachedRange {
    range: DateRange,
    payload: Vec<Entry>,
}

#[derive(Debug, Default)]
pub struct FetchCache {
    slot: Option<CachedRange>,
}

impl FetchCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries for `range`, from memory when it is exactly the cached range.
    ///
    /// A failed fetch leaves the slot as it was.
    pub async fn get_entries<A>(&mut self, api: &A, range: &DateRange) -> SchedulerResult<Vec<Entry>>
    where
        A: EntryApi + ?Sized,
    {
        if let Some(cached) = self.lookup(range) {
            tracing::debug!(start = %range.start, end = %range.end, "entry cache hit");
            return Ok(cached.to_vec());
        }

        tracing::debug!(start = %range.start, end = %range.end, "entry cache miss");
        let payload = api.get_entries(range).await.inspect_err(|e| {
            tracing::warn!(start = %range.start, end = %range.end, error = %e, "fetching entries failed");
        })?;

        self.slot = Some(CachedRange {
            range: *range,
            payload: payload.clone(),
        });
        Ok(payload)
    }

    /// Cached payload for exactly this range, if any.
    pub fn lookup(&self, range: &DateRange) -> Option<&[Entry]> {
        self.slot
            .as_ref()
            .filter(|cached| cached.range == *range)
            .map(|cached| cached.payload.as_slice())
    }

    pub fn cached_range(&self) -> Option<DateRange> {
        self.slot.as_ref().map(|cached| cached.range)
    }

    /// Keep the cached window in line with a save the server confirmed.
    pub fn record_saved(&mut self, entry: Entry) {
        let Some(cached) = self.slot.as_mut() else {
            return;
        };
        if !cached.range.contains(entry.date) {
            return;
        }
        let key = entry.key();
        match cached.payload.iter_mut().find(|e| e.key() == key) {
            Some(existing) => *existing = entry,
            None => cached.payload.push(entry),
        }
    }

    /// Keep the cached window in line with a delete the server confirmed.
    pub fn record_deleted(&mut self, key: &EntryKey) {
        if let Some(cached) = self.slot.as_mut() {
            cached.payload.retain(|e| e.key() != *key);
        }
    }

    pub fn invalidate(&mut self) {
        self.slot = None;
    }
}
