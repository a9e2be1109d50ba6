//! Contract of the remote entry store and date search service.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::date_range::DateRange;
use crate::entry::{Entry, EntryKey};
use crate::error::SchedulerResult;

/// Body of `POST /api/find-dates`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FindDatesRequest {
    pub required: Vec<String>,
    pub wanted: Vec<String>,
    /// `Some(None)` serializes as `"start": null`, which tells the server not
    /// to restrict the search to future dates. `None` leaves the field out.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<Option<String>>,
}

impl FindDatesRequest {
    pub fn new(required: Vec<String>, wanted: Vec<String>, allow_past: bool) -> Self {
        FindDatesRequest {
            required,
            wanted,
            start: allow_past.then_some(None),
        }
    }
}

/// Response of `POST /api/find-dates`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FindDatesResponse {
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub html: Option<String>,
}

/// The remote entry store.
///
/// Errors are reported with the matching [`crate::SchedulerError`] kind:
/// `Fetch` for reads, `Save` for creates, `Delete` for deletes and `Search`
/// for date searches.
#[async_trait]
pub trait EntryApi: Send + Sync {
    /// `GET /api/entries/?start&end`
    async fn get_entries(&self, range: &DateRange) -> SchedulerResult<Vec<Entry>>;

    /// Everyone who has ever entered anything, sorted case-insensitively.
    /// Reads `GET /api/entries/` without bounds.
    async fn list_names(&self) -> SchedulerResult<Vec<String>>;

    /// `POST /api/entries/`, replacing any entry with the same key.
    async fn create_entry(&self, entry: &Entry) -> SchedulerResult<()>;

    /// `DELETE /api/entries/{date}/{name}`
    async fn delete_entry(&self, key: &EntryKey) -> SchedulerResult<()>;

    /// `POST /api/find-dates`
    async fn find_dates(&self, request: &FindDatesRequest) -> SchedulerResult<FindDatesResponse>;
}
