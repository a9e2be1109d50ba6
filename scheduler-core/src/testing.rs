//! In-memory [`EntryApi`] used by the unit tests.

use std::collections::{BTreeMap, HashSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::api::{EntryApi, FindDatesRequest, FindDatesResponse};
use crate::date_range::DateRange;
use crate::entry::{Entry, EntryKey, EntryType, parse_date};
use crate::error::{SchedulerError, SchedulerResult};
use crate::participants::sort_names;

pub fn day(s: &str) -> NaiveDate {
    parse_date(s).unwrap()
}

pub fn entry(date: &str, name: &str, kind: EntryType) -> Entry {
    Entry::new(day(date), name, kind)
}

#[derive(Default)]
pub struct FakeApi {
    pub entries: Mutex<BTreeMap<EntryKey, Entry>>,
    pub fetch_calls: AtomicUsize,
    pub save_calls: AtomicUsize,
    pub delete_calls: AtomicUsize,
    pub search_requests: Mutex<Vec<FindDatesRequest>>,
    pub search_response: Mutex<Option<FindDatesResponse>>,
    pub offline: AtomicBool,
    /// Saves for these days fail even when online.
    pub failing_save_days: Mutex<HashSet<NaiveDate>>,
}

impl FakeApi {
    pub fn with_entries(entries: impl IntoIterator<Item = Entry>) -> Self {
        let api = FakeApi::default();
        {
            let mut stored = api.entries.lock().unwrap();
            for e in entries {
                stored.insert(e.key(), e);
            }
        }
        api
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub fn fail_saves_on(&self, date: NaiveDate) {
        self.failing_save_days.lock().unwrap().insert(date);
    }

    pub fn respond_to_search(&self, count: u64, html: Option<&str>) {
        *self.search_response.lock().unwrap() = Some(FindDatesResponse {
            count,
            html: html.map(String::from),
        });
    }

    pub fn fetches(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    pub fn saves(&self) -> usize {
        self.save_calls.load(Ordering::SeqCst)
    }

    pub fn deletes(&self) -> usize {
        self.delete_calls.load(Ordering::SeqCst)
    }

    pub fn searches(&self) -> Vec<FindDatesRequest> {
        self.search_requests.lock().unwrap().clone()
    }

    pub fn stored(&self, key: &EntryKey) -> Option<Entry> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    fn is_offline(&self) -> bool {
        self.offline.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EntryApi for FakeApi {
    async fn get_entries(&self, range: &DateRange) -> SchedulerResult<Vec<Entry>> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        if self.is_offline() {
            return Err(SchedulerError::Fetch("network unreachable".into()));
        }
        Ok(self
            .entries
            .lock()
            .unwrap()
            .values()
            .filter(|e| range.contains(e.date))
            .cloned()
            .collect())
    }

    async fn list_names(&self) -> SchedulerResult<Vec<String>> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        if self.is_offline() {
            return Err(SchedulerError::Fetch("network unreachable".into()));
        }
        let mut names: Vec<String> = self
            .entries
            .lock()
            .unwrap()
            .keys()
            .map(|k| k.name.clone())
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        sort_names(&mut names);
        Ok(names)
    }

    async fn create_entry(&self, entry: &Entry) -> SchedulerResult<()> {
        self.save_calls.fetch_add(1, Ordering::SeqCst);
        if self.is_offline() || self.failing_save_days.lock().unwrap().contains(&entry.date) {
            return Err(SchedulerError::Save("network unreachable".into()));
        }
        self.entries.lock().unwrap().insert(entry.key(), entry.clone());
        Ok(())
    }

    async fn delete_entry(&self, key: &EntryKey) -> SchedulerResult<()> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        if self.is_offline() {
            return Err(SchedulerError::Delete("network unreachable".into()));
        }
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }

    async fn find_dates(&self, request: &FindDatesRequest) -> SchedulerResult<FindDatesResponse> {
        self.search_requests.lock().unwrap().push(request.clone());
        if self.is_offline() {
            return Err(SchedulerError::Search("network unreachable".into()));
        }
        Ok(self
            .search_response
            .lock()
            .unwrap()
            .clone()
            .unwrap_or(FindDatesResponse { count: 0, html: None }))
    }
}
