//! The scheduler session: one owner for cache, filter, selection and the
//! visible calendar.
//!
//! A session is created once at start-up and only changes through its
//! methods. It ties the pieces together the way the calendar page does:
//! fetched windows pass through the name filter before they are shown,
//! choices are remembered in local storage, and user-facing messages go
//! through a [`Notifier`].

use std::collections::BTreeSet;

use crate::api::EntryApi;
use crate::cache::FetchCache;
use crate::date_range::DateRange;
use crate::entry::{Entry, EntryKey, EntryType};
use crate::error::{SchedulerError, SchedulerResult};
use crate::filter::{FilterMode, FilterState};
use crate::mutator::{self, CreateOutcome};
use crate::notify::Notifier;
use crate::participants::{Selection, sort_names};
use crate::search::{self, SearchOutcome};
use crate::storage::{LocalStorage, NAME_KEY, PARTICIPANTS_KEY, TYPE_KEY, get_json, set_json};
use crate::visible::VisibleSet;

/// Placeholder value of the name picker that means "someone new".
pub const NEW_PARTICIPANT: &str = "__new";

pub const NAME_MISSING: &str = "Say who you are first.";
pub const TYPE_MISSING: &str = "Choose a status first.";

pub struct Session<A, S> {
    api: A,
    storage: S,
    cache: FetchCache,
    visible: VisibleSet,
    window: Option<DateRange>,
    participants: Vec<String>,
    filter: FilterState,
    selection: Selection,
    name: Option<String>,
    default_type: Option<EntryType>,
    allow_past: bool,
}

impl<A, S> Session<A, S>
where
    A: EntryApi,
    S: LocalStorage,
{
    /// Start a session for the given known participants, restoring the
    /// locally added participants and the remembered name, status and filter.
    pub fn new(api: A, mut storage: S, participants: Vec<String>, allow_past: bool) -> Self {
        let mut participants = participants;

        // Once the server has entries for an added name it no longer needs
        // to be kept here.
        let added: Vec<String> = get_json(&storage, PARTICIPANTS_KEY, Vec::new());
        let pending: Vec<String> = added
            .into_iter()
            .filter(|name| !participants.contains(name))
            .collect();
        if let Err(e) = store_added(&mut storage, &pending) {
            tracing::warn!(error = %e, "could not update added participants");
        }
        participants.extend(pending);
        sort_names(&mut participants);
        participants.dedup();

        let selection = Selection::new(participants.iter().map(String::as_str));

        let name = storage
            .get_item(NAME_KEY)
            .filter(|stored| participants.iter().any(|p| p == stored));
        let default_type = storage
            .get_item(TYPE_KEY)
            .and_then(|stored| stored.parse().ok());

        // Stored names that are no longer known can't be selected.
        let stored_filter = FilterState::load(&storage);
        let filter = FilterState::new(
            stored_filter
                .names
                .into_iter()
                .filter(|n| participants.contains(n)),
            stored_filter.mode,
        );

        let mut session = Session {
            api,
            storage,
            cache: FetchCache::new(),
            visible: VisibleSet::new(),
            window: None,
            participants,
            filter,
            selection,
            name,
            default_type,
            allow_past,
        };
        session.selection.apply_filter(&session.filter);
        session
    }

    /// Start a session, asking the server who the known participants are.
    pub async fn connect(api: A, storage: S, allow_past: bool) -> SchedulerResult<Self> {
        let participants = api.list_names().await?;
        Ok(Self::new(api, storage, participants, allow_past))
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn participants(&self) -> &[String] {
        &self.participants
    }

    pub fn visible(&self) -> &VisibleSet {
        &self.visible
    }

    pub fn window(&self) -> Option<DateRange> {
        self.window
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn default_type(&self) -> Option<EntryType> {
        self.default_type
    }

    pub fn is_known(&self, name: &str) -> bool {
        self.participants.iter().any(|p| p == name)
    }

    // ---------------------------------------------------------------------
    // Calendar window
    // ---------------------------------------------------------------------

    /// Show `range`: fetch it (or reuse the cached window) and keep the
    /// entries the filter lets through.
    pub async fn load_window(&mut self, range: DateRange) -> SchedulerResult<&VisibleSet> {
        let entries = self.cache.get_entries(&self.api, &range).await?;
        let filter = &self.filter;
        self.visible
            .reset(entries.into_iter().filter(|e| filter.is_visible(&e.name)));
        self.window = Some(range);
        Ok(&self.visible)
    }

    /// Re-derive the visible entries of the current window.
    pub async fn refresh(&mut self) -> SchedulerResult<()> {
        if let Some(range) = self.window {
            self.load_window(range).await?;
        }
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Who am I
    // ---------------------------------------------------------------------

    /// Pick a known participant as the current name.
    pub fn choose_name(&mut self, name: &str) -> SchedulerResult<()> {
        if !self.is_known(name) {
            return Err(SchedulerError::Validation(format!(
                "Unknown participant '{}'",
                name
            )));
        }
        self.name = Some(name.to_string());
        self.storage.set_item(NAME_KEY, name)
    }

    /// Register someone new and make them the current name.
    ///
    /// The name is trimmed; an empty name clears the current name instead.
    /// With an active whitelist filter the newcomer is added to it, so their
    /// entries stay visible.
    pub async fn add_participant(&mut self, raw: &str) -> SchedulerResult<Option<String>> {
        let name = raw.trim();
        if name.is_empty() || name == NEW_PARTICIPANT {
            self.name = None;
            self.storage.remove_item(NAME_KEY)?;
            return Ok(None);
        }

        if !self.is_known(name) {
            self.participants.push(name.to_string());
            self.selection.add(name);

            let mut added: Vec<String> = get_json(&self.storage, PARTICIPANTS_KEY, Vec::new());
            added.push(name.to_string());
            store_added(&mut self.storage, &added)?;

            if self.filter.mode == FilterMode::Whitelist && self.filter.is_active() {
                let mut names = self.filter.names.clone();
                names.insert(name.to_string());
                self.set_filter(names, FilterMode::Whitelist, true).await?;
            } else {
                self.selection.apply_filter(&self.filter);
            }
        }

        self.choose_name(name)?;
        Ok(Some(name.to_string()))
    }

    pub fn set_default_type(&mut self, kind: EntryType) -> SchedulerResult<()> {
        self.default_type = Some(kind);
        self.storage.set_item(TYPE_KEY, kind.as_str())
    }

    // ---------------------------------------------------------------------
    // Entries
    // ---------------------------------------------------------------------

    /// Mark every day of `range` for the current name (or `name`) with the
    /// default status (or `kind`), optimistically.
    pub async fn mark(
        &mut self,
        notifier: &dyn Notifier,
        range: &DateRange,
        name: Option<&str>,
        kind: Option<EntryType>,
    ) -> SchedulerResult<CreateOutcome> {
        let name = name
            .map(str::trim)
            .or(self.name.as_deref())
            .unwrap_or_default()
            .to_string();
        if name.is_empty() || name == NEW_PARTICIPANT {
            notifier.alert(NAME_MISSING);
            return Err(SchedulerError::Validation(NAME_MISSING.into()));
        }

        let Some(kind) = kind.or(self.default_type) else {
            notifier.alert(TYPE_MISSING);
            return Err(SchedulerError::Validation(TYPE_MISSING.into()));
        };

        let outcome =
            mutator::create_range(&self.api, &mut self.visible, range, &name, kind).await;
        for date in &outcome.saved {
            self.cache.record_saved(Entry::new(*date, name.clone(), kind));
        }
        Ok(outcome)
    }

    /// Delete a shown entry after asking the user.
    pub async fn delete(&mut self, notifier: &dyn Notifier, key: &EntryKey) -> bool {
        let deleted = mutator::delete(&self.api, &mut self.visible, key, |entry| {
            notifier.confirm(&format!(
                "Delete entry {} ({})?",
                entry.name,
                entry.date.format("%d.%m.%Y")
            ))
        })
        .await;

        if deleted {
            self.cache.record_deleted(key);
        }
        deleted
    }

    // ---------------------------------------------------------------------
    // Filter
    // ---------------------------------------------------------------------

    /// Replace the name filter, hide filtered names from the participant
    /// lists, optionally re-derive the calendar and remember the filter.
    pub async fn set_filter(
        &mut self,
        names: BTreeSet<String>,
        mode: FilterMode,
        refetch: bool,
    ) -> SchedulerResult<()> {
        if let Some(unknown) = names.iter().find(|n| !self.is_known(n)) {
            return Err(SchedulerError::Validation(format!(
                "Unknown participant '{}'",
                unknown
            )));
        }

        self.filter = FilterState { names, mode };
        self.selection.apply_filter(&self.filter);
        if refetch {
            self.refresh().await?;
        }
        self.filter.save(&mut self.storage)
    }

    /// Clear the filter names, keeping the mode.
    pub async fn reset_filter(&mut self) -> SchedulerResult<()> {
        let mode = self.filter.mode;
        self.set_filter(BTreeSet::new(), mode, true).await
    }

    // ---------------------------------------------------------------------
    // Date search
    // ---------------------------------------------------------------------

    pub fn set_required<'a>(&mut self, names: impl IntoIterator<Item = &'a str>) -> SchedulerResult<()> {
        let names = self.known_names(names)?;
        self.selection.set_required(names.iter().map(String::as_str));
        Ok(())
    }

    pub fn set_wanted<'a>(&mut self, names: impl IntoIterator<Item = &'a str>) -> SchedulerResult<()> {
        let names = self.known_names(names)?;
        self.selection.set_wanted(names.iter().map(String::as_str));
        Ok(())
    }

    /// Search for dates with the current required and wanted selection.
    pub async fn search(&self, notifier: &dyn Notifier) -> SchedulerResult<SearchOutcome> {
        let required = self.selection.required_names();
        let wanted = self.selection.wanted_names();
        search::find_dates(&self.api, notifier, &required, &wanted, self.allow_past).await
    }

    fn known_names<'a>(&self, names: impl IntoIterator<Item = &'a str>) -> SchedulerResult<Vec<String>> {
        names
            .into_iter()
            .map(|name| {
                let name = name.trim();
                if self.is_known(name) {
                    Ok(name.to_string())
                } else {
                    Err(SchedulerError::Validation(format!(
                        "Unknown participant '{}'",
                        name
                    )))
                }
            })
            .collect()
    }
}

/// Remember participants added here, dropping the key when there are none.
fn store_added(storage: &mut dyn LocalStorage, added: &[String]) -> SchedulerResult<()> {
    if added.is_empty() {
        storage.remove_item(PARTICIPANTS_KEY)
    } else {
        set_json(storage, PARTICIPANTS_KEY, added)
    }
}
