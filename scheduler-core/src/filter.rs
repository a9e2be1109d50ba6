//! Name filtering for the calendar and the participant lists.

use std::collections::BTreeSet;

use crate::error::SchedulerResult;
use crate::storage::{self, FILTER_BLACKLIST_KEY, FILTER_KEY, LocalStorage};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FilterMode {
    /// Hide the selected names.
    Blacklist,
    /// Show only the selected names.
    #[default]
    Whitelist,
}

impl FilterMode {
    pub fn from_blacklist_flag(blacklist: bool) -> Self {
        if blacklist {
            FilterMode::Blacklist
        } else {
            FilterMode::Whitelist
        }
    }

    pub fn is_blacklist(&self) -> bool {
        matches!(self, FilterMode::Blacklist)
    }
}

/// Selected filter names plus how to interpret them. An empty name set
/// means no filtering, whatever the mode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub names: BTreeSet<String>,
    pub mode: FilterMode,
}

impl FilterState {
    pub fn new(names: impl IntoIterator<Item = String>, mode: FilterMode) -> Self {
        FilterState {
            names: names.into_iter().collect(),
            mode,
        }
    }

    pub fn is_active(&self) -> bool {
        !self.names.is_empty()
    }

    /// Whether entries and options for `name` are shown.
    pub fn is_visible(&self, name: &str) -> bool {
        if self.names.is_empty() {
            return true;
        }
        match self.mode {
            FilterMode::Blacklist => !self.names.contains(name),
            FilterMode::Whitelist => self.names.contains(name),
        }
    }

    /// Restore the stored filter. Missing or unreadable values mean no
    /// filtering in whitelist mode.
    pub fn load(storage: &dyn LocalStorage) -> Self {
        let names: Vec<String> = storage::get_json(storage, FILTER_KEY, Vec::new());
        let blacklist: bool = storage::get_json(storage, FILTER_BLACKLIST_KEY, false);
        FilterState::new(names, FilterMode::from_blacklist_flag(blacklist))
    }

    pub fn save(&self, storage: &mut dyn LocalStorage) -> SchedulerResult<()> {
        let names: Vec<&str> = self.names.iter().map(String::as_str).collect();
        storage::set_json(storage, FILTER_KEY, &names)?;
        storage::set_json(storage, FILTER_BLACKLIST_KEY, &self.mode.is_blacklist())
    }
}
