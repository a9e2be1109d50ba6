//! Participant selection lists for date searches.
//!
//! Each list behaves like a multi-select: options can be selected, disabled
//! (not selectable) or hidden by the name filter. Hidden and disabled
//! options are never selected.

use std::collections::BTreeSet;

use crate::filter::FilterState;

/// Case-insensitive name order, as shown in the participant pickers.
pub fn sort_names(names: &mut [String]) {
    names.sort_by(|a, b| a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| a.cmp(b)));
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantOption {
    pub name: String,
    pub selected: bool,
    pub disabled: bool,
    pub hidden: bool,
}

impl ParticipantOption {
    fn new(name: &str) -> Self {
        ParticipantOption {
            name: name.to_string(),
            selected: false,
            disabled: false,
            hidden: false,
        }
    }

    pub fn is_selectable(&self) -> bool {
        !self.disabled && !self.hidden
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParticipantList {
    options: Vec<ParticipantOption>,
}

impl ParticipantList {
    pub fn new<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        let mut list = ParticipantList::default();
        for name in names {
            list.add(name);
        }
        list
    }

    /// Append an option for `name` unless it already exists.
    pub fn add(&mut self, name: &str) -> bool {
        if self.contains(name) {
            return false;
        }
        self.options.push(ParticipantOption::new(name));
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.options.iter().any(|o| o.name == name)
    }

    pub fn options(&self) -> &[ParticipantOption] {
        &self.options
    }

    pub fn option(&self, name: &str) -> Option<&ParticipantOption> {
        self.options.iter().find(|o| o.name == name)
    }

    /// Selected names in list order.
    pub fn selected(&self) -> Vec<String> {
        self.options
            .iter()
            .filter(|o| o.selected)
            .map(|o| o.name.clone())
            .collect()
    }

    /// Select exactly the selectable options among `names`.
    pub fn set_selected<'a>(&mut self, names: impl IntoIterator<Item = &'a str>) {
        let wanted: BTreeSet<&str> = names.into_iter().collect();
        for option in &mut self.options {
            option.selected = option.is_selectable() && wanted.contains(option.name.as_str());
        }
    }

    pub fn select(&mut self, name: &str) -> bool {
        match self.options.iter_mut().find(|o| o.name == name) {
            Some(option) if option.is_selectable() => {
                option.selected = true;
                true
            }
            _ => false,
        }
    }

    /// Hide options the filter doesn't show, deselecting them.
    pub fn apply_filter(&mut self, filter: &FilterState) {
        for option in &mut self.options {
            option.hidden = !filter.is_visible(&option.name);
            if option.hidden {
                option.selected = false;
            }
        }
    }

    /// Disable exactly the options named in `names`, deselecting them.
    pub fn disable_only(&mut self, names: &BTreeSet<String>) {
        for option in &mut self.options {
            option.disabled = names.contains(&option.name);
            if option.disabled {
                option.selected = false;
            }
        }
    }
}

/// The required and wanted lists of a date search.
///
/// Anyone selected as required is disabled in the wanted list, so the two
/// selections never overlap.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub required: ParticipantList,
    pub wanted: ParticipantList,
}

impl Selection {
    pub fn new<'a>(names: impl IntoIterator<Item = &'a str> + Clone) -> Self {
        Selection {
            required: ParticipantList::new(names.clone()),
            wanted: ParticipantList::new(names),
        }
    }

    pub fn add(&mut self, name: &str) {
        self.required.add(name);
        self.wanted.add(name);
    }

    pub fn set_required<'a>(&mut self, names: impl IntoIterator<Item = &'a str>) {
        self.required.set_selected(names);
        self.sync_wanted();
    }

    pub fn set_wanted<'a>(&mut self, names: impl IntoIterator<Item = &'a str>) {
        self.wanted.set_selected(names);
    }

    /// Hide filtered names in both lists.
    pub fn apply_filter(&mut self, filter: &FilterState) {
        self.required.apply_filter(filter);
        self.wanted.apply_filter(filter);
        self.sync_wanted();
    }

    /// Re-derive which wanted options are disabled from the required
    /// selection.
    pub fn sync_wanted(&mut self) {
        let required: BTreeSet<String> = self.required.selected().into_iter().collect();
        self.wanted.disable_only(&required);
    }

    pub fn required_names(&self) -> Vec<String> {
        self.required.selected()
    }

    pub fn wanted_names(&self) -> Vec<String> {
        self.wanted.selected()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::FilterMode;

    const NAMES: [&str; 4] = ["Alice", "Bob", "Carol", "Dave"];

    fn disjoint(selection: &Selection) -> bool {
        let required: BTreeSet<_> = selection.required_names().into_iter().collect();
        selection.wanted_names().iter().all(|n| !required.contains(n))
    }

    #[test]
    fn requiring_someone_removes_them_from_wanted() {
        let mut selection = Selection::new(NAMES);
        selection.set_wanted(["Bob", "Carol"]);
        selection.set_required(["Alice", "Bob"]);

        assert_eq!(selection.wanted_names(), vec!["Carol"]);
        assert!(selection.wanted.option("Bob").unwrap().disabled);
        assert!(disjoint(&selection));
    }

    #[test]
    fn no_longer_required_is_enabled_again() {
        let mut selection = Selection::new(NAMES);
        selection.set_required(["Bob"]);
        assert!(!selection.wanted.select("Bob"));

        selection.set_required(["Alice"]);
        assert!(!selection.wanted.option("Bob").unwrap().disabled);
        assert!(selection.wanted.select("Bob"));
        assert!(disjoint(&selection));
    }

    #[test]
    fn disjoint_after_every_required_change() {
        let mut selection = Selection::new(NAMES);
        let steps: [&[&str]; 4] = [&["Alice"], &["Alice", "Bob"], &[], &["Carol", "Dave"]];
        for step in steps {
            selection.set_wanted(NAMES);
            selection.set_required(step.iter().copied());
            assert!(disjoint(&selection));
        }
    }

    #[test]
    fn blacklisted_names_are_hidden_and_deselected() {
        let mut selection = Selection::new(NAMES);
        selection.set_required(["Bob"]);
        selection.set_wanted(["Alice"]);

        let filter = FilterState::new(["Bob".to_string()], FilterMode::Blacklist);
        selection.apply_filter(&filter);

        assert!(selection.required_names().is_empty());
        assert!(selection.required.option("Bob").unwrap().hidden);
        assert!(selection.wanted.option("Bob").unwrap().hidden);
        assert_eq!(selection.wanted_names(), vec!["Alice"]);
        // Bob is no longer required, but stays hidden in wanted
        assert!(!selection.wanted.option("Bob").unwrap().disabled);
        assert!(!selection.wanted.select("Bob"));
    }

    #[test]
    fn clearing_filter_unhides() {
        let mut list = ParticipantList::new(NAMES);
        list.apply_filter(&FilterState::new(["Alice".to_string()], FilterMode::Whitelist));
        assert!(list.option("Bob").unwrap().hidden);
        list.apply_filter(&FilterState::default());
        assert!(list.options().iter().all(|o| !o.hidden));
    }

    #[test]
    fn add_keeps_order_and_ignores_duplicates() {
        let mut list = ParticipantList::new(["Bob", "Alice"]);
        assert!(list.add("Zoe"));
        assert!(!list.add("Bob"));
        let names: Vec<_> = list.options().iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["Bob", "Alice", "Zoe"]);
    }
}
