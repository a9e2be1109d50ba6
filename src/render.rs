//! Terminal rendering for scheduler types.
//!
//! Extension traits that add colored output to scheduler-core types using
//! owo_colors. Status colours follow the calendar's palette.

use chrono::NaiveDate;
use owo_colors::OwoColorize;
use scheduler_core::date_range::DateRange;
use scheduler_core::filter::{FilterMode, FilterState};
use scheduler_core::participants::ParticipantList;
use scheduler_core::visible::VisibleSet;
use scheduler_core::{Entry, EntryType};

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

/// Parse `#rgb` / `#rrggbb` into components.
fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
    let digits = hex.trim_start_matches('#');
    let expanded: String = match digits.len() {
        3 => digits.chars().flat_map(|c| [c, c]).collect(),
        _ => digits.to_string(),
    };
    let channel = |i: usize| {
        expanded
            .get(i..i + 2)
            .and_then(|s| u8::from_str_radix(s, 16).ok())
            .unwrap_or(0)
    };
    (channel(0), channel(2), channel(4))
}

/// `text` on the status' background colour.
fn badge(kind: EntryType, text: &str) -> String {
    let (br, bg, bb) = hex_to_rgb(kind.color());
    let (fr, fg, fb) = hex_to_rgb(kind.text_color());
    format!(" {} ", text)
        .truecolor(fr, fg, fb)
        .on_truecolor(br, bg, bb)
        .to_string()
}

impl Render for EntryType {
    fn render(&self) -> String {
        badge(*self, self.as_str())
    }
}

impl Render for Entry {
    fn render(&self) -> String {
        format!("{} {}", badge(self.kind, &self.name), self.kind.as_str().dimmed())
    }
}

impl Render for FilterState {
    fn render(&self) -> String {
        if !self.is_active() {
            return "No filter (everyone is shown)".dimmed().to_string();
        }
        let names: Vec<&str> = self.names.iter().map(String::as_str).collect();
        match self.mode {
            FilterMode::Blacklist => format!("{} {}", "Hiding:".bold(), names.join(", ")),
            FilterMode::Whitelist => format!("{} {}", "Only showing:".bold(), names.join(", ")),
        }
    }
}

impl Render for ParticipantList {
    fn render(&self) -> String {
        if self.options().is_empty() {
            return "   Nobody yet".dimmed().to_string();
        }
        self.options()
            .iter()
            .map(|option| {
                if option.hidden {
                    format!("   {} {}", option.name.dimmed(), "(filtered)".dimmed())
                } else {
                    format!("   {}", option.name)
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// One line naming every status in its colour.
pub fn render_legend() -> String {
    EntryType::ALL
        .iter()
        .map(|kind| kind.render())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Render the shown entries of `range`, grouped by day.
pub fn render_calendar(visible: &VisibleSet, range: &DateRange, today: NaiveDate) -> String {
    let mut lines = Vec::new();

    for date in range.days() {
        let entries = visible.on_day(date);
        if entries.is_empty() {
            continue;
        }
        if !lines.is_empty() {
            lines.push(String::new());
        }
        lines.push(format_date_label(date, today).bold().to_string());
        for entry in entries {
            lines.push(format!("  {}", entry.render()));
        }
    }

    if lines.is_empty() {
        return format!(
            "{}",
            format!("No entries between {} and {}", range.start, range.end).dimmed()
        );
    }
    lines.join("\n")
}

/// Format a date as a human-readable label (e.g. "Today", "Tomorrow", "Sat Jun 1")
pub fn format_date_label(date: NaiveDate, today: NaiveDate) -> String {
    match (date - today).num_days() {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        _ => date.format("%a %b %-d").to_string(),
    }
}
