//! Terminal implementation of the core's user-facing surface.

use dialoguer::Confirm;
use owo_colors::OwoColorize;
use scheduler_core::notify::Notifier;

/// Width search results are wrapped to.
const RESULTS_WIDTH: usize = 80;

#[derive(Default)]
pub struct TerminalNotifier {
    /// Answer every confirmation with yes (`--force`).
    assume_yes: bool,
}

impl TerminalNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn assume_yes(mut self, yes: bool) -> Self {
        self.assume_yes = yes;
        self
    }
}

impl Notifier for TerminalNotifier {
    fn alert(&self, message: &str) {
        eprintln!("{} {}", "!".yellow().bold(), message.yellow());
    }

    fn confirm(&self, message: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        Confirm::new()
            .with_prompt(message)
            .default(false)
            .interact()
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "could not read confirmation");
                false
            })
    }

    fn show_results(&self, html: &str) {
        println!("{}", html_to_text(html));
    }
}

/// Plain-text rendering of the markup the date search returns.
pub fn html_to_text(html: &str) -> String {
    match html2text::from_read(html.as_bytes(), RESULTS_WIDTH) {
        Ok(text) => text.trim_end().to_string(),
        Err(e) => {
            tracing::warn!(error = %e, "could not render search results");
            html.to_string()
        }
    }
}
