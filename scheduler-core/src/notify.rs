//! The user-facing surface the core talks back through.

/// Blocking messages, confirmations and the search result surface.
pub trait Notifier {
    /// Show a message the user has to acknowledge.
    fn alert(&self, message: &str);

    /// Ask a yes/no question.
    fn confirm(&self, message: &str) -> bool;

    /// Present the markup returned by a date search.
    fn show_results(&self, html: &str);
}

#[cfg(test)]
pub(crate) mod recording {
    use std::cell::{Cell, RefCell};

    use super::Notifier;

    /// Notifier that records everything and answers confirmations with a
    /// fixed value.
    #[derive(Default)]
    pub struct RecordingNotifier {
        pub alerts: RefCell<Vec<String>>,
        pub questions: RefCell<Vec<String>>,
        pub results: RefCell<Vec<String>>,
        pub answer: Cell<bool>,
    }

    impl RecordingNotifier {
        pub fn answering(answer: bool) -> Self {
            let notifier = RecordingNotifier::default();
            notifier.answer.set(answer);
            notifier
        }

        pub fn alerts(&self) -> Vec<String> {
            self.alerts.borrow().clone()
        }

        pub fn results(&self) -> Vec<String> {
            self.results.borrow().clone()
        }
    }

    impl Notifier for RecordingNotifier {
        fn alert(&self, message: &str) {
            self.alerts.borrow_mut().push(message.to_string());
        }

        fn confirm(&self, message: &str) -> bool {
            self.questions.borrow_mut().push(message.to_string());
            self.answer.get()
        }

        fn show_results(&self, html: &str) {
            self.results.borrow_mut().push(html.to_string());
        }
    }
}
