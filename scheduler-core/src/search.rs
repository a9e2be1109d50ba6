//! Triggering the server-side date search.

use crate::api::{EntryApi, FindDatesRequest};
use crate::error::{SchedulerError, SchedulerResult};
use crate::notify::Notifier;

pub const REQUIRED_MISSING: &str = "Select at least one required person.";
pub const NO_MATCHES: &str = "No matching dates found.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    NoMatches,
    Found { count: u64, html: String },
}

/// Ask the server for dates where everyone in `required` is available.
///
/// Without any required participant the user is told so and no request is
/// made. Zero matches are reported as a message; otherwise the returned
/// markup goes to the result surface. Transport failures are reported once,
/// without retrying.
pub async fn find_dates<A>(
    api: &A,
    notifier: &dyn Notifier,
    required: &[String],
    wanted: &[String],
    allow_past: bool,
) -> SchedulerResult<SearchOutcome>
where
    A: EntryApi + ?Sized,
{
    if required.is_empty() {
        notifier.alert(REQUIRED_MISSING);
        return Err(SchedulerError::Validation(REQUIRED_MISSING.into()));
    }

    let request = FindDatesRequest::new(required.to_vec(), wanted.to_vec(), allow_past);
    let response = match api.find_dates(&request).await {
        Ok(response) => response,
        Err(e) => {
            tracing::warn!(error = %e, "date search failed");
            let e = match e {
                SchedulerError::Search(_) => e,
                other => SchedulerError::Search(other.to_string()),
            };
            notifier.alert(&e.to_string());
            return Err(e);
        }
    };

    if response.count == 0 {
        notifier.alert(NO_MATCHES);
        return Ok(SearchOutcome::NoMatches);
    }

    let html = response.html.unwrap_or_default();
    notifier.show_results(&html);
    Ok(SearchOutcome::Found {
        count: response.count,
        html,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::recording::RecordingNotifier;
    use crate::testing::FakeApi;

    fn names(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn empty_required_never_calls_server() {
        let api = FakeApi::default();
        let notifier = RecordingNotifier::default();

        let err = find_dates(&api, &notifier, &[], &names(&["Bob"]), false)
            .await
            .unwrap_err();

        assert!(matches!(err, SchedulerError::Validation(_)));
        assert!(api.searches().is_empty());
        assert_eq!(notifier.alerts(), vec![REQUIRED_MISSING]);
    }

    #[tokio::test]
    async fn zero_matches_shows_message_only() {
        let api = FakeApi::default();
        api.respond_to_search(0, None);
        let notifier = RecordingNotifier::default();

        let outcome = find_dates(&api, &notifier, &names(&["Alice"]), &[], false)
            .await
            .unwrap();

        assert_eq!(outcome, SearchOutcome::NoMatches);
        assert_eq!(notifier.alerts(), vec![NO_MATCHES]);
        assert!(notifier.results().is_empty());
    }

    #[tokio::test]
    async fn matches_are_presented() {
        let api = FakeApi::default();
        api.respond_to_search(2, Some("<ul><li>Sa 01.06.</li></ul>"));
        let notifier = RecordingNotifier::default();

        let outcome = find_dates(&api, &notifier, &names(&["Alice"]), &names(&["Bob"]), true)
            .await
            .unwrap();

        assert!(matches!(outcome, SearchOutcome::Found { count: 2, .. }));
        assert_eq!(notifier.results(), vec!["<ul><li>Sa 01.06.</li></ul>"]);
        assert!(notifier.alerts().is_empty());

        let sent = api.searches();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].required, names(&["Alice"]));
        assert_eq!(sent[0].wanted, names(&["Bob"]));
        assert_eq!(sent[0].start, Some(None));
    }

    #[tokio::test]
    async fn transport_failure_is_reported_once() {
        let api = FakeApi::default();
        api.set_offline(true);
        let notifier = RecordingNotifier::default();

        let err = find_dates(&api, &notifier, &names(&["Alice"]), &[], false)
            .await
            .unwrap_err();

        assert!(matches!(err, SchedulerError::Search(_)));
        assert_eq!(api.searches().len(), 1);
        assert_eq!(notifier.alerts().len(), 1);
        assert!(notifier.alerts()[0].starts_with("Finding dates failed"));
    }
}
