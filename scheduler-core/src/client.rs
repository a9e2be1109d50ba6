//! HTTP client for the scheduler server.

use std::collections::BTreeSet;

use async_trait::async_trait;
use reqwest::StatusCode;
use url::Url;

use crate::api::{EntryApi, FindDatesRequest, FindDatesResponse};
use crate::config::SchedulerConfig;
use crate::date_range::DateRange;
use crate::entry::{Entry, EntryKey};
use crate::error::{SchedulerError, SchedulerResult};
use crate::participants::sort_names;

/// [`EntryApi`] implementation talking JSON over HTTP.
pub struct HttpClient {
    http: reqwest::Client,
    base_url: Url,
}

impl HttpClient {
    pub fn new(config: &SchedulerConfig) -> SchedulerResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| SchedulerError::Config(format!("Could not build HTTP client: {e}")))?;

        Ok(HttpClient {
            http,
            base_url: parse_base_url(&config.server_url)?,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> SchedulerResult<Url> {
        self.base_url
            .join(path)
            .map_err(|e| SchedulerError::Config(format!("Invalid endpoint '{path}': {e}")))
    }

    /// `/api/entries/{date}/{name}` with the name encoded as a single segment.
    fn entry_url(&self, key: &EntryKey) -> SchedulerResult<Url> {
        let mut url = self.endpoint("api/entries/")?;
        url.path_segments_mut()
            .map_err(|_| SchedulerError::Config(format!("Invalid server URL '{}'", self.base_url)))?
            .pop_if_empty()
            .push(&key.date.format("%Y-%m-%d").to_string())
            .push(&key.name);
        Ok(url)
    }
}

/// Parse the configured server URL, making sure relative endpoints resolve
/// below its path.
fn parse_base_url(raw: &str) -> SchedulerResult<Url> {
    let mut url = Url::parse(raw.trim())
        .map_err(|e| SchedulerError::Config(format!("Invalid server URL '{raw}': {e}")))?;
    if url.cannot_be_a_base() {
        return Err(SchedulerError::Config(format!("Invalid server URL '{raw}'")));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Turn a non-success response into an error of the given kind.
async fn check(
    resp: reqwest::Response,
    kind: fn(String) -> SchedulerError,
) -> SchedulerResult<reqwest::Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(kind(describe_failure(status, &body)))
}

fn distinct_names(entries: Vec<Entry>) -> Vec<String> {
    let mut names: Vec<String> = entries
        .into_iter()
        .map(|e| e.name)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    sort_names(&mut names);
    names
}

fn describe_failure(status: StatusCode, body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        format!("server responded with {status}")
    } else {
        format!("server responded with {status}: {body}")
    }
}

#[async_trait]
impl EntryApi for HttpClient {
    async fn get_entries(&self, range: &DateRange) -> SchedulerResult<Vec<Entry>> {
        let url = self.endpoint("api/entries/")?;
        let resp = self
            .http
            .get(url)
            .query(&[("start", range.start_param()), ("end", range.end_param())])
            .send()
            .await
            .map_err(|e| SchedulerError::Fetch(e.to_string()))?;

        let resp = check(resp, SchedulerError::Fetch).await?;
        resp.json()
            .await
            .map_err(|e| SchedulerError::Fetch(format!("unexpected response: {e}")))
    }

    async fn list_names(&self) -> SchedulerResult<Vec<String>> {
        let url = self.endpoint("api/entries/")?;
        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| SchedulerError::Fetch(e.to_string()))?;

        let resp = check(resp, SchedulerError::Fetch).await?;
        let entries: Vec<Entry> = resp
            .json()
            .await
            .map_err(|e| SchedulerError::Fetch(format!("unexpected response: {e}")))?;
        Ok(distinct_names(entries))
    }

    async fn create_entry(&self, entry: &Entry) -> SchedulerResult<()> {
        let url = self.endpoint("api/entries/")?;
        let resp = self
            .http
            .post(url)
            .json(entry)
            .send()
            .await
            .map_err(|e| SchedulerError::Save(e.to_string()))?;

        check(resp, SchedulerError::Save).await?;
        Ok(())
    }

    async fn delete_entry(&self, key: &EntryKey) -> SchedulerResult<()> {
        let url = self.entry_url(key)?;
        let resp = self
            .http
            .delete(url)
            .send()
            .await
            .map_err(|e| SchedulerError::Delete(e.to_string()))?;

        check(resp, SchedulerError::Delete).await?;
        Ok(())
    }

    async fn find_dates(&self, request: &FindDatesRequest) -> SchedulerResult<FindDatesResponse> {
        let url = self.endpoint("api/find-dates")?;
        let resp = self
            .http
            .post(url)
            .json(request)
            .send()
            .await
            .map_err(|e| SchedulerError::Search(e.to_string()))?;

        let resp = check(resp, SchedulerError::Search).await?;
        resp.json()
            .await
            .map_err(|e| SchedulerError::Search(format!("unexpected response: {e}")))
    }
}
