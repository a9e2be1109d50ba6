pub mod config;
pub mod delete;
pub mod entries;
pub mod filter;
pub mod mark;
pub mod people;
pub mod search;
pub mod whoami;

use anyhow::{Context, Result};
use scheduler_core::client::HttpClient;
use scheduler_core::config::SchedulerConfig;
use scheduler_core::session::Session;
use scheduler_core::storage::FileStorage;

use crate::utils::tui;

pub type CliSession = Session<HttpClient, FileStorage>;

/// Connect to the server and restore the remembered choices.
pub async fn open_session(config: &SchedulerConfig, allow_past: bool) -> Result<CliSession> {
    let api = HttpClient::new(config)?;
    let storage = FileStorage::open(&config.storage_path()?)?;

    let spinner = tui::create_spinner(format!("Connecting to {}", config.server_url));
    let session = Session::connect(api, storage, allow_past).await;
    spinner.finish_and_clear();

    session.with_context(|| format!("Could not load participants from {}", config.server_url))
}
