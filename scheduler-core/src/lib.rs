//! Core of the scheduler client.
//!
//! People mark per-day availability (`yes`, `ifneedbe`, `maybe`, `no`) on a
//! shared calendar and search for dates where a required group is available.
//! This crate holds the client side of that:
//! - `api` / `client`: the server contract and its HTTP implementation
//! - `cache`: single-slot cache of the last fetched calendar window
//! - `mutator`: optimistic creates with rollback, confirmed deletes
//! - `filter` / `participants`: name filtering and search selections
//! - `session`: the stateful service tying it all together

pub mod api;
pub mod cache;
pub mod client;
pub mod config;
pub mod date_range;
pub mod entry;
pub mod error;
pub mod filter;
pub mod mutator;
pub mod notify;
pub mod participants;
pub mod search;
pub mod session;
pub mod storage;
pub mod visible;

#[cfg(test)]
mod testing;

pub use entry::{Entry, EntryKey, EntryType};
pub use error::{SchedulerError, SchedulerResult};
