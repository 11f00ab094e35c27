//! Observable record collection shared by the synchronization modules.
//!
//! A [`Collection`] owns the `records / loading / error` triple of one record
//! kind. State lives in a `tokio::sync::watch` channel: every mutation is
//! published to subscribers, and readers get cheap snapshots. Mutations are
//! only applied after the store has confirmed the corresponding call.

use crate::error::{SyncError, SyncResult};
use flightdesk_client::Record;
use std::fmt::Display;
use tokio::sync::watch;
use tracing::{error, warn};

/// Snapshot of a collection as seen by consumers.
#[derive(Debug, Clone)]
pub struct CollectionState<T> {
    /// Query/response order for fetches, append order for creates.
    pub records: Vec<T>,
    /// True while at least one query is in flight.
    pub loading: bool,
    /// Message of the most recent failure, cleared when a query starts.
    pub error: Option<String>,
    queries_in_flight: usize,
}

impl<T> Default for CollectionState<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            loading: false,
            error: None,
            queries_in_flight: 0,
        }
    }
}

/// Observable local copy of one record kind, with its loading flag and error slot.
pub struct Collection<T: Record> {
    kind: &'static str,
    state: watch::Sender<CollectionState<T>>,
}

/// Keeps `loading` raised for as long as it is alive.
#[must_use = "the query bracket ends when the guard is dropped"]
pub struct QueryGuard<'a, T: Record> {
    collection: &'a Collection<T>,
}

impl<T: Record> Drop for QueryGuard<'_, T> {
    fn drop(&mut self) {
        self.collection.state.send_modify(|s| {
            s.queries_in_flight = s.queries_in_flight.saturating_sub(1);
            s.loading = s.queries_in_flight > 0;
        });
    }
}

impl<T: Record> Collection<T> {
    /// `kind` names the record type in log lines and error messages.
    pub fn new(kind: &'static str) -> Self {
        Self {
            kind,
            state: watch::Sender::new(CollectionState::default()),
        }
    }

    pub fn kind(&self) -> &'static str {
        self.kind
    }

    pub fn subscribe(&self) -> watch::Receiver<CollectionState<T>> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> CollectionState<T> {
        self.state.borrow().clone()
    }

    pub fn records(&self) -> Vec<T> {
        self.state.borrow().records.clone()
    }

    pub fn len(&self) -> usize {
        self.state.borrow().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.borrow().records.is_empty()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().loading
    }

    pub fn error(&self) -> Option<String> {
        self.state.borrow().error.clone()
    }

    /// Starts a query cycle: raises `loading` and clears the error slot.
    pub fn begin_query(&self) -> QueryGuard<'_, T> {
        self.state.send_modify(|s| {
            s.queries_in_flight += 1;
            s.loading = true;
            s.error = None;
        });
        QueryGuard { collection: self }
    }

    /// Replaces every record with `records`, in order. Records without an id
    /// are dropped. Returns the resulting length.
    pub fn replace_all(&self, records: Vec<T>) -> usize {
        let total = records.len();
        let records: Vec<T> = records.into_iter().filter(|r| r.id().is_some()).collect();
        if records.len() != total {
            warn!(
                "Dropped {} {} record(s) without id from response",
                total - records.len(),
                self.kind
            );
        }

        let len = records.len();
        self.state.send_modify(|s| s.records = records);
        len
    }

    pub fn append(&self, record: T) -> SyncResult<()> {
        if record.id().is_none() {
            return Err(SyncError::MissingId(self.kind));
        }
        self.state.send_modify(|s| s.records.push(record));
        Ok(())
    }

    /// Replaces the record whose id is `id` in place. Returns `false`, leaving
    /// the collection untouched, when no local record matches.
    pub fn replace(&self, id: i64, record: T) -> SyncResult<bool> {
        if record.id().is_none() {
            return Err(SyncError::MissingId(self.kind));
        }

        let replaced = self.state.send_if_modified(|s| {
            match s.records.iter().position(|r| r.id() == Some(id)) {
                Some(index) => {
                    s.records[index] = record;
                    true
                }
                None => false,
            }
        });

        if !replaced {
            warn!("No local {} with id {}, discarding update response", self.kind, id);
        }
        Ok(replaced)
    }

    /// Removes every record with the given id. Returns how many were removed.
    pub fn remove(&self, id: i64) -> usize {
        let mut removed = 0;
        self.state.send_if_modified(|s| {
            let before = s.records.len();
            s.records.retain(|r| r.id() != Some(id));
            removed = before - s.records.len();
            removed > 0
        });
        removed
    }

    /// Overwrites the error slot with `"{context}: {err}"`.
    pub fn fail(&self, context: &str, err: impl Display) {
        let message = format!("{}: {}", context, err);
        error!("{} ({})", message, self.kind);
        self.state.send_modify(|s| s.error = Some(message));
    }
}
