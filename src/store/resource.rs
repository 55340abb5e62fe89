//! Fetched Resource
//!
//! One independently fetched value (usually a collection) together with its
//! `FetchStatus`, the endpoint it came from, and the bookkeeping that keeps
//! late responses from clobbering newer ones.

use std::fmt;

use crate::api::Endpoint;
use crate::domain::{Entity, FetchResult};

/// Lifecycle of one asynchronous retrieval
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FetchStatus {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed(String),
}

impl FetchStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchStatus::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            FetchStatus::Failed(reason) => Some(reason),
            _ => None,
        }
    }
}

impl fmt::Display for FetchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchStatus::Idle => write!(f, "idle"),
            FetchStatus::Loading => write!(f, "loading"),
            FetchStatus::Ready => write!(f, "ready"),
            FetchStatus::Failed(reason) => write!(f, "failed: {}", reason),
        }
    }
}

/// Receipt for one issued request
///
/// Only the ticket from the most recent `begin` can settle a resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    pub seq: u64,
    pub endpoint: Endpoint,
}

#[derive(Debug, Clone, Default)]
pub struct Resource<T> {
    data: T,
    status: FetchStatus,
    last_request: Option<Endpoint>,
    seq: u64,
    revision: u64,
}

/// A fetched, ordered collection
pub type RemoteCollection<T> = Resource<Vec<T>>;

impl<T: Default> Resource<T> {
    pub fn new() -> Self {
        Self {
            data: T::default(),
            status: FetchStatus::Idle,
            last_request: None,
            seq: 0,
            revision: 0,
        }
    }

    /// Drop held data and any in-flight request; back to Idle
    pub fn reset(&mut self) {
        self.data = T::default();
        self.status = FetchStatus::Idle;
        self.last_request = None;
        self.seq += 1;
        self.revision += 1;
    }
}

impl<T> Resource<T> {
    pub fn data(&self) -> &T {
        &self.data
    }

    pub fn status(&self) -> &FetchStatus {
        &self.status
    }

    /// Bumped whenever `data` changes, by fetch or by local edit
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn last_request(&self) -> Option<&Endpoint> {
        self.last_request.as_ref()
    }

    /// Issue a request: status becomes Loading before anything is sent
    pub fn begin(&mut self, endpoint: Endpoint) -> Ticket {
        self.seq += 1;
        self.status = FetchStatus::Loading;
        self.last_request = Some(endpoint.clone());
        Ticket {
            seq: self.seq,
            endpoint,
        }
    }

    pub fn is_current(&self, ticket: &Ticket) -> bool {
        ticket.seq == self.seq
    }

    /// Apply the outcome of a request
    ///
    /// Success replaces the data wholesale; failure keeps whatever was held.
    /// Returns false when the ticket was superseded and the outcome dropped.
    pub fn settle(&mut self, ticket: &Ticket, result: FetchResult<T>) -> bool {
        if !self.is_current(ticket) {
            log::warn!(
                "[STORE] dropping stale response for {} (seq {} < {})",
                ticket.endpoint,
                ticket.seq,
                self.seq
            );
            return false;
        }
        match result {
            Ok(data) => {
                log::debug!("[STORE] {} ready", ticket.endpoint);
                self.data = data;
                self.revision += 1;
                self.status = FetchStatus::Ready;
            }
            Err(e) => {
                log::warn!("[STORE] {} failed: {}", ticket.endpoint, e);
                self.status = FetchStatus::Failed(e.to_string());
            }
        }
        true
    }

    /// Re-issue the request that failed; None unless currently Failed
    pub fn retry(&mut self) -> Option<Ticket> {
        if !matches!(self.status, FetchStatus::Failed(_)) {
            return None;
        }
        let endpoint = self.last_request.clone()?;
        log::debug!("[STORE] retrying {}", endpoint);
        Some(self.begin(endpoint))
    }

    /// Client-only mutation; status is left alone
    pub fn edit<R>(&mut self, f: impl FnOnce(&mut T) -> R) -> R {
        let out = f(&mut self.data);
        self.revision += 1;
        out
    }
}

impl<E: Entity> Resource<Vec<E>> {
    pub fn items(&self) -> &[E] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn find(&self, id: E::Id) -> Option<&E> {
        self.data.iter().find(|item| item.id() == id)
    }

    pub fn contains(&self, id: E::Id) -> bool {
        self.find(id).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FetchError, Todo};

    fn todos(ids: &[u32]) -> Vec<Todo> {
        ids.iter().map(|&id| Todo::new(id, "t")).collect()
    }

    #[test]
    fn test_begin_marks_loading() {
        let mut res: RemoteCollection<Todo> = Resource::new();
        assert_eq!(res.status(), &FetchStatus::Idle);

        let ticket = res.begin(Endpoint::Todos);
        assert!(res.status().is_loading());
        assert_eq!(res.last_request(), Some(&Endpoint::Todos));
        assert!(res.is_current(&ticket));
    }

    #[test]
    fn test_success_replaces_data() {
        let mut res: RemoteCollection<Todo> = Resource::new();
        let ticket = res.begin(Endpoint::Todos);
        assert!(res.settle(&ticket, Ok(todos(&[1, 2]))));

        assert_eq!(res.status(), &FetchStatus::Ready);
        assert_eq!(res.len(), 2);
        assert!(res.contains(2));
        assert_eq!(res.revision(), 1);
    }

    #[test]
    fn test_failure_keeps_prior_data() {
        let mut res: RemoteCollection<Todo> = Resource::new();
        let first = res.begin(Endpoint::Todos);
        res.settle(&first, Ok(todos(&[1, 2, 3])));

        let second = res.begin(Endpoint::Todos);
        res.settle(&second, Err(FetchError::Network("Failed to fetch".to_string())));

        assert_eq!(res.status().error(), Some("Failed to fetch"));
        assert_eq!(res.len(), 3);
        assert_eq!(res.revision(), 1);
    }

    #[test]
    fn test_stale_ticket_is_dropped() {
        let mut res: RemoteCollection<Todo> = Resource::new();
        let old = res.begin(Endpoint::Todos);
        let new = res.begin(Endpoint::Todos);

        assert!(res.settle(&new, Ok(todos(&[9]))));
        assert!(!res.settle(&old, Ok(todos(&[1, 2]))));
        assert_eq!(res.items()[0].id, 9);
    }

    #[test]
    fn test_retry_reissues_same_request() {
        let mut res: RemoteCollection<Todo> = Resource::new();
        assert!(res.retry().is_none());

        let endpoint = Endpoint::PostComments(5);
        let ticket = res.begin(endpoint.clone());
        res.settle(&ticket, Err(FetchError::Parse("eof".to_string())));

        let retried = res.retry().unwrap();
        assert_eq!(retried.endpoint, endpoint);
        assert!(retried.seq > ticket.seq);
        assert!(res.status().is_loading());
        // not failed any more
        assert!(res.retry().is_none());
    }

    #[test]
    fn test_reset_invalidates_in_flight() {
        let mut res: RemoteCollection<Todo> = Resource::new();
        let ticket = res.begin(Endpoint::PostComments(1));
        res.reset();

        assert!(!res.settle(&ticket, Ok(todos(&[1]))));
        assert!(res.is_empty());
        assert_eq!(res.status(), &FetchStatus::Idle);
        assert!(res.last_request().is_none());
    }

    #[test]
    fn test_edit_bumps_revision_not_status() {
        let mut res: RemoteCollection<Todo> = Resource::new();
        let ticket = res.begin(Endpoint::Todos);
        res.settle(&ticket, Ok(todos(&[1])));

        res.edit(|items| items[0].toggle());
        assert!(res.items()[0].completed);
        assert_eq!(res.status(), &FetchStatus::Ready);
        assert_eq!(res.revision(), 2);
    }
}
