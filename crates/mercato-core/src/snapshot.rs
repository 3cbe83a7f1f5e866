//! # Snapshot Slots
//!
//! Holds the last good copy of one external collection and arbitrates
//! between overlapping fetches.
//!
//! ## Fetch Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  begin() ──► FetchTicket { seq: n }     loading = true                 │
//! │  begin() ──► FetchTicket { seq: n+1 }   (supersedes n)                 │
//! │                                                                         │
//! │  complete(ticket n,   ..)  ──► Stale    (ignored, state untouched)     │
//! │  complete(ticket n+1, Ok)  ──► Applied  records replaced, revision++   │
//! │  complete(ticket n+1, Err) ──► Failed   records kept, last_error set   │
//! │                                                                         │
//! │  Last writer wins: only the most recently issued ticket may land.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{SnapshotError, SnapshotKind};

/// Sequence token for one fetch of one snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FetchTicket {
    pub kind: SnapshotKind,
    pub seq: u64,
}

/// What happened to a completed fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotOutcome {
    /// New records are in place.
    Applied,
    /// Fetch failed; the previous records are still served.
    Failed,
    /// A newer fetch was started after this one; result dropped.
    Stale,
}

/// Last-good records of one snapshot kind plus fetch bookkeeping.
#[derive(Debug, Clone)]
pub struct SnapshotSlot<T> {
    kind: SnapshotKind,
    records: Option<Vec<T>>,
    revision: u64,
    issued: u64,
    loading: bool,
    last_error: Option<SnapshotError>,
}

impl<T> SnapshotSlot<T> {
    /// An empty slot that has never been loaded.
    pub fn new(kind: SnapshotKind) -> Self {
        SnapshotSlot {
            kind,
            records: None,
            revision: 0,
            issued: 0,
            loading: false,
            last_error: None,
        }
    }

    pub fn kind(&self) -> SnapshotKind {
        self.kind
    }

    /// Issues a ticket for a new fetch, superseding any in flight.
    pub fn begin(&mut self) -> FetchTicket {
        self.issued += 1;
        self.loading = true;
        FetchTicket {
            kind: self.kind,
            seq: self.issued,
        }
    }

    /// Lands a fetch result.
    pub fn complete(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<T>, SnapshotError>,
    ) -> SnapshotOutcome {
        if ticket.kind != self.kind || ticket.seq != self.issued {
            return SnapshotOutcome::Stale;
        }
        self.loading = false;
        match result {
            Ok(records) => {
                self.replace(records);
                SnapshotOutcome::Applied
            }
            Err(err) => {
                self.last_error = Some(err);
                SnapshotOutcome::Failed
            }
        }
    }

    /// Installs records directly, outside the ticket protocol.
    ///
    /// Invalidates every ticket issued so far.
    pub fn replace(&mut self, records: Vec<T>) {
        self.records = Some(records);
        self.revision += 1;
        self.last_error = None;
        if self.loading {
            // in-flight results must not overwrite this
            self.issued += 1;
            self.loading = false;
        }
    }

    /// Current records; empty until the first successful load.
    pub fn records(&self) -> &[T] {
        self.records.as_deref().unwrap_or(&[])
    }

    pub fn is_loaded(&self) -> bool {
        self.records.is_some()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Bumped on every successful replacement.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn last_error(&self) -> Option<&SnapshotError> {
        self.last_error.as_ref()
    }

    /// Clears the transient error notice.
    pub fn dismiss_error(&mut self) {
        self.last_error = None;
    }
}
