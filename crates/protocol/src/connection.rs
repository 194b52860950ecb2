//! Connection identity
//!
//! Every observed connection gets a process-lifetime-unique, strictly
//! increasing sequence number. The registry also retains the connection's
//! origin URL so message handlers can recover it from the id alone.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;

/// Unique identifier for one logical connection
///
/// Ids start at 1, never repeat, and never decrease. The id may differ
/// from any identifier the host assigns to the same connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionId(u64);

impl ConnectionId {
    /// Create an id from a raw value
    #[inline]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw id value
    #[inline]
    pub const fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Concurrent connection registry
///
/// Allocation is a single `fetch_add` so producers on any thread can
/// register connections without contending on a lock. URLs are retained
/// for the life of the process; the registry performs no connection
/// lifecycle management beyond issuing ids.
#[derive(Debug, Default)]
pub struct ConnectionRegistry {
    /// Next id minus one; `fetch_add(1) + 1` yields ids starting at 1
    counter: AtomicU64,

    /// Origin URL per connection, captured at establishment
    urls: DashMap<ConnectionId, Arc<str>>,
}

impl ConnectionRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new connection and return its id
    ///
    /// Safe under arbitrary concurrent calls; every caller receives a
    /// distinct id.
    pub fn register(&self, url: impl Into<Arc<str>>) -> ConnectionId {
        let id = ConnectionId::new(self.counter.fetch_add(1, Ordering::Relaxed) + 1);
        self.urls.insert(id, url.into());
        id
    }

    /// Resolve the origin URL of a connection
    ///
    /// Returns `None` for an id this registry never issued.
    pub fn url(&self, id: ConnectionId) -> Option<Arc<str>> {
        self.urls.get(&id).map(|u| Arc::clone(&u))
    }

    /// Number of connections registered so far
    pub fn len(&self) -> usize {
        self.urls.len()
    }

    /// Whether no connection has been registered yet
    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}
