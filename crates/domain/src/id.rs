//! Subscriber identifiers and their allocator.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Unique identifier of a connected subscriber.
///
/// Stable for the whole lifetime of the subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriberId(u64);

impl SubscriberId {
    /// Wrap a raw numeric identifier.
    #[must_use]
    pub const fn from_raw(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for SubscriberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Monotonic allocator for [`SubscriberId`]s.
///
/// Identifiers start at `1` and are never handed out twice, so a new
/// subscriber can't collide with one that is still registered, no matter
/// how connects and disconnects interleave.
#[derive(Debug)]
pub struct IdSequence {
    next: AtomicU64,
}

impl Default for IdSequence {
    fn default() -> Self {
        Self {
            next: AtomicU64::new(1),
        }
    }
}

impl IdSequence {
    /// Create a sequence starting at `1`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next identifier.
    pub fn allocate(&self) -> SubscriberId {
        SubscriberId(self.next.fetch_add(1, Ordering::Relaxed))
    }
}
