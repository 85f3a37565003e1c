//! Unique ID generation for demo instances.

use std::sync::atomic::{AtomicU64, Ordering};

/// Counter shared by every demo on the page.
static NEXT_DEMO_ID: AtomicU64 = AtomicU64::new(1);

/// A unique identifier for an engine instance, used to tell instances apart in logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DemoId(u64);

impl DemoId {
    /// Generate a new unique ID.
    #[inline]
    pub fn new() -> Self {
        Self(NEXT_DEMO_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw ID value.
    #[inline]
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl Default for DemoId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for DemoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}
