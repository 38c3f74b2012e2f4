//! Typed identifier for properties, backed by the store's integer row id.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Unique identifier for a [`Property`](crate::property::Property).
///
/// Assigned by the persistence layer on insert and never changed afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertyId(i64);

impl PropertyId {
    /// Wrap a raw row id.
    #[must_use]
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Access the raw row id.
    #[must_use]
    pub fn as_i64(self) -> i64 {
        self.0
    }
}

impl fmt::Display for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
