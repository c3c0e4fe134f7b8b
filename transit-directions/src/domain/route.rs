//! Route identifier type.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A route identifier, usually the feed's short name ("401", "451A").
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteId(pub String);

impl RouteId {
    /// Creates a route identifier.
    pub fn new(id: impl Into<String>) -> Self {
        RouteId(id.into())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RouteId {
    fn from(value: &str) -> Self {
        RouteId::new(value)
    }
}

impl From<String> for RouteId {
    fn from(value: String) -> Self {
        RouteId(value)
    }
}
