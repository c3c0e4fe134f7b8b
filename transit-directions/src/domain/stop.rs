//! Stop identifier types.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// The textual form of the wildcard side of a before/after key.
pub const WILDCARD: &str = "*";

/// Error returned when parsing an invalid stop identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid stop id {input:?}: {reason}")]
pub struct InvalidStopId {
    input: String,
    reason: &'static str,
}

/// A feed stop identifier.
///
/// Stop identifiers are opaque strings taken from the feed. The same stop
/// can be visited by many trips, in either direction, and more than once
/// by a single trip. Cloning is cheap (the text is reference counted), so
/// candidates and diagnostics hold owned copies.
///
/// # Examples
///
/// ```
/// use transit_directions::domain::StopId;
///
/// let stop = StopId::parse("8000").unwrap();
/// assert_eq!(stop.as_str(), "8000");
///
/// // Surrounding whitespace is not part of the identifier
/// assert_eq!(StopId::parse(" 8000 ").unwrap(), stop);
///
/// // Empty identifiers and the wildcard marker are rejected
/// assert!(StopId::parse("").is_err());
/// assert!(StopId::parse("*").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StopId(Arc<str>);

impl StopId {
    /// Parse a stop identifier, trimming surrounding whitespace.
    pub fn parse(s: &str) -> Result<Self, InvalidStopId> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(InvalidStopId {
                input: s.to_string(),
                reason: "must not be empty",
            });
        }

        if trimmed == WILDCARD {
            return Err(InvalidStopId {
                input: s.to_string(),
                reason: "the wildcard is not a stop",
            });
        }

        Ok(StopId(Arc::from(trimmed)))
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StopId({})", self.as_str())
    }
}

impl fmt::Display for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for StopId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for StopId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        StopId::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// One side of a before/after key: a specific stop or the wildcard.
///
/// Ordered so that `Any` sorts before every stop, which keeps key listings
/// stable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StopRef {
    /// Matches any stop identifier.
    Any,
    /// Matches exactly this stop.
    Stop(StopId),
}

impl StopRef {
    /// Parse a key side: `"*"` is the wildcard, anything else a stop.
    pub fn parse(s: &str) -> Result<Self, InvalidStopId> {
        if s.trim() == WILDCARD {
            Ok(StopRef::Any)
        } else {
            StopId::parse(s).map(StopRef::Stop)
        }
    }

    /// Returns the stop, or `None` for the wildcard.
    pub fn stop(&self) -> Option<&StopId> {
        match self {
            StopRef::Any => None,
            StopRef::Stop(id) => Some(id),
        }
    }

    /// Returns true for the wildcard.
    pub fn is_wildcard(&self) -> bool {
        matches!(self, StopRef::Any)
    }
}

impl From<StopId> for StopRef {
    fn from(value: StopId) -> Self {
        StopRef::Stop(value)
    }
}

impl fmt::Display for StopRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopRef::Any => f.write_str(WILDCARD),
            StopRef::Stop(id) => f.write_str(id.as_str()),
        }
    }
}

impl Serialize for StopRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for StopRef {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        StopRef::parse(&raw).map_err(serde::de::Error::custom)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Roundtrip: parse then as_str returns the original
        #[test]
        fn roundtrip(s in "[A-Za-z0-9_-]{1,12}") {
            let stop = StopId::parse(&s).unwrap();
            prop_assert_eq!(stop.as_str(), s.as_str());
        }

        /// Equality follows the text, not the allocation
        #[test]
        fn equality_by_content(s in "[0-9]{1,6}") {
            let a = StopId::parse(&s).unwrap();
            let b = StopId::parse(&s).unwrap();
            prop_assert_eq!(a, b);
        }
    }
}
