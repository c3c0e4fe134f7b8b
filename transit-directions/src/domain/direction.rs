//! Direction types.
//!
//! A route declares a handful of `DirectionSignature`s, each a named travel
//! pattern with the anchor stops it is expected to pass in order.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::StopId;

/// The tag a direction is published under.
///
/// Feeds either label directions with headsign text ("Bethel TT") or with
/// a bare numeric code. The label is opaque to classification; it only has
/// to be unique within a route.
///
/// In JSON a headsign is a string and a code is an integer:
///
/// ```
/// use transit_directions::domain::DirectionLabel;
///
/// let headsign: DirectionLabel = serde_json::from_str(r#""Ordze TC""#).unwrap();
/// assert_eq!(headsign, DirectionLabel::headsign("Ordze TC"));
///
/// let code: DirectionLabel = serde_json::from_str("1").unwrap();
/// assert_eq!(code, DirectionLabel::Code(1));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DirectionLabel {
    /// Numeric direction code
    Code(u32),
    /// Headsign text
    Headsign(String),
}

impl DirectionLabel {
    /// Creates a headsign label.
    pub fn headsign(text: impl Into<String>) -> Self {
        DirectionLabel::Headsign(text.into())
    }
}

impl From<&str> for DirectionLabel {
    fn from(value: &str) -> Self {
        DirectionLabel::headsign(value)
    }
}

impl From<u32> for DirectionLabel {
    fn from(value: u32) -> Self {
        DirectionLabel::Code(value)
    }
}

impl fmt::Display for DirectionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DirectionLabel::Code(code) => write!(f, "#{code}"),
            DirectionLabel::Headsign(text) => f.write_str(text),
        }
    }
}

/// Index of a direction within its route spec, in declaration order.
///
/// Declaration order is the final tie-break between equally ranked
/// candidates, so the index doubles as a priority (lower wins).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DirectionIndex(pub usize);

impl fmt::Display for DirectionIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One declared travel pattern of a route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectionSignature {
    /// Published tag
    pub label: DirectionLabel,
    /// Anchor stops in the order this direction passes them
    pub anchor_order: Vec<StopId>,
}

impl DirectionSignature {
    /// Creates a signature.
    pub fn new(label: DirectionLabel, anchor_order: Vec<StopId>) -> Self {
        Self {
            label,
            anchor_order,
        }
    }

    /// Position of the first occurrence of a stop in the anchor order.
    pub fn anchor_position(&self, stop: &StopId) -> Option<usize> {
        self.anchor_order.iter().position(|s| s == stop)
    }

    /// Does the anchor order mention this stop?
    pub fn has_anchor(&self, stop: &StopId) -> bool {
        self.anchor_position(stop).is_some()
    }

    /// Does the anchor order pass `from` and later `to`?
    ///
    /// Any occurrence counts, so a loop that starts and ends at the same
    /// terminal passes `(terminal, terminal)`.
    pub fn passes_in_order(&self, from: &StopId, to: &StopId) -> bool {
        self.anchor_order
            .iter()
            .enumerate()
            .any(|(i, a)| a == from && self.anchor_order[i + 1..].contains(to))
    }
}
