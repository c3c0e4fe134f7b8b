//! Before/after lookup keys.

use std::fmt;

use crate::domain::{StopId, StopRef};

/// Which sides of a key name a concrete stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyShape {
    /// Both sides are stops: `(before, after)`
    Exact,
    /// Only the before side is a stop: `(before, *)`
    BeforeOnly,
    /// Only the after side is a stop: `(*, after)`
    AfterOnly,
    /// Neither side is a stop: `(*, *)`, never valid in a spec
    Unbounded,
}

/// A `(before, after)` pair of anchors used to look up a direction.
///
/// Either side may be the wildcard, meaning "any stop". A key with the
/// wildcard on both sides would match every visit and is rejected when a
/// spec is built.
///
/// # Examples
///
/// ```
/// use transit_directions::domain::StopId;
/// use transit_directions::patterns::{BeforeAfterKey, KeyShape};
///
/// let t0 = StopId::parse("T0").unwrap();
///
/// let key = BeforeAfterKey::before_only(t0.clone());
/// assert_eq!(key.shape(), KeyShape::BeforeOnly);
/// assert_eq!(key.to_string(), "(T0, *)");
///
/// let parsed = BeforeAfterKey::parse("T0", "*").unwrap();
/// assert_eq!(parsed, key);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BeforeAfterKey {
    /// Anchor expected before the visit
    pub before: StopRef,
    /// Anchor expected after the visit
    pub after: StopRef,
}

impl BeforeAfterKey {
    /// Creates a key from two sides.
    pub fn new(before: StopRef, after: StopRef) -> Self {
        Self { before, after }
    }

    /// Key naming both anchors.
    pub fn exact(before: StopId, after: StopId) -> Self {
        Self::new(StopRef::Stop(before), StopRef::Stop(after))
    }

    /// Key naming only the preceding anchor: `(before, *)`.
    pub fn before_only(before: StopId) -> Self {
        Self::new(StopRef::Stop(before), StopRef::Any)
    }

    /// Key naming only the following anchor: `(*, after)`.
    pub fn after_only(after: StopId) -> Self {
        Self::new(StopRef::Any, StopRef::Stop(after))
    }

    /// Parse both sides, `"*"` being the wildcard.
    pub fn parse(before: &str, after: &str) -> Result<Self, crate::domain::InvalidStopId> {
        Ok(Self::new(StopRef::parse(before)?, StopRef::parse(after)?))
    }

    /// Which sides name a stop.
    pub fn shape(&self) -> KeyShape {
        match (&self.before, &self.after) {
            (StopRef::Stop(_), StopRef::Stop(_)) => KeyShape::Exact,
            (StopRef::Stop(_), StopRef::Any) => KeyShape::BeforeOnly,
            (StopRef::Any, StopRef::Stop(_)) => KeyShape::AfterOnly,
            (StopRef::Any, StopRef::Any) => KeyShape::Unbounded,
        }
    }

    /// The concrete stops the key mentions.
    pub fn stops(&self) -> impl Iterator<Item = &StopId> {
        self.before.stop().into_iter().chain(self.after.stop())
    }
}

impl fmt::Display for BeforeAfterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.before, self.after)
    }
}
