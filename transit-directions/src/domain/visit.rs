//! Stop visit types.
//!
//! A `StopVisit` is one occurrence of a stop within a scheduled trip, and a
//! `TripStopSequence` is the ordered list of visits for one raw feed trip.
//! `SequenceIndex` is the feed's position of a visit within its trip.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{DomainError, StopId};

/// Position of a visit within its trip, as given by the feed.
///
/// Indices are strictly increasing along a trip but need not be contiguous
/// or start at any particular value. Distances between indices are the
/// locality measure used when ranking direction candidates.
///
/// # Examples
///
/// ```
/// use transit_directions::domain::SequenceIndex;
///
/// let a = SequenceIndex(3);
/// let b = SequenceIndex(7);
/// assert_eq!(a.distance(b), 4);
/// assert_eq!(b.distance(a), 4);
/// assert!(a < b);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct SequenceIndex(pub u32);

impl SequenceIndex {
    /// Absolute distance between two indices.
    pub fn distance(self, other: SequenceIndex) -> u32 {
        self.0.abs_diff(other.0)
    }
}

impl fmt::Display for SequenceIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for SequenceIndex {
    fn from(value: u32) -> Self {
        SequenceIndex(value)
    }
}

/// Raw feed trip identifier, used only for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TripId(pub String);

impl TripId {
    /// Creates a trip identifier.
    pub fn new(id: impl Into<String>) -> Self {
        TripId(id.into())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TripId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One occurrence of a physical stop within one scheduled trip.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StopVisit {
    /// Stop visited
    pub stop_id: StopId,
    /// Position within the trip
    pub sequence_index: SequenceIndex,
}

impl StopVisit {
    /// Creates a new visit.
    pub fn new(stop_id: StopId, sequence_index: SequenceIndex) -> Self {
        Self {
            stop_id,
            sequence_index,
        }
    }
}

/// The ordered stop visits of one raw feed trip.
///
/// Visits are sorted by sequence index at construction and no two visits
/// share an index, so code receiving a `TripStopSequence` can rely on
/// strictly increasing indices.
///
/// # Examples
///
/// ```
/// use transit_directions::domain::{SequenceIndex, StopId, StopVisit, TripId, TripStopSequence};
///
/// let visit = |stop: &str, idx: u32| StopVisit::new(StopId::parse(stop).unwrap(), SequenceIndex(idx));
///
/// // Visits may arrive in any order
/// let trip = TripStopSequence::new(
///     TripId::new("T1"),
///     vec![visit("B", 2), visit("A", 1), visit("C", 3)],
/// )
/// .unwrap();
/// assert_eq!(trip.visits()[0].stop_id.as_str(), "A");
///
/// // Duplicate indices are rejected
/// assert!(TripStopSequence::new(TripId::new("T2"), vec![visit("A", 1), visit("B", 1)]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripStopSequence {
    trip_id: TripId,
    visits: Vec<StopVisit>,
}

impl TripStopSequence {
    /// Create a trip sequence, sorting visits by sequence index.
    pub fn new(trip_id: TripId, mut visits: Vec<StopVisit>) -> Result<Self, DomainError> {
        visits.sort_by_key(|v| v.sequence_index);

        if let Some(pair) = visits
            .windows(2)
            .find(|w| w[0].sequence_index == w[1].sequence_index)
        {
            return Err(DomainError::DuplicateSequenceIndex {
                trip_id,
                sequence_index: pair[0].sequence_index,
            });
        }

        Ok(Self { trip_id, visits })
    }

    /// Create a trip from stop identifiers, numbering visits from 1.
    ///
    /// Convenient for authoring fixtures and for feeds whose stop times
    /// are already in order.
    pub fn from_stops<I>(trip_id: TripId, stops: I) -> Self
    where
        I: IntoIterator<Item = StopId>,
    {
        let visits = stops
            .into_iter()
            .zip(1u32..)
            .map(|(stop_id, idx)| StopVisit::new(stop_id, SequenceIndex(idx)))
            .collect();
        Self { trip_id, visits }
    }

    /// Returns the trip identifier.
    pub fn trip_id(&self) -> &TripId {
        &self.trip_id
    }

    /// Returns the visits in sequence order.
    pub fn visits(&self) -> &[StopVisit] {
        &self.visits
    }

    /// Returns the visit at a position in the sorted list.
    pub fn get(&self, position: usize) -> Option<&StopVisit> {
        self.visits.get(position)
    }

    /// Returns the first visit.
    pub fn first(&self) -> Option<&StopVisit> {
        self.visits.first()
    }

    /// Returns the last visit.
    pub fn last(&self) -> Option<&StopVisit> {
        self.visits.last()
    }

    /// Returns the number of visits.
    pub fn len(&self) -> usize {
        self.visits.len()
    }

    /// Returns true if the trip has no visits.
    pub fn is_empty(&self) -> bool {
        self.visits.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stop(s: &str) -> StopId {
        StopId::parse(s).unwrap()
    }

    fn visit(s: &str, idx: u32) -> StopVisit {
        StopVisit::new(stop(s), SequenceIndex(idx))
    }

    #[test]
    fn new_sorts_by_sequence_index() {
        let trip = TripStopSequence::new(
            TripId::new("T"),
            vec![visit("C", 30), visit("A", 10), visit("B", 20)],
        )
        .unwrap();

        let stops: Vec<&str> = trip.visits().iter().map(|v| v.stop_id.as_str()).collect();
        assert_eq!(stops, vec!["A", "B", "C"]);
        assert_eq!(trip.first().unwrap().sequence_index, SequenceIndex(10));
        assert_eq!(trip.last().unwrap().sequence_index, SequenceIndex(30));
    }

    #[test]
    fn duplicate_index_rejected() {
        let err = TripStopSequence::new(
            TripId::new("T9"),
            vec![visit("A", 1), visit("B", 2), visit("C", 2)],
        )
        .unwrap_err();

        assert_eq!(
            err.to_string(),
            "trip T9 has more than one visit at sequence index 2"
        );
    }

    #[test]
    fn same_stop_twice_is_allowed() {
        let trip =
            TripStopSequence::new(TripId::new("loop"), vec![visit("A", 1), visit("A", 2)]).unwrap();
        assert_eq!(trip.len(), 2);
    }

    #[test]
    fn from_stops_numbers_from_one() {
        let trip = TripStopSequence::from_stops(TripId::new("T"), [stop("X"), stop("Y")]);
        assert_eq!(trip.get(0).unwrap().sequence_index, SequenceIndex(1));
        assert_eq!(trip.get(1).unwrap().sequence_index, SequenceIndex(2));
        assert!(trip.get(2).is_none());
    }

    #[test]
    fn empty_trip() {
        let trip = TripStopSequence::new(TripId::new("T"), vec![]).unwrap();
        assert!(trip.is_empty());
        assert!(trip.first().is_none());
    }

    #[test]
    fn distance_is_symmetric() {
        assert_eq!(SequenceIndex(2).distance(SequenceIndex(9)), 7);
        assert_eq!(SequenceIndex(9).distance(SequenceIndex(2)), 7);
        assert_eq!(SequenceIndex(4).distance(SequenceIndex(4)), 0);
    }
}
