//! Anchor matching.
//!
//! For a target visit of a trip, collects the anchor visits on either side
//! of it. The ranker then looks those anchors up in the route's keys.

use std::collections::HashSet;
use std::fmt;

use crate::domain::{SequenceIndex, StopId, StopVisit, TripStopSequence};

/// An anchor visit near the target visit.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AnchorCandidate {
    /// The anchor stop
    pub stop_id: StopId,
    /// Where the trip visits it
    pub sequence_index: SequenceIndex,
}

impl From<&StopVisit> for AnchorCandidate {
    fn from(visit: &StopVisit) -> Self {
        Self {
            stop_id: visit.stop_id.clone(),
            sequence_index: visit.sequence_index,
        }
    }
}

impl fmt::Display for AnchorCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.stop_id, self.sequence_index)
    }
}

/// Anchor visits on each side of a target visit, in trip order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NeighborAnchors {
    /// Anchors visited before the target
    pub before: Vec<AnchorCandidate>,
    /// Anchors visited after the target
    pub after: Vec<AnchorCandidate>,
}

impl NeighborAnchors {
    /// Returns true if neither side has an anchor.
    pub fn is_empty(&self) -> bool {
        self.before.is_empty() && self.after.is_empty()
    }
}

/// Find every anchor visit before and after `target`.
///
/// A visit is a before-candidate when its index is strictly less than the
/// target's and an after-candidate when strictly greater. When the target
/// opens the trip and is itself an anchor, it is also a before-candidate;
/// when it closes the trip, also an after-candidate. This lets a terminal
/// act as the boundary anchor of its own trip.
pub fn find_neighbor_anchors(
    trip: &TripStopSequence,
    target: &StopVisit,
    anchors: &HashSet<StopId>,
) -> NeighborAnchors {
    let mut neighbors = NeighborAnchors::default();

    for visit in trip.visits() {
        if !anchors.contains(&visit.stop_id) {
            continue;
        }
        if visit.sequence_index < target.sequence_index {
            neighbors.before.push(visit.into());
        } else if visit.sequence_index > target.sequence_index {
            neighbors.after.push(visit.into());
        }
    }

    if anchors.contains(&target.stop_id) {
        if trip.first().map(|v| v.sequence_index) == Some(target.sequence_index) {
            neighbors.before.push(target.into());
        }
        if trip.last().map(|v| v.sequence_index) == Some(target.sequence_index) {
            neighbors.after.push(target.into());
        }
    }

    neighbors
}
