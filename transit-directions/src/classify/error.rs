//! Classification errors.

use crate::domain::{RouteId, SequenceIndex, StopId, TripId};

use super::AnchorCandidate;

/// A visit that no declared key of its route could place.
///
/// This means the route's pattern does not cover the trip's stop
/// topology. It is raised, never guessed around: the pattern has to be
/// extended.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error(
    "route {route_id}, trip {trip_id}: no direction matches stop {stop_id} at sequence index {sequence_index} (anchors before: [{}], after: [{}])",
    list(.before),
    list(.after)
)]
pub struct UnclassifiableVisitError {
    pub route_id: RouteId,
    pub trip_id: TripId,
    pub stop_id: StopId,
    pub sequence_index: SequenceIndex,
    /// Anchors found before the visit
    pub before: Vec<AnchorCandidate>,
    /// Anchors found after the visit
    pub after: Vec<AnchorCandidate>,
}

fn list(candidates: &[AnchorCandidate]) -> String {
    candidates
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
