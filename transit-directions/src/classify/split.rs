//! Trip splitting.
//!
//! Classifies every visit of a raw trip and cuts the trip wherever the
//! direction changes, producing one sub-trip per contiguous run.

use tracing::{debug, trace};

use crate::domain::{DirectionIndex, DirectionLabel, StopVisit, TripStopSequence};
use crate::patterns::RouteDirectionSpec;

use super::{Candidate, UnclassifiableVisitError, find_neighbor_anchors, rank};

/// A visit tagged with its direction and its position in its sub-trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedStopVisit {
    /// The raw visit, sequence index untouched
    pub visit: StopVisit,
    /// Direction the visit belongs to
    pub direction: DirectionLabel,
    /// 1-based position within the sub-trip
    pub local_sequence: u32,
}

/// A maximal run of consecutive visits sharing one direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubTrip {
    pub direction: DirectionLabel,
    pub direction_index: DirectionIndex,
    pub visits: Vec<ClassifiedStopVisit>,
}

impl SubTrip {
    fn start(direction_index: DirectionIndex, direction: DirectionLabel, visit: &StopVisit) -> Self {
        Self {
            visits: vec![ClassifiedStopVisit {
                visit: visit.clone(),
                direction: direction.clone(),
                local_sequence: 1,
            }],
            direction,
            direction_index,
        }
    }

    fn push(&mut self, visit: &StopVisit) {
        let local_sequence = self.visits.len() as u32 + 1;
        self.visits.push(ClassifiedStopVisit {
            visit: visit.clone(),
            direction: self.direction.clone(),
            local_sequence,
        });
    }

    /// Returns the number of visits.
    pub fn len(&self) -> usize {
        self.visits.len()
    }

    /// Returns true if the sub-trip has no visits.
    pub fn is_empty(&self) -> bool {
        self.visits.is_empty()
    }

    /// The raw visits, in trip order.
    pub fn stop_visits(&self) -> impl Iterator<Item = &StopVisit> {
        self.visits.iter().map(|v| &v.visit)
    }
}

/// Classify one visit of a trip.
pub fn classify_visit(
    trip: &TripStopSequence,
    visit: &StopVisit,
    spec: &RouteDirectionSpec,
) -> Result<Candidate, UnclassifiableVisitError> {
    let neighbors = find_neighbor_anchors(trip, visit, spec.anchors());

    match rank(visit.sequence_index, &neighbors, spec) {
        Some(best) => {
            trace!(
                route_id = %spec.route_id(),
                trip_id = %trip.trip_id(),
                stop_id = %visit.stop_id,
                sequence_index = visit.sequence_index.0,
                direction = best.direction.0,
                tier = %best.tier,
                score = best.score,
                "Ranked visit"
            );
            Ok(best)
        }
        None => Err(UnclassifiableVisitError {
            route_id: spec.route_id().clone(),
            trip_id: trip.trip_id().clone(),
            stop_id: visit.stop_id.clone(),
            sequence_index: visit.sequence_index,
            before: neighbors.before,
            after: neighbors.after,
        }),
    }
}

/// Split a trip into single-direction sub-trips.
///
/// Every visit is classified independently. The first visit that cannot
/// be classified fails the whole trip; use `unclassifiable_visits` to list
/// all of them. An empty trip splits into nothing.
///
/// # Examples
///
/// ```
/// use transit_directions::classify::split_trip;
/// use transit_directions::domain::{DirectionLabel, StopId, TripId, TripStopSequence};
/// use transit_directions::patterns::RouteDirectionSpec;
///
/// let spec = RouteDirectionSpec::builder("R")
///     .direction("Out", &["T0"])
///     .direction("In", &["T0"])
///     .exclusive("T0", "*", "Out")
///     .exclusive("*", "T0", "In")
///     .build()
///     .unwrap();
///
/// let stops = ["T0", "M1", "M2", "M3", "M4", "T0"];
/// let trip = TripStopSequence::from_stops(
///     TripId::new("t1"),
///     stops.iter().map(|s| StopId::parse(s).unwrap()),
/// );
///
/// let sub_trips = split_trip(&trip, &spec).unwrap();
/// assert_eq!(sub_trips.len(), 2);
/// assert_eq!(sub_trips[0].direction, DirectionLabel::headsign("Out"));
/// assert_eq!(sub_trips[1].direction, DirectionLabel::headsign("In"));
/// assert_eq!(sub_trips[0].len() + sub_trips[1].len(), 6);
/// ```
pub fn split_trip(
    trip: &TripStopSequence,
    spec: &RouteDirectionSpec,
) -> Result<Vec<SubTrip>, UnclassifiableVisitError> {
    let mut sub_trips: Vec<SubTrip> = Vec::new();

    for visit in trip.visits() {
        let best = classify_visit(trip, visit, spec)?;

        match sub_trips.last_mut() {
            Some(current) if current.direction_index == best.direction => current.push(visit),
            _ => {
                let label = spec.directions()[best.direction.0].label.clone();
                sub_trips.push(SubTrip::start(best.direction, label, visit));
            }
        }
    }

    if sub_trips.len() > 1 {
        debug!(
            route_id = %spec.route_id(),
            trip_id = %trip.trip_id(),
            sub_trips = sub_trips.len(),
            "Split conflated trip"
        );
    }

    Ok(sub_trips)
}

/// Every visit of a trip that cannot be classified, in trip order.
///
/// Empty exactly when `split_trip` succeeds. Useful when authoring a
/// route pattern.
pub fn unclassifiable_visits(
    trip: &TripStopSequence,
    spec: &RouteDirectionSpec,
) -> Vec<UnclassifiableVisitError> {
    trip.visits()
        .iter()
        .filter_map(|visit| classify_visit(trip, visit, spec).err())
        .collect()
}
