//! Early-order comparison of classified visits.
//!
//! Downstream consumers sort stops of a route's direction by where they
//! fall in the direction's anchor order. Stops that are not anchors sort
//! after every anchor.

use std::cmp::Ordering;

use crate::domain::{DirectionSignature, RouteId, StopId};
use crate::patterns::{PatternRegistry, RouteDirectionSpec};

use super::ClassifiedStopVisit;

fn anchor_rank(signature: &DirectionSignature, stop: &StopId) -> usize {
    signature.anchor_position(stop).unwrap_or(usize::MAX)
}

/// Compare two visits of one spec by anchor order.
///
/// Returns `Equal` when the visits belong to different directions or to a
/// direction the spec does not declare.
pub fn compare_in_spec(
    spec: &RouteDirectionSpec,
    a: &ClassifiedStopVisit,
    b: &ClassifiedStopVisit,
) -> Ordering {
    if a.direction != b.direction {
        return Ordering::Equal;
    }
    let Some((_, signature)) = spec.direction_by_label(&a.direction) else {
        return Ordering::Equal;
    };

    anchor_rank(signature, &a.visit.stop_id).cmp(&anchor_rank(signature, &b.visit.stop_id))
}

/// Compare two visits of a route by anchor order.
///
/// Routes without a pattern have no opinion and compare `Equal`, as do
/// visits of different directions. Within a direction the earlier first
/// occurrence in the anchor order sorts first.
///
/// # Examples
///
/// ```
/// use std::cmp::Ordering;
///
/// use transit_directions::classify::split_trip;
/// use transit_directions::classify::compare_early;
/// use transit_directions::domain::{RouteId, StopId, TripId, TripStopSequence};
/// use transit_directions::patterns::strathcona_county_patterns;
///
/// let registry = strathcona_county_patterns().unwrap();
/// let route_id = RouteId::new("401");
/// let trip = TripStopSequence::from_stops(
///     TripId::new("t"),
///     ["1973", "1292", "4000"].iter().map(|s| StopId::parse(s).unwrap()),
/// );
///
/// let sub_trips = split_trip(&trip, registry.lookup(&route_id).unwrap()).unwrap();
/// let visits = &sub_trips[0].visits;
/// assert_eq!(compare_early(&registry, &route_id, &visits[2], &visits[0]), Ordering::Greater);
/// assert_eq!(compare_early(&registry, &RouteId::new("999"), &visits[2], &visits[0]), Ordering::Equal);
/// ```
pub fn compare_early(
    registry: &PatternRegistry,
    route_id: &RouteId,
    a: &ClassifiedStopVisit,
    b: &ClassifiedStopVisit,
) -> Ordering {
    registry
        .lookup(route_id)
        .map_or(Ordering::Equal, |spec| compare_in_spec(spec, a, b))
}
