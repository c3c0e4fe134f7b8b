//! Classifying many trips at once.
//!
//! Trips are independent of each other and the registry is read-only, so
//! large batches are fanned out over the rayon thread pool. Results always
//! come back in input order.

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::domain::{RouteId, TripStopSequence};
use crate::patterns::PatternRegistry;

use super::{ClassifyConfig, FailurePolicy, SubTrip, UnclassifiableVisitError, split_trip};

/// A raw feed trip together with the route it runs on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTrip {
    pub route_id: RouteId,
    pub trip: TripStopSequence,
}

impl RouteTrip {
    pub fn new(route_id: impl Into<RouteId>, trip: TripStopSequence) -> Self {
        Self {
            route_id: route_id.into(),
            trip,
        }
    }
}

/// The outcome for one trip of a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TripClassification {
    /// The route has a pattern; the trip was split into these sub-trips
    Split(Vec<SubTrip>),
    /// The route has no pattern; the feed's own direction stands
    Unpatterned,
    /// The trip could not be classified and was skipped
    Skipped(UnclassifiableVisitError),
}

impl TripClassification {
    /// The sub-trips, if the trip was split.
    pub fn sub_trips(&self) -> Option<&[SubTrip]> {
        match self {
            TripClassification::Split(sub_trips) => Some(sub_trips.as_slice()),
            _ => None,
        }
    }
}

/// Classify one trip against the registry.
pub fn classify_trip(
    registry: &PatternRegistry,
    route_trip: &RouteTrip,
) -> Result<TripClassification, UnclassifiableVisitError> {
    match registry.lookup(&route_trip.route_id) {
        Some(spec) => split_trip(&route_trip.trip, spec).map(TripClassification::Split),
        None => Ok(TripClassification::Unpatterned),
    }
}

/// Classify a batch of trips.
///
/// With `FailurePolicy::Abort` the first failure in input order is
/// returned, whichever worker hit it first. With `FailurePolicy::SkipTrip`
/// failures are logged and reported in place as `Skipped`.
pub fn classify_trips(
    registry: &PatternRegistry,
    trips: &[RouteTrip],
    config: &ClassifyConfig,
) -> Result<Vec<TripClassification>, UnclassifiableVisitError> {
    let parallel = trips.len() >= config.parallel_threshold;

    let results: Vec<_> = if parallel {
        trips
            .par_iter()
            .map(|t| classify_trip(registry, t))
            .collect()
    } else {
        trips.iter().map(|t| classify_trip(registry, t)).collect()
    };

    let mut classified = Vec::with_capacity(results.len());
    let mut skipped = 0;

    for result in results {
        match result {
            Ok(classification) => classified.push(classification),
            Err(err) => match config.failure_policy {
                FailurePolicy::Abort => return Err(err),
                FailurePolicy::SkipTrip => {
                    warn!(
                        route_id = %err.route_id,
                        trip_id = %err.trip_id,
                        error = %err,
                        "Skipping unclassifiable trip"
                    );
                    skipped += 1;
                    classified.push(TripClassification::Skipped(err));
                }
            },
        }
    }

    debug!(
        trips = trips.len(),
        skipped, parallel, "Batch classification complete"
    );

    Ok(classified)
}
