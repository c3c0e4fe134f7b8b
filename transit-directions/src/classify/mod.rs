//! Direction classification.
//!
//! Answers "which declared direction does each visit of this trip belong
//! to?" for routes whose feed direction cannot be trusted. Each visit is
//! placed from the anchor stops around it; runs of visits in the same
//! direction become sub-trips.

mod anchors;
mod batch;
mod compare;
mod config;
mod error;
mod rank;
mod split;

#[cfg(test)]
mod split_tests;

pub use anchors::{AnchorCandidate, NeighborAnchors, find_neighbor_anchors};
pub use batch::{RouteTrip, TripClassification, classify_trip, classify_trips};
pub use compare::{compare_early, compare_in_spec};
pub use config::{ClassifyConfig, FailurePolicy};
pub use error::UnclassifiableVisitError;
pub use rank::{Candidate, MatchTier, candidates, rank};
pub use split::{ClassifiedStopVisit, SubTrip, classify_visit, split_trip, unclassifiable_visits};
