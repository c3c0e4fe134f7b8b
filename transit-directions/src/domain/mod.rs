//! Domain types for direction classification.
//!
//! This module contains the value types shared by the pattern registry and
//! the classifier: stops, visits, trips, routes and directions. Types that
//! carry an invariant enforce it at construction time, so code that
//! receives them can trust their validity.

mod direction;
mod error;
mod route;
mod stop;
mod visit;

pub use direction::{DirectionIndex, DirectionLabel, DirectionSignature};
pub use error::DomainError;
pub use route::RouteId;
pub use stop::{InvalidStopId, StopId, StopRef, WILDCARD};
pub use visit::{SequenceIndex, StopVisit, TripId, TripStopSequence};
