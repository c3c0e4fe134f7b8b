//! Domain error types.
//!
//! These errors represent malformed inputs handed to the domain layer by
//! the feed-loading side. They are distinct from configuration and
//! classification errors.

use super::{SequenceIndex, TripId};

/// Domain-level errors for validation of feed-derived data.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// Two visits of one trip claim the same position
    #[error("trip {trip_id} has more than one visit at sequence index {sequence_index}")]
    DuplicateSequenceIndex {
        trip_id: TripId,
        sequence_index: SequenceIndex,
    },
}
