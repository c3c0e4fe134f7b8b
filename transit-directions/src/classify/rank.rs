//! Candidate ranking.
//!
//! Every pairing of neighbor anchors (and every single anchor paired with
//! the wildcard) that the route declares as a key is a candidate direction
//! for the target visit. The winner is the candidate whose evidence lies
//! closest to the target.

use std::fmt;

use crate::domain::{DirectionIndex, SequenceIndex};
use crate::patterns::{BeforeAfterKey, RouteDirectionSpec, SharedPreference};

use super::{AnchorCandidate, NeighborAnchors};

/// How a candidate's key matched.
///
/// Declaration order is precedence: when two candidates score the same,
/// the earlier tier wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MatchTier {
    /// `(before, after)` owned by one direction
    ExactExclusive,
    /// `(before, *)` owned by one direction
    BeforeExclusive,
    /// `(*, after)` owned by one direction
    AfterExclusive,
    /// `(before, after)` shared between directions
    ExactShared,
    /// `(before, *)` shared between directions
    BeforeShared,
    /// `(*, after)` shared between directions
    AfterShared,
}

impl MatchTier {
    /// Did the match come from a shared key?
    pub fn is_shared(self) -> bool {
        matches!(
            self,
            MatchTier::ExactShared | MatchTier::BeforeShared | MatchTier::AfterShared
        )
    }
}

impl fmt::Display for MatchTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MatchTier::ExactExclusive => "exact-exclusive",
            MatchTier::BeforeExclusive => "before-exclusive",
            MatchTier::AfterExclusive => "after-exclusive",
            MatchTier::ExactShared => "exact-shared",
            MatchTier::BeforeShared => "before-shared",
            MatchTier::AfterShared => "after-shared",
        };
        f.write_str(name)
    }
}

/// A direction the target visit could belong to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// The direction the key resolves to
    pub direction: DirectionIndex,
    /// How the key matched
    pub tier: MatchTier,
    /// Distance of the evidence from the target, in sequence-index units
    pub score: u32,
    /// The key that matched
    pub key: BeforeAfterKey,
}

/// The tiers of one membership kind, in exact/before/after order.
struct Tiers {
    exact: MatchTier,
    before: MatchTier,
    after: MatchTier,
}

const EXCLUSIVE: Tiers = Tiers {
    exact: MatchTier::ExactExclusive,
    before: MatchTier::BeforeExclusive,
    after: MatchTier::AfterExclusive,
};

const SHARED: Tiers = Tiers {
    exact: MatchTier::ExactShared,
    before: MatchTier::BeforeShared,
    after: MatchTier::AfterShared,
};

/// A shared pair made of the target's own boundary self-match and a later
/// (or earlier) visit to the same stop says nothing about the target.
fn is_self_pair(target: SequenceIndex, before: &AnchorCandidate, after: &AnchorCandidate) -> bool {
    before.stop_id == after.stop_id
        && (before.sequence_index == target || after.sequence_index == target)
}

fn collect<F>(
    target: SequenceIndex,
    neighbors: &NeighborAnchors,
    tiers: &Tiers,
    skip_self_pairs: bool,
    lookup: F,
    found: &mut Vec<Candidate>,
) where
    F: Fn(&BeforeAfterKey) -> Option<DirectionIndex>,
{
    let mut push = |key: BeforeAfterKey, tier: MatchTier, score: u32| {
        if let Some(direction) = lookup(&key) {
            found.push(Candidate {
                direction,
                tier,
                score,
                key,
            });
        }
    };

    for before in &neighbors.before {
        for after in &neighbors.after {
            if skip_self_pairs && is_self_pair(target, before, after) {
                continue;
            }
            let score = target
                .distance(before.sequence_index)
                .max(after.sequence_index.distance(target));
            let key = BeforeAfterKey::exact(before.stop_id.clone(), after.stop_id.clone());
            push(key, tiers.exact, score);
        }
    }

    for before in &neighbors.before {
        let key = BeforeAfterKey::before_only(before.stop_id.clone());
        push(key, tiers.before, target.distance(before.sequence_index));
    }

    for after in &neighbors.after {
        let key = BeforeAfterKey::after_only(after.stop_id.clone());
        push(key, tiers.after, after.sequence_index.distance(target));
    }
}

/// Every candidate direction for a visit, in tier order.
pub fn candidates(
    target: SequenceIndex,
    neighbors: &NeighborAnchors,
    spec: &RouteDirectionSpec,
) -> Vec<Candidate> {
    let mut found = Vec::new();
    collect(target, neighbors, &EXCLUSIVE, false, |k| spec.exclusive(k), &mut found);
    collect(
        target,
        neighbors,
        &SHARED,
        true,
        |k| spec.shared(k).map(SharedPreference::preferred),
        &mut found,
    );
    found
}

/// Pick the direction of a visit.
///
/// The winner has the lowest score across all tiers. Ties are broken by
/// tier precedence and then by direction declaration order. Returns `None`
/// if no key of the route matches the neighbors.
///
/// # Examples
///
/// ```
/// use transit_directions::classify::{AnchorCandidate, MatchTier, NeighborAnchors, rank};
/// use transit_directions::domain::{DirectionIndex, SequenceIndex, StopId};
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
/// let t0 = |idx| AnchorCandidate {
///     stop_id: StopId::parse("T0").unwrap(),
///     sequence_index: SequenceIndex(idx),
/// };
/// let neighbors = NeighborAnchors { before: vec![t0(1)], after: vec![t0(9)] };
///
/// // Closer to the departure than to the return
/// let best = rank(SequenceIndex(3), &neighbors, &spec).unwrap();
/// assert_eq!(best.direction, DirectionIndex(0));
/// assert_eq!(best.tier, MatchTier::BeforeExclusive);
/// assert_eq!(best.score, 2);
/// ```
pub fn rank(
    target: SequenceIndex,
    neighbors: &NeighborAnchors,
    spec: &RouteDirectionSpec,
) -> Option<Candidate> {
    candidates(target, neighbors, spec).into_iter().min_by(|a, b| {
        a.score
            .cmp(&b.score)
            .then_with(|| a.tier.cmp(&b.tier))
            .then_with(|| a.direction.cmp(&b.direction))
    })
}
