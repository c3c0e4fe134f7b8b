//! Per-route direction patterns.
//!
//! A `RouteDirectionSpec` holds everything the classifier knows about one
//! route: its declared directions and the before/after keys that count as
//! evidence for each of them. Specs are assembled with
//! `RouteDirectionSpecBuilder`, which validates the whole pattern at once
//! and is the only way to obtain a spec.

use std::collections::{HashMap, HashSet};

use crate::domain::{DirectionIndex, DirectionLabel, DirectionSignature, RouteId, StopId};

use super::{BeforeAfterKey, ConfigurationError, KeyShape};

/// Preference order between the directions that share a key.
///
/// Always holds at least two distinct directions; the first is the one a
/// shared match resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharedPreference {
    order: Vec<DirectionIndex>,
}

impl SharedPreference {
    /// The direction a match on this key resolves to.
    pub fn preferred(&self) -> DirectionIndex {
        self.order[0]
    }

    /// All candidate directions, most preferred first.
    pub fn order(&self) -> &[DirectionIndex] {
        &self.order
    }
}

/// The full direction configuration for one route.
///
/// Immutable once built. Every stop named by a key is guaranteed to be an
/// anchor of at least one direction.
#[derive(Debug, Clone)]
pub struct RouteDirectionSpec {
    route_id: RouteId,
    directions: Vec<DirectionSignature>,
    exclusive: HashMap<BeforeAfterKey, DirectionIndex>,
    shared: HashMap<BeforeAfterKey, SharedPreference>,
    anchors: HashSet<StopId>,
}

impl RouteDirectionSpec {
    /// Start building a spec for a route.
    pub fn builder(route_id: impl Into<RouteId>) -> RouteDirectionSpecBuilder {
        RouteDirectionSpecBuilder::new(route_id)
    }

    /// Returns the route this spec describes.
    pub fn route_id(&self) -> &RouteId {
        &self.route_id
    }

    /// Returns every declared direction, in declaration order.
    ///
    /// These are all the sub-trips a trip of this route can split into.
    pub fn directions(&self) -> &[DirectionSignature] {
        &self.directions
    }

    /// Returns the direction at an index.
    pub fn direction(&self, index: DirectionIndex) -> Option<&DirectionSignature> {
        self.directions.get(index.0)
    }

    /// Find a direction by label.
    pub fn direction_by_label(
        &self,
        label: &DirectionLabel,
    ) -> Option<(DirectionIndex, &DirectionSignature)> {
        self.directions
            .iter()
            .enumerate()
            .find(|(_, d)| &d.label == label)
            .map(|(i, d)| (DirectionIndex(i), d))
    }

    /// Every stop that counts as classification evidence.
    pub fn anchors(&self) -> &HashSet<StopId> {
        &self.anchors
    }

    /// Is this stop an anchor of the route?
    pub fn is_anchor(&self, stop: &StopId) -> bool {
        self.anchors.contains(stop)
    }

    /// The direction owning a key exclusively, if any.
    pub fn exclusive(&self, key: &BeforeAfterKey) -> Option<DirectionIndex> {
        self.exclusive.get(key).copied()
    }

    /// The preference order of a shared key, if any.
    pub fn shared(&self, key: &BeforeAfterKey) -> Option<&SharedPreference> {
        self.shared.get(key)
    }

    /// Exclusive keys, sorted, with their owning direction.
    pub fn exclusive_keys(&self) -> Vec<(&BeforeAfterKey, DirectionIndex)> {
        let mut keys: Vec<_> = self.exclusive.iter().map(|(k, d)| (k, *d)).collect();
        keys.sort();
        keys
    }

    /// Shared keys, sorted.
    pub fn shared_keys(&self) -> Vec<&BeforeAfterKey> {
        let mut keys: Vec<_> = self.shared.keys().collect();
        keys.sort();
        keys
    }
}

/// Builder for `RouteDirectionSpec`.
///
/// Methods can be chained; the first authoring mistake is remembered and
/// reported by `build`.
///
/// # Examples
///
/// ```
/// use transit_directions::domain::DirectionLabel;
/// use transit_directions::patterns::{BeforeAfterKey, RouteDirectionSpec};
///
/// let spec = RouteDirectionSpec::builder("R")
///     .direction("Out", &["T0"])
///     .direction("In", &["T0"])
///     .exclusive("T0", "*", "Out")
///     .exclusive("*", "T0", "In")
///     .build()
///     .unwrap();
///
/// let key = BeforeAfterKey::parse("T0", "*").unwrap();
/// let (out, _) = spec.direction_by_label(&DirectionLabel::headsign("Out")).unwrap();
/// assert_eq!(spec.exclusive(&key), Some(out));
///
/// // Keys must only name anchors
/// let err = RouteDirectionSpec::builder("R")
///     .direction("Out", &["T0"])
///     .direction("In", &["T0"])
///     .exclusive("T9", "*", "Out")
///     .build();
/// assert!(err.is_err());
/// ```
#[derive(Debug, Clone)]
pub struct RouteDirectionSpecBuilder {
    route_id: RouteId,
    directions: Vec<DirectionSignature>,
    exclusive: Vec<(BeforeAfterKey, DirectionLabel)>,
    shared: Vec<(BeforeAfterKey, Vec<DirectionLabel>)>,
    derive: bool,
    error: Option<ConfigurationError>,
}

impl RouteDirectionSpecBuilder {
    /// Create a builder for a route.
    pub fn new(route_id: impl Into<RouteId>) -> Self {
        Self {
            route_id: route_id.into(),
            directions: Vec::new(),
            exclusive: Vec::new(),
            shared: Vec::new(),
            derive: false,
            error: None,
        }
    }

    /// Declare a direction with its anchor stops in travel order.
    pub fn direction(mut self, label: impl Into<DirectionLabel>, anchors: &[&str]) -> Self {
        let parsed: Result<Vec<StopId>, _> = anchors.iter().map(|s| StopId::parse(s)).collect();
        match parsed {
            Ok(anchor_order) => self
                .directions
                .push(DirectionSignature::new(label.into(), anchor_order)),
            Err(source) => self.fail(ConfigurationError::InvalidStop {
                route_id: self.route_id.clone(),
                source,
            }),
        }
        self
    }

    /// Declare an already-built direction.
    pub fn signature(mut self, signature: DirectionSignature) -> Self {
        self.directions.push(signature);
        self
    }

    /// Declare a key as evidence for exactly one direction.
    ///
    /// `"*"` on either side is the wildcard.
    pub fn exclusive(mut self, before: &str, after: &str, label: impl Into<DirectionLabel>) -> Self {
        match BeforeAfterKey::parse(before, after) {
            Ok(key) => self.exclusive.push((key, label.into())),
            Err(source) => self.fail(ConfigurationError::InvalidStop {
                route_id: self.route_id.clone(),
                source,
            }),
        }
        self
    }

    /// Declare an already-built key as evidence for exactly one direction.
    pub fn exclusive_key(mut self, key: BeforeAfterKey, label: DirectionLabel) -> Self {
        self.exclusive.push((key, label));
        self
    }

    /// Declare a key as evidence for several directions.
    ///
    /// A match resolves to the first direction of `preference`.
    pub fn shared(mut self, before: &str, after: &str, preference: &[DirectionLabel]) -> Self {
        match BeforeAfterKey::parse(before, after) {
            Ok(key) => self.shared.push((key, preference.to_vec())),
            Err(source) => self.fail(ConfigurationError::InvalidStop {
                route_id: self.route_id.clone(),
                source,
            }),
        }
        self
    }

    /// Declare an already-built key as evidence for several directions.
    pub fn shared_key(mut self, key: BeforeAfterKey, preference: Vec<DirectionLabel>) -> Self {
        self.shared.push((key, preference));
        self
    }

    /// Derive keys from the anchor orders.
    ///
    /// Every ordered pair `(a, b)` that a direction passes in that order
    /// becomes a key. A pair passed by one direction only is exclusive to
    /// it; a pair passed by several is shared, preferring directions in
    /// declaration order. Explicit memberships replace derived ones for
    /// the same key.
    pub fn derive_from_anchor_orders(mut self) -> Self {
        self.derive = true;
        self
    }

    fn fail(&mut self, err: ConfigurationError) {
        if self.error.is_none() {
            self.error = Some(err);
        }
    }

    /// Validate the pattern and build the spec.
    pub fn build(self) -> Result<RouteDirectionSpec, ConfigurationError> {
        let Self {
            route_id,
            directions,
            exclusive: exclusive_decls,
            shared: shared_decls,
            derive,
            error,
        } = self;

        if let Some(err) = error {
            return Err(err);
        }

        if directions.len() < 2 {
            return Err(ConfigurationError::TooFewDirections {
                route_id,
                count: directions.len(),
            });
        }

        let mut by_label: HashMap<DirectionLabel, DirectionIndex> = HashMap::new();
        for (i, direction) in directions.iter().enumerate() {
            if by_label
                .insert(direction.label.clone(), DirectionIndex(i))
                .is_some()
            {
                return Err(ConfigurationError::DuplicateDirection {
                    route_id,
                    label: direction.label.clone(),
                });
            }
        }

        let anchors: HashSet<StopId> = directions
            .iter()
            .flat_map(|d| d.anchor_order.iter().cloned())
            .collect();

        let (mut exclusive, mut shared) = if derive {
            derive_memberships(&directions)
        } else {
            (HashMap::new(), HashMap::new())
        };

        let lookup = |label: &DirectionLabel| {
            by_label
                .get(label)
                .copied()
                .ok_or_else(|| ConfigurationError::UnknownDirection {
                    route_id: route_id.clone(),
                    label: label.clone(),
                })
        };
        let label_of = |index: DirectionIndex| directions[index.0].label.clone();

        let mut explicit_exclusive: HashMap<BeforeAfterKey, DirectionIndex> = HashMap::new();
        for (key, label) in exclusive_decls {
            check_key(&route_id, &key, &anchors)?;
            let index = lookup(&label)?;

            if let Some(&existing) = explicit_exclusive.get(&key)
                && existing != index
            {
                return Err(ConfigurationError::ConflictingMembership {
                    route_id,
                    key,
                    first: label_of(existing),
                    second: label,
                });
            }

            explicit_exclusive.insert(key.clone(), index);
            shared.remove(&key);
            exclusive.insert(key, index);
        }

        let mut explicit_shared: HashMap<BeforeAfterKey, SharedPreference> = HashMap::new();
        for (key, preference) in shared_decls {
            check_key(&route_id, &key, &anchors)?;

            let mut order: Vec<DirectionIndex> = Vec::with_capacity(preference.len());
            for label in &preference {
                let index = lookup(label)?;
                if !order.contains(&index) {
                    order.push(index);
                }
            }
            if order.len() < 2 {
                return Err(ConfigurationError::MissingSharedPreference { route_id, key });
            }
            let preference = SharedPreference { order };

            if let Some(&existing) = explicit_exclusive.get(&key) {
                return Err(ConfigurationError::ConflictingMembership {
                    route_id,
                    key,
                    first: label_of(existing),
                    second: label_of(preference.preferred()),
                });
            }
            if let Some(existing) = explicit_shared.get(&key)
                && existing != &preference
            {
                return Err(ConfigurationError::ConflictingMembership {
                    route_id,
                    key,
                    first: label_of(existing.preferred()),
                    second: label_of(preference.preferred()),
                });
            }

            explicit_shared.insert(key.clone(), preference.clone());
            exclusive.remove(&key);
            shared.insert(key, preference);
        }

        Ok(RouteDirectionSpec {
            route_id,
            directions,
            exclusive,
            shared,
            anchors,
        })
    }
}

/// Keys must name at least one stop, and only anchors.
fn check_key(
    route_id: &RouteId,
    key: &BeforeAfterKey,
    anchors: &HashSet<StopId>,
) -> Result<(), ConfigurationError> {
    if key.shape() == KeyShape::Unbounded {
        return Err(ConfigurationError::WildcardOnlyKey {
            route_id: route_id.clone(),
            key: key.clone(),
        });
    }

    if let Some(stop_id) = key.stops().find(|s| !anchors.contains(*s)) {
        return Err(ConfigurationError::UnknownAnchor {
            route_id: route_id.clone(),
            key: key.clone(),
            stop_id: stop_id.clone(),
        });
    }

    Ok(())
}

type Memberships = (
    HashMap<BeforeAfterKey, DirectionIndex>,
    HashMap<BeforeAfterKey, SharedPreference>,
);

fn derive_memberships(directions: &[DirectionSignature]) -> Memberships {
    let mut exclusive = HashMap::new();
    let mut shared = HashMap::new();
    let mut seen = HashSet::new();

    for direction in directions {
        let anchors = &direction.anchor_order;
        for (i, from) in anchors.iter().enumerate() {
            for to in &anchors[i + 1..] {
                let key = BeforeAfterKey::exact(from.clone(), to.clone());
                if !seen.insert(key.clone()) {
                    continue;
                }

                let order: Vec<DirectionIndex> = directions
                    .iter()
                    .enumerate()
                    .filter(|(_, d)| d.passes_in_order(from, to))
                    .map(|(j, _)| DirectionIndex(j))
                    .collect();

                if let [only] = order.as_slice() {
                    exclusive.insert(key, *only);
                } else {
                    shared.insert(key, SharedPreference { order });
                }
            }
        }
    }

    (exclusive, shared)
}
