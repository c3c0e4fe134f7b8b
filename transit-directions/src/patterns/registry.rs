//! The pattern registry: route identifier to direction spec.

use std::collections::HashMap;

use tracing::info;

use crate::domain::RouteId;

use super::{ConfigurationError, RouteDirectionSpec, RouteDirectionSpecBuilder};

/// Every route that needs direction disambiguation, keyed by route id.
///
/// The registry is built once with `PatternRegistryBuilder` and has no
/// mutation API afterwards, so a single instance can be shared by
/// reference across classification workers.
#[derive(Debug, Clone, Default)]
pub struct PatternRegistry {
    routes: HashMap<RouteId, RouteDirectionSpec>,
}

impl PatternRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start building a registry.
    pub fn builder() -> PatternRegistryBuilder {
        PatternRegistryBuilder::new()
    }

    /// Get the spec for a route.
    ///
    /// Returns `None` for routes whose raw feed directions can be used as
    /// they are.
    pub fn lookup(&self, route_id: &RouteId) -> Option<&RouteDirectionSpec> {
        self.routes.get(route_id)
    }

    /// Does the registry hold a spec for this route?
    pub fn contains(&self, route_id: &RouteId) -> bool {
        self.routes.contains_key(route_id)
    }

    /// Registered route ids, sorted.
    pub fn route_ids(&self) -> Vec<&RouteId> {
        let mut ids: Vec<_> = self.routes.keys().collect();
        ids.sort();
        ids
    }

    /// Returns the number of registered routes.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Returns true if no route is registered.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

/// Builder for `PatternRegistry`.
///
/// Provides a fluent API for adding route specs. The first error (a spec
/// that fails validation, or a route added twice) is reported by `build`.
#[derive(Debug, Default)]
pub struct PatternRegistryBuilder {
    routes: HashMap<RouteId, RouteDirectionSpec>,
    error: Option<ConfigurationError>,
}

impl PatternRegistryBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a built spec.
    pub fn add(mut self, spec: RouteDirectionSpec) -> Self {
        if self.routes.contains_key(spec.route_id()) {
            let route_id = spec.route_id().clone();
            self.fail(ConfigurationError::DuplicateRoute { route_id });
        } else {
            self.routes.insert(spec.route_id().clone(), spec);
        }
        self
    }

    /// Build a spec and add it.
    pub fn route(mut self, spec: RouteDirectionSpecBuilder) -> Self {
        match spec.build() {
            Ok(spec) => self.add(spec),
            Err(err) => {
                self.fail(err);
                self
            }
        }
    }

    fn fail(&mut self, err: ConfigurationError) {
        if self.error.is_none() {
            self.error = Some(err);
        }
    }

    /// Build the registry.
    pub fn build(self) -> Result<PatternRegistry, ConfigurationError> {
        if let Some(err) = self.error {
            return Err(err);
        }

        info!(routes = self.routes.len(), "Pattern registry built");

        Ok(PatternRegistry {
            routes: self.routes,
        })
    }
}
