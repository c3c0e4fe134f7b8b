//! JSON registry documents.
//!
//! A registry document lists the routes to disambiguate:
//!
//! ```json
//! {
//!   "routes": [
//!     {
//!       "route_id": "R",
//!       "directions": [
//!         { "label": "Out", "anchor_order": ["T0"] },
//!         { "label": "In", "anchor_order": ["T0"] }
//!       ],
//!       "exclusive": [
//!         { "before": "T0", "after": "*", "direction": "Out" },
//!         { "before": "*", "after": "T0", "direction": "In" }
//!       ]
//!     }
//!   ]
//! }
//! ```
//!
//! `derive_from_anchor_orders`, `exclusive` and `shared` are optional.
//! Labels are strings (headsigns) or integers (direction codes).

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::{DirectionLabel, DirectionSignature, RouteId, StopRef};

use super::{
    BeforeAfterKey, ConfigurationError, LoadError, PatternRegistry, RouteDirectionSpec,
    RouteDirectionSpecBuilder,
};

/// A whole registry as stored on disk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegistryDocument {
    pub routes: Vec<RouteDocument>,
}

/// One route's pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RouteDocument {
    pub route_id: RouteId,
    pub directions: Vec<DirectionSignature>,
    #[serde(default)]
    pub derive_from_anchor_orders: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclusive: Vec<ExclusiveDocument>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub shared: Vec<SharedDocument>,
}

/// A key owned by one direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExclusiveDocument {
    pub before: StopRef,
    pub after: StopRef,
    pub direction: DirectionLabel,
}

/// A key shared by several directions, most preferred first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SharedDocument {
    pub before: StopRef,
    pub after: StopRef,
    pub preference: Vec<DirectionLabel>,
}

impl RouteDocument {
    /// Turn the document into a spec builder.
    pub fn into_builder(self) -> RouteDirectionSpecBuilder {
        let mut builder = RouteDirectionSpec::builder(self.route_id);
        for direction in self.directions {
            builder = builder.signature(direction);
        }
        if self.derive_from_anchor_orders {
            builder = builder.derive_from_anchor_orders();
        }
        for entry in self.exclusive {
            builder =
                builder.exclusive_key(BeforeAfterKey::new(entry.before, entry.after), entry.direction);
        }
        for entry in self.shared {
            builder =
                builder.shared_key(BeforeAfterKey::new(entry.before, entry.after), entry.preference);
        }
        builder
    }
}

impl RegistryDocument {
    /// Parse a document from JSON text.
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a document from a file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&contents)
    }

    /// Write the document to a file as pretty-printed JSON.
    ///
    /// Creates parent directories if they don't exist.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), LoadError> {
        let path = path.as_ref();
        let io_err = |source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }

        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(io_err)
    }

    /// Validate every route and build the registry.
    pub fn into_registry(self) -> Result<PatternRegistry, ConfigurationError> {
        self.routes
            .into_iter()
            .fold(PatternRegistry::builder(), |builder, route| {
                builder.route(route.into_builder())
            })
            .build()
    }
}

/// Load and validate a registry from a JSON file.
pub fn load_registry(path: impl AsRef<Path>) -> Result<PatternRegistry, LoadError> {
    let path = path.as_ref();
    let registry = RegistryDocument::load(path)?.into_registry()?;
    info!(
        path = %path.display(),
        routes = registry.len(),
        "Loaded pattern registry"
    );
    Ok(registry)
}

/// Parse and validate a registry from JSON text.
pub fn registry_from_json(json: &str) -> Result<PatternRegistry, LoadError> {
    Ok(RegistryDocument::from_json(json)?.into_registry()?)
}
