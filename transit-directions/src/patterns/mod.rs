//! The pattern registry.
//!
//! Route patterns are authored once, validated when they are built, and
//! frozen afterwards. The classifier only ever reads them.

mod config;
mod error;
mod key;
mod registry;
mod spec;
mod strathcona;

pub use config::{
    ExclusiveDocument, RegistryDocument, RouteDocument, SharedDocument, load_registry,
    registry_from_json,
};
pub use error::{ConfigurationError, LoadError};
pub use key::{BeforeAfterKey, KeyShape};
pub use registry::{PatternRegistry, PatternRegistryBuilder};
pub use spec::{RouteDirectionSpec, RouteDirectionSpecBuilder, SharedPreference};
pub use strathcona::strathcona_county_patterns;
