//! Pattern configuration error types.

use std::path::PathBuf;

use crate::domain::{DirectionLabel, InvalidStopId, RouteId, StopId};

use super::BeforeAfterKey;

/// Errors in an authored route pattern.
///
/// These are raised while a spec or registry is being built, before any
/// trip is classified. They describe authoring mistakes and are never
/// recoverable at runtime.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
    /// A stop identifier in the pattern failed to parse
    #[error("route {route_id}: {source}")]
    InvalidStop {
        route_id: RouteId,
        #[source]
        source: InvalidStopId,
    },

    /// A key names a stop that no anchor order lists
    #[error("route {route_id}: key {key} references stop {stop_id}, which no direction lists as an anchor")]
    UnknownAnchor {
        route_id: RouteId,
        key: BeforeAfterKey,
        stop_id: StopId,
    },

    /// A shared key without two distinct directions to choose between
    #[error("route {route_id}: shared key {key} needs at least two distinct directions in its preference order")]
    MissingSharedPreference {
        route_id: RouteId,
        key: BeforeAfterKey,
    },

    /// A membership names a direction the route does not declare
    #[error("route {route_id}: no direction is labelled {label}")]
    UnknownDirection {
        route_id: RouteId,
        label: DirectionLabel,
    },

    /// Two directions share a label
    #[error("route {route_id}: direction {label} is declared more than once")]
    DuplicateDirection {
        route_id: RouteId,
        label: DirectionLabel,
    },

    /// Nothing to disambiguate
    #[error("route {route_id}: {count} direction(s) declared, at least two are required")]
    TooFewDirections { route_id: RouteId, count: usize },

    /// The same key is declared twice with different meanings
    #[error("route {route_id}: key {key} is declared for both {first} and {second}")]
    ConflictingMembership {
        route_id: RouteId,
        key: BeforeAfterKey,
        first: DirectionLabel,
        second: DirectionLabel,
    },

    /// A key that would match every visit
    #[error("route {route_id}: key {key} has the wildcard on both sides")]
    WildcardOnlyKey {
        route_id: RouteId,
        key: BeforeAfterKey,
    },

    /// Two specs for one route
    #[error("route {route_id} is registered more than once")]
    DuplicateRoute { route_id: RouteId },
}

/// Errors loading a registry document.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// Reading or writing the document failed
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid registry JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The document parsed but describes an invalid pattern
    #[error(transparent)]
    Config(#[from] ConfigurationError),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stop(s: &str) -> StopId {
        StopId::parse(s).unwrap()
    }

    #[test]
    fn error_display() {
        let route_id = RouteId::new("401");

        let err = ConfigurationError::UnknownAnchor {
            route_id: route_id.clone(),
            key: BeforeAfterKey::exact(stop("1973"), stop("9999")),
            stop_id: stop("9999"),
        };
        assert_eq!(
            err.to_string(),
            "route 401: key (1973, 9999) references stop 9999, which no direction lists as an anchor"
        );

        let err = ConfigurationError::TooFewDirections {
            route_id: route_id.clone(),
            count: 1,
        };
        assert_eq!(
            err.to_string(),
            "route 401: 1 direction(s) declared, at least two are required"
        );

        let err = ConfigurationError::ConflictingMembership {
            route_id: route_id.clone(),
            key: BeforeAfterKey::before_only(stop("T0")),
            first: DirectionLabel::headsign("Out"),
            second: DirectionLabel::headsign("In"),
        };
        assert_eq!(
            err.to_string(),
            "route 401: key (T0, *) is declared for both Out and In"
        );

        let err = ConfigurationError::DuplicateRoute { route_id };
        assert_eq!(err.to_string(), "route 401 is registered more than once");
    }

    #[test]
    fn load_error_wraps_config() {
        let err: LoadError = ConfigurationError::DuplicateRoute {
            route_id: RouteId::new("490"),
        }
        .into();
        assert_eq!(err.to_string(), "route 490 is registered more than once");
    }
}
