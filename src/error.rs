//! Error types for planning, routing and provider calls.

use thiserror::Error;

use crate::facts::{MAX_DURATION_MINUTES, MIN_DURATION_MINUTES};
use crate::rules::AreaId;

/// Errors raised while validating or scheduling a trip.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlanError {
    #[error(
        "visit duration {0} min is outside the accepted range {min}..={max} min",
        min = MIN_DURATION_MINUTES,
        max = MAX_DURATION_MINUTES
    )]
    DurationOutOfRange(u32),
}

/// Errors raised while composing a multi-stop route.
#[derive(Debug, Error)]
pub enum RouteError {
    #[error("at least two places are required to compose a route, got {0}")]
    InsufficientWaypoints(usize),

    #[error("no route between '{origin}' and '{destination}': {source}")]
    SegmentRoutingFailed {
        origin: String,
        destination: String,
        #[source]
        source: ProviderError,
    },

    #[error("existing route has no waypoint to reconnect to")]
    NoTargetWaypoint,

    #[error("no live location was shared in this conversation")]
    NoLiveLocation,
}

/// Failures reported by an external geocoding, directions or forecast provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("no geocoding result for '{0}'")]
    NotFound(String),

    #[error("no route found")]
    NoRouteFound,

    #[error("provider unavailable: {0}")]
    ProviderUnavailable(String),

    #[error("{0} is not configured")]
    MissingCredentials(&'static str),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("all providers failed: {}", .0.join("; "))]
    Exhausted(Vec<String>),
}

impl ProviderError {
    /// Whether the failure came from the transport timing out.
    pub fn is_timeout(&self) -> bool {
        matches!(self, ProviderError::Http(err) if err.is_timeout())
    }
}

/// A rule table that does not describe every area exactly once with sane hours.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RuleTableError {
    #[error("rule table has no entry for {0}")]
    MissingArea(AreaId),

    #[error("rule table has more than one entry for {0}")]
    DuplicateArea(AreaId),

    #[error("hours for {0} must satisfy opens_at <= last_admission_at <= closes_at")]
    InvalidHours(AreaId),
}

/// Boundary parsing failures for user- or config-supplied strings.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("invalid time of day '{0}', expected HH:MM")]
    InvalidTime(String),

    #[error("invalid duration '{0}'")]
    InvalidDuration(String),

    #[error("unknown area '{0}'")]
    UnknownArea(String),

    #[error("unknown travel profile '{0}'")]
    UnknownProfile(String),

    #[error("invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
}
