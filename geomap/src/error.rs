//! Error taxonomy shared by every facade operation.
//!
//! Recoverable vendor failures are captured locally and returned as
//! `Err(GeoMapError)`; nothing in this crate panics on a vendor failure.

use crate::phase::GeoMapPhase;
use thiserror::Error;

/// Errors that can occur while driving a map through the facade.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeoMapError {
    /// The vendor SDK script could not be injected, or the vendor
    /// namespace was still missing after it loaded.
    #[error("Could not load {src}: {reason}")]
    ScriptLoad { src: String, reason: String },

    /// The routing engine found no route between the requested points.
    #[error("No route: {0}")]
    NoRouteFound(String),

    /// The routing engine returned a route without leg data.
    #[error("The found route has no legs")]
    MalformedRouteLegs,

    /// A places or geocoding query came back with a non-OK vendor status.
    #[error("Query status {status}")]
    PlaceQuery { status: String },

    /// A place lookup found nothing for the given id or request.
    #[error("Place not found: {0}")]
    PlaceNotFound(String),

    /// The vendor SDK threw synchronously.
    #[error("Vendor call failed: {0}")]
    VendorCall(String),

    /// The operation needs the map to be further along its lifecycle.
    #[error("Operation requires phase {required}, map is {current}")]
    PhaseNotReached {
        required: GeoMapPhase,
        current: GeoMapPhase,
    },

    /// `mount` was called on a map that is already mounting or mounted.
    #[error("Map is already mounted")]
    AlreadyMounted,

    /// The active provider does not offer this capability.
    #[error("{operation} is not supported by provider {provider}")]
    Unsupported {
        operation: &'static str,
        provider: String,
    },

    /// Bounds with north below south.
    #[error("Invalid bounds: north {north} is below south {south}")]
    InvalidBounds { north: f64, south: f64 },
}

impl GeoMapError {
    pub(crate) fn unsupported(operation: &'static str, provider: impl Into<String>) -> Self {
        Self::Unsupported {
            operation,
            provider: provider.into(),
        }
    }
}

/// A synchronous failure raised inside a vendor SDK call.
///
/// Vendor binding traits return this where the underlying SDK would throw.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct VendorError(pub String);

impl VendorError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

impl From<VendorError> for GeoMapError {
    fn from(err: VendorError) -> Self {
        GeoMapError::VendorCall(err.0)
    }
}
