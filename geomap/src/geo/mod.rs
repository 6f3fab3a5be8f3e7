//! Geographic value types.
//!
//! Points, bounds and viewport padding shared by every provider, plus the
//! spherical distance used where a vendor has no geometry library of its own.
//!
//! # Example
//!
//! ```
//! use geomap::geo::{GeoBounds, GeoPoint};
//!
//! let bounds = GeoBounds::new(53.6, 10.1, 53.5, 9.9).unwrap();
//! assert!(bounds.contains(GeoPoint::new(53.55, 10.0)));
//! ```

mod distance;
mod types;

pub use distance::{haversine_distance, EARTH_RADIUS_METERS};
pub use types::{GeoBounds, GeoMapCenter, GeoMapViewport, GeoPoint};
