//! geomap - one map API over Google Maps and HERE
//!
//! Application code talks to [`map::GeoMap`] and the entities it creates;
//! the vendor behind them is picked from the configuration and can be
//! swapped without touching callers.
//!
//! # High-Level API
//!
//! ```ignore
//! use geomap::config::{GeoMapConfig, GoogleMapAuth};
//! use geomap::load::Environment;
//! use geomap::map::{GeoMap, GeoMapMountInit, MountTarget};
//! use geomap::geo::GeoPoint;
//! use geomap::marker::GeoMarkerConfig;
//!
//! let map = GeoMap::create(
//!     GeoMapConfig::google(GoogleMapAuth::api_key("YOUR_API_KEY")),
//!     Environment::browser(host),
//! );
//! map.mount(&MountTarget::new("map"), GeoMapMountInit::default().with_zoom(12.0))
//!     .await?;
//! let marker = map
//!     .create_marker(GeoMarkerConfig::new(GeoPoint::new(53.55, 9.99), icon_svg))
//!     .await?;
//! ```
//!
//! The vendor SDKs are reached through traits ([`google::GoogleMapsApi`],
//! [`here::HereMapsApi`]) that the host binds to the real JavaScript
//! objects, and script tags are injected through [`load::HostContext`].

pub mod config;
pub mod error;
pub mod geo;
pub mod google;
pub mod here;
pub mod load;
pub mod logging;
pub mod map;
pub mod marker;
pub mod phase;
pub mod server_side;
pub mod service;
pub mod shape;

pub use error::GeoMapError;

/// Version of the geomap library.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
