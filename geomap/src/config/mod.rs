//! Map configuration.
//!
//! A [`GeoMapConfig`] is a tagged union over the supported vendors. It can be
//! built in code or loaded from an INI file:
//!
//! ```ini
//! [map]
//! provider = here
//! language = de
//!
//! [here]
//! app_id = YOUR_APP_ID
//! app_code = YOUR_APP_CODE
//! style = alps
//! ```
//!
//! # Example
//!
//! ```
//! use geomap::config::{GeoMapConfig, GeoMapProvider, HereMapStyle};
//!
//! let config = GeoMapConfig::from_ini_str(
//!     "[map]\nprovider = here\n[here]\napp_id = id\napp_code = code\nstyle = alps\n",
//! )
//! .unwrap();
//! assert_eq!(config.provider(), GeoMapProvider::Here);
//! ```

mod file;
mod language;
mod parser;
mod types;
mod writer;

pub use file::ConfigFileError;
pub use language::HereLanguage;
pub use types::{
    GeoMapConfig, GeoMapProvider, GoogleMapAuth, GoogleMapConfig, HereMapConfig, HereMapStyle,
    HerePixelDensity,
};
