//! HERE Maps backend.
//!
//! [`api`] describes the slice of the `H` namespace the adapters use. The
//! host binds it to the real SDK; tests bind it to in-memory stand-ins.

mod api;
mod coding;
mod map;
mod marker;
#[cfg(test)]
pub(crate) mod mock;
mod places;
mod shapes;

pub use api::*;
pub use coding::HereCodingService;
pub use map::{base_layer, script_requests, HereHandles, HereMap, HERE_MODULES, HERE_SCRIPT_BASE};
pub use marker::HereMarker;
pub use places::HerePlacesService;
pub use shapes::{HereCircle, HereRect};
