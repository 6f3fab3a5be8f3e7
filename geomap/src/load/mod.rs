//! Vendor SDK loading.
//!
//! The crate never touches a DOM. A host (browser binding, test harness)
//! implements [`HostContext`] to inject script tags and to hand out the
//! vendor namespace once it is available. Which host, if any, is passed to
//! [`GeoMap::create`](crate::map::GeoMap::create) explicitly through an
//! [`Environment`].

mod loader;
#[cfg(test)]
pub(crate) mod mock;
mod script;

pub use loader::ApiLoader;
pub use script::{encode_uri_component, ScriptRequest};

use crate::config::GeoMapProvider;
use crate::error::GeoMapError;
use crate::google::GoogleMapsApi;
use crate::here::HereMapsApi;
use crate::map::BoxFuture;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Vendor namespace exposed by the host after its SDK script ran.
#[derive(Clone)]
pub enum VendorApi {
    /// The `google.maps` namespace.
    Google(Arc<dyn GoogleMapsApi>),
    /// The `H` namespace.
    Here(Arc<dyn HereMapsApi>),
}

impl VendorApi {
    pub fn provider(&self) -> GeoMapProvider {
        match self {
            Self::Google(_) => GeoMapProvider::Google,
            Self::Here(_) => GeoMapProvider::Here,
        }
    }
}

impl fmt::Debug for VendorApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("VendorApi").field(&self.provider()).finish()
    }
}

/// Outcome of a successful [`load`](crate::map::GeoMapImplementation::load).
#[derive(Clone)]
pub enum LoadedApi {
    Google(Arc<dyn GoogleMapsApi>),
    Here(Arc<dyn HereMapsApi>),
    /// Adopted or server-side implementation without a vendor namespace.
    Custom,
}

impl LoadedApi {
    pub fn provider(&self) -> GeoMapProvider {
        match self {
            Self::Google(_) => GeoMapProvider::Google,
            Self::Here(_) => GeoMapProvider::Here,
            Self::Custom => GeoMapProvider::Custom,
        }
    }
}

impl From<VendorApi> for LoadedApi {
    fn from(api: VendorApi) -> Self {
        match api {
            VendorApi::Google(api) => Self::Google(api),
            VendorApi::Here(api) => Self::Here(api),
        }
    }
}

impl fmt::Debug for LoadedApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LoadedApi").field(&self.provider()).finish()
    }
}

/// Capabilities the hosting page provides.
pub trait HostContext: Send + Sync {
    /// Appends a `<script>` tag and resolves once it loaded or failed.
    fn load_script(&self, request: ScriptRequest) -> BoxFuture<'_, Result<(), GeoMapError>>;

    /// Returns the vendor namespace if the page already has it.
    fn vendor_api(&self, provider: GeoMapProvider) -> Option<VendorApi>;
}

/// Where a map runs.
///
/// Replaces probing for a global `window`: the caller states whether a
/// host with DOM access exists.
#[derive(Clone)]
pub enum Environment {
    /// A page that can load vendor scripts.
    Browser(Arc<dyn HostContext>),
    /// No DOM; maps are inert stand-ins.
    ServerSide,
}

impl Environment {
    pub fn browser(host: Arc<dyn HostContext>) -> Self {
        Self::Browser(host)
    }

    /// Whether DOM facilities (script injection, SVG parsing) are available.
    pub fn has_dom(&self) -> bool {
        matches!(self, Self::Browser(_))
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Browser(_) => f.write_str("Environment::Browser"),
            Self::ServerSide => f.write_str("Environment::ServerSide"),
        }
    }
}

/// Loads the vendor namespace for `provider` through `host`.
///
/// Skips script injection if the host already exposes the namespace.
/// Scripts are injected in order; the first failure aborts the load.
pub(crate) async fn load_vendor_api(
    host: &dyn HostContext,
    provider: GeoMapProvider,
    scripts: Vec<ScriptRequest>,
) -> Result<VendorApi, GeoMapError> {
    if let Some(api) = host.vendor_api(provider).filter(|a| a.provider() == provider) {
        debug!(provider = %provider, "Vendor API already present, skipping script injection");
        return Ok(api);
    }

    let last_src = scripts
        .last()
        .map(|s| s.src().to_string())
        .unwrap_or_default();
    for script in scripts {
        debug!(provider = %provider, src = %script.src(), "Injecting vendor script");
        host.load_script(script).await?;
    }

    match host.vendor_api(provider) {
        Some(api) if api.provider() == provider => Ok(api),
        _ => Err(GeoMapError::ScriptLoad {
            src: last_src,
            reason: format!("{} API not present after load", provider),
        }),
    }
}
