//! INI serialization logic for converting `GeoMapConfig` → INI string.
//!
//! Produces the commented representation written by
//! [`GeoMapConfig::save_to`](super::GeoMapConfig::save_to).

use super::types::{GeoMapConfig, GoogleMapAuth, GoogleMapConfig, HereMapConfig};
use crate::geo::GeoMapViewport;

/// Convert a `GeoMapConfig` to a commented INI string for saving.
pub(super) fn to_config_string(config: &GeoMapConfig) -> String {
    match config {
        GeoMapConfig::Google(c) => google_config_string(c),
        GeoMapConfig::Here(c) => here_config_string(c),
    }
}

fn map_section(
    provider: &str,
    language: Option<&str>,
    region: Option<&str>,
    viewport: Option<GeoMapViewport>,
    min_zoom: Option<f64>,
    max_zoom: Option<f64>,
) -> String {
    format!(
        r#"[map]
; Map vendor: google or here
provider = {}
; ISO 639-1 label language (HERE maps it to its three-letter codes)
language = {}
; ISO 3166-1 region bias
region = {}
; Pixel padding around the visible area: top,right,bottom,left
viewport = {}
min_zoom = {}
max_zoom = {}
"#,
        provider,
        language.unwrap_or(""),
        region.unwrap_or(""),
        viewport.map(format_viewport).unwrap_or_default(),
        format_optional(min_zoom),
        format_optional(max_zoom),
    )
}

fn google_config_string(config: &GoogleMapConfig) -> String {
    let (api_key, client_id) = match &config.auth {
        GoogleMapAuth::ApiKey { api_key, .. } => (api_key.as_str(), ""),
        GoogleMapAuth::ClientId { client_id, .. } => ("", client_id.as_str()),
    };

    let mut out = map_section(
        "google",
        config.language.as_deref(),
        config.region.as_deref(),
        config.viewport,
        config.min_zoom,
        config.max_zoom,
    );
    out.push_str(&format!(
        r#"
[google]
; Set exactly one of api_key (standard plan) or client_id (premium plan)
api_key = {}
client_id = {}
; Optional usage-reporting channel
channel = {}
"#,
        api_key,
        client_id,
        config.auth.channel().unwrap_or(""),
    ));
    out
}

fn here_config_string(config: &HereMapConfig) -> String {
    let mut out = map_section(
        "here",
        config.language.as_deref(),
        config.region.as_deref(),
        config.viewport,
        config.min_zoom,
        config.max_zoom,
    );
    out.push_str(&format!(
        r#"
[here]
app_id = {}
app_code = {}
; Base map style: default, alps, fleet, wings, dreamworks, flame, mini
style = {}
; Tile pixel density: 72, 320 or 500
ppi = {}
; Disable horizontal world wrapping
no_wrap = {}
"#,
        config.app_id,
        config.app_code,
        config.style.as_str(),
        config.ppi.ppi(),
        config.no_wrap,
    ));
    out
}

fn format_viewport(viewport: GeoMapViewport) -> String {
    format!(
        "{},{},{},{}",
        viewport.top, viewport.right, viewport.bottom, viewport.left
    )
}

fn format_optional(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
