//! INI parsing logic for converting `Ini` → `GeoMapConfig`.
//!
//! This is the single place where INI key names are mapped to config fields.

use ini::{Ini, Properties};

use super::file::ConfigFileError;
use super::types::{
    GeoMapConfig, GoogleMapAuth, GoogleMapConfig, HereMapConfig, HereMapStyle, HerePixelDensity,
};
use crate::geo::GeoMapViewport;

/// Settings shared by every provider, read from `[map]`.
struct CommonSettings {
    language: Option<String>,
    region: Option<String>,
    viewport: Option<GeoMapViewport>,
    min_zoom: Option<f64>,
    max_zoom: Option<f64>,
}

/// Parse an `Ini` object into a `GeoMapConfig`.
pub(super) fn parse_ini(ini: &Ini) -> Result<GeoMapConfig, ConfigFileError> {
    let map = ini
        .section(Some("map"))
        .ok_or_else(|| missing("map", "provider"))?;

    let provider = non_empty(map, "provider")
        .ok_or_else(|| missing("map", "provider"))?
        .to_lowercase();

    let common = parse_common(map)?;

    match provider.as_str() {
        "google" => parse_google(ini, common).map(GeoMapConfig::Google),
        "here" => parse_here(ini, common).map(GeoMapConfig::Here),
        _ => Err(invalid("map", "provider", &provider, "must be one of: google, here")),
    }
}

fn parse_common(map: &Properties) -> Result<CommonSettings, ConfigFileError> {
    let viewport = match non_empty(map, "viewport") {
        Some(v) => Some(parse_viewport(v)?),
        None => None,
    };

    Ok(CommonSettings {
        language: non_empty(map, "language").map(str::to_string),
        region: non_empty(map, "region").map(str::to_string),
        viewport,
        min_zoom: parse_zoom(map, "min_zoom")?,
        max_zoom: parse_zoom(map, "max_zoom")?,
    })
}

fn parse_google(ini: &Ini, common: CommonSettings) -> Result<GoogleMapConfig, ConfigFileError> {
    let section = ini
        .section(Some("google"))
        .ok_or_else(|| missing("google", "api_key"))?;

    let channel = non_empty(section, "channel").map(str::to_string);
    let auth = match (non_empty(section, "api_key"), non_empty(section, "client_id")) {
        (Some(api_key), None) => GoogleMapAuth::ApiKey {
            api_key: api_key.to_string(),
            channel,
        },
        (None, Some(client_id)) => GoogleMapAuth::ClientId {
            client_id: client_id.to_string(),
            channel,
        },
        (Some(_), Some(client_id)) => {
            return Err(invalid(
                "google",
                "client_id",
                client_id,
                "set either api_key or client_id, not both",
            ));
        }
        (None, None) => return Err(missing("google", "api_key")),
    };

    Ok(GoogleMapConfig {
        auth,
        language: common.language,
        region: common.region,
        viewport: common.viewport,
        min_zoom: common.min_zoom,
        max_zoom: common.max_zoom,
    })
}

fn parse_here(ini: &Ini, common: CommonSettings) -> Result<HereMapConfig, ConfigFileError> {
    let section = ini
        .section(Some("here"))
        .ok_or_else(|| missing("here", "app_id"))?;

    let app_id = non_empty(section, "app_id").ok_or_else(|| missing("here", "app_id"))?;
    let app_code = non_empty(section, "app_code").ok_or_else(|| missing("here", "app_code"))?;

    let style = match non_empty(section, "style") {
        Some(v) => v
            .parse::<HereMapStyle>()
            .map_err(|_| {
                invalid(
                    "here",
                    "style",
                    v,
                    "must be one of: default, alps, fleet, wings, dreamworks, flame, mini",
                )
            })?,
        None => HereMapStyle::default(),
    };

    let ppi = match non_empty(section, "ppi") {
        Some(v) => v
            .parse::<u32>()
            .ok()
            .and_then(HerePixelDensity::from_ppi)
            .ok_or_else(|| invalid("here", "ppi", v, "must be one of: 72, 320, 500"))?,
        None => HerePixelDensity::default(),
    };

    let no_wrap = match non_empty(section, "no_wrap") {
        Some(v) => {
            parse_bool(v).ok_or_else(|| invalid("here", "no_wrap", v, "must be true or false"))?
        }
        None => false,
    };

    Ok(HereMapConfig {
        app_id: app_id.to_string(),
        app_code: app_code.to_string(),
        language: common.language,
        region: common.region,
        viewport: common.viewport,
        style,
        ppi,
        no_wrap,
        min_zoom: common.min_zoom,
        max_zoom: common.max_zoom,
    })
}

/// Parse `top,right,bottom,left` pixel padding.
fn parse_viewport(value: &str) -> Result<GeoMapViewport, ConfigFileError> {
    let parts: Vec<f64> = value
        .split(',')
        .map(|p| p.trim().parse::<f64>())
        .collect::<Result<_, _>>()
        .map_err(|_| invalid("map", "viewport", value, "expected four numbers"))?;

    match parts.as_slice() {
        [top, right, bottom, left] => Ok(GeoMapViewport::new(*top, *right, *bottom, *left)),
        _ => Err(invalid(
            "map",
            "viewport",
            value,
            "expected format 'top,right,bottom,left'",
        )),
    }
}

fn parse_zoom(section: &Properties, key: &str) -> Result<Option<f64>, ConfigFileError> {
    match non_empty(section, key) {
        Some(v) => match v.parse::<f64>() {
            Ok(zoom) if zoom >= 0.0 => Ok(Some(zoom)),
            _ => Err(invalid("map", key, v, "must be a non-negative number")),
        },
        None => Ok(None),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "true" | "yes" | "1" => Some(true),
        "false" | "no" | "0" => Some(false),
        _ => None,
    }
}

fn non_empty<'a>(section: &'a Properties, key: &str) -> Option<&'a str> {
    section.get(key).map(str::trim).filter(|v| !v.is_empty())
}

fn missing(section: &str, key: &str) -> ConfigFileError {
    ConfigFileError::MissingValue {
        section: section.to_string(),
        key: key.to_string(),
    }
}

fn invalid(section: &str, key: &str, value: &str, reason: &str) -> ConfigFileError {
    ConfigFileError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
