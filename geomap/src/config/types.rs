//! Provider discriminant and per-vendor configuration.

use super::language::HereLanguage;
use crate::geo::GeoMapViewport;
use std::fmt;
use std::str::FromStr;

/// Which vendor backs a map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeoMapProvider {
    Google,
    Here,
    /// Adopted implementation or server-side stand-in.
    Custom,
}

impl GeoMapProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Google => "Google",
            Self::Here => "Here",
            Self::Custom => "Custom",
        }
    }
}

impl fmt::Display for GeoMapProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Google Maps authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GoogleMapAuth {
    /// Standard plan API key.
    ApiKey {
        api_key: String,
        channel: Option<String>,
    },
    /// Premium plan client id.
    ClientId {
        client_id: String,
        channel: Option<String>,
    },
}

impl GoogleMapAuth {
    pub fn api_key(api_key: impl Into<String>) -> Self {
        Self::ApiKey {
            api_key: api_key.into(),
            channel: None,
        }
    }

    pub fn client_id(client_id: impl Into<String>) -> Self {
        Self::ClientId {
            client_id: client_id.into(),
            channel: None,
        }
    }

    /// Sets the usage-reporting channel.
    pub fn with_channel(self, channel: impl Into<String>) -> Self {
        let channel = Some(channel.into());
        match self {
            Self::ApiKey { api_key, .. } => Self::ApiKey { api_key, channel },
            Self::ClientId { client_id, .. } => Self::ClientId { client_id, channel },
        }
    }

    pub fn channel(&self) -> Option<&str> {
        match self {
            Self::ApiKey { channel, .. } | Self::ClientId { channel, .. } => channel.as_deref(),
        }
    }
}

/// Configuration for a Google Maps backed map.
#[derive(Debug, Clone, PartialEq)]
pub struct GoogleMapConfig {
    pub auth: GoogleMapAuth,
    pub language: Option<String>,
    pub region: Option<String>,
    pub viewport: Option<GeoMapViewport>,
    pub min_zoom: Option<f64>,
    pub max_zoom: Option<f64>,
}

impl GoogleMapConfig {
    pub fn new(auth: GoogleMapAuth) -> Self {
        Self {
            auth,
            language: None,
            region: None,
            viewport: None,
            min_zoom: None,
            max_zoom: None,
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub fn with_viewport(mut self, viewport: GeoMapViewport) -> Self {
        self.viewport = Some(viewport);
        self
    }

    pub fn with_zoom_range(mut self, min_zoom: f64, max_zoom: f64) -> Self {
        self.min_zoom = Some(min_zoom);
        self.max_zoom = Some(max_zoom);
        self
    }
}

/// HERE base map styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HereMapStyle {
    #[default]
    Default,
    Alps,
    Fleet,
    Wings,
    Dreamworks,
    Flame,
    Mini,
}

impl HereMapStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Alps => "alps",
            Self::Fleet => "fleet",
            Self::Wings => "wings",
            Self::Dreamworks => "dreamworks",
            Self::Flame => "flame",
            Self::Mini => "mini",
        }
    }
}

impl FromStr for HereMapStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "default" => Ok(Self::Default),
            "alps" => Ok(Self::Alps),
            "fleet" => Ok(Self::Fleet),
            "wings" => Ok(Self::Wings),
            "dreamworks" => Ok(Self::Dreamworks),
            "flame" => Ok(Self::Flame),
            "mini" => Ok(Self::Mini),
            other => Err(format!("unknown HERE map style '{}'", other)),
        }
    }
}

/// HERE tile pixel density.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HerePixelDensity {
    #[default]
    Default,
    HighRes,
    UltraHighRes,
}

impl HerePixelDensity {
    /// Pixels per inch requested from the tile service.
    pub fn ppi(&self) -> u32 {
        match self {
            Self::Default => 72,
            Self::HighRes => 320,
            Self::UltraHighRes => 500,
        }
    }

    pub fn from_ppi(ppi: u32) -> Option<Self> {
        match ppi {
            72 => Some(Self::Default),
            320 => Some(Self::HighRes),
            500 => Some(Self::UltraHighRes),
            _ => None,
        }
    }
}

/// Configuration for a HERE backed map.
#[derive(Debug, Clone, PartialEq)]
pub struct HereMapConfig {
    pub app_id: String,
    pub app_code: String,
    pub language: Option<String>,
    pub region: Option<String>,
    pub viewport: Option<GeoMapViewport>,
    pub style: HereMapStyle,
    pub ppi: HerePixelDensity,
    pub no_wrap: bool,
    pub min_zoom: Option<f64>,
    pub max_zoom: Option<f64>,
}

impl HereMapConfig {
    pub fn new(app_id: impl Into<String>, app_code: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            app_code: app_code.into(),
            language: None,
            region: None,
            viewport: None,
            style: HereMapStyle::default(),
            ppi: HerePixelDensity::default(),
            no_wrap: false,
            min_zoom: None,
            max_zoom: None,
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub fn with_viewport(mut self, viewport: GeoMapViewport) -> Self {
        self.viewport = Some(viewport);
        self
    }

    pub fn with_style(mut self, style: HereMapStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_ppi(mut self, ppi: HerePixelDensity) -> Self {
        self.ppi = ppi;
        self
    }

    pub fn with_no_wrap(mut self, no_wrap: bool) -> Self {
        self.no_wrap = no_wrap;
        self
    }

    pub fn with_zoom_range(mut self, min_zoom: f64, max_zoom: f64) -> Self {
        self.min_zoom = Some(min_zoom);
        self.max_zoom = Some(max_zoom);
        self
    }

    /// Language in HERE's three-letter notation, `mul` when unset or unknown.
    pub fn here_language(&self) -> HereLanguage {
        self.language
            .as_deref()
            .map(HereLanguage::from_iso)
            .unwrap_or(HereLanguage::Multiple)
    }
}

/// Map configuration, one variant per vendor.
///
/// The provider discriminant is derived from the variant, so it always
/// agrees with the vendor fields present.
///
/// # Example
///
/// ```
/// use geomap::config::{GeoMapConfig, GeoMapProvider, GoogleMapAuth};
///
/// let config = GeoMapConfig::google(GoogleMapAuth::api_key("YOUR_API_KEY"));
/// assert_eq!(config.provider(), GeoMapProvider::Google);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum GeoMapConfig {
    Google(GoogleMapConfig),
    Here(HereMapConfig),
}

impl GeoMapConfig {
    pub fn google(auth: GoogleMapAuth) -> Self {
        Self::Google(GoogleMapConfig::new(auth))
    }

    pub fn here(app_id: impl Into<String>, app_code: impl Into<String>) -> Self {
        Self::Here(HereMapConfig::new(app_id, app_code))
    }

    pub fn provider(&self) -> GeoMapProvider {
        match self {
            Self::Google(_) => GeoMapProvider::Google,
            Self::Here(_) => GeoMapProvider::Here,
        }
    }

    pub fn viewport(&self) -> Option<GeoMapViewport> {
        match self {
            Self::Google(c) => c.viewport,
            Self::Here(c) => c.viewport,
        }
    }

    pub fn zoom_range(&self) -> (Option<f64>, Option<f64>) {
        match self {
            Self::Google(c) => (c.min_zoom, c.max_zoom),
            Self::Here(c) => (c.min_zoom, c.max_zoom),
        }
    }
}

impl From<GoogleMapConfig> for GeoMapConfig {
    fn from(config: GoogleMapConfig) -> Self {
        Self::Google(config)
    }
}

impl From<HereMapConfig> for GeoMapConfig {
    fn from(config: HereMapConfig) -> Self {
        Self::Here(config)
    }
}
