//! HERE language codes.
//!
//! The HERE map tile service expects MARC three-letter language codes
//! rather than ISO 639-1.

/// Languages supported by HERE map tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HereLanguage {
    Arabic,
    Basque,
    Catalan,
    Chinese,
    Czech,
    Danish,
    Dutch,
    English,
    Finnish,
    French,
    German,
    Gaelic,
    Greek,
    Hebrew,
    Hindi,
    Indonesian,
    Italian,
    Norwegian,
    Persian,
    Polish,
    Portuguese,
    Russian,
    Sinhalese,
    Spanish,
    Swedish,
    Thai,
    Turkish,
    Ukrainian,
    Urdu,
    Vietnamese,
    Welsh,
    /// Labels in each region's local language.
    Multiple,
}

impl HereLanguage {
    /// Maps an ISO 639-1 code (optionally with region, e.g. `de-DE`).
    ///
    /// Unknown codes fall back to [`HereLanguage::Multiple`].
    pub fn from_iso(code: &str) -> Self {
        let primary = code
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_lowercase();

        match primary.as_str() {
            "ar" => Self::Arabic,
            "eu" => Self::Basque,
            "ca" => Self::Catalan,
            "zh" => Self::Chinese,
            "cs" => Self::Czech,
            "da" => Self::Danish,
            "nl" => Self::Dutch,
            "en" => Self::English,
            "fi" => Self::Finnish,
            "fr" => Self::French,
            "de" => Self::German,
            "ga" => Self::Gaelic,
            "el" => Self::Greek,
            "he" => Self::Hebrew,
            "hi" => Self::Hindi,
            "id" => Self::Indonesian,
            "it" => Self::Italian,
            "no" => Self::Norwegian,
            "fa" => Self::Persian,
            "pl" => Self::Polish,
            "pt" => Self::Portuguese,
            "ru" => Self::Russian,
            "si" => Self::Sinhalese,
            "es" => Self::Spanish,
            "sv" => Self::Swedish,
            "th" => Self::Thai,
            "tr" => Self::Turkish,
            "uk" => Self::Ukrainian,
            "ur" => Self::Urdu,
            "vi" => Self::Vietnamese,
            "cy" => Self::Welsh,
            _ => Self::Multiple,
        }
    }

    /// Three-letter code sent to the tile service.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Arabic => "ara",
            Self::Basque => "baq",
            Self::Catalan => "cat",
            Self::Chinese => "chi",
            Self::Czech => "cze",
            Self::Danish => "dan",
            Self::Dutch => "dut",
            Self::English => "eng",
            Self::Finnish => "fin",
            Self::French => "fre",
            Self::German => "ger",
            Self::Gaelic => "gle",
            Self::Greek => "gre",
            Self::Hebrew => "heb",
            Self::Hindi => "hin",
            Self::Indonesian => "ind",
            Self::Italian => "ita",
            Self::Norwegian => "nor",
            Self::Persian => "per",
            Self::Polish => "pol",
            Self::Portuguese => "por",
            Self::Russian => "rus",
            Self::Sinhalese => "sin",
            Self::Spanish => "spa",
            Self::Swedish => "swe",
            Self::Thai => "tha",
            Self::Turkish => "tur",
            Self::Ukrainian => "ukr",
            Self::Urdu => "urd",
            Self::Vietnamese => "vie",
            Self::Welsh => "wel",
            Self::Multiple => "mul",
        }
    }
}
