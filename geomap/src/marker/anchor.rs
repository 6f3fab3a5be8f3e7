//! Icon anchor computation.
//!
//! An anchor names the point of the icon's bounding box that sits on the
//! marker's coordinate. The box is read from the `width` and `height`
//! attributes of the SVG root element.

use regex::Regex;
use std::sync::OnceLock;

/// Position along one axis of the icon box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GeoMarkerOrientation {
    Start,
    #[default]
    Middle,
    End,
}

impl GeoMarkerOrientation {
    /// Fraction of the icon extent this orientation points at.
    pub fn ratio(&self) -> f64 {
        match self {
            Self::Start => 0.0,
            Self::Middle => 0.5,
            Self::End => 1.0,
        }
    }
}

/// Which point of the icon aligns with the marker position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GeoMarkerAnchor {
    pub vertical: GeoMarkerOrientation,
    pub horizontal: GeoMarkerOrientation,
}

impl GeoMarkerAnchor {
    pub fn new(vertical: GeoMarkerOrientation, horizontal: GeoMarkerOrientation) -> Self {
        Self {
            vertical,
            horizontal,
        }
    }
}

/// Anchor offset in icon pixels from the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AnchorPoint {
    pub x: f64,
    pub y: f64,
}

/// Icon dimensions parsed from SVG markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconSize {
    pub width: i64,
    pub height: i64,
}

fn svg_root_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?is)<svg\b([^>]*)>").unwrap())
}

fn dimension_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    // Leading whitespace keeps `stroke-width` and friends from matching.
    PATTERN.get_or_init(|| {
        Regex::new(r#"(?i)(?:^|\s)(width|height)\s*=\s*(?:"([^"]*)"|'([^']*)')"#).unwrap()
    })
}

/// Integer prefix of an attribute value: `"40px"` is 40, `"abc"` is `None`.
fn parse_int_prefix(value: &str) -> Option<i64> {
    let value = value.trim_start();
    let (sign, digits) = match value.as_bytes().first() {
        Some(b'-') => (-1, &value[1..]),
        Some(b'+') => (1, &value[1..]),
        _ => (1, value),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}

/// Reads `width` and `height` from the root `<svg>` element.
pub fn icon_size(icon: &str) -> Option<IconSize> {
    let attrs = svg_root_pattern().captures(icon)?.get(1)?.as_str();

    let mut width = None;
    let mut height = None;
    for caps in dimension_pattern().captures_iter(attrs) {
        let value = caps.get(2).or_else(|| caps.get(3)).map(|m| m.as_str())?;
        match caps[1].to_ascii_lowercase().as_str() {
            "width" if width.is_none() => width = parse_int_prefix(value),
            "height" if height.is_none() => height = parse_int_prefix(value),
            _ => {}
        }
    }

    Some(IconSize {
        width: width?,
        height: height?,
    })
}

/// Pixel anchor for `icon`, or `None` to keep the vendor default.
///
/// Without DOM facilities the markup is not inspected at all.
pub fn icon_anchor(anchor: GeoMarkerAnchor, icon: &str, has_dom: bool) -> Option<AnchorPoint> {
    if !has_dom {
        return None;
    }
    let size = icon_size(icon)?;
    Some(AnchorPoint {
        x: anchor.horizontal.ratio() * size.width as f64,
        y: anchor.vertical.ratio() * size.height as f64,
    })
}
