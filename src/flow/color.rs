//! Color values and label color lookups.

use std::{fmt, path::Path, str::FromStr};

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::{Error, Result, config::ColorConfig, grouping::{Label, LabelTag}};

/// Key of the fallback entry in a color table.
pub const DEFAULT_COLOR_KEY: &str = "_default";

/// RGBA color: 8-bit channels, alpha in [0.0, 1.0].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Color {
    /// Neutral gray used when nothing else matches.
    pub const GRAY: Color = Color::rgb(150, 150, 150);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self { Self { r, g, b, a: 1.0 } }

    /// Same color with alpha replaced by `opacity` (clamped to [0, 1]).
    pub fn with_opacity(self, opacity: f64) -> Self { Self { a: opacity.clamp(0.0, 1.0), ..self } }
}

impl fmt::Display for Color {
    /// Format as CSS: rgba(r,g,b,a), alpha always with a decimal point.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a.fract() == 0.0 {
            write!(f, "rgba({},{},{},{:.1})", self.r, self.g, self.b, self.a)
        } else {
            write!(f, "rgba({},{},{},{})", self.r, self.g, self.b, self.a)
        }
    }
}

impl FromStr for Color {
    type Err = Error;

    /// Parses `#rrggbb`, `rgb(r,g,b)` and `rgba(r,g,b,a)`.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidColor(s.to_string());
        let s = s.trim();

        if let Some(hex) = s.strip_prefix('#') {
            if hex.len() != 6 || !hex.is_ascii() { return Err(invalid()) }
            let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
            return Ok(Color::rgb(channel(0)?, channel(2)?, channel(4)?));
        }

        let (body, expect_alpha) = if let Some(body) = s.strip_prefix("rgba(") {
            (body, true)
        } else if let Some(body) = s.strip_prefix("rgb(") {
            (body, false)
        } else {
            return Err(invalid());
        };
        let body = body.strip_suffix(')').ok_or_else(invalid)?;
        let parts = body.split(',').map(str::trim).collect::<Vec<_>>();
        let expected = if expect_alpha { 4 } else { 3 };
        if parts.len() != expected { return Err(invalid()) }

        let channel = |p: &str| p.parse::<u8>().map_err(|_| invalid());
        let a = match parts.get(3) {
            Some(p) => p.parse::<f64>().ok().filter(|a| (0.0..=1.0).contains(a)).ok_or_else(invalid)?,
            None => 1.0,
        };
        Ok(Color { r: channel(parts[0])?, g: channel(parts[1])?, b: channel(parts[2])?, a })
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self { color.to_string() }
}

impl TryFrom<String> for Color {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> { s.parse() }
}

/// Maps group labels to display colors. Lookups never fail.
pub trait ColorLookup {
    fn color_for(&self, label: &Label) -> Color;

    /// Colors for `labels`, in the same order.
    fn colors_for(&self, labels: &[Label]) -> Vec<Color> {
        labels.iter().map(|label| self.color_for(label)).collect()
    }
}

/// Every label gets the same color.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Uniform(pub Color);

impl ColorLookup for Uniform {
    fn color_for(&self, _label: &Label) -> Color { self.0 }
}

/// Color table keyed by label text, with source regions normalized to their
/// parcellation module first.
#[derive(Clone, Debug)]
pub struct Palette {
    modules: AHashMap<String, String>,  // region -> module
    colors: AHashMap<String, Color>,
    default: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self { modules: AHashMap::new(), colors: AHashMap::new(), default: Color::GRAY }
    }
}

impl Palette {
    /// Build a palette from a parsed color configuration.
    pub fn new(config: &ColorConfig) -> Result<Self> {
        let modules = config.parcellation.iter()
            .flat_map(|(module, regions)| regions.iter().map(move |region| (region.clone(), module.clone())))
            .collect();

        let mut colors = config.colors.iter()
            .map(|(key, value)| Ok((key.clone(), value.parse::<Color>()?)))
            .collect::<Result<AHashMap<_, _>>>()?;
        let default = colors.remove(DEFAULT_COLOR_KEY).unwrap_or(Color::GRAY);

        Ok(Self { modules, colors, default })
    }

    /// Load a palette from a JSON color configuration file.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        Self::new(&ColorConfig::from_json_file(path)?)
    }

    /// Color used for unrecognized labels.
    #[inline] pub fn default_color(&self) -> Color { self.default }

    /// Parcellation module containing `region`, if known.
    pub fn module_of(&self, region: &str) -> Option<&str> { self.modules.get(region).map(String::as_str) }

    #[inline]
    fn lookup(&self, key: &str) -> Option<Color> { self.colors.get(key).copied() }

    /// Regions inside a known module take the module's color, never their own.
    fn region_color(&self, region: &str) -> Color {
        let key = self.module_of(region).unwrap_or(region);
        self.lookup(key).unwrap_or(self.default)
    }

    fn tag_color(&self, tag: &LabelTag) -> Color {
        match tag {
            LabelTag::RawRegion(region) | LabelTag::Source { region, .. } => self.region_color(region),
            LabelTag::Layered { base, .. } => self.tag_color(base),
            LabelTag::ViaClass(class) => self.lookup(&format!("Via {class}")).unwrap_or(self.default),
            LabelTag::Hemisphere(hemi) => self.lookup(hemi.to_str()).unwrap_or(self.default),
            LabelTag::All => self.lookup("ALL").unwrap_or(self.default),
        }
    }
}

impl ColorLookup for Palette {
    fn color_for(&self, label: &Label) -> Color {
        match label.tag() {
            LabelTag::RawRegion(_) | LabelTag::Source { .. } => self.tag_color(label.tag()),
            tag => self.lookup(label.text()).unwrap_or_else(|| self.tag_color(tag)),
        }
    }
}
