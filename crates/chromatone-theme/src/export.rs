//! The serializable theme document handed to a rendering layer.
//!
//! Field names and the palette entry shape (`hsl` / `rgb` / `hex`) are a
//! compatibility contract; renaming anything here breaks consumers.
//!
//! ```json
//! {
//!   "baseColor": { "h": 210, "s": 50, "l": 50 },
//!   "harmonyRule": "monochromatic",
//!   "threshold": 7.0,
//!   "roles": { "background-primary": "28 56 84", ... },
//!   "palette": [ { "hsl": {...}, "rgb": {...}, "hex": "#4080bf" } ],
//!   ...
//! }
//! ```

use std::collections::BTreeMap;

use chromatone_color::{Hsl, Rgb};
use serde::{Deserialize, Serialize};

use crate::config::ThemeConfiguration;
use crate::harmony::HarmonyRule;
use crate::mode::Mode;
use crate::theme::ResolvedTheme;

/// One palette swatch in all three notations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaletteEntry {
    pub hsl: Hsl,
    pub rgb: Rgb,
    pub hex: String,
}

impl From<Hsl> for PaletteEntry {
    fn from(hsl: Hsl) -> Self {
        let rgb = hsl.to_rgb();
        Self {
            hsl,
            rgb,
            hex: rgb.to_hex(),
        }
    }
}

/// The exported theme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeDescription {
    /// The configured base, before `hueOffset` and `saturation` apply.
    pub base_color: Hsl,
    pub harmony_rule: HarmonyRule,
    /// Numeric contrast target.
    pub threshold: f64,
    pub force_black_white_text: bool,
    pub mix_and_match: bool,
    pub saturation: u16,
    pub hue_offset: i32,
    pub mode: Mode,
    /// Role name to `"r g b"`.
    pub roles: BTreeMap<String, String>,
    pub palette: Vec<PaletteEntry>,
}

impl ThemeDescription {
    #[must_use]
    pub fn new(config: &ThemeConfiguration, theme: &ResolvedTheme) -> Self {
        let roles = theme
            .roles
            .iter()
            .map(|(role, color)| (role.name().to_string(), color.to_rgb().to_channels()))
            .collect();
        Self {
            base_color: config.base_color.unwrap_or(theme.base),
            harmony_rule: theme.rule,
            threshold: theme.threshold,
            force_black_white_text: config.force_black_white_text,
            mix_and_match: config.mix_and_match,
            saturation: config.saturation,
            hue_offset: config.hue_offset,
            mode: theme.mode,
            roles,
            palette: theme.palette.iter().copied().map(PaletteEntry::from).collect(),
        }
    }

    /// Pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Only if serialization itself fails, which plain data cannot do in
    /// practice.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// The roles as CSS custom properties, one per line:
    /// `--text-primary: 250 251 252;`.
    #[must_use]
    pub fn to_css_variables(&self) -> String {
        self.roles
            .iter()
            .map(|(name, channels)| format!("--{name}: {channels};\n"))
            .collect()
    }
}
