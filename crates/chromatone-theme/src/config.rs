//! The persisted theme configuration.
//!
//! A `ThemeConfiguration` is a plain value: callers load one from a
//! [`crate::store::KeyValueStore`], change fields, hand it to
//! [`crate::theme::ResolvedTheme::resolve`], and save it back. The engine
//! keeps no copy between calls.

use chromatone_color::Hsl;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

use crate::contrast::Threshold;
use crate::harmony::HarmonyRule;

/// Default saturation scale, in percent.
pub const DEFAULT_SATURATION: u16 = 100;
/// Upper bound for the saturation scale.
pub const MAX_SATURATION: u16 = 200;

/// Everything needed to rebuild a theme.
///
/// Serialized with camelCase field names. Missing fields take their
/// defaults and unknown fields are ignored, so older blobs keep loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ThemeConfiguration {
    pub base_color: Option<Hsl>,
    #[serde(deserialize_with = "lenient_rule")]
    pub harmony_rule: Option<HarmonyRule>,
    pub threshold: Threshold,
    pub force_black_white_text: bool,
    pub mix_and_match: bool,
    /// Percent scale applied to the base saturation.
    pub saturation: u16,
    /// Degrees added to the base hue before the harmony rule runs.
    pub hue_offset: i32,
    /// Resolve symbolic thresholds with the large-text targets.
    pub large_text: bool,
}

impl Default for ThemeConfiguration {
    fn default() -> Self {
        Self {
            base_color: None,
            harmony_rule: None,
            threshold: Threshold::AA,
            force_black_white_text: false,
            mix_and_match: false,
            saturation: DEFAULT_SATURATION,
            hue_offset: 0,
            large_text: false,
        }
    }
}

impl ThemeConfiguration {
    #[must_use]
    pub fn new(base_color: Hsl, harmony_rule: HarmonyRule) -> Self {
        Self {
            base_color: Some(base_color),
            harmony_rule: Some(harmony_rule),
            ..Self::default()
        }
    }

    /// Both a base color and a harmony rule are set.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.base_color.is_some() && self.harmony_rule.is_some()
    }

    /// Back to defaults.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// The base color after the hue offset and saturation scale.
    #[must_use]
    pub fn effective_base(&self) -> Option<Hsl> {
        let base = self.base_color?;
        let scale = u32::from(self.saturation.min(MAX_SATURATION));
        let s = u32::from(base.s()) * scale / 100;
        Some(Hsl::new(
            i32::from(base.h()) + self.hue_offset,
            i32::try_from(s).unwrap_or(100),
            i32::from(base.l()),
        ))
    }

    /// The harmony palette, once the configuration is complete.
    #[must_use]
    pub fn palette(&self) -> Option<Vec<Hsl>> {
        Some(self.harmony_rule?.generate(self.effective_base()?))
    }

    /// The numeric contrast target.
    #[must_use]
    pub fn threshold_ratio(&self) -> f64 {
        self.threshold.resolve(self.large_text)
    }
}

/// Unknown rule tags deserialize as monochromatic, the single-color
/// fallback.
fn lenient_rule<'de, D>(deserializer: D) -> Result<Option<HarmonyRule>, D::Error>
where
    D: Deserializer<'de>,
{
    let tag: Option<String> = Option::deserialize(deserializer)?;
    Ok(tag.map(|tag| {
        HarmonyRule::from_tag(&tag).unwrap_or_else(|| {
            warn!(%tag, "unknown harmony rule, using monochromatic");
            HarmonyRule::Monochromatic
        })
    }))
}
