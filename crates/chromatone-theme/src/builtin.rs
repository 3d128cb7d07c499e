//! Named preset configurations.
//!
//! Each preset is a complete [`ThemeConfiguration`]: a base color, a rule
//! and a threshold that resolve cleanly in both modes.

use chromatone_color::Hsl;

use crate::config::ThemeConfiguration;
use crate::contrast::Threshold;
use crate::harmony::HarmonyRule;

/// Look up a preset by name.
///
/// Returns `None` if the name is not recognized.
#[must_use]
pub fn builtin_config(name: &str) -> Option<ThemeConfiguration> {
    let config = match name {
        "ocean" => ThemeConfiguration::new(Hsl::new(200, 60, 45), HarmonyRule::Analogous),
        "ember" => ThemeConfiguration {
            threshold: Threshold::AAA,
            ..ThemeConfiguration::new(Hsl::new(20, 85, 55), HarmonyRule::Complementary)
        },
        "forest" => ThemeConfiguration::new(Hsl::new(130, 40, 40), HarmonyRule::Triadic),
        "dusk" => ThemeConfiguration::new(Hsl::new(270, 50, 50), HarmonyRule::Rectangular),
        "mono" => ThemeConfiguration {
            threshold: Threshold::AAA,
            force_black_white_text: true,
            ..ThemeConfiguration::new(Hsl::new(210, 15, 50), HarmonyRule::Monochromatic)
        },
        _ => return None,
    };
    Some(config)
}

/// List all preset names.
#[must_use]
pub const fn builtin_names() -> &'static [&'static str] {
    &["ocean", "ember", "forest", "dusk", "mono"]
}
