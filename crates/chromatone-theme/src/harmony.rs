//! Harmony rules: fixed hue-offset patterns.
//!
//! Each rule rotates the base hue by a fixed list of deltas and keeps
//! saturation and lightness exactly as given. The output order is the
//! order of the deltas, so the same base and rule always produce the same
//! list.

use std::fmt;
use std::str::FromStr;

use chromatone_color::Hsl;
use serde::{Deserialize, Serialize};

/// A named harmony rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HarmonyRule {
    /// The base color alone.
    Monochromatic,
    /// Neighbours 30 degrees either side (3 colors).
    Analogous,
    /// Base and its opposite (2 colors).
    Complementary,
    /// Base and the two hues flanking its opposite (3 colors).
    SplitComplementary,
    /// 120-degree spacing (3 colors).
    Triadic,
    /// 90-degree spacing (4 colors).
    Square,
    /// Two complementary pairs 60 degrees apart (4 colors).
    Rectangular,
}

impl HarmonyRule {
    /// Every rule, in declaration order.
    pub const ALL: [Self; 7] = [
        Self::Monochromatic,
        Self::Analogous,
        Self::Complementary,
        Self::SplitComplementary,
        Self::Triadic,
        Self::Square,
        Self::Rectangular,
    ];

    /// Hue deltas from the base, in output order.
    #[must_use]
    pub const fn offsets(self) -> &'static [i32] {
        match self {
            Self::Monochromatic => &[0],
            Self::Analogous => &[-30, 0, 30],
            Self::Complementary => &[0, 180],
            Self::SplitComplementary => &[0, 150, 210],
            Self::Triadic => &[0, 120, 240],
            Self::Square => &[0, 90, 180, 270],
            Self::Rectangular => &[0, 60, 180, 240],
        }
    }

    /// Number of swatches this rule produces.
    #[must_use]
    #[allow(clippy::len_without_is_empty)]
    pub const fn len(self) -> usize {
        self.offsets().len()
    }

    /// The serialized tag (`"split-complementary"`).
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Monochromatic => "monochromatic",
            Self::Analogous => "analogous",
            Self::Complementary => "complementary",
            Self::SplitComplementary => "split-complementary",
            Self::Triadic => "triadic",
            Self::Square => "square",
            Self::Rectangular => "rectangular",
        }
    }

    /// Look a rule up by tag (case-insensitive).
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        let lower = tag.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|r| r.name() == lower)
    }

    /// Apply the rule to `base`.
    #[must_use]
    pub fn generate(self, base: Hsl) -> Vec<Hsl> {
        self.offsets().iter().map(|&d| base.shift_hue(d)).collect()
    }
}

/// [`HarmonyRule::generate`] by tag. Unknown tags yield `[base]`.
#[must_use]
pub fn generate_from_tag(base: Hsl, tag: &str) -> Vec<Hsl> {
    HarmonyRule::from_tag(tag).map_or_else(|| vec![base], |rule| rule.generate(base))
}

impl fmt::Display for HarmonyRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HarmonyRule {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_tag(s).ok_or_else(|| {
            let known: Vec<&str> = Self::ALL.iter().map(|r| r.name()).collect();
            format!("unknown harmony rule {s:?} (expected one of: {})", known.join(", "))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn hues(colors: &[Hsl]) -> Vec<u16> {
        colors.iter().map(|c| c.h()).collect()
    }

    /// Every rule keeps saturation and lightness.
    #[test]
    fn only_hue_changes() {
        let base = Hsl::new(17, 63, 41);
        for rule in HarmonyRule::ALL {
            for c in rule.generate(base) {
                assert_eq!((c.s(), c.l()), (63, 41), "{rule}");
            }
        }
    }

    /// Counts match the rule table.
    #[test]
    fn counts() {
        let counts: Vec<usize> = HarmonyRule::ALL.iter().map(|r| r.len()).collect();
        assert_eq!(counts, vec![1, 3, 2, 3, 3, 4, 4]);
    }

    #[test]
    fn complementary_of_red() {
        let base = Hsl::new(0, 50, 50);
        assert_eq!(
            HarmonyRule::Complementary.generate(base),
            vec![Hsl::new(0, 50, 50), Hsl::new(180, 50, 50)]
        );
    }

    /// Analogous keeps the base in the middle.
    #[test]
    fn analogous_order() {
        let out = HarmonyRule::Analogous.generate(Hsl::new(120, 40, 50));
        assert_eq!(hues(&out), vec![90, 120, 150]);
    }

    /// Analogous wraps below zero.
    #[test]
    fn analogous_wraps_negative() {
        let out = HarmonyRule::Analogous.generate(Hsl::new(10, 40, 50));
        assert_eq!(hues(&out), vec![340, 10, 40]);
    }

    #[test]
    fn split_complementary_hues() {
        let out = HarmonyRule::SplitComplementary.generate(Hsl::new(270, 70, 50));
        assert_eq!(hues(&out), vec![270, 60, 120]);
    }

    #[test]
    fn square_and_rectangular_hues() {
        let base = Hsl::new(200, 60, 45);
        assert_eq!(hues(&HarmonyRule::Square.generate(base)), vec![200, 290, 20, 110]);
        assert_eq!(hues(&HarmonyRule::Rectangular.generate(base)), vec![200, 260, 20, 80]);
    }

    /// The base is always the zero-delta entry.
    #[test]
    fn base_present() {
        let base = Hsl::new(333, 20, 80);
        for rule in HarmonyRule::ALL {
            assert!(rule.generate(base).contains(&base), "{rule}");
        }
    }

    #[test]
    fn tags_round_trip() {
        for rule in HarmonyRule::ALL {
            assert_eq!(HarmonyRule::from_tag(rule.name()), Some(rule));
            assert_eq!(rule.to_string().parse::<HarmonyRule>(), Ok(rule));
        }
        assert_eq!(HarmonyRule::from_tag(" Triadic "), Some(HarmonyRule::Triadic));
    }

    #[test]
    fn unknown_tag_falls_back_to_base() {
        let base = Hsl::new(45, 90, 60);
        assert_eq!(HarmonyRule::from_tag("pentagram"), None);
        assert_eq!(generate_from_tag(base, "pentagram"), vec![base]);
        assert_eq!(generate_from_tag(base, "square").len(), 4);
    }

    #[test]
    fn unknown_tag_error_lists_rules() {
        let err = "hexagram".parse::<HarmonyRule>().unwrap_err();
        assert!(err.contains("split-complementary"), "{err}");
    }

    #[test]
    fn serde_kebab_case() {
        let json = serde_json::to_string(&HarmonyRule::SplitComplementary).unwrap();
        assert_eq!(json, "\"split-complementary\"");
        let back: HarmonyRule = serde_json::from_str("\"rectangular\"").unwrap();
        assert_eq!(back, HarmonyRule::Rectangular);
    }

    #[test]
    fn deterministic() {
        let base = Hsl::new(77, 33, 44);
        assert_eq!(HarmonyRule::Triadic.generate(base), HarmonyRule::Triadic.generate(base));
    }
}
