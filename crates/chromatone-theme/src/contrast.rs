//! WCAG 2.1 contrast math and thresholds.
//!
//! Readability is measured in sRGB relative luminance (the WCAG
//! definition), while every adjustment elsewhere in the engine happens on
//! HSL lightness. This module is the bridge: it takes either color type and
//! answers "how far apart are these two?" as a ratio in `[1, 21]`.
//!
//! | Level | Normal text | Large text |
//! |-------|-------------|------------|
//! | AA    | 4.5:1       | 3.0:1      |
//! | AAA   | 7.0:1       | 4.5:1      |

use std::fmt;
use std::str::FromStr;

use chromatone_color::{Hsl, Rgb, srgb_to_linear};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// AA minimum for normal-size text.
pub const WCAG_AA_NORMAL: f64 = 4.5;
/// AA minimum for large text (18pt, or 14pt bold).
pub const WCAG_AA_LARGE: f64 = 3.0;
/// AAA minimum for normal-size text.
pub const WCAG_AAA_NORMAL: f64 = 7.0;
/// AAA minimum for large text.
pub const WCAG_AAA_LARGE: f64 = 4.5;

/// Lowest possible contrast ratio (identical colors).
pub const MIN_CONTRAST: f64 = 1.0;
/// Highest possible contrast ratio (black on white).
pub const MAX_CONTRAST: f64 = 21.0;

// ---------------------------------------------------------------------------
// Luminance and ratio
// ---------------------------------------------------------------------------

/// Compute the relative luminance of a color per WCAG 2.1.
///
/// Uses the standard sRGB linearization + weighted sum formula:
///   L = 0.2126 * `R_lin` + 0.7152 * `G_lin` + 0.0722 * `B_lin`
///
/// Returns a value in [0.0, 1.0] where 0 is black and 1 is white.
#[must_use]
// Left-to-right summation keeps pure white at exactly 1.0.
#[allow(clippy::suboptimal_flops)]
pub fn relative_luminance(color: Rgb) -> f64 {
    let (r, g, b) = color.to_srgb();
    0.2126 * srgb_to_linear(r) + 0.7152 * srgb_to_linear(g) + 0.0722 * srgb_to_linear(b)
}

/// Compute the WCAG 2.1 contrast ratio between two colors.
///
/// Returns a value in [1.0, 21.0]. The formula is:
///   (`L_lighter` + 0.05) / (`L_darker` + 0.05)
///
/// The result does not depend on argument order.
#[must_use]
pub fn contrast_ratio(a: Rgb, b: Rgb) -> f64 {
    let la = relative_luminance(a);
    let lb = relative_luminance(b);
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
    ((lighter + 0.05) / (darker + 0.05)).clamp(MIN_CONTRAST, MAX_CONTRAST)
}

/// [`contrast_ratio`] for two HSL colors (converted to sRGB bytes first).
#[must_use]
pub fn contrast_ratio_hsl(a: Hsl, b: Hsl) -> f64 {
    contrast_ratio(a.to_rgb(), b.to_rgb())
}

/// Whether `ratio` passes WCAG AA.
#[must_use]
pub fn meets_aa(ratio: f64, large_text: bool) -> bool {
    ratio >= Threshold::AA.resolve(large_text)
}

/// Whether `ratio` passes WCAG AAA.
#[must_use]
pub fn meets_aaa(ratio: f64, large_text: bool) -> bool {
    ratio >= Threshold::AAA.resolve(large_text)
}

// ---------------------------------------------------------------------------
// ContrastGrade
// ---------------------------------------------------------------------------

/// The best WCAG conformance a ratio reaches for normal-size text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContrastGrade {
    /// Below 3:1, not even large text passes.
    Fail,
    /// At least 3:1, AA for large text only.
    AaLarge,
    /// At least 4.5:1.
    Aa,
    /// At least 7:1.
    Aaa,
}

impl ContrastGrade {
    #[must_use]
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio >= WCAG_AAA_NORMAL {
            Self::Aaa
        } else if ratio >= WCAG_AA_NORMAL {
            Self::Aa
        } else if ratio >= WCAG_AA_LARGE {
            Self::AaLarge
        } else {
            Self::Fail
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Fail => "fail",
            Self::AaLarge => "AA large",
            Self::Aa => "AA",
            Self::Aaa => "AAA",
        }
    }
}

impl fmt::Display for ContrastGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Threshold
// ---------------------------------------------------------------------------

/// A symbolic WCAG conformance level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WcagLevel {
    #[serde(rename = "AA")]
    Aa,
    #[serde(rename = "AAA")]
    Aaa,
}

/// The contrast target a theme must reach.
///
/// Either a WCAG level (resolved against the large-text flag) or an
/// explicit ratio. Serialized as `"AA"`, `"AAA"` or a bare number.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Threshold {
    Level(WcagLevel),
    Ratio(f64),
}

impl Threshold {
    pub const AA: Self = Self::Level(WcagLevel::Aa);
    pub const AAA: Self = Self::Level(WcagLevel::Aaa);

    /// Resolve to the numeric ratio the engine targets.
    ///
    /// Explicit ratios are clamped to `[1, 21]`; a NaN ratio falls back to
    /// the AA normal-text target.
    #[must_use]
    pub fn resolve(self, large_text: bool) -> f64 {
        match (self, large_text) {
            (Self::Level(WcagLevel::Aa), false) => WCAG_AA_NORMAL,
            (Self::Level(WcagLevel::Aa), true) => WCAG_AA_LARGE,
            (Self::Level(WcagLevel::Aaa), false) => WCAG_AAA_NORMAL,
            (Self::Level(WcagLevel::Aaa), true) => WCAG_AAA_LARGE,
            (Self::Ratio(r), _) if r.is_nan() => WCAG_AA_NORMAL,
            (Self::Ratio(r), _) => r.clamp(MIN_CONTRAST, MAX_CONTRAST),
        }
    }
}

impl Default for Threshold {
    fn default() -> Self {
        Self::AA
    }
}

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Level(WcagLevel::Aa) => f.write_str("AA"),
            Self::Level(WcagLevel::Aaa) => f.write_str("AAA"),
            Self::Ratio(r) => write!(f, "{r}:1"),
        }
    }
}

/// A threshold string that is neither a WCAG level nor a number.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid contrast threshold {0:?} (expected AA, AAA or a ratio such as 5.5)")]
pub struct ParseThresholdError(pub String);

impl FromStr for Threshold {
    type Err = ParseThresholdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("aa") {
            return Ok(Self::AA);
        }
        if trimmed.eq_ignore_ascii_case("aaa") {
            return Ok(Self::AAA);
        }
        let numeric = trimmed.strip_suffix(":1").unwrap_or(trimmed);
        match numeric.parse::<f64>() {
            Ok(r) if r.is_finite() && r >= MIN_CONTRAST => Ok(Self::Ratio(r)),
            _ => Err(ParseThresholdError(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() < eps
    }

    // ── Relative luminance ──────────────────────────────────────────

    #[test]
    fn luminance_black_is_zero() {
        let lum = relative_luminance(Rgb::BLACK);
        assert!(approx_eq(lum, 0.0, 1e-12), "Black luminance: {lum}");
    }

    #[test]
    fn luminance_white_is_one() {
        assert_eq!(relative_luminance(Rgb::WHITE), 1.0);
    }

    #[test]
    fn luminance_pure_red() {
        let lum = relative_luminance(Rgb::new(255, 0, 0));
        assert!(approx_eq(lum, 0.2126, 1e-9), "Red luminance: {lum}");
    }

    #[test]
    fn luminance_pure_green() {
        let lum = relative_luminance(Rgb::new(0, 255, 0));
        assert!(approx_eq(lum, 0.7152, 1e-9), "Green luminance: {lum}");
    }

    // ── Contrast ratio ──────────────────────────────────────────────

    #[test]
    fn contrast_black_white_is_exactly_21() {
        assert_eq!(contrast_ratio(Rgb::BLACK, Rgb::WHITE), 21.0);
        assert_eq!(contrast_ratio_hsl(Hsl::WHITE, Hsl::BLACK), 21.0);
    }

    #[test]
    fn contrast_same_color_is_1() {
        let c = Rgb::new(12, 200, 99);
        assert_eq!(contrast_ratio(c, c), 1.0);
    }

    #[test]
    fn contrast_is_symmetric() {
        let a = Rgb::new(204, 51, 77);
        let b = Rgb::new(26, 26, 102);
        assert_eq!(contrast_ratio(a, b), contrast_ratio(b, a));
    }

    #[test]
    fn reference_ratios() {
        // Values cross-checked against the WebAIM contrast checker.
        let gray_on_white = contrast_ratio(Rgb::new(0x76, 0x76, 0x76), Rgb::WHITE);
        assert!(approx_eq(gray_on_white, 4.54, 0.01), "{gray_on_white}");

        let red_on_white = contrast_ratio(Rgb::new(255, 0, 0), Rgb::WHITE);
        assert!(approx_eq(red_on_white, 3.998, 0.01), "{red_on_white}");
    }

    // ── Predicates and grades ───────────────────────────────────────

    #[test]
    fn aa_and_aaa_predicates() {
        assert!(meets_aa(4.5, false));
        assert!(!meets_aa(4.49, false));
        assert!(meets_aa(3.0, true));
        assert!(meets_aaa(7.0, false));
        assert!(!meets_aaa(6.99, false));
        assert!(meets_aaa(4.5, true));
    }

    #[test]
    fn grades_follow_thresholds() {
        assert_eq!(ContrastGrade::from_ratio(1.0), ContrastGrade::Fail);
        assert_eq!(ContrastGrade::from_ratio(3.0), ContrastGrade::AaLarge);
        assert_eq!(ContrastGrade::from_ratio(4.5), ContrastGrade::Aa);
        assert_eq!(ContrastGrade::from_ratio(21.0), ContrastGrade::Aaa);
        assert!(ContrastGrade::Aaa > ContrastGrade::Aa);
    }

    // ── Threshold ───────────────────────────────────────────────────

    #[test]
    fn threshold_resolution() {
        assert_eq!(Threshold::AA.resolve(false), 4.5);
        assert_eq!(Threshold::AA.resolve(true), 3.0);
        assert_eq!(Threshold::AAA.resolve(false), 7.0);
        assert_eq!(Threshold::AAA.resolve(true), 4.5);
        assert_eq!(Threshold::Ratio(5.5).resolve(true), 5.5);
    }

    #[test]
    fn threshold_ratio_is_clamped() {
        assert_eq!(Threshold::Ratio(0.2).resolve(false), 1.0);
        assert_eq!(Threshold::Ratio(40.0).resolve(false), 21.0);
        assert_eq!(Threshold::Ratio(f64::NAN).resolve(false), 4.5);
    }

    #[test]
    fn threshold_parsing() {
        assert_eq!("AA".parse::<Threshold>(), Ok(Threshold::AA));
        assert_eq!("aaa".parse::<Threshold>(), Ok(Threshold::AAA));
        assert_eq!("5.5".parse::<Threshold>(), Ok(Threshold::Ratio(5.5)));
        assert_eq!("3:1".parse::<Threshold>(), Ok(Threshold::Ratio(3.0)));
        assert!("0.5".parse::<Threshold>().is_err());
        assert!("A".parse::<Threshold>().is_err());
    }

    #[test]
    fn threshold_serde_shape() {
        assert_eq!(serde_json::to_string(&Threshold::AAA).unwrap(), r#""AAA""#);
        assert_eq!(serde_json::to_string(&Threshold::Ratio(5.5)).unwrap(), "5.5");
        let t: Threshold = serde_json::from_str(r#""AA""#).unwrap();
        assert_eq!(t, Threshold::AA);
        let t: Threshold = serde_json::from_str("6").unwrap();
        assert_eq!(t, Threshold::Ratio(6.0));
    }
}
