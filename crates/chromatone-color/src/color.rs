// SPDX-License-Identifier: MIT
//
// chromatone color system: integer HSL and 8-bit sRGB value types.
//
// Single-character variable names (r, g, b, h, s, l, c, x, m) are the
// standard mathematical convention in color science. Renaming them would
// make the code harder to compare against reference implementations.
#![allow(clippy::many_single_char_names)]
//
// Every color the engine touches is one of two immutable value types:
//
//   Hsl: integer degrees / percent. All harmony and contrast adjustments
//        happen here, and only ever on one axis at a time.
//   Rgb: 8-bit sRGB. Contrast is measured here and presentation strings
//        are produced from here.
//
// Conversion pipeline:
//
//   Hsl ↔ Rgb → linear sRGB (relative luminance, see chromatone-theme)
//
// HSL rounding is lossy, so RGB is the fixed point of a round trip:
// `hsl_to_rgb(rgb_to_hsl(hsl_to_rgb(x))) == hsl_to_rgb(x)` for every
// integer HSL triple.

use std::fmt;

use serde::{Deserialize, Serialize};

// ─── Hsl ─────────────────────────────────────────────────────────────────────

/// A color as integer hue / saturation / lightness.
///
/// Hue is always in `[0, 360)`, saturation and lightness in `[0, 100]`.
/// Construction normalizes the hue and clamps the percentages, so an `Hsl`
/// value can never be out of range. Every operation returns a new value.
///
/// # Examples
///
/// ```
/// use chromatone_color::color::Hsl;
///
/// let steel = Hsl::new(210, 50, 50);
/// assert_eq!(steel.to_rgb().to_hex(), "#4080bf");
///
/// // Out-of-range input is wrapped / clamped, never rejected.
/// let wrapped = Hsl::new(-30, 120, 50);
/// assert_eq!((wrapped.h(), wrapped.s(), wrapped.l()), (330, 100, 50));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "HslRepr")]
pub struct Hsl {
    h: u16,
    s: u8,
    l: u8,
}

/// Unchecked wire shape; deserialization funnels through [`Hsl::new`].
#[derive(Deserialize)]
struct HslRepr {
    h: i32,
    s: i32,
    l: i32,
}

impl From<HslRepr> for Hsl {
    fn from(raw: HslRepr) -> Self {
        Self::new(raw.h, raw.s, raw.l)
    }
}

impl Hsl {
    /// Pure black.
    pub const BLACK: Self = Self::new(0, 0, 0);

    /// Pure white.
    pub const WHITE: Self = Self::new(0, 0, 100);

    /// Create a color, wrapping the hue and clamping saturation/lightness.
    #[inline]
    #[must_use]
    pub const fn new(h: i32, s: i32, l: i32) -> Self {
        Self {
            h: normalize_hue(h),
            s: clamp_percent(s),
            l: clamp_percent(l),
        }
    }

    /// Hue angle in degrees, `[0, 360)`.
    #[inline]
    #[must_use]
    pub const fn h(self) -> u16 {
        self.h
    }

    /// Saturation percent, `[0, 100]`.
    #[inline]
    #[must_use]
    pub const fn s(self) -> u8 {
        self.s
    }

    /// Lightness percent, `[0, 100]`.
    #[inline]
    #[must_use]
    pub const fn l(self) -> u8 {
        self.l
    }

    // ─── Single-axis operations ──────────────────────────────────────────

    /// Replace the lightness (clamped to 0–100).
    #[inline]
    #[must_use]
    pub const fn with_lightness(self, l: i32) -> Self {
        Self {
            l: clamp_percent(l),
            ..self
        }
    }

    /// Replace the saturation (clamped to 0–100).
    #[inline]
    #[must_use]
    pub const fn with_saturation(self, s: i32) -> Self {
        Self {
            s: clamp_percent(s),
            ..self
        }
    }

    /// Increase lightness by `amount` (clamped). Negative amounts darken.
    #[inline]
    #[must_use]
    pub const fn lighten(self, amount: i32) -> Self {
        self.with_lightness((self.l as i32).saturating_add(amount))
    }

    /// Decrease lightness by `amount` (clamped).
    #[inline]
    #[must_use]
    pub const fn darken(self, amount: i32) -> Self {
        self.with_lightness((self.l as i32).saturating_sub(amount))
    }

    /// Rotate the hue by `degrees` (wraps around 360°).
    #[inline]
    #[must_use]
    pub const fn shift_hue(self, degrees: i32) -> Self {
        Self {
            h: normalize_hue(self.h as i32 + degrees.rem_euclid(360)),
            ..self
        }
    }

    // ─── Conversions ─────────────────────────────────────────────────────

    /// Convert to 8-bit sRGB.
    #[must_use]
    pub fn to_rgb(self) -> Rgb {
        hsl_to_rgb(self)
    }

    /// CSS functional notation: `hsl(210, 50%, 50%)`.
    #[must_use]
    pub fn to_css(self) -> String {
        format!("hsl({}, {}%, {}%)", self.h, self.s, self.l)
    }
}

impl fmt::Display for Hsl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hsl({}, {}%, {}%)", self.h, self.s, self.l)
    }
}

impl From<Rgb> for Hsl {
    fn from(rgb: Rgb) -> Self {
        rgb_to_hsl(rgb)
    }
}

// ─── Rgb ─────────────────────────────────────────────────────────────────────

/// An 8-bit sRGB color.
///
/// Used for contrast math and for the strings handed to a presentation
/// layer. Every `(r, g, b)` triple is valid, so the fields are public.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Pure black.
    pub const BLACK: Self = Self::new(0, 0, 0);

    /// Pure white.
    pub const WHITE: Self = Self::new(255, 255, 255);

    #[inline]
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Convert to integer HSL.
    #[must_use]
    pub fn to_hsl(self) -> Hsl {
        rgb_to_hsl(self)
    }

    /// Channels as sRGB fractions (0.0–1.0).
    #[must_use]
    pub fn to_srgb(self) -> (f64, f64, f64) {
        (
            f64::from(self.r) / 255.0,
            f64::from(self.g) / 255.0,
            f64::from(self.b) / 255.0,
        )
    }

    /// CSS functional notation: `rgb(64, 128, 191)`.
    #[must_use]
    pub fn to_css(self) -> String {
        format!("rgb({}, {}, {})", self.r, self.g, self.b)
    }

    /// Space-separated channel token, `"64 128 191"`, for CSS custom
    /// properties consumed as `rgb(var(--x))`.
    #[must_use]
    pub fn to_channels(self) -> String {
        format!("{} {} {}", self.r, self.g, self.b)
    }

    /// Lowercase hex string, `#4080bf`.
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl From<Hsl> for Rgb {
    fn from(hsl: Hsl) -> Self {
        hsl_to_rgb(hsl)
    }
}

// ─── Conversion Functions ────────────────────────────────────────────────────

/// Normalize a hue angle to the range `[0, 360)`.
///
/// Handles any `i32`, including negative angles and multiple turns.
#[inline]
#[must_use]
pub const fn normalize_hue(degrees: i32) -> u16 {
    degrees.rem_euclid(360) as u16
}

/// Clamp an integer percentage into `[0, 100]`.
#[inline]
const fn clamp_percent(v: i32) -> u8 {
    if v < 0 {
        0
    } else if v > 100 {
        100
    } else {
        v as u8
    }
}

/// Convert HSL to 8-bit sRGB.
///
/// Standard piecewise chroma / hue-sector conversion; each channel is
/// rounded to the nearest byte.
#[must_use]
pub fn hsl_to_rgb(hsl: Hsl) -> Rgb {
    let s = f64::from(hsl.s) / 100.0;
    let l = f64::from(hsl.l) / 100.0;

    let c = (1.0 - 2.0f64.mul_add(l, -1.0).abs()) * s;
    let h_prime = f64::from(hsl.h) / 60.0;
    let x = c * (1.0 - (h_prime % 2.0 - 1.0).abs());

    let (r, g, b) = match hsl.h / 60 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    let m = l - c / 2.0;
    Rgb::new(to_byte(r + m), to_byte(g + m), to_byte(b + m))
}

/// Convert 8-bit sRGB to integer HSL.
///
/// The plain rounded conversion does not always reproduce the input bytes
/// (near black and white, a whole band of saturations maps to the same
/// RGB). When it misses, the neighbouring integer triples are searched for
/// one that converts back exactly, so the result is always a true preimage
/// whenever `rgb` came from an integer HSL value.
#[must_use]
pub fn rgb_to_hsl(rgb: Rgb) -> Hsl {
    let rounded = rgb_to_hsl_rounded(rgb);
    if hsl_to_rgb(rounded) == rgb {
        return rounded;
    }
    exact_preimage_near(rgb, rounded).unwrap_or(rounded)
}

/// Textbook RGB → HSL with each component rounded to an integer.
fn rgb_to_hsl_rounded(rgb: Rgb) -> Hsl {
    let max = rgb.r.max(rgb.g).max(rgb.b);
    let min = rgb.r.min(rgb.g).min(rgb.b);

    let (r, g, b) = rgb.to_srgb();
    let max_f = f64::from(max) / 255.0;
    let min_f = f64::from(min) / 255.0;
    let l = (max_f + min_f) / 2.0;

    if max == min {
        return Hsl::new(0, 0, round_i32(l * 100.0));
    }

    let d = max_f - min_f;
    let s = d / (1.0 - 2.0f64.mul_add(l, -1.0).abs());
    let h = if max == rgb.r {
        60.0 * ((g - b) / d).rem_euclid(6.0)
    } else if max == rgb.g {
        60.0 * ((b - r) / d + 2.0)
    } else {
        60.0 * ((r - g) / d + 4.0)
    };

    Hsl::new(round_i32(h), round_i32(s * 100.0), round_i32(l * 100.0))
}

/// Search around `start` for an integer HSL that converts to exactly `rgb`.
///
/// Saturation fans outward from the rounded value (it is the badly
/// conditioned axis near the lightness extremes); hue and lightness only
/// ever need a ±1 nudge.
fn exact_preimage_near(rgb: Rgb, start: Hsl) -> Option<Hsl> {
    let (h, s, l) = (i32::from(start.h), i32::from(start.s), i32::from(start.l));
    let saturation_deltas = std::iter::once(0).chain((1..=100).flat_map(|k| [-k, k]));

    for ds in saturation_deltas {
        let s2 = s + ds;
        if !(0..=100).contains(&s2) {
            continue;
        }
        for dl in [0, -1, 1] {
            let l2 = l + dl;
            if !(0..=100).contains(&l2) {
                continue;
            }
            for dh in [0, -1, 1] {
                let candidate = Hsl::new(h + dh, s2, l2);
                if hsl_to_rgb(candidate) == rgb {
                    return Some(candidate);
                }
            }
        }
    }
    None
}

/// Convert a single sRGB component (0.0–1.0) to linear light.
///
/// Uses the IEC 61966-2-1 breakpoint of 0.04045.
#[inline]
#[must_use]
pub fn srgb_to_linear(c: f64) -> f64 {
    if c <= 0.040_45 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

#[inline]
fn to_byte(v: f64) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

#[inline]
fn round_i32(v: f64) -> i32 {
    v.round() as i32
}

// ─── Tests ───────────────────────────────────────────────────────────────────
