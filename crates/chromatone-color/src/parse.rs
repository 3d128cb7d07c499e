// SPDX-License-Identifier: MIT
//
// Color string parsing.
//
// Accepted forms:
//
//   Hsl:  `hsl(210, 50%, 50%)`, `hsl(210 50% 50%)`, `210,50,50`
//   Rgb:  `#4080bf`, `4080bf`, `#48b`, `rgb(64, 128, 191)`
//
// HSL components are range-clamped the same way `Hsl::new` clamps them.
// RGB channels are bytes, so anything above 255 is an error rather than a
// silent clamp.

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::color::{Hsl, Rgb};

/// Why a color string was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseColorError {
    #[error("not an hsl color: {input:?} (expected `hsl(h, s%, l%)` or `h,s,l`)")]
    InvalidHsl { input: String },

    #[error("not an rgb color: {input:?} (expected `#rrggbb`, `#rgb` or `rgb(r, g, b)`)")]
    InvalidRgb { input: String },

    #[error("rgb channel out of range: {value} (must be 0-255)")]
    ChannelOutOfRange { value: u32 },
}

static HSL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^\s*(?:hsl\(\s*)?(-?\d{1,6})(?:deg)?\s*[,\s]\s*(\d{1,6})%?\s*[,\s]\s*(\d{1,6})%?\s*\)?\s*$",
    )
    .expect("hsl pattern is a valid regex")
});

static RGB_FN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*rgb\(\s*(\d{1,6})\s*[,\s]\s*(\d{1,6})\s*[,\s]\s*(\d{1,6})\s*\)\s*$")
        .expect("rgb pattern is a valid regex")
});

static HEX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*#?([0-9a-fA-F]{3}|[0-9a-fA-F]{6})\s*$").expect("hex pattern is a valid regex")
});

impl FromStr for Hsl {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseColorError::InvalidHsl {
            input: s.to_string(),
        };
        let caps = HSL_RE.captures(s).ok_or_else(invalid)?;
        let component = |i: usize| -> Result<i32, ParseColorError> {
            caps[i].parse::<i32>().map_err(|_| invalid())
        };
        Ok(Self::new(component(1)?, component(2)?, component(3)?))
    }
}

impl FromStr for Rgb {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(caps) = HEX_RE.captures(s) {
            return parse_hex_digits(&caps[1]).ok_or_else(|| ParseColorError::InvalidRgb {
                input: s.to_string(),
            });
        }

        let caps = RGB_FN_RE
            .captures(s)
            .ok_or_else(|| ParseColorError::InvalidRgb {
                input: s.to_string(),
            })?;
        let channel = |i: usize| -> Result<u8, ParseColorError> {
            let value: u32 = caps[i].parse().map_err(|_| ParseColorError::InvalidRgb {
                input: s.to_string(),
            })?;
            u8::try_from(value).map_err(|_| ParseColorError::ChannelOutOfRange { value })
        };
        Ok(Self::new(channel(1)?, channel(2)?, channel(3)?))
    }
}

/// Parse either an HSL or an RGB string into HSL.
///
/// Convenient for command-line input where users paste whatever their
/// color picker shows.
///
/// # Errors
///
/// Returns [`ParseColorError::InvalidHsl`] when the input is neither form,
/// or [`ParseColorError::ChannelOutOfRange`] for an `rgb()` with a channel
/// above 255.
pub fn parse_any(s: &str) -> Result<Hsl, ParseColorError> {
    if let Ok(hsl) = s.parse::<Hsl>() {
        return Ok(hsl);
    }
    match s.parse::<Rgb>() {
        Ok(rgb) => Ok(rgb.to_hsl()),
        Err(err @ ParseColorError::ChannelOutOfRange { .. }) => Err(err),
        Err(_) => Err(ParseColorError::InvalidHsl {
            input: s.to_string(),
        }),
    }
}

/// Decode 3 or 6 hex digits (already validated by [`HEX_RE`]).
fn parse_hex_digits(digits: &str) -> Option<Rgb> {
    let bytes = digits.as_bytes();
    match bytes.len() {
        3 => {
            let r = hex_digit(bytes[0])?;
            let g = hex_digit(bytes[1])?;
            let b = hex_digit(bytes[2])?;
            Some(Rgb::new(r << 4 | r, g << 4 | g, b << 4 | b))
        }
        6 => Some(Rgb::new(
            hex_byte(&bytes[0..2])?,
            hex_byte(&bytes[2..4])?,
            hex_byte(&bytes[4..6])?,
        )),
        _ => None,
    }
}

#[inline]
const fn hex_digit(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

#[inline]
fn hex_byte(bytes: &[u8]) -> Option<u8> {
    Some(hex_digit(bytes[0])? << 4 | hex_digit(bytes[1])?)
}

// ─── Tests ───────────────────────────────────────────────────────────────────
