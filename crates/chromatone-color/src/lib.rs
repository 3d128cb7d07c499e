// SPDX-License-Identifier: MIT
//
// chromatone-color: color value types for chromatone.
//
// Two immutable types carry every color through the engine: `Hsl` (integer
// degrees and percent, the space all harmony and contrast adjustments
// happen in) and `Rgb` (8-bit sRGB, the space contrast is measured and
// presented in). This crate owns the conversions between them, the CSS
// string forms a presentation layer consumes, and parsing of the strings
// users type.
//
// Everything here is pure math over `Copy` values. There is no I/O and no
// shared state.

// Channel math narrows f64 → u8 and i32 → u16/u8 after explicit clamping.
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
// `From` is not const; widening casts in const fns use `as`.
#![allow(clippy::cast_lossless)]

pub mod color;
pub mod parse;

pub use color::{Hsl, Rgb, hsl_to_rgb, normalize_hue, rgb_to_hsl, srgb_to_linear};
pub use parse::{ParseColorError, parse_any};
