//! # chromatone-theme: Harmony and Contrast Engine
//!
//! Turns one base color and a harmony rule into a set of UI role colors
//! that meet a WCAG contrast target. Hue and saturation come from the
//! harmony; only lightness is ever adjusted for readability.
//!
//! # Architecture
//!
//! ```text
//! ThemeConfiguration (base color, rule, threshold, flags)
//!     │
//!     ▼
//! harmony.rs:    hue offsets → 1-4 palette colors (pure math)
//!     │
//!     ▼
//! roles.rs:      palette → background / text / border roles by size
//!     │
//!     ▼
//! resolver.rs:   nudge lightness per must-contrast pair (≤ 200 steps)
//!     │
//!     ▼
//! validation.rs: strict re-check, per role pair or all palette pairs
//!     │
//!     ▼
//! theme.rs / export.rs: ResolvedTheme and the ThemeDescription document
//! ```
//!
//! Contrast is always measured on 8-bit sRGB (`contrast.rs`). Persistence
//! lives behind the `KeyValueStore` trait in `store.rs`; nothing in the
//! engine keeps state between calls.

// Hue/lightness/saturation variable names are inherently similar.
#![allow(clippy::similar_names)]
// Tests compare ratios exactly against the WCAG constants.
#![allow(clippy::float_cmp)]

pub mod builtin;
pub mod config;
pub mod contrast;
pub mod export;
pub mod harmony;
pub mod mode;
pub mod resolver;
pub mod roles;
pub mod store;
pub mod theme;
pub mod validation;

pub use config::ThemeConfiguration;
pub use contrast::{Threshold, contrast_ratio, contrast_ratio_hsl, relative_luminance};
pub use export::ThemeDescription;
pub use harmony::HarmonyRule;
pub use mode::Mode;
pub use resolver::{Outcome, PairAdjustment, adjust_pair_for_contrast, high_contrast_variant};
pub use roles::{PaletteSize, Role, RoleMap, RoleSet, map_roles};
pub use store::{FileStore, KeyValueStore, MemoryStore, StoreError};
pub use theme::ResolvedTheme;
pub use validation::{ContrastCheck, ValidationReport, validate_mix_and_match, validate_roles};
