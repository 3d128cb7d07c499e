//! Role mapping: from a harmony palette to named UI slots.
//!
//! The mapping depends on how many swatches the harmony produced. Smaller
//! palettes derive the missing slots from the ones they have:
//!
//! ```text
//!  N │ background-primary │ background-secondary │ text-primary       │ border-accent
//! ───┼────────────────────┼──────────────────────┼────────────────────┼──────────────────
//!  1 │ bg(c0)             │ bgp toward midpoint  │ variant of bgp     │ shade(c0, 10)
//!  2 │ bg(c0)             │ bg(c1)               │ variant of bgp     │ shade(bgp, 10)
//!  3 │ bg(c0)             │ bg(c1)               │ fg(c2)             │ shade(bgs, 10)
//!  4 │ bg(c0)             │ bg(c1)               │ fg(c2)             │ c3 (+ accent-glow)
//! ```
//!
//! `text-secondary` is always `shade(text-primary, 20)`. When black/white
//! text is forced, `text-primary` is pure white in dark mode and pure black
//! in light mode. Every must-contrast pair is then passed through
//! [`adjust_pair_for_contrast`] in a fixed order, each adjustment feeding
//! the next, and the list is repeated until a full pass leaves every slot
//! where it was.

use std::fmt;

use bitflags::bitflags;
use chromatone_color::Hsl;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::mode::Mode;
use crate::resolver::{MAX_STEPS, adjust_pair_for_contrast, high_contrast_variant};

/// Lightness shift applied by mode adjustment.
const MODE_SHIFT: i32 = 20;
/// Lightness shift from `text-primary` to `text-secondary`.
const TEXT_SECONDARY_SHADE: i32 = 20;
/// Lightness shift for derived borders and secondary backgrounds.
const BORDER_SHADE: i32 = 10;
/// Cap on resolution passes over the pair list. Once inside the safe band
/// text only moves toward one extreme and backgrounds toward the other, so
/// the passes settle long before this.
const MAX_PASSES: u32 = 4 * MAX_STEPS;

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

/// A semantic UI slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    BackgroundPrimary,
    BackgroundSecondary,
    TextPrimary,
    TextSecondary,
    BorderAccent,
    /// Only populated for four-color palettes.
    AccentGlow,
}

impl Role {
    pub const ALL: [Self; 6] = [
        Self::BackgroundPrimary,
        Self::BackgroundSecondary,
        Self::TextPrimary,
        Self::TextSecondary,
        Self::BorderAccent,
        Self::AccentGlow,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::BackgroundPrimary => "background-primary",
            Self::BackgroundSecondary => "background-secondary",
            Self::TextPrimary => "text-primary",
            Self::TextSecondary => "text-secondary",
            Self::BorderAccent => "border-accent",
            Self::AccentGlow => "accent-glow",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.name() == name)
    }

    /// The single-bit [`RoleSet`] for this role.
    #[must_use]
    pub const fn flag(self) -> RoleSet {
        match self {
            Self::BackgroundPrimary => RoleSet::BACKGROUND_PRIMARY,
            Self::BackgroundSecondary => RoleSet::BACKGROUND_SECONDARY,
            Self::TextPrimary => RoleSet::TEXT_PRIMARY,
            Self::TextSecondary => RoleSet::TEXT_SECONDARY,
            Self::BorderAccent => RoleSet::BORDER_ACCENT,
            Self::AccentGlow => RoleSet::ACCENT_GLOW,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

bitflags! {
    /// Which roles a [`RoleMap`] populates.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct RoleSet: u8 {
        const BACKGROUND_PRIMARY   = 1 << 0;
        const BACKGROUND_SECONDARY = 1 << 1;
        const TEXT_PRIMARY         = 1 << 2;
        const TEXT_SECONDARY       = 1 << 3;
        const BORDER_ACCENT        = 1 << 4;
        const ACCENT_GLOW          = 1 << 5;

        /// Populated for every palette size.
        const CORE = Self::BACKGROUND_PRIMARY.bits()
            | Self::BACKGROUND_SECONDARY.bits()
            | Self::TEXT_PRIMARY.bits()
            | Self::TEXT_SECONDARY.bits()
            | Self::BORDER_ACCENT.bits();
    }
}

// ---------------------------------------------------------------------------
// PaletteSize
// ---------------------------------------------------------------------------

/// Palette cardinality, the switch the whole mapping hangs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaletteSize {
    One,
    Two,
    Three,
    Four,
}

impl PaletteSize {
    /// `None` for an empty palette; anything past four counts as four.
    #[must_use]
    pub const fn from_len(len: usize) -> Option<Self> {
        match len {
            0 => None,
            1 => Some(Self::One),
            2 => Some(Self::Two),
            3 => Some(Self::Three),
            _ => Some(Self::Four),
        }
    }

    #[must_use]
    #[allow(clippy::len_without_is_empty)]
    pub const fn len(self) -> usize {
        match self {
            Self::One => 1,
            Self::Two => 2,
            Self::Three => 3,
            Self::Four => 4,
        }
    }

    /// Roles populated at this size.
    #[must_use]
    pub const fn roles(self) -> RoleSet {
        match self {
            Self::Four => RoleSet::CORE.union(RoleSet::ACCENT_GLOW),
            _ => RoleSet::CORE,
        }
    }

    /// (foreground, background) pairs that must meet the threshold, in
    /// resolution order.
    #[must_use]
    pub const fn must_contrast_pairs(self) -> &'static [(Role, Role)] {
        use Role::{BackgroundPrimary as Bgp, BackgroundSecondary as Bgs};
        use Role::{TextPrimary as Tp, TextSecondary as Ts};
        match self {
            Self::One => &[(Tp, Bgp), (Ts, Bgp)],
            Self::Two => &[(Tp, Bgp), (Ts, Bgp), (Tp, Bgs)],
            Self::Three | Self::Four => &[(Tp, Bgp), (Ts, Bgp), (Tp, Bgs), (Ts, Bgs)],
        }
    }
}

// ---------------------------------------------------------------------------
// RoleMap
// ---------------------------------------------------------------------------

/// Resolved colors for every role a palette populates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleMap {
    pub size: PaletteSize,
    pub background_primary: Hsl,
    pub background_secondary: Hsl,
    pub text_primary: Hsl,
    pub text_secondary: Hsl,
    pub border_accent: Hsl,
    pub accent_glow: Option<Hsl>,
}

impl RoleMap {
    /// The color for `role`, if this map populates it.
    #[must_use]
    pub const fn get(&self, role: Role) -> Option<Hsl> {
        match role {
            Role::BackgroundPrimary => Some(self.background_primary),
            Role::BackgroundSecondary => Some(self.background_secondary),
            Role::TextPrimary => Some(self.text_primary),
            Role::TextSecondary => Some(self.text_secondary),
            Role::BorderAccent => Some(self.border_accent),
            Role::AccentGlow => self.accent_glow,
        }
    }

    fn slot_mut(&mut self, role: Role) -> Option<&mut Hsl> {
        match role {
            Role::BackgroundPrimary => Some(&mut self.background_primary),
            Role::BackgroundSecondary => Some(&mut self.background_secondary),
            Role::TextPrimary => Some(&mut self.text_primary),
            Role::TextSecondary => Some(&mut self.text_secondary),
            Role::BorderAccent => Some(&mut self.border_accent),
            Role::AccentGlow => self.accent_glow.as_mut(),
        }
    }

    /// Roles that currently hold a color.
    #[must_use]
    pub fn roles(&self) -> RoleSet {
        Role::ALL
            .into_iter()
            .filter(|&r| self.get(r).is_some())
            .fold(RoleSet::empty(), |set, r| set | r.flag())
    }

    /// Populated (role, color) entries in [`Role::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (Role, Hsl)> + '_ {
        Role::ALL.into_iter().filter_map(|r| self.get(r).map(|c| (r, c)))
    }

    /// The must-contrast pairs with their current colors.
    #[must_use]
    pub fn contrast_pairs(&self) -> Vec<((Role, Hsl), (Role, Hsl))> {
        self.size
            .must_contrast_pairs()
            .iter()
            .filter_map(|&(fg, bg)| Some(((fg, self.get(fg)?), (bg, self.get(bg)?))))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Mapping
// ---------------------------------------------------------------------------

/// Map `palette` onto UI roles and resolve every must-contrast pair.
///
/// Returns `None` for an empty palette. Only the first four colors are
/// used. Resolution is best-effort: a pair that cannot reach `threshold`
/// keeps its closest attempt, and [`crate::validation::validate_roles`]
/// reports it.
#[must_use]
pub fn map_roles(palette: &[Hsl], mode: Mode, threshold: f64, force_black_white: bool) -> Option<RoleMap> {
    let size = PaletteSize::from_len(palette.len())?;
    let mut map = initial_roles(palette, size, mode, threshold, force_black_white);

    let mut passes = 0;
    while passes < MAX_PASSES {
        passes += 1;
        if !resolve_pairs(&mut map, mode, threshold) {
            break;
        }
    }

    debug!(?size, %mode, threshold, force_black_white, passes, "roles mapped");
    Some(map)
}

/// One pass over the must-contrast pairs. Returns whether any slot moved.
///
/// Pairs share roles, so an adjustment can lower the ratio of a pair
/// resolved earlier in the same pass (clamping `background-primary` from 0
/// to 2, say). The caller repeats passes until nothing moves.
fn resolve_pairs(map: &mut RoleMap, mode: Mode, threshold: f64) -> bool {
    let mut changed = false;
    for &(fg_role, bg_role) in map.size.must_contrast_pairs() {
        let (Some(fg), Some(bg)) = (map.get(fg_role), map.get(bg_role)) else {
            continue;
        };
        let adj = adjust_pair_for_contrast(fg, bg, mode, threshold);
        if adj.fg == fg && adj.bg == bg {
            continue;
        }
        changed = true;
        if let Some(slot) = map.slot_mut(fg_role) {
            *slot = adj.fg;
        }
        if let Some(slot) = map.slot_mut(bg_role) {
            *slot = adj.bg;
        }
    }
    changed
}

/// The unresolved role assignment, before any contrast pass.
fn initial_roles(palette: &[Hsl], size: PaletteSize, mode: Mode, threshold: f64, force_bw: bool) -> RoleMap {
    let c0 = palette[0];
    let background_primary = as_background(c0, mode);

    let background_secondary = match size {
        PaletteSize::One => shift(background_primary, -mode.toward_extreme(BORDER_SHADE)),
        _ => as_background(palette[1], mode),
    };

    let forced_text = if mode.is_dark() { Hsl::WHITE } else { Hsl::BLACK };
    let text_primary = match size {
        _ if force_bw => forced_text,
        PaletteSize::One | PaletteSize::Two => high_contrast_variant(background_primary, mode, threshold),
        PaletteSize::Three | PaletteSize::Four => as_foreground(palette[2], mode),
    };
    let text_secondary = shade(text_primary, mode, TEXT_SECONDARY_SHADE);

    let (border_accent, accent_glow) = match size {
        PaletteSize::One => (shade(c0, mode, BORDER_SHADE), None),
        PaletteSize::Two => (shade(background_primary, mode, BORDER_SHADE), None),
        PaletteSize::Three => (shade(background_secondary, mode, BORDER_SHADE), None),
        PaletteSize::Four => (palette[3], Some(palette[3])),
    };

    RoleMap {
        size,
        background_primary,
        background_secondary,
        text_primary,
        text_secondary,
        border_accent,
        accent_glow,
    }
}

/// Background use: push toward the mode's extreme.
fn as_background(color: Hsl, mode: Mode) -> Hsl {
    shift(color, mode.toward_extreme(MODE_SHIFT))
}

/// Foreground use: push away from the mode's extreme.
fn as_foreground(color: Hsl, mode: Mode) -> Hsl {
    shift(color, -mode.toward_extreme(MODE_SHIFT))
}

fn shade(color: Hsl, mode: Mode, amount: i32) -> Hsl {
    shift(color, mode.toward_extreme(amount))
}

fn shift(color: Hsl, delta: i32) -> Hsl {
    color.with_lightness(i32::from(color.l()) + delta)
}
