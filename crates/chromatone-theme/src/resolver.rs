//! Contrast resolution: nudge lightness until a pair is readable.
//!
//! Two searches live here. [`adjust_pair_for_contrast`] may move both
//! colors of a (foreground, background) pair; [`high_contrast_variant`]
//! derives a text color from a background alone. Both only ever touch HSL
//! lightness, keep it inside the safe band [`SAFE_MIN`]..=[`SAFE_MAX`], and
//! give up after [`MAX_STEPS`] single-unit moves.
//!
//! Resolution is best-effort. Running out of room or steps is a normal
//! [`Outcome`], not an error; callers decide whether the final ratio is
//! good enough (see [`crate::validation`]).

use chromatone_color::Hsl;
use serde::Serialize;
use tracing::debug;

use crate::contrast::contrast_ratio_hsl;
use crate::mode::Mode;

/// Darkest lightness the resolver will produce.
pub const SAFE_MIN: u8 = 2;
/// Lightest lightness the resolver will produce.
pub const SAFE_MAX: u8 = 98;
/// Hard cap on single-unit lightness moves per search.
pub const MAX_STEPS: u32 = 200;

/// How a pair adjustment terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Outcome {
    /// The input pair already met the threshold and was returned as-is.
    AlreadyMet,
    /// Lightness moves brought the pair up to the threshold.
    Converged,
    /// Both colors reached their extremes without meeting the threshold.
    Pinned,
    /// The step budget ran out first.
    Exhausted,
}

impl Outcome {
    #[must_use]
    pub const fn is_met(self) -> bool {
        matches!(self, Self::AlreadyMet | Self::Converged)
    }
}

/// Result of [`adjust_pair_for_contrast`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairAdjustment {
    pub fg: Hsl,
    pub bg: Hsl,
    /// Contrast ratio of the returned pair.
    pub ratio: f64,
    /// Number of single-unit moves made.
    pub steps: u32,
    pub outcome: Outcome,
}

// ---------------------------------------------------------------------------
// Pair adjustment
// ---------------------------------------------------------------------------

/// Move `fg` and `bg` apart in lightness until their contrast reaches
/// `threshold`.
///
/// Each step moves the color whose lightness is closer to 50 (ties move the
/// foreground) one unit toward its extreme: in dark mode backgrounds head
/// for [`SAFE_MIN`] and foregrounds for [`SAFE_MAX`], in light mode the
/// reverse. A color already at its extreme hands the move to the other.
///
/// A pair that already meets the threshold comes back unchanged, even when
/// its lightness lies outside the safe band. Otherwise both lightnesses are
/// clamped into the band before the first step.
#[must_use]
pub fn adjust_pair_for_contrast(fg: Hsl, bg: Hsl, mode: Mode, threshold: f64) -> PairAdjustment {
    let initial = contrast_ratio_hsl(fg, bg);
    if initial >= threshold {
        return PairAdjustment {
            fg,
            bg,
            ratio: initial,
            steps: 0,
            outcome: Outcome::AlreadyMet,
        };
    }

    let (fg_target, bg_target) = if mode.is_dark() {
        (SAFE_MAX, SAFE_MIN)
    } else {
        (SAFE_MIN, SAFE_MAX)
    };
    let mut fg = clamp_to_band(fg);
    let mut bg = clamp_to_band(bg);
    let mut steps = 0;

    let outcome = loop {
        if contrast_ratio_hsl(fg, bg) >= threshold {
            break Outcome::Converged;
        }
        let fg_pinned = fg.l() == fg_target;
        let bg_pinned = bg.l() == bg_target;
        if fg_pinned && bg_pinned {
            break Outcome::Pinned;
        }
        if steps >= MAX_STEPS {
            break Outcome::Exhausted;
        }

        let fg_closer = distance_from_mid(fg) <= distance_from_mid(bg);
        let move_fg = if fg_closer { !fg_pinned } else { bg_pinned };
        if move_fg {
            fg = step_toward(fg, fg_target);
        } else {
            bg = step_toward(bg, bg_target);
        }
        steps += 1;
    };

    let ratio = contrast_ratio_hsl(fg, bg);
    debug!(
        fg = %fg,
        bg = %bg,
        ratio,
        threshold,
        steps,
        ?outcome,
        "contrast pair resolved"
    );
    PairAdjustment {
        fg,
        bg,
        ratio,
        steps,
        outcome,
    }
}

// ---------------------------------------------------------------------------
// High-contrast variant
// ---------------------------------------------------------------------------

/// Result of [`high_contrast_search`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HighContrastSearch {
    /// The text color: the background's hue and saturation at the chosen
    /// lightness.
    pub text: Hsl,
    /// Contrast of `text` against the original background.
    pub ratio: f64,
    /// Probe moves made before the search stopped.
    pub steps: u32,
}

/// A text color for `background` with the same hue and saturation.
///
/// See [`high_contrast_search`] for the details.
#[must_use]
pub fn high_contrast_variant(background: Hsl, mode: Mode, threshold: f64) -> Hsl {
    high_contrast_search(background, mode, threshold).text
}

/// Pick a text lightness at the far end of the safe band from
/// `background`.
///
/// A background counts as light above 50, or at exactly 50 in light mode.
/// Light backgrounds get text at [`SAFE_MIN`], dark ones at [`SAFE_MAX`].
///
/// The search then walks a probe copy of the background toward its own
/// extreme, one unit per step, moving whichever of text and probe is
/// farther from its extreme, until the contrast clears `threshold`, a band
/// edge is reached, or [`MAX_STEPS`] run out. The text starts at its
/// extreme, so in practice only the probe moves and the text is returned
/// as first picked.
#[must_use]
pub fn high_contrast_search(background: Hsl, mode: Mode, threshold: f64) -> HighContrastSearch {
    let is_light = background.l() > 50 || (background.l() == 50 && !mode.is_dark());
    let (text_target, probe_target) = if is_light {
        (SAFE_MIN, SAFE_MAX)
    } else {
        (SAFE_MAX, SAFE_MIN)
    };

    let mut text = background.with_lightness(i32::from(text_target));
    let mut probe = background;
    let mut steps = 0;

    while steps < MAX_STEPS && contrast_ratio_hsl(text, probe) < threshold {
        let text_gap = text.l().abs_diff(text_target);
        let probe_gap = probe.l().abs_diff(probe_target);
        if text_gap == 0 && probe_gap == 0 {
            break;
        }
        if text_gap >= probe_gap {
            text = step_toward(text, text_target);
        } else {
            probe = step_toward(probe, probe_target);
        }
        steps += 1;
        if !in_band(text) || !in_band(probe) || probe.l() == probe_target {
            break;
        }
    }

    let ratio = contrast_ratio_hsl(text, background);
    debug!(background = %background, text = %text, ratio, steps, "high-contrast variant");
    HighContrastSearch { text, ratio, steps }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn clamp_to_band(color: Hsl) -> Hsl {
    color.with_lightness(i32::from(color.l().clamp(SAFE_MIN, SAFE_MAX)))
}

const fn in_band(color: Hsl) -> bool {
    color.l() >= SAFE_MIN && color.l() <= SAFE_MAX
}

const fn distance_from_mid(color: Hsl) -> u8 {
    color.l().abs_diff(50)
}

/// One lightness unit toward `target` (no-op when already there).
fn step_toward(color: Hsl, target: u8) -> Hsl {
    match color.l().cmp(&target) {
        std::cmp::Ordering::Less => color.lighten(1),
        std::cmp::Ordering::Greater => color.darken(1),
        std::cmp::Ordering::Equal => color,
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    use crate::contrast::{WCAG_AA_NORMAL, WCAG_AAA_NORMAL};

    // ── adjust_pair_for_contrast ─────────────────────────────────────

    #[test]
    fn already_met_is_untouched() {
        let fg = Hsl::new(0, 0, 100);
        let bg = Hsl::new(0, 0, 0);
        let adj = adjust_pair_for_contrast(fg, bg, Mode::Dark, WCAG_AAA_NORMAL);
        assert_eq!(adj.outcome, Outcome::AlreadyMet);
        assert_eq!(adj.steps, 0);
        // Outside the safe band, still returned as-is.
        assert_eq!(adj.fg, fg);
        assert_eq!(adj.bg, bg);
        assert_eq!(adj.ratio, 21.0);
    }

    #[test]
    fn dark_pair_converges() {
        // Light foreground, mid background: the background is closer to 50,
        // so it darkens until the pair clears 7:1.
        let adj = adjust_pair_for_contrast(
            Hsl::new(210, 50, 78),
            Hsl::new(210, 50, 30),
            Mode::Dark,
            WCAG_AAA_NORMAL,
        );
        assert_eq!(adj.outcome, Outcome::Converged);
        assert_eq!(adj.fg, Hsl::new(210, 50, 79));
        assert_eq!(adj.bg, Hsl::new(210, 50, 22));
        assert_eq!(adj.steps, 9);
        assert!(adj.ratio >= WCAG_AAA_NORMAL);
    }

    #[test]
    fn hue_and_saturation_never_change() {
        let fg = Hsl::new(33, 71, 45);
        let bg = Hsl::new(301, 12, 55);
        for mode in [Mode::Dark, Mode::Light] {
            let adj = adjust_pair_for_contrast(fg, bg, mode, WCAG_AA_NORMAL);
            assert_eq!((adj.fg.h(), adj.fg.s()), (33, 71));
            assert_eq!((adj.bg.h(), adj.bg.s()), (301, 12));
        }
    }

    #[test]
    fn light_mode_moves_toward_light_background() {
        let adj = adjust_pair_for_contrast(
            Hsl::new(0, 0, 50),
            Hsl::new(0, 0, 50),
            Mode::Light,
            WCAG_AA_NORMAL,
        );
        assert!(adj.outcome.is_met());
        assert!(adj.fg.l() < 50, "fg should darken: {}", adj.fg);
        assert!(adj.bg.l() >= 50, "bg should not darken: {}", adj.bg);
    }

    #[test]
    fn unreachable_target_pins_both() {
        let adj = adjust_pair_for_contrast(
            Hsl::new(0, 0, 50),
            Hsl::new(0, 0, 50),
            Mode::Dark,
            21.0,
        );
        assert_eq!(adj.outcome, Outcome::Pinned);
        assert_eq!(adj.fg.l(), SAFE_MAX);
        assert_eq!(adj.bg.l(), SAFE_MIN);
        assert!(adj.ratio < 21.0);
        assert!(adj.steps <= MAX_STEPS);
    }

    #[test]
    fn out_of_band_input_is_clamped_first() {
        // Same-lightness pair at 100 fails every threshold above 1.
        let adj = adjust_pair_for_contrast(
            Hsl::new(0, 0, 100),
            Hsl::new(0, 0, 100),
            Mode::Light,
            WCAG_AA_NORMAL,
        );
        assert!(adj.fg.l() >= SAFE_MIN && adj.fg.l() <= SAFE_MAX);
        assert_eq!(adj.bg.l(), SAFE_MAX);
        assert!(adj.outcome.is_met());
    }

    #[test]
    fn threshold_of_one_is_always_met() {
        let c = Hsl::new(120, 40, 40);
        let adj = adjust_pair_for_contrast(c, c, Mode::Dark, 1.0);
        assert_eq!(adj.outcome, Outcome::AlreadyMet);
    }

    #[test]
    fn never_exceeds_step_budget() {
        for fg_l in (0..=100).step_by(10) {
            for bg_l in (0..=100).step_by(10) {
                for mode in [Mode::Dark, Mode::Light] {
                    let adj = adjust_pair_for_contrast(
                        Hsl::new(60, 100, fg_l),
                        Hsl::new(240, 100, bg_l),
                        mode,
                        18.0,
                    );
                    assert!(adj.steps <= MAX_STEPS);
                    if adj.outcome != Outcome::AlreadyMet {
                        assert!(in_band(adj.fg) && in_band(adj.bg));
                    }
                }
            }
        }
    }

    // ── high_contrast_variant ────────────────────────────────────────

    #[test]
    fn variant_for_dark_background_is_light() {
        let text = high_contrast_variant(Hsl::new(210, 50, 30), Mode::Dark, WCAG_AAA_NORMAL);
        assert_eq!(text, Hsl::new(210, 50, 98));
    }

    #[test]
    fn variant_for_light_background_is_dark() {
        let text = high_contrast_variant(Hsl::new(210, 50, 78), Mode::Light, WCAG_AAA_NORMAL);
        assert_eq!(text, Hsl::new(210, 50, 2));
    }

    #[test]
    fn variant_midpoint_follows_mode() {
        let mid = Hsl::new(90, 20, 50);
        assert_eq!(high_contrast_variant(mid, Mode::Light, 4.5).l(), SAFE_MIN);
        assert_eq!(high_contrast_variant(mid, Mode::Dark, 4.5).l(), SAFE_MAX);
    }

    #[test]
    fn variant_search_exits_immediately_when_met() {
        let search = high_contrast_search(Hsl::new(0, 0, 10), Mode::Dark, WCAG_AA_NORMAL);
        assert_eq!(search.steps, 0);
        assert!(search.ratio >= WCAG_AA_NORMAL);
    }

    #[test]
    fn variant_search_keeps_first_pick_when_unreachable() {
        let bg = Hsl::new(0, 0, 55);
        let search = high_contrast_search(bg, Mode::Dark, 21.0);
        assert_eq!(search.text, Hsl::new(0, 0, SAFE_MIN.into()));
        assert!(search.steps > 0 && search.steps <= MAX_STEPS);
    }
}
