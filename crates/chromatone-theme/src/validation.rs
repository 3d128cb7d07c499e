//! Strict re-checking of resolved colors.
//!
//! Resolution is best-effort; this module is where a pair that fell short
//! becomes visible. Two modes:
//!
//! - [`validate_roles`] re-checks the must-contrast role pairs of a
//!   [`RoleMap`], the same list the mapper resolved.
//! - [`validate_mix_and_match`] checks every ordered pair of raw palette
//!   colors, with no role mapping or resolution in between.

use chromatone_color::Hsl;
use serde::Serialize;

use crate::contrast::{ContrastGrade, contrast_ratio_hsl};
use crate::roles::RoleMap;

/// One (foreground, background) measurement.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContrastCheck {
    /// Role name, or `color-N` in mix-and-match mode.
    pub foreground: String,
    pub background: String,
    pub fg: Hsl,
    pub bg: Hsl,
    pub ratio: f64,
    pub required: f64,
}

impl ContrastCheck {
    #[must_use]
    pub fn new(foreground: impl Into<String>, fg: Hsl, background: impl Into<String>, bg: Hsl, required: f64) -> Self {
        Self {
            foreground: foreground.into(),
            background: background.into(),
            fg,
            bg,
            ratio: contrast_ratio_hsl(fg, bg),
            required,
        }
    }

    #[must_use]
    pub fn passes(&self) -> bool {
        self.ratio >= self.required
    }

    /// How far below the requirement the ratio is (0 when passing).
    #[must_use]
    pub fn shortfall(&self) -> f64 {
        (self.required - self.ratio).max(0.0)
    }

    #[must_use]
    pub fn grade(&self) -> ContrastGrade {
        ContrastGrade::from_ratio(self.ratio)
    }
}

/// Outcome of a validation pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub is_valid: bool,
    pub failed_pairs: Vec<ContrastCheck>,
    pub all_pairs: Vec<ContrastCheck>,
}

impl ValidationReport {
    fn from_checks(all_pairs: Vec<ContrastCheck>) -> Self {
        let failed_pairs: Vec<ContrastCheck> = all_pairs.iter().filter(|c| !c.passes()).cloned().collect();
        Self {
            is_valid: failed_pairs.is_empty(),
            failed_pairs,
            all_pairs,
        }
    }

    /// One line per failing pair, e.g.
    /// `text-secondary on background-primary: 3.21:1 < 4.50:1`.
    #[must_use]
    pub fn summary(&self) -> String {
        self.failed_pairs
            .iter()
            .map(|check| {
                format!(
                    "{} on {}: {:.2}:1 < {:.2}:1\n",
                    check.foreground, check.background, check.ratio, check.required
                )
            })
            .collect()
    }
}

/// Re-check the must-contrast pairs of `roles` against `threshold`.
#[must_use]
pub fn validate_roles(roles: &RoleMap, threshold: f64) -> ValidationReport {
    let checks = roles
        .contrast_pairs()
        .into_iter()
        .map(|((fg_role, fg), (bg_role, bg))| ContrastCheck::new(fg_role.name(), fg, bg_role.name(), bg, threshold))
        .collect();
    ValidationReport::from_checks(checks)
}

/// Check every ordered pair `(i, j)`, `i != j`, of `palette`.
///
/// Colors are labelled `color-1`, `color-2`, ... by position.
#[must_use]
pub fn validate_mix_and_match(palette: &[Hsl], threshold: f64) -> ValidationReport {
    let label = |i: usize| format!("color-{}", i + 1);
    let mut checks = Vec::with_capacity(palette.len() * palette.len().saturating_sub(1));
    for (i, &fg) in palette.iter().enumerate() {
        for (j, &bg) in palette.iter().enumerate() {
            if i != j {
                checks.push(ContrastCheck::new(label(i), fg, label(j), bg, threshold));
            }
        }
    }
    ValidationReport::from_checks(checks)
}
