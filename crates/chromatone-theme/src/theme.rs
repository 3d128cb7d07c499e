//! Theme assembly: configuration in, resolved roles and report out.

use chromatone_color::Hsl;
use tracing::{debug, info};

use crate::config::ThemeConfiguration;
use crate::harmony::HarmonyRule;
use crate::mode::Mode;
use crate::roles::{RoleMap, map_roles};
use crate::validation::{ValidationReport, validate_mix_and_match, validate_roles};

/// A fully resolved theme for one mode.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedTheme {
    pub mode: Mode,
    /// Base color after hue offset and saturation scale.
    pub base: Hsl,
    pub rule: HarmonyRule,
    /// Raw harmony output, before role mapping.
    pub palette: Vec<Hsl>,
    pub roles: RoleMap,
    /// The numeric contrast target every pair was resolved against.
    pub threshold: f64,
    /// Role-pair report, or the all-pairs palette report in mix-and-match
    /// mode.
    pub validation: ValidationReport,
}

impl ResolvedTheme {
    /// Run the whole pipeline for `config`.
    ///
    /// Returns `None` until the configuration has both a base color and a
    /// harmony rule.
    #[must_use]
    pub fn resolve(config: &ThemeConfiguration, mode: Mode) -> Option<Self> {
        if !config.is_complete() {
            debug!("configuration incomplete, nothing to resolve");
            return None;
        }
        let base = config.effective_base()?;
        let rule = config.harmony_rule?;
        let palette = rule.generate(base);
        let threshold = config.threshold_ratio();
        let roles = map_roles(&palette, mode, threshold, config.force_black_white_text)?;

        let validation = if config.mix_and_match {
            validate_mix_and_match(&palette, threshold)
        } else {
            validate_roles(&roles, threshold)
        };

        info!(
            base = %base,
            %rule,
            %mode,
            threshold,
            valid = validation.is_valid,
            failed = validation.failed_pairs.len(),
            "theme resolved"
        );
        Some(Self {
            mode,
            base,
            rule,
            palette,
            roles,
            threshold,
            validation,
        })
    }

    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.validation.is_valid
    }
}
