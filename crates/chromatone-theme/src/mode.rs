//! Dark / light mode flag supplied by the host environment.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Which way the theme leans.
///
/// Dark mode puts dark backgrounds under light text; light mode the
/// reverse. Every lightness nudge in the engine is phrased relative to this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Light,
    Dark,
}

impl Mode {
    #[must_use]
    pub const fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }

    /// Build from the host's "prefers dark" boolean.
    #[must_use]
    pub const fn from_is_dark(is_dark: bool) -> Self {
        if is_dark { Self::Dark } else { Self::Light }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Signed lightness offset that moves a color `amount` toward the
    /// mode's extreme (down in dark mode, up in light mode).
    pub(crate) const fn toward_extreme(self, amount: i32) -> i32 {
        if self.is_dark() { -amount } else { amount }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(format!("unknown mode {other:?} (expected dark or light)")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_light() {
        assert_eq!(Mode::default(), Mode::Light);
    }

    #[test]
    fn from_is_dark_round_trips() {
        assert!(Mode::from_is_dark(true).is_dark());
        assert!(!Mode::from_is_dark(false).is_dark());
    }

    #[test]
    fn toward_extreme_sign() {
        assert_eq!(Mode::Dark.toward_extreme(10), -10);
        assert_eq!(Mode::Light.toward_extreme(10), 10);
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("DARK".parse::<Mode>(), Ok(Mode::Dark));
        assert_eq!("light".parse::<Mode>(), Ok(Mode::Light));
        assert!("dim".parse::<Mode>().is_err());
    }

    #[test]
    fn serde_lowercase() {
        assert_eq!(serde_json::to_string(&Mode::Dark).unwrap(), "\"dark\"");
        assert_eq!(serde_json::from_str::<Mode>("\"light\"").unwrap(), Mode::Light);
    }
}
