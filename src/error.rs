// SPDX-License-Identifier: MIT
//
// Command-line error type. Every failure maps to a process exit code:
// 1 for usage and I/O problems, 2 when a theme fails validation.

use chromatone_color::ParseColorError;
use chromatone_theme::StoreError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

/// Exit code for a theme with contrast pairs below the threshold.
pub const EXIT_VALIDATION_FAILED: i32 = 2;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Color(#[from] ParseColorError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("unknown preset: {name} (see `chromatone presets`)")]
    UnknownPreset { name: String },

    #[error("configuration is incomplete: {missing} not set (pass --{flag} or load a preset)")]
    Incomplete { missing: &'static str, flag: &'static str },

    #[error("{failed} of {total} contrast pairs below {threshold:.2}:1 (pass --allow-failures to accept)")]
    ValidationFailed { failed: usize, total: usize, threshold: f64 },
}

impl AppError {
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::ValidationFailed { .. } => EXIT_VALIDATION_FAILED,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_failure_exits_with_two() {
        let error = AppError::ValidationFailed {
            failed: 1,
            total: 4,
            threshold: 7.0,
        };
        assert_eq!(error.exit_code(), 2);
        assert_eq!(
            error.to_string(),
            "1 of 4 contrast pairs below 7.00:1 (pass --allow-failures to accept)"
        );
    }

    #[test]
    fn other_errors_exit_with_one() {
        let error = AppError::UnknownPreset {
            name: "neon".to_string(),
        };
        assert_eq!(error.exit_code(), 1);
        assert!(error.to_string().contains("neon"));
    }
}
