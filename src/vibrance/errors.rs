/// Errors from the vibrance domain layer.
use thiserror::Error;

use crate::nvapi::NvapiError;

/// Errors that can occur while reading or changing digital vibrance.
#[derive(Debug, Error)]
pub enum VibranceError {
    /// `--set` value is not a usable number.
    #[error("Invalid vibrance level '{input}'")]
    InvalidLevel {
        /// The raw user input.
        input: String,
    },

    /// Requested level lies outside the driver-reported bounds.
    #[error("Value out of range: {level} is not within [{min}, {max}]")]
    OutOfRange { level: i32, min: i32, max: i32 },

    /// The action is not part of the configured action set.
    #[error("Action '{action}' is not available in this mode")]
    UnsupportedAction {
        /// Lowercase action name.
        action: &'static str,
    },

    /// Writing command output failed.
    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),

    /// An underlying NVAPI error.
    #[error("{0}")]
    Driver(#[from] NvapiError),
}

/// Exit code mapping for `VibranceError` variants.
impl VibranceError {
    /// Return the CLI exit code for this error.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidLevel { .. } | Self::UnsupportedAction { .. } => 2,
            Self::OutOfRange { .. } => 4,
            Self::Io(_) => 1,
            Self::Driver(err) => {
                if err.is_unavailable() {
                    3
                } else {
                    1
                }
            }
        }
    }
}
