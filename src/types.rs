/// Shared serializable output types for all actions.
///
/// These types are what gets written to stdout, either as JSON or rendered
/// as text/table. Levels are already converted to the requested scale.
use serde::Serialize;

/// Result of `--get`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LevelsOutput {
    /// Driver DVC structure version.
    pub version: u32,
    /// Current level.
    pub current: i32,
    /// Lowest accepted level.
    pub min: i32,
    /// Highest accepted level.
    pub max: i32,
}

/// Result of a mutating action (set, toggle, enable, disable).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransitionOutput {
    /// Capitalized action label, e.g. "Toggle".
    pub action: String,
    /// Level read before the action.
    pub from: i32,
    /// Level the action moves to.
    pub to: i32,
    /// Whether the provider was actually called (`false` when already there).
    pub applied: bool,
}

/// A structured error envelope for JSON error output.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorOutput {
    /// Always `false`.
    pub ok: bool,
    /// Error details.
    pub error: ErrorDetail,
}

/// Error detail in the JSON error envelope.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorDetail {
    /// Machine-readable error code (`snake_case`).
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

impl ErrorOutput {
    /// Construct from a `VibranceError`.
    #[must_use]
    pub fn from_vibrance_error(err: &crate::vibrance::VibranceError) -> Self {
        use crate::vibrance::VibranceError;
        let code = match err {
            VibranceError::InvalidLevel { .. } => "invalid_level",
            VibranceError::OutOfRange { .. } => "out_of_range",
            VibranceError::UnsupportedAction { .. } => "unsupported_action",
            VibranceError::Io(_) => "io_error",
            VibranceError::Driver(e) if e.is_unavailable() => "driver_unavailable",
            VibranceError::Driver(_) => "driver_error",
        };
        Self {
            ok: false,
            error: ErrorDetail {
                code: code.to_owned(),
                message: err.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nvapi::NvapiError;
    use crate::vibrance::VibranceError;

    #[test]
    fn test_error_envelope_codes() {
        let out = ErrorOutput::from_vibrance_error(&VibranceError::InvalidLevel {
            input: "abc".to_owned(),
        });
        assert!(!out.ok);
        assert_eq!(out.error.code, "invalid_level");
        assert_eq!(out.error.message, "Invalid vibrance level 'abc'");

        let out = ErrorOutput::from_vibrance_error(&VibranceError::Driver(
            NvapiError::FunctionUnavailable {
                name: "NvAPI_Initialize",
            },
        ));
        assert_eq!(out.error.code, "driver_unavailable");
    }

    #[test]
    fn test_transition_json_shape() {
        let t = TransitionOutput {
            action: "Set".to_owned(),
            from: 50,
            to: 75,
            applied: true,
        };
        assert_eq!(
            serde_json::to_string(&t).unwrap(),
            r#"{"action":"Set","from":50,"to":75,"applied":true}"#
        );
    }
}
