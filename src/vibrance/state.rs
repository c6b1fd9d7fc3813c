/// Vibrance state snapshot and the raw/percent level scale.
use super::errors::VibranceError;

/// One reading of the digital vibrance control for a display.
///
/// Fetched once per invocation. `min <= current <= max` is reported by the
/// driver and taken as given.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VibranceState {
    /// Driver structure revision (`size_of(info) | 0x10000`).
    pub version: u32,
    pub current: i32,
    pub min: i32,
    pub max: i32,
}

impl VibranceState {
    /// Level `toggle` snaps to: `min` when above it, `max` otherwise.
    #[must_use]
    pub fn toggle_target(&self) -> i32 {
        if self.current > self.min {
            self.min
        } else {
            self.max
        }
    }

    /// Whether vibrance is raised above its minimum.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.current > self.min
    }

    /// Check a requested level against the bounds.
    ///
    /// Returns `Ok(true)` when the driver must be written, `Ok(false)` when the
    /// level is already current.
    ///
    /// # Errors
    ///
    /// Returns `VibranceError::OutOfRange` if `level` is outside `[min, max]`.
    pub fn check_level(&self, level: i32) -> Result<bool, VibranceError> {
        if level < self.min || level > self.max {
            return Err(VibranceError::OutOfRange {
                level,
                min: self.min,
                max: self.max,
            });
        }
        Ok(level != self.current)
    }
}

/// Units in which levels are read from the user and shown back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scale {
    /// Driver units, `[min, max]`.
    #[default]
    Raw,
    /// `[min, max]` mapped onto `[0, 100]`.
    Percent,
}

impl Scale {
    /// Convert a raw driver level into this scale.
    #[must_use]
    pub fn display(self, raw: i32, state: &VibranceState) -> i32 {
        match self {
            Self::Raw => raw,
            Self::Percent => {
                let span = f64::from(state.max) - f64::from(state.min);
                if span <= 0.0 {
                    return 0;
                }
                let ratio = (f64::from(raw) - f64::from(state.min)) / span;
                round_to_level(ratio * 100.0)
            }
        }
    }

    /// Parse user input in this scale and convert it to a raw driver level.
    ///
    /// Raw input must be a whole number; percent input may be fractional.
    /// Range is not checked here.
    ///
    /// # Errors
    ///
    /// Returns `VibranceError::InvalidLevel` if the input is not a finite number,
    /// or is fractional on the raw scale.
    pub fn parse(self, input: &str, state: &VibranceState) -> Result<i32, VibranceError> {
        let invalid = || VibranceError::InvalidLevel {
            input: input.to_owned(),
        };
        let value: f64 = input.trim().parse().map_err(|_| invalid())?;
        if !value.is_finite() || value.abs() > f64::from(i32::MAX) {
            return Err(invalid());
        }

        match self {
            Self::Raw => {
                if value.fract().abs() > 0.0 {
                    return Err(invalid());
                }
                Ok(round_to_level(value))
            }
            Self::Percent => {
                let span = f64::from(state.max) - f64::from(state.min);
                Ok(round_to_level(value / 100.0 * span + f64::from(state.min)))
            }
        }
    }
}

#[allow(clippy::cast_possible_truncation)]
fn round_to_level(value: f64) -> i32 {
    value
        .round()
        .clamp(f64::from(i32::MIN), f64::from(i32::MAX)) as i32
}
