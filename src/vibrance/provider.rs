/// The provider seam between the dispatcher and whatever owns vibrance state.
use super::errors::VibranceError;
use super::state::VibranceState;

/// Source of truth for a display's digital vibrance.
///
/// The real implementation is [`crate::nvapi::NvapiProvider`]. Every call is
/// synchronous and talks to the driver directly; nothing is cached between
/// calls.
pub trait VibranceProvider {
    /// Read version, current level and bounds.
    ///
    /// # Errors
    ///
    /// Returns `VibranceError::Driver` if the driver rejects the query.
    fn query(&self) -> Result<VibranceState, VibranceError>;

    /// Set an absolute level.
    ///
    /// # Errors
    ///
    /// Returns `VibranceError::OutOfRange` or `VibranceError::Driver`.
    fn set(&mut self, level: i32) -> Result<(), VibranceError>;

    /// Snap between minimum and maximum.
    ///
    /// # Errors
    ///
    /// Returns `VibranceError::Driver` on driver failure.
    fn toggle(&mut self) -> Result<(), VibranceError>;

    /// Snap to maximum.
    ///
    /// # Errors
    ///
    /// Returns `VibranceError::Driver` on driver failure.
    fn enable(&mut self) -> Result<(), VibranceError>;

    /// Snap to minimum.
    ///
    /// # Errors
    ///
    /// Returns `VibranceError::Driver` on driver failure.
    fn disable(&mut self) -> Result<(), VibranceError>;
}
