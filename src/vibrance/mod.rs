/// Vibrance domain layer: state, level scale, errors, provider seam.
pub mod errors;
#[cfg(test)]
pub mod mock;
pub mod provider;
pub mod state;

pub use errors::VibranceError;
pub use provider::VibranceProvider;
pub use state::{Scale, VibranceState};
