/// `--get`: report the current level and its bounds.
use crate::types::LevelsOutput;
use crate::vibrance::{Scale, VibranceState};

/// Run `nvdv --get`. Never touches the provider; the state is already read.
#[must_use]
pub fn run(state: &VibranceState, scale: Scale) -> LevelsOutput {
    LevelsOutput {
        version: state.version,
        current: scale.display(state.current, state),
        min: scale.display(state.min, state),
        max: scale.display(state.max, state),
    }
}
