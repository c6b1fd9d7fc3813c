/// `--set <VALUE>`: move to an absolute level.
use crate::cli::OutputCtx;
use crate::types::TransitionOutput;
use crate::vibrance::{Scale, VibranceError, VibranceProvider, VibranceState};

/// Run `nvdv --set <VALUE>`.
///
/// The provider is only called when the parsed level differs from the
/// level read at startup.
///
/// # Errors
///
/// Returns `VibranceError::InvalidLevel` if `input` is not a number, before any
/// provider call. Returns provider errors from `set`.
pub fn run<P: VibranceProvider>(
    provider: &mut P,
    state: &VibranceState,
    scale: Scale,
    input: &str,
    ctx: &OutputCtx,
) -> Result<TransitionOutput, VibranceError> {
    let level = scale.parse(input, state)?;
    let applied = level != state.current;

    if applied {
        let _t = ctx.timer("set_dvc_level");
        provider.set(level)?;
    }

    Ok(TransitionOutput {
        action: "Set".to_owned(),
        from: scale.display(state.current, state),
        to: scale.display(level, state),
        applied,
    })
}
