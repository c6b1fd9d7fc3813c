/// `--toggle`: snap between minimum and maximum.
use crate::cli::OutputCtx;
use crate::types::TransitionOutput;
use crate::vibrance::{Scale, VibranceError, VibranceProvider, VibranceState};

/// Run `nvdv --toggle`.
///
/// Always calls the provider. The reported target is predicted from the
/// startup reading (`min` if above it, else `max`); the driver is not
/// re-read afterwards.
///
/// # Errors
///
/// Returns provider errors from `toggle`.
pub fn run<P: VibranceProvider>(
    provider: &mut P,
    state: &VibranceState,
    scale: Scale,
    ctx: &OutputCtx,
) -> Result<TransitionOutput, VibranceError> {
    let _t = ctx.timer("toggle");
    provider.toggle()?;
    drop(_t);

    Ok(TransitionOutput {
        action: "Toggle".to_owned(),
        from: scale.display(state.current, state),
        to: scale.display(state.toggle_target(), state),
        applied: true,
    })
}
