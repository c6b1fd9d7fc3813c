/// `--enable`: raise to maximum.
use crate::cli::OutputCtx;
use crate::types::TransitionOutput;
use crate::vibrance::{Scale, VibranceError, VibranceProvider, VibranceState};

/// Run `nvdv --enable`.
///
/// Skips the provider when the level is already above minimum. The report
/// always names `max` as the target.
///
/// # Errors
///
/// Returns provider errors from `enable`.
pub fn run<P: VibranceProvider>(
    provider: &mut P,
    state: &VibranceState,
    scale: Scale,
    ctx: &OutputCtx,
) -> Result<TransitionOutput, VibranceError> {
    let applied = !state.is_enabled();
    if applied {
        let _t = ctx.timer("enable");
        provider.enable()?;
    }

    Ok(TransitionOutput {
        action: "Enable".to_owned(),
        from: scale.display(state.current, state),
        to: scale.display(state.max, state),
        applied,
    })
}
