/// `--disable`: drop to minimum.
use crate::cli::OutputCtx;
use crate::types::TransitionOutput;
use crate::vibrance::{Scale, VibranceError, VibranceProvider, VibranceState};

/// Run `nvdv --disable`.
///
/// # Errors
///
/// Returns provider errors from `disable`.
pub fn run<P: VibranceProvider>(
    provider: &mut P,
    state: &VibranceState,
    scale: Scale,
    ctx: &OutputCtx,
) -> Result<TransitionOutput, VibranceError> {
    let applied = state.current != state.min;
    if applied {
        let _t = ctx.timer("disable");
        provider.disable()?;
    }

    Ok(TransitionOutput {
        action: "Disable".to_owned(),
        from: scale.display(state.current, state),
        to: scale.display(state.min, state),
        applied,
    })
}
