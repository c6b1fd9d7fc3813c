/// Command dispatch: one query, at most one action, then output.
pub mod disable;
pub mod enable;
pub mod get;
pub mod set;
pub mod toggle;

use std::io::Write;

use crate::cli::output::{write_banner, write_levels, write_transition};
use crate::cli::{Cli, OutputCtx};
use crate::nvapi::NvapiProvider;
use crate::vibrance::{Scale, VibranceError, VibranceProvider};

/// A primary action, in the order they take priority.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Get,
    /// Unparsed user input; parsing happens against the fetched state.
    Set(String),
    Toggle,
    Enable,
    Disable,
}

impl Action {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Set(_) => "set",
            Self::Toggle => "toggle",
            Self::Enable => "enable",
            Self::Disable => "disable",
        }
    }
}

/// Which actions the dispatcher accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActionSet {
    /// get, set, toggle, enable, disable.
    #[default]
    Full,
    /// get, set, toggle.
    Basic,
}

impl ActionSet {
    #[must_use]
    pub fn supports(self, action: &Action) -> bool {
        match self {
            Self::Full => true,
            Self::Basic => !matches!(action, Action::Enable | Action::Disable),
        }
    }

    /// # Errors
    ///
    /// Returns `VibranceError::UnsupportedAction` if `action` is outside this set.
    pub fn ensure_supported(self, action: Option<&Action>) -> Result<(), VibranceError> {
        match action {
            Some(action) if !self.supports(action) => Err(VibranceError::UnsupportedAction {
                action: action.name(),
            }),
            _ => Ok(()),
        }
    }
}

/// Reads the provider once and runs at most one action against it.
#[derive(Debug)]
pub struct Dispatcher<P> {
    provider: P,
    actions: ActionSet,
    scale: Scale,
}

impl<P: VibranceProvider> Dispatcher<P> {
    #[must_use]
    pub fn new(provider: P, actions: ActionSet, scale: Scale) -> Self {
        Self {
            provider,
            actions,
            scale,
        }
    }

    /// Query the provider, print the verbose banner, then run `action`.
    ///
    /// The state is read exactly once; reports use that reading even after a
    /// mutation. `None` stops after the query.
    ///
    /// # Errors
    ///
    /// Returns `VibranceError::UnsupportedAction` before any provider call if
    /// `action` is outside the configured set, otherwise any provider, parse,
    /// or output error.
    pub fn run<W: Write>(
        &mut self,
        action: Option<&Action>,
        ctx: &OutputCtx,
        out: &mut W,
    ) -> Result<(), VibranceError> {
        self.actions.ensure_supported(action)?;

        let _t_query = ctx.timer("get_dvc_info");
        let state = self.provider.query()?;
        drop(_t_query);

        if ctx.verbose {
            write_banner(out, state.version, self.actions, ctx)?;
        }

        let Some(action) = action else {
            return Ok(());
        };

        let provider = &mut self.provider;
        let scale = self.scale;
        let transition = match action {
            Action::Get => {
                write_levels(out, &get::run(&state, scale), ctx)?;
                return Ok(());
            }
            Action::Set(input) => set::run(provider, &state, scale, input, ctx)?,
            Action::Toggle => toggle::run(provider, &state, scale, ctx)?,
            Action::Enable => enable::run(provider, &state, scale, ctx)?,
            Action::Disable => disable::run(provider, &state, scale, ctx)?,
        };

        write_transition(out, &transition, ctx)?;
        Ok(())
    }
}

/// Run `action` once per provider, in order, writing every report to `out`.
///
/// Stops at the first failing provider.
///
/// # Errors
///
/// Returns the first `VibranceError` raised by any run.
pub fn run_each<P, I, W>(
    providers: I,
    actions: ActionSet,
    scale: Scale,
    action: Option<&Action>,
    ctx: &OutputCtx,
    out: &mut W,
) -> Result<(), VibranceError>
where
    P: VibranceProvider,
    I: IntoIterator<Item = P>,
    W: Write,
{
    for provider in providers {
        Dispatcher::new(provider, actions, scale).run(action, ctx, out)?;
    }
    Ok(())
}

/// Open the driver for the requested display (or all of them with `--all`)
/// and run the selected action.
///
/// # Errors
///
/// Returns `VibranceError` on any failure; unsupported actions are rejected
/// before the driver is loaded.
pub fn dispatch(cli: &Cli, ctx: &OutputCtx) -> Result<(), VibranceError> {
    let action = cli.action();
    let actions = ActionSet::from(cli.variant);
    actions.ensure_supported(action.as_ref())?;

    let _t_open = ctx.timer("open_driver");
    let providers = if cli.all {
        NvapiProvider::open_all()?
    } else {
        vec![NvapiProvider::open(cli.display)?]
    };
    drop(_t_open);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run_each(
        providers,
        actions,
        cli.scale(),
        action.as_ref(),
        ctx,
        &mut out,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;
    use crate::vibrance::mock::{Call, MockProvider};

    fn ctx(verbose: bool) -> OutputCtx {
        OutputCtx::new(OutputFormat::Text, false, verbose, false, false)
    }

    /// Run one action against a mock and return (calls, stdout).
    fn run_with(
        provider: MockProvider,
        actions: ActionSet,
        scale: Scale,
        action: Option<Action>,
        verbose: bool,
    ) -> (Vec<Call>, String) {
        let mut dispatcher = Dispatcher::new(provider, actions, scale);
        let mut out = Vec::new();
        dispatcher
            .run(action.as_ref(), &ctx(verbose), &mut out)
            .unwrap();
        (dispatcher.provider.calls, String::from_utf8(out).unwrap())
    }

    fn run_full(
        current: i32,
        action: Option<Action>,
        verbose: bool,
    ) -> (Vec<Call>, String) {
        run_with(
            MockProvider::new(current, 0, 100),
            ActionSet::Full,
            Scale::Raw,
            action,
            verbose,
        )
    }

    #[test]
    fn test_get_prints_current_only() {
        let (calls, out) = run_full(50, Some(Action::Get), false);
        assert!(calls.is_empty());
        assert_eq!(out, "50\n");
    }

    #[test]
    fn test_get_verbose_prints_banner_and_three_lines() {
        let (calls, out) = run_full(50, Some(Action::Get), true);
        assert!(calls.is_empty());
        assert_eq!(
            out,
            "NV_DISPLAY_DVC_VERSION: 65552\n\
             Current Digital Vibrance: 50\n\
             Minimum Digital Vibrance: 0\n\
             Maximum Digital Vibrance: 100\n"
        );
    }

    #[test]
    fn test_no_action_is_silent() {
        let (calls, out) = run_full(50, None, false);
        assert!(calls.is_empty());
        assert_eq!(out, "");

        let (calls, out) = run_full(50, None, true);
        assert!(calls.is_empty());
        assert_eq!(out, "NV_DISPLAY_DVC_VERSION: 65552\n");
    }

    #[test]
    fn test_set_same_value_skips_provider() {
        let (calls, out) = run_full(50, Some(Action::Set("50".to_owned())), false);
        assert!(calls.is_empty());
        assert_eq!(out, "");
    }

    #[test]
    fn test_set_other_value_calls_once() {
        for value in [0, 1, 49, 51, 75, 100] {
            let (calls, _) = run_full(50, Some(Action::Set(value.to_string())), false);
            assert_eq!(calls, vec![Call::Set(value)], "value {value}");
        }
    }

    #[test]
    fn test_set_verbose_reports_old_and_new() {
        let (calls, out) = run_full(50, Some(Action::Set("75".to_owned())), true);
        assert_eq!(calls, vec![Call::Set(75)]);
        assert_eq!(
            out,
            "NV_DISPLAY_DVC_VERSION: 65552\nSet Digital Vibrance: 50 -> 75\n"
        );
    }

    #[test]
    fn test_set_non_numeric_rejected_before_provider() {
        let mut dispatcher =
            Dispatcher::new(MockProvider::new(50, 0, 100), ActionSet::Full, Scale::Raw);
        let mut out = Vec::new();
        let err = dispatcher
            .run(Some(&Action::Set("abc".to_owned())), &ctx(false), &mut out)
            .unwrap_err();
        assert!(matches!(err, VibranceError::InvalidLevel { .. }));
        assert!(dispatcher.provider.calls.is_empty());
    }

    #[test]
    fn test_toggle_always_calls_and_predicts_target() {
        let (calls, out) = run_full(50, Some(Action::Toggle), true);
        assert_eq!(calls, vec![Call::Toggle]);
        assert!(out.ends_with("Toggle Digital Vibrance: 50 -> 0\n"));

        let (calls, out) = run_full(0, Some(Action::Toggle), true);
        assert_eq!(calls, vec![Call::Toggle]);
        assert!(out.ends_with("Toggle Digital Vibrance: 0 -> 100\n"));

        let (calls, out) = run_full(100, Some(Action::Toggle), false);
        assert_eq!(calls, vec![Call::Toggle]);
        assert_eq!(out, "");
    }

    /// Toggles by a fixed step instead of snapping to an extreme.
    struct SteppingProvider {
        state: crate::vibrance::VibranceState,
        queries: std::cell::Cell<u32>,
    }

    impl VibranceProvider for SteppingProvider {
        fn query(&self) -> Result<crate::vibrance::VibranceState, VibranceError> {
            self.queries.set(self.queries.get() + 1);
            Ok(self.state)
        }
        fn set(&mut self, level: i32) -> Result<(), VibranceError> {
            self.state.current = level;
            Ok(())
        }
        fn toggle(&mut self) -> Result<(), VibranceError> {
            self.state.current -= 20;
            Ok(())
        }
        fn enable(&mut self) -> Result<(), VibranceError> {
            Ok(())
        }
        fn disable(&mut self) -> Result<(), VibranceError> {
            Ok(())
        }
    }

    #[test]
    fn test_toggle_report_is_predicted_from_first_read() {
        let provider = SteppingProvider {
            state: MockProvider::new(50, 0, 100).state,
            queries: std::cell::Cell::new(0),
        };
        let mut dispatcher = Dispatcher::new(provider, ActionSet::Full, Scale::Raw);
        let mut out = Vec::new();
        dispatcher
            .run(Some(&Action::Toggle), &ctx(true), &mut out)
            .unwrap();
        assert_eq!(dispatcher.provider.state.current, 30);
        assert_eq!(dispatcher.provider.queries.get(), 1);
        assert!(
            String::from_utf8(out)
                .unwrap()
                .ends_with("Toggle Digital Vibrance: 50 -> 0\n")
        );
    }

    #[test]
    fn test_enable_skips_when_above_min() {
        for current in [1, 50, 100] {
            let (calls, out) = run_full(current, Some(Action::Enable), true);
            assert!(calls.is_empty(), "current {current}");
            assert!(out.ends_with(&format!("Enable Digital Vibrance: {current} -> 100\n")));
        }
    }

    #[test]
    fn test_enable_calls_at_min() {
        let (calls, out) = run_full(0, Some(Action::Enable), true);
        assert_eq!(calls, vec![Call::Enable]);
        assert!(out.ends_with("Enable Digital Vibrance: 0 -> 100\n"));
    }

    #[test]
    fn test_disable_skips_at_min() {
        let (calls, out) = run_full(0, Some(Action::Disable), true);
        assert!(calls.is_empty());
        assert!(out.ends_with("Disable Digital Vibrance: 0 -> 0\n"));
    }

    #[test]
    fn test_disable_calls_above_min() {
        for current in [1, 50, 100] {
            let (calls, out) = run_full(current, Some(Action::Disable), true);
            assert_eq!(calls, vec![Call::Disable], "current {current}");
            assert!(out.ends_with(&format!("Disable Digital Vibrance: {current} -> 0\n")));
        }
    }

    #[test]
    fn test_basic_banner_has_no_colon() {
        let (_, out) = run_with(
            MockProvider::new(50, 0, 100),
            ActionSet::Basic,
            Scale::Raw,
            Some(Action::Toggle),
            true,
        );
        assert_eq!(
            out,
            "NV_DISPLAY_DVC_VERSION 65552\nToggle Digital Vibrance: 50 -> 0\n"
        );
    }

    #[test]
    fn test_basic_rejects_enable_and_disable() {
        for action in [Action::Enable, Action::Disable] {
            let mut dispatcher =
                Dispatcher::new(MockProvider::new(0, 0, 100), ActionSet::Basic, Scale::Raw);
            let mut out = Vec::new();
            let err = dispatcher
                .run(Some(&action), &ctx(true), &mut out)
                .unwrap_err();
            assert!(matches!(err, VibranceError::UnsupportedAction { .. }));
            assert_eq!(err.exit_code(), 2);
            assert!(dispatcher.provider.calls.is_empty());
            assert!(out.is_empty());
        }
    }

    #[test]
    fn test_percent_scale_set_and_get() {
        let (calls, out) = run_with(
            MockProvider::new(0, 0, 63),
            ActionSet::Full,
            Scale::Percent,
            Some(Action::Set("100".to_owned())),
            true,
        );
        assert_eq!(calls, vec![Call::Set(63)]);
        assert!(out.ends_with("Set Digital Vibrance: 0 -> 100\n"));

        let (_, out) = run_with(
            MockProvider::new(63, 0, 63),
            ActionSet::Full,
            Scale::Percent,
            Some(Action::Get),
            false,
        );
        assert_eq!(out, "100\n");
    }

    #[test]
    fn test_provider_failure_propagates() {
        let mut provider = MockProvider::new(50, 0, 100);
        provider.fail_status = Some(-5);
        let mut dispatcher = Dispatcher::new(provider, ActionSet::Full, Scale::Raw);
        let mut out = Vec::new();
        let err = dispatcher
            .run(Some(&Action::Set("60".to_owned())), &ctx(true), &mut out)
            .unwrap_err();
        assert!(matches!(err, VibranceError::Driver(_)));
        assert_eq!(err.exit_code(), 1);
        // The banner is already out; the transition is not.
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "NV_DISPLAY_DVC_VERSION: 65552\n"
        );
    }

    #[test]
    fn test_run_each_reports_every_display() {
        let mut out = Vec::new();
        run_each(
            [MockProvider::new(50, 0, 100), MockProvider::new(0, 0, 63)],
            ActionSet::Full,
            Scale::Raw,
            Some(&Action::Toggle),
            &ctx(true),
            &mut out,
        )
        .unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "NV_DISPLAY_DVC_VERSION: 65552\n\
             Toggle Digital Vibrance: 50 -> 0\n\
             NV_DISPLAY_DVC_VERSION: 65552\n\
             Toggle Digital Vibrance: 0 -> 63\n"
        );
    }

    #[test]
    fn test_run_each_stops_at_first_failure() {
        let mut failing = MockProvider::new(50, 0, 100);
        failing.fail_status = Some(-1);
        let mut out = Vec::new();
        let err = run_each(
            [failing, MockProvider::new(10, 0, 100)],
            ActionSet::Full,
            Scale::Raw,
            Some(&Action::Disable),
            &ctx(false),
            &mut out,
        )
        .unwrap_err();
        assert!(matches!(err, VibranceError::Driver(_)));
        assert!(out.is_empty());
    }

    #[test]
    fn test_json_output_ignores_verbose_for_transitions() {
        let mut dispatcher =
            Dispatcher::new(MockProvider::new(50, 0, 100), ActionSet::Full, Scale::Raw);
        let json = OutputCtx::new(OutputFormat::Compact, false, false, false, false);
        let mut out = Vec::new();
        dispatcher
            .run(Some(&Action::Set("50".to_owned())), &json, &mut out)
            .unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "{\"action\":\"Set\",\"from\":50,\"to\":50,\"applied\":false}\n"
        );
    }
}
