/// CLI argument definitions via clap derive.
use clap::{Parser, ValueEnum};

use crate::commands::{Action, ActionSet};
use crate::vibrance::Scale;

/// nvdv: read and adjust NVIDIA digital vibrance.
///
/// Action flags are checked in order get, set, toggle, enable, disable; the
/// first one present runs and the rest are ignored. With no action flag the
/// current state is read and nothing else happens.
#[derive(Debug, Parser)]
#[command(
    name = "nvdv",
    about = "Read and adjust NVIDIA digital vibrance from the CLI",
    version
)]
pub struct Cli {
    /// Print the current digital vibrance.
    #[arg(short, long)]
    pub get: bool,

    /// Set the digital vibrance to VALUE.
    #[arg(short, long, value_name = "VALUE", allow_hyphen_values = true)]
    pub set: Option<String>,

    /// Toggle between minimum and maximum.
    #[arg(short, long)]
    pub toggle: bool,

    /// Raise to maximum unless already above minimum.
    #[arg(short, long)]
    pub enable: bool,

    /// Drop to minimum unless already there.
    #[arg(short, long)]
    pub disable: bool,

    /// Print the driver version banner and labeled transitions.
    #[arg(short, long)]
    pub verbose: bool,

    /// Action set and banner style.
    #[arg(long, value_name = "VARIANT", default_value = "full")]
    pub variant: Variant,

    /// NVIDIA display index (zero-based, driver enumeration order).
    #[arg(long, value_name = "INDEX", default_value_t = 0)]
    pub display: u32,

    /// Run the action on every NVIDIA display (one report per display).
    #[arg(short, long, conflicts_with = "display")]
    pub all: bool,

    /// Read and print levels as a percentage of [min, max].
    #[arg(long)]
    pub percent: bool,

    /// Output format.
    #[arg(long, value_name = "FORMAT", default_value = "text")]
    pub output: OutputFormat,

    /// Shorthand for --output json.
    #[arg(long, conflicts_with = "output")]
    pub json: bool,

    /// Omit table headers.
    #[arg(long)]
    pub no_header: bool,

    /// Print NVAPI call timing to stderr for debugging.
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// The highest-priority action flag present, if any.
    ///
    /// An empty `--set` value counts as absent.
    #[must_use]
    pub fn action(&self) -> Option<Action> {
        if self.get {
            Some(Action::Get)
        } else if let Some(value) = self.set.as_ref().filter(|v| !v.is_empty()) {
            Some(Action::Set(value.clone()))
        } else if self.toggle {
            Some(Action::Toggle)
        } else if self.enable {
            Some(Action::Enable)
        } else if self.disable {
            Some(Action::Disable)
        } else {
            None
        }
    }

    #[must_use]
    pub fn scale(&self) -> Scale {
        if self.percent {
            Scale::Percent
        } else {
            Scale::Raw
        }
    }
}

/// Which action surface is exposed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum Variant {
    /// get, set, toggle, enable, disable. Banner: `NV_DISPLAY_DVC_VERSION: <n>`.
    #[default]
    Full,
    /// get, set, toggle. Banner: `NV_DISPLAY_DVC_VERSION <n>`.
    Basic,
}

impl From<Variant> for ActionSet {
    fn from(variant: Variant) -> Self {
        match variant {
            Variant::Full => Self::Full,
            Variant::Basic => Self::Basic,
        }
    }
}

/// Output format variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Plain lines (the classic output).
    #[default]
    Text,
    /// JSON object (pretty-printed).
    Json,
    /// Compact single-line JSON.
    Compact,
    /// Aligned table with headers.
    Table,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("nvdv").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_no_flags_is_no_action() {
        let cli = parse(&[]);
        assert_eq!(cli.action(), None);
        assert_eq!(cli.variant, Variant::Full);
        assert_eq!(cli.output, OutputFormat::Text);
        assert_eq!(cli.display, 0);
    }

    #[test]
    fn test_short_flags() {
        let cli = parse(&["-s", "75", "-v"]);
        assert_eq!(cli.action(), Some(Action::Set("75".to_owned())));
        assert!(cli.verbose);

        assert_eq!(parse(&["-e"]).action(), Some(Action::Enable));
        assert_eq!(parse(&["-d"]).action(), Some(Action::Disable));
        assert_eq!(parse(&["-t"]).action(), Some(Action::Toggle));
    }

    #[test]
    fn test_first_flag_wins() {
        assert_eq!(parse(&["--toggle", "--get"]).action(), Some(Action::Get));
        assert_eq!(
            parse(&["--disable", "--set", "10", "--enable"]).action(),
            Some(Action::Set("10".to_owned()))
        );
        assert_eq!(
            parse(&["--disable", "--enable"]).action(),
            Some(Action::Enable)
        );
    }

    #[test]
    fn test_set_accepts_negative_and_garbage() {
        assert_eq!(
            parse(&["--set", "-5"]).action(),
            Some(Action::Set("-5".to_owned()))
        );
        assert_eq!(
            parse(&["--set", "abc"]).action(),
            Some(Action::Set("abc".to_owned()))
        );
    }

    #[test]
    fn test_empty_set_falls_through() {
        assert_eq!(
            parse(&["--set", "", "--toggle"]).action(),
            Some(Action::Toggle)
        );
        assert_eq!(parse(&["--set", ""]).action(), None);
    }

    #[test]
    fn test_all_displays() {
        let cli = parse(&["-a", "-g"]);
        assert!(cli.all);
        assert!(!parse(&["-g"]).all);

        let res = Cli::try_parse_from(["nvdv", "--all", "--display", "1"]);
        assert!(res.is_err());
    }

    #[test]
    fn test_json_conflicts_with_output() {
        let res = Cli::try_parse_from(["nvdv", "--json", "--output", "table"]);
        assert!(res.is_err());
    }

    #[test]
    fn test_variant_and_scale() {
        let cli = parse(&["--variant", "basic", "--percent"]);
        assert_eq!(ActionSet::from(cli.variant), ActionSet::Basic);
        assert_eq!(cli.scale(), Scale::Percent);
    }
}
