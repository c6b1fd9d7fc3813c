/// Output formatting: text, JSON, table. Debug timing on stderr.
use std::io::{self, Write};

use comfy_table::{Table, presets::UTF8_BORDERS_ONLY};
use serde::Serialize;

use super::OutputFormat;
use crate::commands::ActionSet;
use crate::types::{ErrorOutput, LevelsOutput, TransitionOutput};

/// Resolve the effective output format, handling the `--json` flag.
#[must_use]
pub fn resolve_format(fmt: OutputFormat, json_flag: bool) -> OutputFormat {
    if json_flag { OutputFormat::Json } else { fmt }
}

/// Output context passed to all formatters.
#[derive(Debug, Clone, Copy)]
pub struct OutputCtx {
    pub format: OutputFormat,
    /// Print the version banner and labeled lines in text mode.
    pub verbose: bool,
    pub no_header: bool,
    /// When true, print NVAPI timing spans to stderr.
    pub debug: bool,
}

impl OutputCtx {
    /// Construct from CLI args.
    #[must_use]
    pub fn new(
        fmt: OutputFormat,
        json_flag: bool,
        verbose: bool,
        no_header: bool,
        debug: bool,
    ) -> Self {
        Self {
            format: resolve_format(fmt, json_flag),
            verbose,
            no_header,
            debug,
        }
    }

    /// Start a named debug timer. Prints elapsed on drop only when `--debug` is set.
    #[must_use]
    pub fn timer(&self, label: &'static str) -> DebugTimer {
        DebugTimer::new(label, self.debug)
    }

    fn is_json(&self) -> bool {
        matches!(self.format, OutputFormat::Json | OutputFormat::Compact)
    }
}

// --- Banner ---

/// Write the verbose version banner. Machine-readable formats skip it.
///
/// # Errors
///
/// Returns any I/O error from `out`.
pub fn write_banner<W: Write>(
    out: &mut W,
    version: u32,
    actions: ActionSet,
    ctx: &OutputCtx,
) -> io::Result<()> {
    if ctx.is_json() {
        return Ok(());
    }
    match actions {
        ActionSet::Full => writeln!(out, "NV_DISPLAY_DVC_VERSION: {version}"),
        ActionSet::Basic => writeln!(out, "NV_DISPLAY_DVC_VERSION {version}"),
    }
}

// --- Levels (get) ---

/// Write the result of `--get`.
///
/// # Errors
///
/// Returns any I/O error from `out`.
pub fn write_levels<W: Write>(
    out: &mut W,
    levels: &LevelsOutput,
    ctx: &OutputCtx,
) -> io::Result<()> {
    match ctx.format {
        OutputFormat::Json => write_json(out, levels),
        OutputFormat::Compact => write_compact_json(out, levels),
        OutputFormat::Table => write_levels_table(out, levels, ctx),
        OutputFormat::Text => {
            if !ctx.verbose {
                return writeln!(out, "{}", levels.current);
            }
            writeln!(out, "Current Digital Vibrance: {}", levels.current)?;
            writeln!(out, "Minimum Digital Vibrance: {}", levels.min)?;
            writeln!(out, "Maximum Digital Vibrance: {}", levels.max)
        }
    }
}

fn write_levels_table<W: Write>(
    out: &mut W,
    levels: &LevelsOutput,
    ctx: &OutputCtx,
) -> io::Result<()> {
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    if !ctx.no_header {
        table.set_header(["VERSION", "CURRENT", "MIN", "MAX"]);
    }
    table.add_row([
        levels.version.to_string(),
        levels.current.to_string(),
        levels.min.to_string(),
        levels.max.to_string(),
    ]);
    writeln!(out, "{table}")
}

// --- Transitions (set / toggle / enable / disable) ---

/// Write the result of a mutating action.
///
/// Text and table formats print only when verbose; JSON formats always print.
///
/// # Errors
///
/// Returns any I/O error from `out`.
pub fn write_transition<W: Write>(
    out: &mut W,
    transition: &TransitionOutput,
    ctx: &OutputCtx,
) -> io::Result<()> {
    match ctx.format {
        OutputFormat::Json => write_json(out, transition),
        OutputFormat::Compact => write_compact_json(out, transition),
        OutputFormat::Text | OutputFormat::Table => {
            if !ctx.verbose {
                return Ok(());
            }
            writeln!(
                out,
                "{} Digital Vibrance: {} -> {}",
                transition.action, transition.from, transition.to
            )
        }
    }
}

// --- Error output ---

/// Write a structured error to stderr.
pub fn write_error(err: &ErrorOutput, format: OutputFormat) {
    let stderr = std::io::stderr();
    let mut out = stderr.lock();
    match format {
        OutputFormat::Json | OutputFormat::Compact => {
            let s = serde_json::to_string_pretty(err).unwrap_or_default();
            let _ = writeln!(out, "{s}");
        }
        OutputFormat::Text | OutputFormat::Table => {
            let _ = writeln!(out, "Error: {}", err.error.message);
        }
    }
}

// --- Debug timer ---

/// A RAII timer that prints elapsed milliseconds to stderr on drop.
///
/// Created via [`OutputCtx::timer`]. Does nothing when `debug` is false.
pub struct DebugTimer {
    label: &'static str,
    start: std::time::Instant,
    active: bool,
}

impl DebugTimer {
    #[must_use]
    fn new(label: &'static str, active: bool) -> Self {
        Self {
            label,
            start: std::time::Instant::now(),
            active,
        }
    }
}

impl Drop for DebugTimer {
    fn drop(&mut self) {
        if self.active {
            let ms = self.start.elapsed().as_secs_f64() * 1000.0;
            eprintln!("[debug] {}: {ms:.2}ms", self.label);
        }
    }
}

// --- Generic JSON helpers ---

fn write_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> io::Result<()> {
    let s = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
    writeln!(out, "{s}")
}

fn write_compact_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> io::Result<()> {
    let s = serde_json::to_string(value).map_err(io::Error::other)?;
    writeln!(out, "{s}")
}
