use std::io::IsTerminal;

use objinspect_config::{DisplayConfig, MIN_WIDTH};
use objinspect_inspect::FormatOptions;

use crate::cli::GlobalFlags;

/// Rendering options for stdout: the `[display]` config with `--color`
/// layered on top. `NO_COLOR` turns off automatic color, and the terminal
/// width from `COLUMNS` applies when no `max_width` is configured.
#[must_use]
pub fn format_options(display: &DisplayConfig, flags: &GlobalFlags) -> FormatOptions {
    let mut display = display.clone();
    if let Some(mode) = flags.color {
        display.color = mode.into();
    }
    let is_tty = std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none();
    let mut options = display.format_options(is_tty);
    if options.max_width.is_none() {
        options.max_width = term_width();
    }
    options
}

fn term_width() -> Option<usize> {
    std::env::var("COLUMNS")
        .ok()
        .and_then(|value| value.parse::<usize>().ok())
        .filter(|width| *width >= MIN_WIDTH)
}
