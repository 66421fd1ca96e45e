//! Terminal output for triagectl
//!
//! Same layout as the plain renderers in triage_common, with ANSI color
//! when enabled.

use owo_colors::OwoColorize;
use std::io::IsTerminal;
use triage_common::config::ColorMode;
use triage_common::render::{self, Highlight, Plain};
use triage_common::{DiagnosisResult, History};

/// owo-colors styling for rendered text
pub struct Colored;

impl Highlight for Colored {
    fn success(&self, text: &str) -> String {
        text.bright_green().bold().to_string()
    }

    fn warning(&self, text: &str) -> String {
        text.yellow().to_string()
    }

    fn heading(&self, text: &str) -> String {
        text.bright_white().bold().to_string()
    }

    fn metric(&self, text: &str) -> String {
        text.bright_cyan().bold().to_string()
    }

    fn dimmed(&self, text: &str) -> String {
        text.dimmed().to_string()
    }
}

/// Output settings resolved once per invocation
#[derive(Debug, Clone, Copy)]
pub struct Display {
    pub color: bool,
}

impl Display {
    pub fn new(mode: ColorMode, no_color_flag: bool) -> Self {
        Self {
            color: color_enabled(mode, no_color_flag, std::io::stdout().is_terminal()),
        }
    }

    pub fn plain() -> Self {
        Self { color: false }
    }

    pub fn highlight(&self) -> &'static dyn Highlight {
        if self.color {
            &Colored
        } else {
            &Plain
        }
    }

    pub fn result(&self, result: &DiagnosisResult) -> String {
        render::format_result(result, self.highlight())
    }

    pub fn history(&self, history: &History, limit: usize) -> String {
        render::format_history(history, limit, self.highlight())
    }

    pub fn title(&self, text: &str) -> String {
        self.highlight().heading(text)
    }

    pub fn note(&self, text: &str) -> String {
        self.highlight().dimmed(text)
    }

    pub fn warn(&self, text: &str) -> String {
        self.highlight().warning(text)
    }
}

/// Whether to emit color; NO_COLOR disables it in auto mode
pub fn color_enabled(mode: ColorMode, no_color_flag: bool, is_tty: bool) -> bool {
    if no_color_flag {
        return false;
    }
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => is_tty && std::env::var_os("NO_COLOR").is_none(),
    }
}

/// Display an error on stderr
pub fn display_error(message: &str) {
    eprintln!();
    eprintln!("[ERROR] {}", message.red());
    eprintln!();
}
