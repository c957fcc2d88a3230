//! Text decoration strategies for rendered diffs.

use owo_colors::OwoColorize;

use crate::diff::DiffKind;

/// Palette decorates fragments of rendered output.
///
/// Implementations must be stateless: the same input always yields the
/// same output, so rendering stays deterministic.
pub trait Palette {
    /// Titles and summary lines.
    fn heading(&self, text: &str) -> String;
    /// Field names and paths.
    fn field(&self, text: &str) -> String;
    fn added(&self, text: &str) -> String;
    fn removed(&self, text: &str) -> String;
    fn modified(&self, text: &str) -> String;

    /// Decorates `text` in the tone of `kind`.
    fn paint(&self, kind: DiffKind, text: &str) -> String {
        match kind {
            DiffKind::Added => self.added(text),
            DiffKind::Removed => self.removed(text),
            DiffKind::Modified => self.modified(text),
            DiffKind::Equal => text.to_string(),
        }
    }
}

/// PlainPalette leaves text untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainPalette;

impl Palette for PlainPalette {
    fn heading(&self, text: &str) -> String {
        text.to_string()
    }

    fn field(&self, text: &str) -> String {
        text.to_string()
    }

    fn added(&self, text: &str) -> String {
        text.to_string()
    }

    fn removed(&self, text: &str) -> String {
        text.to_string()
    }

    fn modified(&self, text: &str) -> String {
        text.to_string()
    }
}

/// AnsiPalette colors output for terminals: green additions, red
/// removals, yellow modifications, cyan field names.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnsiPalette;

impl Palette for AnsiPalette {
    fn heading(&self, text: &str) -> String {
        text.bold().to_string()
    }

    fn field(&self, text: &str) -> String {
        text.cyan().to_string()
    }

    fn added(&self, text: &str) -> String {
        text.green().to_string()
    }

    fn removed(&self, text: &str) -> String {
        text.red().to_string()
    }

    fn modified(&self, text: &str) -> String {
        text.yellow().to_string()
    }
}
