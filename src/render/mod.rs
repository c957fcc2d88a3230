//! Render module - Human-readable reports of a difference tree.
//!
//! Two styles are available: [`GroupedRenderer`] lists differing leaves by
//! kind of change, [`HierarchicalRenderer`] keeps the nesting of the
//! documents. Both write through a [`Palette`], which decides whether the
//! output carries terminal colors.

mod format;
mod grouped;
mod hierarchical;
mod palette;

#[cfg(test)]
mod render_test;

pub use grouped::*;
pub use hierarchical::*;
pub use palette::*;

use std::io::{self, Write};

use crate::diff::DiffNode;

const RULE_WIDTH: usize = 80;

/// DiffRenderer writes a report for a difference tree.
///
/// Rendering is a pure function of the tree and the two names: the same
/// input always produces the same bytes.
pub trait DiffRenderer {
    /// Writes the report comparing `name1` (left) with `name2` (right).
    fn render(&self, tree: &DiffNode, name1: &str, name2: &str, out: &mut dyn Write) -> io::Result<()>;

    /// Renders the report into a string.
    fn render_to_string(&self, tree: &DiffNode, name1: &str, name2: &str) -> String {
        let mut buf = Vec::new();
        // Writing into a Vec cannot fail.
        let _ = self.render(tree, name1, name2, &mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    }
}

/// Style selects a text report layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Style {
    /// One section per kind of change, entries by full path.
    Grouped,
    /// Nested by field, lists shown item by item.
    #[default]
    Hierarchical,
}

/// Renders `tree` in the given style.
pub fn render(
    style: Style,
    palette: &dyn Palette,
    tree: &DiffNode,
    name1: &str,
    name2: &str,
    out: &mut dyn Write,
) -> io::Result<()> {
    match style {
        Style::Grouped => GroupedRenderer::new(palette).render(tree, name1, name2, out),
        Style::Hierarchical => HierarchicalRenderer::new(palette).render(tree, name1, name2, out),
    }
}

fn write_header(out: &mut dyn Write, palette: &dyn Palette, name1: &str, name2: &str) -> io::Result<()> {
    writeln!(out, "{}", palette.heading(&format!("Comparing: {} <-> {}", name1, name2)))?;
    writeln!(out, "{}", "-".repeat(RULE_WIDTH))
}

fn write_no_differences(out: &mut dyn Write, palette: &dyn Palette) -> io::Result<()> {
    writeln!(out, "{}", palette.added("✓ No differences found"))
}
