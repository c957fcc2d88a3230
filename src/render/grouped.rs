//! Flat report grouping differences into added, removed and modified.

use std::io::{self, Write};

use super::format::{payload, write_block};
use super::{write_header, write_no_differences, DiffRenderer, Palette};
use crate::diff::{flatten, DiffKind, DiffNode, DiffSummary};

const VALUE_INDENT: &str = "      ";
const CHANGE_INDENT: &str = "        ";

/// GroupedRenderer lists every differing leaf by its full path, in one
/// section per kind of change.
pub struct GroupedRenderer<'p> {
    palette: &'p dyn Palette,
}

impl<'p> GroupedRenderer<'p> {
    pub fn new(palette: &'p dyn Palette) -> Self {
        GroupedRenderer { palette }
    }

    fn write_section(
        &self,
        out: &mut dyn Write,
        title: &str,
        kind: DiffKind,
        nodes: Vec<&DiffNode>,
    ) -> io::Result<()> {
        if nodes.is_empty() {
            return Ok(());
        }

        let p = self.palette;
        writeln!(out, "{}", p.heading(&format!("{}:", title)))?;
        writeln!(out)?;

        for node in nodes {
            writeln!(out, "  {} {}", p.paint(kind, kind.symbol()), p.field(&node.path))?;
            match kind {
                DiffKind::Added => {
                    write!(out, "{}", VALUE_INDENT)?;
                    write_block(out, p, kind, VALUE_INDENT, payload(&node.after))?;
                }
                DiffKind::Removed => {
                    write!(out, "{}", VALUE_INDENT)?;
                    write_block(out, p, kind, VALUE_INDENT, payload(&node.before))?;
                }
                DiffKind::Modified => {
                    write!(out, "{}{} ", VALUE_INDENT, p.removed("-"))?;
                    write_block(out, p, DiffKind::Removed, CHANGE_INDENT, payload(&node.before))?;
                    write!(out, "{}{} ", VALUE_INDENT, p.added("+"))?;
                    write_block(out, p, DiffKind::Added, CHANGE_INDENT, payload(&node.after))?;
                }
                DiffKind::Equal => {}
            }
            writeln!(out)?;
        }
        Ok(())
    }
}

impl DiffRenderer for GroupedRenderer<'_> {
    fn render(&self, tree: &DiffNode, name1: &str, name2: &str, out: &mut dyn Write) -> io::Result<()> {
        let p = self.palette;
        write_header(out, p, name1, name2)?;

        let summary = DiffSummary::of(tree);
        if tree.is_equal() || summary.total() == 0 {
            return write_no_differences(out, p);
        }

        // Leaves arrive in path order, indices numerically; sections keep it.
        let mut added = Vec::new();
        let mut removed = Vec::new();
        let mut modified = Vec::new();
        for leaf in flatten(tree) {
            match leaf.kind {
                DiffKind::Added => added.push(leaf),
                DiffKind::Removed => removed.push(leaf),
                DiffKind::Modified => modified.push(leaf),
                DiffKind::Equal => {}
            }
        }

        writeln!(out)?;
        writeln!(
            out,
            "{}",
            p.heading(&format!("Summary: {} difference(s) found", summary.total()))
        )?;
        for (kind, count) in [
            (DiffKind::Added, summary.added),
            (DiffKind::Removed, summary.removed),
            (DiffKind::Modified, summary.modified),
        ] {
            if count > 0 {
                writeln!(out, "  {} {} field(s)", p.paint(kind, kind.symbol()), count)?;
            }
        }
        writeln!(out)?;

        self.write_section(out, "Added Fields", DiffKind::Added, added)?;
        self.write_section(out, "Removed Fields", DiffKind::Removed, removed)?;
        self.write_section(out, "Modified Fields", DiffKind::Modified, modified)
    }
}
