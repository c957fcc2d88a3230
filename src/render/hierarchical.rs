//! Nested report following the shape of the compared documents.

use std::io::{self, Write};

use super::format::{inline, payload, write_block};
use super::{write_header, write_no_differences, DiffRenderer, Palette};
use crate::diff::{DiffKind, DiffNode};

/// HierarchicalRenderer prints one block per top-level field, nesting
/// object changes under their parent and listing only the differing items
/// of a list.
pub struct HierarchicalRenderer<'p> {
    palette: &'p dyn Palette,
}

impl<'p> HierarchicalRenderer<'p> {
    pub fn new(palette: &'p dyn Palette) -> Self {
        HierarchicalRenderer { palette }
    }

    fn write_field(&self, out: &mut dyn Write, name: &str, node: &DiffNode, level: usize) -> io::Result<()> {
        if node.is_list() {
            return self.write_list(out, name, node, level);
        }

        let p = self.palette;
        let indent = "  ".repeat(level);

        if !node.is_leaf() {
            writeln!(out, "{}{} {}", indent, p.modified("~"), p.field(name))?;
            for (token, child) in &node.children {
                self.write_field(out, &token.to_string(), child, level + 1)?;
            }
            return Ok(());
        }

        let value_indent = format!("{}    ", indent);
        match node.kind {
            DiffKind::Added | DiffKind::Removed => {
                let value = match node.kind {
                    DiffKind::Added => payload(&node.after),
                    _ => payload(&node.before),
                };
                writeln!(out, "{}{} {}", indent, p.paint(node.kind, node.kind.symbol()), p.field(name))?;
                write!(out, "{}", value_indent)?;
                write_block(out, p, node.kind, &value_indent, value)?;
            }
            DiffKind::Modified => {
                let change_indent = format!("{}  ", value_indent);
                writeln!(out, "{}{} {}", indent, p.modified("~"), p.field(name))?;
                write!(out, "{}{} ", value_indent, p.removed("-"))?;
                write_block(out, p, DiffKind::Removed, &change_indent, payload(&node.before))?;
                write!(out, "{}{} ", value_indent, p.added("+"))?;
                write_block(out, p, DiffKind::Added, &change_indent, payload(&node.after))?;
            }
            DiffKind::Equal => {}
        }
        Ok(())
    }

    /// Lists the differing items of a list; equal items are left out.
    fn write_list(&self, out: &mut dyn Write, name: &str, node: &DiffNode, level: usize) -> io::Result<()> {
        let p = self.palette;
        let indent = "  ".repeat(level);
        let item_indent = format!("{}    ", indent);

        writeln!(out, "{}{} {} (array with changes)", indent, p.modified("~"), p.field(name))?;

        for (token, item) in &node.children {
            match item.kind {
                DiffKind::Added => {
                    let value = inline(payload(&item.after));
                    writeln!(out, "{}{} {} {}", item_indent, p.added("+"), token, p.added(&value))?;
                }
                DiffKind::Removed => {
                    let value = inline(payload(&item.before));
                    writeln!(out, "{}{} {} {}", item_indent, p.removed("-"), token, p.removed(&value))?;
                }
                DiffKind::Modified if !item.is_leaf() => {
                    writeln!(out, "{}{} {} (modified)", item_indent, p.modified("~"), token)?;
                    let nested_indent = format!("{}  ", item_indent);
                    for (key, child) in &item.children {
                        self.write_nested(out, &nested_indent, &key.to_string(), child)?;
                    }
                }
                DiffKind::Modified => {
                    writeln!(out, "{}{} {}", item_indent, p.modified("~"), token)?;
                    self.write_change(out, &format!("{}    ", item_indent), item)?;
                }
                DiffKind::Equal => {}
            }
        }
        Ok(())
    }

    fn write_nested(&self, out: &mut dyn Write, indent: &str, key: &str, node: &DiffNode) -> io::Result<()> {
        let p = self.palette;
        match node.kind {
            DiffKind::Added => {
                let value = inline(payload(&node.after));
                writeln!(out, "{}  {} {}: {}", indent, p.added("+"), key, p.added(&value))?;
            }
            DiffKind::Removed => {
                let value = inline(payload(&node.before));
                writeln!(out, "{}  {} {}: {}", indent, p.removed("-"), key, p.removed(&value))?;
            }
            DiffKind::Modified => {
                writeln!(out, "{}  {} {}", indent, p.modified("~"), key)?;
                if node.is_leaf() {
                    self.write_change(out, &format!("{}      ", indent), node)?;
                } else {
                    let deeper = format!("{}  ", indent);
                    for (child_key, child) in &node.children {
                        self.write_nested(out, &deeper, &child_key.to_string(), child)?;
                    }
                }
            }
            DiffKind::Equal => {}
        }
        Ok(())
    }

    /// Writes the before and after values of a modified leaf on one line each.
    fn write_change(&self, out: &mut dyn Write, indent: &str, node: &DiffNode) -> io::Result<()> {
        let p = self.palette;
        let before = inline(payload(&node.before));
        let after = inline(payload(&node.after));
        writeln!(out, "{}{} {}", indent, p.removed("-"), p.removed(&before))?;
        writeln!(out, "{}{} {}", indent, p.added("+"), p.added(&after))
    }
}

impl DiffRenderer for HierarchicalRenderer<'_> {
    fn render(&self, tree: &DiffNode, name1: &str, name2: &str, out: &mut dyn Write) -> io::Result<()> {
        write_header(out, self.palette, name1, name2)?;

        if tree.is_equal() || tree.children.is_empty() {
            return write_no_differences(out, self.palette);
        }

        writeln!(out)?;
        for (token, field) in &tree.children {
            self.write_field(out, &token.to_string(), field, 0)?;
            writeln!(out)?;
        }
        Ok(())
    }
}
