use std::io::Write;

use termcolor::{Buffer, Color, ColorSpec, WriteColor};

use crate::{
    core::{id::NodeId, tree::Tree},
    error::{Error, Result},
};

/// Traverses a tree of nodes and returns a string showing each node's name,
/// rectangle and validity flags. Nodes on the focus path are marked with
/// `*`. This is a debug function.
pub fn dump(tree: &Tree, root: NodeId) -> Result<String> {
    let mut buffer = Buffer::no_color();
    let focus = tree.focus_path_from(root);
    dump_node(&mut buffer, tree, root, 0, &focus)?;
    Ok(String::from_utf8_lossy(buffer.as_slice()).into_owned())
}

/// As [`dump`], with ANSI colors for display on a terminal.
pub fn dump_color(tree: &Tree, root: NodeId) -> Result<String> {
    let mut buffer = Buffer::ansi();
    let focus = tree.focus_path_from(root);
    dump_node(&mut buffer, tree, root, 0, &focus)?;
    Ok(String::from_utf8_lossy(buffer.as_slice()).into_owned())
}

/// Walk a node subtree and emit formatted debug output.
fn dump_node(
    buffer: &mut Buffer,
    tree: &Tree,
    id: NodeId,
    level: usize,
    focus: &[NodeId],
) -> Result<()> {
    let node = tree.node(id).ok_or(Error::NodeNotFound(id))?;
    let indent = "    ".repeat(level);
    let marker = if focus.contains(&id) { "*" } else { " " };

    write!(buffer, "{indent}{marker} ")?;
    buffer.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)).set_bold(true))?;
    write!(buffer, "{}", node.name())?;
    buffer.reset()?;

    let r = node.rect();
    write!(buffer, " {}x{}+{}+{}", r.w, r.h, r.tl.x, r.tl.y)?;

    let flags = [
        (!node.layout_valid(), 'L'),
        (!node.display_valid(), 'D'),
        (!node.self_valid(), 'S'),
    ];
    let stale: String = flags.iter().filter(|f| f.0).map(|f| f.1).collect();
    if !stale.is_empty() {
        buffer.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)))?;
        write!(buffer, " stale:{stale}")?;
        buffer.reset()?;
    }
    writeln!(buffer)?;

    for c in node.children() {
        dump_node(buffer, tree, c.id, level + 1, focus)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        geom::Expanse,
        layout::{Slot, StackContainer},
        widgets::Spacer,
    };

    #[test]
    fn dumps_structure() -> Result<()> {
        let mut tree = Tree::new();
        let top = tree.create(StackContainer::new());
        tree.add(top, Spacer::new(Expanse::new(2, 1)), Slot::Plain)?;
        let out = dump(&tree, top.id())?;
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("  StackContainer 0x0+0+0"));
        assert!(lines[1].starts_with("      Spacer"));
        assert!(lines[1].contains("stale:LDS"));
        Ok(())
    }
}
