//! Text emission: header block, then a pre-order walk of the tree with an
//! `END` line closing every block's subtree.

use crate::core::error::ConvertError;
use crate::core::material::{MaterialTree, NodeId, NodeKind};

/// Line closing a block's line group
pub const END_MARKER: &str = "END";

/// Fixed header block; the title is the name of the root's first child.
pub fn header_lines(title: &str) -> [String; 4] {
    [
        format!("!TITLE    {title}"),
        "!USER     STD".to_string(),
        "!RANGE    0".to_string(),
        "@VERSION  2".to_string(),
    ]
}

/// All output lines of a tree; fails on an empty tree.
pub fn emit(tree: &MaterialTree) -> Result<Vec<String>, ConvertError> {
    let root = tree.node(tree.root());
    let Some(&first) = root.children().first() else {
        return Err(ConvertError::NoMaterialData);
    };

    let mut lines: Vec<String> = header_lines(&tree.node(first).name()).into();
    lines.reserve(tree.len());

    for &child in root.children() {
        emit_subtree(tree, child, &mut lines)?;
    }

    Ok(lines)
}

fn emit_subtree(
    tree: &MaterialTree,
    id: NodeId,
    lines: &mut Vec<String>,
) -> Result<(), ConvertError> {
    let node = tree.node(id);

    if let Some(line) = node.format_line()? {
        lines.push(line);
    }

    for &child in node.children() {
        emit_subtree(tree, child, lines)?;
    }

    if node.kind() == NodeKind::Block {
        lines.push(END_MARKER.to_string());
    }

    Ok(())
}
