use std::io::{self, Write};

use serde::Serialize;

use super::node::{FileTree, NodeId, NodeKind, ROOT};

/// One line per node in pre-order: depth tabs, then `name, size`.
pub fn dump_text(tree: &FileTree, out: &mut impl Write) -> io::Result<()> {
    for id in tree.pre_order() {
        let node = tree.node(id);
        let indent = "\t".repeat(tree.depth(id));
        writeln!(out, "{indent}{}, {}", node.name, node.size)?;
    }
    Ok(())
}

#[derive(Serialize)]
struct DumpNode<'a> {
    name: &'a str,
    kind: NodeKind,
    size: u64,
    radius: f32,
    children: Vec<DumpNode<'a>>,
}

fn dump_node(tree: &FileTree, id: NodeId) -> DumpNode<'_> {
    let node = tree.node(id);
    DumpNode {
        name: &node.name,
        kind: node.kind,
        size: node.size,
        radius: node.radius,
        children: tree
            .children(id)
            .iter()
            .map(|&child| dump_node(tree, child))
            .collect(),
    }
}

pub fn dump_json(tree: &FileTree, out: &mut impl Write) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, &dump_node(tree, ROOT))?;
    writeln!(out)
}
