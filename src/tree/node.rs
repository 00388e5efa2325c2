use eframe::egui::Vec2;
use serde::Serialize;

pub type NodeId = usize;

pub const ROOT: NodeId = 0;

/// Radius every node carries until the radius mapper has run.
pub const UNMAPPED_RADIUS: f32 = 1.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Directory,
    File,
}

impl NodeKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Directory => "directory",
            Self::File => "file",
        }
    }
}

#[derive(Clone, Debug)]
pub struct Node {
    pub name: String,
    pub kind: NodeKind,
    pub size: u64,
    pub radius: f32,
    pub position: Vec2,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

/// Arena holding the scanned hierarchy. Handles are indices into `nodes` and
/// stay valid for the lifetime of the tree; the root is always [`ROOT`].
#[derive(Clone, Debug)]
pub struct FileTree {
    nodes: Vec<Node>,
}

impl FileTree {
    pub fn new(root_name: impl Into<String>, root_position: Vec2) -> Self {
        Self {
            nodes: vec![Node {
                name: root_name.into(),
                kind: NodeKind::Directory,
                size: 0,
                radius: UNMAPPED_RADIUS,
                position: root_position,
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    /// Adds a detached node; the caller decides where it goes in the parent's
    /// child order.
    pub(super) fn push_node(
        &mut self,
        parent: NodeId,
        name: String,
        kind: NodeKind,
        size: u64,
        position: Vec2,
    ) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(Node {
            name,
            kind,
            size,
            radius: UNMAPPED_RADIUS,
            position,
            parent: Some(parent),
            children: Vec::new(),
        });
        id
    }

    pub(super) fn set_children(&mut self, parent: NodeId, children: Vec<NodeId>) {
        self.nodes[parent].children = children;
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id]
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn root(&self) -> &Node {
        &self.nodes[ROOT]
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id].children
    }

    /// Every (parent, child) pair, in pre-order of the parent.
    pub fn edges(&self) -> Vec<(NodeId, NodeId)> {
        let mut edges = Vec::with_capacity(self.nodes.len().saturating_sub(1));
        for id in self.pre_order() {
            for &child in &self.nodes[id].children {
                edges.push((id, child));
            }
        }
        edges
    }

    pub fn pre_order(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![ROOT];
        while let Some(id) = stack.pop() {
            order.push(id);
            stack.extend(self.nodes[id].children.iter().rev().copied());
        }
        order
    }

    /// Children before parents, siblings in child order.
    pub fn post_order(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![(ROOT, false)];
        while let Some((id, expanded)) = stack.pop() {
            if expanded {
                order.push(id);
                continue;
            }
            stack.push((id, true));
            for &child in self.nodes[id].children.iter().rev() {
                stack.push((child, false));
            }
        }
        order
    }

    pub fn depth(&self, mut id: NodeId) -> usize {
        let mut depth = 0;
        while let Some(parent) = self.nodes[id].parent {
            depth += 1;
            id = parent;
        }
        depth
    }
}

#[cfg(test)]
impl FileTree {
    /// Test fixture: `(parent, name, kind, size)` rows, parents listed before
    /// their children. Node ids follow row order, starting at 1.
    pub(crate) fn from_rows(rows: &[(NodeId, &str, NodeKind, u64)]) -> Self {
        let mut tree = Self::new("root", Vec2::ZERO);
        for &(parent, name, kind, size) in rows {
            let id = tree.push_node(parent, name.to_owned(), kind, size, Vec2::ZERO);
            tree.nodes[parent].children.push(id);
        }
        tree
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> FileTree {
        let mut tree = FileTree::new("root", Vec2::ZERO);
        let a = tree.push_node(ROOT, "a".into(), NodeKind::Directory, 0, Vec2::ZERO);
        let b = tree.push_node(ROOT, "b".into(), NodeKind::File, 5, Vec2::ZERO);
        let c = tree.push_node(a, "c".into(), NodeKind::File, 7, Vec2::ZERO);
        tree.set_children(ROOT, vec![a, b]);
        tree.set_children(a, vec![c]);
        tree
    }

    #[test]
    fn traversal_orders() {
        let tree = sample();
        assert_eq!(tree.pre_order(), vec![0, 1, 3, 2]);
        assert_eq!(tree.post_order(), vec![3, 1, 2, 0]);
    }

    #[test]
    fn edges_follow_child_order() {
        let tree = sample();
        assert_eq!(tree.edges(), vec![(0, 1), (0, 2), (1, 3)]);
    }

    #[test]
    fn depth_counts_parent_links() {
        let tree = sample();
        assert_eq!(tree.depth(ROOT), 0);
        assert_eq!(tree.depth(3), 2);
    }
}
