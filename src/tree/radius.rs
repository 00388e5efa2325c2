use super::node::{FileTree, NodeId};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RadiusBounds {
    pub min: f32,
    pub max: f32,
}

impl Default for RadiusBounds {
    fn default() -> Self {
        Self {
            min: 150.0,
            max: 500.0,
        }
    }
}

impl RadiusBounds {
    /// Linear map of `size` from `[global_min, global_max]` onto
    /// `[self.min, self.max]`. An empty size range maps everything to `min`.
    pub fn radius_for(self, size: u64, global_min: u64, global_max: u64) -> f32 {
        if global_max <= global_min {
            return self.min;
        }
        let offset = size.saturating_sub(global_min) as f64;
        let span = (global_max - global_min) as f64;
        (offset * f64::from(self.max - self.min) / span) as f32 + self.min
    }
}

/// Assigns `radius` to every node of the subtree, children first.
pub fn map_radius(
    tree: &mut FileTree,
    id: NodeId,
    global_min: u64,
    global_max: u64,
    bounds: RadiusBounds,
) {
    let children = tree.children(id).to_vec();
    for child in children {
        map_radius(tree, child, global_min, global_max, bounds);
    }
    let node = tree.node_mut(id);
    node.radius = bounds.radius_for(node.size, global_min, global_max);
}
