mod forces;

use eframe::egui::Vec2;

use crate::tree::{FileTree, NodeId};
use forces::{gravity, mass, repulsion_between, spring_displacement};

use super::PhysicsConfig;

/// Per-tick buffers keyed by node id. `forces` and `visited` are rebuilt at
/// the start of every tick; the orders and edges are fixed once the tree is
/// built.
#[derive(Default)]
struct PhysicsScratch {
    forces: Vec<Vec2>,
    visited: Vec<bool>,
    post_order: Vec<NodeId>,
    pre_order: Vec<NodeId>,
    edges: Vec<(NodeId, NodeId)>,
}

pub(crate) struct Simulation {
    config: PhysicsConfig,
    scratch: PhysicsScratch,
}

impl Simulation {
    pub(crate) fn new(tree: &FileTree, config: PhysicsConfig) -> Self {
        let mut simulation = Self {
            config,
            scratch: PhysicsScratch::default(),
        };
        simulation.index_tree(tree);
        simulation
    }

    fn index_tree(&mut self, tree: &FileTree) {
        self.scratch.post_order = tree.post_order();
        self.scratch.pre_order = tree.pre_order();
        self.scratch.edges = tree.edges();
    }

    /// Net force each node received during the last tick.
    pub(crate) fn forces(&self) -> &[Vec2] {
        &self.scratch.forces
    }

    /// One step: gravity, all-pairs repulsion, edge springs, then
    /// `position += force / mass` for every node.
    pub(crate) fn tick(&mut self, tree: &mut FileTree) {
        let node_count = tree.node_count();
        if self.scratch.post_order.len() != node_count {
            self.index_tree(tree);
        }

        let PhysicsConfig {
            gravity: gravity_strength,
            repulsion,
        } = self.config;
        let PhysicsScratch {
            forces,
            visited,
            post_order,
            pre_order,
            edges,
        } = &mut self.scratch;

        forces.clear();
        forces.resize(node_count, Vec2::ZERO);
        visited.clear();
        visited.resize(node_count, false);

        {
            let nodes = tree.nodes();

            for &id in post_order.iter() {
                forces[id] = gravity(nodes[id].position, gravity_strength);
            }

            visit_repulsion_pairs(post_order, pre_order, visited, |current, other| {
                let push = repulsion_between(
                    nodes[current].position,
                    nodes[other].position,
                    repulsion,
                    current,
                    other,
                );
                forces[other] += push;
                forces[current] -= push;
            });

            for &(parent, child) in edges.iter() {
                let displacement =
                    spring_displacement(nodes[parent].position, nodes[child].position);
                forces[parent] -= displacement;
                forces[child] += displacement;
            }
        }

        for (id, force) in forces.iter().enumerate() {
            let node = tree.node_mut(id);
            let velocity = *force / mass(node.radius);
            node.position += velocity;
        }
    }
}

/// Calls `apply(current, other)` once per unordered pair. Each node in
/// `order` marks itself visited, then walks the whole tree in `walk` order
/// and pairs with everything not yet visited.
fn visit_repulsion_pairs(
    order: &[NodeId],
    walk: &[NodeId],
    visited: &mut [bool],
    mut apply: impl FnMut(NodeId, NodeId),
) {
    for &current in order {
        visited[current] = true;
        for &other in walk {
            if !visited[other] {
                apply(current, other);
            }
        }
    }
}
