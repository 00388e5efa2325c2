mod build;
mod dump;
mod node;
mod radius;
mod sizes;
mod source;

use std::path::Path;

use rand::Rng;
use tracing::{debug, info};

pub use build::{Placement, build_tree};
pub use dump::{dump_json, dump_text};
#[cfg(test)]
pub use node::NodeKind;
pub use node::{FileTree, NodeId, ROOT};
pub use radius::{RadiusBounds, map_radius};
pub use sizes::{aggregate, extremes};
pub use source::{EntrySource, FsSource};

/// The whole startup pass: scan, aggregate sizes, map radii.
pub fn load_tree<S, R>(
    source: &S,
    root_path: &Path,
    placement: &mut Placement<'_, R>,
    bounds: RadiusBounds,
) -> FileTree
where
    S: EntrySource + ?Sized,
    R: Rng,
{
    let mut tree = build_tree(source, root_path, placement);
    let total = aggregate(&mut tree, ROOT);
    let (min, max) = extremes(&tree, ROOT);
    debug!(min, max, "size range");
    map_radius(&mut tree, ROOT, min, max, bounds);

    info!(
        root = %root_path.display(),
        nodes = tree.node_count(),
        total_bytes = total,
        "scanned tree"
    );
    tree
}
