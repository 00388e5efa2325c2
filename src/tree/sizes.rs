use super::node::{FileTree, NodeId};

/// Folds descendant sizes into every directory below and including `id`,
/// returning the subtree total.
///
/// Sizes accumulate into the existing field, so this must run exactly once on
/// a freshly built tree; a second call counts every file again.
pub fn aggregate(tree: &mut FileTree, id: NodeId) -> u64 {
    let children = tree.children(id).to_vec();
    if children.is_empty() {
        return tree.node(id).size;
    }

    for child in children {
        let child_size = aggregate(tree, child);
        let node = tree.node_mut(id);
        node.size = node.size.saturating_add(child_size);
    }
    tree.node(id).size
}

/// Smallest and largest `size` over the whole subtree, directories included.
pub fn extremes(tree: &FileTree, id: NodeId) -> (u64, u64) {
    let mut min = u64::MAX;
    let mut max = 0;
    visit_extremes(tree, id, &mut min, &mut max);
    (min, max)
}

fn visit_extremes(tree: &FileTree, id: NodeId, min: &mut u64, max: &mut u64) {
    for &child in tree.children(id) {
        visit_extremes(tree, child, min, max);
    }
    let size = tree.node(id).size;
    *min = (*min).min(size);
    *max = (*max).max(size);
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::tree::node::{NodeKind, ROOT};

    use NodeKind::{Directory as D, File as F};

    #[test]
    fn sums_files_into_directories() {
        let mut tree = FileTree::from_rows(&[
            (ROOT, "a", F, 100),
            (ROOT, "sub", D, 0),
            (2, "b", F, 200),
            (2, "c", F, 50),
            (2, "deeper", D, 0),
            (5, "d", F, 25),
        ]);

        assert_eq!(aggregate(&mut tree, ROOT), 375);
        assert_eq!(tree.node(ROOT).size, 375);
        assert_eq!(tree.node(2).size, 275);
        assert_eq!(tree.node(5).size, 25);
        assert_eq!(tree.node(1).size, 100);
    }

    #[test]
    fn two_file_scenario() {
        let mut tree = FileTree::from_rows(&[(ROOT, "small", F, 100), (ROOT, "large", F, 300)]);
        assert_eq!(aggregate(&mut tree, ROOT), 400);
        assert_eq!(extremes(&tree, ROOT), (100, 400));
    }

    #[test]
    fn second_call_compounds() {
        let mut tree = FileTree::from_rows(&[(ROOT, "a", F, 10)]);
        assert_eq!(aggregate(&mut tree, ROOT), 10);
        assert_eq!(aggregate(&mut tree, ROOT), 20);
    }

    #[test]
    fn empty_directories_count_in_extremes() {
        let mut tree = FileTree::from_rows(&[(ROOT, "empty", D, 0), (ROOT, "f", F, 9)]);
        aggregate(&mut tree, ROOT);
        assert_eq!(extremes(&tree, ROOT), (0, 9));
    }

    #[test]
    fn lone_root() {
        let mut tree = FileTree::from_rows(&[]);
        assert_eq!(aggregate(&mut tree, ROOT), 0);
        assert_eq!(extremes(&tree, ROOT), (0, 0));
    }

    fn arbitrary_rows() -> impl Strategy<Value = Vec<(usize, bool, u64)>> {
        prop::collection::vec((any::<usize>(), any::<bool>(), 0u64..1_000_000), 0..40)
    }

    /// Turns raw picks into valid rows: each row's parent is a directory among
    /// the earlier rows (or the root).
    fn rows_from(raw: &[(usize, bool, u64)]) -> Vec<(NodeId, String, NodeKind, u64)> {
        let mut directories = vec![ROOT];
        let mut rows = Vec::new();
        for (index, &(pick, is_dir, size)) in raw.iter().enumerate() {
            let parent = directories[pick % directories.len()];
            let id = index + 1;
            if is_dir {
                directories.push(id);
                rows.push((parent, format!("d{id}"), D, 0));
            } else {
                rows.push((parent, format!("f{id}"), F, size));
            }
        }
        rows
    }

    fn leaf_sum(tree: &FileTree, id: NodeId) -> u64 {
        let children = tree.children(id);
        if children.is_empty() {
            return tree.node(id).size;
        }
        children.iter().map(|&child| leaf_sum(tree, child)).sum()
    }

    proptest! {
        #[test]
        fn every_directory_equals_its_leaf_sum(raw in arbitrary_rows()) {
            let rows = rows_from(&raw);
            let borrowed = rows
                .iter()
                .map(|(parent, name, kind, size)| (*parent, name.as_str(), *kind, *size))
                .collect::<Vec<_>>();
            let original = FileTree::from_rows(&borrowed);
            let mut tree = original.clone();

            let total = aggregate(&mut tree, ROOT);
            prop_assert_eq!(total, leaf_sum(&original, ROOT));
            for id in 0..tree.node_count() {
                prop_assert_eq!(tree.node(id).size, leaf_sum(&original, id));
            }

            let (min, max) = extremes(&tree, ROOT);
            prop_assert!(min <= max);
            prop_assert_eq!(max, total);
        }
    }
}
