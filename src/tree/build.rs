use std::collections::VecDeque;
use std::path::Path;

use eframe::egui::{Vec2, vec2};
use rand::Rng;
use tracing::{debug, warn};

use super::node::{FileTree, NodeId, NodeKind, ROOT};
use super::source::{EntryKind, EntrySource};

/// Scatters new nodes uniformly over the square `[-extent, extent)²`.
pub struct Placement<'a, R: Rng> {
    rng: &'a mut R,
    extent: f32,
}

impl<'a, R: Rng> Placement<'a, R> {
    pub fn new(rng: &'a mut R, spread: f32, window_size: f32) -> Self {
        Self {
            rng,
            extent: (spread * window_size).abs(),
        }
    }

    pub(crate) fn next_position(&mut self) -> Vec2 {
        if self.extent <= 0.0 {
            return Vec2::ZERO;
        }
        vec2(
            self.rng.gen_range(-self.extent..self.extent),
            self.rng.gen_range(-self.extent..self.extent),
        )
    }
}

/// Scans `root_path` into a fresh tree. Sizes are raw: directories stay at 0
/// until [`super::aggregate`] runs.
pub fn build_tree<S, R>(source: &S, root_path: &Path, placement: &mut Placement<'_, R>) -> FileTree
where
    S: EntrySource + ?Sized,
    R: Rng,
{
    let root_name = root_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| root_path.display().to_string());
    let root_position = placement.next_position();
    let mut tree = FileTree::new(root_name, root_position);
    populate(source, &mut tree, ROOT, root_path, placement);
    tree
}

/// Fills `parent` with the entries of `path`. Files go to the front of the
/// child list, directories to the back, so the final order is every file in
/// reverse enumeration order followed by every directory in enumeration order.
pub fn populate<S, R>(
    source: &S,
    tree: &mut FileTree,
    parent: NodeId,
    path: &Path,
    placement: &mut Placement<'_, R>,
) where
    S: EntrySource + ?Sized,
    R: Rng,
{
    let entries = match source.read_dir(path) {
        Ok(entries) => entries,
        Err(error) => {
            warn!(path = %error.path().display(), "{error}");
            return;
        }
    };
    debug!(path = %path.display(), entries = entries.len(), "listing directory");

    let mut children = VecDeque::with_capacity(entries.len());
    for entry in entries {
        match entry.kind {
            EntryKind::Directory => {
                let position = placement.next_position();
                let id = tree.push_node(parent, entry.name, NodeKind::Directory, 0, position);
                children.push_back(id);
                populate(source, tree, id, &entry.path, placement);
            }
            EntryKind::File => match source.file_size(&entry.path) {
                Ok(size) => {
                    let position = placement.next_position();
                    let id = tree.push_node(parent, entry.name, NodeKind::File, size, position);
                    children.push_front(id);
                }
                Err(error) => {
                    warn!(path = %error.path().display(), "skipping entry: {error}");
                }
            },
        }
    }

    tree.set_children(parent, children.into());
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::fs;
    use std::io;
    use std::path::PathBuf;

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::error::ScanError;
    use crate::tree::source::{FsSource, RawEntry};

    #[derive(Default)]
    struct MemorySource {
        dirs: HashMap<PathBuf, Vec<(String, EntryKind)>>,
        sizes: HashMap<PathBuf, u64>,
    }

    impl MemorySource {
        fn dir(mut self, path: &str, entries: &[(&str, EntryKind)]) -> Self {
            self.dirs.insert(
                PathBuf::from(path),
                entries
                    .iter()
                    .map(|(name, kind)| ((*name).to_owned(), *kind))
                    .collect(),
            );
            self
        }

        fn file(mut self, path: &str, size: u64) -> Self {
            self.sizes.insert(PathBuf::from(path), size);
            self
        }
    }

    impl EntrySource for MemorySource {
        fn read_dir(&self, path: &Path) -> Result<Vec<RawEntry>, ScanError> {
            let entries = self.dirs.get(path).ok_or_else(|| ScanError::ReadDir {
                path: path.to_path_buf(),
                source: io::Error::from(io::ErrorKind::NotFound),
            })?;
            Ok(entries
                .iter()
                .map(|(name, kind)| RawEntry {
                    name: name.clone(),
                    path: path.join(name),
                    kind: *kind,
                })
                .collect())
        }

        fn file_size(&self, path: &Path) -> Result<u64, ScanError> {
            self.sizes
                .get(path)
                .copied()
                .ok_or_else(|| ScanError::FileSize {
                    path: path.to_path_buf(),
                    source: io::Error::from(io::ErrorKind::PermissionDenied),
                })
        }
    }

    fn scan(source: &impl EntrySource, root: &Path) -> FileTree {
        let mut rng = StdRng::seed_from_u64(0);
        let mut placement = Placement::new(&mut rng, 100.0, 1080.0);
        build_tree(source, root, &mut placement)
    }

    fn child_names(tree: &FileTree, id: NodeId) -> Vec<&str> {
        tree.children(id)
            .iter()
            .map(|&child| tree.node(child).name.as_str())
            .collect()
    }

    #[test]
    fn files_prepended_directories_appended() {
        let source = MemorySource::default()
            .dir(
                "/r",
                &[
                    ("f1", EntryKind::File),
                    ("d1", EntryKind::Directory),
                    ("f2", EntryKind::File),
                    ("d2", EntryKind::Directory),
                    ("f3", EntryKind::File),
                ],
            )
            .dir("/r/d1", &[])
            .dir("/r/d2", &[])
            .file("/r/f1", 1)
            .file("/r/f2", 2)
            .file("/r/f3", 3);

        let tree = scan(&source, Path::new("/r"));
        assert_eq!(child_names(&tree, ROOT), ["f3", "f2", "f1", "d1", "d2"]);
    }

    #[test]
    fn recurses_into_directories() {
        let source = MemorySource::default()
            .dir("/r", &[("sub", EntryKind::Directory)])
            .dir("/r/sub", &[("leaf", EntryKind::File)])
            .file("/r/sub/leaf", 42);

        let tree = scan(&source, Path::new("/r"));
        assert_eq!(tree.node_count(), 3);
        let sub = tree.children(ROOT)[0];
        assert_eq!(tree.node(sub).kind, NodeKind::Directory);
        assert_eq!(tree.node(sub).size, 0);
        let leaf = tree.children(sub)[0];
        assert_eq!(tree.node(leaf).size, 42);
        assert_eq!(tree.node(leaf).parent, Some(sub));
    }

    #[test]
    fn unreadable_file_is_skipped() {
        let source = MemorySource::default()
            .dir(
                "/r",
                &[("ok", EntryKind::File), ("locked", EntryKind::File)],
            )
            .file("/r/ok", 10);

        let tree = scan(&source, Path::new("/r"));
        assert_eq!(child_names(&tree, ROOT), ["ok"]);
    }

    #[test]
    fn unreadable_directory_stays_empty() {
        let source = MemorySource::default()
            .dir("/r", &[("gone", EntryKind::Directory), ("x", EntryKind::File)])
            .file("/r/x", 1);

        let tree = scan(&source, Path::new("/r"));
        assert_eq!(child_names(&tree, ROOT), ["x", "gone"]);
        let gone = tree.children(ROOT)[1];
        assert!(tree.children(gone).is_empty());
    }

    #[test]
    fn missing_root_yields_lone_root() {
        let tree = scan(&MemorySource::default(), Path::new("/nowhere"));
        assert_eq!(tree.node_count(), 1);
        assert_eq!(tree.root().name, "nowhere");
        assert_eq!(tree.root().size, 0);
    }

    #[test]
    fn positions_stay_inside_spread_square() {
        let source = MemorySource::default()
            .dir("/r", &[("a", EntryKind::File), ("b", EntryKind::File)])
            .file("/r/a", 1)
            .file("/r/b", 1);

        let mut rng = StdRng::seed_from_u64(7);
        let mut placement = Placement::new(&mut rng, 2.0, 10.0);
        let tree = build_tree(&source, Path::new("/r"), &mut placement);
        for node in tree.nodes() {
            assert!((-20.0..20.0).contains(&node.position.x));
            assert!((-20.0..20.0).contains(&node.position.y));
        }
    }

    #[test]
    fn same_seed_same_layout() {
        let source = MemorySource::default()
            .dir("/r", &[("a", EntryKind::File)])
            .file("/r/a", 1);

        let first = scan(&source, Path::new("/r"));
        let second = scan(&source, Path::new("/r"));
        for (a, b) in first.nodes().iter().zip(second.nodes()) {
            assert_eq!(a.position, b.position);
        }
    }

    #[test]
    fn scans_real_directory() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), vec![0u8; 100]).unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested").join("b.bin"), vec![0u8; 300]).unwrap();

        let tree = scan(&FsSource, dir.path());
        assert_eq!(tree.node_count(), 4);

        let first = tree.children(ROOT)[0];
        assert_eq!(tree.node(first).name, "a.txt");
        assert_eq!(tree.node(first).size, 100);

        let nested = tree.children(ROOT)[1];
        assert_eq!(tree.node(nested).kind, NodeKind::Directory);
        assert_eq!(child_names(&tree, nested), ["b.bin"]);
    }
}
