use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::ScanError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    File,
}

#[derive(Clone, Debug)]
pub struct RawEntry {
    pub name: String,
    pub path: PathBuf,
    pub kind: EntryKind,
}

/// Directory listing collaborator for the tree builder.
pub trait EntrySource {
    /// Direct entries of `path`, in enumeration order.
    fn read_dir(&self, path: &Path) -> Result<Vec<RawEntry>, ScanError>;

    fn file_size(&self, path: &Path) -> Result<u64, ScanError>;
}

/// Reads the real filesystem. Symlinks are never followed, so a link to a
/// directory shows up as a file.
#[derive(Clone, Copy, Debug, Default)]
pub struct FsSource;

impl EntrySource for FsSource {
    fn read_dir(&self, path: &Path) -> Result<Vec<RawEntry>, ScanError> {
        let listing = fs::read_dir(path).map_err(|source| ScanError::ReadDir {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(readable_entries(
            path,
            listing.map(|entry| {
                entry.map(|entry| {
                    let is_dir = entry
                        .file_type()
                        .map(|file_type| file_type.is_dir())
                        .unwrap_or(false);
                    RawEntry {
                        name: entry.file_name().to_string_lossy().into_owned(),
                        path: entry.path(),
                        kind: if is_dir {
                            EntryKind::Directory
                        } else {
                            EntryKind::File
                        },
                    }
                })
            }),
        ))
    }

    fn file_size(&self, path: &Path) -> Result<u64, ScanError> {
        fs::symlink_metadata(path)
            .map(|metadata| metadata.len())
            .map_err(|source| ScanError::FileSize {
                path: path.to_path_buf(),
                source,
            })
    }
}

/// Keeps every entry that could be read. A failed entry is logged and
/// skipped; its siblings are unaffected.
fn readable_entries(
    path: &Path,
    listing: impl IntoIterator<Item = io::Result<RawEntry>>,
) -> Vec<RawEntry> {
    listing
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(error) => {
                warn!(path = %path.display(), "skipping unreadable entry: {error}");
                None
            }
        })
        .collect()
}
