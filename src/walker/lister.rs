//! Directory listing primitive used by the walker.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// One immediate child of a listed directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildEntry {
    /// Full path of the entry
    pub path: PathBuf,

    /// Base name the level matcher is applied to
    pub name: String,

    /// Whether the entry can be descended into
    pub is_dir: bool,
}

impl ChildEntry {
    pub fn new(path: impl Into<PathBuf>, is_dir: bool) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self { path, name, is_dir }
    }
}

/// Lists the immediate children of a directory.
///
/// This is the only file-system access the walker performs. Implementations
/// may return children in any order.
pub trait DirectoryLister {
    fn list(&self, dir: &Path) -> io::Result<Vec<ChildEntry>>;
}

impl<L: DirectoryLister + ?Sized> DirectoryLister for &L {
    fn list(&self, dir: &Path) -> io::Result<Vec<ChildEntry>> {
        (**self).list(dir)
    }
}

/// [`DirectoryLister`] backed by [`std::fs::read_dir`].
///
/// Children come back in the platform's listing order, which is not stable
/// across file systems.
#[derive(Debug, Clone, Copy)]
pub struct FsLister {
    follow_symlinks: bool,
}

impl FsLister {
    pub const fn new(follow_symlinks: bool) -> Self {
        Self { follow_symlinks }
    }

    pub fn follows_symlinks(&self) -> bool {
        self.follow_symlinks
    }
}

impl Default for FsLister {
    fn default() -> Self {
        Self::new(true)
    }
}

impl DirectoryLister for FsLister {
    fn list(&self, dir: &Path) -> io::Result<Vec<ChildEntry>> {
        let mut children = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();
            let is_dir = if self.follow_symlinks {
                path.is_dir()
            } else {
                entry.file_type()?.is_dir()
            };
            children.push(ChildEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                path,
                is_dir,
            });
        }
        Ok(children)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_child_entry_name_from_path() {
        let entry = ChildEntry::new("/data/K=3_multiplier=0.5", true);
        assert_eq!(entry.name, "K=3_multiplier=0.5");
        assert!(entry.is_dir);
    }

    #[test]
    fn test_fs_lister_reports_files_and_directories() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("seed=1")).unwrap();
        fs::write(tmp.path().join("notes.txt"), "x").unwrap();

        let mut children = FsLister::default().list(tmp.path()).unwrap();
        children.sort_by(|a, b| a.name.cmp(&b.name));

        assert_eq!(children.len(), 2);
        assert_eq!(children[0].name, "notes.txt");
        assert!(!children[0].is_dir);
        assert_eq!(children[1].name, "seed=1");
        assert!(children[1].is_dir);
        assert_eq!(children[1].path, tmp.path().join("seed=1"));
    }

    #[test]
    fn test_fs_lister_missing_directory() {
        let tmp = TempDir::new().unwrap();
        let err = FsLister::default()
            .list(&tmp.path().join("missing"))
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[cfg(unix)]
    #[test]
    fn test_fs_lister_symlink_policy() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("real")).unwrap();
        std::os::unix::fs::symlink(tmp.path().join("real"), tmp.path().join("link")).unwrap();

        let find_link = |lister: FsLister| {
            lister
                .list(tmp.path())
                .unwrap()
                .into_iter()
                .find(|c| c.name == "link")
                .unwrap()
        };

        assert!(find_link(FsLister::new(true)).is_dir);
        assert!(!find_link(FsLister::new(false)).is_dir);
    }
}
