//! Filesystem collaborator.
//!
//! The engine performs every filesystem call through this trait so the
//! operation logic stays testable and the ground truth is always the live
//! filesystem; directory listings are never cached between operations.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// The minimal filesystem surface the engine needs.
pub trait FileSystem {
    fn exists(&self, path: &Path) -> bool;

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()>;

    /// Copies `from` to `to`, leaving the source in place.
    fn copy(&self, from: &Path, to: &Path) -> io::Result<()>;

    fn remove_file(&self, path: &Path) -> io::Result<()>;

    fn create_dir(&self, path: &Path) -> io::Result<()>;

    fn remove_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Lists the files (not directories) under `path`, optionally recursing.
    fn list_directory(&self, path: &Path, recursive: bool) -> io::Result<Vec<PathBuf>>;
}

/// Production implementation over `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        fs::rename(from, to)
    }

    fn copy(&self, from: &Path, to: &Path) -> io::Result<()> {
        fs::copy(from, to).map(|_| ())
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        fs::remove_file(path)
    }

    fn create_dir(&self, path: &Path) -> io::Result<()> {
        fs::create_dir(path)
    }

    fn remove_dir_all(&self, path: &Path) -> io::Result<()> {
        fs::remove_dir_all(path)
    }

    fn list_directory(&self, path: &Path, recursive: bool) -> io::Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        collect_files(path, recursive, &mut files)?;
        // Stable order keeps batch output deterministic.
        files.sort();
        Ok(files)
    }
}

fn collect_files(path: &Path, recursive: bool, out: &mut Vec<PathBuf>) -> io::Result<()> {
    for entry in fs::read_dir(path)? {
        let entry = entry?;
        let file_type = entry.file_type()?;
        if file_type.is_file() {
            out.push(entry.path());
        } else if file_type.is_dir() && recursive {
            collect_files(&entry.path(), true, out)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_list_directory_returns_only_files() {
        let temp = TempDir::new().expect("Failed to create temp directory");
        fs::write(temp.path().join("a.txt"), "a").unwrap();
        fs::write(temp.path().join("b.txt"), "b").unwrap();
        fs::create_dir(temp.path().join("sub")).unwrap();
        fs::write(temp.path().join("sub").join("c.txt"), "c").unwrap();

        let fs_access = RealFileSystem;
        let flat = fs_access.list_directory(temp.path(), false).unwrap();
        assert_eq!(flat.len(), 2);

        let deep = fs_access.list_directory(temp.path(), true).unwrap();
        assert_eq!(deep.len(), 3);
    }

    #[test]
    fn test_copy_preserves_source() {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let src = temp.path().join("src.txt");
        let dst = temp.path().join("dst.txt");
        fs::write(&src, "payload").unwrap();

        let fs_access = RealFileSystem;
        fs_access.copy(&src, &dst).unwrap();

        assert!(src.exists());
        assert_eq!(fs::read_to_string(&dst).unwrap(), "payload");
    }
}
