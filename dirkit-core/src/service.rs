// SPDX-License-Identifier: AGPL-3.0-or-later
//! Directory operations scoped to a fixed root

use crate::{
    entry::{Entry, EntryKind},
    error::{DirkitError, DirkitResult},
    metadata::Metadata,
    search::Search,
};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// List, copy, move, delete, create and search under one root directory.
///
/// Relative arguments are joined onto the root; absolute arguments replace it
/// and an empty argument names the root itself. Nothing is cached between
/// calls.
#[derive(Debug, Clone)]
pub struct DirectoryService {
    root: PathBuf,
}

fn display(path: &Path) -> String {
    path.display().to_string()
}

fn display_pair(src: &Path, dst: &Path) -> String {
    format!("{} -> {}", src.display(), dst.display())
}

impl DirectoryService {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self { root: root.as_ref().to_path_buf() }
    }

    /// Like [`DirectoryService::new`], but the root must be an existing directory.
    pub fn open(root: impl AsRef<Path>) -> DirkitResult<Self> {
        let service = Self::new(root);
        let meta = fs::metadata(&service.root).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => DirkitError::NotFound(display(&service.root)),
            _ => DirkitError::io(display(&service.root), e),
        })?;
        if !meta.is_dir() {
            return Err(DirkitError::io(
                display(&service.root),
                io::Error::new(io::ErrorKind::NotADirectory, "root is not a directory"),
            ));
        }
        debug!("Opened directory service at {}", service.root.display());
        Ok(service)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn resolve(&self, path: &str) -> PathBuf {
        self.root.join(path)
    }

    /// `symlink_metadata`, mapping an absent path to `NotFound`
    fn require_exists(&self, path: &Path) -> DirkitResult<fs::Metadata> {
        fs::symlink_metadata(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => DirkitError::NotFound(display(path)),
            _ => DirkitError::io(display(path), e),
        })
    }

    fn remove_empty_dir(&self, path: &Path) -> DirkitResult<()> {
        fs::remove_dir(path).map_err(|e| match e.kind() {
            io::ErrorKind::DirectoryNotEmpty => DirkitError::NotEmpty(display(path)),
            _ => DirkitError::io(display(path), e),
        })
    }

    /// Both paths exist and resolve to one file
    fn same_file(src: &Path, dst: &Path) -> bool {
        match (fs::canonicalize(src), fs::canonicalize(dst)) {
            (Ok(a), Ok(b)) => a == b,
            _ => false,
        }
    }

    fn target_is_directory(path: &Path) -> DirkitError {
        DirkitError::io(
            display(path),
            io::Error::new(io::ErrorKind::IsADirectory, "target is a directory"),
        )
    }

    /// Direct children of the root with their attributes
    pub fn list_entries(&self) -> DirkitResult<Vec<Entry>> {
        debug!("Listing {}", self.root.display());
        let read_dir = fs::read_dir(&self.root).map_err(|e| DirkitError::io(display(&self.root), e))?;

        let mut entries = Vec::new();
        for dir_entry in read_dir {
            let dir_entry = dir_entry.map_err(|e| DirkitError::io(display(&self.root), e))?;
            let name = dir_entry.file_name().to_string_lossy().into_owned();
            let kind = dir_entry
                .file_type()
                .map(EntryKind::from)
                .unwrap_or(EntryKind::Unknown);

            let path = dir_entry.path();
            let metadata = match fs::metadata(&path).and_then(|m| Metadata::from_fs(&m)) {
                Ok(metadata) => Some(metadata),
                Err(e) => {
                    warn!("Could not read attributes of {}: {}", path.display(), e);
                    None
                }
            };

            entries.push(Entry::new(name, kind, metadata));
        }

        Ok(entries)
    }

    /// Direct children of the root, one display line each
    pub fn list(&self) -> DirkitResult<Vec<String>> {
        Ok(self.list_entries()?.iter().map(Entry::to_string).collect())
    }

    /// Copy a file, replacing an existing target file
    pub fn copy(&self, source: &str, target: &str) -> DirkitResult<()> {
        let src = self.resolve(source);
        let dst = self.resolve(target);
        debug!("Copying {} -> {}", src.display(), dst.display());

        self.require_exists(&src)?;
        if dst.is_dir() {
            return Err(Self::target_is_directory(&dst));
        }
        if Self::same_file(&src, &dst) {
            debug!("{} and {} are the same file, nothing to copy", src.display(), dst.display());
            return Ok(());
        }

        fs::copy(&src, &dst).map_err(|e| DirkitError::io(display_pair(&src, &dst), e))?;
        Ok(())
    }

    /// Rename or relocate, replacing an existing target file
    pub fn move_entry(&self, source: &str, target: &str) -> DirkitResult<()> {
        let src = self.resolve(source);
        let dst = self.resolve(target);
        debug!("Moving {} -> {}", src.display(), dst.display());

        self.require_exists(&src)?;
        if fs::symlink_metadata(&dst).map(|m| m.is_dir()).unwrap_or(false) {
            return Err(Self::target_is_directory(&dst));
        }

        fs::rename(&src, &dst).map_err(|e| DirkitError::io(display_pair(&src, &dst), e))
    }

    /// Remove a file, symlink or empty directory
    pub fn delete(&self, name: &str) -> DirkitResult<()> {
        let path = self.resolve(name);
        debug!("Deleting {}", path.display());

        let meta = self.require_exists(&path)?;
        if meta.is_dir() {
            self.remove_empty_dir(&path)
        } else {
            fs::remove_file(&path).map_err(|e| DirkitError::io(display(&path), e))
        }
    }

    /// Create one directory; parents are not created
    pub fn create_directory(&self, name: &str) -> DirkitResult<()> {
        let path = self.resolve(name);
        debug!("Creating directory {}", path.display());

        fs::create_dir(&path).map_err(|e| match e.kind() {
            io::ErrorKind::AlreadyExists => DirkitError::AlreadyExists(display(&path)),
            _ => DirkitError::io(display(&path), e),
        })
    }

    /// Remove an empty directory; contents are never removed
    pub fn delete_directory(&self, name: &str) -> DirkitResult<()> {
        let path = self.resolve(name);
        debug!("Deleting directory {}", path.display());

        let meta = self.require_exists(&path)?;
        if !meta.is_dir() {
            return Err(DirkitError::io(
                display(&path),
                io::Error::new(io::ErrorKind::NotADirectory, "not a directory"),
            ));
        }
        self.remove_empty_dir(&path)
    }

    /// Fresh lazy walk over the whole tree; fails only if the root can't be read
    pub fn search(&self, pattern: &str) -> DirkitResult<Search> {
        debug!("Searching {} for {:?}", self.root.display(), pattern);
        fs::read_dir(&self.root).map_err(|e| DirkitError::io(display(&self.root), e))?;
        Ok(Search::new(&self.root, pattern))
    }
}
