// SPDX-License-Identifier: AGPL-3.0-or-later
//! File system entries

use crate::Metadata;
use std::fmt;
use std::fs;

/// Entry kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
    Symlink,
    Unknown,
}

impl From<fs::FileType> for EntryKind {
    fn from(file_type: fs::FileType) -> Self {
        if file_type.is_dir() {
            EntryKind::Directory
        } else if file_type.is_file() {
            EntryKind::File
        } else if file_type.is_symlink() {
            EntryKind::Symlink
        } else {
            EntryKind::Unknown
        }
    }
}

/// A direct child of the service root.
///
/// `metadata` is `None` when the attributes could not be read; such an entry
/// still lists, under its bare name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub name: String,
    pub kind: EntryKind,
    pub metadata: Option<Metadata>,
}

impl Entry {
    pub fn new(name: impl Into<String>, kind: EntryKind, metadata: Option<Metadata>) -> Self {
        Self { name: name.into(), kind, metadata }
    }

    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }

    pub fn is_directory(&self) -> bool {
        self.kind == EntryKind::Directory
    }

    pub fn size(&self) -> Option<u64> {
        self.metadata.map(|m| m.size)
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.metadata {
            Some(meta) => write!(
                f,
                "{} (Size: {} bytes, Last Modified: {})",
                self.name,
                meta.size,
                meta.modified_display()
            ),
            None => f.write_str(&self.name),
        }
    }
}
