// SPDX-License-Identifier: AGPL-3.0-or-later
//! dirkit core
//!
//! Directory operations resolved against a fixed root: listing with
//! attributes, copy, move, delete, mkdir, rmdir and recursive name search.

pub mod entry;
pub mod error;
pub mod metadata;
pub mod search;
pub mod service;

pub use entry::{Entry, EntryKind};
pub use error::{DirkitError, DirkitResult, ErrorKind};
pub use metadata::Metadata;
pub use search::Search;
pub use service::DirectoryService;
