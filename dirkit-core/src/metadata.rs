// SPDX-License-Identifier: AGPL-3.0-or-later
//! File and directory metadata

use chrono::{DateTime, SecondsFormat, Utc};
use std::fs;
use std::io;

/// Attributes shown for an entry in a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Metadata {
    pub size: u64,
    pub modified: DateTime<Utc>,
}

impl Metadata {
    pub fn new(size: u64, modified: DateTime<Utc>) -> Self {
        Self { size, modified }
    }

    /// Fails when the platform cannot report a modification time.
    pub fn from_fs(meta: &fs::Metadata) -> io::Result<Self> {
        let modified = meta.modified()?;
        Ok(Self::new(meta.len(), modified.into()))
    }

    pub fn modified_display(&self) -> String {
        format_timestamp(self.modified)
    }
}

/// RFC 3339 in UTC with a `Z` suffix, fractional seconds only when non-zero
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_whole_seconds() {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 10, 15, 30).unwrap();
        assert_eq!(format_timestamp(at), "2024-03-01T10:15:30Z");
    }

    #[test]
    fn test_format_fractional_seconds() {
        let at = Utc.timestamp_millis_opt(1_709_288_130_250).unwrap();
        assert_eq!(format_timestamp(at), "2024-03-01T10:15:30.250Z");
    }

    #[test]
    fn test_from_fs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.bin");
        fs::write(&path, [0u8; 42]).unwrap();

        let meta = Metadata::from_fs(&fs::metadata(&path).unwrap()).unwrap();
        assert_eq!(meta.size, 42);
        assert!(meta.modified <= Utc::now());
    }
}
