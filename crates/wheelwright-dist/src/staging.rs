//! Staging tree: compiled artifacts mapped to archive-relative paths.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::{DistError, DistResult};

/// Archive-relative path → source file mapping, built by the build
/// orchestrator and consumed by the wheel assembler.
///
/// Iteration order is the archive order (sorted by path). Inserting the
/// same path twice is an error; once handed to the assembler the tree is
/// read-only.
#[derive(Debug, Default)]
pub struct StagingTree {
    entries: BTreeMap<String, PathBuf>,
}

impl StagingTree {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one artifact under its archive path.
    pub fn insert(&mut self, archive_path: String, source: PathBuf) -> DistResult<()> {
        if self.entries.contains_key(&archive_path) {
            return Err(DistError::DuplicateEntry(archive_path));
        }
        self.entries.insert(archive_path, source);
        Ok(())
    }

    /// Entries sorted by archive path.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Path)> {
        self.entries
            .iter()
            .map(|(path, source)| (path.as_str(), source.as_path()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;

    #[test]
    fn StagingTree___insert___rejects_duplicate_path() {
        let mut staging = StagingTree::new();
        staging
            .insert("pkg/a.so".to_string(), PathBuf::from("/build/a.so"))
            .unwrap();

        let result = staging.insert("pkg/a.so".to_string(), PathBuf::from("/build/other.so"));

        assert!(matches!(result, Err(DistError::DuplicateEntry(_))));
    }

    #[test]
    fn StagingTree___iter___is_sorted_by_path() {
        let mut staging = StagingTree::new();
        staging
            .insert("pkg/z.so".to_string(), PathBuf::from("/z"))
            .unwrap();
        staging
            .insert("pkg/a.so".to_string(), PathBuf::from("/a"))
            .unwrap();

        let paths: Vec<&str> = staging.iter().map(|(path, _)| path).collect();

        assert_eq!(paths, ["pkg/a.so", "pkg/z.so"]);
    }
}
