//! File path utilities for report output.
//!
//! Batch files live flat in one output directory and are named
//! `<item_type>-<N>.txt`, N starting at 1.

use crate::models::ItemType;
use std::path::{Path, PathBuf};

/// Simple `<prefix>*<suffix>` file name pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamePattern {
    prefix: String,
    suffix: String,
}

impl NamePattern {
    pub fn new(prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            suffix: suffix.into(),
        }
    }

    /// Check a bare file name (no directory part) against the pattern
    pub fn matches(&self, file_name: &str) -> bool {
        file_name.len() >= self.prefix.len() + self.suffix.len()
            && file_name.starts_with(&self.prefix)
            && file_name.ends_with(&self.suffix)
    }
}

impl std::fmt::Display for NamePattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}*{}", self.prefix, self.suffix)
    }
}

/// File path manager for report output
#[derive(Debug, Clone)]
pub struct OutputPaths {
    root: PathBuf,
}

impl OutputPaths {
    /// Create a new OutputPaths with the given output directory
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Get the output directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the path of batch file number `index` (1-based) for a bucket
    pub fn batch_file(&self, item_type: ItemType, index: usize) -> PathBuf {
        self.root.join(format!("{}-{}.txt", item_type.as_str(), index))
    }

    /// Patterns matching every batch file a previous run may have produced
    pub fn stale_output_patterns() -> Vec<NamePattern> {
        ItemType::ALL
            .iter()
            .map(|item_type| NamePattern::new(item_type.as_str(), ".txt"))
            .collect()
    }

    /// Create the output directory if needed
    pub fn create_dirs(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_file_names() {
        let paths = OutputPaths::new("/out");

        assert_eq!(
            paths.batch_file(ItemType::Movies, 1),
            PathBuf::from("/out/movies-1.txt")
        );
        assert_eq!(
            paths.batch_file(ItemType::AnimeSeries, 12),
            PathBuf::from("/out/anime_series-12.txt")
        );
    }

    #[test]
    fn test_name_pattern() {
        let pattern = NamePattern::new("series", ".txt");
        assert!(pattern.matches("series-1.txt"));
        assert!(pattern.matches("series.txt"));
        assert!(!pattern.matches("anime_series-1.txt"));
        assert!(!pattern.matches("series-1.log"));
        assert_eq!(pattern.to_string(), "series*.txt");
    }

    #[test]
    fn test_stale_output_patterns_cover_every_bucket() {
        let patterns = OutputPaths::stale_output_patterns();
        assert_eq!(patterns.len(), 5);
        for item_type in ItemType::ALL {
            let name = format!("{}-3.txt", item_type.as_str());
            assert!(patterns.iter().any(|p| p.matches(&name)), "{}", name);
        }
    }
}
