//! Removal of batch files left by a previous run.

use anyhow::{Context, Result};
use shared::paths::NamePattern;
use shared::OutputPaths;
use std::io::ErrorKind;
use tracing::{debug, info};

/// Delete every file in the output directory matching one of `patterns`.
///
/// Returns the number of files removed. A missing directory counts as clean.
pub fn remove_matching(paths: &OutputPaths, patterns: &[NamePattern]) -> Result<usize> {
    let dir = paths.root();
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(dir = %dir.display(), "Output directory does not exist, nothing to clean");
            return Ok(0);
        }
        Err(e) => {
            return Err(e)
                .with_context(|| format!("Failed to list output directory: {}", dir.display()))
        }
    };

    let mut removed = 0;
    for entry in entries {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let file_name = entry.file_name();
        let Some(file_name) = file_name.to_str() else {
            continue;
        };

        if patterns.iter().any(|p| p.matches(file_name)) {
            std::fs::remove_file(&path)
                .with_context(|| format!("Failed to remove stale output: {}", path.display()))?;
            debug!(path = %path.display(), "Removed stale output");
            removed += 1;
        }
    }

    Ok(removed)
}

/// Delete all batch files a previous run may have written
pub fn remove_stale_outputs(paths: &OutputPaths) -> Result<usize> {
    let removed = remove_matching(paths, &OutputPaths::stale_output_patterns())?;
    info!(removed, dir = %paths.root().display(), "Cleaned previous report files");
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_removes_only_report_files() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let root = temp_dir.path();
        for name in [
            "movies-1.txt",
            "anime_movies-2.txt",
            "series-1.txt",
            "anime_series-1.txt",
            "collections-4.txt",
            "notes.txt",
            "movies-1.log",
            "unmatched_assets.log",
        ] {
            std::fs::write(root.join(name), "x")?;
        }
        std::fs::create_dir(root.join("movies-dir.txt"))?;

        let removed = remove_stale_outputs(&OutputPaths::new(root))?;

        assert_eq!(removed, 5);
        let mut left: Vec<String> = std::fs::read_dir(root)?
            .map(|e| e.map(|e| e.file_name().to_string_lossy().to_string()))
            .collect::<std::io::Result<_>>()?;
        left.sort();
        assert_eq!(
            left,
            vec!["movies-1.log", "movies-dir.txt", "notes.txt", "unmatched_assets.log"]
        );

        Ok(())
    }

    #[test]
    fn test_missing_directory_is_clean() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let paths = OutputPaths::new(temp_dir.path().join("absent"));
        assert_eq!(remove_stale_outputs(&paths)?, 0);
        Ok(())
    }

    #[test]
    fn test_second_run_removes_nothing() -> Result<()> {
        let temp_dir = TempDir::new()?;
        std::fs::write(temp_dir.path().join("series-1.txt"), "x")?;
        let paths = OutputPaths::new(temp_dir.path());

        assert_eq!(remove_stale_outputs(&paths)?, 1);
        assert_eq!(remove_stale_outputs(&paths)?, 0);
        Ok(())
    }
}
