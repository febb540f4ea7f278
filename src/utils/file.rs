// Cross-platform file utilities

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Extension of recorded outcome event files
const EVENT_EXTENSION: &str = "jsonl";

/// File utilities for cross-platform operations
pub struct FileUtils;

impl FileUtils {
    /// Collect all .jsonl event files from a path
    pub fn collect_event_files(path: &Path) -> Vec<PathBuf> {
        let mut files = Vec::new();

        if path.is_file() {
            if Self::is_event_file(path) {
                files.push(path.to_path_buf());
            }
        } else if path.is_dir() {
            // Use walkdir for cross-platform traversal
            let walker = walkdir::WalkDir::new(path).into_iter().filter_entry(|e| {
                // Always include the root directory itself, even if it starts with '.'
                if e.depth() == 0 {
                    return true;
                }
                !e.file_name().to_string_lossy().starts_with('.')
            });

            for entry in walker.flatten() {
                if entry.file_type().is_file() && Self::is_event_file(entry.path()) {
                    files.push(entry.path().to_path_buf());
                }
            }
        }

        files
    }

    /// Sort files by given criteria
    pub fn sort_files(files: &mut [PathBuf], sort_by: &str) {
        match sort_by {
            "name" => files.sort_by(|a, b| a.file_name().cmp(&b.file_name())),
            "size" => files.sort_by_key(|a| Self::get_file_size(a).unwrap_or(0)),
            "mtime" => files.sort_by_key(|a| Self::get_mtime(a).unwrap_or(0)),
            _ => files.sort(), // Default path sort
        }
    }

    /// Check if file has the event extension
    pub fn is_event_file(path: &Path) -> bool {
        path.extension().is_some_and(|e| e == EVENT_EXTENSION)
    }

    /// Get file modification time (cross-platform)
    pub fn get_mtime(path: &Path) -> Result<i64> {
        use std::fs::metadata;
        use std::time::UNIX_EPOCH;
        let metadata =
            metadata(path).context(format!("Failed to get metadata for: {}", path.display()))?;
        Ok(metadata.modified()?.duration_since(UNIX_EPOCH)?.as_secs() as i64)
    }

    /// Get file size (cross-platform)
    pub fn get_file_size(path: &Path) -> Result<u64> {
        use std::fs;
        let metadata =
            fs::metadata(path).context(format!("Failed to get size for: {}", path.display()))?;
        Ok(metadata.len())
    }

    /// Read file content
    pub fn read_file(path: &Path) -> Result<String> {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_is_event_file() {
        assert!(FileUtils::is_event_file(Path::new("run.jsonl")));
        assert!(!FileUtils::is_event_file(Path::new("run.json")));
        assert!(!FileUtils::is_event_file(Path::new("run")));
    }

    #[test]
    fn test_collect_event_files_skips_hidden() {
        let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
        fs::write(temp_dir.path().join("a.jsonl"), "").unwrap();
        fs::write(temp_dir.path().join("notes.txt"), "").unwrap();
        fs::create_dir(temp_dir.path().join(".hidden")).unwrap();
        fs::write(temp_dir.path().join(".hidden/b.jsonl"), "").unwrap();

        let files = FileUtils::collect_event_files(temp_dir.path());
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("a.jsonl"));
    }

    #[test]
    fn test_sort_files_by_name() {
        let mut files = vec![
            PathBuf::from("dir/b.jsonl"),
            PathBuf::from("other/a.jsonl"),
        ];
        FileUtils::sort_files(&mut files, "name");
        assert!(files[0].ends_with("a.jsonl"));
    }
}
