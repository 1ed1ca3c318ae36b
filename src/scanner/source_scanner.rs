use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{CiteLinesError, Result};

/// Discovers catalog spreadsheets in an input directory. Only used when the
/// operator does not list files explicitly; the pipeline itself accepts any
/// resolved path list.
pub struct SourceScanner {
    extensions: Vec<String>,
}

impl SourceScanner {
    pub fn new(extensions: &[String]) -> Self {
        Self {
            extensions: extensions
                .iter()
                .map(|e| e.trim_start_matches('.').to_ascii_lowercase())
                .collect(),
        }
    }

    /// List matching files directly inside `dir`, sorted by file name so
    /// repeated runs see the catalog in a stable order. Dotfiles and `~$`
    /// Excel lock files are skipped.
    pub fn scan_directory<P: AsRef<Path>>(&self, dir: P) -> Result<Vec<PathBuf>> {
        let dir = dir.as_ref();

        if !dir.exists() {
            return Err(CiteLinesError::SourceRead {
                path: dir.display().to_string(),
                message: "input directory does not exist".to_string(),
            });
        }
        if !dir.is_dir() {
            return Err(CiteLinesError::SourceRead {
                path: dir.display().to_string(),
                message: "input path is not a directory".to_string(),
            });
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(false)
        {
            let entry = entry.map_err(|e| CiteLinesError::SourceRead {
                path: dir.display().to_string(),
                message: e.to_string(),
            })?;

            if !entry.file_type().is_file() {
                continue;
            }
            if self.is_candidate(entry.path()) {
                files.push(entry.into_path());
            }
        }

        files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        log::debug!("found {} source file(s) in {}", files.len(), dir.display());

        Ok(files)
    }

    fn is_candidate(&self, path: &Path) -> bool {
        let name = match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => name,
            None => return false,
        };

        // Excel leaves ~$ lock files next to open workbooks
        if name.starts_with('.') || name.starts_with("~$") {
            return false;
        }

        path.extension()
            .and_then(|e| e.to_str())
            .map(|ext| {
                let ext = ext.to_ascii_lowercase();
                self.extensions.iter().any(|allowed| *allowed == ext)
            })
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn scanner() -> SourceScanner {
        SourceScanner::new(&["xlsx".to_string(), "csv".to_string()])
    }

    #[test]
    fn test_scan_finds_matching_files_sorted_by_name() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("b.xlsx"), "x").unwrap();
        fs::write(dir.path().join("a.csv"), "x").unwrap();
        fs::write(dir.path().join("notes.txt"), "x").unwrap();

        let files = scanner().scan_directory(dir.path()).unwrap();

        let names: Vec<String> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.csv", "b.xlsx"]);
    }

    #[test]
    fn test_scan_skips_lock_files_and_dotfiles() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("catalog.xlsx"), "x").unwrap();
        fs::write(dir.path().join("~$catalog.xlsx"), "x").unwrap();
        fs::write(dir.path().join(".hidden.xlsx"), "x").unwrap();

        let files = scanner().scan_directory(dir.path()).unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("catalog.xlsx"));
    }

    #[test]
    fn test_scan_does_not_recurse() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("nested");
        fs::create_dir(&nested).unwrap();
        fs::write(nested.join("deep.xlsx"), "x").unwrap();

        let files = scanner().scan_directory(dir.path()).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_scan_matches_extensions_case_insensitively() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("CATALOG.XLSX"), "x").unwrap();

        let files = scanner().scan_directory(dir.path()).unwrap();
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn test_missing_directory_is_source_read_error() {
        let result = scanner().scan_directory("/nonexistent/input");
        assert!(matches!(result, Err(CiteLinesError::SourceRead { .. })));
    }

    #[test]
    fn test_file_as_directory_is_source_read_error() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("catalog.xlsx");
        fs::write(&file, "x").unwrap();

        let result = scanner().scan_directory(&file);
        assert!(matches!(result, Err(CiteLinesError::SourceRead { .. })));
    }
}
