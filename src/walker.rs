use std::path::{Path, PathBuf};

use crate::error::Result;

/// A discovered procedure document.
#[derive(Debug, Clone)]
pub struct DiscoveredFile {
    /// Path relative to the data directory.
    pub relative_path: PathBuf,
    /// Fully resolved absolute path.
    pub absolute_path: PathBuf,
}

impl DiscoveredFile {
    /// File name without extension, lowercased. Used as the catalog key for
    /// documents that carry no title.
    pub fn stem_key(&self) -> String {
        self.relative_path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_lowercase()
    }
}

/// Supported file extensions for document discovery.
const SUPPORTED_EXTENSIONS: &[&str] = &["txt"];

/// List the procedure documents directly inside `root`.
///
/// Skips hidden entries (names starting with `.`) and subdirectories. Results
/// are sorted by file name so the load order does not depend on the
/// platform's directory enumeration order.
pub fn discover_files(root: &Path) -> Result<Vec<DiscoveredFile>> {
    let canonical_root = root.canonicalize()?;
    let mut results = Vec::new();

    for entry in std::fs::read_dir(&canonical_root)? {
        let entry = entry?;
        let file_name = entry.file_name();
        let name = file_name.to_string_lossy();

        if name.starts_with('.') {
            continue;
        }

        // `Path::is_file` follows symlinks; broken links report false.
        let path = entry.path();
        if !path.is_file() || !is_supported(&path) {
            continue;
        }

        let absolute_path = match path.canonicalize() {
            Ok(p) => p,
            Err(_) => continue,
        };

        results.push(DiscoveredFile {
            relative_path: PathBuf::from(file_name),
            absolute_path,
        });
    }

    results.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
    Ok(results)
}

fn is_supported(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext))
}
