use log::warn;
use std::path::PathBuf;
use walkdir::WalkDir;

/// Source tree scanner.
///
/// Walks a service's project directory and collects its `.rs` files in a
/// stable order (entries sorted by file name), so that containers are always
/// discovered in the same sequence. Build output (`target`) and hidden
/// directories are skipped.
///
/// # Example
///
/// ```no_run
/// use controller_docs::scanner::SourceScanner;
/// use std::path::PathBuf;
///
/// let result = SourceScanner::new(PathBuf::from("./my-service")).scan();
/// println!("Found {} Rust files", result.rust_files.len());
/// ```
pub struct SourceScanner {
    root_path: PathBuf,
}

/// Files found by a scan, plus anything that could not be read.
pub struct ScanResult {
    pub rust_files: Vec<PathBuf>,
    /// One message per entry that could not be accessed
    pub warnings: Vec<String>,
}

impl SourceScanner {
    /// Creates a scanner rooted at a service's project directory.
    ///
    /// # Arguments
    ///
    /// * `root_path` - Directory whose `.rs` files are collected
    pub fn new(root_path: PathBuf) -> Self {
        Self { root_path }
    }

    /// Collect every `.rs` file below the root.
    ///
    /// Entries are visited in file-name order, skipping:
    /// - The `target` directory (build output)
    /// - Hidden directories (starting with `.`)
    ///
    /// # Returns
    ///
    /// A [`ScanResult`] with the files in discovery order. Inaccessible
    /// entries (including a missing root) are logged and reported in
    /// [`ScanResult::warnings`]; scanning continues past them.
    pub fn scan(&self) -> ScanResult {
        let mut rust_files = Vec::new();
        let mut warnings = Vec::new();

        let walker = WalkDir::new(&self.root_path)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| {
                if e.depth() == 0 {
                    return true;
                }
                let file_name = e.file_name().to_string_lossy();
                !file_name.starts_with('.') && file_name != "target"
            });

        for entry in walker {
            match entry {
                Ok(entry) => {
                    let path = entry.path();
                    if entry.file_type().is_file()
                        && path.extension().and_then(|s| s.to_str()) == Some("rs")
                    {
                        rust_files.push(path.to_path_buf());
                    }
                }
                Err(e) => {
                    let warning = format!("Failed to access path: {}", e);
                    warn!("{}", warning);
                    warnings.push(warning);
                }
            }
        }

        ScanResult {
            rust_files,
            warnings,
        }
    }
}
