use anyhow::{Context, Result};
use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// Rust source parser.
///
/// Turns source files into `syn` syntax trees that the Rust metadata source
/// walks for controllers, handlers and data types.
pub struct AstParser;

/// A successfully parsed Rust file.
#[derive(Debug)]
pub struct ParsedFile {
    pub path: PathBuf,
    pub syntax_tree: syn::File,
}

impl AstParser {
    /// Read and parse a single file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the Rust source file
    ///
    /// # Returns
    ///
    /// A `ParsedFile` holding the path and its syntax tree.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The file contains invalid Rust syntax
    pub fn parse_file(path: &Path) -> Result<ParsedFile> {
        debug!("Parsing file: {}", path.display());

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;

        Self::parse_source(path, &content)
    }

    /// Parse already loaded source text attributed to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if `content` is not valid Rust syntax.
    pub fn parse_source(path: &Path, content: &str) -> Result<ParsedFile> {
        let syntax_tree = syn::parse_file(content)
            .with_context(|| format!("Failed to parse Rust syntax in file: {}", path.display()))?;

        Ok(ParsedFile {
            path: path.to_path_buf(),
            syntax_tree,
        })
    }

    /// Parse every file, keeping the ones that succeed in their input order.
    ///
    /// Failures are logged and skipped so one broken file does not hide the
    /// controllers defined elsewhere.
    ///
    /// # Arguments
    ///
    /// * `paths` - Files to parse, usually [`crate::scanner::ScanResult::rust_files`]
    ///
    /// # Returns
    ///
    /// The successfully parsed files; may be empty.
    pub fn parse_files(paths: &[PathBuf]) -> Vec<ParsedFile> {
        let parsed: Vec<ParsedFile> = paths
            .iter()
            .filter_map(|path| match Self::parse_file(path) {
                Ok(parsed) => Some(parsed),
                Err(e) => {
                    warn!("Skipping {}: {:#}", path.display(), e);
                    None
                }
            })
            .collect();

        debug!(
            "Parsing complete: {} succeeded, {} failed",
            parsed.len(),
            paths.len() - parsed.len()
        );
        parsed
    }
}
