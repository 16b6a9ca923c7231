//! Extension filters for directory scans.
//!
//! A filter is either a literal extension including its leading dot
//! (`".txt"`) or the wildcard `"*"`, which accepts every regular file.

use std::fmt;
use std::path::Path;

use serde::{Serialize, Serializer};

use crate::error::ReaderError;
use crate::Result;

/// Wildcard filter string.
pub const WILDCARD: &str = "*";

/// One extension filter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ExtensionFilter {
    /// Every regular file
    Any,
    /// Files whose extension (with leading dot) equals this string;
    /// the empty string selects files without an extension
    Exact(String),
}

impl ExtensionFilter {
    /// Parse a filter, normalizing `"txt"` to `".txt"`.
    pub fn parse(filter: &str) -> Result<Self> {
        let filter = filter.trim();
        if filter == WILDCARD {
            return Ok(ExtensionFilter::Any);
        }
        if filter.is_empty() {
            return Ok(ExtensionFilter::Exact(String::new()));
        }
        let ext = if filter.starts_with('.') {
            filter.to_string()
        } else {
            format!(".{}", filter)
        };
        if ext.len() == 1 || ext.contains(['/', '\\', '*']) {
            return Err(ReaderError::InvalidFilter(filter.to_string()));
        }
        Ok(ExtensionFilter::Exact(ext))
    }

    /// Parse a list of filters.
    pub fn parse_many<S: AsRef<str>>(filters: &[S]) -> Result<Vec<Self>> {
        filters.iter().map(|f| Self::parse(f.as_ref())).collect()
    }

    /// Check an extension string (with leading dot, or empty) against this filter.
    pub fn matches_extension(&self, extension: &str) -> bool {
        match self {
            ExtensionFilter::Any => true,
            ExtensionFilter::Exact(ext) => ext == extension,
        }
    }

    /// Check a path's extension against this filter. Does not touch the filesystem.
    pub fn matches(&self, path: &Path) -> bool {
        self.matches_extension(&dotted_extension(path))
    }
}

impl fmt::Display for ExtensionFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtensionFilter::Any => f.write_str(WILDCARD),
            ExtensionFilter::Exact(ext) => f.write_str(ext),
        }
    }
}

impl Serialize for ExtensionFilter {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A path's extension with its leading dot, or the empty string.
pub fn dotted_extension(path: &Path) -> String {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default()
}

/// True if any filter in the list accepts the path.
pub fn any_match(filters: &[ExtensionFilter], path: &Path) -> bool {
    filters.iter().any(|f| f.matches(path))
}
