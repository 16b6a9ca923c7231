//! Directory-scoped, extension-filtered sets of text units.
//!
//! A [`Collection`] lists its root directory exactly once, at construction.
//! Files created later only join through [`Collection::add`].

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, trace};
use walkdir::WalkDir;

use crate::error::ReaderError;
use crate::filter::{any_match, ExtensionFilter};
use crate::format::column;
use crate::options::UnitOptions;
use crate::unit::TextUnit;
use crate::Result;

/// Width of the name column in collection and library descriptions
pub const NAME_WIDTH: usize = 24;
/// Width of the root column in collection descriptions
pub const ROOT_WIDTH: usize = 40;

/// Something that can be added to a collection.
#[derive(Debug, Clone)]
pub enum AddTarget {
    /// File name resolved against the collection root
    Name(String),
    /// An already loaded unit
    Unit(TextUnit),
}

impl From<&str> for AddTarget {
    fn from(name: &str) -> Self {
        AddTarget::Name(name.to_string())
    }
}

impl From<String> for AddTarget {
    fn from(name: String) -> Self {
        AddTarget::Name(name)
    }
}

impl From<TextUnit> for AddTarget {
    fn from(unit: TextUnit) -> Self {
        AddTarget::Unit(unit)
    }
}

/// A named, ordered set of text units scanned from one directory.
#[derive(Debug, Clone, Serialize)]
pub struct Collection {
    name: String,
    root: PathBuf,
    filters: Vec<ExtensionFilter>,
    members: Vec<TextUnit>,
    #[serde(skip)]
    options: UnitOptions,
}

impl Collection {
    /// Scan `path` with default unit options.
    ///
    /// # Example
    ///
    /// ```rust
    /// use readerlib::Collection;
    /// use std::fs;
    /// use tempfile::tempdir;
    ///
    /// let dir = tempdir().unwrap();
    /// fs::write(dir.path().join("a.txt"), "a\n").unwrap();
    /// fs::write(dir.path().join("b.md"), "b\n").unwrap();
    ///
    /// let docs = Collection::scan("docs", dir.path(), &[".txt"]).unwrap();
    /// assert_eq!(docs.len(), 1);
    /// assert_eq!(docs.lookup("a").unwrap().full_name(), "a.txt");
    /// ```
    pub fn scan<S: AsRef<str>>(
        name: impl Into<String>,
        path: impl AsRef<Path>,
        filters: &[S],
    ) -> Result<Self> {
        Self::scan_with(name, path, filters, UnitOptions::default())
    }

    /// Scan `path`, loading every matching file with `options`.
    ///
    /// Entries are visited in file-name order. A regular file is included
    /// when its extension equals one of the filters, or when the filters
    /// contain the wildcard. Directories are never included.
    pub fn scan_with<S: AsRef<str>>(
        name: impl Into<String>,
        path: impl AsRef<Path>,
        filters: &[S],
        options: UnitOptions,
    ) -> Result<Self> {
        let name = name.into();
        let filters = ExtensionFilter::parse_many(filters)?;
        let root = std::path::absolute(path.as_ref())?;

        if !root.exists() {
            return Err(ReaderError::PathNotFound(root));
        }
        if !root.is_dir() {
            return Err(ReaderError::NotADirectory(root));
        }

        let mut members = Vec::new();
        let walker = WalkDir::new(&root)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name();

        for entry in walker {
            let entry = entry.map_err(std::io::Error::from)?;
            let entry_path = entry.path();

            if !entry_path.is_file() {
                trace!(path = %entry_path.display(), "skipping non-file entry");
                continue;
            }
            if !any_match(&filters, entry_path) {
                trace!(path = %entry_path.display(), "extension filtered out");
                continue;
            }

            members.push(TextUnit::open_with(entry_path, options.clone())?);
        }

        debug!(
            collection = %name,
            root = %root.display(),
            members = members.len(),
            "scanned collection"
        );

        Ok(Self {
            name,
            root,
            filters,
            members,
            options,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Absolute directory the collection was scanned from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Extension filters, in the order they were given or discovered.
    pub fn filters(&self) -> &[ExtensionFilter] {
        &self.filters
    }

    pub fn members(&self) -> &[TextUnit] {
        &self.members
    }

    pub fn members_mut(&mut self) -> &mut [TextUnit] {
        &mut self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Options applied to units created by this collection.
    pub fn options(&self) -> &UnitOptions {
        &self.options
    }

    /// Add a file by name (relative to the root) or an already loaded unit.
    ///
    /// A name must be a single path component; absolute paths and names
    /// containing separators or `..` fail with [`ReaderError::InvalidArgument`].
    /// A missing file yields [`ReaderError::PathNotFound`] and a directory
    /// yields [`ReaderError::TypeMismatch`]; in both cases the collection is
    /// left unchanged. The new unit's extension joins the filters if it is not
    /// already listed.
    pub fn add(&mut self, target: impl Into<AddTarget>) -> Result<&TextUnit> {
        let unit = match target.into() {
            AddTarget::Name(name) => {
                let name = name.trim();
                if Path::new(name).file_name() != Some(OsStr::new(name)) {
                    return Err(ReaderError::InvalidArgument(format!(
                        "'{}' is not a plain file name in '{}'",
                        name,
                        self.root.display()
                    )));
                }
                let path = self.root.join(name);
                if !path.exists() {
                    return Err(ReaderError::PathNotFound(path));
                }
                if path.is_dir() {
                    return Err(ReaderError::TypeMismatch {
                        path,
                        expected: "file",
                        found: "directory",
                    });
                }
                TextUnit::open_with(&path, self.options.clone())?
            }
            AddTarget::Unit(unit) => unit,
        };

        self.record_extension(unit.extension());
        debug!(collection = %self.name, member = %unit.full_name(), "added member");
        self.members.push(unit);
        Ok(&self.members[self.members.len() - 1])
    }

    fn record_extension(&mut self, extension: &str) {
        let filter = ExtensionFilter::Exact(extension.to_string());
        if !self.filters.contains(&filter) {
            self.filters.push(filter);
        }
    }

    /// Drop every member with the given base name. Returns how many were dropped.
    pub fn remove(&mut self, base_name: &str) -> usize {
        let before = self.members.len();
        self.members.retain(|m| m.base_name() != base_name);
        before - self.members.len()
    }

    /// First member with the given base name (case-sensitive).
    pub fn get(&self, base_name: &str) -> Option<&TextUnit> {
        self.members.iter().find(|m| m.base_name() == base_name)
    }

    pub fn get_mut(&mut self, base_name: &str) -> Option<&mut TextUnit> {
        self.members.iter_mut().find(|m| m.base_name() == base_name)
    }

    /// Like [`Collection::get`], failing with [`ReaderError::MemberNotFound`].
    pub fn lookup(&self, base_name: &str) -> Result<&TextUnit> {
        let owner = &self.name;
        self.members
            .iter()
            .find(|m| m.base_name() == base_name)
            .ok_or_else(|| not_found(base_name, owner))
    }

    pub fn lookup_mut(&mut self, base_name: &str) -> Result<&mut TextUnit> {
        let owner = &self.name;
        self.members
            .iter_mut()
            .find(|m| m.base_name() == base_name)
            .ok_or_else(|| not_found(base_name, owner))
    }

    /// Run a transform over every member.
    pub fn apply<F: FnMut(&mut TextUnit)>(&mut self, f: F) {
        self.members.iter_mut().for_each(f);
    }

    /// Write every member next to its source. Returns the paths written.
    pub fn write_all(&self, force: bool) -> Result<Vec<PathBuf>> {
        self.members
            .iter()
            .map(|m| m.write_in_place(force))
            .collect()
    }

    /// One-line summary: name, member count and root.
    pub fn describe(&self) -> String {
        format!(
            "{} {:>5} files  {}",
            column(&self.name, NAME_WIDTH),
            self.members.len(),
            column(&self.root.to_string_lossy(), ROOT_WIDTH).trim_end()
        )
    }

    /// Title line for a member listing.
    pub fn listing_header(&self) -> String {
        let filters: Vec<String> = self.filters.iter().map(|f| f.to_string()).collect();
        format!(
            "List of {} files in {}",
            filters.join(", "),
            self.root.display()
        )
    }

    /// Indexed member lines, compact or verbose.
    pub fn list_members(&self, verbose: bool) -> Vec<String> {
        self.members
            .iter()
            .enumerate()
            .map(|(i, m)| format!("{:>3}. {}", i, m.describe(!verbose)))
            .collect()
    }
}

fn not_found(name: &str, owner: &str) -> ReaderError {
    ReaderError::MemberNotFound {
        kind: "file",
        name: name.to_string(),
        owner: owner.to_string(),
    }
}
