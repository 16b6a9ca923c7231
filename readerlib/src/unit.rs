//! A single text file held as an original snapshot plus a working copy.
//!
//! A [`TextUnit`] reads its file once at construction. The lines read are kept
//! unchanged as the original; every transform works on a separate working
//! buffer, which [`TextUnit::reset`] restores from the original.
//!
//! ```rust
//! use readerlib::TextUnit;
//! use std::fs;
//! use tempfile::tempdir;
//!
//! let dir = tempdir().unwrap();
//! let path = dir.path().join("notes.txt");
//! fs::write(&path, "keep\n// drop\n\nkeep too\n").unwrap();
//!
//! let mut unit = TextUnit::open(path.to_str().unwrap()).unwrap();
//! unit.strip_comments();
//! unit.remove_blank_lines();
//! assert_eq!(unit.lines(), ["keep\n", "keep too\n"]);
//! assert!(unit.edited());
//!
//! unit.reset();
//! assert!(!unit.edited());
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use crate::error::ReaderError;
use crate::filter::dotted_extension;
use crate::format::{
    column, format_size, COMPACT_DIR_WIDTH, COMPACT_NAME_WIDTH, FULL_DIR_WIDTH, FULL_NAME_WIDTH,
    SIZE_WIDTH,
};
use crate::options::{JoinMode, Layout, UnitOptions};
use crate::transform;
use crate::Result;

/// One file's original and working line buffers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextUnit {
    source_path: PathBuf,
    base_name: String,
    full_name: String,
    directory: PathBuf,
    extension: String,
    size_bytes: u64,
    #[serde(skip)]
    original: Vec<String>,
    #[serde(skip)]
    current: Vec<String>,
    layout: Layout,
    options: UnitOptions,
}

impl TextUnit {
    /// Load a file with default options.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with(path, UnitOptions::default())
    }

    /// Load a file with the given options.
    ///
    /// The path is trimmed of surrounding whitespace and resolved to an
    /// absolute path. Fails with [`ReaderError::InvalidArgument`] for an empty
    /// or non UTF-8 path and [`ReaderError::FileRead`] when the file cannot be
    /// read.
    pub fn open_with(path: impl AsRef<Path>, options: UnitOptions) -> Result<Self> {
        let raw = path.as_ref().to_str().ok_or_else(|| {
            ReaderError::InvalidArgument(format!(
                "path is not valid UTF-8: {}",
                path.as_ref().display()
            ))
        })?;
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ReaderError::InvalidArgument("path is empty".to_string()));
        }

        let source_path = std::path::absolute(trimmed)?;
        let bytes = fs::read(&source_path).map_err(|e| ReaderError::FileRead {
            path: source_path.clone(),
            source: e,
        })?;
        let size_bytes = fs::metadata(&source_path)
            .map(|m| m.len())
            .unwrap_or(bytes.len() as u64);

        // Invalid UTF-8 sequences become U+FFFD; there is no encoding detection.
        let text = String::from_utf8_lossy(&bytes);
        let original = transform::split_lines(&text);
        debug!(
            path = %source_path.display(),
            lines = original.len(),
            size_bytes,
            "loaded text unit"
        );

        Ok(Self {
            base_name: file_stem(&source_path),
            full_name: file_name(&source_path),
            directory: source_path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_default(),
            extension: dotted_extension(&source_path),
            source_path,
            size_bytes,
            current: original.clone(),
            original,
            layout: Layout::Lines,
            options,
        })
    }

    /// Absolute path the unit was loaded from.
    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    /// File name without its extension.
    pub fn base_name(&self) -> &str {
        &self.base_name
    }

    /// File name with its extension.
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// Directory containing the file.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Extension with its leading dot, or empty.
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// File size in bytes at load time.
    pub fn size_bytes(&self) -> u64 {
        self.size_bytes
    }

    /// Lines as read from disk.
    pub fn original_lines(&self) -> &[String] {
        &self.original
    }

    /// Current working buffer.
    pub fn lines(&self) -> &[String] {
        &self.current
    }

    pub fn line_count(&self) -> usize {
        self.current.len()
    }

    /// Whether the working buffer holds lines or tokens.
    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn options(&self) -> &UnitOptions {
        &self.options
    }

    pub fn comment_marker(&self) -> &str {
        &self.options.comment_marker
    }

    pub fn set_comment_marker(&mut self, marker: impl Into<String>) {
        self.options.comment_marker = marker.into();
    }

    pub fn join_mode(&self) -> &JoinMode {
        &self.options.join_mode
    }

    pub fn set_join_mode(&mut self, mode: JoinMode) {
        self.options.join_mode = mode;
    }

    pub fn is_write_protected(&self) -> bool {
        self.options.write_protected
    }

    /// Toggle write protection.
    pub fn set_protection(&mut self, protected: bool) {
        self.options.write_protected = protected;
    }

    /// True when the working buffer differs from the original.
    pub fn edited(&self) -> bool {
        self.current != self.original
    }

    /// Restore the working buffer from the original snapshot.
    pub fn reset(&mut self) {
        self.current = self.original.clone();
        self.layout = Layout::Lines;
    }

    /// Drop every line containing the configured comment marker.
    pub fn strip_comments(&mut self) {
        let marker = self.options.comment_marker.clone();
        self.remove_comments(&marker);
    }

    /// Drop every line containing `marker` as a literal substring.
    ///
    /// This is a plain substring test: a marker inside a string literal
    /// removes the line too. An empty marker removes nothing (every line
    /// would contain it).
    pub fn remove_comments(&mut self, marker: &str) {
        if marker.is_empty() {
            return;
        }
        let lines = std::mem::take(&mut self.current);
        self.current = transform::remove_comments(lines, marker);
    }

    /// Drop lines that are exactly one line terminator.
    pub fn remove_blank_lines(&mut self) {
        let lines = std::mem::take(&mut self.current);
        self.current = transform::remove_blank_lines(lines);
    }

    /// Replace the buffer with its whitespace-delimited tokens.
    pub fn split_by_space(&mut self) {
        self.current = transform::split_by_space(&self.current);
        self.layout = Layout::Tokens;
    }

    /// Replace the buffer with word runs and single punctuation marks.
    pub fn split_punctuation(&mut self) {
        self.current = transform::split_punctuation(&self.current);
        self.layout = Layout::Tokens;
    }

    /// Replace the buffer with one entry per character.
    pub fn split_characters(&mut self) {
        self.current = transform::split_characters(&self.current);
        self.layout = Layout::Tokens;
    }

    /// Replace the working buffer with a single block of text.
    ///
    /// The text is split back into terminator-preserving lines, so the
    /// buffer always stays a line sequence.
    pub fn set_text(&mut self, text: &str) {
        self.current = transform::split_lines(text);
        self.layout = Layout::Lines;
    }

    /// Separator `write` would use right now.
    pub fn separator(&self) -> &str {
        self.options.join_mode.separator(self.layout)
    }

    /// The working buffer joined with the resolved separator.
    pub fn text(&self) -> String {
        self.current.join(self.separator())
    }

    /// Where a write to `target` actually lands.
    ///
    /// The target itself is used only when protection is off and `force` is
    /// set; otherwise the protective suffix is appended.
    pub fn write_target(&self, target: &Path, force: bool) -> PathBuf {
        if self.options.write_protected || !force {
            let mut redirected = target.as_os_str().to_os_string();
            redirected.push(&self.options.protect_suffix);
            PathBuf::from(redirected)
        } else {
            target.to_path_buf()
        }
    }

    /// Write the joined buffer to `target` (or its protected variant).
    ///
    /// Returns the path actually written.
    pub fn write(&self, target: impl AsRef<Path>, force: bool) -> Result<PathBuf> {
        let path = self.write_target(target.as_ref(), force);
        let text = self.text();
        fs::write(&path, &text).map_err(|e| ReaderError::FileWrite {
            path: path.clone(),
            source: e,
        })?;
        debug!(
            path = %path.display(),
            bytes = text.len(),
            protected = self.options.write_protected,
            "wrote text unit"
        );
        Ok(path)
    }

    /// Write next to (or over) the source file.
    pub fn write_in_place(&self, force: bool) -> Result<PathBuf> {
        self.write(&self.source_path, force)
    }

    /// One-line summary: name, size, directory and edited flag.
    pub fn describe(&self, compact: bool) -> String {
        let (name_width, dir_width) = if compact {
            (COMPACT_NAME_WIDTH, COMPACT_DIR_WIDTH)
        } else {
            (FULL_NAME_WIDTH, FULL_DIR_WIDTH)
        };
        let mut line = format!(
            "{} {:>size_width$}  {} {}",
            column(&self.full_name, name_width),
            format_size(self.size_bytes),
            column(&self.directory.to_string_lossy(), dir_width),
            if self.edited() { "edited" } else { "original" },
            size_width = SIZE_WIDTH,
        );
        if !compact {
            line.push_str(&format!(
                "  {} lines, {}",
                self.current.len(),
                match self.layout {
                    Layout::Lines => "lines",
                    Layout::Tokens => "tokens",
                }
            ));
        }
        line
    }
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default()
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use tempfile::tempdir;

    fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_open_derives_names() {
        let temp = tempdir().unwrap();
        let path = write_file(temp.path(), "notes.txt", "one\ntwo\n");

        let unit = TextUnit::open(&path).unwrap();

        assert_eq!(unit.base_name(), "notes");
        assert_eq!(unit.full_name(), "notes.txt");
        assert_eq!(unit.extension(), ".txt");
        assert_eq!(unit.directory(), temp.path());
        assert_eq!(unit.source_path(), path.as_path());
        assert_eq!(unit.size_bytes(), 8);
        assert_eq!(unit.original_lines(), ["one\n", "two\n"]);
        assert_eq!(unit.lines(), unit.original_lines());
        assert_eq!(unit.comment_marker(), "//");
        assert!(unit.is_write_protected());
        assert_eq!(unit.separator(), "");
        assert!(!unit.edited());
    }

    #[test]
    fn test_open_trims_path() {
        let temp = tempdir().unwrap();
        let path = write_file(temp.path(), "a.txt", "x\n");
        let padded = format!("  {}\t", path.display());

        let unit = TextUnit::open(padded).unwrap();
        assert_eq!(unit.full_name(), "a.txt");
    }

    #[test]
    fn test_open_empty_path() {
        let err = TextUnit::open("   ").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn test_open_missing_file() {
        let temp = tempdir().unwrap();
        let err = TextUnit::open(temp.path().join("missing.txt")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(matches!(err, ReaderError::FileRead { .. }));
    }

    #[test]
    fn test_open_invalid_utf8_is_lossy() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("logo.png");
        fs::write(&path, [0x89, 0x50, 0x4e, 0x47, 0xff, 0xfe, 0x0a]).unwrap();

        let unit = TextUnit::open(&path).unwrap();

        assert_eq!(unit.size_bytes(), 7);
        assert_eq!(unit.line_count(), 1);
        assert!(unit.lines()[0].starts_with('\u{FFFD}'));
        assert!(unit.lines()[0].ends_with('\n'));
        assert!(unit.lines()[0].contains("PNG"));
    }

    #[test]
    fn test_open_directory_fails() {
        let temp = tempdir().unwrap();
        assert!(TextUnit::open(temp.path()).is_err());
    }

    #[test]
    fn test_remove_blank_lines_idempotent() {
        let temp = tempdir().unwrap();
        let path = write_file(temp.path(), "a.txt", "a\n\n  \nb\n\n");
        let mut unit = TextUnit::open(&path).unwrap();

        unit.remove_blank_lines();
        let once = unit.lines().to_vec();
        unit.remove_blank_lines();

        assert_eq!(once, ["a\n", "  \n", "b\n"]);
        assert_eq!(unit.lines(), once.as_slice());
        assert!(unit.edited());
    }

    #[test]
    fn test_strip_comments_uses_marker() {
        let temp = tempdir().unwrap();
        let path = write_file(temp.path(), "a.py", "# head\nx = 1\ny = 2  # tail\n");
        let options = UnitOptions::new().comment_marker("#");
        let mut unit = TextUnit::open_with(&path, options).unwrap();

        unit.strip_comments();
        assert_eq!(unit.lines(), ["x = 1\n"]);
    }

    #[test]
    fn test_empty_marker_removes_nothing() {
        let temp = tempdir().unwrap();
        let path = write_file(temp.path(), "a.txt", "a\nb\n");
        let mut unit = TextUnit::open(&path).unwrap();

        unit.remove_comments("");
        assert!(!unit.edited());
    }

    #[test]
    fn test_reset_restores_and_isolates() {
        let temp = tempdir().unwrap();
        let path = write_file(temp.path(), "a.txt", "hello world\n// c\n");
        let mut unit = TextUnit::open(&path).unwrap();

        unit.strip_comments();
        unit.split_by_space();
        assert!(unit.edited());
        assert_eq!(unit.layout(), Layout::Tokens);

        unit.reset();
        assert!(!unit.edited());
        assert_eq!(unit.layout(), Layout::Lines);
        assert_eq!(unit.lines(), unit.original_lines());

        unit.split_characters();
        assert_eq!(unit.original_lines(), ["hello world\n", "// c\n"]);
    }

    #[test]
    fn test_split_characters_line() {
        let temp = tempdir().unwrap();
        let path = write_file(temp.path(), "a.txt", "ab\n");
        let mut unit = TextUnit::open(&path).unwrap();

        unit.split_characters();
        assert_eq!(unit.lines(), ["a", "b", "\n"]);
        assert_eq!(unit.separator(), "\n");
    }

    #[test]
    fn test_split_punctuation_line() {
        let temp = tempdir().unwrap();
        let path = write_file(temp.path(), "a.txt", "go!\n");
        let mut unit = TextUnit::open(&path).unwrap();

        unit.split_punctuation();
        assert_eq!(unit.lines(), ["go", "!"]);
        assert_eq!(unit.text(), "go\n!");
    }

    #[test]
    fn test_split_by_space_joins_with_newline() {
        let temp = tempdir().unwrap();
        let path = write_file(temp.path(), "a.txt", "one two\nthree\n");
        let mut unit = TextUnit::open(&path).unwrap();

        unit.split_by_space();
        assert_eq!(unit.text(), "one\ntwo\nthree");
    }

    #[test]
    fn test_explicit_join_mode_overrides_layout() {
        let temp = tempdir().unwrap();
        let path = write_file(temp.path(), "a.txt", "one two\n");
        let mut unit = TextUnit::open(&path).unwrap();

        unit.set_join_mode(JoinMode::Custom(" ".to_string()));
        unit.split_by_space();
        assert_eq!(unit.text(), "one two");

        unit.set_join_mode(JoinMode::Lines);
        assert_eq!(unit.text(), "onetwo");
    }

    #[test]
    fn test_set_text_splits_into_lines() {
        let temp = tempdir().unwrap();
        let path = write_file(temp.path(), "a.txt", "a\n");
        let mut unit = TextUnit::open(&path).unwrap();

        unit.split_characters();
        unit.set_text("x\ny\n");
        assert_eq!(unit.lines(), ["x\n", "y\n"]);
        assert_eq!(unit.layout(), Layout::Lines);
        assert_eq!(unit.text(), "x\ny\n");
    }

    #[test]
    fn test_write_round_trip_unprotected_forced() {
        let temp = tempdir().unwrap();
        let content = "first\n\nsecond\r\nlast";
        let path = write_file(temp.path(), "a.txt", content);
        let mut unit = TextUnit::open(&path).unwrap();
        unit.set_protection(false);

        let written = unit.write_in_place(true).unwrap();

        assert_eq!(written, path);
        let reloaded = TextUnit::open(&path).unwrap();
        assert_eq!(reloaded.original_lines(), unit.original_lines());
        assert_eq!(fs::read_to_string(&path).unwrap(), content);
    }

    #[test]
    fn test_write_protected_always_redirects() {
        let temp = tempdir().unwrap();
        let path = write_file(temp.path(), "a.txt", "a\n// b\n");
        let mut unit = TextUnit::open(&path).unwrap();
        unit.strip_comments();

        let written = unit.write_in_place(true).unwrap();

        assert_ne!(written, path);
        assert_eq!(written, temp.path().join("a.txt.otf"));
        assert_eq!(fs::read_to_string(&written).unwrap(), "a\n");
        assert_eq!(fs::read_to_string(&path).unwrap(), "a\n// b\n");
    }

    #[test]
    fn test_write_unforced_redirects_even_unprotected() {
        let temp = tempdir().unwrap();
        let path = write_file(temp.path(), "a.txt", "a\n");
        let mut unit = TextUnit::open(&path).unwrap();
        unit.set_protection(false);

        let written = unit.write_in_place(false).unwrap();
        assert_eq!(written, temp.path().join("a.txt.otf"));
    }

    #[test]
    fn test_write_to_other_target() {
        let temp = tempdir().unwrap();
        let path = write_file(temp.path(), "a.txt", "a b\n");
        let options = UnitOptions::new()
            .write_protected(false)
            .protect_suffix(".bak");
        let mut unit = TextUnit::open_with(&path, options).unwrap();
        unit.split_by_space();

        let target = temp.path().join("out.txt");
        assert_eq!(unit.write(&target, true).unwrap(), target);
        assert_eq!(fs::read_to_string(&target).unwrap(), "a\nb");

        let redirected = unit.write(&target, false).unwrap();
        assert_eq!(redirected, temp.path().join("out.txt.bak"));
    }

    #[test]
    fn test_write_into_missing_directory_fails() {
        let temp = tempdir().unwrap();
        let path = write_file(temp.path(), "a.txt", "a\n");
        let unit = TextUnit::open(&path).unwrap();

        let err = unit.write(temp.path().join("nope/out.txt"), false).unwrap_err();
        assert!(matches!(err, ReaderError::FileWrite { .. }));
    }

    #[test]
    fn test_describe() {
        let temp = tempdir().unwrap();
        let path = write_file(temp.path(), "a.txt", "abc\n");
        let mut unit = TextUnit::open(&path).unwrap();

        let compact = unit.describe(true);
        assert!(compact.starts_with("a.txt"));
        assert!(compact.contains("4 bytes"));
        assert!(compact.ends_with("original"));

        unit.split_characters();
        let full = unit.describe(false);
        assert!(full.contains("edited"));
        assert!(full.ends_with("4 lines, tokens"));
    }

    #[test]
    fn test_describe_truncates_long_name() {
        let temp = tempdir().unwrap();
        let name = format!("{}.txt", "x".repeat(40));
        let path = write_file(temp.path(), &name, "");
        let unit = TextUnit::open(&path).unwrap();

        let compact = unit.describe(true);
        assert!(compact.starts_with(".."));
        assert!(compact.contains("xxx.txt"));
        assert!(compact.contains("0 bits"));
    }
}
