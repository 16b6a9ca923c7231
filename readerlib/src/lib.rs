//! # readerlib
//!
//! Load text files into reversible line buffers, transform them, and write the
//! result back without clobbering the source.
//!
//! ## Overview
//!
//! The library has three layers:
//!
//! - **[`TextUnit`]**: one file, held as an immutable original snapshot plus a
//!   working copy that transforms operate on
//! - **[`Collection`]**: a named set of units scanned once from a directory,
//!   filtered by extension
//! - **[`Library`]**: a named set of collections
//!
//! Units and collections are addressed by name through explicit lookups that
//! fail with [`ReaderError::MemberNotFound`] when nothing matches.
//!
//! ## Transforms
//!
//! - **Comment stripping**: drop lines containing a marker (default `//`)
//! - **Blank-line removal**: drop lines that are only a line terminator
//! - **Tokenizing**: split into words, word/punctuation tokens, or characters
//!
//! Any transform can be undone with [`TextUnit::reset`].
//!
//! ## Writing
//!
//! Units are write protected by default: writes land on the target path plus
//! a suffix (`.otf` unless configured). The target itself is written only when
//! protection is off *and* the write is forced.
//!
//! ## Example
//!
//! ```rust
//! use readerlib::{Collection, Library};
//! use std::fs;
//! use tempfile::tempdir;
//!
//! let dir = tempdir().unwrap();
//! fs::write(dir.path().join("a.txt"), "hello, world!\n").unwrap();
//! fs::write(dir.path().join("b.md"), "# title\n").unwrap();
//!
//! let mut texts = Collection::scan("texts", dir.path(), &[".txt"]).unwrap();
//! let unit = texts.lookup_mut("a").unwrap();
//! unit.split_punctuation();
//! assert_eq!(unit.lines(), ["hello", ",", "world", "!"]);
//!
//! let written = unit.write_in_place(true).unwrap();
//! assert_eq!(fs::read_to_string(written).unwrap(), "hello\n,\nworld\n!");
//!
//! let library = Library::new("project", [texts]);
//! assert!(library.lookup("texts").is_ok());
//! assert!(library.lookup("missing").is_err());
//! ```

pub mod collection;
pub mod error;
pub mod filter;
pub mod format;
pub mod library;
pub mod options;
pub mod transform;
pub mod unit;

pub use collection::{AddTarget, Collection};
pub use error::{ErrorKind, ReaderError};
pub use filter::ExtensionFilter;
pub use format::{format_size, truncate_name};
pub use library::Library;
pub use options::{JoinMode, Layout, UnitOptions};
pub use unit::TextUnit;

/// Result type for readerlib operations
pub type Result<T> = std::result::Result<T, ReaderError>;
