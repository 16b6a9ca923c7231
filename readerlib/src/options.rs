//! Per-unit configuration: comment marker, join mode and write protection.

use serde::{Deserialize, Serialize};

/// Line terminator used when joining token buffers.
pub const LINE_TERMINATOR: &str = "\n";

/// Default comment marker used by [`crate::TextUnit::strip_comments`].
pub const DEFAULT_COMMENT_MARKER: &str = "//";

/// Default suffix appended to protected write targets.
pub const DEFAULT_PROTECT_SUFFIX: &str = ".otf";

/// Shape of a unit's working buffer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// Whole lines, each still carrying its terminator
    #[default]
    Lines,
    /// Tokens produced by one of the split transforms
    Tokens,
}

/// How a working buffer is joined back into text at write time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JoinMode {
    /// Follow the buffer's layout: nothing for lines, a newline for tokens
    #[default]
    Auto,
    /// Always join with nothing
    Lines,
    /// Always join with a newline
    Tokens,
    /// Always join with the given string
    Custom(String),
}

impl JoinMode {
    /// Resolve the separator for a buffer of the given layout.
    pub fn separator(&self, layout: Layout) -> &str {
        match self {
            JoinMode::Auto => match layout {
                Layout::Lines => "",
                Layout::Tokens => LINE_TERMINATOR,
            },
            JoinMode::Lines => "",
            JoinMode::Tokens => LINE_TERMINATOR,
            JoinMode::Custom(sep) => sep,
        }
    }
}

/// Options applied to every unit loaded with them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitOptions {
    /// Marker whose presence anywhere in a line marks it as a comment
    pub comment_marker: String,
    /// Separator policy used by `write`
    pub join_mode: JoinMode,
    /// Redirect writes to a suffixed path
    pub write_protected: bool,
    /// Suffix appended to redirected write targets
    pub protect_suffix: String,
}

impl Default for UnitOptions {
    fn default() -> Self {
        Self {
            comment_marker: DEFAULT_COMMENT_MARKER.to_string(),
            join_mode: JoinMode::Auto,
            write_protected: true,
            protect_suffix: DEFAULT_PROTECT_SUFFIX.to_string(),
        }
    }
}

impl UnitOptions {
    /// Create new default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the comment marker.
    pub fn comment_marker(mut self, marker: impl Into<String>) -> Self {
        self.comment_marker = marker.into();
        self
    }

    /// Set the join mode.
    pub fn join_mode(mut self, mode: JoinMode) -> Self {
        self.join_mode = mode;
        self
    }

    /// Enable or disable write protection.
    pub fn write_protected(mut self, protected: bool) -> Self {
        self.write_protected = protected;
        self
    }

    /// Set the suffix for protected writes.
    pub fn protect_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.protect_suffix = suffix.into();
        self
    }
}
