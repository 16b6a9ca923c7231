//! Read-only path diagnostics.
//!
//! Reports what the filesystem says about a path without changing anything.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

/// What a path points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PathKind {
    File,
    Directory,
    Other,
    NotFound,
}

impl PathKind {
    fn label(self) -> &'static str {
        match self {
            PathKind::File => "file",
            PathKind::Directory => "directory",
            PathKind::Other => "other",
            PathKind::NotFound => "not found",
        }
    }
}

/// One directory entry with its owner.
#[derive(Debug, Clone, Serialize)]
pub struct ListingEntry {
    pub name: String,
    pub kind: PathKind,
    /// Owning user id (unix only)
    pub owner_uid: Option<u32>,
}

/// Facts about a single file.
#[derive(Debug, Clone, Serialize)]
pub struct FileFacts {
    pub size_bytes: u64,
    pub readonly: bool,
    /// Octal permission bits (unix only)
    pub mode: Option<String>,
}

/// Everything `reader inspect` reports about a path.
#[derive(Debug, Clone, Serialize)]
pub struct PathReport {
    pub input: String,
    pub resolved: PathBuf,
    pub working_dir: PathBuf,
    pub base_name: String,
    pub dir_name: String,
    pub extension: String,
    pub kind: PathKind,
    pub absolute: bool,
    pub listing: Vec<ListingEntry>,
    pub file: Option<FileFacts>,
}

fn kind_of(path: &Path) -> PathKind {
    match fs::metadata(path) {
        Ok(meta) if meta.is_file() => PathKind::File,
        Ok(meta) if meta.is_dir() => PathKind::Directory,
        Ok(_) => PathKind::Other,
        Err(_) => PathKind::NotFound,
    }
}

#[cfg(unix)]
fn owner_uid(meta: &fs::Metadata) -> Option<u32> {
    use std::os::unix::fs::MetadataExt;
    Some(meta.uid())
}

#[cfg(not(unix))]
fn owner_uid(_meta: &fs::Metadata) -> Option<u32> {
    None
}

#[cfg(unix)]
fn mode_bits(meta: &fs::Metadata) -> Option<String> {
    use std::os::unix::fs::PermissionsExt;
    Some(format!("{:o}", meta.permissions().mode() & 0o7777))
}

#[cfg(not(unix))]
fn mode_bits(_meta: &fs::Metadata) -> Option<String> {
    None
}

/// Sorted listing of a directory's entries. Unreadable directories list as empty.
fn list_directory(path: &Path) -> Vec<ListingEntry> {
    let Ok(entries) = fs::read_dir(path) else {
        return Vec::new();
    };

    let mut listing: Vec<ListingEntry> = entries
        .filter_map(|e| e.ok())
        .map(|entry| {
            let entry_path = entry.path();
            ListingEntry {
                name: entry.file_name().to_string_lossy().to_string(),
                kind: kind_of(&entry_path),
                owner_uid: fs::symlink_metadata(&entry_path)
                    .ok()
                    .and_then(|m| owner_uid(&m)),
            }
        })
        .collect();
    listing.sort_by(|a, b| a.name.cmp(&b.name));
    listing
}

/// Gather diagnostics for `input`.
pub fn inspect(input: &str) -> PathReport {
    let raw = Path::new(input);
    let working_dir = std::env::current_dir().unwrap_or_default();
    let resolved = std::path::absolute(raw).unwrap_or_else(|_| working_dir.join(raw));
    let kind = kind_of(&resolved);

    let listing = if kind == PathKind::Directory {
        list_directory(&resolved)
    } else {
        Vec::new()
    };

    let file = if kind == PathKind::File {
        fs::metadata(&resolved).ok().map(|meta| FileFacts {
            size_bytes: meta.len(),
            readonly: meta.permissions().readonly(),
            mode: mode_bits(&meta),
        })
    } else {
        None
    };

    PathReport {
        input: input.to_string(),
        base_name: resolved
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default(),
        dir_name: resolved
            .parent()
            .map(|p| p.to_string_lossy().to_string())
            .unwrap_or_default(),
        extension: readerlib::filter::dotted_extension(&resolved),
        absolute: raw.is_absolute(),
        resolved,
        working_dir,
        kind,
        listing,
        file,
    }
}

impl PathReport {
    /// Human-readable report lines.
    pub fn lines(&self) -> Vec<String> {
        let mut out = vec![
            format!("path:        {}", self.input),
            format!("resolved:    {}", self.resolved.display()),
            format!("working dir: {}", self.working_dir.display()),
            format!("base name:   {}", self.base_name),
            format!("directory:   {}", self.dir_name),
            format!("extension:   {}", self.extension),
            format!("type:        {}", self.kind.label()),
            format!(
                "given as:    {}",
                if self.absolute { "absolute" } else { "relative" }
            ),
        ];

        if let Some(file) = &self.file {
            out.push(format!(
                "size:        {}",
                readerlib::format_size(file.size_bytes)
            ));
            out.push(format!(
                "writable:    {}",
                if file.readonly { "no" } else { "yes" }
            ));
            if let Some(mode) = &file.mode {
                out.push(format!("mode:        {}", mode));
            }
        }

        if self.kind == PathKind::Directory {
            out.push(format!("entries:     {}", self.listing.len()));
            for entry in &self.listing {
                let owner = entry
                    .owner_uid
                    .map(|uid| format!("uid {}", uid))
                    .unwrap_or_else(|| "-".to_string());
                out.push(format!(
                    "  {:<32} {:<10} {}",
                    entry.name,
                    entry.kind.label(),
                    owner
                ));
            }
        }

        out
    }
}
