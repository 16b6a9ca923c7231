//! Named groups of collections.

use serde::Serialize;
use tracing::debug;

use crate::collection::{Collection, NAME_WIDTH};
use crate::error::ReaderError;
use crate::format::column;
use crate::Result;

/// A named, ordered set of collections.
///
/// Child names are expected to be unique but this is not enforced; lookups
/// return the first match.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Library {
    name: String,
    children: Vec<Collection>,
}

impl Library {
    /// Create a library from zero or more collections.
    pub fn new(name: impl Into<String>, children: impl IntoIterator<Item = Collection>) -> Self {
        Self {
            name: name.into(),
            children: children.into_iter().collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn children(&self) -> &[Collection] {
        &self.children
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Append a collection.
    pub fn add(&mut self, child: Collection) -> &Collection {
        debug!(library = %self.name, collection = %child.name(), "added collection");
        self.children.push(child);
        &self.children[self.children.len() - 1]
    }

    /// Drop every collection with the given name. Returns how many were dropped.
    pub fn remove(&mut self, name: &str) -> usize {
        let before = self.children.len();
        self.children.retain(|c| c.name() != name);
        before - self.children.len()
    }

    pub fn get(&self, name: &str) -> Option<&Collection> {
        self.children.iter().find(|c| c.name() == name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Collection> {
        self.children.iter_mut().find(|c| c.name() == name)
    }

    /// First collection with the given name (case-sensitive).
    pub fn lookup(&self, name: &str) -> Result<&Collection> {
        let owner = &self.name;
        self.children
            .iter()
            .find(|c| c.name() == name)
            .ok_or_else(|| not_found(name, owner))
    }

    pub fn lookup_mut(&mut self, name: &str) -> Result<&mut Collection> {
        let owner = &self.name;
        self.children
            .iter_mut()
            .find(|c| c.name() == name)
            .ok_or_else(|| not_found(name, owner))
    }

    /// Child names in order.
    pub fn list_children(&self) -> Vec<&str> {
        self.children.iter().map(|c| c.name()).collect()
    }

    /// One-line summary: name, collection count and total file count.
    pub fn describe(&self) -> String {
        let files: usize = self.children.iter().map(Collection::len).sum();
        format!(
            "{} {:>5} collections {:>6} files",
            column(&self.name, NAME_WIDTH),
            self.children.len(),
            files
        )
    }
}

fn not_found(name: &str, owner: &str) -> ReaderError {
    ReaderError::MemberNotFound {
        kind: "collection",
        name: name.to_string(),
        owner: owner.to_string(),
    }
}
