//! Folder entity - Node of a compendium's folder tree

use serde::{Deserialize, Serialize};

/// A compendium folder
///
/// Folders form a tree through `parent`, which holds the identifier of the
/// containing folder (the host serializes it as `folder`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Folder {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub name: String,
    #[serde(default, rename = "folder", alias = "parent")]
    pub parent: Option<String>,
}

impl Folder {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            parent: None,
        }
    }

    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }
}
