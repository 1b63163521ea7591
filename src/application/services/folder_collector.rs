//! Folder collection - Every folder name of a compendium, mapped to itself
//!
//! Folders are visited depth-first from the roots. A folder appears even when
//! it only holds sub-folders. Traversal tracks visited folder ids, so a
//! malformed parent chain that loops back on itself still terminates.

use std::collections::{HashMap, HashSet};

use serde_json::{Map, Value};

use crate::domain::entities::Folder;

/// Collect `name -> name` for every folder reachable in the tree
pub fn collect_folders(folders: &[Folder]) -> Map<String, Value> {
    let known: HashSet<&str> = folders.iter().map(|folder| folder.id.as_str()).collect();

    let mut children: HashMap<&str, Vec<&Folder>> = HashMap::new();
    let mut roots = Vec::new();
    for folder in folders {
        let parent = folder
            .parent
            .as_deref()
            .filter(|parent| known.contains(parent) && *parent != folder.id);
        match parent {
            Some(parent) => children.entry(parent).or_default().push(folder),
            None => roots.push(folder),
        }
    }

    let mut visited = HashSet::new();
    let mut names = Map::new();

    // Folders caught in a parent cycle have no root above them; the second
    // pass picks them up once.
    for folder in roots.into_iter().chain(folders.iter()) {
        visit(folder, &children, &mut visited, &mut names);
    }

    names
}

fn visit<'a>(
    folder: &'a Folder,
    children: &HashMap<&str, Vec<&'a Folder>>,
    visited: &mut HashSet<&'a str>,
    names: &mut Map<String, Value>,
) {
    if !visited.insert(folder.id.as_str()) {
        return;
    }

    names.insert(folder.name.clone(), Value::String(folder.name.clone()));

    if let Some(subfolders) = children.get(folder.id.as_str()) {
        for subfolder in subfolders.iter().copied() {
            visit(subfolder, children, visited, names);
        }
    }
}
