use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::TreeError;
use crate::path::{last_token, parent_of, tokenize};

pub const ROOT: &str = "seed";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeKind {
    Folder,
    File { extension: String },
}

/// What a file points at. Asset names refer to entries in `assets`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Payload {
    None,
    Text {
        text_src: String,
    },
    Board {
        board_src: String,
        player_spawn: (i32, i32),
        difficulty: u32,
    },
    Unlock {
        text_src: String,
        privilege: u32,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileNode {
    pub name: String,
    pub kind: NodeKind,
    pub privilege_required: u32,
    pub payload: Payload,
}

impl FileNode {
    pub fn folder(name: &str, privilege_required: u32) -> Self {
        FileNode {
            name: name.into(),
            kind: NodeKind::Folder,
            privilege_required,
            payload: Payload::None,
        }
    }

    pub fn file(name: &str, extension: &str, privilege_required: u32, payload: Payload) -> Self {
        FileNode {
            name: name.into(),
            kind: NodeKind::File {
                extension: extension.into(),
            },
            privilege_required,
            payload,
        }
    }

    pub fn is_folder(&self) -> bool {
        matches!(self.kind, NodeKind::Folder)
    }

    pub fn extension(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::File { extension } => Some(extension),
            NodeKind::Folder => None,
        }
    }
}

/// Flat path → node mapping that remembers insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileTree {
    order: Vec<String>,
    nodes: HashMap<String, FileNode>,
}

impl FileTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node. Every non-root path needs its parent folder present.
    pub fn insert(&mut self, path: &str, node: FileNode) -> Result<(), TreeError> {
        let key = tokenize(path)?.join("/");
        if self.nodes.contains_key(&key) {
            return Err(TreeError::Duplicate(key));
        }
        let parent = parent_of(&key);
        if !parent.is_empty() && !self.get(&parent).map(|p| p.is_folder()).unwrap_or(false) {
            return Err(TreeError::MissingParent(key));
        }
        self.order.push(key.clone());
        self.nodes.insert(key, node);
        Ok(())
    }

    pub fn get(&self, path: &str) -> Option<&FileNode> {
        self.nodes.get(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.nodes.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(|s| s.as_str())
    }

    /// Direct children of `folder`, in insertion order. With `full_path`
    /// the full keys are returned, otherwise just the last token.
    pub fn folder_contents(&self, folder: &str, full_path: bool) -> Result<Vec<String>, TreeError> {
        if !self.contains(folder) {
            return Err(TreeError::NotFound(folder.into()));
        }
        Ok(self
            .paths()
            .filter(|p| parent_of(p) == folder)
            .map(|p| {
                if full_path {
                    p.to_string()
                } else {
                    last_token(p).unwrap_or(p).to_string()
                }
            })
            .collect())
    }
}

fn text(src: &str) -> Payload {
    Payload::Text {
        text_src: src.into(),
    }
}

/// The file tree every new seed system starts with.
pub fn default_tree() -> FileTree {
    let entries = [
        ("seed", FileNode::folder("seed", 0)),
        ("seed/Welcome.txt", FileNode::file("Welcome", "txt", 0, text("Welcome.txt"))),
        ("seed/documents", FileNode::folder("documents", 1)),
        ("seed/documents/notes.txt", FileNode::file("notes", "txt", 1, text("notes.txt"))),
        ("seed/applications", FileNode::folder("applications", 1)),
        ("seed/applications/tutorial", FileNode::folder("tutorial", 1)),
        (
            "seed/applications/tutorial/aphid_README.txt",
            FileNode::file("aphid_README", "txt", 1, text("aphid_README.txt")),
        ),
        (
            "seed/applications/tutorial/aphid_tutorial.sprout",
            FileNode::file(
                "aphid_tutorial",
                "sprout",
                2,
                Payload::Board {
                    board_src: "tutorial_board.txt".into(),
                    player_spawn: (4, 2),
                    difficulty: 1,
                },
            ),
        ),
        ("seed/seedOS", FileNode::folder("seedOS", 3)),
        (
            "seed/seedOS/clearance.sprout",
            FileNode::file(
                "clearance",
                "sprout",
                3,
                Payload::Unlock {
                    text_src: "clearance.txt".into(),
                    privilege: 4,
                },
            ),
        ),
    ];
    let mut tree = FileTree::new();
    for (path, node) in entries {
        // Entries are listed parent-first, so insertion cannot fail.
        if let Err(e) = tree.insert(path, node) {
            log::error!("default file tree: {}", e);
        }
    }
    tree
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_tree() -> FileTree {
        let mut tree = FileTree::new();
        tree.insert("seed", FileNode::folder("seed", 0)).unwrap();
        tree.insert("seed/a.txt", FileNode::file("a", "txt", 0, Payload::None))
            .unwrap();
        tree.insert("seed/b", FileNode::folder("b", 0)).unwrap();
        tree
    }

    #[test]
    fn test_folder_contents_insertion_order() {
        let tree = small_tree();
        assert_eq!(tree.folder_contents("seed", false).unwrap(), vec!["a.txt", "b"]);
        assert_eq!(
            tree.folder_contents("seed", true).unwrap(),
            vec!["seed/a.txt", "seed/b"]
        );
        assert!(tree.folder_contents("seed/b", false).unwrap().is_empty());
    }

    #[test]
    fn test_folder_contents_missing() {
        let tree = small_tree();
        assert_eq!(
            tree.folder_contents("seed/nope", false),
            Err(TreeError::NotFound("seed/nope".into()))
        );
    }

    #[test]
    fn test_insert_requires_parent() {
        let mut tree = small_tree();
        assert_eq!(
            tree.insert("seed/x/y", FileNode::folder("y", 0)),
            Err(TreeError::MissingParent("seed/x/y".into()))
        );
        assert_eq!(
            tree.insert("seed/a.txt/y", FileNode::folder("y", 0)),
            Err(TreeError::MissingParent("seed/a.txt/y".into()))
        );
        assert!(matches!(
            tree.insert("seed/b", FileNode::folder("b", 0)),
            Err(TreeError::Duplicate(_))
        ));
    }

    #[test]
    fn test_default_tree_is_well_formed() {
        let tree = default_tree();
        assert_eq!(tree.len(), 10);
        for path in tree.paths() {
            let parent = parent_of(path);
            assert!(parent.is_empty() || tree.get(&parent).unwrap().is_folder());
        }
        assert_eq!(
            tree.folder_contents(ROOT, false).unwrap(),
            vec!["Welcome.txt", "documents", "applications", "seedOS"]
        );
    }
}
