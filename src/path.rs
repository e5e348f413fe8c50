//! Virtual file-tree paths.
//!
//! Paths are slash-delimited strings without a leading slash (`seed/documents`).
//! The root folder is the single-token path `seed`; its parent is the empty
//! string.

use crate::error::PathError;

fn trim(path: &str) -> &str {
    path.trim_matches(|c: char| c == '/' || c.is_whitespace())
}

/// Split a path into its tokens, ignoring leading/trailing slashes and whitespace.
pub fn tokenize(path: &str) -> Result<Vec<&str>, PathError> {
    let trimmed = trim(path);
    if trimmed.is_empty() {
        return Err(PathError::Empty);
    }
    Ok(trimmed.split('/').collect())
}

pub fn to_path(tokens: &[&str]) -> String {
    tokens.join("/")
}

/// All tokens but the last, joined. Empty for the root and for empty input.
pub fn parent_of(path: &str) -> String {
    match tokenize(path) {
        Ok(tokens) => to_path(&tokens[..tokens.len() - 1]),
        Err(_) => String::new(),
    }
}

pub fn last_token(path: &str) -> Option<&str> {
    tokenize(path).ok().and_then(|tokens| tokens.last().copied())
}

fn join(base: &str, token: &str) -> String {
    trim(&format!("{}/{}", base, token)).to_string()
}

/// Resolve `relative` against `current_folder`.
///
/// `.` keeps the folder, `..` steps to the parent but never above the root,
/// anything else descends.
pub fn resolve(current_folder: &str, relative: &str) -> String {
    let tokens: Vec<&str> = trim(relative).split('/').collect();
    if !tokens.iter().any(|t| *t == "." || *t == "..") {
        return join(current_folder, relative);
    }
    let mut folder = trim(current_folder).to_string();
    for token in tokens {
        match token {
            "." => {}
            ".." => {
                let parent = parent_of(&folder);
                if !parent.is_empty() {
                    folder = parent;
                }
            }
            other => folder = join(&folder, other),
        }
    }
    folder
}
