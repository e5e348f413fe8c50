use std::collections::VecDeque;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::command::CommandNode;
use crate::commands::command_root;
use crate::files::{default_tree, FileNode, FileTree, ROOT};

/// A named action the aphid can take inside a burrow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Driver {
    Move,
    Attack,
}

impl fmt::Display for Driver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Driver::Move => write!(f, "move"),
            Driver::Attack => write!(f, "attack"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aphid {
    pub name: String,
    pub privilege: u32,
    pub current_folder: String,
    pub stability: f64,
    pub memory: u32,
    pub drivers: Vec<Driver>,
}

impl Aphid {
    pub fn new(name: &str) -> Self {
        Aphid {
            name: name.into(),
            privilege: 0,
            current_folder: ROOT.into(),
            stability: 1.0,
            memory: 64,
            drivers: vec![Driver::Move, Driver::Attack, Driver::Move],
        }
    }

    /// Raise privilege to `level`. Never lowers it.
    pub fn unlock_privilege(&mut self, level: u32) -> u32 {
        self.privilege = self.privilege.max(level);
        self.privilege
    }
}

/// Console output lines, oldest first. Entries never contain a newline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageHistory {
    messages: VecDeque<String>,
    limit: usize,
    /// Messages before this index are hidden by `clear`.
    hidden: usize,
}

impl MessageHistory {
    pub fn new(limit: usize) -> Self {
        MessageHistory {
            messages: VecDeque::new(),
            limit: limit.max(1),
            hidden: 0,
        }
    }

    pub fn send_message(&mut self, message: &str) {
        for line in message.split('\n') {
            if self.messages.len() == self.limit {
                self.messages.pop_front();
                self.hidden = self.hidden.saturating_sub(1);
            }
            self.messages.push_back(line.to_string());
        }
    }

    pub fn send_messages<I, S>(&mut self, messages: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for m in messages {
            self.send_message(m.as_ref());
        }
    }

    /// Hide everything sent so far from the viewport.
    pub fn clear_view(&mut self) {
        self.hidden = self.messages.len();
    }

    pub fn clear(&mut self) {
        self.messages.clear();
        self.hidden = 0;
    }

    pub fn set_limit(&mut self, limit: usize) {
        self.limit = limit.max(1);
        while self.messages.len() > self.limit {
            self.messages.pop_front();
            self.hidden = self.hidden.saturating_sub(1);
        }
    }

    /// Messages still in the viewport, oldest first.
    pub fn visible(&self) -> impl DoubleEndedIterator<Item = &str> {
        self.messages.iter().skip(self.hidden).map(|s| s.as_str())
    }

    pub fn all(&self) -> impl Iterator<Item = &str> {
        self.messages.iter().map(|s| s.as_str())
    }

    pub fn last(&self) -> Option<&str> {
        self.messages.back().map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl Default for MessageHistory {
    fn default() -> Self {
        Self::new(1000)
    }
}

/// The running seed system. The command tree is rebuilt rather than saved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedSystem {
    pub aphid: Aphid,
    #[serde(skip, default = "command_root")]
    pub command_root: CommandNode,
    pub file_tree: FileTree,
    pub message_history: MessageHistory,
    #[serde(skip)]
    pub active_program: Option<String>,
    #[serde(skip)]
    pub active_file: Option<FileNode>,
}

impl SeedSystem {
    pub fn new(aphid_name: &str, history_limit: usize) -> Self {
        SeedSystem {
            aphid: Aphid::new(aphid_name),
            command_root: command_root(),
            file_tree: default_tree(),
            message_history: MessageHistory::new(history_limit),
            active_program: None,
            active_file: None,
        }
    }

    pub fn send_message(&mut self, message: &str) {
        self.message_history.send_message(message);
    }

    pub fn send_messages<I, S>(&mut self, messages: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.message_history.send_messages(messages);
    }

    pub fn clear_active(&mut self) {
        self.active_program = None;
        self.active_file = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_evicts_oldest() {
        let mut history = MessageHistory::new(3);
        history.send_messages(["a", "b", "c", "d"]);
        assert_eq!(history.all().collect::<Vec<_>>(), vec!["b", "c", "d"]);
    }

    #[test]
    fn test_history_splits_lines() {
        let mut history = MessageHistory::new(10);
        history.send_message("one\ntwo");
        assert_eq!(history.len(), 2);
        assert_eq!(history.last(), Some("two"));
    }

    #[test]
    fn test_clear_view_keeps_history() {
        let mut history = MessageHistory::new(10);
        history.send_messages(["a", "b"]);
        history.clear_view();
        history.send_message("c");
        assert_eq!(history.visible().collect::<Vec<_>>(), vec!["c"]);
        assert_eq!(history.len(), 3);
    }

    #[test]
    fn test_clear_view_survives_eviction() {
        let mut history = MessageHistory::new(3);
        history.send_messages(["a", "b"]);
        history.clear_view();
        history.send_messages(["c", "d"]);
        assert_eq!(history.visible().collect::<Vec<_>>(), vec!["c", "d"]);
    }

    #[test]
    fn test_unlock_privilege_is_monotone() {
        let mut aphid = Aphid::new("Clippy");
        assert_eq!(aphid.unlock_privilege(2), 2);
        assert_eq!(aphid.unlock_privilege(1), 2);
        assert_eq!(aphid.privilege, 2);
    }

    #[test]
    fn test_new_system_starts_at_root() {
        let system = SeedSystem::new("Clippy", 100);
        assert_eq!(system.aphid.current_folder, ROOT);
        assert!(system.active_program.is_none());
        assert!(system.file_tree.get(ROOT).unwrap().is_folder());
    }
}
