use std::collections::VecDeque;

use crate::key::Key;

/// Blocking key source plus screen geometry, supplied by the host.
pub trait Terminal {
    /// Block until the next key press. `None` means the input is closed.
    fn poll_key_press(&mut self) -> Option<Key>;
    fn screen_size(&self) -> (u16, u16);
}

/// A terminal that replays a fixed sequence of keys.
pub struct ScriptedTerminal {
    keys: VecDeque<Key>,
    size: (u16, u16),
}

impl ScriptedTerminal {
    pub fn new(size: (u16, u16)) -> Self {
        ScriptedTerminal {
            keys: VecDeque::new(),
            size,
        }
    }

    pub fn push(&mut self, key: Key) -> &mut Self {
        self.keys.push_back(key);
        self
    }

    /// Queue each char of `text` followed by Enter.
    pub fn type_line(&mut self, text: &str) -> &mut Self {
        for c in text.chars() {
            self.keys.push_back(Key::Char(c));
        }
        self.keys.push_back(Key::Enter);
        self
    }

    pub fn remaining(&self) -> usize {
        self.keys.len()
    }
}

impl Terminal for ScriptedTerminal {
    fn poll_key_press(&mut self) -> Option<Key> {
        self.keys.pop_front()
    }

    fn screen_size(&self) -> (u16, u16) {
        self.size
    }
}
